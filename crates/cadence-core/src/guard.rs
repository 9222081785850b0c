// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Duplicate-period guard.
//!
//! The store only enforces exact-date uniqueness; week-level uniqueness
//! for weekly habits is decided here. The write path asks this question
//! before inserting a completion; the guard itself never mutates anything.

use chrono::NaiveDate;

use crate::habit::Periodicity;
use crate::period::same_period;

/// Whether a candidate completion would fall in an already-satisfied
/// period.
///
/// Daily: true iff a completion exists on exactly `candidate`. Weekly:
/// true iff any completion shares `candidate`'s ISO (year, week). An
/// empty completion list yields false.
pub fn period_already_satisfied(
	periodicity: Periodicity,
	existing: &[NaiveDate],
	candidate: NaiveDate,
) -> bool {
	existing
		.iter()
		.any(|&date| same_period(periodicity, date, candidate))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn d(y: i32, m: u32, day: u32) -> NaiveDate {
		NaiveDate::from_ymd_opt(y, m, day).unwrap()
	}

	#[test]
	fn empty_history_is_never_satisfied() {
		assert!(!period_already_satisfied(Periodicity::Daily, &[], d(2025, 1, 1)));
		assert!(!period_already_satisfied(Periodicity::Weekly, &[], d(2025, 1, 1)));
	}

	#[test]
	fn daily_requires_exact_date_match() {
		let existing = [d(2025, 1, 1), d(2025, 1, 2)];
		assert!(period_already_satisfied(Periodicity::Daily, &existing, d(2025, 1, 2)));
		assert!(!period_already_satisfied(Periodicity::Daily, &existing, d(2025, 1, 3)));
	}

	#[test]
	fn weekly_matches_anywhere_in_the_iso_week() {
		// 2025-01-06 is the Monday of ISO week 2
		let existing = [d(2025, 1, 6)];
		assert!(period_already_satisfied(Periodicity::Weekly, &existing, d(2025, 1, 12)));
		assert!(!period_already_satisfied(Periodicity::Weekly, &existing, d(2025, 1, 13)));
	}

	#[test]
	fn weekly_week_identity_crosses_calendar_years() {
		// 2024-12-30 already sits in ISO week 1 of 2025
		let existing = [d(2024, 12, 30)];
		assert!(period_already_satisfied(Periodicity::Weekly, &existing, d(2025, 1, 2)));
	}
}

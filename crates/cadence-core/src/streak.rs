// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Streak calculator.

use chrono::NaiveDate;

use crate::habit::Periodicity;
use crate::period::{adjacent_periods, same_period};

/// The longest run of consecutive periods in a completion history.
///
/// `dates` must be sorted ascending; the store's completion queries
/// return them that way. The result is the longest run found anywhere in
/// the sequence, not the run ending at the most recent date. Two dates in
/// the same period (the guard should prevent this upstream) continue the
/// current run without extending it.
pub fn longest_streak(periodicity: Periodicity, dates: &[NaiveDate]) -> u32 {
	if dates.is_empty() {
		return 0;
	}

	let mut longest = 1u32;
	let mut current = 1u32;

	for pair in dates.windows(2) {
		let (prev, next) = (pair[0], pair[1]);
		if same_period(periodicity, prev, next) {
			// duplicate inside one period: neither a break nor a double-count
		} else if adjacent_periods(periodicity, prev, next) {
			current += 1;
		} else {
			longest = longest.max(current);
			current = 1;
		}
	}

	longest.max(current)
}

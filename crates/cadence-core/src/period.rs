// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Calendar period model: what a "day" and a "week" mean for streaks.
//!
//! Daily period identity is the calendar date itself. Weekly period
//! identity is the ISO-8601 (year, week) pair: weeks start Monday, week 1
//! is the week containing the first Thursday of the year, and a year has
//! 52 or 53 weeks.

use chrono::{Datelike, NaiveDate};

use crate::habit::Periodicity;

/// The number of the last ISO week of a year: 52 or 53.
///
/// 28 December always falls in the final ISO week of its year.
pub fn last_iso_week(year: i32) -> u32 {
	NaiveDate::from_ymd_opt(year, 12, 28)
		.map(|d| d.iso_week().week())
		.unwrap_or(52)
}

/// Whether two dates fall in the same period.
pub fn same_period(periodicity: Periodicity, a: NaiveDate, b: NaiveDate) -> bool {
	match periodicity {
		Periodicity::Daily => a == b,
		Periodicity::Weekly => a.iso_week() == b.iso_week(),
	}
}

/// Whether `next`'s period directly follows `prev`'s period.
///
/// Daily: the dates differ by exactly one calendar day. Weekly: same ISO
/// year with the week number incremented by one, or the last ISO week of
/// a year (52 or 53) followed by week 1 of the next year.
pub fn adjacent_periods(periodicity: Periodicity, prev: NaiveDate, next: NaiveDate) -> bool {
	match periodicity {
		Periodicity::Daily => (next - prev).num_days() == 1,
		Periodicity::Weekly => {
			let (pw, nw) = (prev.iso_week(), next.iso_week());
			if pw.year() == nw.year() {
				nw.week() == pw.week() + 1
			} else {
				nw.year() == pw.year() + 1
					&& pw.week() == last_iso_week(pw.year())
					&& nw.week() == 1
			}
		}
	}
}

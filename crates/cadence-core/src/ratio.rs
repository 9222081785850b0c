// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Completion-ratio calculator.

use chrono::NaiveDate;

use crate::habit::Periodicity;

/// Completions recorded divided by periods elapsed between `created_on`
/// and `today`.
///
/// Daily habits divide by elapsed days, weekly habits by elapsed whole
/// weeks. Zero or negative elapsed periods yield 0 rather than a division
/// fault. `completions` is the raw stored count; deduplication is the
/// guard's job at write time. Callers pass the wall-clock date for
/// `today` on every call so the ratio is never stale.
pub fn completion_ratio(
	periodicity: Periodicity,
	created_on: NaiveDate,
	completions: u64,
	today: NaiveDate,
) -> f64 {
	let elapsed = match periodicity {
		Periodicity::Daily => (today - created_on).num_days(),
		Periodicity::Weekly => (today - created_on).num_days() / 7,
	};

	if elapsed > 0 {
		completions as f64 / elapsed as f64
	} else {
		0.0
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Habit types for habit tracking.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{HabitsError, Result};

/// Minimum habit name length in characters.
pub const MIN_NAME_LEN: usize = 3;

/// Maximum habit name length in characters.
pub const MAX_NAME_LEN: usize = 20;

/// Recurrence unit of a habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Periodicity {
	/// One period per calendar day
	Daily,
	/// One period per ISO calendar week (Monday-start)
	Weekly,
}

impl Periodicity {
	/// Human-readable unit for one period: "day" or "week".
	pub fn unit(&self) -> &'static str {
		match self {
			Self::Daily => "day",
			Self::Weekly => "week",
		}
	}
}

impl fmt::Display for Periodicity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Daily => write!(f, "daily"),
			Self::Weekly => write!(f, "weekly"),
		}
	}
}

impl FromStr for Periodicity {
	type Err = HabitsError;

	fn from_str(s: &str) -> Result<Self> {
		match s {
			"daily" => Ok(Self::Daily),
			"weekly" => Ok(Self::Weekly),
			_ => Err(HabitsError::UnknownPeriodicity(s.to_string())),
		}
	}
}

/// A recurring habit.
///
/// Identity is the name (unique in the store). The creation date is
/// immutable once set; derived statistics never mutate a habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
	/// Unique name, 3 to 20 characters
	pub name: String,
	pub periodicity: Periodicity,
	/// Calendar date of registration, no time-of-day component
	pub created_on: NaiveDate,
}

impl Habit {
	/// Create a habit, enforcing the name length rule.
	pub fn new(
		name: impl Into<String>,
		periodicity: Periodicity,
		created_on: NaiveDate,
	) -> Result<Self> {
		let name = name.into();
		if !Self::validate_name(&name) {
			return Err(HabitsError::InvalidName(name));
		}
		Ok(Self {
			name,
			periodicity,
			created_on,
		})
	}

	/// Validate a habit name (3 to 20 characters).
	pub fn validate_name(name: &str) -> bool {
		let len = name.chars().count();
		(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len)
	}
}

impl fmt::Display for Habit {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} (created on {})", self.name, self.created_on)
	}
}

/// The habit holding the longest streak of a periodicity.
///
/// `Default` is the empty-name sentinel paired with 0, returned when no
/// habit of the periodicity has any streak.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreakLeader {
	pub habit: String,
	/// Streak length in periods
	pub length: u32,
}

/// Completions recorded divided by periods elapsed since creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRatio {
	pub habit: String,
	/// Raw fraction, not clamped to [0, 1]
	pub ratio: f64,
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The analytics query service.

use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::instrument;

use cadence_core::{
	completion_ratio, longest_streak, period_already_satisfied, CompletionRatio, Periodicity,
	StreakLeader,
};
use cadence_store::{HabitStore, StoreError};

use crate::error::{AnalyticsError, Result};

/// Query service over one habit store handle.
///
/// The handle is passed at construction; there is no ambient default
/// database anywhere in the stack. Every query re-derives its answer from
/// freshly fetched data.
#[derive(Clone)]
pub struct Analytics {
	store: Arc<dyn HabitStore>,
}

impl Analytics {
	pub fn new(store: Arc<dyn HabitStore>) -> Self {
		Self { store }
	}

	/// Longest consecutive-period streak for one habit.
	///
	/// An unknown habit, a habit with no completions, or a habit whose
	/// stored periodicity is unrecognized all report 0; only store
	/// failures are errors.
	#[instrument(skip(self), fields(habit = %name))]
	pub async fn habit_longest_streak(&self, name: &str) -> Result<u32> {
		let habit = match self.store.fetch_habit(name).await {
			Ok(Some(habit)) => habit,
			Ok(None) => return Ok(0),
			Err(StoreError::UnrecognizedPeriodicity { habit, value }) => {
				tracing::warn!(habit = %habit, value = %value, "unrecognized periodicity, reporting zero streak");
				return Ok(0);
			}
			Err(e) => return Err(e.into()),
		};

		let dates = self.store.completion_dates(name).await?;
		Ok(longest_streak(habit.periodicity, &dates))
	}

	/// The habit holding the longest streak among habits of one
	/// periodicity.
	///
	/// Habits are scanned in the store's stable order (periodicity,
	/// creation date, name); ties keep the earlier-scanned habit. With no
	/// qualifying habit the empty-name sentinel is returned.
	#[instrument(skip(self), fields(periodicity = %periodicity))]
	pub async fn longest_streak_holder(&self, periodicity: Periodicity) -> Result<StreakLeader> {
		let habits = self.store.list_habits().await?;
		let mut leader = StreakLeader::default();

		for habit in habits {
			if habit.periodicity != periodicity {
				continue;
			}
			let length = self.habit_longest_streak(&habit.name).await?;
			if length > leader.length {
				leader = StreakLeader {
					habit: habit.name,
					length,
				};
			}
		}

		Ok(leader)
	}

	/// Completion ratios for every habit of a periodicity, evaluated
	/// against today's local calendar date.
	pub async fn completion_ratios(
		&self,
		periodicity: Periodicity,
	) -> Result<Vec<CompletionRatio>> {
		// wall-clock date resolved per call, never cached
		self.completion_ratios_on(periodicity, Local::now().date_naive())
			.await
	}

	/// Completion ratios with an injected evaluation date.
	///
	/// One batched tally fetch per call rather than a round trip per
	/// habit. Results follow the store's per-periodicity name ordering.
	#[instrument(skip(self), fields(periodicity = %periodicity, today = %today))]
	pub async fn completion_ratios_on(
		&self,
		periodicity: Periodicity,
		today: NaiveDate,
	) -> Result<Vec<CompletionRatio>> {
		let tallies = self.store.completion_tallies(periodicity).await?;

		Ok(tallies
			.into_iter()
			.map(|tally| CompletionRatio {
				ratio: completion_ratio(periodicity, tally.created_on, tally.completions, today),
				habit: tally.habit,
			})
			.collect())
	}

	/// Whether logging a completion on `date` would duplicate an
	/// already-satisfied period for the habit.
	///
	/// The write path asks this before inserting; the check itself never
	/// mutates anything.
	#[instrument(skip(self), fields(habit = %name, date = %date))]
	pub async fn period_already_satisfied(&self, name: &str, date: NaiveDate) -> Result<bool> {
		let habit = self
			.store
			.fetch_habit(name)
			.await?
			.ok_or_else(|| AnalyticsError::HabitNotFound(name.to_string()))?;

		let dates = self.store.completion_dates(name).await?;
		Ok(period_already_satisfied(habit.periodicity, &dates, date))
	}
}

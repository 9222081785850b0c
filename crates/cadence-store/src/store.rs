// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Repository layer for habit database operations.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::instrument;

use cadence_core::{Habit, Periodicity};

use crate::error::{Result, StoreError};

/// One habit's completion count plus creation date, batched per
/// periodicity for the ratio calculator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionTally {
	pub habit: String,
	pub created_on: NaiveDate,
	pub completions: u64,
}

/// Repository trait for habit operations.
#[async_trait]
pub trait HabitStore: Send + Sync {
	// Habit operations
	async fn insert_habit(&self, habit: &Habit) -> Result<()>;
	async fn delete_habit(&self, name: &str) -> Result<bool>;
	async fn habit_exists(&self, name: &str) -> Result<bool>;
	async fn fetch_habit(&self, name: &str) -> Result<Option<Habit>>;
	/// All habits, ordered by periodicity, then creation date, then name.
	async fn list_habits(&self) -> Result<Vec<Habit>>;
	/// Habits of one periodicity, ordered by name.
	async fn list_habits_by_periodicity(&self, periodicity: Periodicity) -> Result<Vec<Habit>>;
	async fn count_habits(&self) -> Result<u64>;
	async fn count_habits_by_periodicity(&self, periodicity: Periodicity) -> Result<u64>;

	// Completion operations
	async fn insert_completion(&self, name: &str, date: NaiveDate) -> Result<()>;
	async fn delete_completion(&self, name: &str, date: NaiveDate) -> Result<bool>;
	async fn completion_exists(&self, name: &str, date: NaiveDate) -> Result<bool>;
	/// A habit's completion dates in ascending order.
	async fn completion_dates(&self, name: &str) -> Result<Vec<NaiveDate>>;
	/// Completion counts for every habit of a periodicity in one round
	/// trip, including habits with no completions. Ordered by name.
	async fn completion_tallies(&self, periodicity: Periodicity) -> Result<Vec<CompletionTally>>;
}

/// SQLite implementation of the habit store.
#[derive(Clone)]
pub struct SqliteHabitStore {
	pool: SqlitePool,
}

impl SqliteHabitStore {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}
}

#[async_trait]
impl HabitStore for SqliteHabitStore {
	#[instrument(skip(self, habit), fields(habit = %habit.name, periodicity = %habit.periodicity))]
	async fn insert_habit(&self, habit: &Habit) -> Result<()> {
		sqlx::query(
			r#"
			INSERT INTO habits (habit, periodicity, created_on)
			VALUES (?, ?, ?)
			"#,
		)
		.bind(&habit.name)
		.bind(habit.periodicity.to_string())
		.bind(habit.created_on.to_string())
		.execute(&self.pool)
		.await?;

		Ok(())
	}

	#[instrument(skip(self), fields(habit = %name))]
	async fn delete_habit(&self, name: &str) -> Result<bool> {
		let result = sqlx::query("DELETE FROM habits WHERE habit = ?")
			.bind(name)
			.execute(&self.pool)
			.await?;

		Ok(result.rows_affected() > 0)
	}

	#[instrument(skip(self), fields(habit = %name))]
	async fn habit_exists(&self, name: &str) -> Result<bool> {
		let row: Option<i64> = sqlx::query_scalar("SELECT 1 FROM habits WHERE habit = ?")
			.bind(name)
			.fetch_optional(&self.pool)
			.await?;

		Ok(row.is_some())
	}

	#[instrument(skip(self), fields(habit = %name))]
	async fn fetch_habit(&self, name: &str) -> Result<Option<Habit>> {
		let row = sqlx::query_as::<_, HabitRow>(
			r#"
			SELECT habit, periodicity, created_on
			FROM habits
			WHERE habit = ?
			"#,
		)
		.bind(name)
		.fetch_optional(&self.pool)
		.await?;

		row.map(TryInto::try_into).transpose()
	}

	#[instrument(skip(self))]
	async fn list_habits(&self) -> Result<Vec<Habit>> {
		let rows = sqlx::query_as::<_, HabitRow>(
			r#"
			SELECT habit, periodicity, created_on
			FROM habits
			ORDER BY periodicity ASC, created_on ASC, habit ASC
			"#,
		)
		.fetch_all(&self.pool)
		.await?;

		rows.into_iter().map(TryInto::try_into).collect()
	}

	#[instrument(skip(self), fields(periodicity = %periodicity))]
	async fn list_habits_by_periodicity(&self, periodicity: Periodicity) -> Result<Vec<Habit>> {
		let rows = sqlx::query_as::<_, HabitRow>(
			r#"
			SELECT habit, periodicity, created_on
			FROM habits
			WHERE periodicity = ?
			ORDER BY habit ASC
			"#,
		)
		.bind(periodicity.to_string())
		.fetch_all(&self.pool)
		.await?;

		rows.into_iter().map(TryInto::try_into).collect()
	}

	#[instrument(skip(self))]
	async fn count_habits(&self) -> Result<u64> {
		let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM habits")
			.fetch_one(&self.pool)
			.await?;

		Ok(count as u64)
	}

	#[instrument(skip(self), fields(periodicity = %periodicity))]
	async fn count_habits_by_periodicity(&self, periodicity: Periodicity) -> Result<u64> {
		let count: i64 =
			sqlx::query_scalar("SELECT COUNT(*) FROM habits WHERE periodicity = ?")
				.bind(periodicity.to_string())
				.fetch_one(&self.pool)
				.await?;

		Ok(count as u64)
	}

	#[instrument(skip(self), fields(habit = %name, date = %date))]
	async fn insert_completion(&self, name: &str, date: NaiveDate) -> Result<()> {
		sqlx::query(
			r#"
			INSERT INTO completions (habit, completion_date)
			VALUES (?, ?)
			"#,
		)
		.bind(name)
		.bind(date.to_string())
		.execute(&self.pool)
		.await?;

		Ok(())
	}

	#[instrument(skip(self), fields(habit = %name, date = %date))]
	async fn delete_completion(&self, name: &str, date: NaiveDate) -> Result<bool> {
		let result =
			sqlx::query("DELETE FROM completions WHERE habit = ? AND completion_date = ?")
				.bind(name)
				.bind(date.to_string())
				.execute(&self.pool)
				.await?;

		Ok(result.rows_affected() > 0)
	}

	#[instrument(skip(self), fields(habit = %name, date = %date))]
	async fn completion_exists(&self, name: &str, date: NaiveDate) -> Result<bool> {
		let row: Option<i64> = sqlx::query_scalar(
			"SELECT 1 FROM completions WHERE habit = ? AND completion_date = ?",
		)
		.bind(name)
		.bind(date.to_string())
		.fetch_optional(&self.pool)
		.await?;

		Ok(row.is_some())
	}

	#[instrument(skip(self), fields(habit = %name))]
	async fn completion_dates(&self, name: &str) -> Result<Vec<NaiveDate>> {
		let rows: Vec<String> = sqlx::query_scalar(
			r#"
			SELECT completion_date
			FROM completions
			WHERE habit = ?
			ORDER BY completion_date ASC
			"#,
		)
		.bind(name)
		.fetch_all(&self.pool)
		.await?;

		rows.into_iter()
			.map(|value| {
				value.parse().map_err(|_| StoreError::InvalidDate {
					habit: name.to_string(),
					value,
				})
			})
			.collect()
	}

	#[instrument(skip(self), fields(periodicity = %periodicity))]
	async fn completion_tallies(&self, periodicity: Periodicity) -> Result<Vec<CompletionTally>> {
		let rows = sqlx::query_as::<_, TallyRow>(
			r#"
			SELECT h.habit, h.created_on, COUNT(c.id) AS completions
			FROM habits h
			LEFT JOIN completions c ON c.habit = h.habit
			WHERE h.periodicity = ?
			GROUP BY h.habit, h.created_on
			ORDER BY h.habit ASC
			"#,
		)
		.bind(periodicity.to_string())
		.fetch_all(&self.pool)
		.await?;

		rows.into_iter().map(TryInto::try_into).collect()
	}
}

#[derive(sqlx::FromRow)]
struct HabitRow {
	habit: String,
	periodicity: String,
	created_on: String,
}

impl TryFrom<HabitRow> for Habit {
	type Error = StoreError;

	fn try_from(row: HabitRow) -> Result<Self> {
		let periodicity: Periodicity =
			row.periodicity
				.parse()
				.map_err(|_| StoreError::UnrecognizedPeriodicity {
					habit: row.habit.clone(),
					value: row.periodicity.clone(),
				})?;

		let created_on: NaiveDate =
			row.created_on
				.parse()
				.map_err(|_| StoreError::InvalidDate {
					habit: row.habit.clone(),
					value: row.created_on.clone(),
				})?;

		// no name re-validation here: rows written before the current
		// length rule must still decode
		Ok(Habit {
			name: row.habit,
			periodicity,
			created_on,
		})
	}
}

#[derive(sqlx::FromRow)]
struct TallyRow {
	habit: String,
	created_on: String,
	completions: i64,
}

impl TryFrom<TallyRow> for CompletionTally {
	type Error = StoreError;

	fn try_from(row: TallyRow) -> Result<Self> {
		let created_on: NaiveDate =
			row.created_on
				.parse()
				.map_err(|_| StoreError::InvalidDate {
					habit: row.habit.clone(),
					value: row.created_on.clone(),
				})?;

		Ok(CompletionTally {
			habit: row.habit,
			created_on,
			completions: row.completions as u64,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::create_habit_test_pool;

	fn d(y: i32, m: u32, day: u32) -> NaiveDate {
		NaiveDate::from_ymd_opt(y, m, day).unwrap()
	}

	fn habit(name: &str, periodicity: Periodicity, created: NaiveDate) -> Habit {
		Habit::new(name, periodicity, created).unwrap()
	}

	async fn test_store() -> SqliteHabitStore {
		SqliteHabitStore::new(create_habit_test_pool().await)
	}

	#[tokio::test]
	async fn insert_and_fetch_roundtrip() {
		let store = test_store().await;
		let exercise = habit("Exercise", Periodicity::Daily, d(2025, 1, 1));
		store.insert_habit(&exercise).await.unwrap();

		let fetched = store.fetch_habit("Exercise").await.unwrap().unwrap();
		assert_eq!(fetched, exercise);
		assert!(store.habit_exists("Exercise").await.unwrap());
		assert!(!store.habit_exists("Read").await.unwrap());
	}

	#[tokio::test]
	async fn fetch_missing_habit_is_none() {
		let store = test_store().await;
		assert!(store.fetch_habit("Exercise").await.unwrap().is_none());
	}

	#[tokio::test]
	async fn duplicate_habit_name_is_rejected() {
		let store = test_store().await;
		let exercise = habit("Exercise", Periodicity::Daily, d(2025, 1, 1));
		store.insert_habit(&exercise).await.unwrap();

		let err = store.insert_habit(&exercise).await.unwrap_err();
		assert!(matches!(err, StoreError::Database(_)));
	}

	#[tokio::test]
	async fn list_orders_by_periodicity_creation_then_name() {
		let store = test_store().await;
		store
			.insert_habit(&habit("Read", Periodicity::Weekly, d(2025, 1, 1)))
			.await
			.unwrap();
		store
			.insert_habit(&habit("Exercise", Periodicity::Daily, d(2025, 1, 2)))
			.await
			.unwrap();
		store
			.insert_habit(&habit("Brush teeth", Periodicity::Daily, d(2025, 1, 1)))
			.await
			.unwrap();
		store
			.insert_habit(&habit("Check mails", Periodicity::Weekly, d(2025, 1, 1)))
			.await
			.unwrap();

		let names: Vec<String> = store
			.list_habits()
			.await
			.unwrap()
			.into_iter()
			.map(|h| h.name)
			.collect();
		assert_eq!(names, ["Brush teeth", "Exercise", "Check mails", "Read"]);
	}

	#[tokio::test]
	async fn list_by_periodicity_orders_by_name() {
		let store = test_store().await;
		store
			.insert_habit(&habit("Read", Periodicity::Weekly, d(2025, 1, 1)))
			.await
			.unwrap();
		store
			.insert_habit(&habit("Exercise", Periodicity::Daily, d(2025, 1, 1)))
			.await
			.unwrap();
		store
			.insert_habit(&habit("Check mails", Periodicity::Weekly, d(2025, 1, 1)))
			.await
			.unwrap();

		let names: Vec<String> = store
			.list_habits_by_periodicity(Periodicity::Weekly)
			.await
			.unwrap()
			.into_iter()
			.map(|h| h.name)
			.collect();
		assert_eq!(names, ["Check mails", "Read"]);
	}

	#[tokio::test]
	async fn counts_split_by_periodicity() {
		let store = test_store().await;
		store
			.insert_habit(&habit("Exercise", Periodicity::Daily, d(2025, 1, 1)))
			.await
			.unwrap();
		store
			.insert_habit(&habit("Brush teeth", Periodicity::Daily, d(2025, 1, 1)))
			.await
			.unwrap();
		store
			.insert_habit(&habit("Read", Periodicity::Weekly, d(2025, 1, 1)))
			.await
			.unwrap();

		assert_eq!(store.count_habits().await.unwrap(), 3);
		assert_eq!(
			store
				.count_habits_by_periodicity(Periodicity::Daily)
				.await
				.unwrap(),
			2
		);
		assert_eq!(
			store
				.count_habits_by_periodicity(Periodicity::Weekly)
				.await
				.unwrap(),
			1
		);
	}

	#[tokio::test]
	async fn completion_dates_come_back_ascending() {
		let store = test_store().await;
		store
			.insert_habit(&habit("Exercise", Periodicity::Daily, d(2025, 1, 1)))
			.await
			.unwrap();

		store.insert_completion("Exercise", d(2025, 1, 5)).await.unwrap();
		store.insert_completion("Exercise", d(2025, 1, 1)).await.unwrap();
		store.insert_completion("Exercise", d(2025, 1, 3)).await.unwrap();

		let dates = store.completion_dates("Exercise").await.unwrap();
		assert_eq!(dates, [d(2025, 1, 1), d(2025, 1, 3), d(2025, 1, 5)]);
	}

	#[tokio::test]
	async fn exact_date_uniqueness_is_enforced() {
		let store = test_store().await;
		store
			.insert_habit(&habit("Exercise", Periodicity::Daily, d(2025, 1, 1)))
			.await
			.unwrap();

		store.insert_completion("Exercise", d(2025, 1, 1)).await.unwrap();
		let err = store
			.insert_completion("Exercise", d(2025, 1, 1))
			.await
			.unwrap_err();
		assert!(matches!(err, StoreError::Database(_)));
	}

	#[tokio::test]
	async fn delete_completion_reports_whether_row_existed() {
		let store = test_store().await;
		store
			.insert_habit(&habit("Exercise", Periodicity::Daily, d(2025, 1, 1)))
			.await
			.unwrap();
		store.insert_completion("Exercise", d(2025, 1, 1)).await.unwrap();

		assert!(store.delete_completion("Exercise", d(2025, 1, 1)).await.unwrap());
		assert!(!store.delete_completion("Exercise", d(2025, 1, 1)).await.unwrap());
		assert!(!store.completion_exists("Exercise", d(2025, 1, 1)).await.unwrap());
	}

	#[tokio::test]
	async fn deleting_a_habit_cascades_to_completions() {
		let store = test_store().await;
		store
			.insert_habit(&habit("Exercise", Periodicity::Daily, d(2025, 1, 1)))
			.await
			.unwrap();
		store.insert_completion("Exercise", d(2025, 1, 1)).await.unwrap();
		store.insert_completion("Exercise", d(2025, 1, 2)).await.unwrap();

		assert!(store.delete_habit("Exercise").await.unwrap());
		assert!(!store.delete_habit("Exercise").await.unwrap());
		assert!(store.completion_dates("Exercise").await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn tallies_include_habits_with_no_completions() {
		let store = test_store().await;
		store
			.insert_habit(&habit("Exercise", Periodicity::Daily, d(2025, 1, 1)))
			.await
			.unwrap();
		store
			.insert_habit(&habit("Brush teeth", Periodicity::Daily, d(2025, 1, 2)))
			.await
			.unwrap();
		store
			.insert_habit(&habit("Read", Periodicity::Weekly, d(2025, 1, 1)))
			.await
			.unwrap();

		store.insert_completion("Exercise", d(2025, 1, 1)).await.unwrap();
		store.insert_completion("Exercise", d(2025, 1, 2)).await.unwrap();
		store.insert_completion("Read", d(2025, 1, 1)).await.unwrap();

		let tallies = store
			.completion_tallies(Periodicity::Daily)
			.await
			.unwrap();
		assert_eq!(
			tallies,
			[
				CompletionTally {
					habit: "Brush teeth".to_string(),
					created_on: d(2025, 1, 2),
					completions: 0,
				},
				CompletionTally {
					habit: "Exercise".to_string(),
					created_on: d(2025, 1, 1),
					completions: 2,
				},
			]
		);
	}

	#[tokio::test]
	async fn corrupt_created_on_surfaces_a_typed_error() {
		let store = test_store().await;
		store
			.insert_habit(&habit("Exercise", Periodicity::Daily, d(2025, 1, 1)))
			.await
			.unwrap();

		sqlx::query("UPDATE habits SET created_on = 'not-a-date' WHERE habit = 'Exercise'")
			.execute(&store.pool)
			.await
			.unwrap();

		let err = store.fetch_habit("Exercise").await.unwrap_err();
		assert!(matches!(
			err,
			StoreError::InvalidDate { habit, value }
				if habit == "Exercise" && value == "not-a-date"
		));
	}

	#[test]
	fn unrecognized_periodicity_surfaces_a_typed_error() {
		let row = HabitRow {
			habit: "Exercise".to_string(),
			periodicity: "monthly".to_string(),
			created_on: "2025-01-01".to_string(),
		};

		let err = Habit::try_from(row).unwrap_err();
		assert!(matches!(
			err,
			StoreError::UnrecognizedPeriodicity { habit, value }
				if habit == "Exercise" && value == "monthly"
		));
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Schema bootstrap for the habits database.

use sqlx::SqlitePool;

use crate::error::Result;

/// Create the `habits` and `completions` tables if they do not exist.
///
/// Dates are stored as ISO-8601 `YYYY-MM-DD` TEXT. The `UNIQUE (habit,
/// completion_date)` constraint enforces exact-date uniqueness only;
/// week-level uniqueness is decided by the core guard before insertion.
#[tracing::instrument(skip(pool))]
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS habits (
			habit TEXT PRIMARY KEY,
			periodicity TEXT NOT NULL CHECK (periodicity IN ('daily', 'weekly')),
			created_on TEXT NOT NULL
		)
		"#,
	)
	.execute(pool)
	.await?;

	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS completions (
			id INTEGER PRIMARY KEY AUTOINCREMENT,
			habit TEXT NOT NULL REFERENCES habits(habit) ON DELETE CASCADE,
			completion_date TEXT NOT NULL,
			UNIQUE (habit, completion_date)
		)
		"#,
	)
	.execute(pool)
	.await?;

	tracing::debug!("habits schema initialized");
	Ok(())
}

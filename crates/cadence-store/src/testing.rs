// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

use crate::schema::init_schema;

/// In-memory pool with foreign keys enabled.
///
/// Capped at a single connection: each in-memory SQLite connection is its
/// own database, so a wider pool would scatter tables across connections.
pub async fn create_test_pool() -> SqlitePool {
	let options = SqliteConnectOptions::from_str("sqlite::memory:")
		.unwrap()
		.foreign_keys(true);

	SqlitePoolOptions::new()
		.max_connections(1)
		.connect_with(options)
		.await
		.unwrap()
}

/// In-memory pool with the habits schema applied.
pub async fn create_habit_test_pool() -> SqlitePool {
	let pool = create_test_pool().await;
	init_schema(&pool).await.unwrap();
	pool
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for store operations.

use thiserror::Error;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in store operations.
///
/// Decode variants carry the habit name so a single corrupt row can be
/// located; they are distinct from `Database` so callers can tell a
/// data-integrity anomaly from a connectivity failure.
#[derive(Debug, Error)]
pub enum StoreError {
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),

	#[error("habit {habit:?} has unrecognized periodicity {value:?}")]
	UnrecognizedPeriodicity { habit: String, value: String },

	#[error("habit {habit:?} has invalid date {value:?}")]
	InvalidDate { habit: String, value: String },

	#[error("internal error: {0}")]
	Internal(String),
}

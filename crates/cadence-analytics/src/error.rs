// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for analytics operations.

use thiserror::Error;

use cadence_store::StoreError;

/// Result type for analytics operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;

/// Errors that can occur in analytics operations.
///
/// Empty inputs are never errors here: a habit with no completions or a
/// periodicity with no habits resolves to a zero or sentinel result.
#[derive(Debug, Error)]
pub enum AnalyticsError {
	#[error("habit not found: {0}")]
	HabitNotFound(String),

	#[error(transparent)]
	Store(#[from] StoreError),
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for habit tracking.

use thiserror::Error;

/// Result type for habit operations.
pub type Result<T> = std::result::Result<T, HabitsError>;

/// Errors that can occur in habit operations.
#[derive(Debug, Error)]
pub enum HabitsError {
	#[error("invalid habit name: {0}")]
	InvalidName(String),

	#[error("unknown periodicity: {0}")]
	UnknownPeriodicity(String),
}

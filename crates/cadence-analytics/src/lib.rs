// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Streak and completion-ratio query service for Cadence habit tracking.
//!
//! Composes an explicit [`cadence_store::HabitStore`] handle with the pure
//! calculators in `cadence-core`. "No data" resolves to zero/sentinel
//! results; store failures always surface as errors.

mod error;
mod service;

pub use error::{AnalyticsError, Result};
pub use service::Analytics;

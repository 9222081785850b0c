// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types and the streak/ratio computation engine for Cadence habit
//! tracking.
//!
//! Everything in this crate is synchronous, pure computation over data the
//! caller has already fetched: periodicity, creation date, and an ordered
//! list of completion dates. Persistence lives in `cadence-store`, query
//! orchestration in `cadence-analytics`.

mod error;
mod guard;
mod habit;
mod period;
mod ratio;
mod streak;

pub use error::{HabitsError, Result};
pub use guard::period_already_satisfied;
pub use habit::{CompletionRatio, Habit, Periodicity, StreakLeader, MAX_NAME_LEN, MIN_NAME_LEN};
pub use period::{adjacent_periods, last_iso_week, same_period};
pub use ratio::completion_ratio;
pub use streak::longest_streak;

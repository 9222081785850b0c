// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SQLite persistence layer for Cadence habit tracking.
//!
//! Owns the `habits`/`completions` schema and the [`HabitStore`] trait the
//! analytics layer consumes. The store enforces exact-date uniqueness per
//! habit; week-level uniqueness for weekly habits is the core guard's
//! responsibility at write time.

mod error;
mod pool;
mod schema;
mod store;
pub mod testing;

pub use error::{Result, StoreError};
pub use pool::create_pool;
pub use schema::init_schema;
pub use store::{CompletionTally, HabitStore, SqliteHabitStore};

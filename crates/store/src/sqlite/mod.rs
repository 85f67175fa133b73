// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Graphmark

//! SQLite-backed vertex store.
//!
//! Vertex classes map onto a rowid table plus a property table; class and
//! index definitions live in catalog tables so existence checks are plain
//! reads. The unique property index is a partial index over the property
//! table.

mod config;
mod store;

pub use config::{DbPath, JournalMode, SqliteConfig, SynchronousMode, TempStore};
pub use store::SqliteVertexStore;

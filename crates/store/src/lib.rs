// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Graphmark

#![cfg_attr(not(debug_assertions), deny(warnings))]

//! Reference engine for the benchmark: a SQLite-backed implementation of
//! the [`VertexStore`](graphmark_core::interface::VertexStore) capability
//! interface.

pub mod sqlite;

pub use sqlite::{DbPath, JournalMode, SqliteConfig, SqliteVertexStore, SynchronousMode, TempStore};

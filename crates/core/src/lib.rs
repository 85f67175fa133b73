// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Graphmark

#![cfg_attr(not(debug_assertions), deny(warnings))]

//! Core building blocks of the Graphmark micro-benchmark: the fixed
//! workload definition, the monotonic phase stopwatch, the store capability
//! interface the harness drives, and per-trial result aggregation.

pub mod error;
pub mod interface;
pub mod result;
pub mod stopwatch;
pub mod workload;

pub use error::{Error, Result};

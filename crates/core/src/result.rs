// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Graphmark

//! Per-trial results and cross-trial aggregation.

use std::time::Duration;

use crate::{interface::VertexRecord, stopwatch::TimeUnit};

/// Durations of the four timed phases of one trial, plus the query phase's
/// match, if any. Returned per trial and reduced once at the end of the
/// run; no state crosses trial boundaries except the reduction.
#[derive(Debug, Clone, Default)]
pub struct TrialResult {
	/// 1-based trial index.
	pub trial: u32,
	/// `None` when the index phase was disabled for the run.
	pub index_build: Option<Duration>,
	pub insert: Duration,
	pub commit: Duration,
	pub query: Duration,
	pub found: Option<VertexRecord>,
}

/// Per-phase duration sums across completed trials.
///
/// Sums only ever grow as trials are recorded; the division producing the
/// final averages happens exactly once, in [`Aggregate::averages`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Aggregate {
	index_build: Duration,
	insert: Duration,
	commit: Duration,
	query: Duration,
	trials: u32,
}

impl Aggregate {
	/// Fold one completed trial into the sums.
	pub fn record(&mut self, result: &TrialResult) {
		if let Some(duration) = result.index_build {
			self.index_build += duration;
		}
		self.insert += result.insert;
		self.commit += result.commit;
		self.query += result.query;
		self.trials += 1;
	}

	pub fn trials(&self) -> u32 {
		self.trials
	}

	pub fn index_build_sum(&self) -> Duration {
		self.index_build
	}

	pub fn insert_sum(&self) -> Duration {
		self.insert
	}

	pub fn commit_sum(&self) -> Duration {
		self.commit
	}

	pub fn query_sum(&self) -> Duration {
		self.query
	}

	/// Whole-millisecond averages over `iterations` trials.
	pub fn averages(&self, iterations: u32) -> Averages {
		Averages {
			index_build_ms: Self::average_ms(self.index_build, iterations),
			insert_ms: Self::average_ms(self.insert, iterations),
			commit_ms: Self::average_ms(self.commit, iterations),
			query_ms: Self::average_ms(self.query, iterations),
		}
	}

	fn average_ms(sum: Duration, iterations: u32) -> u128 {
		if iterations == 0 {
			return 0;
		}
		TimeUnit::Millis.convert(sum) / iterations as u128
	}
}

/// Whole-run averages as printed in the final summary block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Averages {
	pub index_build_ms: u128,
	pub insert_ms: u128,
	pub commit_ms: u128,
	pub query_ms: u128,
}

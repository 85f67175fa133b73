// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Graphmark

//! Monotonic phase timing.

use std::time::{Duration, Instant};

/// Granularity for reporting elapsed measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
	Seconds,
	Millis,
	Micros,
	Nanos,
}

impl TimeUnit {
	/// Express a duration in this granularity, truncating any remainder.
	pub fn convert(&self, duration: Duration) -> u128 {
		match self {
			TimeUnit::Seconds => duration.as_secs() as u128,
			TimeUnit::Millis => duration.as_millis(),
			TimeUnit::Micros => duration.as_micros(),
			TimeUnit::Nanos => duration.as_nanos(),
		}
	}
}

/// Measures elapsed time from a fixed reference instant.
///
/// The reference is captured by [`Stopwatch::start`] and never advanced by
/// reads, so intermediate elapsed values can be sampled repeatedly from the
/// same window. Backed by [`Instant`], so wall-clock adjustments cannot
/// distort a measurement.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
	origin: Instant,
}

impl Stopwatch {
	/// Capture the current monotonic instant and begin measuring.
	pub fn start() -> Self {
		Self {
			origin: Instant::now(),
		}
	}

	/// Elapsed time since the reference instant, in the requested unit.
	pub fn elapsed(&self, unit: TimeUnit) -> u128 {
		unit.convert(self.duration())
	}

	/// Elapsed time since the reference instant.
	pub fn duration(&self) -> Duration {
		self.origin.elapsed()
	}

	/// Discard the current window and begin a new measurement.
	pub fn reset(&mut self) {
		self.origin = Instant::now();
	}
}

#[cfg(test)]
mod tests {
	use std::{thread, time::Duration};

	use super::*;

	#[test]
	fn convert_covers_all_units() {
		let duration = Duration::new(2, 345_678_901);
		assert_eq!(TimeUnit::Seconds.convert(duration), 2);
		assert_eq!(TimeUnit::Millis.convert(duration), 2_345);
		assert_eq!(TimeUnit::Micros.convert(duration), 2_345_678);
		assert_eq!(TimeUnit::Nanos.convert(duration), 2_345_678_901);
	}

	#[test]
	fn repeated_reads_do_not_reset_the_window() {
		let watch = Stopwatch::start();
		thread::sleep(Duration::from_millis(5));
		let first = watch.elapsed(TimeUnit::Nanos);
		thread::sleep(Duration::from_millis(5));
		let second = watch.elapsed(TimeUnit::Nanos);
		assert!(second >= first);
	}

	#[test]
	fn reset_starts_a_new_window() {
		let mut watch = Stopwatch::start();
		thread::sleep(Duration::from_millis(10));
		let before = watch.duration();
		watch.reset();
		let after = watch.duration();
		assert!(after < before);
	}
}

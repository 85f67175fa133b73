// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Graphmark

//! The benchmark's observable console output.
//!
//! Everything here is the product surface of the harness, written to the
//! runner's output sink; diagnostics go through `tracing` instead.

use std::{io, io::Write, time::Duration};

use graphmark_core::{
	interface::VertexRecord,
	result::Averages,
	stopwatch::TimeUnit,
};

pub(crate) fn banner(out: &mut impl Write) -> io::Result<()> {
	writeln!(out, "Start evaluation ...")
}

pub(crate) fn progress(out: &mut impl Write, trial: u32, inserted: u64, total: u64) -> io::Result<()> {
	let percent = ((inserted as f64 / total as f64) * 100.0).round() as u32;
	writeln!(out, "[{trial}] Inserting: {percent}%")
}

pub(crate) fn index_phase(out: &mut impl Write, trial: u32, duration: Duration) -> io::Result<()> {
	writeln!(out, "[{trial}] Created index in {}ms", TimeUnit::Millis.convert(duration))
}

pub(crate) fn insert_phase(out: &mut impl Write, trial: u32, duration: Duration) -> io::Result<()> {
	writeln!(out, "[{trial}] Insert duration: {}ms", TimeUnit::Millis.convert(duration))
}

pub(crate) fn commit_phase(out: &mut impl Write, trial: u32, duration: Duration) -> io::Result<()> {
	writeln!(out, "[{trial}] Commit duration: {}ms", TimeUnit::Millis.convert(duration))
}

pub(crate) fn query_phase(out: &mut impl Write, trial: u32, duration: Duration) -> io::Result<()> {
	writeln!(out, "[{trial}] Query duration: {}ms", TimeUnit::Millis.convert(duration))
}

pub(crate) fn found(out: &mut impl Write, trial: u32, property: &str, record: &VertexRecord) -> io::Result<()> {
	writeln!(out, "[{trial}] Found element: [{}] - {property}={}", record.id, record.value)
}

pub(crate) fn summary(out: &mut impl Write, averages: &Averages) -> io::Result<()> {
	writeln!(out)?;
	writeln!(out, "Results:")?;
	writeln!(out, "Insert duration: {}ms", averages.insert_ms)?;
	writeln!(out, "CreateIndex duration: {}ms", averages.index_build_ms)?;
	writeln!(out, "Commit duration: {}ms", averages.commit_ms)?;
	writeln!(out, "Query duration: {}ms", averages.query_ms)
}

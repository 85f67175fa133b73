// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Graphmark

//! Benchmark entry point.
//!
//! Runs the fixed insert / index / commit / lookup workload against the
//! SQLite reference engine. The workload is configured in code with the
//! reference defaults; the sizes can be overridden through `GRAPHMARK_*`
//! environment variables without changing the measured algorithm.

use std::{env, path::PathBuf, process::ExitCode};

use graphmark_core::workload::Workload;
use graphmark_runner::BenchmarkRunner;
use graphmark_store::sqlite::{SqliteConfig, SqliteVertexStore};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
		)
		.with_writer(std::io::stderr)
		.try_init();

	match run() {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			error!(error = %err, "benchmark aborted");
			ExitCode::FAILURE
		}
	}
}

fn run() -> graphmark_core::Result<()> {
	let workload = workload_from_env();
	let data_dir = data_dir();

	let mut runner = BenchmarkRunner::new(workload, move |namespace| {
		SqliteVertexStore::open(SqliteConfig::new(data_dir.join(namespace)))
	});
	runner.run()?;
	Ok(())
}

fn data_dir() -> PathBuf {
	env::var_os("GRAPHMARK_DATA_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| env::temp_dir().join("graphmark"))
}

fn workload_from_env() -> Workload {
	let mut workload = Workload::new();
	if let Some(count) = env_parse::<u64>("GRAPHMARK_VERTEX_COUNT") {
		workload = workload.vertex_count(count);
	}
	if let Some(iterations) = env_parse::<u32>("GRAPHMARK_ITERATIONS") {
		workload = workload.iterations(iterations);
	}
	if let Some(create) = env_bool("GRAPHMARK_CREATE_INDEX") {
		workload = workload.create_index(create);
	}
	workload
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
	let value = env::var(key).ok()?;
	match value.parse() {
		Ok(parsed) => Some(parsed),
		Err(_) => {
			warn!(key, %value, "ignoring unparsable environment override");
			None
		}
	}
}

fn env_bool(key: &str) -> Option<bool> {
	let value = env::var(key).ok()?;
	match value.as_str() {
		"1" | "true" => Some(true),
		"0" | "false" => Some(false),
		_ => {
			warn!(key, %value, "ignoring unparsable environment override");
			None
		}
	}
}

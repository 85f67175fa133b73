// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Graphmark

use std::io::{self, Write};

use graphmark_core::{
	Result,
	interface::VertexStore,
	result::{Aggregate, Averages, TrialResult},
	stopwatch::Stopwatch,
	workload::Workload,
};
use tracing::debug;

use crate::report;

/// Progress is reported once per this many insertions.
const PROGRESS_EVERY: u64 = 10_000;

/// Everything the run produced: one result per trial plus the averaged
/// summary printed at the end.
#[derive(Debug, Clone)]
pub struct RunReport {
	pub trials: Vec<TrialResult>,
	pub averages: Averages,
}

/// Drives exactly `iterations` independent trials of the fixed workload.
///
/// Each trial acquires a fresh store from the factory under its own
/// namespace, runs the timed phases strictly in sequence, and releases the
/// store before the next trial begins. Trial results are reduced into the
/// final averages exactly once, after the loop.
pub struct BenchmarkRunner<F, W> {
	workload: Workload,
	open_store: F,
	out: W,
}

impl<S, F> BenchmarkRunner<F, io::Stdout>
where
	S: VertexStore,
	F: FnMut(&str) -> Result<S>,
{
	/// Runner printing to stdout. The factory is invoked once per trial
	/// with the trial's namespace.
	pub fn new(workload: Workload, open_store: F) -> Self {
		Self::with_output(workload, open_store, io::stdout())
	}
}

impl<S, F, W> BenchmarkRunner<F, W>
where
	S: VertexStore,
	F: FnMut(&str) -> Result<S>,
	W: Write,
{
	/// Runner writing the observable output to an arbitrary sink.
	pub fn with_output(workload: Workload, open_store: F, out: W) -> Self {
		Self {
			workload,
			open_store,
			out,
		}
	}

	/// Run all trials to completion. Any store failure aborts the run.
	pub fn run(&mut self) -> Result<RunReport> {
		report::banner(&mut self.out)?;

		let mut aggregate = Aggregate::default();
		let mut trials = Vec::with_capacity(self.workload.iterations as usize);
		for trial in 1..=self.workload.iterations {
			let result = self.run_trial(trial)?;
			aggregate.record(&result);
			trials.push(result);
		}

		let averages = aggregate.averages(self.workload.iterations);
		report::summary(&mut self.out, &averages)?;

		Ok(RunReport {
			trials,
			averages,
		})
	}

	fn run_trial(&mut self, trial: u32) -> Result<TrialResult> {
		let namespace = self.workload.namespace(trial);
		let mut store = (self.open_store)(&namespace)?;
		debug!(trial, namespace = %namespace, "store acquired");

		store.declare_bulk_intent()?;

		let index_build = if self.workload.create_index {
			let timer = Stopwatch::start();
			store.ensure_unique_index(
				&self.workload.vertex_class,
				&self.workload.property,
				self.workload.collation,
			)?;
			let duration = timer.duration();
			report::index_phase(&mut self.out, trial, duration)?;
			Some(duration)
		} else {
			None
		};

		let timer = Stopwatch::start();
		for j in 0..self.workload.vertex_count {
			let value = self.workload.property_value(j);
			store.insert_vertex(
				&self.workload.vertex_class,
				&[(self.workload.property.as_str(), value.as_str())],
			)?;
			if j % PROGRESS_EVERY == 0 {
				report::progress(&mut self.out, trial, j, self.workload.vertex_count)?;
			}
		}
		let insert = timer.duration();
		report::insert_phase(&mut self.out, trial, insert)?;

		let timer = Stopwatch::start();
		store.commit()?;
		let commit = timer.duration();
		report::commit_phase(&mut self.out, trial, commit)?;

		let timer = Stopwatch::start();
		let found = store.find_by_property(
			&self.workload.vertex_class,
			&self.workload.property,
			&self.workload.lookup_value(),
		)?;
		if let Some(record) = &found {
			report::found(&mut self.out, trial, &self.workload.property, record)?;
		}
		let query = timer.duration();
		report::query_phase(&mut self.out, trial, query)?;

		store.close()?;
		debug!(trial, namespace = %namespace, "store released");

		Ok(TrialResult {
			trial,
			index_build,
			insert,
			commit,
			query,
			found,
		})
	}
}

#[cfg(test)]
mod tests {
	use std::{cell::RefCell, collections::HashMap, rc::Rc, time::Duration};

	use graphmark_core::{
		interface::{Collation, VertexId, VertexRecord},
		workload::Workload,
	};

	use super::*;

	#[derive(Debug, Clone, PartialEq, Eq)]
	enum Event {
		Opened(String),
		BulkIntent,
		CreateType,
		CreateIndex,
		Commit,
		Closed(String),
	}

	#[derive(Default)]
	struct SharedState {
		events: Vec<Event>,
	}

	struct MockStore {
		namespace: String,
		state: Rc<RefCell<SharedState>>,
		classes: Vec<String>,
		indexes: Vec<(String, String)>,
		vertices: HashMap<String, u64>,
		next_id: u64,
	}

	impl MockStore {
		fn open(namespace: &str, state: Rc<RefCell<SharedState>>) -> Self {
			state.borrow_mut().events.push(Event::Opened(namespace.to_string()));
			Self {
				namespace: namespace.to_string(),
				state,
				classes: Vec::new(),
				indexes: Vec::new(),
				vertices: HashMap::new(),
				next_id: 1,
			}
		}
	}

	impl VertexStore for MockStore {
		fn declare_bulk_intent(&mut self) -> Result<()> {
			self.state.borrow_mut().events.push(Event::BulkIntent);
			Ok(())
		}

		fn vertex_type_exists(&self, class: &str) -> Result<bool> {
			Ok(self.classes.iter().any(|c| c == class))
		}

		fn create_vertex_type(&mut self, class: &str) -> Result<()> {
			self.state.borrow_mut().events.push(Event::CreateType);
			self.classes.push(class.to_string());
			Ok(())
		}

		fn unique_index_exists(&self, class: &str, property: &str) -> Result<bool> {
			Ok(self.indexes.iter().any(|(c, p)| c == class && p == property))
		}

		fn create_unique_index(&mut self, class: &str, property: &str, _collation: Collation) -> Result<()> {
			self.state.borrow_mut().events.push(Event::CreateIndex);
			self.indexes.push((class.to_string(), property.to_string()));
			Ok(())
		}

		fn insert_vertex(&mut self, _class: &str, properties: &[(&str, &str)]) -> Result<VertexId> {
			let id = self.next_id;
			self.next_id += 1;
			for (_, value) in properties {
				self.vertices.insert(value.to_string(), id);
			}
			Ok(VertexId(id))
		}

		fn commit(&mut self) -> Result<()> {
			self.state.borrow_mut().events.push(Event::Commit);
			Ok(())
		}

		fn find_by_property(&self, _class: &str, _property: &str, value: &str) -> Result<Option<VertexRecord>> {
			Ok(self.vertices.get(value).map(|id| VertexRecord {
				id: VertexId(*id),
				value: value.to_string(),
			}))
		}

		fn close(self) -> Result<()> {
			self.state.borrow_mut().events.push(Event::Closed(self.namespace));
			Ok(())
		}
	}

	fn run_with_mock(workload: Workload) -> (RunReport, Rc<RefCell<SharedState>>, String) {
		let state = Rc::new(RefCell::new(SharedState::default()));
		let factory_state = Rc::clone(&state);
		let mut out = Vec::new();
		let mut runner = BenchmarkRunner::with_output(
			workload,
			move |namespace| Ok(MockStore::open(namespace, Rc::clone(&factory_state))),
			&mut out,
		);
		let report = runner.run().unwrap();
		drop(runner);
		(report, state, String::from_utf8(out).unwrap())
	}

	#[test]
	fn runs_one_trial_per_iteration_under_distinct_namespaces() {
		let workload = Workload::new().vertex_count(10).iterations(3);
		let (report, state, _) = run_with_mock(workload);

		assert_eq!(report.trials.len(), 3);
		let state = state.borrow();
		let opened: Vec<_> = state
			.events
			.iter()
			.filter_map(|event| match event {
				Event::Opened(namespace) => Some(namespace.clone()),
				_ => None,
			})
			.collect();
		assert_eq!(opened, vec!["testdb1", "testdb2", "testdb3"]);
	}

	#[test]
	fn each_store_is_released_before_the_next_opens() {
		let workload = Workload::new().vertex_count(1).iterations(2);
		let (_, state, _) = run_with_mock(workload);

		let state = state.borrow();
		let closed_first = state
			.events
			.iter()
			.position(|event| *event == Event::Closed("testdb1".to_string()))
			.unwrap();
		let opened_second = state
			.events
			.iter()
			.position(|event| *event == Event::Opened("testdb2".to_string()))
			.unwrap();
		assert!(closed_first < opened_second);
	}

	#[test]
	fn index_phase_is_skipped_when_disabled() {
		let workload = Workload::new().vertex_count(5).iterations(2).create_index(false);
		let (report, state, output) = run_with_mock(workload);

		let state = state.borrow();
		assert!(!state.events.contains(&Event::CreateType));
		assert!(!state.events.contains(&Event::CreateIndex));
		assert!(report.trials.iter().all(|trial| trial.index_build.is_none()));
		assert_eq!(report.averages.index_build_ms, 0);
		assert!(!output.contains("Created index"));
	}

	#[test]
	fn index_phase_creates_type_and_index_when_enabled() {
		let workload = Workload::new().vertex_count(5).iterations(2).create_index(true);
		let (report, state, output) = run_with_mock(workload);

		let state = state.borrow();
		let creations =
			state.events.iter().filter(|event| **event == Event::CreateIndex).count();
		// one creation per trial: every trial starts from a fresh store
		assert_eq!(creations, 2);
		assert!(report.trials.iter().all(|trial| trial.index_build.is_some()));
		assert!(output.contains("[1] Created index in"));
		assert!(output.contains("[2] Created index in"));
	}

	#[test]
	fn bulk_intent_is_declared_once_per_trial() {
		let workload = Workload::new().vertex_count(1).iterations(3);
		let (_, state, _) = run_with_mock(workload);

		let state = state.borrow();
		let hints = state.events.iter().filter(|event| **event == Event::BulkIntent).count();
		assert_eq!(hints, 3);
	}

	#[test]
	fn lookup_hits_the_midpoint_vertex_by_default() {
		let workload = Workload::new().vertex_count(100).iterations(1);
		let (report, _, output) = run_with_mock(workload);

		let found = report.trials[0].found.as_ref().expect("midpoint vertex inserted");
		assert_eq!(found.value, "email50@example.com");
		assert!(output.contains("Found element:"));
		assert!(output.contains("email=email50@example.com"));
	}

	#[test]
	fn explicit_lookup_key_is_found_in_every_trial() {
		let workload = Workload::new().vertex_count(1_000).iterations(2).lookup_index(544);
		let (report, _, output) = run_with_mock(workload);

		for trial in &report.trials {
			let found = trial.found.as_ref().expect("vertex 544 inserted");
			assert_eq!(found.value, "email544@example.com");
		}
		assert!(output.contains("[1] Found element:"));
		assert!(output.contains("[2] Found element:"));
	}

	#[test]
	fn averages_equal_sums_divided_by_iterations() {
		let workload = Workload::new().vertex_count(50).iterations(4);
		let (report, _, _) = run_with_mock(workload.clone());

		let mut aggregate = Aggregate::default();
		for trial in &report.trials {
			aggregate.record(trial);
		}
		assert_eq!(report.averages, aggregate.averages(workload.iterations));
	}

	#[test]
	fn empty_workload_prints_no_progress_and_finds_nothing() {
		let workload = Workload::new().vertex_count(0).iterations(1);
		let (report, _, output) = run_with_mock(workload);

		assert!(!output.contains("Inserting:"));
		assert!(!output.contains("Found element:"));
		assert!(report.trials[0].found.is_none());
		assert!(report.trials[0].insert <= Duration::from_secs(1));
	}

	#[test]
	fn progress_lines_appear_every_ten_thousand_insertions() {
		let workload = Workload::new().vertex_count(20_001).iterations(1);
		let (_, _, output) = run_with_mock(workload);

		assert!(output.contains("[1] Inserting: 0%"));
		assert!(output.contains("[1] Inserting: 50%"));
		assert!(output.contains("[1] Inserting: 100%"));
		assert_eq!(output.matches("Inserting:").count(), 3);
	}

	#[test]
	fn output_ends_with_the_averaged_summary_block() {
		let workload = Workload::new().vertex_count(10).iterations(2);
		let (report, _, output) = run_with_mock(workload);

		assert!(output.starts_with("Start evaluation ...\n"));
		let summary_at = output.find("\nResults:\n").expect("summary block");
		let summary = &output[summary_at..];
		assert!(summary.contains(&format!("Insert duration: {}ms", report.averages.insert_ms)));
		assert!(summary.contains(&format!("CreateIndex duration: {}ms", report.averages.index_build_ms)));
		assert!(summary.contains(&format!("Commit duration: {}ms", report.averages.commit_ms)));
		assert!(summary.contains(&format!("Query duration: {}ms", report.averages.query_ms)));
	}
}

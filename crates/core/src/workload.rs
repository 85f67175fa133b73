// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Graphmark

//! The fixed benchmark workload.

use crate::interface::Collation;

/// Parameters of the insert / index / commit / lookup workload.
///
/// Immutable for the whole run; every trial executes the same workload
/// against a fresh store namespace. Defaults reproduce the reference
/// workload: one million vertices, five trials, no index.
#[derive(Debug, Clone)]
pub struct Workload {
	/// Number of vertices inserted per trial.
	pub vertex_count: u64,
	/// Number of independent trials.
	pub iterations: u32,
	/// Whether the timed index phase runs at all.
	pub create_index: bool,
	/// Comparison rule of the unique index.
	pub collation: Collation,
	/// Vertex type the workload populates.
	pub vertex_class: String,
	/// The indexed property.
	pub property: String,
	/// Prefix of every generated property value.
	pub key_prefix: String,
	/// Suffix of every generated property value.
	pub key_suffix: String,
	/// Prefix of the per-trial store namespace.
	pub namespace_prefix: String,
	lookup_index: Option<u64>,
}

impl Workload {
	pub fn new() -> Self {
		Self {
			vertex_count: 1_000_000,
			iterations: 5,
			create_index: false,
			collation: Collation::Binary,
			vertex_class: "user".to_string(),
			property: "email".to_string(),
			key_prefix: "email".to_string(),
			key_suffix: "@example.com".to_string(),
			namespace_prefix: "testdb".to_string(),
			lookup_index: None,
		}
	}

	pub fn vertex_count(mut self, count: u64) -> Self {
		self.vertex_count = count;
		self
	}

	pub fn iterations(mut self, iterations: u32) -> Self {
		self.iterations = iterations;
		self
	}

	pub fn create_index(mut self, create: bool) -> Self {
		self.create_index = create;
		self
	}

	pub fn collation(mut self, collation: Collation) -> Self {
		self.collation = collation;
		self
	}

	pub fn vertex_class(mut self, class: impl Into<String>) -> Self {
		self.vertex_class = class.into();
		self
	}

	pub fn property(mut self, property: impl Into<String>) -> Self {
		self.property = property.into();
		self
	}

	pub fn namespace_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.namespace_prefix = prefix.into();
		self
	}

	/// Pin the lookup to a specific insert index instead of the midpoint.
	pub fn lookup_index(mut self, index: u64) -> Self {
		self.lookup_index = Some(index);
		self
	}

	/// The property value inserted for loop index `j`.
	///
	/// Values are unique over the full insert range and reproducible from
	/// `j` alone.
	pub fn property_value(&self, j: u64) -> String {
		format!("{}{}{}", self.key_prefix, j, self.key_suffix)
	}

	/// Insert index targeted by the query phase. Defaults to the midpoint
	/// of the insert range, so the lookup always matches when any vertices
	/// were inserted.
	pub fn effective_lookup_index(&self) -> u64 {
		self.lookup_index.unwrap_or(self.vertex_count / 2)
	}

	/// The property value the query phase looks for.
	pub fn lookup_value(&self) -> String {
		self.property_value(self.effective_lookup_index())
	}

	/// Logical store namespace of the given 1-based trial.
	pub fn namespace(&self, trial: u32) -> String {
		format!("{}{}", self.namespace_prefix, trial)
	}
}

impl Default for Workload {
	fn default() -> Self {
		Self::new()
	}
}

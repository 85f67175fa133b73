// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Graphmark

//! Store capability interface.
//!
//! The benchmark drives any engine that can register a vertex type,
//! maintain a unique property index, insert property-carrying vertices,
//! commit, and answer an exact-match property lookup. The harness never
//! depends on the engine's internal representation; any store implementing
//! [`VertexStore`] is substitutable.

use std::fmt;

use crate::Result;

/// Opaque vertex identifier assigned by the backing engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexId(pub u64);

impl fmt::Display for VertexId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// A vertex matched by a property lookup: its identifier and the stored
/// value of the queried property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexRecord {
	pub id: VertexId,
	pub value: String,
}

/// Comparison rule of a unique property index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collation {
	/// Byte-wise comparison.
	Binary,
	/// Case-insensitive comparison.
	CaseInsensitive,
}

/// Capability contract of the benchmarked engine.
pub trait VertexStore {
	/// Hint that a large sequential write burst follows. Engines without
	/// a bulk write mode keep the default no-op; the hint is never fatal.
	fn declare_bulk_intent(&mut self) -> Result<()> {
		Ok(())
	}

	fn vertex_type_exists(&self, class: &str) -> Result<bool>;

	/// Register `class` as a vertex type. Fails with a schema conflict if
	/// the type already exists.
	fn create_vertex_type(&mut self, class: &str) -> Result<()>;

	fn unique_index_exists(&self, class: &str, property: &str) -> Result<bool>;

	/// Create a unique index on `property` of `class`, making the property
	/// mandatory for subsequent inserts. Fails with an index conflict if
	/// the index already exists.
	fn create_unique_index(&mut self, class: &str, property: &str, collation: Collation) -> Result<()>;

	/// Idempotent type-and-index setup: existing definitions are detected
	/// and kept, never recreated.
	fn ensure_unique_index(&mut self, class: &str, property: &str, collation: Collation) -> Result<()> {
		if !self.vertex_type_exists(class)? {
			self.create_vertex_type(class)?;
		}
		if !self.unique_index_exists(class, property)? {
			self.create_unique_index(class, property, collation)?;
		}
		Ok(())
	}

	/// Insert one vertex with all of its properties. Indexed properties
	/// must be present here; they cannot be attached after creation.
	fn insert_vertex(&mut self, class: &str, properties: &[(&str, &str)]) -> Result<VertexId>;

	/// Flush every buffered write to durable storage.
	fn commit(&mut self) -> Result<()>;

	/// Exact-match lookup of a single vertex by property value. Absence of
	/// a match is not an error.
	fn find_by_property(&self, class: &str, property: &str, value: &str) -> Result<Option<VertexRecord>>;

	/// Release the store and its backing resources, persisting any pending
	/// state first.
	fn close(self) -> Result<()>
	where
		Self: Sized;
}

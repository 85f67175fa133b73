// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Graphmark

use std::path::PathBuf;

/// Where the backing database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbPath {
	/// On-disk database. A directory path gets a `graph.db` file appended;
	/// missing parent directories are created on open.
	File(PathBuf),
	/// Private in-memory database, gone when the store is closed.
	Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalMode {
	Wal,
	Memory,
	Off,
	Delete,
}

impl JournalMode {
	pub fn as_str(&self) -> &'static str {
		match self {
			JournalMode::Wal => "WAL",
			JournalMode::Memory => "MEMORY",
			JournalMode::Off => "OFF",
			JournalMode::Delete => "DELETE",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynchronousMode {
	Off,
	Normal,
	Full,
}

impl SynchronousMode {
	pub fn as_str(&self) -> &'static str {
		match self {
			SynchronousMode::Off => "OFF",
			SynchronousMode::Normal => "NORMAL",
			SynchronousMode::Full => "FULL",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempStore {
	Default,
	File,
	Memory,
}

impl TempStore {
	pub fn as_str(&self) -> &'static str {
		match self {
			TempStore::Default => "DEFAULT",
			TempStore::File => "FILE",
			TempStore::Memory => "MEMORY",
		}
	}
}

/// Connection configuration for [`SqliteVertexStore`](super::SqliteVertexStore).
#[derive(Debug, Clone)]
pub struct SqliteConfig {
	pub path: DbPath,
	pub journal_mode: JournalMode,
	pub synchronous_mode: SynchronousMode,
	pub temp_store: TempStore,
}

impl SqliteConfig {
	/// On-disk store rooted at `path`.
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: DbPath::File(path.into()),
			journal_mode: JournalMode::Wal,
			synchronous_mode: SynchronousMode::Normal,
			temp_store: TempStore::Memory,
		}
	}

	/// Private in-memory store, useful for tests and micro-benchmarks.
	pub fn in_memory() -> Self {
		Self {
			path: DbPath::Memory,
			journal_mode: JournalMode::Memory,
			synchronous_mode: SynchronousMode::Off,
			temp_store: TempStore::Memory,
		}
	}

	pub fn journal_mode(mut self, mode: JournalMode) -> Self {
		self.journal_mode = mode;
		self
	}

	pub fn synchronous_mode(mut self, mode: SynchronousMode) -> Self {
		self.synchronous_mode = mode;
		self
	}

	pub fn temp_store(mut self, temp_store: TempStore) -> Self {
		self.temp_store = temp_store;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn file_config_defaults() {
		let config = SqliteConfig::new("/tmp/graphmark");
		assert_eq!(config.path, DbPath::File(PathBuf::from("/tmp/graphmark")));
		assert_eq!(config.journal_mode, JournalMode::Wal);
		assert_eq!(config.synchronous_mode, SynchronousMode::Normal);
	}

	#[test]
	fn builder_overrides_apply() {
		let config = SqliteConfig::new("/tmp/graphmark")
			.journal_mode(JournalMode::Off)
			.synchronous_mode(SynchronousMode::Off)
			.temp_store(TempStore::File);
		assert_eq!(config.journal_mode, JournalMode::Off);
		assert_eq!(config.synchronous_mode, SynchronousMode::Off);
		assert_eq!(config.temp_store, TempStore::File);
	}

	#[test]
	fn pragma_values_match_sqlite_keywords() {
		assert_eq!(JournalMode::Wal.as_str(), "WAL");
		assert_eq!(SynchronousMode::Normal.as_str(), "NORMAL");
		assert_eq!(TempStore::Memory.as_str(), "MEMORY");
	}
}

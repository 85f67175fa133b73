// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Graphmark

use std::{
	collections::{HashMap, HashSet},
	fs,
	path::{Path, PathBuf},
};

use graphmark_core::{
	Error, Result,
	interface::{Collation, VertexId, VertexRecord, VertexStore},
};
use rusqlite::{Connection, ErrorCode, OptionalExtension, params};
use tracing::debug;

use super::config::{DbPath, SqliteConfig};

/// A single-connection SQLite store implementing the vertex capability
/// interface.
///
/// Inserts run inside an implicitly opened transaction; `commit` ends it.
/// Class and index definitions are cached from the catalog tables on open,
/// so the existence checks used by idempotent setup are in-memory reads.
pub struct SqliteVertexStore {
	conn: Connection,
	in_tx: bool,
	classes: HashSet<String>,
	indexed: HashMap<String, HashMap<String, Collation>>,
}

impl SqliteVertexStore {
	/// Open (or create) the database described by `config` and bootstrap
	/// the catalog tables.
	pub fn open(config: SqliteConfig) -> Result<Self> {
		let conn = match &config.path {
			DbPath::File(path) => {
				let db_path = resolve_db_path(path)?;
				Connection::open(db_path).map_err(Error::storage)?
			}
			DbPath::Memory => Connection::open_in_memory().map_err(Error::storage)?,
		};

		conn.pragma_update(None, "journal_mode", config.journal_mode.as_str()).map_err(Error::storage)?;
		conn.pragma_update(None, "synchronous", config.synchronous_mode.as_str())
			.map_err(Error::storage)?;
		conn.pragma_update(None, "temp_store", config.temp_store.as_str()).map_err(Error::storage)?;

		conn.execute_batch(
			"BEGIN;
			 CREATE TABLE IF NOT EXISTS vertex_class (
			     name TEXT PRIMARY KEY
			 );
			 CREATE TABLE IF NOT EXISTS vertex_index (
			     name      TEXT PRIMARY KEY,
			     class     TEXT NOT NULL,
			     property  TEXT NOT NULL,
			     collation TEXT NOT NULL,
			     UNIQUE (class, property)
			 );
			 COMMIT;",
		)
		.map_err(Error::storage)?;

		let classes = load_classes(&conn)?;
		let indexed = load_indexes(&conn)?;

		Ok(Self {
			conn,
			in_tx: false,
			classes,
			indexed,
		})
	}

	fn begin_if_needed(&mut self) -> Result<()> {
		if !self.in_tx {
			self.conn.execute_batch("BEGIN").map_err(Error::storage)?;
			self.in_tx = true;
		}
		Ok(())
	}
}

impl VertexStore for SqliteVertexStore {
	fn declare_bulk_intent(&mut self) -> Result<()> {
		// journal_mode cannot change inside an open transaction, so the
		// hint only takes effect between write bursts
		for (pragma, value) in [("synchronous", "OFF"), ("journal_mode", "MEMORY")] {
			if let Err(err) = self.conn.pragma_update(None, pragma, value) {
				debug!(pragma, error = %err, "bulk write hint not applied");
			}
		}
		Ok(())
	}

	fn vertex_type_exists(&self, class: &str) -> Result<bool> {
		validate_ident(class)?;
		Ok(self.classes.contains(class))
	}

	fn create_vertex_type(&mut self, class: &str) -> Result<()> {
		if self.vertex_type_exists(class)? {
			return Err(Error::SchemaConflict {
				class: class.to_string(),
			});
		}
		self.conn
			.execute("INSERT INTO vertex_class (name) VALUES (?1)", [class])
			.map_err(Error::storage)?;
		self.conn
			.execute_batch(&format!(
				"CREATE TABLE {vertex} (id INTEGER PRIMARY KEY AUTOINCREMENT);
				 CREATE TABLE {property} (
				     vertex_id INTEGER NOT NULL,
				     name      TEXT NOT NULL,
				     value     TEXT NOT NULL,
				     PRIMARY KEY (vertex_id, name)
				 );",
				vertex = vertex_table(class),
				property = property_table(class),
			))
			.map_err(Error::storage)?;
		self.classes.insert(class.to_string());
		Ok(())
	}

	fn unique_index_exists(&self, class: &str, property: &str) -> Result<bool> {
		validate_ident(class)?;
		validate_ident(property)?;
		Ok(self.indexed.get(class).is_some_and(|properties| properties.contains_key(property)))
	}

	fn create_unique_index(&mut self, class: &str, property: &str, collation: Collation) -> Result<()> {
		if self.unique_index_exists(class, property)? {
			return Err(Error::IndexConflict {
				class: class.to_string(),
				property: property.to_string(),
			});
		}
		let name = index_name(class, property);
		let collate = match collation {
			Collation::CaseInsensitive => " COLLATE NOCASE",
			Collation::Binary => "",
		};
		// partial index keyed on the one indexed property; lookups inline
		// the property name so the planner can match it
		self.conn
			.execute_batch(&format!(
				"CREATE UNIQUE INDEX \"{name}\" ON {table} (value{collate}) WHERE name = '{property}';",
				table = property_table(class),
			))
			.map_err(|err| constraint_error(property, err))?;
		self.conn
			.execute(
				"INSERT INTO vertex_index (name, class, property, collation) VALUES (?1, ?2, ?3, ?4)",
				params![name, class, property, collation_keyword(collation)],
			)
			.map_err(Error::storage)?;
		self.indexed.entry(class.to_string()).or_default().insert(property.to_string(), collation);
		Ok(())
	}

	fn insert_vertex(&mut self, class: &str, properties: &[(&str, &str)]) -> Result<VertexId> {
		if !self.vertex_type_exists(class)? {
			self.create_vertex_type(class)?;
		}
		if let Some(indexed) = self.indexed.get(class) {
			for property in indexed.keys() {
				if !properties.iter().any(|(name, _)| *name == property.as_str()) {
					return Err(Error::ConstraintViolation {
						property: property.clone(),
						message: "mandatory indexed property must be supplied at creation time"
							.to_string(),
					});
				}
			}
		}
		self.begin_if_needed()?;
		let id = {
			let mut stmt = self
				.conn
				.prepare_cached(&format!("INSERT INTO {} DEFAULT VALUES", vertex_table(class)))
				.map_err(Error::storage)?;
			stmt.execute([]).map_err(Error::storage)?;
			self.conn.last_insert_rowid() as u64
		};
		let mut stmt = self
			.conn
			.prepare_cached(&format!(
				"INSERT INTO {} (vertex_id, name, value) VALUES (?1, ?2, ?3)",
				property_table(class)
			))
			.map_err(Error::storage)?;
		for (name, value) in properties {
			stmt.execute(params![id as i64, name, value]).map_err(|err| constraint_error(name, err))?;
		}
		Ok(VertexId(id))
	}

	fn commit(&mut self) -> Result<()> {
		if self.in_tx {
			self.conn.execute_batch("COMMIT").map_err(Error::storage)?;
			self.in_tx = false;
		}
		Ok(())
	}

	fn find_by_property(&self, class: &str, property: &str, value: &str) -> Result<Option<VertexRecord>> {
		validate_ident(class)?;
		validate_ident(property)?;
		if !self.classes.contains(class) {
			return Ok(None);
		}
		let collate = match self.indexed.get(class).and_then(|properties| properties.get(property)) {
			Some(Collation::CaseInsensitive) => " COLLATE NOCASE",
			_ => "",
		};
		let sql = format!(
			"SELECT vertex_id, value FROM {table} WHERE name = '{property}' AND value = ?1{collate} LIMIT 1",
			table = property_table(class),
		);
		self.conn
			.query_row(&sql, [value], |row| {
				Ok(VertexRecord {
					id: VertexId(row.get::<_, i64>(0)? as u64),
					value: row.get(1)?,
				})
			})
			.optional()
			.map_err(Error::storage)
	}

	fn close(mut self) -> Result<()> {
		self.commit()?;
		// fold any WAL segment back into the main database file before
		// the handle goes away
		let _ = self.conn.query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_| Ok(()));
		self.conn.close().map_err(|(_, err)| Error::storage(err))
	}
}

/// Directories get a database file appended; parents are created as needed.
fn resolve_db_path(path: &Path) -> Result<PathBuf> {
	if path.extension().is_none() {
		fs::create_dir_all(path)?;
		Ok(path.join("graph.db"))
	} else {
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent)?;
		}
		Ok(path.to_path_buf())
	}
}

fn load_classes(conn: &Connection) -> Result<HashSet<String>> {
	let mut stmt = conn.prepare("SELECT name FROM vertex_class").map_err(Error::storage)?;
	let rows = stmt.query_map([], |row| row.get::<_, String>(0)).map_err(Error::storage)?;
	let mut classes = HashSet::new();
	for row in rows {
		classes.insert(row.map_err(Error::storage)?);
	}
	Ok(classes)
}

fn load_indexes(conn: &Connection) -> Result<HashMap<String, HashMap<String, Collation>>> {
	let mut stmt =
		conn.prepare("SELECT class, property, collation FROM vertex_index").map_err(Error::storage)?;
	let rows = stmt
		.query_map([], |row| {
			Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?))
		})
		.map_err(Error::storage)?;
	let mut indexed: HashMap<String, HashMap<String, Collation>> = HashMap::new();
	for row in rows {
		let (class, property, collation) = row.map_err(Error::storage)?;
		indexed.entry(class).or_default().insert(property, parse_collation(&collation));
	}
	Ok(indexed)
}

fn collation_keyword(collation: Collation) -> &'static str {
	match collation {
		Collation::Binary => "binary",
		Collation::CaseInsensitive => "nocase",
	}
}

fn parse_collation(keyword: &str) -> Collation {
	match keyword {
		"nocase" => Collation::CaseInsensitive,
		_ => Collation::Binary,
	}
}

fn vertex_table(class: &str) -> String {
	format!("\"v_{class}\"")
}

fn property_table(class: &str) -> String {
	format!("\"v_{class}_p\"")
}

fn index_name(class: &str, property: &str) -> String {
	format!("{class}.{property}.index")
}

/// Class and property names end up inside SQL text, so they are restricted
/// to ascii alphanumerics and underscores.
fn validate_ident(ident: &str) -> Result<()> {
	let valid = !ident.is_empty() && ident.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
	if valid {
		Ok(())
	} else {
		Err(Error::storage(format!("invalid identifier '{ident}'")))
	}
}

fn constraint_error(property: &str, err: rusqlite::Error) -> Error {
	match &err {
		rusqlite::Error::SqliteFailure(failure, _) if failure.code == ErrorCode::ConstraintViolation => {
			Error::ConstraintViolation {
				property: property.to_string(),
				message: err.to_string(),
			}
		}
		_ => Error::storage(err),
	}
}

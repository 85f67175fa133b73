// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Graphmark

use std::error;

/// Result alias shared by all graphmark crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal benchmark errors.
///
/// The harness has no retry policy: the workload is deterministic and
/// idempotent per trial, so every error aborts the run and leaves the
/// trial's namespace behind for inspection.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("i/o error: {0}")]
	Io(#[from] std::io::Error),

	#[error("storage error: {0}")]
	Storage(#[source] Box<dyn error::Error + Send + Sync>),

	#[error("vertex type '{class}' already exists")]
	SchemaConflict { class: String },

	#[error("unique index on '{class}.{property}' already exists")]
	IndexConflict { class: String, property: String },

	#[error("constraint violation on property '{property}': {message}")]
	ConstraintViolation { property: String, message: String },
}

impl Error {
	/// Wrap a backend-specific failure as a fatal storage error.
	pub fn storage(err: impl Into<Box<dyn error::Error + Send + Sync>>) -> Self {
		Error::Storage(err.into())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn storage_wraps_message() {
		let err = Error::storage("backend unavailable");
		assert_eq!(err.to_string(), "storage error: backend unavailable");
	}

	#[test]
	fn constraint_violation_names_property() {
		let err = Error::ConstraintViolation {
			property: "email".to_string(),
			message: "duplicate value".to_string(),
		};
		assert_eq!(err.to_string(), "constraint violation on property 'email': duplicate value");
	}
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Graphmark

use std::{env, fs, path::Path, path::PathBuf};

use graphmark_core::Result;
use uuid::Uuid;

/// Run `f` inside a fresh scratch directory, removing the directory again
/// afterwards regardless of the outcome.
pub fn temp_dir<F, T>(f: F) -> Result<T>
where
	F: FnOnce(&Path) -> Result<T>,
{
	let path = temp_path();
	fs::create_dir_all(&path)?;

	let result = f(&path);

	let _ = fs::remove_dir_all(&path);
	result
}

/// A unique, not-yet-created path under the system temp directory. Callers
/// that keep it around (benches) are responsible for cleanup.
pub fn temp_path() -> PathBuf {
	env::temp_dir().join(format!("graphmark-{}", Uuid::new_v4()))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn temp_dir_removes_the_directory_after_use() {
		let mut seen = PathBuf::new();
		temp_dir(|path| {
			seen = path.to_path_buf();
			assert!(path.is_dir());
			Ok(())
		})
		.unwrap();
		assert!(!seen.exists());
	}

	#[test]
	fn temp_dir_cleans_up_on_error() {
		let mut seen = PathBuf::new();
		let result: Result<()> = temp_dir(|path| {
			seen = path.to_path_buf();
			Err(graphmark_core::Error::storage("boom"))
		});
		assert!(result.is_err());
		assert!(!seen.exists());
	}

	#[test]
	fn temp_paths_are_distinct() {
		assert_ne!(temp_path(), temp_path());
	}
}

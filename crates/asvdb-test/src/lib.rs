// Dweve ASVDb - Benchmark results database
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Shared test fixtures and utilities for ASVDb.
//!
//! This crate provides canonical environments, benchmark results and
//! on-disk documents used by the tests of every ASVDb crate.
//!
//! # Features
//!
//! - **Record fixtures**: ready-made [`BenchmarkInfo`]s and
//!   [`BenchmarkResult`]s, including the `sort` growth scenario
//! - **Builder**: [`ResultBuilder`] for one-off results
//! - **Legacy database**: a small database written by older tools (float
//!   version markers, numeric axis values, per-commit sub-grids)
//! - **Error fixtures**: malformed documents for decode-error tests
//!
//! # Quick Start
//!
//! ```rust
//! use asvdb_test::fixtures::{self, builders::ResultBuilder};
//!
//! let info = fixtures::info();
//! assert_eq!(info.machine_name(), "sm01");
//!
//! let result = ResultBuilder::new("sort").param("n", 100).result(1.2).build();
//! assert_eq!(result.param("n"), Some("100"));
//!
//! let dir = asvdb_test::legacy_db_dir();
//! assert!(dir.join("asv.conf.json").exists());
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub use asvdb_core::{BenchmarkInfo, BenchmarkResult};

/// Canonical test fixtures.
pub mod fixtures;

pub use fixtures::builders::ResultBuilder;

/// Directory of the checked-in legacy database.
pub fn legacy_db_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("legacy_db")
}

/// Copy the legacy database into `dest`, creating it if needed.
pub fn copy_legacy_db(dest: &Path) -> io::Result<()> {
    copy_tree(&legacy_db_dir(), dest)
}

/// Write `text` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, text: &str) -> io::Result<PathBuf> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, text)?;
    Ok(path)
}

/// Every regular file under `root` with its contents, keyed by path
/// relative to `root`. Used to assert that an operation left a database
/// byte-for-byte unchanged.
pub fn snapshot(root: &Path) -> io::Result<Vec<(PathBuf, Vec<u8>)>> {
    let mut files = Vec::new();
    collect(root, root, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect(root: &Path, dir: &Path, out: &mut Vec<(PathBuf, Vec<u8>)>) -> io::Result<()> {
    if !dir.exists() {
        return Ok(());
    }
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect(root, &path, out)?;
        } else {
            let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
            out.push((relative, fs::read(&path)?));
        }
    }
    Ok(())
}

fn copy_tree(src: &Path, dest: &Path) -> io::Result<()> {
    fs::create_dir_all(dest)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_db_layout() {
        let dir = legacy_db_dir();
        assert!(dir.join("asv.conf.json").is_file());
        assert!(dir.join("results/benchmarks.json").is_file());
        assert!(dir.join("results/sm01/machine.json").is_file());
    }

    #[test]
    fn test_snapshot_is_sorted_and_relative() {
        let files = snapshot(&legacy_db_dir()).unwrap();
        let names: Vec<_> = files.iter().map(|(p, _)| p.clone()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert!(names.iter().all(|p| p.is_relative()));
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn test_snapshot_of_missing_dir_is_empty() {
        let missing = legacy_db_dir().join("does-not-exist");
        assert!(snapshot(&missing).unwrap().is_empty());
    }
}

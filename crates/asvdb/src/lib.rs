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

//! # ASVDb
//!
//! ASVDb stores benchmark results as the set of JSON documents that
//! [airspeed velocity](https://asv.readthedocs.io) publishes from, and reads
//! them back as typed records.
//!
//! ```text
//! <db>/asv.conf.json
//! <db>/results/benchmarks.json
//! <db>/results/<machine>/machine.json
//! <db>/results/<machine>/<commit>.json
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use asvdb::{AsvDb, BenchmarkInfo, BenchmarkResult, DbConfig, ResultFilter};
//!
//! # fn main() -> asvdb::AsvdbResult<()> {
//! # let dir = std::env::temp_dir().join(format!("asvdb-doc-{}", std::process::id()));
//! let db = AsvDb::open(&dir, DbConfig::new("https://github.com/rapidsai/cugraph"));
//!
//! let info = BenchmarkInfo::builder()
//!     .machine_name("sm01")
//!     .commit_hash("c0ffee01")
//!     .commit_time(1_571_346_000_000)
//!     .build()?;
//!
//! db.add_result(&info, &BenchmarkResult::new("sort", [("n", 100)], 1.2)?)?;
//! db.add_result(&info, &BenchmarkResult::new("sort", [("n", 200)], 2.4)?)?;
//!
//! let set = db.get_results(&ResultFilter::all().function("sort"))?;
//! assert_eq!(set.len(), 2);
//! # std::fs::remove_dir_all(&dir).ok();
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - **Grid reconciliation**: a benchmark's parameter axes only ever grow;
//!   when they do, every stored result vector of that benchmark is
//!   re-laid out so no measurement is lost
//! - **All-or-nothing writes**: every document an operation touches is
//!   loaded and validated before the first byte is written, and each
//!   document is replaced atomically
//! - **Tolerant reads**: a damaged document is reported alongside the
//!   results of every other document
//!
//! ## Modules
//!
//! - [`grid`]: parameter grids and the reconciler
//! - [`json`]: the on-disk document types

mod config;
mod filter;
mod storage;
mod store;

pub use config::{
    max_document_size_from_env, DbConfig, DbConfigBuilder, DEFAULT_MAX_DOCUMENT_SIZE,
    MAX_FILE_SIZE_ENV,
};
pub use filter::ResultFilter;
pub use store::{AsvDb, ResultSet};

pub use asvdb_core::{AsvdbError, AsvdbResult, BenchmarkInfo, BenchmarkInfoBuilder, BenchmarkResult, DEFAULT_UNIT};

pub mod grid {
    //! Parameter grids and reconciliation
    pub use asvdb_core::grid::{degrid, reconcile};
    pub use asvdb_core::{BenchmarkAxes, Grid, Placement, ResultVector};
}

pub mod json {
    //! On-disk document types
    pub use asvdb_json::{
        decode_document, encode_document, AsvDocument, BenchmarkEntry, BenchmarksDocument,
        CommitDocument, ConfigDocument, DocumentKind, MachineDocument, ResultEntry,
        BENCHMARKS_FILE_NAME, CONFIG_FILE_NAME, MACHINE_FILE_NAME,
    };
}

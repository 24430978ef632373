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

//! ASVDb JSON documents
//!
//! Typed views of the four JSON documents that make up an ASV results
//! database, and the codec that reads and writes them.
//!
//! ```text
//! <db>/asv.conf.json                       ConfigDocument
//! <db>/results/benchmarks.json             BenchmarksDocument
//! <db>/results/<machine>/machine.json      MachineDocument
//! <db>/results/<machine>/<commit>.json     CommitDocument
//! ```
//!
//! # Features
//!
//! - **Forward compatible**: keys this crate does not know about are kept in
//!   an `extra` map on every object and written back unchanged
//! - **Lenient values**: parameter axis values written as numbers, booleans
//!   or null by other tools are read as strings
//! - **Schema versions**: documents declaring a newer schema than this crate
//!   understands are refused instead of being silently rewritten
//!
//! # Example
//!
//! ```rust
//! use asvdb_json::{decode_document, encode_document, MachineDocument};
//! use std::path::Path;
//!
//! let path = Path::new("results/sm01/machine.json");
//! let json = r#"{"arch": "x86_64", "machine": "sm01", "ram": "1024", "version": 1}"#;
//! let doc: MachineDocument = decode_document(json.as_bytes(), path).unwrap();
//! assert_eq!(doc.machine, "sm01");
//!
//! let text = encode_document(&doc, path).unwrap();
//! assert!(text.contains("\"machine\": \"sm01\""));
//! ```

mod benchmarks;
mod commit;
mod config;
mod from_json;
mod machine;
mod to_json;
mod value;

pub use benchmarks::{BenchmarkEntry, BenchmarksDocument, DEFAULT_TIMEOUT, DEFAULT_TYPE};
pub use commit::{info_from_documents, CommitDocument, CommitParams, ResultEntry};
pub use config::{
    derive_commit_url, derive_project, normalize_repo, ConfigDocument, DEFAULT_HTML_DIR,
    DEFAULT_RESULTS_DIR,
};
pub use from_json::decode_document;
pub use machine::MachineDocument;
pub use to_json::encode_document;
pub use value::param_value_to_string;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// File name of the configuration document, relative to the database root.
pub const CONFIG_FILE_NAME: &str = "asv.conf.json";
/// File name of the benchmark-definition document inside the results directory.
pub const BENCHMARKS_FILE_NAME: &str = "benchmarks.json";
/// File name of the machine descriptor inside a machine directory.
pub const MACHINE_FILE_NAME: &str = "machine.json";

/// The four document shapes of the on-disk layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// `asv.conf.json`
    Config,
    /// `results/benchmarks.json`
    Benchmarks,
    /// `results/<machine>/machine.json`
    Machine,
    /// `results/<machine>/<commit>.json`
    Commit,
}

impl DocumentKind {
    /// Schema version written into documents of this kind.
    pub fn schema_version(self) -> u32 {
        match self {
            Self::Config => 1,
            Self::Benchmarks => 2,
            Self::Machine => 1,
            Self::Commit => 1,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config => write!(f, "config document"),
            Self::Benchmarks => write!(f, "benchmark-definition document"),
            Self::Machine => write!(f, "machine document"),
            Self::Commit => write!(f, "commit results document"),
        }
    }
}

/// A typed on-disk document.
pub trait AsvDocument: Serialize + DeserializeOwned {
    /// Which document shape this is.
    const KIND: DocumentKind;

    /// The schema version the document declares.
    fn declared_version(&self) -> u32;
}

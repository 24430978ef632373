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

//! `results/<machine>/<commit>.json`
//!
//! One document per (machine, commit). Each benchmark function stored in it
//! carries its result vector together with the axes the vector was laid out
//! against, so a reader never needs `benchmarks.json` to interpret it.

use crate::{value, AsvDocument, DocumentKind, MachineDocument};
use asvdb_core::{AsvdbError, AsvdbResult, BenchmarkInfo, Grid, ResultVector};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;
use std::path::Path;

/// Environment fields recorded per commit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommitParams {
    #[serde(default)]
    pub gpu: String,
    #[serde(default)]
    pub cuda: String,
    #[serde(default)]
    pub machine: String,
    #[serde(default)]
    pub os: String,
    #[serde(default)]
    pub python: String,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// One function's stored results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    /// The axes `result` is laid out against.
    #[serde(deserialize_with = "value::axes")]
    pub params: Vec<Vec<String>>,
    /// One slot per combination, `null` where nothing was measured.
    pub result: Vec<Option<f64>>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl ResultEntry {
    /// An entry holding `vector`.
    pub fn from_vector(vector: ResultVector) -> Self {
        let (grid, values) = vector.into_parts();
        Self {
            params: grid.axes().to_vec(),
            result: values,
            extra: Map::new(),
        }
    }

    /// The stored values paired with their grid.
    ///
    /// # Errors
    ///
    /// Returns [`AsvdbError::Grid`] if the number of values does not match
    /// the number of combinations.
    pub fn vector(&self, function: &str) -> AsvdbResult<ResultVector> {
        ResultVector::from_parts(function, Grid::new(self.params.clone()), self.result.clone())
    }

    /// Replace the stored values and axes with `vector`.
    pub fn set_vector(&mut self, vector: ResultVector) {
        let (grid, values) = vector.into_parts();
        self.params = grid.axes().to_vec();
        self.result = values;
    }
}

/// The results of every benchmark function for one machine and commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitDocument {
    #[serde(default)]
    pub params: CommitParams,
    #[serde(default)]
    pub requirements: Map<String, JsonValue>,
    #[serde(default)]
    pub results: BTreeMap<String, ResultEntry>,
    pub commit_hash: String,
    /// Commit time in epoch milliseconds.
    #[serde(deserialize_with = "value::integer")]
    pub date: i64,
    #[serde(default)]
    pub python: String,
    #[serde(default = "commit_version", deserialize_with = "value::version")]
    pub version: u32,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

fn commit_version() -> u32 {
    DocumentKind::Commit.schema_version()
}

impl CommitDocument {
    /// An empty results document for the commit `info` describes.
    pub fn new(info: &BenchmarkInfo) -> Self {
        let mut doc = Self {
            params: CommitParams::default(),
            requirements: Map::new(),
            results: BTreeMap::new(),
            commit_hash: String::new(),
            date: 0,
            python: String::new(),
            version: commit_version(),
            extra: Map::new(),
        };
        doc.apply_info(info);
        doc
    }

    /// Overwrite the per-commit environment fields with `info`.
    pub fn apply_info(&mut self, info: &BenchmarkInfo) {
        self.params.gpu = info.gpu_type().to_string();
        self.params.cuda = info.cuda_version().to_string();
        self.params.machine = info.machine_name().to_string();
        self.params.os = info.os_type().to_string();
        self.params.python = info.python_version().to_string();
        self.commit_hash = info.commit_hash().to_string();
        self.date = info.commit_time();
        self.python = info.python_version().to_string();
        self.version = commit_version();
    }
}

impl AsvDocument for CommitDocument {
    const KIND: DocumentKind = DocumentKind::Commit;

    fn declared_version(&self) -> u32 {
        self.version
    }
}

fn first_non_empty<'a>(preferred: &'a str, fallback: &'a str) -> &'a str {
    if preferred.is_empty() {
        fallback
    } else {
        preferred
    }
}

/// Rebuild the environment descriptor of a stored commit.
///
/// Machine-wide fields come from the machine descriptor, per-commit fields
/// from the commit document; each falls back to the other document when
/// empty there.
///
/// # Errors
///
/// Returns [`AsvdbError::Decode`] for `commit_path` if the stored fields do
/// not form a valid descriptor.
pub fn info_from_documents(
    machine: &MachineDocument,
    commit: &CommitDocument,
    commit_path: &Path,
) -> AsvdbResult<BenchmarkInfo> {
    let params = &commit.params;
    BenchmarkInfo::builder()
        .machine_name(first_non_empty(&machine.machine, &params.machine))
        .arch(machine.arch.as_str())
        .cpu_type(machine.cpu.as_str())
        .ram(machine.ram.as_str())
        .gpu_type(first_non_empty(&machine.gpu, &params.gpu))
        .os_type(first_non_empty(&params.os, &machine.os))
        .cuda_version(first_non_empty(&params.cuda, &machine.cuda))
        .python_version(first_non_empty(&commit.python, &params.python))
        .commit_hash(commit.commit_hash.as_str())
        .commit_time(commit.date)
        .build()
        .map_err(|e| match e {
            AsvdbError::InvalidRecord(message) => AsvdbError::decode(commit_path, message),
            other => other,
        })
}

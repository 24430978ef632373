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

//! `results/benchmarks.json`
//!
//! The document is a flat object: one key per benchmark function plus a
//! top-level `version`. Functions and the version marker share a namespace,
//! so the (de)serializers are written by hand.

use crate::{value, AsvDocument, DocumentKind};
use asvdb_core::{AsvdbResult, BenchmarkAxes, Grid, DEFAULT_UNIT};
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value as JsonValue};
use std::collections::BTreeMap;

/// Timeout, in seconds, written into new benchmark entries.
pub const DEFAULT_TIMEOUT: u64 = 60;
/// Benchmark type written into new benchmark entries.
pub const DEFAULT_TYPE: &str = "time";

const VERSION_KEY: &str = "version";
const ENTRY_VERSION: u64 = 2;

/// One benchmark function's definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkEntry {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    /// Parameter names, in axis order.
    pub param_names: Vec<String>,
    /// Distinct values per axis, in first-seen order.
    #[serde(deserialize_with = "value::axes")]
    pub params: Vec<Vec<String>>,
    #[serde(default = "default_timeout")]
    pub timeout: Number,
    #[serde(rename = "type", default = "default_type")]
    pub kind: String,
    #[serde(default = "default_unit")]
    pub unit: String,
    /// Entry version. Kept as written; older tools emitted floats here.
    #[serde(default = "default_entry_version")]
    pub version: JsonValue,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

fn default_timeout() -> Number {
    Number::from(DEFAULT_TIMEOUT)
}

fn default_type() -> String {
    DEFAULT_TYPE.to_string()
}

fn default_unit() -> String {
    DEFAULT_UNIT.to_string()
}

fn default_entry_version() -> JsonValue {
    JsonValue::from(ENTRY_VERSION)
}

impl BenchmarkEntry {
    /// A fresh definition with no recorded values.
    pub fn new(name: &str, param_names: Vec<String>) -> Self {
        Self {
            code: name.to_string(),
            name: name.to_string(),
            param_names,
            params: Vec::new(),
            timeout: default_timeout(),
            kind: default_type(),
            unit: default_unit(),
            version: default_entry_version(),
            extra: Map::new(),
        }
    }

    /// The recorded axes of this function.
    ///
    /// # Errors
    ///
    /// Returns [`asvdb_core::AsvdbError::Grid`] if `params` has a different
    /// number of axes than `param_names`.
    pub fn axes(&self, function: &str) -> AsvdbResult<BenchmarkAxes> {
        BenchmarkAxes::new(
            function,
            self.param_names.clone(),
            Grid::new(self.params.clone()),
        )
    }

    /// Replace names and values with `axes`.
    pub fn set_axes(&mut self, axes: &BenchmarkAxes) {
        self.param_names = axes.param_names().to_vec();
        self.params = axes.grid().axes().to_vec();
    }
}

/// The benchmark-definition document.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarksDocument {
    pub version: u32,
    /// Function name to definition.
    pub benchmarks: BTreeMap<String, BenchmarkEntry>,
    /// Top-level keys that are not benchmark definitions.
    pub extra: Map<String, JsonValue>,
}

impl Default for BenchmarksDocument {
    fn default() -> Self {
        Self {
            version: DocumentKind::Benchmarks.schema_version(),
            benchmarks: BTreeMap::new(),
            extra: Map::new(),
        }
    }
}

impl BenchmarksDocument {
    /// The definition of `function`, if recorded.
    pub fn get(&self, function: &str) -> Option<&BenchmarkEntry> {
        self.benchmarks.get(function)
    }

    /// The recorded axes of `function`, if it has a definition.
    pub fn axes(&self, function: &str) -> AsvdbResult<Option<BenchmarkAxes>> {
        self.benchmarks
            .get(function)
            .map(|entry| entry.axes(function))
            .transpose()
    }

    /// The definition of `function`, created with `param_names` if missing.
    pub fn entry_or_insert(&mut self, function: &str, param_names: Vec<String>) -> &mut BenchmarkEntry {
        self.benchmarks
            .entry(function.to_string())
            .or_insert_with(|| BenchmarkEntry::new(function, param_names))
    }

    /// Bring the version marker up to the current schema.
    pub fn stamp_version(&mut self) {
        self.version = DocumentKind::Benchmarks.schema_version();
    }
}

impl AsvDocument for BenchmarksDocument {
    const KIND: DocumentKind = DocumentKind::Benchmarks;

    fn declared_version(&self) -> u32 {
        self.version
    }
}

impl Serialize for BenchmarksDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.benchmarks.len() + self.extra.len() + 1))?;
        for (name, entry) in &self.benchmarks {
            map.serialize_entry(name, entry)?;
        }
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry(VERSION_KEY, &self.version)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for BenchmarksDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Map::<String, JsonValue>::deserialize(deserializer)?;
        let mut doc = BenchmarksDocument {
            version: 0,
            benchmarks: BTreeMap::new(),
            extra: Map::new(),
        };
        let mut saw_version = false;

        for (key, val) in raw {
            if key == VERSION_KEY {
                doc.version = value::version(val).map_err(D::Error::custom)?;
                saw_version = true;
            } else if val.is_object() {
                let entry = BenchmarkEntry::deserialize(val)
                    .map_err(|e| D::Error::custom(format!("benchmark '{}': {}", key, e)))?;
                doc.benchmarks.insert(key, entry);
            } else {
                doc.extra.insert(key, val);
            }
        }

        if !saw_version {
            doc.version = DocumentKind::Benchmarks.schema_version();
        }
        Ok(doc)
    }
}

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

//! `results/<machine>/machine.json`

use crate::{value, AsvDocument, DocumentKind};
use asvdb_core::BenchmarkInfo;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// The machine descriptor. The last write for a machine wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineDocument {
    #[serde(default)]
    pub arch: String,
    #[serde(default)]
    pub cpu: String,
    #[serde(default)]
    pub gpu: String,
    #[serde(default)]
    pub cuda: String,
    pub machine: String,
    #[serde(default)]
    pub os: String,
    #[serde(default)]
    pub ram: String,
    #[serde(default = "machine_version", deserialize_with = "value::version")]
    pub version: u32,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

fn machine_version() -> u32 {
    DocumentKind::Machine.schema_version()
}

impl MachineDocument {
    /// A descriptor that only knows the machine's name.
    pub fn named(machine: impl Into<String>) -> Self {
        Self {
            arch: String::new(),
            cpu: String::new(),
            gpu: String::new(),
            cuda: String::new(),
            machine: machine.into(),
            os: String::new(),
            ram: String::new(),
            version: machine_version(),
            extra: Map::new(),
        }
    }

    /// Describe the machine `info` was measured on.
    pub fn from_info(info: &BenchmarkInfo) -> Self {
        let mut doc = Self::named(info.machine_name());
        doc.apply_info(info);
        doc
    }

    /// Overwrite every descriptive field with the values in `info`.
    /// Unknown keys are left alone.
    pub fn apply_info(&mut self, info: &BenchmarkInfo) {
        self.arch = info.arch().to_string();
        self.cpu = info.cpu_type().to_string();
        self.gpu = info.gpu_type().to_string();
        self.cuda = info.cuda_version().to_string();
        self.machine = info.machine_name().to_string();
        self.os = info.os_type().to_string();
        self.ram = info.ram().to_string();
        self.version = machine_version();
    }
}

impl AsvDocument for MachineDocument {
    const KIND: DocumentKind = DocumentKind::Machine;

    fn declared_version(&self) -> u32 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn info() -> BenchmarkInfo {
        BenchmarkInfo::builder()
            .machine_name("sm01")
            .arch("x86_64")
            .cpu_type("Intel Xeon")
            .gpu_type("Tesla V100")
            .cuda_version("10.1")
            .os_type("Linux")
            .ram("65536")
            .commit_hash("c0ffee")
            .commit_time(1_571_346_000_000)
            .build()
            .unwrap()
    }

    #[test]
    fn test_from_info() {
        let doc = MachineDocument::from_info(&info());
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({
                "arch": "x86_64",
                "cpu": "Intel Xeon",
                "gpu": "Tesla V100",
                "cuda": "10.1",
                "machine": "sm01",
                "os": "Linux",
                "ram": "65536",
                "version": 1
            })
        );
    }

    #[test]
    fn test_older_document_without_cuda_or_os() {
        let doc: MachineDocument = serde_json::from_value(json!({
            "arch": "x86_64",
            "cpu": "",
            "gpu": "",
            "machine": "sm01",
            "ram": "",
            "version": 1.0
        }))
        .unwrap();
        assert_eq!(doc.cuda, "");
        assert_eq!(doc.os, "");
        assert_eq!(doc.version, 1);
    }

    #[test]
    fn test_named_has_only_machine() {
        let out = serde_json::to_value(MachineDocument::named("dgx02")).unwrap();
        assert_eq!(out["machine"], "dgx02");
        assert_eq!(out["arch"], "");
        assert_eq!(out["version"], 1);
    }

    #[test]
    fn test_machine_key_required() {
        assert!(serde_json::from_value::<MachineDocument>(json!({"arch": "x86_64"})).is_err());
    }

    #[test]
    fn test_apply_info_keeps_unknown_keys() {
        let mut doc: MachineDocument = serde_json::from_value(json!({
            "machine": "old",
            "num_cpu": "64"
        }))
        .unwrap();
        doc.apply_info(&info());
        assert_eq!(doc.machine, "sm01");
        assert_eq!(doc.extra["num_cpu"], "64");
    }
}

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

//! Decoding documents written by other tools and writing them back.

use asvdb_json::{
    decode_document, encode_document, info_from_documents, BenchmarksDocument, CommitDocument,
    ConfigDocument, MachineDocument,
};
use asvdb_test::fixtures::documents;
use proptest::prelude::*;
use serde_json::Value as JsonValue;
use std::path::Path;

// ==================== Legacy shapes ====================

#[test]
fn legacy_config_float_version_is_rewritten_as_integer() {
    let path = Path::new("asv.conf.json");
    let mut doc: ConfigDocument = decode_document(documents::LEGACY_CONFIG.as_bytes(), path).unwrap();
    assert_eq!(doc.version, 1);
    assert_eq!(doc.branches, vec!["branch-0.10"]);

    doc.stamp_version();
    let text = encode_document(&doc, path).unwrap();
    assert!(text.contains("\"version\": 1\n") || text.contains("\"version\": 1,"));
}

#[test]
fn legacy_numeric_axis_values_become_strings() {
    let path = Path::new("results/benchmarks.json");
    let doc: BenchmarksDocument = decode_document(documents::LEGACY_BENCHMARKS.as_bytes(), path).unwrap();

    let axes = doc.axes("bfs").unwrap().unwrap();
    assert_eq!(axes.param_names(), ["dataset", "max_depth"]);
    assert_eq!(axes.grid().axes()[1], vec!["10", "20"]);

    let out: JsonValue = serde_json::from_str(&encode_document(&doc, path).unwrap()).unwrap();
    assert_eq!(out["bfs"]["params"][1], serde_json::json!(["10", "20"]));
}

#[test]
fn legacy_entry_version_is_preserved() {
    let path = Path::new("results/benchmarks.json");
    let doc: BenchmarksDocument = decode_document(documents::LEGACY_BENCHMARKS.as_bytes(), path).unwrap();

    let out: JsonValue = serde_json::from_str(&encode_document(&doc, path).unwrap()).unwrap();
    assert_eq!(out["bfs"]["version"], serde_json::json!(1.0));
    assert_eq!(out["renumber"]["version"], 2);
    assert_eq!(out["version"], 2);
}

#[test]
fn parameterless_function_has_one_combination() {
    let path = Path::new("results/benchmarks.json");
    let doc: BenchmarksDocument = decode_document(documents::LEGACY_BENCHMARKS.as_bytes(), path).unwrap();
    let axes = doc.axes("renumber").unwrap().unwrap();
    assert!(axes.param_names().is_empty());
    assert_eq!(axes.grid().len(), 1);
}

#[test]
fn legacy_machine_and_commit_rebuild_info() {
    let machine: MachineDocument =
        decode_document(documents::LEGACY_MACHINE.as_bytes(), Path::new("machine.json")).unwrap();
    let path = Path::new("results/sm01/a1b2c3.json");
    let commit: CommitDocument = decode_document(documents::LEGACY_COMMIT_PARTIAL.as_bytes(), path).unwrap();

    let info = info_from_documents(&machine, &commit, path).unwrap();
    assert_eq!(info.machine_name(), "sm01");
    assert_eq!(info.cuda_version(), "10.0");
    assert_eq!(info.os_type(), "Linux");
    assert_eq!(info.python_version(), "3.6");
    assert_eq!(info.commit_time(), 1_568_000_000_000);
}

#[test]
fn sub_grid_vector_fits_full_grid() {
    let benchmarks: BenchmarksDocument =
        decode_document(documents::LEGACY_BENCHMARKS.as_bytes(), Path::new("b.json")).unwrap();
    let commit: CommitDocument =
        decode_document(documents::LEGACY_COMMIT_PARTIAL.as_bytes(), Path::new("c.json")).unwrap();

    let full = benchmarks.axes("bfs").unwrap().unwrap();
    let vector = commit.results["bfs"].vector("bfs").unwrap();
    let regridded = vector.regrid("bfs", full.grid()).unwrap();
    assert_eq!(regridded.values(), &[Some(0.0125), None, None, None]);
}

// ==================== Determinism ====================

#[test]
fn reencoding_a_decoded_commit_is_stable() {
    let path = Path::new("results/sm01/d4e5f6.json");
    let doc: CommitDocument = decode_document(documents::LEGACY_COMMIT_FULL.as_bytes(), path).unwrap();
    let first = encode_document(&doc, path).unwrap();
    let again: CommitDocument = decode_document(first.as_bytes(), path).unwrap();
    assert_eq!(again, doc);
    assert_eq!(encode_document(&again, path).unwrap(), first);
}

proptest! {
    #[test]
    fn prop_branches_stay_unique_in_first_seen_order(
        batches in prop::collection::vec(prop::collection::vec("[a-c]{1,2}", 0..4), 0..5)
    ) {
        let mut doc = ConfigDocument::default();
        let mut expected: Vec<String> = Vec::new();
        for batch in &batches {
            doc.add_branches(batch);
            for branch in batch {
                if !expected.contains(branch) {
                    expected.push(branch.clone());
                }
            }
        }
        prop_assert_eq!(&doc.branches, &expected);

        let path = Path::new("asv.conf.json");
        let text = encode_document(&doc, path).unwrap();
        let decoded: ConfigDocument = decode_document(text.as_bytes(), path).unwrap();
        prop_assert_eq!(decoded, doc);
    }
}

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

//! Property tests: whatever order results arrive in, the latest value of
//! every combination is what reads back, and repeating a write changes
//! nothing on disk.

use asvdb::{AsvDb, DbConfig, ResultFilter};
use asvdb_test::fixtures::{self, builders::ResultBuilder};
use asvdb_test::snapshot;
use proptest::prelude::*;
use std::collections::BTreeMap;
use tempfile::TempDir;

fn result_strategy() -> impl Strategy<Value = (u8, u8, u8, u32)> {
    // (commit, size, variant, value)
    (0u8..2, 0u8..4, 0u8..3, 1u32..1000)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_latest_value_wins(adds in prop::collection::vec(result_strategy(), 1..12)) {
        let dir = TempDir::new().unwrap();
        let db = AsvDb::open(dir.path(), DbConfig::new("repo"));

        let mut expected = BTreeMap::new();
        for (commit, size, variant, value) in &adds {
            let info = fixtures::info_at(&format!("c{}", commit), i64::from(*commit));
            let result = ResultBuilder::new("kernel")
                .param("size", size)
                .param("variant", variant)
                .result(f64::from(*value))
                .build();
            db.add_result(&info, &result).unwrap();
            expected.insert(
                (format!("c{}", commit), size.to_string(), variant.to_string()),
                f64::from(*value),
            );
        }

        let set = db.get_results(&ResultFilter::all()).unwrap();
        prop_assert!(set.is_complete());

        let mut read = BTreeMap::new();
        for (info, result) in set.iter() {
            let size = result.param("size").unwrap().to_string();
            let variant = result.param("variant").unwrap().to_string();
            read.insert((info.commit_hash().to_string(), size, variant), result.result());
        }
        prop_assert_eq!(read, expected);
    }

    #[test]
    fn prop_repeating_last_add_is_a_no_op(adds in prop::collection::vec(result_strategy(), 1..8)) {
        let dir = TempDir::new().unwrap();
        let db = AsvDb::open(dir.path(), DbConfig::new("repo"));

        let mut last = None;
        for (commit, size, variant, value) in &adds {
            let info = fixtures::info_at(&format!("c{}", commit), i64::from(*commit));
            let result = ResultBuilder::new("kernel")
                .param("size", size)
                .param("variant", variant)
                .result(f64::from(*value))
                .build();
            db.add_result(&info, &result).unwrap();
            last = Some((info, result));
        }

        let before = snapshot(dir.path()).unwrap();
        if let Some((info, result)) = &last {
            db.add_result(info, result).unwrap();
        }
        prop_assert_eq!(snapshot(dir.path()).unwrap(), before);
    }

    #[test]
    fn prop_every_vector_matches_the_definition(adds in prop::collection::vec(result_strategy(), 1..10)) {
        let dir = TempDir::new().unwrap();
        let db = AsvDb::open(dir.path(), DbConfig::new("repo"));

        for (commit, size, variant, value) in &adds {
            let info = fixtures::info_at(&format!("c{}", commit), i64::from(*commit));
            let result = ResultBuilder::new("kernel")
                .param("size", size)
                .param("variant", variant)
                .result(f64::from(*value))
                .build();
            db.add_result(&info, &result).unwrap();
        }

        let read = |path: std::path::PathBuf| -> serde_json::Value {
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
        };
        let results = dir.path().join("results");
        let definition = read(results.join("benchmarks.json"))["kernel"]["params"].clone();
        let combinations: usize = definition
            .as_array()
            .unwrap()
            .iter()
            .map(|axis| axis.as_array().unwrap().len())
            .product();

        for entry in std::fs::read_dir(results.join("sm01")).unwrap() {
            let path = entry.unwrap().path();
            if path.file_name().unwrap() == "machine.json" {
                continue;
            }
            let doc = read(path);
            prop_assert_eq!(&doc["results"]["kernel"]["params"], &definition);
            prop_assert_eq!(doc["results"]["kernel"]["result"].as_array().unwrap().len(), combinations);
        }
    }
}

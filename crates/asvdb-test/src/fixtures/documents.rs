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

//! Raw document text.
//!
//! The legacy database under `fixtures/legacy_db` is exposed here as
//! strings for tests that decode documents without touching the disk.

/// `asv.conf.json` of the legacy database.
pub const LEGACY_CONFIG: &str = include_str!("../../fixtures/legacy_db/asv.conf.json");

/// `results/benchmarks.json` of the legacy database.
pub const LEGACY_BENCHMARKS: &str =
    include_str!("../../fixtures/legacy_db/results/benchmarks.json");

/// `results/sm01/machine.json` of the legacy database (no `cuda` or `os`).
pub const LEGACY_MACHINE: &str = include_str!("../../fixtures/legacy_db/results/sm01/machine.json");

/// A commit document whose vector covers a sub-grid of `bfs`.
pub const LEGACY_COMMIT_PARTIAL: &str =
    include_str!("../../fixtures/legacy_db/results/sm01/a1b2c3.json");

/// A commit document covering the full `bfs` grid plus `renumber`.
pub const LEGACY_COMMIT_FULL: &str =
    include_str!("../../fixtures/legacy_db/results/sm01/d4e5f6.json");

/// Number of measured results stored in the legacy database.
pub const LEGACY_RESULT_COUNT: usize = 5;

/// Every legacy document as (path relative to the database root, text).
pub fn legacy_documents() -> Vec<(&'static str, &'static str)> {
    vec![
        ("asv.conf.json", LEGACY_CONFIG),
        ("results/benchmarks.json", LEGACY_BENCHMARKS),
        ("results/sm01/machine.json", LEGACY_MACHINE),
        ("results/sm01/a1b2c3.json", LEGACY_COMMIT_PARTIAL),
        ("results/sm01/d4e5f6.json", LEGACY_COMMIT_FULL),
    ]
}

/// A minimal valid commit document for `machine` and `commit_hash` with a
/// single parameterless `f` result.
pub fn commit_document(machine: &str, commit_hash: &str, date: i64) -> String {
    format!(
        r#"{{
  "params": {{"machine": "{machine}"}},
  "results": {{"f": {{"params": [], "result": [1.0]}}}},
  "commit_hash": "{commit_hash}",
  "date": {date},
  "version": 1
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_documents_are_non_empty() {
        for (path, text) in legacy_documents() {
            assert!(text.trim_start().starts_with('{'), "{} is not an object", path);
        }
    }

    #[test]
    fn test_commit_document_mentions_identity() {
        let text = commit_document("sm01", "abc", 7);
        assert!(text.contains(r#""commit_hash": "abc""#));
        assert!(text.contains(r#""date": 7"#));
    }
}

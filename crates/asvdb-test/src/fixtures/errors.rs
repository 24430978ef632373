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

//! Error test fixtures.

/// Malformed commit documents as (name, text).
///
/// Every sample must fail to decode as a commit document.
pub fn invalid_commit_documents() -> Vec<(&'static str, &'static str)> {
    vec![
        ("empty", ""),
        ("not_json", "{\"commit_hash\": "),
        ("not_an_object", "[]"),
        ("missing_commit_hash", r#"{"date": 1, "results": {}}"#),
        ("missing_date", r#"{"commit_hash": "abc", "results": {}}"#),
        ("fractional_date", r#"{"commit_hash": "abc", "date": 1.5}"#),
        ("newer_version", r#"{"commit_hash": "abc", "date": 1, "version": 2}"#),
        (
            "result_not_a_list",
            r#"{"commit_hash": "abc", "date": 1, "results": {"f": {"params": [], "result": 3}}}"#,
        ),
        (
            "nan_literal",
            r#"{"commit_hash": "abc", "date": 1, "results": {"f": {"params": [], "result": [NaN]}}}"#,
        ),
    ]
}

/// Commit documents that decode but whose vectors do not fit their grid.
pub fn misshapen_commit_documents() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "too_few_values",
            r#"{"commit_hash": "abc", "date": 1, "results": {"f": {"params": [["1", "2"]], "result": [1.0]}}}"#,
        ),
        (
            "too_many_values",
            r#"{"commit_hash": "abc", "date": 1, "results": {"f": {"params": [], "result": [1.0, 2.0]}}}"#,
        ),
    ]
}

/// Malformed `benchmarks.json` samples as (name, text).
pub fn invalid_benchmarks_documents() -> Vec<(&'static str, &'static str)> {
    vec![
        ("not_json", "{"),
        ("missing_param_names", r#"{"f": {"params": []}, "version": 2}"#),
        ("axes_not_lists", r#"{"f": {"param_names": ["a"], "params": ["1"]}, "version": 2}"#),
        ("newer_version", r#"{"version": 3}"#),
    ]
}

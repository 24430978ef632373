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

//! Environment and result fixtures.

use super::builders::ResultBuilder;
use asvdb_core::{BenchmarkInfo, BenchmarkResult};

/// Commit time of [`info`], in epoch milliseconds.
pub const COMMIT_TIME: i64 = 1_571_346_000_000;

/// A fully populated environment: machine `sm01`, commit `c0ffee01`.
pub fn info() -> BenchmarkInfo {
    BenchmarkInfo::builder()
        .machine_name("sm01")
        .os_type("Linux")
        .cpu_type("Intel(R) Xeon(R) CPU E5-2698 v4 @ 2.20GHz")
        .arch("x86_64")
        .ram("540944896")
        .gpu_type("Tesla V100-SXM2-32GB")
        .cuda_version("10.1")
        .python_version("3.7")
        .commit_hash("c0ffee01")
        .commit_time(COMMIT_TIME)
        .build()
        .expect("fixture info must be valid")
}

/// [`info`] for another commit.
pub fn info_at(commit_hash: &str, commit_time: i64) -> BenchmarkInfo {
    info()
        .to_builder()
        .commit_hash(commit_hash)
        .commit_time(commit_time)
        .build()
        .expect("fixture info must be valid")
}

/// [`info`] for another machine.
pub fn info_on(machine_name: &str) -> BenchmarkInfo {
    info()
        .to_builder()
        .machine_name(machine_name)
        .gpu_type("Tesla T4")
        .build()
        .expect("fixture info must be valid")
}

/// A `sort` result with a single `n` parameter.
pub fn sort(n: u32, seconds: f64) -> BenchmarkResult {
    ResultBuilder::new("sort").param("n", n).result(seconds).build()
}

/// The growth scenario: `sort` at n=100 then n=200.
pub fn sort_results() -> Vec<BenchmarkResult> {
    vec![sort(100, 1.2), sort(200, 2.4)]
}

/// A `bfs` result over two parameters.
pub fn bfs(dataset: &str, max_depth: u32, seconds: f64) -> BenchmarkResult {
    ResultBuilder::new("bfs")
        .param("dataset", dataset)
        .param("max_depth", max_depth)
        .result(seconds)
        .build()
}

/// A two-by-two `bfs` sweep plus a parameterless `renumber` result.
pub fn mixed_results() -> Vec<BenchmarkResult> {
    vec![
        bfs("karate.csv", 10, 0.011),
        bfs("karate.csv", 20, 0.015),
        bfs("dolphins.csv", 10, 0.021),
        bfs("dolphins.csv", 20, 0.034),
        ResultBuilder::new("renumber")
            .result(4.5)
            .unit("milliseconds")
            .build(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_variants_keep_identity_fields_apart() {
        assert_eq!(info_at("abc", 5).machine_name(), "sm01");
        assert_eq!(info_at("abc", 5).commit_hash(), "abc");
        assert_eq!(info_on("dgx02").commit_hash(), "c0ffee01");
        assert_eq!(info_on("dgx02").gpu_type(), "Tesla T4");
    }

    #[test]
    fn test_sort_results_are_one_axis() {
        let results = sort_results();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.param_names() == vec!["n"]));
    }

    #[test]
    fn test_mixed_results_units() {
        let results = mixed_results();
        assert_eq!(results.iter().filter(|r| r.unit() == "seconds").count(), 4);
        assert_eq!(results[4].unit(), "milliseconds");
    }
}

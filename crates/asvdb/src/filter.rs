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

//! Result selection for [`AsvDb::get_results`](crate::AsvDb::get_results).

use std::collections::BTreeSet;

/// Which stored results to return.
///
/// Each populated criterion narrows the selection; an empty filter selects
/// everything. Commit time bounds are inclusive epoch milliseconds.
///
/// # Examples
///
/// ```
/// use asvdb::ResultFilter;
///
/// let filter = ResultFilter::all()
///     .machine("sm01")
///     .function("bfs")
///     .since(1_571_000_000_000);
///
/// assert!(filter.matches_machine("sm01"));
/// assert!(!filter.matches_machine("dgx02"));
/// assert!(!filter.matches_commit("abc", 1_500_000_000_000));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultFilter {
    machines: BTreeSet<String>,
    commits: BTreeSet<String>,
    functions: BTreeSet<String>,
    since: Option<i64>,
    until: Option<i64>,
}

impl ResultFilter {
    /// Select every stored result.
    pub fn all() -> Self {
        Self::default()
    }

    /// Also accept results measured on `name`.
    pub fn machine(mut self, name: impl Into<String>) -> Self {
        self.machines.insert(name.into());
        self
    }

    /// Also accept results for the commit `hash`.
    pub fn commit(mut self, hash: impl Into<String>) -> Self {
        self.commits.insert(hash.into());
        self
    }

    /// Also accept results of the benchmark function `name`.
    pub fn function(mut self, name: impl Into<String>) -> Self {
        self.functions.insert(name.into());
        self
    }

    /// Only commits at or after `millis`.
    pub fn since(mut self, millis: i64) -> Self {
        self.since = Some(millis);
        self
    }

    /// Only commits at or before `millis`.
    pub fn until(mut self, millis: i64) -> Self {
        self.until = Some(millis);
        self
    }

    pub fn matches_machine(&self, name: &str) -> bool {
        self.machines.is_empty() || self.machines.contains(name)
    }

    pub fn matches_commit(&self, hash: &str, time: i64) -> bool {
        (self.commits.is_empty() || self.commits.contains(hash))
            && self.since.map_or(true, |s| time >= s)
            && self.until.map_or(true, |u| time <= u)
    }

    pub fn matches_function(&self, name: &str) -> bool {
        self.functions.is_empty() || self.functions.contains(name)
    }
}

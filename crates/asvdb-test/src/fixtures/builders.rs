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

//! Builder for customizable result fixtures.

use asvdb_core::{BenchmarkResult, DEFAULT_UNIT};

/// Builder for [`BenchmarkResult`] fixtures.
///
/// Panics on invalid input, which is what a test wants.
///
/// # Examples
///
/// ```
/// use asvdb_test::fixtures::builders::ResultBuilder;
///
/// let result = ResultBuilder::new("bfs")
///     .param("dataset", "karate.csv")
///     .param("max_depth", 10)
///     .result(0.0125)
///     .build();
///
/// assert_eq!(result.param_names(), vec!["dataset", "max_depth"]);
/// assert_eq!(result.unit(), "seconds");
/// ```
#[derive(Debug, Clone)]
pub struct ResultBuilder {
    name: String,
    params: Vec<(String, String)>,
    result: f64,
    unit: String,
}

impl ResultBuilder {
    /// Start a result for `function` with no parameters and a result of 1.0.
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            name: function.into(),
            params: Vec::new(),
            result: 1.0,
            unit: DEFAULT_UNIT.to_string(),
        }
    }

    /// Append a parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((name.into(), value.to_string()));
        self
    }

    /// Set the measured value.
    pub fn result(mut self, value: f64) -> Self {
        self.result = value;
        self
    }

    /// Set the unit.
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Build the result.
    ///
    /// # Panics
    ///
    /// Panics if the accumulated fields are rejected by
    /// [`BenchmarkResult::new`].
    pub fn build(self) -> BenchmarkResult {
        BenchmarkResult::new(self.name, self.params, self.result)
            .and_then(|r| r.with_unit(self.unit))
            .expect("fixture result must be valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fields() {
        let result = ResultBuilder::new("sort").build();
        assert_eq!(result.name(), "sort");
        assert!(result.arg_name_value_pairs().is_empty());
        assert_eq!(result.result(), 1.0);
    }

    #[test]
    fn test_unit_override() {
        let result = ResultBuilder::new("sort").unit("ms").build();
        assert_eq!(result.unit(), "ms");
    }

    #[test]
    #[should_panic(expected = "fixture result must be valid")]
    fn test_invalid_panics() {
        ResultBuilder::new("sort").result(f64::NAN).build();
    }
}

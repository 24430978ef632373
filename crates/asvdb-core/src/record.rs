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

//! Benchmark environment and result records.

use crate::{AsvdbError, AsvdbResult};
use std::collections::{BTreeMap, HashSet};
use std::fmt::Display;

/// Unit recorded for results that do not name one.
pub const DEFAULT_UNIT: &str = "seconds";

/// The environment a set of benchmark results was measured in.
///
/// The machine name identifies the machine directory and the commit hash
/// identifies the results document inside it; the remaining fields are
/// descriptive and are simply carried into the documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BenchmarkInfo {
    machine_name: String,
    cuda_version: String,
    os_type: String,
    python_version: String,
    commit_hash: String,
    commit_time: i64,
    gpu_type: String,
    cpu_type: String,
    arch: String,
    ram: String,
}

impl BenchmarkInfo {
    /// Start building an environment descriptor.
    pub fn builder() -> BenchmarkInfoBuilder {
        BenchmarkInfoBuilder::default()
    }

    /// Machine name (identity of the machine directory).
    pub fn machine_name(&self) -> &str {
        &self.machine_name
    }

    /// Accelerator runtime (CUDA) version.
    pub fn cuda_version(&self) -> &str {
        &self.cuda_version
    }

    /// Operating system description.
    pub fn os_type(&self) -> &str {
        &self.os_type
    }

    /// Language runtime version.
    pub fn python_version(&self) -> &str {
        &self.python_version
    }

    /// Commit hash (identity of the results document).
    pub fn commit_hash(&self) -> &str {
        &self.commit_hash
    }

    /// Commit timestamp in milliseconds since the Unix epoch.
    pub fn commit_time(&self) -> i64 {
        self.commit_time
    }

    /// GPU description.
    pub fn gpu_type(&self) -> &str {
        &self.gpu_type
    }

    /// CPU description.
    pub fn cpu_type(&self) -> &str {
        &self.cpu_type
    }

    /// Machine architecture.
    pub fn arch(&self) -> &str {
        &self.arch
    }

    /// Installed memory in bytes, as a decimal string (may be empty).
    pub fn ram(&self) -> &str {
        &self.ram
    }

    /// A builder pre-filled with this descriptor's fields.
    pub fn to_builder(&self) -> BenchmarkInfoBuilder {
        BenchmarkInfoBuilder {
            machine_name: Some(self.machine_name.clone()),
            cuda_version: self.cuda_version.clone(),
            os_type: self.os_type.clone(),
            python_version: self.python_version.clone(),
            commit_hash: Some(self.commit_hash.clone()),
            commit_time: Some(self.commit_time),
            gpu_type: self.gpu_type.clone(),
            cpu_type: self.cpu_type.clone(),
            arch: self.arch.clone(),
            ram: self.ram.clone(),
        }
    }
}

/// Builder for [`BenchmarkInfo`].
///
/// `machine_name`, `commit_hash` and `commit_time` are required; every other
/// field defaults to an empty string.
///
/// # Examples
///
/// ```
/// use asvdb_core::BenchmarkInfo;
///
/// let info = BenchmarkInfo::builder()
///     .machine_name("dgx01")
///     .commit_hash("8f2c1e0")
///     .commit_time(1_700_000_000_000)
///     .os_type("Linux 6.1")
///     .python_version("3.11")
///     .ram("68719476736")
///     .build()
///     .unwrap();
///
/// assert_eq!(info.machine_name(), "dgx01");
/// assert_eq!(info.cuda_version(), "");
/// ```
#[derive(Debug, Clone, Default)]
pub struct BenchmarkInfoBuilder {
    machine_name: Option<String>,
    cuda_version: String,
    os_type: String,
    python_version: String,
    commit_hash: Option<String>,
    commit_time: Option<i64>,
    gpu_type: String,
    cpu_type: String,
    arch: String,
    ram: String,
}

impl BenchmarkInfoBuilder {
    /// Set the machine name.
    pub fn machine_name(mut self, value: impl Into<String>) -> Self {
        self.machine_name = Some(value.into());
        self
    }

    /// Set the accelerator runtime (CUDA) version.
    pub fn cuda_version(mut self, value: impl Into<String>) -> Self {
        self.cuda_version = value.into();
        self
    }

    /// Set the operating system description.
    pub fn os_type(mut self, value: impl Into<String>) -> Self {
        self.os_type = value.into();
        self
    }

    /// Set the language runtime version.
    pub fn python_version(mut self, value: impl Into<String>) -> Self {
        self.python_version = value.into();
        self
    }

    /// Set the commit hash.
    pub fn commit_hash(mut self, value: impl Into<String>) -> Self {
        self.commit_hash = Some(value.into());
        self
    }

    /// Set the commit timestamp (epoch milliseconds).
    pub fn commit_time(mut self, value: i64) -> Self {
        self.commit_time = Some(value);
        self
    }

    /// Set the GPU description.
    pub fn gpu_type(mut self, value: impl Into<String>) -> Self {
        self.gpu_type = value.into();
        self
    }

    /// Set the CPU description.
    pub fn cpu_type(mut self, value: impl Into<String>) -> Self {
        self.cpu_type = value.into();
        self
    }

    /// Set the machine architecture.
    pub fn arch(mut self, value: impl Into<String>) -> Self {
        self.arch = value.into();
        self
    }

    /// Set the installed memory in bytes.
    pub fn ram(mut self, value: impl Into<String>) -> Self {
        self.ram = value.into();
        self
    }

    /// Validate and build the descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`AsvdbError::InvalidRecord`] if a required field is missing,
    /// if the machine name or commit hash cannot be used as a file name, or
    /// if `ram` is not a decimal integer.
    pub fn build(self) -> AsvdbResult<BenchmarkInfo> {
        let machine_name = self
            .machine_name
            .ok_or_else(|| AsvdbError::invalid_record("machine name is required"))?;
        let commit_hash = self
            .commit_hash
            .ok_or_else(|| AsvdbError::invalid_record("commit hash is required"))?;
        let commit_time = self
            .commit_time
            .ok_or_else(|| AsvdbError::invalid_record("commit time is required"))?;

        validate_path_component("machine name", &machine_name)?;
        validate_path_component("commit hash", &commit_hash)?;

        if !self.ram.chars().all(|c| c.is_ascii_digit()) {
            return Err(AsvdbError::invalid_record(format!(
                "ram must be a number of bytes, got '{}'",
                self.ram
            )));
        }

        Ok(BenchmarkInfo {
            machine_name,
            cuda_version: self.cuda_version,
            os_type: self.os_type,
            python_version: self.python_version,
            commit_hash,
            commit_time,
            gpu_type: self.gpu_type,
            cpu_type: self.cpu_type,
            arch: self.arch,
            ram: self.ram,
        })
    }
}

fn validate_path_component(field: &str, value: &str) -> AsvdbResult<()> {
    if value.is_empty() {
        return Err(AsvdbError::invalid_record(format!("{} is empty", field)));
    }
    if value == "." || value == ".." || value.contains(['/', '\\', '\0']) {
        return Err(AsvdbError::invalid_record(format!(
            "{} '{}' cannot be used as a file name",
            field, value
        )));
    }
    Ok(())
}

/// The outcome of one benchmark function run with one set of arguments.
///
/// Parameter values are kept as strings, which is how they are stored in
/// the results documents. The order of the pairs is significant: it is the
/// axis order used the first time the function is recorded.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BenchmarkResult {
    name: String,
    arg_name_value_pairs: Vec<(String, String)>,
    result: f64,
    unit: String,
}

impl BenchmarkResult {
    /// Create a result for `func_name` measured with the given arguments.
    ///
    /// # Errors
    ///
    /// Returns [`AsvdbError::InvalidRecord`] if the function name is empty, a
    /// parameter name is empty or repeated, or `result` is not finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use asvdb_core::BenchmarkResult;
    ///
    /// let r = BenchmarkResult::new("pagerank", [("dataset", "dolphins.csv")], 3.01).unwrap();
    /// assert_eq!(r.unit(), "seconds");
    /// assert_eq!(r.param_values(), vec!["dolphins.csv"]);
    ///
    /// assert!(BenchmarkResult::new("bfs", [("n", 1), ("n", 2)], 1.0).is_err());
    /// ```
    pub fn new<I, N, V>(func_name: impl Into<String>, args: I, result: f64) -> AsvdbResult<Self>
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Display,
    {
        let name = func_name.into();
        if name.is_empty() {
            return Err(AsvdbError::invalid_record("function name is empty"));
        }

        let arg_name_value_pairs: Vec<(String, String)> = args
            .into_iter()
            .map(|(n, v)| (n.into(), v.to_string()))
            .collect();

        let mut seen = HashSet::with_capacity(arg_name_value_pairs.len());
        for (param, _) in &arg_name_value_pairs {
            if param.is_empty() {
                return Err(AsvdbError::invalid_record(format!(
                    "benchmark '{}' has an empty parameter name",
                    name
                )));
            }
            if !seen.insert(param.as_str()) {
                return Err(AsvdbError::invalid_record(format!(
                    "benchmark '{}' repeats parameter '{}'",
                    name, param
                )));
            }
        }

        if !result.is_finite() {
            return Err(AsvdbError::invalid_record(format!(
                "benchmark '{}' has a non-finite result ({})",
                name, result
            )));
        }

        Ok(Self {
            name,
            arg_name_value_pairs,
            result,
            unit: DEFAULT_UNIT.to_string(),
        })
    }

    /// Replace the unit (default `"seconds"`).
    ///
    /// # Errors
    ///
    /// Returns [`AsvdbError::InvalidRecord`] for an empty unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> AsvdbResult<Self> {
        let unit = unit.into();
        if unit.is_empty() {
            return Err(AsvdbError::invalid_record(format!(
                "benchmark '{}' has an empty unit",
                self.name
            )));
        }
        self.unit = unit;
        Ok(self)
    }

    /// Benchmark function name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ordered (parameter name, value) pairs.
    pub fn arg_name_value_pairs(&self) -> &[(String, String)] {
        &self.arg_name_value_pairs
    }

    /// Parameter names in call order.
    pub fn param_names(&self) -> Vec<&str> {
        self.arg_name_value_pairs.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Parameter values in call order.
    pub fn param_values(&self) -> Vec<&str> {
        self.arg_name_value_pairs.iter().map(|(_, v)| v.as_str()).collect()
    }

    /// Look up one parameter value by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.arg_name_value_pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// The measured value.
    pub fn result(&self) -> f64 {
        self.result
    }

    /// Unit of the measured value.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Parameters as a name-keyed map, ignoring call order.
    pub fn params_by_name(&self) -> BTreeMap<&str, &str> {
        self.arg_name_value_pairs
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_str()))
            .collect()
    }

    /// True if both results describe the same benchmark parameterization:
    /// same function, same parameter names in the same order, same values.
    pub fn same_parameterization(&self, other: &BenchmarkResult) -> bool {
        self.name == other.name && self.arg_name_value_pairs == other.arg_name_value_pairs
    }
}

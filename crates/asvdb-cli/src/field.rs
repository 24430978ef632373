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

//! Named fields of a stored result.
//!
//! A [`Row`] is one result together with the environment it was measured in.
//! [`Field`] names one column of it; fields are read by `show` and filters,
//! and overwritten by `copy --set`.

use crate::error::{CliError, CliResult};
use asvdb::{BenchmarkInfo, BenchmarkInfoBuilder, BenchmarkResult};
use std::fmt;

/// Prefix addressing a single benchmark parameter, e.g. `param:dataset`.
pub const PARAM_PREFIX: &str = "param:";

/// One result and its environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub info: BenchmarkInfo,
    pub result: BenchmarkResult,
}

impl Row {
    pub fn new(info: BenchmarkInfo, result: BenchmarkResult) -> Self {
        Self { info, result }
    }
}

/// A column of a [`Row`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    MachineName,
    OsType,
    CpuType,
    Arch,
    Ram,
    GpuType,
    CudaVersion,
    PythonVersion,
    CommitHash,
    CommitTime,
    FuncName,
    /// All parameters. Print-only.
    Params,
    Result,
    Unit,
    /// A single parameter by name.
    Param(String),
}

/// The value of a field in one row.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl Field {
    /// Every named field, in display order.
    pub fn named() -> [Field; 14] {
        [
            Field::MachineName,
            Field::OsType,
            Field::CpuType,
            Field::Arch,
            Field::Ram,
            Field::GpuType,
            Field::CudaVersion,
            Field::PythonVersion,
            Field::CommitHash,
            Field::CommitTime,
            Field::FuncName,
            Field::Params,
            Field::Result,
            Field::Unit,
        ]
    }

    /// Columns printed by `show` when `--print` is not given.
    pub fn default_print() -> Vec<Field> {
        vec![
            Field::MachineName,
            Field::CommitHash,
            Field::FuncName,
            Field::Params,
            Field::Result,
            Field::Unit,
        ]
    }

    /// Parse a field name.
    ///
    /// ```
    /// use asvdb_cli::field::Field;
    ///
    /// assert_eq!(Field::parse("commit_time").unwrap(), Field::CommitTime);
    /// assert_eq!(Field::parse("param:n").unwrap(), Field::Param("n".to_string()));
    /// assert!(Field::parse("speed").is_err());
    /// ```
    pub fn parse(name: &str) -> CliResult<Field> {
        let name = name.trim();
        if let Some(param) = name.strip_prefix(PARAM_PREFIX) {
            if param.is_empty() {
                return Err(CliError::UnknownField(name.to_string()));
            }
            return Ok(Field::Param(param.to_string()));
        }
        Field::named()
            .into_iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| CliError::UnknownField(name.to_string()))
    }

    /// Parse a comma-separated field list.
    pub fn parse_list(list: &str) -> CliResult<Vec<Field>> {
        list.split(',')
            .filter(|s| !s.trim().is_empty())
            .map(Field::parse)
            .collect()
    }

    pub fn name(&self) -> String {
        let name = match self {
            Field::MachineName => "machine_name",
            Field::OsType => "os_type",
            Field::CpuType => "cpu_type",
            Field::Arch => "arch",
            Field::Ram => "ram",
            Field::GpuType => "gpu_type",
            Field::CudaVersion => "cuda_version",
            Field::PythonVersion => "python_version",
            Field::CommitHash => "commit_hash",
            Field::CommitTime => "commit_time",
            Field::FuncName => "func_name",
            Field::Params => "params",
            Field::Result => "result",
            Field::Unit => "unit",
            Field::Param(param) => return format!("{}{}", PARAM_PREFIX, param),
        };
        name.to_string()
    }

    /// One-line description shown by `asvdb keys`.
    pub fn describe(&self) -> &'static str {
        match self {
            Field::MachineName => "machine the benchmark ran on",
            Field::OsType => "operating system",
            Field::CpuType => "CPU model",
            Field::Arch => "CPU architecture",
            Field::Ram => "installed memory",
            Field::GpuType => "GPU model",
            Field::CudaVersion => "CUDA version",
            Field::PythonVersion => "Python version",
            Field::CommitHash => "commit the benchmark ran at",
            Field::CommitTime => "commit time, epoch milliseconds (numeric)",
            Field::FuncName => "benchmark function name",
            Field::Params => "all parameters (print only)",
            Field::Result => "measured value (numeric)",
            Field::Unit => "unit of the measured value",
            Field::Param(_) => "a single parameter",
        }
    }

    /// True if filters compare this field numerically.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Field::CommitTime | Field::Result)
    }

    /// Read the field from `row`. `None` if the row has no such parameter.
    pub fn value(&self, row: &Row) -> Option<FieldValue> {
        let info = &row.info;
        let text = |s: &str| Some(FieldValue::Text(s.to_string()));
        match self {
            Field::MachineName => text(info.machine_name()),
            Field::OsType => text(info.os_type()),
            Field::CpuType => text(info.cpu_type()),
            Field::Arch => text(info.arch()),
            Field::Ram => text(info.ram()),
            Field::GpuType => text(info.gpu_type()),
            Field::CudaVersion => text(info.cuda_version()),
            Field::PythonVersion => text(info.python_version()),
            Field::CommitHash => text(info.commit_hash()),
            Field::CommitTime => Some(FieldValue::Number(info.commit_time() as f64)),
            Field::FuncName => text(row.result.name()),
            Field::Params => Some(FieldValue::Text(format_params(&row.result))),
            Field::Result => Some(FieldValue::Number(row.result.result())),
            Field::Unit => text(row.result.unit()),
            Field::Param(name) => row.result.param(name).and_then(text),
        }
    }

    /// A copy of `row` with this field replaced by `value`.
    ///
    /// Setting a parameter that the result does not have appends it.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidAssignment`] for `params` or a value that
    /// does not parse, and [`CliError::Db`] if the new row is not a valid
    /// record.
    pub fn assign(&self, row: &Row, value: &str) -> CliResult<Row> {
        let invalid = |message: &str| {
            CliError::invalid_assignment(format!("{}={}", self.name(), value), message)
        };
        let builder = row.info.to_builder();
        let with_info = |builder: BenchmarkInfoBuilder| -> CliResult<Row> {
            Ok(Row::new(builder.build()?, row.result.clone()))
        };

        let current = &row.result;
        let mut name = current.name().to_string();
        let mut pairs = current.arg_name_value_pairs().to_vec();
        let mut measured = current.result();
        let mut unit = current.unit().to_string();
        match self {
            Field::MachineName => return with_info(builder.machine_name(value)),
            Field::OsType => return with_info(builder.os_type(value)),
            Field::CpuType => return with_info(builder.cpu_type(value)),
            Field::Arch => return with_info(builder.arch(value)),
            Field::Ram => return with_info(builder.ram(value)),
            Field::GpuType => return with_info(builder.gpu_type(value)),
            Field::CudaVersion => return with_info(builder.cuda_version(value)),
            Field::PythonVersion => return with_info(builder.python_version(value)),
            Field::CommitHash => return with_info(builder.commit_hash(value)),
            Field::CommitTime => {
                let millis = value
                    .parse::<i64>()
                    .map_err(|_| invalid("commit_time must be an integer"))?;
                return with_info(builder.commit_time(millis));
            }
            Field::FuncName => name = value.to_string(),
            Field::Result => {
                measured = value
                    .parse::<f64>()
                    .map_err(|_| invalid("result must be a number"))?;
            }
            Field::Unit => unit = value.to_string(),
            Field::Param(param) => match pairs.iter_mut().find(|(n, _)| n == param) {
                Some(pair) => pair.1 = value.to_string(),
                None => pairs.push((param.clone(), value.to_string())),
            },
            Field::Params => return Err(invalid("params can only be printed")),
        }
        let result = BenchmarkResult::new(name, pairs, measured)?.with_unit(unit)?;
        Ok(Row::new(row.info.clone(), result))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Render all parameters of a result, e.g. `(dataset=karate.csv, max_depth=10)`.
pub fn format_params(result: &BenchmarkResult) -> String {
    let pairs: Vec<String> = result
        .arg_name_value_pairs()
        .iter()
        .map(|(n, v)| format!("{}={}", n, v))
        .collect();
    format!("({})", pairs.join(", "))
}

/// Split a `NAME=VALUE` argument at its first `=`.
pub fn split_assignment(arg: &str) -> CliResult<(&str, &str)> {
    match arg.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value)),
        _ => Err(CliError::invalid_assignment(arg, "expected NAME=VALUE")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> Row {
        let info = BenchmarkInfo::builder()
            .machine_name("sm01")
            .gpu_type("Tesla V100")
            .commit_hash("c0ffee01")
            .commit_time(1_571_346_000_000)
            .build()
            .unwrap();
        let result = BenchmarkResult::new("bfs", [("dataset", "karate.csv"), ("max_depth", "10")], 0.25)
            .unwrap();
        Row::new(info, result)
    }

    // ==================== Parsing ====================

    #[test]
    fn test_every_named_field_parses_back() {
        for field in Field::named() {
            assert_eq!(Field::parse(&field.name()).unwrap(), field);
        }
    }

    #[test]
    fn test_parse_list() {
        let fields = Field::parse_list("func_name, result,param:n").unwrap();
        assert_eq!(
            fields,
            vec![Field::FuncName, Field::Result, Field::Param("n".to_string())]
        );
        assert!(Field::parse_list("func_name,bogus").is_err());
    }

    #[test]
    fn test_empty_param_name_rejected() {
        assert!(matches!(Field::parse("param:"), Err(CliError::UnknownField(_))));
    }

    // ==================== Reading ====================

    #[test]
    fn test_values() {
        let row = row();
        assert_eq!(
            Field::GpuType.value(&row),
            Some(FieldValue::Text("Tesla V100".to_string()))
        );
        assert_eq!(Field::Result.value(&row), Some(FieldValue::Number(0.25)));
        assert_eq!(
            Field::Params.value(&row).unwrap().to_string(),
            "(dataset=karate.csv, max_depth=10)"
        );
        assert_eq!(
            Field::Param("max_depth".into()).value(&row),
            Some(FieldValue::Text("10".to_string()))
        );
        assert_eq!(Field::Param("missing".into()).value(&row), None);
    }

    // ==================== Assignment ====================

    #[test]
    fn test_assign_environment_field() {
        let row = Field::MachineName.assign(&row(), "dgx02").unwrap();
        assert_eq!(row.info.machine_name(), "dgx02");
        assert_eq!(row.info.gpu_type(), "Tesla V100");
    }

    #[test]
    fn test_assign_result_fields() {
        let row = Field::Unit.assign(&row(), "milliseconds").unwrap();
        let row = Field::Result.assign(&row, "250").unwrap();
        assert_eq!(row.result.unit(), "milliseconds");
        assert_eq!(row.result.result(), 250.0);
        assert_eq!(row.result.param("dataset"), Some("karate.csv"));
    }

    #[test]
    fn test_assign_param_replaces_or_appends() {
        let row = Field::Param("dataset".into()).assign(&row(), "dolphins.csv").unwrap();
        assert_eq!(row.result.param_names(), vec!["dataset", "max_depth"]);
        assert_eq!(row.result.param("dataset"), Some("dolphins.csv"));

        let row = Field::Param("gpus".into()).assign(&row, "2").unwrap();
        assert_eq!(row.result.param_names(), vec!["dataset", "max_depth", "gpus"]);
    }

    #[test]
    fn test_assign_rejects_bad_values() {
        assert!(matches!(
            Field::CommitTime.assign(&row(), "yesterday"),
            Err(CliError::InvalidAssignment { .. })
        ));
        assert!(matches!(
            Field::Params.assign(&row(), "n=1"),
            Err(CliError::InvalidAssignment { .. })
        ));
        assert!(matches!(Field::CommitHash.assign(&row(), ""), Err(CliError::Db(_))));
        assert!(matches!(Field::Result.assign(&row(), "inf"), Err(CliError::Db(_))));
    }

    #[test]
    fn test_split_assignment() {
        assert_eq!(split_assignment("n=100").unwrap(), ("n", "100"));
        assert_eq!(split_assignment("url=a=b").unwrap(), ("url", "a=b"));
        assert!(split_assignment("n").is_err());
        assert!(split_assignment("=1").is_err());
    }
}

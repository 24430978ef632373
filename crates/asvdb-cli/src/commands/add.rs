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

//! Add command - record a single result

use crate::error::CliResult;
use crate::field::{format_params, split_assignment};
use asvdb::{AsvDb, BenchmarkInfo, BenchmarkResult, DbConfig, DEFAULT_UNIT};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

/// Arguments of `asvdb add`.
#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Database directory (created if needed)
    #[arg(value_name = "DB")]
    pub db: PathBuf,

    /// Repository URL the benchmarks were run against
    #[arg(long)]
    pub repo: String,

    /// Branch to record (repeatable)
    #[arg(long = "branch", value_name = "BRANCH")]
    pub branches: Vec<String>,

    /// Machine name
    #[arg(long)]
    pub machine: String,

    /// Commit hash
    #[arg(long)]
    pub commit_hash: String,

    /// Commit time in epoch milliseconds
    #[arg(long, allow_negative_numbers = true)]
    pub commit_time: i64,

    /// Operating system
    #[arg(long, default_value = "")]
    pub os: String,

    /// CPU model
    #[arg(long, default_value = "")]
    pub cpu: String,

    /// CPU architecture
    #[arg(long, default_value = "")]
    pub arch: String,

    /// Installed memory
    #[arg(long, default_value = "")]
    pub ram: String,

    /// GPU model
    #[arg(long, default_value = "")]
    pub gpu: String,

    /// CUDA version
    #[arg(long, default_value = "")]
    pub cuda: String,

    /// Python version
    #[arg(long, default_value = "")]
    pub python: String,

    /// Benchmark function name
    #[arg(long)]
    pub function: String,

    /// Benchmark parameter, in axis order (repeatable)
    #[arg(long = "param", value_name = "NAME=VALUE")]
    pub params: Vec<String>,

    /// Measured value
    #[arg(long, allow_negative_numbers = true)]
    pub result: f64,

    /// Unit of the measured value
    #[arg(long, default_value = DEFAULT_UNIT)]
    pub unit: String,
}

/// Record one result.
///
/// # Errors
///
/// Returns `Err` if a `--param` is not `NAME=VALUE`, the record is invalid,
/// the parameter names disagree with the recorded ones, or a document
/// cannot be read or written. Nothing is written on error.
pub fn add(args: AddArgs) -> CliResult<()> {
    let info = BenchmarkInfo::builder()
        .machine_name(args.machine)
        .commit_hash(args.commit_hash)
        .commit_time(args.commit_time)
        .os_type(args.os)
        .cpu_type(args.cpu)
        .arch(args.arch)
        .ram(args.ram)
        .gpu_type(args.gpu)
        .cuda_version(args.cuda)
        .python_version(args.python)
        .build()?;

    let pairs = args
        .params
        .iter()
        .map(|arg| split_assignment(arg).map(|(n, v)| (n.to_string(), v.to_string())))
        .collect::<CliResult<Vec<_>>>()?;
    let result = BenchmarkResult::new(args.function, pairs, args.result)?.with_unit(args.unit)?;

    let config = DbConfig::builder()
        .repo(args.repo)
        .branches(args.branches)
        .build();
    AsvDb::open(&args.db, config).add_result(&info, &result)?;

    println!(
        "{} {}{} = {} {}",
        "✓".green().bold(),
        result.name().bold(),
        format_params(&result),
        result.result(),
        result.unit()
    );
    Ok(())
}

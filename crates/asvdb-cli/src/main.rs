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

//! ASVDb Command Line Interface

use asvdb_cli::cli::Commands;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// ASVDb - benchmark results database
///
/// Reads and writes benchmark results stored in the airspeed velocity
/// (asv) on-disk layout.
///
/// # Examples
///
/// ```bash
/// # List field names
/// asvdb keys
///
/// # Print the results of one benchmark
/// asvdb show asv-db --filter "func_name == bfs"
///
/// # Record a result
/// asvdb add asv-db --repo https://github.com/rapidsai/cugraph \
///     --machine sm01 --commit-hash c0ffee01 --commit-time 1571346000000 \
///     --function bfs --param dataset=karate.csv --result 0.0125
///
/// # Debug logging
/// RUST_LOG=asvdb=debug asvdb show asv-db
/// ```
#[derive(Parser)]
#[command(name = "asvdb")]
#[command(author, version, about = "ASVDb - benchmark results database", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("asvdb=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

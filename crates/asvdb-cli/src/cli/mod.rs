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

//! CLI command definitions and argument parsing.

use crate::commands::{self, AddArgs};
use crate::error::CliResult;
use clap::Subcommand;
use std::path::PathBuf;

/// Top-level CLI commands.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use asvdb_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand)]
pub enum Commands {
    /// List the field names usable in filters, prints and sets
    Keys,

    /// Print stored results
    ///
    /// Prints one line per result. Every `--filter` must hold for a result
    /// to be printed.
    Show {
        /// Database directory
        #[arg(value_name = "DB")]
        db: PathBuf,

        /// Filter expression, e.g. "result > 1.5" or "param:dataset ~= karate"
        #[arg(short, long = "filter", value_name = "EXPR")]
        filters: Vec<String>,

        /// Comma-separated fields to print
        #[arg(short, long, value_name = "FIELDS")]
        print: Option<String>,
    },

    /// Copy results into another database
    ///
    /// Reads every result of FROM, keeps those passing all filters, applies
    /// the `--set` overrides and adds them to TO, which is created if needed.
    Copy {
        /// Source database directory
        #[arg(value_name = "FROM")]
        from: PathBuf,

        /// Destination database directory
        #[arg(value_name = "TO")]
        to: PathBuf,

        /// Filter expression (repeatable)
        #[arg(short, long = "filter", value_name = "EXPR")]
        filters: Vec<String>,

        /// Field override applied to every copied result (repeatable)
        #[arg(short, long = "set", value_name = "FIELD=VALUE")]
        sets: Vec<String>,
    },

    /// Add a single result
    Add(AddArgs),
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns the first error the command hits; see the individual
    /// functions in [`commands`](crate::commands).
    pub fn execute(self) -> CliResult<()> {
        match self {
            Commands::Keys => commands::keys(),
            Commands::Show { db, filters, print } => {
                commands::show(&db, &filters, print.as_deref())
            }
            Commands::Copy {
                from,
                to,
                filters,
                sets,
            } => commands::copy(&from, &to, &filters, &sets),
            Commands::Add(args) => commands::add(args),
        }
    }
}

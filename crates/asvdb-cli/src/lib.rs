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

//! ASVDb CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **keys**: list the field names usable in filters, prints and sets
//! - **show**: print stored results, optionally filtered
//! - **copy**: filter results, override fields and add them to another
//!   database
//! - **add**: record a single result
//!
//! # Fields and filters
//!
//! Every result is addressed through named fields (`machine_name`,
//! `commit_hash`, `result`, ...) plus `param:<name>` for a single
//! parameter. A filter is `FIELD OP VALUE`:
//!
//! ```text
//! asvdb show asv-db --filter "func_name == bfs" --filter "result < 0.5"
//! asvdb copy asv-db asv-db-t4 --filter "gpu_type ~= T4" --set machine_name=t4-01
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use asvdb_cli::commands::show;
//! use std::path::Path;
//!
//! # fn main() -> asvdb_cli::error::CliResult<()> {
//! show(Path::new("asv-db"), &["param:dataset ~= karate".to_string()], None)?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod expr;
pub mod field;

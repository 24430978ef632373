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

//! Structured error types for the ASVDb CLI.
//!
//! Every command returns `Result<(), CliError>`; `main` prints the error and
//! exits with status 1.

use asvdb::AsvdbError;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for ASVDb CLI operations.
///
/// # Examples
///
/// ```rust
/// use asvdb_cli::error::CliError;
///
/// let err = CliError::invalid_filter("result >> 2", "no comparison operator");
/// assert_eq!(
///     err.to_string(),
///     "Invalid filter 'result >> 2': no comparison operator"
/// );
/// ```
#[derive(Error, Debug)]
pub enum CliError {
    /// The database layer failed.
    #[error(transparent)]
    Db(#[from] AsvdbError),

    /// A field name that is not one of the known keys.
    ///
    /// `asvdb keys` lists the accepted names.
    #[error("Unknown field '{0}' (run `asvdb keys` for the list)")]
    UnknownField(String),

    /// A filter expression that could not be parsed.
    #[error("Invalid filter '{expr}': {message}")]
    InvalidFilter {
        /// The expression as given
        expr: String,
        /// What is wrong with it
        message: String,
    },

    /// A `NAME=VALUE` or `FIELD=VALUE` argument that could not be applied.
    #[error("Invalid assignment '{arg}': {message}")]
    InvalidAssignment {
        /// The argument as given
        arg: String,
        /// What is wrong with it
        message: String,
    },

    /// Some documents of the source database could not be read.
    ///
    /// Raised by `copy`, which refuses to produce a partial copy.
    #[error("{count} document(s) in '{path}' could not be read; first: {first}")]
    IncompleteRead {
        /// The database being read
        path: PathBuf,
        /// Number of unreadable documents
        count: usize,
        /// The first error encountered
        first: String,
    },
}

impl CliError {
    /// Create a filter parse error.
    pub fn invalid_filter(expr: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidFilter {
            expr: expr.into(),
            message: message.into(),
        }
    }

    /// Create an assignment error.
    pub fn invalid_assignment(arg: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidAssignment {
            arg: arg.into(),
            message: message.into(),
        }
    }
}

/// Alias for CLI results.
pub type CliResult<T> = Result<T, CliError>;

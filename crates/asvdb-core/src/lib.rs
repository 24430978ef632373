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

//! Record types and parameter-grid reconciliation for ASVDb.
//!
//! This crate holds everything in ASVDb that does not touch the filesystem:
//!
//! - [`BenchmarkInfo`] and [`BenchmarkResult`]: validated, immutable records
//!   describing where a benchmark ran and what it measured.
//! - [`grid`]: the parameter grid of a benchmark function (the cartesian
//!   product of its parameter axes) and the reconciler that grows it while
//!   keeping every stored result vector aligned.
//! - [`AsvdbError`]: the error type shared by the whole workspace.
//!
//! # Example
//!
//! ```rust
//! use asvdb_core::{BenchmarkResult, grid::{reconcile, ResultVector}};
//!
//! # fn main() -> asvdb_core::AsvdbResult<()> {
//! let first = BenchmarkResult::new("sort", [("n", 100)], 1.2)?;
//! let second = BenchmarkResult::new("sort", [("n", 200)], 2.4)?;
//!
//! let step = reconcile(None, &first)?;
//! let mut vector = ResultVector::empty(step.axes.grid().clone());
//! vector.set(step.position, first.result());
//!
//! let step = reconcile(Some(&step.axes), &second)?;
//! let mut vector = vector.regrid("sort", step.axes.grid())?;
//! vector.set(step.position, second.result());
//!
//! assert_eq!(vector.values(), &[Some(1.2), Some(2.4)]);
//! # Ok(())
//! # }
//! ```

mod error;
pub mod grid;
mod record;

pub use error::{AsvdbError, AsvdbResult};
pub use grid::{BenchmarkAxes, Grid, Placement, ResultVector};
pub use record::{BenchmarkInfo, BenchmarkInfoBuilder, BenchmarkResult, DEFAULT_UNIT};

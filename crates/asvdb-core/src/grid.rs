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

//! Parameter grids and their reconciliation.
//!
//! A benchmark function with parameters `A`, `B` and `C` stores one result
//! per combination of parameter values. The combinations are the cartesian
//! product of the per-parameter *axes* (each axis lists the distinct values
//! seen for that parameter, in first-seen order), flattened with the last
//! axis varying fastest:
//!
//! ```text
//! axes:  [["a"], ["b", "c"], ["d", "e"]]
//! grid:  (a,b,d) (a,b,e) (a,c,d) (a,c,e)
//! index:    0       1       2       3
//! ```
//!
//! A stored result vector has exactly one slot per combination; `None` marks
//! a combination that was never measured for that machine and commit.
//!
//! Adding a value to an axis changes every index after the insertion point,
//! so any vector written against the old grid must be rebuilt against the new
//! one ([`ResultVector::regrid`]). Axes only ever grow: values are appended,
//! never sorted or removed, so a combination keeps its meaning forever.

use crate::{AsvdbError, AsvdbResult, BenchmarkResult};

/// The cartesian product of a benchmark function's parameter axes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    axes: Vec<Vec<String>>,
}

impl Grid {
    /// Create a grid from its axes.
    pub fn new(axes: Vec<Vec<String>>) -> Self {
        Self { axes }
    }

    /// A grid with one axis per value, each holding just that value.
    pub fn singleton<S: AsRef<str>>(values: &[S]) -> Self {
        Self {
            axes: values.iter().map(|v| vec![v.as_ref().to_string()]).collect(),
        }
    }

    /// The axes, in fixed axis order.
    pub fn axes(&self) -> &[Vec<String>] {
        &self.axes
    }

    /// Number of axes.
    pub fn dimensions(&self) -> usize {
        self.axes.len()
    }

    /// Number of combinations.
    ///
    /// A grid without axes has exactly one (empty) combination, matching a
    /// benchmark that takes no parameters.
    pub fn len(&self) -> usize {
        self.axes
            .iter()
            .fold(1usize, |acc, axis| acc.saturating_mul(axis.len()))
    }

    /// True if the grid has no combinations (some axis is empty).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat index of a combination, or `None` if any value is not on its axis.
    pub fn index_of<S: AsRef<str>>(&self, values: &[S]) -> Option<usize> {
        if values.len() != self.axes.len() {
            return None;
        }
        let mut index = 0usize;
        for (axis, value) in self.axes.iter().zip(values) {
            let position = axis.iter().position(|v| v == value.as_ref())?;
            index = index * axis.len() + position;
        }
        Some(index)
    }

    /// The combination stored at a flat index.
    pub fn combination(&self, index: usize) -> Option<Vec<&str>> {
        if index >= self.len() {
            return None;
        }
        let mut remainder = index;
        let mut values = vec![""; self.axes.len()];
        for (slot, axis) in values.iter_mut().zip(&self.axes).rev() {
            *slot = axis[remainder % axis.len()].as_str();
            remainder /= axis.len();
        }
        Some(values)
    }

    /// Every combination in index order.
    pub fn combinations(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        (0..self.len()).filter_map(move |i| self.combination(i))
    }

    /// Append every value not yet on its axis. Returns true if any axis grew.
    fn extend<S: AsRef<str>>(&mut self, values: &[S]) -> bool {
        let mut grew = false;
        for (axis, value) in self.axes.iter_mut().zip(values) {
            let value = value.as_ref();
            if !axis.iter().any(|v| v == value) {
                axis.push(value.to_string());
                grew = true;
            }
        }
        grew
    }
}

/// The recorded parameter layout of one benchmark function: its parameter
/// names and the grid their values span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkAxes {
    param_names: Vec<String>,
    grid: Grid,
}

impl BenchmarkAxes {
    /// Pair recorded parameter names with their axes.
    ///
    /// # Errors
    ///
    /// Returns [`AsvdbError::Grid`] if there are not exactly as many axes as
    /// parameter names.
    pub fn new(function: &str, param_names: Vec<String>, grid: Grid) -> AsvdbResult<Self> {
        // A definition that has names but has not received any values yet
        // (an empty `params` list) is the state older writers leave behind.
        let grid = if grid.dimensions() == 0 && !param_names.is_empty() {
            Grid::new(vec![Vec::new(); param_names.len()])
        } else {
            grid
        };
        if grid.dimensions() != param_names.len() {
            return Err(AsvdbError::grid(
                function,
                format!(
                    "{} parameter names but {} value axes",
                    param_names.len(),
                    grid.dimensions()
                ),
            ));
        }
        Ok(Self { param_names, grid })
    }

    /// Recorded parameter names, in axis order.
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// The grid spanned by the recorded values.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Values of `result` in recorded axis order.
    ///
    /// A result whose parameter names are a permutation of the recorded
    /// names is realigned to the recorded order. Any other difference is an
    /// axis mismatch.
    ///
    /// # Errors
    ///
    /// Returns [`AsvdbError::AxisMismatch`] naming the function and both
    /// name lists.
    pub fn align<'r>(&self, result: &'r BenchmarkResult) -> AsvdbResult<Vec<&'r str>> {
        let pairs = result.arg_name_value_pairs();
        let mismatch = || AsvdbError::AxisMismatch {
            function: result.name().to_string(),
            recorded: self.param_names.clone(),
            given: pairs.iter().map(|(n, _)| n.clone()).collect(),
        };

        if pairs.len() != self.param_names.len() {
            return Err(mismatch());
        }
        self.param_names
            .iter()
            .map(|name| result.param(name).ok_or_else(mismatch))
            .collect()
    }

    /// The (name, value) pairs of the combination at `index`.
    pub fn pairs_at(&self, index: usize) -> Option<Vec<(String, String)>> {
        let values = self.grid.combination(index)?;
        Some(
            self.param_names
                .iter()
                .zip(values)
                .map(|(n, v)| (n.clone(), v.to_string()))
                .collect(),
        )
    }
}

/// Where a new result lands after reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// The function's axes after the result is folded in.
    pub axes: BenchmarkAxes,
    /// True if the function had no recorded axes before.
    pub created: bool,
    /// True if any axis gained a value, which invalidates every stored
    /// vector for the function.
    pub grew: bool,
    /// Index of the result's combination in `axes.grid()`.
    pub position: usize,
}

/// Fold a result's parameters into a function's recorded axes.
///
/// With no recorded axes the result defines them: its parameter names in
/// call order, one singleton axis per parameter. Otherwise the result's
/// values are aligned to the recorded order and appended to any axis that
/// does not contain them yet.
///
/// # Errors
///
/// Returns [`AsvdbError::AxisMismatch`] if the result's parameter names are
/// not the recorded names (in any order). Nothing is modified in that case.
pub fn reconcile(existing: Option<&BenchmarkAxes>, result: &BenchmarkResult) -> AsvdbResult<Placement> {
    match existing {
        None => {
            let values = result.param_values();
            let axes = BenchmarkAxes {
                param_names: result.param_names().iter().map(|n| n.to_string()).collect(),
                grid: Grid::singleton(&values),
            };
            Ok(Placement {
                axes,
                created: true,
                grew: true,
                position: 0,
            })
        }
        Some(recorded) => {
            let values = recorded.align(result)?;
            let mut axes = recorded.clone();
            let grew = axes.grid.extend(&values);
            let position = axes.grid.index_of(&values).ok_or_else(|| {
                AsvdbError::grid(result.name(), "new combination missing after growth")
            })?;
            Ok(Placement {
                axes,
                created: false,
                grew,
                position,
            })
        }
    }
}

/// One function's results for one machine and commit, laid out on a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultVector {
    grid: Grid,
    values: Vec<Option<f64>>,
}

impl ResultVector {
    /// A vector with no measured combinations.
    pub fn empty(grid: Grid) -> Self {
        let values = vec![None; grid.len()];
        Self { grid, values }
    }

    /// Pair stored values with the grid they were written against.
    ///
    /// # Errors
    ///
    /// Returns [`AsvdbError::Grid`] unless there is exactly one value per
    /// combination.
    pub fn from_parts(function: &str, grid: Grid, values: Vec<Option<f64>>) -> AsvdbResult<Self> {
        if values.len() != grid.len() {
            return Err(AsvdbError::grid(
                function,
                format!(
                    "{} stored results for a grid of {} combinations",
                    values.len(),
                    grid.len()
                ),
            ));
        }
        Ok(Self { grid, values })
    }

    /// The grid the values are laid out on.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// One slot per combination.
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Split into grid and values.
    pub fn into_parts(self) -> (Grid, Vec<Option<f64>>) {
        (self.grid, self.values)
    }

    /// Value at a flat index.
    pub fn get(&self, position: usize) -> Option<f64> {
        self.values.get(position).copied().flatten()
    }

    /// Store `value` at `position`, replacing whatever was there.
    ///
    /// Positions outside the grid are ignored; [`reconcile`] only hands out
    /// positions inside it.
    pub fn set(&mut self, position: usize, value: f64) {
        if let Some(slot) = self.values.get_mut(position) {
            *slot = Some(value);
        }
    }

    /// Measured slots as (flat index, value).
    pub fn measured(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| (i, v)))
    }

    /// Lay the vector out on `target`.
    ///
    /// Each measured value moves to the index its combination has in
    /// `target`; combinations that only exist in `target` are unmeasured.
    ///
    /// # Errors
    ///
    /// Returns [`AsvdbError::Grid`] if a measured combination is not part of
    /// `target` (the target must contain every axis value of this grid).
    pub fn regrid(&self, function: &str, target: &Grid) -> AsvdbResult<ResultVector> {
        if &self.grid == target {
            return Ok(self.clone());
        }

        let mut regridded = ResultVector::empty(target.clone());
        for (index, value) in self.measured() {
            let combination = self
                .grid
                .combination(index)
                .ok_or_else(|| AsvdbError::grid(function, format!("index {} is off the grid", index)))?;
            let target_index = target.index_of(&combination).ok_or_else(|| {
                AsvdbError::grid(
                    function,
                    format!("combination ({}) is not on the current grid", combination.join(", ")),
                )
            })?;
            regridded.values[target_index] = Some(value);
        }
        Ok(regridded)
    }
}

/// Expand a stored vector back into (parameter pairs, value) records.
///
/// # Errors
///
/// Returns [`AsvdbError::Grid`] if the vector's grid has a different number
/// of axes than `param_names`.
pub fn degrid(
    function: &str,
    param_names: &[String],
    vector: &ResultVector,
) -> AsvdbResult<Vec<(Vec<(String, String)>, f64)>> {
    if vector.grid().dimensions() != param_names.len() {
        return Err(AsvdbError::grid(
            function,
            format!(
                "{} parameter names but {} value axes",
                param_names.len(),
                vector.grid().dimensions()
            ),
        ));
    }

    let mut records = Vec::new();
    for (index, value) in vector.measured() {
        let combination = vector
            .grid()
            .combination(index)
            .ok_or_else(|| AsvdbError::grid(function, format!("index {} is off the grid", index)))?;
        let pairs = param_names
            .iter()
            .zip(combination)
            .map(|(n, v)| (n.clone(), v.to_string()))
            .collect();
        records.push((pairs, value));
    }
    Ok(records)
}

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

//! Copy command - filter, rewrite and re-add results into another database

use super::read_rows;
use crate::error::{CliError, CliResult};
use crate::expr;
use crate::field::{split_assignment, Field, Row};
use asvdb::{AsvDb, BenchmarkInfo, BenchmarkResult, DbConfig};
use colored::Colorize;
use std::path::Path;
use tracing::info;

/// Copy every result of `from` that passes the filters into `to`.
///
/// Each `--set FIELD=VALUE` overrides that field on every copied result
/// before it is written. The destination is created if needed and receives
/// the repository, branches, project name and commit URL of the source.
///
/// # Errors
///
/// Returns `Err` without writing anything if an argument does not parse, an
/// override produces an invalid record, or any source document cannot be
/// read. Write errors from the destination are propagated.
pub fn copy(from: &Path, to: &Path, filters: &[String], sets: &[String]) -> CliResult<()> {
    let filters = expr::parse_all(filters)?;
    let overrides = sets
        .iter()
        .map(|arg| {
            let (name, value) = split_assignment(arg)?;
            Ok((Field::parse(name)?, value.to_string()))
        })
        .collect::<CliResult<Vec<_>>>()?;

    let (source, rows, errors) = read_rows(from)?;
    if let Some(first) = errors.first() {
        return Err(CliError::IncompleteRead {
            path: from.to_path_buf(),
            count: errors.len(),
            first: first.to_string(),
        });
    }

    let mut selected = Vec::new();
    for mut row in rows.into_iter().filter(|row| expr::matches_all(&filters, row)) {
        for (field, value) in &overrides {
            row = field.assign(&row, value)?;
        }
        selected.push(row);
    }

    let dest = AsvDb::open(to, destination_config(source.config()));
    let groups = group_by_info(selected);
    let mut copied = 0;
    for (info, results) in &groups {
        dest.add_results(info, results)?;
        copied += results.len();
    }
    info!(from = %from.display(), to = %to.display(), copied, "copied results");

    println!(
        "{} Copied {} result(s) into {}",
        "✓".green().bold(),
        copied,
        to.display()
    );
    Ok(())
}

fn destination_config(source: &DbConfig) -> DbConfig {
    let mut builder = DbConfig::builder().branches(source.branches.iter().cloned());
    if let Some(repo) = &source.repo {
        builder = builder.repo(repo.clone());
    }
    if let Some(project) = &source.project {
        builder = builder.project(project.clone());
    }
    if let Some(url) = &source.commit_url {
        builder = builder.commit_url(url.clone());
    }
    builder.build()
}

/// Group rows sharing an environment, keeping first-seen order.
fn group_by_info(rows: Vec<Row>) -> Vec<(BenchmarkInfo, Vec<BenchmarkResult>)> {
    let mut groups: Vec<(BenchmarkInfo, Vec<BenchmarkResult>)> = Vec::new();
    for row in rows {
        match groups.iter_mut().find(|(info, _)| *info == row.info) {
            Some((_, results)) => results.push(row.result),
            None => groups.push((row.info, vec![row.result])),
        }
    }
    groups
}

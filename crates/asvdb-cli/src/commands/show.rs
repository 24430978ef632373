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

//! Show command - print stored results

use super::read_rows;
use crate::error::CliResult;
use crate::expr::{self, FilterExpr};
use crate::field::{Field, Row};
use colored::{ColoredString, Colorize};
use std::path::Path;

/// Print one line per stored result that passes every filter.
///
/// Each line is a sequence of `field=value` pairs for the requested fields
/// (`None` prints [`Field::default_print`]). Documents that cannot be read
/// are reported as warnings on stderr and do not fail the command.
///
/// # Errors
///
/// Returns `Err` if a filter or field name does not parse or the database
/// has no config.
///
/// # Examples
///
/// ```no_run
/// use asvdb_cli::commands::show;
/// use std::path::Path;
///
/// # fn main() -> asvdb_cli::error::CliResult<()> {
/// show(Path::new("asv-db"), &["func_name == bfs".to_string()], Some("commit_hash,result"))?;
/// # Ok(())
/// # }
/// ```
pub fn show(db_dir: &Path, filters: &[String], print: Option<&str>) -> CliResult<()> {
    let filters = expr::parse_all(filters)?;
    let fields = match print {
        Some(list) => Field::parse_list(list)?,
        None => Field::default_print(),
    };

    let (_, rows, errors) = read_rows(db_dir)?;
    for err in &errors {
        eprintln!("{} {}", "warning:".yellow().bold(), err);
    }

    for row in rows.iter().filter(|row| expr::matches_all(&filters, row)) {
        println!("{}", format_row(row, &fields));
    }
    Ok(())
}

/// Render the requested fields of `row`. A missing parameter prints as `-`.
pub(crate) fn format_row(row: &Row, fields: &[Field]) -> String {
    fields
        .iter()
        .map(|field| {
            let text = field
                .value(row)
                .map_or_else(|| "-".to_string(), |v| v.to_string());
            format!("{}={}", field.name(), paint(field, text))
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn paint(field: &Field, text: String) -> ColoredString {
    match field {
        Field::MachineName => text.cyan(),
        Field::CommitHash => text.yellow(),
        Field::FuncName => text.bold(),
        Field::Result => text.green(),
        _ => text.normal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asvdb::{BenchmarkInfo, BenchmarkResult};

    #[test]
    fn test_format_row() {
        colored::control::set_override(false);
        let info = BenchmarkInfo::builder()
            .machine_name("sm01")
            .commit_hash("c0ffee01")
            .commit_time(1)
            .build()
            .unwrap();
        let row = Row::new(info, BenchmarkResult::new("sort", [("n", 100)], 1.2).unwrap());

        assert_eq!(
            format_row(&row, &Field::default_print()),
            "machine_name=sm01  commit_hash=c0ffee01  func_name=sort  params=(n=100)  result=1.2  unit=seconds"
        );
        assert_eq!(
            format_row(&row, &[Field::Param("m".into()), Field::CommitTime]),
            "param:m=-  commit_time=1"
        );
    }
}

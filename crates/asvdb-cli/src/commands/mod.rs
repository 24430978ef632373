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

//! Command implementations for the ASVDb CLI.

mod add;
mod copy;
mod keys;
mod show;

pub use add::{add, AddArgs};
pub use copy::copy;
pub use keys::keys;
pub use show::show;

use crate::error::CliResult;
use crate::field::Row;
use asvdb::{AsvDb, AsvdbError, ResultFilter};
use std::path::Path;
use tracing::debug;

/// Every result stored in the database at `db_dir`, flattened into rows,
/// plus one error per document that could not be read.
pub(crate) fn read_rows(db_dir: &Path) -> CliResult<(AsvDb, Vec<Row>, Vec<AsvdbError>)> {
    let db = AsvDb::load(db_dir)?;
    let set = db.get_results(&ResultFilter::all())?;
    let rows: Vec<Row> = set
        .iter()
        .map(|(info, result)| Row::new(info.clone(), result.clone()))
        .collect();
    debug!(db = %db_dir.display(), rows = rows.len(), errors = set.errors.len(), "read database");
    Ok((db, rows, set.errors))
}

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

//! Keys command - list field names

use crate::error::CliResult;
use crate::field::{Field, PARAM_PREFIX};
use colored::Colorize;

/// Print every field name usable with `--filter`, `--print` and `--set`.
pub fn keys() -> CliResult<()> {
    for field in Field::named() {
        println!("{:<16} {}", field.name().bold(), field.describe());
    }
    println!(
        "{:<16} {}",
        format!("{}<name>", PARAM_PREFIX).bold(),
        Field::Param(String::new()).describe()
    );
    Ok(())
}

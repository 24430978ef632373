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

//! `--filter` expressions: `FIELD OP VALUE`.
//!
//! `OP` is one of `==`, `!=`, `<`, `<=`, `>`, `>=` or `~=` (substring).
//! `commit_time` and `result` compare numerically, every other field
//! compares as text.

use crate::error::{CliError, CliResult};
use crate::field::{Field, FieldValue, Row};
use std::cmp::Ordering;

/// Comparison operator of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Contains,
}

// Two-character operators first so `<=` is not read as `<`.
const OPERATORS: [(&str, Op); 7] = [
    ("==", Op::Eq),
    ("!=", Op::Ne),
    ("<=", Op::Le),
    (">=", Op::Ge),
    ("~=", Op::Contains),
    ("<", Op::Lt),
    (">", Op::Gt),
];

impl Op {
    fn holds(self, ordering: Ordering) -> bool {
        match self {
            Op::Eq => ordering == Ordering::Equal,
            Op::Ne => ordering != Ordering::Equal,
            Op::Lt => ordering == Ordering::Less,
            Op::Le => ordering != Ordering::Greater,
            Op::Gt => ordering == Ordering::Greater,
            Op::Ge => ordering != Ordering::Less,
            Op::Contains => false,
        }
    }
}

/// A parsed filter expression.
///
/// # Examples
///
/// ```
/// use asvdb_cli::expr::FilterExpr;
///
/// let expr = FilterExpr::parse("result >= 1.5").unwrap();
/// assert_eq!(expr.field().name(), "result");
///
/// assert!(FilterExpr::parse("result >= fast").is_err());
/// assert!(FilterExpr::parse("params == x").is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FilterExpr {
    field: Field,
    op: Op,
    value: String,
    number: Option<f64>,
}

impl FilterExpr {
    /// Parse `FIELD OP VALUE`. Whitespace around the parts is ignored.
    pub fn parse(expr: &str) -> CliResult<Self> {
        let (at, token, op) = find_operator(expr)
            .ok_or_else(|| CliError::invalid_filter(expr, "no comparison operator"))?;

        let field = Field::parse(&expr[..at])?;
        if field == Field::Params {
            return Err(CliError::invalid_filter(
                expr,
                "params cannot be filtered; use param:<name>",
            ));
        }

        let value = expr[at + token.len()..].trim().to_string();
        let number = if field.is_numeric() && op != Op::Contains {
            let n = value
                .parse::<f64>()
                .map_err(|_| CliError::invalid_filter(expr, format!("{} compares numbers", field)))?;
            Some(n)
        } else {
            None
        };

        Ok(Self {
            field,
            op,
            value,
            number,
        })
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn op(&self) -> Op {
        self.op
    }

    /// True if `row` satisfies the expression. A row that lacks the
    /// addressed parameter never matches.
    pub fn matches(&self, row: &Row) -> bool {
        let Some(actual) = self.field.value(row) else {
            return false;
        };

        if self.op == Op::Contains {
            return actual.to_string().contains(&self.value);
        }

        let ordering = match (&actual, self.number) {
            (FieldValue::Number(a), Some(b)) => a.partial_cmp(&b),
            (actual, _) => Some(actual.to_string().as_str().cmp(self.value.as_str())),
        };
        ordering.map_or(false, |o| self.op.holds(o))
    }
}

/// Position, text and meaning of the leftmost operator in `expr`.
fn find_operator(expr: &str) -> Option<(usize, &'static str, Op)> {
    (0..expr.len())
        .filter(|&i| expr.is_char_boundary(i))
        .find_map(|i| {
            OPERATORS
                .iter()
                .find(|(token, _)| expr[i..].starts_with(token))
                .map(|&(token, op)| (i, token, op))
        })
}

/// True if `row` satisfies every expression.
pub fn matches_all(filters: &[FilterExpr], row: &Row) -> bool {
    filters.iter().all(|f| f.matches(row))
}

/// Parse every `--filter` argument.
pub fn parse_all(exprs: &[String]) -> CliResult<Vec<FilterExpr>> {
    exprs.iter().map(|e| FilterExpr::parse(e)).collect()
}

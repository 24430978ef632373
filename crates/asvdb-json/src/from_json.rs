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

//! JSON to document conversion

use crate::AsvDocument;
use asvdb_core::{AsvdbError, AsvdbResult};
use std::path::Path;

/// Decode a document from its on-disk bytes.
///
/// `path` is only used to label errors.
///
/// # Errors
///
/// Returns [`AsvdbError::Decode`] if the bytes are not valid JSON, miss a
/// required key, or declare a schema version newer than this crate writes.
pub fn decode_document<D: AsvDocument>(bytes: &[u8], path: &Path) -> AsvdbResult<D> {
    let doc: D = serde_json::from_slice(bytes).map_err(|e| {
        AsvdbError::decode(path, format!("invalid {}: {}", D::KIND, e))
    })?;

    let supported = D::KIND.schema_version();
    if doc.declared_version() > supported {
        return Err(AsvdbError::decode(
            path,
            format!(
                "{} declares version {}, newest supported is {}",
                D::KIND,
                doc.declared_version(),
                supported
            ),
        ));
    }
    Ok(doc)
}

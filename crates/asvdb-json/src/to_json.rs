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

//! Document to JSON conversion

use crate::AsvDocument;
use asvdb_core::{AsvdbError, AsvdbResult};
use std::path::Path;

/// Encode a document as pretty-printed JSON (two-space indentation).
///
/// The output is deterministic: encoding the same document twice yields
/// the same text.
pub fn encode_document<D: AsvDocument>(doc: &D, path: &Path) -> AsvdbResult<String> {
    serde_json::to_string_pretty(doc)
        .map_err(|e| AsvdbError::encode(path, format!("JSON serialization error: {}", e)))
}

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

//! Every fixture decodes the way its documentation claims.

use asvdb_json::{decode_document, BenchmarksDocument, CommitDocument, ConfigDocument, MachineDocument};
use asvdb_test::fixtures::{documents, errors};
use std::path::Path;

#[test]
fn legacy_documents_decode() {
    let path = Path::new("legacy");
    decode_document::<ConfigDocument>(documents::LEGACY_CONFIG.as_bytes(), path).unwrap();
    decode_document::<BenchmarksDocument>(documents::LEGACY_BENCHMARKS.as_bytes(), path).unwrap();
    decode_document::<MachineDocument>(documents::LEGACY_MACHINE.as_bytes(), path).unwrap();
    decode_document::<CommitDocument>(documents::LEGACY_COMMIT_PARTIAL.as_bytes(), path).unwrap();
    decode_document::<CommitDocument>(documents::LEGACY_COMMIT_FULL.as_bytes(), path).unwrap();
}

#[test]
fn legacy_result_count_matches_documents() {
    let path = Path::new("legacy");
    let measured: usize = [documents::LEGACY_COMMIT_PARTIAL, documents::LEGACY_COMMIT_FULL]
        .iter()
        .map(|text| {
            let doc: CommitDocument = decode_document(text.as_bytes(), path).unwrap();
            doc.results
                .values()
                .map(|entry| entry.result.iter().filter(|v| v.is_some()).count())
                .sum::<usize>()
        })
        .sum();
    assert_eq!(measured, documents::LEGACY_RESULT_COUNT);
}

#[test]
fn generated_commit_document_decodes() {
    let text = documents::commit_document("sm01", "abc", 42);
    let doc: CommitDocument = decode_document(text.as_bytes(), Path::new("abc.json")).unwrap();
    assert_eq!(doc.date, 42);
    assert_eq!(doc.params.machine, "sm01");
}

#[test]
fn invalid_commit_documents_fail() {
    for (name, text) in errors::invalid_commit_documents() {
        let result = decode_document::<CommitDocument>(text.as_bytes(), Path::new(name));
        assert!(result.is_err(), "{} should not decode", name);
    }
}

#[test]
fn misshapen_commit_documents_decode_but_do_not_fit() {
    for (name, text) in errors::misshapen_commit_documents() {
        let doc: CommitDocument = decode_document(text.as_bytes(), Path::new(name)).unwrap();
        assert!(doc.results["f"].vector("f").is_err(), "{} should not fit its grid", name);
    }
}

#[test]
fn invalid_benchmarks_documents_fail() {
    for (name, text) in errors::invalid_benchmarks_documents() {
        let result = decode_document::<BenchmarksDocument>(text.as_bytes(), Path::new(name));
        assert!(result.is_err(), "{} should not decode", name);
    }
}

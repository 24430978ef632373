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

//! Filesystem access: size-checked reads, atomic writes and the write set.

use asvdb_core::{AsvdbError, AsvdbResult};
use asvdb_json::{decode_document, encode_document, AsvDocument, MACHINE_FILE_NAME};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const TMP_SUFFIX: &str = ".tmp";
const JSON_EXTENSION: &str = "json";

/// Reads documents, refusing any above the size ceiling.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DocumentReader {
    max_size: u64,
}

impl DocumentReader {
    pub(crate) fn new(max_size: u64) -> Self {
        Self { max_size }
    }

    /// The raw bytes of `path`, or `None` if it does not exist.
    pub(crate) fn read(&self, path: &Path) -> AsvdbResult<Option<Vec<u8>>> {
        let metadata = match fs::metadata(path) {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AsvdbError::io(path, e)),
        };
        if metadata.len() > self.max_size {
            return Err(AsvdbError::DocumentTooLarge {
                path: path.to_path_buf(),
                actual: metadata.len(),
                max: self.max_size,
            });
        }
        fs::read(path).map(Some).map_err(|e| AsvdbError::io(path, e))
    }

    /// Decode `path`, or `None` if it does not exist.
    pub(crate) fn load<D: AsvDocument>(&self, path: &Path) -> AsvdbResult<Option<D>> {
        match self.read(path)? {
            Some(bytes) => {
                let kind = D::KIND;
                debug!(path = %path.display(), %kind, bytes = bytes.len(), "loaded document");
                decode_document(&bytes, path).map(Some)
            }
            None => Ok(None),
        }
    }
}

/// Write `text` to `path` through a sibling temporary file so readers see
/// either the old or the new document, never a partial one.
pub(crate) fn write_atomic(path: &Path, text: &str) -> AsvdbResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| AsvdbError::io(parent, e))?;
    }

    let mut tmp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    tmp_name.push(TMP_SUFFIX);
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, text).map_err(|e| AsvdbError::io(&tmp_path, e))?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(AsvdbError::io(path, e));
    }
    Ok(())
}

/// Sub-directories of `dir` as (name, path), sorted by name. A missing
/// directory has none.
pub(crate) fn list_dirs(dir: &Path) -> AsvdbResult<Vec<(String, PathBuf)>> {
    let mut dirs = Vec::new();
    for (name, path, is_dir) in entries(dir)? {
        if is_dir {
            dirs.push((name, path));
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Commit documents in a machine directory, sorted by file name.
pub(crate) fn list_commit_files(machine_dir: &Path) -> AsvdbResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for (name, path, is_dir) in entries(machine_dir)? {
        let is_json = path.extension().map_or(false, |ext| ext == JSON_EXTENSION);
        if !is_dir && is_json && name != MACHINE_FILE_NAME {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn entries(dir: &Path) -> AsvdbResult<Vec<(String, PathBuf, bool)>> {
    let read_dir = match fs::read_dir(dir) {
        Ok(r) => r,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(AsvdbError::io(dir, e)),
    };

    let mut out = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| AsvdbError::io(dir, e))?;
        let path = entry.path();
        let is_dir = entry
            .file_type()
            .map_err(|e| AsvdbError::io(&path, e))?
            .is_dir();
        // Names that are not UTF-8 cannot be machine names or commit hashes.
        if let Some(name) = entry.file_name().to_str() {
            out.push((name.to_string(), path, is_dir));
        }
    }
    Ok(out)
}

/// Documents staged for writing.
///
/// Nothing touches the disk until [`WriteSet::commit`]; dropping an
/// uncommitted set discards it. Documents are written in staging order,
/// and staging a path again replaces its text in place.
#[derive(Debug, Default)]
pub(crate) struct WriteSet {
    pending: Vec<(PathBuf, String)>,
}

impl WriteSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Encode `doc` for `path`. Encoding failures surface here, before
    /// anything is written.
    pub(crate) fn stage<D: AsvDocument>(&mut self, path: PathBuf, doc: &D) -> AsvdbResult<()> {
        let text = encode_document(doc, &path)?;
        match self.pending.iter_mut().find(|(p, _)| *p == path) {
            Some(slot) => slot.1 = text,
            None => self.pending.push((path, text)),
        }
        Ok(())
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }

    /// Write every staged document. Stops at the first failure.
    pub(crate) fn commit(self) -> AsvdbResult<usize> {
        let count = self.pending.len();
        for (path, text) in &self.pending {
            write_atomic(path, text)?;
            debug!(path = %path.display(), bytes = text.len(), "wrote document");
        }
        info!(documents = count, "committed write set");
        Ok(count)
    }
}

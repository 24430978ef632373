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

//! Error types for ASVDb.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// An error raised while building records, reconciling grids or touching
/// the on-disk document set.
///
/// Every variant that relates to a document carries the path of that
/// document so the caller can tell which file is at fault.
#[derive(Debug, Error)]
pub enum AsvdbError {
    /// A record failed validation at construction time.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// The parameter names of a new result disagree with the axes recorded
    /// for the benchmark function.
    #[error(
        "parameter names for benchmark '{function}' do not match: recorded [{}], got [{}]",
        recorded.join(", "),
        given.join(", ")
    )]
    AxisMismatch {
        /// The benchmark function name.
        function: String,
        /// Parameter names recorded in the benchmark definition.
        recorded: Vec<String>,
        /// Parameter names carried by the rejected result.
        given: Vec<String>,
    },

    /// A stored result vector does not fit the grid it claims to follow.
    #[error("result grid for benchmark '{function}' is inconsistent: {message}")]
    Grid {
        /// The benchmark function name.
        function: String,
        /// What is wrong with the grid.
        message: String,
    },

    /// An on-disk document is not valid JSON or does not have the expected shape.
    #[error("failed to decode '{path}': {message}")]
    Decode {
        /// The offending document.
        path: PathBuf,
        /// The decoder's message.
        message: String,
    },

    /// A document could not be serialized.
    #[error("failed to encode '{path}': {message}")]
    Encode {
        /// The document being written.
        path: PathBuf,
        /// The encoder's message.
        message: String,
    },

    /// A filesystem operation failed.
    #[error("I/O error for '{path}': {source}")]
    Io {
        /// The path the operation was acting on.
        path: PathBuf,
        /// The underlying error, unchanged.
        #[source]
        source: io::Error,
    },

    /// A document exceeds the configured size ceiling.
    #[error("document '{path}' is too large ({actual} bytes, maximum {max} bytes)")]
    DocumentTooLarge {
        /// The offending document.
        path: PathBuf,
        /// Its size in bytes.
        actual: u64,
        /// The configured ceiling in bytes.
        max: u64,
    },

    /// A write needs a repository URL and none is configured.
    #[error("no repository configured for database '{0}'")]
    MissingRepository(PathBuf),
}

impl AsvdbError {
    /// Create an invalid-record error.
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord(message.into())
    }

    /// Create a grid error for a benchmark function.
    pub fn grid(function: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Grid {
            function: function.into(),
            message: message.into(),
        }
    }

    /// Create a decode error for a document.
    pub fn decode(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an encode error for a document.
    pub fn encode(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Encode {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Attach a document path to an error raised without one.
    ///
    /// Grid errors become decode errors for `path`: a vector that does not
    /// fit its grid means the document holding it is malformed. Other
    /// variants are returned unchanged.
    pub fn in_document(self, path: &Path) -> Self {
        match self {
            Self::Grid { function, message } => Self::Decode {
                path: path.to_path_buf(),
                message: format!("benchmark '{}': {}", function, message),
            },
            other => other,
        }
    }

    /// The document path this error refers to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Decode { path, .. }
            | Self::Encode { path, .. }
            | Self::Io { path, .. }
            | Self::DocumentTooLarge { path, .. } => Some(path),
            Self::MissingRepository(path) => Some(path),
            _ => None,
        }
    }
}

/// Result type for ASVDb operations.
pub type AsvdbResult<T> = Result<T, AsvdbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_record_display() {
        let err = AsvdbError::invalid_record("machine name is empty");
        assert_eq!(err.to_string(), "invalid record: machine name is empty");
    }

    #[test]
    fn test_axis_mismatch_display_names_function() {
        let err = AsvdbError::AxisMismatch {
            function: "sort".to_string(),
            recorded: vec!["n".to_string(), "dtype".to_string()],
            given: vec!["n".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("'sort'"));
        assert!(msg.contains("recorded [n, dtype]"));
        assert!(msg.contains("got [n]"));
    }

    #[test]
    fn test_decode_display_contains_path() {
        let err = AsvdbError::decode("/db/results/m1/abc.json", "missing field `results`");
        let msg = err.to_string();
        assert!(msg.contains("/db/results/m1/abc.json"));
        assert!(msg.contains("missing field"));
    }

    #[test]
    fn test_io_keeps_source() {
        let err = AsvdbError::io(
            "/db/asv.conf.json",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let source = std::error::Error::source(&err).expect("io source");
        assert_eq!(source.to_string(), "denied");
        match err {
            AsvdbError::Io { source, .. } => {
                assert_eq!(source.kind(), io::ErrorKind::PermissionDenied)
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_grid_error_becomes_decode_in_document() {
        let err = AsvdbError::grid("sort", "3 values for a grid of 2")
            .in_document(Path::new("/db/results/m1/abc.json"));
        match &err {
            AsvdbError::Decode { path, message } => {
                assert_eq!(path, Path::new("/db/results/m1/abc.json"));
                assert!(message.contains("sort"));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(err.path(), Some(Path::new("/db/results/m1/abc.json")));
    }

    #[test]
    fn test_in_document_leaves_other_errors() {
        let err = AsvdbError::invalid_record("x").in_document(Path::new("/a"));
        assert!(matches!(err, AsvdbError::InvalidRecord(_)));
        assert!(err.path().is_none());
    }

    #[test]
    fn test_too_large_display() {
        let err = AsvdbError::DocumentTooLarge {
            path: PathBuf::from("big.json"),
            actual: 2048,
            max: 1024,
        };
        let msg = err.to_string();
        assert!(msg.contains("2048 bytes"));
        assert!(msg.contains("maximum 1024"));
    }

    #[test]
    fn test_error_is_std_error() {
        fn accepts_error<E: std::error::Error>(_: E) {}
        accepts_error(AsvdbError::invalid_record("test"));
    }
}

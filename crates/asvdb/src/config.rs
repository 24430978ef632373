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

//! Database handle configuration

use asvdb_json::ConfigDocument;

/// Default ceiling for a single document: 256 MiB.
pub const DEFAULT_MAX_DOCUMENT_SIZE: u64 = 256 * 1024 * 1024;

/// Environment variable overriding [`DEFAULT_MAX_DOCUMENT_SIZE`], in bytes.
pub const MAX_FILE_SIZE_ENV: &str = "ASVDB_MAX_FILE_SIZE";

/// The document size ceiling from `ASVDB_MAX_FILE_SIZE`, or the default if
/// the variable is unset or not a number.
pub fn max_document_size_from_env() -> u64 {
    std::env::var(MAX_FILE_SIZE_ENV)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_DOCUMENT_SIZE)
}

/// Settings of an [`AsvDb`](crate::AsvDb) handle.
///
/// The repository fields are merged into `asv.conf.json` on every write:
/// branches are appended, the repository URL replaces the stored one when
/// set, and the directory names only apply when the config is first
/// created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// Repository URL. `None` keeps whatever the database already records.
    pub repo: Option<String>,
    /// Branches to record.
    pub branches: Vec<String>,
    /// Project name; derived from the repository URL when `None`.
    pub project: Option<String>,
    /// Commit URL prefix; derived from the repository URL when `None`.
    pub commit_url: Option<String>,
    /// Results directory used when creating a database.
    pub results_dir: Option<String>,
    /// HTML directory used when creating a database.
    pub html_dir: Option<String>,
    /// Documents larger than this many bytes are refused.
    pub max_document_size: u64,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            repo: None,
            branches: Vec::new(),
            project: None,
            commit_url: None,
            results_dir: None,
            html_dir: None,
            max_document_size: max_document_size_from_env(),
        }
    }
}

impl DbConfig {
    /// A configuration recording `repo`.
    pub fn new(repo: impl Into<String>) -> Self {
        Self::builder().repo(repo).build()
    }

    /// Create a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use asvdb::DbConfig;
    ///
    /// let config = DbConfig::builder()
    ///     .repo("https://github.com/rapidsai/cugraph")
    ///     .branch("branch-0.11")
    ///     .max_document_size(1024 * 1024)
    ///     .build();
    ///
    /// assert_eq!(config.branches, vec!["branch-0.11"]);
    /// assert_eq!(config.max_document_size, 1024 * 1024);
    /// ```
    pub fn builder() -> DbConfigBuilder {
        DbConfigBuilder::default()
    }

    /// The configuration a stored `asv.conf.json` describes.
    pub fn from_document(doc: &ConfigDocument) -> Self {
        Self {
            repo: (!doc.repo.is_empty()).then(|| doc.repo.clone()),
            branches: doc.branches.clone(),
            project: doc.project.clone(),
            commit_url: doc.show_commit_url.clone(),
            results_dir: Some(doc.results_dir.clone()),
            html_dir: Some(doc.html_dir.clone()),
            max_document_size: max_document_size_from_env(),
        }
    }
}

/// Builder for [`DbConfig`].
#[derive(Debug, Clone, Default)]
pub struct DbConfigBuilder {
    repo: Option<String>,
    branches: Vec<String>,
    project: Option<String>,
    commit_url: Option<String>,
    results_dir: Option<String>,
    html_dir: Option<String>,
    max_document_size: Option<u64>,
}

impl DbConfigBuilder {
    /// Set the repository URL.
    pub fn repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = Some(repo.into());
        self
    }

    /// Add a branch.
    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branches.push(branch.into());
        self
    }

    /// Add several branches.
    pub fn branches<I, S>(mut self, branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.branches.extend(branches.into_iter().map(Into::into));
        self
    }

    /// Set the project name.
    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Set the commit URL prefix.
    pub fn commit_url(mut self, url: impl Into<String>) -> Self {
        self.commit_url = Some(url.into());
        self
    }

    /// Set the results directory used for a new database.
    pub fn results_dir(mut self, dir: impl Into<String>) -> Self {
        self.results_dir = Some(dir.into());
        self
    }

    /// Set the HTML directory used for a new database.
    pub fn html_dir(mut self, dir: impl Into<String>) -> Self {
        self.html_dir = Some(dir.into());
        self
    }

    /// Set the document size ceiling in bytes.
    pub fn max_document_size(mut self, bytes: u64) -> Self {
        self.max_document_size = Some(bytes);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> DbConfig {
        DbConfig {
            repo: self.repo,
            branches: self.branches,
            project: self.project,
            commit_url: self.commit_url,
            results_dir: self.results_dir,
            html_dir: self.html_dir,
            max_document_size: self
                .max_document_size
                .unwrap_or_else(max_document_size_from_env),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_branches() {
        let config = DbConfig::builder()
            .branch("a")
            .branches(["b", "c"])
            .build();
        assert_eq!(config.branches, vec!["a", "b", "c"]);
        assert_eq!(config.repo, None);
    }

    #[test]
    fn test_new_sets_repo_only() {
        let config = DbConfig::new("somerepo");
        assert_eq!(config.repo.as_deref(), Some("somerepo"));
        assert!(config.project.is_none());
        assert!(config.commit_url.is_none());
    }

    #[test]
    fn test_from_document() {
        let mut doc = ConfigDocument::default();
        doc.set_repo("https://github.com/rapidsai/cudf", None, None);
        doc.add_branches(&["branch-0.12"]);

        let config = DbConfig::from_document(&doc);
        assert_eq!(config.repo.as_deref(), Some("https://github.com/rapidsai/cudf.git"));
        assert_eq!(config.project.as_deref(), Some("cudf"));
        assert_eq!(config.branches, vec!["branch-0.12"]);
        assert_eq!(config.results_dir.as_deref(), Some("results"));
    }

    #[test]
    fn test_from_document_without_repo() {
        let config = DbConfig::from_document(&ConfigDocument::default());
        assert!(config.repo.is_none());
    }
}

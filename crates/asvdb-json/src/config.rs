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

//! `asv.conf.json`

use crate::{value, AsvDocument, DocumentKind};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Results directory name used when the config does not name one.
pub const DEFAULT_RESULTS_DIR: &str = "results";
/// HTML output directory name used when the config does not name one.
pub const DEFAULT_HTML_DIR: &str = "html";

/// The database configuration document.
///
/// Branches only ever accumulate: [`ConfigDocument::add_branches`] appends
/// names that are not present yet and never removes any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    /// Directory holding `benchmarks.json` and the machine directories,
    /// relative to the database root.
    #[serde(default = "default_results_dir")]
    pub results_dir: String,
    /// Directory `asv publish` renders into.
    #[serde(default = "default_html_dir")]
    pub html_dir: String,
    /// Repository URL, always ending in `.git`.
    #[serde(default)]
    pub repo: String,
    /// Branch names, in the order they were first recorded.
    #[serde(default)]
    pub branches: Vec<String>,
    /// Schema version.
    #[serde(default = "config_version", deserialize_with = "value::version")]
    pub version: u32,
    /// Project name shown by asv.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// URL prefix asv appends commit hashes to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_commit_url: Option<String>,
    /// Keys not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

fn default_results_dir() -> String {
    DEFAULT_RESULTS_DIR.to_string()
}

fn default_html_dir() -> String {
    DEFAULT_HTML_DIR.to_string()
}

fn config_version() -> u32 {
    DocumentKind::Config.schema_version()
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
            html_dir: default_html_dir(),
            repo: String::new(),
            branches: Vec::new(),
            version: config_version(),
            project: None,
            show_commit_url: None,
            extra: Map::new(),
        }
    }
}

impl ConfigDocument {
    /// Record the repository, deriving the project name and commit URL
    /// from it unless given explicitly.
    pub fn set_repo(&mut self, repo: &str, project: Option<&str>, commit_url: Option<&str>) {
        self.repo = normalize_repo(repo);
        self.project = Some(project.map_or_else(|| derive_project(repo), str::to_string));
        self.show_commit_url = Some(commit_url.map_or_else(|| derive_commit_url(repo), str::to_string));
    }

    /// Append branches not recorded yet, keeping first-seen order.
    ///
    /// Returns the number of branches added.
    pub fn add_branches<S: AsRef<str>>(&mut self, branches: &[S]) -> usize {
        let mut added = 0;
        for branch in branches {
            let branch = branch.as_ref();
            if !self.branches.iter().any(|b| b == branch) {
                self.branches.push(branch.to_string());
                added += 1;
            }
        }
        added
    }

    /// Bring the version marker up to the current schema.
    pub fn stamp_version(&mut self) {
        self.version = config_version();
    }
}

impl AsvDocument for ConfigDocument {
    const KIND: DocumentKind = DocumentKind::Config;

    fn declared_version(&self) -> u32 {
        self.version
    }
}

/// Ensure a repository URL ends in `.git`.
///
/// ```
/// use asvdb_json::normalize_repo;
///
/// assert_eq!(normalize_repo("https://github.com/rapidsai/cugraph"), "https://github.com/rapidsai/cugraph.git");
/// assert_eq!(normalize_repo("somerepo.git"), "somerepo.git");
/// ```
pub fn normalize_repo(repo: &str) -> String {
    if repo.ends_with(".git") {
        repo.to_string()
    } else {
        format!("{}.git", repo)
    }
}

fn repo_base(repo: &str) -> &str {
    repo.strip_suffix(".git").unwrap_or(repo)
}

/// Project name for a repository URL: its last path segment without `.git`.
///
/// ```
/// use asvdb_json::derive_project;
///
/// assert_eq!(derive_project("https://github.com/rapidsai/cugraph.git"), "cugraph");
/// assert_eq!(derive_project("somerepo"), "somerepo");
/// ```
pub fn derive_project(repo: &str) -> String {
    repo_base(repo)
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Commit URL prefix for a repository URL.
///
/// ```
/// use asvdb_json::derive_commit_url;
///
/// assert_eq!(
///     derive_commit_url("https://github.com/rapidsai/cugraph.git"),
///     "https://github.com/rapidsai/cugraph/commit/"
/// );
/// ```
pub fn derive_commit_url(repo: &str) -> String {
    let base = repo_base(repo);
    if base.ends_with('/') {
        format!("{}commit/", base)
    } else {
        format!("{}/commit/", base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_for_missing_keys() {
        let doc: ConfigDocument = serde_json::from_value(json!({})).unwrap();
        assert_eq!(doc.results_dir, "results");
        assert_eq!(doc.html_dir, "html");
        assert!(doc.branches.is_empty());
        assert_eq!(doc.version, 1);
    }

    #[test]
    fn test_set_repo_derives_fields() {
        let mut doc = ConfigDocument::default();
        doc.set_repo("https://github.com/rapidsai/cudf", None, None);
        assert_eq!(doc.repo, "https://github.com/rapidsai/cudf.git");
        assert_eq!(doc.project.as_deref(), Some("cudf"));
        assert_eq!(
            doc.show_commit_url.as_deref(),
            Some("https://github.com/rapidsai/cudf/commit/")
        );
    }

    #[test]
    fn test_set_repo_explicit_overrides() {
        let mut doc = ConfigDocument::default();
        doc.set_repo("somerepo", Some("proj"), Some("http://x/c/"));
        assert_eq!(doc.repo, "somerepo.git");
        assert_eq!(doc.project.as_deref(), Some("proj"));
        assert_eq!(doc.show_commit_url.as_deref(), Some("http://x/c/"));
    }

    #[test]
    fn test_commit_url_with_trailing_slash() {
        assert_eq!(derive_commit_url("http://host/repo/"), "http://host/repo/commit/");
        assert_eq!(derive_project("http://host/repo/"), "repo");
    }

    #[test]
    fn test_add_branches_dedups_in_order() {
        let mut doc = ConfigDocument::default();
        assert_eq!(doc.add_branches(&["main"]), 1);
        assert_eq!(doc.add_branches(&["dev", "main"]), 1);
        assert_eq!(doc.add_branches(&["main"]), 0);
        assert_eq!(doc.branches, vec!["main", "dev"]);
    }

    #[test]
    fn test_unknown_keys_roundtrip() {
        let doc: ConfigDocument = serde_json::from_value(json!({
            "repo": "r.git",
            "environment_type": "conda",
            "matrix": {"numpy": ["1.18"]}
        }))
        .unwrap();
        assert_eq!(doc.extra.len(), 2);

        let out = serde_json::to_value(&doc).unwrap();
        assert_eq!(out["environment_type"], "conda");
        assert_eq!(out["matrix"]["numpy"][0], "1.18");
    }

    #[test]
    fn test_optional_fields_not_written_when_absent() {
        let out = serde_json::to_value(ConfigDocument::default()).unwrap();
        assert!(out.get("project").is_none());
        assert!(out.get("show_commit_url").is_none());
        assert_eq!(out["version"], 1);
    }
}

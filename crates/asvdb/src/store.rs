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

//! The database handle.

use crate::config::{max_document_size_from_env, DbConfig};
use crate::filter::ResultFilter;
use crate::storage::{list_commit_files, list_dirs, DocumentReader, WriteSet};
use asvdb_core::grid::{degrid, reconcile};
use asvdb_core::{
    AsvdbError, AsvdbResult, BenchmarkInfo, BenchmarkResult, ResultVector, DEFAULT_UNIT,
};
use asvdb_json::{
    info_from_documents, BenchmarksDocument, CommitDocument, ConfigDocument, MachineDocument,
    ResultEntry, BENCHMARKS_FILE_NAME, CONFIG_FILE_NAME, DEFAULT_RESULTS_DIR, MACHINE_FILE_NAME,
};
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// `benchmarks.json` keeps its schema version next to the function names.
const RESERVED_FUNCTION_NAME: &str = "version";

/// Results read back from a database.
///
/// Documents that fail to decode do not abort the read: their errors are
/// collected in `errors` and every other document is still returned.
#[derive(Debug, Default)]
pub struct ResultSet {
    /// One entry per commit document that yielded results, grouped by
    /// machine (sorted by name) and ordered by commit time, then hash.
    pub results: Vec<(BenchmarkInfo, Vec<BenchmarkResult>)>,
    /// One error per document that could not be decoded.
    pub errors: Vec<AsvdbError>,
}

impl ResultSet {
    /// Total number of results across all commits.
    pub fn len(&self) -> usize {
        self.results.iter().map(|(_, r)| r.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// True if every document decoded.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    /// Every result paired with its environment.
    pub fn iter(&self) -> impl Iterator<Item = (&BenchmarkInfo, &BenchmarkResult)> {
        self.results
            .iter()
            .flat_map(|(info, results)| results.iter().map(move |r| (info, r)))
    }
}

/// A benchmark results database rooted at a directory.
///
/// The handle holds no open files; every operation reads what it needs,
/// and writes go through a write set that is committed only after all
/// documents have been loaded, validated and encoded.
///
/// # Examples
///
/// ```no_run
/// use asvdb::{AsvDb, BenchmarkInfo, BenchmarkResult, DbConfig, ResultFilter};
///
/// # fn main() -> asvdb::AsvdbResult<()> {
/// let db = AsvDb::open("asv-db", DbConfig::new("https://github.com/rapidsai/cugraph"));
///
/// let info = BenchmarkInfo::builder()
///     .machine_name("sm01")
///     .commit_hash("c0ffee01")
///     .commit_time(1_571_346_000_000)
///     .build()?;
/// db.add_result(&info, &BenchmarkResult::new("sort", [("n", 100)], 1.2)?)?;
///
/// let set = db.get_results(&ResultFilter::all())?;
/// assert_eq!(set.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AsvDb {
    root: PathBuf,
    config: DbConfig,
    reader: DocumentReader,
}

impl AsvDb {
    /// A handle on the database in `db_dir`. Nothing is read or created
    /// until the first operation.
    pub fn open(db_dir: impl Into<PathBuf>, config: DbConfig) -> Self {
        let reader = DocumentReader::new(config.max_document_size);
        Self {
            root: db_dir.into(),
            config,
            reader,
        }
    }

    /// A handle on an existing database, configured from its
    /// `asv.conf.json`.
    ///
    /// # Errors
    ///
    /// Returns [`AsvdbError::Io`] if the config document does not exist and
    /// [`AsvdbError::Decode`] if it cannot be decoded.
    pub fn load(db_dir: impl Into<PathBuf>) -> AsvdbResult<Self> {
        let root = db_dir.into();
        let path = root.join(CONFIG_FILE_NAME);
        let doc: ConfigDocument = DocumentReader::new(max_document_size_from_env())
            .load(&path)?
            .ok_or_else(|| {
                AsvdbError::io(
                    &path,
                    io::Error::new(io::ErrorKind::NotFound, "database has no config document"),
                )
            })?;
        Ok(Self::open(root, DbConfig::from_document(&doc)))
    }

    /// The database directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The handle's configuration.
    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE_NAME)
    }

    fn stored_config(&self) -> AsvdbResult<Option<ConfigDocument>> {
        self.reader.load(&self.config_path())
    }

    /// Fold the handle's settings into the stored config document.
    fn merged_config(&self, existing: Option<ConfigDocument>) -> AsvdbResult<ConfigDocument> {
        let created = existing.is_none();
        let mut doc = existing.unwrap_or_default();

        if created {
            if let Some(dir) = &self.config.results_dir {
                doc.results_dir = dir.clone();
            }
            if let Some(dir) = &self.config.html_dir {
                doc.html_dir = dir.clone();
            }
        }

        match &self.config.repo {
            Some(repo) => doc.set_repo(
                repo,
                self.config.project.as_deref(),
                self.config.commit_url.as_deref(),
            ),
            None if doc.repo.is_empty() => {
                return Err(AsvdbError::MissingRepository(self.root.clone()));
            }
            None => {
                if let Some(project) = &self.config.project {
                    doc.project = Some(project.clone());
                }
                if let Some(url) = &self.config.commit_url {
                    doc.show_commit_url = Some(url.clone());
                }
            }
        }

        doc.add_branches(&self.config.branches);
        doc.stamp_version();
        Ok(doc)
    }

    /// Write `asv.conf.json` alone, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`AsvdbError::MissingRepository`] if neither the handle nor
    /// the stored config names a repository.
    pub fn update_config(&self) -> AsvdbResult<()> {
        let doc = self.merged_config(self.stored_config()?)?;
        let mut writes = WriteSet::new();
        writes.stage(self.config_path(), &doc)?;
        writes.commit()?;
        Ok(())
    }

    /// Record one result measured in the environment `info`.
    ///
    /// Adding the same result twice leaves the database byte-for-byte as
    /// after the first call. A result for a parameter combination that is
    /// already stored for this machine and commit replaces it.
    ///
    /// # Errors
    ///
    /// - [`AsvdbError::InvalidRecord`] for the reserved function name
    ///   `version`
    /// - [`AsvdbError::AxisMismatch`] if the result's parameter names are
    ///   not those recorded for the function
    /// - [`AsvdbError::Decode`] if an existing document that has to be
    ///   rewritten cannot be read
    /// - [`AsvdbError::MissingRepository`] if no repository is configured
    ///
    /// Nothing is written when any of these occur.
    pub fn add_result(&self, info: &BenchmarkInfo, result: &BenchmarkResult) -> AsvdbResult<()> {
        self.add_results(info, std::slice::from_ref(result))
    }

    /// Record several results measured in the same environment with a
    /// single write-back. Fails as a whole: if any result is rejected none
    /// is recorded.
    pub fn add_results(&self, info: &BenchmarkInfo, results: &[BenchmarkResult]) -> AsvdbResult<()> {
        if let Some(result) = results.iter().find(|r| r.name() == RESERVED_FUNCTION_NAME) {
            return Err(AsvdbError::invalid_record(format!(
                "'{}' cannot be used as a benchmark function name",
                result.name()
            )));
        }
        if results.is_empty() {
            debug!(machine = info.machine_name(), commit = info.commit_hash(), "no results to add");
            return Ok(());
        }

        let config = self.merged_config(self.stored_config()?)?;
        let results_dir = self.root.join(&config.results_dir);
        let machine_dir = results_dir.join(info.machine_name());
        let benchmarks_path = results_dir.join(BENCHMARKS_FILE_NAME);
        let machine_path = machine_dir.join(MACHINE_FILE_NAME);
        let commit_path = commit_file(&machine_dir, info.commit_hash());

        let mut benchmarks: BenchmarksDocument =
            self.reader.load(&benchmarks_path)?.unwrap_or_default();
        let machine = match self.reader.load::<MachineDocument>(&machine_path)? {
            Some(mut doc) => {
                doc.apply_info(info);
                doc
            }
            None => MachineDocument::from_info(info),
        };
        let mut commit = match self.reader.load::<CommitDocument>(&commit_path)? {
            Some(mut doc) => {
                doc.apply_info(info);
                doc
            }
            None => CommitDocument::new(info),
        };

        // Other commit documents are only read once some grid grows.
        let mut others: Option<BTreeMap<PathBuf, CommitDocument>> = None;
        let mut regridded = BTreeSet::new();

        for result in results {
            let name = result.name();
            let recorded = benchmarks
                .axes(name)
                .map_err(|e| e.in_document(&benchmarks_path))?;
            let placement = reconcile(recorded.as_ref(), result)?;
            let grid = placement.axes.grid();

            let entry = benchmarks.entry_or_insert(name, placement.axes.param_names().to_vec());
            entry.set_axes(&placement.axes);
            entry.unit = result.unit().to_string();

            let mut vector = match commit.results.get(name) {
                Some(stored) => stored
                    .vector(name)
                    .and_then(|v| v.regrid(name, grid))
                    .map_err(|e| e.in_document(&commit_path))?,
                None => ResultVector::empty(grid.clone()),
            };
            vector.set(placement.position, result.result());
            store_vector(&mut commit, name, vector);

            if placement.grew && !placement.created {
                if others.is_none() {
                    others = Some(self.load_commits(&results_dir, &commit_path)?);
                }
                if let Some(others) = others.as_mut() {
                    for (path, doc) in others.iter_mut() {
                        if let Some(stored) = doc.results.get_mut(name) {
                            let vector = stored
                                .vector(name)
                                .and_then(|v| v.regrid(name, grid))
                                .map_err(|e| e.in_document(path))?;
                            stored.set_vector(vector);
                            regridded.insert(path.clone());
                        }
                    }
                }
                debug!(function = name, combinations = grid.len(), "grid grew");
            }
        }

        let mut writes = WriteSet::new();
        writes.stage(self.config_path(), &config)?;
        benchmarks.stamp_version();
        writes.stage(benchmarks_path, &benchmarks)?;
        if let Some(others) = &others {
            for path in &regridded {
                if let Some(doc) = others.get(path) {
                    writes.stage(path.clone(), doc)?;
                }
            }
        }
        writes.stage(machine_path, &machine)?;
        writes.stage(commit_path, &commit)?;

        let documents = writes.commit()?;
        info!(
            machine = info.machine_name(),
            commit = info.commit_hash(),
            results = results.len(),
            documents,
            "recorded benchmark results"
        );
        Ok(())
    }

    /// Every commit document in the database except `exclude`.
    fn load_commits(
        &self,
        results_dir: &Path,
        exclude: &Path,
    ) -> AsvdbResult<BTreeMap<PathBuf, CommitDocument>> {
        let mut docs = BTreeMap::new();
        for (_, machine_dir) in list_dirs(results_dir)? {
            for path in list_commit_files(&machine_dir)? {
                if path == exclude {
                    continue;
                }
                if let Some(doc) = self.reader.load::<CommitDocument>(&path)? {
                    docs.insert(path, doc);
                }
            }
        }
        Ok(docs)
    }

    /// Read back the stored results selected by `filter`.
    ///
    /// # Errors
    ///
    /// Only failures that make the whole database unreadable are returned
    /// as errors (an unreadable config document or results directory).
    /// Per-document failures are collected in [`ResultSet::errors`].
    pub fn get_results(&self, filter: &ResultFilter) -> AsvdbResult<ResultSet> {
        let results_dir_name = self
            .stored_config()?
            .map(|doc| doc.results_dir)
            .or_else(|| self.config.results_dir.clone())
            .unwrap_or_else(|| DEFAULT_RESULTS_DIR.to_string());
        let results_dir = self.root.join(results_dir_name);

        let mut set = ResultSet::default();
        let benchmarks = match self
            .reader
            .load::<BenchmarksDocument>(&results_dir.join(BENCHMARKS_FILE_NAME))
        {
            Ok(doc) => doc.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "benchmark definitions unreadable");
                set.errors.push(e);
                BenchmarksDocument::default()
            }
        };

        for (machine_name, machine_dir) in list_dirs(&results_dir)? {
            if !filter.matches_machine(&machine_name) {
                continue;
            }
            let machine = match self
                .reader
                .load::<MachineDocument>(&machine_dir.join(MACHINE_FILE_NAME))
            {
                Ok(Some(doc)) => doc,
                Ok(None) => MachineDocument::named(machine_name.as_str()),
                Err(e) => {
                    warn!(machine = %machine_name, error = %e, "skipping machine");
                    set.errors.push(e);
                    continue;
                }
            };

            let mut commits = Vec::new();
            for path in list_commit_files(&machine_dir)? {
                match self.reader.load::<CommitDocument>(&path) {
                    Ok(Some(doc)) => commits.push((path, doc)),
                    Ok(None) => {}
                    Err(e) => {
                        warn!(error = %e, "skipping commit document");
                        set.errors.push(e);
                    }
                }
            }
            commits.sort_by(|(_, a), (_, b)| {
                (a.date, &a.commit_hash).cmp(&(b.date, &b.commit_hash))
            });

            for (path, commit) in commits {
                if !filter.matches_commit(&commit.commit_hash, commit.date) {
                    continue;
                }
                match decode_commit(&machine, &commit, &path, &benchmarks, filter) {
                    Ok(Some(decoded)) => set.results.push(decoded),
                    Ok(None) => {}
                    Err(e) => {
                        warn!(error = %e, "skipping commit document");
                        set.errors.push(e);
                    }
                }
            }
        }

        debug!(
            commits = set.results.len(),
            results = set.len(),
            errors = set.errors.len(),
            "read results"
        );
        Ok(set)
    }
}

fn commit_file(machine_dir: &Path, commit_hash: &str) -> PathBuf {
    machine_dir.join(format!("{}.json", commit_hash))
}

fn store_vector(commit: &mut CommitDocument, function: &str, vector: ResultVector) {
    match commit.results.get_mut(function) {
        Some(entry) => entry.set_vector(vector),
        None => {
            commit
                .results
                .insert(function.to_string(), ResultEntry::from_vector(vector));
        }
    }
}

/// The measured results of one commit document.
fn decode_commit(
    machine: &MachineDocument,
    commit: &CommitDocument,
    path: &Path,
    benchmarks: &BenchmarksDocument,
    filter: &ResultFilter,
) -> AsvdbResult<Option<(BenchmarkInfo, Vec<BenchmarkResult>)>> {
    let info = info_from_documents(machine, commit, path)?;

    let mut results = Vec::new();
    for (name, entry) in &commit.results {
        if !filter.matches_function(name) {
            continue;
        }
        let definition = benchmarks.get(name);
        let vector = entry.vector(name).map_err(|e| e.in_document(path))?;
        let param_names: &[String] = match definition {
            Some(def) => &def.param_names,
            None if vector.grid().dimensions() == 0 => &[],
            None => {
                return Err(AsvdbError::decode(
                    path,
                    format!("benchmark '{}' has parameters but no definition", name),
                ))
            }
        };
        let unit = definition.map_or(DEFAULT_UNIT, |def| def.unit.as_str());

        let records = degrid(name, param_names, &vector).map_err(|e| e.in_document(path))?;
        for (pairs, value) in records {
            let result = BenchmarkResult::new(name.as_str(), pairs, value)
                .and_then(|r| r.with_unit(unit))
                .map_err(|e| match e {
                    AsvdbError::InvalidRecord(message) => {
                        AsvdbError::decode(path, format!("benchmark '{}': {}", name, message))
                    }
                    other => other,
                })?;
            results.push(result);
        }
    }

    Ok((!results.is_empty()).then_some((info, results)))
}

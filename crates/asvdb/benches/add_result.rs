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

//! `add_result` benchmarks.
//!
//! Measures the steady-state upsert (grid unchanged) and the growth path
//! that rewrites every commit document of a function.

use asvdb::{AsvDb, DbConfig, ResultFilter};
use asvdb_test::fixtures;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tempfile::TempDir;

fn seeded(commits: usize) -> (TempDir, AsvDb) {
    let dir = TempDir::new().unwrap();
    let db = AsvDb::open(dir.path(), DbConfig::new("https://github.com/rapidsai/cugraph"));
    for c in 0..commits {
        let info = fixtures::info_at(&format!("c{:04}", c), c as i64);
        db.add_results(&info, &fixtures::mixed_results()).unwrap();
    }
    (dir, db)
}

// ============================================================================
// Upsert
// ============================================================================

fn bench_upsert(c: &mut Criterion) {
    let mut group = c.benchmark_group("upsert");
    for commits in [1usize, 16, 64] {
        let (_dir, db) = seeded(commits);
        let info = fixtures::info_at("c0000", 0);
        let result = fixtures::bfs("karate.csv", 10, 0.5);
        group.bench_with_input(BenchmarkId::from_parameter(commits), &commits, |b, _| {
            b.iter(|| db.add_result(black_box(&info), black_box(&result)).unwrap())
        });
    }
    group.finish();
}

// ============================================================================
// Growth
// ============================================================================

fn bench_growth(c: &mut Criterion) {
    let mut group = c.benchmark_group("growth");
    group.sample_size(20);
    for commits in [1usize, 16, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(commits), &commits, |b, &commits| {
            b.iter_batched(
                || seeded(commits),
                |(dir, db)| {
                    let info = fixtures::info_at("c0000", 0);
                    db.add_result(&info, &fixtures::bfs("netscience.csv", 10, 0.5)).unwrap();
                    dir
                },
                criterion::BatchSize::PerIteration,
            )
        });
    }
    group.finish();
}

// ============================================================================
// Read
// ============================================================================

fn bench_get_results(c: &mut Criterion) {
    let (_dir, db) = seeded(64);
    c.bench_function("get_results/64", |b| {
        b.iter(|| black_box(db.get_results(&ResultFilter::all()).unwrap().len()))
    });
}

criterion_group!(benches, bench_upsert, bench_growth, bench_get_results);
criterion_main!(benches);

// Dweve BenchFold - Benchmark Result Aggregation
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

//! Loading result files from disk through the facade.

use benchfold::{
    load, load_all, merge, BenchErrorKind, OrderingConfig, ProbeDistribution, ViewKind, Views,
};
use benchfold_test::fixtures;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

// ==================== Load tests ====================

#[test]
fn test_load_json_uses_path_as_identity() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "probe.json", fixtures::probe_json());
    let source = load(&path).unwrap();
    assert_eq!(source.identity, path.to_string_lossy());
    assert_eq!(source.record_count(), 2);
}

#[test]
fn test_load_malformed_json_has_origin() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "bad.json", "[1, 2, 3]");
    let err = load(&path).unwrap_err();
    assert_eq!(err.kind, BenchErrorKind::MalformedSource);
    assert_eq!(err.origin.as_deref(), Some(path.to_string_lossy().as_ref()));
    assert_eq!(err.context, None);
}

#[test]
fn test_load_unsupported_extension_has_origin() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "notes.txt", "hello");
    let err = load(&path).unwrap_err();
    assert_eq!(err.kind, BenchErrorKind::InvalidInput);
    assert!(err.origin.unwrap().ends_with("notes.txt"));
}

#[cfg(feature = "csv")]
#[test]
fn test_load_csv() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "perf.csv", fixtures::perf_csv());
    let source = load(&path).unwrap();
    assert_eq!(source.record_count(), 3);
}

// ==================== Load all tests ====================

#[test]
fn test_load_all_feeds_views() {
    let dir = TempDir::new().unwrap();
    let probe = write(&dir, "probe.json", fixtures::probe_json());
    let legacy = write(&dir, "legacy.json", fixtures::legacy_json());

    let set = load_all(&[probe, legacy]).unwrap();
    assert_eq!(set.len(), 4);
    assert_eq!(set.contexts.len(), 2);

    let ordering = OrderingConfig::standard();
    let views = Views::new(&set, &ordering);
    let probe_table = views.run(ViewKind::Probe(ProbeDistribution::Uniform)).unwrap();
    assert_eq!(probe_table.len(), 2);
    let collisions = views.run(ViewKind::Collisions).unwrap();
    assert_eq!(collisions.len(), 2);
}

#[test]
fn test_load_all_stops_at_first_failure() {
    let dir = TempDir::new().unwrap();
    let probe = write(&dir, "probe.json", fixtures::probe_json());
    let missing = dir.path().join("missing.json");
    let err = load_all(&[probe, missing]).unwrap_err();
    assert_eq!(err.kind, BenchErrorKind::Io);
    assert!(err.origin.unwrap().ends_with("missing.json"));
}

#[test]
fn test_merged_output_reloads() {
    let dir = TempDir::new().unwrap();
    let probe = write(&dir, "probe.json", fixtures::probe_json());
    let set = load_all(&[probe]).unwrap();
    let merged = benchfold::json::to_merged_json(&set).unwrap();
    let again = write(&dir, "merged.json", &merged);

    let reloaded = load_all(&[again]).unwrap();
    assert_eq!(reloaded.records, set.records);
}

#[test]
fn test_merged_output_keeps_legacy_views() {
    let dir = TempDir::new().unwrap();
    let probe = write(&dir, "probe.json", fixtures::probe_json());
    let legacy = write(&dir, "legacy.json", fixtures::legacy_json());
    let ordering = OrderingConfig::standard();

    let separate = load_all(&[&probe, &legacy]).unwrap();
    let before = Views::new(&separate, &ordering)
        .run(ViewKind::Collisions)
        .unwrap();
    assert_eq!(before.len(), 2);

    let sources = vec![load(&probe).unwrap(), load(&legacy).unwrap()];
    let merged = benchfold::json::to_merged_json(&merge(&sources)).unwrap();
    let path = write(&dir, "merged.json", &merged);
    let reloaded = load_all(&[path]).unwrap();
    let after = Views::new(&reloaded, &ordering)
        .run(ViewKind::Collisions)
        .unwrap();

    assert_eq!(after, before);
    assert!(after.rows.iter().all(|row| row.number("dataset_size") == Some(1000.0)));
}

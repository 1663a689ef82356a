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

//! Record-source fixtures, one per experiment family.

use super::builders::{collision_record, probe_record, RecordBuilder};
use benchfold_core::{RecordSource, RunContext, SourceContext, Value};
use std::collections::BTreeMap;

fn context(entries: &[(&str, &str)]) -> SourceContext {
    let map: BTreeMap<String, Value> = entries
        .iter()
        .map(|(k, v)| (k.to_string(), Value::from(*v)))
        .collect();
    SourceContext::Single(map)
}

/// Probe runs of RMI and Murmur on chained and linear tables, including a
/// high load factor and a failed insert.
pub fn probe_source() -> RecordSource {
    let failed = probe_record("probe_rmi_hash_1000:linear", "wiki", 75, 1.0)
        .with_field("insert_fail_message", "table full");
    RecordSource::new(
        "probe.json",
        vec![
            probe_record("probe_rmi_hash_1000:chained", "wiki", 50, 0.5),
            probe_record("probe_rmi_hash_1000:chained", "wiki", 50, 1.5),
            probe_record("probe_rmi_hash_1000:chained", "wiki", 1000, 2.0),
            probe_record("probe_murmur:linear", "wiki", 50, 0.25),
            failed,
        ],
    )
    .with_context(context(&[("host_name", "bench-1"), ("num_cpus", "32")]))
}

/// Collision counts at zero and non-zero load factors.
pub fn collision_source() -> RecordSource {
    RecordSource::new(
        "collisions.json",
        vec![
            collision_record("collisions:rmi_hash_100:wiki", "wiki", 250_000, 0.5),
            collision_record("collisions:rmi_hash_10000:wiki", "wiki", 200_000, 0.5),
            collision_record("collisions:murmur:wiki", "wiki", 368_000, 0.25),
            collision_record("collisions:mwhc:wiki", "wiki", 100_000, 1.0)
                .with_field("load_factor_%", 75i64),
        ],
    )
}

/// Collision counts in the oldest schema: element counts only.
pub fn legacy_collision_source() -> RecordSource {
    let record = |label: &str, collisions: i64| {
        RecordBuilder::new()
            .text("label", label)
            .text("dataset_name", "fb")
            .int("data_elem_count", 1000)
            .int("collisions", collisions)
            .float("tot_time_s", 0.001)
            .build()
    };
    RecordSource::new(
        "legacy.json",
        vec![record("collisions:rmi_hash_10:fb", 300), record("collisions:murmur:fb", 370)],
    )
}

/// Build times of learned models.
pub fn build_source() -> RecordSource {
    let record = |label: &str, size: i64, seconds: f64| {
        RecordBuilder::new()
            .text("label", label)
            .text("dataset_name", "osm")
            .int("actual_size", size)
            .float("build_time_s", seconds)
            .build()
    };
    RecordSource::new(
        "build.json",
        vec![
            record("build_pgm_hash_100", 100, 0.2),
            record("build_rmi_hash_1000", 1000, 0.4),
            record("build_rmi_hash_100", 100, 0.1),
            record("build_radix_spline_100", 100, 0.3),
        ],
    )
}

/// Hash joins on all three table kinds.
pub fn join_source() -> RecordSource {
    let record = |label: &str, join: f64| {
        RecordBuilder::new()
            .text("label", label)
            .text("dataset_name", "fb")
            .text("join_size", "(25Mx25M)")
            .flag("has_failed", false)
            .float("tot_time_sort_s", 0.1)
            .float("tot_time_build_s", 0.2)
            .float("tot_time_join_s", join)
            .build()
    };
    RecordSource::new(
        "join.json",
        vec![
            record("join_mwhc:cuckoo", 0.9),
            record("join_rmi_hash_1000:chained", 0.3),
            record("join_multhash:linear", 0.5),
        ],
    )
}

/// Coroutine-interleaved probes and coroutine RMI lookups.
pub fn coroutine_source() -> RecordSource {
    let probe = |function: &str, dataset: &str| {
        RecordBuilder::new()
            .text("label", "coro:probe:chained")
            .text("function_name", function)
            .text("dataset_name", dataset)
            .int("load_factor_%", 50)
            .int("probe_elem_count", 1_000_000)
            .int("n_coro", 16)
            .float("tot_for_time_sequential_s", 2.0)
            .float("tot_for_time_interleaved_s", 1.0)
            .build()
    };
    let rmi = |models: i64| {
        RecordBuilder::new()
            .text("label", &format!("coro-rmi:rmi_hash_{}", models))
            .text("dataset_name", "gap_10")
            .int("dataset_size", 1_000_000)
            .int("n_coro", 16)
            .float("tot_sequential_time_s", 1.0)
            .float("tot_interleaved_time_s", 0.5)
            .build()
    };
    RecordSource::new(
        "coro.json",
        vec![
            probe("rmi_hash_10000000", "fb"),
            probe("murmur", "fb"),
            probe("rmi_hash_1000", "wiki"),
            rmi(1000),
            rmi(10),
        ],
    )
}

/// Gap histograms, including the sequential dataset.
pub fn gaps_source() -> RecordSource {
    let record = |dataset: &str| {
        RecordBuilder::new()
            .text("label", "gaps")
            .text("dataset_name", dataset)
            .field("count", Value::List((0..10).map(|i| Value::Int(100 - i)).collect()))
            .build()
    };
    RecordSource::new("gaps.json", vec![record("wiki"), record("seq"), record("fb")])
}

/// Hardware counters of probe and join phases.
pub fn perf_source() -> RecordSource {
    let record = |function: &str, table: &str, phase: Option<&str>, l1: f64| {
        let builder = RecordBuilder::new()
            .text("function", function)
            .text("table", table)
            .text("dataset", "fb")
            .text("sizes", "25Mx25M")
            .float("cycles", 1.0e9)
            .float("instructions", 2.0e9)
            .float("L1-misses", l1)
            .float("LLC-misses", l1 / 4.0)
            .float("branch-misses", 1.0e5)
            .float("IPC", 2.0);
        match phase {
            Some(p) => builder.text("phase", p).build(),
            None => builder.build(),
        }
    };
    RecordSource::new(
        "perf.csv",
        vec![
            record("rmi", "chain", None, 1.0e6),
            record("mwhc", "cuckoo", None, 3.0e6),
            record("rmi", "chain", Some("sort"), 1.0e5),
            record("rmi", "chain", Some("insert"), 2.0e5),
            record("rmi", "chain", Some("join"), 3.0e5),
        ],
    )
}

/// A source with an empty record list.
pub fn empty_source() -> RecordSource {
    RecordSource::new("empty.json", Vec::new())
}

/// A source whose record list is absent altogether.
pub fn missing_records_source() -> RecordSource {
    RecordSource {
        identity: "missing.json".to_string(),
        records: None,
        context: SourceContext::Merged(vec![RunContext::new("earlier.json").to_map()]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_source_has_context() {
        assert!(matches!(probe_source().context, SourceContext::Single(_)));
    }

    #[test]
    fn test_missing_records_counts_zero() {
        assert_eq!(missing_records_source().record_count(), 0);
    }
}

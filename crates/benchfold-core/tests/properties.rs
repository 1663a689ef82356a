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

//! Property-based tests for merge, classification, normalization and
//! aggregation.

use benchfold_core::{aggregate, classify, merge, normalize, Record, RecordSource, Value};
use proptest::prelude::*;

fn record_strategy() -> impl Strategy<Value = Record> {
    (
        prop::sample::select(vec!["wiki", "fb", "osm"]),
        prop::sample::select(vec![
            "probe_rmi_hash_1000:chained",
            "probe_murmur:linear",
            "collisions:mwhc:fb",
            "coro_rmi_hash_10",
            "build_pgm_hash_100",
        ]),
        prop::option::of(0_i64..100),
        0.001_f64..10.0,
    )
        .prop_map(|(dataset, label, load_factor, seconds)| {
            let mut fields = vec![
                ("dataset_name", Value::from(dataset)),
                ("label", Value::from(label)),
                ("t", Value::Float(seconds)),
            ];
            if let Some(lf) = load_factor {
                fields.push(("load_factor_%", Value::Int(lf)));
            }
            fields.into_iter().collect()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: merge preserves every record in source order.
    #[test]
    fn prop_merge_concatenates(
        a in prop::collection::vec(record_strategy(), 0..20),
        b in prop::collection::vec(record_strategy(), 0..20)
    ) {
        let set = merge(&[
            RecordSource::new("a.json", a.clone()),
            RecordSource::new("b.json", b.clone()),
        ]);
        prop_assert_eq!(set.len(), a.len() + b.len());
        let expected: Vec<Record> = a.into_iter().chain(b).collect();
        prop_assert_eq!(set.records, expected);
    }

    /// Property: classification ignores letter case.
    #[test]
    fn prop_classify_case_insensitive(record in record_strategy()) {
        let upper = record.label().map(str::to_uppercase).unwrap_or_default();
        let shouted = record.with_field("label", upper);
        prop_assert_eq!(classify(&record), classify(&shouted));
    }

    /// Property: normalizing twice equals normalizing once.
    #[test]
    fn prop_normalize_idempotent(records in prop::collection::vec(record_strategy(), 0..30)) {
        let once = normalize(&merge(&[RecordSource::new("x.json", records)]));
        let twice = normalize(&once);
        prop_assert_eq!(once.records, twice.records);
    }

    /// Property: every record with all keys lands in exactly one row, and
    /// each mean lies within the range of its inputs.
    #[test]
    fn prop_partition_complete(records in prop::collection::vec(record_strategy(), 1..50)) {
        let table = aggregate(&records, &["dataset_name", "label"], &["t"]).unwrap();
        let counted: usize = table.iter().map(|r| r.count).sum();
        prop_assert_eq!(counted, records.len());

        for row in &table {
            let inputs: Vec<f64> = records
                .iter()
                .filter(|r| {
                    r.text("dataset_name") == row.key_str("dataset_name")
                        && r.text("label") == row.key_str("label")
                })
                .filter_map(|r| r.number("t"))
                .collect();
            let min = inputs.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = inputs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let mean = row.measure("t").unwrap();
            prop_assert!(mean >= min - 1e-9 && mean <= max + 1e-9);
        }
    }
}

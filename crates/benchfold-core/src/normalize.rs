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

//! Schema normalization across result-file generations.
//!
//! Result files written by different versions of the benchmark harness
//! spell the same facts differently. Each source span is matched to one
//! [`SchemaGeneration`], and that generation's fixed list of
//! [`Adaptation`]s is applied to every record of the span. The
//! [`RECORD_FALLBACKS`] run on every record regardless of generation, since
//! a merged file can hold records of several generations in one span. An
//! adaptation only fills a canonical field that is absent, so normalizing a
//! normalized set is a no-op.

use crate::fields;
use crate::ordering::table_label;
use crate::record::{Record, RecordSet};
use crate::value::Value;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Probe key distribution assumed when a record does not name one.
pub const DEFAULT_PROBE_TYPE: &str = "uniform";

/// Fallbacks applied to each record that lacks the canonical field,
/// whatever generation its span was detected as.
pub const RECORD_FALLBACKS: [Adaptation; 2] = [
    Adaptation::DatasetSizeFromElemCount,
    Adaptation::FractionalLoadFactor,
];

/// Known shapes of result records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaGeneration {
    /// Already in canonical form (fractional load factor or none at all).
    Canonical,
    /// Load factor given as a percentage in `load_factor_%`.
    PercentLoadFactor,
    /// Oldest collision output: `data_elem_count` instead of `dataset_size`.
    Legacy,
    /// CSV export of hardware performance counters.
    PerfCounters,
}

/// One field-level rewrite applied by normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adaptation {
    /// `load_factor = load_factor_% / 100`.
    FractionalLoadFactor,
    /// `probe_type = "uniform"` when no distribution is recorded.
    ImplicitDistribution,
    /// `dataset_size <- data_elem_count`.
    DatasetSizeFromElemCount,
    /// `dataset_name <- dataset`.
    DatasetNameFromDataset,
    /// `probe_type <- probe`.
    ProbeTypeFromProbe,
    /// `table_label <- upper(function-table)`.
    TableLabelFromFunctionTable,
}

impl SchemaGeneration {
    pub const ALL: [SchemaGeneration; 4] = [
        SchemaGeneration::Canonical,
        SchemaGeneration::PercentLoadFactor,
        SchemaGeneration::Legacy,
        SchemaGeneration::PerfCounters,
    ];

    /// Detect the generation of a span of records from the union of their
    /// field names.
    pub fn detect(records: &[Record]) -> Self {
        let has = |name: &str| records.iter().any(|r| r.has(name));

        if fields::PERF_COUNTERS.iter().any(|c| has(c)) {
            SchemaGeneration::PerfCounters
        } else if has(fields::DATA_ELEM_COUNT) && !has(fields::DATASET_SIZE) {
            SchemaGeneration::Legacy
        } else if has(fields::LOAD_FACTOR_PERCENT) {
            SchemaGeneration::PercentLoadFactor
        } else {
            SchemaGeneration::Canonical
        }
    }

    /// The rewrites this generation needs, in application order.
    pub fn adaptations(self) -> &'static [Adaptation] {
        match self {
            SchemaGeneration::Canonical => &[Adaptation::ImplicitDistribution],
            SchemaGeneration::PercentLoadFactor => &[
                Adaptation::FractionalLoadFactor,
                Adaptation::ImplicitDistribution,
            ],
            SchemaGeneration::Legacy => &[
                Adaptation::DatasetSizeFromElemCount,
                Adaptation::FractionalLoadFactor,
                Adaptation::ImplicitDistribution,
            ],
            SchemaGeneration::PerfCounters => &[
                Adaptation::DatasetNameFromDataset,
                Adaptation::ProbeTypeFromProbe,
                Adaptation::TableLabelFromFunctionTable,
                Adaptation::ImplicitDistribution,
            ],
        }
    }

    /// Generation adaptations followed by any [`RECORD_FALLBACKS`] not
    /// already among them.
    pub fn span_adaptations(self) -> Vec<Adaptation> {
        let mut adaptations = self.adaptations().to_vec();
        for fallback in RECORD_FALLBACKS {
            if !adaptations.contains(&fallback) {
                adaptations.push(fallback);
            }
        }
        adaptations
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SchemaGeneration::Canonical => "canonical",
            SchemaGeneration::PercentLoadFactor => "percent-load-factor",
            SchemaGeneration::Legacy => "legacy",
            SchemaGeneration::PerfCounters => "perf-counters",
        }
    }
}

impl fmt::Display for SchemaGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Adaptation {
    fn apply(self, map: &mut BTreeMap<String, Value>) {
        match self {
            Adaptation::FractionalLoadFactor => {
                if present(map, fields::LOAD_FACTOR) {
                    return;
                }
                if let Some(percent) = map
                    .get(fields::LOAD_FACTOR_PERCENT)
                    .and_then(Value::as_float)
                {
                    map.insert(
                        fields::LOAD_FACTOR.to_string(),
                        Value::Float(percent / 100.0),
                    );
                }
            }
            Adaptation::ImplicitDistribution => {
                if !present(map, fields::PROBE_TYPE) {
                    map.insert(
                        fields::PROBE_TYPE.to_string(),
                        Value::from(DEFAULT_PROBE_TYPE),
                    );
                }
            }
            Adaptation::DatasetSizeFromElemCount => {
                copy_if_absent(map, fields::DATA_ELEM_COUNT, fields::DATASET_SIZE)
            }
            Adaptation::DatasetNameFromDataset => {
                copy_if_absent(map, fields::DATASET, fields::DATASET_NAME)
            }
            Adaptation::ProbeTypeFromProbe => {
                copy_if_absent(map, fields::PROBE, fields::PROBE_TYPE)
            }
            Adaptation::TableLabelFromFunctionTable => {
                if present(map, fields::TABLE_LABEL) {
                    return;
                }
                let function = map.get(fields::FUNCTION).and_then(Value::as_str);
                let table = map.get(fields::TABLE).and_then(Value::as_str);
                if let (Some(function), Some(table)) = (function, table) {
                    let label = table_label(function, table);
                    map.insert(fields::TABLE_LABEL.to_string(), Value::String(label));
                }
            }
        }
    }
}

fn present(map: &BTreeMap<String, Value>, name: &str) -> bool {
    map.get(name).map_or(false, |v| !v.is_null())
}

fn copy_if_absent(map: &mut BTreeMap<String, Value>, from: &str, to: &str) {
    if present(map, to) {
        return;
    }
    if let Some(value) = map.get(from).filter(|v| !v.is_null()).cloned() {
        map.insert(to.to_string(), value);
    }
}

/// Apply a list of adaptations to one record, producing a new record.
pub fn normalize_record(record: &Record, adaptations: &[Adaptation]) -> Record {
    let mut map = record.fields().clone();
    for adaptation in adaptations {
        adaptation.apply(&mut map);
    }
    Record::from(map)
}

/// Normalize every span of a record set to the canonical shape.
///
/// Contexts and spans carry over unchanged.
pub fn normalize(set: &RecordSet) -> RecordSet {
    let mut records = Vec::with_capacity(set.len());

    for span in set.effective_spans() {
        let slice = &set.records[span.range.clone()];
        let generation = SchemaGeneration::detect(slice);
        debug!(
            source = %span.source,
            records = slice.len(),
            %generation,
            "normalizing span"
        );
        let adaptations = generation.span_adaptations();
        records.extend(slice.iter().map(|r| normalize_record(r, &adaptations)));
    }

    RecordSet {
        records,
        contexts: set.contexts.clone(),
        spans: set.spans.clone(),
    }
}

/// Generation detected for each span, in span order.
pub fn detect_generations(set: &RecordSet) -> Vec<(String, SchemaGeneration)> {
    set.effective_spans()
        .into_iter()
        .map(|span| {
            let generation = SchemaGeneration::detect(&set.records[span.range.clone()]);
            (span.source, generation)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::merge;
    use crate::record::RecordSource;

    fn rec(pairs: &[(&str, Value)]) -> Record {
        pairs.iter().map(|(k, v)| (*k, v.clone())).collect()
    }

    // ==================== Detection tests ====================

    #[test]
    fn test_detect_generations() {
        let percent = [rec(&[("load_factor_%", Value::Int(50))])];
        assert_eq!(SchemaGeneration::detect(&percent), SchemaGeneration::PercentLoadFactor);

        let legacy = [rec(&[("data_elem_count", Value::Int(100))])];
        assert_eq!(SchemaGeneration::detect(&legacy), SchemaGeneration::Legacy);

        let perf = [rec(&[("cycles", Value::Float(10.0))])];
        assert_eq!(SchemaGeneration::detect(&perf), SchemaGeneration::PerfCounters);

        let canonical = [rec(&[("load_factor", Value::Float(0.5))])];
        assert_eq!(SchemaGeneration::detect(&canonical), SchemaGeneration::Canonical);
        assert_eq!(SchemaGeneration::detect(&[]), SchemaGeneration::Canonical);
    }

    // ==================== Adaptation tests ====================

    #[test]
    fn test_fractional_load_factor() {
        let r = rec(&[("load_factor_%", Value::Int(75))]);
        let n = normalize_record(&r, SchemaGeneration::PercentLoadFactor.adaptations());
        assert_eq!(n.number("load_factor"), Some(0.75));
        assert_eq!(n.text("probe_type"), Some("uniform"));
    }

    #[test]
    fn test_existing_fields_win() {
        let r = rec(&[
            ("load_factor_%", Value::Int(75)),
            ("load_factor", Value::Float(0.5)),
            ("probe_type", Value::from("80-20")),
        ]);
        let n = normalize_record(&r, SchemaGeneration::PercentLoadFactor.adaptations());
        assert_eq!(n.number("load_factor"), Some(0.5));
        assert_eq!(n.text("probe_type"), Some("80-20"));
    }

    #[test]
    fn test_legacy_dataset_size() {
        let r = rec(&[("data_elem_count", Value::Int(1000))]);
        let n = normalize_record(&r, SchemaGeneration::Legacy.adaptations());
        assert_eq!(n.number("dataset_size"), Some(1000.0));
    }

    #[test]
    fn test_perf_counter_fields() {
        let r = rec(&[
            ("function", Value::from("mult")),
            ("table", Value::from("lp")),
            ("dataset", Value::from("fb")),
            ("probe", Value::from("80-20")),
            ("L1-misses", Value::Float(1.5)),
        ]);
        let n = normalize_record(&r, SchemaGeneration::PerfCounters.adaptations());
        assert_eq!(n.text("table_label"), Some("MULT-LP"));
        assert_eq!(n.text("dataset_name"), Some("fb"));
        assert_eq!(n.text("probe_type"), Some("80-20"));
    }

    // ==================== Set-level tests ====================

    #[test]
    fn test_normalize_per_span() {
        let a = RecordSource::new("new.json", vec![rec(&[("load_factor_%", Value::Int(50))])]);
        let b = RecordSource::new("old.json", vec![rec(&[("data_elem_count", Value::Int(9))])]);
        let set = merge(&[a, b]);
        let generations = detect_generations(&set);
        assert_eq!(generations[0].1, SchemaGeneration::PercentLoadFactor);
        assert_eq!(generations[1].1, SchemaGeneration::Legacy);

        let normalized = normalize(&set);
        assert_eq!(normalized.records[0].number("load_factor"), Some(0.5));
        assert_eq!(normalized.records[1].number("dataset_size"), Some(9.0));
        assert!(normalized.records[1].get("load_factor").is_none());
    }

    #[test]
    fn test_normalize_mixed_generations_in_one_span() {
        let merged = RecordSource::new(
            "merged.json",
            vec![
                rec(&[
                    ("load_factor_%", Value::Int(50)),
                    ("dataset_size", Value::Int(1000)),
                ]),
                rec(&[("data_elem_count", Value::Int(100))]),
            ],
        );
        let set = merge(&[merged]);
        assert_eq!(detect_generations(&set)[0].1, SchemaGeneration::PercentLoadFactor);

        let normalized = normalize(&set);
        assert_eq!(normalized.records[0].number("dataset_size"), Some(1000.0));
        assert_eq!(normalized.records[1].number("dataset_size"), Some(100.0));
        assert_eq!(normalized.records[1].text("probe_type"), Some("uniform"));
    }

    #[test]
    fn test_span_adaptations_include_fallbacks_once() {
        for generation in SchemaGeneration::ALL {
            let adaptations = generation.span_adaptations();
            for fallback in RECORD_FALLBACKS {
                let count = adaptations.iter().filter(|a| **a == fallback).count();
                assert_eq!(count, 1, "{} carries {:?}", generation, fallback);
            }
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let a = RecordSource::new(
            "a.json",
            vec![
                rec(&[("load_factor_%", Value::Int(50))]),
                rec(&[("data_elem_count", Value::Int(3))]),
            ],
        );
        let once = normalize(&merge(&[a]));
        let twice = normalize(&once);
        assert_eq!(once, twice);
    }
}

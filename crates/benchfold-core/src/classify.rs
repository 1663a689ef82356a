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

//! Label-based classification of benchmark records.
//!
//! Every attribute is derived by matching lowercased free text against a
//! fixed, ordered rule list. The first trigger contained in the text wins,
//! so rule order is significant: `coro_rmi` must be tested before `rmi`,
//! `bitmwhc` before `mwhc`.

use crate::fields;
use crate::record::{Record, RecordSet};
use crate::value::Value;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Experiment category of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExperimentKind {
    Collision,
    Probe,
    Insert,
    Build,
    Join,
    Gaps,
    PerformanceCounter,
    CoroutineProbe,
    CoroutineRmi,
    Range,
    /// Collision run at a non-zero load factor.
    Distribution,
    Unclassified,
}

impl ExperimentKind {
    pub const ALL: [ExperimentKind; 12] = [
        ExperimentKind::Collision,
        ExperimentKind::Probe,
        ExperimentKind::Insert,
        ExperimentKind::Build,
        ExperimentKind::Join,
        ExperimentKind::Gaps,
        ExperimentKind::PerformanceCounter,
        ExperimentKind::CoroutineProbe,
        ExperimentKind::CoroutineRmi,
        ExperimentKind::Range,
        ExperimentKind::Distribution,
        ExperimentKind::Unclassified,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Collision => "collision",
            Self::Probe => "probe",
            Self::Insert => "insert",
            Self::Build => "build",
            Self::Join => "join",
            Self::Gaps => "gaps",
            Self::PerformanceCounter => "perf",
            Self::CoroutineProbe => "coro-probe",
            Self::CoroutineRmi => "coro-rmi",
            Self::Range => "range",
            Self::Distribution => "distribution",
            Self::Unclassified => "unclassified",
        }
    }

    /// Parse the name written by [`ExperimentKind::as_str`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

impl fmt::Display for ExperimentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Algorithm identity (learned index or hash function).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FunctionId {
    RmiCoro,
    Rmi,
    Pgm,
    Murmur,
    BitMwhc,
    RadixSpline,
    Mwhc,
    RecSplit,
    AquaHash,
    XxHash,
    MultiplyPrime,
    FibonacciPrime,
    /// No trigger matched. A valid classification, not an error.
    Unknown,
}

impl FunctionId {
    pub const ALL: [FunctionId; 13] = [
        FunctionId::RmiCoro,
        FunctionId::Rmi,
        FunctionId::Pgm,
        FunctionId::Murmur,
        FunctionId::BitMwhc,
        FunctionId::RadixSpline,
        FunctionId::Mwhc,
        FunctionId::RecSplit,
        FunctionId::AquaHash,
        FunctionId::XxHash,
        FunctionId::MultiplyPrime,
        FunctionId::FibonacciPrime,
        FunctionId::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::RmiCoro => "RMICoro",
            Self::Rmi => "RMI",
            Self::Pgm => "PGM",
            Self::Murmur => "Murmur",
            Self::BitMwhc => "BitMWHC",
            Self::RadixSpline => "RadixSpline",
            Self::Mwhc => "MWHC",
            Self::RecSplit => "RecSplit",
            Self::AquaHash => "AquaHash",
            Self::XxHash => "XXHash",
            Self::MultiplyPrime => "MultiplyPrime",
            Self::FibonacciPrime => "FibonacciPrime",
            Self::Unknown => "Unknown",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hash table collision strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TableKind {
    Chained,
    Linear,
    Cuckoo,
}

impl TableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chained => "chained",
            Self::Linear => "linear",
            Self::Cuckoo => "cuckoo",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [Self::Chained, Self::Linear, Self::Cuckoo]
            .into_iter()
            .find(|t| t.as_str() == name)
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Index structure used by range-query experiments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StructureKind {
    RmiChain,
    RadixSplineChain,
    RmiSort,
}

impl StructureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RmiChain => "RMI-Chain",
            Self::RadixSplineChain => "RadixSpline-Chain",
            Self::RmiSort => "RMI-Sort",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [Self::RmiChain, Self::RadixSplineChain, Self::RmiSort]
            .into_iter()
            .find(|s| s.as_str() == name)
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const EXPERIMENT_RULES: &[(&str, ExperimentKind)] = &[
    ("coro-rmi:", ExperimentKind::CoroutineRmi),
    ("coro:", ExperimentKind::CoroutineProbe),
    ("collision", ExperimentKind::Collision),
    ("probe", ExperimentKind::Probe),
    ("insert", ExperimentKind::Insert),
    ("build", ExperimentKind::Build),
    ("join", ExperimentKind::Join),
    ("gaps", ExperimentKind::Gaps),
    ("range", ExperimentKind::Range),
];

const FUNCTION_RULES: &[(&str, FunctionId)] = &[
    ("coro_rmi", FunctionId::RmiCoro),
    ("rmi", FunctionId::Rmi),
    ("pgm", FunctionId::Pgm),
    ("murmur", FunctionId::Murmur),
    ("bitmwhc", FunctionId::BitMwhc),
    ("radix_spline", FunctionId::RadixSpline),
    ("mwhc", FunctionId::Mwhc),
    ("recsplit", FunctionId::RecSplit),
    ("aqua", FunctionId::AquaHash),
    ("xxh", FunctionId::XxHash),
    ("multhash", FunctionId::MultiplyPrime),
    ("fibonacci", FunctionId::FibonacciPrime),
];

const TABLE_RULES: &[(&str, TableKind)] = &[
    ("linear", TableKind::Linear),
    ("chained", TableKind::Chained),
    ("cuckoo", TableKind::Cuckoo),
];

const STRUCTURE_RULES: &[(&str, StructureKind)] = &[
    ("sort", StructureKind::RmiSort),
    ("radix", StructureKind::RadixSplineChain),
    ("rmi", StructureKind::RmiChain),
];

static MODEL_COUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"rmi_hash_(\d+)(?::|$)").expect("model count pattern is valid")
});

/// First rule whose trigger occurs in `text`. `text` must be lowercase.
fn first_match<T: Copy>(rules: &[(&str, T)], text: &str) -> Option<T> {
    rules
        .iter()
        .find(|(trigger, _)| text.contains(trigger))
        .map(|(_, variant)| *variant)
}

/// Derived categorical attributes of one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub experiment_kind: ExperimentKind,
    pub function_id: FunctionId,
    pub table_kind: Option<TableKind>,
    /// Number of RMI second-level models; `None` when the name carries none.
    pub model_count: Option<u64>,
    pub structure_kind: Option<StructureKind>,
}

impl Classification {
    /// The classification as record fields. Absent attributes are omitted.
    pub fn to_fields(&self) -> Vec<(&'static str, Value)> {
        let mut out = vec![
            (
                fields::EXPERIMENT_KIND,
                Value::from(self.experiment_kind.as_str()),
            ),
            (fields::FUNCTION_ID, Value::from(self.function_id.as_str())),
        ];
        if let Some(table) = self.table_kind {
            out.push((fields::TABLE_KIND, Value::from(table.as_str())));
        }
        if let Some(models) = self.model_count.and_then(|m| i64::try_from(m).ok()) {
            out.push((fields::MODEL_COUNT, Value::Int(models)));
        }
        if let Some(structure) = self.structure_kind {
            out.push((fields::STRUCTURE_KIND, Value::from(structure.as_str())));
        }
        out
    }
}

/// Classify a single record. Pure: the same fields always give the same
/// classification.
///
/// # Examples
///
/// ```
/// use benchfold_core::{classify, ExperimentKind, FunctionId, Record, TableKind, Value};
///
/// let record = Record::from_iter([("label", Value::from("probe_rmi_hash_1000:chained"))]);
/// let c = classify(&record);
/// assert_eq!(c.experiment_kind, ExperimentKind::Probe);
/// assert_eq!(c.function_id, FunctionId::Rmi);
/// assert_eq!(c.table_kind, Some(TableKind::Chained));
/// assert_eq!(c.model_count, Some(1000));
/// ```
pub fn classify(record: &Record) -> Classification {
    let label = record.label().map(str::to_lowercase);
    let function_name = record.function_name().map(str::to_lowercase);
    let label = label.as_deref();
    let function_name = function_name.as_deref();

    Classification {
        experiment_kind: experiment_kind(record, label),
        function_id: function_id(label, function_name),
        table_kind: label.and_then(|l| first_match(TABLE_RULES, l)),
        model_count: label
            .and_then(model_count)
            .or_else(|| function_name.and_then(model_count)),
        structure_kind: label.and_then(|l| first_match(STRUCTURE_RULES, l)),
    }
}

fn experiment_kind(record: &Record, label: Option<&str>) -> ExperimentKind {
    let Some(label) = label else {
        if fields::PERF_COUNTERS.iter().any(|c| record.has(c)) {
            return ExperimentKind::PerformanceCounter;
        }
        return ExperimentKind::Unclassified;
    };

    match first_match(EXPERIMENT_RULES, label) {
        Some(ExperimentKind::Collision) if nonzero_load_factor(record) => {
            ExperimentKind::Distribution
        }
        Some(kind) => kind,
        None => ExperimentKind::Unclassified,
    }
}

fn nonzero_load_factor(record: &Record) -> bool {
    record
        .number(fields::LOAD_FACTOR_PERCENT)
        .or_else(|| record.number(fields::LOAD_FACTOR))
        .map_or(false, |lf| lf != 0.0)
}

fn function_id(label: Option<&str>, function_name: Option<&str>) -> FunctionId {
    label
        .and_then(|l| first_match(FUNCTION_RULES, l))
        .or_else(|| function_name.and_then(|f| first_match(FUNCTION_RULES, f)))
        .unwrap_or(FunctionId::Unknown)
}

fn model_count(text: &str) -> Option<u64> {
    MODEL_COUNT
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Attach the classification of every record as fields, producing new
/// records.
pub fn classify_set(set: &RecordSet) -> RecordSet {
    set.map_records(|record| record.with_fields(classify(record).to_fields()))
}

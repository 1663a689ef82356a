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

//! Per-figure views over a prepared record set.
//!
//! Each view is a fixed recipe of filter, group, mean, derive and order
//! applied to records that have been classified and normalized (see
//! [`crate::prepare`]). An empty table means there is nothing to draw and
//! is not an error.

use crate::aggregate::{aggregate_with, AggregatedRow, GroupSpec, Table};
use crate::classify::{ExperimentKind, FunctionId, TableKind};
use crate::error::{BenchError, BenchResult};
use crate::fields;
use crate::metrics::{collision_ratio, require, throughput, time_gain, MetricError};
use crate::ordering::{table_label, Dimension, OrderingConfig};
use crate::record::{Record, RecordSet};
use crate::value::Value;
use std::fmt;
use std::str::FromStr;

/// Load factors at or above this percentage are plotted separately.
pub const HIGH_LOAD_FACTOR_PERCENT: f64 = 1000.0;

/// Longest prefix of a gap histogram that is reported.
pub const GAP_SERIES_LEN: usize = 6;

/// Dataset excluded from gap plots (sequential keys have no gaps).
const SEQUENTIAL_DATASET: &str = "seq";

/// Default RMI size per dataset for coroutine probe plots.
const DEFAULT_MODELS: &[(&str, i64)] = &[("fb", 10_000_000), ("wiki", 1000)];

const PROBE_MEASURES: &[&str] = &[
    fields::DATASET_SIZE,
    fields::PROBE_ELEM_COUNT,
    fields::TOT_TIME_PROBE_S,
];

const COLLISION_MEASURES: &[&str] = &[fields::DATASET_SIZE, fields::COLLISIONS, fields::TOT_TIME_S];

const PERF_JOIN_COUNTERS: &[&str] = &["L1-misses", "LLC-misses"];

/// Key distribution of probe workloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProbeDistribution {
    #[default]
    Uniform,
    /// 80% of probes hit 20% of keys.
    Pareto,
}

impl ProbeDistribution {
    pub fn as_str(self) -> &'static str {
        match self {
            ProbeDistribution::Uniform => "uniform",
            ProbeDistribution::Pareto => "80-20",
        }
    }
}

/// Views addressable by name, as exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Collisions,
    CollisionsRmi,
    Distribution,
    Probe(ProbeDistribution),
    ProbeHighLoadFactor(ProbeDistribution),
    ProbeAllLoadFactors(ProbeDistribution),
    Insert(ProbeDistribution),
    Build,
    PointQueries(ProbeDistribution),
    RangeQueries(ProbeDistribution),
    Join,
    CoroutineProbe(ProbeDistribution),
    CoroutineRmi,
    PerfProbe {
        distribution: ProbeDistribution,
        exclude_mwhc: bool,
    },
    PerfJoin,
}

impl ViewKind {
    /// Every view, in presentation order.
    pub fn all() -> Vec<ViewKind> {
        use ProbeDistribution::{Pareto, Uniform};
        vec![
            ViewKind::Collisions,
            ViewKind::CollisionsRmi,
            ViewKind::Distribution,
            ViewKind::Probe(Uniform),
            ViewKind::Probe(Pareto),
            ViewKind::ProbeHighLoadFactor(Uniform),
            ViewKind::ProbeHighLoadFactor(Pareto),
            ViewKind::ProbeAllLoadFactors(Uniform),
            ViewKind::ProbeAllLoadFactors(Pareto),
            ViewKind::Insert(Uniform),
            ViewKind::Insert(Pareto),
            ViewKind::Build,
            ViewKind::PointQueries(Uniform),
            ViewKind::PointQueries(Pareto),
            ViewKind::RangeQueries(Uniform),
            ViewKind::RangeQueries(Pareto),
            ViewKind::Join,
            ViewKind::CoroutineProbe(Uniform),
            ViewKind::CoroutineProbe(Pareto),
            ViewKind::CoroutineRmi,
            ViewKind::PerfProbe { distribution: Uniform, exclude_mwhc: false },
            ViewKind::PerfProbe { distribution: Pareto, exclude_mwhc: false },
            ViewKind::PerfProbe { distribution: Uniform, exclude_mwhc: true },
            ViewKind::PerfProbe { distribution: Pareto, exclude_mwhc: true },
            ViewKind::PerfJoin,
        ]
    }

    /// Stable name, e.g. `probe-pareto`.
    pub fn name(self) -> String {
        fn suffixed(base: &str, distribution: ProbeDistribution) -> String {
            match distribution {
                ProbeDistribution::Uniform => base.to_string(),
                ProbeDistribution::Pareto => format!("{}-pareto", base),
            }
        }

        match self {
            ViewKind::Collisions => "collisions".to_string(),
            ViewKind::CollisionsRmi => "collisions-rmi".to_string(),
            ViewKind::Distribution => "distribution".to_string(),
            ViewKind::Probe(d) => suffixed("probe", d),
            ViewKind::ProbeHighLoadFactor(d) => suffixed("probe-high-lf", d),
            ViewKind::ProbeAllLoadFactors(d) => suffixed("probe-all-lf", d),
            ViewKind::Insert(d) => suffixed("insert", d),
            ViewKind::Build => "build".to_string(),
            ViewKind::PointQueries(d) => suffixed("point", d),
            ViewKind::RangeQueries(d) => suffixed("range", d),
            ViewKind::Join => "join".to_string(),
            ViewKind::CoroutineProbe(d) => suffixed("coro-probe", d),
            ViewKind::CoroutineRmi => "coro-rmi".to_string(),
            ViewKind::PerfProbe {
                distribution,
                exclude_mwhc,
            } => {
                let base = if exclude_mwhc {
                    "perf-probe-no-mwhc"
                } else {
                    "perf-probe"
                };
                suffixed(base, distribution)
            }
            ViewKind::PerfJoin => "perf-join".to_string(),
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for ViewKind {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewKind::all()
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| BenchError::invalid_input(format!("unknown view '{}'", s)))
    }
}

/// Gap histogram of one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct GapSeries {
    pub dataset: String,
    /// Count of each gap value, starting at gap 0.
    pub counts: Vec<Value>,
}

/// Query interface over a prepared record set.
#[derive(Debug, Clone, Copy)]
pub struct Views<'a> {
    records: &'a [Record],
    ordering: &'a OrderingConfig,
}

impl<'a> Views<'a> {
    pub fn new(set: &'a RecordSet, ordering: &'a OrderingConfig) -> Self {
        Self {
            records: &set.records,
            ordering,
        }
    }

    /// Run a view by kind.
    pub fn run(&self, kind: ViewKind) -> BenchResult<Table> {
        let result = match kind {
            ViewKind::Collisions => self.collisions(),
            ViewKind::CollisionsRmi => self.collisions_rmi(),
            ViewKind::Distribution => self.distribution(),
            ViewKind::Probe(d) => self.probe(d),
            ViewKind::ProbeHighLoadFactor(d) => self.probe_high_load_factor(d),
            ViewKind::ProbeAllLoadFactors(d) => self.probe_all_load_factors(d),
            ViewKind::Insert(d) => self.insert(d),
            ViewKind::Build => self.build(),
            ViewKind::PointQueries(d) => self.point_queries(d),
            ViewKind::RangeQueries(d) => self.range_queries(d),
            ViewKind::Join => self.join(),
            ViewKind::CoroutineProbe(d) => self.coroutine_probe(d),
            ViewKind::CoroutineRmi => self.coroutine_rmi(),
            ViewKind::PerfProbe {
                distribution,
                exclude_mwhc,
            } => self.perf_probe(distribution, exclude_mwhc),
            ViewKind::PerfJoin => self.perf_join(),
        };
        result.map_err(|e| e.with_context(format!("in view {}", kind)))
    }

    fn of_kind(&self, kind: ExperimentKind) -> impl Iterator<Item = &'a Record> + 'a {
        self.records
            .iter()
            .filter(move |r| experiment_kind(r) == kind)
    }

    /// Collision counts at zero load factor, ordered by throughput.
    pub fn collisions(&self) -> BenchResult<Table> {
        let records: Vec<_> = self.of_kind(ExperimentKind::Collision).collect();
        let spec = GroupSpec::new(
            &[fields::DATASET_NAME, fields::LABEL, fields::FUNCTION_ID],
            COLLISION_MEASURES,
        );
        Ok(aggregate_with(records, &spec)?
            .derive("throughput_M", throughput_of(fields::DATASET_SIZE, fields::TOT_TIME_S))
            .derive("collision_ratio", collision_ratio_of)
            .sort_by("throughput_M"))
    }

    /// Collision counts of RMI by number of second-level models.
    pub fn collisions_rmi(&self) -> BenchResult<Table> {
        let records: Vec<_> = self
            .of_kind(ExperimentKind::Collision)
            .filter(|r| function_is(r, FunctionId::Rmi))
            .collect();
        let spec = GroupSpec::new(
            &[fields::DATASET_NAME, fields::LABEL, fields::FUNCTION_ID],
            COLLISION_MEASURES,
        )
        .optional(fields::MODEL_COUNT);
        Ok(aggregate_with(records, &spec)?
            .derive("collision_ratio", collision_ratio_of)
            .sort_by(fields::MODEL_COUNT))
    }

    /// Collision counts at non-zero load factors.
    pub fn distribution(&self) -> BenchResult<Table> {
        let records: Vec<_> = self.of_kind(ExperimentKind::Distribution).collect();
        let spec = GroupSpec::new(
            &[
                fields::DATASET_NAME,
                fields::LABEL,
                fields::FUNCTION_ID,
                fields::LOAD_FACTOR,
            ],
            COLLISION_MEASURES,
        );
        Ok(aggregate_with(records, &spec)?
            .derive("collision_ratio", collision_ratio_of)
            .sort_by(fields::LOAD_FACTOR))
    }

    /// Gap histograms, one series per dataset.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidInput` if a dataset has more than one gap record.
    pub fn gaps(&self) -> BenchResult<Vec<GapSeries>> {
        let mut series: Vec<GapSeries> = Vec::new();
        for record in self.of_kind(ExperimentKind::Gaps) {
            let Some(dataset) = record.text(fields::DATASET_NAME) else {
                continue;
            };
            if dataset == SEQUENTIAL_DATASET {
                continue;
            }
            if series.iter().any(|s| s.dataset == dataset) {
                return Err(BenchError::invalid_input(format!(
                    "dataset '{}' has more than one gap record",
                    dataset
                )));
            }
            let counts = record
                .get(fields::COUNT)
                .and_then(Value::as_list)
                .map(|c| c.iter().take(GAP_SERIES_LEN).cloned().collect())
                .unwrap_or_default();
            series.push(GapSeries {
                dataset: dataset.to_string(),
                counts,
            });
        }
        Ok(series)
    }

    fn probe_candidates(&self) -> impl Iterator<Item = &'a Record> + 'a {
        self.of_kind(ExperimentKind::Probe).filter(|r| !is_failed(r))
    }

    fn probe_table(&self, records: Vec<&Record>, measures: &[&str]) -> BenchResult<Table> {
        let spec = GroupSpec::new(
            &[
                fields::DATASET_NAME,
                fields::LABEL,
                fields::FUNCTION_ID,
                fields::LOAD_FACTOR,
            ],
            measures,
        )
        .optional(fields::TABLE_KIND);
        aggregate_with(records, &spec)
    }

    /// Probe throughput below the high load-factor threshold.
    pub fn probe(&self, distribution: ProbeDistribution) -> BenchResult<Table> {
        let records: Vec<_> = self
            .probe_candidates()
            .filter(|r| below_high_load_factor(r))
            .filter(|r| has_distribution(r, distribution))
            .collect();
        Ok(self
            .probe_table(records, PROBE_MEASURES)?
            .derive(
                "throughput_M",
                throughput_of(fields::PROBE_ELEM_COUNT, fields::TOT_TIME_PROBE_S),
            )
            .sort_by(fields::LOAD_FACTOR))
    }

    /// Probe throughput of chained tables at high load factors.
    pub fn probe_high_load_factor(&self, distribution: ProbeDistribution) -> BenchResult<Table> {
        let records: Vec<_> = self
            .probe_candidates()
            .filter(|r| at_high_load_factor(r))
            .filter(|r| has_distribution(r, distribution))
            .filter(|r| table_is(r, TableKind::Chained))
            .collect();
        Ok(self
            .probe_table(records, PROBE_MEASURES)?
            .derive(
                "throughput_M",
                throughput_of(fields::PROBE_ELEM_COUNT, fields::TOT_TIME_PROBE_S),
            )
            .sort_by(fields::LOAD_FACTOR))
    }

    /// Probe throughput of chained tables across all load factors.
    ///
    /// Empty unless both low and high load factors were measured.
    pub fn probe_all_load_factors(&self, distribution: ProbeDistribution) -> BenchResult<Table> {
        let candidates: Vec<_> = self.probe_candidates().collect();
        let has_low = candidates.iter().any(|r| below_high_load_factor(r));
        let has_high = candidates.iter().any(|r| at_high_load_factor(r));
        if !(has_low && has_high) {
            return self.probe_table(Vec::new(), PROBE_MEASURES);
        }
        let records: Vec<_> = candidates
            .into_iter()
            .filter(|r| has_distribution(r, distribution))
            .filter(|r| table_is(r, TableKind::Chained))
            .collect();
        Ok(self
            .probe_table(records, PROBE_MEASURES)?
            .derive(
                "throughput_M",
                throughput_of(fields::PROBE_ELEM_COUNT, fields::TOT_TIME_PROBE_S),
            )
            .sort_by(fields::LOAD_FACTOR))
    }

    /// Insert throughput, measured by the probe runs.
    pub fn insert(&self, distribution: ProbeDistribution) -> BenchResult<Table> {
        let records: Vec<_> = self
            .probe_candidates()
            .filter(|r| below_high_load_factor(r))
            .filter(|r| has_distribution(r, distribution))
            .collect();
        let measures = [
            fields::DATASET_SIZE,
            fields::INSERT_ELEM_COUNT,
            fields::TOT_TIME_INSERT_S,
        ];
        Ok(self
            .probe_table(records, &measures)?
            .derive(
                "throughput_M",
                throughput_of(fields::INSERT_ELEM_COUNT, fields::TOT_TIME_INSERT_S),
            )
            .sort_by(fields::LOAD_FACTOR))
    }

    /// Build time per function and model size.
    pub fn build(&self) -> BenchResult<Table> {
        let records: Vec<_> = self.of_kind(ExperimentKind::Build).collect();
        let spec = GroupSpec::new(
            &[
                fields::DATASET_NAME,
                fields::FUNCTION_ID,
                fields::ACTUAL_SIZE,
                fields::LABEL,
            ],
            &[fields::BUILD_TIME_S],
        );
        aggregate_with(records, &spec)?
            .sort_by(fields::ACTUAL_SIZE)
            .sort_by_rank(fields::FUNCTION_ID, Dimension::Function, self.ordering)
    }

    fn range_table(&self, distribution: ProbeDistribution) -> BenchResult<Table> {
        let records: Vec<_> = self
            .of_kind(ExperimentKind::Range)
            .filter(|r| !is_failed(r))
            .filter(|r| has_distribution(r, distribution))
            .collect();
        let spec = GroupSpec::new(
            &[
                fields::DATASET_NAME,
                fields::LABEL,
                fields::FUNCTION_ID,
                fields::RANGE_SIZE,
                fields::POINT_QUERY_PERCENT,
            ],
            PROBE_MEASURES,
        )
        .optional(fields::STRUCTURE_KIND);
        Ok(aggregate_with(records, &spec)?.derive(
            "throughput_M",
            throughput_of(fields::PROBE_ELEM_COUNT, fields::TOT_TIME_PROBE_S),
        ))
    }

    /// Point lookups (`range_size == 0`) by share of point queries.
    pub fn point_queries(&self, distribution: ProbeDistribution) -> BenchResult<Table> {
        Ok(self
            .range_table(distribution)?
            .filter(|row| row.number(fields::RANGE_SIZE) == Some(0.0))
            .sort_by(fields::POINT_QUERY_PERCENT))
    }

    /// Range scans (`range_size != 0`) by range size.
    pub fn range_queries(&self, distribution: ProbeDistribution) -> BenchResult<Table> {
        Ok(self
            .range_table(distribution)?
            .filter(|row| row.number(fields::RANGE_SIZE) != Some(0.0))
            .sort_by(fields::RANGE_SIZE))
    }

    /// Join phase times per table label, in table-label order.
    pub fn join(&self) -> BenchResult<Table> {
        let records: Vec<Record> = self
            .of_kind(ExperimentKind::Join)
            .filter(|r| !is_failed(r))
            .filter_map(|r| {
                let function = r.text(fields::FUNCTION_ID)?;
                let table = r.text(fields::TABLE_KIND)?;
                Some(r.with_field(fields::TABLE_LABEL, table_label(function, table)))
            })
            .collect();
        let spec = GroupSpec::new(
            &[
                fields::DATASET_NAME,
                fields::TABLE_LABEL,
                fields::FUNCTION_ID,
                fields::JOIN_SIZE,
            ],
            &[
                fields::TOT_TIME_SORT_S,
                fields::TOT_TIME_BUILD_S,
                fields::TOT_TIME_JOIN_S,
            ],
        );
        aggregate_with(&records, &spec)?.sort_by_rank(
            fields::TABLE_LABEL,
            Dimension::TableLabel,
            self.ordering,
        )
    }

    /// Coroutine-interleaved probes versus sequential probes.
    pub fn coroutine_probe(&self, distribution: ProbeDistribution) -> BenchResult<Table> {
        let records: Vec<_> = self
            .of_kind(ExperimentKind::CoroutineProbe)
            .filter(|r| !is_failed(r))
            .filter(|r| !function_is(r, FunctionId::RmiCoro))
            .filter(|r| has_distribution(r, distribution))
            .filter(|r| has_default_models(r))
            .collect();
        let spec = GroupSpec::new(
            &[
                fields::DATASET_NAME,
                fields::LABEL,
                fields::FUNCTION_ID,
                fields::LOAD_FACTOR,
            ],
            &[
                fields::DATASET_SIZE,
                fields::PROBE_ELEM_COUNT,
                fields::TOT_FOR_TIME_INTERLEAVED_S,
                fields::TOT_FOR_TIME_SEQUENTIAL_S,
            ],
        )
        .optional(fields::N_CORO)
        .optional(fields::MODEL_COUNT);
        Ok(aggregate_with(records, &spec)?
            .derive(
                "time_gain",
                time_gain_of(
                    fields::TOT_FOR_TIME_SEQUENTIAL_S,
                    fields::TOT_FOR_TIME_INTERLEAVED_S,
                ),
            )
            .derive(
                "throughput_sequential",
                throughput_of(fields::PROBE_ELEM_COUNT, fields::TOT_FOR_TIME_SEQUENTIAL_S),
            )
            .derive(
                "throughput_interleaved",
                throughput_of(fields::PROBE_ELEM_COUNT, fields::TOT_FOR_TIME_INTERLEAVED_S),
            )
            .sort_by(fields::LOAD_FACTOR))
    }

    /// Coroutine RMI lookups by number of models.
    pub fn coroutine_rmi(&self) -> BenchResult<Table> {
        let records: Vec<_> = self.of_kind(ExperimentKind::CoroutineRmi).collect();
        let spec = GroupSpec::new(
            &[fields::DATASET_NAME, fields::LABEL, fields::FUNCTION_ID],
            &[
                fields::DATASET_SIZE,
                fields::TOT_SEQUENTIAL_TIME_S,
                fields::TOT_INTERLEAVED_TIME_S,
            ],
        )
        .optional(fields::N_CORO)
        .optional(fields::MODEL_COUNT);
        Ok(aggregate_with(records, &spec)?
            .derive(
                "time_gain",
                time_gain_of(fields::TOT_SEQUENTIAL_TIME_S, fields::TOT_INTERLEAVED_TIME_S),
            )
            .derive(
                "throughput_sequential",
                throughput_of(fields::DATASET_SIZE, fields::TOT_SEQUENTIAL_TIME_S),
            )
            .derive(
                "throughput_interleaved",
                throughput_of(fields::DATASET_SIZE, fields::TOT_INTERLEAVED_TIME_S),
            )
            .sort_by(fields::MODEL_COUNT))
    }

    /// Hardware counters of probe runs, in table-label order.
    pub fn perf_probe(
        &self,
        distribution: ProbeDistribution,
        exclude_mwhc: bool,
    ) -> BenchResult<Table> {
        let records: Vec<_> = self
            .of_kind(ExperimentKind::PerformanceCounter)
            .filter(|r| !r.has(fields::PHASE))
            .filter(|r| !(exclude_mwhc && r.text(fields::FUNCTION) == Some("mwhc")))
            .filter(|r| has_distribution(r, distribution))
            .collect();
        let spec = GroupSpec::new(
            &[
                fields::FUNCTION,
                fields::TABLE,
                fields::DATASET_NAME,
                fields::TABLE_LABEL,
            ],
            fields::PERF_COUNTERS,
        );
        aggregate_with(records, &spec)?.sort_by_rank(
            fields::TABLE_LABEL,
            Dimension::TableLabel,
            self.ordering,
        )
    }

    /// Hardware counters of the sort, build and probe phases of joins.
    ///
    /// Only keys measured in all three phases are reported. Counter columns
    /// are suffixed with the phase (`L1-misses-sort`, ...).
    pub fn perf_join(&self) -> BenchResult<Table> {
        const PHASES: [(&str, &str); 3] = [("sort", "sort"), ("insert", "build"), ("join", "probe")];
        let keys = [fields::SIZES, fields::DATASET_NAME, fields::TABLE_LABEL];

        let mut per_phase = Vec::with_capacity(PHASES.len());
        for (phase, _) in PHASES {
            let records: Vec<_> = self
                .of_kind(ExperimentKind::PerformanceCounter)
                .filter(|r| r.text(fields::PHASE) == Some(phase))
                .collect();
            per_phase.push(aggregate_with(records, &GroupSpec::new(&keys, PERF_JOIN_COUNTERS))?);
        }

        let measures: Vec<String> = PHASES
            .iter()
            .flat_map(|(_, suffix)| {
                PERF_JOIN_COUNTERS
                    .iter()
                    .map(move |counter| format!("{}-{}", counter, suffix))
            })
            .collect();
        let measure_refs: Vec<&str> = measures.iter().map(String::as_str).collect();
        let mut table = Table::new(&keys, &measure_refs);

        let (first, rest) = per_phase.split_first().ok_or_else(|| {
            BenchError::invalid_input("perf join needs at least one phase")
        })?;
        for row in first {
            let matches: Vec<&AggregatedRow> = rest
                .iter()
                .filter_map(|other| other.iter().find(|o| same_keys(o, row, &keys)))
                .collect();
            if matches.len() != rest.len() {
                continue;
            }
            let phases = std::iter::once(row).chain(matches);
            let mut joined = AggregatedRow {
                keys: row.keys.clone(),
                count: 0,
                measures: Vec::with_capacity(measures.len()),
                derived: Vec::new(),
            };
            let mut names = measures.iter();
            for phase_row in phases {
                joined.count += phase_row.count;
                for counter in PERF_JOIN_COUNTERS {
                    if let Some(name) = names.next() {
                        joined.measures.push((name.clone(), phase_row.measure(counter)));
                    }
                }
            }
            table.rows.push(joined);
        }

        table.sort_by_rank(fields::TABLE_LABEL, Dimension::TableLabel, self.ordering)
    }
}

fn experiment_kind(record: &Record) -> ExperimentKind {
    record
        .text(fields::EXPERIMENT_KIND)
        .and_then(ExperimentKind::from_name)
        .unwrap_or_else(|| crate::classify::classify(record).experiment_kind)
}

fn function_is(record: &Record, function: FunctionId) -> bool {
    record.text(fields::FUNCTION_ID) == Some(function.as_str())
}

fn table_is(record: &Record, table: TableKind) -> bool {
    record.text(fields::TABLE_KIND) == Some(table.as_str())
}

/// A run failed if it reported an insert failure message or set
/// `has_failed`. Records without either field did not fail.
pub fn is_failed(record: &Record) -> bool {
    let message = record
        .text(fields::INSERT_FAIL_MESSAGE)
        .map_or(false, |m| !m.is_empty());
    let flagged = record
        .get(fields::HAS_FAILED)
        .and_then(Value::as_bool)
        .unwrap_or(false);
    message || flagged
}

fn has_distribution(record: &Record, distribution: ProbeDistribution) -> bool {
    record.text(fields::PROBE_TYPE) == Some(distribution.as_str())
}

fn load_factor_percent(record: &Record) -> Option<f64> {
    record
        .number(fields::LOAD_FACTOR_PERCENT)
        .or_else(|| record.number(fields::LOAD_FACTOR).map(|lf| lf * 100.0))
}

fn below_high_load_factor(record: &Record) -> bool {
    load_factor_percent(record).map_or(false, |p| p < HIGH_LOAD_FACTOR_PERCENT)
}

fn at_high_load_factor(record: &Record) -> bool {
    load_factor_percent(record).map_or(false, |p| p >= HIGH_LOAD_FACTOR_PERCENT)
}

fn has_default_models(record: &Record) -> bool {
    let Some(models) = record.get(fields::MODEL_COUNT).and_then(Value::as_int) else {
        return true;
    };
    let dataset = record.text(fields::DATASET_NAME);
    match DEFAULT_MODELS.iter().find(|(name, _)| Some(*name) == dataset) {
        Some((_, default)) => models == *default,
        None => true,
    }
}

fn same_keys(a: &AggregatedRow, b: &AggregatedRow, keys: &[&str]) -> bool {
    keys.iter().all(|k| match (a.key(k), b.key(k)) {
        (Some(x), Some(y)) => x.total_cmp(y).is_eq(),
        _ => false,
    })
}

fn throughput_of(
    count: &'static str,
    seconds: &'static str,
) -> impl Fn(&AggregatedRow) -> Result<f64, MetricError> {
    move |row| {
        throughput(
            require(row.measure(count), count)?,
            require(row.measure(seconds), seconds)?,
        )
    }
}

fn time_gain_of(
    sequential: &'static str,
    interleaved: &'static str,
) -> impl Fn(&AggregatedRow) -> Result<f64, MetricError> {
    move |row| {
        time_gain(
            require(row.measure(sequential), sequential)?,
            require(row.measure(interleaved), interleaved)?,
        )
    }
}

fn collision_ratio_of(row: &AggregatedRow) -> Result<f64, MetricError> {
    collision_ratio(
        require(row.measure(fields::COLLISIONS), fields::COLLISIONS)?,
        require(row.measure(fields::DATASET_SIZE), fields::DATASET_SIZE)?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(pairs: &[(&str, Value)]) -> Record {
        pairs.iter().map(|(k, v)| (*k, v.clone())).collect()
    }

    fn prepared(records: Vec<Record>) -> RecordSet {
        crate::prepare(&RecordSet::from_records("test.json", records))
    }

    fn probe(label: &str, ds: &str, lf: i64, elems: i64, secs: f64) -> Record {
        rec(&[
            ("label", Value::from(label)),
            ("dataset_name", Value::from(ds)),
            ("load_factor_%", Value::Int(lf)),
            ("dataset_size", Value::Int(elems)),
            ("probe_elem_count", Value::Int(elems)),
            ("tot_time_probe_s", Value::Float(secs)),
            ("insert_elem_count", Value::Int(elems)),
            ("tot_time_insert_s", Value::Float(secs * 2.0)),
            ("insert_fail_message", Value::from("")),
        ])
    }

    // ==================== ViewKind tests ====================

    #[test]
    fn test_view_names_parse_back() {
        for kind in ViewKind::all() {
            assert_eq!(kind.name().parse::<ViewKind>().unwrap(), kind);
        }
        assert!("nope".parse::<ViewKind>().is_err());
    }

    // ==================== Collision tests ====================

    #[test]
    fn test_collisions_view() {
        let set = prepared(vec![
            rec(&[
                ("label", Value::from("Collisions:rmi_hash_100:wiki")),
                ("dataset_name", Value::from("wiki")),
                ("dataset_size", Value::Int(1_000_000)),
                ("collisions", Value::Int(250_000)),
                ("tot_time_s", Value::Float(0.5)),
            ]),
            rec(&[
                ("label", Value::from("Collisions:murmur:wiki")),
                ("dataset_name", Value::from("wiki")),
                ("dataset_size", Value::Int(1_000_000)),
                ("collisions", Value::Int(360_000)),
                ("tot_time_s", Value::Float(0.25)),
            ]),
        ]);
        let ordering = OrderingConfig::standard();
        let table = Views::new(&set, &ordering).collisions().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].key_str("function_id"), Some("RMI"));
        assert_eq!(table.rows[0].derived("throughput_M"), Some(&Ok(2.0)));
        assert_eq!(table.rows[0].derived("collision_ratio"), Some(&Ok(0.25)));
        assert_eq!(table.rows[1].derived("throughput_M"), Some(&Ok(4.0)));
    }

    #[test]
    fn test_legacy_collision_records() {
        let set = prepared(vec![rec(&[
            ("label", Value::from("Collisions:rmi_hash_10:fb")),
            ("dataset_name", Value::from("fb")),
            ("data_elem_count", Value::Int(100)),
            ("collisions", Value::Int(10)),
            ("tot_time_s", Value::Float(1.0)),
        ])]);
        let ordering = OrderingConfig::standard();
        let table = Views::new(&set, &ordering).collisions_rmi().unwrap();
        assert_eq!(table.rows[0].measure("dataset_size"), Some(100.0));
        assert_eq!(table.rows[0].key("model_count"), Some(&Value::Int(10)));
        assert_eq!(table.rows[0].derived("collision_ratio"), Some(&Ok(0.1)));
    }

    #[test]
    fn test_distribution_view() {
        let set = prepared(vec![
            rec(&[
                ("label", Value::from("collision_mwhc")),
                ("dataset_name", Value::from("fb")),
                ("load_factor_%", Value::Int(75)),
                ("dataset_size", Value::Int(100)),
                ("collisions", Value::Int(20)),
            ]),
            rec(&[
                ("label", Value::from("collision_mwhc")),
                ("dataset_name", Value::from("fb")),
                ("load_factor_%", Value::Int(0)),
                ("dataset_size", Value::Int(100)),
                ("collisions", Value::Int(5)),
            ]),
        ]);
        let ordering = OrderingConfig::standard();
        let views = Views::new(&set, &ordering);
        let table = views.distribution().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].number("load_factor"), Some(0.75));
        assert_eq!(views.collisions().unwrap().len(), 1);
    }

    // ==================== Gap tests ====================

    #[test]
    fn test_gaps_truncated_and_seq_skipped() {
        let counts: Vec<Value> = (0..10).map(Value::Int).collect();
        let set = prepared(vec![
            rec(&[
                ("label", Value::from("gaps")),
                ("dataset_name", Value::from("wiki")),
                ("count", Value::List(counts.clone())),
            ]),
            rec(&[
                ("label", Value::from("gaps")),
                ("dataset_name", Value::from("seq")),
                ("count", Value::List(counts)),
            ]),
        ]);
        let ordering = OrderingConfig::standard();
        let series = Views::new(&set, &ordering).gaps().unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].dataset, "wiki");
        assert_eq!(series[0].counts.len(), GAP_SERIES_LEN);
    }

    #[test]
    fn test_gaps_duplicate_dataset() {
        let gap = rec(&[("label", Value::from("gaps")), ("dataset_name", Value::from("fb"))]);
        let set = prepared(vec![gap.clone(), gap]);
        let ordering = OrderingConfig::standard();
        assert!(Views::new(&set, &ordering).gaps().is_err());
    }

    // ==================== Probe tests ====================

    #[test]
    fn test_probe_views_split_load_factor() {
        let set = prepared(vec![
            probe("probe_rmi_hash_1000:chained", "wiki", 50, 1_000_000, 0.5),
            probe("probe_rmi_hash_1000:chained", "wiki", 50, 1_000_000, 1.5),
            probe("probe_rmi_hash_1000:chained", "wiki", 1000, 1_000_000, 2.0),
            probe("probe_murmur:linear", "wiki", 25, 1_000_000, 1.0),
            probe("probe_murmur:linear", "wiki", 2000, 1_000_000, 1.0),
        ]);
        let ordering = OrderingConfig::standard();
        let views = Views::new(&set, &ordering);

        let low = views.probe(ProbeDistribution::Uniform).unwrap();
        assert_eq!(low.len(), 2);
        assert_eq!(low.rows[0].key_str("function_id"), Some("Murmur"));
        assert_eq!(low.rows[1].measure("tot_time_probe_s"), Some(1.0));
        assert_eq!(low.rows[1].derived("throughput_M"), Some(&Ok(1.0)));

        let high = views.probe_high_load_factor(ProbeDistribution::Uniform).unwrap();
        assert_eq!(high.len(), 1);
        assert_eq!(high.rows[0].number("load_factor"), Some(10.0));

        let all = views.probe_all_load_factors(ProbeDistribution::Uniform).unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|r| r.key_str("table_kind") == Some("chained")));
    }

    #[test]
    fn test_probe_pareto_needs_distribution_field() {
        let set = prepared(vec![probe("probe_rmi:chained", "fb", 50, 10, 1.0)]);
        let ordering = OrderingConfig::standard();
        let views = Views::new(&set, &ordering);
        assert_eq!(views.probe(ProbeDistribution::Uniform).unwrap().len(), 1);
        assert!(views.probe(ProbeDistribution::Pareto).unwrap().is_empty());
    }

    #[test]
    fn test_failed_probes_are_dropped() {
        let failed = probe("probe_rmi:chained", "fb", 50, 10, 1.0)
            .with_field("insert_fail_message", "table full");
        let set = prepared(vec![failed]);
        let ordering = OrderingConfig::standard();
        assert!(Views::new(&set, &ordering)
            .probe(ProbeDistribution::Uniform)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_insert_view() {
        let set = prepared(vec![probe("probe_mwhc:cuckoo", "fb", 50, 2_000_000, 0.5)]);
        let ordering = OrderingConfig::standard();
        let table = Views::new(&set, &ordering).insert(ProbeDistribution::Uniform).unwrap();
        assert_eq!(table.rows[0].derived("throughput_M"), Some(&Ok(2.0)));
    }

    #[test]
    fn test_zero_time_is_undefined_per_row() {
        let set = prepared(vec![
            probe("probe_rmi:chained", "fb", 50, 10, 0.0),
            probe("probe_pgm:chained", "fb", 50, 1_000_000, 1.0),
        ]);
        let ordering = OrderingConfig::standard();
        let table = Views::new(&set, &ordering).probe(ProbeDistribution::Uniform).unwrap();
        assert_eq!(table.len(), 2);
        let undefined = table.iter().filter(|r| matches!(r.derived("throughput_M"), Some(Err(_)))).count();
        assert_eq!(undefined, 1);
        assert_eq!(table.drop_undefined("throughput_M").len(), 1);
    }

    // ==================== Build and range tests ====================

    #[test]
    fn test_build_ordered_by_function_rank() {
        let build = |label: &str, size: i64| {
            rec(&[
                ("label", Value::from(label)),
                ("dataset_name", Value::from("wiki")),
                ("actual_size", Value::Int(size)),
                ("build_time_s", Value::Float(1.0)),
            ])
        };
        let set = prepared(vec![build("build_pgm", 10), build("build_rmi_hash_100", 100), build("build_rmi_hash_10", 10)]);
        let ordering = OrderingConfig::standard();
        let table = Views::new(&set, &ordering).build().unwrap();
        let order: Vec<_> = table
            .iter()
            .map(|r| (r.key_str("function_id").unwrap(), r.number("actual_size").unwrap()))
            .collect();
        assert_eq!(order, vec![("RMI", 10.0), ("RMI", 100.0), ("PGM", 10.0)]);
    }

    #[test]
    fn test_point_and_range_split() {
        let range = |label: &str, size: i64, point: i64| {
            rec(&[
                ("label", Value::from(label)),
                ("dataset_name", Value::from("wiki")),
                ("range_size", Value::Int(size)),
                ("point_query_%", Value::Int(point)),
                ("probe_elem_count", Value::Int(1_000_000)),
                ("tot_time_probe_s", Value::Float(1.0)),
            ])
        };
        let set = prepared(vec![
            range("range_rmi_sort", 0, 50),
            range("range_rmi_sort", 0, 10),
            range("range_radix_spline", 100, 0),
        ]);
        let ordering = OrderingConfig::standard();
        let views = Views::new(&set, &ordering);
        let point = views.point_queries(ProbeDistribution::Uniform).unwrap();
        assert_eq!(point.len(), 2);
        assert_eq!(point.rows[0].number("point_query_%"), Some(10.0));
        assert_eq!(point.rows[0].key_str("structure_kind"), Some("RMI-Sort"));
        let ranges = views.range_queries(ProbeDistribution::Uniform).unwrap();
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges.rows[0].key_str("structure_kind"), Some("RadixSpline-Chain"));
    }

    // ==================== Join tests ====================

    #[test]
    fn test_join_view_orders_by_table_label() {
        let join = |label: &str| {
            rec(&[
                ("label", Value::from(label)),
                ("dataset_name", Value::from("fb")),
                ("join_size", Value::from("(10Mx25M)")),
                ("has_failed", Value::Bool(false)),
                ("tot_time_join_s", Value::Float(1.0)),
            ])
        };
        let set = prepared(vec![join("join_mwhc:cuckoo"), join("join_multhash:linear"), join("join_rmi:chained")]);
        let ordering = OrderingConfig::standard();
        let table = Views::new(&set, &ordering).join().unwrap();
        let labels: Vec<_> = table.iter().map(|r| r.key_str("table_label").unwrap()).collect();
        assert_eq!(labels, vec!["RMI-CHAIN", "MULT-LP", "MWHC-CUCKOO"]);
    }

    #[test]
    fn test_join_unknown_label_fails() {
        let set = prepared(vec![rec(&[
            ("label", Value::from("join_murmur:chained")),
            ("dataset_name", Value::from("fb")),
            ("join_size", Value::from("(25Mx25M)")),
        ])]);
        let ordering = OrderingConfig::standard();
        let err = Views::new(&set, &ordering).run(ViewKind::Join).unwrap_err();
        assert_eq!(err.kind, crate::BenchErrorKind::UnknownCategory);
        assert_eq!(err.context.as_deref(), Some("in view join"));
    }

    // ==================== Coroutine tests ====================

    #[test]
    fn test_coroutine_probe_default_models() {
        let coro = |function_name: &str, ds: &str| {
            rec(&[
                ("label", Value::from("coro:probe:chained")),
                ("function_name", Value::from(function_name)),
                ("dataset_name", Value::from(ds)),
                ("load_factor_%", Value::Int(50)),
                ("probe_elem_count", Value::Int(1_000_000)),
                ("tot_for_time_sequential_s", Value::Float(2.0)),
                ("tot_for_time_interleaved_s", Value::Float(1.0)),
            ])
        };
        let set = prepared(vec![
            coro("rmi_hash_10000000", "fb"),
            coro("rmi_hash_1000", "fb"),
            coro("murmur", "fb"),
            coro("coro_rmi_hash_1000", "wiki"),
        ]);
        let ordering = OrderingConfig::standard();
        let table = Views::new(&set, &ordering)
            .coroutine_probe(ProbeDistribution::Uniform)
            .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].derived("time_gain"), Some(&Ok(2.0)));
        assert_eq!(table.rows[0].derived("throughput_interleaved"), Some(&Ok(1.0)));
        assert_eq!(table.rows[0].derived("throughput_sequential"), Some(&Ok(0.5)));
    }

    #[test]
    fn test_coroutine_rmi_sorted_by_models() {
        let coro = |models: i64| {
            rec(&[
                ("label", Value::from(format!("coro-rmi:rmi_hash_{}", models))),
                ("dataset_name", Value::from("gap_10")),
                ("dataset_size", Value::Int(1_000_000)),
                ("tot_sequential_time_s", Value::Float(1.0)),
                ("tot_interleaved_time_s", Value::Float(2.0)),
            ])
        };
        let set = prepared(vec![coro(1000), coro(10)]);
        let ordering = OrderingConfig::standard();
        let table = Views::new(&set, &ordering).coroutine_rmi().unwrap();
        assert_eq!(table.rows[0].key("model_count"), Some(&Value::Int(10)));
        assert_eq!(table.rows[0].derived("time_gain"), Some(&Ok(0.5)));
    }

    // ==================== Perf counter tests ====================

    fn perf(function: &str, table: &str, phase: Option<&str>, l1: f64) -> Record {
        let r = rec(&[
            ("function", Value::from(function)),
            ("table", Value::from(table)),
            ("dataset", Value::from("fb")),
            ("sizes", Value::from("10Mx25M")),
            ("L1-misses", Value::Float(l1)),
            ("LLC-misses", Value::Float(l1 / 10.0)),
        ]);
        match phase {
            Some(p) => r.with_field("phase", p),
            None => r,
        }
    }

    #[test]
    fn test_perf_probe() {
        let set = prepared(vec![
            perf("mwhc", "chain", None, 3.0),
            perf("rmi", "chain", None, 1.0),
            perf("rmi", "chain", None, 2.0),
        ]);
        let ordering = OrderingConfig::standard();
        let views = Views::new(&set, &ordering);
        let table = views.perf_probe(ProbeDistribution::Uniform, false).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].key_str("table_label"), Some("RMI-CHAIN"));
        assert_eq!(table.rows[0].measure("L1-misses"), Some(1.5));
        assert_eq!(views.perf_probe(ProbeDistribution::Uniform, true).unwrap().len(), 1);
        assert!(views.perf_probe(ProbeDistribution::Pareto, false).unwrap().is_empty());
    }

    #[test]
    fn test_perf_join_requires_all_phases() {
        let set = prepared(vec![
            perf("rmi", "chain", Some("sort"), 1.0),
            perf("rmi", "chain", Some("insert"), 2.0),
            perf("rmi", "chain", Some("join"), 3.0),
            perf("mult", "lp", Some("sort"), 1.0),
        ]);
        let ordering = OrderingConfig::standard();
        let table = Views::new(&set, &ordering).perf_join().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].measure("L1-misses-sort"), Some(1.0));
        assert_eq!(table.rows[0].measure("L1-misses-build"), Some(2.0));
        assert_eq!(table.rows[0].measure("L1-misses-probe"), Some(3.0));
        assert_eq!(table.rows[0].count, 3);
    }
}

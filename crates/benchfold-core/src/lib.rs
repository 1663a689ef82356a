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

//! Record model, classification and aggregation for benchmark results.
//!
//! Result files produced by independent benchmark runs are merged into one
//! [`RecordSet`], tagged with derived attributes by [`classify`], brought to a
//! single schema by [`normalize`] and folded into per-configuration means by
//! [`aggregate`]. The [`views`] module packages the fixed recipes used to
//! build figures on top of these steps.
//!
//! # Example
//!
//! ```
//! use benchfold_core::{aggregate, merge, prepare, Record, RecordSource, Value};
//!
//! let record: Record = [
//!     ("label", Value::from("probe_rmi_hash_1000:chained")),
//!     ("dataset_name", Value::from("wiki")),
//!     ("tot_time_probe_s", Value::Float(0.5)),
//! ]
//! .into_iter()
//! .collect();
//!
//! let set = prepare(&merge(&[RecordSource::new("run.json", vec![record])]));
//! let table = aggregate(&set.records, &["function_id", "table_kind"], &["tot_time_probe_s"]).unwrap();
//! assert_eq!(table.rows[0].key_str("function_id"), Some("RMI"));
//! ```

pub mod aggregate;
pub mod classify;
mod error;
pub mod fields;
mod merge;
pub mod metrics;
pub mod normalize;
pub mod ordering;
mod record;
mod value;
pub mod views;

pub use aggregate::{aggregate, aggregate_with, AggregatedRow, GroupSpec, Table};
pub use classify::{
    classify, classify_set, Classification, ExperimentKind, FunctionId, StructureKind, TableKind,
};
pub use error::{BenchError, BenchErrorKind, BenchResult};
pub use merge::merge;
pub use metrics::MetricError;
pub use normalize::{normalize, SchemaGeneration};
pub use ordering::{table_label, Category, Dimension, OrderingConfig};
pub use record::{Record, RecordSet, RecordSource, RunContext, SourceContext, SourceSpan};
pub use value::Value;
pub use views::{ProbeDistribution, ViewKind, Views};

/// Classify then normalize a merged set, as expected by [`Views`].
pub fn prepare(set: &RecordSet) -> RecordSet {
    normalize(&classify_set(set))
}

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

//! # BenchFold
//!
//! Turns the result files of hash-table benchmark runs into analysis-ready
//! tables. Sources are merged, each record is classified into an experiment
//! kind, function and table, the differing schema generations are
//! normalized, and views aggregate the records and derive throughput,
//! collision and time-gain metrics.
//!
//! ## Quick Start
//!
//! ```rust
//! use benchfold::{json, pipeline, OrderingConfig, ViewKind, Views};
//!
//! let doc = r#"{"benchmarks": [{
//!     "label": "probe_rmi_hash_1000:chained",
//!     "dataset_name": "wiki",
//!     "load_factor_%": 50,
//!     "probe_elem_count": 1000000,
//!     "tot_time_probe_s": 0.5
//! }]}"#;
//! let source = json::from_json(doc, "run.json", &json::FromJsonConfig::default()).unwrap();
//!
//! let set = pipeline(&[source]);
//! let ordering = OrderingConfig::standard();
//! let table = Views::new(&set, &ordering).run("probe".parse::<ViewKind>().unwrap()).unwrap();
//! assert_eq!(table.len(), 1);
//! assert_eq!(table.rows[0].derived("throughput_M"), Some(&Ok(2.0)));
//! ```
//!
//! ## Modules
//!
//! - [`json`]: JSON result files, merged output and table serialization
//! - `csv`: CSV result files and table output (feature = "csv", on by default)
//! - [`views`]: the per-figure views
//! - [`metrics`]: derived metric formulas

pub use benchfold_core::{
    aggregate, aggregate_with, classify, classify_set, merge, normalize, prepare, table_label,
    AggregatedRow, BenchError, BenchErrorKind, BenchResult, Category, Classification, Dimension,
    ExperimentKind, FunctionId, GroupSpec, MetricError, OrderingConfig, ProbeDistribution, Record,
    RecordSet, RecordSource, RunContext, SchemaGeneration, SourceContext, SourceSpan,
    StructureKind, Table, TableKind, Value, ViewKind, Views,
};

pub use benchfold_core::{fields, metrics, ordering, views};

mod error_ext;
pub use error_ext::BenchResultExt;

pub mod json {
    //! JSON result files
    pub use benchfold_json::{
        from_json, from_json_value, gaps_to_json, json_to_value, table_to_json,
        table_to_json_value, to_merged_json, value_to_json, FromJsonConfig, FromJsonConfigBuilder,
        JsonSourceError,
    };
}

/// CSV result files and table output (requires `csv` feature)
#[cfg(feature = "csv")]
pub mod csv {
    pub use benchfold_csv::{
        from_csv, from_csv_reader, gaps_to_csv, parse_csv_value, table_to_csv,
        table_to_csv_with_config, CsvError, FromCsvConfig, ToCsvConfig,
    };
}

use std::path::Path;

/// Merge sources in order, then classify and normalize the result.
///
/// # Examples
///
/// ```rust
/// use benchfold::{pipeline, Record, RecordSource, Value};
///
/// let record: Record = [("label", Value::from("probe_murmur:linear"))].into_iter().collect();
/// let set = pipeline(&[RecordSource::new("a.json", vec![record])]);
/// assert_eq!(set.records[0].text("function_id"), Some("Murmur"));
/// ```
pub fn pipeline(sources: &[RecordSource]) -> RecordSet {
    prepare(&merge(sources))
}

/// Read one result file, choosing the reader by extension.
///
/// The path string becomes the source identity.
///
/// # Errors
///
/// Returns an `Io` error if the file cannot be read, `InvalidInput` for an
/// unsupported extension and `MalformedSource` if the content does not parse.
pub fn load(path: impl AsRef<Path>) -> BenchResult<RecordSource> {
    let path = path.as_ref();
    let identity = path.to_string_lossy().into_owned();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("json") => {
            let content = std::fs::read_to_string(path).origin(&identity)?;
            Ok(benchfold_json::from_json(
                &content,
                &identity,
                &benchfold_json::FromJsonConfig::default(),
            )
            .origin(&identity)?)
        }
        #[cfg(feature = "csv")]
        Some("csv") => {
            let content = std::fs::read_to_string(path).origin(&identity)?;
            Ok(
                benchfold_csv::from_csv(&content, &identity, &benchfold_csv::FromCsvConfig::default())
                    .origin(&identity)?,
            )
        }
        _ => Err(BenchError::invalid_input(format!(
            "unsupported result file '{}'",
            identity
        ))
        .with_origin(identity)),
    }
}

/// Load several files and run them through [`pipeline`].
pub fn load_all<P: AsRef<Path>>(paths: &[P]) -> BenchResult<RecordSet> {
    let sources = paths.iter().map(load).collect::<BenchResult<Vec<_>>>()?;
    Ok(pipeline(&sources))
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    fn probe_record(label: &str, secs: f64) -> Record {
        [
            ("label", Value::from(label)),
            ("dataset_name", Value::from("wiki")),
            ("load_factor_%", Value::Int(50)),
            ("probe_elem_count", Value::Int(1_000_000)),
            ("tot_time_probe_s", Value::Float(secs)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_pipeline_classifies_and_normalizes() {
        let set = pipeline(&[RecordSource::new(
            "a.json",
            vec![probe_record("probe_rmi_hash_1000:chained", 0.5)],
        )]);
        let record = &set.records[0];
        assert_eq!(record.text("function_id"), Some("RMI"));
        assert_eq!(record.text("table_kind"), Some("chained"));
        assert_eq!(record.number("load_factor"), Some(0.5));
    }

    #[test]
    fn test_load_unsupported_extension() {
        let err = load("results.yaml").unwrap_err();
        assert_eq!(err.kind, BenchErrorKind::InvalidInput);
    }

    #[test]
    fn test_load_missing_file_is_io() {
        let err = load("does/not/exist.json").unwrap_err();
        assert_eq!(err.kind, BenchErrorKind::Io);
        assert_eq!(err.origin.as_deref(), Some("does/not/exist.json"));
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}

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

//! CSV result file parsing.

use crate::error::{CsvError, Result};
use benchfold_core::{Record, RecordSource, Value};
use std::collections::{BTreeMap, HashSet};
use std::io::Read;
use tracing::debug;

/// Default maximum number of rows (1,000,000).
pub const DEFAULT_MAX_ROWS: usize = 1_000_000;

/// Configuration for parsing CSV result files.
///
/// # Examples
///
/// ```
/// use benchfold_csv::FromCsvConfig;
///
/// let tsv = FromCsvConfig {
///     delimiter: b'\t',
///     ..Default::default()
/// };
/// assert!(tsv.trim);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FromCsvConfig {
    /// Field delimiter character (default: `,`).
    pub delimiter: u8,

    /// Whether to trim leading/trailing whitespace from fields (default: `true`).
    pub trim: bool,

    /// Maximum number of data rows (default: 1,000,000).
    ///
    /// Parsing stops with [`CsvError::SecurityLimit`] past this count.
    pub max_rows: usize,
}

impl Default for FromCsvConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
            max_rows: DEFAULT_MAX_ROWS,
        }
    }
}

/// Parse a CSV result file with a header row into a [`RecordSource`].
///
/// Each data row becomes one record keyed by the header names. Cell values
/// are inferred: empty or `~` is null, then `true`/`false`, `NaN` and
/// `Infinity`, integers, floats and finally text.
///
/// # Examples
///
/// ```
/// use benchfold_core::Value;
/// use benchfold_csv::{from_csv, FromCsvConfig};
///
/// let csv = "function,table,cycles\nrmi,chain,1000\n";
/// let source = from_csv(csv, "perf.csv", &FromCsvConfig::default()).unwrap();
/// let records = source.records.unwrap();
/// assert_eq!(records[0].get("cycles"), Some(&Value::Int(1000)));
/// ```
pub fn from_csv(csv: &str, identity: &str, config: &FromCsvConfig) -> Result<RecordSource> {
    from_csv_reader(csv.as_bytes(), identity, config)
}

/// Parse CSV from any reader. See [`from_csv`].
pub fn from_csv_reader<R: Read>(
    reader: R,
    identity: &str,
    config: &FromCsvConfig,
) -> Result<RecordSource> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .trim(if config.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        })
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(parse_error)?
        .iter()
        .map(str::to_string)
        .collect();
    validate_headers(&headers)?;

    let mut records = Vec::new();
    for (row_idx, result) in csv_reader.records().enumerate() {
        if row_idx >= config.max_rows {
            return Err(CsvError::SecurityLimit {
                limit: config.max_rows,
                actual: row_idx + 1,
            });
        }
        let row = result.map_err(parse_error)?;
        let fields: BTreeMap<String, Value> = headers
            .iter()
            .zip(row.iter())
            .map(|(name, cell)| (name.clone(), parse_csv_value(cell)))
            .collect();
        records.push(Record::from(fields));
    }

    debug!(source = identity, records = records.len(), "parsed CSV source");
    Ok(RecordSource::new(identity, records))
}

fn validate_headers(headers: &[String]) -> Result<()> {
    let mut seen = HashSet::with_capacity(headers.len());
    for (position, name) in headers.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(CsvError::EmptyHeader { position });
        }
        if !seen.insert(name.as_str()) {
            return Err(CsvError::DuplicateHeader {
                position,
                name: name.clone(),
            });
        }
    }
    Ok(())
}

fn parse_error(err: csv::Error) -> CsvError {
    match err.position() {
        Some(position) => CsvError::ParseError {
            line: position.line() as usize,
            message: err.to_string(),
        },
        None => CsvError::CsvLib(err),
    }
}

/// Infer a field value from one CSV cell.
pub fn parse_csv_value(field: &str) -> Value {
    let trimmed = field.trim();

    if trimmed.is_empty() || trimmed == "~" {
        return Value::Null;
    }

    if trimmed == "true" {
        return Value::Bool(true);
    }
    if trimmed == "false" {
        return Value::Bool(false);
    }

    match trimmed {
        "NaN" => return Value::Float(f64::NAN),
        "Infinity" => return Value::Float(f64::INFINITY),
        "-Infinity" => return Value::Float(f64::NEG_INFINITY),
        _ => {}
    }

    if let Ok(n) = trimmed.parse::<i64>() {
        return Value::Int(n);
    }

    // Rust's float parser also accepts "inf" and "nan"; those stay text.
    if trimmed.bytes().any(|b| b.is_ascii_digit()) {
        if let Ok(f) = trimmed.parse::<f64>() {
            return Value::Float(f);
        }
    }

    Value::String(field.to_string())
}

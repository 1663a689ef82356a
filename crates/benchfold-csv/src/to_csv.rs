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

//! CSV output of view tables.

use crate::error::{CsvError, Result};
use benchfold_core::views::GapSeries;
use benchfold_core::{Table, Value};

/// Configuration for CSV output.
#[derive(Debug, Clone)]
pub struct ToCsvConfig {
    /// Field delimiter character (default: `,`).
    pub delimiter: u8,

    /// Whether to write a header row (default: `true`).
    pub include_headers: bool,

    /// Quote style (default: only when necessary).
    pub quote_style: csv::QuoteStyle,
}

impl Default for ToCsvConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            include_headers: true,
            quote_style: csv::QuoteStyle::Necessary,
        }
    }
}

/// Write a view table as CSV with default settings.
///
/// Columns are the group keys, then `count`, then measures, then derived
/// metrics. Missing measures and undefined metrics are empty cells.
///
/// # Examples
///
/// ```
/// use benchfold_core::{aggregate, Record, Value};
/// use benchfold_csv::table_to_csv;
///
/// let records: Vec<Record> = vec![[("k", Value::from("a")), ("t", Value::Int(2))]
///     .into_iter()
///     .collect()];
/// let table = aggregate(&records, &["k"], &["t"]).unwrap();
/// assert_eq!(table_to_csv(&table).unwrap(), "k,count,t\na,1,2\n");
/// ```
pub fn table_to_csv(table: &Table) -> Result<String> {
    table_to_csv_with_config(table, &ToCsvConfig::default())
}

/// Write a view table as CSV.
pub fn table_to_csv_with_config(table: &Table, config: &ToCsvConfig) -> Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .quote_style(config.quote_style)
        .from_writer(Vec::new());

    if config.include_headers {
        let mut header: Vec<&str> = table.group_keys.iter().map(String::as_str).collect();
        header.push("count");
        header.extend(table.measures.iter().map(String::as_str));
        header.extend(table.derived.iter().map(String::as_str));
        wtr.write_record(&header)
            .map_err(|e| CsvError::Other(format!("Failed to write CSV header: {}", e)))?;
    }

    for (index, row) in table.iter().enumerate() {
        let mut record: Vec<String> = row.keys.iter().map(|(_, v)| value_to_csv_string(v)).collect();
        record.push(row.count.to_string());
        record.extend(
            row.measures
                .iter()
                .map(|(_, mean)| mean.map(format_float).unwrap_or_default()),
        );
        record.extend(row.derived.iter().map(|(_, cell)| match cell {
            Ok(v) => format_float(*v),
            Err(_) => String::new(),
        }));
        wtr.write_record(&record).map_err(|e| {
            CsvError::Other(format!("Failed to write CSV record {}: {}", index, e))
        })?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| CsvError::Other(format!("Failed to flush CSV writer: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| CsvError::Other(format!("Invalid UTF-8 in CSV output: {}", e)))
}

/// Write gap histograms as CSV: one row per dataset, one column per gap.
pub fn gaps_to_csv(series: &[GapSeries]) -> Result<String> {
    let width = series.iter().map(|s| s.counts.len()).max().unwrap_or(0);
    let mut wtr = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["dataset".to_string()];
    header.extend((0..width).map(|gap| format!("gap_{}", gap)));
    wtr.write_record(&header)?;

    for s in series {
        let mut record = vec![s.dataset.clone()];
        record.extend(s.counts.iter().map(value_to_csv_string));
        record.resize(width + 1, String::new());
        wtr.write_record(&record)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| CsvError::Other(format!("Failed to flush CSV writer: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| CsvError::Other(format!("Invalid UTF-8 in CSV output: {}", e)))
}

/// Render a field value as a CSV cell. Null is an empty cell.
pub fn value_to_csv_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Float(f) => format_float(*f),
        other => other.to_string(),
    }
}

fn format_float(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f == f64::INFINITY {
        "Infinity".to_string()
    } else if f == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        f.to_string()
    }
}

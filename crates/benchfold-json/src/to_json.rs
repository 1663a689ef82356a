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

//! JSON output: merged sources and view tables.

use crate::from_json::{JsonSourceError, CONTEXT_KEY, RECORDS_KEY};
use benchfold_core::views::GapSeries;
use benchfold_core::{RecordSet, Table, Value};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{json, Map, Number, Value as JsonValue};

/// Indentation of written files, matching the benchmark drivers.
const INDENT: &[u8] = b"    ";

/// Serialize a merged set as a result file with one context per source.
///
/// The output reads back with [`crate::from_json`] and merges again without
/// losing the per-source contexts.
///
/// # Examples
///
/// ```
/// use benchfold_core::{merge, RecordSource};
/// use benchfold_json::to_merged_json;
///
/// let set = merge(&[RecordSource::new("a.json", Vec::new())]);
/// let json = to_merged_json(&set).unwrap();
/// assert!(json.contains("\"file_name\": \"a.json\""));
/// ```
pub fn to_merged_json(set: &RecordSet) -> Result<String, JsonSourceError> {
    let contexts: Vec<JsonValue> = set
        .contexts
        .iter()
        .map(|context| map_to_json(context.to_map().iter()))
        .collect();
    let records: Vec<JsonValue> = set.records.iter().map(|r| map_to_json(r.iter())).collect();

    let mut root = Map::new();
    root.insert(CONTEXT_KEY.to_string(), JsonValue::Array(contexts));
    root.insert(RECORDS_KEY.to_string(), JsonValue::Array(records));
    to_pretty_string(&JsonValue::Object(root))
}

/// Serialize a view table.
///
/// Rows carry their group keys under `key`, the number of aggregated
/// records, the measure means and the derived metrics. An undefined derived
/// metric is written as `{"error": "..."}`.
pub fn table_to_json(table: &Table) -> Result<String, JsonSourceError> {
    to_pretty_string(&table_to_json_value(table))
}

/// [`table_to_json`] as a JSON value.
pub fn table_to_json_value(table: &Table) -> JsonValue {
    let rows: Vec<JsonValue> = table
        .iter()
        .map(|row| {
            let keys = map_to_json(row.keys.iter().map(|(k, v)| (k.as_str(), v)));
            let measures: Map<String, JsonValue> = row
                .measures
                .iter()
                .map(|(name, mean)| (name.clone(), float_to_json(*mean)))
                .collect();
            let derived: Map<String, JsonValue> = row
                .derived
                .iter()
                .map(|(name, cell)| {
                    let value = match cell {
                        Ok(v) => float_to_json(Some(*v)),
                        Err(e) => json!({ "error": e.to_string() }),
                    };
                    (name.clone(), value)
                })
                .collect();
            json!({
                "key": keys,
                "count": row.count,
                "measures": measures,
                "derived": derived,
            })
        })
        .collect();

    json!({
        "group_keys": table.group_keys,
        "measures": table.measures,
        "derived": table.derived,
        "rows": rows,
    })
}

/// Serialize gap histograms as a list of `{"dataset", "counts"}` objects.
pub fn gaps_to_json(series: &[GapSeries]) -> Result<String, JsonSourceError> {
    let items: Vec<JsonValue> = series
        .iter()
        .map(|s| {
            json!({
                "dataset": s.dataset,
                "counts": s.counts.iter().map(value_to_json).collect::<Vec<_>>(),
            })
        })
        .collect();
    to_pretty_string(&JsonValue::Array(items))
}

/// Convert a record field value into JSON. Non-finite floats become null.
pub fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Int(n) => JsonValue::Number(Number::from(*n)),
        Value::Float(f) => float_to_json(Some(*f)),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::List(items) => JsonValue::Array(items.iter().map(value_to_json).collect()),
        Value::Map(map) => map_to_json(map.iter().map(|(k, v)| (k.as_str(), v))),
    }
}

fn float_to_json(value: Option<f64>) -> JsonValue {
    value
        .and_then(Number::from_f64)
        .map(JsonValue::Number)
        .unwrap_or(JsonValue::Null)
}

fn map_to_json<'a, K, I>(entries: I) -> JsonValue
where
    K: AsRef<str> + 'a,
    I: Iterator<Item = (K, &'a Value)>,
{
    let object: Map<String, JsonValue> = entries
        .map(|(k, v)| (k.as_ref().to_string(), value_to_json(v)))
        .collect();
    JsonValue::Object(object)
}

fn to_pretty_string(value: &JsonValue) -> Result<String, JsonSourceError> {
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut serializer)?;
    String::from_utf8(out).map_err(|e| JsonSourceError::Parse(e.to_string()))
}

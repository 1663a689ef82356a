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

//! JSON result file parsing.

use benchfold_core::{BenchError, Record, RecordSource, SourceContext, Value};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Key of the record list in current result files.
pub const RECORDS_KEY: &str = "benchmarks";

/// Key of the record list in result files that predate [`RECORDS_KEY`].
pub const LEGACY_RECORDS_KEY: &str = "data";

/// Key of the run-context block.
pub const CONTEXT_KEY: &str = "context";

/// Default maximum number of records per source (10,000,000).
pub const DEFAULT_MAX_RECORDS: usize = 10_000_000;

/// Errors that can occur while reading a JSON result file.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum JsonSourceError {
    /// JSON parsing failed
    #[error("JSON parse error: {0}")]
    Parse(String),

    /// Root value must be an object
    #[error("Root must be a JSON object, found {0}")]
    InvalidRoot(String),

    /// Record list is not an array
    #[error("Record list '{key}' must be an array, found {found}")]
    InvalidRecordList { key: String, found: String },

    /// Record list entry is not an object
    #[error("Record {index} must be a JSON object, found {found}")]
    InvalidRecord { index: usize, found: String },

    /// Context is neither an object nor a list of objects
    #[error("Context must be an object or a list of objects, found {0}")]
    InvalidContext(String),

    /// Record limit exceeded
    #[error("Maximum record count ({0}) exceeded - source has {1} records")]
    TooManyRecords(usize, usize),

    /// I/O failure reading or writing a file
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for JsonSourceError {
    fn from(err: serde_json::Error) -> Self {
        JsonSourceError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for JsonSourceError {
    fn from(err: std::io::Error) -> Self {
        JsonSourceError::Io(err.to_string())
    }
}

impl From<JsonSourceError> for BenchError {
    fn from(err: JsonSourceError) -> Self {
        match err {
            JsonSourceError::Io(message) => BenchError::io(message),
            other => BenchError::malformed_source(other.to_string()),
        }
    }
}

/// Configuration for JSON import.
///
/// # Examples
///
/// ```
/// use benchfold_json::FromJsonConfig;
///
/// let config = FromJsonConfig::builder()
///     .max_records(1_000)
///     .flatten_nested(false)
///     .build();
/// assert_eq!(config.max_records, Some(1_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FromJsonConfig {
    /// Maximum number of records (default: 10,000,000).
    ///
    /// Set to `None` to disable.
    pub max_records: Option<usize>,

    /// Flatten nested record objects into dotted keys (default: true).
    ///
    /// When disabled, nested objects are kept as [`Value::Map`].
    pub flatten_nested: bool,
}

impl Default for FromJsonConfig {
    fn default() -> Self {
        Self {
            max_records: Some(DEFAULT_MAX_RECORDS),
            flatten_nested: true,
        }
    }
}

impl FromJsonConfig {
    /// Create a new builder for configuring JSON import
    pub fn builder() -> FromJsonConfigBuilder {
        FromJsonConfigBuilder::default()
    }
}

/// Builder for [`FromJsonConfig`].
#[derive(Debug, Clone, Default)]
pub struct FromJsonConfigBuilder {
    config: FromJsonConfig,
}

impl FromJsonConfigBuilder {
    /// Set the maximum number of records
    pub fn max_records(mut self, limit: usize) -> Self {
        self.config.max_records = Some(limit);
        self
    }

    /// Remove the record limit
    pub fn unlimited(mut self) -> Self {
        self.config.max_records = None;
        self
    }

    /// Enable or disable flattening of nested record objects
    pub fn flatten_nested(mut self, flatten: bool) -> Self {
        self.config.flatten_nested = flatten;
        self
    }

    /// Build the configuration
    pub fn build(self) -> FromJsonConfig {
        self.config
    }
}

/// Parse a JSON result file into a [`RecordSource`].
///
/// The record list is read from `benchmarks`, or from `data` when
/// `benchmarks` is absent. A file with neither has no record list. The
/// context block may be an object (one run) or a list of objects (a
/// previously merged file).
///
/// # Examples
///
/// ```
/// use benchfold_json::{from_json, FromJsonConfig};
///
/// let json = r#"{"benchmarks": [{"label": "probe_murmur:linear", "tot_time_probe_s": 0.5}]}"#;
/// let source = from_json(json, "run.json", &FromJsonConfig::default()).unwrap();
/// assert_eq!(source.record_count(), 1);
/// ```
///
/// # Errors
///
/// Fails on invalid JSON, a non-object root, a record list that is not an
/// array of objects, a malformed context or too many records.
pub fn from_json(
    json: &str,
    identity: &str,
    config: &FromJsonConfig,
) -> Result<RecordSource, JsonSourceError> {
    let value: JsonValue = serde_json::from_str(json)?;
    from_json_value(&value, identity, config)
}

/// Convert an already parsed JSON value into a [`RecordSource`].
pub fn from_json_value(
    value: &JsonValue,
    identity: &str,
    config: &FromJsonConfig,
) -> Result<RecordSource, JsonSourceError> {
    let root = value
        .as_object()
        .ok_or_else(|| JsonSourceError::InvalidRoot(json_type_name(value).to_string()))?;

    let records = match record_list(root) {
        Some((key, list)) => Some(parse_records(key, list, config)?),
        None => None,
    };
    let context = parse_context(root.get(CONTEXT_KEY))?;

    debug!(
        source = identity,
        records = records.as_ref().map_or(0, Vec::len),
        "parsed JSON source"
    );

    let mut source = RecordSource::new(identity, Vec::new()).with_context(context);
    source.records = records;
    Ok(source)
}

fn record_list(root: &Map<String, JsonValue>) -> Option<(&'static str, &JsonValue)> {
    [RECORDS_KEY, LEGACY_RECORDS_KEY]
        .into_iter()
        .find_map(|key| root.get(key).filter(|v| !v.is_null()).map(|list| (key, list)))
}

fn parse_records(
    key: &str,
    list: &JsonValue,
    config: &FromJsonConfig,
) -> Result<Vec<Record>, JsonSourceError> {
    let items = list
        .as_array()
        .ok_or_else(|| JsonSourceError::InvalidRecordList {
            key: key.to_string(),
            found: json_type_name(list).to_string(),
        })?;

    if let Some(limit) = config.max_records {
        if items.len() > limit {
            return Err(JsonSourceError::TooManyRecords(limit, items.len()));
        }
    }

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let object = item.as_object().ok_or_else(|| JsonSourceError::InvalidRecord {
            index,
            found: json_type_name(item).to_string(),
        })?;
        let mut fields = BTreeMap::new();
        for (name, value) in object {
            if config.flatten_nested {
                flatten_into(&mut fields, name.clone(), value);
            } else {
                fields.insert(name.clone(), json_to_value(value));
            }
        }
        records.push(Record::from(fields));
    }
    Ok(records)
}

fn flatten_into(fields: &mut BTreeMap<String, Value>, prefix: String, value: &JsonValue) {
    match value {
        JsonValue::Object(object) => {
            for (name, nested) in object {
                flatten_into(fields, format!("{}.{}", prefix, name), nested);
            }
        }
        other => {
            fields.insert(prefix, json_to_value(other));
        }
    }
}

fn parse_context(value: Option<&JsonValue>) -> Result<SourceContext, JsonSourceError> {
    match value {
        None | Some(JsonValue::Null) => Ok(SourceContext::Absent),
        Some(JsonValue::Object(object)) => Ok(SourceContext::Single(object_to_map(object))),
        Some(JsonValue::Array(items)) => items
            .iter()
            .map(|item| match item {
                JsonValue::Object(object) => Ok(object_to_map(object)),
                other => Err(JsonSourceError::InvalidContext(format!(
                    "list containing {}",
                    json_type_name(other)
                ))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(SourceContext::Merged),
        Some(other) => Err(JsonSourceError::InvalidContext(
            json_type_name(other).to_string(),
        )),
    }
}

fn object_to_map(object: &Map<String, JsonValue>) -> BTreeMap<String, Value> {
    object
        .iter()
        .map(|(name, value)| (name.clone(), json_to_value(value)))
        .collect()
}

/// Convert a JSON value into a record field value.
pub fn json_to_value(value: &JsonValue) -> Value {
    match value {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::Null
            }
        }
        JsonValue::String(s) => Value::String(s.clone()),
        JsonValue::Array(items) => Value::List(items.iter().map(json_to_value).collect()),
        JsonValue::Object(object) => Value::Map(object_to_map(object)),
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<RecordSource, JsonSourceError> {
        from_json(json, "test.json", &FromJsonConfig::default())
    }

    // ==================== Record list tests ====================

    #[test]
    fn test_benchmarks_key() {
        let source = parse(r#"{"benchmarks": [{"label": "a", "n": 3, "t": 0.5}]}"#).unwrap();
        let records = source.records.unwrap();
        assert_eq!(records[0].get("n"), Some(&Value::Int(3)));
        assert_eq!(records[0].get("t"), Some(&Value::Float(0.5)));
        assert_eq!(source.context, SourceContext::Absent);
    }

    #[test]
    fn test_legacy_data_key() {
        let source = parse(r#"{"data": [{"label": "a"}, {"label": "b"}]}"#).unwrap();
        assert_eq!(source.record_count(), 2);
    }

    #[test]
    fn test_benchmarks_key_wins_over_data() {
        let source = parse(r#"{"benchmarks": [], "data": [{"label": "a"}]}"#).unwrap();
        assert_eq!(source.records, Some(Vec::new()));
    }

    #[test]
    fn test_absent_record_list() {
        let source = parse(r#"{"context": {"host_name": "x"}}"#).unwrap();
        assert_eq!(source.records, None);
    }

    #[test]
    fn test_null_record_list_reads_as_absent() {
        let source = parse(r#"{"benchmarks": null}"#).unwrap();
        assert_eq!(source.records, None);
        assert_eq!(source.record_count(), 0);

        let source = parse(r#"{"benchmarks": null, "data": [{"label": "a"}]}"#).unwrap();
        assert_eq!(source.record_count(), 1);
    }

    #[test]
    fn test_record_limit() {
        let config = FromJsonConfig::builder().max_records(1).build();
        let err = from_json(r#"{"benchmarks": [{}, {}]}"#, "x", &config).unwrap_err();
        assert_eq!(err, JsonSourceError::TooManyRecords(1, 2));
    }

    // ==================== Flattening tests ====================

    #[test]
    fn test_nested_objects_flatten() {
        let source = parse(r#"{"benchmarks": [{"a": {"b": 1, "c": {"d": true}}}]}"#).unwrap();
        let records = source.records.unwrap();
        assert_eq!(records[0].get("a.b"), Some(&Value::Int(1)));
        assert_eq!(records[0].get("a.c.d"), Some(&Value::Bool(true)));
        assert_eq!(records[0].get("a"), None);
    }

    #[test]
    fn test_nested_objects_kept_when_disabled() {
        let config = FromJsonConfig::builder().flatten_nested(false).build();
        let source = from_json(r#"{"benchmarks": [{"a": {"b": 1}}]}"#, "x", &config).unwrap();
        let records = source.records.unwrap();
        assert!(matches!(records[0].get("a"), Some(Value::Map(_))));
    }

    #[test]
    fn test_arrays_become_lists() {
        let source = parse(r#"{"benchmarks": [{"count": [1, 2.5, null]}]}"#).unwrap();
        let records = source.records.unwrap();
        assert_eq!(
            records[0].get("count"),
            Some(&Value::List(vec![Value::Int(1), Value::Float(2.5), Value::Null]))
        );
    }

    // ==================== Context tests ====================

    #[test]
    fn test_single_context() {
        let source = parse(r#"{"context": {"num_cpus": 8}, "benchmarks": []}"#).unwrap();
        match source.context {
            SourceContext::Single(map) => assert_eq!(map.get("num_cpus"), Some(&Value::Int(8))),
            other => panic!("expected single context, got {:?}", other),
        }
    }

    #[test]
    fn test_merged_context() {
        let source = parse(r#"{"context": [{"file_name": "a"}, {"file_name": "b"}]}"#).unwrap();
        match source.context {
            SourceContext::Merged(maps) => assert_eq!(maps.len(), 2),
            other => panic!("expected merged context, got {:?}", other),
        }
    }

    // ==================== Error tests ====================

    #[test]
    fn test_invalid_root() {
        assert_eq!(
            parse("[1]").unwrap_err(),
            JsonSourceError::InvalidRoot("array".to_string())
        );
    }

    #[test]
    fn test_invalid_record_list() {
        assert!(matches!(
            parse(r#"{"benchmarks": {"a": 1}}"#),
            Err(JsonSourceError::InvalidRecordList { .. })
        ));
    }

    #[test]
    fn test_invalid_record() {
        assert!(matches!(
            parse(r#"{"benchmarks": [{}, 3]}"#),
            Err(JsonSourceError::InvalidRecord { index: 1, .. })
        ));
    }

    #[test]
    fn test_invalid_context() {
        assert!(matches!(
            parse(r#"{"context": [1]}"#),
            Err(JsonSourceError::InvalidContext(_))
        ));
    }

    #[test]
    fn test_parse_error_maps_to_malformed_source() {
        let err: BenchError = parse("{").unwrap_err().into();
        assert_eq!(err.kind, benchfold_core::BenchErrorKind::MalformedSource);
    }
}

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

//! Records, run contexts and record sets.

use crate::fields;
use crate::value::Value;
use std::collections::BTreeMap;
use std::ops::Range;

/// One measured benchmark invocation.
///
/// Records are immutable once read. Transformations such as
/// [`Record::with_field`] return a new record and leave the original intact.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw field lookup. Returns `Some(Value::Null)` for explicit nulls.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns true if the field is present and not null.
    pub fn has(&self, name: &str) -> bool {
        self.get(name).map_or(false, |v| !v.is_null())
    }

    /// Numeric field value; missing, null or non-numeric reads as `None`.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_float)
    }

    /// String field value.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// The free-text label, if present.
    pub fn label(&self) -> Option<&str> {
        self.text(fields::LABEL)
    }

    /// The benchmark function name, if present.
    pub fn function_name(&self) -> Option<&str> {
        self.text(fields::FUNCTION_NAME)
    }

    /// Return a new record with one field set.
    pub fn with_field(&self, name: impl Into<String>, value: impl Into<Value>) -> Record {
        let mut fields = self.fields.clone();
        fields.insert(name.into(), value.into());
        Record { fields }
    }

    /// Return a new record with several fields set.
    pub fn with_fields<I, K>(&self, extra: I) -> Record
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut fields = self.fields.clone();
        for (name, value) in extra {
            fields.insert(name.into(), value);
        }
        Record { fields }
    }

    /// Iterate over fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Field names in name order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }
}

impl From<BTreeMap<String, Value>> for Record {
    fn from(fields: BTreeMap<String, Value>) -> Self {
        Record { fields }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Record {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Per-source provenance metadata.
///
/// Never used as numeric input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunContext {
    /// Identity of the source file the records came from.
    pub file_name: String,
    /// Remaining context entries as found in the source.
    pub metadata: BTreeMap<String, Value>,
}

impl RunContext {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Context entries plus the `file_name` tag, as written to a merged source.
    pub fn to_map(&self) -> BTreeMap<String, Value> {
        let mut map = self.metadata.clone();
        map.insert(
            fields::FILE_NAME.to_string(),
            Value::String(self.file_name.clone()),
        );
        map
    }
}

/// The context block of a parsed source.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SourceContext {
    /// No context block.
    #[default]
    Absent,
    /// A single context object (one benchmark run).
    Single(BTreeMap<String, Value>),
    /// A list of contexts (a previously merged source).
    Merged(Vec<BTreeMap<String, Value>>),
}

/// One parsed input file, before merging.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSource {
    /// Source identity, usually the path it was read from.
    pub identity: String,
    /// Records, or `None` when the source has no record list at all.
    pub records: Option<Vec<Record>>,
    /// Run-context block.
    pub context: SourceContext,
}

impl RecordSource {
    pub fn new(identity: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            identity: identity.into(),
            records: Some(records),
            context: SourceContext::Absent,
        }
    }

    pub fn with_context(mut self, context: SourceContext) -> Self {
        self.context = context;
        self
    }

    /// Number of records, zero when the record list is absent.
    pub fn record_count(&self) -> usize {
        self.records.as_ref().map_or(0, Vec::len)
    }
}

/// The contiguous range of a [`RecordSet`] contributed by one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpan {
    pub source: String,
    pub range: Range<usize>,
}

/// Ordered records together with their run contexts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    pub records: Vec<Record>,
    pub contexts: Vec<RunContext>,
    pub spans: Vec<SourceSpan>,
}

impl RecordSet {
    /// Build a set from records of one anonymous source.
    pub fn from_records(source: impl Into<String>, records: Vec<Record>) -> Self {
        let source = source.into();
        let range = 0..records.len();
        Self {
            records,
            contexts: vec![RunContext::new(source.clone())],
            spans: vec![SourceSpan { source, range }],
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Spans covering the record list. A set built by hand without spans is
    /// treated as a single span.
    pub fn effective_spans(&self) -> Vec<SourceSpan> {
        if self.spans.is_empty() && !self.records.is_empty() {
            vec![SourceSpan {
                source: String::new(),
                range: 0..self.records.len(),
            }]
        } else {
            self.spans.clone()
        }
    }

    /// Return a new set with every record mapped; contexts and spans carry over.
    pub fn map_records<F>(&self, f: F) -> RecordSet
    where
        F: FnMut(&Record) -> Record,
    {
        RecordSet {
            records: self.records.iter().map(f).collect(),
            contexts: self.contexts.clone(),
            spans: self.spans.clone(),
        }
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe_record() -> Record {
        Record::from_iter([
            ("label", Value::from("probe_rmi_hash_1000:chained")),
            ("tot_time_probe_s", Value::Float(0.5)),
            ("insert_fail_message", Value::Null),
        ])
    }

    // ==================== Record tests ====================

    #[test]
    fn test_record_accessors() {
        let r = probe_record();
        assert_eq!(r.label(), Some("probe_rmi_hash_1000:chained"));
        assert_eq!(r.number("tot_time_probe_s"), Some(0.5));
        assert_eq!(r.number("label"), None);
        assert!(r.get("insert_fail_message").is_some());
        assert!(!r.has("insert_fail_message"));
    }

    #[test]
    fn test_with_field_leaves_original() {
        let r = probe_record();
        let derived = r.with_field("dataset_name", "wiki");
        assert_eq!(derived.text("dataset_name"), Some("wiki"));
        assert!(r.get("dataset_name").is_none());
        assert_eq!(derived.len(), r.len() + 1);
    }

    // ==================== RunContext tests ====================

    #[test]
    fn test_context_to_map_tags_file_name() {
        let mut ctx = RunContext::new("a.json");
        ctx.metadata.insert("host".to_string(), Value::from("node-1"));
        let map = ctx.to_map();
        assert_eq!(map.get("file_name"), Some(&Value::from("a.json")));
        assert_eq!(map.get("host"), Some(&Value::from("node-1")));
    }

    // ==================== RecordSet tests ====================

    #[test]
    fn test_effective_spans_without_spans() {
        let set = RecordSet {
            records: vec![probe_record(), probe_record()],
            ..Default::default()
        };
        let spans = set.effective_spans();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].range, 0..2);
    }

    #[test]
    fn test_source_record_count_absent_list() {
        let source = RecordSource {
            identity: "empty.json".to_string(),
            records: None,
            context: SourceContext::Absent,
        };
        assert_eq!(source.record_count(), 0);
    }
}

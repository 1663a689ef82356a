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

//! Merging record sources into one record set.

use crate::fields;
use crate::record::{RecordSet, RecordSource, RunContext, SourceContext, SourceSpan};
use crate::value::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Merge parsed sources into a single [`RecordSet`].
///
/// Records are concatenated in source order and each source's context is
/// tagged with the source identity. A source without a record list
/// contributes nothing and is not an error. Inputs are not modified.
///
/// # Examples
///
/// ```
/// use benchfold_core::{merge, Record, RecordSource, Value};
///
/// let a = RecordSource::new("a.json", vec![Record::from_iter([("label", Value::from("probe"))])]);
/// let b = RecordSource::new("b.json", vec![]);
///
/// let set = merge(&[a, b]);
/// assert_eq!(set.len(), 1);
/// assert_eq!(set.contexts.len(), 2);
/// assert_eq!(set.contexts[1].file_name, "b.json");
/// ```
pub fn merge(sources: &[RecordSource]) -> RecordSet {
    let mut set = RecordSet::default();

    for source in sources {
        let start = set.records.len();
        if let Some(records) = &source.records {
            set.records.extend(records.iter().cloned());
        }
        debug!(
            source = %source.identity,
            records = source.record_count(),
            "merged source"
        );
        set.spans.push(SourceSpan {
            source: source.identity.clone(),
            range: start..set.records.len(),
        });
        set.contexts.extend(tag_contexts(source));
    }

    set
}

fn tag_contexts(source: &RecordSource) -> Vec<RunContext> {
    match &source.context {
        SourceContext::Absent => vec![RunContext::new(source.identity.clone())],
        SourceContext::Single(metadata) => {
            vec![split_file_name(metadata, &source.identity, true)]
        }
        SourceContext::Merged(entries) if entries.is_empty() => {
            vec![RunContext::new(source.identity.clone())]
        }
        SourceContext::Merged(entries) => entries
            .iter()
            .map(|entry| split_file_name(entry, &source.identity, false))
            .collect(),
    }
}

/// Separate the `file_name` tag from the rest of a context entry.
///
/// A single-run context is always retagged with the current source. Entries
/// of an already merged source keep the identity they were tagged with.
fn split_file_name(
    entry: &BTreeMap<String, Value>,
    identity: &str,
    retag: bool,
) -> RunContext {
    let mut metadata = entry.clone();
    let existing = metadata.remove(fields::FILE_NAME);
    let file_name = match existing {
        Some(Value::String(name)) if !retag => name,
        _ => identity.to_string(),
    };
    RunContext {
        file_name,
        metadata,
    }
}

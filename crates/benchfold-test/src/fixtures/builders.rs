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

//! Builder for ad hoc records.

use benchfold_core::{Record, Value};

/// Fluent builder for a single [`Record`].
#[derive(Debug, Default, Clone)]
pub struct RecordBuilder {
    fields: Vec<(String, Value)>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &str, value: Value) -> Self {
        self.fields.push((name.to_string(), value));
        self
    }

    pub fn text(self, name: &str, value: &str) -> Self {
        self.field(name, Value::from(value))
    }

    pub fn int(self, name: &str, value: i64) -> Self {
        self.field(name, Value::Int(value))
    }

    pub fn float(self, name: &str, value: f64) -> Self {
        self.field(name, Value::Float(value))
    }

    pub fn flag(self, name: &str, value: bool) -> Self {
        self.field(name, Value::Bool(value))
    }

    pub fn null(self, name: &str) -> Self {
        self.field(name, Value::Null)
    }

    /// Later fields overwrite earlier ones with the same name.
    pub fn build(self) -> Record {
        self.fields.into_iter().collect()
    }
}

/// A probe run as emitted by the current benchmark driver.
pub fn probe_record(label: &str, dataset: &str, load_factor_percent: i64, seconds: f64) -> Record {
    RecordBuilder::new()
        .text("label", label)
        .text("dataset_name", dataset)
        .int("load_factor_%", load_factor_percent)
        .int("dataset_size", 1_000_000)
        .int("probe_elem_count", 1_000_000)
        .float("tot_time_probe_s", seconds)
        .int("insert_elem_count", 1_000_000)
        .float("tot_time_insert_s", seconds * 2.0)
        .text("insert_fail_message", "")
        .build()
}

/// A collision run at zero load factor.
pub fn collision_record(label: &str, dataset: &str, collisions: i64, seconds: f64) -> Record {
    RecordBuilder::new()
        .text("label", label)
        .text("dataset_name", dataset)
        .int("dataset_size", 1_000_000)
        .int("collisions", collisions)
        .float("tot_time_s", seconds)
        .build()
}

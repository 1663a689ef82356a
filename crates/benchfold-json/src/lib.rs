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

//! BenchFold JSON Conversion
//!
//! Reads benchmark result files into [`RecordSource`]s and writes merged
//! sources and view tables back out.
//!
//! # Features
//!
//! - **Current and legacy shapes**: record lists under `benchmarks` or `data`
//! - **Merged files**: a list-valued `context` keeps one entry per source
//! - **Flattening**: nested record objects become dotted keys
//! - **Limits**: configurable maximum record count
//!
//! # Examples
//!
//! ```rust
//! use benchfold_core::merge;
//! use benchfold_json::{from_json, to_merged_json, FromJsonConfig};
//!
//! let a = from_json(r#"{"benchmarks": [{"label": "gaps"}]}"#, "a.json", &FromJsonConfig::default()).unwrap();
//! let b = from_json(r#"{"data": []}"#, "b.json", &FromJsonConfig::default()).unwrap();
//! let merged = to_merged_json(&merge(&[a, b])).unwrap();
//! assert!(merged.contains("b.json"));
//! ```
//!
//! [`RecordSource`]: benchfold_core::RecordSource

mod from_json;
mod to_json;

pub use from_json::{
    from_json, from_json_value, json_to_value, FromJsonConfig, FromJsonConfigBuilder,
    JsonSourceError, CONTEXT_KEY, DEFAULT_MAX_RECORDS, LEGACY_RECORDS_KEY, RECORDS_KEY,
};
pub use to_json::{gaps_to_json, table_to_json, table_to_json_value, to_merged_json, value_to_json};

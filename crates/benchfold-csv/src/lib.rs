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

//! CSV support for BenchFold.
//!
//! Reads header-row CSV result files (such as hardware-counter dumps) into
//! [`RecordSource`]s with scalar inference, and writes view tables and gap
//! series as CSV.
//!
//! # Examples
//!
//! ```rust
//! use benchfold_csv::{from_csv, FromCsvConfig};
//!
//! let csv = "function,table,dataset,L1-misses\nrmi,chain,fb,100\n";
//! let source = from_csv(csv, "perf.csv", &FromCsvConfig::default()).unwrap();
//! assert_eq!(source.record_count(), 1);
//! ```
//!
//! [`RecordSource`]: benchfold_core::RecordSource

mod error;
mod from_csv;
mod to_csv;

pub use error::{CsvError, Result};
pub use from_csv::{from_csv, from_csv_reader, parse_csv_value, FromCsvConfig, DEFAULT_MAX_ROWS};
pub use to_csv::{gaps_to_csv, table_to_csv, table_to_csv_with_config, value_to_csv_string, ToCsvConfig};

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

//! Shared test fixtures for BenchFold crates.
//!
//! Provides canonical benchmark records, raw result documents in the
//! supported input formats and builders for ad hoc records.
//!
//! # Quick Start
//!
//! ```rust
//! use benchfold_test::fixtures;
//! use benchfold_test::fixtures::builders::RecordBuilder;
//!
//! let source = fixtures::probe_source();
//! assert!(source.record_count() > 0);
//!
//! let record = RecordBuilder::new()
//!     .text("label", "probe_murmur:linear")
//!     .float("tot_time_probe_s", 0.25)
//!     .build();
//! assert_eq!(record.len(), 2);
//! ```

use benchfold_core::RecordSource;

/// Type alias for a list of fixture functions (name, generator).
pub type FixtureList = Vec<(&'static str, fn() -> RecordSource)>;

/// Canonical benchmark fixtures.
pub mod fixtures;

pub use fixtures::*;

/// Total number of records across a slice of sources.
pub fn count_records(sources: &[RecordSource]) -> usize {
    sources.iter().map(RecordSource::record_count).sum()
}

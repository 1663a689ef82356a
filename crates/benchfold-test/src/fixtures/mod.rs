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

//! Canonical benchmark fixtures.
//!
//! - **records**: record sources for each experiment family
//! - **documents**: raw JSON and CSV result files
//! - **errors**: malformed documents
//! - **builders**: fluent construction of single records

pub mod builders;
mod documents;
pub mod errors;
mod records;

pub use documents::*;
pub use records::*;

use crate::FixtureList;

/// Returns all record-source fixtures for iteration.
pub fn all() -> FixtureList {
    vec![
        ("probe", probe_source),
        ("collision", collision_source),
        ("legacy_collision", legacy_collision_source),
        ("build", build_source),
        ("join", join_source),
        ("coroutine", coroutine_source),
        ("gaps", gaps_source),
        ("perf", perf_source),
        ("empty", empty_source),
        ("missing_records", missing_records_source),
    ]
}

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

//! Malformed documents for error-path tests.

/// (name, document) pairs of JSON inputs that must be rejected.
pub fn invalid_json_samples() -> Vec<(&'static str, &'static str)> {
    vec![
        ("syntax", r#"{"benchmarks": [ {"label": "x", } ]}"#),
        ("root_array", r#"[{"label": "x"}]"#),
        ("root_scalar", "42"),
        ("record_list_object", r#"{"benchmarks": {"label": "x"}}"#),
        ("record_not_object", r#"{"benchmarks": [1, 2, 3]}"#),
        ("context_scalar", r#"{"context": "today", "benchmarks": []}"#),
    ]
}

/// (name, document) pairs of CSV inputs that must be rejected.
pub fn invalid_csv_samples() -> Vec<(&'static str, &'static str)> {
    vec![
        ("empty_header", "a,,c\n1,2,3\n"),
        ("duplicate_header", "a,b,a\n1,2,3\n"),
        ("ragged_row", "a,b\n1,2,3\n"),
    ]
}

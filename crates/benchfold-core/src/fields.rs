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

//! Canonical field names.
//!
//! Records are free-form maps; these are the names the pipeline reads and
//! writes after normalization.

// Identity and provenance
pub const LABEL: &str = "label";
pub const FUNCTION_NAME: &str = "function_name";
pub const DATASET_NAME: &str = "dataset_name";
pub const FILE_NAME: &str = "file_name";

// Diagnostics
pub const INSERT_FAIL_MESSAGE: &str = "insert_fail_message";
pub const HAS_FAILED: &str = "has_failed";
pub const PROBE_TYPE: &str = "probe_type";

// Load factor, in both generations
pub const LOAD_FACTOR: &str = "load_factor";
pub const LOAD_FACTOR_PERCENT: &str = "load_factor_%";

// Measures
pub const DATASET_SIZE: &str = "dataset_size";
pub const COLLISIONS: &str = "collisions";
pub const TOT_TIME_S: &str = "tot_time_s";
pub const PROBE_ELEM_COUNT: &str = "probe_elem_count";
pub const TOT_TIME_PROBE_S: &str = "tot_time_probe_s";
pub const INSERT_ELEM_COUNT: &str = "insert_elem_count";
pub const TOT_TIME_INSERT_S: &str = "tot_time_insert_s";
pub const ACTUAL_SIZE: &str = "actual_size";
pub const BUILD_TIME_S: &str = "build_time_s";
pub const RANGE_SIZE: &str = "range_size";
pub const POINT_QUERY_PERCENT: &str = "point_query_%";
pub const JOIN_SIZE: &str = "join_size";
pub const TOT_TIME_SORT_S: &str = "tot_time_sort_s";
pub const TOT_TIME_BUILD_S: &str = "tot_time_build_s";
pub const TOT_TIME_JOIN_S: &str = "tot_time_join_s";
pub const N_CORO: &str = "n_coro";
pub const TOT_FOR_TIME_SEQUENTIAL_S: &str = "tot_for_time_sequential_s";
pub const TOT_FOR_TIME_INTERLEAVED_S: &str = "tot_for_time_interleaved_s";
pub const TOT_SEQUENTIAL_TIME_S: &str = "tot_sequential_time_s";
pub const TOT_INTERLEAVED_TIME_S: &str = "tot_interleaved_time_s";
pub const COUNT: &str = "count";

// Perf-counter exports
pub const FUNCTION: &str = "function";
pub const TABLE: &str = "table";
pub const DATASET: &str = "dataset";
pub const PROBE: &str = "probe";
pub const PHASE: &str = "phase";
pub const SIZES: &str = "sizes";
pub const TABLE_LABEL: &str = "table_label";
pub const PERF_COUNTERS: &[&str] = &[
    "cycles",
    "kcycles",
    "instructions",
    "L1-misses",
    "LLC-misses",
    "branch-misses",
    "task-clock",
    "scale",
    "IPC",
    "CPUs",
    "GHz",
];

// Previous-generation names
pub const DATA_ELEM_COUNT: &str = "data_elem_count";

// Attached by classification
pub const EXPERIMENT_KIND: &str = "experiment_kind";
pub const FUNCTION_ID: &str = "function_id";
pub const TABLE_KIND: &str = "table_kind";
pub const MODEL_COUNT: &str = "model_count";
pub const STRUCTURE_KIND: &str = "structure_kind";

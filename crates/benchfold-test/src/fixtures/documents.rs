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

//! Raw result documents as written by the benchmark drivers.

/// A current-schema JSON result file with a context block.
pub fn probe_json() -> &'static str {
    r#"{
  "context": {
    "date": "2021-06-01T12:00:00+02:00",
    "host_name": "bench-1",
    "num_cpus": 32
  },
  "benchmarks": [
    {
      "name": "BM_probe/probe_rmi_hash_1000:chained",
      "label": "probe_rmi_hash_1000:chained",
      "dataset_name": "wiki",
      "load_factor_%": 50,
      "dataset_size": 1000000,
      "probe_elem_count": 1000000,
      "tot_time_probe_s": 0.5,
      "insert_fail_message": ""
    },
    {
      "name": "BM_probe/probe_murmur:linear",
      "label": "probe_murmur:linear",
      "dataset_name": "wiki",
      "load_factor_%": 50,
      "dataset_size": 1000000,
      "probe_elem_count": 1000000,
      "tot_time_probe_s": 0.25,
      "insert_fail_message": ""
    }
  ]
}"#
}

/// An old JSON result file keyed by `data`, without a context block.
pub fn legacy_json() -> &'static str {
    r#"{
  "data": [
    {"label": "collisions:rmi_hash_10:fb", "dataset_name": "fb", "data_elem_count": 1000, "collisions": 300, "tot_time_s": 0.001},
    {"label": "collisions:murmur:fb", "dataset_name": "fb", "data_elem_count": 1000, "collisions": 370, "tot_time_s": 0.001}
  ]
}"#
}

/// A previously merged file: one context per original source.
pub fn merged_json() -> &'static str {
    r#"{
  "context": [
    {"file_name": "a.json", "host_name": "bench-1"},
    {"file_name": "b.json", "host_name": "bench-2"}
  ],
  "benchmarks": [
    {"label": "gaps", "dataset_name": "wiki", "count": [10, 8, 6, 4, 2, 1, 1, 1]}
  ]
}"#
}

/// A record with a nested object, flattened into dotted keys on read.
pub fn nested_json() -> &'static str {
    r#"{
  "benchmarks": [
    {"label": "build_rmi_hash_100", "params": {"models": 100, "layer": {"kind": "linear"}}, "build_time_s": 0.1}
  ]
}"#
}

/// Hardware counters as written by the perf harness.
pub fn perf_csv() -> &'static str {
    "function,table,dataset,probe,cycles,instructions,L1-misses,LLC-misses,branch-misses,IPC\n\
     rmi,chain,fb,uniform,1000000000,2000000000,1000000,250000,100000,2.0\n\
     mwhc,cuckoo,fb,uniform,1500000000,2500000000,3000000,750000,~,1.66\n\
     rmi,chain,fb,80-20,900000000,2000000000,800000,200000,90000,2.2\n"
}

/// Perf counters of the three join phases.
pub fn perf_join_csv() -> &'static str {
    "function,table,dataset,sizes,phase,L1-misses,LLC-misses\n\
     rmi,chain,fb,25Mx25M,sort,100000,25000\n\
     rmi,chain,fb,25Mx25M,insert,200000,50000\n\
     rmi,chain,fb,25Mx25M,join,300000,75000\n"
}

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

//! Classify command - write derived attributes

use super::{load_merged, write_output};
use crate::error::CliError;
use benchfold_core::prepare;
use benchfold_json::to_merged_json;

/// Classify and normalize the inputs and write them as one merged file.
pub fn classify(inputs: &[String], output: Option<&str>) -> Result<(), CliError> {
    let set = prepare(&load_merged(inputs)?);
    let json = to_merged_json(&set).map_err(|e| CliError::Pipeline(e.to_string()))?;
    write_output(&json, output)
}

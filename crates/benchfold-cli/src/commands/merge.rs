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

//! Merge command - combine result files

use super::{load_merged, write_output};
use crate::error::CliError;
use benchfold_json::to_merged_json;
use tracing::info;

/// Merge result files into one merged-shape JSON document.
///
/// # Examples
///
/// ```no_run
/// use benchfold_cli::commands::merge;
///
/// # fn main() -> Result<(), benchfold_cli::error::CliError> {
/// merge(&["runs/*.json".to_string()], Some("merged.json"))?;
/// # Ok(())
/// # }
/// ```
pub fn merge(inputs: &[String], output: Option<&str>) -> Result<(), CliError> {
    let set = load_merged(inputs)?;
    let json = to_merged_json(&set).map_err(|e| CliError::Pipeline(e.to_string()))?;
    info!(
        sources = set.contexts.len(),
        records = set.len(),
        "merged result files"
    );
    write_output(&json, output)
}

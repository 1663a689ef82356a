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

//! View commands - per-figure tables

use super::{load_merged, write_output, OutputFormat};
use crate::error::CliError;
use benchfold_core::{prepare, OrderingConfig, ViewKind, Views};
use tracing::info;

/// Run one named view over the inputs and write its table.
///
/// # Examples
///
/// ```no_run
/// use benchfold_cli::commands::view;
///
/// # fn main() -> Result<(), benchfold_cli::error::CliError> {
/// view("probe-pareto", &["merged.json".to_string()], "csv", None, false)?;
/// # Ok(())
/// # }
/// ```
pub fn view(
    name: &str,
    inputs: &[String],
    format: &str,
    output: Option<&str>,
    defined_only: bool,
) -> Result<(), CliError> {
    let kind: ViewKind = name.parse()?;
    let format: OutputFormat = format.parse()?;
    let set = prepare(&load_merged(inputs)?);
    let ordering = OrderingConfig::standard();

    let mut table = Views::new(&set, &ordering).run(kind)?;
    if defined_only {
        let derived = table.derived.clone();
        for metric in &derived {
            table = table.drop_undefined(metric);
        }
    }
    info!(view = %kind, rows = table.len(), "built view");

    let content = match format {
        OutputFormat::Json => {
            benchfold_json::table_to_json(&table).map_err(|e| CliError::Pipeline(e.to_string()))?
        }
        OutputFormat::Csv => {
            benchfold_csv::table_to_csv(&table).map_err(|e| CliError::Pipeline(e.to_string()))?
        }
    };
    write_output(&content, output)
}

/// Write the gap histograms of the inputs.
pub fn gaps(inputs: &[String], format: &str, output: Option<&str>) -> Result<(), CliError> {
    let format: OutputFormat = format.parse()?;
    let set = prepare(&load_merged(inputs)?);
    let ordering = OrderingConfig::standard();
    let series = Views::new(&set, &ordering).gaps()?;

    let content = match format {
        OutputFormat::Json => {
            benchfold_json::gaps_to_json(&series).map_err(|e| CliError::Pipeline(e.to_string()))?
        }
        OutputFormat::Csv => {
            benchfold_csv::gaps_to_csv(&series).map_err(|e| CliError::Pipeline(e.to_string()))?
        }
    };
    write_output(&content, output)
}

/// Print every view name, one per line.
pub fn list_views() -> Result<(), CliError> {
    let names: Vec<String> = ViewKind::all().into_iter().map(|k| k.name()).collect();
    write_output(&format!("{}\n", names.join("\n")), None)
}

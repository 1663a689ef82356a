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

//! CLI command implementations

mod classify;
mod inspect;
mod merge;
mod view;

pub use classify::classify;
pub use inspect::inspect;
pub use merge::merge;
pub use view::{gaps, list_views, view};

use crate::error::CliError;
use benchfold_core::{merge as merge_sources, RecordSet, RecordSource};
use benchfold_csv::FromCsvConfig;
use benchfold_json::FromJsonConfig;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

/// Default maximum file size to prevent OOM attacks (1 GB)
/// Can be overridden via BENCHFOLD_MAX_FILE_SIZE environment variable
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

fn get_max_file_size() -> u64 {
    std::env::var("BENCHFOLD_MAX_FILE_SIZE")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Read a file from disk with size validation.
///
/// Files larger than `BENCHFOLD_MAX_FILE_SIZE` bytes (default 1 GB) are
/// rejected before reading.
///
/// # Examples
///
/// ```no_run
/// use benchfold_cli::commands::read_file;
///
/// # fn main() -> Result<(), benchfold_cli::error::CliError> {
/// let content = read_file("results.json")?;
/// assert!(!content.is_empty());
/// # Ok(())
/// # }
/// ```
pub fn read_file(path: &str) -> Result<String, CliError> {
    let metadata = fs::metadata(path).map_err(|e| CliError::io_error(path, e))?;

    let max_file_size = get_max_file_size();
    if metadata.len() > max_file_size {
        return Err(CliError::file_too_large(path, metadata.len(), max_file_size));
    }

    fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
}

/// Write content to a file or stdout.
pub fn write_output(content: &str, path: Option<&str>) -> Result<(), CliError> {
    match path {
        Some(p) => fs::write(p, content).map_err(|e| CliError::io_error(p, e)),
        None => io::stdout()
            .write_all(content.as_bytes())
            .map_err(|e| CliError::io_error("<stdout>", e)),
    }
}

/// Expand glob patterns into file paths, in pattern order.
///
/// Matches of one pattern are sorted. A pattern without glob
/// metacharacters is taken literally; a pattern matching nothing fails.
pub fn expand_inputs(patterns: &[String]) -> Result<Vec<String>, CliError> {
    let mut files = Vec::new();
    for pattern in patterns {
        if !pattern.contains(['*', '?', '[']) {
            files.push(pattern.clone());
            continue;
        }
        let paths = glob::glob(pattern)
            .map_err(|e| CliError::InvalidInput(format!("bad pattern '{}': {}", pattern, e)))?;
        let mut matched: Vec<String> = paths
            .filter_map(Result::ok)
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        if matched.is_empty() {
            return Err(CliError::NoInputs(pattern.clone()));
        }
        matched.sort();
        files.extend(matched);
    }
    Ok(files)
}

/// Load one result file, choosing the parser by extension.
pub fn load_source(path: &str) -> Result<RecordSource, CliError> {
    let content = read_file(path)?;
    let extension = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("json") => benchfold_json::from_json(&content, path, &FromJsonConfig::default())
            .map_err(|e| CliError::malformed_source(path, e)),
        Some("csv") => benchfold_csv::from_csv(&content, path, &FromCsvConfig::default())
            .map_err(|e| CliError::malformed_source(path, e)),
        _ => Err(CliError::UnsupportedFormat(format!(
            "'{}' (expected .json or .csv)",
            path
        ))),
    }
}

/// Expand, load and merge all inputs.
pub fn load_merged(patterns: &[String]) -> Result<RecordSet, CliError> {
    let files = expand_inputs(patterns)?;
    let sources = files
        .iter()
        .map(|f| load_source(f))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(files = files.len(), "loaded sources");
    Ok(merge_sources(&sources))
}

/// Output format of table commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(CliError::UnsupportedFormat(format!(
                "output format '{}' (expected json or csv)",
                other
            ))),
        }
    }
}

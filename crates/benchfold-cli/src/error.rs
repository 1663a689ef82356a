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

//! Structured error types for the BenchFold CLI.

use benchfold_core::BenchError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for BenchFold CLI operations.
///
/// # Examples
///
/// ```rust,no_run
/// use benchfold_cli::error::CliError;
///
/// fn read(path: &str) -> Result<String, CliError> {
///     std::fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
/// }
/// ```
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// I/O operation failed (file read, write, or metadata access).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// Input file exceeds `BENCHFOLD_MAX_FILE_SIZE`.
    #[error("File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes ({max_mb} MB)")]
    FileTooLarge {
        path: PathBuf,
        actual: u64,
        max: u64,
        max_mb: u64,
    },

    /// A pattern matched no files.
    #[error("No input files match '{0}'")]
    NoInputs(String),

    /// File extension or output format is not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A source file could not be parsed.
    #[error("Malformed source '{path}': {message}")]
    Source { path: PathBuf, message: String },

    /// Classification, aggregation or a view failed.
    #[error("{0}")]
    Pipeline(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    pub fn file_too_large(path: impl Into<PathBuf>, actual: u64, max: u64) -> Self {
        Self::FileTooLarge {
            path: path.into(),
            actual,
            max,
            max_mb: max / (1024 * 1024),
        }
    }

    pub fn malformed_source(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::Source {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

impl From<BenchError> for CliError {
    fn from(err: BenchError) -> Self {
        match &err.context {
            Some(context) => Self::Pipeline(format!("{} ({})", err, context)),
            None => Self::Pipeline(err.to_string()),
        }
    }
}

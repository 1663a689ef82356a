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

//! Error types for CSV conversion operations.

use thiserror::Error;

/// CSV conversion error types.
///
/// # Examples
///
/// ```
/// use benchfold_csv::CsvError;
///
/// let err = CsvError::DuplicateHeader {
///     position: 2,
///     name: "cycles".to_string(),
/// };
/// assert_eq!(err.to_string(), "Duplicate header 'cycles' at position 2");
/// ```
#[derive(Debug, Error)]
pub enum CsvError {
    /// CSV parsing error at a specific line.
    ///
    /// ```
    /// use benchfold_csv::CsvError;
    ///
    /// let err = CsvError::ParseError {
    ///     line: 42,
    ///     message: "unequal lengths".to_string(),
    /// };
    /// assert!(err.to_string().contains("line 42"));
    /// ```
    #[error("CSV parse error at line {line}: {message}")]
    ParseError {
        /// Line number where the error occurred (1-based).
        line: usize,
        /// Detailed error message.
        message: String,
    },

    /// A header cell is empty.
    #[error("Empty header at position {position}")]
    EmptyHeader {
        /// Position of the header (0-based).
        position: usize,
    },

    /// Two header cells carry the same name.
    #[error("Duplicate header '{name}' at position {position}")]
    DuplicateHeader {
        /// Position of the second occurrence (0-based).
        position: usize,
        /// The repeated column name.
        name: String,
    },

    /// Row count exceeded security limit.
    ///
    /// ```
    /// use benchfold_csv::CsvError;
    ///
    /// let err = CsvError::SecurityLimit {
    ///     limit: 1_000_000,
    ///     actual: 1_000_001,
    /// };
    /// assert!(err.to_string().contains("Security limit"));
    /// ```
    #[error("Security limit exceeded: row count {actual} exceeds maximum {limit}")]
    SecurityLimit {
        /// Maximum allowed rows.
        limit: usize,
        /// Actual row count encountered.
        actual: usize,
    },

    /// I/O error during CSV reading or writing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from underlying CSV library.
    #[error("CSV library error: {0}")]
    CsvLib(#[from] csv::Error),

    /// Generic error with custom message.
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for `Result` with `CsvError`.
pub type Result<T> = std::result::Result<T, CsvError>;

impl CsvError {
    /// Add context to an error message.
    ///
    /// ```
    /// use benchfold_csv::CsvError;
    ///
    /// let err = CsvError::Other("bad cell".to_string()).with_context("perf.csv".to_string());
    /// assert_eq!(err.to_string(), "bad cell (perf.csv)");
    /// ```
    pub fn with_context(self, context: String) -> Self {
        match self {
            CsvError::ParseError { line, message } => CsvError::ParseError {
                line,
                message: format!("{} ({})", message, context),
            },
            CsvError::Other(msg) => CsvError::Other(format!("{} ({})", msg, context)),
            other => CsvError::Other(format!("{} ({})", other, context)),
        }
    }
}

impl From<CsvError> for benchfold_core::BenchError {
    fn from(err: CsvError) -> Self {
        match err {
            CsvError::Io(e) => benchfold_core::BenchError::io(e.to_string()),
            other => benchfold_core::BenchError::malformed_source(other.to_string()),
        }
    }
}

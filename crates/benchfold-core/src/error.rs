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

//! Error types for the benchmark pipeline.

use std::fmt;
use thiserror::Error;

/// The kind of error raised by a pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchErrorKind {
    /// Source document is not in a recognized shape.
    MalformedSource,
    /// Caller arguments cannot be satisfied by the input.
    InvalidInput,
    /// Categorical value without an ordering entry.
    UnknownCategory,
    /// Numeric domain violation in a derived metric.
    Domain,
    /// I/O error (file operations).
    Io,
}

impl fmt::Display for BenchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedSource => write!(f, "MalformedSourceError"),
            Self::InvalidInput => write!(f, "InvalidInputError"),
            Self::UnknownCategory => write!(f, "UnknownCategoryError"),
            Self::Domain => write!(f, "DomainError"),
            Self::Io => write!(f, "IOError"),
        }
    }
}

/// An error raised while merging, normalizing or aggregating records.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct BenchError {
    /// The kind of error.
    pub kind: BenchErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Identity of the source the error relates to, if any.
    pub origin: Option<String>,
    /// Additional context (e.g., "in view probe-pareto").
    pub context: Option<String>,
}

impl BenchError {
    /// Create a new error.
    pub fn new(kind: BenchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            origin: None,
            context: None,
        }
    }

    /// Attach the identity of the offending source.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Add context information.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    // Convenience constructors for each error kind
    pub fn malformed_source(message: impl Into<String>) -> Self {
        Self::new(BenchErrorKind::MalformedSource, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(BenchErrorKind::InvalidInput, message)
    }

    pub fn unknown_category(message: impl Into<String>) -> Self {
        Self::new(BenchErrorKind::UnknownCategory, message)
    }

    pub fn domain(message: impl Into<String>) -> Self {
        Self::new(BenchErrorKind::Domain, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(BenchErrorKind::Io, message)
    }
}

impl From<std::io::Error> for BenchError {
    fn from(err: std::io::Error) -> Self {
        BenchError::io(err.to_string())
    }
}

impl From<crate::metrics::MetricError> for BenchError {
    fn from(err: crate::metrics::MetricError) -> Self {
        BenchError::domain(err.to_string())
    }
}

/// Result type for pipeline operations.
pub type BenchResult<T> = Result<T, BenchError>;

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

//! Error context helpers.
//!
//! Extension methods that convert reader and I/O errors into [`BenchError`]
//! and attach context as they propagate.
//!
//! ```rust
//! use benchfold::{BenchError, BenchResultExt};
//!
//! fn read(path: &str) -> Result<String, BenchError> {
//!     std::fs::read_to_string(path).context(format!("reading {}", path))
//! }
//!
//! let err = read("missing.json").unwrap_err();
//! assert_eq!(err.context.as_deref(), Some("reading missing.json"));
//! ```

use crate::BenchError;
use std::fmt;

/// Extension trait for adding context to results on their way to
/// [`BenchError`].
///
/// Context added to an error that already carries some is prepended:
/// `"outer; inner"`.
pub trait BenchResultExt<T> {
    /// Add context to an error.
    fn context<C>(self, context: C) -> Result<T, BenchError>
    where
        C: fmt::Display;

    /// Add context computed only on the error path.
    fn with_context<C, F>(self, f: F) -> Result<T, BenchError>
    where
        C: fmt::Display,
        F: FnOnce() -> C;

    /// Record the identity of the source the error came from.
    ///
    /// An origin set closer to the failure is kept.
    fn origin(self, identity: &str) -> Result<T, BenchError>;
}

impl<T, E> BenchResultExt<T> for Result<T, E>
where
    E: Into<BenchError>,
{
    fn context<C>(self, context: C) -> Result<T, BenchError>
    where
        C: fmt::Display,
    {
        self.map_err(|e| add_context_to_error(e.into(), context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, BenchError>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| add_context_to_error(e.into(), f().to_string()))
    }

    fn origin(self, identity: &str) -> Result<T, BenchError> {
        self.map_err(|e| {
            let error: BenchError = e.into();
            if error.origin.is_some() {
                error
            } else {
                error.with_origin(identity)
            }
        })
    }
}

fn add_context_to_error(mut error: BenchError, new_context: String) -> BenchError {
    if new_context.is_empty() {
        return error;
    }

    error.context = Some(match error.context {
        Some(existing) => format!("{}; {}", new_context, existing),
        None => new_context,
    });

    error
}

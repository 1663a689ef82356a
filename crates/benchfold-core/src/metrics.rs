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

//! Derived comparison metrics.
//!
//! Every metric is a pure function returning `Result<f64, MetricError>`.
//! Domain violations are reported to the caller and carried per table row;
//! they are never clipped or replaced by a sentinel.

use thiserror::Error;

/// Operations per second scale: throughput is reported in millions.
pub const MEGA: f64 = 1_000_000.0;

/// Domain error of a derived metric.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricError {
    /// Denominator is exactly zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Denominator is negative or not a number.
    #[error("denominator must be positive, got {0}")]
    NonPositiveDenominator(f64),

    /// Numerator is not a finite number.
    #[error("numerator must be finite, got {0}")]
    NonFinite(f64),

    /// Ratio outside the closed unit interval.
    #[error("ratio {value} outside [0, 1]")]
    OutOfRange {
        /// The computed ratio.
        value: f64,
    },

    /// An input measure is missing from the row.
    #[error("missing input measure '{0}'")]
    MissingInput(String),
}

fn check_denominator(d: f64) -> Result<f64, MetricError> {
    if d == 0.0 {
        Err(MetricError::DivisionByZero)
    } else if d.is_nan() || d < 0.0 {
        Err(MetricError::NonPositiveDenominator(d))
    } else {
        Ok(d)
    }
}

fn check_numerator(n: f64) -> Result<f64, MetricError> {
    if n.is_finite() {
        Ok(n)
    } else {
        Err(MetricError::NonFinite(n))
    }
}

/// Millions of operations per second.
///
/// # Examples
///
/// ```
/// use benchfold_core::metrics::{throughput, MetricError};
///
/// assert_eq!(throughput(1_000_000.0, 1.0), Ok(1.0));
/// assert_eq!(throughput(10.0, 0.0), Err(MetricError::DivisionByZero));
/// ```
pub fn throughput(count: f64, seconds: f64) -> Result<f64, MetricError> {
    let count = check_numerator(count)?;
    let seconds = check_denominator(seconds)?;
    Ok(count / (seconds * MEGA))
}

/// Sequential time over interleaved time; above 1 means interleaving helped.
pub fn time_gain(sequential: f64, interleaved: f64) -> Result<f64, MetricError> {
    let sequential = check_numerator(sequential)?;
    let interleaved = check_denominator(interleaved)?;
    Ok(sequential / interleaved)
}

/// Fraction of colliding keys.
///
/// A ratio outside `[0, 1]` indicates inconsistent counters and is
/// reported as [`MetricError::OutOfRange`] with the computed value.
pub fn collision_ratio(collisions: f64, total: f64) -> Result<f64, MetricError> {
    let collisions = check_numerator(collisions)?;
    let total = check_denominator(total)?;
    let ratio = collisions / total;
    if (0.0..=1.0).contains(&ratio) {
        Ok(ratio)
    } else {
        Err(MetricError::OutOfRange { value: ratio })
    }
}

/// Read a measure that a metric depends on.
pub(crate) fn require(value: Option<f64>, name: &str) -> Result<f64, MetricError> {
    value.ok_or_else(|| MetricError::MissingInput(name.to_string()))
}

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

//! BenchFold CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! ## Sources
//!
//! - **merge**: Merge result files (globs accepted) into one file
//! - **inspect**: Summarize sources, schema generations and experiment kinds
//! - **classify**: Write the classified and normalized records
//!
//! ## Tables
//!
//! - **view**: Run one named view and write its table as JSON or CSV
//! - **gaps**: Write the gap histograms
//! - **views**: List the available view names

pub mod cli;
pub mod commands;
pub mod error;

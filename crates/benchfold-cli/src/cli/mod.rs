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

//! CLI command definitions and argument parsing.
//!
//! - [`core`]: source commands (merge, inspect, classify)
//! - [`tables`]: table commands (view, gaps, views)

mod core;
mod tables;

use crate::error::CliError;
use clap::Subcommand;

pub use self::core::CoreCommands;
pub use tables::TableCommands;

/// Top-level CLI commands enum.
///
/// ```no_run
/// use clap::Parser;
/// use benchfold_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand)]
pub enum Commands {
    // Source commands - flattened to appear at top level
    #[command(flatten)]
    Core(CoreCommands),

    // Table commands - flattened to appear at top level
    #[command(flatten)]
    Tables(TableCommands),
}

impl Commands {
    /// Execute the command with the provided arguments.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Core(cmd) => cmd.execute(),
            Commands::Tables(cmd) => cmd.execute(),
        }
    }
}

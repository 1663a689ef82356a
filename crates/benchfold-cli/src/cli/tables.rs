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

//! Table commands: per-figure views and gap histograms.

use crate::commands;
use crate::error::CliError;
use clap::Subcommand;

/// Commands producing tables for plotting.
#[derive(Subcommand)]
pub enum TableCommands {
    /// Run a named view and write its table
    ///
    /// Use `benchfold views` to list the view names.
    View {
        /// View name, e.g. probe or probe-pareto
        #[arg(value_name = "VIEW")]
        name: String,

        /// Input files or glob patterns
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<String>,

        /// Output format (json, csv)
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Drop rows whose derived metrics are undefined
        #[arg(long)]
        defined_only: bool,
    },

    /// Write the gap histogram of each dataset
    Gaps {
        /// Input files or glob patterns
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<String>,

        /// Output format (json, csv)
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List the available view names
    Views,
}

impl TableCommands {
    /// Execute the table command.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            TableCommands::View {
                name,
                inputs,
                format,
                output,
                defined_only,
            } => commands::view(&name, &inputs, &format, output.as_deref(), defined_only),
            TableCommands::Gaps {
                inputs,
                format,
                output,
            } => commands::gaps(&inputs, &format, output.as_deref()),
            TableCommands::Views => commands::list_views(),
        }
    }
}

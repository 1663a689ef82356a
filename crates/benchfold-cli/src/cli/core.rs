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

//! Source commands: merging, inspection and classification.

use crate::commands;
use crate::error::CliError;
use clap::Subcommand;

/// Commands operating on result files.
#[derive(Subcommand)]
pub enum CoreCommands {
    /// Merge result files into one
    ///
    /// Inputs may be glob patterns. The output keeps one context entry per
    /// input file, so merged files can themselves be merged again.
    Merge {
        /// Input files or glob patterns
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<String>,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Summarize result files
    ///
    /// Prints the sources, their detected schema generation and the number
    /// of records of each experiment kind.
    Inspect {
        /// Input files or glob patterns
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<String>,

        /// Also list function and table kinds
        #[arg(short, long)]
        verbose: bool,
    },

    /// Write classified and normalized records
    ///
    /// Output has the merged-file shape with the derived attributes
    /// (experiment_kind, function_id, table_kind, ...) added to every record.
    Classify {
        /// Input files or glob patterns
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<String>,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl CoreCommands {
    /// Execute the source command.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            CoreCommands::Merge { inputs, output } => commands::merge(&inputs, output.as_deref()),
            CoreCommands::Inspect { inputs, verbose } => commands::inspect(&inputs, verbose),
            CoreCommands::Classify { inputs, output } => {
                commands::classify(&inputs, output.as_deref())
            }
        }
    }
}

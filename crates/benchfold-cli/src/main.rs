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

//! BenchFold Command Line Interface

use benchfold_cli::cli::Commands;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// BenchFold - benchmark result aggregation
///
/// Merges benchmark result files, classifies and normalizes their records
/// and produces the aggregated tables behind each figure.
///
/// # Examples
///
/// ```bash
/// # Merge every run of a sweep into one file
/// benchfold merge "results/probe_*.json" --output probe.json
///
/// # Probe throughput table for the Pareto workload, as CSV
/// benchfold view probe-pareto probe.json --format csv
/// ```
#[derive(Parser)]
#[command(name = "benchfold")]
#[command(author, version, about = "BenchFold - benchmark result aggregation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("benchfold_cli=info".parse().expect("valid log directive"))
                .add_directive("benchfold_core=info".parse().expect("valid log directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

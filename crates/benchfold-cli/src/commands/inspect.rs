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

//! Inspect command - source and classification summary

use super::load_merged;
use crate::error::CliError;
use benchfold_core::normalize::detect_generations;
use benchfold_core::{classify, ExperimentKind};
use colored::Colorize;
use std::collections::BTreeMap;

/// Print a summary of the inputs.
///
/// # Output
///
/// Displays:
/// - One line per source with its record count and schema generation
/// - Record counts per experiment kind
/// - In verbose mode: record counts per function and per table kind
pub fn inspect(inputs: &[String], verbose: bool) -> Result<(), CliError> {
    let set = load_merged(inputs)?;

    println!("{}", "Benchmark Results".bold().underline());
    println!();
    println!("{}  {}", "Records:".cyan(), set.len());

    println!();
    println!("{}", "Sources:".cyan());
    let generations = detect_generations(&set);
    for (span, (_, generation)) in set.effective_spans().iter().zip(&generations) {
        println!(
            "  {} {} records, {}",
            span.source.yellow(),
            span.range.len(),
            generation.to_string().dimmed()
        );
    }

    let mut kinds: BTreeMap<ExperimentKind, usize> = BTreeMap::new();
    let mut functions: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut tables: BTreeMap<&'static str, usize> = BTreeMap::new();
    for record in &set {
        let c = classify(record);
        *kinds.entry(c.experiment_kind).or_default() += 1;
        *functions.entry(c.function_id.as_str()).or_default() += 1;
        if let Some(table) = c.table_kind {
            *tables.entry(table.as_str()).or_default() += 1;
        }
    }

    println!();
    println!("{}", "Experiments:".cyan());
    for (kind, count) in &kinds {
        println!("  {:<14} {}", kind.as_str().green(), count);
    }

    if verbose {
        println!();
        println!("{}", "Functions:".cyan());
        for (function, count) in &functions {
            println!("  {:<14} {}", function.green(), count);
        }
        println!();
        println!("{}", "Tables:".cyan());
        for (table, count) in &tables {
            println!("  {:<14} {}", table.green(), count);
        }
    }

    Ok(())
}

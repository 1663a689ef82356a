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

//! Deterministic ordering and canonical labels for categorical values.

use crate::classify::{FunctionId, StructureKind, TableKind};
use crate::error::{BenchError, BenchResult};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// Which rank table a categorical value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Function,
    TableLabel,
    Structure,
}

impl Dimension {
    pub fn category(self, name: &str) -> Category<'_> {
        match self {
            Dimension::Function => Category::Function(name),
            Dimension::TableLabel => Category::TableLabel(name),
            Dimension::Structure => Category::Structure(name),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Dimension::Function => "function",
            Dimension::TableLabel => "table label",
            Dimension::Structure => "structure",
        }
    }
}

/// A categorical value to rank or label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category<'a> {
    /// Function name as produced by [`FunctionId::as_str`], or `Breakeven`.
    Function(&'a str),
    /// Combined `FUNCTION-TABLE` label, e.g. `RMI-CHAIN`.
    TableLabel(&'a str),
    /// Structure name as produced by [`StructureKind::as_str`].
    Structure(&'a str),
}

impl Category<'_> {
    pub fn dimension(&self) -> Dimension {
        match self {
            Category::Function(_) => Dimension::Function,
            Category::TableLabel(_) => Dimension::TableLabel,
            Category::Structure(_) => Dimension::Structure,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Category::Function(n) | Category::TableLabel(n) | Category::Structure(n) => n,
        }
    }
}

/// Rank tables shared by every view.
///
/// Built once and passed by reference; nothing mutates it after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderingConfig {
    functions: BTreeMap<String, i32>,
    table_labels: BTreeMap<String, i32>,
    structures: BTreeMap<String, i32>,
}

static STANDARD: Lazy<OrderingConfig> = Lazy::new(OrderingConfig::standard);

impl OrderingConfig {
    /// The fixed ordering used by all figures.
    pub fn standard() -> Self {
        let functions = [
            ("Breakeven", -1),
            (FunctionId::Rmi.as_str(), 0),
            (FunctionId::RadixSpline.as_str(), 1),
            (FunctionId::Pgm.as_str(), 2),
            (FunctionId::Murmur.as_str(), 3),
            (FunctionId::MultiplyPrime.as_str(), 4),
            (FunctionId::FibonacciPrime.as_str(), 5),
            (FunctionId::XxHash.as_str(), 6),
            (FunctionId::AquaHash.as_str(), 7),
            (FunctionId::Mwhc.as_str(), 8),
            (FunctionId::BitMwhc.as_str(), 9),
            (FunctionId::RecSplit.as_str(), 10),
        ];
        let table_labels = [
            ("RMI-CHAIN", 0),
            ("RMI-LINEAR", 1),
            ("RMI-LP", 1),
            ("RMI-CUCKOO", 2),
            ("MULT-CHAIN", 3),
            ("MULT-LINEAR", 4),
            ("MULT-LP", 4),
            ("MULT-CUCKOO", 5),
            ("MWHC-CHAIN", 6),
            ("MWHC-LINEAR", 7),
            ("MWHC-LP", 7),
            ("MWHC-CUCKOO", 8),
        ];
        let structures = [
            (StructureKind::RmiChain.as_str(), 0),
            (StructureKind::RadixSplineChain.as_str(), 1),
            (StructureKind::RmiSort.as_str(), 2),
        ];

        fn table(entries: &[(&str, i32)]) -> BTreeMap<String, i32> {
            entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
        }

        Self {
            functions: table(&functions),
            table_labels: table(&table_labels),
            structures: table(&structures),
        }
    }

    /// Shared instance of [`OrderingConfig::standard`].
    pub fn shared() -> &'static OrderingConfig {
        &STANDARD
    }

    fn table_for(&self, dimension: Dimension) -> &BTreeMap<String, i32> {
        match dimension {
            Dimension::Function => &self.functions,
            Dimension::TableLabel => &self.table_labels,
            Dimension::Structure => &self.structures,
        }
    }

    /// Rank of a categorical value. Lower ranks come first.
    ///
    /// # Errors
    ///
    /// Returns an `UnknownCategory` error for any value without an entry,
    /// including `RMICoro` and `Unknown` functions.
    ///
    /// # Examples
    ///
    /// ```
    /// use benchfold_core::{Category, OrderingConfig};
    ///
    /// let ordering = OrderingConfig::standard();
    /// assert_eq!(ordering.rank(Category::Function("RMI")).unwrap(), 0);
    /// assert_eq!(ordering.rank(Category::TableLabel("MULT-LP")).unwrap(), 4);
    /// assert!(ordering.rank(Category::Function("RMICoro")).is_err());
    /// ```
    pub fn rank(&self, category: Category<'_>) -> BenchResult<i32> {
        let dimension = category.dimension();
        self.table_for(dimension)
            .get(category.name())
            .copied()
            .ok_or_else(|| {
                BenchError::unknown_category(format!(
                    "no {} ordering for '{}'",
                    dimension.as_str(),
                    category.name()
                ))
            })
    }

    /// Canonical display label of a categorical value.
    pub fn label(&self, category: Category<'_>) -> String {
        match category {
            Category::TableLabel(name) => name.to_uppercase(),
            Category::Function(name) | Category::Structure(name) => name.to_string(),
        }
    }

    /// Values of a dimension in rank order.
    pub fn ordered(&self, dimension: Dimension) -> Vec<&str> {
        let mut entries: Vec<_> = self.table_for(dimension).iter().collect();
        entries.sort_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(b.0)));
        entries.into_iter().map(|(k, _)| k.as_str()).collect()
    }
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Combined `FUNCTION-TABLE` label, e.g. `MULT-LP` for a multiply-prime
/// hash on a linear-probing table.
pub fn table_label(function: &str, table: &str) -> String {
    let function = if function == FunctionId::MultiplyPrime.as_str() {
        "mult"
    } else {
        function
    };
    let table = match TableKind::from_name(table) {
        Some(TableKind::Linear) => "lp",
        Some(TableKind::Chained) => "chain",
        _ => table,
    };
    format!("{}-{}", function, table).to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== rank tests ====================

    #[test]
    fn test_function_ranks() {
        let o = OrderingConfig::standard();
        assert_eq!(o.rank(Category::Function("Breakeven")).unwrap(), -1);
        assert_eq!(o.rank(Category::Function("RMI")).unwrap(), 0);
        assert_eq!(o.rank(Category::Function("RecSplit")).unwrap(), 10);
    }

    #[test]
    fn test_rank_total_over_mapped_functions() {
        let o = OrderingConfig::standard();
        for f in FunctionId::ALL {
            let result = o.rank(Category::Function(f.as_str()));
            match f {
                FunctionId::RmiCoro | FunctionId::Unknown => assert!(result.is_err()),
                _ => assert!(result.is_ok(), "{} should be ranked", f),
            }
        }
    }

    #[test]
    fn test_unknown_category_error() {
        let o = OrderingConfig::standard();
        let err = o.rank(Category::TableLabel("MURMUR-CHAIN")).unwrap_err();
        assert_eq!(err.kind, crate::BenchErrorKind::UnknownCategory);
        assert!(err.message.contains("MURMUR-CHAIN"));
    }

    #[test]
    fn test_lp_aliases_share_rank() {
        let o = OrderingConfig::standard();
        assert_eq!(
            o.rank(Category::TableLabel("RMI-LP")).unwrap(),
            o.rank(Category::TableLabel("RMI-LINEAR")).unwrap()
        );
    }

    #[test]
    fn test_structure_ranks() {
        let o = OrderingConfig::standard();
        assert_eq!(o.ordered(Dimension::Structure), vec!["RMI-Chain", "RadixSpline-Chain", "RMI-Sort"]);
    }

    #[test]
    fn test_ordered_functions_start_with_breakeven() {
        let o = OrderingConfig::shared();
        let ordered = o.ordered(Dimension::Function);
        assert_eq!(ordered[0], "Breakeven");
        assert_eq!(ordered[1], "RMI");
        assert_eq!(ordered.len(), 12);
    }

    // ==================== label tests ====================

    #[test]
    fn test_table_label_builder() {
        assert_eq!(table_label("RMI", "chained"), "RMI-CHAIN");
        assert_eq!(table_label("MultiplyPrime", "linear"), "MULT-LP");
        assert_eq!(table_label("MWHC", "cuckoo"), "MWHC-CUCKOO");
        assert_eq!(table_label("mwhc", "lp"), "MWHC-LP");
    }

    #[test]
    fn test_label_uppercases_table_labels() {
        let o = OrderingConfig::standard();
        assert_eq!(o.label(Category::TableLabel("rmi-chain")), "RMI-CHAIN");
        assert_eq!(o.label(Category::Function("RadixSpline")), "RadixSpline");
    }
}

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

//! Grouped mean aggregation and result tables.

use crate::error::{BenchError, BenchResult};
use crate::metrics::MetricError;
use crate::ordering::{Dimension, OrderingConfig};
use crate::record::Record;
use crate::value::{KeyPart, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, warn};

/// One row per distinct group-key tuple.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRow {
    /// Group-key values, in the table's key order.
    pub keys: Vec<(String, Value)>,
    /// Number of records in the partition.
    pub count: usize,
    /// Mean of each measure; `None` when no record had a numeric value.
    pub measures: Vec<(String, Option<f64>)>,
    /// Derived metric cells, in derivation order.
    pub derived: Vec<(String, Result<f64, MetricError>)>,
}

impl AggregatedRow {
    pub fn key(&self, name: &str) -> Option<&Value> {
        self.keys.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn key_str(&self, name: &str) -> Option<&str> {
        self.key(name).and_then(Value::as_str)
    }

    pub fn measure(&self, name: &str) -> Option<f64> {
        self.measures
            .iter()
            .find(|(m, _)| m == name)
            .and_then(|(_, v)| *v)
    }

    pub fn derived(&self, name: &str) -> Option<&Result<f64, MetricError>> {
        self.derived.iter().find(|(d, _)| d == name).map(|(_, v)| v)
    }

    /// Numeric value of a key, measure or defined derived metric.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.key(name)
            .and_then(Value::as_float)
            .or_else(|| self.measure(name))
            .or_else(|| self.derived(name).and_then(|d| d.as_ref().ok().copied()))
    }

    /// Value of any column, for sorting and export.
    pub fn cell(&self, name: &str) -> Option<Value> {
        if let Some(v) = self.key(name) {
            return Some(v.clone());
        }
        if let Some((_, m)) = self.measures.iter().find(|(m, _)| m == name) {
            return m.map(Value::Float);
        }
        self.derived(name)
            .and_then(|d| d.as_ref().ok().copied())
            .map(Value::Float)
    }
}

/// Ordered aggregation result handed to renderers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub group_keys: Vec<String>,
    pub measures: Vec<String>,
    pub derived: Vec<String>,
    pub rows: Vec<AggregatedRow>,
}

impl Table {
    pub fn new(group_keys: &[&str], measures: &[&str]) -> Self {
        Self {
            group_keys: group_keys.iter().map(|s| s.to_string()).collect(),
            measures: measures.iter().map(|s| s.to_string()).collect(),
            derived: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AggregatedRow> {
        self.rows.iter()
    }

    /// All column names: keys, measures, then derived metrics.
    pub fn columns(&self) -> Vec<&str> {
        self.group_keys
            .iter()
            .chain(self.measures.iter())
            .chain(self.derived.iter())
            .map(String::as_str)
            .collect()
    }

    /// Add a derived column computed per row.
    pub fn derive<F>(mut self, name: &str, f: F) -> Self
    where
        F: Fn(&AggregatedRow) -> Result<f64, MetricError>,
    {
        for row in &mut self.rows {
            let cell = f(row);
            row.derived.push((name.to_string(), cell));
        }
        self.derived.push(name.to_string());
        self
    }

    /// Keep only rows matching the predicate.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&AggregatedRow) -> bool,
    {
        self.rows.retain(|row| predicate(row));
        self
    }

    /// Drop rows whose derived metric `name` is undefined.
    pub fn drop_undefined(self, name: &str) -> Self {
        self.filter(|row| matches!(row.derived(name), Some(Ok(_))))
    }

    /// Stable ascending sort on one column. Rows without the column go last.
    pub fn sort_by(mut self, column: &str) -> Self {
        self.rows.sort_by(|a, b| match (a.cell(column), b.cell(column)) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        self
    }

    /// Stable sort on the rank of a categorical column.
    ///
    /// # Errors
    ///
    /// Fails with `UnknownCategory` if any row holds a value without a rank.
    pub fn sort_by_rank(
        mut self,
        column: &str,
        dimension: Dimension,
        ordering: &OrderingConfig,
    ) -> BenchResult<Self> {
        let mut ranked = Vec::with_capacity(self.rows.len());
        for row in self.rows {
            let name = row.key_str(column).ok_or_else(|| {
                BenchError::invalid_input(format!("column '{}' is not a text key", column))
            })?;
            let rank = ordering.rank(dimension.category(name))?;
            ranked.push((rank, row));
        }
        ranked.sort_by_key(|(rank, _)| *rank);
        self.rows = ranked.into_iter().map(|(_, row)| row).collect();
        Ok(self)
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a AggregatedRow;
    type IntoIter = std::slice::Iter<'a, AggregatedRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Group keys and measures for [`aggregate_with`].
///
/// Required keys exclude records that lack them. Optional keys group a
/// missing value as null instead, so "no model count" forms its own
/// partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSpec<'s> {
    keys: Vec<(&'s str, bool)>,
    measures: Vec<&'s str>,
}

impl<'s> GroupSpec<'s> {
    /// All `group_keys` are required.
    pub fn new(group_keys: &[&'s str], measures: &[&'s str]) -> Self {
        Self {
            keys: group_keys.iter().map(|k| (*k, true)).collect(),
            measures: measures.to_vec(),
        }
    }

    /// Append an optional group key.
    pub fn optional(mut self, key: &'s str) -> Self {
        self.keys.push((key, false));
        self
    }

    pub fn key_names(&self) -> Vec<&'s str> {
        self.keys.iter().map(|(k, _)| *k).collect()
    }
}

struct Partition {
    keys: Vec<Value>,
    count: usize,
    sums: Vec<f64>,
    counts: Vec<usize>,
}

/// Partition records by `group_keys` and take the mean of each measure.
///
/// Records missing any group key are excluded. Within a partition a
/// measure's mean covers only records where it is numeric; a measure
/// missing from the whole partition stays missing. Rows come out in
/// first-seen order.
///
/// # Errors
///
/// Returns an `InvalidInput` error if the input is non-empty and some group
/// key appears in none of the records.
///
/// # Examples
///
/// ```
/// use benchfold_core::{aggregate, Record, Value};
///
/// let records: Vec<Record> = [2.0, 4.0, 6.0]
///     .iter()
///     .map(|t| Record::from_iter([("dataset_name", Value::from("wiki")), ("t", Value::Float(*t))]))
///     .collect();
///
/// let table = aggregate(&records, &["dataset_name"], &["t"]).unwrap();
/// assert_eq!(table.len(), 1);
/// assert_eq!(table.rows[0].measure("t"), Some(4.0));
/// ```
pub fn aggregate<'a, I>(records: I, group_keys: &[&str], measures: &[&str]) -> BenchResult<Table>
where
    I: IntoIterator<Item = &'a Record>,
{
    aggregate_with(records, &GroupSpec::new(group_keys, measures))
}

/// [`aggregate`] with optional group keys.
pub fn aggregate_with<'a, I>(records: I, spec: &GroupSpec<'_>) -> BenchResult<Table>
where
    I: IntoIterator<Item = &'a Record>,
{
    let key_count = spec.keys.len();
    let measure_count = spec.measures.len();
    let mut index: HashMap<Vec<KeyPart>, usize> = HashMap::new();
    let mut partitions: Vec<Partition> = Vec::new();
    let mut seen = vec![false; key_count];
    let mut total = 0usize;
    let mut excluded = 0usize;
    let mut non_numeric = 0usize;

    for record in records {
        total += 1;

        let mut keys = Vec::with_capacity(key_count);
        let mut complete = true;
        for (i, (name, required)) in spec.keys.iter().enumerate() {
            match record.get(name).filter(|v| !v.is_null()) {
                Some(value) => {
                    seen[i] = true;
                    keys.push(value.clone());
                }
                None if *required => complete = false,
                None => keys.push(Value::Null),
            }
        }
        if !complete {
            excluded += 1;
            continue;
        }

        let parts: Vec<KeyPart> = keys.iter().map(KeyPart::from).collect();
        let slot = *index.entry(parts).or_insert_with(|| {
            partitions.push(Partition {
                keys,
                count: 0,
                sums: vec![0.0; measure_count],
                counts: vec![0; measure_count],
            });
            partitions.len() - 1
        });

        let partition = &mut partitions[slot];
        partition.count += 1;
        for (i, name) in spec.measures.iter().enumerate() {
            match record.get(name) {
                Some(value) if value.is_numeric() => {
                    if let Some(x) = value.as_float() {
                        partition.sums[i] += x;
                        partition.counts[i] += 1;
                    }
                }
                Some(Value::Null) | None => {}
                Some(_) => non_numeric += 1,
            }
        }
    }

    if total > 0 {
        let missing = spec
            .keys
            .iter()
            .zip(seen.iter())
            .find(|((_, required), seen)| *required && !**seen);
        if let Some(((name, _), _)) = missing {
            return Err(BenchError::invalid_input(format!(
                "group key '{}' is absent from every record",
                name
            )));
        }
    }
    if excluded > 0 {
        debug!(excluded, total, "records without a complete group key excluded");
    }
    if non_numeric > 0 {
        warn!(non_numeric, "non-numeric measure values ignored");
    }

    let mut table = Table::new(&spec.key_names(), &spec.measures);
    table.rows = partitions
        .into_iter()
        .map(|p| AggregatedRow {
            keys: table.group_keys.iter().cloned().zip(p.keys).collect(),
            count: p.count,
            measures: table
                .measures
                .iter()
                .enumerate()
                .map(|(i, m)| {
                    let mean = (p.counts[i] > 0).then(|| p.sums[i] / p.counts[i] as f64);
                    (m.clone(), mean)
                })
                .collect(),
            derived: Vec::new(),
        })
        .collect();
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::throughput;

    fn rec(pairs: &[(&str, Value)]) -> Record {
        pairs.iter().map(|(k, v)| (*k, v.clone())).collect()
    }

    fn run(ds: &str, f: &str, t: f64) -> Record {
        rec(&[
            ("dataset_name", Value::from(ds)),
            ("function_id", Value::from(f)),
            ("t", Value::Float(t)),
        ])
    }

    // ==================== Mean tests ====================

    #[test]
    fn test_mean_of_three() {
        let records = vec![run("wiki", "RMI", 2.0), run("wiki", "RMI", 4.0), run("wiki", "RMI", 6.0)];
        let table = aggregate(&records, &["dataset_name", "function_id"], &["t"]).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].count, 3);
        assert_eq!(table.rows[0].measure("t"), Some(4.0));
    }

    #[test]
    fn test_missing_measure_values_skipped() {
        let records = vec![
            run("wiki", "RMI", 2.0),
            rec(&[("dataset_name", Value::from("wiki")), ("function_id", Value::from("RMI"))]),
        ];
        let table = aggregate(&records, &["dataset_name", "function_id"], &["t", "absent"]).unwrap();
        assert_eq!(table.rows[0].count, 2);
        assert_eq!(table.rows[0].measure("t"), Some(2.0));
        assert_eq!(table.rows[0].measure("absent"), None);
    }

    // ==================== Partition tests ====================

    #[test]
    fn test_partition_first_seen_order() {
        let records = vec![run("fb", "RMI", 1.0), run("wiki", "RMI", 1.0), run("fb", "PGM", 1.0), run("fb", "RMI", 3.0)];
        let table = aggregate(&records, &["dataset_name", "function_id"], &["t"]).unwrap();
        let keys: Vec<_> = table
            .iter()
            .map(|r| (r.key_str("dataset_name").unwrap(), r.key_str("function_id").unwrap()))
            .collect();
        assert_eq!(keys, vec![("fb", "RMI"), ("wiki", "RMI"), ("fb", "PGM")]);
        assert_eq!(table.rows[0].measure("t"), Some(2.0));
    }

    #[test]
    fn test_numeric_keys_compare_by_value() {
        let records = vec![
            rec(&[("lf", Value::Int(50)), ("t", Value::Float(1.0))]),
            rec(&[("lf", Value::Float(50.0)), ("t", Value::Float(3.0))]),
        ];
        let table = aggregate(&records, &["lf"], &["t"]).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].measure("t"), Some(2.0));
    }

    #[test]
    fn test_list_keys_partition_by_elements() {
        let records = vec![
            rec(&[("count", Value::List(vec![Value::Int(1), Value::Int(2)])), ("t", Value::Float(1.0))]),
            rec(&[("count", Value::List(vec![Value::from("1, 2")])), ("t", Value::Float(3.0))]),
            rec(&[("count", Value::List(vec![Value::Float(1.0), Value::Float(2.0)])), ("t", Value::Float(5.0))]),
        ];
        let table = aggregate(&records, &["count"], &["t"]).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].count, 2);
        assert_eq!(table.rows[0].measure("t"), Some(3.0));
        assert_eq!(table.rows[1].measure("t"), Some(3.0));
    }

    #[test]
    fn test_records_without_key_excluded() {
        let records = vec![run("wiki", "RMI", 1.0), rec(&[("function_id", Value::from("RMI"))])];
        let table = aggregate(&records, &["dataset_name", "function_id"], &["t"]).unwrap();
        assert_eq!(table.rows.iter().map(|r| r.count).sum::<usize>(), 1);
    }

    #[test]
    fn test_key_absent_everywhere_is_error() {
        let records = vec![run("wiki", "RMI", 1.0)];
        let err = aggregate(&records, &["dataset_name", "join_size"], &["t"]).unwrap_err();
        assert_eq!(err.kind, crate::BenchErrorKind::InvalidInput);
        assert!(err.message.contains("join_size"));
    }

    #[test]
    fn test_optional_key_groups_missing_as_null() {
        let records = vec![
            rec(&[("k", Value::from("a")), ("m", Value::Int(10)), ("t", Value::Float(1.0))]),
            rec(&[("k", Value::from("a")), ("t", Value::Float(3.0))]),
            rec(&[("k", Value::from("a")), ("t", Value::Float(5.0))]),
        ];
        let spec = GroupSpec::new(&["k"], &["t"]).optional("m");
        let table = aggregate_with(&records, &spec).unwrap();
        assert_eq!(table.group_keys, vec!["k", "m"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1].key("m"), Some(&Value::Null));
        assert_eq!(table.rows[1].measure("t"), Some(4.0));
    }

    #[test]
    fn test_optional_key_absent_everywhere_is_fine() {
        let records = vec![rec(&[("k", Value::from("a"))])];
        let spec = GroupSpec::new(&["k"], &[]).optional("m");
        assert_eq!(aggregate_with(&records, &spec).unwrap().len(), 1);
    }

    #[test]
    fn test_empty_input_is_empty_table() {
        let table = aggregate(&[], &["dataset_name"], &["t"]).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.group_keys, vec!["dataset_name"]);
    }

    // ==================== Table tests ====================

    #[test]
    fn test_derive_and_drop_undefined() {
        let records = vec![
            rec(&[("k", Value::from("a")), ("n", Value::Float(1e6)), ("s", Value::Float(1.0))]),
            rec(&[("k", Value::from("b")), ("n", Value::Float(1e6)), ("s", Value::Float(0.0))]),
        ];
        let table = aggregate(&records, &["k"], &["n", "s"])
            .unwrap()
            .derive("throughput_M", |row| {
                throughput(row.measure("n").unwrap_or(0.0), row.measure("s").unwrap_or(0.0))
            });
        assert_eq!(table.rows[0].derived("throughput_M"), Some(&Ok(1.0)));
        assert_eq!(table.rows[1].derived("throughput_M"), Some(&Err(MetricError::DivisionByZero)));

        let defined = table.drop_undefined("throughput_M");
        assert_eq!(defined.len(), 1);
        assert_eq!(defined.columns(), vec!["k", "n", "s", "throughput_M"]);
    }

    #[test]
    fn test_sort_by_missing_last() {
        let records = vec![
            rec(&[("k", Value::from("a"))]),
            rec(&[("k", Value::from("b")), ("t", Value::Float(2.0))]),
            rec(&[("k", Value::from("c")), ("t", Value::Float(1.0))]),
        ];
        let table = aggregate(&records, &["k"], &["t"]).unwrap().sort_by("t");
        let keys: Vec<_> = table.iter().map(|r| r.key_str("k").unwrap()).collect();
        assert_eq!(keys, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_sort_by_rank() {
        let records = vec![
            rec(&[("f", Value::from("MWHC"))]),
            rec(&[("f", Value::from("RMI"))]),
            rec(&[("f", Value::from("Murmur"))]),
        ];
        let ordering = OrderingConfig::standard();
        let table = aggregate(&records, &["f"], &[])
            .unwrap()
            .sort_by_rank("f", Dimension::Function, &ordering)
            .unwrap();
        let keys: Vec<_> = table.iter().map(|r| r.key_str("f").unwrap()).collect();
        assert_eq!(keys, vec!["RMI", "Murmur", "MWHC"]);
    }

    #[test]
    fn test_sort_by_rank_unknown() {
        let records = vec![rec(&[("f", Value::from("RMICoro"))])];
        let ordering = OrderingConfig::standard();
        let result = aggregate(&records, &["f"], &[])
            .unwrap()
            .sort_by_rank("f", Dimension::Function, &ordering);
        assert!(result.is_err());
    }
}

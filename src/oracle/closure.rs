// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Consistency closure over the pairs the rules keep.
//!
//! The rule families decide each pair on its own. A pair can survive them
//! and still never appear in a complete row, e.g. when every value of some
//! third column conflicts with one of its two sides. Two passes remove those:
//!
//! 1. path consistency: drop `(x, y)` when some other column has no value
//!    compatible with both;
//! 2. support search: for each remaining pair, look for a complete row whose
//!    pairs are all kept. A row found supports every pair in it; a pair
//!    without support is dropped.
//!
//! Dropping an unsupported pair cannot take support away from another pair,
//! since a supporting row never contains an unsupported pair. One sweep of
//! the second pass therefore suffices.

use std::collections::HashMap;
use std::ops::Range;

use tracing::debug;

use crate::model::{Parameter, ParameterValue, ParameterValueMatrix, ParameterValuePair};

/// Kept pairs over the values of a matrix, indexed densely.
#[derive(Debug)]
pub struct PairGraph {
    /// Global value indices of each column.
    columns: Vec<Range<usize>>,
    column_of: Vec<usize>,
    index: HashMap<(Parameter, ParameterValue), usize>,
    allowed: Vec<bool>,
    size: usize,
}

impl PairGraph {
    /// A graph in which exactly the `kept` pairs are allowed.
    pub fn new(matrix: &ParameterValueMatrix, kept: &[ParameterValuePair]) -> Self {
        let mut columns = Vec::with_capacity(matrix.len());
        let mut column_of = Vec::new();
        let mut index = HashMap::new();
        for (column, (parameter, values)) in matrix.iter().enumerate() {
            let start = column_of.len();
            for value in values {
                index
                    .entry((parameter, value.clone()))
                    .or_insert(column_of.len());
                column_of.push(column);
            }
            columns.push(start..column_of.len());
        }
        let size = column_of.len();
        let mut graph = Self {
            columns,
            column_of,
            index,
            allowed: vec![false; size * size],
            size,
        };
        for pair in kept {
            if let Some((x, y)) = graph.indices(pair) {
                graph.set(x, y, true);
            }
        }
        graph
    }

    fn indices(&self, pair: &ParameterValuePair) -> Option<(usize, usize)> {
        let (p1, v1) = pair.first();
        let (p2, v2) = pair.second();
        let x = *self.index.get(&(p1, v1.clone()))?;
        let y = *self.index.get(&(p2, v2.clone()))?;
        Some((x, y))
    }

    fn set(&mut self, x: usize, y: usize, allowed: bool) {
        self.allowed[x * self.size + y] = allowed;
        self.allowed[y * self.size + x] = allowed;
    }

    pub fn allowed(&self, x: usize, y: usize) -> bool {
        self.allowed[x * self.size + y]
    }

    /// Whether `pair` is still allowed. Pairs over unknown values are.
    pub fn keeps(&self, pair: &ParameterValuePair) -> bool {
        self.indices(pair).map_or(true, |(x, y)| self.allowed(x, y))
    }

    /// Allowed pairs `(x, y)` with `x < y`.
    fn allowed_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for x in 0..self.size {
            for y in x + 1..self.size {
                if self.column_of[x] != self.column_of[y] && self.allowed(x, y) {
                    pairs.push((x, y));
                }
            }
        }
        pairs
    }

    /// Some column other than those of `x` and `y` has no value allowed with both.
    fn blocked(&self, x: usize, y: usize) -> bool {
        let (cx, cy) = (self.column_of[x], self.column_of[y]);
        self.columns
            .iter()
            .enumerate()
            .filter(|&(k, _)| k != cx && k != cy)
            .any(|(_, values)| {
                !values
                    .clone()
                    .any(|z| self.allowed(x, z) && self.allowed(y, z))
            })
    }

    /// Remove blocked pairs until none is left. Returns the number removed.
    pub fn enforce_path_consistency(&mut self) -> usize {
        let mut removed = 0;
        loop {
            let mut changed = false;
            for (x, y) in self.allowed_pairs() {
                if self.blocked(x, y) {
                    self.set(x, y, false);
                    removed += 1;
                    changed = true;
                }
            }
            if !changed {
                return removed;
            }
        }
    }

    /// Remove pairs that no complete row supports. Returns the number removed.
    pub fn remove_unsupported(&mut self) -> usize {
        let mut supported = vec![false; self.size * self.size];
        let mut removed = 0;
        let mut row = vec![None; self.columns.len()];
        for (x, y) in self.allowed_pairs() {
            if supported[x * self.size + y] {
                continue;
            }
            row.iter_mut().for_each(|cell| *cell = None);
            row[self.column_of[x]] = Some(x);
            row[self.column_of[y]] = Some(y);
            if self.complete(&mut row) {
                let values: Vec<usize> = row.iter().flatten().copied().collect();
                for &a in &values {
                    for &b in &values {
                        supported[a * self.size + b] = true;
                    }
                }
            } else {
                self.set(x, y, false);
                removed += 1;
            }
        }
        removed
    }

    /// Complete `row` using allowed pairs only, most constrained column first.
    fn complete(&self, row: &mut [Option<usize>]) -> bool {
        let mut best: Option<(usize, Vec<usize>)> = None;
        for (k, values) in self.columns.iter().enumerate() {
            if row[k].is_some() {
                continue;
            }
            let candidates: Vec<usize> = values
                .clone()
                .filter(|&z| row.iter().flatten().all(|&w| self.allowed(w, z)))
                .collect();
            if candidates.is_empty() {
                return false;
            }
            if best
                .as_ref()
                .map_or(true, |(_, fewest)| candidates.len() < fewest.len())
            {
                best = Some((k, candidates));
            }
        }
        let Some((column, candidates)) = best else {
            return true;
        };
        for z in candidates {
            row[column] = Some(z);
            if self.complete(row) {
                return true;
            }
        }
        row[column] = None;
        false
    }
}

/// Move every pair of `pairs` that cannot appear in a complete row of
/// `matrix` to `removed`.
pub fn remove_unreachable_pairs(
    matrix: &ParameterValueMatrix,
    pairs: &mut Vec<ParameterValuePair>,
    removed: &mut Vec<ParameterValuePair>,
) {
    let mut graph = PairGraph::new(matrix, pairs);
    let inconsistent = graph.enforce_path_consistency();
    let unsupported = graph.remove_unsupported();
    debug!(inconsistent, unsupported, "consistency closure");

    let (kept, gone): (Vec<_>, Vec<_>) = std::mem::take(pairs)
        .into_iter()
        .partition(|pair| graph.keeps(pair));
    *pairs = kept;
    removed.extend(gone);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::get_all_parameter_value_pairs;
    use crate::version::Version;

    fn column(parameter: Parameter, versions: &[&str]) -> Vec<ParameterValue> {
        versions
            .iter()
            .map(|v| ParameterValue::of(parameter, Version::parse(v).unwrap()))
            .collect()
    }

    #[test]
    fn test_value_without_partner_loses_all_pairs() {
        let matrix = ParameterValueMatrix::new()
            .with(Parameter::Ubuntu, column(Parameter::Ubuntu, &["20.04", "22.04"]))
            .with(Parameter::Cmake, column(Parameter::Cmake, &["3.22", "3.28"]))
            .with(Parameter::Boost, column(Parameter::Boost, &["1.80.0"]));
        let mut pairs = get_all_parameter_value_pairs(&matrix);
        let mut removed = Vec::new();
        // Ubuntu 20.04 has no boost.
        pairs.retain(|pair| {
            let (p1, v1) = pair.first();
            !(p1 == Parameter::Ubuntu && v1.version.to_string() == "20.04"
                && pair.second().0 == Parameter::Boost)
        });
        remove_unreachable_pairs(&matrix, &mut pairs, &mut removed);
        assert_eq!(removed.len(), 2);
        for pair in &pairs {
            let ubuntu = [pair.first(), pair.second()]
                .into_iter()
                .find(|(p, _)| *p == Parameter::Ubuntu);
            if let Some((_, value)) = ubuntu {
                assert_eq!(value.version.to_string(), "22.04");
            }
        }
    }

    #[test]
    fn test_support_search_catches_what_path_consistency_keeps() {
        // Four columns, three values, all values in a row pairwise different:
        // every pair is path consistent but no complete row exists.
        let parameters = [
            Parameter::Ubuntu,
            Parameter::Cmake,
            Parameter::Boost,
            Parameter::CxxStandard,
        ];
        let mut matrix = ParameterValueMatrix::new();
        for parameter in parameters {
            matrix.insert(parameter, column(parameter, &["1", "2", "3"]));
        }
        let mut pairs: Vec<_> = get_all_parameter_value_pairs(&matrix)
            .into_iter()
            .filter(|pair| pair.first().1.version != pair.second().1.version)
            .collect();

        let mut graph = PairGraph::new(&matrix, &pairs);
        assert_eq!(graph.enforce_path_consistency(), 0);
        assert!(graph.remove_unsupported() > 0);

        let mut removed = Vec::new();
        remove_unreachable_pairs(&matrix, &mut pairs, &mut removed);
        assert!(pairs.is_empty());
        assert_eq!(removed.len(), 36);
    }

    #[test]
    fn test_two_columns_need_no_third() {
        let matrix = ParameterValueMatrix::new()
            .with(Parameter::Cmake, column(Parameter::Cmake, &["3.22", "3.28"]))
            .with(Parameter::Boost, column(Parameter::Boost, &["1.80.0"]));
        let mut pairs = get_all_parameter_value_pairs(&matrix);
        let mut removed = Vec::new();
        remove_unreachable_pairs(&matrix, &mut pairs, &mut removed);
        assert_eq!(pairs.len(), 2);
        assert!(removed.is_empty());
    }
}

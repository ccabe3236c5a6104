// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Immutable search data (Tier 1: MEMO).

use crate::filter::RowFilter;
use crate::model::{Parameter, ParameterValue, ParameterValueMatrix};

/// One column of the search: a parameter and its candidate values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub parameter: Parameter,
    pub values: Vec<ParameterValue>,
}

/// Columns, the dense pair layout, and the row filter.
///
/// Every pair of values from two different columns has an index in
/// `0..pair_count`. Pairs of columns `(i, j)` with `i < j` occupy a block of
/// `len(i) * len(j)` consecutive indices.
pub struct MemoizedData<'f> {
    pub columns: Vec<Column>,
    /// `pair_offsets[i][j - i - 1]` is the first index of block `(i, j)`.
    pair_offsets: Vec<Vec<usize>>,
    pair_count: usize,
    pub filter: &'f dyn RowFilter,
}

impl<'f> MemoizedData<'f> {
    pub fn new(columns: Vec<Column>, filter: &'f dyn RowFilter) -> Self {
        let mut pair_offsets = Vec::with_capacity(columns.len());
        let mut next = 0;
        for i in 0..columns.len() {
            let mut offsets = Vec::with_capacity(columns.len().saturating_sub(i + 1));
            for j in i + 1..columns.len() {
                offsets.push(next);
                next += columns[i].values.len() * columns[j].values.len();
            }
            pair_offsets.push(offsets);
        }
        Self {
            columns,
            pair_offsets,
            pair_count: next,
            filter,
        }
    }

    /// Columns taken from `matrix`, in matrix order.
    pub fn columns_of(matrix: &ParameterValueMatrix) -> Vec<Column> {
        matrix
            .iter()
            .map(|(parameter, values)| Column {
                parameter,
                values: values.to_vec(),
            })
            .collect()
    }

    pub fn pair_count(&self) -> usize {
        self.pair_count
    }

    /// Dense index of the pair `(column, value)`, `(other_column, other_value)`.
    ///
    /// The two columns must differ; their order does not matter.
    pub fn pair_index(&self, first: (usize, usize), second: (usize, usize)) -> usize {
        let ((i, a), (j, b)) = if first.0 < second.0 {
            (first, second)
        } else {
            (second, first)
        };
        debug_assert!(i < j, "pair of a column with itself");
        self.pair_offsets[i][j - i - 1] + a * self.columns[j].values.len() + b
    }

    /// Columns left to assign once `seeded` are fixed.
    ///
    /// Columns that built-in rules read come first, in column order, followed
    /// by the unconstrained ones, so dead ends are found before the search
    /// fans out over free choices.
    pub fn assignment_order(&self, seeded: &[usize]) -> Vec<usize> {
        let free = |idx: &usize| !seeded.contains(idx);
        let (constrained, unconstrained): (Vec<usize>, Vec<usize>) = (0..self.columns.len())
            .filter(free)
            .partition(|&idx| self.columns[idx].parameter.is_constrained());
        constrained.into_iter().chain(unconstrained).collect()
    }
}

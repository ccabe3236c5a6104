// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search context combining MEMO and DYNAMIC state.
//!
//! The CoverageContext is the core data structure of the combination search:
//! - Tier 1 (MEMO): the columns, the dense pair layout and the row filter
//! - Tier 2 (DYNAMIC): the row under construction, tracked on the trail, plus
//!   the coverage bookkeeping of the rows committed so far
//!
//! The engine rewinds the trail on backtrack, which restores the row. The
//! coverage bookkeeping only changes between engine runs.

mod dynamic;
mod memoized;

pub use dynamic::DynamicState;
pub use memoized::{Column, MemoizedData};

use crate::filter::{Reason, RowFilter};
use crate::model::{ParameterValueMatrix, ParameterValueTuple};
use crate::state::Statistics;
use crate::trail::Trail;

/// Search context combining MEMO and DYNAMIC state.
///
/// ```text
/// CoverageContext {
///     memo: MemoizedData,        // Tier 1: Immutable
///     trail: Trail,              // Tier 2: undo log for `state.row`
///     state: DynamicState,       // Tier 2: Mutable
///     statistics: Statistics,
/// }
/// ```
pub struct CoverageContext<'f> {
    /// Immutable precomputed data (Tier 1)
    pub memo: MemoizedData<'f>,
    /// Trail for backtracking the row under construction (Tier 2)
    pub trail: Trail,
    /// Mutable search state (Tier 2)
    pub state: DynamicState,
    pub statistics: Statistics,
}

impl<'f> CoverageContext<'f> {
    pub fn new(columns: Vec<Column>, filter: &'f dyn RowFilter) -> Self {
        let memo = MemoizedData::new(columns, filter);
        let state = DynamicState::new(&memo);
        Self {
            memo,
            trail: Trail::new(),
            state,
            statistics: Statistics::new(),
        }
    }

    /// A context whose columns are those of `matrix`, in matrix order.
    pub fn from_matrix(matrix: &ParameterValueMatrix, filter: &'f dyn RowFilter) -> Self {
        Self::new(MemoizedData::columns_of(matrix), filter)
    }

    pub fn column_count(&self) -> usize {
        self.memo.columns.len()
    }

    /// Choose `value` for `column` (trail-tracked).
    pub fn assign(&mut self, column: usize, value: usize) {
        debug_assert!(value < self.memo.columns[column].values.len());
        self.trail.set(&mut self.state.row, column, Some(value));
    }

    /// The chosen value index of `column`, if any.
    pub fn value(&self, column: usize) -> Option<usize> {
        self.state.row[column]
    }

    /// Restore the row to what it was at `checkpoint`.
    pub fn rewind_to(&mut self, checkpoint: usize) {
        self.trail.rewind_to(checkpoint, &mut self.state.row);
    }

    /// Unassign every column and empty the trail.
    pub fn reset_row(&mut self) {
        self.rewind_to(0);
        self.trail.clear();
    }

    /// The assigned columns of the row, in column order.
    pub fn current_row(&self) -> ParameterValueTuple {
        self.memo
            .columns
            .iter()
            .zip(&self.state.row)
            .filter_map(|(column, cell)| {
                cell.map(|value| (column.parameter, column.values[value].clone()))
            })
            .collect()
    }

    /// The filter accepts the (possibly partial) row.
    pub fn row_passes(&self) -> bool {
        self.memo.filter.check(&self.current_row(), Reason::silent())
    }

    /// Open pairs that choosing `value` for `column` would cover, given the
    /// columns already assigned.
    pub fn gain(&self, column: usize, value: usize) -> usize {
        self.state
            .row
            .iter()
            .enumerate()
            .filter(|&(other, _)| other != column)
            .filter_map(|(other, cell)| cell.map(|chosen| (other, chosen)))
            .filter(|&other| {
                self.state
                    .is_open(self.memo.pair_index((column, value), other))
            })
            .count()
    }

    /// The value indices of `column`, best first.
    ///
    /// Ordered by [`gain`](Self::gain) descending, then by the number of open
    /// pairs of the value descending, then by index.
    pub fn ranked_candidates(&self, column: usize) -> Vec<usize> {
        let mut ranked: Vec<(usize, usize, usize)> = (0..self.memo.columns[column].values.len())
            .map(|value| {
                (
                    self.gain(column, value),
                    self.state.open[column][value],
                    value,
                )
            })
            .collect();
        ranked.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)).then(a.2.cmp(&b.2)));
        ranked.into_iter().map(|(_, _, value)| value).collect()
    }

    /// Close an open pair, updating the per-value open counts.
    fn close_pair(&mut self, pair: usize, first: (usize, usize), second: (usize, usize)) {
        if self.state.is_open(pair) {
            self.state.open[first.0][first.1] -= 1;
            self.state.open[second.0][second.1] -= 1;
        }
    }

    /// Give up on a pair: no valid row containing it exists, or none was found.
    pub fn mark_infeasible(&mut self, first: (usize, usize), second: (usize, usize)) {
        let pair = self.memo.pair_index(first, second);
        self.close_pair(pair, first, second);
        self.state.infeasible[pair] = true;
    }

    /// Record the fully assigned row as a result and mark its pairs covered.
    ///
    /// Returns the number of pairs it newly covers, or `None` if some column
    /// is unassigned.
    pub fn commit_row(&mut self) -> Option<usize> {
        let row: Vec<usize> = self.state.row.iter().copied().collect::<Option<_>>()?;
        let mut newly_covered = 0;
        for i in 0..row.len() {
            for j in i + 1..row.len() {
                let (first, second) = ((i, row[i]), (j, row[j]));
                let pair = self.memo.pair_index(first, second);
                if self.state.is_open(pair) {
                    newly_covered += 1;
                }
                self.close_pair(pair, first, second);
                self.state.covered[pair] = true;
            }
        }
        self.state.rows.push(row);
        Some(newly_covered)
    }

    /// The committed rows, as parameter-value tuples in column order.
    pub fn committed_rows(&self) -> Vec<ParameterValueTuple> {
        self.state
            .rows
            .iter()
            .map(|row| {
                self.memo
                    .columns
                    .iter()
                    .zip(row)
                    .map(|(column, &value)| (column.parameter, column.values[value].clone()))
                    .collect()
            })
            .collect()
    }
}

// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Mutable search state (Tier 2: DYNAMIC).

use super::MemoizedData;
use crate::trail::Cell;

/// Coverage bookkeeping and the row under construction.
///
/// Only `row` is trail-tracked. Coverage changes when a row is committed or a
/// pair is given up, both of which happen outside the engine.
#[derive(Debug, Clone)]
pub struct DynamicState {
    /// Chosen value index per column.
    pub row: Vec<Cell>,
    /// Per pair index: some committed row contains the pair.
    pub covered: Vec<bool>,
    /// Per pair index: no valid row containing the pair was found.
    pub infeasible: Vec<bool>,
    /// Per column and value: pairs of that value that are neither covered nor infeasible.
    pub open: Vec<Vec<usize>>,
    /// Committed rows as value indices per column.
    pub rows: Vec<Vec<usize>>,
}

impl DynamicState {
    pub fn new(memo: &MemoizedData<'_>) -> Self {
        let columns = &memo.columns;
        let mut open: Vec<Vec<usize>> = columns.iter().map(|c| vec![0; c.values.len()]).collect();
        for i in 0..columns.len() {
            for j in i + 1..columns.len() {
                let (len_i, len_j) = (columns[i].values.len(), columns[j].values.len());
                for count in open[i].iter_mut() {
                    *count += len_j;
                }
                for count in open[j].iter_mut() {
                    *count += len_i;
                }
            }
        }
        Self {
            row: vec![None; columns.len()],
            covered: vec![false; memo.pair_count()],
            infeasible: vec![false; memo.pair_count()],
            open,
            rows: Vec::new(),
        }
    }

    pub fn is_open(&self, pair: usize) -> bool {
        !self.covered[pair] && !self.infeasible[pair]
    }
}

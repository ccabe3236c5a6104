// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Expected-Pairs Oracle.
//!
//! Computes, without running the generator, the pairs of values that every
//! correct combination list must contain:
//!
//! 1. enumerate every pair of values from two different columns;
//! 2. remove the pairs each rule family forbids (see [`rules`]);
//! 3. remove the pairs that no complete row can carry (see [`closure`]).
//!
//! Every removal partitions the working list; removed pairs are kept in
//! [`ExpectedPairs::removed`] for diagnostics.

pub mod closure;
pub mod pattern;
pub mod removal;
pub mod rules;

pub use pattern::{Match, ValuePattern, VersionMatch};
pub use removal::{
    remove_parameter_value_pairs, remove_parameter_value_pairs_ranges,
    remove_support_table_violations, remove_support_table_violations_with, Edge, PartitionEdges,
};

use tracing::info;

use crate::error::Result;
use crate::model::{ParameterValueMatrix, ParameterValuePair};
use rules::PairRemoval;

/// The oracle's verdict for one matrix.
#[derive(Debug, Clone, Default)]
pub struct ExpectedPairs {
    /// Pairs every correct combination list contains.
    pub kept: Vec<ParameterValuePair>,
    /// Pairs removed along the way, in removal order.
    pub removed: Vec<ParameterValuePair>,
}

/// Every pair of values from two different columns, columns in matrix order.
pub fn get_all_parameter_value_pairs(matrix: &ParameterValueMatrix) -> Vec<ParameterValuePair> {
    let columns: Vec<_> = matrix.iter().collect();
    let mut pairs = Vec::new();
    for (i, (first_parameter, first_values)) in columns.iter().enumerate() {
        for (second_parameter, second_values) in &columns[i + 1..] {
            for first in first_values.iter() {
                for second in second_values.iter() {
                    pairs.push(ParameterValuePair::new(
                        *first_parameter,
                        first.clone(),
                        *second_parameter,
                        second.clone(),
                    ));
                }
            }
        }
    }
    pairs
}

/// Apply every rule family to `pairs`, moving forbidden pairs to `removed`.
///
/// The result equals checking each pair as a two-entry row against the
/// filter chain of a run over `matrix` (SDK availability included when the
/// matrix has a CUDA column).
pub fn remove_invalid_pairs(
    matrix: &ParameterValueMatrix,
    pairs: &mut Vec<ParameterValuePair>,
    removed: &mut Vec<ParameterValuePair>,
) -> Result<()> {
    let mut work = PairRemoval { pairs, removed };
    rules::remove_compiler_pairs(&mut work, matrix)?;
    rules::remove_backend_pairs(&mut work, matrix)?;
    rules::remove_software_pairs(&mut work)?;
    rules::remove_availability_pairs(&mut work, matrix);
    Ok(())
}

/// The pairs a correct combination list for `matrix` must contain.
///
/// Custom filters are not known to the oracle; callers that add one must
/// remove the pairs it forbids themselves.
pub fn get_expected_parameter_value_pairs(matrix: &ParameterValueMatrix) -> Result<ExpectedPairs> {
    let mut kept = get_all_parameter_value_pairs(matrix);
    let total = kept.len();
    let mut removed = Vec::new();
    remove_invalid_pairs(matrix, &mut kept, &mut removed)?;
    let after_rules = kept.len();
    closure::remove_unreachable_pairs(matrix, &mut kept, &mut removed);
    info!(
        total,
        after_rules,
        expected = kept.len(),
        "expected parameter-value pairs"
    );
    Ok(ExpectedPairs { kept, removed })
}

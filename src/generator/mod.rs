// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Pairwise Generator.
//!
//! Turns a [`ParameterValueMatrix`] into a [`CombinationList`] in which every
//! pair of values the filter chain allows in some complete row appears at
//! least once. The caller's matrix is never modified: values that may never
//! appear in a column are removed from a copy before the search starts.

pub mod pairwise;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::context::CoverageContext;
use crate::filter::{FilterChain, RowFilter, SdkAvailability};
use crate::model::{CombinationList, Compiler, Parameter, ParameterValueMatrix};
use crate::state::{Counters, Statistics};
use crate::versions::clang_cuda_minimum;

/// Choice attempts allowed while completing the row for one target pair.
pub const DEFAULT_SEARCH_BUDGET: usize = 10_000;

/// Tuning knobs of the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Choice attempts per target pair before it is given up.
    pub search_budget: usize,
    /// Prune clang-cuda rows against the CUDA SDKs present in the matrix.
    pub sdk_availability: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            search_budget: DEFAULT_SEARCH_BUDGET,
            sdk_availability: true,
        }
    }
}

/// The rows of one run, with the search counters.
#[derive(Debug, Clone, Serialize)]
pub struct Generation {
    pub combinations: CombinationList,
    pub statistics: Statistics,
}

/// A copy of `matrix` without values that may never appear in their column:
/// nvcc as host compiler, and clang-cuda releases older than the supported
/// minimum in either compiler column.
pub fn prefilter_matrix(matrix: &ParameterValueMatrix) -> ParameterValueMatrix {
    let mut matrix = matrix.clone();
    matrix.retain_values(Parameter::HostCompiler, |value| !value.is_compiler(Compiler::Nvcc));
    let minimum = clang_cuda_minimum();
    for parameter in [Parameter::HostCompiler, Parameter::DeviceCompiler] {
        matrix.retain_values(parameter, |value| {
            !(value.is_compiler(Compiler::ClangCuda) && value.version < minimum)
        });
    }
    matrix
}

/// Generate a pairwise covering list with the default configuration.
///
/// `custom` runs after the built-in filter families.
pub fn generate_combination_list(
    matrix: &ParameterValueMatrix,
    custom: Option<&dyn RowFilter>,
) -> CombinationList {
    generate_with_config(matrix, custom, &GeneratorConfig::default()).combinations
}

/// Generate a pairwise covering list.
///
/// Rows are complete and list their parameters in matrix order. A column left
/// empty after pre-filtering yields an empty list.
pub fn generate_with_config(
    matrix: &ParameterValueMatrix,
    custom: Option<&dyn RowFilter>,
    config: &GeneratorConfig,
) -> Generation {
    let matrix = prefilter_matrix(matrix);

    let mut chain = FilterChain::new();
    if let Some(custom) = custom {
        chain = chain.with_custom(custom);
    }
    if config.sdk_availability {
        if let Some(availability) = SdkAvailability::from_matrix(&matrix) {
            debug!(sdks = ?availability.sdks(), "SDK availability pruning enabled");
            chain = chain.with_availability(availability);
        }
    }

    let mut ctx = CoverageContext::from_matrix(&matrix, &chain);
    info!(
        parameters = matrix.len(),
        pairs = ctx.memo.pair_count(),
        "generating pairwise combinations"
    );
    pairwise::cover_pairs(&mut ctx, config.search_budget);

    let combinations = ctx.committed_rows();
    info!(
        rows = combinations.len(),
        infeasible_pairs = ctx.statistics.get(Counters::InfeasiblePairs),
        budget_exhausted = ctx.statistics.get(Counters::BudgetExhausted),
        "generation finished"
    );
    Generation {
        combinations,
        statistics: ctx.statistics,
    }
}

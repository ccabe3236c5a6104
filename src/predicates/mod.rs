// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search predicates.
//!
//! # Organization
//!
//! - `assign`: AssignColumnsPredicate, which completes a row around a target pair
//! - `test`: Simple column predicates for validating the engine
//! - Built-in predicates: `FailPredicate`, `SuspendPredicate`

pub mod assign;

pub use assign::AssignColumnsPredicate;

use crate::context::CoverageContext;
use crate::engine::{Predicate, PredicateResult, TerminalPredicate};

/// Built-in fail predicate (Prolog's `fail.`).
///
/// Always fails, forcing backtracking. As the last predicate of a program it
/// makes the engine visit every solution, which is how counting predicates
/// enumerate rows.
///
/// # Example
///
/// ```
/// use job_coverage::context::{Column, CoverageContext};
/// use job_coverage::engine::EngineBuilder;
/// use job_coverage::filter::FilterChain;
/// use job_coverage::model::{Parameter, ParameterValue};
/// use job_coverage::predicates::FailPredicate;
/// use job_coverage::predicates::test::ColumnChoicePredicate;
/// use job_coverage::state::{Counters, Statistics};
///
/// let column = Column {
///     parameter: Parameter::CxxStandard,
///     values: ["17", "20", "23"]
///         .iter()
///         .map(|v| ParameterValue::of(Parameter::CxxStandard, v.parse().unwrap()))
///         .collect(),
/// };
/// let chain = FilterChain::new();
/// let mut ctx = CoverageContext::new(vec![column], &chain);
/// let engine = EngineBuilder::new()
///     .add(Box::new(ColumnChoicePredicate::new(0)))
///     .add(Statistics::counting_predicate(Counters::CandidateRows, None))
///     .terminal(Box::new(FailPredicate))
///     .build();
///
/// // Engine will exhaust all values then fail
/// assert!(engine.search(&mut ctx).is_none());
/// assert_eq!(ctx.statistics.get(Counters::CandidateRows), 3);
/// ```
#[derive(Debug)]
pub struct FailPredicate;

impl Predicate for FailPredicate {
    fn try_pred(&mut self, _ctx: &mut CoverageContext<'_>, _round: usize) -> PredicateResult {
        PredicateResult::Failure
    }

    fn retry_pred(
        &mut self,
        _ctx: &mut CoverageContext<'_>,
        _round: usize,
        _choice: usize,
    ) -> PredicateResult {
        PredicateResult::Failure
    }

    fn name(&self) -> &str {
        "Fail"
    }
}

impl TerminalPredicate for FailPredicate {}

/// Built-in suspend predicate.
///
/// Hands the current state of the context to the caller. The row search ends
/// with it: reaching it means the row is complete and valid.
#[derive(Debug)]
pub struct SuspendPredicate;

impl Predicate for SuspendPredicate {
    fn try_pred(&mut self, _ctx: &mut CoverageContext<'_>, _round: usize) -> PredicateResult {
        PredicateResult::Suspend
    }

    fn retry_pred(
        &mut self,
        _ctx: &mut CoverageContext<'_>,
        _round: usize,
        _choice: usize,
    ) -> PredicateResult {
        PredicateResult::Failure
    }

    fn name(&self) -> &str {
        "Suspend"
    }
}

impl TerminalPredicate for SuspendPredicate {}

// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! AssignColumnsPredicate: complete a seeded row, one column per round.

use tracing::trace;

use crate::context::CoverageContext;
use crate::engine::{Predicate, PredicateResult};
use crate::state::Counters;

/// Assigns the columns of `order`, one per round, keeping the partial row
/// valid after every assignment.
///
/// Round `r` offers the values of `order[r]` best first (see
/// [`CoverageContext::ranked_candidates`]). Each choice is checked against
/// the filter immediately, so whole subtrees are cut as soon as a partial row
/// is rejected. Once every column is assigned the predicate succeeds.
///
/// The search is bounded by `budget` choice attempts. When it runs out, every
/// remaining call fails so the engine unwinds quickly; the exhaustion is
/// counted in [`Counters::BudgetExhausted`].
#[derive(Debug)]
pub struct AssignColumnsPredicate {
    order: Vec<usize>,
    /// Ranked value indices offered in each round so far.
    candidates: Vec<Vec<usize>>,
    budget: usize,
    attempts: usize,
    exhausted: bool,
}

impl AssignColumnsPredicate {
    pub fn new(order: Vec<usize>, budget: usize) -> Self {
        let rounds = order.len();
        Self {
            order,
            candidates: Vec::with_capacity(rounds),
            budget,
            attempts: 0,
            exhausted: false,
        }
    }

    pub fn budget_exhausted(&self) -> bool {
        self.exhausted
    }
}

impl Predicate for AssignColumnsPredicate {
    fn try_pred(&mut self, ctx: &mut CoverageContext<'_>, round: usize) -> PredicateResult {
        if self.exhausted {
            return PredicateResult::Failure;
        }
        let Some(&column) = self.order.get(round) else {
            return PredicateResult::Success;
        };
        let ranked = ctx.ranked_candidates(column);
        if ranked.is_empty() {
            return PredicateResult::Failure;
        }
        let count = ranked.len();
        self.candidates.truncate(round);
        self.candidates.push(ranked);
        PredicateResult::Choices(count)
    }

    fn retry_pred(
        &mut self,
        ctx: &mut CoverageContext<'_>,
        round: usize,
        choice: usize,
    ) -> PredicateResult {
        if self.exhausted {
            return PredicateResult::Failure;
        }
        self.attempts += 1;
        if self.attempts > self.budget {
            self.exhausted = true;
            ctx.statistics.increment(Counters::BudgetExhausted);
            return PredicateResult::Failure;
        }

        let column = self.order[round];
        let value = self.candidates[round][choice];
        ctx.assign(column, value);
        if ctx.row_passes() {
            PredicateResult::SuccessSamePredicate
        } else {
            trace!(column, value, "partial row rejected");
            ctx.statistics.increment(Counters::FilterRejections);
            PredicateResult::Failure
        }
    }

    fn name(&self) -> &str {
        "AssignColumns"
    }
}

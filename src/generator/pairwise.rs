// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Greedy pairwise covering over a [`CoverageContext`].
//!
//! Target pairs are visited in column order. For each pair still open, the
//! row is seeded with the two values and the engine completes it, preferring
//! values that cover the most open pairs. A completed row is committed; a
//! pair for which no row is found is marked infeasible. Every pair the filter
//! allows in some full row therefore ends up covered, unless the per-target
//! search budget runs out first.

use tracing::{debug, trace, warn};

use crate::context::CoverageContext;
use crate::engine::EngineBuilder;
use crate::predicates::{AssignColumnsPredicate, SuspendPredicate};
use crate::state::{Counters, Statistics};

/// Cover every feasible pair of `ctx`'s columns with committed rows.
pub fn cover_pairs(ctx: &mut CoverageContext<'_>, budget: usize) {
    let columns = ctx.column_count();
    if let Some(empty) = ctx.memo.columns.iter().find(|c| c.values.is_empty()) {
        debug!(parameter = %empty.parameter, "column has no values, nothing to cover");
        return;
    }
    match columns {
        0 => {}
        1 => cover_values(ctx),
        _ => {
            for i in 0..columns {
                for j in i + 1..columns {
                    for a in 0..ctx.memo.columns[i].values.len() {
                        for b in 0..ctx.memo.columns[j].values.len() {
                            cover_pair(ctx, (i, a), (j, b), budget);
                        }
                    }
                }
            }
        }
    }
    ctx.reset_row();
}

/// With a single column there are no pairs; emit each value the filter accepts.
fn cover_values(ctx: &mut CoverageContext<'_>) {
    for value in 0..ctx.memo.columns[0].values.len() {
        ctx.reset_row();
        ctx.assign(0, value);
        if ctx.row_passes() {
            ctx.commit_row();
        }
    }
}

fn describe(ctx: &CoverageContext<'_>, (column, value): (usize, usize)) -> String {
    let column = &ctx.memo.columns[column];
    format!("{}={}", column.parameter, column.values[value])
}

fn cover_pair(
    ctx: &mut CoverageContext<'_>,
    first: (usize, usize),
    second: (usize, usize),
    budget: usize,
) {
    let pair = ctx.memo.pair_index(first, second);
    if !ctx.state.is_open(pair) {
        return;
    }

    ctx.reset_row();
    ctx.assign(first.0, first.1);
    ctx.assign(second.0, second.1);
    if !ctx.row_passes() {
        trace!(
            first = %describe(ctx, first),
            second = %describe(ctx, second),
            "pair rejected outright"
        );
        ctx.statistics.increment(Counters::InfeasiblePairs);
        ctx.mark_infeasible(first, second);
        return;
    }

    let order = ctx.memo.assignment_order(&[first.0, second.0]);
    let exhausted_before = ctx.statistics.get(Counters::BudgetExhausted);
    let engine = EngineBuilder::new()
        .add(Box::new(AssignColumnsPredicate::new(order, budget)))
        .add(Statistics::counting_predicate(Counters::CandidateRows, None))
        .terminal(Box::new(SuspendPredicate))
        .build();

    if engine.search(ctx).is_some() {
        let newly_covered = ctx.commit_row().unwrap_or(0);
        debug!(row = %ctx.current_row(), newly_covered, "row committed");
    } else {
        if ctx.statistics.get(Counters::BudgetExhausted) > exhausted_before {
            warn!(
                first = %describe(ctx, first),
                second = %describe(ctx, second),
                budget,
                "search budget exhausted, pair left uncovered"
            );
        } else {
            trace!(
                first = %describe(ctx, first),
                second = %describe(ctx, second),
                "no valid row contains pair"
            );
        }
        ctx.statistics.increment(Counters::InfeasiblePairs);
        ctx.mark_infeasible(first, second);
    }
}

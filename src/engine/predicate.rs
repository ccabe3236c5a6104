// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Predicate trait for non-deterministic search.
//!
//! The search engine works by trying predicates in sequence. Each predicate
//! represents a choice point in the search space. Predicates can succeed,
//! fail, or offer choices.
//!
//! # Example
//!
//! ```
//! use job_coverage::context::CoverageContext;
//! use job_coverage::engine::{Predicate, PredicateResult};
//!
//! /// Chooses each value of one column in turn.
//! #[derive(Debug)]
//! struct EachValue {
//!     column: usize,
//! }
//!
//! impl Predicate for EachValue {
//!     fn try_pred(&mut self, ctx: &mut CoverageContext<'_>, _round: usize) -> PredicateResult {
//!         PredicateResult::Choices(ctx.memo.columns[self.column].values.len())
//!     }
//!
//!     fn retry_pred(&mut self, ctx: &mut CoverageContext<'_>, _round: usize, choice: usize) -> PredicateResult {
//!         ctx.assign(self.column, choice);
//!         PredicateResult::Success
//!     }
//!
//!     fn name(&self) -> &str {
//!         "EachValue"
//!     }
//! }
//! ```

use crate::context::CoverageContext;
use std::fmt::Debug;

/// Result of attempting a predicate.
///
/// Predicates can return:
/// - `Success`: Move to next predicate in the sequence
/// - `SuccessSamePredicate`: Stay at same predicate, increment round (for iterative predicates)
/// - `Failure`: Backtrack to previous predicate
/// - `Choices(n)`: Predicate has n choices to explore via retry_pred
/// - `Suspend`: Pause execution and hand the state to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateResult {
    /// Predicate succeeded. Move to next predicate in sequence.
    Success,

    /// Predicate succeeded but stay at same predicate with next round.
    /// Allows a single predicate to execute multiple times (e.g., once per column).
    SuccessSamePredicate,

    /// Predicate has no (more) valid choices. Backtrack to previous predicate.
    Failure,

    /// Predicate has multiple choices to explore.
    /// Engine will call retry_pred(round, choice) for each choice in 0..n.
    Choices(usize),

    /// Suspend execution. Engine returns control with state preserved.
    Suspend,
}

/// A terminal predicate that ends a predicate program.
///
/// Terminal predicates fail or suspend; they never return Success.
/// [`EngineBuilder`](super::EngineBuilder) only builds programs that end in one.
pub trait TerminalPredicate: Predicate {}

/// Trait for search predicates in the non-deterministic engine.
///
/// Each predicate represents a choice point in the search. The engine
/// calls `try_pred` to attempt the predicate for the first time, and
/// `retry_pred` on backtracking to try alternative choices.
///
/// # Lifecycle
///
/// 1. Engine calls `try_pred` when first encountering the predicate
/// 2. If Success: engine advances to next predicate
/// 3. If Failure: engine backtracks to previous predicate
/// 4. On backtrack: engine calls `retry_pred` to try next option
/// 5. Repeat until Success (advance) or Failure (backtrack)
///
/// # Trail Integration
///
/// Row assignments made through [`CoverageContext::assign`] are recorded on
/// the trail. The engine rewinds to the checkpoint of a stack entry before
/// calling into it again, so a retried choice always starts from the row as
/// it was when the choices were offered.
pub trait Predicate: Debug {
    /// Try this predicate for a given round.
    ///
    /// The round starts at 0 and increments each time the predicate returns
    /// `SuccessSamePredicate`.
    fn try_pred(&mut self, ctx: &mut CoverageContext<'_>, round: usize) -> PredicateResult;

    /// Retry this predicate with a specific choice.
    ///
    /// Called after try_pred returns Choices(n), for each choice in 0..n.
    /// Cannot return Choices or Suspend.
    #[allow(unused)]
    fn retry_pred(
        &mut self,
        ctx: &mut CoverageContext<'_>,
        round: usize,
        choice: usize,
    ) -> PredicateResult {
        // Predicates that return Choices must implement this.
        panic!("{}::retry_pred should never be called", self.name());
    }

    /// Get a name for this predicate (for debugging).
    ///
    /// Default implementation returns the type name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

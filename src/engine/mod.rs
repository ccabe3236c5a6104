// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Non-deterministic search engine.
//!
//! This module implements a backtracking search engine that runs predicates
//! in sequence. The engine coordinates with the trail to restore the row under
//! construction on backtracking.
//!
//! # Architecture
//!
//! The engine maintains a stack of predicate execution states. Each stack entry tracks:
//! - Which predicate is executing
//! - Current round number (for predicates that execute multiple times)
//! - Choice mode state (whether we're trying alternatives)
//! - Current choice index (when in choice mode)
//!
//! Execution model:
//! 1. Call try_pred(round) on each predicate
//! 2. If Success: advance to next predicate
//! 3. If SuccessSamePredicate: increment round, stay at same predicate
//! 4. If Choices(n): enter choice mode, call retry_pred(round, 0..n-1)
//! 5. If Failure: backtrack to the previous stack entry; entries that
//!    succeeded without choices are popped, choice entries try their next choice
//! 6. If Suspend: pause and return control to caller
//!
//! # Example
//!
//! ```
//! use job_coverage::context::CoverageContext;
//! use job_coverage::engine::{EngineBuilder, Predicate, PredicateResult};
//! use job_coverage::filter::FilterChain;
//! use job_coverage::predicates::SuspendPredicate;
//!
//! #[derive(Debug)]
//! struct SimplePredicate;
//!
//! impl Predicate for SimplePredicate {
//!     fn try_pred(&mut self, _ctx: &mut CoverageContext<'_>, _round: usize) -> PredicateResult {
//!         PredicateResult::Success
//!     }
//! }
//!
//! let chain = FilterChain::new();
//! let mut ctx = CoverageContext::new(Vec::new(), &chain);
//! // Every program ends with a terminal predicate.
//! let engine = EngineBuilder::new()
//!     .add(Box::new(SimplePredicate))
//!     .terminal(Box::new(SuspendPredicate))
//!     .build();
//!
//! // Engine is consumed, returns Some(engine) if suspended
//! if let Some(engine) = engine.search(&mut ctx) {
//!     assert_eq!(engine.statistics(), (2, 0));
//! }
//! ```

pub mod predicate;

pub use predicate::{Predicate, PredicateResult, TerminalPredicate};

use crate::context::CoverageContext;

/// Maximum depth of the predicate stack.
const MAX_STACK_SIZE: usize = 1000;

/// Stack entry tracking the state of one predicate execution.
#[derive(Debug)]
struct StackEntry {
    /// Index of the predicate in the predicates list.
    predicate_index: usize,

    /// Current round number (incremented by SuccessSamePredicate).
    round: usize,

    /// Whether we're in choice mode (exploring alternatives).
    in_choice_mode: bool,

    /// Current choice being tried (when in_choice_mode is true).
    current_choice: usize,

    /// Total number of choices (when in_choice_mode is true).
    num_choices: usize,

    /// Trail checkpoint for this stack entry.
    trail_checkpoint: usize,
}

impl StackEntry {
    fn call(predicate_index: usize, round: usize, trail_checkpoint: usize) -> Self {
        Self {
            predicate_index,
            round,
            in_choice_mode: false,
            current_choice: 0,
            num_choices: 0,
            trail_checkpoint,
        }
    }
}

/// Search engine that coordinates predicate execution and backtracking.
#[derive(Debug)]
pub struct SearchEngine {
    /// List of predicates to execute in sequence.
    predicates: Vec<Box<dyn Predicate>>,

    /// Stack of predicate execution states.
    stack: Vec<StackEntry>,

    /// Statistics: number of try_pred calls.
    try_count: u64,

    /// Statistics: number of retry_pred calls (backtracks).
    retry_count: u64,
}

impl SearchEngine {
    /// Create a new search engine with the given predicates.
    ///
    /// Predicates will be tried in the order given. Prefer [`EngineBuilder`],
    /// which guarantees the sequence ends in a terminal predicate.
    pub fn new(predicates: Vec<Box<dyn Predicate>>) -> Self {
        Self {
            predicates,
            stack: Vec::with_capacity(MAX_STACK_SIZE),
            try_count: 0,
            retry_count: 0,
        }
    }

    /// Run the search to find one solution.
    ///
    /// Consumes the engine and returns:
    /// - `Some(engine)` if suspended: the solution is the state of `ctx`
    /// - `None` if exhausted (backtracked past first predicate)
    ///
    /// # Panics
    ///
    /// Panics if the predicate sequence reaches its end without failing or
    /// suspending, or if a `retry_pred` returns Choices or Suspend.
    pub fn search(mut self, ctx: &mut CoverageContext<'_>) -> Option<Self> {
        self.stack.clear();
        self.try_count = 0;
        self.retry_count = 0;

        if self.predicates.is_empty() {
            return None;
        }

        self.stack
            .push(StackEntry::call(0, 0, ctx.trail.checkpoint()));

        loop {
            // Backtracked past the first predicate: exhausted.
            let entry = self.stack.last_mut()?;

            ctx.rewind_to(entry.trail_checkpoint);

            if !entry.in_choice_mode {
                let (pred_idx, round) = (entry.predicate_index, entry.round);
                self.try_count += 1;
                let result = self.predicates[pred_idx].try_pred(ctx, round);

                match result {
                    PredicateResult::Success => {
                        self.mark_exhausted();
                        self.push_next_predicate(ctx);
                    }
                    PredicateResult::SuccessSamePredicate => {
                        self.mark_exhausted();
                        self.push_same_predicate(ctx);
                    }
                    PredicateResult::Failure => {
                        self.stack.pop();
                    }
                    PredicateResult::Choices(n) => {
                        if let Some(entry) = self.stack.last_mut() {
                            entry.in_choice_mode = true;
                            entry.current_choice = 0;
                            entry.num_choices = n;
                            entry.trail_checkpoint = ctx.trail.checkpoint();
                        }
                    }
                    PredicateResult::Suspend => return Some(self),
                }
            } else {
                if entry.current_choice >= entry.num_choices {
                    self.stack.pop();
                    continue;
                }

                let (pred_idx, round, choice) =
                    (entry.predicate_index, entry.round, entry.current_choice);
                entry.current_choice += 1;
                self.retry_count += 1;
                let result = self.predicates[pred_idx].retry_pred(ctx, round, choice);

                match result {
                    PredicateResult::Success => self.push_next_predicate(ctx),
                    PredicateResult::SuccessSamePredicate => self.push_same_predicate(ctx),
                    PredicateResult::Failure => {
                        // Next choice on the next iteration.
                    }
                    PredicateResult::Choices(_) | PredicateResult::Suspend => {
                        panic!("retry_pred returned invalid result: {:?}", result);
                    }
                }
            }
        }
    }

    /// A deterministic success has no alternatives: backtracking into the
    /// entry pops it instead of calling `try_pred` again.
    fn mark_exhausted(&mut self) {
        if let Some(entry) = self.stack.last_mut() {
            entry.in_choice_mode = true;
            entry.current_choice = 0;
            entry.num_choices = 0;
        }
    }

    /// Push a new stack entry for the next predicate in sequence.
    fn push_next_predicate(&mut self, ctx: &CoverageContext<'_>) {
        let Some(current) = self.stack.last() else {
            return;
        };
        let next_index = current.predicate_index + 1;

        if next_index >= self.predicates.len() {
            panic!(
                "Invalid predicate sequence: reached end without FAIL or SUSPEND. \
                 Every predicate program must end with a terminal predicate."
            );
        }

        self.stack
            .push(StackEntry::call(next_index, 0, ctx.trail.checkpoint()));
    }

    /// Push a new stack entry for the same predicate with incremented round.
    fn push_same_predicate(&mut self, ctx: &CoverageContext<'_>) {
        let Some(current) = self.stack.last() else {
            return;
        };
        let entry = StackEntry::call(
            current.predicate_index,
            current.round + 1,
            ctx.trail.checkpoint(),
        );
        if self.stack.len() >= MAX_STACK_SIZE {
            panic!("Predicate stack overflow: exceeded {} entries", MAX_STACK_SIZE);
        }
        self.stack.push(entry);
    }

    /// Get statistics about the search.
    ///
    /// Returns (try_count, retry_count) showing how many times predicates
    /// were tried and retried.
    pub fn statistics(&self) -> (u64, u64) {
        (self.try_count, self.retry_count)
    }
}

/// Builds a [`SearchEngine`] whose program is guaranteed to end in a
/// [`TerminalPredicate`].
#[derive(Debug, Default)]
pub struct EngineBuilder {
    predicates: Vec<Box<dyn Predicate>>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a predicate to the program.
    pub fn add(mut self, predicate: Box<dyn Predicate>) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// End the program with a terminal predicate.
    pub fn terminal<T: TerminalPredicate + 'static>(mut self, predicate: Box<T>) -> TerminatedProgram {
        self.predicates.push(predicate);
        TerminatedProgram {
            predicates: self.predicates,
        }
    }
}

/// A predicate program with its terminal predicate in place.
#[derive(Debug)]
pub struct TerminatedProgram {
    predicates: Vec<Box<dyn Predicate>>,
}

impl TerminatedProgram {
    pub fn build(self) -> SearchEngine {
        SearchEngine::new(self.predicates)
    }
}

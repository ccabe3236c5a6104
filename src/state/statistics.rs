// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Statistics are stored in the context, and can be incremented by special predicates,
//! or by additional methods.

use std::fmt;

use serde::Serialize;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter, IntoStaticStr};

use crate::context::CoverageContext;
use crate::engine::{Predicate, PredicateResult};

#[derive(Debug, EnumCountMacro, EnumIter, Display, IntoStaticStr, Copy, Clone, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum Counters {
    /// Fully assigned rows reached by the search.
    CandidateRows,
    /// Partial rows the filter rejected during the search.
    FilterRejections,
    /// Target pairs for which no row was found.
    InfeasiblePairs,
    /// Target pairs abandoned because the search budget ran out.
    BudgetExhausted,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Statistics {
    stats: [u64; Counters::COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// A predicate that will increment the given counter, whenever a condition holds (or always).
    pub fn counting_predicate(
        counter: Counters,
        filter: Option<fn(&CoverageContext<'_>) -> bool>,
    ) -> Box<dyn Predicate> {
        Box::new(CountingPredicate {
            filter: filter.unwrap_or(|_ctx| true),
            counter,
        })
    }

    /// Increment the specified counter by 1.
    pub fn increment(&mut self, counter: Counters) {
        self.stats[counter as usize] += 1;
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize]
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for counter in Counters::iter() {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{}={}", counter, self.get(counter))?;
        }
        Ok(())
    }
}

impl Serialize for Statistics {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(Counters::COUNT))?;
        for counter in Counters::iter() {
            let name: &'static str = counter.into();
            map.serialize_entry(name, &self.get(counter))?;
        }
        map.end()
    }
}

struct CountingPredicate {
    filter: fn(&CoverageContext<'_>) -> bool,
    counter: Counters,
}

impl fmt::Debug for CountingPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountingPredicate")
            .field("counter", &self.counter)
            .finish()
    }
}

impl Predicate for CountingPredicate {
    fn try_pred(&mut self, ctx: &mut CoverageContext<'_>, _round: usize) -> PredicateResult {
        if (self.filter)(ctx) {
            ctx.statistics.increment(self.counter);
        }
        PredicateResult::Success
    }

    fn name(&self) -> &str {
        "Counting"
    }
}

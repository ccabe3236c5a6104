// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Row filters.
//!
//! A filter looks at a possibly partial [`ParameterValueTuple`] and decides
//! whether it can still become a valid job. A filter that needs a parameter
//! the row does not assign yet passes: it cannot judge. On rejection a filter
//! writes one sentence to its [`Reason`] sink, if the caller provided one.
//!
//! The families, in chain order:
//!
//! 1. [`compiler_filter`]: host/device pairing, nvcc host tables, C++ ceilings
//! 2. [`backend_filter`]: backend exclusion and backend/compiler binding
//! 3. [`software_dependency_filter`]: CUDA availability per Ubuntu release
//! 4. [`SdkAvailability`]: clang-cuda needs a requested CUDA SDK that fits
//! 5. an optional caller-supplied filter

pub mod availability;
pub mod backend;
pub mod chain;
pub mod compiler;
pub mod software;

pub use availability::SdkAvailability;
pub use backend::backend_filter;
pub use chain::{typecheck_row, FilterChain, FilterStage, StageOutcome};
pub use compiler::compiler_filter;
pub use software::software_dependency_filter;

use std::fmt::{self, Write};

use crate::model::ParameterValueTuple;

/// Optional sink for a rejection reason.
///
/// Filters take the sink by value and hand a [`reborrow`](Self::reborrow) to
/// nested checks, so only the check that rejects writes.
#[derive(Debug, Default)]
pub struct Reason<'a>(Option<&'a mut String>);

impl<'a> Reason<'a> {
    /// Discard reasons.
    pub fn silent() -> Self {
        Self(None)
    }

    /// Append reasons to `sink`.
    pub fn to(sink: &'a mut String) -> Self {
        Self(Some(sink))
    }

    pub fn from_option(sink: Option<&'a mut String>) -> Self {
        Self(sink)
    }

    pub fn reborrow(&mut self) -> Reason<'_> {
        Reason(self.0.as_deref_mut())
    }

    pub fn is_silent(&self) -> bool {
        self.0.is_none()
    }

    /// Record `message` and return `false`, for `return reason.reject(...)`.
    ///
    /// The message is only formatted when a sink is present.
    pub fn reject(self, message: fmt::Arguments<'_>) -> bool {
        if let Some(sink) = self.0 {
            // Writing to a String cannot fail.
            let _ = sink.write_fmt(message);
        }
        false
    }
}

/// A boolean rule over rows.
pub trait RowFilter {
    /// `true` if `row` may still be (or become) a valid job.
    fn check(&self, row: &ParameterValueTuple, reason: Reason<'_>) -> bool;

    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// A named closure usable as a [`RowFilter`].
///
/// ```
/// use job_coverage::filter::{FnFilter, Reason, RowFilter};
/// use job_coverage::model::{Parameter, ParameterValueTuple};
///
/// let no_old_cmake = FnFilter::new("no_old_cmake", |row, reason| {
///     match row.version(Parameter::Cmake) {
///         Some(v) if v.to_string() == "3.22" => reason.reject(format_args!("cmake 3.22 is excluded")),
///         _ => true,
///     }
/// });
/// assert!(no_old_cmake.check(&ParameterValueTuple::new(), Reason::silent()));
/// ```
pub struct FnFilter<F> {
    name: String,
    check: F,
}

impl<F> FnFilter<F>
where
    F: Fn(&ParameterValueTuple, Reason<'_>) -> bool,
{
    pub fn new(name: impl Into<String>, check: F) -> Self {
        Self {
            name: name.into(),
            check,
        }
    }
}

impl<F> RowFilter for FnFilter<F>
where
    F: Fn(&ParameterValueTuple, Reason<'_>) -> bool,
{
    fn check(&self, row: &ParameterValueTuple, reason: Reason<'_>) -> bool {
        (self.check)(row, reason)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<F> fmt::Debug for FnFilter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnFilter").field("name", &self.name).finish()
    }
}

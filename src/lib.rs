// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Pairwise build-matrix generation and validation.
//!
//! A build job is one choice of host and device compiler, backend toggles,
//! CUDA SDK, Ubuntu release, CMake, Boost and C++ standard. Most of the
//! Cartesian product is invalid; this crate knows which combinations are
//! not, and picks a small set of jobs covering every valid pair of values.
//!
//! # Architecture
//!
//! Two independent views of the same compatibility data
//! ([`versions`]) are kept side by side:
//!
//! - **Forward**: the [`filter`] families judge a (possibly partial) row.
//!   The [`generator`] drives a backtracking search with the chain as an
//!   inline pruning predicate.
//! - **Backward**: the [`oracle`] enumerates every pair and removes the
//!   forbidden ones by range arithmetic over the same tables, then removes
//!   pairs no complete row can carry.
//!
//! The [`verify`] module checks the forward output against the backward
//! result.
//!
//! ## Search memory model
//!
//! The combination search follows a two-tier model:
//!
//! - MEMO data (immutable): the columns of the matrix and the dense pair
//!   index, built once per run.
//! - DYNAMIC data (mutable): the partial row, tracked on the [`Trail`] so a
//!   failed choice is undone in O(1) per change, plus the covered and
//!   infeasible pair flags.
//!
//! # Example
//!
//! ```
//! use job_coverage::generator::generate_combination_list;
//! use job_coverage::model::{Parameter, ParameterValueMatrix};
//! use job_coverage::oracle::get_expected_parameter_value_pairs;
//! use job_coverage::verify::verify;
//!
//! let values = |list: &[&str]| list.iter().map(|s| s.parse().unwrap()).collect();
//! let matrix = ParameterValueMatrix::new()
//!     .with(Parameter::HostCompiler, values(&["gcc@10", "gcc@13", "clang@16"]))
//!     .with(Parameter::DeviceCompiler, values(&["gcc@10", "nvcc@11.4", "nvcc@12.0"]));
//!
//! let rows = generate_combination_list(&matrix, None);
//! let expected = get_expected_parameter_value_pairs(&matrix).unwrap();
//! assert!(verify(&rows, &expected.kept, true).is_success());
//! ```

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod filter;
pub mod format;
pub mod generator;
pub mod logging;
pub mod model;
pub mod oracle;
pub mod predicates;
pub mod state;
pub mod trail;
pub mod verify;
pub mod version;
pub mod versions;

// Re-export commonly used types
pub use context::CoverageContext;
pub use engine::{Predicate, PredicateResult, SearchEngine};
pub use error::{CoverageError, Result};
pub use filter::{FilterChain, Reason, RowFilter};
pub use model::{
    CombinationList, Compiler, Parameter, ParameterValue, ParameterValueMatrix,
    ParameterValuePair, ParameterValueTuple,
};
pub use trail::Trail;
pub use version::{Version, VersionRange};

// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types.
//!
//! Only programming errors and malformed input end up here. A row that is
//! well-formed but semantically incompatible is never an error: filters
//! return `false` and write a reason instead.

use thiserror::Error;

/// Errors raised by the version tables, filters and oracle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoverageError {
    /// A version string could not be parsed.
    #[error("invalid version '{input}'")]
    InvalidVersion { input: String },

    /// The software name is not part of any version table.
    #[error("unknown software '{name}'")]
    UnknownSoftware { name: String },

    /// The parameter name does not identify a configuration axis.
    #[error("unknown parameter '{name}'")]
    UnknownParameter { name: String },

    /// The compiler name is not one of the supported compilers.
    #[error("unknown compiler '{name}'")]
    UnknownCompiler { name: String },

    /// A support table violates its ordering or coverage invariants.
    #[error("malformed support table {table}: {detail}")]
    MalformedSupportTable { table: String, detail: String },

    /// A derived range table could not be built from its anchors.
    #[error("malformed range table: {detail}")]
    MalformedRange { detail: String },

    /// A range removal was requested without a lower or an upper bound.
    #[error("range removal for {parameter} needs a lower or an upper version bound")]
    MissingBound { parameter: String },

    /// A row does not have the static shape the filters expect.
    #[error("invalid row entry for {parameter}: {detail}")]
    InvalidRow { parameter: String, detail: String },

    /// A run configuration could not be read.
    #[error("invalid configuration: {detail}")]
    InvalidConfig { detail: String },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CoverageError>;

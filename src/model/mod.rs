// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Parameter-value model.
//!
//! A build job is described by a [`ParameterValueTuple`]: an ordered
//! assignment of [`Parameter`]s to [`ParameterValue`]s. The set of candidate
//! values per parameter is a [`ParameterValueMatrix`]. Pairs of assignments
//! that must (or must not) co-occur are [`ParameterValuePair`]s, whose
//! equality ignores which side a value was stored on.

pub mod names;
pub mod pair;
pub mod row;

pub use names::{Compiler, Parameter, ValueName};
pub use pair::ParameterValuePair;
pub use row::{CombinationList, ParameterValueMatrix, ParameterValueTuple};

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{CoverageError, Result};
use crate::version::Version;

/// One concrete value of a parameter: a software name and its version.
///
/// For the two compiler parameters the name is a [`Compiler`]. For every other
/// parameter the name is the parameter itself, so a CUDA backend value reads
/// `ALPAKA_ACC_GPU_CUDA_ENABLE@11.4`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ParameterValue {
    pub name: ValueName,
    pub version: Version,
}

impl ParameterValue {
    pub fn new(name: ValueName, version: Version) -> Self {
        Self { name, version }
    }

    pub fn compiler(compiler: Compiler, version: Version) -> Self {
        Self::new(ValueName::Compiler(compiler), version)
    }

    /// A value named after its own parameter.
    pub fn of(parameter: Parameter, version: Version) -> Self {
        Self::new(ValueName::Parameter(parameter), version)
    }

    pub fn on(parameter: Parameter) -> Self {
        Self::of(parameter, Version::on())
    }

    pub fn off(parameter: Parameter) -> Self {
        Self::of(parameter, Version::off())
    }

    /// The compiler, if this value names one.
    pub fn as_compiler(&self) -> Option<Compiler> {
        match self.name {
            ValueName::Compiler(compiler) => Some(compiler),
            ValueName::Parameter(_) => None,
        }
    }

    pub fn is_compiler(&self, compiler: Compiler) -> bool {
        self.as_compiler() == Some(compiler)
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// Parses `NAME@VERSION`, e.g. `gcc@10` or `clang-cuda@16`.
impl FromStr for ParameterValue {
    type Err = CoverageError;

    fn from_str(s: &str) -> Result<Self> {
        let Some((name, version)) = s.split_once('@') else {
            return Err(CoverageError::InvalidVersion {
                input: s.to_string(),
            });
        };
        Ok(Self::new(name.trim().parse()?, Version::parse(version)?))
    }
}

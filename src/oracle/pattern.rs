// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Patterns selecting one side of a parameter-value pair.

use std::fmt;

use crate::model::{Parameter, ParameterValue, ValueName};
use crate::version::{Version, VersionRange};

/// Match anything, or exactly one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Match<T> {
    #[default]
    Any,
    Exact(T),
}

impl<T: PartialEq> Match<T> {
    pub fn matches(&self, candidate: &T) -> bool {
        match self {
            Match::Any => true,
            Match::Exact(expected) => expected == candidate,
        }
    }
}

/// Version selector of a [`ValuePattern`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VersionMatch {
    #[default]
    Any,
    Exact(Version),
    Range(VersionRange),
}

impl VersionMatch {
    pub fn matches(&self, version: &Version) -> bool {
        match self {
            VersionMatch::Any => true,
            VersionMatch::Exact(expected) => expected == version,
            VersionMatch::Range(range) => range.contains(version),
        }
    }
}

/// Selects `(parameter, value)` entries by parameter, value name and version.
///
/// ```
/// use job_coverage::model::{Compiler, Parameter, ParameterValue};
/// use job_coverage::oracle::ValuePattern;
/// use job_coverage::version::{Version, VersionRange};
///
/// let old_nvcc = ValuePattern::value(Parameter::DeviceCompiler, Compiler::Nvcc)
///     .range(VersionRange::below(Version::parse("12").unwrap()));
/// let value: ParameterValue = "nvcc@11.8".parse().unwrap();
/// assert!(old_nvcc.matches(Parameter::DeviceCompiler, &value));
/// assert!(!old_nvcc.matches(Parameter::HostCompiler, &value));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValuePattern {
    pub parameter: Match<Parameter>,
    pub name: Match<ValueName>,
    pub version: VersionMatch,
}

impl ValuePattern {
    /// Matches every entry.
    pub fn any() -> Self {
        Self::default()
    }

    /// Every value of `parameter`.
    pub fn parameter(parameter: Parameter) -> Self {
        Self {
            parameter: Match::Exact(parameter),
            ..Self::default()
        }
    }

    /// Every version of `name` under `parameter`.
    pub fn value(parameter: Parameter, name: impl Into<ValueName>) -> Self {
        Self {
            parameter: Match::Exact(parameter),
            name: Match::Exact(name.into()),
            version: VersionMatch::Any,
        }
    }

    /// Restrict to exactly `version`.
    pub fn version(mut self, version: Version) -> Self {
        self.version = VersionMatch::Exact(version);
        self
    }

    /// Restrict to versions inside `range`.
    pub fn range(mut self, range: VersionRange) -> Self {
        self.version = VersionMatch::Range(range);
        self
    }

    pub fn matches(&self, parameter: Parameter, value: &ParameterValue) -> bool {
        self.parameter.matches(&parameter)
            && self.name.matches(&value.name)
            && self.version.matches(&value.version)
    }

    /// The parameter named in error messages.
    pub(crate) fn describe_parameter(&self) -> String {
        match self.parameter {
            Match::Any => "*".to_string(),
            Match::Exact(parameter) => parameter.to_string(),
        }
    }
}

impl fmt::Display for ValuePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.describe_parameter())?;
        match &self.name {
            Match::Any => write!(f, "*")?,
            Match::Exact(name) => write!(f, "{name}")?,
        }
        match &self.version {
            VersionMatch::Any => write!(f, "@*"),
            VersionMatch::Exact(version) => write!(f, "@{version}"),
            VersionMatch::Range(range) => write!(f, "@{range}"),
        }
    }
}

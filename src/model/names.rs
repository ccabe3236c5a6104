// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Parameter and software names.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

use crate::error::{CoverageError, Result};

/// A configuration axis of a build job.
///
/// Variants are declared in matrix order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    AsRefStr,
    IntoStaticStr,
)]
pub enum Parameter {
    #[strum(serialize = "host_compiler")]
    HostCompiler,
    #[strum(serialize = "device_compiler")]
    DeviceCompiler,
    #[strum(serialize = "ALPAKA_ACC_CPU_B_SEQ_T_SEQ_ENABLE")]
    CpuSerial,
    #[strum(serialize = "ALPAKA_ACC_CPU_B_SEQ_T_THREADS_ENABLE")]
    CpuThreads,
    #[strum(serialize = "ALPAKA_ACC_CPU_B_TBB_T_SEQ_ENABLE")]
    CpuTbb,
    #[strum(serialize = "ALPAKA_ACC_CPU_B_OMP2_T_SEQ_ENABLE")]
    CpuOmp2Blocks,
    #[strum(serialize = "ALPAKA_ACC_CPU_B_SEQ_T_OMP2_ENABLE")]
    CpuOmp2Threads,
    #[strum(serialize = "ALPAKA_ACC_GPU_CUDA_ENABLE")]
    GpuCuda,
    #[strum(serialize = "ALPAKA_ACC_GPU_HIP_ENABLE")]
    GpuHip,
    #[strum(serialize = "ALPAKA_ACC_SYCL_ENABLE")]
    Sycl,
    #[strum(serialize = "ubuntu")]
    Ubuntu,
    #[strum(serialize = "cmake")]
    Cmake,
    #[strum(serialize = "boost")]
    Boost,
    #[strum(serialize = "cxx_standard")]
    CxxStandard,
}

impl Parameter {
    /// Parse a parameter name, mapping failures into the crate error.
    pub fn parse(name: &str) -> Result<Self> {
        Self::from_str(name).map_err(|_| CoverageError::UnknownParameter {
            name: name.to_string(),
        })
    }

    /// `host_compiler` or `device_compiler`.
    pub fn is_compiler(self) -> bool {
        matches!(self, Self::HostCompiler | Self::DeviceCompiler)
    }

    /// One of the `ALPAKA_ACC_*` backend toggles.
    pub fn is_backend(self) -> bool {
        matches!(
            self,
            Self::CpuSerial
                | Self::CpuThreads
                | Self::CpuTbb
                | Self::CpuOmp2Blocks
                | Self::CpuOmp2Threads
                | Self::GpuCuda
                | Self::GpuHip
                | Self::Sycl
        )
    }

    /// Backends whose values are restricted to ON and OFF. CUDA carries an SDK version instead.
    pub fn is_on_off_backend(self) -> bool {
        self.is_backend() && self != Self::GpuCuda
    }

    /// Whether any built-in rule reads this parameter.
    pub fn is_constrained(self) -> bool {
        !matches!(self, Self::Cmake | Self::Boost)
    }

    pub fn backends() -> impl Iterator<Item = Parameter> {
        Self::iter().filter(|parameter| parameter.is_backend())
    }
}

impl Serialize for Parameter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_ref())
    }
}

/// Compilers that may appear as host or device compiler.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    AsRefStr,
    IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Compiler {
    Gcc,
    Clang,
    Nvcc,
    ClangCuda,
    Hipcc,
    Icpx,
}

impl Compiler {
    pub fn parse(name: &str) -> Result<Self> {
        Self::from_str(name).map_err(|_| CoverageError::UnknownCompiler {
            name: name.to_string(),
        })
    }

    /// Compilers with their own CUDA SDK support: nvcc and clang-cuda.
    pub fn is_cuda_compiler(self) -> bool {
        matches!(self, Self::Nvcc | Self::ClangCuda)
    }
}

/// The software name of a [`ParameterValue`](super::ParameterValue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueName {
    Compiler(Compiler),
    Parameter(Parameter),
}

impl ValueName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compiler(compiler) => compiler.into(),
            Self::Parameter(parameter) => parameter.into(),
        }
    }
}

impl From<Compiler> for ValueName {
    fn from(compiler: Compiler) -> Self {
        Self::Compiler(compiler)
    }
}

impl From<Parameter> for ValueName {
    fn from(parameter: Parameter) -> Self {
        Self::Parameter(parameter)
    }
}

impl fmt::Display for ValueName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiler names win over parameter names. Anything else is unknown software.
impl FromStr for ValueName {
    type Err = CoverageError;

    fn from_str(s: &str) -> Result<Self> {
        if let Ok(compiler) = Compiler::from_str(s) {
            return Ok(Self::Compiler(compiler));
        }
        Parameter::from_str(s)
            .map(Self::Parameter)
            .map_err(|_| CoverageError::UnknownSoftware {
                name: s.to_string(),
            })
    }
}

impl Serialize for ValueName {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

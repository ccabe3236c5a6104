// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Runtime SDK availability.
//!
//! clang-cuda itself carries no SDK; it needs one of the CUDA versions the run
//! actually requested. A clang-cuda release that technically supports an
//! Ubuntu release or a C++ standard is still useless there if no requested SDK
//! fits both. The filter prunes such partial rows early.

use super::{Reason, RowFilter};
use crate::model::{Compiler, Parameter, ParameterValueMatrix, ParameterValueTuple};
use crate::version::Version;
use crate::versions::{
    clang_cuda_sdk_support, cuda_cxx_support, platform_supports_sdk, ubuntu_cuda_ranges,
};

/// The enabled CUDA SDK versions of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SdkAvailability {
    sdks: Vec<Version>,
}

impl SdkAvailability {
    /// OFF values are dropped.
    pub fn new<I>(sdks: I) -> Self
    where
        I: IntoIterator<Item = Version>,
    {
        let mut sdks: Vec<Version> = sdks.into_iter().filter(|sdk| !sdk.is_off()).collect();
        sdks.sort();
        sdks.dedup();
        Self { sdks }
    }

    /// Availability for the CUDA column of `matrix`; `None` when it has no CUDA column.
    pub fn from_matrix(matrix: &ParameterValueMatrix) -> Option<Self> {
        matrix
            .get(Parameter::GpuCuda)
            .map(|values| Self::new(values.iter().map(|value| value.version.clone())))
    }

    pub fn sdks(&self) -> &[Version] {
        &self.sdks
    }

    fn usable_sdks<'a>(&'a self, clang_cuda: &'a Version) -> impl Iterator<Item = &'a Version> {
        self.sdks
            .iter()
            .filter(move |sdk| clang_cuda_sdk_support().supports(clang_cuda, sdk))
    }

    /// Some requested SDK works with `clang_cuda` and installs on `ubuntu`.
    pub fn supports_platform(&self, clang_cuda: &Version, ubuntu: &Version) -> bool {
        let bins = ubuntu_cuda_ranges();
        self.usable_sdks(clang_cuda)
            .any(|sdk| platform_supports_sdk(bins, ubuntu, sdk))
    }

    /// Some requested SDK works with `clang_cuda` and reaches `cxx`.
    pub fn supports_standard(&self, clang_cuda: &Version, cxx: &Version) -> bool {
        self.usable_sdks(clang_cuda)
            .any(|sdk| cuda_cxx_support().supports(sdk, cxx))
    }
}

impl RowFilter for SdkAvailability {
    fn check(&self, row: &ParameterValueTuple, reason: Reason<'_>) -> bool {
        let clang_cuda = [Parameter::HostCompiler, Parameter::DeviceCompiler]
            .into_iter()
            .filter_map(|parameter| row.compiler(parameter))
            .find(|(compiler, _)| *compiler == Compiler::ClangCuda)
            .map(|(_, version)| version);
        let Some(clang_cuda) = clang_cuda else {
            return true;
        };

        if let Some(ubuntu) = row.version(Parameter::Ubuntu) {
            if !self.supports_platform(clang_cuda, ubuntu) {
                return reason.reject(format_args!(
                    "no requested CUDA SDK supports clang-cuda {clang_cuda} on Ubuntu {ubuntu}"
                ));
            }
        }
        if let Some(cxx) = row.version(Parameter::CxxStandard) {
            if !self.supports_standard(clang_cuda, cxx) {
                return reason.reject(format_args!(
                    "no requested CUDA SDK supports clang-cuda {clang_cuda} with C++{cxx}"
                ));
            }
        }
        true
    }

    fn name(&self) -> &str {
        "sdk_availability_filter"
    }
}

// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Version range tables.
//!
//! Everything the filters and the oracle know about compiler, SDK and platform
//! compatibility: support tables, hard windows, platform bins, and the lists of
//! known versions from which the default parameter-value matrix is built.

pub mod ranges;
pub mod support;
pub mod tables;

pub use ranges::{derive_platform_sdk_ranges, platform_supports_sdk, PlatformRange};
pub use support::{
    ClangCudaSDKSupport, CompilerCxxSupport, NvccHostSupport, SupportEntry, SupportTable,
};
pub use tables::{
    clang_cuda_minimum, clang_cuda_sdk_support, clang_cxx_support, clang_host_disabled_window,
    cuda_cxx_support, cxx_support_for, derive_cuda_cxx_support, gcc_cxx_support,
    icpx_cxx_support, nvcc_clang_support, nvcc_cxx_support, nvcc_gcc_support,
    nvcc_host_support_for, ubuntu_cuda_anchors, ubuntu_cuda_ranges,
};

use strum::IntoEnumIterator;

use crate::error::{CoverageError, Result};
use crate::model::{Compiler, Parameter, ParameterValue, ParameterValueMatrix, ValueName};
use crate::version::Version;
use tables::{
    parse_all, BOOST_VERSIONS, CLANG_CUDA_VERSIONS, CLANG_VERSIONS, CMAKE_VERSIONS,
    CXX_STANDARDS, GCC_VERSIONS, HIPCC_VERSIONS, ICPX_VERSIONS, NVCC_VERSIONS, UBUNTU_VERSIONS,
};

/// Known versions of a compiler, oldest first.
pub fn compiler_versions(compiler: Compiler) -> Vec<Version> {
    parse_all(match compiler {
        Compiler::Gcc => GCC_VERSIONS,
        Compiler::Clang => CLANG_VERSIONS,
        Compiler::Nvcc => NVCC_VERSIONS,
        Compiler::ClangCuda => CLANG_CUDA_VERSIONS,
        Compiler::Hipcc => HIPCC_VERSIONS,
        Compiler::Icpx => ICPX_VERSIONS,
    })
}

/// Known versions of a software name.
///
/// Backend toggles know OFF and ON. The CUDA backend knows OFF and every nvcc
/// version. The two compiler parameters are not software and are rejected.
pub fn known_versions(name: ValueName) -> Result<Vec<Version>> {
    let versions = match name {
        ValueName::Compiler(compiler) => compiler_versions(compiler),
        ValueName::Parameter(Parameter::GpuCuda) => {
            let mut versions = vec![Version::off()];
            versions.extend(parse_all(NVCC_VERSIONS));
            versions
        }
        ValueName::Parameter(parameter) if parameter.is_on_off_backend() => {
            vec![Version::off(), Version::on()]
        }
        ValueName::Parameter(Parameter::Ubuntu) => parse_all(UBUNTU_VERSIONS),
        ValueName::Parameter(Parameter::Cmake) => parse_all(CMAKE_VERSIONS),
        ValueName::Parameter(Parameter::Boost) => parse_all(BOOST_VERSIONS),
        ValueName::Parameter(Parameter::CxxStandard) => parse_all(CXX_STANDARDS),
        ValueName::Parameter(parameter) => {
            return Err(CoverageError::UnknownSoftware {
                name: parameter.to_string(),
            })
        }
    };
    Ok(versions)
}

/// Whether `version` of software `name` is in the known version lists.
///
/// An unknown software name is an error; a known name with an unlisted
/// version is simply `false`.
pub fn is_supported_version(name: &str, version: &Version) -> Result<bool> {
    let name: ValueName = name.parse()?;
    Ok(known_versions(name)?.contains(version))
}

/// The default matrix built from the known version lists.
///
/// Both compiler columns carry every compiler, nvcc and old clang-cuda
/// releases included; the generator removes what may not appear in a column.
pub fn get_parameter_value_matrix() -> ParameterValueMatrix {
    let all_compilers: Vec<ParameterValue> = Compiler::iter()
        .flat_map(|compiler| {
            compiler_versions(compiler)
                .into_iter()
                .map(move |version| ParameterValue::compiler(compiler, version))
        })
        .collect();

    let mut matrix = ParameterValueMatrix::new();
    matrix.insert(Parameter::HostCompiler, all_compilers.clone());
    matrix.insert(Parameter::DeviceCompiler, all_compilers);
    for parameter in Parameter::iter().filter(|p| !p.is_compiler()) {
        // Only compiler parameters are rejected by known_versions.
        let versions = known_versions(ValueName::Parameter(parameter)).unwrap_or_default();
        matrix.insert(
            parameter,
            versions
                .into_iter()
                .map(|version| ParameterValue::of(parameter, version))
                .collect(),
        );
    }
    matrix
}

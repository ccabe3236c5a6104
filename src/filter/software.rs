// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Platform rules.

use super::Reason;
use crate::model::{Compiler, Parameter, ParameterValueTuple};
use crate::versions::{platform_supports_sdk, ubuntu_cuda_ranges};

/// CUDA SDKs (and nvcc) are only installable on the Ubuntu releases of their bin.
/// Unknown Ubuntu releases accept every SDK.
pub fn software_dependency_filter(row: &ParameterValueTuple, reason: Reason<'_>) -> bool {
    let Some(ubuntu) = row.version(Parameter::Ubuntu) else {
        return true;
    };
    let bins = ubuntu_cuda_ranges();

    if let Some(sdk) = row.version(Parameter::GpuCuda).filter(|sdk| !sdk.is_off()) {
        if !platform_supports_sdk(bins, ubuntu, sdk) {
            return reason.reject(format_args!("CUDA {sdk} is not available on Ubuntu {ubuntu}"));
        }
    }
    if let Some((Compiler::Nvcc, nvcc)) = row.compiler(Parameter::DeviceCompiler) {
        if !platform_supports_sdk(bins, ubuntu, nvcc) {
            return reason.reject(format_args!("nvcc {nvcc} is not available on Ubuntu {ubuntu}"));
        }
    }
    true
}

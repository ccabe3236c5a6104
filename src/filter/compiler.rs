// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Host/device compiler rules.

use super::Reason;
use crate::model::{Compiler, Parameter, ParameterValueTuple};
use crate::versions::{
    clang_cuda_minimum, clang_host_disabled_window, cxx_support_for, nvcc_host_support_for,
};

/// Compiler compatibility: host/device identity, nvcc hosting, the clang-cuda
/// floor and the C++ standard ceiling of each compiler.
///
/// Host checks run before device checks.
pub fn compiler_filter(row: &ParameterValueTuple, reason: Reason<'_>) -> bool {
    let host = row.compiler(Parameter::HostCompiler);
    let device = row.compiler(Parameter::DeviceCompiler);

    if let Some((Compiler::Nvcc, _)) = host {
        return reason.reject(format_args!("nvcc is not allowed as host compiler"));
    }

    if let (Some((host_name, host_version)), Some((device_name, device_version))) = (host, device)
    {
        if device_name != Compiler::Nvcc {
            if host_name != device_name {
                return reason.reject(format_args!(
                    "host and device compiler name must be the same (except for nvcc)"
                ));
            }
            if host_version != device_version {
                return reason.reject(format_args!(
                    "host and device compiler version must be the same (except for nvcc)"
                ));
            }
        } else {
            let Some(table) = nvcc_host_support_for(host_name) else {
                return reason.reject(format_args!(
                    "only gcc and clang are allowed as nvcc host compiler"
                ));
            };
            if !table.supports(device_version, host_version) {
                return reason.reject(format_args!(
                    "nvcc {device_version} does not support {host_name} {host_version}"
                ));
            }
            if host_name == Compiler::Clang && clang_host_disabled_window().contains(device_version)
            {
                return reason.reject(format_args!(
                    "clang as host compiler is disabled for nvcc 11.3 to 11.5"
                ));
            }
        }
    }

    let minimum = clang_cuda_minimum();
    for (compiler, version) in [host, device].into_iter().flatten() {
        if compiler == Compiler::ClangCuda && *version < minimum {
            return reason.reject(format_args!(
                "all clang-cuda versions older than 14 are disabled"
            ));
        }
    }

    if let Some(cxx) = row.version(Parameter::CxxStandard) {
        for (compiler, version) in [host, device].into_iter().flatten() {
            let Some(table) = cxx_support_for(compiler) else {
                continue;
            };
            if !table.supports(version, cxx) {
                return reason.reject(format_args!(
                    "{compiler} {version} does not support C++{cxx}"
                ));
            }
        }
    }

    true
}

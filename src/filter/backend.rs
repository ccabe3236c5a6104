// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Backend rules.

use super::Reason;
use crate::model::{Compiler, Parameter, ParameterValueTuple};
use crate::version::Version;
use crate::versions::{
    clang_cuda_sdk_support, clang_host_disabled_window, cuda_cxx_support, nvcc_host_support_for,
};

const COMPILER_ROLES: [(Parameter, &str); 2] = [
    (Parameter::HostCompiler, "host"),
    (Parameter::DeviceCompiler, "device"),
];

/// `Some(true)` if the backend is assigned and enabled, `None` if unassigned.
fn enabled(row: &ParameterValueTuple, backend: Parameter) -> Option<bool> {
    row.version(backend).map(|version| !version.is_off())
}

/// Backend exclusion and backend/compiler binding.
///
/// Mutual exclusion is checked first, then HIP, SYCL and CUDA in turn.
pub fn backend_filter(row: &ParameterValueTuple, mut reason: Reason<'_>) -> bool {
    let hip = enabled(row, Parameter::GpuHip) == Some(true);
    let sycl = enabled(row, Parameter::Sycl) == Some(true);
    let cuda = enabled(row, Parameter::GpuCuda) == Some(true);

    if hip && cuda {
        return reason.reject(format_args!(
            "HIP and CUDA backend cannot be enabled at the same time"
        ));
    }
    if hip && sycl {
        return reason.reject(format_args!(
            "HIP and SYCL backend cannot be enabled at the same time"
        ));
    }
    if sycl && cuda {
        return reason.reject(format_args!(
            "SYCL and CUDA backend cannot be enabled at the same time"
        ));
    }

    toggle_binding(row, Parameter::GpuHip, "HIP", Compiler::Hipcc, reason.reborrow())
        && toggle_binding(row, Parameter::Sycl, "SYCL", Compiler::Icpx, reason.reborrow())
        && cuda_binding(row, reason)
}

/// An ON/OFF backend that needs one specific compiler on both sides.
fn toggle_binding(
    row: &ParameterValueTuple,
    backend: Parameter,
    label: &str,
    required: Compiler,
    reason: Reason<'_>,
) -> bool {
    let Some(backend_on) = enabled(row, backend) else {
        return true;
    };
    for (parameter, role) in COMPILER_ROLES {
        let Some((compiler, _)) = row.compiler(parameter) else {
            continue;
        };
        if compiler == required && !backend_on {
            return reason.reject(format_args!("{required} requires an enabled {label} backend"));
        }
        if compiler != required && backend_on {
            return reason.reject(format_args!(
                "an enabled {label} backend requires {required} as {role} compiler"
            ));
        }
    }
    true
}

fn cuda_binding(row: &ParameterValueTuple, reason: Reason<'_>) -> bool {
    let Some(sdk) = row.version(Parameter::GpuCuda) else {
        return true;
    };
    let host = row.compiler(Parameter::HostCompiler);
    let device = row.compiler(Parameter::DeviceCompiler);

    if sdk.is_off() {
        for (compiler, _) in [host, device].into_iter().flatten() {
            if compiler.is_cuda_compiler() {
                return reason.reject(format_args!(
                    "{compiler} requires an enabled CUDA backend"
                ));
            }
        }
        return true;
    }

    if let Some((compiler, _)) = host {
        if !matches!(compiler, Compiler::Gcc | Compiler::Clang | Compiler::ClangCuda) {
            return reason.reject(format_args!(
                "an enabled CUDA backend requires gcc, clang or clang-cuda as host compiler"
            ));
        }
    }
    if let Some((compiler, version)) = device {
        if !compiler.is_cuda_compiler() {
            return reason.reject(format_args!(
                "an enabled CUDA backend requires nvcc or clang-cuda as device compiler"
            ));
        }
        if compiler == Compiler::Nvcc && version != sdk {
            return reason.reject(format_args!(
                "CUDA backend version {sdk} does not match nvcc version {version}"
            ));
        }
    }

    for (compiler, version) in [host, device].into_iter().flatten() {
        if compiler == Compiler::ClangCuda && !clang_cuda_sdk_support().supports(version, sdk) {
            return reason.reject(format_args!(
                "clang-cuda {version} does not support CUDA {sdk}"
            ));
        }
    }

    if let Some((compiler, version)) = host {
        if !sdk_hosts(sdk, compiler, version) {
            return reason.reject(format_args!(
                "CUDA {sdk} does not support {compiler} {version}"
            ));
        }
        if compiler == Compiler::Clang && clang_host_disabled_window().contains(sdk) {
            return reason.reject(format_args!(
                "clang as host compiler is disabled for CUDA 11.3 to 11.5"
            ));
        }
    }

    if let Some(cxx) = row.version(Parameter::CxxStandard) {
        if !cuda_cxx_support().supports(sdk, cxx) {
            return reason.reject(format_args!("CUDA {sdk} does not support C++{cxx}"));
        }
    }

    true
}

/// The CUDA SDK accepts this host compiler through nvcc of the same version.
/// Hosts nvcc never accepts are left to the device rules.
fn sdk_hosts(sdk: &Version, host: Compiler, host_version: &Version) -> bool {
    nvcc_host_support_for(host).map_or(true, |table| table.supports(sdk, host_version))
}

// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Pair-level rule families.
//!
//! Each family removes the pairs its row-level filter rejects as a
//! two-entry row. The filters only ever look at two parameters at a time
//! (plus the nvcc-host and clang-cuda floor rules, which look at one), so a
//! row passes the chain exactly when each of its pairs survives here.
//!
//! The families work from the support tables and literal windows directly,
//! never through the filter functions.

use std::ops::Bound;

use strum::IntoEnumIterator;
use tracing::debug;

use super::pattern::ValuePattern;
use super::removal::{
    outside, remove_parameter_value_pairs, remove_parameter_value_pairs_ranges,
    remove_support_table_violations,
};
use crate::error::Result;
use crate::filter::SdkAvailability;
use crate::model::{Compiler, Parameter, ParameterValueMatrix, ParameterValuePair};
use crate::version::{Version, VersionRange};
use crate::versions::{
    clang_cuda_minimum, clang_cuda_sdk_support, clang_host_disabled_window, cuda_cxx_support,
    cxx_support_for, nvcc_host_support_for, ubuntu_cuda_ranges, SupportTable,
};

const ROLES: [Parameter; 2] = [Parameter::HostCompiler, Parameter::DeviceCompiler];

/// Working list and removal log shared by the rule families.
#[derive(Debug)]
pub struct PairRemoval<'a> {
    pub pairs: &'a mut Vec<ParameterValuePair>,
    pub removed: &'a mut Vec<ParameterValuePair>,
}

impl PairRemoval<'_> {
    fn remove(&mut self, first: &ValuePattern, second: &ValuePattern) -> bool {
        remove_parameter_value_pairs(self.pairs, self.removed, first, second, true)
    }

    fn remove_ranges(&mut self, first: &ValuePattern, second: &ValuePattern) -> Result<bool> {
        remove_parameter_value_pairs_ranges(self.pairs, self.removed, first, second, true)
    }

    fn remove_table(
        &mut self,
        table: &SupportTable,
        driver: &ValuePattern,
        dependency: &ValuePattern,
    ) -> Result<bool> {
        remove_support_table_violations(self.pairs, self.removed, table, driver, dependency)
    }

    fn removed_count(&self) -> usize {
        self.removed.len()
    }
}

fn enabled() -> VersionRange {
    VersionRange::greater_than(Version::off())
}

fn compiler(role: Parameter, compiler: Compiler) -> ValuePattern {
    ValuePattern::value(role, compiler)
}

/// Mirror of the compiler filter.
pub fn remove_compiler_pairs(
    work: &mut PairRemoval<'_>,
    matrix: &ParameterValueMatrix,
) -> Result<()> {
    let before = work.removed_count();
    let any = ValuePattern::any();

    work.remove(&compiler(Parameter::HostCompiler, Compiler::Nvcc), &any);

    // Host and device name and version identity, nvcc excepted.
    for host in Compiler::iter() {
        for device in Compiler::iter().filter(|&d| d != host && d != Compiler::Nvcc) {
            work.remove(
                &compiler(Parameter::HostCompiler, host),
                &compiler(Parameter::DeviceCompiler, device),
            );
        }
    }
    if let Some(hosts) = matrix.get(Parameter::HostCompiler) {
        for value in hosts {
            let Some(name) = value.as_compiler().filter(|&c| c != Compiler::Nvcc) else {
                continue;
            };
            let host = compiler(Parameter::HostCompiler, name).version(value.version.clone());
            let device = compiler(Parameter::DeviceCompiler, name);
            work.remove_ranges(&host, &device.clone().range(VersionRange::below(value.version.clone())))?;
            work.remove_ranges(&host, &device.range(VersionRange::greater_than(value.version.clone())))?;
        }
    }

    // nvcc hosting.
    let nvcc = compiler(Parameter::DeviceCompiler, Compiler::Nvcc);
    for host in Compiler::iter() {
        match nvcc_host_support_for(host) {
            Some(table) => {
                work.remove_table(table, &nvcc, &compiler(Parameter::HostCompiler, host))?;
            }
            None => {
                work.remove(&compiler(Parameter::HostCompiler, host), &nvcc);
            }
        }
    }
    work.remove_ranges(
        &compiler(Parameter::HostCompiler, Compiler::Clang),
        &nvcc.range(clang_host_disabled_window()),
    )?;

    for role in ROLES {
        work.remove_ranges(
            &compiler(role, Compiler::ClangCuda).range(VersionRange::below(clang_cuda_minimum())),
            &any,
        )?;
    }

    let cxx = ValuePattern::parameter(Parameter::CxxStandard);
    for name in Compiler::iter() {
        let Some(table) = cxx_support_for(name) else {
            continue;
        };
        for role in ROLES {
            work.remove_table(table, &compiler(role, name), &cxx)?;
        }
    }

    debug!(removed = work.removed_count() - before, "compiler rules");
    Ok(())
}

/// Mirror of the backend filter.
pub fn remove_backend_pairs(
    work: &mut PairRemoval<'_>,
    matrix: &ParameterValueMatrix,
) -> Result<()> {
    let before = work.removed_count();
    let on = |backend| ValuePattern::parameter(backend).range(enabled());
    let off = |backend| ValuePattern::parameter(backend).version(Version::off());

    for (a, b) in [
        (Parameter::GpuHip, Parameter::GpuCuda),
        (Parameter::GpuHip, Parameter::Sycl),
        (Parameter::Sycl, Parameter::GpuCuda),
    ] {
        work.remove_ranges(&on(a), &on(b))?;
    }

    for (backend, required) in [
        (Parameter::GpuHip, Compiler::Hipcc),
        (Parameter::Sycl, Compiler::Icpx),
    ] {
        for role in ROLES {
            work.remove(&compiler(role, required), &off(backend));
            for other in Compiler::iter().filter(|&c| c != required) {
                work.remove_ranges(&compiler(role, other), &on(backend))?;
            }
        }
    }

    let cuda = Parameter::GpuCuda;
    for role in ROLES {
        for name in Compiler::iter().filter(|c| c.is_cuda_compiler()) {
            work.remove(&compiler(role, name), &off(cuda));
        }
    }
    for name in Compiler::iter() {
        if !matches!(name, Compiler::Gcc | Compiler::Clang | Compiler::ClangCuda) {
            work.remove_ranges(&compiler(Parameter::HostCompiler, name), &on(cuda))?;
        }
        if !name.is_cuda_compiler() {
            work.remove_ranges(&compiler(Parameter::DeviceCompiler, name), &on(cuda))?;
        }
    }

    // nvcc and the SDK it ships with.
    if let Some(devices) = matrix.get(Parameter::DeviceCompiler) {
        for value in devices.iter().filter(|v| v.is_compiler(Compiler::Nvcc)) {
            let nvcc = compiler(Parameter::DeviceCompiler, Compiler::Nvcc)
                .version(value.version.clone());
            let older = VersionRange::new(
                Bound::Excluded(Version::off()),
                Bound::Excluded(value.version.clone()),
            );
            let newer = VersionRange::greater_than(value.version.clone());
            work.remove_ranges(&nvcc, &ValuePattern::parameter(cuda).range(older))?;
            work.remove_ranges(&nvcc, &ValuePattern::parameter(cuda).range(newer))?;
        }
    }

    let sdk = ValuePattern::parameter(cuda);
    for role in ROLES {
        work.remove_table(
            clang_cuda_sdk_support(),
            &compiler(role, Compiler::ClangCuda),
            &sdk,
        )?;
    }
    for host in Compiler::iter() {
        if let Some(table) = nvcc_host_support_for(host) {
            work.remove_table(table, &sdk, &compiler(Parameter::HostCompiler, host))?;
        }
    }
    work.remove_ranges(
        &compiler(Parameter::HostCompiler, Compiler::Clang),
        &sdk.clone().range(clang_host_disabled_window()),
    )?;
    work.remove_table(
        cuda_cxx_support(),
        &sdk,
        &ValuePattern::parameter(Parameter::CxxStandard),
    )?;

    debug!(removed = work.removed_count() - before, "backend rules");
    Ok(())
}

/// Mirror of the software dependency filter.
pub fn remove_software_pairs(work: &mut PairRemoval<'_>) -> Result<()> {
    let before = work.removed_count();
    for bin in ubuntu_cuda_ranges() {
        let ubuntu = ValuePattern::parameter(Parameter::Ubuntu).version(bin.platform.clone());
        for excluded in outside(&bin.sdk) {
            work.remove_ranges(
                &ubuntu,
                &ValuePattern::parameter(Parameter::GpuCuda).range(excluded.clone()),
            )?;
            work.remove_ranges(
                &ubuntu,
                &compiler(Parameter::DeviceCompiler, Compiler::Nvcc).range(excluded),
            )?;
        }
    }
    debug!(removed = work.removed_count() - before, "software rules");
    Ok(())
}

/// Mirror of the SDK availability filter for the CUDA values of `matrix`.
pub fn remove_availability_pairs(work: &mut PairRemoval<'_>, matrix: &ParameterValueMatrix) {
    let Some(availability) = SdkAvailability::from_matrix(matrix) else {
        return;
    };
    let before = work.removed_count();
    let ubuntus = matrix.get(Parameter::Ubuntu).unwrap_or_default();
    let standards = matrix.get(Parameter::CxxStandard).unwrap_or_default();
    for role in ROLES {
        let Some(values) = matrix.get(role) else {
            continue;
        };
        for value in values.iter().filter(|v| v.is_compiler(Compiler::ClangCuda)) {
            let clang_cuda = compiler(role, Compiler::ClangCuda).version(value.version.clone());
            for ubuntu in ubuntus {
                if !availability.supports_platform(&value.version, &ubuntu.version) {
                    work.remove(
                        &clang_cuda,
                        &ValuePattern::parameter(Parameter::Ubuntu).version(ubuntu.version.clone()),
                    );
                }
            }
            for cxx in standards {
                if !availability.supports_standard(&value.version, &cxx.version) {
                    work.remove(
                        &clang_cuda,
                        &ValuePattern::parameter(Parameter::CxxStandard)
                            .version(cxx.version.clone()),
                    );
                }
            }
        }
    }
    debug!(removed = work.removed_count() - before, "availability rules");
}

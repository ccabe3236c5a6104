// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The oracle's pair removal and the filters must agree at every support
//! table boundary: at an entry, just below and above it, between entries,
//! below the oldest entry and above the newest.

mod common;

use common::{assert_rules_agree_with_chain, bumped, pair, rule_survivors, values};
use job_coverage::model::{Compiler, Parameter, ParameterValue, ParameterValueMatrix};
use job_coverage::version::Version;
use job_coverage::versions::{
    clang_cuda_sdk_support, cuda_cxx_support, nvcc_clang_support, nvcc_gcc_support,
    SupportEntry, SupportTable,
};

use Parameter::{
    CxxStandard as Cxx, DeviceCompiler as Device, GpuCuda as Cuda, HostCompiler as Host, Ubuntu,
};

/// Entry versions of one side of `table`, one step either side of each,
/// plus a far-future version.
fn probe_versions(table: &SupportTable, side: impl Fn(&SupportEntry) -> &Version) -> Vec<Version> {
    let mut versions: Vec<Version> = table
        .entries()
        .iter()
        .flat_map(|entry| {
            let at = side(entry).clone();
            [bumped(&at, -1), Some(at.clone()), bumped(&at, 1)]
        })
        .flatten()
        .filter(|version| !version.is_off())
        .collect();
    versions.push(Version::parse("42.0").unwrap());
    versions.sort();
    versions.dedup();
    versions
}

fn compilers(compiler: Compiler, versions: &[Version]) -> Vec<ParameterValue> {
    versions
        .iter()
        .map(|version| ParameterValue::compiler(compiler, version.clone()))
        .collect()
}

fn settings(parameter: Parameter, versions: &[Version]) -> Vec<ParameterValue> {
    versions
        .iter()
        .map(|version| ParameterValue::of(parameter, version.clone()))
        .collect()
}

#[test]
fn test_nvcc_gcc_boundaries() {
    let table = nvcc_gcc_support();
    let matrix = ParameterValueMatrix::new()
        .with(Host, compilers(Compiler::Gcc, &probe_versions(table, |e| &e.max_dependency)))
        .with(Device, compilers(Compiler::Nvcc, &probe_versions(table, |e| &e.tool)));
    assert_rules_agree_with_chain(&matrix);
}

#[test]
fn test_nvcc_clang_boundaries() {
    let table = nvcc_clang_support();
    let matrix = ParameterValueMatrix::new()
        .with(Host, compilers(Compiler::Clang, &probe_versions(table, |e| &e.max_dependency)))
        .with(Device, compilers(Compiler::Nvcc, &probe_versions(table, |e| &e.tool)));
    assert_rules_agree_with_chain(&matrix);
}

#[test]
fn test_cuda_host_boundaries() {
    let table = nvcc_gcc_support();
    let mut sdks = probe_versions(table, |e| &e.tool);
    sdks.insert(0, Version::off());
    let matrix = ParameterValueMatrix::new()
        .with(Host, compilers(Compiler::Gcc, &probe_versions(table, |e| &e.max_dependency)))
        .with(Cuda, settings(Cuda, &sdks));
    assert_rules_agree_with_chain(&matrix);
}

#[test]
fn test_clang_cuda_sdk_boundaries() {
    let table = clang_cuda_sdk_support();
    let mut sdks = probe_versions(table, |e| &e.max_dependency);
    sdks.insert(0, Version::off());
    let clang_cuda = compilers(Compiler::ClangCuda, &probe_versions(table, |e| &e.tool));
    let matrix = ParameterValueMatrix::new()
        .with(Host, clang_cuda.clone())
        .with(Device, clang_cuda)
        .with(Cuda, settings(Cuda, &sdks));
    assert_rules_agree_with_chain(&matrix);
}

#[test]
fn test_cxx_boundaries() {
    let standards: Vec<Version> = ["11", "14", "17", "20", "23", "26"]
        .iter()
        .map(|s| Version::parse(s).unwrap())
        .collect();
    let mut hosts = values(Host, &["gcc@5", "gcc@7", "gcc@9", "gcc@10", "gcc@13", "gcc@14"]);
    hosts.extend(values(Host, &["clang@9", "clang@10", "clang@17", "clang@19", "hipcc@6.1"]));
    hosts.extend(values(Host, &["icpx@2023.1.0", "icpx@2023.2.0", "icpx@2024.0.0"]));
    let devices = values(
        Device,
        &["nvcc@10.0", "nvcc@11.0", "nvcc@11.8", "nvcc@12.0", "nvcc@12.7", "clang-cuda@16"],
    );
    let sdks = probe_versions(cuda_cxx_support(), |e| &e.tool);
    let matrix = ParameterValueMatrix::new()
        .with(Host, hosts)
        .with(Device, devices)
        .with(Cuda, settings(Cuda, &sdks))
        .with(Cxx, settings(Cxx, &standards));
    assert_rules_agree_with_chain(&matrix);
}

#[test]
fn test_ubuntu_boundaries() {
    let sdks: Vec<Version> = ["0.0.0", "11.0", "11.6", "11.7", "12.4", "12.5", "12.6", "42.0"]
        .iter()
        .map(|s| Version::parse(s).unwrap())
        .collect();
    let nvcc = compilers(Compiler::Nvcc, &sdks[1..]);
    let matrix = ParameterValueMatrix::new()
        .with(Device, nvcc)
        .with(Cuda, settings(Cuda, &sdks))
        .with(Ubuntu, values(Ubuntu, &["20.04", "22.04", "24.04", "26.04"]));
    assert_rules_agree_with_chain(&matrix);
}

#[test]
fn test_literal_cases() {
    let matrix = ParameterValueMatrix::new()
        .with(Host, values(Host, &["gcc@7", "gcc@8", "gcc@11", "gcc@12", "clang@12"]))
        .with(
            Device,
            values(Device, &["nvcc@10.0", "nvcc@11.2", "nvcc@11.4", "nvcc@11.6", "nvcc@42.0"]),
        );
    let kept = rule_survivors(&matrix);
    let keeps = |host: &str, device: &str| kept.contains(&pair(Host, host, Device, device));

    assert!(keeps("gcc@7", "nvcc@10.0"));
    assert!(!keeps("gcc@8", "nvcc@10.0"));
    assert!(keeps("gcc@11", "nvcc@11.4"));
    assert!(!keeps("gcc@12", "nvcc@11.4"));
    assert!(keeps("gcc@12", "nvcc@42.0"));
    assert!(!keeps("clang@12", "nvcc@11.4"));
    assert!(keeps("clang@12", "nvcc@11.2"));
    assert!(keeps("clang@12", "nvcc@11.6"));
    // Stored orientation does not matter for lookups.
    assert!(kept.contains(&pair(Device, "nvcc@10.0", Host, "gcc@7")));
}

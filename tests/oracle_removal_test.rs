// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Pair removal patterns: symmetry, wildcards and bounds.

mod common;

use common::{compiler_matrix, pair};
use job_coverage::model::{Compiler, Parameter, ParameterValuePair};
use job_coverage::oracle::{
    get_all_parameter_value_pairs, remove_parameter_value_pairs,
    remove_parameter_value_pairs_ranges, remove_support_table_violations, ValuePattern,
};
use job_coverage::version::{Version, VersionRange};
use job_coverage::versions::nvcc_gcc_support;
use job_coverage::CoverageError;

use Parameter::{DeviceCompiler as Device, HostCompiler as Host};

fn v(s: &str) -> Version {
    Version::parse(s).unwrap()
}

fn gcc10_nvcc() -> (ValuePattern, ValuePattern) {
    (
        ValuePattern::value(Host, Compiler::Gcc).version(v("10")),
        ValuePattern::value(Device, Compiler::Nvcc).version(v("11.4")),
    )
}

#[test]
fn test_symmetric_removal_matches_either_orientation() {
    let (host, device) = gcc10_nvcc();
    for stored in [
        pair(Host, "gcc@10", Device, "nvcc@11.4"),
        pair(Device, "nvcc@11.4", Host, "gcc@10"),
    ] {
        let mut pairs = vec![stored];
        let mut removed = Vec::new();
        assert!(remove_parameter_value_pairs(&mut pairs, &mut removed, &host, &device, true));
        assert!(pairs.is_empty());
        assert_eq!(removed.len(), 1);
    }
}

#[test]
fn test_asymmetric_removal_matches_one_orientation() {
    let (host, device) = gcc10_nvcc();
    let mut pairs = vec![
        pair(Host, "gcc@10", Device, "nvcc@11.4"),
        pair(Device, "nvcc@11.4", Host, "gcc@10"),
    ];
    let mut removed = Vec::new();
    assert!(remove_parameter_value_pairs(&mut pairs, &mut removed, &host, &device, false));
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].first().0, Device);
    assert_eq!(removed[0].first().0, Host);

    // Pinned the other way round, only the remaining pair goes.
    assert!(remove_parameter_value_pairs(&mut pairs, &mut removed, &device, &host, false));
    assert!(pairs.is_empty());
}

#[test]
fn test_wildcard_removes_everything() {
    let mut pairs = get_all_parameter_value_pairs(&compiler_matrix());
    let total = pairs.len();
    let mut removed = Vec::new();
    assert!(remove_parameter_value_pairs(
        &mut pairs,
        &mut removed,
        &ValuePattern::any(),
        &ValuePattern::any(),
        false,
    ));
    assert!(pairs.is_empty());
    assert_eq!(removed.len(), total);
}

#[test]
fn test_pinned_removes_at_most_one() {
    let all = get_all_parameter_value_pairs(&compiler_matrix());
    for target in &all {
        let (p1, v1) = target.first();
        let (p2, v2) = target.second();
        let first = ValuePattern::value(p1, v1.name).version(v1.version.clone());
        let second = ValuePattern::value(p2, v2.name).version(v2.version.clone());
        for symmetric in [false, true] {
            let mut pairs = all.clone();
            let mut removed = Vec::new();
            remove_parameter_value_pairs(&mut pairs, &mut removed, &first, &second, symmetric);
            assert_eq!(removed, vec![target.clone()]);
            assert_eq!(pairs.len(), all.len() - 1);
        }
    }
}

#[test]
fn test_removal_keeps_order() {
    let mut pairs = get_all_parameter_value_pairs(&compiler_matrix());
    let mut removed = Vec::new();
    remove_parameter_value_pairs(
        &mut pairs,
        &mut removed,
        &ValuePattern::value(Host, Compiler::Gcc),
        &ValuePattern::parameter(Device),
        true,
    );
    let hosts: Vec<String> = pairs.iter().map(|p| p.first().1.to_string()).collect();
    assert!(hosts.iter().all(|host| host == "clang@16"));
    assert_eq!(removed.len(), 6);
}

#[test]
fn test_range_removal_needs_a_bound() {
    let mut pairs = get_all_parameter_value_pairs(&compiler_matrix());
    let mut removed = Vec::new();

    let unbounded = ValuePattern::value(Device, Compiler::Nvcc).range(VersionRange::any());
    let result = remove_parameter_value_pairs_ranges(
        &mut pairs,
        &mut removed,
        &ValuePattern::parameter(Host),
        &unbounded,
        true,
    );
    assert!(matches!(
        result,
        Err(CoverageError::MissingBound { ref parameter }) if parameter == "device_compiler"
    ));

    let no_range = remove_parameter_value_pairs_ranges(
        &mut pairs,
        &mut removed,
        &ValuePattern::parameter(Host),
        &ValuePattern::parameter(Device),
        true,
    );
    assert!(matches!(no_range, Err(CoverageError::MissingBound { .. })));
    // Failing calls leave the list alone.
    assert!(removed.is_empty());

    let below_12 = ValuePattern::value(Device, Compiler::Nvcc).range(VersionRange::below(v("12")));
    assert!(remove_parameter_value_pairs_ranges(
        &mut pairs,
        &mut removed,
        &ValuePattern::parameter(Host),
        &below_12,
        true,
    )
    .unwrap());
    assert_eq!(removed.len(), 3);
    assert!(removed
        .iter()
        .all(|p: &ParameterValuePair| p.second().1.to_string() == "nvcc@11.4"));
}

#[test]
fn test_support_table_removal() {
    let mut pairs = vec![
        pair(Host, "gcc@11", Device, "nvcc@11.4"),
        pair(Host, "gcc@12", Device, "nvcc@11.4"),
        pair(Host, "gcc@8", Device, "nvcc@9.2"),
        pair(Host, "gcc@7", Device, "nvcc@9.2"),
        pair(Host, "gcc@14", Device, "nvcc@12.6"),
        pair(Host, "gcc@14", Device, "nvcc@42.0"),
    ];
    let mut removed = Vec::new();
    assert!(remove_support_table_violations(
        &mut pairs,
        &mut removed,
        nvcc_gcc_support(),
        &ValuePattern::value(Device, Compiler::Nvcc),
        &ValuePattern::value(Host, Compiler::Gcc),
    )
    .unwrap());
    let gone: Vec<String> = removed.iter().map(ToString::to_string).collect();
    assert_eq!(gone.len(), 3);
    assert_eq!(
        pairs,
        vec![
            pair(Host, "gcc@11", Device, "nvcc@11.4"),
            pair(Host, "gcc@7", Device, "nvcc@9.2"),
            pair(Host, "gcc@14", Device, "nvcc@42.0"),
        ]
    );
}

// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::collections::HashSet;

use job_coverage::context::Column;
use job_coverage::filter::{FilterChain, Reason, SdkAvailability};
use job_coverage::model::{
    Parameter, ParameterValue, ParameterValueMatrix, ParameterValuePair, ParameterValueTuple,
};
use job_coverage::oracle::{get_all_parameter_value_pairs, remove_invalid_pairs};
use job_coverage::version::Version;

/// A value of `parameter` written the way the CLI accepts it: `name@version`
/// for compilers, `ON`/`OFF` or a bare version otherwise.
pub fn value(parameter: Parameter, text: &str) -> ParameterValue {
    if parameter.is_compiler() {
        text.parse().unwrap()
    } else {
        ParameterValue::of(parameter, Version::parse_setting(text).unwrap())
    }
}

pub fn values(parameter: Parameter, list: &[&str]) -> Vec<ParameterValue> {
    list.iter().map(|text| value(parameter, text)).collect()
}

pub fn row(entries: &[(Parameter, &str)]) -> ParameterValueTuple {
    entries
        .iter()
        .map(|&(parameter, text)| (parameter, value(parameter, text)))
        .collect()
}

pub fn pair(p1: Parameter, v1: &str, p2: Parameter, v2: &str) -> ParameterValuePair {
    ParameterValuePair::new(p1, value(p1, v1), p2, value(p2, v2))
}

/// The rejection sentence of the built-in chain, `None` if the row passes.
pub fn reason_for(row: &ParameterValueTuple) -> Option<String> {
    let mut sink = String::new();
    if FilterChain::new().check(row, Reason::to(&mut sink)) {
        None
    } else {
        Some(sink)
    }
}

/// The host/device matrix of the end-to-end scenario.
pub fn compiler_matrix() -> ParameterValueMatrix {
    ParameterValueMatrix::new()
        .with(
            Parameter::HostCompiler,
            values(Parameter::HostCompiler, &["gcc@10", "gcc@13", "clang@16"]),
        )
        .with(
            Parameter::DeviceCompiler,
            values(Parameter::DeviceCompiler, &["gcc@10", "nvcc@11.4", "nvcc@12.0"]),
        )
}

/// A small matrix touching every rule family.
pub fn small_matrix() -> ParameterValueMatrix {
    ParameterValueMatrix::new()
        .with(
            Parameter::HostCompiler,
            values(
                Parameter::HostCompiler,
                &["gcc@11", "gcc@13", "clang@12", "clang-cuda@16", "hipcc@6.0"],
            ),
        )
        .with(
            Parameter::DeviceCompiler,
            values(
                Parameter::DeviceCompiler,
                &["gcc@13", "nvcc@11.4", "nvcc@12.0", "clang-cuda@16", "hipcc@6.0"],
            ),
        )
        .with(
            Parameter::GpuCuda,
            values(Parameter::GpuCuda, &["OFF", "11.4", "12.0"]),
        )
        .with(Parameter::GpuHip, values(Parameter::GpuHip, &["OFF", "ON"]))
        .with(Parameter::Ubuntu, values(Parameter::Ubuntu, &["20.04", "22.04"]))
        .with(Parameter::CxxStandard, values(Parameter::CxxStandard, &["17", "20"]))
}

/// Engine-test columns over parameters no filter constrains together.
pub fn columns(sizes: &[usize]) -> Vec<Column> {
    let parameters = [Parameter::Cmake, Parameter::Boost, Parameter::CpuSerial];
    sizes
        .iter()
        .zip(parameters)
        .map(|(&size, parameter)| Column {
            parameter,
            values: (0..size)
                .map(|minor| ParameterValue::of(parameter, format!("3.{minor}").parse().unwrap()))
                .collect(),
        })
        .collect()
}

/// The chain a generator run over `matrix` uses, without custom filters.
pub fn chain_for(matrix: &ParameterValueMatrix) -> FilterChain<'static> {
    match SdkAvailability::from_matrix(matrix) {
        Some(availability) => FilterChain::new().with_availability(availability),
        None => FilterChain::new(),
    }
}

/// The pairs of `matrix` that survive the oracle's rule families.
pub fn rule_survivors(matrix: &ParameterValueMatrix) -> HashSet<ParameterValuePair> {
    let mut kept = get_all_parameter_value_pairs(matrix);
    let mut removed = Vec::new();
    remove_invalid_pairs(matrix, &mut kept, &mut removed).unwrap();
    kept.into_iter().collect()
}

/// Every pair of `matrix` is kept by the rule families exactly when the
/// chain accepts it as a two-entry row.
pub fn assert_rules_agree_with_chain(matrix: &ParameterValueMatrix) {
    let chain = chain_for(matrix);
    let kept = rule_survivors(matrix);
    for pair in get_all_parameter_value_pairs(matrix) {
        let (p1, v1) = pair.first();
        let (p2, v2) = pair.second();
        let row = ParameterValueTuple::new()
            .with(p1, v1.clone())
            .with(p2, v2.clone());
        let mut reason = String::new();
        let passes = chain.check(&row, Reason::to(&mut reason));
        assert_eq!(
            kept.contains(&pair),
            passes,
            "{pair}: oracle and filter disagree (filter says {reason:?})"
        );
    }
}

/// `version` with its last release segment moved by `delta`, if that stays
/// non-negative.
pub fn bumped(version: &Version, delta: i64) -> Option<Version> {
    let mut release: Vec<i64> = version.release().iter().map(|&s| i64::from(s)).collect();
    let last = release.last_mut()?;
    *last += delta;
    if *last < 0 {
        return None;
    }
    let text: Vec<String> = release.iter().map(ToString::to_string).collect();
    Version::parse(&text.join(".")).ok()
}

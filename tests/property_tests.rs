// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Property-based tests over random versions, pairs and matrices.

mod common;

use std::collections::HashSet;

use proptest::prelude::*;
use proptest::sample::subsequence;

use common::{chain_for, values};
use job_coverage::filter::Reason;
use job_coverage::generator::generate_combination_list;
use job_coverage::model::{Parameter, ParameterValueMatrix, ParameterValuePair};
use job_coverage::oracle::{
    get_all_parameter_value_pairs, get_expected_parameter_value_pairs,
    remove_parameter_value_pairs, ValuePattern,
};
use job_coverage::verify::verify;
use job_coverage::version::Version;

// ── Strategies ───────────────────────────────────────────────────────────

const HOSTS: &[&str] = &[
    "gcc@10", "gcc@13", "clang@12", "clang@16", "clang-cuda@13", "clang-cuda@16", "nvcc@12.0",
    "hipcc@6.0", "icpx@2024.0.0",
];
const DEVICES: &[&str] = &[
    "gcc@13", "clang@16", "clang-cuda@16", "nvcc@11.4", "nvcc@12.0", "nvcc@12.6", "hipcc@6.0",
    "icpx@2024.0.0",
];
const SDKS: &[&str] = &["OFF", "11.4", "12.0", "12.6"];
const TOGGLES: &[&str] = &["OFF", "ON"];
const UBUNTUS: &[&str] = &["20.04", "22.04", "24.04"];
const STANDARDS: &[&str] = &["17", "20", "23"];

fn column(
    parameter: Parameter,
    pool: &'static [&'static str],
    max: usize,
) -> impl Strategy<Value = (Parameter, Vec<&'static str>)> {
    subsequence(pool, 1..=max.min(pool.len())).prop_map(move |chosen| (parameter, chosen))
}

/// A matrix of up to `max` values per column drawn from the pools above.
fn matrix(max: usize) -> impl Strategy<Value = ParameterValueMatrix> {
    (
        column(Parameter::HostCompiler, HOSTS, max),
        column(Parameter::DeviceCompiler, DEVICES, max),
        column(Parameter::GpuCuda, SDKS, max),
        column(Parameter::GpuHip, TOGGLES, max),
        column(Parameter::Sycl, TOGGLES, max),
        column(Parameter::Ubuntu, UBUNTUS, max),
        column(Parameter::CxxStandard, STANDARDS, max),
    )
        .prop_map(|(host, device, cuda, hip, sycl, ubuntu, cxx)| {
            [host, device, cuda, hip, sycl, ubuntu, cxx].into_iter().fold(
                ParameterValueMatrix::new(),
                |matrix, (parameter, chosen)| matrix.with(parameter, values(parameter, &chosen)),
            )
        })
}

fn version_segments() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0u32..30, 1..4)
}

fn padded(segments: &[u32]) -> Vec<u32> {
    let mut padded = segments.to_vec();
    padded.resize(4, 0);
    padded
}

fn version_of(segments: &[u32]) -> Version {
    let text: Vec<String> = segments.iter().map(ToString::to_string).collect();
    Version::parse(&text.join(".")).unwrap()
}

// ── 1. Version ordering ──────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_version_order_pads_with_zeros(a in version_segments(), b in version_segments()) {
        let (va, vb) = (version_of(&a), version_of(&b));
        prop_assert_eq!(va.cmp(&vb), padded(&a).cmp(&padded(&b)), "{} vs {}", va, vb);
        prop_assert_eq!(va == vb, padded(&a) == padded(&b));
        prop_assert!(Version::off() <= va);
    }
}

// ── 2. Pair symmetry ─────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_pair_equality_ignores_orientation(matrix in matrix(3)) {
        let pairs = get_all_parameter_value_pairs(&matrix);
        let swapped: HashSet<ParameterValuePair> = pairs.iter().map(ParameterValuePair::swapped).collect();
        for pair in &pairs {
            prop_assert!(swapped.contains(pair));
        }
    }

    #[test]
    fn prop_symmetric_removal_covers_both_orientations(matrix in matrix(3), pick in any::<prop::sample::Index>()) {
        let pairs = get_all_parameter_value_pairs(&matrix);
        let target = pick.get(&pairs).clone();
        let (p1, v1) = target.first();
        let (p2, v2) = target.second();
        // Pattern written against the reversed orientation.
        let first = ValuePattern::value(p2, v2.name).version(v2.version.clone());
        let second = ValuePattern::value(p1, v1.name).version(v1.version.clone());

        let mut symmetric = pairs.clone();
        let mut removed = Vec::new();
        prop_assert!(remove_parameter_value_pairs(&mut symmetric, &mut removed, &first, &second, true));
        prop_assert_eq!(removed, vec![target.clone()]);

        let mut asymmetric = pairs.clone();
        let mut removed = Vec::new();
        prop_assert!(!remove_parameter_value_pairs(&mut asymmetric, &mut removed, &first, &second, false));
        prop_assert_eq!(asymmetric.len(), pairs.len());
    }
}

// ── 3. Generator output against the oracle ───────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_generated_list_verifies_strictly(matrix in matrix(3)) {
        let rows = generate_combination_list(&matrix, None);
        let chain = chain_for(&matrix);
        for row in &rows {
            prop_assert!(chain.check(row, Reason::silent()), "{}", row);
            prop_assert_eq!(row.len(), matrix.len());
        }
        let expected = get_expected_parameter_value_pairs(&matrix).unwrap();
        let report = verify(&rows, &expected.kept, true);
        prop_assert!(report.is_success(), "{}", report);
    }
}

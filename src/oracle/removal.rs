// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Pair removal operations.
//!
//! Every operation partitions the working list: matching pairs move to
//! `removed`, the rest stay in place and keep their order.

use std::ops::Bound;

use super::pattern::{ValuePattern, VersionMatch};
use crate::error::{CoverageError, Result};
use crate::model::ParameterValuePair;
use crate::version::{Version, VersionRange};
use crate::versions::SupportTable;

fn pair_matches(
    pair: &ParameterValuePair,
    first: &ValuePattern,
    second: &ValuePattern,
    symmetric: bool,
) -> bool {
    let (p1, v1) = pair.first();
    let (p2, v2) = pair.second();
    (first.matches(p1, v1) && second.matches(p2, v2))
        || (symmetric && first.matches(p2, v2) && second.matches(p1, v1))
}

/// Move every pair matching `first`/`second` from `pairs` to `removed`.
///
/// With `symmetric` a pair matches in either orientation; without it only a
/// pair whose stored first entry matches `first` does. Returns whether
/// anything was removed.
pub fn remove_parameter_value_pairs(
    pairs: &mut Vec<ParameterValuePair>,
    removed: &mut Vec<ParameterValuePair>,
    first: &ValuePattern,
    second: &ValuePattern,
    symmetric: bool,
) -> bool {
    let before = removed.len();
    let (gone, kept): (Vec<_>, Vec<_>) = std::mem::take(pairs)
        .into_iter()
        .partition(|pair| pair_matches(pair, first, second, symmetric));
    *pairs = kept;
    removed.extend(gone);
    removed.len() > before
}

/// [`remove_parameter_value_pairs`] for version-range patterns.
///
/// At least one side must select versions by range, and every range given must
/// have a lower or an upper bound. A call without one is a programming error
/// and fails with [`CoverageError::MissingBound`] before touching the list.
pub fn remove_parameter_value_pairs_ranges(
    pairs: &mut Vec<ParameterValuePair>,
    removed: &mut Vec<ParameterValuePair>,
    first: &ValuePattern,
    second: &ValuePattern,
    symmetric: bool,
) -> Result<bool> {
    let mut ranged = false;
    for pattern in [first, second] {
        if let VersionMatch::Range(range) = &pattern.version {
            if range.is_unbounded() {
                return Err(CoverageError::MissingBound {
                    parameter: pattern.describe_parameter(),
                });
            }
            ranged = true;
        }
    }
    if !ranged {
        return Err(CoverageError::MissingBound {
            parameter: first.describe_parameter(),
        });
    }
    Ok(remove_parameter_value_pairs(
        pairs, removed, first, second, symmetric,
    ))
}

/// Whether a partition edge includes the version it sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Inclusive,
    Exclusive,
}

impl Edge {
    fn bound(self, version: &Version) -> Bound<Version> {
        match self {
            Edge::Inclusive => Bound::Included(version.clone()),
            Edge::Exclusive => Bound::Excluded(version.clone()),
        }
    }

    fn complement(self) -> Self {
        match self {
            Edge::Inclusive => Edge::Exclusive,
            Edge::Exclusive => Edge::Inclusive,
        }
    }
}

/// Boundary flags of the support-table partition.
///
/// `window_lower` and `window_upper` are the driver edges at `older` and
/// `newer` of each window between adjacent entries. `dependency` is the
/// lower edge of the removed dependency range at the ceiling: `Exclusive`
/// removes only dependencies strictly above it.
///
/// The open end below the oldest entry takes the complement of
/// `window_lower` at the oldest entry, so every driver above OFF falls into
/// exactly one pass. The open end at the newest entry only runs when
/// `window_upper` leaves the newest entry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionEdges {
    pub window_lower: Edge,
    pub window_upper: Edge,
    pub dependency: Edge,
}

impl Default for PartitionEdges {
    /// `[older, newer)` windows and strictly-greater dependencies: the
    /// nearest-entry-below lookup of [`SupportTable::supports`].
    fn default() -> Self {
        Self {
            window_lower: Edge::Inclusive,
            window_upper: Edge::Exclusive,
            dependency: Edge::Exclusive,
        }
    }
}

/// Remove the pairs a [`SupportTable`] forbids, with the default edges.
///
/// `driver` selects the tool whose version is looked up, `dependency` the
/// value it must support; their version selectors are ignored. For adjacent
/// entries `(newer, older)`, drivers in `[older, newer)` lose dependencies
/// above `older`'s ceiling. Drivers below the oldest entry (but not OFF) are
/// held to the oldest ceiling, and a driver exactly at the newest entry to the
/// newest ceiling. Drivers newer than the table keep everything.
pub fn remove_support_table_violations(
    pairs: &mut Vec<ParameterValuePair>,
    removed: &mut Vec<ParameterValuePair>,
    table: &SupportTable,
    driver: &ValuePattern,
    dependency: &ValuePattern,
) -> Result<bool> {
    remove_support_table_violations_with(
        pairs,
        removed,
        table,
        driver,
        dependency,
        PartitionEdges::default(),
    )
}

/// [`remove_support_table_violations`] with caller-chosen boundary edges.
pub fn remove_support_table_violations_with(
    pairs: &mut Vec<ParameterValuePair>,
    removed: &mut Vec<ParameterValuePair>,
    table: &SupportTable,
    driver: &ValuePattern,
    dependency: &ValuePattern,
    edges: PartitionEdges,
) -> Result<bool> {
    let mut any = false;
    let mut remove = |drivers: VersionRange, ceiling: &Version| -> Result<bool> {
        let above = VersionRange::new(edges.dependency.bound(ceiling), Bound::Unbounded);
        remove_parameter_value_pairs_ranges(
            pairs,
            removed,
            &driver.clone().range(drivers),
            &dependency.clone().range(above),
            true,
        )
    };

    for window in table.entries().windows(2) {
        let (newer, older) = (&window[0], &window[1]);
        any |= remove(
            VersionRange::new(
                edges.window_lower.bound(&older.tool),
                edges.window_upper.bound(&newer.tool),
            ),
            &older.max_dependency,
        )?;
    }

    let oldest = table.oldest();
    any |= remove(
        VersionRange::new(
            Bound::Excluded(Version::off()),
            edges.window_lower.complement().bound(&oldest.tool),
        ),
        &oldest.max_dependency,
    )?;

    let newest = table.newest();
    if edges.window_upper == Edge::Exclusive || table.entries().len() == 1 {
        any |= remove(
            VersionRange::exactly(newest.tool.clone()),
            &newest.max_dependency,
        )?;
    }
    Ok(any)
}

/// The versions above OFF that `range` excludes, as at most two ranges.
pub fn outside(range: &VersionRange) -> Vec<VersionRange> {
    let mut parts = Vec::with_capacity(2);
    match range.lower() {
        Bound::Included(low) => parts.push(VersionRange::new(
            Bound::Excluded(Version::off()),
            Bound::Excluded(low.clone()),
        )),
        Bound::Excluded(low) => parts.push(VersionRange::new(
            Bound::Excluded(Version::off()),
            Bound::Included(low.clone()),
        )),
        Bound::Unbounded => {}
    }
    match range.upper() {
        Bound::Included(high) => parts.push(VersionRange::greater_than(high.clone())),
        Bound::Excluded(high) => parts.push(VersionRange::at_least(high.clone())),
        Bound::Unbounded => {}
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Compiler, Parameter, ParameterValue};

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn pair(p1: Parameter, v1: &str, p2: Parameter, v2: &str) -> ParameterValuePair {
        let value = |p: Parameter, s: &str| -> ParameterValue {
            if p.is_compiler() {
                s.parse().unwrap()
            } else {
                ParameterValue::of(p, v(s))
            }
        };
        ParameterValuePair::new(p1, value(p1, v1), p2, value(p2, v2))
    }

    fn sample() -> Vec<ParameterValuePair> {
        vec![
            pair(Parameter::HostCompiler, "gcc@10", Parameter::DeviceCompiler, "nvcc@11.0"),
            pair(Parameter::DeviceCompiler, "nvcc@11.0", Parameter::HostCompiler, "gcc@10"),
            pair(Parameter::HostCompiler, "gcc@11", Parameter::Ubuntu, "20.04"),
            pair(Parameter::Cmake, "3.22", Parameter::Boost, "1.80.0"),
        ]
    }

    #[test]
    fn test_symmetric_removal_hits_both_orientations() {
        let mut pairs = sample();
        let mut removed = Vec::new();
        let host = ValuePattern::value(Parameter::HostCompiler, Compiler::Gcc).version(v("10"));
        let device = ValuePattern::value(Parameter::DeviceCompiler, Compiler::Nvcc);
        assert!(remove_parameter_value_pairs(&mut pairs, &mut removed, &host, &device, true));
        assert_eq!(removed.len(), 2);
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn test_asymmetric_removal_hits_one_orientation() {
        let mut pairs = sample();
        let mut removed = Vec::new();
        let host = ValuePattern::value(Parameter::HostCompiler, Compiler::Gcc).version(v("10"));
        let device = ValuePattern::value(Parameter::DeviceCompiler, Compiler::Nvcc);
        assert!(remove_parameter_value_pairs(&mut pairs, &mut removed, &host, &device, false));
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].first().0, Parameter::HostCompiler);
        // The reversed orientation stays.
        assert!(pairs.iter().any(|p| p.first().0 == Parameter::DeviceCompiler));
    }

    #[test]
    fn test_wildcard_removes_everything() {
        let mut pairs = sample();
        let mut removed = Vec::new();
        assert!(remove_parameter_value_pairs(
            &mut pairs,
            &mut removed,
            &ValuePattern::any(),
            &ValuePattern::any(),
            true
        ));
        assert!(pairs.is_empty());
        assert_eq!(removed.len(), 4);
    }

    #[test]
    fn test_nothing_matched_returns_false() {
        let mut pairs = sample();
        let mut removed = Vec::new();
        let sycl = ValuePattern::parameter(Parameter::Sycl);
        assert!(!remove_parameter_value_pairs(
            &mut pairs,
            &mut removed,
            &sycl,
            &ValuePattern::any(),
            true
        ));
        assert_eq!(pairs.len(), 4);
    }

    #[test]
    fn test_range_removal_requires_a_bound() {
        let mut pairs = sample();
        let mut removed = Vec::new();
        let unbounded = ValuePattern::parameter(Parameter::Ubuntu).range(VersionRange::any());
        let result = remove_parameter_value_pairs_ranges(
            &mut pairs,
            &mut removed,
            &unbounded,
            &ValuePattern::any(),
            true,
        );
        assert_eq!(
            result,
            Err(CoverageError::MissingBound {
                parameter: "ubuntu".to_string()
            })
        );

        let exact_only = ValuePattern::parameter(Parameter::Cmake).version(v("3.22"));
        assert!(remove_parameter_value_pairs_ranges(
            &mut pairs,
            &mut removed,
            &exact_only,
            &ValuePattern::any(),
            true,
        )
        .is_err());
        assert_eq!(pairs.len(), 4);

        let old_ubuntu = ValuePattern::parameter(Parameter::Ubuntu).range(VersionRange::below(v("22.04")));
        assert_eq!(
            remove_parameter_value_pairs_ranges(
                &mut pairs,
                &mut removed,
                &old_ubuntu,
                &ValuePattern::any(),
                true,
            ),
            Ok(true)
        );
        assert_eq!(pairs.len(), 3);
    }

    fn nvcc_gcc_pairs() -> Vec<ParameterValuePair> {
        [("12", "11.4"), ("11", "11.4"), ("11", "11.1"), ("10", "11.1"), ("9", "11.0")]
            .iter()
            .map(|(gcc, nvcc)| {
                pair(
                    Parameter::HostCompiler,
                    &format!("gcc@{gcc}"),
                    Parameter::DeviceCompiler,
                    &format!("nvcc@{nvcc}"),
                )
            })
            .collect()
    }

    fn table_removal(edges: PartitionEdges) -> Vec<String> {
        let mut pairs = nvcc_gcc_pairs();
        let mut removed = Vec::new();
        remove_support_table_violations_with(
            &mut pairs,
            &mut removed,
            crate::versions::nvcc_gcc_support(),
            &ValuePattern::value(Parameter::DeviceCompiler, Compiler::Nvcc),
            &ValuePattern::value(Parameter::HostCompiler, Compiler::Gcc),
            edges,
        )
        .unwrap();
        removed
            .iter()
            .map(|p| format!("{}/{}", p.first().1, p.second().1))
            .collect()
    }

    #[test]
    fn test_default_edges_match_table_lookup() {
        let table = crate::versions::nvcc_gcc_support();
        let mut expected = Vec::new();
        for pair in nvcc_gcc_pairs() {
            if !table.supports(&pair.second().1.version, &pair.first().1.version) {
                expected.push(format!("{}/{}", pair.first().1, pair.second().1));
            }
        }
        assert_eq!(expected, vec!["gcc@12/nvcc@11.4", "gcc@11/nvcc@11.1"]);
        assert_eq!(table_removal(PartitionEdges::default()), expected);
    }

    #[test]
    fn test_caller_chosen_edges() {
        // The ceiling itself goes as well.
        let inclusive_ceiling = PartitionEdges {
            dependency: Edge::Inclusive,
            ..PartitionEdges::default()
        };
        assert_eq!(
            table_removal(inclusive_ceiling),
            vec![
                "gcc@12/nvcc@11.4",
                "gcc@11/nvcc@11.4",
                "gcc@11/nvcc@11.1",
                "gcc@10/nvcc@11.1",
                "gcc@9/nvcc@11.0",
            ]
        );

        // Drivers exactly at an entry fall to the window below it.
        let upper_windows = PartitionEdges {
            window_lower: Edge::Exclusive,
            window_upper: Edge::Inclusive,
            ..PartitionEdges::default()
        };
        assert_eq!(
            table_removal(upper_windows),
            vec![
                "gcc@12/nvcc@11.4",
                "gcc@11/nvcc@11.4",
                "gcc@11/nvcc@11.1",
                "gcc@10/nvcc@11.1",
                "gcc@9/nvcc@11.0",
            ]
        );
    }

    #[test]
    fn test_outside() {
        let bin = VersionRange::half_open(v("11.7"), v("12.5"));
        let parts = outside(&bin);
        assert_eq!(parts.len(), 2);
        assert!(parts[0].contains(&v("11.6")));
        assert!(!parts[0].contains(&Version::off()));
        assert!(!parts[0].contains(&v("11.7")));
        assert!(parts[1].contains(&v("12.5")));
        assert!(outside(&VersionRange::any()).is_empty());
    }
}

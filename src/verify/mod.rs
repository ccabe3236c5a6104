// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Verifier: cross-check a combination list against the expected pairs.

use std::collections::HashSet;
use std::fmt::{self, Write as _};

use serde::Serialize;
use tracing::{info, warn};

use crate::model::{CombinationList, ParameterValuePair};

/// Outcome of [`verify`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    /// Expected pairs that no row contains.
    pub missing: Vec<ParameterValuePair>,
    /// Pairs some row contains that were not expected. Only filled in strict mode.
    pub unexpected: Vec<ParameterValuePair>,
}

impl VerificationReport {
    pub fn is_success(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty()
    }
}

fn describe(pair: &ParameterValuePair) -> String {
    let (p1, v1) = pair.first();
    let (p2, v2) = pair.second();
    format!("{p1}={v1} {p2}={v2}")
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_success() {
            return write!(f, "verification passed");
        }
        write!(
            f,
            "verification failed: {} missing, {} unexpected",
            self.missing.len(),
            self.unexpected.len()
        )?;
        for pair in &self.missing {
            write!(f, "\nmissing: {}", describe(pair))?;
        }
        for pair in &self.unexpected {
            write!(f, "\nunexpected: {}", describe(pair))?;
        }
        Ok(())
    }
}

/// Whether every pair of `expected` occurs in some row.
///
/// Each missing pair is written to `sink` on a line of its own.
pub fn check_parameter_value_pair_in_combination_list(
    combinations: &CombinationList,
    expected: &[ParameterValuePair],
    mut sink: Option<&mut String>,
) -> bool {
    let mut complete = true;
    for pair in expected {
        if !combinations.iter().any(|row| pair.is_in(row)) {
            complete = false;
            if let Some(sink) = sink.as_deref_mut() {
                let _ = writeln!(sink, "{} is missing", describe(pair));
            }
        }
    }
    complete
}

/// Pairs of values occurring in the rows but absent from `expected`, first
/// occurrence order.
fn unexpected_pairs(
    combinations: &CombinationList,
    expected: &[ParameterValuePair],
) -> Vec<ParameterValuePair> {
    let expected: HashSet<&ParameterValuePair> = expected.iter().collect();
    let mut seen: HashSet<ParameterValuePair> = HashSet::new();
    let mut unexpected = Vec::new();
    for row in combinations {
        let entries: Vec<_> = row.iter().collect();
        for (i, (p1, v1)) in entries.iter().enumerate() {
            for (p2, v2) in &entries[i + 1..] {
                let pair = ParameterValuePair::new(*p1, (*v1).clone(), *p2, (*v2).clone());
                if !expected.contains(&pair) && seen.insert(pair.clone()) {
                    unexpected.push(pair);
                }
            }
        }
    }
    unexpected
}

/// Whether the rows contain no pair outside `expected`.
///
/// Each unexpected pair is written to `sink` on a line of its own.
pub fn check_unexpected_parameter_value_pair_in_combination_list(
    combinations: &CombinationList,
    expected: &[ParameterValuePair],
    sink: Option<&mut String>,
) -> bool {
    let unexpected = unexpected_pairs(combinations, expected);
    if let Some(sink) = sink {
        for pair in &unexpected {
            let _ = writeln!(sink, "{} is not expected", describe(pair));
        }
    }
    unexpected.is_empty()
}

/// Compare `combinations` with `expected`.
///
/// Missing pairs are always reported; with `strict`, pairs that occur but
/// were not expected are reported too.
pub fn verify(
    combinations: &CombinationList,
    expected: &[ParameterValuePair],
    strict: bool,
) -> VerificationReport {
    let missing: Vec<ParameterValuePair> = expected
        .iter()
        .filter(|pair| !combinations.iter().any(|row| pair.is_in(row)))
        .cloned()
        .collect();
    let unexpected = if strict {
        unexpected_pairs(combinations, expected)
    } else {
        Vec::new()
    };
    let report = VerificationReport {
        missing,
        unexpected,
    };
    if report.is_success() {
        info!(
            rows = combinations.len(),
            expected = expected.len(),
            "verification passed"
        );
    } else {
        warn!(
            missing = report.missing.len(),
            unexpected = report.unexpected.len(),
            "verification failed"
        );
    }
    report
}

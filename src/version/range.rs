// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Version ranges (specifier sets).

use std::fmt;
use std::ops::{Bound, RangeBounds};

use super::Version;

/// An interval over [`Version`] with independent inclusive/exclusive bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    lower: Bound<Version>,
    upper: Bound<Version>,
}

impl VersionRange {
    pub fn new(lower: Bound<Version>, upper: Bound<Version>) -> Self {
        Self { lower, upper }
    }

    /// Every version.
    pub fn any() -> Self {
        Self::new(Bound::Unbounded, Bound::Unbounded)
    }

    /// `>= version`
    pub fn at_least(version: Version) -> Self {
        Self::new(Bound::Included(version), Bound::Unbounded)
    }

    /// `> version`
    pub fn greater_than(version: Version) -> Self {
        Self::new(Bound::Excluded(version), Bound::Unbounded)
    }

    /// `< version`
    pub fn below(version: Version) -> Self {
        Self::new(Bound::Unbounded, Bound::Excluded(version))
    }

    /// `<= version`
    pub fn at_most(version: Version) -> Self {
        Self::new(Bound::Unbounded, Bound::Included(version))
    }

    /// `>= lower, < upper`
    pub fn half_open(lower: Version, upper: Version) -> Self {
        Self::new(Bound::Included(lower), Bound::Excluded(upper))
    }

    /// `>= lower, <= upper`
    pub fn inclusive(lower: Version, upper: Version) -> Self {
        Self::new(Bound::Included(lower), Bound::Included(upper))
    }

    /// Exactly one version.
    pub fn exactly(version: Version) -> Self {
        Self::inclusive(version.clone(), version)
    }

    pub fn lower(&self) -> Bound<&Version> {
        self.lower.as_ref()
    }

    pub fn upper(&self) -> Bound<&Version> {
        self.upper.as_ref()
    }

    /// True if neither side is bounded.
    pub fn is_unbounded(&self) -> bool {
        matches!(
            (&self.lower, &self.upper),
            (Bound::Unbounded, Bound::Unbounded)
        )
    }

    pub fn contains(&self, version: &Version) -> bool {
        RangeBounds::contains(self, version)
    }
}

impl RangeBounds<Version> for VersionRange {
    fn start_bound(&self) -> Bound<&Version> {
        self.lower.as_ref()
    }

    fn end_bound(&self) -> Bound<&Version> {
        self.upper.as_ref()
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lower = match &self.lower {
            Bound::Included(v) => Some(format!(">={v}")),
            Bound::Excluded(v) => Some(format!(">{v}")),
            Bound::Unbounded => None,
        };
        let upper = match &self.upper {
            Bound::Included(v) => Some(format!("<={v}")),
            Bound::Excluded(v) => Some(format!("<{v}")),
            Bound::Unbounded => None,
        };
        match (lower, upper) {
            (Some(lower), Some(upper)) => write!(f, "{lower},{upper}"),
            (Some(bound), None) | (None, Some(bound)) => f.write_str(&bound),
            (None, None) => f.write_str("*"),
        }
    }
}

// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Ordered software versions.
//!
//! A [`Version`] is a dotted list of numeric release segments. Comparison pads
//! the shorter side with zeros, so `11` and `11.0` are the same version. The
//! original spelling is kept for display, which keeps reason strings such as
//! `nvcc 11.4 does not support gcc 12` exactly as the input was written.
//!
//! Two versions have a special meaning for backend parameters:
//! - [`Version::off`] (`0.0.0`) marks a disabled backend and is the lowest version
//! - [`Version::on`] (`1.0.0`) marks an enabled on/off backend

pub mod range;

pub use range::VersionRange;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CoverageError, Result};

/// A parsed, totally ordered version.
///
/// Cloning is cheap: segments and text are shared.
#[derive(Clone)]
pub struct Version {
    release: Arc<[u32]>,
    text: Arc<str>,
}

impl Version {
    /// Parse a dotted numeric version such as `11.4`, `20.04` or `2023.1.0`.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let invalid = || CoverageError::InvalidVersion {
            input: input.to_string(),
        };

        if trimmed.is_empty() {
            return Err(invalid());
        }

        let release = trimmed
            .split('.')
            .map(|segment| {
                if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                segment.parse::<u32>().map_err(|_| invalid())
            })
            .collect::<Result<Vec<u32>>>()?;

        Ok(Self {
            release: release.into(),
            text: trimmed.into(),
        })
    }

    /// Parse a version as written on a command line or in a configuration:
    /// `ON` and `OFF` (any case) are the toggle markers, anything else must
    /// be a dotted numeric version.
    pub fn parse_setting(input: &str) -> Result<Self> {
        match input.trim() {
            s if s.eq_ignore_ascii_case("on") => Ok(Self::on()),
            s if s.eq_ignore_ascii_case("off") => Ok(Self::off()),
            _ => Self::parse(input),
        }
    }

    /// Parse a version literal from a static table.
    ///
    /// # Panics
    ///
    /// Panics if the literal is malformed. Table literals are source data, so a
    /// bad one is a programming error.
    pub fn from_static(literal: &'static str) -> Self {
        match Self::parse(literal) {
            Ok(version) => version,
            Err(err) => panic!("{err} in static version table"),
        }
    }

    /// The disabled-backend marker, lower than every real version.
    pub fn off() -> Self {
        Self::from_static("0.0.0")
    }

    /// The enabled marker for on/off backends.
    pub fn on() -> Self {
        Self::from_static("1.0.0")
    }

    /// Whether this version is the OFF marker.
    pub fn is_off(&self) -> bool {
        self.significant().is_empty()
    }

    /// The numeric release segments as written.
    pub fn release(&self) -> &[u32] {
        &self.release
    }

    /// First release segment.
    pub fn major(&self) -> u32 {
        self.release[0]
    }

    /// Release segments without trailing zeros, used for ordering and hashing.
    fn significant(&self) -> &[u32] {
        let len = self
            .release
            .iter()
            .rposition(|&segment| segment != 0)
            .map_or(0, |idx| idx + 1);
        &self.release[..len]
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.significant() == other.significant()
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.significant().hash(state);
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        // Without trailing zeros, lexicographic order equals zero-padded order.
        self.significant().cmp(other.significant())
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Debug for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Version({})", self.text)
    }
}

impl FromStr for Version {
    type Err = CoverageError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

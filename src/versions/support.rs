// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Support tables and the nearest-version-below lookup.
//!
//! A support table lists, newest tool first, the highest dependency version a
//! tool version supports. A tool version is governed by the first entry whose
//! tool version is less than or equal to it:
//!
//! ```text
//! nvcc -> gcc      12.6 -> 13
//!                  12.4 -> 13     nvcc 12.5 looks up 12.4: gcc <= 13
//!                  12.0 -> 12     nvcc 12.1 looks up 12.0: gcc <= 12
//!                  ...
//!                  10.0 -> 7      nvcc 9.2 clamps to 10.0: gcc <= 7
//! ```
//!
//! A tool version newer than the newest entry is assumed to support every
//! dependency version. Each table therefore carries an entry for the newest
//! known tool version, which [`SupportTable::ensure_covers`] checks.

use std::fmt;

use crate::error::{CoverageError, Result};
use crate::version::Version;

/// One boundary: `tool` and later (up to the next entry) support dependencies up to `max_dependency`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportEntry {
    pub tool: Version,
    pub max_dependency: Version,
}

impl SupportEntry {
    pub fn new(tool: Version, max_dependency: Version) -> Self {
        Self {
            tool,
            max_dependency,
        }
    }
}

/// A validated, strictly descending list of [`SupportEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportTable {
    name: String,
    entries: Vec<SupportEntry>,
}

/// Highest host compiler version per nvcc version.
pub type NvccHostSupport = SupportTable;

/// Highest CUDA SDK version per clang-cuda version.
pub type ClangCudaSDKSupport = SupportTable;

/// Highest C++ standard per compiler (or CUDA SDK) version.
pub type CompilerCxxSupport = SupportTable;

impl SupportTable {
    /// Build a table, checking that it is non-empty and strictly descending by tool version.
    pub fn new(name: impl Into<String>, entries: Vec<SupportEntry>) -> Result<Self> {
        let name = name.into();
        if entries.is_empty() {
            return Err(CoverageError::MalformedSupportTable {
                table: name,
                detail: "no entries".to_string(),
            });
        }
        if let Some(window) = entries.windows(2).find(|w| w[0].tool <= w[1].tool) {
            return Err(CoverageError::MalformedSupportTable {
                detail: format!(
                    "entries must be strictly descending, found {} before {}",
                    window[0].tool, window[1].tool
                ),
                table: name,
            });
        }
        Ok(Self { name, entries })
    }

    /// Build a table from literal `(tool, max_dependency)` pairs.
    ///
    /// # Panics
    ///
    /// Panics on a malformed literal or an unordered table.
    pub fn from_static(name: &'static str, rows: &[(&'static str, &'static str)]) -> Self {
        let entries = rows
            .iter()
            .map(|(tool, max)| SupportEntry::new(Version::from_static(tool), Version::from_static(max)))
            .collect();
        match Self::new(name, entries) {
            Ok(table) => table,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries, newest tool first.
    pub fn entries(&self) -> &[SupportEntry] {
        &self.entries
    }

    pub fn newest(&self) -> &SupportEntry {
        &self.entries[0]
    }

    pub fn oldest(&self) -> &SupportEntry {
        &self.entries[self.entries.len() - 1]
    }

    /// The entry governing `tool`.
    ///
    /// Returns `None` when the table places no limit on `tool`: when it is
    /// strictly newer than the newest entry, or when it is the OFF marker
    /// (a disabled tool constrains nothing). Versions older than the oldest
    /// entry clamp to it.
    pub fn lookup(&self, tool: &Version) -> Option<&SupportEntry> {
        if tool.is_off() || *tool > self.newest().tool {
            return None;
        }
        self.entries
            .iter()
            .find(|entry| entry.tool <= *tool)
            .or_else(|| self.entries.last())
    }

    /// Highest supported dependency for `tool`, if limited.
    pub fn max_dependency(&self, tool: &Version) -> Option<&Version> {
        self.lookup(tool).map(|entry| &entry.max_dependency)
    }

    /// Whether `tool` supports `dependency`.
    pub fn supports(&self, tool: &Version, dependency: &Version) -> bool {
        self.max_dependency(tool)
            .map_or(true, |max| dependency <= max)
    }

    /// Fail unless the newest entry reaches `newest_known`.
    pub fn ensure_covers(&self, newest_known: &Version) -> Result<()> {
        if self.newest().tool < *newest_known {
            return Err(CoverageError::MalformedSupportTable {
                table: self.name.clone(),
                detail: format!(
                    "newest entry {} is older than newest known version {newest_known}",
                    self.newest().tool
                ),
            });
        }
        Ok(())
    }
}

impl fmt::Display for SupportTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.name)?;
        for entry in &self.entries {
            write!(f, " {}->{}", entry.tool, entry.max_dependency)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn gcc_table() -> SupportTable {
        SupportTable::from_static(
            "nvcc-gcc",
            &[("12.0", "12"), ("11.4", "11"), ("11.1", "10"), ("10.0", "7")],
        )
    }

    #[test]
    fn test_lookup_exact_entry() {
        let table = gcc_table();
        assert_eq!(table.max_dependency(&v("11.4")), Some(&v("11")));
        assert_eq!(table.max_dependency(&v("12.0")), Some(&v("12")));
    }

    #[test]
    fn test_lookup_between_entries() {
        let table = gcc_table();
        assert_eq!(table.max_dependency(&v("11.3")), Some(&v("10")));
        assert_eq!(table.max_dependency(&v("11.8")), Some(&v("11")));
    }

    #[test]
    fn test_lookup_clamps_below_oldest() {
        let table = gcc_table();
        assert_eq!(table.max_dependency(&v("9.2")), Some(&v("7")));
        assert!(!table.supports(&v("9.2"), &v("8")));
    }

    /// Newer than anything in the table: intentionally unrestricted.
    #[test]
    fn test_forward_compatibility_fallback() {
        let table = gcc_table();
        assert_eq!(table.lookup(&v("12.0.1")), None);
        assert!(table.supports(&v("42.0"), &v("99")));
    }

    #[test]
    fn test_off_is_unrestricted() {
        assert!(gcc_table().supports(&Version::off(), &v("99")));
    }

    #[test]
    fn test_rejects_unordered() {
        let entries = vec![
            SupportEntry::new(v("11.0"), v("9")),
            SupportEntry::new(v("12.0"), v("12")),
        ];
        assert!(matches!(
            SupportTable::new("bad", entries),
            Err(CoverageError::MalformedSupportTable { .. })
        ));
        assert!(SupportTable::new("empty", vec![]).is_err());
    }

    #[test]
    fn test_ensure_covers() {
        let table = gcc_table();
        assert!(table.ensure_covers(&v("12.0")).is_ok());
        assert!(table.ensure_covers(&v("11.8")).is_ok());
        assert!(table.ensure_covers(&v("12.1")).is_err());
    }
}

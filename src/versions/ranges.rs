// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Platform bins derived from SDK anchors.
//!
//! An anchor `(sdk, platform)` says "SDK `sdk` first became installable on
//! `platform`". The anchors are turned into disjoint bins, one per platform,
//! that together cover every SDK version:
//!
//! ```text
//! oldest platform 20.04, anchors (11.7 -> 22.04), (12.5 -> 24.04)
//!
//! 20.04  <11.7
//! 22.04  >=11.7,<12.5
//! 24.04  >=12.5
//! ```

use crate::error::{CoverageError, Result};
use crate::version::{Version, VersionRange};

/// SDK versions available on one platform version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformRange {
    pub platform: Version,
    pub sdk: VersionRange,
}

/// Derive platform bins from `(min_sdk, platform)` anchors.
///
/// Anchors must be strictly ascending in both SDK and platform version, and
/// every anchor platform must be newer than `oldest_platform`.
pub fn derive_platform_sdk_ranges(
    oldest_platform: &Version,
    anchors: &[(Version, Version)],
) -> Result<Vec<PlatformRange>> {
    for window in anchors.windows(2) {
        let ((sdk_a, platform_a), (sdk_b, platform_b)) = (&window[0], &window[1]);
        if sdk_a >= sdk_b || platform_a >= platform_b {
            return Err(CoverageError::MalformedRange {
                detail: format!(
                    "anchors ({sdk_a} -> {platform_a}) and ({sdk_b} -> {platform_b}) are not ascending"
                ),
            });
        }
    }

    let Some((first_sdk, first_platform)) = anchors.first() else {
        return Ok(vec![PlatformRange {
            platform: oldest_platform.clone(),
            sdk: VersionRange::any(),
        }]);
    };
    if first_platform <= oldest_platform {
        return Err(CoverageError::MalformedRange {
            detail: format!(
                "anchor platform {first_platform} is not newer than oldest platform {oldest_platform}"
            ),
        });
    }

    let mut bins = Vec::with_capacity(anchors.len() + 1);
    bins.push(PlatformRange {
        platform: oldest_platform.clone(),
        sdk: VersionRange::below(first_sdk.clone()),
    });
    for (idx, (sdk, platform)) in anchors.iter().enumerate() {
        let range = match anchors.get(idx + 1) {
            Some((next_sdk, _)) => VersionRange::half_open(sdk.clone(), next_sdk.clone()),
            None => VersionRange::at_least(sdk.clone()),
        };
        bins.push(PlatformRange {
            platform: platform.clone(),
            sdk: range,
        });
    }
    Ok(bins)
}

/// The bin for `platform`, if the platform is known.
pub fn find_platform_range<'a>(
    bins: &'a [PlatformRange],
    platform: &Version,
) -> Option<&'a PlatformRange> {
    bins.iter().find(|bin| bin.platform == *platform)
}

/// Whether `sdk` is installable on `platform`. Unknown platforms allow every SDK.
pub fn platform_supports_sdk(bins: &[PlatformRange], platform: &Version, sdk: &Version) -> bool {
    find_platform_range(bins, platform).map_or(true, |bin| bin.sdk.contains(sdk))
}

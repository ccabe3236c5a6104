// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Static compatibility data.
//!
//! Literal tables live here and are parsed once, on first use. A malformed
//! literal panics at that point.

use std::sync::OnceLock;

use super::ranges::{derive_platform_sdk_ranges, PlatformRange};
use super::support::{
    ClangCudaSDKSupport, CompilerCxxSupport, NvccHostSupport, SupportEntry, SupportTable,
};
use crate::error::{CoverageError, Result};
use crate::model::Compiler;
use crate::version::{Version, VersionRange};

pub(crate) const GCC_VERSIONS: &[&str] = &["9", "10", "11", "12", "13"];
pub(crate) const CLANG_VERSIONS: &[&str] = &[
    "9", "10", "11", "12", "13", "14", "15", "16", "17", "18",
];
pub(crate) const CLANG_CUDA_VERSIONS: &[&str] = CLANG_VERSIONS;
pub(crate) const NVCC_VERSIONS: &[&str] = &[
    "11.0", "11.1", "11.2", "11.3", "11.4", "11.5", "11.6", "11.7", "11.8", "12.0", "12.1",
    "12.2", "12.3", "12.4", "12.5", "12.6",
];
pub(crate) const HIPCC_VERSIONS: &[&str] = &["5.7", "6.0", "6.1"];
pub(crate) const ICPX_VERSIONS: &[&str] = &["2023.1.0", "2023.2.0", "2024.0.0"];
pub(crate) const UBUNTU_VERSIONS: &[&str] = &["20.04", "22.04", "24.04"];
pub(crate) const CMAKE_VERSIONS: &[&str] = &[
    "3.22", "3.23", "3.24", "3.25", "3.26", "3.27", "3.28",
];
pub(crate) const BOOST_VERSIONS: &[&str] = &["1.74.0", "1.78.0", "1.80.0", "1.82.0", "1.84.0"];
pub(crate) const CXX_STANDARDS: &[&str] = &["17", "20", "23"];

const NVCC_GCC: &[(&str, &str)] = &[
    ("12.6", "13"),
    ("12.4", "13"),
    ("12.0", "12"),
    ("11.4", "11"),
    ("11.1", "10"),
    ("11.0", "9"),
    ("10.1", "8"),
    ("10.0", "7"),
];

const NVCC_CLANG: &[(&str, &str)] = &[
    ("12.6", "17"),
    ("12.4", "17"),
    ("12.3", "16"),
    ("12.2", "15"),
    ("12.0", "14"),
    ("11.6", "13"),
    ("11.2", "12"),
    ("11.1", "10"),
    ("11.0", "9"),
    ("10.1", "8"),
    ("10.0", "6"),
];

const CLANG_CUDA_SDK: &[(&str, &str)] = &[
    ("18", "12.3"),
    ("17", "12.1"),
    ("16", "11.8"),
    ("14", "11.5"),
    ("13", "11.2"),
    ("12", "11.0"),
    ("10", "10.1"),
    ("9", "10.0"),
];

const GCC_CXX: &[(&str, &str)] = &[("13", "23"), ("10", "20"), ("7", "17")];

const CLANG_CXX: &[(&str, &str)] = &[("18", "23"), ("17", "23"), ("10", "20"), ("5", "17")];

const NVCC_CXX: &[(&str, &str)] = &[("12.6", "20"), ("12.0", "20"), ("11.0", "17"), ("10.0", "14")];

const ICPX_CXX: &[(&str, &str)] = &[("2024.0.0", "23"), ("2023.1.0", "20")];

const UBUNTU_OLDEST: &str = "20.04";

/// `(first CUDA SDK, Ubuntu release)`: the SDK is installable from that release on.
const UBUNTU_CUDA_ANCHORS: &[(&str, &str)] = &[("11.7", "22.04"), ("12.5", "24.04")];

const CLANG_CUDA_MINIMUM: &str = "14";

pub(crate) fn parse_all(literals: &[&'static str]) -> Vec<Version> {
    literals.iter().map(|s| Version::from_static(s)).collect()
}

pub fn nvcc_gcc_support() -> &'static NvccHostSupport {
    static TABLE: OnceLock<SupportTable> = OnceLock::new();
    TABLE.get_or_init(|| SupportTable::from_static("nvcc gcc support", NVCC_GCC))
}

pub fn nvcc_clang_support() -> &'static NvccHostSupport {
    static TABLE: OnceLock<SupportTable> = OnceLock::new();
    TABLE.get_or_init(|| SupportTable::from_static("nvcc clang support", NVCC_CLANG))
}

pub fn clang_cuda_sdk_support() -> &'static ClangCudaSDKSupport {
    static TABLE: OnceLock<SupportTable> = OnceLock::new();
    TABLE.get_or_init(|| SupportTable::from_static("clang-cuda CUDA support", CLANG_CUDA_SDK))
}

pub fn gcc_cxx_support() -> &'static CompilerCxxSupport {
    static TABLE: OnceLock<SupportTable> = OnceLock::new();
    TABLE.get_or_init(|| SupportTable::from_static("gcc C++ support", GCC_CXX))
}

/// Also used for clang-cuda, which shares the clang frontend.
pub fn clang_cxx_support() -> &'static CompilerCxxSupport {
    static TABLE: OnceLock<SupportTable> = OnceLock::new();
    TABLE.get_or_init(|| SupportTable::from_static("clang C++ support", CLANG_CXX))
}

pub fn nvcc_cxx_support() -> &'static CompilerCxxSupport {
    static TABLE: OnceLock<SupportTable> = OnceLock::new();
    TABLE.get_or_init(|| SupportTable::from_static("nvcc C++ support", NVCC_CXX))
}

pub fn icpx_cxx_support() -> &'static CompilerCxxSupport {
    static TABLE: OnceLock<SupportTable> = OnceLock::new();
    TABLE.get_or_init(|| SupportTable::from_static("icpx C++ support", ICPX_CXX))
}

/// Highest C++ standard reachable for each CUDA SDK version through either nvcc or clang-cuda.
pub fn cuda_cxx_support() -> &'static CompilerCxxSupport {
    static TABLE: OnceLock<SupportTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        let clang_cuda: Vec<Version> = parse_all(CLANG_CUDA_VERSIONS)
            .into_iter()
            .filter(|version| *version >= clang_cuda_minimum())
            .collect();
        match derive_cuda_cxx_support(
            &parse_all(NVCC_VERSIONS),
            nvcc_cxx_support(),
            &clang_cuda,
            clang_cuda_sdk_support(),
            clang_cxx_support(),
        ) {
            Ok(table) => table,
            Err(err) => panic!("{err}"),
        }
    })
}

/// The C++ standard table for a compiler. hipcc is not limited.
pub fn cxx_support_for(compiler: Compiler) -> Option<&'static CompilerCxxSupport> {
    match compiler {
        Compiler::Gcc => Some(gcc_cxx_support()),
        Compiler::Clang | Compiler::ClangCuda => Some(clang_cxx_support()),
        Compiler::Nvcc => Some(nvcc_cxx_support()),
        Compiler::Icpx => Some(icpx_cxx_support()),
        Compiler::Hipcc => None,
    }
}

/// The nvcc host table for a host compiler, if nvcc accepts that host at all.
pub fn nvcc_host_support_for(host: Compiler) -> Option<&'static NvccHostSupport> {
    match host {
        Compiler::Gcc => Some(nvcc_gcc_support()),
        Compiler::Clang => Some(nvcc_clang_support()),
        _ => None,
    }
}

/// Ubuntu release to CUDA SDK bins.
pub fn ubuntu_cuda_ranges() -> &'static [PlatformRange] {
    static BINS: OnceLock<Vec<PlatformRange>> = OnceLock::new();
    BINS.get_or_init(|| {
        let anchors: Vec<(Version, Version)> = UBUNTU_CUDA_ANCHORS
            .iter()
            .map(|(sdk, platform)| (Version::from_static(sdk), Version::from_static(platform)))
            .collect();
        match derive_platform_sdk_ranges(&Version::from_static(UBUNTU_OLDEST), &anchors) {
            Ok(bins) => bins,
            Err(err) => panic!("{err}"),
        }
    })
}

/// The oldest Ubuntu release and the anchors the bins are derived from.
pub fn ubuntu_cuda_anchors() -> (Version, Vec<(Version, Version)>) {
    let anchors = UBUNTU_CUDA_ANCHORS
        .iter()
        .map(|(sdk, platform)| (Version::from_static(sdk), Version::from_static(platform)))
        .collect();
    (Version::from_static(UBUNTU_OLDEST), anchors)
}

/// clang-cuda releases below this are not supported at all.
pub fn clang_cuda_minimum() -> Version {
    Version::from_static(CLANG_CUDA_MINIMUM)
}

/// nvcc (or CUDA SDK) releases that cannot be hosted by clang.
pub fn clang_host_disabled_window() -> VersionRange {
    VersionRange::inclusive(Version::from_static("11.3"), Version::from_static("11.5"))
}

/// Merge the nvcc C++ table with the clang-cuda route into one table keyed by CUDA SDK version.
///
/// For every SDK version the result is the higher of what nvcc of that version
/// supports and what the oldest clang-cuda able to use that SDK supports.
/// `clang_cuda_versions` lists the clang-cuda releases to consider.
pub fn derive_cuda_cxx_support(
    sdk_versions: &[Version],
    nvcc_cxx: &CompilerCxxSupport,
    clang_cuda_versions: &[Version],
    clang_cuda_sdk: &ClangCudaSDKSupport,
    clang_cxx: &CompilerCxxSupport,
) -> Result<CompilerCxxSupport> {
    let mut sdks = sdk_versions.to_vec();
    sdks.sort();
    sdks.dedup();
    let mut clang_cuda = clang_cuda_versions.to_vec();
    clang_cuda.sort();

    let uncovered = |what: String| CoverageError::MalformedSupportTable {
        table: "CUDA C++ support".to_string(),
        detail: what,
    };

    let mut ascending: Vec<SupportEntry> = Vec::new();
    for sdk in &sdks {
        let via_nvcc = nvcc_cxx
            .max_dependency(sdk)
            .ok_or_else(|| uncovered(format!("{} does not reach CUDA {sdk}", nvcc_cxx.name())))?;

        let via_clang = match clang_cuda.iter().find(|cc| clang_cuda_sdk.supports(cc, sdk)) {
            Some(cc) => Some(clang_cxx.max_dependency(cc).ok_or_else(|| {
                uncovered(format!("{} does not reach clang-cuda {cc}", clang_cxx.name()))
            })?),
            None => None,
        };

        let best = match via_clang {
            Some(clang) if clang > via_nvcc => clang,
            _ => via_nvcc,
        };
        if ascending.last().map_or(true, |prev| prev.max_dependency != *best) {
            ascending.push(SupportEntry::new(sdk.clone(), best.clone()));
        }
    }

    if let (Some(newest), Some(last)) = (sdks.last(), ascending.last()) {
        if last.tool != *newest {
            let ceiling = last.max_dependency.clone();
            ascending.push(SupportEntry::new(newest.clone(), ceiling));
        }
    }

    ascending.reverse();
    SupportTable::new("CUDA C++ support", ascending)
}

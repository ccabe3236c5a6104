// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Run configuration.
//!
//! A JSON document with three optional sections:
//!
//! ```json
//! {
//!   "generator": { "search_budget": 20000, "sdk_availability": true },
//!   "format": { "aliases": { "ALPAKA_ACC_GPU_CUDA_ENABLE": "cuda" } },
//!   "extra_versions": { "gcc": ["14"], "ALPAKA_ACC_GPU_CUDA_ENABLE": ["12.8"] }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoverageError, Result};
use crate::format::FormatConfig;
use crate::generator::GeneratorConfig;
use crate::model::{Parameter, ParameterValue, ParameterValueMatrix, ValueName};
use crate::version::Version;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub generator: GeneratorConfig,
    pub format: FormatConfig,
    /// Software name to versions appended to the base matrix.
    pub extra_versions: BTreeMap<String, Vec<String>>,
}

impl RunConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| CoverageError::InvalidConfig {
            detail: err.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|err| CoverageError::InvalidConfig {
            detail: format!("{}: {err}", path.display()),
        })?;
        Self::from_json_str(&json)
    }

    /// Append the extra versions to `matrix`.
    ///
    /// Compiler versions go to both compiler columns. Every other name must
    /// be a parameter other than the two compiler columns; `ON`/`OFF` are
    /// accepted for backends.
    pub fn apply_extra_versions(&self, matrix: &mut ParameterValueMatrix) -> Result<()> {
        for (name, versions) in &self.extra_versions {
            let software: ValueName = name.parse()?;
            let versions = versions
                .iter()
                .map(|v| Version::parse_setting(v))
                .collect::<Result<Vec<_>>>()?;
            match software {
                ValueName::Compiler(compiler) => {
                    for parameter in [Parameter::HostCompiler, Parameter::DeviceCompiler] {
                        matrix.extend_values(
                            parameter,
                            versions
                                .iter()
                                .map(|v| ParameterValue::compiler(compiler, v.clone())),
                        );
                    }
                }
                ValueName::Parameter(parameter) if parameter.is_compiler() => {
                    return Err(CoverageError::UnknownSoftware { name: name.clone() });
                }
                ValueName::Parameter(parameter) => {
                    matrix.extend_values(
                        parameter,
                        versions
                            .iter()
                            .map(|v| ParameterValue::of(parameter, v.clone())),
                    );
                }
            }
            debug!(software = %name, count = versions.len(), "extra versions added");
        }
        Ok(())
    }
}

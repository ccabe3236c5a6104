// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Human-readable rendering of rows, pairs and combination lists.
//!
//! All display choices live in a [`FormatConfig`] the caller builds and
//! passes in; nothing here is global.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::model::{Parameter, ParameterValue, ParameterValuePair, ParameterValueTuple};

/// How parameters and values are printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatConfig {
    /// Display names by parameter or software name, e.g.
    /// `ALPAKA_ACC_GPU_CUDA_ENABLE` -> `cuda`.
    pub aliases: BTreeMap<String, String>,
    pub on_label: String,
    pub off_label: String,
    /// Separator between the entries of one row.
    pub separator: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            aliases: BTreeMap::new(),
            on_label: "ON".to_string(),
            off_label: "OFF".to_string(),
            separator: ", ".to_string(),
        }
    }
}

impl FormatConfig {
    /// Short aliases for the backend toggles and compiler columns.
    pub fn short() -> Self {
        let aliases = [
            (Parameter::HostCompiler, "host"),
            (Parameter::DeviceCompiler, "device"),
            (Parameter::CpuSerial, "serial"),
            (Parameter::CpuThreads, "threads"),
            (Parameter::CpuTbb, "tbb"),
            (Parameter::CpuOmp2Blocks, "omp2_blocks"),
            (Parameter::CpuOmp2Threads, "omp2_threads"),
            (Parameter::GpuCuda, "cuda"),
            (Parameter::GpuHip, "hip"),
            (Parameter::Sycl, "sycl"),
            (Parameter::CxxStandard, "c++"),
        ]
        .into_iter()
        .map(|(parameter, alias)| (parameter.to_string(), alias.to_string()))
        .collect();
        Self {
            aliases,
            ..Self::default()
        }
    }

    fn alias<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map_or(name, String::as_str)
    }

    pub fn parameter(&self, parameter: Parameter) -> String {
        self.alias(parameter.as_ref()).to_string()
    }

    /// A value as shown under `parameter`: compilers as `name@version`,
    /// backend toggles as the on/off labels, everything else as the version.
    pub fn value(&self, parameter: Parameter, value: &ParameterValue) -> String {
        if let Some(compiler) = value.as_compiler() {
            return format!("{}@{}", self.alias(compiler.as_ref()), value.version);
        }
        if parameter.is_backend() && value.version.is_off() {
            return self.off_label.clone();
        }
        if parameter.is_on_off_backend() {
            return self.on_label.clone();
        }
        value.version.to_string()
    }

    pub fn entry(&self, parameter: Parameter, value: &ParameterValue) -> String {
        format!("{}={}", self.parameter(parameter), self.value(parameter, value))
    }

    pub fn row(&self, row: &ParameterValueTuple) -> String {
        let entries: Vec<String> = row
            .iter()
            .map(|(parameter, value)| self.entry(parameter, value))
            .collect();
        entries.join(&self.separator)
    }

    pub fn pair(&self, pair: &ParameterValuePair) -> String {
        let (p1, v1) = pair.first();
        let (p2, v2) = pair.second();
        format!("({}, {})", self.entry(p1, v1), self.entry(p2, v2))
    }

    /// One numbered line per row.
    pub fn combination_list(&self, rows: &[ParameterValueTuple]) -> String {
        let mut out = String::new();
        for (index, row) in rows.iter().enumerate() {
            let _ = writeln!(out, "{index:>4}: {}", self.row(row));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> ParameterValueTuple {
        ParameterValueTuple::new()
            .with(Parameter::HostCompiler, "gcc@12".parse().unwrap())
            .with(Parameter::DeviceCompiler, "nvcc@12.0".parse().unwrap())
            .with(Parameter::GpuCuda, ParameterValue::of(Parameter::GpuCuda, "12.0".parse().unwrap()))
            .with(Parameter::GpuHip, ParameterValue::off(Parameter::GpuHip))
            .with(Parameter::CpuSerial, ParameterValue::on(Parameter::CpuSerial))
    }

    #[test]
    fn test_default_format() {
        assert_eq!(
            FormatConfig::default().row(&row()),
            "host_compiler=gcc@12, device_compiler=nvcc@12.0, ALPAKA_ACC_GPU_CUDA_ENABLE=12.0, \
             ALPAKA_ACC_GPU_HIP_ENABLE=OFF, ALPAKA_ACC_CPU_B_SEQ_T_SEQ_ENABLE=ON"
        );
    }

    #[test]
    fn test_short_aliases() {
        assert_eq!(
            FormatConfig::short().row(&row()),
            "host=gcc@12, device=nvcc@12.0, cuda=12.0, hip=OFF, serial=ON"
        );
    }

    #[test]
    fn test_cuda_off_uses_label() {
        let config = FormatConfig {
            off_label: "-".to_string(),
            ..FormatConfig::default()
        };
        assert_eq!(
            config.value(Parameter::GpuCuda, &ParameterValue::off(Parameter::GpuCuda)),
            "-"
        );
    }

    #[test]
    fn test_deserialize_partial() {
        let config: FormatConfig =
            serde_json::from_str(r#"{"aliases": {"gcc": "g"}, "on_label": "yes"}"#).unwrap();
        assert_eq!(config.on_label, "yes");
        assert_eq!(config.off_label, "OFF");
        assert_eq!(
            config.value(Parameter::HostCompiler, &"gcc@13".parse().unwrap()),
            "g@13"
        );
        assert!(serde_json::from_str::<FormatConfig>(r#"{"colour": true}"#).is_err());
    }
}

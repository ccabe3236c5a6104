// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Rows (parameter-value tuples) and the parameter-value matrix.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::{Compiler, Parameter, ParameterValue};
use crate::version::Version;

/// A full or partial assignment of parameters to values, in insertion order.
///
/// Absent parameters are "not yet decided". Filters read them through
/// [`get`](Self::get) and must pass when a parameter they need is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterValueTuple {
    entries: Vec<(Parameter, ParameterValue)>,
}

/// A generated list of jobs.
pub type CombinationList = Vec<ParameterValueTuple>;

impl ParameterValueTuple {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Assign a parameter, replacing any previous value in place.
    pub fn insert(&mut self, parameter: Parameter, value: ParameterValue) {
        match self.entries.iter_mut().find(|(p, _)| *p == parameter) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((parameter, value)),
        }
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, parameter: Parameter, value: ParameterValue) -> Self {
        self.insert(parameter, value);
        self
    }

    pub fn remove(&mut self, parameter: Parameter) -> Option<ParameterValue> {
        let idx = self.entries.iter().position(|(p, _)| *p == parameter)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn get(&self, parameter: Parameter) -> Option<&ParameterValue> {
        self.entries
            .iter()
            .find(|(p, _)| *p == parameter)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, parameter: Parameter) -> bool {
        self.get(parameter).is_some()
    }

    /// The compiler and version assigned to a compiler parameter.
    pub fn compiler(&self, parameter: Parameter) -> Option<(Compiler, &Version)> {
        let value = self.get(parameter)?;
        value.as_compiler().map(|compiler| (compiler, &value.version))
    }

    /// The version assigned to a parameter, whatever its name.
    pub fn version(&self, parameter: Parameter) -> Option<&Version> {
        self.get(parameter).map(|value| &value.version)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Parameter, &ParameterValue)> {
        self.entries.iter().map(|(p, value)| (*p, value))
    }

    pub fn parameters(&self) -> impl Iterator<Item = Parameter> + '_ {
        self.entries.iter().map(|(p, _)| *p)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A copy with entries rearranged to follow `order`.
    ///
    /// Parameters missing from `order` keep their relative order at the end.
    pub fn reordered<I>(&self, order: I) -> Self
    where
        I: IntoIterator<Item = Parameter>,
    {
        let mut result = Self::with_capacity(self.len());
        for parameter in order {
            if let Some(value) = self.get(parameter) {
                result.entries.push((parameter, value.clone()));
            }
        }
        for (parameter, value) in &self.entries {
            if !result.contains(*parameter) {
                result.entries.push((*parameter, value.clone()));
            }
        }
        result
    }
}

impl FromIterator<(Parameter, ParameterValue)> for ParameterValueTuple {
    fn from_iter<T: IntoIterator<Item = (Parameter, ParameterValue)>>(iter: T) -> Self {
        let mut row = Self::new();
        for (parameter, value) in iter {
            row.insert(parameter, value);
        }
        row
    }
}

impl fmt::Display for ParameterValueTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (idx, (parameter, value)) in self.entries.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{parameter}: {value}")?;
        }
        f.write_str("}")
    }
}

/// Serialized as an object keyed by parameter name, in row order.
impl Serialize for ParameterValueTuple {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (parameter, value) in &self.entries {
            map.serialize_entry(parameter.as_ref(), value)?;
        }
        map.end()
    }
}

/// Candidate values per parameter, in a significant column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterValueMatrix {
    columns: Vec<(Parameter, Vec<ParameterValue>)>,
}

impl ParameterValueMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column, replacing an existing one in place or appending a new one.
    pub fn insert(&mut self, parameter: Parameter, values: Vec<ParameterValue>) {
        match self.columns.iter_mut().find(|(p, _)| *p == parameter) {
            Some(column) => column.1 = values,
            None => self.columns.push((parameter, values)),
        }
    }

    pub fn with(mut self, parameter: Parameter, values: Vec<ParameterValue>) -> Self {
        self.insert(parameter, values);
        self
    }

    /// Append values that are not already present, creating the column if needed.
    pub fn extend_values<I>(&mut self, parameter: Parameter, values: I)
    where
        I: IntoIterator<Item = ParameterValue>,
    {
        if self.get(parameter).is_none() {
            self.columns.push((parameter, Vec::new()));
        }
        if let Some(column) = self.get_mut(parameter) {
            for value in values {
                if !column.contains(&value) {
                    column.push(value);
                }
            }
        }
    }

    /// Keep only the values of one column for which `keep` holds.
    pub fn retain_values<F>(&mut self, parameter: Parameter, keep: F)
    where
        F: FnMut(&ParameterValue) -> bool,
    {
        if let Some(column) = self.get_mut(parameter) {
            column.retain(keep);
        }
    }

    pub fn get(&self, parameter: Parameter) -> Option<&[ParameterValue]> {
        self.columns
            .iter()
            .find(|(p, _)| *p == parameter)
            .map(|(_, values)| values.as_slice())
    }

    pub fn get_mut(&mut self, parameter: Parameter) -> Option<&mut Vec<ParameterValue>> {
        self.columns
            .iter_mut()
            .find(|(p, _)| *p == parameter)
            .map(|(_, values)| values)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Parameter, &[ParameterValue])> {
        self.columns
            .iter()
            .map(|(parameter, values)| (*parameter, values.as_slice()))
    }

    pub fn parameters(&self) -> impl Iterator<Item = Parameter> + '_ {
        self.columns.iter().map(|(p, _)| *p)
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Size of the full Cartesian product, saturating.
    pub fn product_size(&self) -> usize {
        self.columns
            .iter()
            .fold(1usize, |acc, (_, values)| acc.saturating_mul(values.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pv(s: &str) -> ParameterValue {
        s.parse().unwrap()
    }

    #[test]
    fn test_row_insert_replaces() {
        let mut row = ParameterValueTuple::new()
            .with(Parameter::HostCompiler, pv("gcc@10"))
            .with(Parameter::Ubuntu, pv("ubuntu@20.04"));
        row.insert(Parameter::HostCompiler, pv("clang@16"));
        assert_eq!(row.len(), 2);
        assert_eq!(row.get(Parameter::HostCompiler), Some(&pv("clang@16")));
        assert_eq!(row.parameters().next(), Some(Parameter::HostCompiler));
    }

    #[test]
    fn test_row_absent_parameter() {
        let row = ParameterValueTuple::new().with(Parameter::HostCompiler, pv("gcc@10"));
        assert!(row.get(Parameter::DeviceCompiler).is_none());
        assert!(row.compiler(Parameter::DeviceCompiler).is_none());
        let (compiler, version) = row.compiler(Parameter::HostCompiler).unwrap();
        assert_eq!(compiler, Compiler::Gcc);
        assert_eq!(version.to_string(), "10");
    }

    #[test]
    fn test_row_reordered() {
        let row = ParameterValueTuple::new()
            .with(Parameter::Ubuntu, pv("ubuntu@20.04"))
            .with(Parameter::Cmake, pv("cmake@3.22"))
            .with(Parameter::HostCompiler, pv("gcc@10"));
        let reordered = row.reordered([Parameter::HostCompiler, Parameter::Ubuntu]);
        let order: Vec<_> = reordered.parameters().collect();
        assert_eq!(
            order,
            vec![Parameter::HostCompiler, Parameter::Ubuntu, Parameter::Cmake]
        );
    }

    #[test]
    fn test_row_serializes_as_ordered_object() {
        let row = ParameterValueTuple::new()
            .with(Parameter::HostCompiler, pv("gcc@10"))
            .with(Parameter::Ubuntu, pv("ubuntu@20.04"));
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(
            json,
            r#"{"host_compiler":{"name":"gcc","version":"10"},"ubuntu":{"name":"ubuntu","version":"20.04"}}"#
        );
    }

    #[test]
    fn test_matrix_extend_values_dedups() {
        let mut matrix = ParameterValueMatrix::new()
            .with(Parameter::Cmake, vec![pv("cmake@3.22"), pv("cmake@3.23")]);
        matrix.extend_values(Parameter::Cmake, [pv("cmake@3.23"), pv("cmake@3.24")]);
        matrix.extend_values(Parameter::Boost, [pv("boost@1.80.0")]);
        assert_eq!(matrix.get(Parameter::Cmake).unwrap().len(), 3);
        assert_eq!(matrix.get(Parameter::Boost).unwrap().len(), 1);
        assert_eq!(matrix.product_size(), 3);
    }

    #[test]
    fn test_matrix_retain_values() {
        let mut matrix = ParameterValueMatrix::new().with(
            Parameter::HostCompiler,
            vec![pv("gcc@10"), pv("nvcc@12.0"), pv("clang@16")],
        );
        matrix.retain_values(Parameter::HostCompiler, |v| !v.is_compiler(Compiler::Nvcc));
        assert_eq!(matrix.get(Parameter::HostCompiler).unwrap().len(), 2);
    }
}

// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Symmetric parameter-value pairs.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use super::{Parameter, ParameterValue, ParameterValueTuple};

/// Two assignments stored in a fixed order but compared without regard to it:
/// `(A=a, B=b)` equals `(B=b, A=a)`.
#[derive(Debug, Clone, Serialize)]
pub struct ParameterValuePair {
    pub first_parameter: Parameter,
    pub first_value: ParameterValue,
    pub second_parameter: Parameter,
    pub second_value: ParameterValue,
}

impl ParameterValuePair {
    pub fn new(
        first_parameter: Parameter,
        first_value: ParameterValue,
        second_parameter: Parameter,
        second_value: ParameterValue,
    ) -> Self {
        Self {
            first_parameter,
            first_value,
            second_parameter,
            second_value,
        }
    }

    /// The same pair stored the other way round.
    pub fn swapped(&self) -> Self {
        Self::new(
            self.second_parameter,
            self.second_value.clone(),
            self.first_parameter,
            self.first_value.clone(),
        )
    }

    pub fn first(&self) -> (Parameter, &ParameterValue) {
        (self.first_parameter, &self.first_value)
    }

    pub fn second(&self) -> (Parameter, &ParameterValue) {
        (self.second_parameter, &self.second_value)
    }

    /// Whether `row` assigns both sides. Rows that omit either parameter never match.
    pub fn is_in(&self, row: &ParameterValueTuple) -> bool {
        row.get(self.first_parameter) == Some(&self.first_value)
            && row.get(self.second_parameter) == Some(&self.second_value)
    }

    /// Both sides in a storage-independent order.
    fn canonical(&self) -> [(Parameter, &ParameterValue); 2] {
        let first = self.first();
        let second = self.second();
        match first.cmp(&second) {
            Ordering::Greater => [second, first],
            _ => [first, second],
        }
    }
}

impl PartialEq for ParameterValuePair {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for ParameterValuePair {}

impl Hash for ParameterValuePair {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl fmt::Display for ParameterValuePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}: {}, {}: {})",
            self.first_parameter, self.first_value, self.second_parameter, self.second_value
        )
    }
}

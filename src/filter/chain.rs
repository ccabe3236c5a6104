// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The filter chain.

use std::fmt;

use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter};
use tracing::debug;

use super::{
    backend_filter, compiler_filter, software_dependency_filter, Reason, RowFilter,
    SdkAvailability,
};
use crate::error::{CoverageError, Result};
use crate::model::{ParameterValueTuple, ValueName};
use crate::version::Version;

/// The stages of a [`FilterChain`], in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, AsRefStr)]
pub enum FilterStage {
    #[strum(serialize = "compiler_filter")]
    Compiler,
    #[strum(serialize = "backend_filter")]
    Backend,
    #[strum(serialize = "software_dependency_filter")]
    SoftwareDependency,
    #[strum(serialize = "sdk_availability_filter")]
    SdkAvailability,
    #[strum(serialize = "custom_filter")]
    Custom,
}

/// The result of one stage, as reported by [`FilterChain::evaluate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutcome {
    pub stage: FilterStage,
    pub passed: bool,
    /// The rejection sentence, when the stage failed.
    pub reason: Option<String>,
}

/// All filter families plus an optional caller filter, as one conjunction.
///
/// [`check`](Self::check) is the hot path used inside the combination search
/// and does no shape validation. [`check_typechecked`](Self::check_typechecked)
/// first verifies the row is well formed.
#[derive(Default)]
pub struct FilterChain<'a> {
    custom: Option<&'a dyn RowFilter>,
    availability: Option<SdkAvailability>,
}

impl<'a> FilterChain<'a> {
    /// The built-in families only.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_custom(mut self, custom: &'a dyn RowFilter) -> Self {
        self.custom = Some(custom);
        self
    }

    pub fn with_availability(mut self, availability: SdkAvailability) -> Self {
        self.availability = Some(availability);
        self
    }

    pub fn availability(&self) -> Option<&SdkAvailability> {
        self.availability.as_ref()
    }

    /// Run one stage. `None` if the stage is not configured.
    fn run_stage(
        &self,
        stage: FilterStage,
        row: &ParameterValueTuple,
        reason: Reason<'_>,
    ) -> Option<bool> {
        match stage {
            FilterStage::Compiler => Some(compiler_filter(row, reason)),
            FilterStage::Backend => Some(backend_filter(row, reason)),
            FilterStage::SoftwareDependency => Some(software_dependency_filter(row, reason)),
            FilterStage::SdkAvailability => self
                .availability
                .as_ref()
                .map(|availability| availability.check(row, reason)),
            FilterStage::Custom => self.custom.map(|custom| custom.check(row, reason)),
        }
    }

    /// Short-circuiting conjunction of every configured stage.
    pub fn check(&self, row: &ParameterValueTuple, mut reason: Reason<'_>) -> bool {
        FilterStage::iter().all(|stage| {
            self.run_stage(stage, row, reason.reborrow())
                .unwrap_or(true)
        })
    }

    /// [`check`](Self::check) after validating the row shape.
    pub fn check_typechecked(&self, row: &ParameterValueTuple, reason: Reason<'_>) -> Result<bool> {
        typecheck_row(row)?;
        Ok(self.check(row, reason))
    }

    /// Run every configured stage, without short-circuiting.
    pub fn evaluate(&self, row: &ParameterValueTuple) -> Vec<StageOutcome> {
        FilterStage::iter()
            .filter_map(|stage| {
                let mut sink = String::new();
                let passed = self.run_stage(stage, row, Reason::to(&mut sink))?;
                if !passed {
                    debug!(%stage, reason = %sink, "stage rejected row");
                }
                Some(StageOutcome {
                    stage,
                    passed,
                    reason: (!passed).then_some(sink),
                })
            })
            .collect()
    }
}

impl RowFilter for FilterChain<'_> {
    fn check(&self, row: &ParameterValueTuple, reason: Reason<'_>) -> bool {
        FilterChain::check(self, row, reason)
    }

    fn name(&self) -> &str {
        "filter_chain"
    }
}

impl fmt::Debug for FilterChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterChain")
            .field("custom", &self.custom.map(|custom| custom.name().to_string()))
            .field("availability", &self.availability)
            .finish()
    }
}

/// Validate the static shape of a row.
///
/// - compiler parameters carry compiler names
/// - every other parameter carries its own name
/// - ON/OFF backends carry ON or OFF
pub fn typecheck_row(row: &ParameterValueTuple) -> Result<()> {
    for (parameter, value) in row.iter() {
        let invalid = |detail: String| CoverageError::InvalidRow {
            parameter: parameter.to_string(),
            detail,
        };
        match value.name {
            ValueName::Compiler(_) if parameter.is_compiler() => {}
            ValueName::Compiler(compiler) => {
                return Err(invalid(format!("compiler {compiler} on a non-compiler parameter")));
            }
            ValueName::Parameter(name) if parameter.is_compiler() => {
                return Err(invalid(format!("{name} is not a compiler")));
            }
            ValueName::Parameter(name) if name != parameter => {
                return Err(invalid(format!("value is named {name}")));
            }
            ValueName::Parameter(_) => {}
        }
        if parameter.is_on_off_backend()
            && !(value.version.is_off() || value.version == Version::on())
        {
            return Err(invalid(format!(
                "version {} is neither ON nor OFF",
                value.version
            )));
        }
    }
    Ok(())
}

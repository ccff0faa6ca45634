//! Result types of validation and calculation runs.

use df_core::Event;
use df_core::units::Time;
use df_locations::LocationOutput;

/// Location outputs of a batch, in input order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchOutput {
    pub locations: Vec<LocationOutput>,
}

impl BatchOutput {
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Positions and failure times of the locations that failed.
    pub fn failures(&self) -> impl Iterator<Item = (f64, Time)> + '_ {
        self.locations
            .iter()
            .filter_map(|location| location.time_of_failure().map(|t| (location.x, t)))
    }
}

/// Verdict of a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationOutcome {
    Successful,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationResult {
    pub outcome: ValidationOutcome,
    pub events: Vec<Event>,
}

impl ValidationResult {
    pub fn is_successful(&self) -> bool {
        self.outcome == ValidationOutcome::Successful
    }
}

/// Final state of a calculation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CalculationState {
    Succeeded,
    /// A location could not derive its profile constants.
    FailedValidationInput,
    FailedDuringCalculation,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalculationResult {
    pub state: CalculationState,
    /// Present only when the run succeeded.
    pub output: Option<BatchOutput>,
    pub events: Vec<Event>,
}

impl CalculationResult {
    pub fn is_successful(&self) -> bool {
        self.state == CalculationState::Succeeded
    }
}

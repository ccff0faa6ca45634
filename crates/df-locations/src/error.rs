//! Error types for location calculations.

use df_core::error::DfError;
use df_profile::CharacteristicPointType;
use thiserror::Error;

/// Faults raised while deriving or calculating a location.
///
/// These are runtime faults, not validation issues: a validated input is
/// not expected to produce any of them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocationError {
    #[error("Derived data of the location at x = {x} is read before initialization")]
    NotInitialized { x: f64 },

    #[error("Non-finite value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Location at x = {x} lies outside the profile: {what}")]
    OutsideProfile { what: &'static str, x: f64 },

    #[error("Missing characteristic point {kind}")]
    MissingCharacteristicPoint { kind: CharacteristicPointType },
}

pub type LocationResult<T> = Result<T, LocationError>;

impl From<LocationError> for DfError {
    fn from(e: LocationError) -> Self {
        match e {
            LocationError::NotInitialized { .. } => DfError::Invariant {
                what: "location derived data read before initialization",
            },
            LocationError::NonFinite { what, value } => DfError::NonFinite { what, value },
            LocationError::OutsideProfile { what, .. } => DfError::InvalidArg { what },
            LocationError::MissingCharacteristicPoint { .. } => DfError::InvalidArg {
                what: "missing characteristic point",
            },
        }
    }
}

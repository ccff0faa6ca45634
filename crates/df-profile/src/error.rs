//! Profile-specific error types.

use df_core::DfError;

use crate::profile::CharacteristicPointType;

/// Profile construction errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileError {
    /// The builder received no segments.
    NoSegments,

    /// A segment does not run strictly landward (`end.x <= start.x`).
    NonIncreasingSegment { index: usize },

    /// A segment does not start where the previous one ends.
    DisconnectedSegments { index: usize },

    /// A characteristic point does not coincide with a point of the chain.
    PointNotOnProfile { kind: CharacteristicPointType, x: f64 },

    /// The same characteristic point role was bound twice.
    DuplicateCharacteristicPoint { kind: CharacteristicPointType },

    /// A required characteristic point is missing.
    MissingCharacteristicPoint { kind: CharacteristicPointType },

    /// Two characteristic points are in the wrong seaward/landward order.
    CharacteristicPointOrder {
        seaward: CharacteristicPointType,
        landward: CharacteristicPointType,
    },

    /// Only one of the two outer berm points was given.
    IncompleteBerm,

    /// A coordinate or roughness is NaN or infinite.
    NonFinite { what: &'static str },
}

impl std::fmt::Display for ProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileError::NoSegments => write!(f, "Profile has no segments"),
            ProfileError::NonIncreasingSegment { index } => {
                write!(f, "Segment {} does not increase in x", index)
            }
            ProfileError::DisconnectedSegments { index } => {
                write!(
                    f,
                    "Segment {} does not start at the end of segment {}",
                    index,
                    index.saturating_sub(1)
                )
            }
            ProfileError::PointNotOnProfile { kind, x } => {
                write!(f, "Characteristic point {} at x = {} is not a profile point", kind, x)
            }
            ProfileError::DuplicateCharacteristicPoint { kind } => {
                write!(f, "Characteristic point {} is defined more than once", kind)
            }
            ProfileError::MissingCharacteristicPoint { kind } => {
                write!(f, "Characteristic point {} is required", kind)
            }
            ProfileError::CharacteristicPointOrder { seaward, landward } => {
                write!(f, "Characteristic point {} must lie seaward of {}", seaward, landward)
            }
            ProfileError::IncompleteBerm => write!(
                f,
                "CrestOuterBerm and NotchOuterBerm must be defined together"
            ),
            ProfileError::NonFinite { what } => write!(f, "Non-finite {}", what),
        }
    }
}

impl std::error::Error for ProfileError {}

impl From<ProfileError> for DfError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::NonFinite { what } => DfError::InvalidArg { what },
            _ => DfError::Invariant {
                what: "profile geometry is inconsistent",
            },
        }
    }
}

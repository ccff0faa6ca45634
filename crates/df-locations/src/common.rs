//! Checks and lookups shared by every mechanism.

use df_core::numeric::ensure_finite;
use df_core::validation::ValidationIssue;
use df_profile::{CharacteristicPointType, Profile, ProfilePoint};

use crate::error::{LocationError, LocationResult};

/// Ensure a computed value is finite.
pub fn check_finite(value: f64, what: &'static str) -> LocationResult<f64> {
    ensure_finite(value, what).map_err(|_| LocationError::NonFinite { what, value })
}

pub fn validate_initial_damage(initial_damage: f64) -> Option<ValidationIssue> {
    if initial_damage < 0.0 {
        Some(ValidationIssue::error(
            "InitialDamage must be equal to 0 or larger.",
        ))
    } else if initial_damage >= 1.0 {
        Some(ValidationIssue::warning("InitialDamage should be smaller than 1."))
    } else {
        None
    }
}

pub fn validate_failure_number(failure_number: f64, initial_damage: f64) -> Option<ValidationIssue> {
    if failure_number < initial_damage {
        Some(ValidationIssue::error(
            "FailureNumber must be equal to InitialDamage or larger.",
        ))
    } else {
        None
    }
}

/// Error unless `0 < value <= 1`.
pub fn validate_reduction_factor(value: f64, name: &str) -> Option<ValidationIssue> {
    if value > 0.0 && value <= 1.0 {
        None
    } else {
        Some(ValidationIssue::error(format!(
            "{name} must be in range (0, 1]."
        )))
    }
}

/// Error when `kind` is not defined on the profile.
pub fn require_point(profile: &Profile, kind: CharacteristicPointType) -> Option<ValidationIssue> {
    match profile.characteristic_point(kind) {
        Some(_) => None,
        None => Some(ValidationIssue::error(format!(
            "Characteristic point {kind} is required."
        ))),
    }
}

/// Error unless `lower.x <= x <= upper.x`; silent when a bound is missing.
pub fn validate_position_between(
    x: f64,
    lower: Option<ProfilePoint>,
    upper: Option<ProfilePoint>,
    description: &str,
) -> Option<ValidationIssue> {
    let (lower, upper) = (lower?, upper?);
    if x >= lower.x && x <= upper.x {
        None
    } else {
        Some(ValidationIssue::error(format!(
            "X must be in range [{}, {}] ({description}).",
            lower.x, upper.x
        )))
    }
}

/// Profile height at `x`, failing instead of returning NaN.
pub fn height_at(profile: &Profile, x: f64) -> LocationResult<f64> {
    let z = profile.height_at(x);
    if z.is_nan() {
        Err(LocationError::OutsideProfile {
            what: "no profile height",
            x,
        })
    } else {
        Ok(z)
    }
}

pub fn characteristic_point(
    profile: &Profile,
    kind: CharacteristicPointType,
) -> LocationResult<ProfilePoint> {
    profile
        .characteristic_point(kind)
        .ok_or(LocationError::MissingCharacteristicPoint { kind })
}

//! Profile validation logic.
//!
//! Two kinds of checks live here: structural checks that make
//! [`ProfileBuilder::build`](crate::ProfileBuilder::build) fail, and physical
//! range checks that only register diagnostics.

use df_core::validation::{ValidationIssue, register_issues};
use df_core::Diagnostics;

use crate::error::ProfileError;
use crate::profile::{CharacteristicPoint, CharacteristicPointType, Profile, ProfilePoint, ProfileSegment};

/// Check that the segments form one contiguous chain ordered by x.
pub(crate) fn validate_segments(segments: &[ProfileSegment]) -> Result<(), ProfileError> {
    if segments.is_empty() {
        return Err(ProfileError::NoSegments);
    }

    for (i, segment) in segments.iter().enumerate() {
        let coordinates = [segment.start.x, segment.start.z, segment.end.x, segment.end.z];
        if coordinates.iter().any(|v| !v.is_finite()) {
            return Err(ProfileError::NonFinite {
                what: "segment coordinate",
            });
        }
        if !segment.roughness_coefficient.is_finite() {
            return Err(ProfileError::NonFinite {
                what: "roughness coefficient",
            });
        }
        if segment.end.x <= segment.start.x {
            return Err(ProfileError::NonIncreasingSegment { index: i });
        }
    }

    for (i, pair) in segments.windows(2).enumerate() {
        if pair[0].end != pair[1].start {
            return Err(ProfileError::DisconnectedSegments { index: i + 1 });
        }
    }

    Ok(())
}

/// Check the characteristic points against the point chain.
pub(crate) fn validate_characteristic_points(
    points: &[ProfilePoint],
    characteristic_points: &[CharacteristicPoint],
) -> Result<(), ProfileError> {
    for (i, cp) in characteristic_points.iter().enumerate() {
        if characteristic_points[..i].iter().any(|other| other.kind == cp.kind) {
            return Err(ProfileError::DuplicateCharacteristicPoint { kind: cp.kind });
        }
        if !points.contains(&cp.point) {
            return Err(ProfileError::PointNotOnProfile {
                kind: cp.kind,
                x: cp.point.x,
            });
        }
    }

    let find = |kind: CharacteristicPointType| {
        characteristic_points
            .iter()
            .find(|cp| cp.kind == kind)
            .map(|cp| cp.point)
    };

    for required in [CharacteristicPointType::OuterToe, CharacteristicPointType::OuterCrest] {
        if find(required).is_none() {
            return Err(ProfileError::MissingCharacteristicPoint { kind: required });
        }
    }

    if find(CharacteristicPointType::CrestOuterBerm).is_some()
        != find(CharacteristicPointType::NotchOuterBerm).is_some()
    {
        return Err(ProfileError::IncompleteBerm);
    }

    // Every defined point must lie seaward of the next defined one.
    let order = [
        CharacteristicPointType::OuterToe,
        CharacteristicPointType::CrestOuterBerm,
        CharacteristicPointType::NotchOuterBerm,
        CharacteristicPointType::OuterCrest,
        CharacteristicPointType::InnerCrest,
        CharacteristicPointType::InnerToe,
    ];
    let defined: Vec<(CharacteristicPointType, ProfilePoint)> = order
        .iter()
        .filter_map(|&kind| find(kind).map(|point| (kind, point)))
        .collect();
    for pair in defined.windows(2) {
        let ((seaward, a), (landward, b)) = (pair[0], pair[1]);
        if a.x >= b.x {
            return Err(ProfileError::CharacteristicPointOrder { seaward, landward });
        }
    }

    Ok(())
}

pub fn validate_dike_orientation(dike_orientation: f64) -> Option<ValidationIssue> {
    if (0.0..=360.0).contains(&dike_orientation) {
        None
    } else {
        Some(ValidationIssue::error(
            "DikeOrientation must be in range [0, 360].",
        ))
    }
}

pub fn validate_roughness_coefficient(roughness_coefficient: f64) -> Option<ValidationIssue> {
    if (0.5..=1.0).contains(&roughness_coefficient) {
        None
    } else {
        Some(ValidationIssue::error(
            "RoughnessCoefficient must be in range [0.5, 1].",
        ))
    }
}

pub(crate) fn validate_profile(profile: &Profile, diagnostics: &Diagnostics) -> bool {
    let orientation = std::iter::once(validate_dike_orientation(profile.dike_orientation));
    let roughness = profile
        .segments
        .iter()
        .map(|s| validate_roughness_coefficient(s.roughness_coefficient));
    register_issues(diagnostics, orientation.chain(roughness))
}

//! Incremental profile builder.

use crate::error::ProfileError;
use crate::profile::{
    CharacteristicPoint, CharacteristicPointType, Foreshore, Profile, ProfilePoint, ProfileSegment,
};
use crate::validate;

/// Builder for constructing a profile incrementally.
///
/// Add segments from sea to land, bind characteristic points to points of the
/// chain, then call `build()` to validate and freeze it into an immutable
/// `Profile`.
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    dike_orientation: f64,
    segments: Vec<ProfileSegment>,
    characteristic_points: Vec<CharacteristicPoint>,
    foreshore: Foreshore,
}

impl ProfileBuilder {
    /// Create a new empty builder for a dike facing `dike_orientation` degrees.
    pub fn new(dike_orientation: f64) -> Self {
        Self {
            dike_orientation,
            segments: Vec::new(),
            characteristic_points: Vec::new(),
            foreshore: Foreshore::default(),
        }
    }

    /// Append a segment at the landward end of the chain.
    pub fn segment(mut self, start: ProfilePoint, end: ProfilePoint, roughness: f64) -> Self {
        self.segments.push(ProfileSegment::new(start, end, roughness));
        self
    }

    /// Append a chain of segments through `points`, all with the same roughness.
    pub fn polyline(mut self, points: &[ProfilePoint], roughness: f64) -> Self {
        for pair in points.windows(2) {
            self.segments
                .push(ProfileSegment::new(pair[0], pair[1], roughness));
        }
        self
    }

    pub fn characteristic_point(mut self, kind: CharacteristicPointType, point: ProfilePoint) -> Self {
        self.characteristic_points.push(CharacteristicPoint { kind, point });
        self
    }

    pub fn foreshore(mut self, slope: f64, bottom_z: f64) -> Self {
        self.foreshore = Foreshore { slope, bottom_z };
        self
    }

    /// Validate the geometry and return an immutable `Profile`.
    pub fn build(self) -> Result<Profile, ProfileError> {
        validate::validate_segments(&self.segments)?;

        let points = Self::build_chain(&self.segments);
        validate::validate_characteristic_points(&points, &self.characteristic_points)?;

        let find = |kind: CharacteristicPointType| {
            self.characteristic_points
                .iter()
                .find(|cp| cp.kind == kind)
                .map(|cp| cp.point)
                .ok_or(ProfileError::MissingCharacteristicPoint { kind })
        };
        let outer_toe = find(CharacteristicPointType::OuterToe)?;
        let outer_crest = find(CharacteristicPointType::OuterCrest)?;

        Ok(Profile {
            dike_orientation: self.dike_orientation,
            segments: self.segments,
            points,
            characteristic_points: self.characteristic_points,
            outer_toe,
            outer_crest,
            foreshore: self.foreshore,
        })
    }

    /// Flatten contiguous segments into their boundary points.
    fn build_chain(segments: &[ProfileSegment]) -> Vec<ProfilePoint> {
        let mut points = Vec::with_capacity(segments.len() + 1);
        if let Some(first) = segments.first() {
            points.push(first.start);
        }
        points.extend(segments.iter().map(|s| s.end));
        points
    }
}

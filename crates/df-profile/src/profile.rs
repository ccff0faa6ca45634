//! Core profile data structures and geometric queries.

use df_core::numeric::interpolate;
use df_core::Diagnostics;

/// A point of the dike cross-section.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfilePoint {
    pub x: f64,
    pub z: f64,
}

impl ProfilePoint {
    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }
}

/// A straight piece of the profile between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfileSegment {
    pub start: ProfilePoint,
    pub end: ProfilePoint,
    /// Roughness coefficient of the top layer (dimensionless, 0.5-1).
    pub roughness_coefficient: f64,
}

impl ProfileSegment {
    pub fn new(start: ProfilePoint, end: ProfilePoint, roughness_coefficient: f64) -> Self {
        Self {
            start,
            end,
            roughness_coefficient,
        }
    }

    /// Rise over run.
    pub fn slope(&self) -> f64 {
        (self.end.z - self.start.z) / (self.end.x - self.start.x)
    }

    /// Length measured along the segment.
    pub fn length(&self) -> f64 {
        (self.end.x - self.start.x).hypot(self.end.z - self.start.z)
    }
}

/// Named role of a geometrically significant profile point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharacteristicPointType {
    OuterToe,
    CrestOuterBerm,
    NotchOuterBerm,
    OuterCrest,
    InnerCrest,
    InnerToe,
}

impl std::fmt::Display for CharacteristicPointType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CharacteristicPointType::OuterToe => "OuterToe",
            CharacteristicPointType::CrestOuterBerm => "CrestOuterBerm",
            CharacteristicPointType::NotchOuterBerm => "NotchOuterBerm",
            CharacteristicPointType::OuterCrest => "OuterCrest",
            CharacteristicPointType::InnerCrest => "InnerCrest",
            CharacteristicPointType::InnerToe => "InnerToe",
        };
        f.write_str(name)
    }
}

/// A characteristic point role bound to a point of the chain.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacteristicPoint {
    pub kind: CharacteristicPointType,
    pub point: ProfilePoint,
}

/// Foreshore in front of the outer toe.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Foreshore {
    pub slope: f64,
    pub bottom_z: f64,
}

impl Default for Foreshore {
    fn default() -> Self {
        Self {
            slope: 0.004,
            bottom_z: -4.0,
        }
    }
}

/// Outer berm, present when both berm characteristic points are defined.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OuterBerm {
    pub crest: ProfilePoint,
    pub notch: ProfilePoint,
}

/// A validated, immutable dike cross-section.
///
/// Created through [`ProfileBuilder`](crate::ProfileBuilder), which guarantees
/// contiguous segments ordered by x and characteristic points on the chain.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Profile {
    pub(crate) dike_orientation: f64,
    pub(crate) segments: Vec<ProfileSegment>,
    pub(crate) points: Vec<ProfilePoint>,
    pub(crate) characteristic_points: Vec<CharacteristicPoint>,
    pub(crate) outer_toe: ProfilePoint,
    pub(crate) outer_crest: ProfilePoint,
    pub(crate) foreshore: Foreshore,
}

impl Profile {
    /// Dike normal in degrees (nautical convention).
    pub fn dike_orientation(&self) -> f64 {
        self.dike_orientation
    }

    pub fn segments(&self) -> &[ProfileSegment] {
        &self.segments
    }

    /// Point chain built from the segment boundaries.
    pub fn points(&self) -> &[ProfilePoint] {
        &self.points
    }

    pub fn characteristic_points(&self) -> &[CharacteristicPoint] {
        &self.characteristic_points
    }

    pub fn foreshore(&self) -> Foreshore {
        self.foreshore
    }

    pub fn characteristic_point(&self, kind: CharacteristicPointType) -> Option<ProfilePoint> {
        self.characteristic_points
            .iter()
            .find(|cp| cp.kind == kind)
            .map(|cp| cp.point)
    }

    pub fn outer_toe(&self) -> ProfilePoint {
        self.outer_toe
    }

    pub fn outer_crest(&self) -> ProfilePoint {
        self.outer_crest
    }

    pub fn outer_berm(&self) -> Option<OuterBerm> {
        let crest = self.characteristic_point(CharacteristicPointType::CrestOuterBerm)?;
        let notch = self.characteristic_point(CharacteristicPointType::NotchOuterBerm)?;
        Some(OuterBerm { crest, notch })
    }

    /// Height of the profile at `x`; NaN outside the chain.
    pub fn height_at(&self, x: f64) -> f64 {
        for pair in self.points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if x == a.x {
                return a.z;
            }
            if x == b.x {
                return b.z;
            }
            if x > a.x && x < b.x {
                return interpolate(a.x, a.z, b.x, b.z, x);
            }
        }
        f64::NAN
    }

    /// First (most seaward) horizontal position at height `z`; NaN if the
    /// chain never reaches `z`.
    pub fn position_at(&self, z: f64) -> f64 {
        for pair in self.points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if z == a.z {
                return a.x;
            }
            if (z > a.z && z < b.z) || (z < a.z && z > b.z) {
                return interpolate(a.z, a.x, b.z, b.x, z);
            }
            if z == b.z {
                return b.x;
            }
        }
        f64::NAN
    }

    /// Segment with `start.x < x <= end.x`.
    ///
    /// The start of the first segment belongs to no segment.
    pub fn segment_containing(&self, x: f64) -> Option<&ProfileSegment> {
        self.segments
            .iter()
            .find(|segment| x > segment.start.x && x <= segment.end.x)
    }

    /// Average slope between outer toe and outer crest.
    pub fn outer_slope(&self) -> f64 {
        (self.outer_crest.z - self.outer_toe.z) / (self.outer_crest.x - self.outer_toe.x)
    }

    /// Length-weighted roughness coefficient of the outer slope.
    pub fn outer_roughness(&self) -> f64 {
        let (weighted, total) = self
            .segments
            .iter()
            .filter(|s| s.start.x >= self.outer_toe.x && s.end.x <= self.outer_crest.x)
            .fold((0.0, 0.0), |(weighted, total), s| {
                let length = s.length();
                (weighted + s.roughness_coefficient * length, total + length)
            });
        if total > 0.0 { weighted / total } else { 1.0 }
    }

    /// Highest profile level between `x_from` and `x_to` (inclusive).
    pub fn highest_level_between(&self, x_from: f64, x_to: f64) -> f64 {
        self.points
            .iter()
            .filter(|p| p.x >= x_from && p.x <= x_to)
            .map(|p| p.z)
            .fold(self.height_at(x_from).max(self.height_at(x_to)), f64::max)
    }

    /// Register the physical range checks of the profile.
    ///
    /// Returns `false` iff an Error was registered.
    pub fn validate(&self, diagnostics: &Diagnostics) -> bool {
        crate::validate::validate_profile(self, diagnostics)
    }
}

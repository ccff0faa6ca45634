// df-core/src/units.rs

use uom::si::f64::Time as UomTime;

// Public canonical unit types (SI, f64)
pub type Time = UomTime;

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn hours(v: f64) -> Time {
    use uom::si::time::hour;
    Time::new::<hour>(v)
}

/// Time expressed in seconds, the unit every formula works in.
#[inline]
pub fn seconds(t: Time) -> f64 {
    use uom::si::time::second;
    t.get::<second>()
}

pub mod constants {
    /// Gravitational acceleration used by the revetment formulas (m/s^2).
    pub const GRAVITATIONAL_ACCELERATION: f64 = 9.81;

    /// Density of sea water (kg/m^3).
    pub const DENSITY_OF_WATER: f64 = 1025.0;

    /// Exceedance probability of the representative 2% wave run-up.
    pub const RUNUP_EXCEEDANCE_PROBABILITY: f64 = 0.02;
}

//! Hydraulic load relations shared by every mechanism.

use std::f64::consts::PI;

use df_core::numeric::in_closed_range;

/// Angle of wave incidence relative to the dike normal, in degrees.
///
/// The result lies in `(-180, 180]`.
pub fn wave_angle(wave_direction: f64, dike_orientation: f64) -> f64 {
    let angle = wave_direction - dike_orientation;
    if angle > 180.0 {
        angle - 360.0
    } else if angle <= -180.0 {
        angle + 360.0
    } else {
        angle
    }
}

/// Number of waves arriving during a time step of `duration` seconds.
pub fn average_number_of_waves(duration: f64, wave_period_tm10: f64, ctm: f64) -> f64 {
    duration / (ctm * wave_period_tm10)
}

/// Wave steepness `Hm0 / L0` with deep water wave length `L0 = g T^2 / 2pi`.
pub fn wave_steepness_deep_water(
    wave_height_hm0: f64,
    wave_period_tm10: f64,
    gravitational_acceleration: f64,
) -> f64 {
    wave_height_hm0 / (gravitational_acceleration * wave_period_tm10.powi(2) / (2.0 * PI))
}

/// Surf similarity (Iribarren) parameter.
pub fn surf_similarity_parameter(
    outer_slope: f64,
    wave_height_hm0: f64,
    wave_period_tm10: f64,
    gravitational_acceleration: f64,
) -> f64 {
    let steepness =
        wave_steepness_deep_water(wave_height_hm0, wave_period_tm10, gravitational_acceleration);
    outer_slope / steepness.sqrt()
}

/// Slope angle in degrees for a rise-over-run slope.
pub fn slope_angle(outer_slope: f64) -> f64 {
    outer_slope.atan().to_degrees()
}

/// Vertical distance from the water level up to `elevation`.
pub fn vertical_distance_water_level_elevation(elevation: f64, water_level: f64) -> f64 {
    elevation - water_level
}

/// Loading test for revetments loaded within a band around the water level.
pub fn loading_revetment(lower_limit: f64, upper_limit: f64, z: f64) -> bool {
    in_closed_range(z, lower_limit, upper_limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use df_core::constants::GRAVITATIONAL_ACCELERATION as G;
    use df_core::numeric::{Tolerances, nearly_equal};
    use proptest::prelude::*;

    #[test]
    fn wave_angle_reference_values() {
        assert_eq!(wave_angle(270.0, 45.0), -135.0);
        assert_eq!(wave_angle(45.0, 270.0), 135.0);
        assert_eq!(wave_angle(360.0, 360.0), 0.0);
        assert_eq!(wave_angle(0.0, 180.0), 180.0);
        assert_eq!(wave_angle(180.0, 0.0), 180.0);
    }

    #[test]
    fn waves_in_one_hour() {
        let n = average_number_of_waves(3600.0, 5.0, 0.92);
        assert!(nearly_equal(n, 782.6086956521739, Tolerances::relative(1e-12)));
    }

    #[test]
    fn surf_similarity_matches_steepness() {
        let xi = surf_similarity_parameter(0.25, 1.5, 5.0, G);
        let s = wave_steepness_deep_water(1.5, 5.0, G);
        assert!(nearly_equal(xi, 0.25 / s.sqrt(), Tolerances::default()));
        assert!(nearly_equal(xi, 1.2752899963225248, Tolerances::relative(1e-12)));
    }

    #[test]
    fn slope_angle_degrees() {
        assert!(nearly_equal(slope_angle(1.0), 45.0, Tolerances::default()));
        assert_eq!(slope_angle(0.0), 0.0);
    }

    #[test]
    fn loading_band_is_inclusive() {
        assert!(loading_revetment(1.0, 2.0, 1.0));
        assert!(loading_revetment(1.0, 2.0, 2.0));
        assert!(!loading_revetment(1.0, 2.0, 2.0001));
    }

    proptest! {
        #[test]
        fn wave_angle_stays_in_half_open_range(direction in 0.0_f64..=360.0, orientation in 0.0_f64..=360.0) {
            let angle = wave_angle(direction, orientation);
            prop_assert!(angle > -180.0 && angle <= 180.0);
            let turns = (direction - orientation - angle) / 360.0;
            prop_assert!((turns - turns.round()).abs() < 1e-9);
        }
    }
}

//! Grass cover erosion by run-up and overtopping waves.
//!
//! The wave run-up population is Rayleigh distributed, anchored on the 2%
//! exceedance run-up `R2%`. The cumulative overload sums, over every wave of
//! a time step, the excess of the squared front velocity above its critical
//! value:
//!
//! ```text
//! D = N * E[ max(0, alpha_m * U^2 - alpha_s * Uc^2) ]
//! U = c * alpha_a * sqrt(g * max(0, R - dz))
//! ```
//!
//! Two evaluations are provided. The discrete one replaces the population by
//! a fixed number of representative waves. The analytical one integrates the
//! Rayleigh tail in closed form. They agree as the number of discrete waves
//! grows.

use std::f64::consts::PI;

use df_core::constants::RUNUP_EXCEEDANCE_PROBABILITY;

/// Inputs of one cumulative overload evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CumulativeOverloadInput {
    pub average_number_of_waves: f64,
    pub representative_wave_runup_2p: f64,
    /// Height of the evaluated point above the water level.
    pub vertical_distance_water_level_elevation: f64,
    pub critical_front_velocity: f64,
    pub increased_load_transition_alpha_m: f64,
    pub reduced_strength_transition_alpha_s: f64,
    pub gravitational_acceleration: f64,
    pub acceleration_alpha_a: f64,
    /// Front velocity coefficient (`c_wo` for overtopping, `c_u` for run-up).
    pub front_velocity_coefficient: f64,
}

impl CumulativeOverloadInput {
    fn excess(&self, wave_runup: f64) -> f64 {
        let u = front_velocity(
            self.front_velocity_coefficient,
            self.acceleration_alpha_a,
            self.gravitational_acceleration,
            wave_runup,
            self.vertical_distance_water_level_elevation,
        );
        let excess = self.increased_load_transition_alpha_m * u.powi(2)
            - self.reduced_strength_transition_alpha_s * self.critical_front_velocity.powi(2);
        excess.max(0.0)
    }
}

/// Front velocity of a wave with run-up `wave_runup` at `dz` above the water.
pub fn front_velocity(
    front_velocity_coefficient: f64,
    acceleration_alpha_a: f64,
    gravitational_acceleration: f64,
    wave_runup: f64,
    vertical_distance_water_level_elevation: f64,
) -> f64 {
    let head = (wave_runup - vertical_distance_water_level_elevation).max(0.0);
    front_velocity_coefficient * acceleration_alpha_a * (gravitational_acceleration * head).sqrt()
}

/// Run-up of the `k`-th of `fixed_number_of_waves` representative waves.
pub fn discrete_wave_runup(
    representative_wave_runup_2p: f64,
    k: usize,
    fixed_number_of_waves: usize,
) -> f64 {
    let exceedance = 1.0 - k as f64 / (fixed_number_of_waves as f64 + 1.0);
    representative_wave_runup_2p
        * (exceedance.ln() / RUNUP_EXCEEDANCE_PROBABILITY.ln()).sqrt()
}

/// Cumulative overload over `fixed_number_of_waves` representative waves.
pub fn cumulative_overload_discrete(
    input: &CumulativeOverloadInput,
    fixed_number_of_waves: usize,
) -> f64 {
    if fixed_number_of_waves == 0 {
        return 0.0;
    }
    let sum: f64 = (1..=fixed_number_of_waves)
        .map(|k| {
            input.excess(discrete_wave_runup(
                input.representative_wave_runup_2p,
                k,
                fixed_number_of_waves,
            ))
        })
        .sum();
    input.average_number_of_waves / fixed_number_of_waves as f64 * sum
}

/// Cumulative overload from the closed-form Rayleigh tail integral.
///
/// ```text
/// K     = alpha_m * c^2 * alpha_a^2 * g
/// sigma = R2% / sqrt(ln(1 / 0.02))
/// r0    = dz + alpha_s * Uc^2 / K
/// D     = N * K * sigma * sqrt(pi) / 2 * erfc(r0 / sigma)
/// ```
pub fn cumulative_overload_analytical(input: &CumulativeOverloadInput) -> f64 {
    let k = input.increased_load_transition_alpha_m
        * input.front_velocity_coefficient.powi(2)
        * input.acceleration_alpha_a.powi(2)
        * input.gravitational_acceleration;
    let runup = input.representative_wave_runup_2p;
    if k <= 0.0 || runup <= 0.0 {
        return 0.0;
    }

    let sigma = runup / (1.0 / RUNUP_EXCEEDANCE_PROBABILITY).ln().sqrt();
    let threshold = input.vertical_distance_water_level_elevation
        + input.reduced_strength_transition_alpha_s * input.critical_front_velocity.powi(2) / k;

    input.average_number_of_waves * k * sigma * PI.sqrt() / 2.0 * libm::erfc(threshold / sigma)
}

/// Damage increment of one step.
pub fn increment_damage(cumulative_overload: f64, critical_cumulative_overload: f64) -> f64 {
    cumulative_overload / critical_cumulative_overload
}

/// Reduction of the run-up for oblique waves.
pub fn wave_angle_reduction(wave_angle: f64) -> f64 {
    1.0 - 0.0022 * wave_angle.abs().min(80.0)
}

/// 2% exceedance wave run-up on a smooth or rough slope.
///
/// `gamma_b` is the berm influence factor and `gamma_f` the roughness of the
/// slope.
pub fn representative_wave_runup(
    wave_height_hm0: f64,
    surf_similarity_parameter: f64,
    wave_angle: f64,
    gamma_b: f64,
    gamma_f: f64,
) -> f64 {
    let breaker = gamma_b * surf_similarity_parameter;
    let relative = (1.65 * breaker).min(4.0 - 1.5 / breaker.sqrt());
    wave_height_hm0 * gamma_f * wave_angle_reduction(wave_angle) * relative.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use df_core::constants::GRAVITATIONAL_ACCELERATION as G;
    use df_core::numeric::{Tolerances, nearly_equal};
    use proptest::prelude::*;

    fn overtopping_vector() -> CumulativeOverloadInput {
        CumulativeOverloadInput {
            average_number_of_waves: 832.56,
            representative_wave_runup_2p: 2.602,
            vertical_distance_water_level_elevation: 2.2,
            critical_front_velocity: 6.6,
            increased_load_transition_alpha_m: 1.0,
            reduced_strength_transition_alpha_s: 1.0,
            gravitational_acceleration: G,
            acceleration_alpha_a: 1.4,
            front_velocity_coefficient: 1.45,
        }
    }

    #[test]
    fn discrete_overload_reference_vector() {
        let overload = cumulative_overload_discrete(&overtopping_vector(), 10000);
        assert!(nearly_equal(overload, 14.88390482811014, Tolerances::relative(1e-12)));
    }

    #[test]
    fn analytical_overload_reference_vector() {
        // Far in the Rayleigh tail, where ten thousand discrete waves undersample
        let overload = cumulative_overload_analytical(&overtopping_vector());
        assert!(nearly_equal(overload, 16.72203513268044, Tolerances::relative(1e-10)));
    }

    #[test]
    fn no_overload_below_critical_velocity() {
        let mut input = overtopping_vector();
        input.critical_front_velocity = 100.0;
        assert_eq!(cumulative_overload_discrete(&input, 10000), 0.0);
    }

    #[test]
    fn no_overload_without_waves() {
        let mut input = overtopping_vector();
        input.representative_wave_runup_2p = 0.0;
        assert_eq!(cumulative_overload_analytical(&input), 0.0);
        assert_eq!(cumulative_overload_discrete(&input, 10000), 0.0);
        assert_eq!(cumulative_overload_discrete(&overtopping_vector(), 0), 0.0);
    }

    #[test]
    fn front_velocity_is_zero_below_water_distance() {
        assert_eq!(front_velocity(1.45, 1.0, G, 1.0, 2.0), 0.0);
        assert!(nearly_equal(
            front_velocity(1.0, 1.0, G, 2.0, 1.0),
            G.sqrt(),
            Tolerances::default()
        ));
    }

    #[test]
    fn two_percent_wave_equals_representative_runup() {
        // k / (F + 1) = 0.98 gives exceedance 0.02
        let r = discrete_wave_runup(2.5, 98, 99);
        assert!(nearly_equal(r, 2.5, Tolerances::relative(1e-12)));
    }

    #[test]
    fn runup_branches() {
        // Breaking waves: 1.65 * xi governs
        let r = representative_wave_runup(2.0, 1.0, 0.0, 1.0, 1.0);
        assert!(nearly_equal(r, 3.3, Tolerances::relative(1e-12)));
        // Non-breaking waves: capped by 4 - 1.5 / sqrt(xi)
        let r = representative_wave_runup(2.0, 4.0, 0.0, 1.0, 1.0);
        assert!(nearly_equal(r, 2.0 * 3.25, Tolerances::relative(1e-12)));
        // Oblique waves beyond 80 degrees are reduced like 80 degrees
        let r90 = representative_wave_runup(2.0, 1.0, 90.0, 1.0, 1.0);
        let r80 = representative_wave_runup(2.0, 1.0, -80.0, 1.0, 1.0);
        assert_eq!(r90, r80);
        assert!(nearly_equal(r80, 3.3 * (1.0 - 0.176), Tolerances::relative(1e-12)));
    }

    #[test]
    fn increment_is_overload_over_critical() {
        assert_eq!(increment_damage(7000.0, 7000.0), 1.0);
        assert_eq!(increment_damage(0.0, 7000.0), 0.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn discrete_overload_converges_to_analytical(
            runup in 2.0_f64..4.0,
            dz in 0.0_f64..0.8,
            critical_velocity in 0.0_f64..2.0,
            alpha_a in 1.0_f64..1.4,
            waves in 100.0_f64..2000.0,
        ) {
            let input = CumulativeOverloadInput {
                average_number_of_waves: waves,
                representative_wave_runup_2p: runup,
                vertical_distance_water_level_elevation: dz,
                critical_front_velocity: critical_velocity,
                increased_load_transition_alpha_m: 1.0,
                reduced_strength_transition_alpha_s: 1.0,
                gravitational_acceleration: G,
                acceleration_alpha_a: alpha_a,
                front_velocity_coefficient: 1.45,
            };
            let discrete = cumulative_overload_discrete(&input, 10000);
            let analytical = cumulative_overload_analytical(&input);
            prop_assert!(analytical > 0.0);
            prop_assert!(
                nearly_equal(discrete, analytical, Tolerances::relative(5e-3)),
                "discrete {discrete} analytical {analytical}"
            );
        }
    }
}

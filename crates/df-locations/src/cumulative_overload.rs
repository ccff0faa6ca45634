//! Cumulative overload machinery shared by the grass run-up and overtopping
//! mechanisms.
//!
//! Both mechanisms follow the same step: a reference elevation above the
//! water level, a loading gate, a representative run-up and a Rayleigh
//! overload integral. What differs is collected in a [`CumulativeOverloadHooks`]
//! table per mechanism.

use df_core::constants::GRAVITATIONAL_ACCELERATION;
use df_core::validation::{larger_than_zero, zero_or_larger};
use df_core::{TimeStep, ValidationIssue, seconds};
use df_functions::{CumulativeOverloadInput, grass, hydraulic_load};
use df_profile::Profile;

use crate::common::check_finite;
use crate::error::LocationResult;
use crate::output::{StepDetails, StepLoad};

/// How the Rayleigh distributed run-up population is integrated.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RayleighMethod {
    /// Sum over a fixed number of representative waves.
    Discrete { fixed_number_of_waves: usize },
    /// Closed-form tail integral.
    Analytical,
}

impl Default for RayleighMethod {
    fn default() -> Self {
        RayleighMethod::Discrete {
            fixed_number_of_waves: 10_000,
        }
    }
}

impl RayleighMethod {
    pub fn cumulative_overload(self, input: &CumulativeOverloadInput) -> f64 {
        match self {
            RayleighMethod::Discrete {
                fixed_number_of_waves,
            } => grass::cumulative_overload_discrete(input, fixed_number_of_waves),
            RayleighMethod::Analytical => grass::cumulative_overload_analytical(input),
        }
    }
}

/// Parameters common to both grass cumulative overload mechanisms.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrassCumulativeOverloadParameters {
    pub critical_cumulative_overload: f64,
    pub critical_front_velocity: f64,
    pub increased_load_transition_alpha_m: f64,
    pub reduced_strength_transition_alpha_s: f64,
    pub average_number_of_waves_ctm: f64,
    pub rayleigh: RayleighMethod,
}

impl Default for GrassCumulativeOverloadParameters {
    fn default() -> Self {
        Self {
            critical_cumulative_overload: 7000.0,
            critical_front_velocity: 6.6,
            increased_load_transition_alpha_m: 1.0,
            reduced_strength_transition_alpha_s: 1.0,
            average_number_of_waves_ctm: 0.92,
            rayleigh: RayleighMethod::default(),
        }
    }
}

impl GrassCumulativeOverloadParameters {
    pub fn issues(&self) -> Vec<Option<ValidationIssue>> {
        let fixed_number_of_waves = match self.rayleigh {
            RayleighMethod::Discrete {
                fixed_number_of_waves: 0,
            } => Some(ValidationIssue::error(
                "FixedNumberOfWaves must be larger than 0.",
            )),
            _ => None,
        };
        vec![
            larger_than_zero(
                self.critical_cumulative_overload,
                "CriticalCumulativeOverload",
            ),
            zero_or_larger(self.critical_front_velocity, "CriticalFrontVelocity"),
            zero_or_larger(
                self.increased_load_transition_alpha_m,
                "IncreasedLoadTransitionAlphaM",
            ),
            zero_or_larger(
                self.reduced_strength_transition_alpha_s,
                "ReducedStrengthTransitionAlphaS",
            ),
            larger_than_zero(self.average_number_of_waves_ctm, "AverageNumberOfWavesCtm"),
            fixed_number_of_waves,
        ]
    }
}

/// The points where the two grass mechanisms differ.
pub struct CumulativeOverloadHooks<D> {
    /// Elevation whose height above the water level drives the overload.
    pub reference_elevation: fn(&D) -> f64,
    /// Loading gate on the vertical distance to the water level.
    pub loading: fn(f64) -> bool,
    /// 2% run-up for the step; receives the wave angle in degrees.
    pub representative_wave_runup: fn(&D, &TimeStep, f64) -> f64,
    pub acceleration_alpha_a: fn(&D) -> f64,
    pub front_velocity_coefficient: fn(&D) -> f64,
}

/// Gate shared by both mechanisms: loaded while the elevation is not submerged.
pub fn not_submerged(vertical_distance: f64) -> bool {
    vertical_distance >= 0.0
}

/// One step of a grass cumulative overload mechanism.
pub fn step_load<D>(
    hooks: &CumulativeOverloadHooks<D>,
    parameters: &GrassCumulativeOverloadParameters,
    derived: &D,
    time_step: &TimeStep,
    profile: &Profile,
) -> LocationResult<StepLoad> {
    let vertical_distance = hydraulic_load::vertical_distance_water_level_elevation(
        (hooks.reference_elevation)(derived),
        time_step.water_level(),
    );

    if !(hooks.loading)(vertical_distance) {
        return Ok(StepLoad::unloaded(StepDetails::GrassCumulativeOverload {
            vertical_distance_water_level_elevation: vertical_distance,
            loading_revetment: false,
            average_number_of_waves: None,
            representative_wave_runup_2p: None,
            cumulative_overload: None,
        }));
    }

    let average_number_of_waves = hydraulic_load::average_number_of_waves(
        seconds(time_step.duration()),
        time_step.wave_period_tm10(),
        parameters.average_number_of_waves_ctm,
    );
    let wave_angle =
        hydraulic_load::wave_angle(time_step.wave_direction(), profile.dike_orientation());
    let runup = check_finite(
        (hooks.representative_wave_runup)(derived, time_step, wave_angle),
        "representative wave run-up",
    )?;

    let input = CumulativeOverloadInput {
        average_number_of_waves,
        representative_wave_runup_2p: runup,
        vertical_distance_water_level_elevation: vertical_distance,
        critical_front_velocity: parameters.critical_front_velocity,
        increased_load_transition_alpha_m: parameters.increased_load_transition_alpha_m,
        reduced_strength_transition_alpha_s: parameters.reduced_strength_transition_alpha_s,
        gravitational_acceleration: GRAVITATIONAL_ACCELERATION,
        acceleration_alpha_a: (hooks.acceleration_alpha_a)(derived),
        front_velocity_coefficient: (hooks.front_velocity_coefficient)(derived),
    };
    let cumulative_overload = parameters.rayleigh.cumulative_overload(&input);
    let increment_damage =
        grass::increment_damage(cumulative_overload, parameters.critical_cumulative_overload);

    Ok(StepLoad {
        increment_damage,
        details: StepDetails::GrassCumulativeOverload {
            vertical_distance_water_level_elevation: vertical_distance,
            loading_revetment: true,
            average_number_of_waves: Some(average_number_of_waves),
            representative_wave_runup_2p: Some(runup),
            cumulative_overload: Some(cumulative_overload),
        },
    })
}

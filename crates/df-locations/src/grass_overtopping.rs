//! Grass cover erosion on the crest and inner slope by overtopping waves.

use df_core::constants::GRAVITATIONAL_ACCELERATION;
use df_core::validation::{larger_than_zero, zero_or_larger};
use df_core::{TimeStep, ValidationIssue};
use df_functions::{grass, hydraulic_load};
use df_profile::{CharacteristicPointType, Profile};

use crate::common::{characteristic_point, check_finite, require_point, validate_position_between};
use crate::cumulative_overload::{
    self, CumulativeOverloadHooks, GrassCumulativeOverloadParameters, not_submerged,
};
use crate::derived::DerivedCell;
use crate::error::LocationResult;
use crate::output::{MechanismKind, StepLoad};
use crate::traits::RevetmentMechanism;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrassOvertoppingParameters {
    pub grass: GrassCumulativeOverloadParameters,
    pub front_velocity_cwo: f64,
    pub acceleration_alpha_a_for_crest: f64,
    pub acceleration_alpha_a_for_inner_slope: f64,
    /// Overrides the dike height taken from the profile.
    pub dike_height: Option<f64>,
}

impl Default for GrassOvertoppingParameters {
    fn default() -> Self {
        Self {
            grass: GrassCumulativeOverloadParameters::default(),
            front_velocity_cwo: 1.45,
            acceleration_alpha_a_for_crest: 1.0,
            acceleration_alpha_a_for_inner_slope: 1.4,
            dike_height: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrassOvertoppingDerived {
    pub dike_height: f64,
    pub acceleration_alpha_a: f64,
    pub front_velocity_cwo: f64,
    pub outer_slope: f64,
    pub outer_roughness: f64,
}

#[derive(Debug, Clone, Default)]
pub struct GrassOvertopping {
    pub parameters: GrassOvertoppingParameters,
    derived: DerivedCell<GrassOvertoppingDerived>,
}

impl GrassOvertopping {
    pub fn new(parameters: GrassOvertoppingParameters) -> Self {
        Self {
            parameters,
            derived: DerivedCell::new(),
        }
    }

    const HOOKS: CumulativeOverloadHooks<GrassOvertoppingDerived> = CumulativeOverloadHooks {
        reference_elevation: dike_height,
        loading: not_submerged,
        representative_wave_runup,
        acceleration_alpha_a,
        front_velocity_coefficient,
    };
}

fn dike_height(derived: &GrassOvertoppingDerived) -> f64 {
    derived.dike_height
}

fn acceleration_alpha_a(derived: &GrassOvertoppingDerived) -> f64 {
    derived.acceleration_alpha_a
}

fn front_velocity_coefficient(derived: &GrassOvertoppingDerived) -> f64 {
    derived.front_velocity_cwo
}

/// Run-up on the outer slope, with the slope roughness as reduction factor.
fn representative_wave_runup(
    derived: &GrassOvertoppingDerived,
    time_step: &TimeStep,
    wave_angle: f64,
) -> f64 {
    let xi = hydraulic_load::surf_similarity_parameter(
        derived.outer_slope,
        time_step.wave_height_hm0(),
        time_step.wave_period_tm10(),
        GRAVITATIONAL_ACCELERATION,
    );
    grass::representative_wave_runup(
        time_step.wave_height_hm0(),
        xi,
        wave_angle,
        1.0,
        derived.outer_roughness,
    )
}

impl RevetmentMechanism for GrassOvertopping {
    type Derived = GrassOvertoppingDerived;

    fn kind(&self) -> MechanismKind {
        MechanismKind::GrassOvertopping
    }

    fn derived(&self) -> &DerivedCell<GrassOvertoppingDerived> {
        &self.derived
    }

    fn validate_parameters(
        &self,
        x: f64,
        _time_steps: &[TimeStep],
        profile: &Profile,
    ) -> Vec<Option<ValidationIssue>> {
        let p = &self.parameters;
        let mut issues = p.grass.issues();
        issues.extend([
            larger_than_zero(p.front_velocity_cwo, "FrontVelocityCwo"),
            zero_or_larger(p.acceleration_alpha_a_for_crest, "AccelerationAlphaAForCrest"),
            zero_or_larger(
                p.acceleration_alpha_a_for_inner_slope,
                "AccelerationAlphaAForInnerSlope",
            ),
            require_point(profile, CharacteristicPointType::InnerCrest),
            require_point(profile, CharacteristicPointType::InnerToe),
            validate_position_between(
                x,
                Some(profile.outer_crest()),
                profile.characteristic_point(CharacteristicPointType::InnerToe),
                "between OuterCrest and InnerToe",
            ),
            p.dike_height.and_then(|h| {
                (!h.is_finite()).then(|| ValidationIssue::error("DikeHeight must be finite."))
            }),
        ]);
        issues
    }

    fn derive(&self, x: f64, profile: &Profile) -> LocationResult<GrassOvertoppingDerived> {
        let p = &self.parameters;
        let outer_crest = profile.outer_crest();
        let inner_crest = characteristic_point(profile, CharacteristicPointType::InnerCrest)?;

        let dike_height = match p.dike_height {
            Some(height) => height,
            None => check_finite(
                profile.highest_level_between(outer_crest.x, x),
                "dike height",
            )?,
        };
        let acceleration_alpha_a = if x >= outer_crest.x && x <= inner_crest.x {
            p.acceleration_alpha_a_for_crest
        } else {
            p.acceleration_alpha_a_for_inner_slope
        };

        Ok(GrassOvertoppingDerived {
            dike_height,
            acceleration_alpha_a,
            front_velocity_cwo: p.front_velocity_cwo,
            outer_slope: profile.outer_slope(),
            outer_roughness: profile.outer_roughness(),
        })
    }

    fn reference_height(&self, derived: &GrassOvertoppingDerived) -> f64 {
        derived.dike_height
    }

    fn step_load(
        &self,
        derived: &GrassOvertoppingDerived,
        time_step: &TimeStep,
        profile: &Profile,
        _damage_at_start: f64,
    ) -> LocationResult<StepLoad> {
        cumulative_overload::step_load(
            &Self::HOOKS,
            &self.parameters.grass,
            derived,
            time_step,
            profile,
        )
    }
}

//! Grass cover erosion on the outer slope by wave run-up.

use df_core::constants::GRAVITATIONAL_ACCELERATION;
use df_core::validation::{in_open_range, larger_than_zero, zero_or_larger};
use df_core::{TimeStep, ValidationIssue};
use df_functions::{grass, hydraulic_load};
use df_profile::Profile;

use crate::common::{height_at, validate_position_between, validate_reduction_factor};
use crate::cumulative_overload::{
    self, CumulativeOverloadHooks, GrassCumulativeOverloadParameters, not_submerged,
};
use crate::derived::DerivedCell;
use crate::error::LocationResult;
use crate::output::{MechanismKind, StepLoad};
use crate::traits::RevetmentMechanism;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrassWaveRunupParameters {
    pub grass: GrassCumulativeOverloadParameters,
    pub front_velocity_cu: f64,
    pub acceleration_alpha_a: f64,
    /// Berm influence factor.
    pub gamma_b: f64,
    /// Roughness influence factor.
    pub gamma_f: f64,
}

impl Default for GrassWaveRunupParameters {
    fn default() -> Self {
        Self {
            grass: GrassCumulativeOverloadParameters::default(),
            front_velocity_cu: 1.1,
            acceleration_alpha_a: 1.0,
            gamma_b: 1.0,
            gamma_f: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrassWaveRunupDerived {
    pub z: f64,
    pub outer_slope: f64,
    pub acceleration_alpha_a: f64,
    pub front_velocity_cu: f64,
    pub gamma_b: f64,
    pub gamma_f: f64,
}

#[derive(Debug, Clone, Default)]
pub struct GrassWaveRunup {
    pub parameters: GrassWaveRunupParameters,
    derived: DerivedCell<GrassWaveRunupDerived>,
}

impl GrassWaveRunup {
    pub fn new(parameters: GrassWaveRunupParameters) -> Self {
        Self {
            parameters,
            derived: DerivedCell::new(),
        }
    }

    const HOOKS: CumulativeOverloadHooks<GrassWaveRunupDerived> = CumulativeOverloadHooks {
        reference_elevation: location_height,
        loading: not_submerged,
        representative_wave_runup,
        acceleration_alpha_a,
        front_velocity_coefficient,
    };
}

fn location_height(derived: &GrassWaveRunupDerived) -> f64 {
    derived.z
}

fn acceleration_alpha_a(derived: &GrassWaveRunupDerived) -> f64 {
    derived.acceleration_alpha_a
}

fn front_velocity_coefficient(derived: &GrassWaveRunupDerived) -> f64 {
    derived.front_velocity_cu
}

fn representative_wave_runup(
    derived: &GrassWaveRunupDerived,
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
        derived.gamma_b,
        derived.gamma_f,
    )
}

impl RevetmentMechanism for GrassWaveRunup {
    type Derived = GrassWaveRunupDerived;

    fn kind(&self) -> MechanismKind {
        MechanismKind::GrassWaveRunup
    }

    fn derived(&self) -> &DerivedCell<GrassWaveRunupDerived> {
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
            larger_than_zero(p.front_velocity_cu, "FrontVelocityCu"),
            zero_or_larger(p.acceleration_alpha_a, "AccelerationAlphaA"),
            validate_reduction_factor(p.gamma_b, "GammaB"),
            validate_reduction_factor(p.gamma_f, "GammaF"),
            in_open_range(profile.outer_slope(), 0.0, 1.0, "OuterSlope"),
            validate_position_between(
                x,
                Some(profile.outer_toe()),
                Some(profile.outer_crest()),
                "between OuterToe and OuterCrest",
            ),
        ]);
        issues
    }

    fn derive(&self, x: f64, profile: &Profile) -> LocationResult<GrassWaveRunupDerived> {
        let p = &self.parameters;
        Ok(GrassWaveRunupDerived {
            z: height_at(profile, x)?,
            outer_slope: profile.outer_slope(),
            acceleration_alpha_a: p.acceleration_alpha_a,
            front_velocity_cu: p.front_velocity_cu,
            gamma_b: p.gamma_b,
            gamma_f: p.gamma_f,
        })
    }

    fn reference_height(&self, derived: &GrassWaveRunupDerived) -> f64 {
        derived.z
    }

    fn step_load(
        &self,
        derived: &GrassWaveRunupDerived,
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

#[cfg(test)]
mod tests {
    use super::*;
    use df_core::units::s;
    use df_profile::{CharacteristicPointType, ProfileBuilder, ProfilePoint};

    use crate::output::StepDetails;

    fn profile() -> Profile {
        let toe = ProfilePoint::new(0.0, 0.0);
        let crest = ProfilePoint::new(24.0, 6.0);
        ProfileBuilder::new(0.0)
            .segment(toe, crest, 1.0)
            .characteristic_point(CharacteristicPointType::OuterToe, toe)
            .characteristic_point(CharacteristicPointType::OuterCrest, crest)
            .build()
            .unwrap()
    }

    #[test]
    fn submerged_location_is_not_loaded() {
        let mechanism = GrassWaveRunup::default();
        let profile = profile();
        let derived = mechanism.derive(8.0, &profile).unwrap();
        let step = TimeStep::new(s(0.0), s(3600.0), 2.5, 1.5, 5.0, 0.0).unwrap();

        let load = mechanism.step_load(&derived, &step, &profile, 0.0).unwrap();
        assert_eq!(load.increment_damage, 0.0);
        assert!(matches!(
            load.details,
            StepDetails::GrassCumulativeOverload {
                loading_revetment: false,
                cumulative_overload: None,
                ..
            }
        ));
    }

    #[test]
    fn location_above_water_is_loaded() {
        let mechanism = GrassWaveRunup::default();
        let profile = profile();
        let derived = mechanism.derive(10.0, &profile).unwrap();
        let step = TimeStep::new(s(0.0), s(3600.0), 2.0, 1.5, 5.0, 0.0).unwrap();

        let load = mechanism.step_load(&derived, &step, &profile, 0.0).unwrap();
        assert!(load.increment_damage > 0.0);
        assert!(load.details.loading_revetment());
    }

    #[test]
    fn steep_slope_is_reported() {
        let toe = ProfilePoint::new(0.0, 0.0);
        let crest = ProfilePoint::new(2.0, 6.0);
        let steep = ProfileBuilder::new(0.0)
            .segment(toe, crest, 1.0)
            .characteristic_point(CharacteristicPointType::OuterToe, toe)
            .characteristic_point(CharacteristicPointType::OuterCrest, crest)
            .build()
            .unwrap();
        let issues = GrassWaveRunup::default().validate_parameters(1.0, &[], &steep);
        assert_eq!(issues.iter().flatten().count(), 1);
    }
}

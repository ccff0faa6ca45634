//! Natural stone (pitched block) revetments on the outer slope.
//!
//! The only stateful mechanism: the increment of a step depends on the
//! damage at its start.

use df_core::constants::GRAVITATIONAL_ACCELERATION;
use df_core::validation::{in_open_range, larger_than_zero, zero_or_larger};
use df_core::{TimeStep, ValidationIssue, seconds};
use df_functions::natural_stone::{
    self as functions, HydraulicLoadCoefficients, LoadingLimitCoefficients,
};
use df_functions::{BermLevels, OuterSlopeInput, hydraulic_load};
use df_profile::Profile;

use crate::common::{check_finite, height_at, validate_position_between};
use crate::derived::DerivedCell;
use crate::error::LocationResult;
use crate::output::{MechanismKind, StepDetails, StepLoad};
use crate::traits::RevetmentMechanism;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NaturalStoneParameters {
    pub relative_density: f64,
    pub thickness_top_layer: f64,
    pub plunging: HydraulicLoadCoefficientsConfig,
    pub surging: HydraulicLoadCoefficientsConfig,
    pub hydraulic_load_xi_b: f64,
    pub slope_upper_level_a_us: f64,
    pub slope_lower_level_a_ls: f64,
    pub upper_limit_loading: LoadingLimitConfig,
    pub lower_limit_loading: LoadingLimitConfig,
    pub distance_maximum_wave_elevation_a_sm: f64,
    pub distance_maximum_wave_elevation_b_sm: f64,
    pub normative_width_wave_impact_a_wi: f64,
    pub normative_width_wave_impact_b_wi: f64,
    pub wave_angle_impact_beta_max: f64,
}

/// Serializable mirror of [`HydraulicLoadCoefficients`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HydraulicLoadCoefficientsConfig {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub n: f64,
}

impl From<HydraulicLoadCoefficients> for HydraulicLoadCoefficientsConfig {
    fn from(k: HydraulicLoadCoefficients) -> Self {
        Self {
            a: k.a,
            b: k.b,
            c: k.c,
            n: k.n,
        }
    }
}

impl From<HydraulicLoadCoefficientsConfig> for HydraulicLoadCoefficients {
    fn from(k: HydraulicLoadCoefficientsConfig) -> Self {
        Self {
            a: k.a,
            b: k.b,
            c: k.c,
            n: k.n,
        }
    }
}

/// Serializable mirror of [`LoadingLimitCoefficients`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadingLimitConfig {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl From<LoadingLimitCoefficients> for LoadingLimitConfig {
    fn from(k: LoadingLimitCoefficients) -> Self {
        Self {
            a: k.a,
            b: k.b,
            c: k.c,
        }
    }
}

impl From<LoadingLimitConfig> for LoadingLimitCoefficients {
    fn from(k: LoadingLimitConfig) -> Self {
        Self {
            a: k.a,
            b: k.b,
            c: k.c,
        }
    }
}

impl NaturalStoneParameters {
    /// Parameters with the default coefficients.
    pub fn new(relative_density: f64, thickness_top_layer: f64) -> Self {
        Self {
            relative_density,
            thickness_top_layer,
            plunging: HydraulicLoadCoefficients::PLUNGING.into(),
            surging: HydraulicLoadCoefficients::SURGING.into(),
            hydraulic_load_xi_b: 2.9,
            slope_upper_level_a_us: 0.05,
            slope_lower_level_a_ls: 1.5,
            upper_limit_loading: LoadingLimitCoefficients::UPPER.into(),
            lower_limit_loading: LoadingLimitCoefficients::LOWER.into(),
            distance_maximum_wave_elevation_a_sm: 0.42,
            distance_maximum_wave_elevation_b_sm: 0.9,
            normative_width_wave_impact_a_wi: 0.96,
            normative_width_wave_impact_b_wi: 0.11,
            wave_angle_impact_beta_max: 78.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NaturalStoneDerived {
    pub z: f64,
    pub resistance: f64,
    pub outer_toe_height: f64,
    pub outer_crest_height: f64,
    pub berm: Option<BermLevels>,
}

#[derive(Debug, Clone)]
pub struct NaturalStone {
    pub parameters: NaturalStoneParameters,
    derived: DerivedCell<NaturalStoneDerived>,
}

impl NaturalStone {
    pub fn new(parameters: NaturalStoneParameters) -> Self {
        Self {
            parameters,
            derived: DerivedCell::new(),
        }
    }
}

impl RevetmentMechanism for NaturalStone {
    type Derived = NaturalStoneDerived;

    fn kind(&self) -> MechanismKind {
        MechanismKind::NaturalStone
    }

    fn derived(&self) -> &DerivedCell<NaturalStoneDerived> {
        &self.derived
    }

    fn validate_parameters(
        &self,
        x: f64,
        _time_steps: &[TimeStep],
        profile: &Profile,
    ) -> Vec<Option<ValidationIssue>> {
        let p = &self.parameters;
        vec![
            in_open_range(p.relative_density, 0.0, 10.0, "RelativeDensity"),
            in_open_range(p.thickness_top_layer, 0.0, 1.0, "ThicknessTopLayer"),
            larger_than_zero(p.hydraulic_load_xi_b, "HydraulicLoadXib"),
            zero_or_larger(p.slope_upper_level_a_us, "SlopeUpperLevelAus"),
            larger_than_zero(p.slope_lower_level_a_ls, "SlopeLowerLevelAls"),
            larger_than_zero(p.wave_angle_impact_beta_max, "WaveAngleImpactBetamax"),
            validate_position_between(
                x,
                Some(profile.outer_toe()),
                Some(profile.outer_crest()),
                "between OuterToe and OuterCrest",
            ),
        ]
    }

    fn derive(&self, x: f64, profile: &Profile) -> LocationResult<NaturalStoneDerived> {
        let p = &self.parameters;
        let berm = profile.outer_berm().map(|berm| BermLevels {
            crest_position: berm.crest.x,
            crest_height: berm.crest.z,
            notch_position: berm.notch.x,
            notch_height: berm.notch.z,
        });
        Ok(NaturalStoneDerived {
            z: height_at(profile, x)?,
            resistance: functions::resistance(p.relative_density, p.thickness_top_layer),
            outer_toe_height: profile.outer_toe().z,
            outer_crest_height: profile.outer_crest().z,
            berm,
        })
    }

    fn reference_height(&self, derived: &NaturalStoneDerived) -> f64 {
        derived.z
    }

    fn step_load(
        &self,
        derived: &NaturalStoneDerived,
        time_step: &TimeStep,
        profile: &Profile,
        damage_at_start: f64,
    ) -> LocationResult<StepLoad> {
        let p = &self.parameters;
        let hm0 = time_step.wave_height_hm0();
        let tm10 = time_step.wave_period_tm10();
        let water_level = time_step.water_level();

        let slope_upper_level = functions::slope_upper_level(
            derived.outer_toe_height,
            derived.outer_crest_height,
            water_level,
            hm0,
            p.slope_upper_level_a_us,
        );
        let slope_lower_level = functions::slope_lower_level(
            derived.outer_toe_height,
            slope_upper_level,
            hm0,
            p.slope_lower_level_a_ls,
        );
        let slope_upper_position = profile.position_at(slope_upper_level);
        let slope_lower_position = profile.position_at(slope_lower_level);

        let outer_slope = functions::outer_slope(&OuterSlopeInput {
            slope_lower_position,
            slope_lower_level,
            slope_upper_position,
            slope_upper_level,
            outer_toe_height: derived.outer_toe_height,
            outer_crest_height: derived.outer_crest_height,
            berm: derived.berm,
        });

        let wave_steepness_deep_water =
            hydraulic_load::wave_steepness_deep_water(hm0, tm10, GRAVITATIONAL_ACCELERATION);
        let surf_similarity_parameter = hydraulic_load::surf_similarity_parameter(
            outer_slope,
            hm0,
            tm10,
            GRAVITATIONAL_ACCELERATION,
        );
        let distance_maximum_wave_elevation = functions::distance_maximum_wave_elevation(
            1.0,
            wave_steepness_deep_water,
            hm0,
            p.distance_maximum_wave_elevation_a_sm,
            p.distance_maximum_wave_elevation_b_sm,
        );
        let normative_width_wave_impact = functions::normative_width_wave_impact(
            surf_similarity_parameter,
            hm0,
            p.normative_width_wave_impact_a_wi,
            p.normative_width_wave_impact_b_wi,
        );
        let depth_maximum_wave_load = functions::depth_maximum_wave_load(
            distance_maximum_wave_elevation,
            normative_width_wave_impact,
            hydraulic_load::slope_angle(outer_slope),
        );
        let upper_limit_loading = functions::upper_limit_loading(
            depth_maximum_wave_load,
            surf_similarity_parameter,
            water_level,
            hm0,
            p.upper_limit_loading.into(),
        );
        let lower_limit_loading = functions::lower_limit_loading(
            depth_maximum_wave_load,
            surf_similarity_parameter,
            water_level,
            hm0,
            p.lower_limit_loading.into(),
        );
        let loading =
            hydraulic_load::loading_revetment(lower_limit_loading, upper_limit_loading, derived.z);

        let mut details = NaturalStoneStep {
            loading_revetment: loading,
            outer_slope,
            slope_upper_level,
            slope_upper_position,
            slope_lower_level,
            slope_lower_position,
            surf_similarity_parameter,
            wave_steepness_deep_water,
            distance_maximum_wave_elevation,
            normative_width_wave_impact,
            depth_maximum_wave_load,
            upper_limit_loading,
            lower_limit_loading,
            loaded: None,
        };

        if !loading {
            return Ok(StepLoad::unloaded(details.into_details()));
        }

        let hydraulic_load = functions::hydraulic_load(
            surf_similarity_parameter,
            hm0,
            p.plunging.into(),
            p.surging.into(),
            p.hydraulic_load_xi_b,
        );
        let wave_angle =
            hydraulic_load::wave_angle(time_step.wave_direction(), profile.dike_orientation());
        let wave_angle_impact =
            functions::wave_angle_impact(wave_angle, p.wave_angle_impact_beta_max);

        let (reference_degradation, reference_time_degradation, increment_degradation, increment) =
            if hydraulic_load * wave_angle_impact > 0.0 {
                let reference_degradation = functions::reference_degradation(
                    derived.resistance,
                    hydraulic_load,
                    wave_angle_impact,
                    damage_at_start,
                );
                let reference_time =
                    functions::reference_time_degradation(reference_degradation, tm10);
                let increment_degradation = functions::increment_degradation(
                    reference_time,
                    seconds(time_step.duration()),
                    tm10,
                );
                let increment = functions::increment_damage(
                    hydraulic_load,
                    derived.resistance,
                    increment_degradation,
                    wave_angle_impact,
                );
                (reference_degradation, reference_time, increment_degradation, increment)
            } else {
                (0.0, 0.0, 0.0, 0.0)
            };

        details.loaded = Some(LoadedQuantities {
            hydraulic_load,
            wave_angle,
            wave_angle_impact,
            reference_degradation,
            reference_time_degradation,
            increment_degradation,
        });

        Ok(StepLoad {
            increment_damage: check_finite(increment, "natural stone increment damage")?,
            details: details.into_details(),
        })
    }
}

struct LoadedQuantities {
    hydraulic_load: f64,
    wave_angle: f64,
    wave_angle_impact: f64,
    reference_degradation: f64,
    reference_time_degradation: f64,
    increment_degradation: f64,
}

struct NaturalStoneStep {
    loading_revetment: bool,
    outer_slope: f64,
    slope_upper_level: f64,
    slope_upper_position: f64,
    slope_lower_level: f64,
    slope_lower_position: f64,
    surf_similarity_parameter: f64,
    wave_steepness_deep_water: f64,
    distance_maximum_wave_elevation: f64,
    normative_width_wave_impact: f64,
    depth_maximum_wave_load: f64,
    upper_limit_loading: f64,
    lower_limit_loading: f64,
    loaded: Option<LoadedQuantities>,
}

impl NaturalStoneStep {
    fn into_details(self) -> StepDetails {
        let loaded = self.loaded.as_ref();
        StepDetails::NaturalStone {
            loading_revetment: self.loading_revetment,
            outer_slope: self.outer_slope,
            slope_upper_level: self.slope_upper_level,
            slope_upper_position: self.slope_upper_position,
            slope_lower_level: self.slope_lower_level,
            slope_lower_position: self.slope_lower_position,
            surf_similarity_parameter: self.surf_similarity_parameter,
            wave_steepness_deep_water: self.wave_steepness_deep_water,
            distance_maximum_wave_elevation: self.distance_maximum_wave_elevation,
            normative_width_wave_impact: self.normative_width_wave_impact,
            depth_maximum_wave_load: self.depth_maximum_wave_load,
            upper_limit_loading: self.upper_limit_loading,
            lower_limit_loading: self.lower_limit_loading,
            hydraulic_load: loaded.map(|l| l.hydraulic_load),
            wave_angle: loaded.map(|l| l.wave_angle),
            wave_angle_impact: loaded.map(|l| l.wave_angle_impact),
            reference_degradation: loaded.map(|l| l.reference_degradation),
            reference_time_degradation: loaded.map(|l| l.reference_time_degradation),
            increment_degradation: loaded.map(|l| l.increment_degradation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use df_core::units::s;
    use df_profile::{CharacteristicPointType, ProfileBuilder, ProfilePoint};

    fn profile() -> Profile {
        let toe = ProfilePoint::new(0.0, 0.0);
        let crest = ProfilePoint::new(30.0, 10.0);
        ProfileBuilder::new(0.0)
            .segment(toe, crest, 1.0)
            .characteristic_point(CharacteristicPointType::OuterToe, toe)
            .characteristic_point(CharacteristicPointType::OuterCrest, crest)
            .build()
            .unwrap()
    }

    fn step() -> TimeStep {
        TimeStep::new(s(0.0), s(3600.0), 4.0, 1.5, 5.0, 0.0).unwrap()
    }

    #[test]
    fn resistance_from_density_and_thickness() {
        let mechanism = NaturalStone::new(NaturalStoneParameters::new(1.65, 0.3));
        let derived = mechanism.derive(10.0, &profile()).unwrap();
        assert!((derived.resistance - 0.495).abs() < 1e-12);
        assert!(derived.berm.is_none());
    }

    #[test]
    fn damage_grows_slower_once_degraded() {
        let mechanism = NaturalStone::new(NaturalStoneParameters::new(1.65, 0.3));
        let profile = profile();
        // z = 3.67, inside the loading band [3.41, 4.65]
        let derived = mechanism.derive(11.0, &profile).unwrap();

        let fresh = mechanism.step_load(&derived, &step(), &profile, 0.0).unwrap();
        assert!(fresh.details.loading_revetment());
        assert!(fresh.increment_damage > 0.0);

        let degraded = mechanism
            .step_load(&derived, &step(), &profile, fresh.increment_damage)
            .unwrap();
        assert!(degraded.increment_damage > 0.0);
        assert!(degraded.increment_damage < fresh.increment_damage);
    }

    #[test]
    fn toe_far_below_water_is_not_loaded() {
        let mechanism = NaturalStone::new(NaturalStoneParameters::new(1.65, 0.3));
        let profile = profile();
        let derived = mechanism.derive(0.5, &profile).unwrap();
        let load = mechanism.step_load(&derived, &step(), &profile, 0.0).unwrap();
        assert_eq!(load.increment_damage, 0.0);
        assert!(matches!(
            load.details,
            StepDetails::NaturalStone {
                loading_revetment: false,
                hydraulic_load: None,
                ..
            }
        ));
    }

    #[test]
    fn out_of_range_layer_is_reported() {
        let mechanism = NaturalStone::new(NaturalStoneParameters::new(12.0, 1.0));
        let issues = mechanism.validate_parameters(10.0, &[], &profile());
        assert_eq!(issues.iter().flatten().count(), 2);
    }
}

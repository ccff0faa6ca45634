//! Asphalt top layers on the outer slope, loaded by wave impacts.

use df_core::constants::{DENSITY_OF_WATER, GRAVITATIONAL_ACCELERATION};
use df_core::numeric::{Tolerances, nearly_equal};
use df_core::validation::{in_range, larger_than_zero};
use df_core::{TimeStep, ValidationIssue, seconds};
use df_functions::asphalt::{self as functions, WaveImpactInput};
use df_functions::hydraulic_load;
use df_profile::Profile;

use crate::common::{check_finite, height_at};
use crate::derived::DerivedCell;
use crate::error::{LocationError, LocationResult};
use crate::output::{MechanismKind, StepDetails, StepLoad};
use crate::traits::RevetmentMechanism;

/// Layer beneath the asphalt top layer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubLayer {
    pub thickness: f64,
    pub elastic_modulus: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AsphaltWaveImpactParameters {
    /// Failure tension of the asphalt (MPa).
    pub failure_tension: f64,
    /// Modulus of subgrade reaction (MPa/m).
    pub soil_elasticity: f64,
    pub thickness_upper_layer: f64,
    pub elastic_modulus_upper_layer: f64,
    pub sub_layer: Option<SubLayer>,
    pub density_of_water: f64,
    pub average_number_of_waves_ctm: f64,
    pub fatigue_alpha: f64,
    pub fatigue_beta: f64,
    pub impact_number_c: f64,
    pub stiffness_relation_nu: f64,
    pub width_factors: Vec<(f64, f64)>,
    pub depth_factors: Vec<(f64, f64)>,
    pub impact_factors: Vec<(f64, f64)>,
}

impl AsphaltWaveImpactParameters {
    /// Parameters of a single-layer package with the default tables.
    pub fn new(
        failure_tension: f64,
        soil_elasticity: f64,
        thickness_upper_layer: f64,
        elastic_modulus_upper_layer: f64,
    ) -> Self {
        Self {
            failure_tension,
            soil_elasticity,
            thickness_upper_layer,
            elastic_modulus_upper_layer,
            sub_layer: None,
            density_of_water: DENSITY_OF_WATER,
            average_number_of_waves_ctm: 1.0,
            fatigue_alpha: 0.42,
            fatigue_beta: 4.76,
            impact_number_c: 1.0,
            stiffness_relation_nu: 0.35,
            width_factors: functions::WIDTH_FACTORS.to_vec(),
            depth_factors: functions::DEPTH_FACTORS.to_vec(),
            impact_factors: functions::IMPACT_FACTORS.to_vec(),
        }
    }

    pub fn with_sub_layer(mut self, thickness: f64, elastic_modulus: f64) -> Self {
        self.sub_layer = Some(SubLayer {
            thickness,
            elastic_modulus,
        });
        self
    }
}

fn probabilities_sum_to_one(factors: &[(f64, f64)], name: &str) -> Option<ValidationIssue> {
    let total: f64 = factors.iter().map(|&(_, probability)| probability).sum();
    if nearly_equal(total, 1.0, Tolerances::relative(1e-9)) {
        None
    } else {
        Some(ValidationIssue::error(format!(
            "The sum of the probabilities of {name} must be equal to 1."
        )))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsphaltWaveImpactDerived {
    pub z: f64,
    pub outer_slope: f64,
    pub log_failure_tension: f64,
    pub computational_thickness: f64,
    pub stiffness_relation: f64,
}

#[derive(Debug, Clone)]
pub struct AsphaltWaveImpact {
    pub parameters: AsphaltWaveImpactParameters,
    derived: DerivedCell<AsphaltWaveImpactDerived>,
}

impl AsphaltWaveImpact {
    pub fn new(parameters: AsphaltWaveImpactParameters) -> Self {
        Self {
            parameters,
            derived: DerivedCell::new(),
        }
    }
}

impl RevetmentMechanism for AsphaltWaveImpact {
    type Derived = AsphaltWaveImpactDerived;

    fn kind(&self) -> MechanismKind {
        MechanismKind::AsphaltWaveImpact
    }

    fn derived(&self) -> &DerivedCell<AsphaltWaveImpactDerived> {
        &self.derived
    }

    fn validate_parameters(
        &self,
        x: f64,
        _time_steps: &[TimeStep],
        profile: &Profile,
    ) -> Vec<Option<ValidationIssue>> {
        let p = &self.parameters;
        let nu = (!(0.0..0.5).contains(&p.stiffness_relation_nu))
            .then(|| ValidationIssue::error("StiffnessRelationNu must be in range [0, 0.5)."));
        let on_profile = profile.segment_containing(x).is_none().then(|| {
            ValidationIssue::error(format!("X = {x} must lie on a segment of the profile."))
        });

        let mut issues = vec![
            larger_than_zero(p.failure_tension, "FailureTension"),
            larger_than_zero(p.soil_elasticity, "SoilElasticity"),
            larger_than_zero(p.thickness_upper_layer, "ThicknessUpperLayer"),
            larger_than_zero(p.elastic_modulus_upper_layer, "ElasticModulusUpperLayer"),
            in_range(p.density_of_water, 950.0, 1050.0, "DensityOfWater"),
            larger_than_zero(p.average_number_of_waves_ctm, "AverageNumberOfWavesCtm"),
            larger_than_zero(p.fatigue_alpha, "FatigueAlpha"),
            larger_than_zero(p.fatigue_beta, "FatigueBeta"),
            larger_than_zero(p.impact_number_c, "ImpactNumberC"),
            nu,
            probabilities_sum_to_one(&p.width_factors, "WidthFactors"),
            probabilities_sum_to_one(&p.depth_factors, "DepthFactors"),
            probabilities_sum_to_one(&p.impact_factors, "ImpactFactors"),
            on_profile,
        ];
        if let Some(sub_layer) = p.sub_layer {
            issues.push(larger_than_zero(sub_layer.thickness, "ThicknessSubLayer"));
            issues.push(larger_than_zero(
                sub_layer.elastic_modulus,
                "ElasticModulusSubLayer",
            ));
        }
        issues
    }

    fn derive(&self, x: f64, profile: &Profile) -> LocationResult<AsphaltWaveImpactDerived> {
        let p = &self.parameters;
        let segment = profile
            .segment_containing(x)
            .ok_or(LocationError::OutsideProfile {
                what: "no segment contains the location",
                x,
            })?;

        let (thickness_sub_layer, elastic_modulus_sub_layer) = match p.sub_layer {
            Some(sub) => (sub.thickness, sub.elastic_modulus),
            None => (0.0, p.elastic_modulus_upper_layer),
        };
        let computational_thickness = functions::computational_thickness(
            p.thickness_upper_layer,
            thickness_sub_layer,
            p.elastic_modulus_upper_layer,
            elastic_modulus_sub_layer,
        );
        let stiffness_relation = functions::stiffness_relation(
            computational_thickness,
            elastic_modulus_sub_layer,
            p.soil_elasticity,
            p.stiffness_relation_nu,
        );

        Ok(AsphaltWaveImpactDerived {
            z: height_at(profile, x)?,
            outer_slope: segment.slope(),
            log_failure_tension: functions::log_failure_tension(p.failure_tension),
            computational_thickness,
            stiffness_relation: check_finite(stiffness_relation, "stiffness relation")?,
        })
    }

    fn reference_height(&self, derived: &AsphaltWaveImpactDerived) -> f64 {
        derived.z
    }

    fn step_load(
        &self,
        derived: &AsphaltWaveImpactDerived,
        time_step: &TimeStep,
        _profile: &Profile,
        _damage_at_start: f64,
    ) -> LocationResult<StepLoad> {
        let p = &self.parameters;
        let hm0 = time_step.wave_height_hm0();

        let average_number_of_waves = hydraulic_load::average_number_of_waves(
            seconds(time_step.duration()),
            time_step.wave_period_tm10(),
            p.average_number_of_waves_ctm,
        );
        let maximum_peak_stress =
            functions::maximum_peak_stress(hm0, GRAVITATIONAL_ACCELERATION, p.density_of_water);

        let input = WaveImpactInput {
            log_failure_tension: derived.log_failure_tension,
            average_number_of_waves,
            maximum_peak_stress,
            stiffness_relation: derived.stiffness_relation,
            computational_thickness: derived.computational_thickness,
            outer_slope: derived.outer_slope,
            width_factors: &p.width_factors,
            depth_factors: &p.depth_factors,
            impact_factors: &p.impact_factors,
            z: derived.z,
            water_level: time_step.water_level(),
            wave_height_hm0: hm0,
            fatigue_alpha: p.fatigue_alpha,
            fatigue_beta: p.fatigue_beta,
            impact_number_c: p.impact_number_c,
        };
        let increment_damage = check_finite(
            functions::increment_damage(&input),
            "asphalt increment damage",
        )?;

        Ok(StepLoad {
            increment_damage,
            details: StepDetails::AsphaltWaveImpact {
                average_number_of_waves,
                maximum_peak_stress,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use df_core::units::s;
    use df_profile::{CharacteristicPointType, ProfileBuilder, ProfilePoint};

    fn profile() -> Profile {
        let p = ProfilePoint::new;
        let points = [p(0.0, 0.0), p(8.0, 2.0), p(20.0, 6.0)];
        ProfileBuilder::new(0.0)
            .polyline(&points, 1.0)
            .characteristic_point(CharacteristicPointType::OuterToe, points[0])
            .characteristic_point(CharacteristicPointType::OuterCrest, points[2])
            .build()
            .unwrap()
    }

    fn mechanism() -> AsphaltWaveImpact {
        AsphaltWaveImpact::new(AsphaltWaveImpactParameters::new(1.6, 64.0, 0.16, 18_000.0))
    }

    #[test]
    fn slope_of_the_containing_segment() {
        let profile = profile();
        let derived = mechanism().derive(8.0, &profile).unwrap();
        assert_eq!(derived.outer_slope, 0.25);
        let derived = mechanism().derive(8.5, &profile).unwrap();
        assert!((derived.outer_slope - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn single_layer_thickness_is_upper_layer() {
        let derived = mechanism().derive(10.0, &profile()).unwrap();
        assert!((derived.computational_thickness - 0.16).abs() < 1e-12);
    }

    #[test]
    fn sub_layer_thickens_the_package() {
        let parameters =
            AsphaltWaveImpactParameters::new(1.6, 64.0, 0.16, 18_000.0).with_sub_layer(0.2, 15_000.0);
        let derived = AsphaltWaveImpact::new(parameters).derive(10.0, &profile()).unwrap();
        assert!(derived.computational_thickness > 0.36);
    }

    #[test]
    fn always_loaded_with_positive_damage_near_water_level() {
        let profile = profile();
        let mechanism = mechanism();
        let derived = mechanism.derive(12.0, &profile).unwrap();
        let step = TimeStep::new(s(0.0), s(3600.0), 3.5, 1.5, 5.0, 0.0).unwrap();

        let load = mechanism.step_load(&derived, &step, &profile, 0.0).unwrap();
        assert!(load.details.loading_revetment());
        assert!(load.increment_damage > 0.0);
        assert!(matches!(
            load.details,
            StepDetails::AsphaltWaveImpact { average_number_of_waves, .. }
                if (average_number_of_waves - 720.0).abs() < 1e-9
        ));
    }

    #[test]
    fn location_before_first_segment_cannot_derive() {
        let err = mechanism().derive(0.0, &profile()).unwrap_err();
        assert!(matches!(err, LocationError::OutsideProfile { .. }));
    }

    #[test]
    fn broken_probability_table_is_reported() {
        let mut parameters = AsphaltWaveImpactParameters::new(1.6, 64.0, 0.16, 18_000.0);
        parameters.impact_factors.pop();
        parameters.stiffness_relation_nu = 0.5;
        let issues = AsphaltWaveImpact::new(parameters).validate_parameters(10.0, &[], &profile());
        assert_eq!(issues.iter().flatten().count(), 2);
    }
}

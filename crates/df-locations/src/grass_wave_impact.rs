//! Grass cover erosion on the outer slope by wave impact.

use df_core::validation::{larger_than_zero, zero_or_larger};
use df_core::{TimeStep, ValidationIssue, seconds};
use df_functions::{grass_wave_impact as functions, hydraulic_load};
use df_profile::Profile;

use crate::common::{height_at, validate_position_between};
use crate::derived::DerivedCell;
use crate::error::LocationResult;
use crate::output::{MechanismKind, StepDetails, StepLoad};
use crate::traits::RevetmentMechanism;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrassWaveImpactParameters {
    pub time_line_a: f64,
    pub time_line_b: f64,
    pub time_line_c: f64,
    /// Longest load duration of the time line (s).
    pub te_max: f64,
    /// Shortest load duration of the time line (s).
    pub te_min: f64,
    pub wave_angle_impact_n: f64,
    pub wave_angle_impact_q: f64,
    pub wave_angle_impact_r: f64,
    pub upper_limit_loading_a_ul: f64,
    pub lower_limit_loading_a_ll: f64,
}

impl Default for GrassWaveImpactParameters {
    fn default() -> Self {
        Self {
            time_line_a: 1.0,
            time_line_b: -0.000009722,
            time_line_c: 0.25,
            te_max: 3_600_000.0,
            te_min: 3.6,
            wave_angle_impact_n: 2.0 / 3.0,
            wave_angle_impact_q: 0.35,
            wave_angle_impact_r: 10.0,
            upper_limit_loading_a_ul: 0.0,
            lower_limit_loading_a_ll: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrassWaveImpactDerived {
    pub z: f64,
    pub minimum_wave_height: f64,
    pub maximum_wave_height: f64,
}

#[derive(Debug, Clone, Default)]
pub struct GrassWaveImpact {
    pub parameters: GrassWaveImpactParameters,
    derived: DerivedCell<GrassWaveImpactDerived>,
}

impl GrassWaveImpact {
    pub fn new(parameters: GrassWaveImpactParameters) -> Self {
        Self {
            parameters,
            derived: DerivedCell::new(),
        }
    }
}

impl RevetmentMechanism for GrassWaveImpact {
    type Derived = GrassWaveImpactDerived;

    fn kind(&self) -> MechanismKind {
        MechanismKind::GrassWaveImpact
    }

    fn derived(&self) -> &DerivedCell<GrassWaveImpactDerived> {
        &self.derived
    }

    fn validate_parameters(
        &self,
        x: f64,
        _time_steps: &[TimeStep],
        profile: &Profile,
    ) -> Vec<Option<ValidationIssue>> {
        let p = &self.parameters;
        let negative_b = (p.time_line_b >= 0.0)
            .then(|| ValidationIssue::error("TimeLineB must be smaller than 0."));
        let te_order = (p.te_min >= p.te_max)
            .then(|| ValidationIssue::error("Temin must be smaller than Temax."));
        let limits_order = (p.upper_limit_loading_a_ul > p.lower_limit_loading_a_ll).then(|| {
            ValidationIssue::error(
                "UpperLimitLoadingAul must be equal to LowerLimitLoadingAll or smaller.",
            )
        });
        let q = (!(0.0..=1.0).contains(&p.wave_angle_impact_q))
            .then(|| ValidationIssue::error("WaveAngleImpactQ must be in range [0, 1]."));

        vec![
            larger_than_zero(p.time_line_a, "TimeLineA"),
            negative_b,
            zero_or_larger(p.time_line_c, "TimeLineC"),
            larger_than_zero(p.te_min, "Temin"),
            te_order,
            larger_than_zero(p.wave_angle_impact_n, "WaveAngleImpactN"),
            q,
            larger_than_zero(p.wave_angle_impact_r, "WaveAngleImpactR"),
            zero_or_larger(p.upper_limit_loading_a_ul, "UpperLimitLoadingAul"),
            limits_order,
            validate_position_between(
                x,
                Some(profile.outer_toe()),
                Some(profile.outer_crest()),
                "between OuterToe and OuterCrest",
            ),
        ]
    }

    fn derive(&self, x: f64, profile: &Profile) -> LocationResult<GrassWaveImpactDerived> {
        let p = &self.parameters;
        let (a, b, c) = (p.time_line_a, p.time_line_b, p.time_line_c);
        Ok(GrassWaveImpactDerived {
            z: height_at(profile, x)?,
            minimum_wave_height: functions::minimum_wave_height(a, b, c, p.te_max),
            maximum_wave_height: functions::maximum_wave_height(a, b, c, p.te_min),
        })
    }

    fn reference_height(&self, derived: &GrassWaveImpactDerived) -> f64 {
        derived.z
    }

    fn step_load(
        &self,
        derived: &GrassWaveImpactDerived,
        time_step: &TimeStep,
        profile: &Profile,
        _damage_at_start: f64,
    ) -> LocationResult<StepLoad> {
        let p = &self.parameters;
        let hm0 = time_step.wave_height_hm0();
        let water_level = time_step.water_level();

        let upper_limit_loading =
            functions::upper_limit_loading(water_level, hm0, p.upper_limit_loading_a_ul);
        let lower_limit_loading =
            functions::lower_limit_loading(water_level, hm0, p.lower_limit_loading_a_ll);
        let loading =
            hydraulic_load::loading_revetment(lower_limit_loading, upper_limit_loading, derived.z);

        if !loading {
            return Ok(StepLoad::unloaded(StepDetails::GrassWaveImpact {
                loading_revetment: false,
                upper_limit_loading,
                lower_limit_loading,
                wave_angle: None,
                wave_angle_impact: None,
                wave_height_impact: None,
                time_line: None,
            }));
        }

        let wave_angle =
            hydraulic_load::wave_angle(time_step.wave_direction(), profile.dike_orientation());
        let wave_angle_impact = functions::wave_angle_impact(
            wave_angle,
            p.wave_angle_impact_n,
            p.wave_angle_impact_q,
            p.wave_angle_impact_r,
        );
        let wave_height_impact = functions::wave_height_impact(
            derived.minimum_wave_height,
            derived.maximum_wave_height,
            wave_angle_impact,
            hm0,
        );
        let time_line =
            functions::time_line(wave_height_impact, p.time_line_a, p.time_line_b, p.time_line_c);
        let increment_damage =
            functions::increment_damage(seconds(time_step.duration()), time_line);

        Ok(StepLoad {
            increment_damage,
            details: StepDetails::GrassWaveImpact {
                loading_revetment: true,
                upper_limit_loading,
                lower_limit_loading,
                wave_angle: Some(wave_angle),
                wave_angle_impact: Some(wave_angle_impact),
                wave_height_impact: Some(wave_height_impact),
                time_line: Some(time_line),
            },
        })
    }
}

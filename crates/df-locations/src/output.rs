//! Per-step and per-location calculation output.

use std::fmt;

use df_core::units::Time;

/// Revetment mechanism of a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MechanismKind {
    GrassOvertopping,
    GrassWaveRunup,
    GrassWaveImpact,
    NaturalStone,
    AsphaltWaveImpact,
}

impl MechanismKind {
    /// Whether increments depend on the damage at the start of a step.
    pub fn is_stateless(self) -> bool {
        !matches!(self, MechanismKind::NaturalStone)
    }
}

impl fmt::Display for MechanismKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MechanismKind::GrassOvertopping => "GrassOvertopping",
            MechanismKind::GrassWaveRunup => "GrassWaveRunup",
            MechanismKind::GrassWaveImpact => "GrassWaveImpact",
            MechanismKind::NaturalStone => "NaturalStone",
            MechanismKind::AsphaltWaveImpact => "AsphaltWaveImpact",
        };
        f.write_str(name)
    }
}

/// Mechanism-specific quantities of one step.
///
/// Quantities that only exist while the revetment is loaded are `None` for
/// unloaded steps.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepDetails {
    GrassCumulativeOverload {
        vertical_distance_water_level_elevation: f64,
        loading_revetment: bool,
        average_number_of_waves: Option<f64>,
        representative_wave_runup_2p: Option<f64>,
        cumulative_overload: Option<f64>,
    },
    GrassWaveImpact {
        loading_revetment: bool,
        upper_limit_loading: f64,
        lower_limit_loading: f64,
        wave_angle: Option<f64>,
        wave_angle_impact: Option<f64>,
        wave_height_impact: Option<f64>,
        time_line: Option<f64>,
    },
    NaturalStone {
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
        hydraulic_load: Option<f64>,
        wave_angle: Option<f64>,
        wave_angle_impact: Option<f64>,
        reference_degradation: Option<f64>,
        reference_time_degradation: Option<f64>,
        increment_degradation: Option<f64>,
    },
    AsphaltWaveImpact {
        average_number_of_waves: f64,
        maximum_peak_stress: f64,
    },
}

impl StepDetails {
    pub fn loading_revetment(&self) -> bool {
        match self {
            StepDetails::GrassCumulativeOverload {
                loading_revetment, ..
            }
            | StepDetails::GrassWaveImpact {
                loading_revetment, ..
            }
            | StepDetails::NaturalStone {
                loading_revetment, ..
            } => *loading_revetment,
            StepDetails::AsphaltWaveImpact { .. } => true,
        }
    }
}

/// Damage increment of one step before it is accumulated.
#[derive(Debug, Clone, PartialEq)]
pub struct StepLoad {
    pub increment_damage: f64,
    pub details: StepDetails,
}

impl StepLoad {
    /// An unloaded step: no damage, only the gating details.
    pub fn unloaded(details: StepDetails) -> Self {
        Self {
            increment_damage: 0.0,
            details,
        }
    }
}

/// Outcome of one time step at one location.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepOutput {
    pub increment_damage: f64,
    /// Cumulative damage at the end of the step.
    pub damage: f64,
    /// Set iff the failure number is crossed within this step.
    pub time_of_failure: Option<Time>,
    pub details: StepDetails,
}

/// Damage development of one location over the whole timeline.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationOutput {
    pub x: f64,
    /// Profile height the mechanism refers to (dike height for overtopping).
    pub reference_height: f64,
    pub mechanism: MechanismKind,
    pub initial_damage: f64,
    pub steps: Vec<StepOutput>,
}

impl LocationOutput {
    pub fn damages(&self) -> impl Iterator<Item = f64> + '_ {
        self.steps.iter().map(|s| s.damage)
    }

    pub fn final_damage(&self) -> f64 {
        self.steps.last().map_or(self.initial_damage, |s| s.damage)
    }

    /// First recorded time of failure, if the location failed.
    pub fn time_of_failure(&self) -> Option<Time> {
        self.steps.iter().find_map(|s| s.time_of_failure)
    }

    pub fn failed(&self) -> bool {
        self.time_of_failure().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use df_core::units::s;

    fn step(increment: f64, damage: f64, failure: Option<f64>) -> StepOutput {
        StepOutput {
            increment_damage: increment,
            damage,
            time_of_failure: failure.map(s),
            details: StepDetails::AsphaltWaveImpact {
                average_number_of_waves: 700.0,
                maximum_peak_stress: 0.01,
            },
        }
    }

    #[test]
    fn summary_accessors() {
        let output = LocationOutput {
            x: 10.0,
            reference_height: 2.0,
            mechanism: MechanismKind::AsphaltWaveImpact,
            initial_damage: 0.1,
            steps: vec![
                step(0.5, 0.6, None),
                step(0.6, 1.2, Some(5000.0)),
                step(0.1, 1.3, None),
            ],
        };
        assert_eq!(output.final_damage(), 1.3);
        assert_eq!(output.time_of_failure(), Some(s(5000.0)));
        assert!(output.failed());
        assert_eq!(output.damages().collect::<Vec<_>>(), [0.6, 1.2, 1.3]);
    }

    #[test]
    fn empty_output_keeps_initial_damage() {
        let output = LocationOutput {
            x: 0.0,
            reference_height: 0.0,
            mechanism: MechanismKind::NaturalStone,
            initial_damage: 0.25,
            steps: Vec::new(),
        };
        assert_eq!(output.final_damage(), 0.25);
        assert!(!output.failed());
    }

    #[test]
    fn only_natural_stone_is_stateful() {
        assert!(!MechanismKind::NaturalStone.is_stateless());
        assert!(MechanismKind::GrassWaveImpact.is_stateless());
        assert_eq!(MechanismKind::GrassOvertopping.to_string(), "GrassOvertopping");
    }
}

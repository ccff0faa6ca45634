//! One hydraulic-load observation of the simulation timeline.

use crate::diagnostics::Diagnostics;
use crate::error::{DfError, DfResult};
use crate::units::{Time, seconds};
use crate::validation::{ValidationIssue, register_issues};

/// Hydraulic loads acting during `[begin_time, end_time)`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeStep {
    begin_time: Time,
    end_time: Time,
    water_level: f64,
    wave_height_hm0: f64,
    wave_period_tm10: f64,
    wave_direction: f64,
}

impl TimeStep {
    /// Create a time step.
    ///
    /// Only structural problems are rejected here (an empty or reversed time
    /// range, non-finite loads). Physical ranges are left to [`validate`].
    ///
    /// [`validate`]: TimeStep::validate
    pub fn new(
        begin_time: Time,
        end_time: Time,
        water_level: f64,
        wave_height_hm0: f64,
        wave_period_tm10: f64,
        wave_direction: f64,
    ) -> DfResult<Self> {
        let begin = seconds(begin_time);
        let end = seconds(end_time);
        if !(begin < end) {
            return Err(DfError::InvalidTimeRange { begin, end });
        }
        crate::numeric::ensure_finite(water_level, "water level")?;
        crate::numeric::ensure_finite(wave_height_hm0, "wave height Hm0")?;
        crate::numeric::ensure_finite(wave_period_tm10, "wave period Tm10")?;
        crate::numeric::ensure_finite(wave_direction, "wave direction")?;

        Ok(Self {
            begin_time,
            end_time,
            water_level,
            wave_height_hm0,
            wave_period_tm10,
            wave_direction,
        })
    }

    pub fn begin_time(&self) -> Time {
        self.begin_time
    }

    pub fn end_time(&self) -> Time {
        self.end_time
    }

    pub fn duration(&self) -> Time {
        self.end_time - self.begin_time
    }

    pub fn water_level(&self) -> f64 {
        self.water_level
    }

    pub fn wave_height_hm0(&self) -> f64 {
        self.wave_height_hm0
    }

    pub fn wave_period_tm10(&self) -> f64 {
        self.wave_period_tm10
    }

    pub fn wave_direction(&self) -> f64 {
        self.wave_direction
    }

    /// Run every range check and register the issues found.
    ///
    /// Returns `false` iff at least one Error was registered.
    pub fn validate(&self, diagnostics: &Diagnostics) -> bool {
        register_issues(
            diagnostics,
            [
                validate_wave_height_hm0(self.wave_height_hm0),
                validate_wave_period_tm10(self.wave_period_tm10),
                validate_wave_direction(self.wave_direction),
            ],
        )
    }
}

pub fn validate_wave_height_hm0(wave_height_hm0: f64) -> Option<ValidationIssue> {
    if wave_height_hm0 <= 0.0 {
        return Some(ValidationIssue::error("WaveHeightHm0 must be larger than 0."));
    }
    if wave_height_hm0 > 10.0 {
        return Some(ValidationIssue::warning(
            "WaveHeightHm0 should be in range (0, 10].",
        ));
    }
    None
}

pub fn validate_wave_period_tm10(wave_period_tm10: f64) -> Option<ValidationIssue> {
    if wave_period_tm10 <= 0.0 {
        return Some(ValidationIssue::error(
            "WavePeriodTm10 must be larger than 0.",
        ));
    }
    if wave_period_tm10 > 25.0 {
        return Some(ValidationIssue::warning(
            "WavePeriodTm10 should be in range (0, 25].",
        ));
    }
    None
}

pub fn validate_wave_direction(wave_direction: f64) -> Option<ValidationIssue> {
    if !(0.0..=360.0).contains(&wave_direction) {
        return Some(ValidationIssue::error(
            "WaveDirection must be in range [0, 360].",
        ));
    }
    None
}

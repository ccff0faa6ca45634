//! Batch input: one profile, one timeline, many locations.

use df_core::{TimeStep, seconds};
use df_locations::LocationInput;
use df_profile::Profile;

use crate::error::{EngineError, EngineResult};

/// Everything a batch needs, checked for structural consistency.
///
/// Physical ranges are not checked here; run the
/// [`Validator`](crate::Validator) for those.
#[derive(Debug, Clone)]
pub struct CalculationInput {
    profile: Profile,
    time_steps: Vec<TimeStep>,
    locations: Vec<LocationInput>,
}

impl CalculationInput {
    /// Assemble a batch.
    ///
    /// Rejects an empty timeline, an empty location list and time steps
    /// where a step does not begin exactly where the previous one ends.
    pub fn new(
        profile: Profile,
        time_steps: Vec<TimeStep>,
        locations: Vec<LocationInput>,
    ) -> EngineResult<Self> {
        if time_steps.is_empty() {
            return Err(EngineError::InvalidInput {
                what: "at least one time step is required",
            });
        }
        if locations.is_empty() {
            return Err(EngineError::InvalidInput {
                what: "at least one location is required",
            });
        }
        for (index, pair) in time_steps.windows(2).enumerate() {
            if pair[0].end_time() != pair[1].begin_time() {
                return Err(EngineError::NonContiguousTimeSteps {
                    index: index + 1,
                    previous_end: seconds(pair[0].end_time()),
                    begin: seconds(pair[1].begin_time()),
                });
            }
        }

        Ok(Self {
            profile,
            time_steps,
            locations,
        })
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn time_steps(&self) -> &[TimeStep] {
        &self.time_steps
    }

    pub fn locations(&self) -> &[LocationInput] {
        &self.locations
    }

    /// Number of location-step evaluations in the batch.
    pub fn workload(&self) -> usize {
        self.locations.len() * self.time_steps.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use df_core::units::s;
    use df_locations::GrassWaveImpact;
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

    fn step(begin: f64, end: f64) -> TimeStep {
        TimeStep::new(s(begin), s(end), 2.0, 1.0, 4.0, 0.0).unwrap()
    }

    fn location() -> LocationInput {
        LocationInput::new(10.0, GrassWaveImpact::default())
    }

    #[test]
    fn contiguous_batch_is_accepted() {
        let input = CalculationInput::new(
            profile(),
            vec![step(0.0, 10.0), step(10.0, 25.0)],
            vec![location(), location()],
        )
        .unwrap();
        assert_eq!(input.workload(), 4);
    }

    #[test]
    fn empty_lists_are_rejected() {
        assert!(matches!(
            CalculationInput::new(profile(), vec![], vec![location()]),
            Err(EngineError::InvalidInput { .. })
        ));
        assert!(matches!(
            CalculationInput::new(profile(), vec![step(0.0, 1.0)], vec![]),
            Err(EngineError::InvalidInput { .. })
        ));
    }

    #[test]
    fn gap_between_steps_is_rejected() {
        let err = CalculationInput::new(
            profile(),
            vec![step(0.0, 10.0), step(10.0, 20.0), step(21.0, 30.0)],
            vec![location()],
        )
        .unwrap_err();
        assert_eq!(
            err,
            EngineError::NonContiguousTimeSteps {
                index: 2,
                previous_end: 20.0,
                begin: 21.0,
            }
        );
    }
}

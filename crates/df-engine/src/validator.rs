//! Physical range validation of a whole batch.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

use df_core::Diagnostics;
use tracing::{info, warn};

use crate::input::CalculationInput;
use crate::output::{ValidationOutcome, ValidationResult};

/// Text of a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_owned()
    }
}

fn validate_all(input: &CalculationInput, diagnostics: &Diagnostics) -> bool {
    let mut valid = true;
    for time_step in input.time_steps() {
        valid &= time_step.validate(diagnostics);
    }
    valid &= input.profile().validate(diagnostics);
    for location in input.locations() {
        valid &= location.validate(input.time_steps(), input.profile(), diagnostics);
    }
    valid
}

pub struct Validator;

impl Validator {
    /// Run every check on the batch and collect the issues found.
    ///
    /// Time steps come first, then the profile, then the locations. No
    /// check is skipped because an earlier one failed. A panic inside a
    /// check is reported as one Error event and fails the validation.
    pub fn validate(input: &CalculationInput) -> ValidationResult {
        let diagnostics = Diagnostics::new();
        let valid = match catch_unwind(AssertUnwindSafe(|| validate_all(input, &diagnostics))) {
            Ok(valid) => valid,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!(%message, "validation panicked");
                diagnostics.error(format!(
                    "An unhandled error occurred while validating the calculation input: {message}"
                ));
                false
            }
        };

        let events = diagnostics.drain();
        info!(valid, events = events.len(), "validation finished");
        ValidationResult {
            outcome: if valid {
                ValidationOutcome::Successful
            } else {
                ValidationOutcome::Failed
            },
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use df_core::TimeStep;
    use df_core::units::s;
    use df_locations::{GrassWaveImpact, LocationInput};
    use df_profile::{CharacteristicPointType, ProfileBuilder, ProfilePoint};

    fn input(wave_height: f64, orientation: f64, initial_damage: f64) -> CalculationInput {
        let toe = ProfilePoint::new(0.0, 0.0);
        let crest = ProfilePoint::new(30.0, 10.0);
        let profile = ProfileBuilder::new(orientation)
            .segment(toe, crest, 1.0)
            .characteristic_point(CharacteristicPointType::OuterToe, toe)
            .characteristic_point(CharacteristicPointType::OuterCrest, crest)
            .build()
            .unwrap();
        let step = TimeStep::new(s(0.0), s(3600.0), 5.0, wave_height, 6.0, 0.0).unwrap();
        let location =
            LocationInput::new(10.0, GrassWaveImpact::default()).with_initial_damage(initial_damage);
        CalculationInput::new(profile, vec![step], vec![location]).unwrap()
    }

    #[test]
    fn clean_input_passes_without_events() {
        let result = Validator::validate(&input(1.0, 0.0, 0.0));
        assert!(result.is_successful());
        assert!(result.events.is_empty());
    }

    #[test]
    fn every_part_is_checked_in_order() {
        let result = Validator::validate(&input(0.0, 400.0, -1.0));
        assert_eq!(result.outcome, ValidationOutcome::Failed);
        assert_eq!(result.events.len(), 3);
        assert!(result.events[0].message.contains("WaveHeightHm0"));
        assert!(result.events[1].message.contains("DikeOrientation"));
        assert!(result.events[2].message.contains("InitialDamage"));
    }

    #[test]
    fn warnings_do_not_fail_validation() {
        let result = Validator::validate(&input(11.0, 0.0, 0.0));
        assert!(result.is_successful());
        assert_eq!(result.events.len(), 1);
    }

    #[test]
    fn panic_payloads_are_readable() {
        let payload = catch_unwind(|| panic!("boom {}", 1)).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "boom 1");
        let payload = catch_unwind(|| panic!("static")).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "static");
    }
}

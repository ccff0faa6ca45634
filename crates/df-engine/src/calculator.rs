//! Batch calculation: derive, then thread damage through the timeline.

use std::panic::{AssertUnwindSafe, catch_unwind};

use df_core::{Diagnostics, TimeStep};
use df_locations::{LocationInput, LocationOutput, StepLoad, StepOutput};
use df_profile::Profile;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{EngineError, EngineResult};
use crate::input::CalculationInput;
use crate::output::{BatchOutput, CalculationResult, CalculationState};
use crate::progress::ProgressTracker;
use crate::settings::{CalculatorSettings, ExecutionMode};
use crate::validator::panic_message;

/// Runs validated batches.
///
/// A run is all-or-nothing: either every location produces its output, or
/// the result carries no output and a single Error event describing the
/// fault. Cancellation also discards every partial result.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    settings: CalculatorSettings,
}

struct Run<'a> {
    settings: &'a CalculatorSettings,
    profile: &'a Profile,
    time_steps: &'a [TimeStep],
    time_step_mode: ExecutionMode,
    progress: ProgressTracker<'a>,
}

impl Calculator {
    pub fn new(settings: CalculatorSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &CalculatorSettings {
        &self.settings
    }

    /// Calculate every location of `input`.
    ///
    /// `location_mode` controls parallelism across locations,
    /// `time_step_mode` across the steps of one location.
    pub fn calculate(
        &self,
        input: &CalculationInput,
        location_mode: ExecutionMode,
        time_step_mode: ExecutionMode,
    ) -> CalculationResult {
        let log = &self.settings.log_handler;
        let diagnostics = Diagnostics::new();
        log.info(&format!(
            "Calculating {} locations over {} time steps",
            input.locations().len(),
            input.time_steps().len()
        ));

        if let Err(err) = self.initialize(input, location_mode) {
            diagnostics.error(format!(
                "Could not derive the location data from the profile: {err}"
            ));
            log.error(&err.to_string());
            return CalculationResult {
                state: CalculationState::FailedValidationInput,
                output: None,
                events: diagnostics.drain(),
            };
        }

        let run = Run {
            settings: &self.settings,
            profile: input.profile(),
            time_steps: input.time_steps(),
            time_step_mode,
            progress: ProgressTracker::new(input.workload(), self.settings.progress.as_ref()),
        };
        let outcome = catch_unwind(AssertUnwindSafe(|| run.all_locations(input, location_mode)))
            .unwrap_or_else(|payload| {
                Err(EngineError::Panicked {
                    message: panic_message(payload.as_ref()),
                })
            });

        let (state, output) = match outcome {
            Ok(locations) => {
                log.info("Calculation finished");
                (CalculationState::Succeeded, Some(BatchOutput { locations }))
            }
            Err(EngineError::Cancelled) => {
                log.warning("Calculation cancelled");
                diagnostics.warning("The calculation was cancelled.");
                (CalculationState::Cancelled, None)
            }
            Err(err) => {
                log.error(&err.to_string());
                diagnostics.error(format!(
                    "An unhandled error occurred while performing the calculation: {err}"
                ));
                (CalculationState::FailedDuringCalculation, None)
            }
        };

        info!(?state, "calculation run complete");
        CalculationResult {
            state,
            output,
            events: diagnostics.drain(),
        }
    }

    fn initialize(&self, input: &CalculationInput, mode: ExecutionMode) -> EngineResult<()> {
        let profile = input.profile();
        let initialize = |location: &LocationInput| {
            location
                .initialize_derived(profile)
                .map_err(EngineError::at_location(location.x()))
        };
        match mode {
            ExecutionMode::Sequential => input.locations().iter().try_for_each(initialize),
            ExecutionMode::Parallel => input.locations().par_iter().try_for_each(initialize),
        }
    }
}

impl Run<'_> {
    fn check_cancelled(&self) -> EngineResult<()> {
        if self.settings.is_cancelled() {
            Err(EngineError::Cancelled)
        } else {
            Ok(())
        }
    }

    fn all_locations(
        &self,
        input: &CalculationInput,
        mode: ExecutionMode,
    ) -> EngineResult<Vec<LocationOutput>> {
        match mode {
            ExecutionMode::Sequential => input
                .locations()
                .iter()
                .map(|location| self.location(location))
                .collect(),
            ExecutionMode::Parallel => input
                .locations()
                .par_iter()
                .map(|location| self.location(location))
                .collect(),
        }
    }

    fn location(&self, location: &LocationInput) -> EngineResult<LocationOutput> {
        self.check_cancelled()?;
        debug!(x = location.x(), mechanism = %location.kind(), "calculating location");

        let steps = match self.time_step_mode {
            ExecutionMode::Parallel if location.is_stateless() => self.steps_parallel(location)?,
            ExecutionMode::Parallel => {
                let message = format!(
                    "{} at x = {} depends on the damage of the previous step; \
                     its time steps are calculated sequentially",
                    location.kind(),
                    location.x()
                );
                warn!(x = location.x(), "time step parallelism downgraded");
                self.settings.log_handler.warning(&message);
                self.steps_sequential(location)?
            }
            ExecutionMode::Sequential => self.steps_sequential(location)?,
        };

        location
            .aggregate_output(steps)
            .map_err(EngineError::at_location(location.x()))
    }

    fn steps_sequential(&self, location: &LocationInput) -> EngineResult<Vec<StepOutput>> {
        let mut damage = location.initial_damage();
        let mut steps = Vec::with_capacity(self.time_steps.len());
        for time_step in self.time_steps {
            self.check_cancelled()?;
            let step = location
                .calculate_step(time_step, self.profile, damage)
                .map_err(EngineError::at_location(location.x()))?;
            damage = step.damage;
            steps.push(step);
            self.progress.advance(1);
        }
        Ok(steps)
    }

    /// Increments in parallel, then a sequential scan for damage and failure.
    fn steps_parallel(&self, location: &LocationInput) -> EngineResult<Vec<StepOutput>> {
        let loads: Vec<StepLoad> = self
            .time_steps
            .par_iter()
            .map(|time_step| {
                self.check_cancelled()?;
                let load = location
                    .step_load(time_step, self.profile, 0.0)
                    .map_err(EngineError::at_location(location.x()))?;
                self.progress.advance(1);
                Ok(load)
            })
            .collect::<EngineResult<_>>()?;

        let mut damage = location.initial_damage();
        let mut steps = Vec::with_capacity(loads.len());
        for (time_step, load) in self.time_steps.iter().zip(loads) {
            let step = location
                .finish_step(time_step, damage, load)
                .map_err(EngineError::at_location(location.x()))?;
            damage = step.damage;
            steps.push(step);
        }
        Ok(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use df_core::units::s;
    use df_locations::{GrassWaveImpact, NaturalStone, NaturalStoneParameters};
    use df_profile::{CharacteristicPointType, ProfileBuilder, ProfilePoint};
    use std::sync::Arc;

    use crate::log::{LogLevel, RecordingLogHandler};

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

    fn steps(count: usize) -> Vec<TimeStep> {
        (0..count)
            .map(|i| {
                let begin = 600.0 * i as f64;
                TimeStep::new(s(begin), s(begin + 600.0), 4.0, 1.5, 5.0, 0.0).unwrap()
            })
            .collect()
    }

    #[test]
    fn stateful_location_downgrade_is_logged() {
        let handler = Arc::new(RecordingLogHandler::new());
        let calculator =
            Calculator::new(CalculatorSettings::new().with_log_handler(handler.clone()));
        let input = CalculationInput::new(
            profile(),
            steps(3),
            vec![
                LocationInput::new(11.0, NaturalStone::new(NaturalStoneParameters::new(1.65, 0.3))),
                LocationInput::new(12.0, GrassWaveImpact::default()),
            ],
        )
        .unwrap();

        let result =
            calculator.calculate(&input, ExecutionMode::Sequential, ExecutionMode::Parallel);
        assert!(result.is_successful());

        let warnings: Vec<_> = handler
            .messages()
            .into_iter()
            .filter(|(level, _)| *level == LogLevel::Warning)
            .collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].1.contains("NaturalStone"));
    }

    #[test]
    fn underivable_location_fails_validation_input() {
        let calculator = Calculator::default();
        let input = CalculationInput::new(
            profile(),
            steps(2),
            vec![LocationInput::new(40.0, GrassWaveImpact::default())],
        )
        .unwrap();

        let result =
            calculator.calculate(&input, ExecutionMode::Sequential, ExecutionMode::Sequential);
        assert_eq!(result.state, CalculationState::FailedValidationInput);
        assert!(result.output.is_none());
        assert_eq!(result.events.len(), 1);
        assert!(result.events[0].is_error());
    }
}

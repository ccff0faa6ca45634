//! A calculation location: a position on the profile with one mechanism.

use df_core::{Diagnostics, TimeStep, register_issues, s, seconds};
use df_functions::revetment;
use df_profile::Profile;
use tracing::debug;

use crate::asphalt_wave_impact::AsphaltWaveImpact;
use crate::common::{check_finite, validate_failure_number, validate_initial_damage};
use crate::error::LocationResult;
use crate::grass_overtopping::GrassOvertopping;
use crate::grass_wave_impact::GrassWaveImpact;
use crate::grass_wave_runup::GrassWaveRunup;
use crate::natural_stone::NaturalStone;
use crate::output::{LocationOutput, MechanismKind, StepLoad, StepOutput};
use crate::traits::RevetmentMechanism;

/// Revetment mechanism evaluated at a location.
#[derive(Debug, Clone)]
pub enum Mechanism {
    GrassOvertopping(GrassOvertopping),
    GrassWaveRunup(GrassWaveRunup),
    GrassWaveImpact(GrassWaveImpact),
    NaturalStone(NaturalStone),
    AsphaltWaveImpact(AsphaltWaveImpact),
}

macro_rules! with_mechanism {
    ($mechanism:expr, $m:ident => $body:expr) => {
        match $mechanism {
            Mechanism::GrassOvertopping($m) => $body,
            Mechanism::GrassWaveRunup($m) => $body,
            Mechanism::GrassWaveImpact($m) => $body,
            Mechanism::NaturalStone($m) => $body,
            Mechanism::AsphaltWaveImpact($m) => $body,
        }
    };
}

impl From<GrassOvertopping> for Mechanism {
    fn from(m: GrassOvertopping) -> Self {
        Mechanism::GrassOvertopping(m)
    }
}

impl From<GrassWaveRunup> for Mechanism {
    fn from(m: GrassWaveRunup) -> Self {
        Mechanism::GrassWaveRunup(m)
    }
}

impl From<GrassWaveImpact> for Mechanism {
    fn from(m: GrassWaveImpact) -> Self {
        Mechanism::GrassWaveImpact(m)
    }
}

impl From<NaturalStone> for Mechanism {
    fn from(m: NaturalStone) -> Self {
        Mechanism::NaturalStone(m)
    }
}

impl From<AsphaltWaveImpact> for Mechanism {
    fn from(m: AsphaltWaveImpact) -> Self {
        Mechanism::AsphaltWaveImpact(m)
    }
}

fn step_load_of<M: RevetmentMechanism>(
    mechanism: &M,
    x: f64,
    time_step: &TimeStep,
    profile: &Profile,
    damage_at_start: f64,
) -> LocationResult<StepLoad> {
    let derived = mechanism.derived().get(x)?;
    mechanism.step_load(derived, time_step, profile, damage_at_start)
}

fn initialize_derived_of<M: RevetmentMechanism>(
    mechanism: &M,
    x: f64,
    profile: &Profile,
) -> LocationResult<()> {
    mechanism
        .derived()
        .get_or_try_init(|| mechanism.derive(x, profile))
        .map(|_| ())
}

fn reference_height_of<M: RevetmentMechanism>(mechanism: &M, x: f64) -> LocationResult<f64> {
    let derived = mechanism.derived().get(x)?;
    Ok(mechanism.reference_height(derived))
}

/// Position, damage bookkeeping and mechanism of one location.
///
/// Lifecycle: `validate`, then `initialize_derived`, then any number of
/// `calculate_step` calls. Damage threading between steps is the caller's
/// job; the location itself holds no mutable per-step state.
#[derive(Debug, Clone)]
pub struct LocationInput {
    x: f64,
    initial_damage: f64,
    failure_number: f64,
    mechanism: Mechanism,
}

impl LocationInput {
    pub fn new(x: f64, mechanism: impl Into<Mechanism>) -> Self {
        Self {
            x,
            initial_damage: 0.0,
            failure_number: 1.0,
            mechanism: mechanism.into(),
        }
    }

    pub fn with_initial_damage(mut self, initial_damage: f64) -> Self {
        self.initial_damage = initial_damage;
        self
    }

    pub fn with_failure_number(mut self, failure_number: f64) -> Self {
        self.failure_number = failure_number;
        self
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn initial_damage(&self) -> f64 {
        self.initial_damage
    }

    pub fn failure_number(&self) -> f64 {
        self.failure_number
    }

    pub fn mechanism(&self) -> &Mechanism {
        &self.mechanism
    }

    pub fn kind(&self) -> MechanismKind {
        with_mechanism!(&self.mechanism, m => m.kind())
    }

    /// Whether step increments can be computed without the running damage.
    pub fn is_stateless(&self) -> bool {
        with_mechanism!(&self.mechanism, m => m.is_stateless())
    }

    /// Register the base and mechanism checks; false iff an Error was found.
    pub fn validate(
        &self,
        time_steps: &[TimeStep],
        profile: &Profile,
        diagnostics: &Diagnostics,
    ) -> bool {
        let mut issues = vec![
            validate_initial_damage(self.initial_damage),
            validate_failure_number(self.failure_number, self.initial_damage),
        ];
        issues.extend(with_mechanism!(
            &self.mechanism,
            m => m.validate_parameters(self.x, time_steps, profile)
        ));
        register_issues(diagnostics, issues)
    }

    /// Compute the profile-derived constants. Repeated calls are no-ops.
    pub fn initialize_derived(&self, profile: &Profile) -> LocationResult<()> {
        with_mechanism!(&self.mechanism, m => initialize_derived_of(m, self.x, profile))?;
        debug!(x = self.x, mechanism = %self.kind(), "derived data initialized");
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        with_mechanism!(&self.mechanism, m => m.derived().is_initialized())
    }

    /// Height the location reports; the dike height for overtopping.
    pub fn reference_height(&self) -> LocationResult<f64> {
        with_mechanism!(&self.mechanism, m => reference_height_of(m, self.x))
    }

    /// Increment and details of one step, before accumulation.
    pub fn step_load(
        &self,
        time_step: &TimeStep,
        profile: &Profile,
        damage_at_start: f64,
    ) -> LocationResult<StepLoad> {
        with_mechanism!(
            &self.mechanism,
            m => step_load_of(m, self.x, time_step, profile, damage_at_start)
        )
    }

    /// Accumulate a step increment and detect failure within the step.
    pub fn finish_step(
        &self,
        time_step: &TimeStep,
        damage_at_start: f64,
        load: StepLoad,
    ) -> LocationResult<StepOutput> {
        let increment = check_finite(load.increment_damage, "increment damage")?;
        let damage = check_finite(revetment::damage(increment, damage_at_start), "damage")?;

        let time_of_failure =
            if revetment::failure_revetment(damage_at_start, damage, self.failure_number) {
                let time = revetment::time_of_failure(
                    seconds(time_step.begin_time()),
                    seconds(time_step.duration()),
                    increment,
                    self.failure_number,
                    damage_at_start,
                );
                Some(s(check_finite(time, "time of failure")?))
            } else {
                None
            };

        Ok(StepOutput {
            increment_damage: increment,
            damage,
            time_of_failure,
            details: load.details,
        })
    }

    /// One full step: load, accumulation and failure detection.
    pub fn calculate_step(
        &self,
        time_step: &TimeStep,
        profile: &Profile,
        damage_at_start: f64,
    ) -> LocationResult<StepOutput> {
        let load = self.step_load(time_step, profile, damage_at_start)?;
        self.finish_step(time_step, damage_at_start, load)
    }

    /// Thread the damage through every step, starting from the initial damage.
    pub fn calculate_all(
        &self,
        time_steps: &[TimeStep],
        profile: &Profile,
    ) -> LocationResult<Vec<StepOutput>> {
        let mut damage = self.initial_damage;
        let mut outputs = Vec::with_capacity(time_steps.len());
        for time_step in time_steps {
            let output = self.calculate_step(time_step, profile, damage)?;
            damage = output.damage;
            outputs.push(output);
        }
        Ok(outputs)
    }

    /// Collect the step outputs into the location output.
    pub fn aggregate_output(&self, steps: Vec<StepOutput>) -> LocationResult<LocationOutput> {
        Ok(LocationOutput {
            x: self.x,
            reference_height: self.reference_height()?,
            mechanism: self.kind(),
            initial_damage: self.initial_damage,
            steps,
        })
    }
}

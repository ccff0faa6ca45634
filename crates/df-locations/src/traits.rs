//! Core trait for revetment mechanisms.

use df_core::{TimeStep, ValidationIssue};
use df_profile::Profile;

use crate::derived::DerivedCell;
use crate::error::LocationResult;
use crate::output::{MechanismKind, StepLoad};

/// Behaviour every revetment mechanism supplies to a location.
///
/// Mechanisms are deterministic functions of their parameters, the derived
/// block and the time step, suitable for parallel evaluation across
/// locations. Damage accumulation and failure timing are shared and live in
/// [`LocationInput`](crate::LocationInput), not here.
pub trait RevetmentMechanism: Send + Sync {
    /// Profile-dependent constants computed once per location.
    type Derived: Send + Sync;

    fn kind(&self) -> MechanismKind;

    /// Storage for the derived block.
    fn derived(&self) -> &DerivedCell<Self::Derived>;

    /// Mechanism-specific range checks.
    ///
    /// Every check is evaluated; the caller registers the issues.
    fn validate_parameters(
        &self,
        x: f64,
        time_steps: &[TimeStep],
        profile: &Profile,
    ) -> Vec<Option<ValidationIssue>>;

    /// Compute the derived block of the location at `x`.
    fn derive(&self, x: f64, profile: &Profile) -> LocationResult<Self::Derived>;

    /// Height reported with the location output.
    fn reference_height(&self, derived: &Self::Derived) -> f64;

    /// Damage increment and details of one step.
    ///
    /// Stateless mechanisms ignore `damage_at_start`.
    fn step_load(
        &self,
        derived: &Self::Derived,
        time_step: &TimeStep,
        profile: &Profile,
        damage_at_start: f64,
    ) -> LocationResult<StepLoad>;

    fn is_stateless(&self) -> bool {
        self.kind().is_stateless()
    }
}

//! df-core: stable foundation for dikeflow.
//!
//! Contains:
//! - units (uom time type + constructors, physical constants)
//! - numeric (Real + tolerances + float helpers)
//! - diagnostics (Warning/Error event sink)
//! - validation (classified range checks)
//! - time_step (hydraulic load record)
//! - error (shared error types)

pub mod diagnostics;
pub mod error;
pub mod numeric;
pub mod time_step;
pub mod units;
pub mod validation;

// Re-exports: nice ergonomics for downstream crates
pub use diagnostics::{Diagnostics, Event, Severity};
pub use error::{DfError, DfResult};
pub use numeric::*;
pub use time_step::TimeStep;
pub use units::*;
pub use validation::{ValidationIssue, register_issues};

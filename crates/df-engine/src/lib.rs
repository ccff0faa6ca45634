//! Batch validation and calculation for dikeflow.
//!
//! Provides:
//! - Structurally checked batch input (profile, contiguous timeline, locations)
//! - Validator collecting every range issue of a batch
//! - All-or-nothing calculator with sequential or rayon-parallel execution
//! - Progress, cancellation and log hooks

pub mod calculator;
pub mod error;
pub mod input;
pub mod log;
pub mod output;
pub mod progress;
pub mod settings;
pub mod validator;

// Re-exports for public API
pub use calculator::Calculator;
pub use error::{EngineError, EngineResult};
pub use input::CalculationInput;
pub use log::{LogHandler, LogLevel, RecordingLogHandler, TracingLogHandler};
pub use output::{
    BatchOutput, CalculationResult, CalculationState, ValidationOutcome, ValidationResult,
};
pub use settings::{CalculatorSettings, CancellationPredicate, ExecutionMode, ProgressCallback};
pub use validator::Validator;

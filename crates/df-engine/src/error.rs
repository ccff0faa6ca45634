//! Error types for batch validation and calculation.

use df_core::error::DfError;
use df_locations::LocationError;
use thiserror::Error;

/// Errors raised while assembling or running a batch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid input: {what}")]
    InvalidInput { what: &'static str },

    #[error("Time steps are not contiguous: step {index} begins at {begin} s, previous ends at {previous_end} s")]
    NonContiguousTimeSteps {
        index: usize,
        previous_end: f64,
        begin: f64,
    },

    #[error("Location at x = {x}: {source}")]
    Location {
        x: f64,
        #[source]
        source: LocationError,
    },

    #[error(transparent)]
    Core(#[from] DfError),

    #[error("Calculation cancelled")]
    Cancelled,

    #[error("Unexpected panic: {message}")]
    Panicked { message: String },
}

pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    pub(crate) fn at_location(x: f64) -> impl FnOnce(LocationError) -> EngineError {
        move |source| EngineError::Location { x, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_error_carries_position() {
        let err = EngineError::at_location(12.0)(LocationError::NotInitialized { x: 12.0 });
        let text = err.to_string();
        assert!(text.starts_with("Location at x = 12:"));
        assert!(text.contains("before initialization"));
    }

    #[test]
    fn core_errors_convert() {
        let err: EngineError = DfError::InvalidArg { what: "empty" }.into();
        assert!(matches!(err, EngineError::Core(_)));
    }
}

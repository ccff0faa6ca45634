use thiserror::Error;

pub type DfResult<T> = Result<T, DfError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DfError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Time step begins at {begin} s but ends at {end} s")]
    InvalidTimeRange { begin: f64, end: f64 },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_range_message_names_both_bounds() {
        let err = DfError::InvalidTimeRange {
            begin: 10.0,
            end: 5.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("10"));
        assert!(msg.contains('5'));
    }
}

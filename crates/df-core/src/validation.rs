//! Range checks that classify a value instead of rejecting it.
//!
//! Each validator returns `Some(issue)` when the value is out of range and
//! `None` otherwise. Callers evaluate every validator, hand the results to
//! [`register_issues`], and only then decide pass or fail.

use crate::diagnostics::{Diagnostics, Event, Severity};

/// Outcome of a single failed range check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub message: String,
}

impl ValidationIssue {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

impl From<ValidationIssue> for Event {
    fn from(issue: ValidationIssue) -> Self {
        Event::new(issue.message, issue.severity)
    }
}

/// Register every present issue and report whether none of them was an Error.
pub fn register_issues(
    diagnostics: &Diagnostics,
    issues: impl IntoIterator<Item = Option<ValidationIssue>>,
) -> bool {
    let mut valid = true;
    for issue in issues.into_iter().flatten() {
        if issue.severity == Severity::Error {
            valid = false;
        }
        diagnostics.register(issue.into());
    }
    valid
}

/// Error unless `value > 0`.
pub fn larger_than_zero(value: f64, name: &str) -> Option<ValidationIssue> {
    if value > 0.0 {
        None
    } else {
        Some(ValidationIssue::error(format!("{name} must be larger than 0.")))
    }
}

/// Error unless `value >= 0`.
pub fn zero_or_larger(value: f64, name: &str) -> Option<ValidationIssue> {
    if value >= 0.0 {
        None
    } else {
        Some(ValidationIssue::error(format!(
            "{name} must be equal to 0 or larger."
        )))
    }
}

/// Error unless `lower <= value <= upper`.
pub fn in_range(value: f64, lower: f64, upper: f64, name: &str) -> Option<ValidationIssue> {
    if value >= lower && value <= upper {
        None
    } else {
        Some(ValidationIssue::error(format!(
            "{name} must be in range [{lower}, {upper}]."
        )))
    }
}

/// Error unless `lower < value < upper`.
pub fn in_open_range(value: f64, lower: f64, upper: f64, name: &str) -> Option<ValidationIssue> {
    if value > lower && value < upper {
        None
    } else {
        Some(ValidationIssue::error(format!(
            "{name} must be in range ({lower}, {upper})."
        )))
    }
}

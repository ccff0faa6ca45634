//! Collector for classified messages raised during validation and calculation.
//!
//! The collector is an explicit object handed to every `validate` call rather
//! than process-wide state. Registration takes `&self` and is safe from many
//! threads at once; [`Diagnostics::drain`] hands the collected events over in
//! one step at a phase boundary.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Severity of a diagnostic event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "Warning"),
            Severity::Error => write!(f, "Error"),
        }
    }
}

/// A single message with its severity.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    pub message: String,
    pub severity: Severity,
}

impl Event {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

/// Append-only event sink.
#[derive(Debug, Default)]
pub struct Diagnostics {
    events: Mutex<Vec<Event>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Event>> {
        // A panic while holding the lock cannot leave a Vec half-pushed.
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn register(&self, event: Event) {
        self.lock().push(event);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.register(Event::warning(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.register(Event::error(message));
    }

    /// Append a batch collected elsewhere, keeping its order contiguous.
    pub fn extend(&self, events: impl IntoIterator<Item = Event>) {
        self.lock().extend(events);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.lock().iter().any(Event::is_error)
    }

    /// Take every event registered so far, leaving the sink empty.
    pub fn drain(&self) -> Vec<Event> {
        std::mem::take(&mut *self.lock())
    }
}

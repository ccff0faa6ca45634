//! Operational log messages, kept apart from diagnostics.
//!
//! Diagnostics describe the input and travel back with the result. Log
//! messages describe the run itself and go wherever the handler sends them.

use std::sync::{Mutex, PoisonError};

use tracing::{error, info, warn};

/// Receiver of operational messages.
pub trait LogHandler: Send + Sync {
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards every message to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogHandler;

impl LogHandler for TracingLogHandler {
    fn info(&self, message: &str) {
        info!(target: "dikeflow", "{message}");
    }

    fn warning(&self, message: &str) {
        warn!(target: "dikeflow", "{message}");
    }

    fn error(&self, message: &str) {
        error!(target: "dikeflow", "{message}");
    }
}

/// Severity of a recorded log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

/// Keeps every message in memory.
#[derive(Debug, Default)]
pub struct RecordingLogHandler {
    messages: Mutex<Vec<(LogLevel, String)>>,
}

impl RecordingLogHandler {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, level: LogLevel, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((level, message.to_owned()));
    }

    pub fn messages(&self) -> Vec<(LogLevel, String)> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl LogHandler for RecordingLogHandler {
    fn info(&self, message: &str) {
        self.push(LogLevel::Info, message);
    }

    fn warning(&self, message: &str) {
        self.push(LogLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.push(LogLevel::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_handler_keeps_order() {
        let handler = RecordingLogHandler::new();
        handler.info("start");
        handler.warning("slow");
        handler.error("stop");
        assert_eq!(
            handler.messages(),
            vec![
                (LogLevel::Info, "start".to_owned()),
                (LogLevel::Warning, "slow".to_owned()),
                (LogLevel::Error, "stop".to_owned()),
            ]
        );
    }

    #[test]
    fn tracing_handler_is_usable_without_subscriber() {
        let handler = TracingLogHandler;
        handler.info("no subscriber installed");
    }
}

//! Calculator configuration.

use std::fmt;
use std::sync::Arc;

use crate::log::{LogHandler, TracingLogHandler};

/// Receives the completed percentage (0-100), in increasing order.
pub type ProgressCallback = Arc<dyn Fn(u8) + Send + Sync>;

/// Polled between locations and between time steps; `true` stops the run.
pub type CancellationPredicate = Arc<dyn Fn() -> bool + Send + Sync>;

/// How a loop is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecutionMode {
    #[default]
    Sequential,
    Parallel,
}

/// Optional hooks of a calculation run.
#[derive(Clone)]
pub struct CalculatorSettings {
    pub progress: Option<ProgressCallback>,
    pub log_handler: Arc<dyn LogHandler>,
    pub cancellation: Option<CancellationPredicate>,
}

impl Default for CalculatorSettings {
    fn default() -> Self {
        Self {
            progress: None,
            log_handler: Arc::new(TracingLogHandler),
            cancellation: None,
        }
    }
}

impl fmt::Debug for CalculatorSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalculatorSettings")
            .field("progress", &self.progress.is_some())
            .field("cancellation", &self.cancellation.is_some())
            .finish_non_exhaustive()
    }
}

impl CalculatorSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_progress(mut self, progress: impl Fn(u8) + Send + Sync + 'static) -> Self {
        self.progress = Some(Arc::new(progress));
        self
    }

    pub fn with_log_handler(mut self, handler: Arc<dyn LogHandler>) -> Self {
        self.log_handler = handler;
        self
    }

    pub fn with_cancellation(mut self, cancelled: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.cancellation = Some(Arc::new(cancelled));
        self
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancellation.as_ref().is_some_and(|cancelled| cancelled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn defaults_have_no_hooks() {
        let settings = CalculatorSettings::default();
        assert!(settings.progress.is_none());
        assert!(!settings.is_cancelled());
        assert_eq!(ExecutionMode::default(), ExecutionMode::Sequential);
    }

    #[test]
    fn cancellation_is_polled_live() {
        let flag = Arc::new(AtomicBool::new(false));
        let probe = Arc::clone(&flag);
        let settings =
            CalculatorSettings::new().with_cancellation(move || probe.load(Ordering::Relaxed));
        assert!(!settings.is_cancelled());
        flag.store(true, Ordering::Relaxed);
        assert!(settings.is_cancelled());
    }
}

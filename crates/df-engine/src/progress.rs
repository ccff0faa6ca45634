//! Monotone percentage reporting over the location x step workload.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::settings::ProgressCallback;

/// Counts completed evaluations and reports each new whole percentage once.
///
/// Safe to advance from many threads. The callback runs under a lock so the
/// reported values arrive in increasing order.
pub struct ProgressTracker<'a> {
    total: usize,
    done: AtomicUsize,
    reported: Mutex<u8>,
    callback: Option<&'a ProgressCallback>,
}

impl<'a> ProgressTracker<'a> {
    pub fn new(total: usize, callback: Option<&'a ProgressCallback>) -> Self {
        Self {
            total,
            done: AtomicUsize::new(0),
            reported: Mutex::new(0),
            callback,
        }
    }

    fn percentage(&self, done: usize) -> u8 {
        if self.total == 0 {
            return 100;
        }
        // done <= total, so the quotient is at most 100
        ((done.min(self.total) * 100) / self.total) as u8
    }

    /// Record `count` finished evaluations.
    pub fn advance(&self, count: usize) {
        let done = self.done.fetch_add(count, Ordering::AcqRel) + count;
        let percentage = self.percentage(done);
        let mut reported = self.reported.lock().unwrap_or_else(PoisonError::into_inner);
        if percentage > *reported {
            *reported = percentage;
            if let Some(callback) = self.callback {
                callback(percentage);
            }
        }
    }

    pub fn completed(&self) -> usize {
        self.done.load(Ordering::Acquire)
    }

    pub fn reported(&self) -> u8 {
        *self.reported.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder() -> (Arc<Mutex<Vec<u8>>>, ProgressCallback) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: ProgressCallback = Arc::new(move |p| sink.lock().unwrap().push(p));
        (seen, callback)
    }

    #[test]
    fn reports_each_percentage_once() {
        let (seen, callback) = recorder();
        let tracker = ProgressTracker::new(8, Some(&callback));
        for _ in 0..8 {
            tracker.advance(1);
        }
        assert_eq!(*seen.lock().unwrap(), vec![12, 25, 37, 50, 62, 75, 87, 100]);
        assert_eq!(tracker.completed(), 8);
    }

    #[test]
    fn coarse_steps_skip_intermediate_values() {
        let (seen, callback) = recorder();
        let tracker = ProgressTracker::new(1000, Some(&callback));
        tracker.advance(3);
        tracker.advance(500);
        tracker.advance(497);
        assert_eq!(*seen.lock().unwrap(), vec![50, 100]);
    }

    #[test]
    fn concurrent_advances_stay_monotone() {
        let (seen, callback) = recorder();
        let tracker = ProgressTracker::new(4000, Some(&callback));
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..1000 {
                        tracker.advance(1);
                    }
                });
            }
        });
        let seen = seen.lock().unwrap();
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(seen.last(), Some(&100));
        assert_eq!(tracker.reported(), 100);
    }
}

//! Once-only storage for profile-derived constants.

use std::sync::OnceLock;

use crate::error::{LocationError, LocationResult};

/// Holds a location's derived block.
///
/// The block is computed at most once per successful initialization; a
/// failed computation leaves the cell empty. Reading an empty cell is a
/// [`LocationError::NotInitialized`] fault.
#[derive(Debug, Clone)]
pub struct DerivedCell<T>(OnceLock<T>);

impl<T> Default for DerivedCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DerivedCell<T> {
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    pub fn is_initialized(&self) -> bool {
        self.0.get().is_some()
    }

    /// Return the stored block, computing it with `init` if the cell is empty.
    ///
    /// When two threads race, both may run `init` but only the first result
    /// is kept; the loser's value is dropped.
    pub fn get_or_try_init(&self, init: impl FnOnce() -> LocationResult<T>) -> LocationResult<&T> {
        if let Some(value) = self.0.get() {
            return Ok(value);
        }
        let value = init()?;
        Ok(self.0.get_or_init(|| value))
    }

    /// Read the block of the location at `x`.
    pub fn get(&self, x: f64) -> LocationResult<&T> {
        self.0.get().ok_or(LocationError::NotInitialized { x })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn read_before_init_fails() {
        let cell: DerivedCell<f64> = DerivedCell::new();
        assert_eq!(cell.get(3.0), Err(LocationError::NotInitialized { x: 3.0 }));
    }

    #[test]
    fn init_runs_once() {
        let calls = Cell::new(0);
        let cell = DerivedCell::new();
        for _ in 0..3 {
            let value = cell
                .get_or_try_init(|| {
                    calls.set(calls.get() + 1);
                    Ok(7.0)
                })
                .unwrap();
            assert_eq!(*value, 7.0);
        }
        assert_eq!(calls.get(), 1);
        assert_eq!(cell.get(0.0), Ok(&7.0));
    }

    #[test]
    fn failed_init_leaves_cell_empty() {
        let cell: DerivedCell<f64> = DerivedCell::new();
        let err = cell.get_or_try_init(|| {
            Err(LocationError::NonFinite {
                what: "height",
                value: f64::NAN,
            })
        });
        assert!(err.is_err());
        assert!(!cell.is_initialized());
    }
}

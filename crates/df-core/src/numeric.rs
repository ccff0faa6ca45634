use crate::DfError;

/// Floating point type used by every formula.
pub type Real = f64;

/// Absolute and relative tolerance pair for float comparisons.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-12,
        }
    }
}

impl Tolerances {
    /// Relative-only comparison, used for reference vectors.
    pub const fn relative(rel: Real) -> Self {
        Self { abs: 0.0, rel }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    if a == b {
        return true;
    }
    if !a.is_finite() || !b.is_finite() {
        return false;
    }
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, DfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(DfError::NonFinite { what, value: v })
    }
}

/// Linear interpolation of `y` at `x` between `(x0, y0)` and `(x1, y1)`.
///
/// Callers guarantee `x0 != x1`.
#[inline]
pub fn interpolate(x0: Real, y0: Real, x1: Real, y1: Real, x: Real) -> Real {
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}

/// Inclusive range test that is false for NaN.
#[inline]
pub fn in_closed_range(value: Real, lower: Real, upper: Real) -> bool {
    value >= lower && value <= upper
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn nearly_equal_handles_infinities() {
        let tol = Tolerances::default();
        assert!(nearly_equal(Real::INFINITY, Real::INFINITY, tol));
        assert!(!nearly_equal(Real::INFINITY, 1.0, tol));
        assert!(!nearly_equal(Real::NAN, Real::NAN, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        assert!(format!("{err}").contains("Non-finite"));
    }

    #[test]
    fn interpolate_midpoint() {
        assert_eq!(interpolate(0.0, 1.0, 2.0, 3.0, 1.0), 2.0);
        assert_eq!(interpolate(0.0, 1.0, 2.0, 3.0, 2.0), 3.0);
    }

    #[test]
    fn closed_range_rejects_nan() {
        assert!(in_closed_range(0.5, 0.5, 1.0));
        assert!(in_closed_range(1.0, 0.5, 1.0));
        assert!(!in_closed_range(Real::NAN, 0.5, 1.0));
    }
}

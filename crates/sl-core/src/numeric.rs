use crate::SlError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, SlError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(SlError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, SlError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(SlError::OutOfRange { what, value: v })
    }
}

/// Finite and not below zero.
pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, SlError> {
    let v = ensure_finite(v, what)?;
    if v >= 0.0 {
        Ok(v)
    } else {
        Err(SlError::OutOfRange { what, value: v })
    }
}

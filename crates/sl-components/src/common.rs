//! Common utilities for component calculations.

use crate::error::{ComponentError, ComponentResult};
use sl_core::numeric::{Real, ensure_finite};

/// Smallest pivot magnitude accepted by the tridiagonal solver.
pub const MIN_PIVOT: Real = 1e-300;

/// Ensure a value is finite, returning ComponentError if not.
pub fn check_finite(value: Real, what: &'static str) -> ComponentResult<()> {
    ensure_finite(value, what).map_err(|_| ComponentError::NonPhysical { what })?;
    Ok(())
}

/// Ensure every cell of a temperature profile is finite.
pub fn check_profile(profile: &[Real], what: &'static str) -> ComponentResult<()> {
    profile.iter().try_for_each(|&t| check_finite(t, what))
}

/// A discretized component needs at least one cell.
pub fn check_cells(cells: usize) -> ComponentResult<usize> {
    if cells == 0 {
        return Err(ComponentError::InvalidArg {
            what: "cell count must be at least 1",
        });
    }
    Ok(cells)
}

/// Cross-section area of a circular channel.
pub fn circle_area(radius: Real) -> Real {
    std::f64::consts::PI * radius * radius
}

//! Direct solver for tridiagonal linear systems.

use crate::common::MIN_PIVOT;
use crate::error::{ComponentError, ComponentResult};
use sl_core::numeric::Real;

/// Tridiagonal system `A·x = rhs` stored by diagonals.
///
/// Row `i` reads `sub[i]·x[i-1] + diag[i]·x[i] + sup[i]·x[i+1] = rhs[i]`;
/// `sub[0]` and `sup[n-1]` are ignored.
#[derive(Debug, Clone)]
pub struct TridiagonalSystem {
    sub: Vec<Real>,
    diag: Vec<Real>,
    sup: Vec<Real>,
    rhs: Vec<Real>,
}

impl TridiagonalSystem {
    /// All-zero system with `n` rows.
    pub fn new(n: usize) -> Self {
        Self {
            sub: vec![0.0; n],
            diag: vec![0.0; n],
            sup: vec![0.0; n],
            rhs: vec![0.0; n],
        }
    }

    pub fn len(&self) -> usize {
        self.diag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diag.is_empty()
    }

    /// Set the coefficients and right-hand side of row `i`.
    ///
    /// Panics if `i` is out of range.
    pub fn set_row(&mut self, i: usize, sub: Real, diag: Real, sup: Real, rhs: Real) {
        self.sub[i] = sub;
        self.diag[i] = diag;
        self.sup[i] = sup;
        self.rhs[i] = rhs;
    }

    /// Solve with the Thomas algorithm (forward elimination, back substitution).
    ///
    /// No pivoting; the systems built by loop components are diagonally
    /// dominant. A vanishing or non-finite pivot is reported as
    /// `SingularSystem`.
    pub fn solve(self) -> ComponentResult<Vec<Real>> {
        let Self {
            sub,
            mut diag,
            sup,
            mut rhs,
        } = self;
        let n = diag.len();
        if n == 0 {
            return Ok(rhs);
        }

        check_pivot(diag[0], 0)?;

        // Forward elimination
        for i in 1..n {
            let w = sub[i] / diag[i - 1];
            diag[i] -= w * sup[i - 1];
            rhs[i] -= w * rhs[i - 1];
            check_pivot(diag[i], i)?;
        }

        // Back substitution
        rhs[n - 1] /= diag[n - 1];
        for i in (0..n - 1).rev() {
            rhs[i] = (rhs[i] - sup[i] * rhs[i + 1]) / diag[i];
        }

        Ok(rhs)
    }
}

fn check_pivot(pivot: Real, row: usize) -> ComponentResult<()> {
    if pivot.is_finite() && pivot.abs() > MIN_PIVOT {
        Ok(())
    } else {
        Err(ComponentError::SingularSystem { row })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use sl_core::numeric::{Tolerances, nearly_equal};

    #[test]
    fn solves_symmetric_system() {
        // [2 -1 0; -1 2 -1; 0 -1 2] x = [0 0 4]  =>  x = [1 2 3]
        let mut sys = TridiagonalSystem::new(3);
        sys.set_row(0, 0.0, 2.0, -1.0, 0.0);
        sys.set_row(1, -1.0, 2.0, -1.0, 0.0);
        sys.set_row(2, -1.0, 2.0, 0.0, 4.0);

        let x = sys.solve().unwrap();
        let tol = Tolerances::default();
        for (got, want) in x.iter().zip([1.0, 2.0, 3.0]) {
            assert!(nearly_equal(*got, want, tol), "{got} != {want}");
        }
    }

    #[test]
    fn solves_lower_bidiagonal_system() {
        // upwind rows 1.5 x[i] - 0.5 x[i-1] = 10 with x[0] = 10 keep every cell at 10
        let mut sys = TridiagonalSystem::new(3);
        sys.set_row(0, 0.0, 1.0, 0.0, 10.0);
        sys.set_row(1, -0.5, 1.5, 0.0, 10.0);
        sys.set_row(2, -0.5, 1.5, 0.0, 10.0);

        let x = sys.solve().unwrap();
        let tol = Tolerances::default();
        assert!(x.iter().all(|&v| nearly_equal(v, 10.0, tol)));
    }

    #[test]
    fn zero_pivot_is_singular() {
        let mut sys = TridiagonalSystem::new(2);
        sys.set_row(0, 0.0, 1.0, 1.0, 1.0);
        sys.set_row(1, 1.0, 1.0, 0.0, 1.0);
        assert_eq!(sys.solve(), Err(ComponentError::SingularSystem { row: 1 }));
    }

    #[test]
    fn empty_system_has_empty_solution() {
        assert!(TridiagonalSystem::new(0).solve().unwrap().is_empty());
    }

    proptest! {
        #[test]
        fn diagonally_dominant_residual_is_small(
            rows in prop::collection::vec((-1.0_f64..1.0, -1.0_f64..1.0, -100.0_f64..100.0), 1..30)
        ) {
            let n = rows.len();
            let mut sys = TridiagonalSystem::new(n);
            let mut coeffs = Vec::with_capacity(n);
            for (i, &(lo, up, b)) in rows.iter().enumerate() {
                let lo = if i == 0 { 0.0 } else { lo };
                let up = if i + 1 == n { 0.0 } else { up };
                let d = 1.0 + lo.abs() + up.abs();
                sys.set_row(i, lo, d, up, b);
                coeffs.push((lo, d, up, b));
            }

            let x = sys.solve().unwrap();
            for (i, &(lo, d, up, b)) in coeffs.iter().enumerate() {
                let mut r = d * x[i] - b;
                if i > 0 {
                    r += lo * x[i - 1];
                }
                if i + 1 < n {
                    r += up * x[i + 1];
                }
                prop_assert!(r.abs() < 1e-9, "row {} residual {}", i, r);
            }
        }
    }
}

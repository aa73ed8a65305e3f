// ─────────────────────────────────────────────────────────────────────
// TriSolve — System
// License: MIT
// ─────────────────────────────────────────────────────────────────────
use crate::error::{SolverError, SolverResult};

/// A tridiagonal linear system Ax = rhs held as four same-length vectors.
///
/// Conventions match the solver kernels: `sub[0]` and `sup[n-1]` are unused
/// and expected to be 0. `diag[i] != 0` throughout elimination is an
/// unchecked precondition (no pivoting is performed anywhere).
#[derive(Debug, Clone)]
pub struct TridiagonalSystem {
    pub sub: Vec<f64>,
    pub diag: Vec<f64>,
    pub sup: Vec<f64>,
    pub rhs: Vec<f64>,
}

impl TridiagonalSystem {
    /// Build a system, validating that all four vectors share one
    /// non-zero length.
    pub fn new(
        sub: Vec<f64>,
        diag: Vec<f64>,
        sup: Vec<f64>,
        rhs: Vec<f64>,
    ) -> SolverResult<Self> {
        let n = diag.len();
        if n == 0 {
            return Err(SolverError::LengthMismatch(
                "system size must be >= 1".to_string(),
            ));
        }
        if sub.len() != n || sup.len() != n || rhs.len() != n {
            return Err(SolverError::LengthMismatch(format!(
                "sub={}, diag={}, super={}, rhs={}",
                sub.len(),
                n,
                sup.len(),
                rhs.len()
            )));
        }
        Ok(TridiagonalSystem {
            sub,
            diag,
            sup,
            rhs,
        })
    }

    pub fn n(&self) -> usize {
        self.diag.len()
    }

    /// Max-norm residual ||Ax - rhs||_inf for a candidate solution.
    pub fn residual_inf(&self, x: &[f64]) -> f64 {
        let n = self.n();
        let mut worst = 0.0f64;
        for i in 0..n {
            let mut ax = self.diag[i] * x[i];
            if i > 0 {
                ax += self.sub[i] * x[i - 1];
            }
            if i < n - 1 {
                ax += self.sup[i] * x[i + 1];
            }
            worst = worst.max((ax - self.rhs[i]).abs());
        }
        worst
    }
}

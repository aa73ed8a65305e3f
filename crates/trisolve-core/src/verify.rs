// ─────────────────────────────────────────────────────────────────────
// TriSolve — Verify
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! Verification oracle: re-solve the full system sequentially and compare
//! a worker's block element-wise, absolute tolerance per element.
//!
//! A mismatch is a correctness-check failure reported as `false`, not an
//! error — distinct from a crashed solve.

use ndarray::Array1;
use trisolve_math::thomas::thomas_solve;
use trisolve_types::system::TridiagonalSystem;

/// Default per-element absolute tolerance for parallel/sequential
/// comparison.
pub const DEFAULT_TOLERANCE: f64 = 1e-3;

/// Sequential reference solution of the full system.
pub fn sequential_reference(system: &TridiagonalSystem) -> Array1<f64> {
    Array1::from(thomas_solve(
        &system.sub,
        &system.diag,
        &system.sup,
        &system.rhs,
    ))
}

/// Compare one block of a parallel solution against the sequential
/// reference, starting at global index `start`.
pub fn check_block(system: &TridiagonalSystem, x_block: &[f64], start: usize, tol: f64) -> bool {
    if start + x_block.len() > system.n() {
        return false;
    }
    let reference = sequential_reference(system);
    x_block
        .iter()
        .enumerate()
        .all(|(i, &v)| (reference[start + i] - v).abs() <= tol)
}

/// Largest element-wise absolute difference between two vectors.
pub fn max_abs_error(a: &Array1<f64>, b: &Array1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0f64, f64::max)
}

// ─────────────────────────────────────────────────────────────────────
// TriSolve — Thomas
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! Thomas algorithm for tridiagonal systems.
//!
//! Serves double duty: the reference sequential solver for whole systems,
//! and the coordinator's solver for the 2P reduced boundary system.

/// Solve a tridiagonal system Ax = rhs in place, O(n).
///
/// - `sub`: sub-diagonal \[n\] (sub\[0\] unused)
/// - `diag`: main diagonal \[n\], overwritten by the forward sweep
/// - `sup`: super-diagonal \[n\] (sup\[n-1\] unused)
/// - `rhs`: right-hand side \[n\], overwritten by the forward sweep
///
/// Returns: solution vector x \[n\]
///
/// No pivoting. A zero or near-zero pivot is an unchecked precondition
/// violation and produces non-finite output downstream.
pub fn thomas_solve_in_place(
    sub: &[f64],
    diag: &mut [f64],
    sup: &[f64],
    rhs: &mut [f64],
) -> Vec<f64> {
    let n = rhs.len();
    assert!(n > 0, "System size must be > 0");
    assert_eq!(sub.len(), n);
    assert_eq!(diag.len(), n);
    assert_eq!(sup.len(), n);

    // Forward sweep: eliminate the sub-diagonal.
    for i in 1..n {
        let w = sub[i] / diag[i - 1];
        diag[i] -= w * sup[i - 1];
        rhs[i] -= w * rhs[i - 1];
    }

    // Backward sweep.
    let mut x = vec![0.0; n];
    x[n - 1] = rhs[n - 1] / diag[n - 1];
    for i in (0..n - 1).rev() {
        x[i] = (rhs[i] - sup[i] * x[i + 1]) / diag[i];
    }

    x
}

/// Non-destructive convenience wrapper around [`thomas_solve_in_place`].
pub fn thomas_solve(sub: &[f64], diag: &[f64], sup: &[f64], rhs: &[f64]) -> Vec<f64> {
    let mut diag = diag.to_vec();
    let mut rhs = rhs.to_vec();
    thomas_solve_in_place(sub, &mut diag, sup, &mut rhs)
}

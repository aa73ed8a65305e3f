// ─────────────────────────────────────────────────────────────────────
// TriSolve — Reduce
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! Local block reduction and back-substitution.
//!
//! [`reduce_block`] rewrites a contiguous block of a tridiagonal system so
//! every interior row depends only on the block's first and last unknowns.
//! Once those two boundary values are pinned down by the global reduced
//! solve, [`back_substitute`] recovers the interior in one pass.

/// Reduce a block in place so that, for every interior row i,
/// `x[i] = rhs[i] - sub[i] * x[0] - sup[i] * x[n-1]` holds once the
/// boundary unknowns are known.
///
/// After the call every `diag[i]` is exactly 1.0. Rows 0 and n-1 still
/// carry coupling to the neighbouring blocks: they are the block's two
/// boundary equations, resolved globally by the reduced solve.
///
/// No pivoting; a zero pivot is an unchecked precondition violation.
pub fn reduce_block(sub: &mut [f64], diag: &mut [f64], sup: &mut [f64], rhs: &mut [f64]) {
    let n = diag.len();
    assert!(n > 0, "Block size must be > 0");
    assert_eq!(sub.len(), n);
    assert_eq!(sup.len(), n);
    assert_eq!(rhs.len(), n);

    // Forward pass. Rows 0 and 1 retain their coupling to the external
    // left neighbour and are only normalized. From row 2 on, eliminating
    // against the previous row while folding the elimination into the
    // sub-diagonal itself (`sub[i] = -w * sub[i-1]`) re-expresses each
    // row in terms of row 0's coefficient chain.
    for i in 0..n {
        if i >= 2 {
            let w = sub[i] / diag[i - 1];
            diag[i] -= w * sup[i - 1];
            rhs[i] -= w * rhs[i - 1];
            sub[i] = -w * sub[i - 1];
        }
        sub[i] /= diag[i];
        sup[i] /= diag[i];
        rhs[i] /= diag[i];
        diag[i] = 1.0;
    }

    // Backward pass, from row n-3 down to row 0: eliminate the
    // super-diagonal so interior rows couple only to row n-1 on the
    // right. Row 0 is special: the general update would break its unit
    // diagonal (it absorbs sub[1] from below), so it re-normalizes the
    // whole row afterwards.
    for i in (0..n.saturating_sub(2)).rev() {
        let w = sup[i] / diag[i + 1];
        if i == 0 {
            diag[0] -= w * sub[1];
            rhs[0] = (rhs[0] - w * rhs[1]) / diag[0];
            sub[0] /= diag[0];
            sup[0] = -(w * sup[1]) / diag[0];
            diag[0] = 1.0;
        } else {
            rhs[i] -= w * rhs[i + 1];
            sub[i] -= w * sub[i + 1];
            sup[i] = -w * sup[i + 1];
        }
    }
}

/// Recover a block's unknowns from its reduced coefficients and the two
/// boundary values delivered by the coordinator.
pub fn back_substitute(
    sub: &[f64],
    sup: &[f64],
    rhs: &[f64],
    x_left: f64,
    x_right: f64,
) -> Vec<f64> {
    let n = rhs.len();
    assert!(n > 0, "Block size must be > 0");
    assert_eq!(sub.len(), n);
    assert_eq!(sup.len(), n);

    // A single-row block has one unknown; the reduced solve pins it down
    // as the block's right boundary value.
    if n == 1 {
        return vec![x_right];
    }

    let mut x = vec![0.0; n];
    x[0] = x_left;
    x[n - 1] = x_right;
    for i in 1..n - 1 {
        x[i] = rhs[i] - sub[i] * x_left - sup[i] * x_right;
    }
    x
}

// ─────────────────────────────────────────────────────────────────────
// TriSolve — Exchange
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! Boundary-row gather and boundary-value scatter.
//!
//! The two collectives of the algorithm: an all-to-one gather keyed by
//! rank that assembles the 2P reduced system, and a one-to-all scatter
//! keyed by rank that returns each worker's pair of boundary values.
//! These are serial reference implementations; the rank-order contract is
//! exactly what an MPI_Gather/MPI_Scatter port would preserve. Rank order
//! is load-bearing: row 2k's neighbours in the reduced system must be the
//! physically adjacent blocks' boundary rows.

use crate::partition::LocalBlock;
use trisolve_types::error::{SolverError, SolverResult};

/// The coordinator's 2P boundary system, rows 2k / 2k+1 holding worker
/// k's left / right boundary equations with unit diagonal.
#[derive(Debug, Clone)]
pub struct ReducedSystem {
    pub sub: Vec<f64>,
    pub diag: Vec<f64>,
    pub sup: Vec<f64>,
    pub rhs: Vec<f64>,
}

impl ReducedSystem {
    pub fn size(&self) -> usize {
        self.diag.len()
    }
}

/// Collect every worker's first and last reduced rows, in rank order.
///
/// The diagonal is fixed to 1 for all rows (the reducer normalizes every
/// row), so only the `(sub, super, rhs)` triples travel. Non-finite
/// triples are rejected: a NaN here means a zero pivot upstream, and it
/// is reported at the seam instead of silently poisoning the reduced
/// solve.
pub fn gather_boundary_rows(locals: &[LocalBlock]) -> SolverResult<ReducedSystem> {
    if locals.is_empty() {
        return Err(SolverError::InvalidPartition(
            "gather requires at least one worker".to_string(),
        ));
    }

    let m = 2 * locals.len();
    let mut sub = Vec::with_capacity(m);
    let mut sup = Vec::with_capacity(m);
    let mut rhs = Vec::with_capacity(m);

    for (rank, block) in locals.iter().enumerate() {
        if block.range.rank != rank {
            return Err(SolverError::InvalidPartition(format!(
                "gather out of rank order: expected {rank}, got {}",
                block.range.rank
            )));
        }
        let n = block.diag.len();
        let first = [block.sub[0], block.sup[0], block.rhs[0]];
        let last = [block.sub[n - 1], block.sup[n - 1], block.rhs[n - 1]];
        if first.iter().chain(last.iter()).any(|v| !v.is_finite()) {
            return Err(SolverError::NonFinite(format!(
                "boundary row of rank {rank} (zero pivot during reduction?)"
            )));
        }
        sub.push(first[0]);
        sub.push(last[0]);
        sup.push(first[1]);
        sup.push(last[1]);
        rhs.push(first[2]);
        rhs.push(last[2]);
    }

    Ok(ReducedSystem {
        sub,
        diag: vec![1.0; m],
        sup,
        rhs,
    })
}

/// Split the reduced solution into per-worker `(x_left, x_right)` pairs,
/// rank order preserved.
pub fn scatter_boundary_values(x: &[f64], nranks: usize) -> SolverResult<Vec<(f64, f64)>> {
    if x.len() != 2 * nranks {
        return Err(SolverError::LengthMismatch(format!(
            "reduced solution has {} values, expected {}",
            x.len(),
            2 * nranks
        )));
    }
    Ok((0..nranks).map(|k| (x[2 * k], x[2 * k + 1])).collect())
}

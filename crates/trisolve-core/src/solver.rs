// ─────────────────────────────────────────────────────────────────────
// TriSolve — Solver
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! The bulk-synchronous parallel driver.
//!
//! Control flow: local block reduction → boundary-row gather → reduced
//! solve at the coordinator → boundary-value scatter → local
//! back-substitution. The two rayon fork-joins are the algorithm's two
//! global synchronization points: no boundary row is gathered before
//! every block finished reducing, and no interior unknown is computed
//! before every boundary value is known.

use ndarray::Array1;
use rayon::prelude::*;

use crate::distribute::{load_blocks, load_system};
use crate::exchange::{gather_boundary_rows, scatter_boundary_values};
use crate::partition::{partition, split_blocks, stitch_solution, BlockRange, LocalBlock};
use crate::verify::{max_abs_error, sequential_reference};
use trisolve_math::reduce::{back_substitute, reduce_block};
use trisolve_math::thomas::thomas_solve_in_place;
use trisolve_types::config::RunConfig;
use trisolve_types::error::SolverResult;
use trisolve_types::system::TridiagonalSystem;

/// Solve a tridiagonal system with `nworkers` cooperating workers.
///
/// With `nworkers == 1` the reduced system is a trivial 2-row system and
/// the result matches the sequential kernel. Fails fast: any worker's
/// error aborts the whole solve.
pub fn parallel_solve(system: &TridiagonalSystem, nworkers: usize) -> SolverResult<Array1<f64>> {
    let ranges = partition(system.n(), nworkers)?;
    let locals = split_blocks(system, &ranges)?;
    solve_blocks(&ranges, locals)
}

/// Run the reduce/gather/solve/scatter/back-substitute pipeline over
/// already-distributed blocks.
pub fn solve_blocks(ranges: &[BlockRange], mut locals: Vec<LocalBlock>) -> SolverResult<Array1<f64>> {
    let nworkers = ranges.len();

    // Step 2: every worker reduces its block in place. The join is the
    // first global synchronization point.
    locals.par_iter_mut().for_each(|b| {
        reduce_block(&mut b.sub, &mut b.diag, &mut b.sup, &mut b.rhs);
    });

    // Steps 3-4: rank-ordered gather, then the coordinator alone solves
    // the 2P boundary system with the sequential kernel.
    let mut reduced = gather_boundary_rows(&locals)?;
    let boundary = thomas_solve_in_place(
        &reduced.sub,
        &mut reduced.diag,
        &reduced.sup,
        &mut reduced.rhs,
    );

    // Step 5: scatter each worker's (x_left, x_right) pair back.
    let pairs = scatter_boundary_values(&boundary, nworkers)?;

    // Step 6: back-substitution, the second synchronization point.
    let pieces: Vec<Vec<f64>> = locals
        .par_iter()
        .zip(pairs.par_iter())
        .map(|(b, &(x_left, x_right))| back_substitute(&b.sub, &b.sup, &b.rhs, x_left, x_right))
        .collect();

    stitch_solution(&pieces, ranges)
}

/// Outcome of a configured end-to-end run.
#[derive(Debug, Clone)]
pub struct SolveReport {
    pub x: Array1<f64>,
    /// Whether the parallel solution matched the sequential oracle
    /// within the configured tolerance.
    pub verified: bool,
    pub max_abs_error: f64,
}

/// Stream the vector files named by `cfg` into per-worker blocks, run
/// the parallel solver, and verify the full solution against the
/// sequential oracle.
///
/// The solve path never holds a full coefficient vector: blocks are
/// streamed straight off disk. The oracle re-reads the files on its own
/// to solve the whole system sequentially.
///
/// A verification mismatch is not an error: it is reported in the
/// returned [`SolveReport`], distinct from a failed solve.
pub fn solve_from_config(cfg: &RunConfig) -> SolverResult<SolveReport> {
    let (ranges, locals) = load_blocks(&cfg.vectors, cfg.workers)?;
    let x = solve_blocks(&ranges, locals)?;

    let system = load_system(&cfg.vectors)?;
    let reference = sequential_reference(&system);
    let err = max_abs_error(&x, &reference);

    Ok(SolveReport {
        x,
        verified: err <= cfg.tolerance,
        max_abs_error: err,
    })
}

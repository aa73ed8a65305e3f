// ─────────────────────────────────────────────────────────────────────
// TriSolve — Core
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! Domain-decomposed direct solver for tridiagonal systems.
//!
//! Each worker reduces its contiguous block so interior unknowns become
//! affine in the block's two boundary unknowns; a rank-ordered gather
//! assembles one reduced system of size 2P at the coordinator; solving it
//! pins down every boundary value, which a rank-ordered scatter returns
//! for local back-substitution. The rayon threadpool stands in for
//! distributed-memory ranks; the collectives are serial reference
//! implementations with the same ordering contract an MPI port would keep.

pub mod distribute;
pub mod exchange;
pub mod partition;
pub mod solver;
pub mod verify;

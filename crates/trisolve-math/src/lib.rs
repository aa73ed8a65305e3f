//! Numerical kernels for the domain-decomposed tridiagonal solver.

pub mod reduce;
pub mod thomas;

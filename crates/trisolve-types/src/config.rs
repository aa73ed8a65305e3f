// ─────────────────────────────────────────────────────────────────────
// TriSolve — Config
// License: MIT
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

/// Top-level run configuration.
/// Maps 1:1 to solver_config.json at the repository root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub vectors: VectorPaths,
    /// Number of cooperating workers (blocks) for the parallel solve.
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Absolute per-element tolerance for the verification oracle.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

/// Paths of the four coefficient-vector files, one file per diagonal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorPaths {
    pub sub: String,
    pub diag: String,
    #[serde(rename = "super")]
    pub sup: String,
    pub rhs: String,
}

fn default_workers() -> usize {
    4
}
fn default_tolerance() -> f64 {
    1e-3
}

impl RunConfig {
    /// Load from JSON file.
    pub fn from_file(path: &str) -> crate::error::SolverResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

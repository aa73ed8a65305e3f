// ─────────────────────────────────────────────────────────────────────
// TriSolve — Property-Based Tests (proptest) for trisolve-core
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! Covers: partition invariants, parallel/sequential equivalence for
//! arbitrary system sizes and worker counts, and the configured
//! end-to-end path over the repository's fixture data.

use proptest::prelude::*;
use std::path::PathBuf;
use trisolve_core::distribute::{generate_system, vector_paths_in, write_system};
use trisolve_core::partition::partition;
use trisolve_core::solver::{parallel_solve, solve_from_config};
use trisolve_core::verify::{max_abs_error, sequential_reference, DEFAULT_TOLERANCE};
use trisolve_types::config::RunConfig;

// ── Partition Properties ─────────────────────────────────────────────

proptest! {
    /// Accepted splits sum to N, are contiguous, give every rank past
    /// the first at least two rows, and keep the last block at least as
    /// large as every other. Rejected splits are exactly those where
    /// the floor formula would hand a rank past the first a single row.
    #[test]
    fn partition_invariants(n in 1usize..500, p in 1usize..32) {
        prop_assume!(p <= n);
        match partition(n, p) {
            Ok(ranges) => {
                let total: usize = ranges.iter().map(|r| r.len()).sum();
                prop_assert_eq!(total, n);

                prop_assert_eq!(ranges[0].start, 0);
                prop_assert_eq!(ranges[p - 1].end, n);
                for w in ranges.windows(2) {
                    prop_assert_eq!(w[0].end, w[1].start);
                }

                let last = ranges[p - 1].len();
                for r in &ranges {
                    prop_assert!(r.len() <= last,
                        "rank {} owns {} rows, last rank owns {}", r.rank, r.len(), last);
                    prop_assert!(r.rank == 0 || r.len() >= 2,
                        "rank {} owns only {} rows", r.rank, r.len());
                }
            }
            Err(_) => {
                let low = |k: usize| k * n / p;
                let has_thin_block = (1..p).any(|k| low(k + 1) - low(k) < 2);
                prop_assert!(has_thin_block,
                    "partition({}, {}) rejected without a thin block", n, p);
            }
        }
    }

    /// N < P is always rejected.
    #[test]
    fn partition_rejects_oversubscription(n in 1usize..40, extra in 1usize..40) {
        prop_assert!(partition(n, n + extra).is_err());
    }
}

// ── Parallel/Sequential Equivalence ──────────────────────────────────

proptest! {
    /// For any well-conditioned system and any worker count with blocks
    /// of at least two rows, the parallel solution equals the sequential
    /// one within the verification tolerance.
    #[test]
    fn parallel_matches_sequential(p in 1usize..8, extra in 0usize..60, seed in 0u64..1000) {
        let n = 2 * p + extra;
        let sys = generate_system(n, seed).unwrap();

        let x_ref = sequential_reference(&sys);
        let x = parallel_solve(&sys, p).unwrap();

        let err = max_abs_error(&x, &x_ref);
        prop_assert!(err < DEFAULT_TOLERANCE,
            "n={}, p={}, seed={}: max error {}", n, p, seed, err);
    }

    /// The parallel solution actually solves the system.
    #[test]
    fn parallel_solution_has_small_residual(p in 1usize..6, extra in 0usize..40, seed in 0u64..500) {
        let n = 2 * p + extra;
        let sys = generate_system(n, seed).unwrap();
        let x = parallel_solve(&sys, p).unwrap();
        let res = sys.residual_inf(&x.to_vec());
        prop_assert!(res < 1e-6, "n={}, p={}: residual {}", n, p, res);
    }
}

// ── Configured End-to-End Run ────────────────────────────────────────

fn project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

#[test]
fn test_solve_from_repo_fixture_config() {
    let root = project_root();
    let cfg_path = root.join("solver_config.json").to_string_lossy().to_string();
    let mut cfg = RunConfig::from_file(&cfg_path).unwrap();

    // Fixture paths are relative to the repository root.
    let rebase = |p: &str| root.join(p).to_string_lossy().to_string();
    cfg.vectors.sub = rebase(&cfg.vectors.sub);
    cfg.vectors.diag = rebase(&cfg.vectors.diag);
    cfg.vectors.sup = rebase(&cfg.vectors.sup);
    cfg.vectors.rhs = rebase(&cfg.vectors.rhs);

    let report = solve_from_config(&cfg).unwrap();
    assert!(report.verified, "fixture run failed verification");
    assert!(report.max_abs_error < cfg.tolerance);
    assert_eq!(report.x.len(), 8);
}

#[test]
fn test_streamed_blocks_match_in_memory_solve() {
    // solve_from_config streams blocks straight off disk; the result
    // must agree with solving the same system held in memory.
    let dir = std::env::temp_dir().join(format!("trisolve-e2e-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let paths = vector_paths_in(&dir);
    let sys = generate_system(37, 8).unwrap();
    write_system(&sys, &paths).unwrap();

    let cfg = RunConfig {
        vectors: paths,
        workers: 3,
        tolerance: DEFAULT_TOLERANCE,
    };
    let report = solve_from_config(&cfg).unwrap();
    assert!(report.verified);

    let x = parallel_solve(&sys, 3).unwrap();
    let err = max_abs_error(&report.x, &x);
    assert!(err < 1e-12, "streamed and in-memory paths disagree: {err}");
}

#[test]
fn test_unbalanced_small_system_all_worker_counts() {
    // N = 5 with P = 1..=3 (P = 3 exercises a size-1 leading block).
    let sys = generate_system(5, 99).unwrap();
    let x_ref = sequential_reference(&sys);
    for p in 1..=3 {
        let x = parallel_solve(&sys, p).unwrap();
        let err = max_abs_error(&x, &x_ref);
        assert!(err < DEFAULT_TOLERANCE, "p={p}: max error {err}");
    }
}

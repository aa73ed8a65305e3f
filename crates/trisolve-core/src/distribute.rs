// ─────────────────────────────────────────────────────────────────────
// TriSolve — Distribute
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! The data-distribution service: plain-text vector files in, per-rank
//! chunks out.
//!
//! File format: first token an integer N, then N whitespace-separated
//! floating-point values; one file per coefficient vector. The reader
//! streams tokens, so handing out chunks in rank order never buffers
//! more than one block at a time — the partition guarantees the last
//! block is the largest, which bounds the chunk buffer.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Lines, Write};
use std::path::Path;

use crate::partition::{partition, BlockRange, LocalBlock};
use trisolve_types::config::VectorPaths;
use trisolve_types::error::{SolverError, SolverResult};
use trisolve_types::system::TridiagonalSystem;

/// Streaming token reader over one vector file.
pub struct VectorReader {
    path: String,
    lines: Lines<BufReader<File>>,
    pending: std::collections::VecDeque<String>,
}

impl VectorReader {
    pub fn open(path: &str) -> SolverResult<Self> {
        let file = File::open(path).map_err(|e| SolverError::MalformedInput {
            path: path.to_string(),
            message: format!("cannot open: {e}"),
        })?;
        Ok(VectorReader {
            path: path.to_string(),
            lines: BufReader::new(file).lines(),
            pending: std::collections::VecDeque::new(),
        })
    }

    fn malformed(&self, message: impl Into<String>) -> SolverError {
        SolverError::MalformedInput {
            path: self.path.clone(),
            message: message.into(),
        }
    }

    fn next_token(&mut self) -> SolverResult<String> {
        loop {
            if let Some(tok) = self.pending.pop_front() {
                return Ok(tok);
            }
            match self.lines.next() {
                Some(line) => {
                    let line = line?;
                    self.pending
                        .extend(line.split_whitespace().map(String::from));
                }
                None => return Err(self.malformed("unexpected end of file")),
            }
        }
    }

    /// Read the leading length token.
    pub fn read_len(&mut self) -> SolverResult<usize> {
        let tok = self.next_token()?;
        tok.parse::<usize>()
            .map_err(|_| self.malformed(format!("bad length token '{tok}'")))
    }

    /// Read the next `len` values.
    pub fn read_chunk(&mut self, len: usize) -> SolverResult<Vec<f64>> {
        let mut out = Vec::with_capacity(len);
        for _ in 0..len {
            let tok = self.next_token()?;
            let v = tok
                .parse::<f64>()
                .map_err(|_| self.malformed(format!("bad numeric token '{tok}'")))?;
            out.push(v);
        }
        Ok(out)
    }
}

/// Read one whole vector file.
pub fn read_vector(path: &str) -> SolverResult<(usize, Vec<f64>)> {
    let mut reader = VectorReader::open(path)?;
    let n = reader.read_len()?;
    if n == 0 {
        return Err(SolverError::MalformedInput {
            path: path.to_string(),
            message: "declared length is 0".to_string(),
        });
    }
    let v = reader.read_chunk(n)?;
    Ok((n, v))
}

/// Stream the four vector files directly into per-rank blocks.
///
/// This is the production distribution path: one sequential pass over
/// each file, one chunk in flight per vector, so memory for the solve
/// stays bounded by the largest (last) block. The full vectors are never
/// materialized here; only the verification oracle does that, by
/// re-reading the files on its own.
pub fn load_blocks(
    paths: &VectorPaths,
    nworkers: usize,
) -> SolverResult<(Vec<BlockRange>, Vec<LocalBlock>)> {
    let mut sub_r = VectorReader::open(&paths.sub)?;
    let mut diag_r = VectorReader::open(&paths.diag)?;
    let mut sup_r = VectorReader::open(&paths.sup)?;
    let mut rhs_r = VectorReader::open(&paths.rhs)?;

    let n = sub_r.read_len()?;
    let n_diag = diag_r.read_len()?;
    let n_sup = sup_r.read_len()?;
    let n_rhs = rhs_r.read_len()?;
    if n_diag != n || n_sup != n || n_rhs != n {
        return Err(SolverError::LengthMismatch(format!(
            "sub={n}, diag={n_diag}, super={n_sup}, rhs={n_rhs}"
        )));
    }

    let ranges = partition(n, nworkers)?;
    let mut blocks = Vec::with_capacity(nworkers);
    for r in &ranges {
        let len = r.len();
        blocks.push(LocalBlock {
            range: r.clone(),
            sub: sub_r.read_chunk(len)?,
            diag: diag_r.read_chunk(len)?,
            sup: sup_r.read_chunk(len)?,
            rhs: rhs_r.read_chunk(len)?,
        });
    }
    Ok((ranges, blocks))
}

/// Load the four coefficient vectors, enforcing one shared N.
pub fn load_system(paths: &VectorPaths) -> SolverResult<TridiagonalSystem> {
    let (n_sub, sub) = read_vector(&paths.sub)?;
    let (n_diag, diag) = read_vector(&paths.diag)?;
    let (n_sup, sup) = read_vector(&paths.sup)?;
    let (n_rhs, rhs) = read_vector(&paths.rhs)?;

    if n_sub != n_diag || n_sup != n_diag || n_rhs != n_diag {
        return Err(SolverError::LengthMismatch(format!(
            "sub={n_sub}, diag={n_diag}, super={n_sup}, rhs={n_rhs}"
        )));
    }
    TridiagonalSystem::new(sub, diag, sup, rhs)
}

/// Generate a random diagonally dominant system of size n.
///
/// Off-diagonals and right-hand side are uniform in [-10, 10], the
/// diagonal is `|sub| + |super| + 1`, and `sub[0] = super[n-1] = 0`.
/// Deterministic for a given seed.
pub fn generate_system(n: usize, seed: u64) -> SolverResult<TridiagonalSystem> {
    if n == 0 {
        return Err(SolverError::LengthMismatch(
            "system size must be >= 1".to_string(),
        ));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut sample = |unused: bool| -> f64 {
        if unused {
            0.0
        } else {
            rng.gen_range(-10.0..10.0)
        }
    };

    let mut sub = Vec::with_capacity(n);
    let mut sup = Vec::with_capacity(n);
    for i in 0..n {
        sub.push(sample(i == 0));
        sup.push(sample(i == n - 1));
    }
    let diag: Vec<f64> = (0..n).map(|i| sub[i].abs() + sup[i].abs() + 1.0).collect();
    let rhs: Vec<f64> = (0..n).map(|_| rng.gen_range(-10.0..10.0)).collect();

    TridiagonalSystem::new(sub, diag, sup, rhs)
}

/// Write one vector in the input file format.
pub fn write_vector(path: &str, v: &[f64]) -> SolverResult<()> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);
    writeln!(w, "{}", v.len())?;
    for value in v {
        writeln!(w, "{value}")?;
    }
    w.flush()?;
    Ok(())
}

/// Write a whole system as the four vector files named by `paths`.
pub fn write_system(system: &TridiagonalSystem, paths: &VectorPaths) -> SolverResult<()> {
    write_vector(&paths.sub, &system.sub)?;
    write_vector(&paths.diag, &system.diag)?;
    write_vector(&paths.sup, &system.sup)?;
    write_vector(&paths.rhs, &system.rhs)?;
    Ok(())
}

/// Convenience for tests and benches: vector paths inside a directory.
pub fn vector_paths_in(dir: &Path) -> VectorPaths {
    let join = |name: &str| dir.join(name).to_string_lossy().to_string();
    VectorPaths {
        sub: join("sub.txt"),
        diag: join("diag.txt"),
        sup: join("super.txt"),
        rhs: join("rhs.txt"),
    }
}

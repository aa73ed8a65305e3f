// ─────────────────────────────────────────────────────────────────────
// TriSolve — Partition
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! Balanced block partition and block split/stitch.
//!
//! Worker k of P owns the half-open row range `[k*N/P, (k+1)*N/P)`
//! (integer division), so any remainder accrues to the later workers and
//! the last block is never smaller than any other. The streaming input
//! distributor relies on that: reading chunks in rank order from one pass
//! over the file never needs a buffer larger than the last block.

use ndarray::{s, Array1};
use trisolve_types::error::{SolverError, SolverResult};
use trisolve_types::system::TridiagonalSystem;

/// Contiguous row range of the global system owned by one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRange {
    pub rank: usize,
    pub nranks: usize,
    pub global_n: usize,
    /// Owned range [start, end) in global indexing.
    pub start: usize,
    pub end: usize,
}

impl BlockRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn has_left_neighbor(&self) -> bool {
        self.rank > 0
    }

    pub fn has_right_neighbor(&self) -> bool {
        self.rank + 1 < self.nranks
    }
}

fn block_low(rank: usize, nranks: usize, n: usize) -> usize {
    rank * n / nranks
}

/// Split `global_n` rows across `nranks` workers.
///
/// Rejects `nranks == 0`, `global_n == 0` and `nranks > global_n`: a
/// worker with an empty block would contribute degenerate rows to the
/// reduced system. Also rejects splits that leave any rank past the
/// first with a single row. Such a block has one equation standing in
/// for both of its reduced boundary rows, which mis-couples the 2P
/// system; only the leading block may be a single row, because its left
/// boundary is the domain edge and the duplicate row drops out.
pub fn partition(global_n: usize, nranks: usize) -> SolverResult<Vec<BlockRange>> {
    if global_n == 0 {
        return Err(SolverError::InvalidPartition(
            "system size must be >= 1".to_string(),
        ));
    }
    if nranks == 0 {
        return Err(SolverError::InvalidPartition(
            "worker count must be >= 1".to_string(),
        ));
    }
    if nranks > global_n {
        return Err(SolverError::InvalidPartition(format!(
            "cannot split {global_n} rows across {nranks} workers"
        )));
    }

    let mut out = Vec::with_capacity(nranks);
    for rank in 0..nranks {
        let start = block_low(rank, nranks, global_n);
        let end = block_low(rank + 1, nranks, global_n);
        if rank > 0 && end - start < 2 {
            return Err(SolverError::InvalidPartition(format!(
                "rank {rank} would own {} row(s); blocks after the first need at least 2",
                end - start
            )));
        }
        out.push(BlockRange {
            rank,
            nranks,
            global_n,
            start,
            end,
        });
    }
    Ok(out)
}

/// One worker's block of the system, exclusively owned.
///
/// The four coefficient vectors are mutated in place by the reduction and
/// consumed by back-substitution; no other worker ever aliases them.
#[derive(Debug, Clone)]
pub struct LocalBlock {
    pub range: BlockRange,
    pub sub: Vec<f64>,
    pub diag: Vec<f64>,
    pub sup: Vec<f64>,
    pub rhs: Vec<f64>,
}

/// Cut the global system into one owned block per range.
pub fn split_blocks(
    system: &TridiagonalSystem,
    ranges: &[BlockRange],
) -> SolverResult<Vec<LocalBlock>> {
    let last = ranges.last().ok_or_else(|| {
        SolverError::InvalidPartition("no block ranges provided".to_string())
    })?;
    if last.end != system.n() || ranges[0].start != 0 {
        return Err(SolverError::InvalidPartition(format!(
            "ranges cover [{}, {}), system has {} rows",
            ranges[0].start,
            last.end,
            system.n()
        )));
    }

    let mut out = Vec::with_capacity(ranges.len());
    for r in ranges {
        if r.is_empty() || r.end > system.n() {
            return Err(SolverError::InvalidPartition(format!(
                "invalid block bounds [{}, {}) for rank {}",
                r.start, r.end, r.rank
            )));
        }
        out.push(LocalBlock {
            range: r.clone(),
            sub: system.sub[r.start..r.end].to_vec(),
            diag: system.diag[r.start..r.end].to_vec(),
            sup: system.sup[r.start..r.end].to_vec(),
            rhs: system.rhs[r.start..r.end].to_vec(),
        });
    }
    Ok(out)
}

/// Reassemble per-worker solution pieces into the global vector.
pub fn stitch_solution(pieces: &[Vec<f64>], ranges: &[BlockRange]) -> SolverResult<Array1<f64>> {
    if pieces.len() != ranges.len() {
        return Err(SolverError::LengthMismatch(format!(
            "pieces/ranges mismatch: {} vs {}",
            pieces.len(),
            ranges.len()
        )));
    }
    let global_n = ranges
        .first()
        .map(|r| r.global_n)
        .ok_or_else(|| SolverError::InvalidPartition("no block ranges provided".to_string()))?;

    let mut x = Array1::zeros(global_n);
    for (piece, r) in pieces.iter().zip(ranges.iter()) {
        if piece.len() != r.len() {
            return Err(SolverError::LengthMismatch(format!(
                "rank {} piece has {} rows, block owns {}",
                r.rank,
                piece.len(),
                r.len()
            )));
        }
        x.slice_mut(s![r.start..r.end]).assign(&ndarray::aview1(piece));
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_covers_domain_in_order() {
        let ranges = partition(17, 4).expect("partition must succeed");
        assert_eq!(ranges.len(), 4);
        assert_eq!(ranges[0].start, 0);
        assert_eq!(ranges.last().expect("range expected").end, 17);
        let covered: usize = ranges.iter().map(|r| r.len()).sum();
        assert_eq!(covered, 17);
        for w in ranges.windows(2) {
            assert_eq!(w[0].end, w[1].start, "blocks must be contiguous");
        }
    }

    #[test]
    fn test_remainder_accrues_to_later_ranks() {
        // 17 = 4+4+4+5: the last rank takes the extra row.
        let ranges = partition(17, 4).unwrap();
        let sizes: Vec<usize> = ranges.iter().map(|r| r.len()).collect();
        assert_eq!(sizes, vec![4, 4, 4, 5]);
        let last = *sizes.last().unwrap();
        assert!(sizes.iter().all(|&s| s <= last));
    }

    #[test]
    fn test_partition_rejects_degenerate_inputs() {
        assert!(partition(0, 2).is_err());
        assert!(partition(10, 0).is_err());
        // N < P is an explicit rejection, not empty high-rank blocks.
        assert!(partition(3, 5).is_err());
    }

    #[test]
    fn test_unbalanced_5_over_3() {
        let ranges = partition(5, 3).unwrap();
        let sizes: Vec<usize> = ranges.iter().map(|r| r.len()).collect();
        assert_eq!(sizes, vec![1, 2, 2]);
    }

    #[test]
    fn test_rejects_single_row_blocks_past_rank_zero() {
        // 6 over 4 would split as 1,2,1,2; 3 over 3 as 1,1,1.
        assert!(partition(6, 4).is_err());
        assert!(partition(3, 3).is_err());
        // A single-row leading block is allowed.
        let sizes: Vec<usize> = partition(7, 4)
            .unwrap()
            .iter()
            .map(|r| r.len())
            .collect();
        assert_eq!(sizes, vec![1, 2, 2, 2]);
    }

    #[test]
    fn test_split_and_stitch_roundtrip() {
        let n = 11;
        let sys = TridiagonalSystem::new(
            (0..n).map(|i| i as f64).collect(),
            (0..n).map(|i| 10.0 + i as f64).collect(),
            (0..n).map(|i| 20.0 + i as f64).collect(),
            (0..n).map(|i| 30.0 + i as f64).collect(),
        )
        .unwrap();
        let ranges = partition(n, 3).unwrap();
        let blocks = split_blocks(&sys, &ranges).unwrap();

        assert_eq!(blocks[1].diag[0], sys.diag[ranges[1].start]);

        let pieces: Vec<Vec<f64>> = blocks.iter().map(|b| b.rhs.clone()).collect();
        let stitched = stitch_solution(&pieces, &ranges).unwrap();
        for i in 0..n {
            assert_eq!(stitched[i], sys.rhs[i]);
        }
    }

    #[test]
    fn test_stitch_rejects_wrong_piece_length() {
        let ranges = partition(6, 2).unwrap();
        let pieces = vec![vec![0.0; 3], vec![0.0; 2]];
        assert!(stitch_solution(&pieces, &ranges).is_err());
    }

    #[test]
    fn test_neighbor_queries() {
        let ranges = partition(9, 3).unwrap();
        assert!(!ranges[0].has_left_neighbor());
        assert!(ranges[0].has_right_neighbor());
        assert!(ranges[1].has_left_neighbor());
        assert!(ranges[1].has_right_neighbor());
        assert!(!ranges[2].has_right_neighbor());
    }
}

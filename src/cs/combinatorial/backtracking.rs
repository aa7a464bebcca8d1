//! Brute-force exact cover by plain backtracking over row subsets.
//! Every row is either taken or skipped, and a branch is cut as soon as a
//! taken row overlaps a column that is already covered. Exponential in the
//! number of rows, so it only serves as an independent check of the
//! dancing-links solver on small instances.
//!
//! # Example
//! ```
//! use dlx_cover::cs::combinatorial::backtracking::brute_force_exact_covers;
//!
//! let rows = vec![vec![0, 1], vec![2], vec![1, 2], vec![0]];
//! let covers = brute_force_exact_covers(3, &rows);
//! assert_eq!(covers, vec![vec![0, 1], vec![2, 3]]);
//! ```

use bitvec::prelude::*;

/// Returns every subset of `rows` that covers `0..column_count` exactly once,
/// as ascending row ids, in lexicographic order. Column indices outside the
/// range make a row unusable.
pub fn brute_force_exact_covers(column_count: usize, rows: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let mut results = Vec::new();
    let mut chosen = Vec::new();
    let mut covered = bitvec![0; column_count];
    backtrack_covers(rows, 0, &mut covered, &mut chosen, &mut results);
    results
}

fn backtrack_covers(
    rows: &[Vec<usize>],
    start: usize,
    covered: &mut BitVec,
    chosen: &mut Vec<usize>,
    results: &mut Vec<Vec<usize>>,
) {
    if covered.all() {
        results.push(chosen.clone());
    }
    for r in start..rows.len() {
        let row = &rows[r];
        let fits = row
            .iter()
            .all(|&c| c < covered.len() && !covered[c]);
        if !fits || row.is_empty() {
            continue;
        }
        for &c in row {
            covered.set(c, true);
        }
        chosen.push(r);
        backtrack_covers(rows, r + 1, covered, chosen, results);
        chosen.pop();
        for &c in row {
            covered.set(c, false);
        }
    }
}

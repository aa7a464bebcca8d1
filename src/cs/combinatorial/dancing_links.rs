//! Knuth's Algorithm X on a dancing-links matrix.
//! This solves the "Exact Cover" problem by selecting rows so that every
//! column is covered exactly once. The sparse matrix is kept as a torus of
//! circular doubly-linked lists; covering a column unlinks it and every row
//! that touches it, and uncovering relinks them in reverse order, so the
//! search backtracks without copying any state.
//!
//! # Example
//! ```
//! // Seven columns (0..7) and six rows, Knuth's classic instance:
//! //   R0: 2 4 5
//! //   R1: 0 3 6
//! //   R2: 1 2 5
//! //   R3: 0 3
//! //   R4: 1 6
//! //   R5: 3 4 6
//! // The only exact cover is R3 + R0 + R4, picked in that order.
//! use dlx_cover::cs::combinatorial::dancing_links::Matrix;
//!
//! let mut matrix = Matrix::new(7).unwrap();
//! matrix
//!     .add_rows([
//!         vec![2, 4, 5],
//!         vec![0, 3, 6],
//!         vec![1, 2, 5],
//!         vec![0, 3],
//!         vec![1, 6],
//!         vec![3, 4, 6],
//!     ])
//!     .unwrap();
//!
//! let solutions: Vec<_> = matrix.solutions().collect();
//! assert_eq!(solutions.len(), 1);
//! assert_eq!(solutions[0].sorted_row_ids(), vec![0, 3, 4]);
//! assert_eq!(solutions[0].rows(), &[vec![0, 3], vec![2, 4, 5], vec![1, 6]]);
//! ```

pub mod matrix;
mod node;
pub mod search;
pub mod solution;

#[cfg(test)]
mod tests;

pub use matrix::{DuplicateRows, Matrix, MatrixConfig};
pub use node::Column;
pub use search::{SearchConfig, Solutions};
pub use solution::{render_solutions, Solution, SOLUTION_SEPARATOR};

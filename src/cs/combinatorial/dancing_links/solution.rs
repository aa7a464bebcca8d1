use std::fmt::{self, Display};

use bitvec::prelude::*;

/// Line written between solutions by [`render_solutions`].
pub const SOLUTION_SEPARATOR: &str = "---";

/// One exact cover: the selected rows in the order the search picked them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Solution {
    row_ids: Vec<usize>,
    rows: Vec<Vec<usize>>,
}

impl Solution {
    pub(crate) fn new(row_ids: Vec<usize>, rows: Vec<Vec<usize>>) -> Self {
        debug_assert_eq!(row_ids.len(), rows.len());
        Solution { row_ids, rows }
    }

    /// Ids of the selected rows, as returned by `Matrix::add_row`.
    pub fn row_ids(&self) -> &[usize] {
        &self.row_ids
    }

    /// Column indices of each selected row.
    pub fn rows(&self) -> &[Vec<usize>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row ids in ascending order, convenient for comparing solutions found
    /// along different branches.
    pub fn sorted_row_ids(&self) -> Vec<usize> {
        let mut ids = self.row_ids.clone();
        ids.sort_unstable();
        ids
    }

    /// Consumes the solution, keeping only the column lists.
    pub fn into_rows(self) -> Vec<Vec<usize>> {
        self.rows
    }

    /// True if the rows cover every column in `0..column_count` exactly once.
    pub fn is_exact_cover(&self, column_count: usize) -> bool {
        let mut covered = bitvec![0; column_count];
        for &column in self.rows.iter().flatten() {
            if column >= column_count || covered[column] {
                return false;
            }
            covered.set(column, true);
        }
        covered.all()
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, column) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", column)?;
            }
        }
        Ok(())
    }
}

/// Renders solutions for debugging: one line per row with comma-separated
/// columns, and a [`SOLUTION_SEPARATOR`] line between solutions.
pub fn render_solutions(solutions: &[Solution]) -> String {
    solutions
        .iter()
        .map(Solution::to_string)
        .collect::<Vec<_>>()
        .join(&format!("\n{}\n", SOLUTION_SEPARATOR))
}

//! Algorithm X over a [`Matrix`].
//!
//! Two drivers share the cover/uncover primitives:
//!
//! * [`Solutions`], a lazy iterator keeping its backtracking state in an
//!   explicit frame stack. Dropping it part-way uncovers every pending column,
//!   so the matrix is always handed back in its ingested state.
//! * [`Matrix::for_each_solution`], a recursive search that hands each cover
//!   to a callback and stops as soon as the callback breaks. Covers are held
//!   by drop guards, so a panicking callback also leaves the matrix intact.

use std::iter::FusedIterator;
use std::ops::ControlFlow;

use log::debug;

use crate::cs::combinatorial::dancing_links::matrix::Matrix;
use crate::cs::combinatorial::dancing_links::solution::Solution;

/// Search settings.
#[derive(Debug, Clone, Default)]
pub struct SearchConfig {
    /// Stop after this many solutions. `None` enumerates all of them.
    pub limit: Option<usize>,
}

impl SearchConfig {
    pub fn with_limit(limit: usize) -> Self {
        SearchConfig { limit: Some(limit) }
    }
}

/// One level of the search: the column branched on and the row currently
/// selected from it. `row == column` means no row has been selected yet.
#[derive(Debug, Clone, Copy)]
struct Frame {
    column: usize,
    row: usize,
}

/// Lazily enumerates the exact covers of a matrix.
///
/// Created by [`Matrix::solutions`] or [`Matrix::solutions_with`]. The matrix
/// stays mutably borrowed while the iterator lives and is fully restored when
/// the iterator is exhausted or dropped.
pub struct Solutions<'a> {
    matrix: &'a mut Matrix,
    frames: Vec<Frame>,
    started: bool,
    finished: bool,
    emitted: usize,
    limit: Option<usize>,
}

impl<'a> Solutions<'a> {
    fn new(matrix: &'a mut Matrix, config: SearchConfig) -> Self {
        debug!(
            "starting exact cover search over {} rows (limit {:?})",
            matrix.row_count(),
            config.limit
        );
        Solutions {
            matrix,
            frames: Vec::new(),
            started: false,
            finished: false,
            emitted: 0,
            limit: config.limit,
        }
    }

    /// Solutions produced so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Moves one level deeper from the current partial solution. Returns the
    /// solution if nothing is left to cover, otherwise branches on the
    /// smallest column.
    fn descend(&mut self) -> Option<Solution> {
        match self.matrix.choose_column() {
            None => Some(self.emit()),
            Some(column) => {
                self.matrix.cover_column(column);
                self.frames.push(Frame {
                    column,
                    row: column,
                });
                None
            }
        }
    }

    fn emit(&mut self) -> Solution {
        self.emitted += 1;
        let rows = self.frames.iter().map(|frame| frame.row);
        let solution = self.matrix.solution_from(rows);
        debug!("found solution {}: rows {:?}", self.emitted, solution.row_ids());
        solution
    }

    /// Uncovers everything still covered, innermost frame first.
    fn unwind(&mut self) {
        while let Some(frame) = self.frames.pop() {
            if frame.row != frame.column {
                self.matrix.uncover_row(frame.row);
            }
            self.matrix.uncover_column(frame.column);
        }
    }

    fn finish(&mut self) {
        if !self.finished {
            self.unwind();
            self.finished = true;
            debug!("exact cover search finished after {} solutions", self.emitted);
        }
    }
}

impl Iterator for Solutions<'_> {
    type Item = Solution;

    fn next(&mut self) -> Option<Solution> {
        if self.finished {
            return None;
        }
        if self.limit.is_some_and(|limit| self.emitted >= limit) {
            self.finish();
            return None;
        }

        if !self.started {
            self.started = true;
            if let Some(solution) = self.descend() {
                return Some(solution);
            }
        }

        loop {
            let Some(frame) = self.frames.last().copied() else {
                self.finish();
                return None;
            };

            // Retire the row tried last at this level, then move to the next.
            if frame.row != frame.column {
                self.matrix.uncover_row(frame.row);
            }
            let next = self.matrix.arena.nodes[frame.row].down;
            if next == frame.column {
                self.frames.pop();
                self.matrix.uncover_column(frame.column);
                continue;
            }

            if let Some(top) = self.frames.last_mut() {
                top.row = next;
            }
            self.matrix.cover_row(next);
            if let Some(solution) = self.descend() {
                return Some(solution);
            }
        }
    }
}

impl FusedIterator for Solutions<'_> {}

impl Drop for Solutions<'_> {
    fn drop(&mut self) {
        if !self.finished && !self.frames.is_empty() {
            debug!(
                "abandoning exact cover search after {} solutions",
                self.emitted
            );
        }
        self.finish();
    }
}

/// A column or a selected row covered for the duration of one recursive
/// search frame. Dropping it uncovers, so the matrix is restored even when
/// the solution callback unwinds.
struct Covered<'m> {
    matrix: &'m mut Matrix,
    node: usize,
    row: bool,
}

impl<'m> Covered<'m> {
    fn column(matrix: &'m mut Matrix, header: usize) -> Self {
        matrix.cover_column(header);
        Covered {
            matrix,
            node: header,
            row: false,
        }
    }

    fn row(matrix: &'m mut Matrix, entry: usize) -> Self {
        matrix.cover_row(entry);
        Covered {
            matrix,
            node: entry,
            row: true,
        }
    }
}

impl Drop for Covered<'_> {
    fn drop(&mut self) {
        if self.row {
            self.matrix.uncover_row(self.node);
        } else {
            self.matrix.uncover_column(self.node);
        }
    }
}

impl Matrix {
    /// Lazily enumerates every exact cover.
    ///
    /// # Example
    /// ```
    /// use dlx_cover::Matrix;
    ///
    /// let mut matrix = Matrix::new(2).unwrap();
    /// matrix.add_rows([vec![0], vec![1], vec![0, 1]]).unwrap();
    ///
    /// let first = matrix.solutions().next().unwrap();
    /// assert!(first.is_exact_cover(2));
    /// assert_eq!(matrix.solutions().count(), 2);
    /// ```
    pub fn solutions(&mut self) -> Solutions<'_> {
        Solutions::new(self, SearchConfig::default())
    }

    pub fn solutions_with(&mut self, config: SearchConfig) -> Solutions<'_> {
        Solutions::new(self, config)
    }

    /// Recursive search handing each solution to `visit`. Returning
    /// [`ControlFlow::Break`] stops the search once the pending covers have
    /// been undone. Returns the number of solutions visited.
    pub fn for_each_solution<F>(&mut self, mut visit: F) -> usize
    where
        F: FnMut(Solution) -> ControlFlow<()>,
    {
        let mut partial = Vec::new();
        let mut visited = 0;
        let mut counted = |solution: Solution| {
            visited += 1;
            visit(solution)
        };
        let flow = self.search(&mut partial, &mut counted);
        debug!(
            "recursive exact cover search {} after {} solutions",
            if flow.is_break() { "stopped" } else { "finished" },
            visited
        );
        debug_assert_eq!(self.check_links(), Ok(()));
        visited
    }

    fn search<F>(&mut self, partial: &mut Vec<usize>, visit: &mut F) -> ControlFlow<()>
    where
        F: FnMut(Solution) -> ControlFlow<()>,
    {
        let Some(column) = self.choose_column() else {
            return visit(self.solution_from(partial.iter().copied()));
        };

        let covered = Covered::column(self, column);
        let mut flow = ControlFlow::Continue(());
        let mut row = covered.matrix.arena.nodes[column].down;
        while row != column {
            partial.push(row);
            {
                let selected = Covered::row(&mut *covered.matrix, row);
                flow = selected.matrix.search(partial, visit);
            }
            partial.pop();
            if flow.is_break() {
                break;
            }
            row = covered.matrix.arena.nodes[row].down;
        }
        flow
    }

    /// Every exact cover, in search order.
    pub fn solve_all(&mut self) -> Vec<Solution> {
        let mut solutions = Vec::new();
        self.for_each_solution(|solution| {
            solutions.push(solution);
            ControlFlow::Continue(())
        });
        solutions
    }

    pub fn first_solution(&mut self) -> Option<Solution> {
        let mut first = None;
        self.for_each_solution(|solution| {
            first = Some(solution);
            ControlFlow::Break(())
        });
        first
    }

    pub fn count_solutions(&mut self) -> usize {
        self.for_each_solution(|_| ControlFlow::Continue(()))
    }

    /// Projects selected entry nodes back onto the rows they belong to.
    pub(crate) fn solution_from<I>(&self, entries: I) -> Solution
    where
        I: IntoIterator<Item = usize>,
    {
        let row_ids: Vec<usize> = entries
            .into_iter()
            .map(|entry| self.arena.row_of(entry))
            .collect();
        let rows = row_ids
            .iter()
            .map(|&id| self.rows()[id].clone())
            .collect();
        Solution::new(row_ids, rows)
    }
}

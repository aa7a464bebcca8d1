use std::collections::HashSet;
use std::ops::Range;

use log::{debug, trace, warn};

use crate::cs::combinatorial::dancing_links::node::{Arena, Column, Node, ROOT};
use crate::cs::error::{Error, Result};

/// What to do when a row identical to an already ingested row is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateRows {
    /// Keep every copy. Column sizes count each copy and every copy shows up
    /// in its own solutions.
    #[default]
    Allow,
    /// Keep every copy, but log a warning for each repeat.
    Warn,
    /// Reject the repeat with [`Error::DuplicateRow`].
    Reject,
}

/// Ingestion settings for a [`Matrix`].
#[derive(Debug, Clone, Default)]
pub struct MatrixConfig {
    pub duplicate_rows: DuplicateRows,
}

/// A sparse 0/1 matrix stored as a dancing-links torus.
///
/// Columns are fixed at construction. Rows can be added at any time between
/// searches but never removed.
///
/// # Example
/// ```
/// use dlx_cover::Matrix;
///
/// let mut matrix = Matrix::new(3).unwrap();
/// matrix.add_rows([vec![0, 1], vec![2], vec![1, 2], vec![0]]).unwrap();
///
/// assert_eq!(matrix.column_size(1), Some(2));
/// let solutions = matrix.solve_all();
/// assert_eq!(solutions.len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct Matrix {
    pub(crate) arena: Arena,
    /// Column indices of every ingested row, as supplied.
    rows: Vec<Vec<usize>>,
    config: MatrixConfig,
    /// Rows seen so far, only tracked when duplicates are not simply allowed.
    seen: Option<HashSet<Vec<usize>>>,
}

impl Matrix {
    /// Creates a matrix with `column_count` empty columns.
    pub fn new(column_count: usize) -> Result<Self> {
        Self::with_config(column_count, MatrixConfig::default())
    }

    pub fn with_config(column_count: usize, config: MatrixConfig) -> Result<Self> {
        if column_count == 0 {
            return Err(Error::InvalidColumnCount);
        }
        debug!(
            "building exact cover matrix with {} columns ({:?} duplicate rows)",
            column_count, config.duplicate_rows
        );
        let seen = match config.duplicate_rows {
            DuplicateRows::Allow => None,
            DuplicateRows::Warn | DuplicateRows::Reject => Some(HashSet::new()),
        };
        Ok(Matrix {
            arena: Arena::new(column_count),
            rows: Vec::new(),
            config,
            seen,
        })
    }

    /// Builds a matrix from dense rows where `matrix[r][c]` marks that row `r`
    /// covers column `c`. Row ids match positions in `matrix`.
    pub fn from_dense(matrix: &[Vec<bool>]) -> Result<Self> {
        let width = matrix.first().map_or(0, Vec::len);
        let mut sparse = Vec::with_capacity(matrix.len());
        for (r, row) in matrix.iter().enumerate() {
            if row.len() != width {
                return Err(Error::RaggedMatrix {
                    row: r,
                    expected: width,
                    found: row.len(),
                });
            }
            sparse.push(
                row.iter()
                    .enumerate()
                    .filter_map(|(c, &set)| set.then_some(c))
                    .collect::<Vec<_>>(),
            );
        }

        let mut dlx = Self::new(width)?;
        dlx.add_rows(sparse)?;
        Ok(dlx)
    }

    /// Adds one row and returns its id.
    pub fn add_row(&mut self, row: &[usize]) -> Result<usize> {
        self.insert_row(0, row)
    }

    /// Adds rows in order and returns the range of ids they were given.
    ///
    /// A malformed row stops ingestion with an error naming its position in
    /// `rows`. That row leaves no trace in the matrix; rows before it stay.
    pub fn add_rows<I, R>(&mut self, rows: I) -> Result<Range<usize>>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[usize]>,
    {
        let start = self.rows.len();
        for (position, row) in rows.into_iter().enumerate() {
            self.insert_row(position, row.as_ref())?;
        }
        debug!(
            "ingested {} rows, matrix now holds {}",
            self.rows.len() - start,
            self.rows.len()
        );
        Ok(start..self.rows.len())
    }

    fn insert_row(&mut self, position: usize, row: &[usize]) -> Result<usize> {
        self.validate_row(position, row)?;

        if let Some(seen) = self.seen.as_mut() {
            if !seen.insert(row.to_vec()) {
                match self.config.duplicate_rows {
                    DuplicateRows::Reject => {
                        return Err(Error::DuplicateRow { row: position })
                    }
                    _ => warn!("row {:?} was already ingested, keeping both copies", row),
                }
            }
        }

        let id = self.rows.len();
        let mut first = None;
        for &index in row {
            let header = self.arena.header_of(index);
            let entry = self.arena.push_entry(header, id);
            match first {
                Some(anchor) => self.arena.insert_left_of(anchor, entry),
                None => first = Some(entry),
            }
        }
        if first.is_none() {
            trace!("row {} is empty and can never be selected", id);
        }
        self.rows.push(row.to_vec());
        Ok(id)
    }

    fn validate_row(&self, position: usize, row: &[usize]) -> Result<()> {
        let column_count = self.column_count();
        let mut previous: Option<usize> = None;
        for &column in row {
            if column >= column_count {
                return Err(Error::ColumnOutOfRange {
                    row: position,
                    column,
                    column_count,
                });
            }
            if let Some(prev) = previous {
                if column <= prev {
                    return Err(Error::NotStrictlyIncreasing {
                        row: position,
                        previous: prev,
                        column,
                    });
                }
            }
            previous = Some(column);
        }
        Ok(())
    }

    pub fn column_count(&self) -> usize {
        self.arena.column_count()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Column indices of row `id`, as they were ingested.
    pub fn row(&self, id: usize) -> Option<&[usize]> {
        self.rows.get(id).map(Vec::as_slice)
    }

    pub fn rows(&self) -> &[Vec<usize>] {
        &self.rows
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.arena.columns().get(index)
    }

    /// Number of rows currently linked into column `index`.
    pub fn column_size(&self, index: usize) -> Option<usize> {
        self.column(index).map(Column::size)
    }

    /// Indices of the columns reachable from the root header, in chain order.
    pub fn active_columns(&self) -> impl Iterator<Item = usize> + '_ {
        let nodes = &self.arena.nodes;
        let mut header = nodes[ROOT].right;
        std::iter::from_fn(move || {
            if header == ROOT {
                return None;
            }
            let index = self.arena.column(header).index();
            header = nodes[header].right;
            Some(index)
        })
    }

    /// Unlinks column `header` from the header chain and every row crossing it
    /// from the other columns those rows touch.
    pub(crate) fn cover_column(&mut self, header: usize) {
        trace!("cover column {}", self.arena.column(header).index());
        let nodes = &mut self.arena.nodes;
        let left = nodes[header].left;
        let right = nodes[header].right;
        nodes[right].left = left;
        nodes[left].right = right;

        let mut row = self.arena.nodes[header].down;
        while row != header {
            let mut node = self.arena.nodes[row].right;
            while node != row {
                let Node {
                    up, down, column, ..
                } = self.arena.nodes[node];
                self.arena.nodes[down].up = up;
                self.arena.nodes[up].down = down;
                self.arena.column_mut(column).size -= 1;
                node = self.arena.nodes[node].right;
            }
            row = self.arena.nodes[row].down;
        }
    }

    /// Exact inverse of [`Matrix::cover_column`], walking rows bottom-up and
    /// each row leftwards before relinking the header.
    pub(crate) fn uncover_column(&mut self, header: usize) {
        trace!("uncover column {}", self.arena.column(header).index());
        let mut row = self.arena.nodes[header].up;
        while row != header {
            let mut node = self.arena.nodes[row].left;
            while node != row {
                let Node {
                    up, down, column, ..
                } = self.arena.nodes[node];
                self.arena.column_mut(column).size += 1;
                self.arena.nodes[down].up = node;
                self.arena.nodes[up].down = node;
                node = self.arena.nodes[node].left;
            }
            row = self.arena.nodes[row].up;
        }

        let nodes = &mut self.arena.nodes;
        let left = nodes[header].left;
        let right = nodes[header].right;
        nodes[right].left = header;
        nodes[left].right = header;
    }

    /// Covers the column of every entry in `entry`'s row except its own.
    pub(crate) fn cover_row(&mut self, entry: usize) {
        let mut node = self.arena.nodes[entry].right;
        while node != entry {
            self.cover_column(self.arena.nodes[node].column);
            node = self.arena.nodes[node].right;
        }
    }

    /// Undoes [`Matrix::cover_row`] in reverse order.
    pub(crate) fn uncover_row(&mut self, entry: usize) {
        let mut node = self.arena.nodes[entry].left;
        while node != entry {
            self.uncover_column(self.arena.nodes[node].column);
            node = self.arena.nodes[node].left;
        }
    }

    /// The active column with the fewest rows, ties going to the first in
    /// chain order. `None` once every column is covered.
    pub(crate) fn choose_column(&self) -> Option<usize> {
        let nodes = &self.arena.nodes;
        let mut header = nodes[ROOT].right;
        let mut best: Option<(usize, usize)> = None;
        while header != ROOT {
            let size = self.arena.column(header).size();
            if best.map_or(true, |(_, best_size)| size < best_size) {
                best = Some((header, size));
                if size == 0 {
                    break;
                }
            }
            header = nodes[header].right;
        }
        if let Some((header, size)) = best {
            trace!(
                "branching on column {} with {} rows",
                self.arena.column(header).index(),
                size
            );
        }
        best.map(|(header, _)| header)
    }

    /// Checks the structural invariants of a matrix at rest: every column is
    /// on the header chain exactly once, every link is mirrored by its
    /// neighbour, and every size matches the entries under its header.
    ///
    /// Fails with a description of the first violation found.
    pub fn check_links(&self) -> std::result::Result<(), String> {
        let nodes = &self.arena.nodes;

        let chain: Vec<usize> = self.active_columns().collect();
        let expected: Vec<usize> = (0..self.column_count()).collect();
        if chain != expected {
            return Err(format!("header chain is {:?}, expected {:?}", chain, expected));
        }

        for (id, node) in nodes.iter().enumerate() {
            if nodes[node.right].left != id || nodes[node.left].right != id {
                return Err(format!("node {} is not mirrored horizontally", id));
            }
            if nodes[node.down].up != id || nodes[node.up].down != id {
                return Err(format!("node {} is not mirrored vertically", id));
            }
            let entry = !self.arena.is_header(id);
            if entry && (node.column == ROOT || !self.arena.is_header(node.column)) {
                return Err(format!("node {} points at a non-header column", id));
            }
        }

        for header in 1..=self.column_count() {
            let mut count = 0;
            let mut node = nodes[header].down;
            while node != header {
                if nodes[node].column != header {
                    return Err(format!("node {} is linked under the wrong column", node));
                }
                count += 1;
                node = nodes[node].down;
            }
            let size = self.arena.column(header).size();
            if size != count {
                return Err(format!(
                    "column {} records size {} but holds {} entries",
                    header - 1,
                    size,
                    count
                ));
            }
        }
        Ok(())
    }

    /// Convenience wrapper around [`Matrix::check_links`].
    pub fn is_consistent(&self) -> bool {
        self.check_links().is_ok()
    }
}

use thiserror::Error;

/// Errors raised while building an exact cover matrix.
///
/// Row positions are relative to the ingestion call that supplied them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("a matrix needs at least one column")]
    InvalidColumnCount,

    #[error("row {row} references column {column}, but the matrix has {column_count} columns")]
    ColumnOutOfRange {
        row: usize,
        column: usize,
        column_count: usize,
    },

    #[error("row {row} is not strictly increasing: column {column} follows column {previous}")]
    NotStrictlyIncreasing {
        row: usize,
        previous: usize,
        column: usize,
    },

    #[error("row {row} duplicates a row already in the matrix")]
    DuplicateRow { row: usize },

    #[error("row {row} has {found} entries, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

pub mod cs;

pub use cs::combinatorial::dancing_links::{
    render_solutions, Column, DuplicateRows, Matrix, MatrixConfig, SearchConfig, Solution,
    Solutions,
};
pub use cs::error::{Error, Result};

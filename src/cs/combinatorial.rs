pub mod backtracking;
pub mod dancing_links;

pub use backtracking::brute_force_exact_covers;
pub use dancing_links::{Matrix, Solution, Solutions};

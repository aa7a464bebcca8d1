pub mod combinatorial;
pub mod error;

// Re-export all modules
pub use combinatorial::*;

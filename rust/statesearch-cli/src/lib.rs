pub mod config;
pub mod error;
pub mod grid;
pub mod harvest;
pub mod maze;
pub mod report;

pub use error::PuzzleError;

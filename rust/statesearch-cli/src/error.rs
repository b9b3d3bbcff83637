use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PuzzleError {
    #[error("puzzle input is empty")]
    Empty,
    #[error("line {line}: expected {expected} cells, found {found}")]
    Ragged { line: usize, expected: usize, found: usize },
    #[error("line {line}, column {column}: unexpected cell {ch:?}")]
    UnknownCell { line: usize, column: usize, ch: char },
    #[error("no {0:?} cell in puzzle")]
    Missing(char),
    #[error("more than one {0:?} cell in puzzle")]
    Duplicate(char),
    #[error("budget must not be negative, got {0}")]
    NegativeBudget(i64),
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

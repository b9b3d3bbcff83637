pub mod error;
pub mod options;
pub mod state;
pub mod path;
pub mod frontier;
pub mod engine;

pub use error::SearchError;
pub use options::SearchOptions;
pub use state::{Goal, SearchState};
pub use path::SearchPath;
pub use engine::{AStar, BranchAndBound, CoOptimalAStar, CoOptimalOutcome, SearchOutcome, SearchStats};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

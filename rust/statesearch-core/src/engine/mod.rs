pub mod astar;
pub mod branch_bound;
pub mod co_optimal;

pub use astar::AStar;
pub use branch_bound::BranchAndBound;
pub use co_optimal::{CoOptimalAStar, CoOptimalOutcome};

use serde::Serialize;

use crate::path::SearchPath;

/// Counters collected during one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Paths popped and expanded.
    pub expanded: u64,
    /// Paths pushed onto the frontier, including the start path.
    pub pushed: u64,
    /// Successors discarded as already visited.
    pub skipped: u64,
    /// Successors discarded by the gain bound.
    pub pruned: u64,
    /// Largest frontier size.
    pub max_queue: usize,
}

#[derive(Clone, Debug)]
pub struct SearchOutcome<S> {
    pub path: SearchPath<S>,
    pub stats: SearchStats,
    /// False when the frontier drained first and `path` is only the last
    /// path popped.
    pub goal_reached: bool,
}

pub(crate) fn report_progress(
    engine: &'static str,
    stats: &SearchStats,
    queue: usize,
    best_key: Option<i64>,
    best_gain: Option<i64>,
) {
    tracing::info!(
        engine,
        expanded = stats.expanded,
        queue,
        skipped = stats.skipped,
        pruned = stats.pruned,
        best_key = ?best_key,
        best_gain = ?best_gain,
        "search progress"
    );
}

use crate::frontier::Frontier;
use crate::options::SearchOptions;
use crate::path::SearchPath;
use crate::state::SearchState;

use super::{report_progress, SearchOutcome, SearchStats};

/// Exhaustive best-gain search within each path's cost budget.
///
/// Paths are explored in priority order but states are never deduplicated:
/// revisiting a state along a different path is legal. A successor is dropped
/// only when neither its gain nor its gain plus `potential_gain` can reach the
/// best gain found so far, so `potential_gain` must never underestimate what
/// is still obtainable. Termination requires cost to grow along every edge.
pub struct BranchAndBound<S: SearchState> {
    start: SearchPath<S>,
    options: SearchOptions,
}

impl<S: SearchState> BranchAndBound<S> {
    pub fn new(start: SearchPath<S>) -> Self {
        Self { start, options: SearchOptions::default() }
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    /// Greatest-gain path among those that used up their budget; the start
    /// path when none improves on it.
    pub fn find_path(&self) -> SearchPath<S> {
        self.run().path
    }

    pub fn run(&self) -> SearchOutcome<S> {
        let mut open = Frontier::new();
        let mut stats = SearchStats::default();
        let mut best = self.start.clone();
        let mut improved = false;

        open.push(self.start.clone());
        stats.pushed += 1;

        while let Some(candidate) = open.pop() {
            if candidate.cost() >= candidate.max_cost() {
                if candidate.gain() > best.gain() {
                    tracing::trace!(gain = candidate.gain(), depth = candidate.depth(), "new best");
                    best = candidate;
                    improved = true;
                }
                continue;
            }

            stats.expanded += 1;
            let floor = best.gain();
            for next in candidate.last().next_search_states(candidate.previous()) {
                if next.gain() < floor && next.gain().saturating_add(next.potential_gain()) < floor {
                    stats.pruned += 1;
                    continue;
                }
                open.push(candidate.add(next));
                stats.pushed += 1;
            }

            if self.options.lap_due(stats.expanded) {
                let best_gain = Some(best.gain());
                report_progress("branch_and_bound", &stats, open.len(), open.peek_key(), best_gain);
            }
        }

        stats.max_queue = open.high_water();
        tracing::debug!(expanded = stats.expanded, pruned = stats.pruned, gain = best.gain(), "budget search finished");
        SearchOutcome { path: best, stats, goal_reached: improved }
    }
}

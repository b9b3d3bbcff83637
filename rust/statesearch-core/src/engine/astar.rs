use rustc_hash::FxHashSet;

use crate::frontier::Frontier;
use crate::options::SearchOptions;
use crate::path::SearchPath;
use crate::state::{is_goal, Goal, SearchState};

use super::{report_progress, SearchOutcome, SearchStats};

/// Best-first search for a single path to a goal, visiting every fingerprint
/// at most once.
pub struct AStar<S: SearchState> {
    start: SearchPath<S>,
    goal: Option<Goal<S::Fingerprint>>,
    options: SearchOptions,
}

impl<S: SearchState> AStar<S> {
    pub fn new(start: SearchPath<S>, goal: Goal<S::Fingerprint>) -> Self {
        Self { start, goal: Some(goal), options: SearchOptions::default() }
    }

    /// Search that ends only on a state reporting [`SearchState::is_terminal`].
    pub fn until_terminal(start: SearchPath<S>) -> Self {
        Self { start, goal: None, options: SearchOptions::default() }
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    /// Best path to the goal, or the last path popped when the goal cannot be
    /// reached. Check the result's last state when an exact goal was expected,
    /// or use [`run`](Self::run).
    pub fn find_path(&self) -> SearchPath<S> {
        self.run().path
    }

    pub fn run(&self) -> SearchOutcome<S> {
        let mut open = Frontier::new();
        let mut visited: FxHashSet<S::Fingerprint> = FxHashSet::default();
        let mut stats = SearchStats::default();

        visited.insert(self.start.last().fingerprint());
        open.push(self.start.clone());
        stats.pushed += 1;
        let mut best = self.start.clone();

        while let Some(candidate) = open.pop() {
            best = candidate.clone();
            if is_goal(candidate.last(), self.goal.as_ref()) {
                stats.max_queue = open.high_water();
                tracing::debug!(expanded = stats.expanded, cost = candidate.cost(), depth = candidate.depth(), "goal reached");
                return SearchOutcome { path: candidate, stats, goal_reached: true };
            }

            stats.expanded += 1;
            for next in candidate.last().next_search_states(candidate.previous()) {
                if !visited.insert(next.fingerprint()) {
                    stats.skipped += 1;
                    continue;
                }
                open.push(candidate.add(next));
                stats.pushed += 1;
            }

            if self.options.lap_due(stats.expanded) {
                report_progress("astar", &stats, open.len(), open.peek_key(), None);
            }
        }

        stats.max_queue = open.high_water();
        tracing::debug!(expanded = stats.expanded, depth = best.depth(), "frontier exhausted before goal");
        SearchOutcome { path: best, stats, goal_reached: false }
    }
}

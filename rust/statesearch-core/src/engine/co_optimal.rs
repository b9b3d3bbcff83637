use indexmap::IndexSet;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::frontier::Frontier;
use crate::options::SearchOptions;
use crate::path::SearchPath;
use crate::state::{is_goal, Goal, SearchState};

use super::{report_progress, SearchStats};

#[derive(Clone, Debug)]
pub struct CoOptimalOutcome<S> {
    /// Every distinct path reaching a goal at `cost`, in discovery order.
    pub paths: Vec<SearchPath<S>>,
    pub cost: Option<i64>,
    pub stats: SearchStats,
}

/// Best-first search that keeps every predecessor achieving a state's best
/// cost and returns all paths tying for the cheapest goal arrival.
pub struct CoOptimalAStar<S: SearchState> {
    start: SearchPath<S>,
    goal: Option<Goal<S::Fingerprint>>,
    options: SearchOptions,
}

struct Dag<S: SearchState> {
    best_cost: FxHashMap<S::Fingerprint, i64>,
    preds: FxHashMap<S::Fingerprint, IndexSet<S::Fingerprint>>,
    states: FxHashMap<S::Fingerprint, S>,
}

impl<S: SearchState + Clone> CoOptimalAStar<S> {
    pub fn new(start: SearchPath<S>, goal: Goal<S::Fingerprint>) -> Self {
        Self { start, goal: Some(goal), options: SearchOptions::default() }
    }

    pub fn until_terminal(start: SearchPath<S>) -> Self {
        Self { start, goal: None, options: SearchOptions::default() }
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    /// All co-optimal paths; empty when no goal is reachable.
    pub fn find_all_paths(&self) -> Vec<SearchPath<S>> {
        self.run().paths
    }

    pub fn run(&self) -> CoOptimalOutcome<S> {
        let start_fp = self.start.last().fingerprint();
        let mut dag: Dag<S> = Dag {
            best_cost: FxHashMap::default(),
            preds: FxHashMap::default(),
            states: FxHashMap::default(),
        };
        let mut open = Frontier::new();
        let mut stats = SearchStats::default();
        let mut goals: IndexSet<S::Fingerprint> = IndexSet::new();
        let mut goal_cost: Option<i64> = None;

        dag.best_cost.insert(start_fp.clone(), self.start.cost());
        open.push(self.start.clone());
        stats.pushed += 1;

        while let Some(candidate) = open.pop() {
            let cost = candidate.cost();
            if goal_cost.is_some_and(|gc| cost > gc) {
                break;
            }
            let fp = candidate.last().fingerprint();
            if dag.best_cost.get(&fp).is_some_and(|&known| cost > known) {
                stats.skipped += 1;
                continue;
            }
            if is_goal(candidate.last(), self.goal.as_ref()) {
                // A cheaper arrival can pop after a dearer one when the depth
                // term outweighs the cost difference.
                if goal_cost.map_or(true, |gc| cost < gc) {
                    goal_cost = Some(cost);
                    goals.clear();
                }
                goals.insert(fp);
                continue;
            }

            stats.expanded += 1;
            for next in candidate.last().next_search_states(candidate.previous()) {
                let next_fp = next.fingerprint();
                let next_cost = next.cost();
                match dag.best_cost.get(&next_fp).copied() {
                    Some(known) if next_cost > known => stats.skipped += 1,
                    Some(known) if next_cost == known => {
                        dag.preds.entry(next_fp).or_default().insert(fp.clone());
                    }
                    _ => {
                        dag.best_cost.insert(next_fp.clone(), next_cost);
                        dag.preds.insert(next_fp.clone(), IndexSet::from([fp.clone()]));
                        dag.states.insert(next_fp, next.clone());
                        open.push(candidate.add(next));
                        stats.pushed += 1;
                    }
                }
            }

            if self.options.lap_due(stats.expanded) {
                report_progress("co_optimal", &stats, open.len(), open.peek_key(), None);
            }
        }
        stats.max_queue = open.high_water();

        // Goals improved after their pop carry predecessors for the lower cost.
        goal_cost = goals.iter().filter_map(|g| dag.best_cost.get(g).copied()).min();
        goals.retain(|g| dag.best_cost.get(g).copied() == goal_cost);

        let mut paths = Vec::new();
        for goal_fp in &goals {
            self.collect_paths(goal_fp, &start_fp, &dag, &mut paths);
        }
        tracing::debug!(expanded = stats.expanded, cost = ?goal_cost, paths = paths.len(), "co-optimal search finished");
        CoOptimalOutcome { paths, cost: goal_cost, stats }
    }

    /// Depth-first walk of the predecessor DAG from `goal_fp` back to the
    /// start, emitting each complete chain as a forward path.
    fn collect_paths(
        &self,
        goal_fp: &S::Fingerprint,
        start_fp: &S::Fingerprint,
        dag: &Dag<S>,
        out: &mut Vec<SearchPath<S>>,
    ) {
        let mut frames: Vec<(S::Fingerprint, usize)> = vec![(goal_fp.clone(), 0)];
        let mut on_trail: FxHashSet<S::Fingerprint> = FxHashSet::default();
        on_trail.insert(goal_fp.clone());

        while let Some((node, cursor)) = frames.last_mut() {
            if *node == *start_fp {
                if let Some(path) = self.assemble(&frames, dag) {
                    out.push(path);
                }
                if let Some((done, _)) = frames.pop() {
                    on_trail.remove(&done);
                }
                continue;
            }
            let next = dag.preds.get(&*node).and_then(|set| set.get_index(*cursor)).cloned();
            *cursor += 1;
            match next {
                Some(prev) if !on_trail.contains(&prev) => {
                    on_trail.insert(prev.clone());
                    frames.push((prev, 0));
                }
                Some(_) => {}
                None => {
                    if let Some((done, _)) = frames.pop() {
                        on_trail.remove(&done);
                    }
                }
            }
        }
    }

    /// `frames` runs goal first, start last.
    fn assemble(&self, frames: &[(S::Fingerprint, usize)], dag: &Dag<S>) -> Option<SearchPath<S>> {
        let mut path = self.start.clone();
        for (fp, _) in frames.iter().rev().skip(1) {
            path = path.add(dag.states.get(fp)?.clone());
        }
        Some(path)
    }
}

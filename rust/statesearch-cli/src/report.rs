use itertools::Itertools;
use serde::Serialize;
use statesearch_core::{CoOptimalOutcome, SearchOutcome, SearchPath, SearchState, SearchStats};

use crate::grid::{CharGrid, Pos};

/// One solved route in presentation form.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteReport {
    pub cost: i64,
    pub gain: i64,
    pub depth: usize,
    pub cells: Vec<Pos>,
}

impl RouteReport {
    pub fn from_path<S>(path: &SearchPath<S>, pos: impl Fn(&S) -> Pos) -> Self
    where
        S: SearchState,
    {
        Self {
            cost: path.cost(),
            gain: path.gain(),
            depth: path.depth(),
            cells: path.search_states().into_iter().map(pos).collect(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub puzzle: &'static str,
    pub solved: bool,
    pub stats: SearchStats,
    pub routes: Vec<RouteReport>,
}

impl Report {
    /// Single-route report; the route is kept only when the goal was reached.
    pub fn from_outcome<S>(puzzle: &'static str, out: &SearchOutcome<S>, pos: impl Fn(&S) -> Pos) -> Self
    where
        S: SearchState,
    {
        Self {
            puzzle,
            solved: out.goal_reached,
            stats: out.stats,
            routes: if out.goal_reached { vec![RouteReport::from_path(&out.path, pos)] } else { vec![] },
        }
    }

    pub fn from_co_optimal<S>(puzzle: &'static str, out: &CoOptimalOutcome<S>, pos: impl Fn(&S) -> Pos) -> Self
    where
        S: SearchState,
    {
        Self {
            puzzle,
            solved: !out.paths.is_empty(),
            stats: out.stats,
            routes: out.paths.iter().map(|p| RouteReport::from_path(p, &pos)).collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Human-readable summary with each route drawn over `grid`.
    pub fn render_text(&self, grid: &CharGrid) -> String {
        let mut out = Vec::new();
        out.push(format!(
            "{}: {} ({} expanded, {} routes)",
            self.puzzle,
            if self.solved { "solved" } else { "no solution" },
            self.stats.expanded,
            self.routes.len()
        ));
        for (i, route) in self.routes.iter().enumerate() {
            let inner = route.cells.get(1..route.cells.len().saturating_sub(1)).unwrap_or(&[]);
            out.push(format!("route {}: cost {} gain {} depth {}", i + 1, route.cost, route.gain, route.depth));
            out.push(grid.overlay(inner, 'o'));
        }
        out.iter().join("\n")
    }
}

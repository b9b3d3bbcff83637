use std::sync::Arc;

use bitvec::prelude::*;
use statesearch_core::{BranchAndBound, SearchOptions, SearchOutcome, SearchPath, SearchState};

use crate::error::PuzzleError;
use crate::grid::{CharGrid, Pos, STEPS};

/// Reward field: digits pay out once when first stepped on, `#` blocks,
/// `S` marks the start and pays nothing.
#[derive(Debug)]
pub struct Field {
    pub grid: CharGrid,
    rewards: Vec<i64>,
    walls: BitVec,
    /// Cell indices by reward, largest first.
    by_reward: Vec<usize>,
    pub start: Pos,
    pub budget: i64,
}

impl Field {
    pub fn parse(input: &str, budget: i64) -> Result<Self, PuzzleError> {
        Self::from_grid(CharGrid::parse(input)?, budget)
    }

    pub fn from_grid(grid: CharGrid, budget: i64) -> Result<Self, PuzzleError> {
        if budget < 0 {
            return Err(PuzzleError::NegativeBudget(budget));
        }
        grid.check_cells(|c| c.is_ascii_digit() || c == '#' || c == 'S')?;
        let start = grid.find_unique('S')?;
        let rewards: Vec<i64> = grid
            .positions()
            .map(|(_, c)| c.to_digit(10).map(i64::from).unwrap_or(0))
            .collect();
        let walls: BitVec = grid.positions().map(|(_, c)| c == '#').collect();
        let mut by_reward: Vec<usize> = (0..rewards.len()).filter(|&i| rewards[i] > 0).collect();
        by_reward.sort_by(|&a, &b| rewards[b].cmp(&rewards[a]).then(a.cmp(&b)));
        Ok(Self { grid, rewards, walls, by_reward, start, budget })
    }

    pub fn is_open(&self, pos: Pos) -> bool {
        self.grid.contains(pos) && !self.walls[self.grid.index(pos)]
    }

    /// Sum of the `moves` largest rewards not yet in `collected`; no walk of
    /// `moves` steps can collect more.
    fn best_remaining(&self, collected: &BitSlice, moves: i64) -> i64 {
        let moves = usize::try_from(moves).unwrap_or(0);
        self.by_reward
            .iter()
            .filter(|&&i| !collected[i])
            .take(moves)
            .map(|&i| self.rewards[i])
            .sum()
    }
}

#[derive(Clone, Debug)]
pub struct HarvestState {
    pub pos: Pos,
    pub steps: i64,
    pub gain: i64,
    collected: BitVec,
    field: Arc<Field>,
}

impl HarvestState {
    pub fn start(field: &Arc<Field>) -> Self {
        let mut collected = bitvec![0; field.rewards.len()];
        collected.set(field.grid.index(field.start), true);
        Self { pos: field.start, steps: 0, gain: 0, collected, field: Arc::clone(field) }
    }

    pub fn collected_count(&self) -> usize {
        self.collected.count_ones()
    }
}

impl SearchState for HarvestState {
    type Fingerprint = (Pos, i64, BitVec);

    fn fingerprint(&self) -> Self::Fingerprint {
        (self.pos, self.steps, self.collected.clone())
    }

    fn gain(&self) -> i64 {
        self.gain
    }

    fn cost(&self) -> i64 {
        self.steps
    }

    fn max_cost(&self) -> i64 {
        self.field.budget
    }

    fn potential_gain(&self) -> i64 {
        self.field.best_remaining(&self.collected, self.field.budget - self.steps)
    }

    fn next_search_states(&self, _previous: Option<&Self>) -> Vec<Self> {
        STEPS
            .iter()
            .map(|&(dx, dy)| (self.pos.0 + dx, self.pos.1 + dy))
            .filter(|&p| self.field.is_open(p))
            .map(|pos| {
                let i = self.field.grid.index(pos);
                let mut next = HarvestState {
                    pos,
                    steps: self.steps + 1,
                    gain: self.gain,
                    collected: self.collected.clone(),
                    field: Arc::clone(&self.field),
                };
                if !self.collected[i] {
                    next.gain += self.field.rewards[i];
                    next.collected.set(i, true);
                }
                next
            })
            .collect()
    }
}

/// Richest walk of exactly `budget` steps; the bare start when no walk pays.
pub fn solve(field: &Arc<Field>, options: SearchOptions) -> SearchOutcome<HarvestState> {
    BranchAndBound::new(SearchPath::start(HarvestState::start(field)))
        .with_options(options)
        .run()
}

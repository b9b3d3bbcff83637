use std::sync::Arc;

use bitvec::prelude::*;
use statesearch_core::{AStar, CoOptimalAStar, CoOptimalOutcome, Goal, SearchOptions, SearchOutcome, SearchPath, SearchState};

use crate::error::PuzzleError;
use crate::grid::{CharGrid, Pos, STEPS};

/// `#` wall, `.` floor, `S` start, `E` exit.
#[derive(Debug)]
pub struct Maze {
    pub grid: CharGrid,
    walls: BitVec,
    pub start: Pos,
    pub end: Pos,
}

impl Maze {
    pub fn parse(input: &str) -> Result<Self, PuzzleError> {
        Self::from_grid(CharGrid::parse(input)?)
    }

    pub fn from_grid(grid: CharGrid) -> Result<Self, PuzzleError> {
        grid.check_cells(|c| matches!(c, '#' | '.' | 'S' | 'E'))?;
        let start = grid.find_unique('S')?;
        let end = grid.find_unique('E')?;
        let walls: BitVec = grid.positions().map(|(_, c)| c == '#').collect();
        Ok(Self { grid, walls, start, end })
    }

    pub fn is_open(&self, pos: Pos) -> bool {
        self.grid.contains(pos) && !self.walls[self.grid.index(pos)]
    }

    fn distance_to_end(&self, (x, y): Pos) -> i64 {
        i64::from((x - self.end.0).abs() + (y - self.end.1).abs())
    }
}

/// Walker position in a [`Maze`]; one unit of cost per move.
#[derive(Clone, Debug)]
pub struct MazeState {
    pub pos: Pos,
    pub steps: i64,
    maze: Arc<Maze>,
}

impl MazeState {
    pub fn start(maze: &Arc<Maze>) -> Self {
        Self { pos: maze.start, steps: 0, maze: Arc::clone(maze) }
    }
}

impl SearchState for MazeState {
    type Fingerprint = Pos;

    fn fingerprint(&self) -> Pos {
        self.pos
    }

    fn cost(&self) -> i64 {
        self.steps
    }

    fn potential_gain(&self) -> i64 {
        -self.maze.distance_to_end(self.pos)
    }

    fn next_search_states(&self, previous: Option<&Self>) -> Vec<Self> {
        let back = previous.map(|p| p.pos);
        STEPS
            .iter()
            .map(|&(dx, dy)| (self.pos.0 + dx, self.pos.1 + dy))
            .filter(|&p| self.maze.is_open(p) && Some(p) != back)
            .map(|pos| MazeState { pos, steps: self.steps + 1, maze: Arc::clone(&self.maze) })
            .collect()
    }
}

pub fn solve(maze: &Arc<Maze>, options: SearchOptions) -> SearchOutcome<MazeState> {
    AStar::new(SearchPath::start(MazeState::start(maze)), Goal::with_fingerprint(maze.end))
        .with_options(options)
        .run()
}

/// Every shortest route from `S` to `E`.
pub fn solve_all(maze: &Arc<Maze>, options: SearchOptions) -> CoOptimalOutcome<MazeState> {
    CoOptimalAStar::new(SearchPath::start(MazeState::start(maze)), Goal::with_fingerprint(maze.end))
        .with_options(options)
        .run()
}

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use statesearch_core::{AStar, CoOptimalAStar, Goal, SearchOptions, SearchPath, SearchState};

/// Open grid with blocked cells; 4-neighbour unit moves.
struct Board {
    width: i32,
    height: i32,
    walls: HashSet<(i32, i32)>,
    goal: (i32, i32),
    manhattan: bool,
}

impl Board {
    fn open(&self, (x, y): (i32, i32)) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height && !self.walls.contains(&(x, y))
    }
}

#[derive(Clone)]
struct Walker {
    pos: (i32, i32),
    steps: i64,
    board: Arc<Board>,
}

impl SearchState for Walker {
    type Fingerprint = (i32, i32);

    fn fingerprint(&self) -> (i32, i32) {
        self.pos
    }

    fn cost(&self) -> i64 {
        self.steps
    }

    fn potential_gain(&self) -> i64 {
        if !self.board.manhattan {
            return 0;
        }
        let (gx, gy) = self.board.goal;
        -i64::from((self.pos.0 - gx).abs() + (self.pos.1 - gy).abs())
    }

    fn next_search_states(&self, _previous: Option<&Self>) -> Vec<Self> {
        // Fixed neighbour order for determinism: N, E, S, W
        [(0, -1), (1, 0), (0, 1), (-1, 0)]
            .into_iter()
            .map(|(dx, dy)| (self.pos.0 + dx, self.pos.1 + dy))
            .filter(|&p| self.board.open(p))
            .map(|pos| Walker { pos, steps: self.steps + 1, board: Arc::clone(&self.board) })
            .collect()
    }
}

fn board(width: i32, height: i32, walls: &[(i32, i32)], goal: (i32, i32), manhattan: bool) -> Arc<Board> {
    Arc::new(Board { width, height, walls: walls.iter().copied().collect(), goal, manhattan })
}

fn walker(board: &Arc<Board>, pos: (i32, i32)) -> Walker {
    Walker { pos, steps: 0, board: Arc::clone(board) }
}

fn brute_force_distance(board: &Board, start: (i32, i32)) -> Option<i64> {
    let mut dist: HashMap<(i32, i32), i64> = HashMap::new();
    let mut queue = VecDeque::from([start]);
    dist.insert(start, 0);
    while let Some(p) = queue.pop_front() {
        let d = dist[&p];
        if p == board.goal {
            return Some(d);
        }
        for (dx, dy) in [(0, -1), (1, 0), (0, 1), (-1, 0)] {
            let n = (p.0 + dx, p.1 + dy);
            if board.open(n) && !dist.contains_key(&n) {
                dist.insert(n, d + 1);
                queue.push_back(n);
            }
        }
    }
    None
}

#[test]
fn zero_heuristic_matches_brute_force_on_4x4() {
    let walls = [(1, 1)];
    for goal in [(3, 3), (1, 2), (0, 3), (3, 0), (2, 1)] {
        let b = board(4, 4, &walls, goal, false);
        let path = AStar::new(SearchPath::start(walker(&b, (0, 0))), Goal::with_fingerprint(goal)).find_path();
        assert_eq!(path.last().pos, goal);
        assert_eq!(Some(path.cost()), brute_force_distance(&b, (0, 0)), "goal {goal:?}");
    }
}

#[test]
fn repeated_runs_return_same_cost_and_path() {
    let b = board(6, 6, &[(2, 2), (3, 2), (2, 3)], (5, 5), true);
    let astar = AStar::new(SearchPath::start(walker(&b, (0, 0))), Goal::with_fingerprint((5, 5)));
    let first = astar.find_path();
    for _ in 0..5 {
        let again = astar.find_path();
        assert_eq!(again.cost(), first.cost());
        assert_eq!(again.fingerprints(), first.fingerprints());
    }
}

#[test]
fn wall_with_single_gap_forces_one_crossing() {
    let walls: Vec<(i32, i32)> = (0..5).filter(|&y| y != 2).map(|y| (2, y)).collect();
    let b = board(5, 5, &walls, (4, 4), true);
    let out = AStar::new(SearchPath::start(walker(&b, (0, 0))), Goal::with_fingerprint((4, 4)))
        .with_options(SearchOptions::verbose(3))
        .run();
    assert!(out.goal_reached);
    assert_eq!(out.path.cost(), 8);
    assert_eq!(out.path.depth(), 9);
    let crossings = out.path.search_states().iter().filter(|w| w.pos.0 == 2).count();
    assert_eq!(crossings, 1);
    assert!(out.path.search_states().iter().any(|w| w.pos == (2, 2)));
}

#[test]
fn walled_off_goal_returns_best_effort_path() {
    let walls: Vec<(i32, i32)> = (0..5).map(|y| (2, y)).collect();
    let b = board(5, 5, &walls, (4, 4), false);
    let out = AStar::new(SearchPath::start(walker(&b, (0, 0))), Goal::with_fingerprint((4, 4))).run();
    assert!(!out.goal_reached);
    assert_ne!(out.path.last().pos, (4, 4));
    assert!(out.path.search_states().iter().all(|w| w.pos.0 < 2));
}

#[test]
fn multiple_searches_run_on_separate_threads() {
    let b = board(8, 8, &[(3, 3), (4, 3), (3, 4)], (7, 7), true);
    let costs: Vec<i64> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let b = Arc::clone(&b);
                scope.spawn(move || {
                    let start = SearchPath::start(walker(&b, (i, 0)));
                    AStar::new(start, Goal::with_fingerprint((7, 7))).find_path()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().expect("search thread").cost()).collect()
    });
    assert_eq!(costs, vec![14, 13, 12, 11]);
}

/// Grid walker that records how often each cell is expanded.
#[derive(Clone)]
struct CountingWalker {
    pos: (i32, i32),
    steps: i64,
    expansions: Rc<RefCell<HashMap<(i32, i32), u32>>>,
}

impl SearchState for CountingWalker {
    type Fingerprint = (i32, i32);
    fn fingerprint(&self) -> (i32, i32) {
        self.pos
    }
    fn cost(&self) -> i64 {
        self.steps
    }
    fn next_search_states(&self, _previous: Option<&Self>) -> Vec<Self> {
        *self.expansions.borrow_mut().entry(self.pos).or_default() += 1;
        [(0, -1), (1, 0), (0, 1), (-1, 0)]
            .into_iter()
            .map(|(dx, dy)| (self.pos.0 + dx, self.pos.1 + dy))
            .filter(|&(x, y)| (0..5).contains(&x) && (0..5).contains(&y))
            .map(|pos| CountingWalker { pos, steps: self.steps + 1, expansions: Rc::clone(&self.expansions) })
            .collect()
    }
}

#[test]
fn visited_states_are_expanded_at_most_once() {
    let expansions = Rc::new(RefCell::new(HashMap::new()));
    let start = CountingWalker { pos: (0, 0), steps: 0, expansions: Rc::clone(&expansions) };
    // Unreachable goal forces the whole 5x5 board to be drained.
    let out = AStar::new(SearchPath::start(start), Goal::with_fingerprint((9, 9))).run();
    assert!(!out.goal_reached);
    let counts = expansions.borrow();
    assert_eq!(counts.len(), 25);
    assert!(counts.values().all(|&n| n == 1));
    assert_eq!(out.stats.expanded, 25);
    assert_eq!(out.stats.pushed, 25);
}

#[derive(Clone, Debug)]
struct DeadEnd;

impl SearchState for DeadEnd {
    type Fingerprint = &'static str;
    fn fingerprint(&self) -> &'static str {
        "dead-end"
    }
    fn cost(&self) -> i64 {
        0
    }
    fn next_search_states(&self, _previous: Option<&Self>) -> Vec<Self> {
        Vec::new()
    }
}

#[test]
fn start_without_successors_returns_depth_one() {
    let path = AStar::new(SearchPath::start(DeadEnd), Goal::with_fingerprint("elsewhere")).find_path();
    assert_eq!(path.depth(), 1);
    let all = CoOptimalAStar::new(SearchPath::start(DeadEnd), Goal::with_fingerprint("elsewhere")).find_all_paths();
    assert!(all.is_empty());
}

#[test]
fn co_optimal_grid_paths_all_share_cost() {
    // 3x3 open grid: C(4, 2) = 6 monotone shortest paths corner to corner.
    let b = board(3, 3, &[], (2, 2), true);
    let out = CoOptimalAStar::new(SearchPath::start(walker(&b, (0, 0))), Goal::with_fingerprint((2, 2))).run();
    assert_eq!(out.cost, Some(4));
    assert_eq!(out.paths.len(), 6);
    let distinct: HashSet<Vec<(i32, i32)>> = out.paths.iter().map(|p| p.fingerprints()).collect();
    assert_eq!(distinct.len(), 6);
    assert!(out.paths.iter().all(|p| p.cost() == 4 && p.depth() == 5));
}

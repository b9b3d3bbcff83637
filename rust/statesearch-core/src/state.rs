use std::fmt::Debug;
use std::hash::Hash;

/// One configuration of a caller-defined world.
///
/// Two states with the same [`fingerprint`](SearchState::fingerprint) are the
/// same state as far as the engines are concerned; nothing else about a state
/// is ever compared.
///
/// All quantities are accumulated along the path that produced the state.
/// Problems that minimise cost and carry an estimate `h` of the remaining
/// cost express it as `potential_gain() == -h`, which turns the path priority
/// key into `cost + depth + h`.
pub trait SearchState: Sized {
    type Fingerprint: Eq + Hash + Clone + Debug;

    fn fingerprint(&self) -> Self::Fingerprint;

    /// Reward collected so far.
    fn gain(&self) -> i64 {
        0
    }

    /// Expenditure incurred so far.
    fn cost(&self) -> i64;

    /// Budget ceiling; branch-and-bound stops a branch once `cost >= max_cost`.
    fn max_cost(&self) -> i64 {
        i64::MAX
    }

    /// Optimistic estimate of the gain still obtainable from here.
    fn potential_gain(&self) -> i64 {
        0
    }

    /// Self-declared end of search, checked alongside the explicit goal.
    fn is_terminal(&self) -> bool {
        false
    }

    /// Successors of this state. `previous` is the state this one was reached
    /// from, `None` for the first expansion of a path.
    fn next_search_states(&self, previous: Option<&Self>) -> Vec<Self>;

    fn same_state(&self, other: &Self) -> bool {
        self.fingerprint() == other.fingerprint()
    }
}

/// Identity an engine searches for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Goal<F> {
    fingerprint: F,
}

impl<F: Eq + Hash + Clone + Debug> Goal<F> {
    pub fn of<S: SearchState<Fingerprint = F>>(state: &S) -> Self {
        Self { fingerprint: state.fingerprint() }
    }

    /// Goal matched by an explicit, possibly coarser, fingerprint instead of
    /// one derived from a concrete state.
    pub fn with_fingerprint(fingerprint: F) -> Self {
        Self { fingerprint }
    }

    pub fn fingerprint(&self) -> &F {
        &self.fingerprint
    }
}

/// `fingerprint == goal OR is_terminal()`; without a goal only the state's own
/// marker counts.
pub(crate) fn is_goal<S: SearchState>(state: &S, goal: Option<&Goal<S::Fingerprint>>) -> bool {
    if state.is_terminal() {
        return true;
    }
    goal.map(|g| state.fingerprint() == g.fingerprint).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct Cell {
        pos: (i32, i32),
        facing: u8,
        done: bool,
    }

    impl SearchState for Cell {
        type Fingerprint = String;
        fn fingerprint(&self) -> String {
            format!("{},{}:{}", self.pos.0, self.pos.1, self.facing)
        }
        fn cost(&self) -> i64 {
            0
        }
        fn is_terminal(&self) -> bool {
            self.done
        }
        fn next_search_states(&self, _previous: Option<&Self>) -> Vec<Self> {
            Vec::new()
        }
    }

    #[test]
    fn goal_matches_by_fingerprint_only() {
        let a = Cell { pos: (1, 2), facing: 0, done: false };
        let b = Cell { pos: (1, 2), facing: 0, done: false };
        let c = Cell { pos: (1, 2), facing: 1, done: false };
        let goal = Goal::of(&a);
        assert!(a.same_state(&b));
        assert!(is_goal(&b, Some(&goal)));
        assert!(!is_goal(&c, Some(&goal)));
    }

    #[test]
    fn override_fingerprint_goal() {
        let goal = Goal::with_fingerprint("1,2:1".to_string());
        let c = Cell { pos: (1, 2), facing: 1, done: false };
        assert!(is_goal(&c, Some(&goal)));
        assert_eq!(goal.fingerprint(), "1,2:1");
    }

    #[test]
    fn terminal_marker_counts_with_or_without_goal() {
        let done = Cell { pos: (9, 9), facing: 0, done: true };
        let goal = Goal::with_fingerprint("0,0:0".to_string());
        assert!(is_goal(&done, Some(&goal)));
        assert!(is_goal(&done, None));
        let open = Cell { pos: (9, 9), facing: 0, done: false };
        assert!(!is_goal(&open, None));
    }
}

use std::fmt;
use std::sync::Arc;

use crate::state::SearchState;

struct Link<S> {
    state: S,
    parent: Option<Arc<Link<S>>>,
}

impl<S> Drop for Link<S> {
    fn drop(&mut self) {
        // Unlink iteratively; deep chains would otherwise recurse once per state.
        let mut next = self.parent.take();
        while let Some(link) = next {
            match Arc::try_unwrap(link) {
                Ok(mut owned) => next = owned.parent.take(),
                Err(_) => break,
            }
        }
    }
}

/// Non-empty sequence of states `[start, ..., last]`.
///
/// Paths are persistent: [`add`](SearchPath::add) returns a new path sharing
/// every earlier state with its parent, so one path can be branched into many
/// successors without copying history.
pub struct SearchPath<S> {
    head: Arc<Link<S>>,
    depth: usize,
}

impl<S> Clone for SearchPath<S> {
    fn clone(&self) -> Self {
        Self { head: Arc::clone(&self.head), depth: self.depth }
    }
}

impl<S> SearchPath<S> {
    pub fn start(state: S) -> Self {
        Self { head: Arc::new(Link { state, parent: None }), depth: 1 }
    }

    /// Branches this path with one more state. `self` is left untouched.
    pub fn add(&self, state: S) -> Self {
        Self {
            head: Arc::new(Link { state, parent: Some(Arc::clone(&self.head)) }),
            depth: self.depth + 1,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn last(&self) -> &S {
        &self.head.state
    }

    /// State `last` was reached from.
    pub fn previous(&self) -> Option<&S> {
        self.head.parent.as_deref().map(|l| &l.state)
    }

    pub fn first(&self) -> &S {
        let mut link: &Link<S> = &self.head;
        while let Some(parent) = link.parent.as_deref() {
            link = parent;
        }
        &link.state
    }

    /// States from `last` back to `start`.
    pub fn iter_rev(&self) -> impl Iterator<Item = &S> + '_ {
        let mut cur: Option<&Link<S>> = Some(&self.head);
        std::iter::from_fn(move || {
            let link = cur?;
            cur = link.parent.as_deref();
            Some(&link.state)
        })
    }

    /// States in path order, `start` first.
    pub fn search_states(&self) -> Vec<&S> {
        let mut out: Vec<&S> = self.iter_rev().collect();
        out.reverse();
        out
    }
}

impl<S: SearchState> SearchPath<S> {
    pub fn gain(&self) -> i64 {
        self.last().gain()
    }

    pub fn cost(&self) -> i64 {
        self.last().cost()
    }

    pub fn max_cost(&self) -> i64 {
        self.last().max_cost()
    }

    pub fn potential_gain(&self) -> i64 {
        self.last().potential_gain()
    }

    /// `cost + depth - (gain + potential_gain)`; lower is explored first.
    pub fn priority_key(&self) -> i64 {
        let depth = i64::try_from(self.depth).unwrap_or(i64::MAX);
        self.cost()
            .saturating_add(depth)
            .saturating_sub(self.gain().saturating_add(self.potential_gain()))
    }

    pub fn fingerprints(&self) -> Vec<S::Fingerprint> {
        self.search_states().into_iter().map(|s| s.fingerprint()).collect()
    }
}

impl<S: fmt::Debug> fmt::Debug for SearchPath<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchPath")
            .field("depth", &self.depth)
            .field("states", &self.search_states())
            .finish()
    }
}

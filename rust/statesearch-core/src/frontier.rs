use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::path::SearchPath;
use crate::state::SearchState;

struct Entry<S> {
    key: i64,
    seq: u64,
    path: SearchPath<S>,
}

impl<S> PartialEq for Entry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.seq == other.seq
    }
}
impl<S> Eq for Entry<S> {}
impl<S> PartialOrd for Entry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<S> Ord for Entry<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is max-heap; invert ordering for min-heap behavior
        (other.key, other.seq).cmp(&(self.key, self.seq))
    }
}

/// Open list ordered by [`SearchPath::priority_key`] ascending. Equal keys pop
/// in the order they were pushed.
pub struct Frontier<S> {
    heap: BinaryHeap<Entry<S>>,
    seq: u64,
    high_water: usize,
}

impl<S: SearchState> Frontier<S> {
    pub fn new() -> Self {
        Self { heap: BinaryHeap::new(), seq: 0, high_water: 0 }
    }

    pub fn push(&mut self, path: SearchPath<S>) {
        let key = path.priority_key();
        self.seq = self.seq.wrapping_add(1);
        self.heap.push(Entry { key, seq: self.seq, path });
        self.high_water = self.high_water.max(self.heap.len());
    }

    pub fn pop(&mut self) -> Option<SearchPath<S>> {
        self.heap.pop().map(|e| e.path)
    }

    /// Key of the path that would pop next.
    pub fn peek_key(&self) -> Option<i64> {
        self.heap.peek().map(|e| e.key)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Largest size the queue reached.
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}

impl<S: SearchState> Default for Frontier<S> {
    fn default() -> Self {
        Self::new()
    }
}

//! Best-first frontier.
//!
//! Selection order is "highest priority first, earliest insertion on ties",
//! which is exactly what a linear scan for the first strict maximum over an
//! insertion-ordered list yields, at O(log n) per operation.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::rc::Rc;

use crate::node::SearchNode;

/// A frontier entry wrapping a node with its insertion sequence number.
///
/// `BinaryHeap` is a max-heap: higher priority pops first, and on equal
/// priority `Reverse(seq)` makes the older entry the larger one.
struct FrontierEntry<S> {
    seq: Reverse<u64>,
    node: Rc<SearchNode<S>>,
}

impl<S> PartialEq for FrontierEntry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<S> Eq for FrontierEntry<S> {}

impl<S> PartialOrd for FrontierEntry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for FrontierEntry<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.node
            .cmp_priority(&other.node)
            .then(self.seq.cmp(&other.seq))
    }
}

/// Collection of not-yet-expanded nodes.
pub struct Frontier<S> {
    heap: BinaryHeap<FrontierEntry<S>>,
    next_seq: u64,
    high_water: usize,
}

impl<S> Frontier<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
            high_water: 0,
        }
    }

    pub fn push(&mut self, node: Rc<SearchNode<S>>) {
        self.heap.push(FrontierEntry {
            seq: Reverse(self.next_seq),
            node,
        });
        self.next_seq += 1;
        self.high_water = self.high_water.max(self.heap.len());
    }

    /// Remove and return the highest-priority node; the earliest inserted
    /// wins among equal priorities.
    pub fn pop_best(&mut self) -> Option<Rc<SearchNode<S>>> {
        self.heap.pop().map(|e| e.node)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Largest size the frontier has reached.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}

impl<S> Default for Frontier<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameState, SnakeGame};
    use crate::types::Coord;

    fn node(priority: f64, x: i32) -> Rc<SearchNode<SnakeGame>> {
        let state = SnakeGame::with_layout(10, 1, vec![], vec![Coord::new(x, 0)], vec![], 0);
        Rc::new(SearchNode::new(None, state, priority, 1))
    }

    fn head_x(node: &SearchNode<SnakeGame>) -> i32 {
        node.state.body()[0].x
    }

    #[test]
    fn test_pops_highest_priority_first() {
        let mut frontier = Frontier::new();
        frontier.push(node(0.5, 0));
        frontier.push(node(2.0, 1));
        frontier.push(node(1.0, 2));

        let order: Vec<i32> = std::iter::from_fn(|| frontier.pop_best())
            .map(|n| head_x(&n))
            .collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_ties_resolve_to_insertion_order() {
        let mut frontier = Frontier::new();
        frontier.push(node(1.0, 0));
        frontier.push(node(3.0, 1));
        frontier.push(node(3.0, 2));
        frontier.push(node(3.0, 3));

        assert_eq!(head_x(&frontier.pop_best().unwrap()), 1);
        // A later push with the same priority still queues behind older entries
        frontier.push(node(3.0, 4));
        assert_eq!(head_x(&frontier.pop_best().unwrap()), 2);
        assert_eq!(head_x(&frontier.pop_best().unwrap()), 3);
        assert_eq!(head_x(&frontier.pop_best().unwrap()), 4);
        assert_eq!(head_x(&frontier.pop_best().unwrap()), 0);
        assert!(frontier.pop_best().is_none());
    }

    #[test]
    fn test_tracks_high_water() {
        let mut frontier = Frontier::new();
        assert!(frontier.is_empty());
        frontier.push(node(1.0, 0));
        frontier.push(node(1.0, 1));
        frontier.push(node(1.0, 2));
        let _ = frontier.pop_best();
        let _ = frontier.pop_best();
        frontier.push(node(1.0, 3));
        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.high_water(), 3);
    }
}

//! Search node: one game state in the search tree.

use std::cmp::Ordering;
use std::rc::Rc;

use crate::game::GameState;

/// An immutable search node.
///
/// Nodes share their parent through `Rc`, so the parent chain of any node
/// that is still reachable (from the frontier or from a returned path) stays
/// alive, and everything else is freed as soon as it leaves the frontier.
#[derive(Debug)]
pub struct SearchNode<S> {
    /// Game state at this point of the search.
    pub state: S,
    /// Frontier ordering key. The root carries 0.
    pub priority: f64,
    /// Node this one was expanded from (`None` for the root).
    pub parent: Option<Rc<SearchNode<S>>>,
    /// Score the search is trying to reach.
    pub target: u32,
}

impl<S: GameState> SearchNode<S> {
    #[must_use]
    pub fn new(parent: Option<Rc<SearchNode<S>>>, state: S, priority: f64, target: u32) -> Self {
        Self {
            state,
            priority,
            parent,
            target,
        }
    }

    /// The parentless start node.
    #[must_use]
    pub fn root(state: S, target: u32) -> Self {
        Self::new(None, state, 0.0, target)
    }

    #[must_use]
    pub fn is_goal(&self) -> bool {
        self.state.score() >= self.target
    }

    /// State of the parent. A successor equal to it would undo the last move.
    #[must_use]
    pub fn parent_state(&self) -> Option<&S> {
        self.parent.as_ref().map(|p| &p.state)
    }

    /// Number of moves between this node and the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut cursor = self.parent.as_deref();
        while let Some(node) = cursor {
            depth += 1;
            cursor = node.parent.as_deref();
        }
        depth
    }
}

impl<S> SearchNode<S> {
    /// Compare by priority alone, under the IEEE total order.
    #[must_use]
    pub fn cmp_priority(&self, other: &Self) -> Ordering {
        self.priority.total_cmp(&other.priority)
    }
}

/// Unlinks the parent chain iteratively; long solves build chains deep
/// enough to overflow the stack with the default recursive drop.
impl<S> Drop for SearchNode<S> {
    fn drop(&mut self) {
        let mut parent = self.parent.take();
        while let Some(node) = parent {
            match Rc::try_unwrap(node) {
                Ok(mut inner) => parent = inner.parent.take(),
                Err(_) => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::SnakeGame;
    use crate::types::{Coord, Direction};

    fn corridor() -> SnakeGame {
        SnakeGame::with_layout(
            4,
            1,
            vec![],
            vec![Coord::new(0, 0)],
            vec![Coord::new(1, 0)],
            0,
        )
    }

    #[test]
    fn test_root_has_no_parent_and_zero_priority() {
        let root = SearchNode::root(corridor(), 1);
        assert!(root.parent.is_none());
        assert_eq!(root.priority, 0.0);
        assert_eq!(root.depth(), 0);
        assert!(!root.is_goal());
    }

    #[test]
    fn test_goal_when_score_reaches_target() {
        let root = Rc::new(SearchNode::root(corridor(), 1));
        let fed = root.state.apply_move(Direction::Right).unwrap();
        let child = SearchNode::new(Some(Rc::clone(&root)), fed, 10_000.5, 1);
        assert!(child.is_goal());
        assert_eq!(child.depth(), 1);
        assert_eq!(child.parent_state(), Some(&root.state));

        let zero_target = SearchNode::root(corridor(), 0);
        assert!(zero_target.is_goal());
    }

    #[test]
    fn test_priority_comparison_uses_total_order() {
        let low = SearchNode::new(None, corridor(), 0.25, 1);
        let high = SearchNode::new(None, corridor(), 0.75, 1);
        let nan = SearchNode::new(None, corridor(), f64::NAN, 1);

        assert_eq!(low.cmp_priority(&high), Ordering::Less);
        assert_eq!(high.cmp_priority(&low), Ordering::Greater);
        assert_eq!(low.cmp_priority(&low), Ordering::Equal);
        // Positive NaN sorts above every finite value
        assert_eq!(nan.cmp_priority(&high), Ordering::Greater);
    }
}

//! Path reconstruction: from a terminal node back to the root.

use crate::game::GameState;
use crate::node::SearchNode;
use crate::types::Direction;

/// Ordered states from the root to `node`, inclusive.
#[must_use]
pub fn reconstruct<S: GameState>(node: &SearchNode<S>) -> Vec<S> {
    let mut states = Vec::with_capacity(node.depth() + 1);
    let mut cursor = Some(node);
    while let Some(current) = cursor {
        states.push(current.state.clone());
        cursor = current.parent.as_deref();
    }
    states.reverse();
    states
}

/// Head movements between consecutive states of a path.
///
/// Fails if two consecutive heads are not adjacent, which means the path
/// did not come from single moves.
pub fn directions<S: GameState>(path: &[S]) -> Result<Vec<Direction>, String> {
    path.windows(2)
        .enumerate()
        .map(|(step, pair)| {
            let from = pair[0]
                .head()
                .ok_or_else(|| format!("State {} has no head", step))?;
            let to = pair[1]
                .head()
                .ok_or_else(|| format!("State {} has no head", step + 1))?;
            Direction::between(&from, &to).ok_or_else(|| {
                format!(
                    "Step {}: ({}, {}) -> ({}, {}) is not a single move",
                    step + 1,
                    from.x,
                    from.y,
                    to.x,
                    to.y
                )
            })
        })
        .collect()
}

/// Checks that every state is a neighbor of the one before it.
pub fn verify<S: GameState>(path: &[S]) -> Result<(), String> {
    for (step, pair) in path.windows(2).enumerate() {
        if !pair[0].neighbors().contains(&pair[1]) {
            return Err(format!(
                "Step {} is not reachable by one move from step {}",
                step + 1,
                step
            ));
        }
    }
    Ok(())
}

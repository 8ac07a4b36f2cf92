// Game state contract consumed by the solver, plus the grid Snake simulation
// that implements it.
//
// The solver never inspects board geometry directly. Everything it needs is
// behind `GameState`, so the search can run against any simulation (the tests
// drive it with scripted states).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

use crate::config::BoardConfig;
use crate::types::{Coord, Direction, FoodTarget};

/// Capabilities the search engine requires from a game state
///
/// Implementations must be immutable per step: `neighbors` returns fresh
/// states and never mutates `self`.
pub trait GameState: Clone + PartialEq {
    /// Current score; never decreases across one move
    fn score(&self) -> u32;

    /// All states reachable by exactly one admissible move
    fn neighbors(&self) -> Vec<Self>;

    /// Nearest food under the default policy, or the fallback target when
    /// `use_fallback` is set. `None` when the board holds no food.
    fn nearest_food(&self, use_fallback: bool) -> Option<FoodTarget>;

    /// Moves taken since the search root
    fn moves(&self) -> i64;

    /// Snake cells, head first
    fn body(&self) -> &[Coord];

    /// Every food cell on the board; only used for diagnostics
    fn food(&self) -> &[Coord] {
        &[]
    }

    fn head(&self) -> Option<Coord> {
        self.body().first().copied()
    }
}

/// Snake on a rectangular grid with rocks and a fixed number of food items
///
/// Food respawn is a pure function of `(seed, score)`, so two states that
/// compare equal always evolve identically.
#[derive(Debug, Clone)]
pub struct SnakeGame {
    width: i32,
    height: i32,
    rocks: Arc<Vec<Coord>>,
    body: Vec<Coord>,
    food: Vec<Coord>,
    score: u32,
    moves: i64,
    seed: u64,
}

/// Move counters differ between otherwise identical positions, so they are
/// left out of equality; the no-undo rule relies on that.
impl PartialEq for SnakeGame {
    fn eq(&self, other: &Self) -> bool {
        self.body == other.body && self.food == other.food && self.score == other.score
    }
}

impl SnakeGame {
    /// Builds the initial game from board configuration
    ///
    /// The snake starts at `start` with its body trailing to the left (or
    /// stacked on the start cell when the board is too narrow). Food items are
    /// placed with the board seed.
    pub fn new(board: &BoardConfig) -> Result<Self, String> {
        if board.width <= 0 || board.height <= 0 {
            return Err(format!(
                "Board must have positive dimensions, got {}x{}",
                board.width, board.height
            ));
        }

        let mut game = SnakeGame {
            width: board.width,
            height: board.height,
            rocks: Arc::new(board.rocks.clone()),
            body: Vec::new(),
            food: Vec::new(),
            score: 0,
            moves: 0,
            seed: board.seed,
        };

        if game.is_blocked(&board.start) {
            return Err(format!(
                "Start cell ({}, {}) is out of bounds or on a rock",
                board.start.x, board.start.y
            ));
        }

        let length = board.initial_length.max(1);
        let mut tail = board.start;
        game.body.push(tail);
        for _ in 1..length {
            let next = Direction::Left.apply(&tail);
            if !game.is_blocked(&next) && !game.body.contains(&next) {
                tail = next;
            }
            game.body.push(tail);
        }

        for slot in 0..board.food_count {
            if let Some(cell) = game.spawn_cell(slot as u64) {
                game.food.push(cell);
            }
        }

        Ok(game)
    }

    /// Builds a game from explicit parts, for fixed layouts
    pub fn with_layout(
        width: i32,
        height: i32,
        rocks: Vec<Coord>,
        body: Vec<Coord>,
        food: Vec<Coord>,
        seed: u64,
    ) -> Self {
        SnakeGame {
            width,
            height,
            rocks: Arc::new(rocks),
            body,
            food,
            score: 0,
            moves: 0,
            seed,
        }
    }

    /// Directions the snake may legally take from this state
    ///
    /// A move is legal if it:
    /// - stays in bounds
    /// - does not hit a rock
    /// - does not reverse onto the neck
    /// - does not hit the body, except the tail cell, which moves away
    ///   unless the move eats
    pub fn legal_moves(&self) -> Vec<Direction> {
        let head = match self.body.first() {
            Some(head) => *head,
            None => return vec![],
        };
        let neck = self.body.get(1).copied();

        Direction::all()
            .iter()
            .filter(|&&dir| {
                let next = dir.apply(&head);
                if self.is_blocked(&next) {
                    return false;
                }

                // Can't reverse onto neck
                if neck == Some(next) {
                    return false;
                }

                let eats = self.food.contains(&next);
                let body_check_len = if eats {
                    self.body.len()
                } else {
                    self.body.len().saturating_sub(1)
                };
                !self.body[..body_check_len].contains(&next)
            })
            .copied()
            .collect()
    }

    /// Applies a legal move, returning the successor state
    pub fn apply_move(&self, dir: Direction) -> Option<SnakeGame> {
        if !self.legal_moves().contains(&dir) {
            return None;
        }

        let head = dir.apply(&self.body[0]);
        let mut next = self.clone();
        next.moves += 1;
        next.body.insert(0, head);

        match next.food.iter().position(|f| *f == head) {
            Some(eaten) => {
                next.score += 1;
                next.food.remove(eaten);
                if let Some(cell) = next.spawn_cell(eaten as u64) {
                    next.food.insert(eaten, cell);
                }
            }
            None => {
                next.body.pop();
            }
        }

        Some(next)
    }

    fn is_blocked(&self, coord: &Coord) -> bool {
        coord.x < 0
            || coord.x >= self.width
            || coord.y < 0
            || coord.y >= self.height
            || self.rocks.contains(coord)
    }

    /// Picks a free cell for a food item, deterministically from the state
    fn spawn_cell(&self, slot: u64) -> Option<Coord> {
        let free: Vec<Coord> = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| Coord { x, y }))
            .filter(|c| !self.is_blocked(c) && !self.body.contains(c) && !self.food.contains(c))
            .collect();

        if free.is_empty() {
            return None;
        }

        let mixed = self
            .seed
            .wrapping_mul(0x9E37_79B9_7F4A_7C15)
            .wrapping_add(u64::from(self.score) << 8)
            .wrapping_add(slot);
        let mut rng = StdRng::seed_from_u64(mixed);
        Some(free[rng.random_range(0..free.len())])
    }
}

impl GameState for SnakeGame {
    fn score(&self) -> u32 {
        self.score
    }

    fn neighbors(&self) -> Vec<Self> {
        self.legal_moves()
            .into_iter()
            .filter_map(|dir| self.apply_move(dir))
            .collect()
    }

    /// Nearest food by Manhattan distance; the fallback target is the
    /// farthest one
    fn nearest_food(&self, use_fallback: bool) -> Option<FoodTarget> {
        let head = self.head()?;
        let targets = self.food.iter().map(|food| FoodTarget {
            position: *food,
            distance: head.manhattan(food),
        });

        if use_fallback {
            // max_by_key keeps the last maximum; keep the first instead
            targets.fold(None, |best: Option<FoodTarget>, t| match best {
                Some(b) if b.distance >= t.distance => Some(b),
                _ => Some(t),
            })
        } else {
            targets.min_by_key(|t| t.distance)
        }
    }

    fn moves(&self) -> i64 {
        self.moves
    }

    fn body(&self) -> &[Coord] {
        &self.body
    }

    fn food(&self) -> &[Coord] {
        &self.food
    }
}

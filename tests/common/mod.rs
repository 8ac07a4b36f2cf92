// Scripted game states for driving the solver without a board
#![allow(dead_code)]

use snake_solver::game::GameState;
use snake_solver::types::{Coord, FoodTarget};

/// A tree of states that never scores
///
/// Every state has `branching` children and reports the same food distance,
/// so each child has a strictly lower priority than its parent (the moves
/// term shrinks) and the score never improves.
#[derive(Debug, Clone)]
pub struct Plateau {
    pub path: Vec<u8>,
    pub branching: u8,
    pub distance: i32,
    body: Vec<Coord>,
}

impl Plateau {
    pub fn new(branching: u8, distance: i32) -> Self {
        Plateau {
            path: Vec::new(),
            branching,
            distance,
            body: vec![Coord::new(0, 0)],
        }
    }

    fn child(&self, branch: u8) -> Self {
        let mut path = self.path.clone();
        path.push(branch);
        Plateau {
            body: vec![Coord::new(path.len() as i32, i32::from(branch))],
            path,
            branching: self.branching,
            distance: self.distance,
        }
    }
}

impl PartialEq for Plateau {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl GameState for Plateau {
    fn score(&self) -> u32 {
        0
    }

    fn neighbors(&self) -> Vec<Self> {
        (0..self.branching).map(|b| self.child(b)).collect()
    }

    fn nearest_food(&self, _use_fallback: bool) -> Option<FoodTarget> {
        Some(FoodTarget {
            position: Coord::new(-1, -1),
            distance: self.distance,
        })
    }

    fn moves(&self) -> i64 {
        self.path.len() as i64
    }

    fn body(&self) -> &[Coord] {
        &self.body
    }
}

/// An endless single-file chain of states with no score
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub n: u64,
}

impl GameState for Chain {
    fn score(&self) -> u32 {
        0
    }

    fn neighbors(&self) -> Vec<Self> {
        vec![Chain { n: self.n + 1 }]
    }

    fn nearest_food(&self, _use_fallback: bool) -> Option<FoodTarget> {
        None
    }

    fn moves(&self) -> i64 {
        self.n as i64
    }

    fn body(&self) -> &[Coord] {
        &[]
    }
}

/// Misbehaving collaborator: which contract term it breaks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    NegativeDistance,
    NegativeMoves,
    LosesScore,
}

/// One-step state whose successor breaks the contract
#[derive(Debug, Clone, PartialEq)]
pub struct Faulty {
    pub fault: Fault,
    pub depth: i64,
    pub score: u32,
}

impl Faulty {
    pub fn new(fault: Fault) -> Self {
        Faulty {
            fault,
            depth: 0,
            score: 5,
        }
    }
}

impl GameState for Faulty {
    fn score(&self) -> u32 {
        self.score
    }

    fn neighbors(&self) -> Vec<Self> {
        let score = if self.fault == Fault::LosesScore {
            self.score - 1
        } else {
            self.score
        };
        vec![Faulty {
            fault: self.fault,
            depth: self.depth + 1,
            score,
        }]
    }

    fn nearest_food(&self, _use_fallback: bool) -> Option<FoodTarget> {
        let distance = if self.fault == Fault::NegativeDistance {
            -2
        } else {
            1
        };
        Some(FoodTarget {
            position: Coord::new(0, 0),
            distance,
        })
    }

    fn moves(&self) -> i64 {
        if self.fault == Fault::NegativeMoves {
            -self.depth
        } else {
            self.depth
        }
    }

    fn body(&self) -> &[Coord] {
        &[]
    }
}

/// Scripted tree whose forks disagree on which food is worth chasing
///
/// ```text
/// root ─ a ─ b ─┬─ x                    nearest 0, fallback 9
///               └─ y ─ s ─┬─ p ─ g      p: nearest 0, fallback 9
///                         └─ q          q: nearest 9, fallback 0
/// ```
///
/// `y` is the mirror of `x` (nearest 9, fallback 0). Scores are 0 up to `y`,
/// 1 from `s`, and 2 at `g`. Each state's head sits at `(id, 0)` so trace
/// entries identify it.
#[derive(Debug, Clone, PartialEq)]
pub struct Fork {
    pub name: &'static str,
    body: Vec<Coord>,
}

/// (name, children, score, nearest distance, fallback distance, moves)
type ForkRow = (&'static str, &'static [&'static str], u32, i32, i32, i64);

static FORK_TABLE: [ForkRow; 9] = [
    ("root", &["a"], 0, 5, 5, 0),
    ("a", &["b"], 0, 5, 5, 1),
    ("b", &["x", "y"], 0, 5, 5, 2),
    ("x", &[], 0, 0, 9, 3),
    ("y", &["s"], 0, 9, 0, 3),
    ("s", &["p", "q"], 1, 5, 5, 4),
    ("p", &["g"], 1, 0, 9, 5),
    ("q", &[], 1, 9, 0, 5),
    ("g", &[], 2, 5, 5, 6),
];

impl Fork {
    pub fn at(name: &'static str) -> Self {
        Fork {
            name,
            body: vec![Coord::new(Self::id(name), 0)],
        }
    }

    pub fn id(name: &str) -> i32 {
        FORK_TABLE
            .iter()
            .position(|row| row.0 == name)
            .unwrap_or_else(|| panic!("unknown fork state {:?}", name)) as i32
    }

    fn row(&self) -> &'static ForkRow {
        &FORK_TABLE[Self::id(self.name) as usize]
    }
}

impl GameState for Fork {
    fn score(&self) -> u32 {
        self.row().2
    }

    fn neighbors(&self) -> Vec<Self> {
        self.row().1.iter().map(|&name| Fork::at(name)).collect()
    }

    fn nearest_food(&self, use_fallback: bool) -> Option<FoodTarget> {
        let row = self.row();
        Some(FoodTarget {
            position: Coord::new(-1, -1),
            distance: if use_fallback { row.4 } else { row.3 },
        })
    }

    fn moves(&self) -> i64 {
        self.row().5
    }

    fn body(&self) -> &[Coord] {
        &self.body
    }
}

/// Asserts no consecutive pair of moves undoes itself
pub fn assert_no_reversal<S: GameState + std::fmt::Debug>(path: &[S]) {
    for (i, window) in path.windows(3).enumerate() {
        assert_ne!(
            window[0], window[2],
            "step {} undoes step {} (state repeats two moves later)",
            i + 2,
            i + 1
        );
    }
}

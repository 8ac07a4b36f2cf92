// Best-first search for a move sequence that reaches a target score
//
// The engine repeatedly expands the current node, selects the best node of
// the frontier, and feeds its score to a StallTracker that decides whether
// to keep going, switch to the fallback food target, or give up with the best
// partial path. A solve is entirely synchronous; the only ways out are a goal,
// a give-up, a contract violation, or an external cancellation request.

use log::{debug, info, warn};
use serde::Serialize;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::SearchConfig;
use crate::error::SolveError;
use crate::frontier::Frontier;
use crate::game::GameState;
use crate::node::SearchNode;
use crate::path;
use crate::profiler::{self, Phase, ProfileGuard};
use crate::stall::{StallTracker, StallVerdict};
use crate::trace::{TraceEntry, TraceLogger};

/// Weight of the raw score in the priority; large enough that any score gain
/// outranks every tie-break term.
pub const SCORE_WEIGHT: f64 = 10_000.0;

/// Called with `(best_score, target)` whenever the best score improves
pub type ProgressFn = Box<dyn FnMut(u32, u32)>;

/// Cooperative cancellation flag, checked once per iteration
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Terminal outcome of a solve
#[derive(Debug, Clone, PartialEq)]
pub enum SolveResult<S> {
    /// The last state of `path` reaches the target
    Goal { path: Vec<S> },
    /// Both heuristics stalled, or nothing was left to expand
    GaveUp { path: Vec<S>, best_score: u32 },
    /// Stopped by a `CancelToken`
    Cancelled { path: Vec<S>, best_score: u32 },
}

impl<S: GameState> SolveResult<S> {
    pub fn path(&self) -> &[S] {
        match self {
            SolveResult::Goal { path }
            | SolveResult::GaveUp { path, .. }
            | SolveResult::Cancelled { path, .. } => path,
        }
    }

    pub fn is_goal(&self) -> bool {
        matches!(self, SolveResult::Goal { .. })
    }

    /// Best score seen by the search (for a goal, the final state's score)
    pub fn best_score(&self) -> u32 {
        match self {
            SolveResult::Goal { path } => path.last().map(|s| s.score()).unwrap_or(0),
            SolveResult::GaveUp { best_score, .. } | SolveResult::Cancelled { best_score, .. } => {
                *best_score
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SolveResult::Goal { .. } => "goal",
            SolveResult::GaveUp { .. } => "gave-up",
            SolveResult::Cancelled { .. } => "cancelled",
        }
    }
}

/// Counters for the most recent solve
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SolveStats {
    /// Nodes whose neighbors were generated
    pub expansions: u64,
    /// Nodes taken from the frontier
    pub selections: u64,
    /// Successors dropped because they undo the previous move
    pub rejected_reversals: u64,
    pub fallback_activations: u64,
    pub frontier_high_water: usize,
    pub best_score: u32,
}

/// Search engine. One instance may run several solves, one at a time; each
/// solve starts from fresh stagnation state and statistics.
pub struct Solver {
    target: u32,
    recursion_limit: u32,
    debug: bool,
    progress: Option<ProgressFn>,
    trace: TraceLogger,
    cancel: Option<CancelToken>,
    profile: bool,
    stats: SolveStats,
}

impl Solver {
    pub fn new(target: u32, recursion_limit: u32, debug: bool) -> Result<Self, SolveError> {
        if recursion_limit == 0 {
            return Err(SolveError::InvalidConfig {
                detail: "recursion limit must be at least 1".to_string(),
            });
        }

        Ok(Solver {
            target,
            recursion_limit,
            debug,
            progress: None,
            trace: TraceLogger::disabled(),
            cancel: None,
            profile: profiler::is_profiling_enabled(),
            stats: SolveStats::default(),
        })
    }

    pub fn from_config(config: &SearchConfig) -> Result<Self, SolveError> {
        Self::new(config.target, config.recursion_limit, config.debug)
    }

    pub fn with_progress<F>(mut self, progress: F) -> Self
    where
        F: FnMut(u32, u32) + 'static,
    {
        self.progress = Some(Box::new(progress));
        self
    }

    /// Debug iterations are also written to `trace` (only when debug is on)
    pub fn with_trace(mut self, trace: TraceLogger) -> Self {
        self.trace = trace;
        self
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn stats(&self) -> &SolveStats {
        &self.stats
    }

    /// Runs the search from `initial` until goal, give-up or cancellation
    ///
    /// # Errors
    /// Returns `SolveError::ContractViolation` if a state reports a negative
    /// food distance or move count, or a move lowers the score.
    pub fn solve<S: GameState>(&mut self, initial: S) -> Result<SolveResult<S>, SolveError> {
        self.stats = SolveStats::default();

        let mut current = Rc::new(SearchNode::root(initial, self.target));
        let mut frontier: Frontier<S> = Frontier::new();
        let mut tracker = StallTracker::new(current.state.score(), self.recursion_limit);
        let mut iteration: u64 = 0;

        info!(
            "Solving for score {} (start score {}, recursion limit {})",
            self.target,
            current.state.score(),
            self.recursion_limit
        );

        let result = loop {
            if current.is_goal() {
                info!(
                    "Found a solution: score {} in {} moves",
                    current.state.score(),
                    current.depth()
                );
                break SolveResult::Goal {
                    path: path::reconstruct(&current),
                };
            }

            if self.cancel.as_ref().map_or(false, |c| c.is_cancelled()) {
                warn!(
                    "Solve cancelled after {} iterations (best score {})",
                    iteration,
                    tracker.best_score()
                );
                break SolveResult::Cancelled {
                    path: path::reconstruct(&current),
                    best_score: tracker.best_score(),
                };
            }

            {
                let _guard = ProfileGuard::new(Phase::Expand, self.profile);
                self.expand(&current, tracker.fallback(), &mut frontier)?;
            }

            let selected = {
                let _guard = ProfileGuard::new(Phase::Select, self.profile);
                frontier.pop_best()
            };
            current = match selected {
                Some(node) => node,
                None => {
                    warn!(
                        "Frontier exhausted; best solution found so far scores {}",
                        tracker.best_score()
                    );
                    break SolveResult::GaveUp {
                        path: path::reconstruct(&current),
                        best_score: tracker.best_score(),
                    };
                }
            };
            self.stats.selections += 1;

            match tracker.observe(current.state.score()) {
                StallVerdict::Improved => {
                    debug!("Best score now {}", tracker.best_score());
                    if let Some(progress) = self.progress.as_mut() {
                        progress(tracker.best_score(), self.target);
                    }
                }
                StallVerdict::Stalled => {}
                StallVerdict::FallbackEngaged => {
                    self.stats.fallback_activations += 1;
                    info!(
                        "No progress for {} selections at score {}; targeting fallback food",
                        self.recursion_limit,
                        tracker.best_score()
                    );
                }
                StallVerdict::Exhausted => {
                    warn!(
                        "Could not reach score {}; best solution found so far scores {}",
                        self.target,
                        tracker.best_score()
                    );
                    break SolveResult::GaveUp {
                        path: path::reconstruct(&current),
                        best_score: tracker.best_score(),
                    };
                }
            }

            if self.debug {
                self.trace_iteration(iteration, &current, tracker.fallback());
            }
            iteration += 1;
        };

        self.stats.frontier_high_water = frontier.high_water();
        self.stats.best_score = result.best_score();
        self.trace.flush();
        if self.profile {
            profiler::report();
        }

        Ok(result)
    }

    /// Pushes every successor of `current` that does not undo its last move
    fn expand<S: GameState>(
        &mut self,
        current: &Rc<SearchNode<S>>,
        use_fallback: bool,
        frontier: &mut Frontier<S>,
    ) -> Result<(), SolveError> {
        self.stats.expansions += 1;
        let score = current.state.score();

        for next in current.state.neighbors() {
            if current.parent_state() == Some(&next) {
                self.stats.rejected_reversals += 1;
                continue;
            }

            if next.score() < score {
                return Err(SolveError::contract(format!(
                    "score dropped from {} to {} across one move",
                    score,
                    next.score()
                )));
            }

            let priority = priority(&next, use_fallback)?;
            frontier.push(Rc::new(SearchNode::new(
                Some(Rc::clone(current)),
                next,
                priority,
                self.target,
            )));
        }

        Ok(())
    }

    fn trace_iteration<S: GameState>(&self, iteration: u64, node: &SearchNode<S>, fallback: bool) {
        let food = node.state.nearest_food(fallback);
        let position = node.state.head();

        match (position, food) {
            (Some(p), Some(f)) => info!(
                "[{}] position ({}, {}), food at ({}, {}) distance {}, priority {:.4}, score {}",
                iteration, p.x, p.y, f.position.x, f.position.y, f.distance, node.priority,
                node.state.score()
            ),
            _ => info!(
                "[{}] position {:?}, no food, priority {:.4}, score {}",
                iteration,
                position,
                node.priority,
                node.state.score()
            ),
        }
        info!(
            "[{}] snake: {:?}, food: {:?}",
            iteration,
            node.state.body(),
            node.state.food()
        );

        if self.trace.is_enabled() {
            self.trace.record(&TraceEntry {
                iteration,
                position,
                food,
                priority: node.priority,
                score: node.state.score(),
                fallback,
                body: node.state.body().to_vec(),
                food_cells: node.state.food().to_vec(),
                timestamp: TraceEntry::stamp(),
            });
        }
    }
}

/// Frontier priority of a candidate state
///
/// `1 / (food distance + 1) + 1 / (moves + 1) + score * SCORE_WEIGHT`, with
/// the food term dropped when the board has no food.
pub fn priority<S: GameState>(state: &S, use_fallback: bool) -> Result<f64, SolveError> {
    let food_term = match state.nearest_food(use_fallback) {
        Some(food) if food.distance < 0 => {
            return Err(SolveError::contract(format!(
                "negative food distance {} at ({}, {})",
                food.distance, food.position.x, food.position.y
            )));
        }
        Some(food) => 1.0 / (f64::from(food.distance) + 1.0),
        None => 0.0,
    };

    let moves = state.moves();
    if moves < 0 {
        return Err(SolveError::contract(format!(
            "negative move count {}",
            moves
        )));
    }

    Ok(food_term + 1.0 / (moves as f64 + 1.0) + f64::from(state.score()) * SCORE_WEIGHT)
}

/// One-shot solve with no progress callback, trace file or cancellation
pub fn solve<S: GameState>(
    initial: S,
    target: u32,
    recursion_limit: u32,
    debug: bool,
) -> Result<SolveResult<S>, SolveError> {
    Solver::new(target, recursion_limit, debug)?.solve(initial)
}

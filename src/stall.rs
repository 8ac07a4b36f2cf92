//! Stagnation tracking and heuristic escalation.
//!
//! Every selected node is reported to a [`StallTracker`]. A score above the
//! best seen so far resets everything; otherwise the stagnation counter
//! grows. The first time it reaches the limit the tracker switches to the
//! fallback food target, the second time (with the fallback still active)
//! the search gives up.

/// What the tracker concluded from one selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StallVerdict {
    /// New best score; counter reset, fallback cleared.
    Improved,
    /// No improvement, still under the limit.
    Stalled,
    /// Limit hit under the default heuristic; fallback now active.
    FallbackEngaged,
    /// Limit hit with the fallback already active.
    Exhausted,
}

/// Per-solve stagnation state. Owned by one solve, never shared.
#[derive(Debug, Clone)]
pub struct StallTracker {
    best_score: u32,
    stagnation: u32,
    fallback: bool,
    limit: u32,
}

impl StallTracker {
    /// `initial_score` is the root's score, the first value ever current.
    #[must_use]
    pub fn new(initial_score: u32, limit: u32) -> Self {
        Self {
            best_score: initial_score,
            stagnation: 0,
            fallback: false,
            limit,
        }
    }

    pub fn observe(&mut self, score: u32) -> StallVerdict {
        if score > self.best_score {
            self.best_score = score;
            self.stagnation = 0;
            self.fallback = false;
            return StallVerdict::Improved;
        }

        self.stagnation += 1;
        if self.stagnation < self.limit {
            return StallVerdict::Stalled;
        }

        if self.fallback {
            StallVerdict::Exhausted
        } else {
            self.fallback = true;
            self.stagnation = 0;
            StallVerdict::FallbackEngaged
        }
    }

    #[must_use]
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Whether successors are scored against the fallback food target.
    #[must_use]
    pub fn fallback(&self) -> bool {
        self.fallback
    }

    #[must_use]
    pub fn stagnation(&self) -> u32 {
        self.stagnation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_improvement_resets_counter_and_fallback() {
        let mut tracker = StallTracker::new(0, 2);
        assert_eq!(tracker.observe(0), StallVerdict::Stalled);
        assert_eq!(tracker.observe(0), StallVerdict::FallbackEngaged);
        assert!(tracker.fallback());
        assert_eq!(tracker.observe(0), StallVerdict::Stalled);

        assert_eq!(tracker.observe(1), StallVerdict::Improved);
        assert_eq!(tracker.best_score(), 1);
        assert_eq!(tracker.stagnation(), 0);
        assert!(!tracker.fallback());
    }

    #[test]
    fn test_fallback_then_exhaustion() {
        let mut tracker = StallTracker::new(0, 3);
        let verdicts: Vec<StallVerdict> = (0..6).map(|_| tracker.observe(0)).collect();
        assert_eq!(
            verdicts,
            vec![
                StallVerdict::Stalled,
                StallVerdict::Stalled,
                StallVerdict::FallbackEngaged,
                StallVerdict::Stalled,
                StallVerdict::Stalled,
                StallVerdict::Exhausted,
            ]
        );
    }

    #[test]
    fn test_equal_score_is_not_improvement() {
        let mut tracker = StallTracker::new(4, 10);
        assert_eq!(tracker.observe(4), StallVerdict::Stalled);
        assert_eq!(tracker.observe(3), StallVerdict::Stalled);
        assert_eq!(tracker.best_score(), 4);
    }

    #[test]
    fn test_limit_of_one_escalates_immediately() {
        let mut tracker = StallTracker::new(0, 1);
        assert_eq!(tracker.observe(0), StallVerdict::FallbackEngaged);
        assert_eq!(tracker.observe(0), StallVerdict::Exhausted);
    }
}

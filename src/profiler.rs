//! Lightweight timing of the search loop phases
//!
//! Enable with environment variable: SNAKE_SOLVER_PROFILE=1
//! Counters are process-wide atomics, so parallel solves (see the `sweep`
//! binary) aggregate into one report.

use log::info;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

static EXPAND_TIME: AtomicU64 = AtomicU64::new(0);
static EXPAND_COUNT: AtomicU64 = AtomicU64::new(0);
static SELECT_TIME: AtomicU64 = AtomicU64::new(0);
static SELECT_COUNT: AtomicU64 = AtomicU64::new(0);

/// Search phases that can be timed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Expand,
    Select,
}

impl Phase {
    fn counters(&self) -> (&'static AtomicU64, &'static AtomicU64) {
        match self {
            Phase::Expand => (&EXPAND_TIME, &EXPAND_COUNT),
            Phase::Select => (&SELECT_TIME, &SELECT_COUNT),
        }
    }
}

#[inline]
pub fn is_profiling_enabled() -> bool {
    std::env::var("SNAKE_SOLVER_PROFILE").is_ok()
}

/// Records the time between creation and drop against a phase
pub struct ProfileGuard {
    start: Instant,
    phase: Phase,
}

impl ProfileGuard {
    pub fn new(phase: Phase, enabled: bool) -> Option<Self> {
        if enabled {
            Some(ProfileGuard {
                start: Instant::now(),
                phase,
            })
        } else {
            None
        }
    }
}

impl Drop for ProfileGuard {
    fn drop(&mut self) {
        let elapsed_ns = self.start.elapsed().as_nanos() as u64;
        let (time, count) = self.phase.counters();
        time.fetch_add(elapsed_ns, Ordering::Relaxed);
        count.fetch_add(1, Ordering::Relaxed);
    }
}

/// Snapshot of accumulated counters: (total nanoseconds, calls)
pub fn totals(phase: Phase) -> (u64, u64) {
    let (time, count) = phase.counters();
    (time.load(Ordering::Relaxed), count.load(Ordering::Relaxed))
}

/// Logs a one-line summary per phase
pub fn report() {
    for phase in [Phase::Expand, Phase::Select] {
        let (ns, calls) = totals(phase);
        if calls == 0 {
            continue;
        }
        info!(
            "profile {:?}: {} calls, {:.3}ms total, {:.1}us avg",
            phase,
            calls,
            ns as f64 / 1_000_000.0,
            ns as f64 / calls as f64 / 1_000.0
        );
    }
}

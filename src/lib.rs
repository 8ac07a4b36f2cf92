// Library exports for the Snake solver
// The binaries (CLI, sweep, trace analysis) are thin wrappers over these modules

pub mod config;
pub mod error;
pub mod frontier;
pub mod game;
pub mod node;
pub mod path;
pub mod profiler;
pub mod solver;
pub mod stall;
pub mod trace;
pub mod types;

// Configuration module for reading Solver.toml
// Holds search parameters, the board layout to solve, and runtime limits

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::types::Coord;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub search: SearchConfig,
    pub board: BoardConfig,
    pub runtime: RuntimeConfig,
    pub debug: DebugConfig,
}

/// Search engine parameters
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Score the search is trying to reach
    pub target: u32,
    /// Stagnant selections tolerated per heuristic before escalating
    pub recursion_limit: u32,
    /// Emit a per-iteration trace
    pub debug: bool,
}

/// Board layout and initial snake placement
#[derive(Debug, Deserialize, Clone)]
pub struct BoardConfig {
    pub width: i32,
    pub height: i32,
    pub start: Coord,
    pub initial_length: usize,
    #[serde(default)]
    pub rocks: Vec<Coord>,
    pub food_count: usize,
    pub seed: u64,
}

/// Wall-clock limits for the CLI
#[derive(Debug, Deserialize, Clone)]
pub struct RuntimeConfig {
    /// Time after which a running solve is cancelled (0 disables the budget)
    pub time_budget_ms: u64,
    pub polling_interval_ms: u64,
}

/// Debug trace file configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub trace_enabled: bool,
    pub trace_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Solver.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: Config =
            toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))?;

        config.validate()?;
        Ok(config)
    }

    /// Loads default configuration from Solver.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Solver.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Solver.toml
    pub fn default_hardcoded() -> Self {
        Config {
            search: SearchConfig {
                target: 20,
                recursion_limit: 200,
                debug: false,
            },
            board: BoardConfig {
                width: 15,
                height: 15,
                start: Coord { x: 7, y: 7 },
                initial_length: 3,
                rocks: vec![
                    Coord { x: 3, y: 3 },
                    Coord { x: 3, y: 4 },
                    Coord { x: 11, y: 10 },
                    Coord { x: 11, y: 11 },
                    Coord { x: 7, y: 12 },
                ],
                food_count: 2,
                seed: 2024,
            },
            runtime: RuntimeConfig {
                time_budget_ms: 30_000,
                polling_interval_ms: 50,
            },
            debug: DebugConfig {
                trace_enabled: false,
                trace_file_path: "solver_trace.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!(
                "Could not load Solver.toml ({}), using hardcoded defaults",
                e
            );
            Self::default_hardcoded()
        })
    }

    /// Rejects parameter combinations that cannot drive a search
    pub fn validate(&self) -> Result<(), String> {
        if self.search.recursion_limit == 0 {
            return Err("search.recursion_limit must be at least 1".to_string());
        }
        if self.board.width <= 0 || self.board.height <= 0 {
            return Err(format!(
                "board dimensions must be positive, got {}x{}",
                self.board.width, self.board.height
            ));
        }
        if self.board.initial_length == 0 {
            return Err("board.initial_length must be at least 1".to_string());
        }
        if self.runtime.polling_interval_ms == 0 {
            return Err("runtime.polling_interval_ms must be positive".to_string());
        }
        Ok(())
    }
}

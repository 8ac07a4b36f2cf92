// Solves the configured board for a range of food seeds in parallel
//
// Usage:
//   cargo run --release --bin sweep -- [--config <path>] [--seeds <first>..<last>] [--target <N>]
//
// Every solve owns its own solver, frontier and stagnation state, so they
// run side by side on the rayon pool without coordination.

use rayon::prelude::*;
use std::env;
use std::process;
use std::time::Instant;

use snake_solver::config::Config;
use snake_solver::game::SnakeGame;
use snake_solver::profiler;
use snake_solver::solver::{SolveStats, Solver};

struct SweepRow {
    seed: u64,
    outcome: String,
    best_score: u32,
    moves: usize,
    stats: SolveStats,
    time_ms: u128,
}

fn parse_seed_range(s: &str) -> Result<(u64, u64), String> {
    let parts: Vec<&str> = s.split("..").collect();
    if parts.len() != 2 {
        return Err(format!("Invalid seed range '{}'. Expected 'first..last'", s));
    }
    let first = parts[0]
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("Invalid seed '{}': {}", parts[0], e))?;
    let last = parts[1]
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("Invalid seed '{}': {}", parts[1], e))?;
    if last < first {
        return Err(format!("Empty seed range '{}'", s));
    }
    Ok((first, last))
}

fn solve_seed(config: &Config, seed: u64) -> Result<SweepRow, String> {
    let mut board = config.board.clone();
    board.seed = seed;
    let game = SnakeGame::new(&board)?;

    let start = Instant::now();
    let mut search = config.search.clone();
    search.debug = false;
    let mut solver = Solver::from_config(&search).map_err(|e| e.to_string())?;
    let result = solver.solve(game).map_err(|e| e.to_string())?;

    Ok(SweepRow {
        seed,
        outcome: result.label().to_string(),
        best_score: result.best_score(),
        moves: result.path().len().saturating_sub(1),
        stats: solver.stats().clone(),
        time_ms: start.elapsed().as_millis(),
    })
}

fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "warn");
    }
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config_path = None;
    let mut seeds = (0u64, 7u64);
    let mut target = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                config_path = Some(args[i + 1].clone());
                i += 2;
            }
            "--seeds" if i + 1 < args.len() => {
                seeds = parse_seed_range(&args[i + 1]).unwrap_or_else(|e| {
                    eprintln!("Error: {}", e);
                    process::exit(2);
                });
                i += 2;
            }
            "--target" if i + 1 < args.len() => {
                target = Some(args[i + 1].parse::<u32>().unwrap_or_else(|e| {
                    eprintln!("Error: invalid target '{}': {}", args[i + 1], e);
                    process::exit(2);
                }));
                i += 2;
            }
            other => {
                eprintln!("Usage: sweep [--config <path>] [--seeds <first>..<last>] [--target <N>]");
                eprintln!("Unknown argument: {}", other);
                process::exit(2);
            }
        }
    }

    let mut config = match config_path {
        Some(path) => Config::from_file(&path).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        }),
        None => Config::load_or_default(),
    };
    if let Some(target) = target {
        config.search.target = target;
    }

    let (first, last) = seeds;
    println!(
        "Solving {}x{} board for score {} across seeds {}..{} on {} threads\n",
        config.board.width,
        config.board.height,
        config.search.target,
        first,
        last,
        rayon::current_num_threads()
    );

    let mut rows: Vec<Result<SweepRow, (u64, String)>> = (first..=last)
        .into_par_iter()
        .map(|seed| solve_seed(&config, seed).map_err(|e| (seed, e)))
        .collect();
    rows.sort_by_key(|r| match r {
        Ok(row) => row.seed,
        Err((seed, _)) => *seed,
    });

    println!(
        "{:>6}  {:>10}  {:>5}  {:>6}  {:>10}  {:>9}  {:>8}  {:>8}",
        "seed", "outcome", "score", "moves", "expansions", "fallbacks", "frontier", "time"
    );
    let mut goals = 0;
    for row in &rows {
        match row {
            Ok(row) => {
                if row.outcome == "goal" {
                    goals += 1;
                }
                println!(
                    "{:>6}  {:>10}  {:>5}  {:>6}  {:>10}  {:>9}  {:>8}  {:>6}ms",
                    row.seed,
                    row.outcome,
                    row.best_score,
                    row.moves,
                    row.stats.expansions,
                    row.stats.fallback_activations,
                    row.stats.frontier_high_water,
                    row.time_ms
                );
            }
            Err((seed, e)) => println!("{:>6}  error: {}", seed, e),
        }
    }

    println!("\nReached target on {}/{} seeds", goals, rows.len());

    if profiler::is_profiling_enabled() {
        profiler::report();
    }
}

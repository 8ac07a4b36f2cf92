// Snake solver command line
//
// Usage:
//   snake-solver [options]
//
// Loads Solver.toml, builds the board, and searches for a move sequence that
// reaches the target score. The search runs on a blocking worker while this
// task polls it and cancels it once the time budget is spent.

use log::{error, info, warn};
use std::env;
use std::io::Write;
use std::process;
use std::time::{Duration, Instant};

use snake_solver::config::Config;
use snake_solver::error::SolveError;
use snake_solver::game::SnakeGame;
use snake_solver::path;
use snake_solver::solver::{CancelToken, SolveResult, SolveStats, Solver};
use snake_solver::trace::TraceLogger;

const YELLOW: &str = "\x1b[33m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

#[derive(Debug, Default)]
struct CliArgs {
    config_path: Option<String>,
    target: Option<u32>,
    recursion: Option<u32>,
    seed: Option<u64>,
    debug: bool,
    trace_path: Option<String>,
}

fn print_usage() {
    eprintln!("Snake Solver");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  snake-solver [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --config <path>      Path to Solver.toml (default: Solver.toml)");
    eprintln!("  --target <N>         Score to reach");
    eprintln!("  --recursion <N>      Stagnant selections tolerated per heuristic");
    eprintln!("  --seed <N>           Food placement seed");
    eprintln!("  --debug              Log every search iteration");
    eprintln!("  --trace <path>       Also write iterations to a JSONL file (implies --debug)");
    eprintln!("  --help               Show this help message");
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, String>
where
    T::Err: std::fmt::Display,
{
    let value = value.ok_or_else(|| format!("{} requires a value", flag))?;
    value
        .parse::<T>()
        .map_err(|e| format!("Invalid value '{}' for {}: {}", value, flag, e))
}

fn parse_args(args: Vec<String>) -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();
    let mut iter = args.into_iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => parsed.config_path = Some(parse_value("--config", iter.next())?),
            "--target" => parsed.target = Some(parse_value("--target", iter.next())?),
            "--recursion" => parsed.recursion = Some(parse_value("--recursion", iter.next())?),
            "--seed" => parsed.seed = Some(parse_value("--seed", iter.next())?),
            "--trace" => parsed.trace_path = Some(parse_value("--trace", iter.next())?),
            "--debug" => parsed.debug = true,
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(parsed)
}

fn apply_overrides(config: &mut Config, args: &CliArgs) {
    if let Some(target) = args.target {
        config.search.target = target;
    }
    if let Some(recursion) = args.recursion {
        config.search.recursion_limit = recursion;
    }
    if let Some(seed) = args.seed {
        config.board.seed = seed;
    }
    if args.debug {
        config.search.debug = true;
    }
    if let Some(path) = &args.trace_path {
        config.search.debug = true;
        config.debug.trace_enabled = true;
        config.debug.trace_file_path = path.clone();
    }
}

/// Draws `|████----| 42.00%` on stderr, green once complete
fn progress_bar(progress: u32, total: u32) {
    let percent = if total == 0 {
        100.0
    } else {
        (100.0 * f64::from(progress) / f64::from(total)).min(100.0)
    };
    let filled = percent as usize;
    let bar = format!("{}{}", "█".repeat(filled), "-".repeat(100 - filled));
    let color = if progress >= total { GREEN } else { YELLOW };

    let mut stderr = std::io::stderr();
    let _ = write!(stderr, "\r{}|{}| {:.2}%{}", color, bar, percent, RESET);
    let _ = stderr.flush();
}

fn run_solve(
    game: SnakeGame,
    config: &Config,
    cancel: CancelToken,
) -> Result<(SolveResult<SnakeGame>, SolveStats), SolveError> {
    let trace = TraceLogger::new(config.debug.trace_enabled, &config.debug.trace_file_path);

    let mut solver = Solver::from_config(&config.search)?
        .with_trace(trace)
        .with_cancel_token(cancel)
        .with_progress(progress_bar);

    progress_bar(0, config.search.target);
    let result = solver.solve(game)?;
    eprintln!();

    Ok((result, solver.stats().clone()))
}

fn report(result: &SolveResult<SnakeGame>, stats: &SolveStats, elapsed: Duration) {
    match result {
        SolveResult::Goal { .. } => println!("Found a solution!"),
        SolveResult::GaveUp { best_score, .. } => println!(
            "Solver could not find a solution for this score on this map. \
             Here's the best solution found so far ({}):",
            best_score
        ),
        SolveResult::Cancelled { best_score, .. } => println!(
            "Time budget exhausted. Best solution found so far ({}):",
            best_score
        ),
    }

    match path::directions(result.path()) {
        Ok(moves) => {
            let names: Vec<&str> = moves.iter().map(|d| d.as_str()).collect();
            println!("Moves ({}): {}", names.len(), names.join(" "));
        }
        Err(e) => error!("Could not convert path to moves: {}", e),
    }

    println!(
        "Expansions: {}, selections: {}, fallback switches: {}, peak frontier: {}, time: {}ms",
        stats.expansions,
        stats.selections,
        stats.fallback_activations,
        stats.frontier_high_water,
        elapsed.as_millis()
    );
}

#[tokio::main]
async fn main() {
    // We default to 'info' level logging. But if the `RUST_LOG` environment variable is set,
    // we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    let args = match parse_args(env::args().collect()) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage();
            process::exit(2);
        }
    };

    let mut config = match &args.config_path {
        Some(path) => Config::from_file(path).unwrap_or_else(|e| {
            error!("{}", e);
            process::exit(1);
        }),
        None => Config::load_or_default(),
    };
    apply_overrides(&mut config, &args);
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        process::exit(1);
    }

    let game = match SnakeGame::new(&config.board) {
        Ok(game) => game,
        Err(e) => {
            error!("Could not build board: {}", e);
            process::exit(1);
        }
    };

    info!(
        "Board {}x{} with {} rocks, seed {}",
        config.board.width,
        config.board.height,
        config.board.rocks.len(),
        config.board.seed
    );

    let start_time = Instant::now();
    let cancel = CancelToken::new();

    let handle = {
        let config = config.clone();
        let cancel = cancel.clone();
        tokio::task::spawn_blocking(move || run_solve(game, &config, cancel))
    };

    // Polling loop: wait for the solve or cancel it once the budget is spent
    let budget = config.runtime.time_budget_ms;
    let polling_interval = Duration::from_millis(config.runtime.polling_interval_ms);

    while !handle.is_finished() {
        tokio::time::sleep(polling_interval).await;

        let elapsed = start_time.elapsed().as_millis() as u64;
        if budget > 0 && elapsed >= budget && !cancel.is_cancelled() {
            warn!("Time budget of {}ms spent, cancelling search", budget);
            cancel.cancel();
        }
    }

    match handle.await {
        Ok(Ok((result, stats))) => report(&result, &stats, start_time.elapsed()),
        Ok(Err(e)) => {
            error!("Solve failed: {}", e);
            process::exit(1);
        }
        Err(e) => {
            error!("Solver task failed: {}", e);
            process::exit(1);
        }
    }
}

// Summarises a search trace written with [debug] trace_enabled = true
//
// Usage:
//   analyze_trace <trace.jsonl>
//
// Reports score progression, heuristic switches, and head cells the search
// kept coming back to (a hint that the no-undo rule alone is not breaking a
// cycle on this board).

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::process;

use snake_solver::trace::TraceEntry;
use snake_solver::types::Coord;

fn load_entries(path: &str) -> Result<Vec<TraceEntry>, String> {
    let file = File::open(path).map_err(|e| format!("Failed to open trace file: {}", e))?;
    let reader = BufReader::new(file);
    let mut entries = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let entry: TraceEntry = serde_json::from_str(&line)
            .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;
        entries.push(entry);
    }

    Ok(entries)
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: analyze_trace <trace.jsonl>");
        process::exit(1);
    }

    let entries = match load_entries(&args[1]) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if entries.is_empty() {
        println!("Trace is empty");
        return;
    }

    println!("Analyzing {} iterations...\n", entries.len());

    // Score progression
    let mut best = entries[0].score;
    println!("Score progression:");
    println!("  iteration {:>6}: score {}", entries[0].iteration, best);
    for entry in &entries {
        if entry.score > best {
            best = entry.score;
            println!("  iteration {:>6}: score {}", entry.iteration, best);
        }
    }

    // Heuristic switches
    let mut switches = 0;
    let mut fallback_iterations = 0;
    for pair in entries.windows(2) {
        if pair[0].fallback != pair[1].fallback {
            switches += 1;
            println!(
                "  iteration {:>6}: {} heuristic",
                pair[1].iteration,
                if pair[1].fallback {
                    "switched to fallback"
                } else {
                    "back to nearest-food"
                }
            );
        }
    }
    for entry in &entries {
        if entry.fallback {
            fallback_iterations += 1;
        }
    }
    println!(
        "\nHeuristic switches: {}, iterations under fallback: {} ({:.1}%)",
        switches,
        fallback_iterations,
        100.0 * fallback_iterations as f64 / entries.len() as f64
    );

    // Revisited head cells
    let mut visits: HashMap<Coord, usize> = HashMap::new();
    for entry in &entries {
        if let Some(position) = entry.position {
            *visits.entry(position).or_insert(0) += 1;
        }
    }
    let mut hot: Vec<(Coord, usize)> = visits.into_iter().filter(|(_, n)| *n > 1).collect();
    hot.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.x.cmp(&b.0.x)).then(a.0.y.cmp(&b.0.y)));

    println!("\nMost revisited head cells:");
    if hot.is_empty() {
        println!("  none");
    }
    for (coord, count) in hot.iter().take(10) {
        println!("  ({:>3}, {:>3}): {} visits", coord.x, coord.y, count);
    }
}

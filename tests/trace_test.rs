// Debug trace output of a solve
//
// With debug on, each selected node is written to the trace file; with
// debug off, the same logger stays silent.

use snake_solver::game::SnakeGame;
use snake_solver::solver::Solver;
use snake_solver::trace::{TraceEntry, TraceLogger};
use snake_solver::types::Coord;

fn corridor() -> SnakeGame {
    SnakeGame::with_layout(
        6,
        1,
        vec![],
        vec![Coord::new(0, 0)],
        vec![Coord::new(5, 0)],
        0,
    )
}

fn temp_trace(name: &str) -> String {
    std::env::temp_dir()
        .join(format!("snake_solver_{}_{}.jsonl", name, std::process::id()))
        .to_string_lossy()
        .to_string()
}

fn read_entries(path: &str) -> Vec<TraceEntry> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn test_debug_solve_writes_one_entry_per_selection() {
    let path = temp_trace("debug_on");
    let mut solver = Solver::new(1, 10, true)
        .unwrap()
        .with_trace(TraceLogger::new(true, &path));
    let result = solver.solve(corridor()).unwrap();
    assert!(result.is_goal());

    let entries = read_entries(&path);
    assert_eq!(entries.len() as u64, solver.stats().selections);

    // Iterations count up from zero and the head walks right
    for (i, entry) in entries.iter().enumerate() {
        assert_eq!(entry.iteration, i as u64);
        assert_eq!(entry.position, Some(Coord::new(i as i32 + 1, 0)));
        assert!(!entry.fallback);
        assert_eq!(entry.body.first().copied(), entry.position);
    }

    // Before the last step the food sits at the end of the corridor
    let before_last = &entries[entries.len() - 2];
    let food = before_last.food.unwrap();
    assert_eq!(food.position, Coord::new(5, 0));
    assert_eq!(food.distance, 1);
    assert_eq!(before_last.food_cells, vec![Coord::new(5, 0)]);

    let last = entries.last().unwrap();
    assert_eq!(last.score, 1);
    assert!(last.priority > 10_000.0);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_debug_off_leaves_trace_empty() {
    let path = temp_trace("debug_off");
    let mut solver = Solver::new(1, 10, false)
        .unwrap()
        .with_trace(TraceLogger::new(true, &path));
    solver.solve(corridor()).unwrap();

    assert!(read_entries(&path).is_empty());
    let _ = std::fs::remove_file(&path);
}

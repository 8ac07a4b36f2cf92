// Debug trace of the search loop
//
// When a solve runs with debug enabled, every iteration is reported through
// `log` and, if a trace file is configured, appended to it as one JSON line.
// The engine never reads this output back.

use log::error;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::sync::Arc;

use crate::types::{Coord, FoodTarget};

/// One iteration of the search loop
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TraceEntry {
    pub iteration: u64,
    pub position: Option<Coord>,
    pub food: Option<FoodTarget>,
    pub priority: f64,
    pub score: u32,
    pub fallback: bool,
    pub body: Vec<Coord>,
    /// All food cells, not just the targeted one
    #[serde(default)]
    pub food_cells: Vec<Coord>,
    pub timestamp: String,
}

/// Shared trace writer
/// Uses Arc<Mutex<..>> so clones handed to several solves write to one file
#[derive(Clone)]
pub struct TraceLogger {
    file: Arc<Mutex<Option<BufWriter<File>>>>,
    enabled: bool,
}

impl TraceLogger {
    /// Creates a new trace logger
    /// If enabled is true, initializes the trace file (truncating if it exists)
    pub fn new(enabled: bool, trace_file_path: &str) -> Self {
        if !enabled {
            return TraceLogger::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(trace_file_path)
        {
            Ok(file) => {
                log::info!("Search trace enabled: {}", trace_file_path);
                TraceLogger {
                    file: Arc::new(Mutex::new(Some(BufWriter::new(file)))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!(
                    "Failed to create trace file '{}': {}",
                    trace_file_path, e
                );
                TraceLogger::disabled()
            }
        }
    }

    /// Creates a disabled trace logger (no-op)
    pub fn disabled() -> Self {
        TraceLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Appends one entry; write failures are logged and otherwise ignored
    pub fn record(&self, entry: &TraceEntry) {
        if !self.enabled {
            return;
        }

        let mut guard = self.file.lock();
        if let Some(file) = guard.as_mut() {
            match serde_json::to_string(entry) {
                Ok(json_line) => {
                    if let Err(e) = writeln!(file, "{}", json_line) {
                        error!("Failed to write trace entry: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to serialize trace entry: {}", e);
                }
            }
        }
    }

    /// Flushes buffered entries to disk
    pub fn flush(&self) {
        if let Some(file) = self.file.lock().as_mut() {
            if let Err(e) = file.flush() {
                error!("Failed to flush trace file: {}", e);
            }
        }
    }
}

impl TraceEntry {
    pub fn stamp() -> String {
        chrono::Utc::now().to_rfc3339()
    }
}

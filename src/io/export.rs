//! Exports: task outcomes as JSON, point sets as CSV.
//!
//! The JSON export wraps the outcome with a small header so files can be told apart
//! later:
//!
//! ```json
//! { "tool": "nm", "generated_at": "...", "outcome": { "task": "solve", ... } }
//! ```

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::app::pipeline::Outcome;
use crate::domain::Point;
use crate::error::{AppError, EXIT_INTERNAL};

#[derive(Debug, Serialize)]
pub struct ExportFile<'a> {
    pub tool: &'static str,
    pub version: &'static str,
    pub generated_at: DateTime<Local>,
    pub outcome: &'a Outcome,
}

impl<'a> ExportFile<'a> {
    pub fn new(outcome: &'a Outcome) -> Self {
        Self {
            tool: "nm",
            version: env!("CARGO_PKG_VERSION"),
            generated_at: Local::now(),
            outcome,
        }
    }
}

/// Write an outcome export to `path`.
pub fn write_outcome_json(path: &Path, outcome: &Outcome) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create export JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, &ExportFile::new(outcome))
        .map_err(|e| AppError::new(EXIT_INTERNAL, format!("Failed to write export JSON: {e}")))
}

/// Serialize an outcome for `--json` output.
pub fn outcome_to_json(outcome: &Outcome) -> Result<String, AppError> {
    serde_json::to_string_pretty(&ExportFile::new(outcome))
        .map_err(|e| AppError::new(EXIT_INTERNAL, format!("Failed to serialize outcome: {e}")))
}

/// Write points as an `x,y` CSV (readable by `load_points_csv`).
pub fn write_points_csv(path: &Path, points: &[Point]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create points CSV '{}': {e}", path.display())))?;
    write_points(file, points)
}

pub fn write_points<W: std::io::Write>(writer: W, points: &[Point]) -> Result<(), AppError> {
    let mut wtr = csv::Writer::from_writer(writer);
    let fail = |e: csv::Error| AppError::new(EXIT_INTERNAL, format!("Failed to write points CSV: {e}"));
    wtr.write_record(["x", "y"]).map_err(fail)?;
    for p in points {
        wtr.write_record([p.x.to_string(), p.y.to_string()]).map_err(fail)?;
    }
    wtr.flush()
        .map_err(|e| AppError::new(EXIT_INTERNAL, format!("Failed to flush points CSV: {e}")))
}

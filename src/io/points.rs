//! CSV ingest for point sets.
//!
//! This module turns an `x,y` CSV into a clean list of `Point`s that are safe to
//! hand to the numerical routines.
//!
//! - **Strict schema**: an `x` and a `y` column are required (case-insensitive;
//!   other columns are ignored).
//! - **Row-level validation**: rows with missing or non-finite values are skipped
//!   and reported with their line number.
//! - **Order preserved**: points are returned in file order; nothing is sorted.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::Point;
use crate::error::AppError;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: accepted points plus the rows that were rejected.
#[derive(Debug, Clone)]
pub struct IngestedPoints {
    pub points: Vec<Point>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Load points from a CSV file.
pub fn load_points_csv(path: &Path) -> Result<IngestedPoints, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_points_csv(file)
}

/// Load points from any CSV reader.
pub fn read_points_csv<R: Read>(reader: R) -> Result<IngestedPoints, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();
    let (x_col, y_col) = resolve_columns(&headers)?;

    let mut points = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0;

    for (idx, record) in reader.records().enumerate() {
        // Line 1 is the header.
        let line = idx + 2;
        rows_read += 1;
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("unreadable row: {e}"),
                });
                continue;
            }
        };
        match parse_row(&record, x_col, y_col) {
            Ok(p) => points.push(p),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    for err in &row_errors {
        log::warn!("CSV line {}: {}", err.line, err.message);
    }
    if points.is_empty() {
        return Err(AppError::input("CSV contains no valid points."));
    }

    Ok(IngestedPoints {
        points,
        row_errors,
        rows_read,
    })
}

fn resolve_columns(headers: &StringRecord) -> Result<(usize, usize), AppError> {
    let find = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    match (find("x"), find("y")) {
        (Some(x), Some(y)) => Ok((x, y)),
        _ => Err(AppError::input(format!(
            "CSV must have 'x' and 'y' columns (found: {}).",
            headers.iter().collect::<Vec<_>>().join(", ")
        ))),
    }
}

fn parse_row(record: &StringRecord, x_col: usize, y_col: usize) -> Result<Point, String> {
    let field = |col: usize, name: &str| -> Result<f64, String> {
        let raw = record.get(col).filter(|s| !s.is_empty()).ok_or_else(|| format!("missing {name}"))?;
        let v: f64 = raw.parse().map_err(|_| format!("{name}='{raw}' is not a number"))?;
        if v.is_finite() {
            Ok(v)
        } else {
            Err(format!("{name}='{raw}' is not finite"))
        }
    };
    Ok(Point::new(field(x_col, "x")?, field(y_col, "y")?))
}

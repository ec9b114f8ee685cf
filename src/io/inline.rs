//! Parsing of inline matrix / vector / point arguments.
//!
//! Syntax:
//! - vector: values separated by `,` or whitespace (`"1, 2, 3"`, `"1 2 3"`)
//! - matrix: rows separated by `;` (`"2,1,-1; -3,-1,2; -2,1,2"`)
//! - points: `x,y` pairs separated by `;` (`"0,0; 2,4; 4,8"`)
//!
//! Every value must parse as a finite `f64`.

use crate::domain::{Matrix, Point, Vector};
use crate::error::AppError;

pub fn parse_vector(input: &str) -> Result<Vector, AppError> {
    let values: Result<Vec<f64>, AppError> = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(parse_number)
        .collect();
    let values = values?;
    if values.is_empty() {
        return Err(AppError::input("Expected at least one number."));
    }
    Ok(values)
}

pub fn parse_matrix(input: &str) -> Result<Matrix, AppError> {
    let rows: Vec<&str> = input.split(';').map(str::trim).filter(|r| !r.is_empty()).collect();
    if rows.is_empty() {
        return Err(AppError::input("Matrix is empty."));
    }
    let matrix: Matrix = rows
        .iter()
        .enumerate()
        .map(|(i, row)| parse_vector(row).map_err(|e| AppError::input(format!("Matrix row {}: {e}", i + 1))))
        .collect::<Result<_, _>>()?;

    let width = matrix[0].len();
    if let Some((i, row)) = matrix.iter().enumerate().find(|(_, r)| r.len() != width) {
        return Err(AppError::input(format!(
            "Matrix row {} has {} values, expected {width}.",
            i + 1,
            row.len()
        )));
    }
    Ok(matrix)
}

pub fn parse_points(input: &str) -> Result<Vec<Point>, AppError> {
    input
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .enumerate()
        .map(|(i, pair)| {
            let v = parse_vector(pair).map_err(|e| AppError::input(format!("Point {}: {e}", i + 1)))?;
            match v.as_slice() {
                [x, y] => Ok(Point::new(*x, *y)),
                _ => Err(AppError::input(format!(
                    "Point {} must be an 'x,y' pair (got {} values).",
                    i + 1,
                    v.len()
                ))),
            }
        })
        .collect()
}

pub(crate) fn parse_number(s: &str) -> Result<f64, AppError> {
    let s = s.trim();
    let v: f64 = s
        .parse()
        .map_err(|_| AppError::input(format!("'{s}' is not a number.")))?;
    if !v.is_finite() {
        return Err(AppError::input(format!("'{s}' is not a finite number.")));
    }
    Ok(v)
}

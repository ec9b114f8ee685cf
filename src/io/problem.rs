//! Read/write linear-system problem files (JSON).
//!
//! ```json
//! { "matrix": [[4, 1], [1, 3]], "rhs": [1, 2], "initial_guess": [0, 0] }
//! ```
//!
//! `initial_guess` is optional and only used by `nm iterate`. The schema is
//! `domain::SystemProblem`; shape checks are left to the solvers so that
//! `DimensionMismatch` is reported uniformly.

use std::fs::File;
use std::path::Path;

use crate::domain::SystemProblem;
use crate::error::AppError;

pub fn read_problem_json(path: &Path) -> Result<SystemProblem, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open problem JSON '{}': {e}", path.display())))?;
    let problem: SystemProblem = serde_json::from_reader(file)
        .map_err(|e| AppError::input(format!("Invalid problem JSON '{}': {e}", path.display())))?;
    ensure_finite(&problem)?;
    Ok(problem)
}

pub fn write_problem_json(path: &Path, problem: &SystemProblem) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create problem JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, problem)
        .map_err(|e| AppError::new(crate::error::EXIT_INTERNAL, format!("Failed to write problem JSON: {e}")))
}

fn ensure_finite(problem: &SystemProblem) -> Result<(), AppError> {
    let matrix_ok = problem.matrix.iter().flatten().all(|v| v.is_finite());
    let rhs_ok = problem.rhs.iter().all(|v| v.is_finite());
    let guess_ok = problem
        .initial_guess
        .as_ref()
        .is_none_or(|g| g.iter().all(|v| v.is_finite()));
    if matrix_ok && rhs_ok && guess_ok {
        Ok(())
    } else {
        Err(AppError::input("Problem JSON contains non-finite values."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_a_file() {
        let path = std::env::temp_dir().join(format!("numeth_problem_{}.json", std::process::id()));
        let problem = SystemProblem {
            matrix: vec![vec![4.0, 1.0], vec![1.0, 3.0]],
            rhs: vec![1.0, 2.0],
            initial_guess: Some(vec![0.0, 0.0]),
        };
        write_problem_json(&path, &problem).unwrap();
        let back = read_problem_json(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(back, problem);
    }

    #[test]
    fn missing_file_is_an_input_error() {
        let err = read_problem_json(Path::new("/definitely/not/here.json")).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
    }
}

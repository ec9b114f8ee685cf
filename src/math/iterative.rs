//! Gauss-Seidel relaxation.
//!
//! A single working vector is updated in place, so within one sweep the new
//! `x[j]` for `j < i` already feeds row `i` (this is what distinguishes it from
//! Jacobi). The stopping test is the max-norm of the change over a sweep.
//!
//! Convergence is only guaranteed for well-behaved systems (e.g. strictly
//! diagonally dominant); callers are warned via `is_diagonally_dominant` but the
//! solver still runs whatever it is given.

use serde::{Deserialize, Serialize};

use crate::error::{NumericError, NumericResult};
use crate::math::PIVOT_EPS;

pub const DEFAULT_TOLERANCE: f64 = 1e-4;
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Stopping controls for the iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeidelOptions {
    /// Converged once the largest per-component change in a sweep is below this.
    pub tolerance: f64,
    /// Maximum number of full sweeps.
    pub max_iterations: usize,
}

impl Default for SeidelOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// A converged Gauss-Seidel run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterativeSolution {
    pub x: Vec<f64>,
    /// Sweeps performed, including the converging one.
    pub iterations: usize,
    /// Max-norm change in the final sweep.
    pub max_error: f64,
}

pub fn gauss_seidel(
    a: &[Vec<f64>],
    b: &[f64],
    initial_guess: &[f64],
    opts: &SeidelOptions,
) -> NumericResult<IterativeSolution> {
    let n = crate::math::direct::validate_system(a, b)?;
    if initial_guess.len() != n {
        return Err(NumericError::DimensionMismatch {
            what: "initial guess",
            expected: n,
            found: initial_guess.len(),
        });
    }

    let mut x = initial_guess.to_vec();
    let mut prev = vec![0.0; n];
    let mut max_error = f64::INFINITY;

    for iter in 1..=opts.max_iterations {
        prev.copy_from_slice(&x);
        max_error = 0.0;

        for i in 0..n {
            let sum: f64 = (0..n).filter(|&j| j != i).map(|j| a[i][j] * x[j]).sum();
            let diag = a[i][i];
            if diag.abs() < PIVOT_EPS {
                log::debug!("Gauss-Seidel: A[{i}][{i}] = {diag:e}");
                return Err(NumericError::ZeroPivot { row: i });
            }
            x[i] = (b[i] - sum) / diag;
            max_error = max_error.max((x[i] - prev[i]).abs());
        }

        log::trace!("Gauss-Seidel sweep {iter}: max error {max_error:e}");

        if !max_error.is_finite() || x.iter().any(|v| !v.is_finite()) {
            log::warn!("Gauss-Seidel diverged after {iter} sweeps");
            return Err(NumericError::DidNotConverge {
                iterations: iter,
                max_error,
                last: x,
            });
        }

        if max_error < opts.tolerance {
            log::debug!("Gauss-Seidel converged in {iter} sweeps (max error {max_error:e})");
            return Ok(IterativeSolution {
                x,
                iterations: iter,
                max_error,
            });
        }
    }

    log::warn!(
        "Gauss-Seidel reached {} iterations without meeting tolerance {}",
        opts.max_iterations,
        opts.tolerance
    );
    Err(NumericError::DidNotConverge {
        iterations: opts.max_iterations,
        max_error,
        last: x,
    })
}

/// Strict row-wise diagonal dominance: `|a_ii| > Σ_{j≠i} |a_ij|` for every row.
///
/// Non-square input is reported as not dominant.
pub fn is_diagonally_dominant(a: &[Vec<f64>]) -> bool {
    let n = a.len();
    a.iter().enumerate().all(|(i, row)| {
        if row.len() != n {
            return false;
        }
        let off: f64 = row
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(_, v)| v.abs())
            .sum();
        row[i].abs() > off
    })
}

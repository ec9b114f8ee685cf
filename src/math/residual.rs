//! Solution verification: the max-norm residual `‖A·x - b‖∞`.

use nalgebra::{DMatrix, DVector};

/// Compute `‖A·x - b‖∞`.
///
/// Returns `NaN` if the shapes are inconsistent (a solver never produces such a
/// triple, so this only guards hand-built inputs).
pub fn residual_inf_norm(a: &[Vec<f64>], x: &[f64], b: &[f64]) -> f64 {
    let n = a.len();
    if n == 0 || x.len() != n || b.len() != n || a.iter().any(|row| row.len() != n) {
        return f64::NAN;
    }
    let m = DMatrix::from_fn(n, n, |i, j| a[i][j]);
    let r = m * DVector::from_column_slice(x) - DVector::from_column_slice(b);
    r.amax()
}

//! Direct solvers for dense square systems `A·x = b`.
//!
//! Three independent elimination schemes share one contract:
//!
//! ```text
//! fn(a: &[Vec<f64>], b: &[f64]) -> NumericResult<Vec<f64>>
//! ```
//!
//! Numerical notes:
//! - There is no row swapping. A pivot with magnitude below `PIVOT_EPS` is a hard
//!   `SingularMatrix` failure, even if a later row would have made a usable pivot.
//! - Every call works on its own copy of the inputs; caller matrices are untouched.
//! - LU guards its elimination pivots as well as the back-substitution diagonal, so
//!   a singular matrix never leaks `NaN`/`Infinity` out of the factorization.

use serde::Serialize;

use crate::domain::{DirectMethod, Matrix};
use crate::error::{NumericError, NumericResult};
use crate::math::PIVOT_EPS;

/// Lower/upper factors of `A = L·U` (`L` has a unit diagonal).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LuFactors {
    pub l: Matrix,
    pub u: Matrix,
}

impl DirectMethod {
    /// Solve `A·x = b` with this method.
    pub fn solve(self, a: &[Vec<f64>], b: &[f64]) -> NumericResult<Vec<f64>> {
        match self {
            DirectMethod::Gauss => gauss_elimination(a, b),
            DirectMethod::Jordan => gauss_jordan(a, b),
            DirectMethod::Lu => lu_solve(a, b),
        }
    }
}

/// Run each method on the same system, preserving the input order.
pub fn solve_all(
    methods: &[DirectMethod],
    a: &[Vec<f64>],
    b: &[f64],
) -> Vec<(DirectMethod, NumericResult<Vec<f64>>)> {
    methods.iter().map(|&m| (m, m.solve(a, b))).collect()
}

/// Check that `a` is a non-empty `n×n` matrix and `b` has length `n`.
///
/// Returns `n`.
pub fn validate_system(a: &[Vec<f64>], b: &[f64]) -> NumericResult<usize> {
    let n = a.len();
    if n == 0 {
        return Err(NumericError::DimensionMismatch {
            what: "matrix rows",
            expected: 1,
            found: 0,
        });
    }
    if let Some(row) = a.iter().find(|row| row.len() != n) {
        return Err(NumericError::DimensionMismatch {
            what: "matrix columns",
            expected: n,
            found: row.len(),
        });
    }
    if b.len() != n {
        return Err(NumericError::DimensionMismatch {
            what: "right-hand side",
            expected: n,
            found: b.len(),
        });
    }
    Ok(n)
}

/// Gaussian elimination with pivot-row normalization and back substitution.
pub fn gauss_elimination(a: &[Vec<f64>], b: &[f64]) -> NumericResult<Vec<f64>> {
    let n = validate_system(a, b)?;
    let mut ab = augment(a, b);

    for k in 0..n {
        normalize_pivot_row(&mut ab, k)?;
        for i in (k + 1)..n {
            eliminate_row(&mut ab, i, k);
        }
    }

    // Pivots are 1 after normalization, so no division here.
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let sum: f64 = ((i + 1)..n).map(|j| ab[i][j] * x[j]).sum();
        x[i] = ab[i][n] - sum;
    }
    Ok(x)
}

/// Gauss-Jordan elimination: reduce `[A|b]` to `[I|x]` and read off the last column.
pub fn gauss_jordan(a: &[Vec<f64>], b: &[f64]) -> NumericResult<Vec<f64>> {
    let n = validate_system(a, b)?;
    let mut ab = augment(a, b);

    for k in 0..n {
        normalize_pivot_row(&mut ab, k)?;
        for i in (0..n).filter(|&i| i != k) {
            eliminate_row(&mut ab, i, k);
        }
    }

    Ok(ab.into_iter().map(|row| row[n]).collect())
}

/// Doolittle factorization `A = L·U` without pivoting.
pub fn lu_decompose(a: &[Vec<f64>]) -> NumericResult<LuFactors> {
    let n = a.len();
    if n == 0 {
        return Err(NumericError::DimensionMismatch {
            what: "matrix rows",
            expected: 1,
            found: 0,
        });
    }
    if let Some(row) = a.iter().find(|row| row.len() != n) {
        return Err(NumericError::DimensionMismatch {
            what: "matrix columns",
            expected: n,
            found: row.len(),
        });
    }

    let mut u: Matrix = a.to_vec();
    let mut l: Matrix = identity(n);

    for k in 0..n {
        let pivot = u[k][k];
        if pivot.abs() < PIVOT_EPS {
            log::debug!("LU: pivot {k} is {pivot:e}; matrix is singular");
            return Err(NumericError::SingularMatrix { pivot: k });
        }
        for i in (k + 1)..n {
            let factor = u[i][k] / pivot;
            l[i][k] = factor;
            for j in k..n {
                u[i][j] -= factor * u[k][j];
            }
        }
    }

    Ok(LuFactors { l, u })
}

/// Solve `A·x = b` through `L·y = b` (forward) and `U·x = y` (backward).
pub fn lu_solve(a: &[Vec<f64>], b: &[f64]) -> NumericResult<Vec<f64>> {
    let n = validate_system(a, b)?;
    let LuFactors { l, u } = lu_decompose(a)?;

    // L has a unit diagonal.
    let mut y = vec![0.0; n];
    for i in 0..n {
        let sum: f64 = (0..i).map(|j| l[i][j] * y[j]).sum();
        y[i] = b[i] - sum;
    }

    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let sum: f64 = ((i + 1)..n).map(|j| u[i][j] * x[j]).sum();
        if u[i][i].abs() < PIVOT_EPS {
            log::debug!("LU: U[{i}][{i}] = {:e} during back substitution", u[i][i]);
            return Err(NumericError::SingularMatrix { pivot: i });
        }
        x[i] = (y[i] - sum) / u[i][i];
    }
    Ok(x)
}

fn augment(a: &[Vec<f64>], b: &[f64]) -> Matrix {
    a.iter()
        .zip(b)
        .map(|(row, &bi)| {
            let mut r = Vec::with_capacity(row.len() + 1);
            r.extend_from_slice(row);
            r.push(bi);
            r
        })
        .collect()
}

fn identity(n: usize) -> Matrix {
    (0..n)
        .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
        .collect()
}

/// Divide row `k` of the augmented matrix (columns `k..`) by its pivot.
fn normalize_pivot_row(ab: &mut Matrix, k: usize) -> NumericResult<()> {
    let pivot = ab[k][k];
    if pivot.abs() < PIVOT_EPS {
        log::debug!("elimination: pivot {k} is {pivot:e}; matrix is singular");
        return Err(NumericError::SingularMatrix { pivot: k });
    }
    for v in ab[k][k..].iter_mut() {
        *v /= pivot;
    }
    Ok(())
}

/// `row_i -= ab[i][k] · row_k`, where row `k` is already normalized.
fn eliminate_row(ab: &mut Matrix, i: usize, k: usize) {
    let factor = ab[i][k];
    if factor == 0.0 {
        return;
    }
    let (pivot_row, target) = if i > k {
        let (head, tail) = ab.split_at_mut(i);
        (&head[k], &mut tail[0])
    } else {
        let (head, tail) = ab.split_at_mut(k);
        (&tail[0], &mut head[i])
    };
    for (t, &p) in target[k..].iter_mut().zip(&pivot_row[k..]) {
        *t -= factor * p;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classic() -> (Matrix, Vec<f64>) {
        (
            vec![
                vec![2.0, 1.0, -1.0],
                vec![-3.0, -1.0, 2.0],
                vec![-2.0, 1.0, 2.0],
            ],
            vec![8.0, -11.0, -3.0],
        )
    }

    fn assert_close(x: &[f64], expected: &[f64]) {
        assert_eq!(x.len(), expected.len());
        for (a, e) in x.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "got {x:?}, expected {expected:?}");
        }
    }

    #[test]
    fn gauss_solves_classic_system() {
        let (a, b) = classic();
        assert_close(&gauss_elimination(&a, &b).unwrap(), &[2.0, 3.0, -1.0]);
    }

    #[test]
    fn jordan_and_lu_agree_with_gauss() {
        let (a, b) = classic();
        for method in DirectMethod::ALL {
            assert_close(&method.solve(&a, &b).unwrap(), &[2.0, 3.0, -1.0]);
        }
    }

    #[test]
    fn rank_deficient_matrix_is_singular_for_every_method() {
        let a = vec![vec![1.0, 2.0], vec![2.0, 4.0]];
        let b = vec![3.0, 6.0];
        for method in DirectMethod::ALL {
            assert_eq!(
                method.solve(&a, &b),
                Err(NumericError::SingularMatrix { pivot: 1 }),
                "{method:?}"
            );
        }
    }

    #[test]
    fn zero_leading_pivot_is_not_rescued_by_row_swap() {
        // Non-singular, but needs pivoting.
        let a = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
        let b = vec![1.0, 2.0];
        for method in DirectMethod::ALL {
            assert_eq!(method.solve(&a, &b), Err(NumericError::SingularMatrix { pivot: 0 }));
        }
    }

    #[test]
    fn lu_guards_elimination_phase() {
        let a = vec![vec![1.0, 1.0, 1.0], vec![1.0, 1.0, 2.0], vec![0.0, 3.0, 1.0]];
        assert_eq!(lu_decompose(&a), Err(NumericError::SingularMatrix { pivot: 1 }));
    }

    #[test]
    fn lu_factors_reconstruct_matrix() {
        let (a, _) = classic();
        let LuFactors { l, u } = lu_decompose(&a).unwrap();
        for i in 0..3 {
            assert_eq!(l[i][i], 1.0);
            for j in 0..3 {
                let prod: f64 = (0..3).map(|k| l[i][k] * u[k][j]).sum();
                assert!((prod - a[i][j]).abs() < 1e-12);
                if j < i {
                    assert!(u[i][j].abs() < 1e-12);
                }
            }
        }
    }

    #[test]
    fn dimension_errors_come_before_computation() {
        let a = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        assert!(matches!(
            gauss_elimination(&a, &[1.0]),
            Err(NumericError::DimensionMismatch { what: "right-hand side", .. })
        ));
        let ragged = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(matches!(
            gauss_jordan(&ragged, &[1.0, 2.0]),
            Err(NumericError::DimensionMismatch { what: "matrix columns", .. })
        ));
        assert!(matches!(
            lu_solve(&[], &[]),
            Err(NumericError::DimensionMismatch { what: "matrix rows", .. })
        ));
    }

    #[test]
    fn inputs_are_not_mutated() {
        let (a, b) = classic();
        let (a0, b0) = (a.clone(), b.clone());
        let _ = solve_all(&DirectMethod::ALL, &a, &b);
        assert_eq!(a, a0);
        assert_eq!(b, b0);
    }
}

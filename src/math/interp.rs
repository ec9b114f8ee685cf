//! Polynomial interpolation through a set of points.
//!
//! Both schemes produce the unique degree-`(n-1)` polynomial through `n` points
//! with distinct abscissas; they differ only in how it is evaluated.
//!
//! - Lagrange: `P(x) = Σ y_i · Π_{j≠i} (x - x_j) / (x_i - x_j)`, recomputed per query.
//! - Newton: divided-difference coefficients, evaluated with an incrementally
//!   accumulated product `Π_{k<i} (x - x_k)`.

use rayon::prelude::*;

use crate::domain::{InterpolationMethod, Point};
use crate::error::{NumericError, NumericResult};
use crate::math::PIVOT_EPS;

impl InterpolationMethod {
    /// Evaluate the interpolating polynomial through `points` at `x`.
    pub fn evaluate(self, points: &[Point], x: f64) -> NumericResult<f64> {
        match self {
            InterpolationMethod::Lagrange => lagrange(points, x),
            InterpolationMethod::Newton => newton(points, x),
        }
    }
}

pub fn lagrange(points: &[Point], x: f64) -> NumericResult<f64> {
    ensure_non_empty(points)?;

    let mut px = 0.0;
    for (i, pi) in points.iter().enumerate() {
        let mut li = 1.0;
        for (j, pj) in points.iter().enumerate() {
            if i == j {
                continue;
            }
            let denom = pi.x - pj.x;
            if denom.abs() < PIVOT_EPS {
                log::debug!("Lagrange: x[{i}] == x[{j}] = {}", pi.x);
                return Err(NumericError::DuplicateAbscissa { i: i.min(j), j: i.max(j) });
            }
            li *= (x - pj.x) / denom;
        }
        px += pi.y * li;
    }
    Ok(px)
}

/// Top row of the divided-difference table: `[f[x0], f[x0,x1], ..., f[x0..x_{n-1}]]`.
pub fn divided_differences(points: &[Point]) -> NumericResult<Vec<f64>> {
    ensure_non_empty(points)?;
    let n = points.len();

    // Column-by-column in place: after pass `j`, table[i] holds f[x_i .. x_{i+j}].
    let mut table: Vec<f64> = points.iter().map(|p| p.y).collect();
    let mut coeffs = Vec::with_capacity(n);
    coeffs.push(table[0]);

    for j in 1..n {
        for i in 0..(n - j) {
            let denom = points[i + j].x - points[i].x;
            if denom.abs() < PIVOT_EPS {
                log::debug!("Newton: x[{i}] == x[{}] = {}", i + j, points[i].x);
                return Err(NumericError::DuplicateAbscissa { i, j: i + j });
            }
            table[i] = (table[i + 1] - table[i]) / denom;
        }
        coeffs.push(table[0]);
    }
    Ok(coeffs)
}

pub fn newton(points: &[Point], x: f64) -> NumericResult<f64> {
    let coeffs = divided_differences(points)?;
    Ok(newton_eval(points, &coeffs, x))
}

/// Evaluate the Newton form given precomputed divided differences.
///
/// `coeffs` must come from `divided_differences(points)`.
pub fn newton_eval(points: &[Point], coeffs: &[f64], x: f64) -> f64 {
    let mut px = coeffs[0];
    let mut product = 1.0;
    for i in 1..coeffs.len() {
        product *= x - points[i - 1].x;
        px += coeffs[i] * product;
    }
    px
}

/// Evaluate the interpolant at many query points (parallel).
///
/// Newton coefficients are computed once and shared across queries.
pub fn evaluate_grid(method: InterpolationMethod, points: &[Point], xs: &[f64]) -> NumericResult<Vec<f64>> {
    match method {
        InterpolationMethod::Lagrange => xs.par_iter().map(|&x| lagrange(points, x)).collect(),
        InterpolationMethod::Newton => {
            let coeffs = divided_differences(points)?;
            Ok(xs.par_iter().map(|&x| newton_eval(points, &coeffs, x)).collect())
        }
    }
}

fn ensure_non_empty(points: &[Point]) -> NumericResult<()> {
    if points.is_empty() {
        return Err(NumericError::InsufficientPoints {
            required: 1,
            actual: 0,
        });
    }
    Ok(())
}

//! Least-squares regression through the normal equations.
//!
//! For a model linear in its coefficients we minimise `Σ (y_i - model(x_i))²` by
//! solving the tiny (2×2 or 3×3) normal-equations system with Gaussian
//! elimination. The exponential model is log-linearised: fit `ln y = A + B·x`
//! and recover `a = e^A`, `b = B`.
//!
//! Degenerate inputs (e.g. every x identical) make the normal matrix singular and
//! surface as `SingularMatrix` from the solver.

use crate::domain::{Point, RegressionKind};
use crate::error::{NumericError, NumericResult};
use crate::math::gauss_elimination;

impl RegressionKind {
    /// Fit this model to `points`, returning its coefficients.
    pub fn fit(self, points: &[Point]) -> NumericResult<Vec<f64>> {
        match self {
            RegressionKind::Linear => linear_regression(points),
            RegressionKind::Quadratic => quadratic_regression(points),
            RegressionKind::Exponential => exponential_regression(points),
        }
    }
}

/// `y = a0 + a1·x`, returns `[a0, a1]`.
pub fn linear_regression(points: &[Point]) -> NumericResult<Vec<f64>> {
    ensure_points(points, 2)?;

    let n = points.len() as f64;
    let (mut sx, mut sy, mut sx2, mut sxy) = (0.0, 0.0, 0.0, 0.0);
    for p in points {
        sx += p.x;
        sy += p.y;
        sx2 += p.x * p.x;
        sxy += p.x * p.y;
    }

    let a = vec![vec![n, sx], vec![sx, sx2]];
    let b = vec![sy, sxy];
    gauss_elimination(&a, &b)
}

/// `y = a0 + a1·x + a2·x²`, returns `[a0, a1, a2]`.
pub fn quadratic_regression(points: &[Point]) -> NumericResult<Vec<f64>> {
    ensure_points(points, 3)?;

    let n = points.len() as f64;
    let (mut sx, mut sx2, mut sx3, mut sx4) = (0.0, 0.0, 0.0, 0.0);
    let (mut sy, mut sxy, mut sx2y) = (0.0, 0.0, 0.0);
    for p in points {
        let x2 = p.x * p.x;
        sx += p.x;
        sx2 += x2;
        sx3 += x2 * p.x;
        sx4 += x2 * x2;
        sy += p.y;
        sxy += p.x * p.y;
        sx2y += x2 * p.y;
    }

    let a = vec![
        vec![n, sx, sx2],
        vec![sx, sx2, sx3],
        vec![sx2, sx3, sx4],
    ];
    let b = vec![sy, sxy, sx2y];
    gauss_elimination(&a, &b)
}

/// `y = a·e^(b·x)`, returns `[a, b]`. Every `y` must be strictly positive.
pub fn exponential_regression(points: &[Point]) -> NumericResult<Vec<f64>> {
    ensure_points(points, 2)?;
    if let Some((index, p)) = points.iter().enumerate().find(|(_, p)| p.y.is_nan() || p.y <= 0.0) {
        return Err(NumericError::NonPositiveValue { index, value: p.y });
    }

    let logged: Vec<Point> = points.iter().map(|p| Point::new(p.x, p.y.ln())).collect();
    let ab = linear_regression(&logged)?;
    Ok(vec![ab[0].exp(), ab[1]])
}

fn ensure_points(points: &[Point], required: usize) -> NumericResult<()> {
    if points.len() < required {
        return Err(NumericError::InsufficientPoints {
            required,
            actual: points.len(),
        });
    }
    Ok(())
}

//! Model evaluation for the regression families.
//!
//! The fitting and reporting code relies on two primitive operations:
//! - predict `y(x)` given coefficients (for residuals/plots)
//! - reduce the squared residuals over a point set (SSE)
//!
//! Coefficient layout per kind:
//! - linear: `[a0, a1]`
//! - quadratic: `[a0, a1, a2]`
//! - exponential: `[a, b]` for `a·e^(b·x)`

use crate::domain::{Point, RegressionKind};

/// Predict `y(x)` for the given model kind.
///
/// # Panics
/// Panics if `coefficients` is shorter than `kind.coefficient_len()`.
pub fn predict(kind: RegressionKind, coefficients: &[f64], x: f64) -> f64 {
    match kind {
        RegressionKind::Linear => coefficients[0] + coefficients[1] * x,
        RegressionKind::Quadratic => coefficients[0] + coefficients[1] * x + coefficients[2] * x * x,
        RegressionKind::Exponential => coefficients[0] * (coefficients[1] * x).exp(),
    }
}

/// `Σ (y_i - model(x_i))²` over all points.
pub fn sum_squared_error(kind: RegressionKind, points: &[Point], coefficients: &[f64]) -> f64 {
    points
        .iter()
        .map(|p| {
            let r = p.y - predict(kind, coefficients, p.x);
            r * r
        })
        .sum()
}

impl RegressionKind {
    /// See [`equation`].
    pub fn equation(self, coefficients: &[f64]) -> String {
        equation(self, coefficients)
    }
}

/// Render the fitted equation, e.g. `y = 1.0000 + 2.0000x`.
pub fn equation(kind: RegressionKind, coefficients: &[f64]) -> String {
    match kind {
        RegressionKind::Linear => format!("y = {:.4} {}x", coefficients[0], signed(coefficients[1])),
        RegressionKind::Quadratic => format!(
            "y = {:.4} {}x {}x²",
            coefficients[0],
            signed(coefficients[1]),
            signed(coefficients[2])
        ),
        RegressionKind::Exponential => format!("y = {:.4}·e^({:.4}x)", coefficients[0], coefficients[1]),
    }
}

fn signed(v: f64) -> String {
    if v < 0.0 {
        format!("- {:.4}", -v)
    } else {
        format!("+ {v:.4}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_each_kind() {
        assert_eq!(predict(RegressionKind::Linear, &[1.0, 2.0], 3.0), 7.0);
        assert_eq!(predict(RegressionKind::Quadratic, &[1.0, 0.0, 2.0], -2.0), 9.0);
        assert_eq!(predict(RegressionKind::Exponential, &[3.0, 0.0], 10.0), 3.0);
    }

    #[test]
    fn sse_of_exact_line_is_zero() {
        let pts = [Point::new(0.0, 1.0), Point::new(1.0, 3.0), Point::new(2.0, 6.0)];
        assert_eq!(sum_squared_error(RegressionKind::Linear, &pts[..2], &[1.0, 2.0]), 0.0);
        assert_eq!(sum_squared_error(RegressionKind::Linear, &pts, &[1.0, 2.0]), 1.0);
    }

    #[test]
    fn equation_formats_signs() {
        assert_eq!(equation(RegressionKind::Linear, &[1.0, -2.5]), "y = 1.0000 - 2.5000x");
        assert_eq!(equation(RegressionKind::Exponential, &[2.0, 0.5]), "y = 2.0000·e^(0.5000x)");
    }
}

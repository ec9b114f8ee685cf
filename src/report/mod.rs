//! Reporting utilities: per-point residuals and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::{FitResult, Point};
use crate::models::predict;

/// Observed vs fitted value at one sample point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointResidual {
    pub point: Point,
    pub y_fit: f64,
    pub residual: f64,
}

/// Fitted values and residuals (`y - y_fit`) for each point.
pub fn compute_residuals(points: &[Point], fit: &FitResult) -> Vec<PointResidual> {
    points
        .iter()
        .map(|&point| {
            let y_fit = predict(fit.kind, &fit.coefficients, point.x);
            PointResidual {
                point,
                y_fit,
                residual: point.y - y_fit,
            }
        })
        .collect()
}

/// The `top_n` residuals with the largest magnitude, largest first.
pub fn largest_residuals(residuals: &[PointResidual], top_n: usize) -> Vec<PointResidual> {
    let mut sorted = residuals.to_vec();
    sorted.sort_by(|a, b| b.residual.abs().total_cmp(&a.residual.abs()));
    sorted.truncate(top_n);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FitQuality, RegressionKind};

    #[test]
    fn residuals_are_observed_minus_fitted() {
        let fit = FitResult {
            kind: RegressionKind::Linear,
            coefficients: vec![0.0, 1.0],
            quality: FitQuality { sse: 0.0, rmse: 0.0, n: 3 },
        };
        let pts = [Point::new(0.0, 0.5), Point::new(1.0, 1.0), Point::new(2.0, 0.0)];
        let res = compute_residuals(&pts, &fit);
        assert_eq!(res[0].residual, 0.5);
        assert_eq!(res[2].y_fit, 2.0);

        let top = largest_residuals(&res, 2);
        assert_eq!(top[0].residual, -2.0);
        assert_eq!(top[1].residual, 0.5);
    }
}

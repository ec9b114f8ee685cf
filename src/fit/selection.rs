//! Fitting several regression models and ranking them.
//!
//! Each requested model is fitted independently (parallel). Models that cannot be
//! fitted (too few points, non-positive y for the exponential, singular normal
//! equations) are recorded in `skipped` with the reason rather than failing the
//! whole run. Remaining fits are ordered by ascending SSE; exact ties go to the
//! simpler model.

use rayon::prelude::*;

use crate::domain::{FitQuality, FitResult, Point, RegressionKind};
use crate::error::{NumericError, NumericResult};
use crate::models::sum_squared_error;

/// Output of fitting + ranking.
#[derive(Debug, Clone)]
pub struct FitSelection {
    /// Successful fits, best (lowest SSE) first.
    pub fits: Vec<FitResult>,
    /// Models that were skipped and why.
    pub skipped: Vec<(RegressionKind, NumericError)>,
}

impl FitSelection {
    pub fn best(&self) -> Option<&FitResult> {
        self.fits.first()
    }
}

/// Fit one model and compute its quality diagnostics.
pub fn fit_model(kind: RegressionKind, points: &[Point]) -> NumericResult<FitResult> {
    let coefficients = kind.fit(points)?;
    let sse = sum_squared_error(kind, points, &coefficients);
    let n = points.len();
    let rmse = (sse / n as f64).sqrt();
    log::debug!("{} fit: coefficients {coefficients:?}, sse {sse:e}", kind.display_name());
    Ok(FitResult {
        kind,
        coefficients,
        quality: FitQuality { sse, rmse, n },
    })
}

/// Fit every kind in `kinds` and rank the successes by SSE.
pub fn fit_and_rank(points: &[Point], kinds: &[RegressionKind]) -> FitSelection {
    let outcomes: Vec<(RegressionKind, NumericResult<FitResult>)> = kinds
        .par_iter()
        .map(|&kind| (kind, fit_model(kind, points)))
        .collect();

    let mut fits = Vec::new();
    let mut skipped = Vec::new();
    for (kind, outcome) in outcomes {
        match outcome {
            Ok(fit) => fits.push(fit),
            Err(err) => {
                log::info!("skipping {} fit: {err}", kind.display_name());
                skipped.push((kind, err));
            }
        }
    }

    fits.sort_by(|a, b| {
        a.quality
            .sse
            .partial_cmp(&b.quality.sse)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.kind.complexity().cmp(&b.kind.complexity()))
    });

    FitSelection { fits, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parabola_ranks_quadratic_first() {
        let pts: Vec<Point> = (0..8)
            .map(|i| {
                let x = i as f64;
                Point::new(x, 1.0 + 0.5 * x * x)
            })
            .collect();
        let sel = fit_and_rank(&pts, &RegressionKind::ALL);
        assert!(sel.skipped.is_empty());
        assert_eq!(sel.best().unwrap().kind, RegressionKind::Quadratic);
        assert!(sel.best().unwrap().quality.sse < 1e-12);
    }

    #[test]
    fn unusable_models_are_recorded_as_skipped() {
        let pts = [Point::new(0.0, -1.0), Point::new(1.0, 1.0)];
        let sel = fit_and_rank(&pts, &RegressionKind::ALL);
        assert_eq!(sel.fits.len(), 1);
        assert_eq!(sel.fits[0].kind, RegressionKind::Linear);
        let skipped: Vec<RegressionKind> = sel.skipped.iter().map(|(k, _)| *k).collect();
        assert!(skipped.contains(&RegressionKind::Quadratic));
        assert!(skipped.contains(&RegressionKind::Exponential));
    }

    #[test]
    fn exact_ties_prefer_simpler_model() {
        // Collinear points: both models fit exactly.
        let pts = [Point::new(0.0, 1.0), Point::new(1.0, 2.0), Point::new(2.0, 3.0)];
        let sel = fit_and_rank(&pts, &[RegressionKind::Quadratic, RegressionKind::Linear]);
        assert_eq!(sel.fits.len(), 2);
        assert_eq!(sel.fits[0].kind, RegressionKind::Linear);
    }
}

//! Composite quadrature over equally spaced samples.
//!
//! The raw rules (`trapezoidal`, `simpson`) take `h = x[1] - x[0]` and trust the
//! caller on spacing: unevenly spaced input silently gives an inaccurate result.
//! `integrate` is the checked entry point that validates spacing first.

use crate::domain::{Point, QuadratureRule};
use crate::error::{NumericError, NumericResult};

/// Default absolute tolerance on `|Δx_i - h|` used by `integrate`.
pub const DEFAULT_SPACING_TOLERANCE: f64 = 1e-6;

impl QuadratureRule {
    /// Apply this rule without spacing validation.
    pub fn apply(self, points: &[Point]) -> NumericResult<f64> {
        match self {
            QuadratureRule::Trapezoidal => Ok(trapezoidal(points)),
            QuadratureRule::Simpson => simpson(points),
            QuadratureRule::SimpsonTrapezoid => simpson_with_trapezoid_tail(points),
        }
    }
}

/// `(h/2)·(y_0 + 2·Σ y_interior + y_last)`; `0.0` for fewer than two points.
pub fn trapezoidal(points: &[Point]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let last = points.len() - 1;
    let h = points[1].x - points[0].x;
    let interior: f64 = points[1..last].iter().map(|p| p.y).sum();
    (h / 2.0) * (points[0].y + 2.0 * interior + points[last].y)
}

/// `(h/3)·(y_0 + 4·Σ y_odd + 2·Σ y_even + y_last)`.
///
/// Needs an even number of subintervals, at least two.
pub fn simpson(points: &[Point]) -> NumericResult<f64> {
    let subintervals = points.len().saturating_sub(1);
    if subintervals < 2 || subintervals % 2 != 0 {
        return Err(NumericError::InvalidSubintervalCount { subintervals });
    }

    let h = points[1].x - points[0].x;
    let mut odd = 0.0;
    let mut even = 0.0;
    for (i, p) in points.iter().enumerate().take(subintervals).skip(1) {
        if i % 2 == 0 {
            even += p.y;
        } else {
            odd += p.y;
        }
    }
    Ok((h / 3.0) * (points[0].y + 4.0 * odd + 2.0 * even + points[subintervals].y))
}

/// Simpson over the largest even prefix, plus a trapezoid on a leftover interval.
///
/// One interval falls back to the trapezoid alone.
pub fn simpson_with_trapezoid_tail(points: &[Point]) -> NumericResult<f64> {
    let subintervals = points.len().saturating_sub(1);
    match subintervals {
        0 => Err(NumericError::InvalidSubintervalCount { subintervals }),
        1 => Ok(trapezoidal(points)),
        s if s % 2 == 0 => simpson(points),
        s => {
            let head = simpson(&points[..s])?;
            let tail = trapezoidal(&points[s - 1..]);
            Ok(head + tail)
        }
    }
}

/// Verify that `points` are strictly ascending with constant spacing.
///
/// Returns the spacing `h`.
pub fn check_uniform_spacing(points: &[Point], tolerance: f64) -> NumericResult<f64> {
    if points.len() < 2 {
        return Err(NumericError::InsufficientPoints {
            required: 2,
            actual: points.len(),
        });
    }
    let h = points[1].x - points[0].x;
    if h.is_nan() || h <= 0.0 {
        return Err(NumericError::NonUniformSpacing { index: 0 });
    }
    for (index, pair) in points.windows(2).enumerate().skip(1) {
        let dx = pair[1].x - pair[0].x;
        if (dx - h).abs() > tolerance {
            return Err(NumericError::NonUniformSpacing { index });
        }
    }
    Ok(h)
}

/// Spacing-checked integration.
pub fn integrate(rule: QuadratureRule, points: &[Point], spacing_tolerance: f64) -> NumericResult<f64> {
    let h = check_uniform_spacing(points, spacing_tolerance)?;
    log::debug!("{}: {} points, h = {h}", rule.display_name(), points.len());
    rule.apply(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(f: impl Fn(f64) -> f64, a: f64, h: f64, n: usize) -> Vec<Point> {
        (0..n)
            .map(|i| {
                let x = a + h * i as f64;
                Point::new(x, f(x))
            })
            .collect()
    }

    #[test]
    fn trapezoid_on_a_line() {
        let pts = [Point::new(0.0, 0.0), Point::new(2.0, 4.0), Point::new(4.0, 8.0)];
        assert_eq!(trapezoidal(&pts), 16.0);
    }

    #[test]
    fn trapezoid_needs_two_points() {
        assert_eq!(trapezoidal(&[]), 0.0);
        assert_eq!(trapezoidal(&[Point::new(1.0, 5.0)]), 0.0);
    }

    #[test]
    fn simpson_is_exact_for_cubics() {
        let f = |x: f64| x * x * x - 2.0 * x + 1.0;
        let pts = sample(f, 0.0, 0.5, 5);
        // ∫_0^2 (x³ - 2x + 1) dx = 4 - 4 + 2
        assert!((simpson(&pts).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn simpson_rejects_odd_subintervals() {
        let pts = sample(|x| x, 0.0, 1.0, 4);
        assert_eq!(simpson(&pts), Err(NumericError::InvalidSubintervalCount { subintervals: 3 }));
        assert_eq!(
            simpson(&pts[..2]),
            Err(NumericError::InvalidSubintervalCount { subintervals: 1 })
        );
    }

    #[test]
    fn tail_composition_handles_odd_counts() {
        let f = |x: f64| 3.0 * x * x;
        let pts = sample(f, 0.0, 1.0, 4);
        // Simpson on [0,2] is exact (8); trapezoid on [2,3] gives (12 + 27)/2.
        let v = simpson_with_trapezoid_tail(&pts).unwrap();
        assert!((v - (8.0 + 19.5)).abs() < 1e-12);

        let even = sample(f, 0.0, 1.0, 5);
        assert_eq!(simpson_with_trapezoid_tail(&even), simpson(&even));
    }

    #[test]
    fn spacing_check_flags_the_bad_interval() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(2.0, 1.8),
            Point::new(4.0, 4.0),
            Point::new(6.0, 4.0),
            Point::new(10.0, 6.0),
        ];
        assert_eq!(
            integrate(QuadratureRule::Trapezoidal, &pts, DEFAULT_SPACING_TOLERANCE),
            Err(NumericError::NonUniformSpacing { index: 3 })
        );
    }

    #[test]
    fn spacing_check_rejects_descending_input() {
        let pts = [Point::new(1.0, 0.0), Point::new(0.0, 0.0)];
        assert_eq!(check_uniform_spacing(&pts, 1e-6), Err(NumericError::NonUniformSpacing { index: 0 }));
    }
}

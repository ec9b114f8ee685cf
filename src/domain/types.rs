//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed straight into the numerical routines
//! - read from problem files
//! - exported to JSON alongside the computed results

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Dense row-major matrix.
pub type Matrix = Vec<Vec<f64>>;

/// Dense vector, index-aligned with matrix rows.
pub type Vector = Vec<f64>;

/// A sample point `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Direct (elimination-based) solver for `A·x = b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DirectMethod {
    Gauss,
    Jordan,
    Lu,
}

impl DirectMethod {
    pub const ALL: [DirectMethod; 3] = [DirectMethod::Gauss, DirectMethod::Jordan, DirectMethod::Lu];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            DirectMethod::Gauss => "Gaussian elimination",
            DirectMethod::Jordan => "Gauss-Jordan",
            DirectMethod::Lu => "LU factorization",
        }
    }
}

/// Which direct method(s) to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DirectSpec {
    Gauss,
    Jordan,
    Lu,
    All,
}

impl DirectSpec {
    pub fn methods(self) -> Vec<DirectMethod> {
        match self {
            DirectSpec::Gauss => vec![DirectMethod::Gauss],
            DirectSpec::Jordan => vec![DirectMethod::Jordan],
            DirectSpec::Lu => vec![DirectMethod::Lu],
            DirectSpec::All => DirectMethod::ALL.to_vec(),
        }
    }
}

/// Least-squares regression model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RegressionKind {
    /// `y = a0 + a1·x`
    Linear,
    /// `y = a0 + a1·x + a2·x²`
    Quadratic,
    /// `y = a·e^(b·x)`
    Exponential,
}

impl RegressionKind {
    pub const ALL: [RegressionKind; 3] = [
        RegressionKind::Linear,
        RegressionKind::Quadratic,
        RegressionKind::Exponential,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            RegressionKind::Linear => "Linear",
            RegressionKind::Quadratic => "Quadratic",
            RegressionKind::Exponential => "Exponential",
        }
    }

    /// Minimum number of points needed to determine the coefficients.
    pub fn min_points(self) -> usize {
        match self {
            RegressionKind::Linear | RegressionKind::Exponential => 2,
            RegressionKind::Quadratic => 3,
        }
    }

    /// Number of coefficients the model carries.
    pub fn coefficient_len(self) -> usize {
        match self {
            RegressionKind::Linear | RegressionKind::Exponential => 2,
            RegressionKind::Quadratic => 3,
        }
    }

    /// Rank used to break SSE ties in favour of the simpler model.
    pub fn complexity(self) -> usize {
        match self {
            RegressionKind::Linear => 0,
            RegressionKind::Exponential => 1,
            RegressionKind::Quadratic => 2,
        }
    }
}

/// Which regression model(s) to fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ModelSpec {
    Linear,
    Quadratic,
    Exponential,
    All,
}

impl ModelSpec {
    pub fn kinds(self) -> Vec<RegressionKind> {
        match self {
            ModelSpec::Linear => vec![RegressionKind::Linear],
            ModelSpec::Quadratic => vec![RegressionKind::Quadratic],
            ModelSpec::Exponential => vec![RegressionKind::Exponential],
            ModelSpec::All => RegressionKind::ALL.to_vec(),
        }
    }
}

/// Polynomial interpolation scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMethod {
    Lagrange,
    Newton,
}

impl InterpolationMethod {
    pub const ALL: [InterpolationMethod; 2] = [InterpolationMethod::Lagrange, InterpolationMethod::Newton];

    pub fn display_name(self) -> &'static str {
        match self {
            InterpolationMethod::Lagrange => "Lagrange",
            InterpolationMethod::Newton => "Newton (divided differences)",
        }
    }
}

/// Which interpolation method(s) to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationSpec {
    Lagrange,
    Newton,
    All,
}

impl InterpolationSpec {
    pub fn methods(self) -> Vec<InterpolationMethod> {
        match self {
            InterpolationSpec::Lagrange => vec![InterpolationMethod::Lagrange],
            InterpolationSpec::Newton => vec![InterpolationMethod::Newton],
            InterpolationSpec::All => InterpolationMethod::ALL.to_vec(),
        }
    }
}

/// Composite quadrature rule over equally spaced samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum QuadratureRule {
    Trapezoidal,
    Simpson,
    /// Simpson 1/3 over an even prefix, trapezoid on a trailing odd interval.
    SimpsonTrapezoid,
}

impl QuadratureRule {
    pub fn display_name(self) -> &'static str {
        match self {
            QuadratureRule::Trapezoidal => "Composite trapezoidal",
            QuadratureRule::Simpson => "Composite Simpson 1/3",
            QuadratureRule::SimpsonTrapezoid => "Simpson 1/3 + trapezoid tail",
        }
    }
}

/// A linear system as read from a problem file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemProblem {
    pub matrix: Matrix,
    pub rhs: Vector,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_guess: Option<Vector>,
}

/// Summary stats about a point set (used by reports and plots).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointStats {
    pub n: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl PointStats {
    /// Returns `None` for an empty point set.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut stats = PointStats {
            n: points.len(),
            x_min: first.x,
            x_max: first.x,
            y_min: first.y,
            y_max: first.y,
        };
        for p in &points[1..] {
            stats.x_min = stats.x_min.min(p.x);
            stats.x_max = stats.x_max.max(p.x);
            stats.y_min = stats.y_min.min(p.y);
            stats.y_max = stats.y_max.max(p.y);
        }
        Some(stats)
    }
}

/// Fit quality diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    /// `Σ (y_i - model(x_i))²`
    pub sse: f64,
    pub rmse: f64,
    pub n: usize,
}

/// Fit output for a single regression model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub kind: RegressionKind,
    pub coefficients: Vec<f64>,
    pub quality: FitQuality,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_stats_covers_range() {
        let points = [Point::new(2.0, -1.0), Point::new(-3.0, 4.0), Point::new(1.0, 0.5)];
        let stats = PointStats::from_points(&points).unwrap();
        assert_eq!(stats.n, 3);
        assert_eq!((stats.x_min, stats.x_max), (-3.0, 2.0));
        assert_eq!((stats.y_min, stats.y_max), (-1.0, 4.0));
        assert!(PointStats::from_points(&[]).is_none());
    }

    #[test]
    fn specs_expand_to_methods() {
        assert_eq!(DirectSpec::All.methods().len(), 3);
        assert_eq!(ModelSpec::Quadratic.kinds(), vec![RegressionKind::Quadratic]);
        assert_eq!(InterpolationSpec::All.methods(), InterpolationMethod::ALL.to_vec());
    }

    #[test]
    fn problem_json_initial_guess_is_optional() {
        let problem: SystemProblem =
            serde_json::from_str(r#"{"matrix": [[1.0, 0.0], [0.0, 1.0]], "rhs": [1.0, 2.0]}"#).unwrap();
        assert!(problem.initial_guess.is_none());
        assert_eq!(problem.rhs, vec![1.0, 2.0]);
    }
}

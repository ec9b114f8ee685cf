//! Shared task logic used by every front-end (terminal text, JSON, exports).
//!
//! Each `run_*` function executes one numerical task and packages the results,
//! including per-method failures, into a serializable outcome. Presentation code
//! only ever sees these outcomes.

use serde::Serialize;

use crate::domain::{
    DirectMethod, FitResult, InterpolationMethod, Point, PointStats, QuadratureRule, RegressionKind,
};
use crate::error::{AppError, NumericError};
use crate::fit::fit_and_rank;
use crate::math::{
    IterativeSolution, LuFactors, SeidelOptions, check_uniform_spacing, gauss_seidel, integrate,
    is_diagonally_dominant, lu_decompose, residual_inf_norm, solve_all,
};

/// The result of one `nm` task.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "task", rename_all = "lowercase")]
pub enum Outcome {
    Solve(SolveOutcome),
    Iterate(IterateOutcome),
    Fit(FitOutcome),
    Interpolate(InterpolationOutcome),
    Integrate(IntegrationOutcome),
}

impl Outcome {
    /// A message describing why the task as a whole failed, if it did.
    ///
    /// Tasks running several methods only fail when none of them succeeded.
    pub fn failure(&self) -> Option<String> {
        match self {
            Outcome::Solve(o) => all_failed(o.runs.iter().map(|r| r.error.as_deref())),
            Outcome::Iterate(o) => o.error.clone(),
            Outcome::Fit(o) => {
                if o.fits.is_empty() {
                    Some(
                        o.skipped
                            .first()
                            .map(|s| s.reason.clone())
                            .unwrap_or_else(|| "No models were fitted.".to_string()),
                    )
                } else {
                    None
                }
            }
            Outcome::Interpolate(o) => all_failed(o.runs.iter().map(|r| r.error.as_deref())),
            Outcome::Integrate(_) => None,
        }
    }
}

fn all_failed<'a>(mut errors: impl Iterator<Item = Option<&'a str>>) -> Option<String> {
    let mut first = None;
    for e in errors.by_ref() {
        match e {
            None => return None,
            Some(msg) if first.is_none() => first = Some(msg.to_string()),
            Some(_) => {}
        }
    }
    first
}

#[derive(Debug, Clone, Serialize)]
pub struct DirectRun {
    pub method: DirectMethod,
    pub solution: Option<Vec<f64>>,
    /// `‖A·x - b‖∞` for the returned solution.
    pub residual: Option<f64>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SolveOutcome {
    pub n: usize,
    pub runs: Vec<DirectRun>,
    /// Largest component-wise difference between any two successful methods.
    pub max_disagreement: Option<f64>,
    /// Factors of `A`, present when LU was among the methods and succeeded.
    pub lu_factors: Option<LuFactors>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IterateOutcome {
    pub n: usize,
    pub diagonally_dominant: bool,
    pub options: SeidelOptions,
    pub solution: Option<IterativeSolution>,
    pub residual: Option<f64>,
    pub error: Option<String>,
    /// Final estimate when the iteration did not converge.
    pub last_estimate: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedFit {
    pub kind: RegressionKind,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FitOutcome {
    pub stats: Option<PointStats>,
    /// Best (lowest SSE) first.
    pub fits: Vec<FitResult>,
    pub skipped: Vec<SkippedFit>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InterpolationRun {
    pub method: InterpolationMethod,
    pub value: Option<f64>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InterpolationOutcome {
    pub at: f64,
    /// Degree of the interpolating polynomial (`n - 1`).
    pub degree: usize,
    pub runs: Vec<InterpolationRun>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IntegrationOutcome {
    pub rule: QuadratureRule,
    pub n_points: usize,
    pub h: f64,
    pub x_min: f64,
    pub x_max: f64,
    pub value: f64,
}

/// Solve `A·x = b` with each requested direct method.
pub fn run_solve(a: &[Vec<f64>], b: &[f64], methods: &[DirectMethod]) -> SolveOutcome {
    let runs: Vec<DirectRun> = solve_all(methods, a, b)
        .into_iter()
        .map(|(method, result)| match result {
            Ok(x) => DirectRun {
                method,
                residual: Some(residual_inf_norm(a, &x, b)),
                solution: Some(x),
                error: None,
            },
            Err(err) => {
                log::info!("{} failed: {err}", method.display_name());
                DirectRun {
                    method,
                    solution: None,
                    residual: None,
                    error: Some(err.to_string()),
                }
            }
        })
        .collect();

    let solutions: Vec<&Vec<f64>> = runs.iter().filter_map(|r| r.solution.as_ref()).collect();
    let max_disagreement = if solutions.len() >= 2 {
        let mut worst: f64 = 0.0;
        for (i, x) in solutions.iter().enumerate() {
            for y in &solutions[i + 1..] {
                for (xi, yi) in x.iter().zip(y.iter()) {
                    worst = worst.max((xi - yi).abs());
                }
            }
        }
        Some(worst)
    } else {
        None
    };

    let lu_factors = if runs.iter().any(|r| r.method == DirectMethod::Lu && r.solution.is_some()) {
        lu_decompose(a).ok()
    } else {
        None
    };

    SolveOutcome {
        n: a.len(),
        runs,
        max_disagreement,
        lu_factors,
    }
}

/// Run Gauss-Seidel from `guess`.
pub fn run_iterate(a: &[Vec<f64>], b: &[f64], guess: &[f64], options: SeidelOptions) -> IterateOutcome {
    let diagonally_dominant = is_diagonally_dominant(a);
    if !diagonally_dominant {
        log::warn!("Matrix is not strictly diagonally dominant; Gauss-Seidel may not converge.");
    }

    let mut outcome = IterateOutcome {
        n: a.len(),
        diagonally_dominant,
        options,
        solution: None,
        residual: None,
        error: None,
        last_estimate: None,
    };

    match gauss_seidel(a, b, guess, &options) {
        Ok(sol) => {
            outcome.residual = Some(residual_inf_norm(a, &sol.x, b));
            outcome.solution = Some(sol);
        }
        Err(err) => {
            if let NumericError::DidNotConverge { last, .. } = &err {
                outcome.last_estimate = Some(last.clone());
            }
            outcome.error = Some(err.to_string());
        }
    }
    outcome
}

/// Fit and rank the requested regression models.
pub fn run_fit(points: &[Point], kinds: &[RegressionKind]) -> FitOutcome {
    let selection = fit_and_rank(points, kinds);
    FitOutcome {
        stats: PointStats::from_points(points),
        fits: selection.fits,
        skipped: selection
            .skipped
            .into_iter()
            .map(|(kind, err)| SkippedFit {
                kind,
                reason: err.to_string(),
            })
            .collect(),
    }
}

/// Evaluate the interpolating polynomial at `at` with each requested method.
pub fn run_interpolate(points: &[Point], at: f64, methods: &[InterpolationMethod]) -> InterpolationOutcome {
    let runs = methods
        .iter()
        .map(|&method| match method.evaluate(points, at) {
            Ok(value) => InterpolationRun {
                method,
                value: Some(value),
                error: None,
            },
            Err(err) => InterpolationRun {
                method,
                value: None,
                error: Some(err.to_string()),
            },
        })
        .collect();
    InterpolationOutcome {
        at,
        degree: points.len().saturating_sub(1),
        runs,
    }
}

/// Spacing-checked quadrature.
pub fn run_integrate(
    rule: QuadratureRule,
    points: &[Point],
    spacing_tolerance: f64,
) -> Result<IntegrationOutcome, AppError> {
    let h = check_uniform_spacing(points, spacing_tolerance)?;
    let value = integrate(rule, points, spacing_tolerance)?;
    let (x_min, x_max) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (first.x, last.x),
        _ => (0.0, 0.0),
    };
    Ok(IntegrationOutcome {
        rule,
        n_points: points.len(),
        h,
        x_min,
        x_max,
        value,
    })
}

//! Formatted terminal output for task outcomes.
//!
//! Formatting lives here so the numerical code never prints, and output changes
//! stay localized (the tests below pin the important lines).

use crate::app::pipeline::{
    FitOutcome, IntegrationOutcome, InterpolationOutcome, IterateOutcome, Outcome, SolveOutcome,
};
use crate::report::PointResidual;

/// Format any outcome as the `nm` text report.
pub fn format_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Solve(o) => format_solve(o),
        Outcome::Iterate(o) => format_iterate(o),
        Outcome::Fit(o) => format_fit(o),
        Outcome::Interpolate(o) => format_interpolation(o),
        Outcome::Integrate(o) => format_integration(o),
    }
}

pub fn format_solve(o: &SolveOutcome) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== nm solve ({}x{} system) ===\n", o.n, o.n));
    for run in &o.runs {
        match (&run.solution, &run.error) {
            (Some(x), _) => {
                out.push_str(&format!("{:<22} x = {}\n", run.method.display_name(), fmt_vec(x)));
                if let Some(r) = run.residual {
                    out.push_str(&format!("{:<22} |Ax-b|inf = {r:.3e}\n", ""));
                }
            }
            (None, Some(err)) => {
                out.push_str(&format!("{:<22} failed: {err}\n", run.method.display_name()));
            }
            (None, None) => {}
        }
    }
    if let Some(d) = o.max_disagreement {
        out.push_str(&format!("\nMax disagreement between methods: {d:.3e}\n"));
    }
    if let Some(lu) = &o.lu_factors {
        out.push_str("\nL =\n");
        out.push_str(&fmt_matrix(&lu.l));
        out.push_str("U =\n");
        out.push_str(&fmt_matrix(&lu.u));
    }
    out
}

pub fn format_iterate(o: &IterateOutcome) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== nm iterate (Gauss-Seidel, {}x{} system) ===\n", o.n, o.n));
    out.push_str(&format!(
        "tolerance={:e} | max_iterations={} | diagonally dominant: {}\n",
        o.options.tolerance,
        o.options.max_iterations,
        if o.diagonally_dominant { "yes" } else { "no" }
    ));
    if let Some(sol) = &o.solution {
        out.push_str(&format!(
            "Converged in {} iterations (max change {:.3e})\n",
            sol.iterations, sol.max_error
        ));
        out.push_str(&format!("x = {}\n", fmt_vec(&sol.x)));
        if let Some(r) = o.residual {
            out.push_str(&format!("|Ax-b|inf = {r:.3e}\n"));
        }
    }
    if let Some(err) = &o.error {
        out.push_str(&format!("Failed: {err}\n"));
    }
    if let Some(last) = &o.last_estimate {
        out.push_str(&format!("Last estimate: {}\n", fmt_vec(last)));
    }
    out
}

pub fn format_fit(o: &FitOutcome) -> String {
    let mut out = String::new();
    out.push_str("=== nm fit (least squares) ===\n");
    if let Some(s) = &o.stats {
        out.push_str(&format!(
            "Points: n={} | x=[{:.4}, {:.4}] | y=[{:.4}, {:.4}]\n",
            s.n, s.x_min, s.x_max, s.y_min, s.y_max
        ));
    }

    out.push_str("\nModel diagnostics:\n");
    for (i, fit) in o.fits.iter().enumerate() {
        let chosen = if i == 0 { "*" } else { " " };
        out.push_str(&format!(
            "{chosen} {:<12} SSE={:.6} RMSE={:.6}\n",
            fit.kind.display_name(),
            fit.quality.sse,
            fit.quality.rmse
        ));
        out.push_str(&format!("  {:<12} {}\n", "", fit.kind.equation(&fit.coefficients)));
    }
    for skipped in &o.skipped {
        out.push_str(&format!(
            "  (skipped {}) {}\n",
            skipped.kind.display_name(),
            skipped.reason
        ));
    }
    out
}

/// Table of the largest residuals of the chosen fit.
pub fn format_residuals(residuals: &[PointResidual]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>12} {:>12} {:>12} {:>12}\n", "x", "y", "y_fit", "residual"));
    for r in residuals {
        out.push_str(&format!(
            "{:>12.4} {:>12.4} {:>12.4} {:>12.4}\n",
            r.point.x, r.point.y, r.y_fit, r.residual
        ));
    }
    out
}

pub fn format_interpolation(o: &InterpolationOutcome) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "=== nm interpolate (degree {} polynomial at x={}) ===\n",
        o.degree, o.at
    ));
    for run in &o.runs {
        match (run.value, &run.error) {
            (Some(v), _) => out.push_str(&format!("{:<10} P({}) = {v:.10}\n", run.method.display_name(), o.at)),
            (None, Some(err)) => out.push_str(&format!("{:<10} failed: {err}\n", run.method.display_name())),
            (None, None) => {}
        }
    }
    out
}

pub fn format_integration(o: &IntegrationOutcome) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== nm integrate ({}) ===\n", o.rule.display_name()));
    out.push_str(&format!(
        "Samples: n={} | x=[{}, {}] | h={}\n",
        o.n_points, o.x_min, o.x_max, o.h
    ));
    out.push_str(&format!("Integral = {:.10}\n", o.value));
    out
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.6}")).collect();
    format!("[{}]", parts.join(", "))
}

fn fmt_matrix(m: &[Vec<f64>]) -> String {
    let mut out = String::new();
    for row in m {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:>12.6}")).collect();
        out.push_str(&format!("  {}\n", cells.join(" ")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::{run_fit, run_integrate, run_interpolate, run_solve};
    use crate::domain::{DirectMethod, InterpolationMethod, Point, QuadratureRule, RegressionKind};

    #[test]
    fn solve_report_lists_methods_and_factors() {
        let a = vec![vec![2.0, 1.0, -1.0], vec![-3.0, -1.0, 2.0], vec![-2.0, 1.0, 2.0]];
        let b = vec![8.0, -11.0, -3.0];
        let txt = format_solve(&run_solve(&a, &b, &DirectMethod::ALL));
        assert!(txt.starts_with("=== nm solve (3x3 system) ===\n"));
        assert!(txt.contains("[2.000000, 3.000000, -1.000000]"));
        assert!(txt.contains("L =\n"));
    }

    #[test]
    fn singular_solve_report_shows_failures() {
        let a = vec![vec![1.0, 2.0], vec![2.0, 4.0]];
        let txt = format_solve(&run_solve(&a, &[1.0, 2.0], &[DirectMethod::Gauss]));
        assert!(txt.contains("failed:"));
        assert!(!txt.contains("L =\n"));
    }

    #[test]
    fn fit_report_marks_best_model_and_skips() {
        let pts = [Point::new(0.0, -1.0), Point::new(1.0, 1.0)];
        let txt = format_fit(&run_fit(&pts, &RegressionKind::ALL));
        assert!(txt.contains("* Linear"));
        assert!(txt.contains("(skipped Quadratic)"));
        assert!(txt.contains("(skipped Exponential)"));
    }

    #[test]
    fn interpolation_and_integration_reports() {
        let pts = [Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 4.0)];
        let txt = format_interpolation(&run_interpolate(&pts, 1.5, &InterpolationMethod::ALL));
        assert!(txt.contains("P(1.5) = 2.2500000000"));

        let txt = format_integration(&run_integrate(QuadratureRule::Trapezoidal, &pts, 1e-6).unwrap());
        assert!(txt.contains("Integral = 3.0000000000"));
        assert!(txt.contains("h=1"));
    }
}

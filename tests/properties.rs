//! Property-based and reference-case tests across the public API.
//!
//! Covers: direct solver round trips and agreement, Gauss-Seidel vs direct,
//! interpolation exactness, regression exactness, quadrature exactness.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use numeth::data::dominant_system;
use numeth::domain::{DirectMethod, InterpolationMethod, Point, RegressionKind};
use numeth::error::NumericError;
use numeth::fit::fit_and_rank;
use numeth::math::{
    SeidelOptions, gauss_elimination, gauss_jordan, gauss_seidel, lagrange, lu_solve, newton, simpson,
    trapezoidal,
};
use proptest::prelude::*;

fn poly(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

fn sample(f: impl Fn(f64) -> f64, a: f64, h: f64, subintervals: usize) -> Vec<Point> {
    (0..=subintervals)
        .map(|i| {
            let x = a + h * i as f64;
            Point::new(x, f(x))
        })
        .collect()
}

// ── Direct solvers ───────────────────────────────────────────────────

proptest! {
    /// b = A·x* for a known x*; every direct method recovers x*.
    #[test]
    fn direct_methods_recover_known_solution(n in 1usize..9, seed in any::<u64>()) {
        let s = dominant_system(n, seed).unwrap();
        for method in DirectMethod::ALL {
            let x = method.solve(&s.problem.matrix, &s.problem.rhs).unwrap();
            prop_assert_eq!(x.len(), n);
            for (xi, ti) in x.iter().zip(&s.solution) {
                prop_assert!((xi - ti).abs() < 1e-6, "{:?}: {} vs {}", method, xi, ti);
            }
        }
    }

    /// Gauss, Gauss-Jordan and LU agree with each other.
    #[test]
    fn direct_methods_agree(n in 2usize..9, seed in any::<u64>()) {
        let s = dominant_system(n, seed).unwrap();
        let (a, b) = (&s.problem.matrix, &s.problem.rhs);
        let g = gauss_elimination(a, b).unwrap();
        let j = gauss_jordan(a, b).unwrap();
        let l = lu_solve(a, b).unwrap();
        for i in 0..n {
            prop_assert!((g[i] - j[i]).abs() < 1e-6);
            prop_assert!((g[i] - l[i]).abs() < 1e-6);
        }
    }

    /// Gauss-Seidel converges on dominant systems and matches elimination.
    #[test]
    fn seidel_matches_direct_on_dominant_systems(n in 1usize..9, seed in any::<u64>()) {
        let s = dominant_system(n, seed).unwrap();
        let (a, b) = (&s.problem.matrix, &s.problem.rhs);
        let opts = SeidelOptions { tolerance: 1e-10, max_iterations: 1000 };
        let it = gauss_seidel(a, b, &vec![0.0; n], &opts).unwrap();
        let direct = gauss_elimination(a, b).unwrap();
        prop_assert!(it.iterations <= opts.max_iterations);
        for (xi, di) in it.x.iter().zip(&direct) {
            prop_assert!((xi - di).abs() < 1e-6);
        }
    }
}

#[test]
fn gauss_reference_system() {
    let a = vec![vec![2.0, 1.0, -1.0], vec![-3.0, -1.0, 2.0], vec![-2.0, 1.0, 2.0]];
    let b = vec![8.0, -11.0, -3.0];
    let x = gauss_elimination(&a, &b).unwrap();
    for (xi, ei) in x.iter().zip([2.0, 3.0, -1.0]) {
        assert_abs_diff_eq!(*xi, ei, epsilon = 1e-12);
    }
}

#[test]
fn singular_matrix_is_reported_by_every_direct_method() {
    let a = vec![vec![1.0, 2.0], vec![2.0, 4.0]];
    let b = vec![3.0, 6.0];
    for method in DirectMethod::ALL {
        let err = method.solve(&a, &b).unwrap_err();
        assert!(
            matches!(err, NumericError::SingularMatrix { pivot: 1 }),
            "{method:?} returned {err:?}"
        );
    }
}

#[test]
fn seidel_on_small_dominant_system() {
    let a = vec![vec![10.0, -1.0, 2.0], vec![-1.0, 11.0, -1.0], vec![2.0, -1.0, 10.0]];
    let b = vec![6.0, 25.0, -11.0];
    let it = gauss_seidel(&a, &b, &[0.0; 3], &SeidelOptions::default()).unwrap();
    assert!(it.iterations < 100);
    let direct = gauss_elimination(&a, &b).unwrap();
    for (xi, di) in it.x.iter().zip(&direct) {
        assert_abs_diff_eq!(*xi, *di, epsilon = 1e-3);
    }
}

#[test]
fn seidel_reports_divergence() {
    let a = vec![vec![1.0, 3.0], vec![3.0, 1.0]];
    let err = gauss_seidel(&a, &[4.0, 4.0], &[0.0, 0.0], &SeidelOptions::default()).unwrap_err();
    match err {
        NumericError::DidNotConverge { last, .. } => assert_eq!(last.len(), 2),
        other => panic!("expected DidNotConverge, got {other:?}"),
    }
}

// ── Interpolation ────────────────────────────────────────────────────

proptest! {
    /// n nodes reproduce any polynomial of degree n-1, and both schemes agree.
    #[test]
    fn interpolation_reproduces_polynomials(
        coeffs in prop::collection::vec(-3.0f64..3.0, 1..6),
        x in -1.0f64..3.0,
    ) {
        let nodes: Vec<Point> = (0..coeffs.len())
            .map(|i| {
                let xi = i as f64 * 0.7 - 1.0;
                Point::new(xi, poly(&coeffs, xi))
            })
            .collect();
        let expected = poly(&coeffs, x);
        let l = lagrange(&nodes, x).unwrap();
        let n = newton(&nodes, x).unwrap();
        let scale = expected.abs().max(1.0);
        prop_assert!((l - expected).abs() < 1e-8 * scale, "lagrange {} vs {}", l, expected);
        prop_assert!((n - expected).abs() < 1e-8 * scale, "newton {} vs {}", n, expected);
        prop_assert!((l - n).abs() < 1e-8 * scale);
    }
}

#[test]
fn interpolation_through_three_points() {
    let pts = [Point::new(1.0, 1.0), Point::new(2.0, 4.0), Point::new(3.0, 9.0)];
    for method in InterpolationMethod::ALL {
        assert_relative_eq!(method.evaluate(&pts, 2.5).unwrap(), 6.25, max_relative = 1e-12);
    }
}

// ── Regression ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn linear_regression_is_exact_on_a_line(a0 in -5.0f64..5.0, a1 in -5.0f64..5.0) {
        let pts = sample(|x| a0 + a1 * x, 0.0, 1.0, 10);
        let c = RegressionKind::Linear.fit(&pts).unwrap();
        prop_assert!((c[0] - a0).abs() < 1e-8);
        prop_assert!((c[1] - a1).abs() < 1e-8);
    }

    #[test]
    fn quadratic_regression_is_exact_on_a_parabola(
        a0 in -5.0f64..5.0,
        a1 in -5.0f64..5.0,
        a2 in -2.0f64..2.0,
    ) {
        let pts = sample(|x| a0 + a1 * x + a2 * x * x, 0.0, 1.0, 10);
        let selection = fit_and_rank(&pts, &[RegressionKind::Quadratic]);
        let best = selection.best().unwrap();
        prop_assert!(best.quality.sse < 1e-8);
        prop_assert!((best.coefficients[2] - a2).abs() < 1e-6);
    }

    #[test]
    fn exponential_regression_recovers_parameters(a in 0.5f64..5.0, b in -0.5f64..0.5) {
        let pts = sample(|x| a * (b * x).exp(), 0.0, 1.0, 10);
        let c = RegressionKind::Exponential.fit(&pts).unwrap();
        prop_assert!((c[0] - a).abs() < 1e-8 * a);
        prop_assert!((c[1] - b).abs() < 1e-8);
    }
}

#[test]
fn exponential_rejects_non_positive_values() {
    let pts = [Point::new(0.0, 1.0), Point::new(1.0, 0.0), Point::new(2.0, 4.0)];
    let err = RegressionKind::Exponential.fit(&pts).unwrap_err();
    assert_eq!(err, NumericError::NonPositiveValue { index: 1, value: 0.0 });
}

// ── Quadrature ───────────────────────────────────────────────────────

proptest! {
    /// Simpson 1/3 is exact for cubics.
    #[test]
    fn simpson_integrates_cubics(
        coeffs in prop::collection::vec(-2.0f64..2.0, 4),
        a in -2.0f64..2.0,
        h in 0.1f64..1.0,
        half in 1usize..10,
    ) {
        let m = 2 * half;
        let pts = sample(|x| poly(&coeffs, x), a, h, m);
        let b = a + h * m as f64;
        let antiderivative = |x: f64| {
            coeffs.iter().enumerate().map(|(k, c)| c * x.powi(k as i32 + 1) / (k as f64 + 1.0)).sum::<f64>()
        };
        let exact = antiderivative(b) - antiderivative(a);
        let got = simpson(&pts).unwrap();
        prop_assert!((got - exact).abs() < 1e-9 * exact.abs().max(1.0), "{} vs {}", got, exact);
    }

    /// The trapezoid rule is exact for straight lines.
    #[test]
    fn trapezoid_integrates_lines(
        c0 in -5.0f64..5.0,
        c1 in -5.0f64..5.0,
        h in 0.1f64..1.0,
        m in 1usize..20,
    ) {
        let pts = sample(|x| c0 + c1 * x, 0.0, h, m);
        let b = h * m as f64;
        let exact = c0 * b + 0.5 * c1 * b * b;
        prop_assert!((trapezoidal(&pts) - exact).abs() < 1e-9 * exact.abs().max(1.0));
    }
}

#[test]
fn trapezoid_reference_case() {
    let pts = [Point::new(0.0, 0.0), Point::new(2.0, 4.0), Point::new(4.0, 8.0)];
    assert_eq!(trapezoidal(&pts), 16.0);
}

#[test]
fn simpson_rejects_odd_subinterval_count() {
    let pts = sample(|x| x, 0.0, 1.0, 3);
    assert_eq!(
        simpson(&pts).unwrap_err(),
        NumericError::InvalidSubintervalCount { subintervals: 3 }
    );
}

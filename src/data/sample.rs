//! Seeded synthetic inputs: solvable linear systems and noisy point sets.
//!
//! Everything here is deterministic given the seed, so generated problems can be
//! regenerated exactly (and used as fixtures in tests).

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{Point, RegressionKind, SystemProblem};
use crate::error::AppError;
use crate::models::predict;

/// Largest system the generator will build.
pub const MAX_SYSTEM_SIZE: usize = 50;

/// A generated system together with the solution it was built from.
#[derive(Debug, Clone)]
pub struct SampleSystem {
    pub problem: SystemProblem,
    pub solution: Vec<f64>,
}

/// Build a strictly diagonally dominant `n×n` system with a known solution.
///
/// Off-diagonal entries are uniform in `[-1, 1]`; each diagonal entry is the row's
/// absolute off-diagonal sum plus `1 + U[0,1)` (random sign), so the system is
/// non-singular, safe for elimination without pivoting, and Gauss-Seidel converges.
/// `b = A·x*` for integer-valued `x*` in `[-5, 5]`.
pub fn dominant_system(n: usize, seed: u64) -> Result<SampleSystem, AppError> {
    if n == 0 || n > MAX_SYSTEM_SIZE {
        return Err(AppError::input(format!(
            "System size must be in 1..={MAX_SYSTEM_SIZE} (got {n})."
        )));
    }
    let mut rng = StdRng::seed_from_u64(seed);

    let mut matrix = vec![vec![0.0_f64; n]; n];
    for (i, row) in matrix.iter_mut().enumerate() {
        let mut off = 0.0;
        for (j, v) in row.iter_mut().enumerate() {
            if i != j {
                *v = rng.gen_range(-1.0..=1.0);
                off += v.abs();
            }
        }
        let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        row[i] = sign * (off + 1.0 + rng.gen_range(0.0..1.0));
    }

    let solution: Vec<f64> = (0..n).map(|_| f64::from(rng.gen_range(-5_i32..=5))).collect();
    let rhs: Vec<f64> = matrix
        .iter()
        .map(|row| row.iter().zip(&solution).map(|(a, x)| a * x).sum::<f64>())
        .collect();

    Ok(SampleSystem {
        problem: SystemProblem {
            matrix,
            rhs,
            initial_guess: Some(vec![0.0; n]),
        },
        solution,
    })
}

/// Options for `noisy_points`.
#[derive(Debug, Clone)]
pub struct PointSampleSpec {
    pub kind: RegressionKind,
    pub coefficients: Vec<f64>,
    pub x_min: f64,
    pub x_max: f64,
    pub count: usize,
    /// Standard deviation of additive Gaussian noise (0 for exact samples).
    pub noise_sigma: f64,
}

/// Sample `count` equally spaced points from a regression model, plus noise.
pub fn noisy_points(spec: &PointSampleSpec, seed: u64) -> Result<Vec<Point>, AppError> {
    if spec.count < 2 {
        return Err(AppError::input("Point count must be >= 2."));
    }
    if !(spec.x_min.is_finite() && spec.x_max.is_finite() && spec.x_max > spec.x_min) {
        return Err(AppError::input("Invalid x range for point sampling."));
    }
    if spec.coefficients.len() != spec.kind.coefficient_len() {
        return Err(AppError::input(format!(
            "{} model takes {} coefficients (got {}).",
            spec.kind.display_name(),
            spec.kind.coefficient_len(),
            spec.coefficients.len()
        )));
    }
    if !(spec.noise_sigma.is_finite() && spec.noise_sigma >= 0.0) {
        return Err(AppError::input("Noise sigma must be finite and >= 0."));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, spec.noise_sigma.max(f64::MIN_POSITIVE))
        .map_err(|e| AppError::new(crate::error::EXIT_INTERNAL, format!("Noise distribution error: {e}")))?;

    let h = (spec.x_max - spec.x_min) / (spec.count as f64 - 1.0);
    let points = (0..spec.count)
        .map(|i| {
            let x = spec.x_min + h * i as f64;
            let noise = if spec.noise_sigma > 0.0 { normal.sample(&mut rng) } else { 0.0 };
            Point::new(x, predict(spec.kind, &spec.coefficients, x) + noise)
        })
        .collect();
    Ok(points)
}

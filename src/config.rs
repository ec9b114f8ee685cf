//! Runtime defaults loaded from the environment.
//!
//! `Settings::from_env` reads an optional `.env` (via `dotenvy`) and then the
//! `NUMETH_*` variables below. CLI flags override whatever is found here.
//!
//! | variable | default |
//! | - | - |
//! | `NUMETH_TOLERANCE` | `1e-4` |
//! | `NUMETH_MAX_ITERATIONS` | `100` |
//! | `NUMETH_SPACING_TOLERANCE` | `1e-6` |
//! | `NUMETH_PLOT_WIDTH` | `72` |
//! | `NUMETH_PLOT_HEIGHT` | `20` |

use std::str::FromStr;

use crate::error::AppError;
use crate::math::{DEFAULT_MAX_ITERATIONS, DEFAULT_SPACING_TOLERANCE, DEFAULT_TOLERANCE};

pub const ENV_TOLERANCE: &str = "NUMETH_TOLERANCE";
pub const ENV_MAX_ITERATIONS: &str = "NUMETH_MAX_ITERATIONS";
pub const ENV_SPACING_TOLERANCE: &str = "NUMETH_SPACING_TOLERANCE";
pub const ENV_PLOT_WIDTH: &str = "NUMETH_PLOT_WIDTH";
pub const ENV_PLOT_HEIGHT: &str = "NUMETH_PLOT_HEIGHT";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Gauss-Seidel stopping tolerance.
    pub tolerance: f64,
    /// Gauss-Seidel sweep limit.
    pub max_iterations: usize,
    /// Allowed deviation of each interval from the first one in quadrature input.
    pub spacing_tolerance: f64,
    pub plot_width: usize,
    pub plot_height: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            spacing_tolerance: DEFAULT_SPACING_TOLERANCE,
            plot_width: 72,
            plot_height: 20,
        }
    }
}

impl Settings {
    /// Load settings from `.env` + process environment.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup (unset keys keep defaults).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut s = Settings::default();
        if let Some(v) = parse_var(&lookup, ENV_TOLERANCE)? {
            s.tolerance = positive(ENV_TOLERANCE, v)?;
        }
        if let Some(v) = parse_var::<usize>(&lookup, ENV_MAX_ITERATIONS)? {
            if v == 0 {
                return Err(AppError::input(format!("{ENV_MAX_ITERATIONS} must be >= 1.")));
            }
            s.max_iterations = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_SPACING_TOLERANCE)? {
            s.spacing_tolerance = positive(ENV_SPACING_TOLERANCE, v)?;
        }
        if let Some(v) = parse_var(&lookup, ENV_PLOT_WIDTH)? {
            s.plot_width = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_PLOT_HEIGHT)? {
            s.plot_height = v;
        }
        Ok(s)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<T>()
        .map(Some)
        .map_err(|e| AppError::input(format!("Invalid {key}='{raw}': {e}")))
}

fn positive(key: &str, v: f64) -> Result<f64, AppError> {
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(AppError::input(format!("{key} must be a finite number > 0 (got {v}).")))
    }
}

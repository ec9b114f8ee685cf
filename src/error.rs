//! Error types.
//!
//! - `NumericError`: a reported failure of one of the numerical routines
//!   (singular system, duplicate abscissas, ...). Every algorithm returns it
//!   instead of a wrong-but-plausible number.
//! - `AppError`: what the `nm` binary surfaces to the user, carrying the process
//!   exit code.

use thiserror::Error;

/// Exit code for invalid input (bad flags, unreadable files, malformed data).
pub const EXIT_INPUT: u8 = 2;
/// Exit code for a numerical failure reported by an algorithm.
pub const EXIT_NUMERIC: u8 = 3;
/// Exit code for output/internal failures.
pub const EXIT_INTERNAL: u8 = 4;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NumericError {
    #[error("Dimension mismatch in {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Singular matrix: pivot {pivot} is zero or too close to zero")]
    SingularMatrix { pivot: usize },

    #[error("Zero diagonal element in row {row}; the system may not be diagonally dominant")]
    ZeroPivot { row: usize },

    #[error("Did not converge after {iterations} iterations (last max error {max_error:e})")]
    DidNotConverge {
        iterations: usize,
        max_error: f64,
        last: Vec<f64>,
    },

    #[error("Insufficient points: need at least {required}, got {actual}")]
    InsufficientPoints { required: usize, actual: usize },

    #[error("Non-positive value y={value} at point {index}; exponential fit needs y > 0")]
    NonPositiveValue { index: usize, value: f64 },

    #[error("Duplicate abscissa: points {i} and {j} share the same x")]
    DuplicateAbscissa { i: usize, j: usize },

    #[error("Simpson 1/3 needs an even number of subintervals (>= 2), got {subintervals}")]
    InvalidSubintervalCount { subintervals: usize },

    #[error("Points are not equally spaced (interval {index} differs from the first)")]
    NonUniformSpacing { index: usize },
}

pub type NumericResult<T> = Result<T, NumericError>;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::new(EXIT_INPUT, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<NumericError> for AppError {
    fn from(err: NumericError) -> Self {
        Self::new(EXIT_NUMERIC, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

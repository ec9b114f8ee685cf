//! Numerical primitives: direct and iterative linear solvers, interpolation,
//! quadrature, and residual checks.

pub mod direct;
pub mod interp;
pub mod iterative;
pub mod quadrature;
pub mod residual;

pub use direct::*;
pub use interp::*;
pub use iterative::*;
pub use quadrature::*;
pub use residual::*;

/// Smallest pivot / denominator magnitude accepted before a routine reports failure.
pub const PIVOT_EPS: f64 = 1e-10;

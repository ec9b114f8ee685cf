//! Curve fitting.
//!
//! Responsibilities:
//!
//! - least-squares regression for each model family (normal equations)
//! - fit several families and rank them by SSE

pub mod regression;
pub mod selection;

pub use regression::*;
pub use selection::*;

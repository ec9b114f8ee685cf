//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - numeric containers (`Matrix`, `Vector`, `Point`)
//! - method selection enums (`DirectMethod`, `RegressionKind`, `InterpolationMethod`, `QuadratureRule`)
//! - result records (`FitResult`, `FitQuality`) and problem files (`SystemProblem`)

pub mod types;

pub use types::*;

//! Regression model implementations.
//!
//! Models are implemented as small, pure functions so that fitting/report code can
//! stay generic.

pub mod model;

pub use model::*;

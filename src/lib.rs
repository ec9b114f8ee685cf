//! `numeth` library crate.
//!
//! The binary (`nm`) is a thin wrapper around this library so that:
//!
//! - every numerical routine is testable without spawning processes
//! - the solvers can be reused directly (`numeth::math`, `numeth::fit`)
//!
//! Module map:
//! - `math`: direct and iterative linear solvers, interpolation, quadrature
//! - `fit`: least-squares regression and model ranking
//! - `models`: evaluating fitted models (prediction, SSE, equations)
//! - `io`, `report`, `plot`, `cli`, `app`: the `nm` front-end

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;

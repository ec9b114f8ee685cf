//! Input/output helpers.
//!
//! - inline vectors, matrices, and point lists from CLI strings (`inline`)
//! - point CSV ingest + validation (`points`)
//! - linear-system problem JSON (`problem`)
//! - outcome JSON and point CSV exports (`export`)

pub mod export;
pub mod inline;
pub mod points;
pub mod problem;

pub use export::*;
pub use inline::*;
pub use points::*;
pub use problem::*;

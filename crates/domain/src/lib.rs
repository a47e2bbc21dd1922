//! Evaluation domains for the Potflow field evaluator
//!
//! A domain is either a dense row-major sample grid (two co-shaped coordinate
//! arrays) or a single query point. Both expose the same node-by-node view so
//! the evaluator applies one formula set to either.

mod domain;
mod error;
mod grid;

pub use domain::EvaluationDomain;
pub use error::DomainError;
pub use grid::{Grid, linspace};

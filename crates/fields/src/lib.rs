//! Superposed potential-flow fields
//!
//! [`FieldEvaluator`] maps an ordered list of flow elements and an evaluation
//! domain (dense grid or single point) to velocity, stream function and
//! velocity potential by linear superposition. Evaluation is a pure function
//! of its inputs; the `parallel` feature spreads nodes over a rayon pool with
//! no change in results.

mod diagnostics;
mod error;
mod evaluator;
mod result;

pub use error::FieldError;
pub use evaluator::{FieldEvaluator, evaluate, evaluate_arrays, evaluate_point};
pub use result::{Component, FieldResult};

pub use potflow_domain::{DomainError, EvaluationDomain, Grid, linspace};
pub use potflow_elements::{FieldSample, FlowElement, R2_FLOOR};
pub use potflow_types::{FieldValue, Vector2};

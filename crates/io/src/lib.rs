//! JSON case files and result export for the Potflow field evaluator
//!
//! A case file lists flow elements, the sampling grid, probe points and an
//! optional clamp floor. Results are written as nested row arrays alongside
//! the grid coordinates so plotting tools can consume them directly.

mod case;
mod error;
mod output;

pub use case::{CaseFile, ElementSpec, GridSpec, MAX_GRID_NODES};
pub use error::IoError;
pub use output::{FieldDocument, ProbeReport, write_json};

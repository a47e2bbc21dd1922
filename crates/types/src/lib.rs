//! Fundamental value types for the Potflow field evaluator
//!
//! Provides the planar vector type and the field value trait shared by every
//! quantity the evaluator superposes.

pub mod traits;
pub mod vector;

pub use traits::{FieldValue, superpose};
pub use vector::Vector2;

//! Core data models.

pub mod evaluation;
pub mod point;

pub use evaluation::{Evaluation, FailureKind};
pub use point::{CoordinateError, GeoPoint};

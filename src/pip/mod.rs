//! Point-in-Polygon (PIP) against the reference ring.
//!
//! Holds the ring model, the built-in MKAD table and the ray-casting
//! containment test.

mod boundary;
mod containment;
mod reference;

pub use boundary::{BoundaryError, RingBoundary, MIN_VERTICES};
pub use containment::contains;
pub use reference::{MKAD_NAME, MKAD_VERTICES};

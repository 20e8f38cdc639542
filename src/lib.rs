//! Ringroad - is an address inside the Moscow Ring Road, and if not, how far
//! is it?
//!
//! This library provides the geometry engines, the geocoder adapter and the
//! HTTP API shared by the server and check binaries.

pub mod api;
pub mod config;
pub mod distance;
pub mod evaluate;
pub mod geocoder;
pub mod journal;
pub mod models;
pub mod pip;

pub use evaluate::{evaluate_point, Evaluator};
pub use models::{Evaluation, FailureKind, GeoPoint};
pub use pip::RingBoundary;

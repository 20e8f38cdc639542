//! Reference ring boundary.

use std::path::Path;

use anyhow::Context;
use geo::{BoundingRect, Coord, Intersects, LineString, Rect};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::models::{CoordinateError, GeoPoint};

/// Minimum number of vertices that still encloses an area
pub const MIN_VERTICES: usize = 3;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoundaryError {
    #[error("ring needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("vertex {index} is invalid: {source}")]
    InvalidVertex {
        index: usize,
        #[source]
        source: CoordinateError,
    },
}

/// An implicitly closed ring of (lat, lon) vertices.
///
/// The last vertex connects back to the first. Built once and then only
/// read, so it is shared between requests behind an `Arc`.
#[derive(Debug, Clone)]
pub struct RingBoundary {
    name: String,
    vertices: Vec<GeoPoint>,
    /// Envelope of `vertices` (x = lon, y = lat)
    bounds: Rect<f64>,
}

/// On-disk ring description: `vertices = [[lat, lon], ...]`
#[derive(Debug, Deserialize)]
struct RingFile {
    #[serde(default = "default_ring_name")]
    name: String,
    vertices: Vec<[f64; 2]>,
}

fn default_ring_name() -> String {
    "custom".to_string()
}

impl RingBoundary {
    /// Build a ring, validating vertex count and coordinates
    pub fn new(name: impl Into<String>, vertices: Vec<GeoPoint>) -> Result<Self, BoundaryError> {
        if vertices.len() < MIN_VERTICES {
            return Err(BoundaryError::TooFewVertices(vertices.len()));
        }
        for (index, v) in vertices.iter().enumerate() {
            GeoPoint::try_new(v.lat, v.lon)
                .map_err(|source| BoundaryError::InvalidVertex { index, source })?;
        }
        let bounds = LineString::new(vertices.iter().map(|&v| Coord::from(v)).collect())
            .bounding_rect()
            .ok_or(BoundaryError::TooFewVertices(vertices.len()))?;
        Ok(Self {
            name: name.into(),
            vertices,
            bounds,
        })
    }

    /// Build a ring from a static `(lat, lon)` table
    pub fn from_table(name: impl Into<String>, table: &[(f64, f64)]) -> Result<Self, BoundaryError> {
        let vertices = table
            .iter()
            .map(|&(lat, lon)| GeoPoint::new(lat, lon))
            .collect();
        Self::new(name, vertices)
    }

    /// Load a ring from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read ring file {}", path.display()))?;
        let file: RingFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse ring file {}", path.display()))?;

        let vertices = file
            .vertices
            .into_iter()
            .map(|[lat, lon]| GeoPoint::new(lat, lon))
            .collect();
        let ring = Self::new(file.name, vertices)?;

        info!(
            "Loaded ring '{}' with {} vertices from {}",
            ring.name,
            ring.len(),
            path.display()
        );
        Ok(ring)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[GeoPoint] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterate edges as `(current, previous)` pairs, starting with
    /// `(v[0], v[n-1])` so the ring closes on itself.
    pub fn edges(&self) -> impl Iterator<Item = (GeoPoint, GeoPoint)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + n - 1) % n]))
    }

    /// Same ring started at a different vertex
    pub fn rotated(&self, start: usize) -> Self {
        let mut vertices = self.vertices.clone();
        if !vertices.is_empty() {
            let start = start % vertices.len();
            vertices.rotate_left(start);
        }
        Self {
            name: self.name.clone(),
            vertices,
            bounds: self.bounds,
        }
    }

    /// Bounding box as `(min_lat, min_lon, max_lat, max_lon)`
    pub fn bbox(&self) -> (f64, f64, f64, f64) {
        let (min, max) = (self.bounds.min(), self.bounds.max());
        (min.y, min.x, max.y, max.x)
    }

    /// Whether `point` falls within the bounding box, edges included.
    ///
    /// A point outside it can never be inside the ring.
    pub fn envelope_covers(&self, point: GeoPoint) -> bool {
        self.bounds.intersects(&Coord::from(point))
    }
}

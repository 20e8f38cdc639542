//! Address resolution through an external geocoding provider.

mod response;
mod yandex;

use std::future::Future;

use thiserror::Error;

use crate::models::{FailureKind, GeoPoint};

pub use response::parse_response;
pub use yandex::YandexGeocoder;

/// What the provider found for an address
#[derive(Debug, Clone, PartialEq)]
pub struct Geocoded {
    /// Number of matches the provider reports
    pub found: u64,
    /// Position of the first match, if any
    pub position: Option<GeoPoint>,
}

impl Geocoded {
    pub fn not_found() -> Self {
        Self {
            found: 0,
            position: None,
        }
    }

    pub fn at(position: GeoPoint) -> Self {
        Self {
            found: 1,
            position: Some(position),
        }
    }
}

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("geocoder request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("geocoder returned status {0}")]
    Remote(reqwest::StatusCode),

    #[error("could not decode geocoder response: {0}")]
    Decode(String),
}

impl From<GeocodeError> for FailureKind {
    fn from(err: GeocodeError) -> Self {
        match err {
            GeocodeError::Transport(e) => FailureKind::Transport(e.to_string()),
            GeocodeError::Remote(status) => FailureKind::Remote {
                status: status.as_u16(),
            },
            GeocodeError::Decode(msg) => FailureKind::MalformedResponse(msg),
        }
    }
}

/// Resolves free-text addresses to coordinates.
///
/// One call is one attempt; implementations do not retry.
pub trait Geocoder: Send + Sync {
    fn resolve(&self, address: &str) -> impl Future<Output = Result<Geocoded, GeocodeError>> + Send;
}

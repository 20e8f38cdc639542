//! Outcome of evaluating one address against the ring.

use thiserror::Error;

/// Why an evaluation could not produce a geometric answer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureKind {
    /// The geocoder could not be reached
    #[error("geocoder transport failure: {0}")]
    Transport(String),

    /// The geocoder answered with a non-success status
    #[error("geocoder returned status {status}")]
    Remote { status: u16 },

    /// The geocoder found no match for the address
    #[error("invalid address")]
    InvalidAddress,

    /// The geocoder answered 200 with a body we could not decode
    #[error("malformed geocoder response: {0}")]
    MalformedResponse(String),
}

/// Tagged evaluation result
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    Inside,
    Outside { distance_km: f64 },
    Failure(FailureKind),
}

impl Evaluation {
    pub fn is_failure(&self) -> bool {
        matches!(self, Evaluation::Failure(_))
    }
}

impl From<FailureKind> for Evaluation {
    fn from(kind: FailureKind) -> Self {
        Evaluation::Failure(kind)
    }
}

//! Address evaluation: geocode, containment, then distance.

use std::sync::Arc;

use tracing::{debug, info, warn, Level};

use crate::distance::{nearest_vertex, nearest_vertex_km};
use crate::geocoder::Geocoder;
use crate::journal::{Journal, JournalEvent};
use crate::models::{Evaluation, FailureKind, GeoPoint};
use crate::pip::{contains, RingBoundary};

const CONTEXT: &str = "evaluate";

/// Decide inside/outside for a point that is already resolved
pub fn evaluate_point(ring: &RingBoundary, point: GeoPoint) -> Evaluation {
    if contains(point, ring) {
        return Evaluation::Inside;
    }

    if tracing::enabled!(Level::DEBUG) {
        if let Some((index, km)) = nearest_vertex(point, ring) {
            debug!(
                "{} is outside {}, nearest vertex #{} at {:.4} km",
                point,
                ring.name(),
                index,
                km
            );
        }
    }
    Evaluation::Outside {
        distance_km: nearest_vertex_km(point, ring),
    }
}

/// Evaluates addresses against one shared ring
pub struct Evaluator<G> {
    geocoder: G,
    ring: Arc<RingBoundary>,
    journal: Journal,
}

impl<G: Geocoder> Evaluator<G> {
    pub fn new(geocoder: G, ring: Arc<RingBoundary>, journal: Journal) -> Self {
        Self {
            geocoder,
            ring,
            journal,
        }
    }

    pub fn ring(&self) -> &RingBoundary {
        &self.ring
    }

    /// Resolve `address` and place it relative to the ring.
    ///
    /// Only the first geocoder match is used. Failures are returned as
    /// [`Evaluation::Failure`], never as errors.
    pub async fn evaluate(&self, address: &str) -> Evaluation {
        let evaluation = match self.geocoder.resolve(address).await {
            Ok(geocoded) => match geocoded.position {
                Some(point) if geocoded.found > 0 => {
                    debug!("'{}' resolved to {}", address, point);
                    evaluate_point(&self.ring, point)
                }
                _ => Evaluation::Failure(FailureKind::InvalidAddress),
            },
            Err(e) => Evaluation::Failure(e.into()),
        };

        self.record(address, &evaluation);
        evaluation
    }

    fn record(&self, address: &str, evaluation: &Evaluation) {
        match evaluation {
            Evaluation::Inside => {
                info!("'{}' is inside {}", address, self.ring.name());
            }
            Evaluation::Outside { distance_km } => {
                info!(
                    "'{}' is {} km from {}",
                    address,
                    distance_km,
                    self.ring.name()
                );
                self.journal.emit(JournalEvent::distance(
                    address,
                    self.ring.name(),
                    *distance_km,
                ));
            }
            Evaluation::Failure(kind) => {
                warn!("Evaluation of '{}' failed: {}", address, kind);
                self.journal
                    .emit(JournalEvent::failure(address, kind.clone(), CONTEXT));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeocoderConfig;
    use crate::geocoder::{GeocodeError, Geocoded, YandexGeocoder};
    use reqwest::StatusCode;
    use tokio::sync::mpsc;

    const INSIDE: GeoPoint = GeoPoint::new(55.700182, 37.580158);
    const ORENBURG: GeoPoint = GeoPoint::new(51.837897, 55.147944);

    enum Answer {
        Found(Geocoded),
        Status(u16),
        Garbage,
    }

    struct FakeGeocoder(Answer);

    impl Geocoder for FakeGeocoder {
        async fn resolve(&self, _address: &str) -> Result<Geocoded, GeocodeError> {
            match &self.0 {
                Answer::Found(g) => Ok(g.clone()),
                Answer::Status(s) => Err(GeocodeError::Remote(StatusCode::from_u16(*s).unwrap())),
                Answer::Garbage => Err(GeocodeError::Decode("expected value".to_string())),
            }
        }
    }

    fn evaluator<G: Geocoder>(geocoder: G) -> (Evaluator<G>, mpsc::Receiver<JournalEvent>) {
        let (journal, rx) = Journal::channel(8);
        let ring = Arc::new(RingBoundary::mkad().unwrap());
        (Evaluator::new(geocoder, ring, journal), rx)
    }

    #[test]
    fn test_evaluate_point_inside() {
        let ring = RingBoundary::mkad().unwrap();
        assert_eq!(evaluate_point(&ring, INSIDE), Evaluation::Inside);
    }

    #[test]
    fn test_evaluate_point_outside() {
        let ring = RingBoundary::mkad().unwrap();
        match evaluate_point(&ring, ORENBURG) {
            Evaluation::Outside { distance_km } => assert_eq!(distance_km, 1211.25),
            other => panic!("expected Outside, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_inside_emits_nothing() {
        let (ev, mut rx) = evaluator(FakeGeocoder(Answer::Found(Geocoded::at(INSIDE))));
        assert_eq!(ev.evaluate("Ленинский проспект 30").await, Evaluation::Inside);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_outside_emits_distance() {
        let (ev, mut rx) = evaluator(FakeGeocoder(Answer::Found(Geocoded::at(ORENBURG))));
        let distance_km = match ev.evaluate("Оренбург").await {
            Evaluation::Outside { distance_km } => distance_km,
            other => panic!("expected Outside, got {:?}", other),
        };

        match rx.try_recv().unwrap() {
            JournalEvent::Distance {
                address,
                ring,
                distance_km: logged,
                ..
            } => {
                assert_eq!(address, "Оренбург");
                assert_eq!(ring, "MKAD");
                assert_eq!(logged, distance_km);
                assert_eq!(logged, 1211.25);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_zero_matches_is_invalid_address() {
        let (ev, mut rx) = evaluator(FakeGeocoder(Answer::Found(Geocoded::not_found())));
        assert_eq!(
            ev.evaluate("qwzxqwzx").await,
            Evaluation::Failure(FailureKind::InvalidAddress)
        );
        assert!(matches!(
            rx.try_recv().unwrap(),
            JournalEvent::Failure {
                kind: FailureKind::InvalidAddress,
                context: "evaluate",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_found_without_position_is_invalid_address() {
        let geocoded = Geocoded {
            found: 2,
            position: None,
        };
        let (ev, _rx) = evaluator(FakeGeocoder(Answer::Found(geocoded)));
        assert_eq!(
            ev.evaluate("somewhere").await,
            Evaluation::Failure(FailureKind::InvalidAddress)
        );
    }

    #[tokio::test]
    async fn test_remote_status() {
        let (ev, mut rx) = evaluator(FakeGeocoder(Answer::Status(403)));
        assert_eq!(
            ev.evaluate("Тверская 7").await,
            Evaluation::Failure(FailureKind::Remote { status: 403 })
        );
        assert!(matches!(rx.try_recv().unwrap(), JournalEvent::Failure { .. }));
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let (ev, _rx) = evaluator(FakeGeocoder(Answer::Garbage));
        assert!(matches!(
            ev.evaluate("Тверская 7").await,
            Evaluation::Failure(FailureKind::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let config = GeocoderConfig {
            endpoint: "http://127.0.0.1:1/1.x/".to_string(),
            api_key: None,
            timeout_secs: 2,
        };
        let (ev, mut rx) = evaluator(YandexGeocoder::new(&config, "key").unwrap());
        assert!(matches!(
            ev.evaluate("Тверская 7").await,
            Evaluation::Failure(FailureKind::Transport(_))
        ));
        assert!(matches!(rx.try_recv().unwrap(), JournalEvent::Failure { .. }));
    }

    #[tokio::test]
    async fn test_injected_ring() {
        let ring = Arc::new(
            RingBoundary::from_table("triangle", &[(0.0, 0.0), (0.0, 3.0), (3.0, 0.0)]).unwrap(),
        );
        let ev = Evaluator::new(
            FakeGeocoder(Answer::Found(Geocoded::at(GeoPoint::new(1.0, 1.0)))),
            ring,
            Journal::disabled(),
        );
        assert_eq!(ev.evaluate("centroid").await, Evaluation::Inside);
        assert_eq!(ev.ring().name(), "triangle");
    }

    #[tokio::test]
    async fn test_concurrent_evaluations() {
        let (ev, _rx) = evaluator(FakeGeocoder(Answer::Found(Geocoded::at(INSIDE))));
        let ev = Arc::new(ev);

        let mut tasks = tokio::task::JoinSet::new();
        for i in 0..32 {
            let ev = Arc::clone(&ev);
            tasks.spawn(async move { ev.evaluate(&format!("address {}", i)).await });
        }
        while let Some(result) = tasks.join_next().await {
            assert_eq!(result.unwrap(), Evaluation::Inside);
        }
    }
}

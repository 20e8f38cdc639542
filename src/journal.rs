//! Append-only distance and error journals.
//!
//! Evaluations emit [`JournalEvent`]s into a bounded channel; a single
//! [`JournalWriter`] task appends them to disk. Emitting never waits: when
//! the channel is full the event is dropped.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::JournalConfig;
use crate::models::FailureKind;

#[derive(Debug, Clone, PartialEq)]
pub enum JournalEvent {
    Distance {
        address: String,
        ring: String,
        distance_km: f64,
        at: DateTime<Utc>,
    },
    Failure {
        address: String,
        kind: FailureKind,
        context: &'static str,
        at: DateTime<Utc>,
    },
}

impl JournalEvent {
    pub fn distance(address: &str, ring: &str, distance_km: f64) -> Self {
        JournalEvent::Distance {
            address: address.to_string(),
            ring: ring.to_string(),
            distance_km,
            at: Utc::now(),
        }
    }

    pub fn failure(address: &str, kind: FailureKind, context: &'static str) -> Self {
        JournalEvent::Failure {
            address: address.to_string(),
            kind,
            context,
            at: Utc::now(),
        }
    }

    /// One journal line, newline included.
    ///
    /// The address is escaped so control characters cannot break it over
    /// several lines.
    pub fn line(&self) -> String {
        match self {
            JournalEvent::Distance {
                address,
                ring,
                distance_km,
                at,
            } => format!(
                "{} - Distance from \"{}\" to {} = {}\n",
                at.to_rfc3339(),
                address.escape_debug(),
                ring,
                distance_km
            ),
            JournalEvent::Failure {
                address,
                kind,
                context,
                at,
            } => format!(
                "{} - ERROR - {} - {} (address \"{}\")\n",
                at.to_rfc3339(),
                context,
                kind,
                address.escape_debug()
            ),
        }
    }
}

/// Cheap, cloneable handle used to emit events
#[derive(Clone, Debug)]
pub struct Journal {
    tx: Option<mpsc::Sender<JournalEvent>>,
}

impl Journal {
    /// Bounded journal channel; hand the receiver to a [`JournalWriter`]
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<JournalEvent>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx: Some(tx) }, rx)
    }

    /// A journal that discards everything
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    pub fn emit(&self, event: JournalEvent) {
        let Some(tx) = &self.tx else {
            return;
        };
        match tx.try_send(event) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(event)) => {
                warn!("Journal full, dropping event: {}", event.line().trim_end());
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                debug!("Journal writer stopped, event dropped");
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct JournalPaths {
    pub distance_log: PathBuf,
    pub error_log: PathBuf,
}

impl From<&JournalConfig> for JournalPaths {
    fn from(config: &JournalConfig) -> Self {
        Self {
            distance_log: config.distance_log.clone(),
            error_log: config.error_log.clone(),
        }
    }
}

/// Single writer draining the journal channel
pub struct JournalWriter {
    paths: JournalPaths,
}

impl JournalWriter {
    pub fn new(paths: JournalPaths) -> Self {
        Self { paths }
    }

    /// Run on a background task until every [`Journal`] handle is dropped
    pub fn spawn(self, rx: mpsc::Receiver<JournalEvent>) -> JoinHandle<()> {
        tokio::spawn(self.run(rx))
    }

    pub async fn run(self, mut rx: mpsc::Receiver<JournalEvent>) {
        info!(
            "Journal writing to {} and {}",
            self.paths.distance_log.display(),
            self.paths.error_log.display()
        );

        while let Some(event) = rx.recv().await {
            let path = match &event {
                JournalEvent::Distance { .. } => &self.paths.distance_log,
                JournalEvent::Failure { .. } => &self.paths.error_log,
            };
            if let Err(e) = append_line(path, &event.line()).await {
                error!("Failed to append to {}: {}", path.display(), e);
            }
        }

        debug!("Journal channel closed");
    }
}

async fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(line.as_bytes()).await?;
    file.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_line() {
        let event = JournalEvent::distance("Оренбург", "MKAD", 1211.26);
        let line = event.line();
        assert!(line.ends_with(" - Distance from \"Оренбург\" to MKAD = 1211.26\n"));
    }

    #[test]
    fn test_failure_line() {
        let event = JournalEvent::failure("qwzx", FailureKind::InvalidAddress, "evaluate");
        let line = event.line();
        assert!(line.contains(" - ERROR - evaluate - invalid address (address \"qwzx\")"));
    }

    #[test]
    fn test_address_newline_stays_on_one_line() {
        let forged = "Moscow\n2026-01-01T00:00:00+00:00 - Distance from \"x\" to MKAD = 0";
        let line = JournalEvent::distance(forged, "MKAD", 12.5).line();
        assert_eq!(line.lines().count(), 1);
        assert!(line.contains("Moscow\\n2026-01-01"));
        assert!(line.ends_with(" to MKAD = 12.5\n"));

        let line = JournalEvent::failure("a\r\nb", FailureKind::InvalidAddress, "evaluate").line();
        assert_eq!(line.lines().count(), 1);
        assert!(line.ends_with("(address \"a\\r\\nb\")\n"));
    }

    #[test]
    fn test_disabled_journal_is_silent() {
        Journal::disabled().emit(JournalEvent::distance("a", "MKAD", 1.0));
    }

    #[test]
    fn test_full_journal_drops() {
        let (journal, mut rx) = Journal::channel(1);
        journal.emit(JournalEvent::distance("first", "MKAD", 1.0));
        journal.emit(JournalEvent::distance("second", "MKAD", 2.0));

        let first = rx.try_recv().unwrap();
        assert!(matches!(first, JournalEvent::Distance { ref address, .. } if address == "first"));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_writer_appends_to_both_logs() {
        let dir = tempfile::tempdir().unwrap();
        let paths = JournalPaths {
            distance_log: dir.path().join("distance.log"),
            error_log: dir.path().join("error.log"),
        };
        std::fs::write(&paths.distance_log, "existing\n").unwrap();

        let (journal, rx) = Journal::channel(16);
        let handle = JournalWriter::new(paths.clone()).spawn(rx);

        journal.emit(JournalEvent::distance("Тула", "MKAD", 158.3));
        journal.emit(JournalEvent::failure(
            "x",
            FailureKind::Remote { status: 403 },
            "evaluate",
        ));
        journal.emit(JournalEvent::distance("Тверь", "MKAD", 150.12));
        drop(journal);
        handle.await.unwrap();

        let distance = std::fs::read_to_string(&paths.distance_log).unwrap();
        let lines: Vec<&str> = distance.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "existing");
        assert!(lines[1].ends_with("\"Тула\" to MKAD = 158.3"));
        assert!(lines[2].ends_with("\"Тверь\" to MKAD = 150.12"));

        let errors = std::fs::read_to_string(&paths.error_log).unwrap();
        assert_eq!(errors.lines().count(), 1);
        assert!(errors.contains("geocoder returned status 403"));
    }
}

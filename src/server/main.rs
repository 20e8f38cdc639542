//! HTTP server answering "inside MKAD, or how far?" for addresses.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ringroad::api::{router, AppState};
use ringroad::config::Config;
use ringroad::geocoder::YandexGeocoder;
use ringroad::journal::{Journal, JournalPaths, JournalWriter};
use ringroad::Evaluator;

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Ring road distance server")]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address (overrides server.listen)
    #[arg(short, long)]
    listen: Option<String>,

    /// Geocoder API key
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Custom ring file (overrides boundary.file)
    #[arg(long)]
    boundary: Option<PathBuf>,

    /// Distance journal path (overrides journal.distance_log)
    #[arg(long)]
    distance_log: Option<PathBuf>,

    /// Error journal path (overrides journal.error_log)
    #[arg(long)]
    error_log: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(listen) = self.listen {
            config.server.listen = listen;
        }
        if self.api_key.is_some() {
            config.geocoder.api_key = self.api_key;
        }
        if self.boundary.is_some() {
            config.boundary.file = self.boundary;
        }
        if let Some(path) = self.distance_log {
            config.journal.distance_log = path;
        }
        if let Some(path) = self.error_log {
            config.journal.error_log = path;
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Args::parse().into_config()?;

    info!("Ringroad Server");

    let ring = Arc::new(config.load_ring()?);
    info!("Reference ring '{}' with {} vertices", ring.name(), ring.len());

    let geocoder = YandexGeocoder::new(&config.geocoder, config.api_key()?)?;
    info!("Geocoding through {}", config.geocoder.endpoint);

    let (journal, journal_rx) = Journal::channel(config.journal.capacity);
    let journal_task = JournalWriter::new(JournalPaths::from(&config.journal)).spawn(journal_rx);

    let state = Arc::new(AppState::new(Evaluator::new(geocoder, ring, journal)));
    let app = router(state);

    info!("Starting server on {}", config.server.listen);

    let listener = tokio::net::TcpListener::bind(&config.server.listen).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router held the last Journal handle; give the writer time to drain
    if tokio::time::timeout(Duration::from_secs(5), journal_task)
        .await
        .is_err()
    {
        warn!("Journal writer did not finish in time");
    }
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

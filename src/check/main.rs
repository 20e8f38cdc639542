//! One-shot evaluation of an address or a coordinate pair.
//!
//! Prints the same JSON body the HTTP API would return.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ringroad::api::evaluation_body;
use ringroad::config::Config;
use ringroad::geocoder::YandexGeocoder;
use ringroad::journal::{Journal, JournalPaths, JournalWriter};
use ringroad::{evaluate_point, Evaluation, Evaluator, GeoPoint};

#[derive(Parser, Debug)]
#[command(name = "check")]
#[command(about = "Check one address or point against the ring")]
struct Args {
    /// Free-text address to geocode
    #[arg(short, long, conflicts_with_all = ["lat", "lon"], required_unless_present = "lat")]
    address: Option<String>,

    /// Latitude in degrees (skips geocoding)
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Longitude in degrees (skips geocoding)
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Geocoder API key
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Custom ring file (overrides boundary.file)
    #[arg(long)]
    boundary: Option<PathBuf>,

    /// Do not append to the distance/error journals
    #[arg(long)]
    no_journal: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = Config::load(args.config.as_deref())?;
    if args.api_key.is_some() {
        config.geocoder.api_key = args.api_key.clone();
    }
    if args.boundary.is_some() {
        config.boundary.file = args.boundary.clone();
    }
    config.validate()?;

    let ring = Arc::new(config.load_ring()?);
    debug!("Using ring '{}' ({} vertices)", ring.name(), ring.len());

    let evaluation = match (args.lat, args.lon, &args.address) {
        (Some(lat), Some(lon), _) => {
            let point = GeoPoint::try_new(lat, lon).context("Invalid coordinates")?;
            evaluate_point(&ring, point)
        }
        (_, _, Some(address)) => evaluate_address(&config, ring, address, !args.no_journal).await?,
        _ => anyhow::bail!("Pass --address or both --lat and --lon"),
    };

    println!("{}", serde_json::to_string(&evaluation_body(&evaluation))?);

    Ok(if evaluation.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

async fn evaluate_address(
    config: &Config,
    ring: Arc<ringroad::RingBoundary>,
    address: &str,
    journal_enabled: bool,
) -> Result<Evaluation> {
    let geocoder = YandexGeocoder::new(&config.geocoder, config.api_key()?)?;

    if !journal_enabled {
        let evaluator = Evaluator::new(geocoder, ring, Journal::disabled());
        return Ok(evaluator.evaluate(address).await);
    }

    let (journal, rx) = Journal::channel(config.journal.capacity);
    let writer = JournalWriter::new(JournalPaths::from(&config.journal)).spawn(rx);

    let evaluation = {
        let evaluator = Evaluator::new(geocoder, ring, journal);
        evaluator.evaluate(address).await
    };

    // Evaluator dropped, so the writer sees the channel close
    writer.await.context("Journal writer panicked")?;
    Ok(evaluation)
}

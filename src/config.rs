use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::pip::RingBoundary;

pub const DEFAULT_ENDPOINT: &str = "https://geocode-maps.yandex.ru/1.x/";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub geocoder: GeocoderConfig,
    pub journal: JournalConfig,
    pub boundary: BoundaryConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub listen: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:3000".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeocoderConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            timeout_secs: 10,
        }
    }
}

impl GeocoderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct JournalConfig {
    pub distance_log: PathBuf,
    pub error_log: PathBuf,
    /// Events buffered before new ones are dropped
    pub capacity: usize,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            distance_log: PathBuf::from("distance.log"),
            error_log: PathBuf::from("error.log"),
            capacity: 1024,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct BoundaryConfig {
    /// Custom ring file; the built-in MKAD ring is used when unset
    pub file: Option<PathBuf>,
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise start from defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.geocoder.endpoint)
            .with_context(|| format!("Invalid geocoder endpoint '{}'", self.geocoder.endpoint))?;
        if self.geocoder.timeout_secs == 0 {
            anyhow::bail!("geocoder.timeout_secs must be positive");
        }
        if self.journal.capacity == 0 {
            anyhow::bail!("journal.capacity must be positive");
        }
        Ok(())
    }

    /// API key for the geocoder; required by every mode that geocodes
    pub fn api_key(&self) -> Result<&str> {
        self.geocoder
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .context("No geocoder API key configured (set API_KEY or geocoder.api_key)")
    }

    /// Build the reference ring: the configured file or the built-in MKAD table
    pub fn load_ring(&self) -> Result<RingBoundary> {
        match &self.boundary.file {
            Some(path) => RingBoundary::load_from_file(path),
            None => Ok(RingBoundary::mkad()?),
        }
    }
}

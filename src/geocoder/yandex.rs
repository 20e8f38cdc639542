//! Yandex HTTP geocoder client.

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use super::{parse_response, GeocodeError, Geocoded, Geocoder};
use crate::config::GeocoderConfig;

/// Geocoder backed by the Yandex HTTP API
#[derive(Clone)]
pub struct YandexGeocoder {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl YandexGeocoder {
    pub fn new(config: &GeocoderConfig, api_key: &str) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint)
            .with_context(|| format!("Invalid geocoder endpoint '{}'", config.endpoint))?;
        let client = Client::builder()
            .user_agent(concat!("ringroad/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.to_string(),
        })
    }

    /// Request URL for one address
    pub fn request_url(&self, address: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("apikey", &self.api_key)
            .append_pair("geocode", address)
            .append_pair("format", "json");
        url
    }
}

impl Geocoder for YandexGeocoder {
    async fn resolve(&self, address: &str) -> Result<Geocoded, GeocodeError> {
        let response = self
            .client
            .get(self.request_url(address))
            .send()
            .await
            .map_err(|e| {
                warn!("Geocoder request for '{}' failed: {}", address, e);
                GeocodeError::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Geocoder answered {} for '{}'", status, address);
            return Err(GeocodeError::Remote(status));
        }

        let body = response.text().await?;
        let geocoded = parse_response(&body)?;

        debug!(
            "Geocoded '{}': {} match(es), first at {:?}",
            address, geocoded.found, geocoded.position
        );
        Ok(geocoded)
    }
}

//! GBFS HTTP client.
//!
//! Fetches the station information and station status documents. The two
//! requests are independent, so [`GbfsClient::fetch_feeds`] issues them
//! concurrently.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::GbfsError;
use super::types::{StationInformationFeed, StationStatusFeed};

/// Default station information endpoint (Citi Bike, New York City).
pub const DEFAULT_STATION_INFORMATION_URL: &str =
    "https://gbfs.citibikenyc.com/gbfs/en/station_information.json";

/// Default station status endpoint (Citi Bike, New York City).
pub const DEFAULT_STATION_STATUS_URL: &str =
    "https://gbfs.citibikenyc.com/gbfs/en/station_status.json";

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the GBFS client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GbfsConfig {
    /// URL of `station_information.json`
    pub station_information_url: String,
    /// URL of `station_status.json`
    pub station_status_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GbfsConfig {
    /// Create a config for the given feed endpoints.
    pub fn new(
        station_information_url: impl Into<String>,
        station_status_url: impl Into<String>,
    ) -> Self {
        Self {
            station_information_url: station_information_url.into(),
            station_status_url: station_status_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Point both endpoints at a GBFS base URL, e.g. `https://host/gbfs/en`.
    pub fn from_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self::new(
            format!("{base}/station_information.json"),
            format!("{base}/station_status.json"),
        )
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for GbfsConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STATION_INFORMATION_URL, DEFAULT_STATION_STATUS_URL)
    }
}

/// HTTP client for a GBFS system.
#[derive(Debug, Clone)]
pub struct GbfsClient {
    http: reqwest::Client,
    config: GbfsConfig,
}

impl GbfsClient {
    /// Create a new GBFS client.
    pub fn new(config: GbfsConfig) -> Result<Self, GbfsError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &GbfsConfig {
        &self.config
    }

    /// Fetch `station_information.json`.
    pub async fn fetch_information(&self) -> Result<StationInformationFeed, GbfsError> {
        self.fetch_json(&self.config.station_information_url).await
    }

    /// Fetch `station_status.json`.
    pub async fn fetch_status(&self) -> Result<StationStatusFeed, GbfsError> {
        self.fetch_json(&self.config.station_status_url).await
    }

    /// Fetch both documents concurrently.
    ///
    /// Fails with the first error if either request fails.
    pub async fn fetch_feeds(
        &self,
    ) -> Result<(StationInformationFeed, StationStatusFeed), GbfsError> {
        tokio::try_join!(self.fetch_information(), self.fetch_status())
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, GbfsError> {
        debug!(url, "fetching feed");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GbfsError::Api {
                url: url.to_string(),
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| GbfsError::json(url, e, &body))
    }
}

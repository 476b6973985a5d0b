//! Mock GBFS client for running without network access.
//!
//! Loads `station_information.json` and `station_status.json` from a
//! directory and serves them as if they were live feed responses.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::error::GbfsError;
use super::types::{StationInformationFeed, StationStatusFeed};

/// File name of the station information document.
pub const INFORMATION_FILE: &str = "station_information.json";

/// File name of the station status document.
pub const STATUS_FILE: &str = "station_status.json";

/// Mock GBFS client that serves data from JSON files.
///
/// This is useful for development and testing without hitting the public feed.
#[derive(Debug, Clone)]
pub struct MockGbfsClient {
    data_dir: PathBuf,
    information: Arc<StationInformationFeed>,
    status: Arc<StationStatusFeed>,
}

impl MockGbfsClient {
    /// Create a new mock client by loading both feed files from a directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, GbfsError> {
        let data_dir = data_dir.as_ref();

        if !data_dir.is_dir() {
            return Err(GbfsError::MockData {
                message: format!("not a directory: {}", data_dir.display()),
            });
        }

        let information = load(&data_dir.join(INFORMATION_FILE))?;
        let status = load(&data_dir.join(STATUS_FILE))?;

        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            information: Arc::new(information),
            status: Arc::new(status),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Return both documents.
    ///
    /// Mimics `GbfsClient::fetch_feeds`; mock data is static.
    pub async fn fetch_feeds(
        &self,
    ) -> Result<(StationInformationFeed, StationStatusFeed), GbfsError> {
        Ok((
            self.information.as_ref().clone(),
            self.status.as_ref().clone(),
        ))
    }
}

fn load<T: DeserializeOwned>(path: &Path) -> Result<T, GbfsError> {
    let json = std::fs::read_to_string(path).map_err(|e| GbfsError::MockData {
        message: format!("failed to read {}: {}", path.display(), e),
    })?;

    serde_json::from_str(&json).map_err(|e| GbfsError::json(path.display().to_string(), e, &json))
}

//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Coordinates, Station, StatusBucket};
use crate::gbfs::Snapshot;

/// Query for the station list.
#[derive(Debug, Deserialize)]
pub struct StationsQuery {
    /// Optional bucket slug to filter by (e.g. "low")
    pub bucket: Option<String>,
}

/// A classified station.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub station_id: String,
    pub name: String,
    pub position: Coordinates,
    pub capacity: Option<u32>,
    pub bucket: StatusBucket,
    pub is_installed: bool,
    pub is_renting: bool,
    pub num_bikes_available: u32,
    pub num_docks_available: Option<u32>,
    pub last_reported: Option<DateTime<Utc>>,
}

impl StationResult {
    /// Create from a domain Station.
    pub fn from_station(station: &Station) -> Self {
        Self {
            station_id: station.id().to_string(),
            name: station.name().to_string(),
            position: station.info.position,
            capacity: station.info.capacity,
            bucket: station.bucket,
            is_installed: station.status.is_installed,
            is_renting: station.status.is_renting,
            num_bikes_available: station.status.num_bikes_available,
            num_docks_available: station.status.num_docks_available,
            last_reported: station.status.last_reported,
        }
    }
}

/// Response for the station list.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<StationResult>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Station count for one bucket.
#[derive(Debug, Clone, Serialize)]
pub struct BucketCount {
    pub bucket: StatusBucket,
    pub count: usize,
}

/// Per-bucket summary of a snapshot.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// One entry per bucket, in bucket declaration order.
    pub buckets: Vec<BucketCount>,
    /// Stations on the map.
    pub total: usize,
    /// Stations with no status record.
    pub unmatched: usize,
    /// Feed records that failed validation.
    pub rejected: usize,
    pub last_updated: Option<DateTime<Utc>>,
}

impl SummaryResponse {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            buckets: StatusBucket::ALL
                .into_iter()
                .map(|bucket| BucketCount {
                    bucket,
                    count: snapshot.count(bucket),
                })
                .collect(),
            total: snapshot.len(),
            unmatched: snapshot.unmatched.len(),
            rejected: snapshot.rejected.len(),
            last_updated: snapshot.last_updated,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

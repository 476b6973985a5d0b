//! Station identifier and joined station types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::bucket::StatusBucket;
use super::coordinates::Coordinates;
use super::error::DomainError;

/// A non-empty GBFS station identifier.
///
/// Feeds publish identifiers either as strings or as integers; both are
/// normalised to their string form. Surrounding whitespace is trimmed.
///
/// # Examples
///
/// ```
/// use bike_server::domain::StationId;
///
/// let id = StationId::parse("66db237e-0aca-11e7-82f6-3863bb44ef7c").unwrap();
/// assert_eq!(id.as_str(), "66db237e-0aca-11e7-82f6-3863bb44ef7c");
///
/// // Empty identifiers are rejected
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    /// Parse a station identifier from a string.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyStationId);
        }
        Ok(StationId(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Static station metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct StationInfo {
    pub id: StationId,
    pub name: String,
    pub position: Coordinates,
    /// Number of docks. Not every feed publishes it.
    pub capacity: Option<u32>,
}

/// Live station availability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStatus {
    pub id: StationId,
    pub is_installed: bool,
    pub is_renting: bool,
    pub num_bikes_available: u32,
    pub num_docks_available: Option<u32>,
    pub is_returning: Option<bool>,
    pub last_reported: Option<DateTime<Utc>>,
}

impl StationStatus {
    /// Create a status with only the fields the classifier needs.
    pub fn new(id: StationId, is_installed: bool, is_renting: bool, bikes: u32) -> Self {
        Self {
            id,
            is_installed,
            is_renting,
            num_bikes_available: bikes,
            num_docks_available: None,
            is_returning: None,
            last_reported: None,
        }
    }
}

/// A station with its status joined in and its bucket derived.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub info: StationInfo,
    pub status: StationStatus,
    pub bucket: StatusBucket,
}

impl Station {
    /// Join info and status, deriving the bucket.
    ///
    /// Fails if the two records describe different stations.
    pub fn join(info: StationInfo, status: StationStatus) -> Result<Self, DomainError> {
        if info.id != status.id {
            return Err(DomainError::MismatchedStation {
                info: info.id,
                status: status.id,
            });
        }
        let bucket = StatusBucket::classify(&status);
        Ok(Self {
            info,
            status,
            bucket,
        })
    }

    pub fn id(&self) -> &StationId {
        &self.info.id
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn bikes_available(&self) -> u32 {
        self.status.num_bikes_available
    }
}

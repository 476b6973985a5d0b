//! Station health buckets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::station::StationStatus;

/// Stations with fewer bikes than this (but at least one) are `Low`.
pub const LOW_BIKES_THRESHOLD: u32 = 5;

/// Health category assigned to a station for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusBucket {
    ComingSoon,
    OutOfOrder,
    Empty,
    Low,
    Healthy,
}

impl StatusBucket {
    /// Every bucket, in declaration order.
    pub const ALL: [StatusBucket; 5] = [
        StatusBucket::ComingSoon,
        StatusBucket::OutOfOrder,
        StatusBucket::Empty,
        StatusBucket::Low,
        StatusBucket::Healthy,
    ];

    /// Classify a station status. The first matching rule wins:
    ///
    /// 1. not installed → `ComingSoon`
    /// 2. not renting → `OutOfOrder`
    /// 3. no bikes → `Empty`
    /// 4. fewer than [`LOW_BIKES_THRESHOLD`] bikes → `Low`
    /// 5. otherwise → `Healthy`
    ///
    /// # Examples
    ///
    /// ```
    /// use bike_server::domain::{StationId, StationStatus, StatusBucket};
    ///
    /// let id = StationId::parse("72").unwrap();
    /// let status = StationStatus::new(id.clone(), true, true, 3);
    /// assert_eq!(StatusBucket::classify(&status), StatusBucket::Low);
    ///
    /// let status = StationStatus::new(id, false, true, 10);
    /// assert_eq!(StatusBucket::classify(&status), StatusBucket::ComingSoon);
    /// ```
    pub fn classify(status: &StationStatus) -> Self {
        if !status.is_installed {
            StatusBucket::ComingSoon
        } else if !status.is_renting {
            StatusBucket::OutOfOrder
        } else if status.num_bikes_available == 0 {
            StatusBucket::Empty
        } else if status.num_bikes_available < LOW_BIKES_THRESHOLD {
            StatusBucket::Low
        } else {
            StatusBucket::Healthy
        }
    }

    /// Marker and legend color.
    pub fn color(self) -> &'static str {
        match self {
            StatusBucket::ComingSoon => "grey",
            StatusBucket::OutOfOrder => "red",
            StatusBucket::Empty => "blue",
            StatusBucket::Low => "orange",
            StatusBucket::Healthy => "green",
        }
    }

    /// URL/query slug, e.g. `out-of-order`.
    pub fn slug(self) -> &'static str {
        match self {
            StatusBucket::ComingSoon => "coming-soon",
            StatusBucket::OutOfOrder => "out-of-order",
            StatusBucket::Empty => "empty",
            StatusBucket::Low => "low",
            StatusBucket::Healthy => "healthy",
        }
    }
}

impl fmt::Display for StatusBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for StatusBucket {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        StatusBucket::ALL
            .into_iter()
            .find(|b| b.slug() == needle)
            .ok_or_else(|| DomainError::UnknownBucket(s.to_string()))
    }
}

//! GBFS feed DTOs.
//!
//! These types map directly to the `station_information.json` and
//! `station_status.json` documents. Fields the map does not use are
//! ignored. GBFS v1 feeds publish flags as `0`/`1` and some publish
//! station ids as numbers, so both shapes are accepted.
//!
//! Each station entry is decoded on its own: one malformed entry becomes a
//! [`FeedRecord::Malformed`] instead of failing the whole document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Top-level GBFS document: `{ last_updated, ttl, data: { stations } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedEnvelope<T> {
    /// POSIX seconds when the feed was last updated.
    pub last_updated: Option<i64>,

    /// Seconds the feed may be cached for.
    pub ttl: Option<u64>,

    pub data: StationList<T>,
}

/// The `data` object of a station feed.
#[derive(Debug, Clone, Deserialize)]
pub struct StationList<T> {
    pub stations: Vec<T>,
}

/// One entry of `station_information.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct StationInformationRecord {
    pub station_id: FlexId,
    pub name: String,
    pub lat: f64,
    pub lon: f64,

    /// Number of docks. Optional in GBFS.
    pub capacity: Option<u32>,

    pub short_name: Option<String>,
}

/// One entry of `station_status.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct StationStatusRecord {
    pub station_id: FlexId,
    pub is_installed: FlexBool,
    pub is_renting: FlexBool,
    pub num_bikes_available: u32,

    pub num_docks_available: Option<u32>,
    pub is_returning: Option<FlexBool>,

    /// POSIX seconds of the station's last check-in.
    pub last_reported: Option<i64>,
}

/// One entry of a station list, decoded independently of its neighbours.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedRecord<T> {
    Valid(T),
    Malformed {
        /// `station_id` as published, or empty if absent.
        station_id: String,
        message: String,
    },
}

impl<T> FeedRecord<T> {
    pub fn valid(&self) -> Option<&T> {
        match self {
            FeedRecord::Valid(record) => Some(record),
            FeedRecord::Malformed { .. } => None,
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for FeedRecord<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let station_id = match value.get("station_id") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };

        Ok(match T::deserialize(value) {
            Ok(record) => FeedRecord::Valid(record),
            Err(e) => FeedRecord::Malformed {
                station_id,
                message: e.to_string(),
            },
        })
    }
}

/// A station id published either as a string or a number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FlexId {
    Text(String),
    Number(u64),
}

impl FlexId {
    pub fn into_string(self) -> String {
        match self {
            FlexId::Text(s) => s,
            FlexId::Number(n) => n.to_string(),
        }
    }
}

/// A flag published either as a JSON boolean or as an integer.
///
/// Any non-zero integer counts as true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FlexBool {
    Bool(bool),
    Int(i64),
}

impl FlexBool {
    pub fn as_bool(self) -> bool {
        match self {
            FlexBool::Bool(b) => b,
            FlexBool::Int(n) => n != 0,
        }
    }
}

/// `station_information.json`.
pub type StationInformationFeed = FeedEnvelope<FeedRecord<StationInformationRecord>>;

/// `station_status.json`.
pub type StationStatusFeed = FeedEnvelope<FeedRecord<StationStatusRecord>>;

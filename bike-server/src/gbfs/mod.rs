//! GBFS (General Bikeshare Feed Specification) client.
//!
//! A GBFS system publishes several JSON documents. The map needs two:
//! - `station_information.json` - static metadata (name, position, capacity)
//! - `station_status.json` - live availability, refreshed every few seconds
//!
//! Both share the envelope `{ "data": { "stations": [...] } }` and are joined
//! on `station_id`.

mod client;
mod convert;
mod error;
mod feed;
mod mock;
mod types;

pub use client::{
    DEFAULT_STATION_INFORMATION_URL, DEFAULT_STATION_STATUS_URL, GbfsClient, GbfsConfig,
};
pub use convert::{RejectedRecord, Snapshot, build_snapshot, convert_information, convert_status};
pub use error::GbfsError;
pub use feed::FeedSource;
pub use mock::{INFORMATION_FILE, MockGbfsClient, STATUS_FILE};
pub use types::{
    FeedEnvelope, FeedRecord, FlexBool, FlexId, StationInformationFeed, StationInformationRecord,
    StationList, StationStatusFeed, StationStatusRecord,
};

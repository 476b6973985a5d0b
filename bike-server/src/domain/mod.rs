//! Domain types for the bike-share station map.
//!
//! This module contains the validated model of a bike-share system: station
//! identifiers, positions, live availability and the health bucket derived
//! from it. All types enforce their invariants at construction time, so code
//! that receives these types can trust their validity.

mod bucket;
mod coordinates;
mod error;
mod station;

pub use bucket::{LOW_BIKES_THRESHOLD, StatusBucket};
pub use coordinates::Coordinates;
pub use error::DomainError;
pub use station::{Station, StationId, StationInfo, StationStatus};

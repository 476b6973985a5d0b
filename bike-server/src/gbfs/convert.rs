//! Conversion from GBFS DTOs to domain types, and the info/status join.
//!
//! Records that fail to decode or validate, and information records with no
//! matching status, are skipped rather than failing the whole feed. They are
//! kept on the [`Snapshot`] so callers can report them.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::domain::{
    Coordinates, DomainError, Station, StationId, StationInfo, StationStatus, StatusBucket,
};

use super::types::{
    FeedRecord, FlexBool, StationInformationFeed, StationInformationRecord, StationStatusFeed,
    StationStatusRecord,
};

/// A feed record that could not be converted.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRecord {
    /// The id as published in the feed.
    pub station_id: String,
    pub error: DomainError,
}

/// One joined and classified view of a GBFS system.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Stations with both information and status, in information-feed order.
    pub stations: Vec<Station>,

    /// Stations published in the information feed with no status record.
    pub unmatched: Vec<StationId>,

    /// Records that failed validation.
    pub rejected: Vec<RejectedRecord>,

    /// When the feed was last updated (status feed preferred).
    pub last_updated: Option<DateTime<Utc>>,
}

impl Snapshot {
    /// Number of stations on the map.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Stations in the given bucket.
    pub fn in_bucket(&self, bucket: StatusBucket) -> impl Iterator<Item = &Station> {
        self.stations.iter().filter(move |s| s.bucket == bucket)
    }

    /// Number of stations in the given bucket.
    pub fn count(&self, bucket: StatusBucket) -> usize {
        self.in_bucket(bucket).count()
    }
}

/// Convert an information record to a domain type.
pub fn convert_information(record: &StationInformationRecord) -> Result<StationInfo, DomainError> {
    let id = StationId::parse(&record.station_id.clone().into_string())?;
    let position = Coordinates::new(record.lat, record.lon)?;

    Ok(StationInfo {
        id,
        name: record.name.trim().to_string(),
        position,
        capacity: record.capacity,
    })
}

/// Convert a status record to a domain type.
pub fn convert_status(record: &StationStatusRecord) -> Result<StationStatus, DomainError> {
    let id = StationId::parse(&record.station_id.clone().into_string())?;

    Ok(StationStatus {
        id,
        is_installed: record.is_installed.as_bool(),
        is_renting: record.is_renting.as_bool(),
        num_bikes_available: record.num_bikes_available,
        num_docks_available: record.num_docks_available,
        is_returning: record.is_returning.map(FlexBool::as_bool),
        last_reported: record.last_reported.and_then(timestamp),
    })
}

/// Join the two feeds by station id and classify every station.
///
/// Status records are indexed by id first, so the join is linear. If a feed
/// repeats an id, the last status record wins; repeated information records
/// all share that status. Status records with no information record are
/// ignored: without coordinates they cannot be drawn.
pub fn build_snapshot(info: &StationInformationFeed, status: &StationStatusFeed) -> Snapshot {
    let mut rejected = Vec::new();

    let mut statuses: HashMap<StationId, StationStatus> =
        HashMap::with_capacity(status.data.stations.len());
    let raw_id = |r: &StationStatusRecord| r.station_id.clone().into_string();
    for entry in &status.data.stations {
        if let Some(s) = decode(entry, convert_status, raw_id, "status", &mut rejected) {
            statuses.insert(s.id.clone(), s);
        }
    }

    let mut stations = Vec::with_capacity(info.data.stations.len());
    let mut unmatched = Vec::new();

    let raw_id = |r: &StationInformationRecord| r.station_id.clone().into_string();
    for entry in &info.data.stations {
        let Some(station_info) =
            decode(entry, convert_information, raw_id, "information", &mut rejected)
        else {
            continue;
        };

        let Some(station_status) = statuses.get(&station_info.id).cloned() else {
            warn!(station_id = %station_info.id, name = %station_info.name, "no status for station");
            unmatched.push(station_info.id);
            continue;
        };

        let station_id = station_info.id.to_string();
        match Station::join(station_info, station_status) {
            Ok(station) => stations.push(station),
            Err(error) => {
                warn!(station_id = station_id.as_str(), %error, "skipping station");
                rejected.push(RejectedRecord { station_id, error });
            }
        }
    }

    let last_updated = status
        .last_updated
        .or(info.last_updated)
        .and_then(timestamp);

    Snapshot {
        stations,
        unmatched,
        rejected,
        last_updated,
    }
}

/// Convert one feed entry, recording it in `rejected` if it is malformed or
/// fails validation.
fn decode<R, T>(
    entry: &FeedRecord<R>,
    convert: fn(&R) -> Result<T, DomainError>,
    raw_id: fn(&R) -> String,
    kind: &str,
    rejected: &mut Vec<RejectedRecord>,
) -> Option<T> {
    let (station_id, error) = match entry {
        FeedRecord::Valid(record) => match convert(record) {
            Ok(converted) => return Some(converted),
            Err(error) => (raw_id(record), error),
        },
        FeedRecord::Malformed {
            station_id,
            message,
        } => (
            station_id.clone(),
            DomainError::MalformedRecord(message.clone()),
        ),
    };

    warn!(station_id = station_id.as_str(), %error, kind, "skipping feed record");
    rejected.push(RejectedRecord { station_id, error });
    None
}

fn timestamp(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gbfs::types::{FeedEnvelope, FlexId, StationList};

    fn info_record(id: &str, lat: f64) -> StationInformationRecord {
        StationInformationRecord {
            station_id: FlexId::Text(id.to_string()),
            name: format!("Station {id}"),
            lat,
            lon: -73.99,
            capacity: Some(20),
            short_name: None,
        }
    }

    fn status_record(id: &str, installed: i64, renting: i64, bikes: u32) -> StationStatusRecord {
        StationStatusRecord {
            station_id: FlexId::Text(id.to_string()),
            is_installed: FlexBool::Int(installed),
            is_renting: FlexBool::Int(renting),
            num_bikes_available: bikes,
            num_docks_available: Some(20 - bikes.min(20)),
            is_returning: None,
            last_reported: Some(1_700_000_000),
        }
    }

    fn feed<T>(stations: Vec<T>, last_updated: Option<i64>) -> FeedEnvelope<FeedRecord<T>> {
        FeedEnvelope {
            last_updated,
            ttl: None,
            data: StationList {
                stations: stations.into_iter().map(FeedRecord::Valid).collect(),
            },
        }
    }

    #[test]
    fn joins_and_classifies() {
        let info = feed(
            vec![
                info_record("1", 40.7),
                info_record("2", 40.7),
                info_record("3", 40.7),
                info_record("4", 40.7),
                info_record("5", 40.7),
            ],
            None,
        );
        let status = feed(
            vec![
                status_record("5", 1, 1, 12),
                status_record("4", 1, 1, 2),
                status_record("3", 1, 1, 0),
                status_record("2", 1, 0, 7),
                status_record("1", 0, 1, 0),
            ],
            Some(1_700_000_100),
        );

        let snapshot = build_snapshot(&info, &status);

        let buckets: Vec<_> = snapshot.stations.iter().map(|s| s.bucket).collect();
        assert_eq!(
            buckets,
            vec![
                StatusBucket::ComingSoon,
                StatusBucket::OutOfOrder,
                StatusBucket::Empty,
                StatusBucket::Low,
                StatusBucket::Healthy,
            ]
        );
        assert!(snapshot.unmatched.is_empty());
        assert!(snapshot.rejected.is_empty());
        assert_eq!(
            snapshot.last_updated,
            DateTime::from_timestamp(1_700_000_100, 0)
        );
        for bucket in StatusBucket::ALL {
            assert_eq!(snapshot.count(bucket), 1);
        }
    }

    #[test]
    fn station_without_status_is_unmatched() {
        let info = feed(vec![info_record("1", 40.7), info_record("2", 40.7)], None);
        let status = feed(vec![status_record("1", 1, 1, 9)], None);

        let snapshot = build_snapshot(&info, &status);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.stations[0].id().as_str(), "1");
        assert_eq!(snapshot.unmatched, vec![StationId::parse("2").unwrap()]);
    }

    #[test]
    fn status_without_information_is_ignored() {
        let info = feed(vec![info_record("1", 40.7)], None);
        let status = feed(
            vec![status_record("1", 1, 1, 9), status_record("99", 1, 1, 9)],
            None,
        );

        let snapshot = build_snapshot(&info, &status);
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.unmatched.is_empty());
    }

    #[test]
    fn invalid_coordinates_are_rejected() {
        let info = feed(vec![info_record("1", 140.0), info_record("2", 40.7)], None);
        let status = feed(
            vec![status_record("1", 1, 1, 9), status_record("2", 1, 1, 9)],
            None,
        );

        let snapshot = build_snapshot(&info, &status);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.rejected.len(), 1);
        assert_eq!(snapshot.rejected[0].station_id, "1");
        assert!(matches!(
            snapshot.rejected[0].error,
            DomainError::InvalidCoordinates { .. }
        ));
    }

    #[test]
    fn empty_status_id_is_rejected() {
        let info = feed(vec![info_record("1", 40.7)], None);
        let status = feed(vec![status_record(" ", 1, 1, 9)], None);

        let snapshot = build_snapshot(&info, &status);
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.unmatched.len(), 1);
        assert_eq!(snapshot.rejected[0].error, DomainError::EmptyStationId);
    }

    #[test]
    fn duplicate_status_last_wins() {
        let info = feed(vec![info_record("1", 40.7)], None);
        let status = feed(
            vec![status_record("1", 1, 1, 0), status_record("1", 1, 1, 9)],
            None,
        );

        let snapshot = build_snapshot(&info, &status);
        assert_eq!(snapshot.stations[0].bucket, StatusBucket::Healthy);
    }

    #[test]
    fn duplicate_information_id_shares_status() {
        let mut first = info_record("1", 40.7);
        first.name = "first".to_string();
        let mut second = info_record("1", 40.71);
        second.name = "second".to_string();
        let info = feed(vec![first, second], None);
        let status = feed(vec![status_record("1", 1, 1, 9)], None);

        let snapshot = build_snapshot(&info, &status);

        let names: Vec<_> = snapshot.stations.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert!(snapshot.unmatched.is_empty());
        assert!(snapshot.rejected.is_empty());
    }

    #[test]
    fn malformed_entries_are_rejected_and_the_rest_joined() {
        let info: StationInformationFeed = serde_json::from_str(
            r#"{ "data": { "stations": [
                { "station_id": "1", "name": "A", "lat": 40.7, "lon": -74.0 },
                { "station_id": "2", "lat": 40.7, "lon": -74.0 },
                { "station_id": "3", "name": "C", "lat": 40.7, "lon": -74.0 }
            ] } }"#,
        )
        .unwrap();
        let status: StationStatusFeed = serde_json::from_str(
            r#"{ "data": { "stations": [
                { "station_id": "1", "is_installed": 1, "is_renting": 1, "num_bikes_available": 9 },
                { "station_id": "2", "is_installed": 1, "is_renting": 1, "num_bikes_available": 9 },
                { "station_id": "3", "is_installed": 1, "is_renting": 1, "num_bikes_available": null }
            ] } }"#,
        )
        .unwrap();

        let snapshot = build_snapshot(&info, &status);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.stations[0].id().as_str(), "1");
        assert_eq!(snapshot.unmatched, vec![StationId::parse("3").unwrap()]);

        let mut rejected: Vec<_> = snapshot
            .rejected
            .iter()
            .map(|r| r.station_id.as_str())
            .collect();
        rejected.sort();
        assert_eq!(rejected, vec!["2", "3"]);
        assert!(
            snapshot
                .rejected
                .iter()
                .all(|r| matches!(r.error, DomainError::MalformedRecord(_)))
        );
    }

    #[test]
    fn numeric_ids_join_with_string_ids() {
        let mut info_rec = info_record("0", 40.7);
        info_rec.station_id = FlexId::Number(72);
        let info = feed(vec![info_rec], None);
        let status = feed(vec![status_record("72", 1, 1, 3)], None);

        let snapshot = build_snapshot(&info, &status);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.stations[0].bucket, StatusBucket::Low);
    }

    #[test]
    fn last_updated_falls_back_to_information() {
        let info = feed(vec![info_record("1", 40.7)], Some(1_600_000_000));
        let status = feed(vec![status_record("1", 1, 1, 9)], None);

        let snapshot = build_snapshot(&info, &status);
        assert_eq!(
            snapshot.last_updated,
            DateTime::from_timestamp(1_600_000_000, 0)
        );
    }

    #[test]
    fn convert_status_maps_optional_fields() {
        let mut record = status_record("1", 1, 1, 4);
        record.is_returning = Some(FlexBool::Bool(false));
        let status = convert_status(&record).unwrap();

        assert_eq!(status.is_returning, Some(false));
        assert_eq!(status.num_docks_available, Some(16));
        assert_eq!(status.last_reported, DateTime::from_timestamp(1_700_000_000, 0));
    }
}

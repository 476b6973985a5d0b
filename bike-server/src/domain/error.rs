//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from feed/IO errors.

use super::StationId;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Station identifier is empty
    #[error("station id must not be empty")]
    EmptyStationId,

    /// Latitude or longitude is out of range
    #[error("invalid coordinates: ({lat}, {lon})")]
    InvalidCoordinates { lat: f64, lon: f64 },

    /// Info and status records were joined for different stations
    #[error("cannot join info for station {info} with status for station {status}")]
    MismatchedStation { info: StationId, status: StationId },

    /// Feed entry could not be decoded
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// Bucket slug not recognised
    #[error("unknown status bucket: {0}")]
    UnknownBucket(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::EmptyStationId;
        assert_eq!(err.to_string(), "station id must not be empty");

        let err = DomainError::InvalidCoordinates {
            lat: 91.0,
            lon: 0.5,
        };
        assert_eq!(err.to_string(), "invalid coordinates: (91, 0.5)");

        let err = DomainError::MismatchedStation {
            info: StationId::parse("72").unwrap(),
            status: StationId::parse("79").unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "cannot join info for station 72 with status for station 79"
        );

        let err = DomainError::MalformedRecord("missing field `name`".into());
        assert_eq!(err.to_string(), "malformed record: missing field `name`");

        let err = DomainError::UnknownBucket("busy".into());
        assert_eq!(err.to_string(), "unknown status bucket: busy");
    }
}

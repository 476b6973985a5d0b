//! Feed source selection.

use tracing::info;

use super::client::GbfsClient;
use super::convert::{Snapshot, build_snapshot};
use super::error::GbfsError;
use super::mock::MockGbfsClient;

/// Where station data comes from: the live feed, or files on disk.
#[derive(Debug, Clone)]
pub enum FeedSource {
    Live(GbfsClient),
    Mock(MockGbfsClient),
}

impl FeedSource {
    /// Fetch both documents, join them and classify every station.
    pub async fn load_snapshot(&self) -> Result<Snapshot, GbfsError> {
        let (information, status) = match self {
            FeedSource::Live(client) => client.fetch_feeds().await?,
            FeedSource::Mock(client) => client.fetch_feeds().await?,
        };

        let snapshot = build_snapshot(&information, &status);

        info!(
            stations = snapshot.len(),
            unmatched = snapshot.unmatched.len(),
            rejected = snapshot.rejected.len(),
            source = self.describe(),
            "built station snapshot"
        );

        Ok(snapshot)
    }

    /// Short human-readable label for logs.
    pub fn describe(&self) -> &'static str {
        match self {
            FeedSource::Live(_) => "live",
            FeedSource::Mock(_) => "mock",
        }
    }
}

impl From<GbfsClient> for FeedSource {
    fn from(client: GbfsClient) -> Self {
        FeedSource::Live(client)
    }
}

impl From<MockGbfsClient> for FeedSource {
    fn from(client: MockGbfsClient) -> Self {
        FeedSource::Mock(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StatusBucket;
    use crate::gbfs::mock::{INFORMATION_FILE, STATUS_FILE};
    use tempfile::tempdir;

    #[tokio::test]
    async fn mock_source_builds_snapshot() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(INFORMATION_FILE),
            r#"{"data":{"stations":[
                {"station_id":"1","name":"A","lat":40.7,"lon":-74.0},
                {"station_id":"2","name":"B","lat":40.8,"lon":-74.0}
            ]}}"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join(STATUS_FILE),
            r#"{"data":{"stations":[
                {"station_id":"1","is_installed":true,"is_renting":true,"num_bikes_available":0}
            ]}}"#,
        )
        .unwrap();

        let source = FeedSource::from(MockGbfsClient::new(dir.path()).unwrap());
        assert_eq!(source.describe(), "mock");

        let snapshot = source.load_snapshot().await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.stations[0].bucket, StatusBucket::Empty);
        assert_eq!(snapshot.unmatched.len(), 1);
    }
}

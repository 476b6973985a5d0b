//! Caching layer for station snapshots.
//!
//! Every page view needs the joined snapshot, but the public feed only
//! changes every few seconds. The last snapshot is kept for a short TTL so
//! bursts of requests share one pair of fetches.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::gbfs::{FeedSource, GbfsError, Snapshot};

/// Default snapshot TTL.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30);

/// Configuration for the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// TTL for the cached snapshot.
    pub ttl: Duration,
}

impl CacheConfig {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl: DEFAULT_TTL }
    }
}

/// Feed source with snapshot caching.
///
/// Wraps a [`FeedSource`] and caches the joined [`Snapshot`]. A TTL of zero
/// disables caching.
pub struct CachedFeed {
    source: FeedSource,
    snapshots: MokaCache<(), Arc<Snapshot>>,
}

impl CachedFeed {
    /// Create a new cached feed.
    pub fn new(source: FeedSource, config: &CacheConfig) -> Self {
        let snapshots = MokaCache::builder()
            .time_to_live(config.ttl)
            .build();

        Self { source, snapshots }
    }

    /// Get the current snapshot, using the cache if available.
    ///
    /// Errors are not cached: the next call fetches again.
    pub async fn snapshot(&self) -> Result<Arc<Snapshot>, GbfsError> {
        if let Some(cached) = self.snapshots.get(&()).await {
            debug!("snapshot cache hit");
            return Ok(cached);
        }

        let snapshot = Arc::new(self.source.load_snapshot().await?);
        self.snapshots.insert((), snapshot.clone()).await;

        Ok(snapshot)
    }

    /// Access the underlying source.
    pub fn source(&self) -> &FeedSource {
        &self.source
    }

    /// Drop the cached snapshot.
    pub async fn invalidate(&self) {
        self.snapshots.invalidate(&()).await;
    }
}

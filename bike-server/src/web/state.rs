//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedFeed;
use crate::map::MapConfig;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Cached station feed
    pub feed: Arc<CachedFeed>,

    /// Base map configuration
    pub map: Arc<MapConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(feed: CachedFeed, map: MapConfig) -> Self {
        Self {
            feed: Arc::new(feed),
            map: Arc::new(map),
        }
    }
}

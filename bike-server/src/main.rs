use bike_server::cache::CachedFeed;
use bike_server::config::ServerConfig;
use bike_server::gbfs::{FeedSource, GbfsClient, MockGbfsClient};
use bike_server::web::{AppState, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bike_server=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env().expect("Invalid configuration");

    // Choose the feed source
    let source = match &config.mock_data_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "serving mock feed");
            FeedSource::from(MockGbfsClient::new(dir).expect("Failed to load mock feed"))
        }
        None => {
            info!(
                information = %config.gbfs.station_information_url,
                status = %config.gbfs.station_status_url,
                "serving live feed"
            );
            FeedSource::from(GbfsClient::new(config.gbfs.clone()).expect("Failed to create GBFS client"))
        }
    };

    let feed = CachedFeed::new(source, &config.cache);

    // Warm the cache; a failure here is not fatal, pages report it per request
    match feed.snapshot().await {
        Ok(snapshot) => info!(stations = snapshot.len(), "loaded stations"),
        Err(e) => warn!(error = %e, "initial feed load failed"),
    }

    // Build app state
    let state = AppState::new(feed, config.map.clone());

    // Create router
    let app = create_router(state, &config.static_dir);

    // Bind and serve
    let addr = config.bind_addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");

    info!("Bike station map listening on http://{addr}");
    info!("API endpoints: GET /health, GET /api/map, GET /api/stations?bucket=<slug>, GET /api/summary");

    axum::serve(listener, app).await.expect("Server error");
}

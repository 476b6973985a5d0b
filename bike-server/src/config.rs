//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::{CacheConfig, DEFAULT_TTL};
use crate::domain::Coordinates;
use crate::gbfs::GbfsConfig;
use crate::map::MapConfig;

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Default static assets directory, relative to the workspace root.
const DEFAULT_STATIC_DIR: &str = "bike-server/static";

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for {var}: {message}")]
pub struct ConfigError {
    pub var: &'static str,
    pub message: String,
}

/// Everything needed to start the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub static_dir: PathBuf,
    pub gbfs: GbfsConfig,
    /// Serve from files in this directory instead of the live feed.
    pub mock_data_dir: Option<PathBuf>,
    pub cache: CacheConfig,
    pub map: MapConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    ///
    /// | variable | default |
    /// |----------|---------|
    /// | `BIKE_STATION_INFO_URL` | Citi Bike `station_information.json` |
    /// | `BIKE_STATION_STATUS_URL` | Citi Bike `station_status.json` |
    /// | `BIKE_MOCK_DATA_DIR` | unset (live feed) |
    /// | `BIKE_BIND_ADDR` | `127.0.0.1:3000` |
    /// | `BIKE_STATIC_DIR` | `bike-server/static` |
    /// | `BIKE_CACHE_TTL_SECS` | 30 |
    /// | `BIKE_MAP_CENTER_LAT`, `BIKE_MAP_CENTER_LON` | New York City |
    /// | `BIKE_MAP_ZOOM` | 12 |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let bind_addr = parse_or(&get, "BIKE_BIND_ADDR", || {
            DEFAULT_BIND_ADDR.parse().map_err(|_| ConfigError {
                var: "BIKE_BIND_ADDR",
                message: "bad default".to_string(),
            })
        })?;

        let static_dir = get("BIKE_STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        let mut gbfs = GbfsConfig::default();
        if let Some(url) = get("BIKE_STATION_INFO_URL") {
            gbfs.station_information_url = url;
        }
        if let Some(url) = get("BIKE_STATION_STATUS_URL") {
            gbfs.station_status_url = url;
        }

        let mock_data_dir = get("BIKE_MOCK_DATA_DIR").map(PathBuf::from);

        let ttl_secs: u64 = parse_or(&get, "BIKE_CACHE_TTL_SECS", || Ok(DEFAULT_TTL.as_secs()))?;
        let cache = CacheConfig::new(Duration::from_secs(ttl_secs));

        let defaults = MapConfig::default();
        let lat: f64 = parse_or(&get, "BIKE_MAP_CENTER_LAT", || Ok(defaults.center.lat()))?;
        let lon: f64 = parse_or(&get, "BIKE_MAP_CENTER_LON", || Ok(defaults.center.lon()))?;
        let zoom: u8 = parse_or(&get, "BIKE_MAP_ZOOM", || Ok(defaults.zoom))?;

        let center = Coordinates::new(lat, lon).map_err(|e| ConfigError {
            var: "BIKE_MAP_CENTER_LAT/BIKE_MAP_CENTER_LON",
            message: e.to_string(),
        })?;
        let map = MapConfig::new(center, zoom);

        Ok(Self {
            bind_addr,
            static_dir,
            gbfs,
            mock_data_dir,
            cache,
            map,
        })
    }
}

fn parse_or<T>(
    get: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: impl FnOnce() -> Result<T, ConfigError>,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get(var) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError {
            var,
            message: format!("{raw:?}: {e}"),
        }),
        None => default(),
    }
}

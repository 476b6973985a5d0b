//! Base map configuration.

use serde::Serialize;

use crate::domain::Coordinates;

/// Default map center: New York City.
pub const DEFAULT_CENTER: Coordinates = Coordinates::from_static(40.73, -74.0059);

/// Default zoom level.
pub const DEFAULT_ZOOM: u8 = 12;

/// Default page element the map is mounted into.
pub const DEFAULT_CONTAINER: &str = "map-id";

/// Background tile layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileLayer {
    /// Leaflet URL template, e.g. `https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png`
    pub url_template: String,
    /// Attribution HTML shown in the map corner.
    pub attribution: String,
    pub max_zoom: u8,
}

impl TileLayer {
    /// OpenStreetMap standard tiles.
    pub fn openstreetmap() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; <a href='https://www.openstreetmap.org/copyright'>OpenStreetMap</a> contributors".to_string(),
            max_zoom: 18,
        }
    }
}

impl Default for TileLayer {
    fn default() -> Self {
        Self::openstreetmap()
    }
}

/// Where the map opens and what it draws underneath the stations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapConfig {
    /// Id of the page element the map is mounted into.
    pub container: String,
    pub center: Coordinates,
    pub zoom: u8,
    pub tile_layer: TileLayer,
}

impl MapConfig {
    /// Create a config centered on `center` at `zoom`, with default tiles.
    pub fn new(center: Coordinates, zoom: u8) -> Self {
        Self {
            container: DEFAULT_CONTAINER.to_string(),
            center,
            zoom,
            tile_layer: TileLayer::default(),
        }
    }

    /// Set a custom tile layer.
    pub fn with_tile_layer(mut self, tile_layer: TileLayer) -> Self {
        self.tile_layer = tile_layer;
        self
    }

    /// Set the container element id.
    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = container.into();
        self
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CENTER, DEFAULT_ZOOM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = MapConfig::default();
        assert_eq!(config.container, "map-id");
        assert_eq!(config.center.lat(), 40.73);
        assert_eq!(config.center.lon(), -74.0059);
        assert_eq!(config.zoom, 12);
        assert_eq!(config.tile_layer.max_zoom, 18);
        assert!(config.tile_layer.url_template.contains("openstreetmap.org"));
    }

    #[test]
    fn builder_methods() {
        let tiles = TileLayer {
            url_template: "http://tiles.local/{z}/{x}/{y}.png".into(),
            attribution: "local".into(),
            max_zoom: 16,
        };
        let config = MapConfig::new(Coordinates::new(51.5, -0.12).unwrap(), 13)
            .with_tile_layer(tiles.clone())
            .with_container("map");

        assert_eq!(config.zoom, 13);
        assert_eq!(config.tile_layer, tiles);
        assert_eq!(config.container, "map");
    }
}

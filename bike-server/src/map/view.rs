//! Map view: markers grouped by bucket, layer control and legend.
//!
//! The browser draws exactly what this describes, so every decision about
//! colors, labels and grouping is made here.

use askama::Template;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Coordinates, Station, StatusBucket};
use crate::gbfs::Snapshot;

use super::config::{MapConfig, TileLayer};

/// Font Awesome icon drawn inside every marker.
pub const MARKER_ICON: &str = "fa-bicycle";

/// Marker shape (Leaflet.ExtraMarkers).
pub const MARKER_SHAPE: &str = "circle";

/// Legend corner.
pub const LEGEND_POSITION: &str = "bottomright";

/// Order of groups in the layer control. The first is the base layer.
pub const LAYER_ORDER: [StatusBucket; 5] = [
    StatusBucket::Healthy,
    StatusBucket::ComingSoon,
    StatusBucket::Empty,
    StatusBucket::OutOfOrder,
    StatusBucket::Low,
];

/// Order of entries in the legend.
pub const LEGEND_ORDER: [StatusBucket; 5] = [
    StatusBucket::Healthy,
    StatusBucket::ComingSoon,
    StatusBucket::OutOfOrder,
    StatusBucket::Empty,
    StatusBucket::Low,
];

/// Label of a bucket's group in the layer control.
pub fn layer_label(bucket: StatusBucket) -> &'static str {
    match bucket {
        StatusBucket::Healthy => "Bike Station",
        StatusBucket::ComingSoon => "Coming Soon",
        StatusBucket::Empty => "Empty Stations",
        StatusBucket::OutOfOrder => "Out of Order",
        StatusBucket::Low => "Low Stations",
    }
}

/// Label of a bucket in the legend.
pub fn legend_label(bucket: StatusBucket) -> &'static str {
    match bucket {
        StatusBucket::Healthy => "Healthy Stations",
        StatusBucket::ComingSoon => "Coming Soon",
        StatusBucket::OutOfOrder => "Out of Order",
        StatusBucket::Empty => "Empty Stations",
        StatusBucket::Low => "Low Stations",
    }
}

/// Station popup body.
#[derive(Template)]
#[template(path = "popup.html")]
struct PopupTemplate<'a> {
    name: &'a str,
    capacity: String,
    bikes_available: u32,
}

/// Render the popup HTML for a station. The name is escaped.
pub fn popup_html(station: &Station) -> Result<String, askama::Error> {
    PopupTemplate {
        name: station.name(),
        capacity: station
            .info
            .capacity
            .map(|c| c.to_string())
            .unwrap_or_else(|| "unknown".to_string()),
        bikes_available: station.bikes_available(),
    }
    .render()
}

/// One station marker.
#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub station_id: String,
    pub name: String,
    pub position: Coordinates,
    pub color: &'static str,
    pub icon: &'static str,
    pub shape: &'static str,
    pub popup_html: String,
}

impl Marker {
    pub fn from_station(station: &Station) -> Result<Self, askama::Error> {
        Ok(Self {
            station_id: station.id().to_string(),
            name: station.name().to_string(),
            position: station.info.position,
            color: station.bucket.color(),
            icon: MARKER_ICON,
            shape: MARKER_SHAPE,
            popup_html: popup_html(station)?,
        })
    }
}

/// Markers for one bucket, toggled together in the layer control.
#[derive(Debug, Clone, Serialize)]
pub struct LayerGroup {
    pub bucket: StatusBucket,
    pub label: &'static str,
    /// Base layers are radio buttons in the control; overlays are checkboxes.
    pub base: bool,
    pub color: &'static str,
    pub markers: Vec<Marker>,
}

/// One row of the legend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: &'static str,
}

/// Static color key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Legend {
    pub position: &'static str,
    pub entries: Vec<LegendEntry>,
}

impl Default for Legend {
    fn default() -> Self {
        Self {
            position: LEGEND_POSITION,
            entries: LEGEND_ORDER
                .iter()
                .map(|&b| LegendEntry {
                    label: legend_label(b),
                    color: b.color(),
                })
                .collect(),
        }
    }
}

/// Everything the browser needs to draw the map.
#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    pub container: String,
    pub center: Coordinates,
    pub zoom: u8,
    pub tile_layer: TileLayer,
    /// One group per bucket, in [`LAYER_ORDER`]. All are shown initially.
    pub layers: Vec<LayerGroup>,
    pub legend: Legend,
    pub station_count: usize,
    pub last_updated: Option<DateTime<Utc>>,
}

impl MapView {
    /// Build the view for a snapshot.
    pub fn build(config: &MapConfig, snapshot: &Snapshot) -> Result<Self, askama::Error> {
        let layers = LAYER_ORDER
            .iter()
            .enumerate()
            .map(|(i, &bucket)| -> Result<LayerGroup, askama::Error> {
                let markers = snapshot
                    .in_bucket(bucket)
                    .map(Marker::from_station)
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(LayerGroup {
                    bucket,
                    label: layer_label(bucket),
                    base: i == 0,
                    color: bucket.color(),
                    markers,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            container: config.container.clone(),
            center: config.center,
            zoom: config.zoom,
            tile_layer: config.tile_layer.clone(),
            layers,
            legend: Legend::default(),
            station_count: snapshot.len(),
            last_updated: snapshot.last_updated,
        })
    }

    /// The group for a bucket.
    pub fn layer(&self, bucket: StatusBucket) -> Option<&LayerGroup> {
        self.layers.iter().find(|l| l.bucket == bucket)
    }
}

//! Map rendering model.
//!
//! The base map (center, zoom, tiles) and the station overlay: one marker per
//! station, one toggleable group per bucket, and a static legend. Leaflet
//! draws it in the browser.

mod config;
mod view;

pub use config::{DEFAULT_CENTER, DEFAULT_CONTAINER, DEFAULT_ZOOM, MapConfig, TileLayer};
pub use view::{
    LAYER_ORDER, LEGEND_ORDER, LayerGroup, Legend, LegendEntry, MapView, Marker, layer_label,
    legend_label, popup_html,
};

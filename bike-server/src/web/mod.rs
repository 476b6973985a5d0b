//! Web layer for the bike station map.
//!
//! Serves the map page, the JSON map view it draws from, and a small JSON
//! API over the classified stations.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;

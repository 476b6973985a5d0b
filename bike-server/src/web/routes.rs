//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::{DomainError, StatusBucket};
use crate::gbfs::GbfsError;
use crate::map::MapView;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/map", get(map_view))
        .route("/api/stations", get(list_stations))
        .route("/api/summary", get(summary))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Map page.
///
/// The feed is loaded here as well as by `/api/map`, so a broken feed shows
/// an error page instead of an empty map. Both requests share the cache; if
/// it refreshes between them, the page flags its summary as stale.
async fn index_page(State(state): State<AppState>) -> Response {
    let snapshot = match state.feed.snapshot().await {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "failed to load station feed");
            return error_page(
                StatusCode::BAD_GATEWAY,
                "Station feed unavailable",
                "The bike-share feed could not be loaded.",
                Some(e.to_string()),
            );
        }
    };

    match IndexTemplate::new(&state.map, &snapshot).render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => error_page(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Template error",
            "The page could not be rendered.",
            Some(e.to_string()),
        ),
    }
}

fn error_page(status: StatusCode, title: &str, message: &str, details: Option<String>) -> Response {
    let template = ErrorTemplate {
        title: title.to_string(),
        message: message.to_string(),
        details,
    };
    let html = template
        .render()
        .unwrap_or_else(|e| format!("Template error: {}", e));
    (status, Html(html)).into_response()
}

/// Everything the browser needs to draw the map.
async fn map_view(State(state): State<AppState>) -> Result<Json<MapView>, AppError> {
    let snapshot = state.feed.snapshot().await?;
    let view = MapView::build(&state.map, &snapshot)?;
    Ok(Json(view))
}

/// Classified stations, optionally filtered to one bucket.
async fn list_stations(
    State(state): State<AppState>,
    Query(query): Query<StationsQuery>,
) -> Result<Json<StationsResponse>, AppError> {
    // Parse before fetching so a bad slug never costs a feed request
    let bucket = query
        .bucket
        .as_deref()
        .filter(|b| !b.is_empty())
        .map(str::parse::<StatusBucket>)
        .transpose()?;

    let snapshot = state.feed.snapshot().await?;

    let stations = snapshot
        .stations
        .iter()
        .filter(|s| bucket.is_none_or(|b| s.bucket == b))
        .map(StationResult::from_station)
        .collect();

    Ok(Json(StationsResponse {
        stations,
        last_updated: snapshot.last_updated,
    }))
}

/// Station counts per bucket.
async fn summary(State(state): State<AppState>) -> Result<Json<SummaryResponse>, AppError> {
    let snapshot = state.feed.snapshot().await?;
    Ok(Json(SummaryResponse::from_snapshot(&snapshot)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Upstream { message: String },
    Internal { message: String },
}

impl From<GbfsError> for AppError {
    fn from(e: GbfsError) -> Self {
        AppError::Upstream {
            message: e.to_string(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Internal {
            message: format!("Template error: {}", e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, "{message}");
        } else {
            warn!(%status, "{message}");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

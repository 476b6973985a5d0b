//! GBFS feed error types.

/// Errors that can occur when loading a GBFS feed.
#[derive(Debug, thiserror::Error)]
pub enum GbfsError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Feed returned an error status
    #[error("feed error {status} from {url}: {message}")]
    Api {
        url: String,
        status: u16,
        message: String,
    },

    /// Failed to parse the feed JSON
    #[error("JSON parse error in {source_name}: {message}")]
    Json {
        source_name: String,
        message: String,
        body: Option<String>,
    },

    /// Mock data directory could not be read
    #[error("mock data error: {message}")]
    MockData { message: String },
}

impl GbfsError {
    /// Build a JSON error, keeping a short excerpt of the offending body.
    pub(crate) fn json(source_name: impl Into<String>, err: serde_json::Error, body: &str) -> Self {
        GbfsError::Json {
            source_name: source_name.into(),
            message: err.to_string(),
            body: Some(body.chars().take(500).collect()),
        }
    }
}

//! Error types for the status poller

/// Errors that can occur while fetching or rendering
#[derive(Debug, thiserror::Error)]
pub enum PollerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("GET {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Display target '{0}' not found")]
    MissingTarget(String),

    #[error("Dashboard error: {0}")]
    Dashboard(String),
}

/// Result type alias for poller operations
pub type Result<T> = std::result::Result<T, PollerError>;

//! Error types for sunics.

use thiserror::Error;

/// Errors that can occur while driving the page.
#[derive(Error, Debug)]
pub enum SunicsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Nominatim error: HTTP {0}")]
    SearchStatus(u16),

    /// Non-2xx from the generation endpoint. Holds the response text, or
    /// `HTTP <status>` when the body was empty.
    #[error("{0}")]
    Generation(String),

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("Map widget unavailable: {0}")]
    MapUnavailable(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for sunics operations.
pub type SunicsResult<T> = Result<T, SunicsError>;

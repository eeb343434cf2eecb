//! Error types for the widget.

use thiserror::Error;

/// Failure of a reply round trip.
///
/// Both variants belong to the same policy: the widget logs them and renders
/// nothing. HTTP status codes are not inspected, so an error status only
/// surfaces here when its body fails to decode.
#[derive(Error, Debug)]
pub enum WidgetError {
    /// Network failure or rejected request.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Body is not JSON, or lacks a string `response` field.
    #[error("Malformed reply: {0}")]
    Parse(#[from] serde_json::Error),

    /// Endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Result type alias for widget operations.
pub type Result<T> = std::result::Result<T, WidgetError>;

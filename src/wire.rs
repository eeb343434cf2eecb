//! JSON bodies of the `/get_response` contract.
//!
//! Shared by the widget's reply client and the host server so both ends agree
//! on the field names.

use serde::{Deserialize, Serialize};

/// Path of the reply endpoint.
pub const REPLY_PATH: &str = "/get_response";

/// Request body: `{"message": "<user text>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyRequest {
    /// Text captured from the input field.
    pub message: String,
}

/// Successful reply body: `{"response": "<assistant text>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyBody {
    /// Text rendered as the assistant message.
    pub response: String,
}

/// Failure body returned by the host server: `{"error": "<text>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

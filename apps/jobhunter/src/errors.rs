use serde::Deserialize;
use thiserror::Error;

/// Client-level error type.
/// Every call site catches these and turns them into an alert for the user.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Service reported failure: {0}")]
    UnexpectedStatus(String),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// The two error shapes the service emits:
/// `{"error": "..."}` and `{"status": "error", "message": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

impl ClientError {
    /// Builds an `Api` error from a non-2xx response body, falling back to the
    /// raw body when it is not one of the known JSON shapes.
    pub fn from_response_body(status: u16, body: String) -> Self {
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error.or(b.message))
            .unwrap_or(body);
        ClientError::Api { status, message }
    }
}

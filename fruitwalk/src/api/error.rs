//! API error taxonomy.

use thiserror::Error;

/// Errors from building, sending, or decoding an API request.
///
/// Cloneable so a failure can be stored in published map state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The server answered with a non-2xx status.
    #[error("The request failed with status code {status}")]
    RequestFailed { status: u16, body: Option<String> },

    /// The response body was not the expected JSON.
    #[error("Failed to decode server data: {0}")]
    Decode(String),

    /// Transport failure: DNS, connect, TLS, or timeout.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered 2xx with an empty body.
    #[error("Data was not received from the server")]
    NoData,
}

impl ApiError {
    /// Short category label for display.
    pub fn title(&self) -> &'static str {
        match self {
            ApiError::Decode(_) => "Decoding Error",
            ApiError::NoData => "No Data",
            _ => "Network Error",
        }
    }

    /// HTTP status, if the server responded.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

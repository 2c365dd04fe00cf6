//! Registry API error types.

/// Errors from the registry HTTP client.
///
/// The view controller treats every variant the same way ("no data");
/// the distinction exists for logging.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport failure (connection refused, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status
    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// The mock registry was told to fail
    #[error("unavailable: {0}")]
    Unavailable(String),
}

use thiserror::Error;

/// Application-wide error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid request parameters. Rendered as `400 { error }`.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An upstream call failed on a path that has no fallback.
    ///
    /// `context` is the user-facing summary, `message` the underlying cause.
    #[error("{context}: {message}")]
    Upstream { context: String, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn upstream(context: impl Into<String>, err: impl std::fmt::Display) -> Self {
        AppError::Upstream {
            context: context.into(),
            message: err.to_string(),
        }
    }
}

/// Helper conversion from anyhow::Error
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Failure of a single outbound call to the DHLAB or catalog API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream responded with status {0}")]
    Status(u16),

    #[error("could not decode upstream response: {0}")]
    Decode(String),

    #[error("malformed upstream payload: {0}")]
    Malformed(String),

    #[error("invalid upstream URL: {0}")]
    InvalidUrl(String),
}

impl From<serde_json::Error> for UpstreamError {
    fn from(err: serde_json::Error) -> Self {
        UpstreamError::Decode(err.to_string())
    }
}

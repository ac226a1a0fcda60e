use thiserror::Error;

/// Errors returned by [`super::ApiClient`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// HTTP 401. Forces a logout at the dispatch boundary.
    #[error("Unauthorized")]
    Unauthorized { message: Option<String> },

    /// Any other non-success status.
    #[error("Server error {status}")]
    Server { status: u16, message: Option<String> },

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Request timed out")]
    Timeout,

    /// Body did not match the expected shape.
    #[error("Invalid response: {0}")]
    Decode(String),

    /// A file could not be prepared for a multipart request.
    #[error("Upload failed: {0}")]
    Upload(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Connection(err.to_string())
        }
    }
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// Text shown to the user: the server's message when it sent one,
    /// otherwise the operation's fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Unauthorized { message: Some(m) } | ApiError::Server { message: Some(m), .. } => {
                m.clone()
            }
            _ => fallback.to_string(),
        }
    }
}

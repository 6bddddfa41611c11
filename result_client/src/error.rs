//! Failure type returned by every result-server call.
//!
//! Transport problems and schema mismatches are kept apart for logging only;
//! consumers treat any [`FetchError`] the same way.

/// Result alias used throughout the client.
pub type FetchResult<T> = Result<T, FetchError>;

/// The single failure marker produced at the client boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Network error or non-2xx status.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server answered 2xx but the body does not match the expected shape.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

/// Coarse classification of a [`FetchError`], for log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    TransportFailure,
    MalformedPayload,
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Transport(_) => FetchErrorKind::TransportFailure,
            FetchError::MalformedPayload(_) => FetchErrorKind::MalformedPayload,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::MalformedPayload(err.to_string())
    }
}

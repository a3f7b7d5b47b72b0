use thiserror::Error;

/// Failure of a call through the [`crate::Gateway`].
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ApiError {
    /// No usable token. The session has already been cleared; the caller
    /// should route to login instead of showing an error.
    #[error("Session expired")]
    SessionExpired,

    /// The request never produced a usable envelope: network failure,
    /// timeout, non-2xx HTTP status or an undecodable body.
    #[error("request failed: {0}")]
    Transport(String),

    /// The envelope reported a non-success `statusCode`.
    #[error("{message} (status {status})")]
    Rejected { status: u16, message: String },

    /// The envelope reported `404`: an empty result, not a fault.
    #[error("{0}")]
    NotFound(String),
}

impl ApiError {
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired)
    }
}

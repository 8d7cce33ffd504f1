use http::StatusCode;
use thiserror::Error;

/// The failure taxonomy exposed to callers of the gateway and the session
/// store. Forms branch on these variants, so the distinction between a
/// credential error and an expiry-triggered forced logout is explicit
/// rather than inferred.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid email/password or duplicate registration. Surfaced verbatim
    /// to the initiating form; session state is unchanged.
    #[error("{0}")]
    Credentials(String),

    /// The server rejected the bearer token. By the time the caller sees
    /// this, the gateway has already cleared the stored token and fired the
    /// session-expired hook; the in-flight operation should be abandoned.
    #[error("session expired")]
    Unauthorized,

    /// The configured request timeout elapsed. Never clears the token.
    #[error("request timed out")]
    Timeout,

    /// Transport-level failure (unreachable host, connection reset).
    /// Never clears the token.
    #[error("network error: {0}")]
    Network(String),

    /// Any other non-success response from the server.
    #[error("unexpected response from server ({status}): {message}")]
    Api { status: StatusCode, message: String },

    /// The response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The client-side store failed to read or write.
    #[error("storage error: {0}")]
    Storage(String),
}

impl ApiError {
    /// Classify a transport error from reqwest.
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

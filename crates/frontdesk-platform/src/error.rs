use thiserror::Error;

/// Errors from platform API calls.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("platform request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The platform answered with a non-success status.
    #[error("platform returned status {0}")]
    Status(u16),

    /// The response body could not be decoded as the expected JSON.
    #[error("failed to decode platform response: {0}")]
    Decode(String),
}

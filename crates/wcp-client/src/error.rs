//! Error types for the session client.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by [`crate::SessionClient`].
#[derive(Debug, Error)]
pub enum Error {
    /// The server answered with a non-2xx status.
    ///
    /// The server encodes actionable detail in the response body, so the
    /// `Display` impl surfaces the body verbatim rather than wrapping it.
    #[error("{body}")]
    Auth {
        /// HTTP status returned by the server.
        status: StatusCode,
        /// Raw response body, unmodified.
        body: String,
    },

    /// The request never produced a status: DNS, connect or TLS failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The endpoint URL is invalid.
    #[error("invalid endpoint: {0}")]
    Endpoint(String),

    /// An operation requiring an established session was called before one
    /// existed.
    #[error("no active session: {0}")]
    NoSession(String),
}

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, Error>;

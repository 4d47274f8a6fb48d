//! Error types for the login orchestration.

use thiserror::Error;

/// Errors raised while driving a login or logout.
#[derive(Debug, Error)]
pub enum Error {
    /// A session exchange failed. Carries the client error unwrapped so
    /// server-provided detail reaches the caller verbatim.
    #[error(transparent)]
    Exchange(#[from] wcp_client::Error),

    /// The credential store could not be read or written.
    #[error(transparent)]
    Store(#[from] wcp_kubeconfig::Error),

    /// The CA bundle returned for a guest cluster did not decode.
    #[error("invalid CA bundle for cluster {cluster}: {source}")]
    CaDecode {
        /// The cluster whose CA bundle was malformed.
        cluster: String,
        /// Underlying base64 error.
        #[source]
        source: base64::DecodeError,
    },
}

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for the credential store.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or saving the credential file.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading or writing the file failed.
    #[error("credential file {path}: {source}")]
    Io {
        /// Path of the file involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The persisted structure did not parse.
    #[error("malformed credential file {path}: {source}")]
    Malformed {
        /// Path of the file involved.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_yaml::Error,
    },

    /// In-memory state failed to serialize.
    #[error("serializing credential file: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for the DevRemote client.

use thiserror::Error;

/// Result type alias for DevRemote operations.
pub type Result<T> = std::result::Result<T, DevRemoteError>;

/// Errors that can occur talking to a DevRemote.
#[derive(Error, Debug)]
pub enum DevRemoteError {
    /// IO error while reading the firmware file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

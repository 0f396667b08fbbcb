//! Error types for the Lunix channel library.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when addressing or opening sensor channels.
#[derive(Error, Debug)]
pub enum Error {
    /// Unknown metric name.
    #[error("Invalid metric: {0}")]
    InvalidMetric(String),

    /// Channel device node could not be opened.
    #[error("Channel {path} unavailable: {source}")]
    ChannelUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Channel I/O error.
    #[error("Channel I/O error: {0}")]
    Io(#[from] std::io::Error),
}

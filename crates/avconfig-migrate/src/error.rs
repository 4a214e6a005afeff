//! Error types for avconfig-migrate.

use thiserror::Error;

/// Result type alias for migration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while migrating.
///
/// Read-path variants (`SourceConnection`, `Authentication`, `RateLimit`,
/// `Extraction`) are logged and tolerated by the fetch step. Write-path
/// variants (`Serialization`, `Request`, `Transport`, `Rejected`) abort the
/// run.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid or incomplete configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The legacy store could not be reached or answered with an error.
    #[error("Source connection error: {0}")]
    SourceConnection(String),

    /// The legacy store rejected our credentials.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The legacy store is rate limiting us.
    #[error("Rate limited, retry after {0}s")]
    RateLimit(u64),

    /// A legacy payload could not be decoded.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// A destination document could not be serialized.
    #[error("Cannot serialize {collection} document '{id}': {reason}")]
    Serialization {
        /// Target collection.
        collection: String,
        /// Document ID.
        id: String,
        /// Underlying serializer message.
        reason: String,
    },

    /// The destination request could not be built (bad URL, bad ID).
    #[error("Error making request: {0}")]
    Request(String),

    /// The destination request failed on the wire.
    #[error("Error doing request: {0}")]
    Transport(String),

    /// The destination answered with a non-success status.
    #[error("Destination rejected {url} with status {status}: {body}")]
    Rejected {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML configuration parse error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parse error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error comes from the write path and must stop the run.
    #[must_use]
    pub fn is_write_failure(&self) -> bool {
        matches!(
            self,
            Self::Serialization { .. } | Self::Request(_) | Self::Transport(_) | Self::Rejected { .. }
        )
    }
}

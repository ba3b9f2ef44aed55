//! Error types for session loading

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for session registry operations
#[derive(Error, Debug)]
pub enum SessionError {
    /// The backing resource could not be located or opened
    #[error("Resource not found: {}", path.display())]
    ResourceNotFound {
        /// Path that was looked up
        path: PathBuf,
        /// Underlying open failure
        #[source]
        source: io::Error,
    },

    /// The resource was opened but could not be read
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// Path being read, empty for anonymous readers
        path: PathBuf,
        /// Underlying read failure
        #[source]
        source: io::Error,
    },

    /// Bytes were present but did not decode into the session shape
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A registry key disagrees with the `id` stored in its record
    #[error("Key mismatch: entry {key:?} holds session {id:?}")]
    KeyMismatch {
        /// Key in the JSON object
        key: String,
        /// `id` field of the record under that key
        id: String,
    },
}

impl SessionError {
    /// Whether this error means the resource was missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SessionError::ResourceNotFound { .. })
    }

    /// Whether this error came from decoding.
    pub fn is_decode(&self) -> bool {
        matches!(self, SessionError::Decode(_))
    }
}

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, SessionError>;

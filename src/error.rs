//! Error types for the ticket store
//!
//! All modules use `TicketStoreResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for ticket store operations
pub type TicketStoreResult<T> = Result<T, TicketStoreError>;

/// All errors that can occur in the ticket store
#[derive(Error, Debug)]
pub enum TicketStoreError {
    // Ticket errors
    #[error("Malformed ticket ({len} bytes): {reason}")]
    MalformedTicket { len: usize, reason: &'static str },

    #[error("{field} is {len} bytes, longer than the 65535 byte limit")]
    KeyTooLong { field: &'static str, len: usize },

    #[error("Failed to allocate {bytes} bytes for ticket record")]
    AllocationFailure { bytes: usize },

    // Codec errors
    #[error("Truncated ticket record at offset {offset}: needed {needed} bytes, {available} available")]
    TruncatedRecord {
        offset: usize,
        needed: usize,
        available: usize,
    },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("{0}")]
    User(String),
}

impl TicketStoreError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Check if the error is a missing file or directory
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::TruncatedRecord { .. } => {
                Some("The ticket file is damaged. Remove it to start with an empty cache")
            }
            Self::ConfigInvalid { .. } => Some("Run: ticket-store config show"),
            Self::Io { .. } if self.is_not_found() => {
                Some("Check the --file path, or import a ticket to create it")
            }
            _ => None,
        }
    }
}

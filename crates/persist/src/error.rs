//! Persistence error types

use std::io;
use thiserror::Error;

/// Result type for persistence operations
pub type Result<T> = std::result::Result<T, PersistError>;

/// Errors raised while resolving writers or persisting records
#[derive(Debug, Error)]
pub enum PersistError {
    /// The directory resolver could not produce a target directory
    #[error("failed to resolve directory for category '{category}': {source}")]
    DirResolve {
        /// Normalized category key
        category: String,
        #[source]
        source: io::Error,
    },

    /// Constructing the category's writer failed
    #[error("failed to open writer for category '{category}': {source}")]
    WriterInit {
        /// Normalized category key
        category: String,
        #[source]
        source: io::Error,
    },

    /// A structured payload could not be encoded to text
    #[error("failed to serialize structured payload: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A filesystem write or rotation failed
    #[error("write failed: {0}")]
    Write(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PersistError::DirResolve {
            category: "orders".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "no mapping"),
        };
        assert!(err.to_string().contains("orders"));

        let err = PersistError::Write(io::Error::new(io::ErrorKind::WriteZero, "disk full"));
        assert!(err.to_string().contains("write failed"));
    }
}

//! Domain error taxonomy for record store operations.
//!
//! `NotFound`-style lookup failures are the only domain errors. They are
//! deterministic "does not exist" conditions: surfaced synchronously to the
//! caller, never retried. Each variant carries the identifier or name that
//! failed to resolve so the facade can render a structured response.

use scribe_core::MessageId;
use thiserror::Error;

/// Errors returned by [`RecordStore`](super::RecordStore) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No message exists with the given identifier.
    #[error("no message exists with id {id}")]
    MessageNotFound {
        /// The identifier that failed to resolve.
        id: MessageId,
    },

    /// No author exists with the given name.
    #[error("no author exists with name {name}")]
    AuthorNotFound {
        /// The name that failed to resolve.
        name: String,
    },

    /// The author exists but has no recorded messages.
    #[error("no messages exist for author with name {name}")]
    NoMessagesForAuthor {
        /// The author name whose index entry is missing or empty.
        name: String,
    },
}

impl StoreError {
    /// Stable machine-readable kind string for response bodies and metric labels.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MessageNotFound { .. } => "messageNotFound",
            Self::AuthorNotFound { .. } => "authorNotFound",
            Self::NoMessagesForAuthor { .. } => "noMessagesForAuthor",
        }
    }

    /// The identifier or name that failed to resolve.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::MessageNotFound { id } => &id.0,
            Self::AuthorNotFound { name } | Self::NoMessagesForAuthor { name } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_the_offending_key() {
        let err = StoreError::MessageNotFound {
            id: MessageId("00ff".to_string()),
        };
        assert_eq!(err.to_string(), "no message exists with id 00ff");

        let err = StoreError::AuthorNotFound {
            name: "Trent".to_string(),
        };
        assert_eq!(err.to_string(), "no author exists with name Trent");
    }

    #[test]
    fn kind_and_key_are_structured() {
        let err = StoreError::NoMessagesForAuthor {
            name: "Ada".to_string(),
        };
        assert_eq!(err.kind(), "noMessagesForAuthor");
        assert_eq!(err.key(), "Ada");
    }
}

use crate::id::Id;

/// Domain error taxonomy. Each kind is a distinct variant so callers (and
/// the HTTP boundary) dispatch on the kind, never on message contents.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A reservation failed entity validation; `field` names the first
    /// offending field in the fixed check order.
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("no reservation found with id \"{0}\"")]
    NotFound(Id),

    #[error("reservation already exists with id \"{0}\"")]
    AlreadyExists(Id),

    /// A remote call could not be made at all (transport-level failure).
    #[error("trip service request failed: {0}")]
    Request(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Unclassified fallback for collaborator failures (database driver,
    /// non-success remote statuses, ...).
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl Error {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }
}

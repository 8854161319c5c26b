//! Error types for the record stores
//!
//! Workflows and the spam sweep return [`StoreError`] unchanged, so callers
//! can tell a malformed input from a missing record or a cancelled call.

use callguard_model::ValidationError;
use std::fmt::{self, Display, Formatter};

/// Which store a key belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// User store
    User,
    /// Phone book store
    PhoneBook,
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::PhoneBook => write!(f, "phone book"),
        }
    }
}

/// Store operation failures
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// Record failed shape validation; never retried
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No record for the key
    #[error("{kind} not found: {key}")]
    NotFound {
        /// Store that was queried
        kind: RecordKind,
        /// Requested key
        key: String,
    },

    /// Record key empty after validation
    #[error("{0} key is empty")]
    EmptyKey(RecordKind),

    /// Cancellation signal observed
    #[error("operation cancelled")]
    Cancelled,

    /// Any other backend failure
    #[error("store error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Create not-found error
    #[inline]
    pub fn not_found(kind: RecordKind, key: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            key: key.into(),
        }
    }

    /// Create backend error
    #[inline]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }

    /// Check if key was absent
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if input was malformed
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if the call observed cancellation
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

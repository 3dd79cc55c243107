//! Error types for managed object operations

use thiserror::Error;

/// Errors raised by a [`crate::UcscSession`] implementation.
///
/// These are opaque to the feature crates: whatever the session raises during
/// a query or commit propagates to the caller untranslated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("object already exists at '{dn}'")]
    AlreadyExists { dn: String },

    #[error("no object at '{dn}'")]
    NoSuchObject { dn: String },

    #[error("transport failure: {message}")]
    Transport { message: String },

    #[error("remote validation failed: {message}")]
    Validation { message: String },
}

/// Main error type for the configuration operations.
#[derive(Debug, Error)]
pub enum UcscError {
    /// A modify, delete or cascading create targeted a DN that does not
    /// resolve to an existing object.
    #[error("{operation}: {message}")]
    NotFound {
        operation: &'static str,
        message: String,
    },

    /// A locally validated enumeration was given an unrecognized value.
    #[error("{operation}: {message}")]
    InvalidArgument {
        operation: &'static str,
        message: String,
    },

    /// A compound existence check found the parent object but a mandatory
    /// child sub-object was absent.
    #[error("{operation}: {message}")]
    Inconsistent {
        operation: &'static str,
        message: String,
    },

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl UcscError {
    pub fn not_found(operation: &'static str, message: impl Into<String>) -> Self {
        UcscError::NotFound {
            operation,
            message: message.into(),
        }
    }

    pub fn invalid_argument(operation: &'static str, message: impl Into<String>) -> Self {
        UcscError::InvalidArgument {
            operation,
            message: message.into(),
        }
    }

    pub fn inconsistent(operation: &'static str, message: impl Into<String>) -> Self {
        UcscError::Inconsistent {
            operation,
            message: message.into(),
        }
    }
}

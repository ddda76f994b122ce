//! Unified error type for the shell-facing boundary.
//!
//! The embedding shell needs one error type and stable numeric codes:
//! - `2`: invalid input (malformed collection report, bad arguments)
//! - `3`: navigation failure (unknown child, index out of range) — report
//!   and stay in the session
//! - `10`: internal fault (collector handed over an ancestry this system
//!   does not understand)

use std::fmt;

use thiserror::Error;

use pluck_core::error::TreeError;

/// Numeric error codes exposed to the embedding shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorCode {
    /// Malformed input from the caller.
    InvalidInput = 2,
    /// Recoverable navigation failure.
    NavigationError = 3,
    /// Bug or collector inconsistency.
    InternalError = 10,
}

impl ErrorCode {
    /// The numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Unified error type for session and ingestion operations.
#[derive(Debug, Error)]
pub enum PluckError {
    /// The collection report could not be parsed.
    #[error("invalid collection report: {message}")]
    InvalidReport { message: String },

    /// A core tree error, bridged unchanged.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// Internal error (bug or unexpected state).
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl PluckError {
    /// Create an invalid-report error.
    pub fn invalid_report(message: impl Into<String>) -> Self {
        PluckError::InvalidReport {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        PluckError::Internal {
            message: message.into(),
        }
    }

    /// The numeric code for this error.
    pub fn error_code(&self) -> ErrorCode {
        ErrorCode::from(self)
    }

    /// True for failures the shell should report without leaving the
    /// session.
    pub fn is_recoverable(&self) -> bool {
        match self {
            PluckError::Tree(err) => err.is_recoverable(),
            _ => false,
        }
    }
}

impl From<&PluckError> for ErrorCode {
    fn from(err: &PluckError) -> Self {
        match err {
            PluckError::InvalidReport { .. } => ErrorCode::InvalidInput,
            PluckError::Tree(tree_err) => match tree_err {
                TreeError::NotFound { .. } | TreeError::IndexOutOfRange { .. } => {
                    ErrorCode::NavigationError
                }
                TreeError::InvalidIdentifier { .. } => ErrorCode::InvalidInput,
                TreeError::UnrecognizedAncestor { .. } => ErrorCode::InternalError,
            },
            PluckError::Internal { .. } => ErrorCode::InternalError,
        }
    }
}

impl From<serde_json::Error> for PluckError {
    fn from(err: serde_json::Error) -> Self {
        PluckError::InvalidReport {
            message: err.to_string(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

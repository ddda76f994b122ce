//! Error types for the path index and tree views.
//!
//! Navigation failures ([`TreeError::NotFound`], [`TreeError::IndexOutOfRange`])
//! are recoverable: the embedding shell reports them and stays in the session.
//! [`TreeError::UnrecognizedAncestor`] is a consistency fault in the
//! collector's output and must never be swallowed.

use thiserror::Error;

use crate::types::TreePath;

/// Result alias for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;

/// Error type for index construction and navigation.
#[derive(Debug, Error)]
pub enum TreeError {
    /// The name resolves neither to a registered child path nor to a usable
    /// parametrization filter key.
    #[error("no child named '{name}' under {path}")]
    NotFound { path: TreePath, name: String },

    /// Integer or range indexing outside the node's item list.
    #[error("index range [{start}, {end}) out of bounds for {len} items at {path}")]
    IndexOutOfRange {
        path: TreePath,
        start: usize,
        end: usize,
        len: usize,
    },

    /// A parametrization value cannot be turned into a usable key.
    ///
    /// Listings drop such values from the filterable key set instead of
    /// failing; this error only surfaces when a caller sanitizes a value
    /// directly.
    #[error("cannot use '{value}' as an identifier: {reason}")]
    InvalidIdentifier { value: String, reason: String },

    /// An ancestry entry has no name and no recognized grouping-only kind.
    ///
    /// The collector produced an ancestry this crate does not understand;
    /// fatal, never silently recovered.
    #[error("item '{item_id}' has an unnamed {kind} ancestor at position {position}")]
    UnrecognizedAncestor {
        item_id: String,
        kind: crate::types::AncestorKind,
        position: usize,
    },
}

impl TreeError {
    /// Create a not-found error.
    pub fn not_found(path: TreePath, name: impl Into<String>) -> Self {
        TreeError::NotFound {
            path,
            name: name.into(),
        }
    }

    /// Create an invalid-identifier error.
    pub fn invalid_identifier(value: impl Into<String>, reason: impl Into<String>) -> Self {
        TreeError::InvalidIdentifier {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// True for failures a navigation session can recover from.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TreeError::NotFound { .. }
                | TreeError::IndexOutOfRange { .. }
                | TreeError::InvalidIdentifier { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

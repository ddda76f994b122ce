//! View handles and selectors.
//!
//! A view is one coordinate in the tree: a path plus optional narrowing (an
//! index range into the path's item list, applied parametrization filter
//! keys). Views live in an arena owned by the tree and are memoized by their
//! full [`Selector`], so repeated navigation to the same logical coordinate
//! returns the identical handle. Handles are never invalidated; they live
//! for the lifetime of the tree.

use std::fmt;

use crate::types::TreePath;

/// Opaque handle to one memoized view in a tree's arena.
///
/// Only minted by [`crate::tree::TestTree`]; a handle is only meaningful to
/// the tree that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(pub(crate) u32);

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view_{}", self.0)
    }
}

/// Full signature of one view: path plus every narrowing applied to it.
///
/// This is the memoization key. Keying on the complete selector (rather
/// than the last navigation step alone) guarantees that two routes to the
/// same coordinate converge on one handle and that differently-filtered
/// views never alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    /// Tree coordinate.
    pub path: TreePath,
    /// Half-open `[start, end)` range into the path's raw item list.
    pub range: Option<(usize, usize)>,
    /// Applied parametrization filter keys, in application order.
    pub filters: Vec<String>,
}

impl Selector {
    /// Unnarrowed selector for a path.
    pub fn at(path: TreePath) -> Self {
        Selector {
            path,
            range: None,
            filters: Vec::new(),
        }
    }

    /// This selector with an index range applied.
    pub fn with_range(&self, start: usize, end: usize) -> Self {
        Selector {
            path: self.path.clone(),
            range: Some((start, end)),
            filters: self.filters.clone(),
        }
    }

    /// This selector with one more filter key applied.
    pub fn with_filter(&self, key: impl Into<String>) -> Self {
        let mut filters = self.filters.clone();
        filters.push(key.into());
        Selector {
            path: self.path.clone(),
            range: self.range,
            filters,
        }
    }

    /// Selector for a different path, carrying the filters along but
    /// dropping any index range (ranges are relative to one path's list).
    pub fn rebased(&self, path: TreePath) -> Self {
        Selector {
            path,
            range: None,
            filters: self.filters.clone(),
        }
    }
}

/// One navigation key, as the shell hands it over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavKey {
    /// Child segment, parametrization filter key, or the reserved `parent`.
    Name(String),
    /// Single position in the item list.
    Index(usize),
    /// Half-open `[start, end)` range in the item list.
    Range(usize, usize),
}

impl NavKey {
    /// Convenience constructor for name keys.
    pub fn name(name: impl Into<String>) -> Self {
        NavKey::Name(name.into())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_with_same_narrowing_are_equal() {
        let base = Selector::at(TreePath::root().child("mod"));
        assert_eq!(base.with_filter("fast"), base.with_filter("fast"));
        assert_ne!(base.with_filter("fast"), base.with_filter("slow"));
        assert_ne!(base.with_range(0, 1), base.with_range(0, 2));
    }

    #[test]
    fn rebase_keeps_filters_and_drops_range() {
        let narrowed = Selector::at(TreePath::root())
            .with_filter("fast")
            .with_range(0, 3);
        let moved = narrowed.rebased(TreePath::root().child("mod"));
        assert_eq!(moved.filters, vec!["fast".to_string()]);
        assert_eq!(moved.range, None);
    }
}

//! Shell-facing interactive session.
//!
//! The external shell embeds an [`InteractiveSession`]: it navigates through
//! view handles, reads the live selection count for its prompt, and finally
//! consumes the session into the ordered run-list. The session enforces the
//! boundary rule: a session ending with an empty selection runs nothing —
//! the original item list is never restored as a fallback.
//!
//! [`modify_items`] is the collector-hook shape of the same flow: pass the
//! items through untouched when interactive mode is off, otherwise hand a
//! session to the supplied driver and apply the finalize rule.

use tracing::debug;

use pluck_core::tree::TestTree;
use pluck_core::types::CollectedItem;
use pluck_core::view::{NavKey, ViewId};

use crate::collect::CollectionReport;
use crate::error::PluckError;

/// One interactive selection session over a collected item list.
#[derive(Debug)]
pub struct InteractiveSession {
    tree: TestTree,
}

impl InteractiveSession {
    /// Build a session from a flat item list.
    ///
    /// # Errors
    ///
    /// Propagates index-build failures (collector inconsistencies).
    pub fn new(items: Vec<CollectedItem>) -> Result<Self, PluckError> {
        let tree = TestTree::build(items)?;
        debug!(
            items = tree.index().item_count(),
            paths = tree.index().path_count(),
            "interactive session opened"
        );
        Ok(InteractiveSession { tree })
    }

    /// Build a session from a parsed collection report.
    pub fn from_report(report: CollectionReport) -> Result<Self, PluckError> {
        InteractiveSession::new(report.into_items())
    }

    /// The underlying tree, for read access.
    pub fn tree(&self) -> &TestTree {
        &self.tree
    }

    /// Handle of the root view.
    pub fn root(&self) -> ViewId {
        self.tree.root()
    }

    /// Live selection count, read continuously by the shell prompt.
    pub fn selection_len(&self) -> usize {
        self.tree.selection().len()
    }

    /// Resolve a name against a view (filter key, `parent`, or child
    /// segment).
    pub fn resolve(&mut self, view: ViewId, name: &str) -> Result<ViewId, PluckError> {
        Ok(self.tree.resolve(view, name)?)
    }

    /// Narrow a view to one item position.
    pub fn index_into(&mut self, view: ViewId, i: usize) -> Result<ViewId, PluckError> {
        Ok(self.tree.index_into(view, i)?)
    }

    /// Narrow a view to a half-open item range.
    pub fn slice(&mut self, view: ViewId, start: usize, end: usize) -> Result<ViewId, PluckError> {
        Ok(self.tree.slice(view, start, end)?)
    }

    /// Invoke a view, accumulating its effective items into the selection.
    pub fn invoke(&mut self, view: ViewId, key: Option<NavKey>) -> Result<ViewId, PluckError> {
        Ok(self.tree.invoke(view, key)?)
    }

    /// Remove a view's effective items from the selection.
    pub fn deselect(&mut self, view: ViewId) {
        self.tree.deselect(view);
    }

    /// Child names usable from a view (the tab-completion surface).
    pub fn list_children(&self, view: ViewId) -> Vec<String> {
        self.tree.list_children(view)
    }

    /// One-line description of a view.
    pub fn describe(&self, view: ViewId) -> String {
        self.tree.describe(view)
    }

    /// Consume the session into the final ordered run-list.
    ///
    /// An empty selection — whether the user deliberately selected nothing
    /// or never invoked a node — yields an empty run-list.
    pub fn finalize(self) -> Vec<CollectedItem> {
        let decided = self.tree.decided();
        let run_list = self.tree.run_list();
        debug!(
            decided,
            selected = run_list.len(),
            "interactive session finalized"
        );
        run_list
    }
}

/// Collector hook: filter the collected items through an interactive
/// session.
///
/// When `interactive` is off (or there is nothing to select from) the items
/// pass through untouched. Otherwise `drive` runs against a fresh session —
/// it stands in for the external shell — and the session's finalize rule
/// decides the result.
pub fn modify_items<F>(
    items: Vec<CollectedItem>,
    interactive: bool,
    drive: F,
) -> Result<Vec<CollectedItem>, PluckError>
where
    F: FnOnce(&mut InteractiveSession) -> Result<(), PluckError>,
{
    if !interactive || items.is_empty() {
        return Ok(items);
    }
    let mut session = InteractiveSession::new(items)?;
    drive(&mut session)?;
    Ok(session.finalize())
}

// ============================================================================
// Tests
// ============================================================================

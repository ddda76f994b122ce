//! Plain-text tree listing.
//!
//! Renders a view's effective items as an indented tree, one line per
//! newly-entered ancestor, with leaf lines carrying their position index in
//! the view's item order. The shell prints this when the user asks where
//! they are; the indices line up with integer indexing on the same view.
//!
//! Pure string rendering; terminal concerns stay in the shell.

use std::fmt::Write;

use pluck_core::builder::walk_item;
use pluck_core::tree::TestTree;
use pluck_core::types::TreePath;
use pluck_core::view::ViewId;

use crate::error::PluckError;

/// Render the indented listing of a view's effective items.
///
/// # Errors
///
/// Propagates walk failures; items that survived the index build cannot
/// fail the walk, so this only surfaces collector inconsistencies.
pub fn render_listing(tree: &TestTree, view: ViewId) -> Result<String, PluckError> {
    let items = tree.items(view);
    if items.is_empty() {
        return Ok("no items to display\n".to_string());
    }
    let width = items.len().to_string().len();
    let mut out = String::new();
    let mut stack: Vec<TreePath> = Vec::new();

    for (i, idx) in items.iter().enumerate() {
        let item = tree.index().item(*idx);
        let chain: Vec<TreePath> = walk_item(item)?
            .into_iter()
            .map(|step| step.path)
            .filter(|path| !path.is_root())
            .collect();

        // Unwind to the deepest ancestor shared with the previous item.
        while !stack.is_empty() {
            let depth = stack.len();
            if depth <= chain.len() && stack[..] == chain[..depth] {
                break;
            }
            stack.pop();
        }

        for path in &chain[stack.len()..] {
            stack.push(path.clone());
            let indent = "  ".repeat(stack.len() - 1);
            let name = path.last().unwrap_or_default();
            if Some(path) == chain.last() {
                let _ = writeln!(out, "{:>width$} {}{}", i, indent, name);
            } else {
                let _ = writeln!(out, "{} {}{}", " ".repeat(width), indent, name);
            }
        }
    }
    Ok(out)
}

// ============================================================================
// Tests
// ============================================================================

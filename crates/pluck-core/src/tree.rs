//! Test tree: navigable views over the path index plus the running
//! selection.
//!
//! [`TestTree`] owns the built [`PathIndex`], the view arena with its
//! memoization map, and the [`SelectionSet`]. Navigation operations take and
//! return [`ViewId`] handles; every operation that narrows or moves a view
//! goes through the memo map, so identical coordinates always resolve to the
//! identical handle.
//!
//! Name resolution precedence is a fixed policy, not incidental fallback
//! ordering: parametrization filter keys are checked first, then the
//! reserved `parent` key, then structural child segments.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::{TreeError, TreeResult};
use crate::index::PathIndex;
use crate::selection::SelectionSet;
use crate::text::to_symbol;
use crate::types::{CollectedItem, ItemIdx, TreePath};
use crate::view::{NavKey, Selector, ViewId};

/// Reserved name key returning the view one path segment shorter.
pub const PARENT_KEY: &str = "parent";

/// A tree of all collected tests.
#[derive(Debug)]
pub struct TestTree {
    index: PathIndex,
    views: Vec<Selector>,
    memo: HashMap<Selector, ViewId>,
    selection: SelectionSet,
    /// Set once any invoke lands; distinguishes "decided to run nothing"
    /// from "never decided".
    decided: bool,
    root: ViewId,
}

impl TestTree {
    /// Build the index from a flat item collection and open the root view.
    pub fn build(items: Vec<CollectedItem>) -> TreeResult<Self> {
        let index = PathIndex::build(items)?;
        let mut tree = TestTree {
            index,
            views: Vec::new(),
            memo: HashMap::new(),
            selection: SelectionSet::new(),
            decided: false,
            root: ViewId(0),
        };
        tree.root = tree.intern(Selector::at(TreePath::root()));
        Ok(tree)
    }

    /// Handle of the root view.
    pub fn root(&self) -> ViewId {
        self.root
    }

    /// The underlying index.
    pub fn index(&self) -> &PathIndex {
        &self.index
    }

    /// The running selection.
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// True once any invoke has landed, even one selecting zero items.
    pub fn decided(&self) -> bool {
        self.decided
    }

    /// Selector behind a view handle.
    pub fn selector(&self, view: ViewId) -> &Selector {
        &self.views[view.0 as usize]
    }

    /// Path of a view.
    pub fn path(&self, view: ViewId) -> &TreePath {
        &self.selector(view).path
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Resolve a name against a view.
    ///
    /// Precedence: parametrization filter keys, then [`PARENT_KEY`], then
    /// structural child segments.
    ///
    /// # Errors
    ///
    /// [`TreeError::NotFound`] when the name matches none of the three
    /// domains. The failure leaves the tree untouched.
    pub fn resolve(&mut self, view: ViewId, name: &str) -> TreeResult<ViewId> {
        let selector = self.selector(view).clone();

        if self.param_keys(view).iter().any(|k| k == name) {
            return Ok(self.intern(selector.with_filter(name)));
        }
        if name == PARENT_KEY {
            if selector.path.is_root() {
                return Err(TreeError::not_found(selector.path, name));
            }
            return Ok(self.intern(selector.rebased(selector.path.parent())));
        }
        let child = selector.path.child(name);
        if !self.index.contains(&child) {
            return Err(TreeError::not_found(selector.path, name));
        }
        Ok(self.intern(selector.rebased(child)))
    }

    /// Narrow a view to the single item at position `i` of its raw item
    /// list.
    pub fn index_into(&mut self, view: ViewId, i: usize) -> TreeResult<ViewId> {
        self.slice(view, i, i + 1)
    }

    /// Narrow a view to the half-open range `[start, end)` of its raw item
    /// list.
    pub fn slice(&mut self, view: ViewId, start: usize, end: usize) -> TreeResult<ViewId> {
        let selector = self.selector(view).clone();
        let len = self.index.items_at(&selector.path).len();
        if start > end || end > len {
            return Err(TreeError::IndexOutOfRange {
                path: selector.path,
                start,
                end,
                len,
            });
        }
        Ok(self.intern(selector.with_range(start, end)))
    }

    /// Effective item subset of a view: the path's posting list, sliced by
    /// the view's range, then intersection-filtered by every applied
    /// parametrization key.
    pub fn items(&self, view: ViewId) -> Vec<ItemIdx> {
        let selector = self.selector(view);
        let raw = self.index.items_at(&selector.path);
        let sliced = match selector.range {
            // Ranges are validated at view creation; clamp anyway so a
            // stale handle cannot panic.
            Some((start, end)) => &raw[start.min(raw.len())..end.min(raw.len())],
            None => raw,
        };
        if selector.filters.is_empty() {
            return sliced.to_vec();
        }
        sliced
            .iter()
            .copied()
            .filter(|&idx| self.matches_filters(idx, &selector.filters))
            .collect()
    }

    /// Child names usable from a view: sorted structural child segments
    /// (pruned, under filters, to children whose items intersect the
    /// effective set) followed by the usable parametrization-value keys.
    ///
    /// This is the tab-completion surface of the embedding shell.
    pub fn list_children(&self, view: ViewId) -> Vec<String> {
        let selector = self.selector(view);
        let effective = self.items(view);
        let mut names: Vec<String> = self
            .index
            .children_of(&selector.path)
            .filter(|&child| {
                selector.filters.is_empty()
                    || self
                        .index
                        .items_at(child)
                        .iter()
                        .any(|idx| effective.contains(idx))
            })
            .filter_map(|child| child.last().map(str::to_string))
            .collect();
        names.extend(self.param_keys(view));
        names
    }

    /// One-line description of a view, for shell prompts and listings.
    pub fn describe(&self, view: ViewId) -> String {
        let selector = self.selector(view);
        let count = self.items(view).len();
        let (type_name, name) = match self.index.node_at(&selector.path) {
            Ok(node) => (
                node.type_name(),
                node.name()
                    .map(str::to_string)
                    .unwrap_or_else(|| selector.path.last().unwrap_or_default().to_string()),
            ),
            Err(_) => ("View", selector.path.to_string()),
        };
        format!("<{} '{}' -> {} tests>", type_name, name, count)
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Invoke a view: optionally narrow by a key, then add the resulting
    /// effective item set to the selection.
    ///
    /// Returns the invoked view. This is the end-of-navigation signal: once
    /// any invoke lands the session counts as decided, even when it selected
    /// nothing.
    pub fn invoke(&mut self, view: ViewId, key: Option<NavKey>) -> TreeResult<ViewId> {
        let target = match key {
            None => view,
            Some(NavKey::Name(name)) => self.resolve(view, &name)?,
            Some(NavKey::Index(i)) => self.index_into(view, i)?,
            Some(NavKey::Range(start, end)) => self.slice(view, start, end)?,
        };
        let items = self.items(target);
        for idx in &items {
            let id = self.index.item(*idx).id.clone();
            self.selection.insert(&id, *idx);
        }
        self.decided = true;
        debug!(
            view = %target,
            added = items.len(),
            selected = self.selection.len(),
            "selection updated"
        );
        Ok(target)
    }

    /// Remove a view's effective items from the selection.
    pub fn deselect(&mut self, view: ViewId) {
        for idx in self.items(view) {
            let id = self.index.item(idx).id.clone();
            self.selection.remove(&id);
        }
    }

    /// Drop the whole selection. The decided flag is untouched.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// The selected items in selection order, cloned out for the runner.
    pub fn run_list(&self) -> Vec<CollectedItem> {
        self.selection
            .items()
            .map(|idx| self.index.item(idx).clone())
            .collect()
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Memoized view creation.
    fn intern(&mut self, selector: Selector) -> ViewId {
        if let Some(&id) = self.memo.get(&selector) {
            return id;
        }
        let id = ViewId(self.views.len() as u32);
        self.views.push(selector.clone());
        self.memo.insert(selector, id);
        id
    }

    /// True when the item's parametrization record matches every filter key.
    fn matches_filters(&self, idx: ItemIdx, filters: &[String]) -> bool {
        let Some(params) = &self.index.item(idx).params else {
            return false;
        };
        filters.iter().all(|key| {
            params
                .values
                .values()
                .any(|value| matches!(to_symbol(value), Ok(symbol) if &symbol == key))
        })
    }

    /// Sanitized parametrization-value keys seen across a view's effective
    /// items, minus the keys already applied. Values that cannot become
    /// identifiers are dropped.
    fn param_keys(&self, view: ViewId) -> Vec<String> {
        let selector = self.selector(view);
        let mut keys = Vec::new();
        for idx in self.items(view) {
            let Some(params) = &self.index.item(idx).params else {
                continue;
            };
            for value in params.values.values() {
                match to_symbol(value) {
                    Ok(symbol) => {
                        if !selector.filters.contains(&symbol) && !keys.contains(&symbol) {
                            keys.push(symbol);
                        }
                    }
                    Err(err) => {
                        warn!(item = %self.index.item(idx).id, %err, "dropping unusable filter key");
                    }
                }
            }
        }
        keys
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Selection set: the running accumulation of chosen items.
//!
//! Keyed by item identifier, ordered by first insertion. Re-adding an
//! already-selected item is a no-op, so repeated navigation calls cannot
//! inflate the run-list. Consumed once at the end of the session to produce
//! the ordered list of items to run.

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::types::ItemIdx;

/// Ordered, duplicate-free accumulation of chosen items.
#[derive(Debug, Default)]
pub struct SelectionSet {
    chosen: IndexMap<String, ItemIdx>,
}

impl SelectionSet {
    /// Create an empty selection.
    pub fn new() -> Self {
        SelectionSet::default()
    }

    /// Add one item. Returns `true` when the item was not selected before.
    pub fn insert(&mut self, id: &str, item: ItemIdx) -> bool {
        match self.chosen.entry(id.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(item);
                true
            }
        }
    }

    /// Remove one item by identifier. No-op when absent; preserves the
    /// insertion order of the remaining items.
    pub fn remove(&mut self, id: &str) -> bool {
        self.chosen.shift_remove(id).is_some()
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.chosen.clear();
    }

    /// Number of selected items.
    pub fn len(&self) -> usize {
        self.chosen.len()
    }

    /// True when nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.chosen.is_empty()
    }

    /// True when the identifier is selected.
    pub fn contains(&self, id: &str) -> bool {
        self.chosen.contains_key(id)
    }

    /// Selected item identifiers, in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.chosen.keys().map(String::as_str)
    }

    /// Selected items, in insertion order.
    pub fn items(&self) -> impl Iterator<Item = ItemIdx> + '_ {
        self.chosen.values().copied()
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Collection report ingestion.
//!
//! The external collector serializes its finished flat item list as a JSON
//! report. This module owns the report schema and its parsing; everything
//! downstream works with [`CollectedItem`] values.
//!
//! Report shape:
//!
//! ```json
//! {
//!   "items": [
//!     {
//!       "id": "pkg/mod.py::TestA::test_x",
//!       "ancestry": [
//!         { "name": null, "kind": "root" },
//!         { "name": "pkg.mod", "kind": "module", "fs_path": "pkg/mod.py" },
//!         { "name": "TestA", "kind": "class" },
//!         { "name": null, "kind": "instance" },
//!         { "name": "test_x", "kind": "function" }
//!       ],
//!       "params": null
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use pluck_core::types::CollectedItem;

use crate::error::PluckError;

/// The collector's finished flat item list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionReport {
    /// Collected items, in collection order.
    pub items: Vec<CollectedItem>,
}

impl CollectionReport {
    /// Wrap an already-deserialized item list.
    pub fn new(items: Vec<CollectedItem>) -> Self {
        CollectionReport { items }
    }

    /// Parse a report from a JSON string.
    ///
    /// # Errors
    ///
    /// [`PluckError::InvalidReport`] on malformed JSON or a report that does
    /// not match the schema.
    pub fn from_json_str(json: &str) -> Result<Self, PluckError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a report from a reader.
    pub fn from_reader(reader: impl std::io::Read) -> Result<Self, PluckError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Number of items in the report.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the collector found nothing.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consume the report into its item list.
    pub fn into_items(self) -> Vec<CollectedItem> {
        self.items
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Data model shared across the builder, index, and view modules.
//!
//! This module contains the types that describe one collected test item and
//! the tree coordinates derived from it:
//! - [`TreePath`]: ordered sequence of symbolic segments identifying a node
//! - [`ItemIdx`]: postings-list index into the flat item list
//! - [`CollectedItem`]: one leaf test unit as handed over by the collector
//! - [`Ancestor`] / [`AncestorKind`]: one entry of an item's ancestry chain
//! - [`TreeNode`]: the node object registered at a path
//! - [`VariantGroup`]: all instantiations of one parametrized function

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Segment name of the root path sentinel.
pub const ROOT_SEGMENT: &str = ".";

// ============================================================================
// TreePath
// ============================================================================

/// Ordered, immutable sequence of symbolic name segments.
///
/// Paths are the only identity key into the index: two items sharing a path
/// are members of the same node's item set. The root path is the
/// single-segment sentinel `(".")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TreePath(Vec<String>);

impl TreePath {
    /// The root path `(".")`.
    pub fn root() -> Self {
        TreePath(vec![ROOT_SEGMENT.to_string()])
    }

    /// The empty path. Only useful as the parent key of the root path in the
    /// children map; never registered as a node itself.
    pub fn empty() -> Self {
        TreePath(Vec::new())
    }

    /// Extend this path by one segment.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        TreePath(segments)
    }

    /// The path one segment shorter. The parent of the root path is the
    /// empty path.
    pub fn parent(&self) -> Self {
        let mut segments = self.0.clone();
        segments.pop();
        TreePath(segments)
    }

    /// Last segment, if any.
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the empty path.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True for the single-segment root sentinel.
    pub fn is_root(&self) -> bool {
        self.0.len() == 1 && self.0[0] == ROOT_SEGMENT
    }

    /// Segments in order.
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "<empty>");
        }
        write!(f, "{}", self.0.join("/"))
    }
}

impl<S: Into<String>> FromIterator<S> for TreePath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        TreePath(iter.into_iter().map(Into::into).collect())
    }
}

// ============================================================================
// ItemIdx
// ============================================================================

/// Index of one item within the flat collected item list.
///
/// Postings lists in the index store these instead of item ids so that the
/// original collection order is a plain integer comparison away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemIdx(pub u32);

impl ItemIdx {
    /// Create a new item index.
    pub fn new(idx: u32) -> Self {
        ItemIdx(idx)
    }

    /// The index as a usize, for slicing into the item list.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ItemIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item_{}", self.0)
    }
}

// ============================================================================
// Ancestry
// ============================================================================

/// Kind tag for one ancestry entry, determined by the external collector.
///
/// A closed enumeration: the collector classifies every ancestor once, so the
/// tree build never probes node objects to decide how to treat them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AncestorKind {
    /// The collection root (session).
    Root,
    /// A package collector.
    Package,
    /// A module. A dotted display name explodes into package segments.
    Module,
    /// A test class.
    Class,
    /// A synthetic class-instance wrapper that exists only to hold test
    /// methods. Unnamed instances contribute no path segment.
    Instance,
    /// A test function.
    Function,
}

impl fmt::Display for AncestorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AncestorKind::Root => "root",
            AncestorKind::Package => "package",
            AncestorKind::Module => "module",
            AncestorKind::Class => "class",
            AncestorKind::Instance => "instance",
            AncestorKind::Function => "function",
        };
        write!(f, "{}", name)
    }
}

/// One entry of an item's root-to-leaf ancestry chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ancestor {
    /// Display name, or `None` for the root and for grouping-only wrappers.
    pub name: Option<String>,
    /// Kind tag assigned by the collector.
    pub kind: AncestorKind,
    /// Filesystem location of the underlying source, when the collector
    /// knows one. Consulted when a dotted module name is exploded into
    /// package segments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fs_path: Option<String>,
}

impl Ancestor {
    /// A named ancestor.
    pub fn named(kind: AncestorKind, name: impl Into<String>) -> Self {
        Ancestor {
            name: Some(name.into()),
            kind,
            fs_path: None,
        }
    }

    /// An unnamed ancestor (root or grouping-only wrapper).
    pub fn unnamed(kind: AncestorKind) -> Self {
        Ancestor {
            name: None,
            kind,
            fs_path: None,
        }
    }

    /// Attach a filesystem path.
    pub fn with_fs_path(mut self, fs_path: impl Into<String>) -> Self {
        self.fs_path = Some(fs_path.into());
        self
    }
}

// ============================================================================
// Parametrization
// ============================================================================

/// Parametrization record of one item instantiation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamRecord {
    /// Ordered parameter name to runtime value mapping.
    pub values: IndexMap<String, serde_json::Value>,
    /// Unique identifier of this instantiation among its siblings.
    pub variant_id: String,
}

impl ParamRecord {
    /// Create a record from (name, value) pairs and a variant id.
    pub fn new(
        values: impl IntoIterator<Item = (String, serde_json::Value)>,
        variant_id: impl Into<String>,
    ) -> Self {
        ParamRecord {
            values: values.into_iter().collect(),
            variant_id: variant_id.into(),
        }
    }
}

// ============================================================================
// CollectedItem
// ============================================================================

/// One leaf test unit supplied by the external collector.
///
/// The item itself is opaque to this crate: only the stable `id`, the
/// ancestry chain, and the optional parametrization record are consulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectedItem {
    /// Unique stable identifier (the collector's node id).
    pub id: String,
    /// Root-to-leaf ancestry chain.
    pub ancestry: Vec<Ancestor>,
    /// Parametrization record, present for parametrized instantiations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<ParamRecord>,
}

// ============================================================================
// TreeNode
// ============================================================================

/// All instantiations of one parametrized function, collapsed under a single
/// path.
///
/// The group occupies exactly one tree coordinate; its navigable children are
/// its variant leaves, not further structural segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantGroup {
    /// Insertion-ordered variant-id to item mapping.
    variants: IndexMap<String, ItemIdx>,
    /// Path of the structural parent shared by every instantiation.
    parent: TreePath,
}

impl VariantGroup {
    /// Create a group anchored at `parent` with one initial instantiation.
    pub fn new(parent: TreePath, variant_id: impl Into<String>, item: ItemIdx) -> Self {
        let mut variants = IndexMap::new();
        variants.insert(variant_id.into(), item);
        VariantGroup { variants, parent }
    }

    /// Record another instantiation. Re-inserting an already-known variant id
    /// keeps the first item and the original position.
    pub fn insert(&mut self, variant_id: impl Into<String>, item: ItemIdx) {
        self.variants.entry(variant_id.into()).or_insert(item);
    }

    /// Number of recorded instantiations.
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// True when no instantiation has been recorded.
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Item for a variant id.
    pub fn get(&self, variant_id: &str) -> Option<ItemIdx> {
        self.variants.get(variant_id).copied()
    }

    /// Variant ids in insertion order.
    pub fn variant_ids(&self) -> impl Iterator<Item = &str> {
        self.variants.keys().map(String::as_str)
    }

    /// (variant id, item) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ItemIdx)> {
        self.variants.iter().map(|(id, idx)| (id.as_str(), *idx))
    }

    /// Path of the shared structural parent.
    pub fn parent(&self) -> &TreePath {
        &self.parent
    }
}

/// The node object registered at one path.
///
/// Fixed at first sight during the index build and never replaced; the only
/// post-registration mutation is a [`VariantGroup`] absorbing further
/// instantiations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// The collection root.
    Root,
    /// Synthetic intermediate segment for one dotted component of a package
    /// name. Not itself an item.
    Package {
        /// The dotted component this segment stands for.
        name: String,
        /// Filesystem-derived path prefix ending at this component.
        fs_path: String,
    },
    /// A structural collector: module, class, or named instance.
    Collector {
        /// Display name (one path segment).
        name: String,
        /// Collector kind.
        kind: AncestorKind,
    },
    /// A leaf test function (or one parametrized instantiation).
    Leaf {
        /// Display name, including any parametrization suffix.
        name: String,
        /// The item occupying this leaf.
        item: ItemIdx,
    },
    /// A collapsed parametrized function.
    Group(VariantGroup),
}

impl TreeNode {
    /// Short type label, used when describing a view.
    pub fn type_name(&self) -> &'static str {
        match self {
            TreeNode::Root => "Root",
            TreeNode::Package { .. } => "Package",
            TreeNode::Collector { kind, .. } => match kind {
                AncestorKind::Module => "Module",
                AncestorKind::Class => "Class",
                AncestorKind::Instance => "Instance",
                AncestorKind::Package => "Package",
                _ => "Collector",
            },
            TreeNode::Leaf { .. } => "Function",
            TreeNode::Group(_) => "Group",
        }
    }

    /// Display name, if the node carries one.
    pub fn name(&self) -> Option<&str> {
        match self {
            TreeNode::Root => Some(ROOT_SEGMENT),
            TreeNode::Package { name, .. } => Some(name),
            TreeNode::Collector { name, .. } => Some(name),
            TreeNode::Leaf { name, .. } => Some(name),
            TreeNode::Group(_) => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod tree_path {
        use super::*;

        #[test]
        fn root_is_single_sentinel_segment() {
            let root = TreePath::root();
            assert!(root.is_root());
            assert_eq!(root.len(), 1);
            assert_eq!(root.last(), Some("."));
        }

        #[test]
        fn child_extends_by_one_segment() {
            let path = TreePath::root().child("pkg").child("mod");
            assert_eq!(path.len(), 3);
            assert_eq!(path.last(), Some("mod"));
            assert_eq!(path.to_string(), "./pkg/mod");
        }

        #[test]
        fn parent_of_root_is_empty() {
            let parent = TreePath::root().parent();
            assert!(parent.is_empty());
            assert!(!parent.is_root());
        }

        #[test]
        fn paths_with_same_segments_are_equal() {
            let a = TreePath::root().child("pkg");
            let b: TreePath = [".", "pkg"].into_iter().collect();
            assert_eq!(a, b);
        }
    }

    mod variant_group {
        use super::*;

        #[test]
        fn insert_preserves_order_and_first_item() {
            let mut group = VariantGroup::new(TreePath::root(), "v1", ItemIdx::new(0));
            group.insert("v2", ItemIdx::new(1));
            group.insert("v1", ItemIdx::new(9));
            assert_eq!(group.len(), 2);
            assert_eq!(group.get("v1"), Some(ItemIdx::new(0)));
            let ids: Vec<&str> = group.variant_ids().collect();
            assert_eq!(ids, vec!["v1", "v2"]);
        }
    }

    mod ancestor_serde {
        use super::*;

        #[test]
        fn kind_uses_snake_case() {
            let json = serde_json::to_string(&AncestorKind::Function).unwrap();
            assert_eq!(json, "\"function\"");
        }

        #[test]
        fn unnamed_ancestor_roundtrips() {
            let anc = Ancestor::unnamed(AncestorKind::Instance);
            let json = serde_json::to_string(&anc).unwrap();
            let back: Ancestor = serde_json::from_str(&json).unwrap();
            assert_eq!(back, anc);
            assert!(!json.contains("fs_path"));
        }
    }
}

//! Path index: the structural source of truth.
//!
//! [`PathIndex::build`] runs the path builder over every collected item and
//! accumulates three maps:
//! - path → item posting list (append, preserving collection order)
//! - path → set of direct child paths (inserted on first registration)
//! - path → node object (registered once, never replaced)
//!
//! The build is a single linear pass; each item contributes O(depth)
//! entries. After construction the index is read-only.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::builder::{walk_item, NodeSeed, PathStep};
use crate::error::{TreeError, TreeResult};
use crate::types::{CollectedItem, ItemIdx, TreeNode, TreePath, VariantGroup};

/// Immutable path-keyed view over a flat item collection.
#[derive(Debug)]
pub struct PathIndex {
    /// The collection in its original order. Never reordered.
    items: Vec<CollectedItem>,
    /// path → items whose ancestry passes through that path.
    path_items: HashMap<TreePath, Vec<ItemIdx>>,
    /// path → direct one-segment extensions actually produced by items.
    children: HashMap<TreePath, BTreeSet<TreePath>>,
    /// path → node object, fixed at first sight.
    nodes: HashMap<TreePath, TreeNode>,
}

impl PathIndex {
    /// Build the index from a flat item collection.
    ///
    /// # Errors
    ///
    /// Propagates [`TreeError::UnrecognizedAncestor`] from the per-item walk;
    /// a collection this crate cannot map is never silently indexed.
    pub fn build(items: Vec<CollectedItem>) -> TreeResult<Self> {
        let mut path_items: HashMap<TreePath, Vec<ItemIdx>> = HashMap::new();
        let mut children: HashMap<TreePath, BTreeSet<TreePath>> = HashMap::new();
        let mut nodes: HashMap<TreePath, TreeNode> = HashMap::new();

        for (i, item) in items.iter().enumerate() {
            let idx = ItemIdx::new(i as u32);
            for step in walk_item(item)? {
                register(&mut path_items, &mut children, &mut nodes, step, idx);
            }
        }
        debug!(items = items.len(), paths = nodes.len(), "built path index");
        Ok(PathIndex {
            items,
            path_items,
            children,
            nodes,
        })
    }

    /// Items whose ancestry passes through `path`, in collection order.
    /// Empty for unregistered paths.
    pub fn items_at(&self, path: &TreePath) -> &[ItemIdx] {
        self.path_items
            .get(path)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Direct child paths of `path`. Empty for leaves and unregistered paths.
    pub fn children_of(&self, path: &TreePath) -> impl Iterator<Item = &TreePath> {
        self.children.get(path).into_iter().flatten()
    }

    /// Node object registered at `path`.
    ///
    /// # Errors
    ///
    /// [`TreeError::NotFound`] when the path was never registered.
    pub fn node_at(&self, path: &TreePath) -> TreeResult<&TreeNode> {
        self.nodes.get(path).ok_or_else(|| {
            TreeError::not_found(path.parent(), path.last().unwrap_or_default())
        })
    }

    /// True when `path` is registered.
    pub fn contains(&self, path: &TreePath) -> bool {
        self.nodes.contains_key(path)
    }

    /// The item behind a postings-list index.
    pub fn item(&self, idx: ItemIdx) -> &CollectedItem {
        &self.items[idx.index()]
    }

    /// Number of collected items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Number of registered paths.
    pub fn path_count(&self) -> usize {
        self.nodes.len()
    }

    /// The original collection, in order.
    pub fn all_items(&self) -> &[CollectedItem] {
        &self.items
    }
}

/// Merge one builder step for the item at `idx` into the index maps.
///
/// Registration is idempotent: the node object for a path is fixed at first
/// sight, and the only post-registration mutation is a variant group
/// absorbing further instantiations.
fn register(
    path_items: &mut HashMap<TreePath, Vec<ItemIdx>>,
    children: &mut HashMap<TreePath, BTreeSet<TreePath>>,
    nodes: &mut HashMap<TreePath, TreeNode>,
    step: PathStep,
    idx: ItemIdx,
) {
    let PathStep { path, seed } = step;
    path_items.entry(path.clone()).or_default().push(idx);

    match nodes.get_mut(&path) {
        Some(TreeNode::Group(group)) => {
            if let NodeSeed::Variant { variant_id } = seed {
                group.insert(variant_id, idx);
            }
        }
        Some(_) => {
            // First-seen-wins.
        }
        None => {
            let node = match seed {
                NodeSeed::Root => TreeNode::Root,
                NodeSeed::Package { name, fs_path } => TreeNode::Package { name, fs_path },
                NodeSeed::Collector { name, kind } => TreeNode::Collector { name, kind },
                NodeSeed::Leaf { name } => TreeNode::Leaf { name, item: idx },
                NodeSeed::Variant { variant_id } => {
                    TreeNode::Group(VariantGroup::new(path.parent(), variant_id, idx))
                }
            };
            children.entry(path.parent()).or_default().insert(path.clone());
            nodes.insert(path, node);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Ancestor, AncestorKind, ParamRecord};
    use serde_json::json;

    fn func_item(module: &str, class: Option<&str>, func: &str) -> CollectedItem {
        let mut ancestry = vec![
            Ancestor::unnamed(AncestorKind::Root),
            Ancestor::named(AncestorKind::Module, module),
        ];
        let mut id = format!("{}.py::", module);
        if let Some(class) = class {
            ancestry.push(Ancestor::named(AncestorKind::Class, class));
            ancestry.push(Ancestor::unnamed(AncestorKind::Instance));
            id.push_str(class);
            id.push_str("::");
        }
        ancestry.push(Ancestor::named(AncestorKind::Function, func));
        id.push_str(func);
        CollectedItem {
            id,
            ancestry,
            params: None,
        }
    }

    fn param_item(module: &str, func: &str, variant: &str, value: serde_json::Value) -> CollectedItem {
        let mut item = func_item(module, None, &format!("{}[{}]", func, variant));
        item.params = Some(ParamRecord::new(
            [("p".to_string(), value)],
            variant,
        ));
        item
    }

    mod registration {
        use super::*;

        #[test]
        fn sibling_methods_share_class_path() {
            let index = PathIndex::build(vec![
                func_item("mod", Some("TestA"), "test_x"),
                func_item("mod", Some("TestA"), "test_y"),
            ])
            .unwrap();

            let class_path = TreePath::root().child("mod").child("TestA");
            assert_eq!(index.items_at(&class_path).len(), 2);
            let children: Vec<String> = index
                .children_of(&class_path)
                .map(|p| p.last().unwrap().to_string())
                .collect();
            assert_eq!(children, vec!["test_x", "test_y"]);
        }

        #[test]
        fn item_order_within_a_path_is_collection_order() {
            let index = PathIndex::build(vec![
                func_item("mod", None, "test_b"),
                func_item("mod", None, "test_a"),
            ])
            .unwrap();
            let mod_path = TreePath::root().child("mod");
            let ids: Vec<&str> = index
                .items_at(&mod_path)
                .iter()
                .map(|&i| index.item(i).id.as_str())
                .collect();
            assert_eq!(ids, vec!["mod.py::test_b", "mod.py::test_a"]);
        }

        #[test]
        fn node_lookup_fails_for_unregistered_path() {
            let index = PathIndex::build(vec![func_item("mod", None, "test_a")]).unwrap();
            let missing = TreePath::root().child("nope");
            assert!(matches!(
                index.node_at(&missing),
                Err(TreeError::NotFound { .. })
            ));
        }

        #[test]
        fn root_is_registered_once() {
            let index = PathIndex::build(vec![
                func_item("a", None, "test_1"),
                func_item("b", None, "test_2"),
            ])
            .unwrap();
            assert!(matches!(
                index.node_at(&TreePath::root()).unwrap(),
                TreeNode::Root
            ));
            assert_eq!(index.items_at(&TreePath::root()).len(), 2);
        }
    }

    mod variant_groups {
        use super::*;

        #[test]
        fn instantiations_collapse_into_one_group() {
            let index = PathIndex::build(vec![
                param_item("mod", "test_p", "1", json!("one")),
                param_item("mod", "test_p", "2", json!("two")),
            ])
            .unwrap();

            let group_path = TreePath::root().child("mod").child("test_p");
            match index.node_at(&group_path).unwrap() {
                TreeNode::Group(group) => {
                    assert_eq!(group.len(), 2);
                    let ids: Vec<&str> = group.variant_ids().collect();
                    assert_eq!(ids, vec!["1", "2"]);
                    assert_eq!(group.parent(), &TreePath::root().child("mod"));
                }
                other => panic!("expected group node, got {:?}", other),
            }
            assert_eq!(index.items_at(&group_path).len(), 2);
        }

        #[test]
        fn variant_leaves_are_children_of_the_group() {
            let index = PathIndex::build(vec![
                param_item("mod", "test_p", "1", json!("one")),
                param_item("mod", "test_p", "2", json!("two")),
            ])
            .unwrap();
            let group_path = TreePath::root().child("mod").child("test_p");
            let leaves: Vec<String> = index
                .children_of(&group_path)
                .map(|p| p.last().unwrap().to_string())
                .collect();
            assert_eq!(leaves, vec!["test_p[1]", "test_p[2]"]);
        }
    }

    mod packages {
        use super::*;

        #[test]
        fn sibling_modules_share_package_segments() {
            let mk = |module: &str| {
                let mut item = func_item(module, None, "test_a");
                item.ancestry[1] = Ancestor::named(AncestorKind::Module, module);
                item
            };
            let index = PathIndex::build(vec![mk("pkg.mod_a"), mk("pkg.mod_b")]).unwrap();
            let pkg_path = TreePath::root().child("pkg");
            assert!(matches!(
                index.node_at(&pkg_path).unwrap(),
                TreeNode::Package { .. }
            ));
            let children: Vec<String> = index
                .children_of(&pkg_path)
                .map(|p| p.last().unwrap().to_string())
                .collect();
            assert_eq!(children, vec!["mod_a", "mod_b"]);
            assert_eq!(index.items_at(&pkg_path).len(), 2);
        }
    }
}

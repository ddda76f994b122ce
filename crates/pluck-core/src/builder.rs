//! Path builder: per-item ancestry walk.
//!
//! For one item, [`walk_item`] produces the ordered sequence of
//! [`PathStep`]s covering every ancestor from the root down to the item
//! itself. The index replays these steps for every item; registration in the
//! index (not the walk) is what converges repeated walks onto shared
//! intermediate and group nodes, so the walk itself stays a pure function of
//! the item.
//!
//! Special handling, in the order it applies to each ancestor:
//! - the root ancestor is assigned the sentinel segment `.`;
//! - an unnamed instance wrapper contributes no segment and no node;
//! - a dotted module name explodes into one synthetic package segment per
//!   dot-separated component except the last, so sibling modules under the
//!   same package share intermediate paths;
//! - a function name carrying a bracketed parametrization suffix first emits
//!   a variant step at the bare-name path shared by all instantiations, then
//!   its own leaf step one segment below.

use crate::error::{TreeError, TreeResult};
use crate::types::{Ancestor, AncestorKind, CollectedItem, TreePath, ROOT_SEGMENT};

/// What kind of node a step registers at its path.
///
/// Seeds carry no item index; the index supplies the item being walked when
/// it merges a step into its maps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeSeed {
    /// The collection root.
    Root,
    /// One synthetic dotted-package component.
    Package { name: String, fs_path: String },
    /// A structural collector (module, class, named instance).
    Collector { name: String, kind: AncestorKind },
    /// A leaf function or one parametrized instantiation.
    Leaf { name: String },
    /// One instantiation joining the variant group at this path.
    Variant { variant_id: String },
}

/// One (path, node seed) pair emitted by the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep {
    pub path: TreePath,
    pub seed: NodeSeed,
}

impl PathStep {
    fn new(path: TreePath, seed: NodeSeed) -> Self {
        PathStep { path, seed }
    }
}

/// Walk one item's ancestry chain, emitting a step for every path prefix.
///
/// The returned steps are ordered root-to-leaf; each item contributes
/// O(depth) steps.
///
/// # Errors
///
/// [`TreeError::UnrecognizedAncestor`] when an ancestry entry has no name
/// and is neither the root nor a grouping-only instance wrapper.
pub fn walk_item(item: &CollectedItem) -> TreeResult<Vec<PathStep>> {
    let mut steps = Vec::with_capacity(item.ancestry.len() + 2);
    let mut path = TreePath::empty();

    for (position, ancestor) in item.ancestry.iter().enumerate() {
        let mut name = match resolve_name(item, ancestor, position)? {
            Some(name) => name,
            None => continue,
        };

        if ancestor.kind == AncestorKind::Module && name.contains('.') {
            // Exploded fully even below the filesystem root the index cares
            // about; callers needing root-relative truncation post-process.
            let components: Vec<&str> = name.split('.').collect();
            for component in components[..components.len() - 1].iter().copied() {
                path = path.child(component);
                steps.push(PathStep::new(
                    path.clone(),
                    NodeSeed::Package {
                        name: component.to_string(),
                        fs_path: package_fs_path(ancestor.fs_path.as_deref(), component),
                    },
                ));
            }
            name = components[components.len() - 1].to_string();
        }

        if ancestor.kind == AncestorKind::Function {
            if let Some((funcname, _suffix)) = name.split_once('[') {
                if !funcname.is_empty() {
                    let group_path = path.child(funcname);
                    steps.push(PathStep::new(
                        group_path.clone(),
                        NodeSeed::Variant {
                            variant_id: variant_id(item),
                        },
                    ));
                    path = group_path;
                }
            }
        }

        path = path.child(&name);
        let seed = match ancestor.kind {
            AncestorKind::Root => NodeSeed::Root,
            AncestorKind::Function => NodeSeed::Leaf { name: name.clone() },
            kind => NodeSeed::Collector {
                name: name.clone(),
                kind,
            },
        };
        steps.push(PathStep::new(path.clone(), seed));
    }

    Ok(steps)
}

/// Display name for one ancestor, or `None` when it contributes nothing.
fn resolve_name(
    item: &CollectedItem,
    ancestor: &Ancestor,
    position: usize,
) -> TreeResult<Option<String>> {
    if ancestor.kind == AncestorKind::Root {
        return Ok(Some(ROOT_SEGMENT.to_string()));
    }
    match &ancestor.name {
        Some(name) => Ok(Some(name.clone())),
        None if ancestor.kind == AncestorKind::Instance => Ok(None),
        None => Err(TreeError::UnrecognizedAncestor {
            item_id: item.id.clone(),
            kind: ancestor.kind,
            position,
        }),
    }
}

/// Unique identifier for one parametrized instantiation.
///
/// The variant id from the parametrization record when present, otherwise
/// the item id itself.
fn variant_id(item: &CollectedItem) -> String {
    item.params
        .as_ref()
        .map(|p| p.variant_id.clone())
        .unwrap_or_else(|| item.id.clone())
}

/// Filesystem-derived path prefix ending at `component`.
fn package_fs_path(fs_path: Option<&str>, component: &str) -> String {
    match fs_path.and_then(|fp| fp.find(component).map(|i| (fp, i))) {
        Some((fp, i)) => format!("{}{}", &fp[..i], component),
        None => component.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================

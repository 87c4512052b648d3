//! Pairwise dependency-tree merging.
//!
//! Two trees are merged recursively, keyed by component *name* (the same
//! logical component carries different identity keys in each source
//! tree). Where both sides have a component, the merged copy takes its
//! fields from the reference side, unions the identifier sets, and is
//! annotated with any field conflicts. Where only one side has a subtree,
//! it is copied wholesale by solo assembly.
//!
//! Cycle handling: solo assembly owns a `visited` identity-key set per
//! assembly call, and the matched-pair recursion tracks the pair path so
//! no identity key is inserted twice along a single merge branch.

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::conflict::{compare_components, Conflict};
use crate::error::{ReconcileError, Result};
use crate::model::{DependencyTree, NodeId};

/// Which input a one-sided subtree came from; decides which slot of the
/// not-found conflict carries the component name.
#[derive(Clone, Copy)]
enum Side {
    Target,
    Other,
}

/// Merge two dependency trees into one.
///
/// The result contains every component reachable from either input root.
/// Corresponding components (by name) are merged with conflicts recorded
/// where they disagree; one-sided subtrees are copied verbatim with a
/// not-found annotation. Both inputs are left untouched.
pub fn merge_pair(a: &DependencyTree, b: &DependencyTree) -> Result<DependencyTree> {
    let mut dest = DependencyTree::new();
    let mut path = HashSet::new();
    merge_recurse(&mut dest, None, a, a.root(), b, b.root(), &mut path)?;
    Ok(dest)
}

/// Merge any number of trees by left-folding [`merge_pair`].
///
/// A single tree is returned as-is (cloned, no annotations); an empty
/// slice is rejected.
pub fn merge_all(trees: &[DependencyTree]) -> Result<DependencyTree> {
    let (first, rest) = trees
        .split_first()
        .ok_or(ReconcileError::EmptyReconciliation)?;

    let mut merged = first.clone();
    for (index, tree) in rest.iter().enumerate() {
        debug!(pair = index + 1, "merging dependency tree pair");
        merged = merge_pair(&merged, tree)?;
    }
    Ok(merged)
}

fn merge_recurse(
    dest: &mut DependencyTree,
    parent: Option<NodeId>,
    a_tree: &DependencyTree,
    a_id: Option<NodeId>,
    b_tree: &DependencyTree,
    b_id: Option<NodeId>,
    path: &mut HashSet<(NodeId, NodeId)>,
) -> Result<()> {
    let (a_id, b_id) = match (a_id, b_id) {
        (None, None) => return Ok(()),
        (Some(a_id), None) => {
            let mut visited = HashSet::new();
            return solo_assemble(dest, a_tree, a_id, parent, Side::Target, &mut visited);
        }
        (None, Some(b_id)) => {
            let mut visited = HashSet::new();
            return solo_assemble(dest, b_tree, b_id, parent, Side::Other, &mut visited);
        }
        (Some(a_id), Some(b_id)) => (a_id, b_id),
    };

    // A pair already on the current branch means the source graphs are
    // cyclic; recursing again would never terminate.
    if !path.insert((a_id, b_id)) {
        return Ok(());
    }

    let a_comp = a_tree.require(a_id)?;
    let b_comp = b_tree.require(b_id)?;

    // Reference fields from side A; identifier sets unioned from both.
    let mut merged = a_comp.clone();
    merged.cpes.extend(b_comp.cpes.iter().cloned());
    merged.purls.extend(b_comp.purls.iter().cloned());
    merged.swids.extend(b_comp.swids.iter().cloned());
    merged.hashes.extend(b_comp.hashes.iter().cloned());
    merged.licenses.extend(b_comp.licenses.iter().cloned());

    if !a_comp.fields_match(b_comp) {
        merged.conflicts.extend(compare_components(a_comp, b_comp));
    }

    let current = dest.add_component(parent, merged)?;

    // Partition children by name: shared names recurse as pairs, one-sided
    // names are solo-assembled. Duplicate sibling names collapse to the
    // last occurrence in the correspondence map.
    let mut a_children: IndexMap<&str, NodeId> = IndexMap::new();
    for &child_id in a_tree.children(a_id) {
        let child = a_tree.require(child_id)?;
        if a_children.insert(child.name.as_str(), child_id).is_some() {
            warn!(
                parent = %a_comp.name,
                child = %child.name,
                "duplicate sibling name in reference tree; last occurrence wins"
            );
        }
    }

    let mut matched: HashSet<&str> = HashSet::new();
    for &b_child_id in b_tree.children(b_id) {
        let b_child = b_tree.require(b_child_id)?;
        match a_children.get(b_child.name.as_str()) {
            Some(&a_child_id) => {
                matched.insert(b_child.name.as_str());
                merge_recurse(
                    dest,
                    Some(current),
                    a_tree,
                    Some(a_child_id),
                    b_tree,
                    Some(b_child_id),
                    path,
                )?;
            }
            None => {
                let mut visited = HashSet::new();
                solo_assemble(
                    dest,
                    b_tree,
                    b_child_id,
                    Some(current),
                    Side::Other,
                    &mut visited,
                )?;
            }
        }
    }

    for (name, &a_child_id) in &a_children {
        if !matched.contains(name) {
            let mut visited = HashSet::new();
            solo_assemble(
                dest,
                a_tree,
                a_child_id,
                Some(current),
                Side::Target,
                &mut visited,
            )?;
        }
    }

    path.remove(&(a_id, b_id));
    Ok(())
}

/// Depth-first copy of a one-sided subtree into the destination.
///
/// Every clone is annotated with a not-found conflict and its identity key
/// recorded in `visited`; recursion only enters unvisited children, which
/// bounds the copy to the subtree size and survives cycles in the source.
fn solo_assemble(
    dest: &mut DependencyTree,
    src: &DependencyTree,
    node: NodeId,
    parent: Option<NodeId>,
    side: Side,
    visited: &mut HashSet<NodeId>,
) -> Result<()> {
    visited.insert(node);

    let component = src.require(node)?;
    let mut copy = component.clone();
    copy.conflicts.push(match side {
        Side::Target => Conflict::component_not_found(Some(&component.name), None),
        Side::Other => Conflict::component_not_found(None, Some(&component.name)),
    });

    let copy_id = dest.add_component(parent, copy)?;

    for &child in src.children(node) {
        if !visited.contains(&child) {
            solo_assemble(dest, src, child, Some(copy_id), side, visited)?;
        }
    }
    Ok(())
}

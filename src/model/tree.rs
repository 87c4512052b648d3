//! Arena-based dependency tree.
//!
//! Components live in a flat table keyed by opaque [`NodeId`] identity
//! keys, with parent→children edge lists held separately. A component may
//! be reachable from multiple parents (diamond dependencies), and the
//! source data may even contain cycles; every traversal therefore carries
//! a `visited` set. Components never hold references to each other.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Component;
use crate::error::{MergeErrorKind, ReconcileError, Result};

/// Opaque identity key for a tree node.
///
/// Generated by the owning tree; carries no component content and is never
/// used for component equality, only for addressing edges.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct NodeId(u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A rooted tree of components connected by identity-key edges.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependencyTree {
    nodes: IndexMap<NodeId, Component>,
    children: IndexMap<NodeId, Vec<NodeId>>,
    root: Option<NodeId>,
    next_id: u64,
}

impl DependencyTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a component under `parent`, returning its freshly generated
    /// identity key. A `None` parent designates the root (the first such
    /// insert wins). Inserting under an unknown parent is a structural
    /// error.
    pub fn add_component(
        &mut self,
        parent: Option<NodeId>,
        component: Component,
    ) -> Result<NodeId> {
        if let Some(parent_id) = parent {
            if !self.nodes.contains_key(&parent_id) {
                return Err(ReconcileError::merge(
                    format!("inserting '{}'", component.name),
                    MergeErrorKind::MissingParent(parent_id),
                ));
            }
        }

        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, component);
        self.children.insert(id, Vec::new());

        match parent {
            Some(parent_id) => {
                if let Some(siblings) = self.children.get_mut(&parent_id) {
                    siblings.push(id);
                }
            }
            None => {
                if self.root.is_none() {
                    self.root = Some(id);
                }
            }
        }

        Ok(id)
    }

    /// Add an extra parent→child edge between existing nodes. This is how
    /// diamond (and, in malformed input, cyclic) shapes arise.
    pub fn add_edge(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if !self.nodes.contains_key(&parent) {
            return Err(ReconcileError::dangling_edge("adding edge", parent));
        }
        if !self.nodes.contains_key(&child) {
            return Err(ReconcileError::dangling_edge("adding edge", child));
        }
        if let Some(siblings) = self.children.get_mut(&parent) {
            siblings.push(child);
        }
        Ok(())
    }

    /// Get a component by identity key.
    #[must_use]
    pub fn component(&self, id: NodeId) -> Option<&Component> {
        self.nodes.get(&id)
    }

    /// Get a component by identity key, treating absence as the structural
    /// error it is (an edge referenced a key missing from the table).
    pub fn require(&self, id: NodeId) -> Result<&Component> {
        self.nodes
            .get(&id)
            .ok_or_else(|| ReconcileError::dangling_edge("resolving node", id))
    }

    /// Children of a node, in edge insertion order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children.get(&id).map_or(&[], Vec::as_slice)
    }

    /// The root identity key, if any component has been inserted.
    #[must_use]
    pub const fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Number of components in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the tree holds no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate all components in insertion order.
    pub fn components(&self) -> impl Iterator<Item = (NodeId, &Component)> {
        self.nodes.iter().map(|(id, component)| (*id, component))
    }

    /// First component with the given name, if any.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, component)| component.name == name)
            .map(|(id, _)| *id)
    }
}

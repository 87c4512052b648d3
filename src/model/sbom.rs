//! The SBOM document wrapper: metadata plus a dependency tree.

use serde::{Deserialize, Serialize};

use super::{Component, DependencyTree, DocumentMetadata, NodeId};

/// An SBOM document: document-level metadata and a tree of components.
///
/// Produced by an external deserializer or generator; the reconciliation
/// engine treats it as immutable input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sbom {
    pub metadata: DocumentMetadata,
    pub tree: DependencyTree,
}

impl Sbom {
    /// Create a document from metadata and an already-built tree.
    #[must_use]
    pub const fn new(metadata: DocumentMetadata, tree: DependencyTree) -> Self {
        Self { metadata, tree }
    }

    /// Iterate all components.
    pub fn components(&self) -> impl Iterator<Item = (NodeId, &Component)> {
        self.tree.components()
    }

    /// Total component count.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.tree.len()
    }
}

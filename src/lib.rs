//! **Multi-SBOM reconciliation and merge engine.**
//!
//! `sbom-reconcile` takes several Software Bills of Materials describing
//! overlapping or evolving views of the same product — already
//! materialized as [`model::Sbom`] documents by an external deserializer
//! or generator — and reconciles them into:
//!
//! - one merged canonical dependency tree, with conflict annotations
//!   wherever the inputs disagree, and
//! - a cross-document comparison report: one [`DiffReport`] per
//!   non-reference document plus a name-keyed [`ComponentIndex`] showing
//!   which component versions and identifiers appeared in which input.
//!
//! The engine is computation-only: no I/O, no network, no file-format
//! grammar. Per-format parsing and serialization live in collaborating
//! crates that produce and consume these canonical structures.
//!
//! ## Core concepts
//!
//! - **[`model`]**: structured identifiers ([`model::Cpe`],
//!   [`model::Purl`], [`model::Hash`]) with the equivalence rules used
//!   everywhere else, the [`model::Component`] record, and the
//!   arena-based [`model::DependencyTree`] addressed by opaque
//!   [`model::NodeId`] keys (diamond dependencies and even cyclic input
//!   are tolerated; traversals carry `visited` sets).
//! - **[`conflict`]**: the closed [`MismatchType`] taxonomy and the
//!   [`Conflict`] records derived from field comparisons. Conflicts are
//!   data, never errors.
//! - **[`merge`]**: recursive pairwise tree merging with solo assembly
//!   for one-sided subtrees, and an N-way left fold.
//! - **[`reconcile`]**: the N-way driver producing diff reports and the
//!   cross-document index.
//!
//! ## Merging two trees
//!
//! ```
//! use sbom_reconcile::model::{Component, DependencyTree};
//! use sbom_reconcile::merge_pair;
//!
//! fn main() -> sbom_reconcile::Result<()> {
//!     let mut a = DependencyTree::new();
//!     let root = a.add_component(None, Component::new("app"))?;
//!     a.add_component(Some(root), Component::new("libfoo"))?;
//!
//!     let mut b = DependencyTree::new();
//!     let root = b.add_component(None, Component::new("app"))?;
//!     b.add_component(Some(root), Component::new("libbar"))?;
//!
//!     let merged = merge_pair(&a, &b)?;
//!     assert_eq!(merged.len(), 3);
//!     Ok(())
//! }
//! ```
//!
//! ## Reconciling a document list
//!
//! ```no_run
//! use sbom_reconcile::{reconcile, model::Sbom};
//!
//! fn report(sboms: &[Sbom]) -> sbom_reconcile::Result<()> {
//!     let result = reconcile(sboms)?;
//!     for (i, report) in result.reports.iter().enumerate() {
//!         println!("document {}: {} conflicts", i + 1, report.conflict_count());
//!     }
//!     for (name, variants) in result.index.iter() {
//!         println!("{name}: {} version variant(s)", variants.len());
//!     }
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Doc completeness: # Errors / # Panics sections are aspirational
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Variable names like `a`/`b` or `target`/`other` are clear in context
    clippy::similar_names
)]

pub mod conflict;
pub mod error;
pub mod merge;
pub mod model;
pub mod reconcile;
pub mod utils;

// Re-export main types for convenience
pub use conflict::{compare_components, Conflict, ConflictFactory, MismatchType};
pub use error::{ReconcileError, Result};
pub use merge::{merge_all, merge_pair};
pub use model::{identifiers_equivalent, Identifier};
pub use reconcile::{reconcile, ComponentIndex, ComponentVersion, DiffReport, Reconciliation};

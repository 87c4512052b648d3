//! N-way reconciliation: diff reports plus the cross-document index.
//!
//! The first SBOM in the input list is the reference. Every subsequent
//! document yields one [`DiffReport`] against it, and all documents are
//! folded — strictly in input order — into a [`ComponentIndex`] mapping
//! each component name to its version variants and their identifier
//! provenance.

mod aggregate;
mod report;

pub use aggregate::{ComponentIndex, ComponentVersion, IdOccurrence};
pub use report::DiffReport;

use rayon::prelude::*;
use tracing::info;

use crate::error::{ReconcileError, Result};
use crate::model::Sbom;

/// The combined output of a reconciliation run.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Reconciliation {
    /// One report per non-reference document, in input order
    pub reports: Vec<DiffReport>,
    /// Cross-document component index
    pub index: ComponentIndex,
}

/// Reconcile an ordered list of SBOM documents.
///
/// Rejects an empty list. A single document is a no-op reconciliation:
/// zero reports, one index entry per component name.
///
/// Report generation is parallel (each report depends only on the fixed
/// reference and one candidate); the aggregation fold is sequential
/// because appearance indices are only meaningful under the input order.
pub fn reconcile(sboms: &[Sbom]) -> Result<Reconciliation> {
    let (reference, candidates) = sboms
        .split_first()
        .ok_or(ReconcileError::EmptyReconciliation)?;

    info!(documents = sboms.len(), "reconciling SBOM documents");

    let reports: Vec<DiffReport> = candidates
        .par_iter()
        .map(|candidate| DiffReport::between(reference, candidate))
        .collect();

    let mut index = ComponentIndex::new();
    for (document_index, sbom) in sboms.iter().enumerate() {
        index.fold_document(sbom, document_index);
    }

    Ok(Reconciliation { reports, index })
}

//! Diff reports between a reference SBOM and one candidate.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::conflict::{compare_components, Conflict, ConflictFactory, MismatchType};
use crate::model::{Component, DocumentMetadata, Sbom};

/// The result of comparing exactly two SBOMs: document-level conflicts
/// plus per-component conflicts keyed by component name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiffReport {
    /// SBOM-level metadata conflicts
    pub document: Vec<Conflict>,
    /// Per-component conflicts, including not-found records for
    /// components present on only one side
    pub components: IndexMap<String, Vec<Conflict>>,
}

impl DiffReport {
    /// Compare a reference document against one candidate.
    ///
    /// Pseudo-root / unpackaged placeholder components are excluded from
    /// the walk. Components that compare clean are elided.
    #[must_use]
    pub fn between(target: &Sbom, other: &Sbom) -> Self {
        let document = compare_documents(&target.metadata, &other.metadata);

        let target_map = packaged_by_name(target);
        let other_map = packaged_by_name(other);

        let mut components: IndexMap<String, Vec<Conflict>> = IndexMap::new();

        for (name, target_comp) in &target_map {
            match other_map.get(name) {
                Some(other_comp) => {
                    let conflicts = compare_components(target_comp, other_comp);
                    if !conflicts.is_empty() {
                        components.insert((*name).to_string(), conflicts);
                    }
                }
                None => {
                    components.insert(
                        (*name).to_string(),
                        vec![Conflict::component_not_found(Some(name), None)],
                    );
                }
            }
        }

        for name in other_map.keys() {
            if !target_map.contains_key(name) {
                components.insert(
                    (*name).to_string(),
                    vec![Conflict::component_not_found(None, Some(name))],
                );
            }
        }

        Self {
            document,
            components,
        }
    }

    /// Total number of conflicts across the document and all components.
    #[must_use]
    pub fn conflict_count(&self) -> usize {
        self.document.len() + self.components.values().map(Vec::len).sum::<usize>()
    }

    /// True when the two documents compared without a single conflict.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.document.is_empty() && self.components.is_empty()
    }

    /// All component-level conflicts of a given type, with the component
    /// name they belong to.
    pub fn conflicts_of_type(
        &self,
        mismatch_type: MismatchType,
    ) -> impl Iterator<Item = (&str, &Conflict)> {
        self.components.iter().flat_map(move |(name, conflicts)| {
            conflicts
                .iter()
                .filter(move |conflict| conflict.mismatch_type == mismatch_type)
                .map(move |conflict| (name.as_str(), conflict))
        })
    }
}

/// Name-keyed view of a document's packaged components. Duplicate names
/// collapse to the last occurrence, matching the merge correspondence.
fn packaged_by_name(sbom: &Sbom) -> IndexMap<&str, &Component> {
    sbom.components()
        .filter(|(_, component)| !component.unpackaged)
        .map(|(_, component)| (component.name.as_str(), component))
        .collect()
}

/// Document-level metadata comparison.
fn compare_documents(target: &DocumentMetadata, other: &DocumentMetadata) -> Vec<Conflict> {
    let mut factory = ConflictFactory::new();

    factory.try_add(
        "Format",
        MismatchType::OriginFormat,
        Some(&target.format.to_string()),
        Some(&other.format.to_string()),
    );
    factory.try_add(
        "Spec Version",
        MismatchType::SchemaVersion,
        Some(&target.spec_version),
        Some(&other.spec_version),
    );
    factory.try_add(
        "Document Version",
        MismatchType::SbomVersion,
        target.document_version.as_deref(),
        other.document_version.as_deref(),
    );
    factory.try_add(
        "Serial Number",
        MismatchType::SerialNumber,
        target.serial_number.as_deref(),
        other.serial_number.as_deref(),
    );
    factory.try_add(
        "Timestamp",
        MismatchType::Timestamp,
        target.timestamp.map(|t| t.to_rfc3339()).as_deref(),
        other.timestamp.map(|t| t.to_rfc3339()).as_deref(),
    );
    factory.try_add(
        "Supplier",
        MismatchType::Supplier,
        target.supplier.as_deref(),
        other.supplier.as_deref(),
    );

    factory.into_conflicts()
}

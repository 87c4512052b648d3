//! Cross-document component aggregation.
//!
//! Every component from every input document is folded into a running
//! index keyed by component name. Each (name, version) pair becomes a
//! [`ComponentVersion`] tracking which documents it appeared in and which
//! identifier values attached to it where. Fold order is significant:
//! appearance indices are only meaningful under a fixed input ordering,
//! so the fold is strictly sequential.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::model::{Component, Sbom};
use crate::utils::version::{compare_version_options, versions_overlap};

/// Which input documents carried one identifier value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdOccurrence {
    /// Indices into the reconciliation input list
    pub appearances: BTreeSet<usize>,
}

impl IdOccurrence {
    fn at(index: usize) -> Self {
        Self {
            appearances: BTreeSet::from([index]),
        }
    }

    /// Record an appearance in the document at `index`.
    pub fn record(&mut self, index: usize) {
        self.appearances.insert(index);
    }
}

/// One (component name, version) pair across all input documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentVersion {
    pub name: String,
    pub version: Option<String>,
    /// CPE string → occurrence record
    pub cpes: IndexMap<String, IdOccurrence>,
    /// PURL string → occurrence record
    pub purls: IndexMap<String, IdOccurrence>,
    /// SWID tag → occurrence record
    pub swids: IndexMap<String, IdOccurrence>,
    /// Documents in which this (name, version) pair appeared at all
    pub appearances: BTreeSet<usize>,
}

impl ComponentVersion {
    fn from_component(component: &Component, index: usize) -> Self {
        let occurrences = |values: &BTreeSet<String>| {
            values
                .iter()
                .map(|value| (value.clone(), IdOccurrence::at(index)))
                .collect()
        };

        Self {
            name: component.name.clone(),
            version: component.version.clone(),
            cpes: occurrences(&component.cpes),
            purls: occurrences(&component.purls),
            swids: occurrences(&component.swids),
            appearances: BTreeSet::from([index]),
        }
    }

    /// Merge a newly seen component into this variant: unseen identifiers
    /// are added, already-seen ones gain the new document index, and the
    /// appearance is recorded on the variant itself.
    fn absorb(&mut self, component: &Component, index: usize) {
        let absorb_into = |map: &mut IndexMap<String, IdOccurrence>,
                           values: &BTreeSet<String>| {
            for value in values {
                map.entry(value.clone())
                    .or_default()
                    .record(index);
            }
        };

        absorb_into(&mut self.cpes, &component.cpes);
        absorb_into(&mut self.purls, &component.purls);
        absorb_into(&mut self.swids, &component.swids);
        self.appearances.insert(index);
    }
}

/// The cross-document index: component name → version variants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentIndex {
    entries: IndexMap<String, Vec<ComponentVersion>>,
}

impl ComponentIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one document's components into the index.
    ///
    /// Documents must be folded in input order, one at a time; later
    /// documents' fuzzy version matching depends on the state accumulated
    /// from earlier ones.
    pub fn fold_document(&mut self, sbom: &Sbom, index: usize) {
        for (_, component) in sbom.components() {
            self.fold_component(component, index);
        }
    }

    fn fold_component(&mut self, component: &Component, index: usize) {
        let variants = self.entries.entry(component.name.clone()).or_default();

        let mut matched = false;
        for variant in variants.iter_mut() {
            if versions_overlap(variant.version.as_deref(), component.version.as_deref()) {
                variant.absorb(component, index);
                matched = true;
            }
        }
        if !matched {
            variants.push(ComponentVersion::from_component(component, index));
        }
    }

    /// Version variants recorded under a name, in first-seen order.
    #[must_use]
    pub fn variants(&self, name: &str) -> &[ComponentVersion] {
        self.entries.get(name).map_or(&[], Vec::as_slice)
    }

    /// Version variants under a name, ordered by version (semver first,
    /// lexicographic fallback, absent versions first). Presentation
    /// helper; the stored order stays first-seen.
    #[must_use]
    pub fn sorted_variants(&self, name: &str) -> Vec<&ComponentVersion> {
        let mut variants: Vec<&ComponentVersion> = self.variants(name).iter().collect();
        variants.sort_by(|a, b| {
            compare_version_options(a.version.as_deref(), b.version.as_deref())
        });
        variants
    }

    /// Iterate all entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ComponentVersion])> {
        self.entries
            .iter()
            .map(|(name, variants)| (name.as_str(), variants.as_slice()))
    }

    /// Number of distinct component names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been folded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

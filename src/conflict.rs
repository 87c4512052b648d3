//! Conflict records and their derivation.
//!
//! A conflict is pure data describing a field-level disagreement between
//! two compared components or documents. Conflicts are never thrown and
//! never drive control flow; the merger attaches them to merged
//! components and the comparator collects them into reports.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::model::{Component, Hash, HashAlgorithm};

/// The closed set of conflict categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MismatchType {
    /// A value present on exactly one side
    Missing,
    OriginFormat,
    Name,
    Version,
    SchemaVersion,
    SbomVersion,
    License,
    Timestamp,
    SerialNumber,
    Supplier,
    Misc,
    SbomId,
    Hash,
    Cpe,
    Purl,
    Swid,
    /// A component present in only one of the compared documents
    ComponentNotFound,
    Unknown,
}

/// A structured record of one field-level disagreement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub mismatch_type: MismatchType,
    pub message: String,
    pub target: Option<String>,
    pub other: Option<String>,
}

impl Conflict {
    fn mismatch(field: &str, mismatch_type: MismatchType, target: &str, other: &str) -> Self {
        Self {
            mismatch_type,
            message: format!("{field} doesn't match"),
            target: Some(target.to_string()),
            other: Some(other.to_string()),
        }
    }

    fn missing(field: &str, target: Option<&str>, other: Option<&str>) -> Self {
        Self {
            mismatch_type: MismatchType::Missing,
            message: format!("{field} is missing"),
            target: target.map(str::to_string),
            other: other.map(str::to_string),
        }
    }

    /// Derive a conflict from a field comparison, if there is one.
    ///
    /// Both values absent (or empty): no conflict. Exactly one present:
    /// a Missing-flavored conflict. Both present and unequal: a
    /// Mismatch-flavored conflict of the given type.
    #[must_use]
    pub fn try_new(
        field: &str,
        mismatch_type: MismatchType,
        target: Option<&str>,
        other: Option<&str>,
    ) -> Option<Self> {
        let target = target.filter(|value| !value.is_empty());
        let other = other.filter(|value| !value.is_empty());

        match (target, other) {
            (None, None) => None,
            (Some(t), Some(o)) if t == o => None,
            (Some(t), Some(o)) => Some(Self::mismatch(field, mismatch_type, t, o)),
            (target, other) => Some(Self::missing(field, target, other)),
        }
    }

    /// The conflict attached to a component present in only one document.
    #[must_use]
    pub fn component_not_found(target: Option<&str>, other: Option<&str>) -> Self {
        Self {
            mismatch_type: MismatchType::ComponentNotFound,
            message: "component not found in other document".to_string(),
            target: target.map(str::to_string),
            other: other.map(str::to_string),
        }
    }
}

/// Accumulates conflicts across a sequence of field comparisons.
#[derive(Debug, Default)]
pub struct ConflictFactory {
    conflicts: Vec<Conflict>,
}

impl ConflictFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempt to add a conflict for a single field comparison; nothing is
    /// added when the values agree.
    pub fn try_add(
        &mut self,
        field: &str,
        mismatch_type: MismatchType,
        target: Option<&str>,
        other: Option<&str>,
    ) {
        if let Some(conflict) = Conflict::try_new(field, mismatch_type, target, other) {
            self.conflicts.push(conflict);
        }
    }

    /// Add a batch of already-derived conflicts.
    pub fn extend(&mut self, conflicts: Vec<Conflict>) {
        self.conflicts.extend(conflicts);
    }

    /// Compare two string sets element-wise, reporting the symmetric
    /// difference: one conflict per value present on only one side.
    pub fn compare_string_sets(
        &mut self,
        field: &str,
        target: &BTreeSet<String>,
        other: &BTreeSet<String>,
    ) {
        for value in target.difference(other) {
            self.try_add(field, MismatchType::Missing, Some(value), None);
        }
        for value in other.difference(target) {
            self.try_add(field, MismatchType::Missing, None, Some(value));
        }
    }

    /// Compare two hash sets keyed per algorithm: a Missing conflict when
    /// an algorithm is one-sided, a Hash mismatch when both sides carry
    /// the algorithm with different values.
    pub fn compare_hash_sets(
        &mut self,
        field: &str,
        target: &BTreeSet<Hash>,
        other: &BTreeSet<Hash>,
    ) {
        let target_by_alg: BTreeMap<HashAlgorithm, &str> = target
            .iter()
            .map(|hash| (hash.algorithm, hash.value.as_str()))
            .collect();
        let other_by_alg: BTreeMap<HashAlgorithm, &str> = other
            .iter()
            .map(|hash| (hash.algorithm, hash.value.as_str()))
            .collect();

        for (algorithm, target_value) in &target_by_alg {
            match other_by_alg.get(algorithm) {
                Some(other_value) => self.try_add(
                    &format!("{field} {algorithm}"),
                    MismatchType::Hash,
                    Some(target_value),
                    Some(other_value),
                ),
                None => self.try_add(field, MismatchType::Missing, Some(target_value), None),
            }
        }
        for (algorithm, other_value) in &other_by_alg {
            if !target_by_alg.contains_key(algorithm) {
                self.try_add(field, MismatchType::Missing, None, Some(other_value));
            }
        }
    }

    /// Number of conflicts collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.conflicts.len()
    }

    /// True when no conflicts have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Consume the factory, yielding the collected conflicts.
    #[must_use]
    pub fn into_conflicts(self) -> Vec<Conflict> {
        self.conflicts
    }
}

/// True when either set contains the other. A pure subset is not a
/// conflict: a document that dropped one formerly-present identifier
/// still names the same artifact.
fn superset_either<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> bool {
    a.is_superset(b) || b.is_superset(a)
}

/// Derive the conflicts between two components that share a
/// correspondence key.
#[must_use]
pub fn compare_components(target: &Component, other: &Component) -> Vec<Conflict> {
    let mut factory = ConflictFactory::new();

    factory.try_add(
        "Name",
        MismatchType::Name,
        Some(&target.name),
        Some(&other.name),
    );
    factory.try_add(
        "Publisher",
        MismatchType::Supplier,
        target.publisher.as_deref(),
        other.publisher.as_deref(),
    );
    factory.try_add(
        "Version",
        MismatchType::Version,
        target.version.as_deref(),
        other.version.as_deref(),
    );

    if !superset_either(&target.cpes, &other.cpes) {
        factory.compare_string_sets("CPE", &target.cpes, &other.cpes);
    }
    if !superset_either(&target.purls, &other.purls) {
        factory.compare_string_sets("PURL", &target.purls, &other.purls);
    }
    if !superset_either(&target.swids, &other.swids) {
        factory.compare_string_sets("SWID", &target.swids, &other.swids);
    }

    factory.compare_hash_sets("Hash", &target.hashes, &other.hashes);
    factory.compare_string_sets("License", &target.licenses, &other.licenses);

    factory.into_conflicts()
}

//! The canonical component record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use xxhash_rust::xxh3::xxh3_64;

use super::Hash;
use crate::conflict::Conflict;

/// Schema-specific fields carried alongside the shared base, selected by
/// pattern matching rather than downcasting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum ComponentKind {
    /// Package-level component (CycloneDX component, SPDX package)
    Package(PackageFields),
    /// File-level component (SPDX file)
    File(FileFields),
    /// No schema-specific fields
    #[default]
    Minimal,
}

/// Fields specific to package components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageFields {
    pub download_location: Option<String>,
    pub source_info: Option<String>,
    pub verification_code: Option<String>,
}

/// Fields specific to file components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileFields {
    pub file_notice: Option<String>,
    pub file_types: Vec<String>,
}

/// Optional fields for one-step [`Component`] construction.
///
/// Listing every optional field in one record keeps construction a single
/// call; there is no stateful builder to leave half-filled.
#[derive(Debug, Clone, Default)]
pub struct ComponentOptions {
    pub publisher: Option<String>,
    pub version: Option<String>,
    pub kind: ComponentKind,
    pub cpes: BTreeSet<String>,
    pub purls: BTreeSet<String>,
    pub swids: BTreeSet<String>,
    pub hashes: BTreeSet<Hash>,
    pub licenses: BTreeSet<String>,
    pub unpackaged: bool,
}

/// A component of an SBOM document.
///
/// Identifier, hash, and license collections are sets: no ordering, no
/// duplicates. The engine never mutates a component in place; merge steps
/// produce annotated copies. Tree membership is expressed through
/// [`NodeId`](super::NodeId) keys held by the tree, never by references
/// inside the component itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    pub publisher: Option<String>,
    pub version: Option<String>,
    pub kind: ComponentKind,
    pub cpes: BTreeSet<String>,
    pub purls: BTreeSet<String>,
    pub swids: BTreeSet<String>,
    pub hashes: BTreeSet<Hash>,
    pub licenses: BTreeSet<String>,
    /// Pseudo-root / unpackaged placeholder marker; excluded from
    /// document-level comparison.
    pub unpackaged: bool,
    /// Conflicts attached by the merger. Empty on freshly produced
    /// components.
    pub conflicts: Vec<Conflict>,
}

impl Component {
    /// Create a component with only a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_options(name, ComponentOptions::default())
    }

    /// Create a component from the full options record in one step.
    #[must_use]
    pub fn from_options(name: impl Into<String>, options: ComponentOptions) -> Self {
        Self {
            name: name.into(),
            publisher: options.publisher,
            version: options.version,
            kind: options.kind,
            cpes: options.cpes,
            purls: options.purls,
            swids: options.swids,
            hashes: options.hashes,
            licenses: options.licenses,
            unpackaged: options.unpackaged,
            conflicts: Vec::new(),
        }
    }

    /// Content hash over the comparison-relevant fields, used as a fast
    /// equality screen before field-wise conflict derivation. Attached
    /// conflicts do not participate.
    #[must_use]
    pub fn content_hash(&self) -> u64 {
        let mut input = Vec::new();

        input.extend(self.name.as_bytes());
        input.push(0);
        if let Some(publisher) = &self.publisher {
            input.extend(publisher.as_bytes());
        }
        input.push(0);
        if let Some(version) = &self.version {
            input.extend(version.as_bytes());
        }
        input.push(0);
        for cpe in &self.cpes {
            input.extend(cpe.as_bytes());
            input.push(0);
        }
        for purl in &self.purls {
            input.extend(purl.as_bytes());
            input.push(0);
        }
        for swid in &self.swids {
            input.extend(swid.as_bytes());
            input.push(0);
        }
        for hash in &self.hashes {
            input.extend(hash.algorithm.label().as_bytes());
            input.extend(hash.value.as_bytes());
            input.push(0);
        }
        for license in &self.licenses {
            input.extend(license.as_bytes());
            input.push(0);
        }
        match &self.kind {
            ComponentKind::Package(fields) => {
                input.push(1);
                for value in [
                    &fields.download_location,
                    &fields.source_info,
                    &fields.verification_code,
                ] {
                    if let Some(value) = value {
                        input.extend(value.as_bytes());
                    }
                    input.push(0);
                }
            }
            ComponentKind::File(fields) => {
                input.push(2);
                if let Some(notice) = &fields.file_notice {
                    input.extend(notice.as_bytes());
                }
                input.push(0);
                for file_type in &fields.file_types {
                    input.extend(file_type.as_bytes());
                    input.push(0);
                }
            }
            ComponentKind::Minimal => input.push(3),
        }

        xxh3_64(&input)
    }

    /// True when the comparison-relevant fields of both components match.
    #[must_use]
    pub fn fields_match(&self, other: &Self) -> bool {
        self.content_hash() == other.content_hash()
    }

    /// Display name with version when available.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.version
            .as_ref()
            .map_or_else(|| self.name.clone(), |v| format!("{}@{}", self.name, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HashAlgorithm;

    fn sample() -> Component {
        Component::from_options(
            "libfoo",
            ComponentOptions {
                publisher: Some("Foo Authors".to_string()),
                version: Some("1.2.0".to_string()),
                purls: BTreeSet::from(["pkg:generic/libfoo@1.2.0".to_string()]),
                hashes: BTreeSet::from([Hash::new(HashAlgorithm::Sha256, "aa")]),
                licenses: BTreeSet::from(["MIT".to_string()]),
                ..Default::default()
            },
        )
    }

    #[test]
    fn one_step_construction() {
        let component = sample();
        assert_eq!(component.name, "libfoo");
        assert_eq!(component.display_name(), "libfoo@1.2.0");
        assert!(component.conflicts.is_empty());
    }

    #[test]
    fn content_hash_is_stable_and_field_sensitive() {
        let a = sample();
        let b = sample();
        assert_eq!(a.content_hash(), b.content_hash());
        assert!(a.fields_match(&b));

        let mut c = sample();
        c.version = Some("1.3.0".to_string());
        assert!(!a.fields_match(&c));
    }

    #[test]
    fn conflicts_do_not_affect_content_hash() {
        let a = sample();
        let mut b = sample();
        b.conflicts.push(Conflict::component_not_found(Some("libfoo"), None));
        assert!(a.fields_match(&b));
    }

    #[test]
    fn kind_is_pattern_matchable() {
        let component = Component::from_options(
            "notice.txt",
            ComponentOptions {
                kind: ComponentKind::File(FileFields {
                    file_notice: Some("Copyright".to_string()),
                    file_types: vec!["TEXT".to_string()],
                }),
                ..Default::default()
            },
        );
        match &component.kind {
            ComponentKind::File(fields) => {
                assert_eq!(fields.file_notice.as_deref(), Some("Copyright"));
            }
            other => panic!("expected file fields, got {other:?}"),
        }
    }
}

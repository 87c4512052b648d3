//! Unified error types for sbom-reconcile.
//!
//! Errors carry enough structured context (field names, node ids, document
//! counts) to render a diagnostic without re-parsing the offending input.
//! Field-level disagreements between documents are *not* errors; they are
//! [`Conflict`](crate::conflict::Conflict) data.

use thiserror::Error;

use crate::model::NodeId;

/// Main error type for sbom-reconcile operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReconcileError {
    /// Errors while parsing an identifier string
    #[error("Failed to parse identifier: {context}")]
    Identifier {
        context: String,
        #[source]
        source: IdentifierErrorKind,
    },

    /// Errors during a merge operation
    #[error("Merge failed: {context}")]
    Merge {
        context: String,
        #[source]
        source: MergeErrorKind,
    },

    /// Reconciliation was asked to process zero documents
    #[error("Reconciliation requires at least one SBOM document")]
    EmptyReconciliation,
}

/// Specific identifier parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum IdentifierErrorKind {
    /// A CPE string missing one or more of its positional fields.
    /// `missing` lists every field that could not be extracted.
    #[error("malformed CPE '{input}': missing {missing}")]
    InvalidCpe { input: String, missing: String },

    /// A CPE part tag outside the `a`/`h`/`o` alphabet
    #[error("'{part}' is not a valid CPE part")]
    InvalidCpePart { part: String },

    /// A PURL string missing one or more mandatory fields.
    /// `missing` lists every mandatory field that could not be extracted.
    #[error("malformed PURL '{input}': missing {missing}")]
    InvalidPurl { input: String, missing: String },

    /// A PURL qualifier without a `key=value` shape
    #[error("malformed PURL qualifier '{qualifier}' in '{input}'")]
    InvalidPurlQualifier { input: String, qualifier: String },
}

/// Specific merge error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MergeErrorKind {
    /// A child edge references an identity key absent from the tree
    #[error("dangling edge: node {0} is not present in the tree")]
    DanglingEdge(NodeId),

    /// An insert referenced a parent key absent from the destination tree
    #[error("missing parent: node {0} is not present in the tree")]
    MissingParent(NodeId),
}

/// Convenient Result type for sbom-reconcile operations
pub type Result<T> = std::result::Result<T, ReconcileError>;

impl ReconcileError {
    /// Create an identifier parse error with context
    pub fn identifier(context: impl Into<String>, source: IdentifierErrorKind) -> Self {
        Self::Identifier {
            context: context.into(),
            source,
        }
    }

    /// Create a CPE parse error naming every missing field
    pub fn invalid_cpe(input: impl Into<String>, missing: &[&str]) -> Self {
        let input = input.into();
        Self::identifier(
            format!("CPE '{input}'"),
            IdentifierErrorKind::InvalidCpe {
                input,
                missing: missing.join(", "),
            },
        )
    }

    /// Create a PURL parse error naming every missing mandatory field
    pub fn invalid_purl(input: impl Into<String>, missing: &[&str]) -> Self {
        let input = input.into();
        Self::identifier(
            format!("PURL '{input}'"),
            IdentifierErrorKind::InvalidPurl {
                input,
                missing: missing.join(", "),
            },
        )
    }

    /// Create a merge error with context
    pub fn merge(context: impl Into<String>, source: MergeErrorKind) -> Self {
        Self::Merge {
            context: context.into(),
            source,
        }
    }

    /// Create a merge error for an edge referencing a nonexistent node
    pub fn dangling_edge(context: impl Into<String>, node: NodeId) -> Self {
        Self::merge(context, MergeErrorKind::DanglingEdge(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpe_error_names_all_missing_fields() {
        let err = ReconcileError::invalid_cpe("cpe:2.3:a:vendor", &["target_sw", "target_hw"]);
        let display = format!("{err}");
        assert!(display.contains("CPE 'cpe:2.3:a:vendor'"), "{display}");

        match err {
            ReconcileError::Identifier {
                source: IdentifierErrorKind::InvalidCpe { missing, .. },
                ..
            } => {
                assert!(missing.contains("target_sw"));
                assert!(missing.contains("target_hw"));
            }
            other => panic!("expected InvalidCpe, got {other:?}"),
        }
    }

    #[test]
    fn purl_error_names_missing_fields() {
        let err = ReconcileError::invalid_purl("pkg:", &["type", "name"]);
        match err {
            ReconcileError::Identifier {
                source: IdentifierErrorKind::InvalidPurl { missing, .. },
                ..
            } => assert_eq!(missing, "type, name"),
            other => panic!("expected InvalidPurl, got {other:?}"),
        }
    }

    #[test]
    fn empty_reconciliation_display() {
        let err = ReconcileError::EmptyReconciliation;
        assert!(format!("{err}").contains("at least one"));
    }
}

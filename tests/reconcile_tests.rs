//! Integration tests for the N-way reconciliation driver.

use std::collections::BTreeSet;

use sbom_reconcile::conflict::MismatchType;
use sbom_reconcile::model::{
    Component, ComponentOptions, DependencyTree, DocumentMetadata, Sbom, SbomFormat,
};
use sbom_reconcile::{reconcile, ReconcileError};

// ============================================================================
// Fixture builders
// ============================================================================

fn component(name: &str, version: &str, purls: &[&str]) -> Component {
    Component::from_options(
        name,
        ComponentOptions {
            version: Some(version.to_string()),
            purls: purls.iter().map(|p| (*p).to_string()).collect::<BTreeSet<_>>(),
            ..Default::default()
        },
    )
}

fn sbom(format: SbomFormat, spec_version: &str, components: Vec<Component>) -> Sbom {
    let mut tree = DependencyTree::new();
    let root = tree
        .add_component(
            None,
            Component::from_options(
                "product",
                ComponentOptions {
                    unpackaged: true,
                    ..Default::default()
                },
            ),
        )
        .unwrap();
    for component in components {
        tree.add_component(Some(root), component).unwrap();
    }
    Sbom::new(DocumentMetadata::new(format, spec_version), tree)
}

// ============================================================================
// Boundary behavior
// ============================================================================

#[test]
fn empty_list_is_rejected_with_a_typed_error() {
    match reconcile(&[]) {
        Err(ReconcileError::EmptyReconciliation) => {}
        other => panic!("expected EmptyReconciliation, got {other:?}"),
    }
}

#[test]
fn single_document_yields_no_reports_and_one_variant_per_component() {
    let only = sbom(
        SbomFormat::CycloneDx,
        "1.4",
        vec![
            component("libfoo", "1.2.0", &["pkg:generic/libfoo@1.2.0"]),
            component("libbar", "3.0.0", &["pkg:generic/libbar@3.0.0"]),
        ],
    );

    let result = reconcile(&[only]).unwrap();
    assert!(result.reports.is_empty());
    assert_eq!(result.index.variants("libfoo").len(), 1);
    assert_eq!(result.index.variants("libbar").len(), 1);
    assert_eq!(
        result.index.variants("libfoo")[0].appearances,
        BTreeSet::from([0])
    );
}

// ============================================================================
// Report generation
// ============================================================================

#[test]
fn one_report_per_candidate_in_input_order() {
    let reference = sbom(
        SbomFormat::CycloneDx,
        "1.4",
        vec![component("A", "1.0", &[])],
    );
    let same = reference.clone();
    let different = sbom(SbomFormat::Spdx, "2.3", vec![component("A", "1.0", &[])]);

    let result = reconcile(&[reference, same, different]).unwrap();
    assert_eq!(result.reports.len(), 2);
    assert!(result.reports[0].is_clean());
    assert!(!result.reports[1].is_clean());
    assert!(result.reports[1]
        .document
        .iter()
        .any(|c| c.mismatch_type == MismatchType::OriginFormat));
}

#[test]
fn end_to_end_scenario_reference_vs_candidate() {
    let reference = sbom(
        SbomFormat::CycloneDx,
        "1.4",
        vec![
            component("A", "1.0", &["pkg:generic/a@1.0"]),
            component("B", "2.0", &["pkg:generic/b@2.0"]),
        ],
    );
    let candidate = sbom(
        SbomFormat::CycloneDx,
        "1.4",
        vec![
            component("A", "1.1", &["pkg:generic/a@1.0"]),
            component("C", "1.0", &["pkg:generic/c@1.0"]),
        ],
    );

    let result = reconcile(&[reference, candidate]).unwrap();
    let report = &result.reports[0];

    assert!(report.document.is_empty());

    // A: one version mismatch
    assert_eq!(report.components["A"].len(), 1);
    assert_eq!(report.components["A"][0].mismatch_type, MismatchType::Version);

    // B: present only in the reference
    assert_eq!(
        report.components["B"][0].mismatch_type,
        MismatchType::ComponentNotFound
    );
    assert_eq!(report.components["B"][0].target.as_deref(), Some("B"));
    assert_eq!(report.components["B"][0].other, None);

    // C: present only in the candidate
    assert_eq!(
        report.components["C"][0].mismatch_type,
        MismatchType::ComponentNotFound
    );
    assert_eq!(report.components["C"][0].target, None);
    assert_eq!(report.components["C"][0].other.as_deref(), Some("C"));

    let not_found: Vec<&str> = report
        .conflicts_of_type(MismatchType::ComponentNotFound)
        .map(|(name, _)| name)
        .collect();
    assert_eq!(not_found, vec!["B", "C"]);
}

// ============================================================================
// Aggregator determinism
// ============================================================================

#[test]
fn appearance_sets_track_document_indices_deterministically() {
    // libfoo appears in documents 0 and 2 with the same version but
    // different PURLs
    let doc0 = sbom(
        SbomFormat::CycloneDx,
        "1.4",
        vec![component("libfoo", "1.2.0", &["pkg:generic/libfoo@1.2.0"])],
    );
    let doc1 = sbom(SbomFormat::CycloneDx, "1.4", vec![]);
    let doc2 = sbom(
        SbomFormat::CycloneDx,
        "1.4",
        vec![component("libfoo", "1.2.0", &["pkg:deb/debian/libfoo@1.2.0"])],
    );

    let result = reconcile(&[doc0, doc1, doc2]).unwrap();

    let variants = result.index.variants("libfoo");
    assert_eq!(variants.len(), 1, "one ComponentVersion for libfoo");

    let variant = &variants[0];
    assert_eq!(variant.appearances, BTreeSet::from([0, 2]));

    assert_eq!(variant.purls.len(), 2);
    assert_eq!(
        variant.purls["pkg:generic/libfoo@1.2.0"].appearances,
        BTreeSet::from([0])
    );
    assert_eq!(
        variant.purls["pkg:deb/debian/libfoo@1.2.0"].appearances,
        BTreeSet::from([2])
    );
}

#[test]
fn distinct_versions_accumulate_as_variants_under_one_name() {
    let doc0 = sbom(
        SbomFormat::CycloneDx,
        "1.4",
        vec![component("libfoo", "1.2.0", &[])],
    );
    let doc1 = sbom(
        SbomFormat::CycloneDx,
        "1.4",
        vec![component("libfoo", "3.4.1", &[])],
    );

    let result = reconcile(&[doc0, doc1]).unwrap();
    let variants = result.index.variants("libfoo");
    assert_eq!(variants.len(), 2);
    assert_eq!(variants[0].appearances, BTreeSet::from([0]));
    assert_eq!(variants[1].appearances, BTreeSet::from([1]));

    let sorted = result.index.sorted_variants("libfoo");
    assert_eq!(sorted[0].version.as_deref(), Some("1.2.0"));
    assert_eq!(sorted[1].version.as_deref(), Some("3.4.1"));
}

#[test]
fn serializable_output() {
    let doc = sbom(
        SbomFormat::CycloneDx,
        "1.4",
        vec![component("libfoo", "1.2.0", &["pkg:generic/libfoo@1.2.0"])],
    );
    let result = reconcile(&[doc.clone(), doc]).unwrap();

    let json = serde_json::to_string(&result).expect("reconciliation serializes");
    assert!(json.contains("libfoo"));
}

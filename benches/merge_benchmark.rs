//! Merge and reconciliation throughput on synthetic trees.

use std::collections::BTreeSet;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sbom_reconcile::model::{
    Component, ComponentOptions, DependencyTree, DocumentMetadata, Sbom, SbomFormat,
};
use sbom_reconcile::{merge_pair, reconcile};

/// A root with `width` children, each with `depth` chained dependencies.
/// `variant` shifts version strings so merges see real conflicts.
fn synthetic_tree(width: usize, depth: usize, variant: usize) -> DependencyTree {
    let mut tree = DependencyTree::new();
    let root = tree
        .add_component(None, Component::new("app"))
        .expect("root insert");

    for w in 0..width {
        let mut parent = root;
        for d in 0..depth {
            let name = format!("lib-{w}-{d}");
            let version = format!("1.{d}.{}", variant % 3);
            let component = Component::from_options(
                name.as_str(),
                ComponentOptions {
                    version: Some(version.clone()),
                    purls: BTreeSet::from([format!("pkg:generic/{name}@{version}")]),
                    ..Default::default()
                },
            );
            parent = tree
                .add_component(Some(parent), component)
                .expect("child insert");
        }
    }
    tree
}

fn bench_merge_pair(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_pair");
    for size in [10usize, 50, 100] {
        let a = synthetic_tree(size, 5, 0);
        let b = synthetic_tree(size, 5, 1);
        group.bench_with_input(BenchmarkId::from_parameter(size * 5), &size, |bencher, _| {
            bencher.iter(|| merge_pair(black_box(&a), black_box(&b)).expect("merge"));
        });
    }
    group.finish();
}

fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");
    for documents in [2usize, 5, 10] {
        let sboms: Vec<Sbom> = (0..documents)
            .map(|variant| {
                Sbom::new(
                    DocumentMetadata::new(SbomFormat::CycloneDx, "1.4"),
                    synthetic_tree(20, 5, variant),
                )
            })
            .collect();
        group.bench_with_input(
            BenchmarkId::from_parameter(documents),
            &documents,
            |bencher, _| {
                bencher.iter(|| reconcile(black_box(&sboms)).expect("reconcile"));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_merge_pair, bench_reconcile);
criterion_main!(benches);

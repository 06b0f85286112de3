//! Benchmarks for metadata lookup and attachment.
//!
//! Measures the hot paths of annotation frameworks: resolving a record with and without
//! inheritance fallback, and appending attributes at registration time.

extern crate declmeta;

use criterion::{criterion_group, criterion_main, Criterion};
use declmeta::prelude::*;
use std::{hint::black_box, sync::Arc};

struct Tag;

/// Build a linear inheritance chain of `depth` entities with one attribute at the root,
/// so resolution from the leaf walks the whole chain.
fn chain_fixture(depth: u32) -> (Arc<MetadataRegistry>, EntityId) {
    let model = Arc::new(EntityModel::new());
    let root = model.define("Level0", EntityKind::Type, None).unwrap();
    let mut leaf = root;
    for i in 1..depth {
        leaf = model
            .define(&format!("Level{}", i), EntityKind::Type, Some(leaf))
            .unwrap();
    }
    let registry = Arc::new(MetadataRegistry::new(model));
    registry
        .add_attribute(Arc::new(Tag), root, None, None)
        .unwrap();
    (registry, leaf)
}

/// Benchmark own-level resolution of an existing record.
fn bench_own_lookup(c: &mut Criterion) {
    let (registry, leaf) = chain_fixture(1);
    registry.get_own_instance(leaf, None, None).unwrap();

    c.bench_function("own_lookup", |b| {
        b.iter(|| {
            let record = registry.get_own_instance(black_box(leaf), None, None).unwrap();
            black_box(record)
        });
    });
}

/// Benchmark inheritance-aware resolution that walks an 8-deep chain to the root.
fn bench_inherited_lookup(c: &mut Criterion) {
    let (registry, leaf) = chain_fixture(8);

    c.bench_function("inherited_lookup_depth8", |b| {
        b.iter(|| {
            let attributes = registry.get_attributes(black_box(leaf), None).unwrap();
            black_box(attributes)
        });
    });
}

/// Benchmark attribute registration on a member-level slot.
fn bench_add_attribute(c: &mut Criterion) {
    let (registry, leaf) = chain_fixture(1);

    c.bench_function("add_attribute", |b| {
        b.iter(|| {
            registry
                .add_attribute(Arc::new(Tag), black_box(leaf), Some("speak".into()), None)
                .unwrap();
        });
    });
}

criterion_group!(
    benches,
    bench_own_lookup,
    bench_inherited_lookup,
    bench_add_attribute,
);
criterion_main!(benches);

// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build and query throughput of the two index flavours.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use canopy_index::{Point, RTree, RsTree};
use canopy_shapes::Rect;

const MAX_ENTRIES: usize = 32;
const MIN_ENTRIES: usize = 8;

/// Small unit rectangles scattered over a `side` by `side` grid, perturbed
/// so column boxes do not stack exactly.
fn grid_rects(count: usize, side: usize) -> Vec<Rect> {
    let mut state = 0x2545_f491_4f6c_dd1d_u64;
    (0..count)
        .map(|i| {
            // xorshift64*, plenty for bench data.
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let jitter = (state % 1000) as f64 / 2000.0;
            let x = (i % side) as f64 + jitter;
            let y = (i / side) as f64 + jitter;
            Rect::new(x, y, x + 1.0, y + 1.0).unwrap()
        })
        .collect()
}

/// Overlapping rectangles packed into a handful of dense clusters, the
/// workload where overlap-aware splits pay off.
fn clustered_rects(count: usize) -> Vec<Rect> {
    let mut state = 0x9e37_79b9_7f4a_7c15_u64;
    (0..count)
        .map(|i| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let cluster = (i % 8) as f64 * 100.0;
            let x = cluster + (state % 100) as f64 / 10.0;
            let y = cluster + ((state >> 32) % 100) as f64 / 10.0;
            Rect::new(x, y, x + 3.0, y + 3.0).unwrap()
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for &size in &[1_000, 10_000] {
        let rects = grid_rects(size, 100);
        group.bench_with_input(BenchmarkId::new("rtree", size), &rects, |b, rects| {
            b.iter(|| {
                let mut tree = RTree::new(MAX_ENTRIES, MIN_ENTRIES).unwrap();
                for &rect in rects {
                    tree.insert(rect);
                }
                black_box(tree.len())
            });
        });
        group.bench_with_input(BenchmarkId::new("rstar", size), &rects, |b, rects| {
            b.iter(|| {
                let mut tree = RsTree::new(MAX_ENTRIES, MIN_ENTRIES).unwrap();
                for &rect in rects {
                    tree.insert(rect);
                }
                black_box(tree.len())
            });
        });
    }

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");

    let rects = clustered_rects(10_000);
    let mut rtree = RTree::new(MAX_ENTRIES, MIN_ENTRIES).unwrap();
    let mut rstar = RsTree::new(MAX_ENTRIES, MIN_ENTRIES).unwrap();
    for &rect in &rects {
        rtree.insert(rect);
        rstar.insert(rect);
    }
    let probes: Vec<Point> = (0..100)
        .map(|i| {
            let cluster = (i % 8) as f64 * 100.0;
            Point::new(cluster + (i % 10) as f64, cluster + (i / 10) as f64)
        })
        .collect();
    let window = canopy_index::BoundingBox::new(100.0, 100.0, 140.0, 140.0).unwrap();

    group.bench_function("rtree/point", |b| {
        b.iter(|| {
            for &p in &probes {
                black_box(rtree.search_point(p));
            }
        });
    });
    group.bench_function("rstar/point", |b| {
        b.iter(|| {
            for &p in &probes {
                black_box(rstar.search_point(p));
            }
        });
    });
    group.bench_function("rtree/box", |b| {
        b.iter(|| black_box(rtree.search_box(&window)));
    });
    group.bench_function("rstar/box", |b| {
        b.iter(|| black_box(rstar.search_box(&window)));
    });

    group.finish();
}

criterion_group!(benches, bench_build, bench_queries);
criterion_main!(benches);

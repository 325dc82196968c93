// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use arbor_index::{EuclideanSq, Index};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rstar::RTree;

fn gen_grid_points(n: usize, cell: f64) -> Vec<[f64; 2]> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            // Offset odd rows so nearest queries are not all ties.
            let shift = if y % 2 == 1 { cell * 0.5 } else { 0.0 };
            out.push([x as f64 * cell + shift, y as f64 * cell]);
        }
    }
    out
}

fn gen_queries(count: usize, max: f64) -> Vec<[f64; 2]> {
    (0..count)
        .map(|i| {
            let t = i as f64 / count as f64;
            [t * max, (1.0 - t) * max * 0.5 + max * 0.25]
        })
        .collect()
}

fn bench_nearest_external_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_external_compare");
    for &n in &[64usize, 128] {
        let points = gen_grid_points(n, 10.0);
        let queries = gen_queries(256, n as f64 * 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("arbor_build_query_n{}", n), |b| {
            b.iter_batched(
                || points.clone(),
                |points| {
                    let mut idx: Index<[f64; 2]> = Index::new(2).unwrap();
                    idx.build(points).unwrap();
                    for q in &queries {
                        black_box(idx.nearest(&EuclideanSq, q).unwrap());
                    }
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_query_bulk_n{}", n), |b| {
            b.iter_batched(
                || points.clone(),
                |points| {
                    let tree = RTree::bulk_load(points);
                    for q in &queries {
                        black_box(tree.nearest_neighbor(q));
                    }
                },
                BatchSize::SmallInput,
            )
        });

        let mut idx: Index<[f64; 2]> = Index::new(2).unwrap();
        idx.build(points.clone()).unwrap();
        group.bench_function(format!("arbor_k8_query_n{}", n), |b| {
            b.iter(|| {
                for q in &queries {
                    black_box(idx.k_nearest(&EuclideanSq, 8, q).unwrap());
                }
            })
        });

        let tree = RTree::bulk_load(points);
        group.bench_function(format!("rstar_k8_query_n{}", n), |b| {
            b.iter(|| {
                for q in &queries {
                    black_box(tree.nearest_neighbor_iter(q).take(8).count());
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_nearest_external_compare);
criterion_main!(benches);

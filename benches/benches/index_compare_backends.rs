// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use arbor_index::{AxisRange, Euclidean, EuclideanSq, FlatVec, Index, IndexGeneric};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_grid_points(n: usize, cell: f64) -> Vec<[f64; 2]> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push([x as f64 * cell, y as f64 * cell]);
        }
    }
    out
}

fn gen_random_points(count: usize, max: f64) -> Vec<[f64; 2]> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| [rng.next_f64() * max, rng.next_f64() * max])
        .collect()
}

fn gen_random_points_3d(count: usize, max: f64) -> Vec<[f64; 3]> {
    let mut rng = Rng::new(0xFACE_FEED_CAFE_BABE);
    (0..count)
        .map(|_| [rng.next_f64() * max, rng.next_f64() * max, rng.next_f64() * max])
        .collect()
}

fn gen_clustered_points(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<[f64; 2]> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((rng.next_f64() * 2000.0, rng.next_f64() * 2000.0));
    }
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push([cx + dx, cy + dy]);
        }
    }
    out
}

fn gen_queries(count: usize, max: f64) -> Vec<[f64; 2]> {
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    (0..count)
        .map(|_| [rng.next_f64() * max, rng.next_f64() * max])
        .collect()
}

fn kd_index(points: &[[f64; 2]]) -> Index<[f64; 2]> {
    let mut idx = Index::new(2).unwrap();
    idx.build(points.to_vec()).unwrap();
    idx
}

fn flat_index(points: &[[f64; 2]]) -> IndexGeneric<[f64; 2], FlatVec> {
    let mut idx = Index::with_flat_vec(2).unwrap();
    idx.build(points.to_vec()).unwrap();
    idx
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &n in &[32usize, 64, 128] {
        let points = gen_grid_points(n, 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("kdtree_grid_n{}", n), |b| {
            b.iter_batched(
                || points.clone(),
                |points| {
                    let mut idx: Index<[f64; 2]> = Index::new(2).unwrap();
                    idx.build(points).unwrap();
                    black_box(idx.len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    let points = gen_random_points(16_384, 2000.0);
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("kdtree_random", |b| {
        b.iter_batched(
            || points.clone(),
            |points| {
                let mut idx: Index<[f64; 2]> = Index::new(2).unwrap();
                idx.build(points).unwrap();
                black_box(idx.len());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest");
    let queries = gen_queries(256, 2000.0);
    group.throughput(Throughput::Elements(queries.len() as u64));
    for &n in &[1_024usize, 16_384] {
        let points = gen_random_points(n, 2000.0);
        let kd = kd_index(&points);
        group.bench_function(format!("kdtree_random_n{}", n), |b| {
            b.iter(|| {
                for q in &queries {
                    black_box(kd.nearest(&EuclideanSq, q).unwrap());
                }
            })
        });
        let flat = flat_index(&points);
        group.bench_function(format!("flatvec_random_n{}", n), |b| {
            b.iter(|| {
                for q in &queries {
                    black_box(flat.nearest(&EuclideanSq, q).unwrap());
                }
            })
        });
    }
    let clustered = gen_clustered_points(16, 256, 128.0);
    let kd = kd_index(&clustered);
    group.bench_function("kdtree_clustered", |b| {
        b.iter(|| {
            for q in &queries {
                black_box(kd.nearest(&Euclidean, q).unwrap());
            }
        })
    });
    group.finish();
}

fn bench_k_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("k_nearest");
    let points = gen_random_points(16_384, 2000.0);
    let queries = gen_queries(256, 2000.0);
    let kd = kd_index(&points);
    let flat = flat_index(&points);
    group.throughput(Throughput::Elements(queries.len() as u64));
    for &k in &[1usize, 4, 16] {
        group.bench_function(format!("kdtree_k{}", k), |b| {
            b.iter(|| {
                for q in &queries {
                    black_box(kd.k_nearest(&EuclideanSq, k, q).unwrap());
                }
            })
        });
        group.bench_function(format!("flatvec_k{}", k), |b| {
            b.iter(|| {
                for q in &queries {
                    black_box(flat.k_nearest(&EuclideanSq, k, q).unwrap());
                }
            })
        });
    }
    let points = gen_random_points_3d(16_384, 100.0);
    let mut kd3: Index<[f64; 3]> = Index::new(3).unwrap();
    kd3.build(points).unwrap();
    group.bench_function("kdtree_3d_k8", |b| {
        b.iter(|| {
            for q in &queries {
                let p = [q[0] / 20.0, q[1] / 20.0, 50.0];
                black_box(kd3.k_nearest(&Euclidean, 8, &p).unwrap());
            }
        })
    });
    group.finish();
}

fn bench_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("range");
    let points = gen_grid_points(128, 8.0);
    let kd = kd_index(&points);
    let flat = flat_index(&points);
    let windows: Vec<[AxisRange; 2]> = (0..256)
        .map(|q| {
            let x = (q % 16) as f64 * 64.0;
            let y = (q / 16) as f64 * 64.0;
            [AxisRange::new(x, x + 64.0), AxisRange::new(y, y + 64.0)]
        })
        .collect();
    group.throughput(Throughput::Elements(windows.len() as u64));
    group.bench_function("kdtree_windows", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for w in &windows {
                total += kd.query_range(w).unwrap().len();
            }
            black_box(total);
        })
    });
    group.bench_function("flatvec_windows", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for w in &windows {
                total += flat.query_range(w).unwrap().len();
            }
            black_box(total);
        })
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_nearest, bench_k_nearest, bench_range);
criterion_main!(benches);

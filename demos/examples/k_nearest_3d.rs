// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! k-nearest in 3D under several metrics, checked against the linear-scan backend.
//!
//! Closures work as metrics too; the last query weights the vertical axis.
//!
//! Run:
//! - `cargo run -p arbor_demos --example k_nearest_3d`

use arbor_index::{
    Canberra, Chebyshev, DistanceMetric, Euclidean, Index, Indexable, Manhattan,
};

#[derive(Debug, Clone, PartialEq)]
struct Star {
    name: String,
    pos: [f64; 3],
}

impl Indexable for Star {
    fn coordinates(&self) -> &[f64] {
        &self.pos
    }
}

fn stars() -> Vec<Star> {
    let mut out = Vec::new();
    for i in 0..8 {
        for j in 0..8 {
            for k in 0..8 {
                let jitter = ((i * 31 + j * 17 + k * 7) % 11) as f64 * 0.05;
                out.push(Star {
                    name: format!("s{i}{j}{k}"),
                    pos: [i as f64 + jitter, j as f64 - jitter, k as f64 + 0.5 * jitter],
                });
            }
        }
    }
    out
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut kd: Index<Star> = Index::new(3)?;
    kd.build(stars())?;
    let mut flat = Index::<Star>::with_flat_vec(3)?;
    flat.build(stars())?;

    let query = [3.3, 4.1, 2.7];
    let weighted = |a: &[f64], b: &[f64]| {
        a.iter()
            .zip(b)
            .zip([1.0, 1.0, 4.0])
            .map(|((x, y), w)| w * (x - y).abs())
            .sum::<f64>()
    };
    let metrics: [(&str, &dyn DistanceMetric); 5] = [
        ("euclidean", &Euclidean),
        ("manhattan", &Manhattan),
        ("chebyshev", &Chebyshev),
        ("weighted", &weighted),
        ("canberra", &Canberra),
    ];

    for (label, metric) in metrics {
        let tree: Vec<_> = kd.k_nearest_with_distances(metric, 5, &query)?;
        let scan: Vec<_> = flat.k_nearest_with_distances(metric, 5, &query)?;
        let names: Vec<&str> = tree.iter().map(|n| n.item.name.as_str()).collect();
        let same = tree
            .iter()
            .zip(&scan)
            .all(|(a, b)| a.distance == b.distance);
        println!("{label:>10}: {names:?} (matches linear scan: {same})");
    }
    Ok(())
}

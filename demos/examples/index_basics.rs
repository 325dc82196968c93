// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Arbor Index: build, membership, range, and nearest queries.
//!
//! Run:
//! - `cargo run -p arbor_demos --example index_basics`

use arbor_index::{AxisRange, Euclidean, Index, Manhattan};

fn main() -> Result<(), arbor_index::Error> {
    let mut idx: Index<[f64; 2]> = Index::new(2)?;
    idx.build(vec![
        [5.0, 5.0],
        [6.0, 7.0],
        [8.0, 6.0],
        [7.0, 9.0],
        [9.0, 8.0],
        [1.0, 1.0],
    ])?;
    println!("{:?}", idx);

    println!("contains (8,6): {}", idx.contains(&[8.0, 6.0]));
    println!("contains (8,7): {}", idx.contains(&[8.0, 7.0]));

    let boxed = idx.query_range(&[AxisRange::new(5.0, 8.0), AxisRange::new(5.0, 8.0)])?;
    println!("in [5,8]x[5,8]: {:?}", boxed);

    let near = idx.nearest(&Euclidean, &[0.0, 0.0])?;
    println!("nearest to (0,0): {:?}", near);

    for n in idx.k_nearest_with_distances(&Manhattan, 3, &[10.0, 10.0])? {
        println!("  {:?} at manhattan distance {}", n.item, n.distance);
    }

    // Bad arity is an error, not a panic.
    if let Err(e) = idx.nearest(&Euclidean, &[0.0, 0.0, 0.0]) {
        println!("rejected: {e}");
    }
    Ok(())
}

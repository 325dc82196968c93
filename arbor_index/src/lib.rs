// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Index: a static n-dimensional point index.
//!
//! Arbor Index answers four kinds of query over a fixed set of points:
//!
//! - Membership: is this exact item indexed?
//! - Range: which items lie inside an axis-aligned box (inclusive on both ends)?
//! - Nearest: which item is closest to a query point under a chosen metric?
//! - k-nearest: which `k` items are closest, ordered best to worst?
//!
//! Items are anything implementing [`Indexable`], which exposes a coordinate
//! slice. Metrics are anything implementing [`DistanceMetric`], including plain
//! closures. The index is rebuilt wholesale from a point set; there is no
//! incremental insert. Growing the corpus with [`Index::extend`] repartitions
//! everything.
//!
//! # Example
//!
//! ```rust
//! use arbor_index::{AxisRange, Euclidean, Index};
//!
//! let mut idx: Index<[f64; 2]> = Index::new(2)?;
//! idx.build(vec![[5.0, 5.0], [6.0, 7.0], [8.0, 6.0], [1.0, 1.0]])?;
//!
//! assert!(idx.contains(&[6.0, 7.0]));
//! assert_eq!(idx.nearest(&Euclidean, &[0.0, 0.0])?, Some(&[1.0, 1.0]));
//!
//! let two = idx.k_nearest(&Euclidean, 2, &[7.0, 7.0])?;
//! assert_eq!(two, [&[6.0, 7.0], &[8.0, 6.0]]);
//!
//! let boxed = idx.query_range(&[AxisRange::new(4.0, 7.0), AxisRange::new(4.0, 7.0)])?;
//! assert_eq!(boxed.len(), 2);
//! # Ok::<(), arbor_index::Error>(())
//! ```
//!
//! ## Choosing a backend
//!
//! - [`KdTree`] (default): median-split k-d tree. Logarithmic queries in the
//!   typical case; build cost is `O(n log² n)` since each level sorts its slice.
//! - [`FlatVec`]: linear scans. Exact under any metric and cheapest to rebuild;
//!   good for a handful of points.
//!
//! ## Metrics and pruning
//!
//! k-d nearest searches skip a subtree when the query's distance to the
//! splitting plane, measured on the split axis alone, exceeds the best distance
//! found so far. That is only safe for metrics where a one-axis distance never
//! exceeds the full distance: [`Euclidean`], [`EuclideanSq`], [`Manhattan`] and
//! [`Chebyshev`] qualify. [`Canberra`] does not; with it, k-d results may miss
//! the true nearest item. Use [`FlatVec`] when that matters.
//!
//! ### Float semantics
//!
//! Coordinates are `f64`. Construction orders NaN after every number, and a NaN
//! never satisfies a range or membership comparison. Keep NaNs out of indexed
//! items for meaningful results.
//!
//! ## Concurrency
//!
//! Queries take `&self` and never mutate, so a built index can be shared across
//! threads whenever its items can. Rebuilding takes `&mut self`.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod backend;
pub mod backends;
pub mod error;
pub mod index;
pub mod metric;
pub mod neighbors;
pub mod types;

pub use backend::Backend;
pub use backends::flatvec::FlatVec;
pub use backends::kdtree::KdTree;
pub use error::{Error, InvalidArgument};
pub use index::{Index, IndexGeneric, Neighbor};
pub use metric::{Canberra, Chebyshev, DistanceMetric, Euclidean, EuclideanSq, Manhattan};
pub use neighbors::{Candidate, Candidates};
pub use types::{AxisRange, Indexable};

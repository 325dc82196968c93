// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations for different spatial strategies.
//!
//! - `kdtree`: median-split k-d tree; logarithmic queries for metrics that
//!   never let a one-axis distance exceed the full distance.
//! - `flatvec`: flat vector with linear scans (small, simple, exact for any metric).
//!
//! Pruning note
//! ------------
//! After searching the child on the query's side of a split, the k-d tree
//! measures the query's distance to the splitting plane with the same metric,
//! restricted to the split axis. The other child is skipped only when that
//! distance exceeds the current best (or, for k-nearest, the worst of `k`
//! kept candidates). Any item on the far side is at least that far away on the
//! split axis alone, so skipping it is safe exactly when the metric's one-axis
//! distance is a lower bound on its full distance.

pub mod flatvec;
pub mod kdtree;

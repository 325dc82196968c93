// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for spatial indexing implementations.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::metric::DistanceMetric;
use crate::neighbors::Candidate;
use crate::types::{AxisRange, Indexable};

/// Spatial backend abstraction used by `IndexGeneric`.
///
/// The index front-end owns the items and validates every argument; a backend
/// only ever sees slices whose items have exactly `dimensions` coordinates, query
/// points of that length, and bounds lists of that length. Backends refer to items
/// by slot, their position in the item slice.
pub trait Backend<I: Indexable> {
    /// Discard any previous structure and build over `items`.
    ///
    /// Backends may reorder `items` in place; slots reported afterwards refer to
    /// the reordered slice.
    fn rebuild(&mut self, items: &mut [I], dimensions: usize);

    /// Clear all spatial structures.
    fn clear(&mut self);

    /// Visit slots whose item could sit at `coords` until `is_hit` returns true.
    ///
    /// Returns whether a hit was found.
    fn query_point(
        &self,
        items: &[I],
        coords: &[f64],
        is_hit: &mut dyn FnMut(usize) -> bool,
    ) -> bool;

    /// Query slots whose item lies inside every axis range of `bounds`.
    fn query_range<'a>(
        &'a self,
        items: &'a [I],
        bounds: &'a [AxisRange],
    ) -> Box<dyn Iterator<Item = usize> + 'a>;

    /// The slot closest to `point` under `metric`, or `None` if empty.
    fn nearest(
        &self,
        items: &[I],
        metric: &dyn DistanceMetric,
        point: &[f64],
    ) -> Option<Candidate>;

    /// Up to `k` slots closest to `point`, best first. `k` is at least 1.
    fn k_nearest(
        &self,
        items: &[I],
        metric: &dyn DistanceMetric,
        k: usize,
        point: &[f64],
    ) -> Vec<Candidate>;
}

// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector backend with linear scans. Small and simple; good for tiny sets.
//!
//! Every query looks at every item, so results are exact for any metric,
//! including ones that break k-d pruning such as [`Canberra`](crate::Canberra).

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::metric::DistanceMetric;
use crate::neighbors::{Candidate, Candidates};
use crate::types::{AxisRange, Indexable, in_bounds};

/// Flat vector backend with linear scans.
///
/// Leaves item order untouched on rebuild.
#[derive(Default)]
pub struct FlatVec {
    len: usize,
}

impl<I: Indexable> Backend<I> for FlatVec {
    fn rebuild(&mut self, items: &mut [I], _dimensions: usize) {
        self.len = items.len();
    }

    fn clear(&mut self) {
        self.len = 0;
    }

    fn query_point(
        &self,
        items: &[I],
        _coords: &[f64],
        is_hit: &mut dyn FnMut(usize) -> bool,
    ) -> bool {
        (0..self.len.min(items.len())).any(is_hit)
    }

    fn query_range<'a>(
        &'a self,
        items: &'a [I],
        bounds: &'a [AxisRange],
    ) -> Box<dyn Iterator<Item = usize> + 'a> {
        let mut out = Vec::new();
        for (i, item) in items.iter().enumerate().take(self.len) {
            if in_bounds(item.coordinates(), bounds) {
                out.push(i);
            }
        }
        Box::new(out.into_iter())
    }

    fn nearest(
        &self,
        items: &[I],
        metric: &dyn DistanceMetric,
        point: &[f64],
    ) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;
        for (slot, item) in items.iter().enumerate().take(self.len) {
            let distance = metric.distance(item.coordinates(), point);
            if best.is_none_or(|b| distance < b.distance) {
                best = Some(Candidate { slot, distance });
            }
        }
        best
    }

    fn k_nearest(
        &self,
        items: &[I],
        metric: &dyn DistanceMetric,
        k: usize,
        point: &[f64],
    ) -> Vec<Candidate> {
        let mut best = Candidates::new(k.min(self.len));
        for (slot, item) in items.iter().enumerate().take(self.len) {
            best.offer(Candidate {
                slot,
                distance: metric.distance(item.coordinates(), point),
            });
        }
        best.into_vec()
    }
}

impl Debug for FlatVec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlatVec")
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

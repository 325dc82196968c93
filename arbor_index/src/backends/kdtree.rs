// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! k-d tree backend: median-split construction with branch-and-bound nearest searches.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::metric::DistanceMetric;
use crate::neighbors::{Candidate, Candidates};
use crate::types::{AxisRange, Indexable, cmp_axis, ge, in_bounds, le};

/// A k-d tree over item slots.
///
/// Each node splits on axis `depth % dimensions` at the median item of its
/// subtree. Items in a node's left subtree have a coordinate on that axis no
/// greater than the pivot's; items in its right subtree have one no smaller.
/// Items equal to the pivot on the axis may end up on either side, so point and
/// range queries descend both ways on ties.
#[derive(Default)]
pub struct KdTree {
    root: Option<Box<Node>>,
    nodes: usize,
    height: usize,
}

struct Node {
    axis: usize,
    slot: usize,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    /// Children ordered (near, far) relative to `point` on this node's axis.
    fn sides(&self, point: &[f64], split: f64) -> (Option<&Self>, Option<&Self>) {
        if point[self.axis] <= split {
            (self.left.as_deref(), self.right.as_deref())
        } else {
            (self.right.as_deref(), self.left.as_deref())
        }
    }
}

impl KdTree {
    /// Number of nodes, one per indexed item.
    pub fn len(&self) -> usize {
        self.nodes
    }

    /// True if the tree holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes on the longest root-to-leaf path; zero when empty.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Build the subtree over `items`, whose first element sits at slot `base`.
    ///
    /// Returns the subtree and its height.
    fn build<I: Indexable>(
        items: &mut [I],
        base: usize,
        depth: usize,
        dimensions: usize,
    ) -> (Option<Box<Node>>, usize) {
        if items.is_empty() {
            return (None, 0);
        }
        let axis = depth % dimensions;
        items.sort_by(|a, b| cmp_axis(a, b, axis));

        let median = items.len() / 2;
        let (below, rest) = items.split_at_mut(median);
        let above = &mut rest[1..];
        let (left, lh) = Self::build(below, base, depth + 1, dimensions);
        let (right, rh) = Self::build(above, base + median + 1, depth + 1, dimensions);
        let node = Node {
            axis,
            slot: base + median,
            left,
            right,
        };
        (Some(Box::new(node)), 1 + lh.max(rh))
    }

    fn search_nearest<I: Indexable>(
        node: &Node,
        items: &[I],
        metric: &dyn DistanceMetric,
        point: &[f64],
        best: &mut Option<Candidate>,
    ) {
        let pivot = items[node.slot].coordinates();
        let split = pivot[node.axis];
        let (near, far) = node.sides(point, split);

        // Reach a leaf first so the bound tightens before any pruning decision.
        if let Some(near) = near {
            Self::search_nearest(near, items, metric, point, best);
        }

        let distance = metric.distance(pivot, point);
        if best.is_none_or(|b| distance < b.distance) {
            *best = Some(Candidate {
                slot: node.slot,
                distance,
            });
        }

        let to_split = metric.distance(&[point[node.axis]], &[split]);
        if let Some(far) = far
            && best.is_none_or(|b| to_split <= b.distance)
        {
            Self::search_nearest(far, items, metric, point, best);
        }
    }

    fn search_k_nearest<I: Indexable>(
        node: &Node,
        items: &[I],
        metric: &dyn DistanceMetric,
        point: &[f64],
        best: &mut Candidates,
    ) {
        let pivot = items[node.slot].coordinates();
        let split = pivot[node.axis];
        let (near, far) = node.sides(point, split);

        if let Some(near) = near {
            Self::search_k_nearest(near, items, metric, point, best);
        }

        best.offer(Candidate {
            slot: node.slot,
            distance: metric.distance(pivot, point),
        });

        // The worst kept candidate bounds the far side; with free slots there is no bound.
        let to_split = metric.distance(&[point[node.axis]], &[split]);
        if let Some(far) = far
            && best.bound().is_none_or(|worst| to_split <= worst)
        {
            Self::search_k_nearest(far, items, metric, point, best);
        }
    }
}

impl<I: Indexable> Backend<I> for KdTree {
    fn rebuild(&mut self, items: &mut [I], dimensions: usize) {
        debug_assert!(dimensions > 0, "a k-d tree needs at least one axis");
        let (root, height) = Self::build(items, 0, 0, dimensions);
        self.root = root;
        self.nodes = items.len();
        self.height = height;
    }

    fn clear(&mut self) {
        self.root = None;
        self.nodes = 0;
        self.height = 0;
    }

    fn query_point(
        &self,
        items: &[I],
        coords: &[f64],
        is_hit: &mut dyn FnMut(usize) -> bool,
    ) -> bool {
        let Some(root) = self.root.as_deref() else {
            return false;
        };
        let mut stack = vec![root];
        while let Some(n) = stack.pop() {
            if is_hit(n.slot) {
                return true;
            }
            let pivot = items[n.slot].coordinates()[n.axis];
            let probe = coords[n.axis];
            // Push right first so the left side is searched first.
            if ge(probe, pivot)
                && let Some(right) = n.right.as_deref()
            {
                stack.push(right);
            }
            if le(probe, pivot)
                && let Some(left) = n.left.as_deref()
            {
                stack.push(left);
            }
        }
        false
    }

    fn query_range<'a>(
        &'a self,
        items: &'a [I],
        bounds: &'a [AxisRange],
    ) -> Box<dyn Iterator<Item = usize> + 'a> {
        let mut out = Vec::new();
        let Some(root) = self.root.as_deref() else {
            return Box::new(out.into_iter());
        };
        let mut stack = vec![root];
        while let Some(n) = stack.pop() {
            let coords = items[n.slot].coordinates();
            if in_bounds(coords, bounds) {
                out.push(n.slot);
            }

            let range = bounds[n.axis];
            let pivot = coords[n.axis];
            let straddles = range.contains(pivot);
            if (straddles || ge(range.min, pivot))
                && let Some(right) = n.right.as_deref()
            {
                stack.push(right);
            }
            if (straddles || le(range.max, pivot))
                && let Some(left) = n.left.as_deref()
            {
                stack.push(left);
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
        let root = self.root.as_deref()?;
        let mut best = None;
        Self::search_nearest(root, items, metric, point, &mut best);
        best
    }

    fn k_nearest(
        &self,
        items: &[I],
        metric: &dyn DistanceMetric,
        k: usize,
        point: &[f64],
    ) -> Vec<Candidate> {
        let Some(root) = self.root.as_deref() else {
            return Vec::new();
        };
        let mut best = Candidates::new(k.min(self.nodes));
        Self::search_k_nearest(root, items, metric, point, &mut best);
        best.into_vec()
    }
}

impl Debug for KdTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KdTree")
            .field("nodes", &self.nodes)
            .field("height", &self.height)
            .field("has_root", &self.root.is_some())
            .finish_non_exhaustive()
    }
}

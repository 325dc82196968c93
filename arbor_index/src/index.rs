// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `Index` API and generic implementation over a pluggable backend.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::backends::flatvec::FlatVec;
use crate::backends::kdtree::KdTree;
use crate::error::{Error, InvalidArgument};
use crate::metric::DistanceMetric;
use crate::neighbors::Candidate;
use crate::types::{AxisRange, Indexable};

/// An item returned by a nearest-neighbor query, with its distance to the query point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Neighbor<'a, I> {
    /// The indexed item.
    pub item: &'a I,
    /// Metric distance from the query point.
    pub distance: f64,
}

/// A static point index parameterized by a spatial backend.
///
/// The index owns its items. [`build`](Self::build) replaces them wholesale and
/// queries borrow from them until the next rebuild.
pub struct IndexGeneric<I: Indexable, B: Backend<I>> {
    dimensions: usize,
    items: Vec<I>,
    backend: B,
}

impl<I, B> IndexGeneric<I, B>
where
    I: Indexable,
    B: Backend<I> + Default,
{
    /// Create an empty index over `dimensions` axes using the backend's default constructor.
    pub fn new(dimensions: usize) -> Result<Self, Error> {
        Self::with_backend(dimensions, B::default())
    }
}

impl<I, B> IndexGeneric<I, B>
where
    I: Indexable,
    B: Backend<I>,
{
    /// Create an empty index over `dimensions` axes using `backend`.
    pub fn with_backend(dimensions: usize, mut backend: B) -> Result<Self, Error> {
        if dimensions == 0 {
            return Err(InvalidArgument::ZeroDimensions.into());
        }
        backend.clear();
        Ok(Self {
            dimensions,
            items: Vec::new(),
            backend,
        })
    }

    /// Number of coordinates every item must have.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Number of indexed items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The indexed items, in the order the backend left them.
    pub fn items(&self) -> &[I] {
        &self.items
    }

    /// The spatial backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Consume the index and return its items.
    pub fn into_items(self) -> Vec<I> {
        self.items
    }

    /// Replace the indexed items and rebuild the backend.
    ///
    /// Every item must have exactly [`dimensions`](Self::dimensions) coordinates;
    /// otherwise nothing changes and [`Error::DimensionMismatch`] is returned.
    /// The backend may reorder `items`, which [`items`](Self::items) then reflects.
    pub fn build(&mut self, items: Vec<I>) -> Result<(), Error> {
        self.check_items(&items)?;
        self.items = items;
        self.rebuild();
        Ok(())
    }

    /// Append items to the corpus and rebuild the backend over all of them.
    ///
    /// There is no incremental insert: the whole corpus is repartitioned. On a
    /// dimension mismatch nothing is appended.
    pub fn extend<It>(&mut self, items: It) -> Result<(), Error>
    where
        It: IntoIterator<Item = I>,
    {
        let more: Vec<I> = items.into_iter().collect();
        self.check_items(&more)?;
        tracing::trace!(
            existing = self.items.len(),
            added = more.len(),
            "growing index corpus"
        );
        self.items.extend(more);
        self.rebuild();
        Ok(())
    }

    /// Remove every item, keeping the dimensionality.
    pub fn clear(&mut self) {
        self.items.clear();
        self.backend.clear();
    }

    /// Whether an item equal to `item` is indexed.
    ///
    /// An item with the wrong number of coordinates is never contained.
    pub fn contains(&self, item: &I) -> bool
    where
        I: PartialEq,
    {
        let coords = item.coordinates();
        if coords.len() != self.dimensions {
            return false;
        }
        let items = &self.items;
        self.backend
            .query_point(items, coords, &mut |slot: usize| items[slot] == *item)
    }

    /// All items whose every coordinate lies within the matching range of `bounds`.
    ///
    /// `bounds` holds one inclusive range per axis. Result order is unspecified.
    pub fn query_range(&self, bounds: &[AxisRange]) -> Result<Vec<&I>, Error> {
        if bounds.len() != self.dimensions {
            return Err(Error::dimensions(self.dimensions, bounds.len()));
        }
        if let Some(axis) = bounds.iter().position(AxisRange::is_empty) {
            return Err(InvalidArgument::InvertedRange { axis }.into());
        }
        Ok(self
            .backend
            .query_range(&self.items, bounds)
            .map(|slot| &self.items[slot])
            .collect())
    }

    /// The item closest to `point` under `metric`, or `None` if the index is empty.
    ///
    /// ```rust
    /// use arbor_index::{Euclidean, Index};
    ///
    /// let mut idx: Index<[f64; 2]> = Index::new(2)?;
    /// idx.build(vec![[5.0, 5.0], [6.0, 7.0], [1.0, 1.0]])?;
    /// assert_eq!(idx.nearest(&Euclidean, &[0.0, 0.0])?, Some(&[1.0, 1.0]));
    /// # Ok::<(), arbor_index::Error>(())
    /// ```
    pub fn nearest(
        &self,
        metric: &dyn DistanceMetric,
        point: &[f64],
    ) -> Result<Option<&I>, Error> {
        Ok(self.nearest_with_distance(metric, point)?.map(|n| n.item))
    }

    /// Like [`nearest`](Self::nearest), also reporting the distance.
    pub fn nearest_with_distance(
        &self,
        metric: &dyn DistanceMetric,
        point: &[f64],
    ) -> Result<Option<Neighbor<'_, I>>, Error> {
        self.check_point(point)?;
        Ok(self
            .backend
            .nearest(&self.items, metric, point)
            .map(|c| self.neighbor(c)))
    }

    /// Up to `k` items closest to `point`, best first.
    ///
    /// Returns `min(k, len)` items. `k == 0` returns nothing without searching.
    pub fn k_nearest(
        &self,
        metric: &dyn DistanceMetric,
        k: usize,
        point: &[f64],
    ) -> Result<Vec<&I>, Error> {
        Ok(self
            .k_nearest_with_distances(metric, k, point)?
            .into_iter()
            .map(|n| n.item)
            .collect())
    }

    /// Like [`k_nearest`](Self::k_nearest), also reporting distances.
    pub fn k_nearest_with_distances(
        &self,
        metric: &dyn DistanceMetric,
        k: usize,
        point: &[f64],
    ) -> Result<Vec<Neighbor<'_, I>>, Error> {
        self.check_point(point)?;
        if k == 0 || self.items.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .backend
            .k_nearest(&self.items, metric, k, point)
            .into_iter()
            .map(|c| self.neighbor(c))
            .collect())
    }

    fn rebuild(&mut self) {
        self.backend.rebuild(&mut self.items, self.dimensions);
        tracing::debug!(
            items = self.items.len(),
            dimensions = self.dimensions,
            backend = core::any::type_name::<B>(),
            "rebuilt spatial index"
        );
    }

    fn neighbor(&self, c: Candidate) -> Neighbor<'_, I> {
        Neighbor {
            item: &self.items[c.slot],
            distance: c.distance,
        }
    }

    fn check_items(&self, items: &[I]) -> Result<(), Error> {
        match items
            .iter()
            .map(|i| i.coordinates().len())
            .find(|&n| n != self.dimensions)
        {
            Some(found) => Err(Error::dimensions(self.dimensions, found)),
            None => Ok(()),
        }
    }

    fn check_point(&self, point: &[f64]) -> Result<(), Error> {
        if point.len() != self.dimensions {
            return Err(Error::dimensions(self.dimensions, point.len()));
        }
        Ok(())
    }
}

impl<I: Indexable, B: Backend<I> + Debug> Debug for IndexGeneric<I, B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IndexGeneric")
            .field("dimensions", &self.dimensions)
            .field("items", &self.items.len())
            .field("backend", &self.backend)
            .finish()
    }
}

/// Default index using the k-d tree backend.
pub type Index<I> = IndexGeneric<I, KdTree>;

impl<I: Indexable> Index<I> {
    /// Create a linear-scan index; exact for any metric, best for very small sets.
    pub fn with_flat_vec(dimensions: usize) -> Result<IndexGeneric<I, FlatVec>, Error> {
        IndexGeneric::with_backend(dimensions, FlatVec::default())
    }
}

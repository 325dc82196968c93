// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point capability, range bounds, and comparison helpers.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cmp::Ordering;

/// Capability required of anything stored in an index: an ordered coordinate vector.
///
/// Every item stored in one index must report the same number of coordinates,
/// equal to the index's dimensionality.
///
/// ```rust
/// use arbor_index::Indexable;
///
/// #[derive(PartialEq)]
/// struct Site {
///     pos: [f64; 3],
///     name: &'static str,
/// }
///
/// impl Indexable for Site {
///     fn coordinates(&self) -> &[f64] {
///         &self.pos
///     }
/// }
///
/// let s = Site { pos: [1.0, 2.0, 3.0], name: "a" };
/// assert_eq!(s.coordinates()[2], 3.0);
/// ```
pub trait Indexable {
    /// The item's location, one value per axis.
    fn coordinates(&self) -> &[f64];
}

impl<const N: usize> Indexable for [f64; N] {
    #[inline]
    fn coordinates(&self) -> &[f64] {
        self
    }
}

impl Indexable for Vec<f64> {
    #[inline]
    fn coordinates(&self) -> &[f64] {
        self
    }
}

impl Indexable for Box<[f64]> {
    #[inline]
    fn coordinates(&self) -> &[f64] {
        self
    }
}

impl<T: Indexable + ?Sized> Indexable for &T {
    #[inline]
    fn coordinates(&self) -> &[f64] {
        (**self).coordinates()
    }
}

/// Inclusive bounds on a single axis, used by range queries.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AxisRange {
    /// Smallest accepted coordinate.
    pub min: f64,
    /// Largest accepted coordinate.
    pub max: f64,
}

impl AxisRange {
    /// Create a range from its inclusive ends.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `v` lies in `[min, max]`.
    #[inline]
    pub fn contains(&self, v: f64) -> bool {
        le(self.min, v) && le(v, self.max)
    }

    /// Return true if the range is inverted or has a NaN end.
    pub fn is_empty(&self) -> bool {
        !le(self.min, self.max)
    }
}

impl From<[f64; 2]> for AxisRange {
    fn from([min, max]: [f64; 2]) -> Self {
        Self { min, max }
    }
}

impl From<(f64, f64)> for AxisRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

/// Whether every coordinate of `coords` lies within its range in `bounds`.
pub(crate) fn in_bounds(coords: &[f64], bounds: &[AxisRange]) -> bool {
    bounds
        .iter()
        .zip(coords)
        .all(|(range, &v)| range.contains(v))
}

/// Ascending ordering on one axis. NaN sorts last and never panics.
pub(crate) fn cmp_axis<I: Indexable>(a: &I, b: &I, axis: usize) -> Ordering {
    a.coordinates()[axis].total_cmp(&b.coordinates()[axis])
}

pub(crate) fn le(a: f64, b: f64) -> bool {
    a.partial_cmp(&b)
        .map(|o| o != Ordering::Greater)
        .unwrap_or(false)
}

pub(crate) fn ge(a: f64, b: f64) -> bool {
    a.partial_cmp(&b)
        .map(|o| o != Ordering::Less)
        .unwrap_or(false)
}

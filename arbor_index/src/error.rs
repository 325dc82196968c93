// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors returned by index construction, queries, and metrics.

use thiserror::Error;

/// Errors returned by [`Index`](crate::Index) operations and metrics.
///
/// Every error aborts the call before the index is mutated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// An item, query point, or bounds list has the wrong number of axes.
    #[error("dimension mismatch: expected {expected} axes, found {found}")]
    DimensionMismatch {
        /// The index's dimensionality.
        expected: usize,
        /// The offending length.
        found: usize,
    },

    /// An argument is outside its domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),
}

/// Reasons an argument was rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum InvalidArgument {
    /// An index needs at least one axis.
    #[error("an index needs at least one dimension")]
    ZeroDimensions,

    /// A metric was handed vectors of different lengths.
    #[error("metric inputs differ in length ({left} vs {right})")]
    MetricLengthMismatch {
        /// Length of the first vector.
        left: usize,
        /// Length of the second vector.
        right: usize,
    },

    /// A range query bound has `min > max` or a NaN end.
    #[error("range on axis {axis} is inverted or NaN")]
    InvertedRange {
        /// Axis of the offending range.
        axis: usize,
    },
}

impl Error {
    pub(crate) const fn dimensions(expected: usize, found: usize) -> Self {
        Self::DimensionMismatch { expected, found }
    }
}

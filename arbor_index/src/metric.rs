// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Distance metrics over coordinate vectors.
//!
//! Nearest-neighbor pruning compares the distance between two points measured on
//! one axis alone against a full distance. That comparison is only sound if the
//! single-axis distance never exceeds the full one. [`Euclidean`], [`EuclideanSq`],
//! [`Manhattan`] and [`Chebyshev`] all satisfy this. [`Canberra`] does not.

use crate::error::{Error, InvalidArgument};

/// A distance function between two equal-length coordinate vectors.
///
/// Any `Fn(&[f64], &[f64]) -> f64` is a metric:
///
/// ```rust
/// use arbor_index::DistanceMetric;
///
/// let dx = |a: &[f64], b: &[f64]| (a[0] - b[0]).abs();
/// assert_eq!(dx.distance(&[1.0, 9.0], &[4.0, 0.0]), 3.0);
/// assert!(dx.try_distance(&[1.0], &[4.0, 0.0]).is_err());
/// ```
pub trait DistanceMetric {
    /// Distance between `a` and `b`.
    ///
    /// Callers guarantee `a.len() == b.len()`; use [`try_distance`](Self::try_distance)
    /// when that is not known.
    fn distance(&self, a: &[f64], b: &[f64]) -> f64;

    /// Distance between `a` and `b`, rejecting vectors of different lengths.
    fn try_distance(&self, a: &[f64], b: &[f64]) -> Result<f64, Error> {
        if a.len() != b.len() {
            return Err(InvalidArgument::MetricLengthMismatch {
                left: a.len(),
                right: b.len(),
            }
            .into());
        }
        Ok(self.distance(a, b))
    }
}

impl<F> DistanceMetric for F
where
    F: Fn(&[f64], &[f64]) -> f64,
{
    #[inline]
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        self(a, b)
    }
}

/// Straight-line distance.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Euclidean;

/// Sum of squared differences.
///
/// Ranks neighbors exactly like [`Euclidean`] without the square root.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EuclideanSq;

/// Sum of absolute differences (taxicab distance).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Manhattan;

/// Largest absolute difference on any axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Chebyshev;

/// Sum of `|a - b| / (|a| + |b|)` per axis. Axes where both values are zero add nothing.
///
/// This metric is scale-normalized per axis, so the distance measured on one axis
/// can exceed the full distance measured from a different pair of points. Nearest
/// and k-nearest queries may then prune a subtree that held the true answer.
/// Results from those queries are approximate under this metric.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Canberra;

impl DistanceMetric for EuclideanSq {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len(), "metric inputs must be equal length");
        a.iter()
            .zip(b)
            .map(|(x, y)| {
                let d = y - x;
                d * d
            })
            .sum()
    }
}

impl DistanceMetric for Euclidean {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        sqrt(EuclideanSq.distance(a, b))
    }
}

impl DistanceMetric for Manhattan {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len(), "metric inputs must be equal length");
        a.iter().zip(b).map(|(x, y)| abs(y - x)).sum()
    }
}

impl DistanceMetric for Chebyshev {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len(), "metric inputs must be equal length");
        a.iter()
            .zip(b)
            .map(|(x, y)| abs(y - x))
            .fold(0.0, f64::max)
    }
}

impl DistanceMetric for Canberra {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len(), "metric inputs must be equal length");
        a.iter()
            .zip(b)
            .map(|(x, y)| {
                let denom = abs(*x) + abs(*y);
                if denom == 0.0 { 0.0 } else { abs(y - x) / denom }
            })
            .sum()
    }
}

#[cfg(feature = "std")]
#[inline]
fn sqrt(v: f64) -> f64 {
    v.sqrt()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
#[inline]
fn sqrt(v: f64) -> f64 {
    libm::sqrt(v)
}

#[cfg(feature = "std")]
#[inline]
fn abs(v: f64) -> f64 {
    v.abs()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
#[inline]
fn abs(v: f64) -> f64 {
    libm::fabs(v)
}

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("arbor_index requires either the `std` or the `libm` feature");

#[cfg(test)]
mod tests {
    use super::*;

    const A: [f64; 3] = [1.0, 2.0, 3.0];
    const B: [f64; 3] = [4.0, 6.0, 3.0];

    #[test]
    fn known_values() {
        assert_eq!(EuclideanSq.distance(&A, &B), 25.0);
        assert_eq!(Euclidean.distance(&A, &B), 5.0);
        assert_eq!(Manhattan.distance(&A, &B), 7.0);
        assert_eq!(Chebyshev.distance(&A, &B), 4.0);
        let c = Canberra.distance(&A, &B);
        assert!((c - (3.0 / 5.0 + 4.0 / 8.0)).abs() < 1e-12, "canberra was {c}");
    }

    #[test]
    fn canberra_skips_zero_axes() {
        assert_eq!(Canberra.distance(&[0.0, 1.0], &[0.0, 1.0]), 0.0);
        assert_eq!(Canberra.distance(&[0.0, 0.0], &[0.0, 2.0]), 1.0);
    }

    #[test]
    fn try_distance_rejects_length_mismatch() {
        let err = Manhattan.try_distance(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidArgument(InvalidArgument::MetricLengthMismatch { left: 2, right: 1 })
        );
        assert_eq!(Chebyshev.try_distance(&[1.0], &[3.0]), Ok(2.0));
    }

    #[test]
    fn single_axis_never_overestimates() {
        let metrics: [&dyn DistanceMetric; 4] = [&Euclidean, &EuclideanSq, &Manhattan, &Chebyshev];
        for m in metrics {
            let full = m.distance(&A, &B);
            for axis in 0..A.len() {
                let one = m.distance(&A[axis..=axis], &B[axis..=axis]);
                assert!(one <= full, "axis {axis}: {one} > {full}");
            }
        }
    }

    #[test]
    fn closures_are_metrics() {
        let first_axis = |a: &[f64], b: &[f64]| (a[0] - b[0]).abs();
        assert_eq!(first_axis.distance(&A, &B), 3.0);
    }
}

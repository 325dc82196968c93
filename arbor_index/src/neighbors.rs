// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nearest-neighbor candidates and the bounded best-to-worst list used by k-nearest searches.

use alloc::vec::Vec;

/// A backend slot paired with its distance to the query point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Candidate {
    /// Slot of the item in the index's item storage.
    pub slot: usize,
    /// Metric distance from the query point.
    pub distance: f64,
}

/// Fixed-capacity list of candidates ordered best to worst.
///
/// Offering a candidate inserts it before the first entry that is strictly
/// farther, shifting worse entries down and dropping whatever falls off the end.
/// Equal distances keep arrival order.
#[derive(Clone, Debug)]
pub struct Candidates {
    capacity: usize,
    entries: Vec<Candidate>,
}

impl Candidates {
    /// Create an empty list that keeps at most `capacity` candidates.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Offer a candidate. Returns true if it was kept.
    pub fn offer(&mut self, candidate: Candidate) -> bool {
        let at = self
            .entries
            .iter()
            .position(|c| c.distance > candidate.distance)
            .unwrap_or(self.entries.len());
        if at >= self.capacity {
            return false;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop();
        }
        self.entries.insert(at, candidate);
        true
    }

    /// Whether every slot is filled.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Distance of the worst kept candidate, or `None` while the list has free slots.
    ///
    /// A free slot means nothing can be pruned yet.
    pub fn bound(&self) -> Option<f64> {
        if self.is_full() {
            self.entries.last().map(|c| c.distance)
        } else {
            None
        }
    }

    /// Number of kept candidates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no candidate has been kept.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Kept candidates, best first.
    pub fn into_vec(self) -> Vec<Candidate> {
        self.entries
    }
}

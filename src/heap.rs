//! A max-heap that keeps only the `capacity` closest candidates.
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::median::cmp_distance;

/// A payload paired with its distance to the query.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<F, P> {
    pub dist: F,
    pub item: P,
}

impl<F: PartialOrd, P> PartialOrd for Candidate<F, P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<F: PartialOrd, P> PartialEq for Candidate<F, P> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<F: PartialOrd, P> Eq for Candidate<F, P> {}

// NaN distances order above every number, so they are evicted first.
impl<F: PartialOrd, P> Ord for Candidate<F, P> {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_distance(&self.dist, &other.dist)
    }
}

/// Fixed-capacity priority queue ordered by distance, largest on top.
///
/// Pushing past capacity evicts the farthest candidate, so after any
/// sequence of pushes the heap holds the `capacity` smallest distances
/// seen.
///
/// ```
/// use vptree::heap::BoundedMaxHeap;
///
/// let mut heap = BoundedMaxHeap::with_capacity(2);
/// heap.push("far", 9.0);
/// heap.push("near", 1.0);
/// heap.push("middle", 4.0);
///
/// let kept: Vec<_> = heap.into_sorted_vec().into_iter().map(|c| c.item).collect();
/// assert_eq!(kept, vec!["near", "middle"]);
/// ```
#[derive(Debug, Clone)]
pub struct BoundedMaxHeap<F, P> {
    heap: BinaryHeap<Candidate<F, P>>,
    capacity: usize,
}

impl<F: PartialOrd, P> BoundedMaxHeap<F, P> {
    pub fn with_capacity(capacity: usize) -> Self {
        BoundedMaxHeap {
            heap: BinaryHeap::with_capacity(capacity.saturating_add(1)),
            capacity,
        }
    }

    /// Insert a candidate. If that overflows the capacity, the farthest
    /// candidate (possibly the one just pushed) is removed and returned.
    pub fn push(&mut self, item: P, dist: F) -> Option<Candidate<F, P>> {
        self.heap.push(Candidate { dist, item });
        if self.heap.len() > self.capacity {
            self.heap.pop()
        } else {
            None
        }
    }

    pub fn pop_max(&mut self) -> Option<Candidate<F, P>> {
        self.heap.pop()
    }

    pub fn peek_max(&self) -> Option<&Candidate<F, P>> {
        self.heap.peek()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.heap.len() == self.capacity
    }

    /// Consume the heap, returning candidates by ascending distance.
    pub fn into_sorted_vec(self) -> Vec<Candidate<F, P>> {
        self.heap.into_sorted_vec()
    }
}

use std::{cmp::Reverse, collections::BinaryHeap};

use radix_heap::RadixHeapMap;

use crate::graphs::{Distance, VertexId};

/// A priority queue of vertices keyed by their tentative distance, smallest
/// distance first.
///
/// Implementations do not support decrease key. A vertex may be inserted
/// several times and callers are expected to skip stale entries.
pub trait VertexDistanceQueue {
    /// Clears all stored data, preparing for a new search.
    fn clear(&mut self);

    fn insert(&mut self, vertex: VertexId, distance: Distance);

    /// Removes and returns the vertex with the smallest distance together
    /// with the distance it was inserted with.
    fn pop(&mut self) -> Option<(VertexId, Distance)>;

    fn is_empty(&self) -> bool;
}

/// Binary heap backed queue. Supports peeking at the smallest key, which the
/// bidirectional searches need for their stopping criterion.
#[derive(Default)]
pub struct VertexDistanceQueueBinaryHeap {
    heap: BinaryHeap<Reverse<(Distance, VertexId)>>,
}

impl VertexDistanceQueueBinaryHeap {
    pub fn new() -> Self {
        VertexDistanceQueueBinaryHeap {
            heap: BinaryHeap::new(),
        }
    }

    /// Smallest distance currently in the queue.
    pub fn peek_distance(&self) -> Option<Distance> {
        self.heap.peek().map(|Reverse((distance, _))| *distance)
    }
}

impl VertexDistanceQueue for VertexDistanceQueueBinaryHeap {
    fn clear(&mut self) {
        self.heap.clear();
    }

    fn insert(&mut self, vertex: VertexId, distance: Distance) {
        self.heap.push(Reverse((distance, vertex)));
    }

    fn pop(&mut self) -> Option<(VertexId, Distance)> {
        let Reverse((distance, vertex)) = self.heap.pop()?;

        Some((vertex, distance))
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

/// Monotone radix heap. Inserting a distance smaller than the last popped one
/// panics, so it only fits searches that never relax below the current key.
pub struct VertexDistanceQueueRadixHeap {
    heap: RadixHeapMap<Reverse<Distance>, VertexId>,
}

impl Default for VertexDistanceQueueRadixHeap {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexDistanceQueueRadixHeap {
    pub fn new() -> Self {
        VertexDistanceQueueRadixHeap {
            heap: RadixHeapMap::new(),
        }
    }
}

impl VertexDistanceQueue for VertexDistanceQueueRadixHeap {
    fn clear(&mut self) {
        self.heap.clear();
    }

    fn insert(&mut self, vertex: VertexId, distance: Distance) {
        self.heap.push(Reverse(distance), vertex);
    }

    fn pop(&mut self) -> Option<(VertexId, Distance)> {
        let (Reverse(distance), vertex) = self.heap.pop()?;

        Some((vertex, distance))
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{VertexDistanceQueue, VertexDistanceQueueBinaryHeap, VertexDistanceQueueRadixHeap};

    fn drain(queue: &mut dyn VertexDistanceQueue) -> Vec<(u64, u64)> {
        let mut popped = Vec::new();
        while let Some(entry) = queue.pop() {
            popped.push(entry);
        }
        popped
    }

    #[test]
    fn binary_heap_pops_smallest_first() {
        let mut queue = VertexDistanceQueueBinaryHeap::new();
        queue.insert(1, 30);
        queue.insert(2, 10);
        queue.insert(3, 20);
        assert_eq!(queue.peek_distance(), Some(10));

        assert_eq!(drain(&mut queue), vec![(2, 10), (3, 20), (1, 30)]);
        assert!(queue.is_empty());
        assert_eq!(queue.peek_distance(), None);
    }

    #[test]
    fn radix_heap_pops_smallest_first() {
        let mut queue = VertexDistanceQueueRadixHeap::new();
        queue.insert(7, 0);
        queue.insert(8, 5);
        queue.insert(9, 3);

        assert_eq!(queue.pop(), Some((7, 0)));
        queue.insert(10, 4);
        assert_eq!(drain(&mut queue), vec![(9, 3), (10, 4), (8, 5)]);
    }

    #[test]
    fn clear_empties_queue() {
        let mut queue = VertexDistanceQueueRadixHeap::new();
        queue.insert(1, 1);
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn cleared_radix_heap_accepts_smaller_keys() {
        let mut queue = VertexDistanceQueueRadixHeap::new();
        queue.insert(1, 7);
        assert_eq!(queue.pop(), Some((1, 7)));

        queue.clear();
        queue.insert(2, 0);
        queue.insert(3, 3);
        assert_eq!(drain(&mut queue), vec![(2, 0), (3, 3)]);
    }
}

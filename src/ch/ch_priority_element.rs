use std::cmp::Ordering;

use crate::graphs::VertexId;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ChPriorityElement {
    pub vertex: VertexId,
    pub priority: i64,
}

impl ChPriorityElement {
    pub fn new(priority: i64, vertex: VertexId) -> Self {
        Self { vertex, priority }
    }
}

// The priority queue depends on `Ord`.
// Explicitly implement the trait so the queue becomes a min-heap
// instead of a max-heap.
impl Ord for ChPriorityElement {
    fn cmp(&self, other: &Self) -> Ordering {
        // Both the priority and the vertex are flipped, so ties are broken
        // towards the smaller vertex id.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for ChPriorityElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

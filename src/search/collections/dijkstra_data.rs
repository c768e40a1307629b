use ahash::{HashMap, HashMapExt};

use crate::graphs::{Distance, VertexId};

/// Tentative distances of a single search direction.
pub trait DijkstraData {
    /// Clears all stored data, preparing for a new search.
    fn clear(&mut self);

    /// Retrieves the tentative distance of `vertex`, `None` if it was never
    /// reached.
    fn get_distance(&self, vertex: VertexId) -> Option<Distance>;

    fn set_distance(&mut self, vertex: VertexId, distance: Distance);

    /// Stores `distance` if it improves on the current tentative distance and
    /// reports whether it did.
    fn relax(&mut self, vertex: VertexId, distance: Distance) -> bool {
        if self
            .get_distance(vertex)
            .is_some_and(|current| current <= distance)
        {
            return false;
        }
        self.set_distance(vertex, distance);
        true
    }
}

/// Sparse distance storage. Vertex ids are not required to be dense.
#[derive(Default)]
pub struct DijkstraDataHashMap {
    distances: HashMap<VertexId, Distance>,
}

impl DijkstraDataHashMap {
    pub fn new() -> Self {
        DijkstraDataHashMap {
            distances: HashMap::new(),
        }
    }
}

impl DijkstraData for DijkstraDataHashMap {
    fn clear(&mut self) {
        self.distances.clear();
    }

    fn get_distance(&self, vertex: VertexId) -> Option<Distance> {
        self.distances.get(&vertex).copied()
    }

    fn set_distance(&mut self, vertex: VertexId, distance: Distance) {
        self.distances.insert(vertex, distance);
    }
}

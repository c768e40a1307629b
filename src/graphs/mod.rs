use serde::{Deserialize, Serialize};

use self::edge::DirectedWeightedEdge;
use crate::ch::Shortcut;

pub mod edge;
pub mod graph_factory;
pub mod graph_file;
pub mod reversible_hash_graph;

pub type VertexId = u64;

/// Weight of an original input edge.
pub type Weight = u32;

/// Length of a path. Stored edge weights (original and shortcut) are widened
/// to this type, so the sum along any simple path fits without overflow.
pub type Distance = u64;

/// Position of a vertex in the contraction order, 0 is contracted first.
pub type Rank = u32;

/// Planar position of a vertex. Only used for I/O, never by any search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f32,
    pub y: f32,
}

impl Coordinate {
    pub fn new(x: f32, y: f32) -> Self {
        Coordinate { x, y }
    }
}

pub trait Graph: Send + Sync {
    fn number_of_vertices(&self) -> usize;

    /// Number of directed edges.
    fn number_of_edges(&self) -> usize {
        self.vertices()
            .map(|vertex| self.out_edges(vertex).len())
            .sum()
    }

    fn vertices(&self) -> Box<dyn Iterator<Item = VertexId> + Send + '_>;

    fn contains(&self, vertex: VertexId) -> bool;

    fn coordinate(&self, vertex: VertexId) -> Option<Coordinate>;

    /// Live outgoing edges of `tail`. Empty for unknown or removed vertices.
    fn out_edges(
        &self,
        tail: VertexId,
    ) -> Box<dyn ExactSizeIterator<Item = DirectedWeightedEdge> + Send + '_>;

    /// Live incoming edges of `head`. Empty for unknown or removed vertices.
    fn in_edges(
        &self,
        head: VertexId,
    ) -> Box<dyn ExactSizeIterator<Item = DirectedWeightedEdge> + Send + '_>;

    fn degree(&self, vertex: VertexId) -> usize {
        self.out_edges(vertex).len()
    }

    /// Inserts a directed edge, registering unknown endpoints. Self loops are
    /// dropped.
    fn insert_edge(&mut self, edge: DirectedWeightedEdge);

    /// Removes `vertex` together with every edge starting or ending at it.
    fn remove_vertex(&mut self, vertex: VertexId);

    /// Inserts `shortcut` in both directions, marked with its contracted vertex.
    fn insert_shortcut(&mut self, shortcut: &Shortcut) {
        if let Some(edge) = DirectedWeightedEdge::with_shortcut_of(
            shortcut.from,
            shortcut.to,
            shortcut.weight,
            Some(shortcut.via),
        ) {
            self.insert_edge(edge.reversed());
            self.insert_edge(edge);
        }
    }

    /// Returns true if an edge between `a` and `b` (in either direction) has a
    /// weight of at most `weight`.
    fn has_edge_at_most(&self, a: VertexId, b: VertexId, weight: Distance) -> bool {
        self.out_edges(a)
            .any(|edge| edge.head() == b && edge.weight() <= weight)
            || self
                .out_edges(b)
                .any(|edge| edge.head() == a && edge.weight() <= weight)
    }
}

use ahash::HashMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::{
    edge::{DirectedHeadlessWeightedEdge, DirectedTaillessWeightedEdge, DirectedWeightedEdge},
    Coordinate, Distance, Graph, VertexId, Weight,
};

/// Adjacency list graph keyed by vertex id. Keeps an incoming index next to
/// the outgoing lists so removing a vertex only touches its neighbors.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ReversibleHashGraph {
    vertices: HashMap<VertexId, Coordinate>,
    out_edges: HashMap<VertexId, Vec<DirectedTaillessWeightedEdge>>,
    in_edges: HashMap<VertexId, Vec<DirectedHeadlessWeightedEdge>>,
}

impl Graph for ReversibleHashGraph {
    fn number_of_vertices(&self) -> usize {
        self.vertices.len()
    }

    fn number_of_edges(&self) -> usize {
        self.out_edges.values().map(Vec::len).sum()
    }

    fn vertices(&self) -> Box<dyn Iterator<Item = VertexId> + Send + '_> {
        Box::new(self.vertices.keys().copied())
    }

    fn contains(&self, vertex: VertexId) -> bool {
        self.vertices.contains_key(&vertex)
    }

    fn coordinate(&self, vertex: VertexId) -> Option<Coordinate> {
        self.vertices.get(&vertex).copied()
    }

    fn out_edges(
        &self,
        tail: VertexId,
    ) -> Box<dyn ExactSizeIterator<Item = DirectedWeightedEdge> + Send + '_> {
        let edges = self.out_edges.get(&tail).map(Vec::as_slice).unwrap_or(&[]);
        Box::new(edges.iter().map(move |edge| edge.set_tail(tail)))
    }

    fn in_edges(
        &self,
        head: VertexId,
    ) -> Box<dyn ExactSizeIterator<Item = DirectedWeightedEdge> + Send + '_> {
        let edges = self.in_edges.get(&head).map(Vec::as_slice).unwrap_or(&[]);
        Box::new(edges.iter().map(move |edge| edge.set_head(head)))
    }

    fn insert_edge(&mut self, edge: DirectedWeightedEdge) {
        self.vertices.entry(edge.tail()).or_default();
        self.vertices.entry(edge.head()).or_default();

        self.out_edges
            .entry(edge.tail())
            .or_default()
            .push(edge.tailless());
        self.in_edges
            .entry(edge.head())
            .or_default()
            .push(edge.headless());
    }

    fn remove_vertex(&mut self, vertex: VertexId) {
        self.vertices.remove(&vertex);

        let out_edges = self.out_edges.remove(&vertex).unwrap_or_default();
        for head in out_edges.iter().map(|edge| edge.head()).unique() {
            if let Some(in_edges) = self.in_edges.get_mut(&head) {
                in_edges.retain(|in_edge| in_edge.tail() != vertex);
            }
        }

        let in_edges = self.in_edges.remove(&vertex).unwrap_or_default();
        for tail in in_edges.iter().map(|edge| edge.tail()).unique() {
            if let Some(out_edges) = self.out_edges.get_mut(&tail) {
                out_edges.retain(|out_edge| out_edge.head() != vertex);
            }
        }
    }
}

impl ReversibleHashGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from undirected `(a, b, weight)` triples.
    pub fn from_undirected_edges(edges: &[(VertexId, VertexId, Weight)]) -> Self {
        let mut graph = ReversibleHashGraph::new();
        for &(a, b, weight) in edges {
            graph.add_undirected_edge(a, b, weight);
        }
        graph
    }

    /// Adds a vertex or moves an existing one to `coordinate`.
    pub fn add_vertex(&mut self, vertex: VertexId, coordinate: Coordinate) {
        self.vertices.insert(vertex, coordinate);
    }

    pub fn add_edge(&mut self, tail: VertexId, head: VertexId, weight: Weight) {
        if let Some(edge) = DirectedWeightedEdge::new(tail, head, Distance::from(weight)) {
            self.insert_edge(edge);
        }
    }

    pub fn add_undirected_edge(&mut self, a: VertexId, b: VertexId, weight: Weight) {
        self.add_edge(a, b, weight);
        self.add_edge(b, a, weight);
    }

    pub fn neighbors(
        &self,
        vertex: VertexId,
    ) -> Box<dyn ExactSizeIterator<Item = DirectedWeightedEdge> + Send + '_> {
        self.out_edges(vertex)
    }

    pub fn all_edges(&self) -> Vec<DirectedWeightedEdge> {
        self.vertices
            .keys()
            .sorted()
            .flat_map(|&tail| self.out_edges(tail))
            .collect()
    }
}

use rand::Rng;

use super::{reversible_hash_graph::ReversibleHashGraph, Coordinate, VertexId, Weight};

/// Builds synthetic graphs, mostly for testing and validation runs.
#[derive(Clone)]
pub struct GraphFactory {}

impl GraphFactory {
    /// Random connected undirected graph on the vertices `0..number_of_vertices`.
    ///
    /// A random spanning tree keeps the graph connected, `extra_edges` random
    /// edges on top of it create cycles. Weights are drawn from
    /// `0..=max_weight`, coordinates from the unit square. Self loops drawn as
    /// extra edges are skipped, parallel edges are kept.
    pub fn random_connected<R: Rng>(
        rng: &mut R,
        number_of_vertices: u64,
        extra_edges: usize,
        max_weight: Weight,
    ) -> ReversibleHashGraph {
        let mut graph = ReversibleHashGraph::new();
        for vertex in 0..number_of_vertices {
            graph.add_vertex(vertex, Coordinate::new(rng.gen(), rng.gen()));
        }

        for vertex in 1..number_of_vertices {
            let parent: VertexId = rng.gen_range(0..vertex);
            graph.add_undirected_edge(parent, vertex, rng.gen_range(0..=max_weight));
        }

        if number_of_vertices > 1 {
            for _ in 0..extra_edges {
                let a = rng.gen_range(0..number_of_vertices);
                let b = rng.gen_range(0..number_of_vertices);
                graph.add_undirected_edge(a, b, rng.gen_range(0..=max_weight));
            }
        }

        graph
    }

    /// Random vertex pairs drawn from the vertices of `graph`.
    pub fn random_pairs<R: Rng>(
        rng: &mut R,
        vertices: &[VertexId],
        number_of_pairs: usize,
    ) -> Vec<(VertexId, VertexId)> {
        if vertices.is_empty() {
            return Vec::new();
        }

        (0..number_of_pairs)
            .map(|_| {
                let source = vertices[rng.gen_range(0..vertices.len())];
                let target = vertices[rng.gen_range(0..vertices.len())];
                (source, target)
            })
            .collect()
    }
}

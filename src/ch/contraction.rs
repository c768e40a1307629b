use itertools::Itertools;

use super::{witness_search::WitnessSearch, Shortcut};
use crate::graphs::{Distance, Graph, VertexId};

/// Neighbors of `vertex` sorted by id, parallel edges collapsed to the
/// lightest one.
pub(crate) fn neighbors_with_min_weight(graph: &dyn Graph, vertex: VertexId) -> Vec<(VertexId, Distance)> {
    graph
        .out_edges(vertex)
        .map(|edge| (edge.head(), edge.weight()))
        .sorted()
        .dedup_by(|a, b| a.0 == b.0)
        .collect()
}

/// Shortcuts needed to keep all distances intact if `vertex` were removed.
/// Leaves the graph untouched.
///
/// For every unordered neighbor pair `x < y` the path `x - vertex - y` gets a
/// shortcut unless a witness avoiding `vertex` is at most as long, or an edge
/// between `x` and `y` already is.
pub fn simulate_contraction(graph: &dyn Graph, vertex: VertexId) -> Vec<Shortcut> {
    let neighbors = neighbors_with_min_weight(graph, vertex);
    let Some(max_weight) = neighbors.iter().map(|&(_, weight)| weight).max() else {
        return Vec::new();
    };

    let mut witness_search = WitnessSearch::new();
    neighbors
        .iter()
        .tuple_combinations()
        .filter_map(|(&(from, weight_from), &(to, weight_to))| {
            let weight = weight_from + weight_to;
            let limit = weight_from + max_weight;

            let witness = witness_search.search(graph, from, to, vertex, limit);
            if witness.distance.is_some_and(|distance| distance <= weight) {
                return None;
            }
            if graph.has_edge_at_most(from, to, weight) {
                return None;
            }

            Some(Shortcut {
                from,
                to,
                via: vertex,
                weight,
            })
        })
        .collect()
}

/// Shortcuts added minus edges removed when contracting `vertex`.
pub fn edge_difference(graph: &dyn Graph, vertex: VertexId) -> i64 {
    edge_difference_of(graph, vertex, &simulate_contraction(graph, vertex))
}

pub fn edge_difference_of(graph: &dyn Graph, vertex: VertexId, shortcuts: &[Shortcut]) -> i64 {
    shortcuts.len() as i64 - graph.degree(vertex) as i64
}

/// Inserts `shortcuts` and removes `vertex` from the graph.
pub fn apply_contraction(graph: &mut dyn Graph, vertex: VertexId, shortcuts: &[Shortcut]) {
    for shortcut in shortcuts {
        graph.insert_shortcut(shortcut);
    }
    graph.remove_vertex(vertex);
}

/// Removes `vertex` from the graph and returns the shortcuts that were
/// inserted in its place.
pub fn contract(graph: &mut dyn Graph, vertex: VertexId) -> Vec<Shortcut> {
    let shortcuts = simulate_contraction(graph, vertex);
    apply_contraction(graph, vertex, &shortcuts);
    shortcuts
}

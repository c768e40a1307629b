use serde::{Deserialize, Serialize};

use super::{preprocessor::Preprocessor, PreprocessError, PreprocessResult, Ranks};
use crate::{
    graphs::{reversible_hash_graph::ReversibleHashGraph, Graph, Rank, VertexId},
    search::QueryError,
};

/// The original graph with every shortcut inserted, plus the contraction rank
/// of each vertex. This is all a contraction hierarchy query needs.
///
/// An empty rank map marks a graph that was never preprocessed. Queries then
/// treat every edge as upward and degrade to a bidirectional Dijkstra.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AugmentedGraph {
    graph: ReversibleHashGraph,
    ranks: Ranks,
}

impl AugmentedGraph {
    /// Preprocesses a copy of `graph`. The input itself is left untouched.
    pub fn new(graph: &ReversibleHashGraph, check_interval: u32) -> Result<Self, PreprocessError> {
        Self::with_preprocessor(graph, &Preprocessor::new(check_interval))
    }

    pub fn with_preprocessor(
        graph: &ReversibleHashGraph,
        preprocessor: &Preprocessor,
    ) -> Result<Self, PreprocessError> {
        let result = preprocessor.preprocess(graph.clone())?;
        Ok(Self::from_preprocess_result(graph.clone(), &result))
    }

    pub fn from_preprocess_result(mut graph: ReversibleHashGraph, result: &PreprocessResult) -> Self {
        for shortcut in &result.shortcuts {
            graph.insert_shortcut(shortcut);
        }

        AugmentedGraph {
            graph,
            ranks: result.ranks.clone(),
        }
    }

    /// Wraps an already augmented graph, e.g. one read from a file.
    pub fn from_parts(graph: ReversibleHashGraph, ranks: Ranks) -> Self {
        AugmentedGraph { graph, ranks }
    }

    pub fn graph(&self) -> &ReversibleHashGraph {
        &self.graph
    }

    pub fn ranks(&self) -> &Ranks {
        &self.ranks
    }

    pub fn rank(&self, vertex: VertexId) -> Option<Rank> {
        self.ranks.get(&vertex).copied()
    }

    pub fn is_preprocessed(&self) -> bool {
        !self.ranks.is_empty()
    }

    pub fn number_of_shortcuts(&self) -> usize {
        self.graph
            .vertices()
            .map(|vertex| {
                self.graph
                    .out_edges(vertex)
                    .filter(|edge| edge.is_shortcut())
                    .count()
            })
            .sum::<usize>()
            / 2
    }

    /// Whether an edge from `tail` to `head` leads upward in the hierarchy.
    pub fn is_upward(&self, tail: VertexId, head: VertexId) -> Result<bool, QueryError> {
        if !self.is_preprocessed() {
            return Ok(true);
        }

        let tail_rank = self.rank(tail).ok_or(QueryError::MissingRank(tail))?;
        let head_rank = self.rank(head).ok_or(QueryError::MissingRank(head))?;
        Ok(head_rank > tail_rank)
    }
}

#[cfg(test)]
mod tests {
    use super::AugmentedGraph;
    use crate::{
        ch::{preprocessor::DEFAULT_CHECK_INTERVAL, Ranks},
        graphs::{reversible_hash_graph::ReversibleHashGraph, Graph},
        search::QueryError,
    };

    fn star() -> ReversibleHashGraph {
        ReversibleHashGraph::from_undirected_edges(&[(0, 1, 1), (0, 2, 2), (0, 3, 3)])
    }

    #[test]
    fn input_graph_is_not_consumed() {
        let graph = star();
        let augmented = AugmentedGraph::new(&graph, DEFAULT_CHECK_INTERVAL).unwrap();

        assert_eq!(graph.number_of_vertices(), 4);
        assert_eq!(graph.number_of_edges(), 6);
        assert_eq!(augmented.graph().number_of_vertices(), 4);
        assert_eq!(augmented.ranks().len(), 4);
        assert_eq!(
            augmented.graph().number_of_edges(),
            6 + 2 * augmented.number_of_shortcuts()
        );
    }

    #[test]
    fn unpreprocessed_graph_is_all_upward() {
        let augmented = AugmentedGraph::from_parts(star(), Ranks::default());

        assert!(!augmented.is_preprocessed());
        assert_eq!(augmented.is_upward(1, 0), Ok(true));
        assert_eq!(augmented.is_upward(0, 1), Ok(true));
    }

    #[test]
    fn missing_rank_is_reported() {
        let ranks: Ranks = [(0, 3), (1, 0), (2, 1)].into_iter().collect();
        let augmented = AugmentedGraph::from_parts(star(), ranks);

        assert_eq!(augmented.is_upward(1, 0), Ok(true));
        assert_eq!(augmented.is_upward(0, 1), Ok(false));
        assert_eq!(augmented.is_upward(0, 3), Err(QueryError::MissingRank(3)));
    }
}

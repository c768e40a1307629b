use std::time::Instant;

use super::augmented_graph::AugmentedGraph;
use crate::{
    graphs::VertexId,
    search::{bidirectional::bidirectional_search, PathFinding, QueryError, QueryResult},
};

impl PathFinding for AugmentedGraph {
    /// Bidirectional upward search. The forward side only follows outgoing
    /// edges to higher ranked vertices, the backward side only incoming edges
    /// from higher ranked vertices.
    fn query(&self, source: VertexId, target: VertexId) -> Result<QueryResult, QueryError> {
        let start = Instant::now();
        let search = bidirectional_search(self.graph(), source, target, |vertex, neighbor| {
            self.is_upward(vertex, neighbor)
        })?;

        Ok(QueryResult {
            elapsed: start.elapsed(),
            relaxed_edges: search.relaxed_edges,
            distance: search.distance,
        })
    }
}

use crate::{
    graphs::{Distance, Graph, VertexId},
    search::{
        collections::{
            dijkstra_data::{DijkstraData, DijkstraDataHashMap},
            vertex_distance_queue::{VertexDistanceQueue, VertexDistanceQueueRadixHeap},
            vertex_expanded_data::{VertexExpandedData, VertexExpandedDataHashSet},
        },
        dijkstra::{dijkstra_one_to_one_bounded, OneToOneSearch, SearchBounds},
    },
};

pub type WitnessSearchResult = OneToOneSearch;

/// Witness search that keeps its collections between runs.
#[derive(Default)]
pub struct WitnessSearch {
    data: DijkstraDataHashMap,
    expanded: VertexExpandedDataHashSet,
    queue: VertexDistanceQueueRadixHeap,
}

impl WitnessSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks for a path `from` -> `to` that avoids `forbidden` and is no
    /// longer than `limit`.
    ///
    /// The returned distance is the shortest one found within the limit. It
    /// can be larger than the true shortest distance avoiding `forbidden`, but
    /// never smaller, and any path of length at most `limit` is found.
    pub fn search(
        &mut self,
        graph: &dyn Graph,
        from: VertexId,
        to: VertexId,
        forbidden: VertexId,
        limit: Distance,
    ) -> WitnessSearchResult {
        self.data.clear();
        self.expanded.clear();
        self.queue.clear();

        let bounds = SearchBounds {
            forbidden: Some(forbidden),
            max_distance: Some(limit),
        };

        dijkstra_one_to_one_bounded(
            graph,
            &mut self.data,
            &mut self.expanded,
            &mut self.queue,
            from,
            to,
            &bounds,
        )
    }
}

/// One-off [`WitnessSearch::search`].
pub fn witness_search(
    graph: &dyn Graph,
    from: VertexId,
    to: VertexId,
    forbidden: VertexId,
    limit: Distance,
) -> WitnessSearchResult {
    WitnessSearch::new().search(graph, from, to, forbidden, limit)
}

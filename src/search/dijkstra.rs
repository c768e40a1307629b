use std::time::Instant;

use super::{
    collections::{
        dijkstra_data::{DijkstraData, DijkstraDataHashMap},
        vertex_distance_queue::{VertexDistanceQueue, VertexDistanceQueueRadixHeap},
        vertex_expanded_data::{VertexExpandedData, VertexExpandedDataHashSet},
    },
    PathFinding, QueryError, QueryResult,
};
use crate::graphs::{Distance, Graph, VertexId};

/// Restrictions applied to a one to one search.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchBounds {
    /// Vertex the search must neither enter nor pass through.
    pub forbidden: Option<VertexId>,
    /// Tentative distances above this value are never recorded.
    pub max_distance: Option<Distance>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OneToOneSearch {
    /// Smallest distance to the target found before the search stopped.
    pub distance: Option<Distance>,
    pub relaxed_edges: u64,
}

/// Unidirectional Dijkstra from `source` that stops once `target` is settled,
/// the queue runs dry or every remaining key exceeds the distance bound.
///
/// Without bounds the returned distance is exact. With bounds it is the
/// length of some path that respects them, or `None` if none was found.
pub fn dijkstra_one_to_one_bounded(
    graph: &dyn Graph,
    data: &mut dyn DijkstraData,
    expanded: &mut dyn VertexExpandedData,
    queue: &mut dyn VertexDistanceQueue,
    source: VertexId,
    target: VertexId,
    bounds: &SearchBounds,
) -> OneToOneSearch {
    let exceeds_bound = |distance: Distance| {
        bounds
            .max_distance
            .is_some_and(|max_distance| distance > max_distance)
    };

    let mut relaxed_edges = 0;
    data.set_distance(source, 0);
    queue.insert(source, 0);

    while let Some((tail, distance_tail)) = queue.pop() {
        if tail == target || exceeds_bound(distance_tail) {
            break;
        }
        if expanded.expand(tail) {
            continue;
        }

        for edge in graph.out_edges(tail) {
            if Some(edge.head()) == bounds.forbidden {
                continue;
            }
            let alternative_distance_head = distance_tail + edge.weight();
            if exceeds_bound(alternative_distance_head) {
                continue;
            }
            if data.relax(edge.head(), alternative_distance_head) {
                queue.insert(edge.head(), alternative_distance_head);
                relaxed_edges += 1;
            }
        }
    }

    OneToOneSearch {
        distance: data.get_distance(target),
        relaxed_edges,
    }
}

/// Bounded one to one search with fresh hash based collections.
pub fn dijkstra_one_to_one_wrapped(
    graph: &dyn Graph,
    source: VertexId,
    target: VertexId,
    bounds: &SearchBounds,
) -> OneToOneSearch {
    let mut data = DijkstraDataHashMap::new();
    let mut expanded = VertexExpandedDataHashSet::new();
    let mut queue = VertexDistanceQueueRadixHeap::new();

    dijkstra_one_to_one_bounded(
        graph,
        &mut data,
        &mut expanded,
        &mut queue,
        source,
        target,
        bounds,
    )
}

/// Plain Dijkstra on an unpreprocessed graph. Serves as the reference every
/// other search is checked against.
pub struct Dijkstra<'a> {
    graph: &'a dyn Graph,
}

impl<'a> Dijkstra<'a> {
    pub fn new(graph: &'a dyn Graph) -> Self {
        Dijkstra { graph }
    }
}

impl PathFinding for Dijkstra<'_> {
    fn query(&self, source: VertexId, target: VertexId) -> Result<QueryResult, QueryError> {
        let start = Instant::now();
        let search =
            dijkstra_one_to_one_wrapped(self.graph, source, target, &SearchBounds::default());

        Ok(QueryResult {
            elapsed: start.elapsed(),
            relaxed_edges: search.relaxed_edges,
            distance: search.distance,
        })
    }
}

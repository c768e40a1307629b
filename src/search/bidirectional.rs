use std::time::Instant;

use super::{
    collections::{
        dijkstra_data::{DijkstraData, DijkstraDataHashMap},
        vertex_distance_queue::{VertexDistanceQueue, VertexDistanceQueueBinaryHeap},
        vertex_expanded_data::{VertexExpandedData, VertexExpandedDataHashSet},
    },
    PathFinding, QueryError, QueryResult,
};
use crate::graphs::{Distance, Graph, VertexId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Forward,
    Backward,
}

impl SearchDirection {
    pub fn opposite(self) -> Self {
        match self {
            SearchDirection::Forward => SearchDirection::Backward,
            SearchDirection::Backward => SearchDirection::Forward,
        }
    }
}

/// State of one search direction.
#[derive(Default)]
struct SearchSide {
    data: DijkstraDataHashMap,
    expanded: VertexExpandedDataHashSet,
    queue: VertexDistanceQueueBinaryHeap,
}

impl SearchSide {
    fn new(root: VertexId) -> Self {
        let mut side = SearchSide::default();
        side.data.set_distance(root, 0);
        side.queue.insert(root, 0);
        side
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BidirectionalSearch {
    pub distance: Option<Distance>,
    pub relaxed_edges: u64,
}

/// Alternating bidirectional Dijkstra. The forward side follows outgoing edges
/// from `source`, the backward side incoming edges from `target`.
///
/// `may_traverse(u, w)` decides whether the side currently expanding `u` may
/// step to its neighbor `w`. Returning true everywhere gives a plain
/// bidirectional search, restricting it to higher ranked neighbors gives a
/// contraction hierarchy query.
pub fn bidirectional_search<F>(
    graph: &dyn Graph,
    source: VertexId,
    target: VertexId,
    may_traverse: F,
) -> Result<BidirectionalSearch, QueryError>
where
    F: Fn(VertexId, VertexId) -> Result<bool, QueryError>,
{
    if source == target {
        return Ok(BidirectionalSearch {
            distance: Some(0),
            relaxed_edges: 0,
        });
    }

    let mut forward = SearchSide::new(source);
    let mut backward = SearchSide::new(target);
    let mut meeting_distance: Option<Distance> = None;
    let mut relaxed_edges = 0;
    let mut direction = SearchDirection::Forward;

    loop {
        let smallest_key = match (
            forward.queue.peek_distance(),
            backward.queue.peek_distance(),
        ) {
            (None, None) => break,
            (Some(forward_key), Some(backward_key)) => forward_key.min(backward_key),
            (Some(key), None) | (None, Some(key)) => key,
        };
        if meeting_distance.is_some_and(|distance| distance <= smallest_key) {
            break;
        }

        // a drained side hands its turn to the other one
        let current = match direction {
            SearchDirection::Forward if forward.queue.is_empty() => SearchDirection::Backward,
            SearchDirection::Backward if backward.queue.is_empty() => SearchDirection::Forward,
            _ => direction,
        };
        let (side, opposite) = match current {
            SearchDirection::Forward => (&mut forward, &backward),
            SearchDirection::Backward => (&mut backward, &forward),
        };

        relaxed_edges += single_search_step(
            graph,
            current,
            side,
            opposite,
            &may_traverse,
            &mut meeting_distance,
        )?;
        direction = current.opposite();
    }

    Ok(BidirectionalSearch {
        distance: meeting_distance,
        relaxed_edges,
    })
}

/// Settles the smallest vertex of `side` and returns the number of improved
/// tentative distances.
fn single_search_step<F>(
    graph: &dyn Graph,
    direction: SearchDirection,
    side: &mut SearchSide,
    opposite: &SearchSide,
    may_traverse: &F,
    meeting_distance: &mut Option<Distance>,
) -> Result<u64, QueryError>
where
    F: Fn(VertexId, VertexId) -> Result<bool, QueryError>,
{
    let Some((tail, distance_tail)) = side.queue.pop() else {
        return Ok(0);
    };
    if side
        .data
        .get_distance(tail)
        .is_some_and(|distance| distance_tail > distance)
    {
        return Ok(0);
    }
    if side.expanded.expand(tail) {
        return Ok(0);
    }

    update_meeting_distance(meeting_distance, opposite, tail, distance_tail);

    let edges = match direction {
        SearchDirection::Forward => graph.out_edges(tail),
        SearchDirection::Backward => graph.in_edges(tail),
    };

    let mut relaxed_edges = 0;
    for edge in edges {
        let neighbor = match direction {
            SearchDirection::Forward => edge.head(),
            SearchDirection::Backward => edge.tail(),
        };
        if !may_traverse(tail, neighbor)? {
            continue;
        }

        let alternative_distance = distance_tail + edge.weight();
        if side.data.relax(neighbor, alternative_distance) {
            side.queue.insert(neighbor, alternative_distance);
            relaxed_edges += 1;
            update_meeting_distance(meeting_distance, opposite, neighbor, alternative_distance);
        }
    }

    Ok(relaxed_edges)
}

fn update_meeting_distance(
    meeting_distance: &mut Option<Distance>,
    opposite: &SearchSide,
    vertex: VertexId,
    distance: Distance,
) {
    if let Some(opposite_distance) = opposite.data.get_distance(vertex) {
        let alternative_meeting_distance = distance + opposite_distance;
        if meeting_distance.map_or(true, |current| alternative_meeting_distance < current) {
            *meeting_distance = Some(alternative_meeting_distance);
        }
    }
}

/// Bidirectional Dijkstra on an unpreprocessed graph.
pub struct BidirectionalDijkstra<'a> {
    graph: &'a dyn Graph,
}

impl<'a> BidirectionalDijkstra<'a> {
    pub fn new(graph: &'a dyn Graph) -> Self {
        BidirectionalDijkstra { graph }
    }
}

impl PathFinding for BidirectionalDijkstra<'_> {
    fn query(&self, source: VertexId, target: VertexId) -> Result<QueryResult, QueryError> {
        let start = Instant::now();
        let search = bidirectional_search(self.graph, source, target, |_, _| Ok(true))?;

        Ok(QueryResult {
            elapsed: start.elapsed(),
            relaxed_edges: search.relaxed_edges,
            distance: search.distance,
        })
    }
}

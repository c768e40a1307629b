use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::graphs::{Distance, VertexId};

pub mod bidirectional;
pub mod collections;
pub mod dijkstra;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("vertex {0} has no rank although the graph is preprocessed")]
    MissingRank(VertexId),
}

/// Outcome of a single point to point query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryResult {
    pub elapsed: Duration,
    /// Number of successful tentative distance improvements.
    pub relaxed_edges: u64,
    /// `None` if the target is unreachable.
    pub distance: Option<Distance>,
}

impl QueryResult {
    /// Distance with `-1` standing in for unreachable targets.
    pub fn distance_or_unreachable(&self) -> i64 {
        self.distance
            .map_or(-1, |distance| i64::try_from(distance).unwrap_or(i64::MAX))
    }
}

pub trait PathFinding: Send + Sync {
    fn query(&self, source: VertexId, target: VertexId) -> Result<QueryResult, QueryError>;

    fn shortest_path_distance(
        &self,
        source: VertexId,
        target: VertexId,
    ) -> Result<Option<Distance>, QueryError> {
        Ok(self.query(source, target)?.distance)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::QueryResult;

    #[test]
    fn unreachable_is_minus_one() {
        let mut result = QueryResult {
            elapsed: Duration::ZERO,
            relaxed_edges: 0,
            distance: None,
        };
        assert_eq!(result.distance_or_unreachable(), -1);

        result.distance = Some(12);
        assert_eq!(result.distance_or_unreachable(), 12);
    }
}

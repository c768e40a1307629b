use ahash::HashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graphs::{Distance, Rank, VertexId};

pub mod augmented_graph;
pub mod ch_priority_element;
pub mod contraction;
pub mod pathfinding;
pub mod preprocessor;
pub mod witness_search;

/// Contraction rank of every vertex.
pub type Ranks = HashMap<VertexId, Rank>;

/// Undirected edge `from` - `to` replacing the two edge path through the
/// contracted vertex `via`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortcut {
    pub from: VertexId,
    pub to: VertexId,
    pub via: VertexId,
    pub weight: Distance,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreprocessError {
    /// Contraction pairs neighbors without regard to direction, so every
    /// lightest edge needs a reverse edge of the same weight.
    #[error("edge {tail} -> {head} of weight {weight} has no reverse edge of equal weight")]
    AsymmetricEdge {
        tail: VertexId,
        head: VertexId,
        weight: Distance,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PreprocessStats {
    /// Popped vertices whose key was stale and that were pushed back.
    pub lazy_updates: u64,
    /// Rebuilds of the whole queue.
    pub refreshes: u64,
}

#[derive(Clone, Debug, Default)]
pub struct PreprocessResult {
    /// Shortcuts in the order they were created.
    pub shortcuts: Vec<Shortcut>,
    pub ranks: Ranks,
    pub stats: PreprocessStats,
}

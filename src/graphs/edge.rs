use serde::{Deserialize, Serialize};

use super::{Distance, VertexId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectedWeightedEdge {
    tail: VertexId,
    head: VertexId,
    weight: Distance,
    shortcut_of: Option<VertexId>,
}

impl DirectedWeightedEdge {
    /// Returns `None` for self loops.
    pub fn new(tail: VertexId, head: VertexId, weight: Distance) -> Option<DirectedWeightedEdge> {
        Self::with_shortcut_of(tail, head, weight, None)
    }

    pub fn with_shortcut_of(
        tail: VertexId,
        head: VertexId,
        weight: Distance,
        shortcut_of: Option<VertexId>,
    ) -> Option<DirectedWeightedEdge> {
        if tail == head {
            return None;
        }

        Some(DirectedWeightedEdge {
            tail,
            head,
            weight,
            shortcut_of,
        })
    }

    pub fn tail(&self) -> VertexId {
        self.tail
    }

    pub fn head(&self) -> VertexId {
        self.head
    }

    pub fn weight(&self) -> Distance {
        self.weight
    }

    /// The contracted vertex this edge bypasses, `None` for original edges.
    pub fn shortcut_of(&self) -> Option<VertexId> {
        self.shortcut_of
    }

    pub fn is_shortcut(&self) -> bool {
        self.shortcut_of.is_some()
    }

    pub fn reversed(&self) -> DirectedWeightedEdge {
        DirectedWeightedEdge {
            tail: self.head,
            head: self.tail,
            weight: self.weight,
            shortcut_of: self.shortcut_of,
        }
    }

    pub fn tailless(&self) -> DirectedTaillessWeightedEdge {
        DirectedTaillessWeightedEdge {
            head: self.head,
            weight: self.weight,
            shortcut_of: self.shortcut_of,
        }
    }

    pub fn headless(&self) -> DirectedHeadlessWeightedEdge {
        DirectedHeadlessWeightedEdge {
            tail: self.tail,
            weight: self.weight,
            shortcut_of: self.shortcut_of,
        }
    }
}

/// Entry of an outgoing adjacency list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectedTaillessWeightedEdge {
    head: VertexId,
    weight: Distance,
    shortcut_of: Option<VertexId>,
}

impl DirectedTaillessWeightedEdge {
    pub fn head(&self) -> VertexId {
        self.head
    }

    pub fn set_tail(&self, tail: VertexId) -> DirectedWeightedEdge {
        DirectedWeightedEdge {
            tail,
            head: self.head,
            weight: self.weight,
            shortcut_of: self.shortcut_of,
        }
    }
}

/// Entry of an incoming adjacency list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectedHeadlessWeightedEdge {
    tail: VertexId,
    weight: Distance,
    shortcut_of: Option<VertexId>,
}

impl DirectedHeadlessWeightedEdge {
    pub fn tail(&self) -> VertexId {
        self.tail
    }

    pub fn set_head(&self, head: VertexId) -> DirectedWeightedEdge {
        DirectedWeightedEdge {
            tail: self.tail,
            head,
            weight: self.weight,
            shortcut_of: self.shortcut_of,
        }
    }
}

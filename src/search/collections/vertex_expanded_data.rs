use ahash::{HashSet, HashSetExt};

use crate::graphs::VertexId;

pub trait VertexExpandedData {
    /// Marks `vertex` as expanded. Returns true if it already was.
    fn expand(&mut self, vertex: VertexId) -> bool;

    fn clear(&mut self);
}

#[derive(Default)]
pub struct VertexExpandedDataHashSet {
    expanded: HashSet<VertexId>,
}

impl VertexExpandedDataHashSet {
    pub fn new() -> Self {
        VertexExpandedDataHashSet {
            expanded: HashSet::new(),
        }
    }
}

impl VertexExpandedData for VertexExpandedDataHashSet {
    fn expand(&mut self, vertex: VertexId) -> bool {
        !self.expanded.insert(vertex)
    }

    fn clear(&mut self) {
        self.expanded.clear();
    }
}

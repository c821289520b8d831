//! Node id layout.

use serde::{Deserialize, Serialize};

/// Partition of the node id space into faces, edges, then coedges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodeOffsets {
    faces: usize,
    edges: usize,
    coedges: usize,
}

impl NodeOffsets {
    /// Layout for the given entity counts.
    pub fn new(faces: usize, edges: usize, coedges: usize) -> Self {
        Self { faces, edges, coedges }
    }

    /// Node id of face `i`.
    #[inline]
    pub fn face(&self, i: usize) -> usize {
        i
    }

    /// Node id of edge `i`.
    #[inline]
    pub fn edge(&self, i: usize) -> usize {
        self.faces + i
    }

    /// Node id of coedge `i`.
    #[inline]
    pub fn coedge(&self, i: usize) -> usize {
        self.faces + self.edges + i
    }

    /// Total node count.
    pub fn total(&self) -> usize {
        self.faces + self.edges + self.coedges
    }

    /// Number of face nodes.
    pub fn face_count(&self) -> usize {
        self.faces
    }

    /// Number of edge nodes.
    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// Number of coedge nodes.
    pub fn coedge_count(&self) -> usize {
        self.coedges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges_are_contiguous() {
        let o = NodeOffsets::new(2, 1, 2);
        assert_eq!(o.face(1), 1);
        assert_eq!(o.edge(0), 2);
        assert_eq!(o.coedge(0), 3);
        assert_eq!(o.coedge(1), 4);
        assert_eq!(o.total(), 5);
    }
}

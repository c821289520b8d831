//! Wiring kernels: which node pairs become graph edges.

use brepgraph_incidence::IncidenceArrays;
use serde::{Deserialize, Serialize};

use crate::offsets::NodeOffsets;

/// A wiring template over the coedges of a body.
///
/// Implementations must be deterministic and emit only node ids below
/// `offsets.total()`.
pub trait Kernel {
    /// Short name for logs and errors.
    fn name(&self) -> &'static str;

    /// Directed `(sender, receiver)` pairs in emission order.
    fn edges(&self, arrays: &IncidenceArrays, offsets: &NodeOffsets) -> Vec<(usize, usize)>;
}

/// Coedges connect to their face, their mate's face, their edge, themselves,
/// and their mate.
///
/// Blocks are emitted in the order F, MF, E, I, M; each block walks the
/// coedges in id order. F, MF, and E are undirected: every coedge emits
/// `(coedge, target)` immediately followed by `(target, coedge)`. M is
/// one-way; the reverse direction comes from the mate's own turn.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleEdge;

impl Kernel for SimpleEdge {
    fn name(&self) -> &'static str {
        "simple_edge"
    }

    fn edges(&self, arrays: &IncidenceArrays, offsets: &NodeOffsets) -> Vec<(usize, usize)> {
        let n = arrays.coedge_count();
        let mut edges = Vec::with_capacity(n * 8);
        simple_edge_blocks(arrays, offsets, &mut edges);
        edges
    }
}

/// [`SimpleEdge`] plus the winged-edge neighbourhood of each coedge.
///
/// After the simple blocks come four one-way blocks: N `(c, next[c])`,
/// P `(c, previous[c])`, MN `(c, next[mate[c]])`, MP `(c, previous[mate[c]])`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WingedEdge;

impl Kernel for WingedEdge {
    fn name(&self) -> &'static str {
        "winged_edge"
    }

    fn edges(&self, arrays: &IncidenceArrays, offsets: &NodeOffsets) -> Vec<(usize, usize)> {
        let n = arrays.coedge_count();
        let mut edges = Vec::with_capacity(n * 12);
        simple_edge_blocks(arrays, offsets, &mut edges);

        let next = arrays.next();
        let mate = arrays.mate();
        let previous = arrays.previous();
        let coedge = |i| offsets.coedge(i);

        edges.extend((0..n).map(|c| (coedge(c), coedge(next[c]))));
        edges.extend((0..n).map(|c| (coedge(c), coedge(previous[c]))));
        edges.extend((0..n).map(|c| (coedge(c), coedge(next[mate[c]]))));
        edges.extend((0..n).map(|c| (coedge(c), coedge(previous[mate[c]]))));
        edges
    }
}

fn simple_edge_blocks(arrays: &IncidenceArrays, offsets: &NodeOffsets, edges: &mut Vec<(usize, usize)>) {
    let n = arrays.coedge_count();
    let mate = arrays.mate();
    let to_face = arrays.coedge_to_face();
    let to_edge = arrays.coedge_to_edge();

    // F
    for c in 0..n {
        undirected(offsets.coedge(c), offsets.face(to_face[c]), edges);
    }
    // MF
    for c in 0..n {
        undirected(offsets.coedge(c), offsets.face(to_face[mate[c]]), edges);
    }
    // E
    for c in 0..n {
        undirected(offsets.coedge(c), offsets.edge(to_edge[c]), edges);
    }
    // I
    edges.extend((0..n).map(|c| (offsets.coedge(c), offsets.coedge(c))));
    // M
    edges.extend((0..n).map(|c| (offsets.coedge(c), offsets.coedge(mate[c]))));
}

fn undirected(from: usize, to: usize, edges: &mut Vec<(usize, usize)>) {
    edges.push((from, to));
    edges.push((to, from));
}

/// Kernel selection for configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelKind {
    /// [`SimpleEdge`].
    #[default]
    SimpleEdge,
    /// [`WingedEdge`].
    WingedEdge,
}

impl KernelKind {
    /// The kernel this variant names.
    pub fn kernel(self) -> &'static dyn Kernel {
        match self {
            KernelKind::SimpleEdge => &SimpleEdge,
            KernelKind::WingedEdge => &WingedEdge,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared_edge() -> IncidenceArrays {
        IncidenceArrays::from_parts(vec![0, 1], vec![1, 0], vec![0, 1], vec![0, 0]).unwrap()
    }

    #[test]
    fn test_simple_edge_order() {
        let offsets = NodeOffsets::new(2, 1, 2);
        let edges = SimpleEdge.edges(&shared_edge(), &offsets);
        assert_eq!(
            edges,
            vec![
                // F
                (3, 0), (0, 3), (4, 1), (1, 4),
                // MF
                (3, 1), (1, 3), (4, 0), (0, 4),
                // E
                (3, 2), (2, 3), (4, 2), (2, 4),
                // I
                (3, 3), (4, 4),
                // M
                (3, 4), (4, 3),
            ]
        );
    }

    #[test]
    fn test_self_mate_doubles_self_loop() {
        let arrays = IncidenceArrays::from_parts(vec![0], vec![0], vec![0], vec![0]).unwrap();
        let offsets = NodeOffsets::new(1, 1, 1);
        let edges = SimpleEdge.edges(&arrays, &offsets);
        assert_eq!(edges.iter().filter(|&&e| e == (2, 2)).count(), 2);
    }

    #[test]
    fn test_winged_edge_extends_simple_edge() {
        // One square loop: next [1, 2, 3, 0], every coedge self-mated.
        let arrays =
            IncidenceArrays::from_parts(vec![1, 2, 3, 0], vec![0, 1, 2, 3], vec![0; 4], vec![0, 1, 2, 3]).unwrap();
        let offsets = NodeOffsets::new(1, 4, 4);
        let simple = SimpleEdge.edges(&arrays, &offsets);
        let winged = WingedEdge.edges(&arrays, &offsets);

        assert_eq!(winged.len(), 4 * 12);
        assert_eq!(&winged[..simple.len()], &simple[..]);
        // N then P for coedge 0 (node 5).
        assert_eq!(winged[simple.len()], (5, 6));
        assert_eq!(winged[simple.len() + 4], (5, 8));
    }

    #[test]
    fn test_kernel_kind_names() {
        assert_eq!(KernelKind::default().kernel().name(), "simple_edge");
        assert_eq!(KernelKind::WingedEdge.kernel().name(), "winged_edge");
    }
}

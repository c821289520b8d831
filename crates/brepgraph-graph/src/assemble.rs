//! Graph assembly.

use brepgraph_features::{block_diagonal, FeatureMatrix};
use brepgraph_incidence::IncidenceArrays;
use serde::Serialize;
use tracing::debug;

use crate::error::GraphError;
use crate::kernel::Kernel;
use crate::offsets::NodeOffsets;
use crate::Result;

/// A directed graph over the faces, edges, and coedges of one body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Graph {
    nodes: FeatureMatrix,
    senders: Vec<usize>,
    receivers: Vec<usize>,
    offsets: NodeOffsets,
}

impl Graph {
    /// Block-diagonal node feature table, one row per node.
    pub fn nodes(&self) -> &FeatureMatrix {
        &self.nodes
    }

    /// Sender node of each graph edge.
    pub fn senders(&self) -> &[usize] {
        &self.senders
    }

    /// Receiver node of each graph edge.
    pub fn receivers(&self) -> &[usize] {
        &self.receivers
    }

    /// `(sender, receiver)` pairs in emission order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.senders.iter().copied().zip(self.receivers.iter().copied())
    }

    /// Node id layout.
    pub fn offsets(&self) -> &NodeOffsets {
        &self.offsets
    }

    /// Number of nodes.
    pub fn n_node(&self) -> usize {
        self.offsets.total()
    }

    /// Number of directed edges, duplicates included.
    pub fn n_edge(&self) -> usize {
        self.senders.len()
    }
}

/// Assemble the graph of one body.
///
/// Row `i` of `faces`, `edges`, and `coedges` holds the features of the
/// entity with id `i`; `arrays` must index the same entities. Every
/// feature matrix needs at least one row.
pub fn assemble(
    faces: &FeatureMatrix,
    edges: &FeatureMatrix,
    coedges: &FeatureMatrix,
    arrays: &IncidenceArrays,
    kernel: &dyn Kernel,
) -> Result<Graph> {
    for (kind, matrix) in [("face", faces), ("edge", edges), ("coedge", coedges)] {
        if matrix.nrows() == 0 {
            return Err(GraphError::EmptyFeatures { kind });
        }
    }
    if arrays.coedge_count() != coedges.nrows() {
        return Err(GraphError::LengthMismatch {
            expected: coedges.nrows(),
            actual: arrays.coedge_count(),
        });
    }
    check_ids("coedge_to_face", arrays.coedge_to_face(), faces.nrows())?;
    check_ids("coedge_to_edge", arrays.coedge_to_edge(), edges.nrows())?;

    let offsets = NodeOffsets::new(faces.nrows(), edges.nrows(), coedges.nrows());
    let pairs = kernel.edges(arrays, &offsets);
    let total = offsets.total();
    if let Some(&(sender, receiver)) = pairs.iter().find(|(s, r)| *s >= total || *r >= total) {
        return Err(GraphError::InvalidKernelEdge {
            kernel: kernel.name(),
            sender,
            receiver,
            total,
        });
    }
    let (senders, receivers): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();

    let graph = Graph {
        nodes: block_diagonal(&[faces, edges, coedges]),
        senders,
        receivers,
        offsets,
    };
    debug!(
        kernel = kernel.name(),
        n_node = graph.n_node(),
        n_edge = graph.n_edge(),
        "assembled graph"
    );
    Ok(graph)
}

fn check_ids(array: &'static str, ids: &[usize], bound: usize) -> Result<()> {
    match ids.iter().position(|&id| id >= bound) {
        Some(position) => Err(GraphError::IdOutOfRange {
            array,
            position,
            value: ids[position],
            bound,
        }),
        None => Ok(()),
    }
}

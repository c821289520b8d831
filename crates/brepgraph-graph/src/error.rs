//! Error types for graph assembly.

use thiserror::Error;

/// Errors that can occur while assembling a graph.
///
/// All of these indicate that the feature matrices and incidence arrays
/// handed to [`assemble`](crate::assemble) do not describe the same body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A feature matrix has no rows.
    #[error("{kind} feature matrix is empty")]
    EmptyFeatures {
        /// Entity kind ("face", "edge", "coedge").
        kind: &'static str,
    },

    /// Incidence arrays and coedge features disagree on the coedge count.
    #[error("incidence arrays cover {actual} coedges but there are {expected} coedge feature rows")]
    LengthMismatch {
        /// Coedge feature rows.
        expected: usize,
        /// Incidence array length.
        actual: usize,
    },

    /// An incidence entry names an entity without a feature row.
    #[error("{array}[{position}] = {value} is out of range for {bound} rows")]
    IdOutOfRange {
        /// Incidence array name.
        array: &'static str,
        /// Coedge id of the entry.
        position: usize,
        /// Offending id.
        value: usize,
        /// Number of feature rows of the referenced kind.
        bound: usize,
    },

    /// A kernel produced an edge outside the node range.
    #[error("kernel {kernel} produced edge ({sender}, {receiver}) outside {total} nodes")]
    InvalidKernelEdge {
        /// Kernel name.
        kernel: &'static str,
        /// Sender node id.
        sender: usize,
        /// Receiver node id.
        receiver: usize,
        /// Total node count.
        total: usize,
    },
}

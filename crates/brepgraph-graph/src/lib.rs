#![warn(missing_docs)]

//! Graph assembly for B-rep bodies.
//!
//! Combines the per-entity feature matrices and the incidence arrays of one
//! body into a single directed graph: a block-diagonal node table (faces,
//! then edges, then coedges) plus parallel sender and receiver arrays.
//!
//! Which node pairs are connected is decided by a [`Kernel`]. Two kernels
//! are provided:
//!
//! | Kernel       | Faces | Edges | Coedges              |
//! |--------------|-------|-------|----------------------|
//! | `SimpleEdge` | F, MF | E     | I, M                 |
//! | `WingedEdge` | F, MF | E     | I, M, N, P, MN, MP   |

mod assemble;
mod error;
mod kernel;
mod offsets;

pub use assemble::{assemble, Graph};
pub use error::GraphError;
pub use kernel::{Kernel, KernelKind, SimpleEdge, WingedEdge};
pub use offsets::NodeOffsets;

/// Result type for graph assembly.
pub type Result<T> = std::result::Result<T, GraphError>;

#![warn(missing_docs)]

//! Per-entity feature matrices for B-rep graphs.
//!
//! Each face, edge, and coedge of a body becomes one fixed-width row of
//! `f32` descriptors. Rows are laid out by entity id, so row `i` of the face
//! matrix describes the face with id `i` in the body's
//! [`EntityIndex`](brepgraph_topo::EntityIndex).
//!
//! The reference layout ([`BRepNetFeatures`]) follows the BRepNet input
//! features:
//!
//! | kind   | width | columns |
//! |--------|-------|---------|
//! | face   | 13    | area, one-hot surface type |
//! | edge   | 17    | concave, convex, smooth, length, closed, periodic, rational, one-hot curve type |
//! | coedge | 1     | reversed |

mod error;
mod extract;
mod layout;

pub use error::FeatureError;
pub use extract::{extract_features, FeatureSet};
pub use layout::{
    block_diagonal, BRepNetFeatures, FeatureExtractor, FeatureMatrix, COEDGE_FEATURE_WIDTH,
    EDGE_FEATURE_WIDTH, FACE_FEATURE_WIDTH,
};

//! Error types for feature extraction.

use brepgraph_topo::TopologyError;
use thiserror::Error;

/// Errors that can occur while extracting feature matrices.
#[derive(Error, Debug)]
pub enum FeatureError {
    /// A feature row does not match the width declared by its extractor.
    #[error("{kind} feature row {row} has {actual} columns, expected {expected}")]
    WidthMismatch {
        /// Entity kind ("face", "edge", "coedge").
        kind: &'static str,
        /// Row (entity id).
        row: usize,
        /// Declared width.
        expected: usize,
        /// Produced width.
        actual: usize,
    },

    /// The body and its entity index disagree.
    #[error(transparent)]
    Topology(#[from] TopologyError),
}

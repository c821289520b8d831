//! Unified error type for the conversion pipeline.

use brepgraph_features::FeatureError;
use brepgraph_graph::GraphError;
use brepgraph_step::StepError;
use brepgraph_topo::TopologyError;
use thiserror::Error;

/// Errors returned by the conversion pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// The body's topology is inconsistent.
    #[error("topology error: {0}")]
    Topology(#[from] TopologyError),

    /// Feature extraction failed.
    #[error("feature error: {0}")]
    Features(#[from] FeatureError),

    /// Graph assembly failed.
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    /// The STEP input could not be read.
    #[error("STEP error: {0}")]
    Step(#[from] StepError),

    /// The configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// An I/O error occurred while loading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

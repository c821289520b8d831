//! Body-to-graph conversion.

use std::path::Path;

use brepgraph_features::{extract_features, BRepNetFeatures, FeatureExtractor, FeatureSet};
use brepgraph_graph::{assemble, Graph};
use brepgraph_incidence::{build_incidence_arrays, verify_loops, IncidenceArrays};
use brepgraph_step::{read_step, read_step_from_buffer};
use brepgraph_topo::{Body, EntityIndex};
use tracing::{debug, info, info_span};

use crate::config::GraphConfig;
use crate::error::Result;

/// Everything derived from one body.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyGraph {
    /// Coedge incidence arrays.
    pub incidence: IncidenceArrays,
    /// Per-entity feature matrices.
    pub features: FeatureSet,
    /// The assembled graph.
    pub graph: Graph,
}

/// Convert a body into a graph using the BRepNet feature layout.
pub fn body_to_graph(body: &Body, config: &GraphConfig) -> Result<BodyGraph> {
    body_to_graph_with(body, config, &BRepNetFeatures)
}

/// Convert a body into a graph with a custom feature layout.
pub fn body_to_graph_with(
    body: &Body,
    config: &GraphConfig,
    extractor: &impl FeatureExtractor,
) -> Result<BodyGraph> {
    let span = info_span!("body_to_graph", faces = body.num_faces(), kernel = ?config.kernel);
    let _guard = span.enter();

    let index = EntityIndex::new(body);
    let incidence = build_incidence_arrays(body, &index)?;
    if config.check_loops {
        verify_loops(body, &index, &incidence)?;
        debug!("loops verified");
    }

    let features = extract_features(body, &index, extractor)?;
    let graph = assemble(
        &features.faces,
        &features.edges,
        &features.coedges,
        &incidence,
        config.kernel.kernel(),
    )?;

    info!(n_node = graph.n_node(), n_edge = graph.n_edge(), "converted body");
    Ok(BodyGraph {
        incidence,
        features,
        graph,
    })
}

/// Convert every solid in a STEP buffer.
pub fn step_to_graphs(data: &[u8], config: &GraphConfig) -> Result<Vec<BodyGraph>> {
    let bodies = read_step_from_buffer(data)?;
    bodies.iter().map(|body| body_to_graph(body, config)).collect()
}

/// Convert every solid in a STEP file.
pub fn step_file_to_graphs(path: impl AsRef<Path>, config: &GraphConfig) -> Result<Vec<BodyGraph>> {
    let bodies = read_step(path)?;
    bodies.iter().map(|body| body_to_graph(body, config)).collect()
}

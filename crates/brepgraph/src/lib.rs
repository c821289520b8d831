#![warn(missing_docs)]

//! Convert B-rep solids into graphs for graph neural networks.
//!
//! A body's faces, edges, and coedges become graph nodes carrying feature
//! rows; a wiring kernel connects each coedge to its face, its mate's face,
//! its edge, itself, and its mate (plus its loop neighbours with
//! [`KernelKind::WingedEdge`]).
//!
//! # Example
//!
//! ```
//! use brepgraph::{body_to_graph, GraphConfig};
//! use brepgraph::topo::{BodyBuilder, CurveKind, SurfaceKind};
//!
//! // Two discs glued along one circular edge.
//! let mut builder = BodyBuilder::new();
//! let top = builder.add_face(SurfaceKind::Plane);
//! let bottom = builder.add_face(SurfaceKind::Plane);
//! let rim = builder.add_edge(CurveKind::Circle);
//! builder.add_wire(top, true, &[(rim, false)]).unwrap();
//! builder.add_wire(bottom, true, &[(rim, true)]).unwrap();
//! let body = builder.build();
//!
//! let result = body_to_graph(&body, &GraphConfig::default()).unwrap();
//! assert_eq!(result.graph.n_node(), 5);
//! assert_eq!(result.graph.n_edge(), 16);
//! ```

pub use brepgraph_features as features;
pub use brepgraph_graph as graph;
pub use brepgraph_incidence as incidence;
pub use brepgraph_step as step;
pub use brepgraph_topo as topo;

mod config;
mod error;
mod pipeline;

pub use brepgraph_graph::{Graph, KernelKind};
pub use config::GraphConfig;
pub use error::{Error, Result};
pub use pipeline::{body_to_graph, body_to_graph_with, step_file_to_graphs, step_to_graphs, BodyGraph};

#![warn(missing_docs)]

//! B-rep body model for brepgraph.
//!
//! A [`Body`] stores faces, wires (loops), coedges, and edges in slotmap
//! arenas. Only topology and entity classification are kept: no geometry is
//! evaluated here. Scalars such as face area or edge length are carried as
//! optional values supplied by whoever built the body.
//!
//! The [`EntityIndex`] assigns each face, edge, and coedge a dense,
//! zero-based id per entity kind. It is built once per body and passed by
//! reference to every stage that needs ids.
//!
//! # Example
//!
//! ```
//! use brepgraph_topo::{BodyBuilder, CurveKind, EntityIndex, SurfaceKind};
//!
//! let mut builder = BodyBuilder::new();
//! let top = builder.add_face(SurfaceKind::Plane);
//! let bottom = builder.add_face(SurfaceKind::Plane);
//! let rim = builder.add_edge(CurveKind::Circle);
//! builder.add_wire(top, true, &[(rim, false)]).unwrap();
//! builder.add_wire(bottom, true, &[(rim, true)]).unwrap();
//! let body = builder.build();
//!
//! let index = EntityIndex::new(&body);
//! assert_eq!(index.face_count(), 2);
//! assert_eq!(index.edge_count(), 1);
//! assert_eq!(index.coedge_count(), 2);
//! ```

mod body;
mod error;
mod index;
mod kinds;

pub use body::{Body, BodyBuilder, Coedge, CoedgeKey, Edge, EdgeKey, Face, FaceKey, OrientedEdge, Wire, WireKey};
pub use error::TopologyError;
pub use index::EntityIndex;
pub use kinds::{Convexity, CurveKind, SurfaceKind};

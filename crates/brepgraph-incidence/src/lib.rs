#![warn(missing_docs)]

//! Coedge incidence arrays for B-rep bodies.
//!
//! Four parallel arrays, indexed by coedge id, encode the combinatorial
//! structure of a body:
//!
//! - `next`: the coedge following each coedge around its loop;
//! - `mate`: the coedge on the other side of the same edge (itself at poles);
//! - `coedge_to_face`: the face owning the coedge's loop;
//! - `coedge_to_edge`: the undirected edge under the coedge.
//!
//! # Example
//!
//! ```
//! use brepgraph_incidence::build_incidence_arrays;
//! use brepgraph_topo::{BodyBuilder, CurveKind, EntityIndex, SurfaceKind};
//!
//! let mut builder = BodyBuilder::new();
//! let a = builder.add_face(SurfaceKind::Plane);
//! let b = builder.add_face(SurfaceKind::Plane);
//! let seam = builder.add_edge(CurveKind::Circle);
//! builder.add_wire(a, true, &[(seam, false)]).unwrap();
//! builder.add_wire(b, true, &[(seam, true)]).unwrap();
//! let body = builder.build();
//!
//! let index = EntityIndex::new(&body);
//! let arrays = build_incidence_arrays(&body, &index).unwrap();
//! assert_eq!(arrays.mate(), &[1, 0]);
//! assert_eq!(arrays.coedge_to_face(), &[0, 1]);
//! assert_eq!(arrays.coedge_to_edge(), &[0, 0]);
//! ```

mod arrays;
mod build;

pub use arrays::IncidenceArrays;
pub use build::{build_incidence_arrays, verify_loops};

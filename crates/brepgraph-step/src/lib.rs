#![warn(missing_docs)]

//! STEP file import for B-rep graph extraction.
//!
//! Reads ISO 10303-21 physical files and rebuilds the topology of each
//! `MANIFOLD_SOLID_BREP` as a [`Body`](brepgraph_topo::Body): faces in shell
//! order, wires in bound order, coedges in loop order. Surfaces and curves
//! are classified by entity type; no geometry is evaluated.
//!
//! # Example
//!
//! ```no_run
//! use brepgraph_step::read_step;
//!
//! let bodies = read_step("model.step").unwrap();
//! println!("{} faces", bodies[0].num_faces());
//! ```

mod entities;
mod error;
mod lexer;
mod parser;
mod reader;

pub use error::StepError;
pub use parser::{Parser, StepEntity, StepFile, StepValue};
pub use reader::{read_step, read_step_from_buffer};

//! STEP file reader: converts parsed STEP data to topological bodies.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;

use brepgraph_topo::{Body, BodyBuilder, Edge, EdgeKey};
use tracing::debug;

use crate::entities::{
    classify_curve, classify_surface, parse_edge_curve, parse_face, parse_loop, parse_manifold_solid_brep,
    parse_oriented_edge, parse_shell, StepFaceBound, StepLoop,
};
use crate::error::StepError;
use crate::parser::{Parser, StepFile};

/// Read STEP file from a path.
///
/// Returns one body per `MANIFOLD_SOLID_BREP`, in ascending entity id.
pub fn read_step(path: impl AsRef<Path>) -> Result<Vec<Body>, StepError> {
    let data = std::fs::read(path)?;
    read_step_from_buffer(&data)
}

/// Read STEP file from a byte buffer.
///
/// Returns one body per `MANIFOLD_SOLID_BREP`, in ascending entity id.
pub fn read_step_from_buffer(data: &[u8]) -> Result<Vec<Body>, StepError> {
    let step_file = Parser::parse(data)?;
    StepReader::new(&step_file).read_all_solids()
}

/// Context for building bodies from one parsed file.
struct StepReader<'a> {
    file: &'a StepFile,
    /// Maps STEP EDGE_CURVE ID to the edge of the body being built.
    edge_map: HashMap<u64, EdgeKey>,
}

impl<'a> StepReader<'a> {
    fn new(file: &'a StepFile) -> Self {
        Self {
            file,
            edge_map: HashMap::new(),
        }
    }

    fn read_all_solids(&mut self) -> Result<Vec<Body>, StepError> {
        let solid_ids: Vec<u64> = self
            .file
            .entities_of_type("MANIFOLD_SOLID_BREP")
            .map(|e| e.id)
            .collect();
        if solid_ids.is_empty() {
            return Err(StepError::NoSolids);
        }

        let mut bodies = Vec::with_capacity(solid_ids.len());
        for id in solid_ids {
            // Edges are never shared between solids.
            self.edge_map.clear();
            bodies.push(self.read_solid(id)?);
        }
        Ok(bodies)
    }

    fn read_solid(&mut self, solid_id: u64) -> Result<Body, StepError> {
        let step_solid = parse_manifold_solid_brep(self.file, solid_id)?;
        let step_shell = parse_shell(self.file, step_solid.outer_shell_id)?;
        if step_shell.face_ids.is_empty() {
            return Err(StepError::InvalidTopology(format!(
                "solid #{solid_id} has an empty shell"
            )));
        }

        let mut builder = BodyBuilder::new();
        for &face_id in &step_shell.face_ids {
            let step_face = parse_face(self.file, face_id)?;
            let surface = classify_surface(self.file, step_face.surface_id)?;
            let face = builder.add_face(surface);

            for bound in &step_face.bounds {
                let uses = self.read_bound(&mut builder, bound)?;
                builder.add_wire(face, bound.is_outer, &uses)?;
            }
        }

        let body = builder.build();
        debug!(
            solid = solid_id,
            faces = body.num_faces(),
            edges = body.num_edges(),
            coedges = body.num_coedges(),
            "read solid"
        );
        Ok(body)
    }

    /// Edge uses of one face bound, as `(edge, reversed)` in loop order.
    fn read_bound(
        &mut self,
        builder: &mut BodyBuilder,
        bound: &StepFaceBound,
    ) -> Result<Vec<(EdgeKey, bool)>, StepError> {
        let oriented_ids = match parse_loop(self.file, bound.loop_id)? {
            StepLoop::Edges(ids) => ids,
            StepLoop::Vertex => return Ok(Vec::new()),
        };

        let mut uses = Vec::with_capacity(oriented_ids.len());
        for oe_id in oriented_ids {
            let oe = parse_oriented_edge(self.file, oe_id)?;
            let edge = match self.edge_map.entry(oe.edge_id) {
                Entry::Occupied(e) => *e.get(),
                Entry::Vacant(e) => {
                    let step_edge = parse_edge_curve(self.file, oe.edge_id)?;
                    let curve = classify_curve(self.file, step_edge.curve_id)?;
                    let key = builder.add_edge(
                        Edge::new(curve.kind)
                            .closed(step_edge.is_closed())
                            .periodic(curve.periodic)
                            .rational(curve.rational),
                    );
                    *e.insert(key)
                }
            };
            uses.push((edge, !oe.orientation));
        }

        // A bound used against its loop runs the loop backwards.
        if !bound.orientation {
            uses.reverse();
            for (_, reversed) in &mut uses {
                *reversed = !*reversed;
            }
        }
        Ok(uses)
    }
}

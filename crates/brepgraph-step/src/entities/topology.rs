//! Topology entities: edge, loop, face, shell, and solid.

use super::EntityArgs;
use crate::error::StepError;
use crate::parser::StepFile;

/// Parsed EDGE_CURVE entity.
#[derive(Debug, Clone)]
pub struct StepEdge {
    /// Start vertex entity ID.
    pub start_vertex_id: u64,
    /// End vertex entity ID.
    pub end_vertex_id: u64,
    /// Edge geometry (curve) entity ID.
    pub curve_id: u64,
}

impl StepEdge {
    /// Whether the edge starts and ends on the same vertex.
    pub fn is_closed(&self) -> bool {
        self.start_vertex_id == self.end_vertex_id
    }
}

/// Parsed ORIENTED_EDGE entity.
#[derive(Debug, Clone)]
pub struct StepOrientedEdge {
    /// The underlying EDGE_CURVE entity ID.
    pub edge_id: u64,
    /// Whether the loop runs along the edge direction.
    pub orientation: bool,
}

/// Parsed loop entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepLoop {
    /// EDGE_LOOP: oriented edge IDs in loop order.
    Edges(Vec<u64>),
    /// VERTEX_LOOP: a degenerate loop with no edges.
    Vertex,
}

/// Parsed FACE_BOUND / FACE_OUTER_BOUND entity.
#[derive(Debug, Clone)]
pub struct StepFaceBound {
    /// The loop entity ID.
    pub loop_id: u64,
    /// Whether the loop is used in its own direction.
    pub orientation: bool,
    /// Whether this is an outer bound.
    pub is_outer: bool,
}

/// Parsed ADVANCED_FACE / FACE_SURFACE entity.
#[derive(Debug, Clone)]
pub struct StepFace {
    /// Face bounds in file order.
    pub bounds: Vec<StepFaceBound>,
    /// Surface geometry entity ID.
    pub surface_id: u64,
}

/// Parsed CLOSED_SHELL / OPEN_SHELL entity.
#[derive(Debug, Clone)]
pub struct StepShell {
    /// Face entity IDs.
    pub face_ids: Vec<u64>,
}

/// Parsed MANIFOLD_SOLID_BREP entity.
#[derive(Debug, Clone)]
pub struct StepSolid {
    /// The outer shell entity ID.
    pub outer_shell_id: u64,
}

/// Parse an EDGE_CURVE entity.
pub fn parse_edge_curve(file: &StepFile, id: u64) -> Result<StepEdge, StepError> {
    let entity = file.require(id)?;

    match entity.type_name.as_str() {
        "EDGE_CURVE" => Ok(StepEdge {
            start_vertex_id: entity.entity_ref(1)?,
            end_vertex_id: entity.entity_ref(2)?,
            curve_id: entity.entity_ref(3)?,
        }),
        other => Err(StepError::type_mismatch("EDGE_CURVE", other)),
    }
}

/// Parse an ORIENTED_EDGE entity.
pub fn parse_oriented_edge(file: &StepFile, id: u64) -> Result<StepOrientedEdge, StepError> {
    let entity = file.require(id)?;

    match entity.type_name.as_str() {
        // (name, *, *, edge_element, orientation)
        "ORIENTED_EDGE" => Ok(StepOrientedEdge {
            edge_id: entity.entity_ref(3)?,
            orientation: entity.boolean(4)?,
        }),
        other => Err(StepError::type_mismatch("ORIENTED_EDGE", other)),
    }
}

/// Parse an EDGE_LOOP or VERTEX_LOOP entity.
pub fn parse_loop(file: &StepFile, id: u64) -> Result<StepLoop, StepError> {
    let entity = file.require(id)?;

    match entity.type_name.as_str() {
        "EDGE_LOOP" => Ok(StepLoop::Edges(entity.entity_ref_list(1)?)),
        "VERTEX_LOOP" => Ok(StepLoop::Vertex),
        other => Err(StepError::type_mismatch("EDGE_LOOP", other)),
    }
}

/// Parse a FACE_BOUND or FACE_OUTER_BOUND entity.
pub fn parse_face_bound(file: &StepFile, id: u64) -> Result<StepFaceBound, StepError> {
    let entity = file.require(id)?;

    match entity.type_name.as_str() {
        "FACE_BOUND" | "FACE_OUTER_BOUND" => Ok(StepFaceBound {
            loop_id: entity.entity_ref(1)?,
            orientation: entity.boolean(2)?,
            is_outer: entity.type_name == "FACE_OUTER_BOUND",
        }),
        other => Err(StepError::type_mismatch("FACE_BOUND", other)),
    }
}

/// Parse an ADVANCED_FACE or FACE_SURFACE entity.
pub fn parse_face(file: &StepFile, id: u64) -> Result<StepFace, StepError> {
    let entity = file.require(id)?;

    match entity.type_name.as_str() {
        "ADVANCED_FACE" | "FACE_SURFACE" => {
            let bounds = entity
                .entity_ref_list(1)?
                .into_iter()
                .map(|bid| parse_face_bound(file, bid))
                .collect::<Result<Vec<_>, _>>()?;

            Ok(StepFace {
                bounds,
                surface_id: entity.entity_ref(2)?,
            })
        }
        other => Err(StepError::type_mismatch("ADVANCED_FACE", other)),
    }
}

/// Parse a CLOSED_SHELL or OPEN_SHELL entity.
pub fn parse_shell(file: &StepFile, id: u64) -> Result<StepShell, StepError> {
    let entity = file.require(id)?;

    match entity.type_name.as_str() {
        "CLOSED_SHELL" | "OPEN_SHELL" => Ok(StepShell {
            face_ids: entity.entity_ref_list(1)?,
        }),
        other => Err(StepError::type_mismatch("SHELL", other)),
    }
}

/// Parse a MANIFOLD_SOLID_BREP entity.
pub fn parse_manifold_solid_brep(file: &StepFile, id: u64) -> Result<StepSolid, StepError> {
    let entity = file.require(id)?;

    match entity.type_name.as_str() {
        "MANIFOLD_SOLID_BREP" => Ok(StepSolid {
            outer_shell_id: entity.entity_ref(1)?,
        }),
        other => Err(StepError::type_mismatch("MANIFOLD_SOLID_BREP", other)),
    }
}

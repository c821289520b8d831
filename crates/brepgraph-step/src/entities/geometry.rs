//! Classification of surface and curve entities by type name.

use brepgraph_topo::{CurveKind, SurfaceKind};
use tracing::trace;

use super::EntityArgs;
use crate::error::StepError;
use crate::parser::{StepEntity, StepFile};

/// Wrappers are followed at most this deep; deeper chains classify as Other.
const MAX_INDIRECTION: usize = 8;

/// Classification of an edge's curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveInfo {
    /// Curve type.
    pub kind: CurveKind,
    /// Whether the curve carries weights.
    pub rational: bool,
    /// Whether the curve is periodic in its parameter.
    pub periodic: bool,
}

/// Classify the surface entity `id`.
///
/// Trimmed surfaces classify as their basis surface.
pub fn classify_surface(file: &StepFile, id: u64) -> Result<SurfaceKind, StepError> {
    let mut entity = file.require(id)?;
    for _ in 0..MAX_INDIRECTION {
        if let Some(basis) = trimmed_basis(entity, "RECTANGULAR_TRIMMED_SURFACE")? {
            entity = file.require(basis)?;
            continue;
        }

        let kind = entity
            .components()
            .iter()
            .find_map(|(name, _)| surface_kind(name))
            .unwrap_or(SurfaceKind::Other);
        if kind == SurfaceKind::Other {
            trace!(entity = entity.id, type_name = %entity.type_name, "unclassified surface");
        }
        return Ok(kind);
    }
    Ok(SurfaceKind::Other)
}

/// Classify the curve entity `id`.
///
/// Surface curves and seam curves classify as their 3D curve, trimmed
/// curves as their basis curve.
pub fn classify_curve(file: &StepFile, id: u64) -> Result<CurveInfo, StepError> {
    let mut entity = file.require(id)?;
    for _ in 0..MAX_INDIRECTION {
        if matches!(
            entity.type_name.as_str(),
            "SURFACE_CURVE" | "SEAM_CURVE" | "INTERSECTION_CURVE"
        ) {
            // (name, curve_3d, associated_geometry, master_representation)
            entity = file.require(entity.entity_ref(1)?)?;
            continue;
        }
        if let Some(basis) = trimmed_basis(entity, "TRIMMED_CURVE")? {
            entity = file.require(basis)?;
            continue;
        }

        let parts = entity.components();
        let kind = parts
            .iter()
            .find_map(|(name, _)| curve_kind(name))
            .unwrap_or(CurveKind::Other);
        if kind == CurveKind::Other {
            trace!(entity = entity.id, type_name = %entity.type_name, "unclassified curve");
        }
        return Ok(CurveInfo {
            kind,
            rational: parts.iter().any(|(name, _)| name.starts_with("RATIONAL_")),
            periodic: matches!(kind, CurveKind::Circle | CurveKind::Ellipse),
        });
    }
    Ok(CurveInfo {
        kind: CurveKind::Other,
        rational: false,
        periodic: false,
    })
}

/// Basis entity of a simple trimmed instance of type `type_name`.
fn trimmed_basis(entity: &StepEntity, type_name: &str) -> Result<Option<u64>, StepError> {
    if entity.type_name == type_name {
        entity.entity_ref(1).map(Some)
    } else {
        Ok(None)
    }
}

fn surface_kind(type_name: &str) -> Option<SurfaceKind> {
    let kind = match type_name {
        "PLANE" => SurfaceKind::Plane,
        "CYLINDRICAL_SURFACE" => SurfaceKind::Cylinder,
        "CONICAL_SURFACE" => SurfaceKind::Cone,
        "SPHERICAL_SURFACE" => SurfaceKind::Sphere,
        "TOROIDAL_SURFACE" | "DEGENERATE_TOROIDAL_SURFACE" => SurfaceKind::Torus,
        "BEZIER_SURFACE" => SurfaceKind::Bezier,
        "B_SPLINE_SURFACE"
        | "B_SPLINE_SURFACE_WITH_KNOTS"
        | "UNIFORM_SURFACE"
        | "QUASI_UNIFORM_SURFACE"
        | "RATIONAL_B_SPLINE_SURFACE" => SurfaceKind::BSpline,
        "SURFACE_OF_REVOLUTION" => SurfaceKind::Revolution,
        "SURFACE_OF_LINEAR_EXTRUSION" => SurfaceKind::Extrusion,
        "OFFSET_SURFACE" => SurfaceKind::Offset,
        _ => return None,
    };
    Some(kind)
}

fn curve_kind(type_name: &str) -> Option<CurveKind> {
    let kind = match type_name {
        "LINE" => CurveKind::Line,
        "CIRCLE" => CurveKind::Circle,
        "ELLIPSE" => CurveKind::Ellipse,
        "HYPERBOLA" => CurveKind::Hyperbola,
        "PARABOLA" => CurveKind::Parabola,
        "BEZIER_CURVE" => CurveKind::Bezier,
        "B_SPLINE_CURVE"
        | "B_SPLINE_CURVE_WITH_KNOTS"
        | "UNIFORM_CURVE"
        | "QUASI_UNIFORM_CURVE"
        | "RATIONAL_B_SPLINE_CURVE" => CurveKind::BSpline,
        "OFFSET_CURVE_3D" => CurveKind::Offset,
        _ => return None,
    };
    Some(kind)
}

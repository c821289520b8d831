//! Closed classifications of surfaces, curves, and edge convexity.
//!
//! Variant order is part of the feature contract: the one-hot columns of the
//! face and edge feature rows follow [`SurfaceKind::ALL`] and
//! [`CurveKind::ALL`].

use serde::{Deserialize, Serialize};

/// Type of the surface underlying a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    /// Planar surface.
    Plane,
    /// Cylindrical surface.
    Cylinder,
    /// Conical surface.
    Cone,
    /// Spherical surface.
    Sphere,
    /// Toroidal surface.
    Torus,
    /// Bezier surface.
    Bezier,
    /// B-spline or NURBS surface.
    BSpline,
    /// Surface of revolution.
    Revolution,
    /// Surface of linear extrusion.
    Extrusion,
    /// Offset surface.
    Offset,
    /// A known surface type with no dedicated column.
    Other,
    /// The surface type could not be determined.
    #[default]
    Unknown,
}

impl SurfaceKind {
    /// Every variant, in one-hot column order.
    pub const ALL: [SurfaceKind; 12] = [
        SurfaceKind::Plane,
        SurfaceKind::Cylinder,
        SurfaceKind::Cone,
        SurfaceKind::Sphere,
        SurfaceKind::Torus,
        SurfaceKind::Bezier,
        SurfaceKind::BSpline,
        SurfaceKind::Revolution,
        SurfaceKind::Extrusion,
        SurfaceKind::Offset,
        SurfaceKind::Other,
        SurfaceKind::Unknown,
    ];

    /// Position of this variant in [`SurfaceKind::ALL`].
    pub fn ordinal(self) -> usize {
        self as usize
    }
}

/// Type of the curve underlying an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    /// Straight line.
    Line,
    /// Circle or circular arc.
    Circle,
    /// Ellipse or elliptic arc.
    Ellipse,
    /// Hyperbola.
    Hyperbola,
    /// Parabola.
    Parabola,
    /// Bezier curve.
    Bezier,
    /// B-spline or NURBS curve.
    BSpline,
    /// Offset curve.
    Offset,
    /// A known curve type with no dedicated column.
    Other,
    /// The curve type could not be determined.
    #[default]
    Unknown,
}

impl CurveKind {
    /// Every variant, in one-hot column order.
    pub const ALL: [CurveKind; 10] = [
        CurveKind::Line,
        CurveKind::Circle,
        CurveKind::Ellipse,
        CurveKind::Hyperbola,
        CurveKind::Parabola,
        CurveKind::Bezier,
        CurveKind::BSpline,
        CurveKind::Offset,
        CurveKind::Other,
        CurveKind::Unknown,
    ];

    /// Position of this variant in [`CurveKind::ALL`].
    pub fn ordinal(self) -> usize {
        self as usize
    }
}

/// Convexity of the dihedral angle across an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Convexity {
    /// The faces meet in a valley.
    Concave,
    /// The faces meet in a ridge.
    Convex,
    /// The faces meet tangentially.
    Smooth,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals_follow_all() {
        for (i, kind) in SurfaceKind::ALL.iter().enumerate() {
            assert_eq!(kind.ordinal(), i);
        }
        for (i, kind) in CurveKind::ALL.iter().enumerate() {
            assert_eq!(kind.ordinal(), i);
        }
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&SurfaceKind::BSpline).unwrap();
        assert_eq!(json, "\"b_spline\"");
        let kind: CurveKind = serde_json::from_str("\"circle\"").unwrap();
        assert_eq!(kind, CurveKind::Circle);
    }
}

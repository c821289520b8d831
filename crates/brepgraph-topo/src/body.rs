//! Faces, wires, coedges, and edges of a single B-rep body.

use slotmap::{new_key_type, SlotMap};

use crate::error::TopologyError;
use crate::kinds::{Convexity, CurveKind, SurfaceKind};

new_key_type! {
    /// Handle to a face in a [`Body`].
    pub struct FaceKey;
    /// Handle to a wire (loop) in a [`Body`].
    pub struct WireKey;
    /// Handle to an undirected edge in a [`Body`].
    pub struct EdgeKey;
    /// Handle to one use of an edge by a wire.
    pub struct CoedgeKey;
}

/// A bounded surface patch.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// Type of the underlying surface.
    pub surface: SurfaceKind,
    /// Area of the face, when supplied by a geometry library.
    pub area: Option<f64>,
    wires: Vec<WireKey>,
}

impl Face {
    /// Create a face on a surface of the given type.
    pub fn new(surface: SurfaceKind) -> Self {
        Self {
            surface,
            area: None,
            wires: Vec::new(),
        }
    }

    /// Attach a known area.
    pub fn with_area(mut self, area: f64) -> Self {
        self.area = Some(area);
        self
    }

    /// Wires bounding this face, outer bound first when the source had one.
    pub fn wires(&self) -> &[WireKey] {
        &self.wires
    }
}

impl From<SurfaceKind> for Face {
    fn from(surface: SurfaceKind) -> Self {
        Face::new(surface)
    }
}

/// A bounded curve, typically shared by two faces.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Type of the underlying curve.
    pub curve: CurveKind,
    /// Arc length, when supplied by a geometry library.
    pub length: Option<f64>,
    /// Dihedral convexity, `None` where it is undefined (sphere poles).
    pub convexity: Option<Convexity>,
    /// The edge starts and ends at the same vertex.
    pub closed: bool,
    /// The underlying curve is periodic.
    pub periodic: bool,
    /// The underlying curve is rational.
    pub rational: bool,
}

impl Edge {
    /// Create an edge on a curve of the given type.
    pub fn new(curve: CurveKind) -> Self {
        Self {
            curve,
            length: None,
            convexity: None,
            closed: false,
            periodic: false,
            rational: false,
        }
    }

    /// Attach a known arc length.
    pub fn with_length(mut self, length: f64) -> Self {
        self.length = Some(length);
        self
    }

    /// Attach a known convexity.
    pub fn with_convexity(mut self, convexity: Convexity) -> Self {
        self.convexity = Some(convexity);
        self
    }

    /// Mark the edge closed.
    pub fn closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    /// Mark the curve periodic.
    pub fn periodic(mut self, periodic: bool) -> Self {
        self.periodic = periodic;
        self
    }

    /// Mark the curve rational.
    pub fn rational(mut self, rational: bool) -> Self {
        self.rational = rational;
        self
    }
}

impl From<CurveKind> for Edge {
    fn from(curve: CurveKind) -> Self {
        Edge::new(curve)
    }
}

/// An edge together with the direction it is traversed in.
///
/// This is the structural identity of a coedge: two uses of the same edge
/// in the same direction are the same oriented edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrientedEdge {
    /// The underlying edge.
    pub edge: EdgeKey,
    /// Traversed against the edge's own direction.
    pub reversed: bool,
}

impl OrientedEdge {
    /// The same edge traversed the other way.
    pub fn reversed_edge(self) -> Self {
        Self {
            edge: self.edge,
            reversed: !self.reversed,
        }
    }
}

/// One use of an edge by a wire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coedge {
    /// The underlying edge.
    pub edge: EdgeKey,
    /// The wire this coedge belongs to.
    pub wire: WireKey,
    /// Traversed against the edge's own direction.
    pub reversed: bool,
}

impl Coedge {
    /// Structural identity of this coedge.
    pub fn oriented(&self) -> OrientedEdge {
        OrientedEdge {
            edge: self.edge,
            reversed: self.reversed,
        }
    }
}

/// An ordered, closed sequence of coedges bounding a face.
#[derive(Debug, Clone, PartialEq)]
pub struct Wire {
    /// The face owning this wire.
    pub face: FaceKey,
    /// Outer bound of the face (as opposed to a hole).
    pub is_outer: bool,
    coedges: Vec<CoedgeKey>,
}

impl Wire {
    /// Coedges in loop order. Empty for vertex loops.
    pub fn coedges(&self) -> &[CoedgeKey] {
        &self.coedges
    }
}

/// Topology of one B-rep body.
///
/// Iteration over any entity kind yields entities in the order they were
/// added, which is the body's canonical enumeration order.
#[derive(Debug, Clone, Default)]
pub struct Body {
    faces: SlotMap<FaceKey, Face>,
    wires: SlotMap<WireKey, Wire>,
    edges: SlotMap<EdgeKey, Edge>,
    coedges: SlotMap<CoedgeKey, Coedge>,
}

impl Body {
    /// All faces.
    pub fn faces(&self) -> impl Iterator<Item = (FaceKey, &Face)> {
        self.faces.iter()
    }

    /// All wires, in the order their faces were bounded.
    pub fn wires(&self) -> impl Iterator<Item = (WireKey, &Wire)> {
        self.wires.iter()
    }

    /// All edges.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, &Edge)> {
        self.edges.iter()
    }

    /// All coedges, grouped by wire in loop order.
    pub fn coedges(&self) -> impl Iterator<Item = (CoedgeKey, &Coedge)> {
        self.coedges.iter()
    }

    /// Look up a face.
    pub fn face(&self, key: FaceKey) -> Option<&Face> {
        self.faces.get(key)
    }

    /// Look up a wire.
    pub fn wire(&self, key: WireKey) -> Option<&Wire> {
        self.wires.get(key)
    }

    /// Look up an edge.
    pub fn edge(&self, key: EdgeKey) -> Option<&Edge> {
        self.edges.get(key)
    }

    /// Look up a coedge.
    pub fn coedge(&self, key: CoedgeKey) -> Option<&Coedge> {
        self.coedges.get(key)
    }

    /// Wires bounding `face`. Empty if the face is not part of this body.
    pub fn wires_of_face(&self, face: FaceKey) -> impl Iterator<Item = (WireKey, &Wire)> {
        self.faces
            .get(face)
            .map(|f| f.wires.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(|&w| self.wires.get(w).map(|wire| (w, wire)))
    }

    /// Coedges of `wire` in loop order.
    pub fn coedges_of_wire<'a>(&'a self, wire: &'a Wire) -> impl Iterator<Item = (CoedgeKey, &'a Coedge)> {
        wire.coedges
            .iter()
            .filter_map(|&c| self.coedges.get(c).map(|coedge| (c, coedge)))
    }

    /// Number of faces.
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Number of wires.
    pub fn num_wires(&self) -> usize {
        self.wires.len()
    }

    /// Number of edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Number of coedges (uses, not distinct oriented edges).
    pub fn num_coedges(&self) -> usize {
        self.coedges.len()
    }
}

/// Incremental constructor for a [`Body`].
#[derive(Debug, Default)]
pub struct BodyBuilder {
    body: Body,
}

impl BodyBuilder {
    /// Start an empty body.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a face. Wires are attached with [`BodyBuilder::add_wire`].
    pub fn add_face(&mut self, face: impl Into<Face>) -> FaceKey {
        let mut face = face.into();
        face.wires.clear();
        self.body.faces.insert(face)
    }

    /// Add an edge.
    pub fn add_edge(&mut self, edge: impl Into<Edge>) -> EdgeKey {
        self.body.edges.insert(edge.into())
    }

    /// Bound `face` with a loop of edge uses, given in loop order as
    /// `(edge, reversed)` pairs.
    ///
    /// An empty `uses` slice records a vertex loop.
    pub fn add_wire(
        &mut self,
        face: FaceKey,
        is_outer: bool,
        uses: &[(EdgeKey, bool)],
    ) -> Result<WireKey, TopologyError> {
        if !self.body.faces.contains_key(face) {
            return Err(TopologyError::UnknownEntity { kind: "face" });
        }
        if uses.iter().any(|(e, _)| !self.body.edges.contains_key(*e)) {
            return Err(TopologyError::UnknownEntity { kind: "edge" });
        }

        let wire = self.body.wires.insert(Wire {
            face,
            is_outer,
            coedges: Vec::with_capacity(uses.len()),
        });
        for &(edge, reversed) in uses {
            let coedge = self.body.coedges.insert(Coedge {
                edge,
                wire,
                reversed,
            });
            self.body.wires[wire].coedges.push(coedge);
        }
        self.body.faces[face].wires.push(wire);
        Ok(wire)
    }

    /// Mutable access to an already added face.
    pub fn face_mut(&mut self, key: FaceKey) -> Option<&mut Face> {
        self.body.faces.get_mut(key)
    }

    /// Mutable access to an already added edge.
    pub fn edge_mut(&mut self, key: EdgeKey) -> Option<&mut Edge> {
        self.body.edges.get_mut(key)
    }

    /// Finish the body.
    pub fn build(self) -> Body {
        tracing::trace!(
            faces = self.body.num_faces(),
            wires = self.body.num_wires(),
            edges = self.body.num_edges(),
            coedges = self.body.num_coedges(),
            "body built"
        );
        self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_keeps_loop_order() {
        let mut b = BodyBuilder::new();
        let f = b.add_face(SurfaceKind::Plane);
        let e0 = b.add_edge(CurveKind::Line);
        let e1 = b.add_edge(CurveKind::Line);
        let e2 = b.add_edge(CurveKind::Line);
        let w = b.add_wire(f, true, &[(e2, false), (e0, true), (e1, false)]).unwrap();
        let body = b.build();

        let wire = body.wire(w).unwrap();
        let edges: Vec<_> = body.coedges_of_wire(wire).map(|(_, c)| c.edge).collect();
        assert_eq!(edges, vec![e2, e0, e1]);
        assert!(body.coedge(wire.coedges()[1]).unwrap().reversed);
        assert_eq!(body.face(f).unwrap().wires(), &[w]);
    }

    #[test]
    fn test_wires_of_face() {
        let mut b = BodyBuilder::new();
        let f0 = b.add_face(SurfaceKind::Plane);
        let f1 = b.add_face(SurfaceKind::Cylinder);
        let e = b.add_edge(CurveKind::Circle);
        let outer = b.add_wire(f0, true, &[(e, false)]).unwrap();
        let inner = b.add_wire(f0, false, &[]).unwrap();
        b.add_wire(f1, true, &[(e, true)]).unwrap();
        let body = b.build();

        let wires: Vec<_> = body.wires_of_face(f0).map(|(k, _)| k).collect();
        assert_eq!(wires, vec![outer, inner]);
        assert!(body.wire(inner).unwrap().coedges().is_empty());
        assert_eq!(body.num_wires(), 3);
        assert_eq!(body.num_coedges(), 2);
    }

    #[test]
    fn test_rejects_foreign_keys() {
        let mut other = BodyBuilder::new();
        let foreign_face = other.add_face(SurfaceKind::Plane);
        let foreign_edge = other.add_edge(CurveKind::Line);

        let mut b = BodyBuilder::new();
        assert_eq!(
            b.add_wire(foreign_face, true, &[]),
            Err(TopologyError::UnknownEntity { kind: "face" })
        );
        let f = b.add_face(SurfaceKind::Plane);
        assert_eq!(
            b.add_wire(f, true, &[(foreign_edge, false)]),
            Err(TopologyError::UnknownEntity { kind: "edge" })
        );
        assert_eq!(b.build().num_wires(), 0);
    }

    #[test]
    fn test_oriented_edge_reverse() {
        let mut b = BodyBuilder::new();
        let e = b.add_edge(CurveKind::Line);
        let oe = OrientedEdge { edge: e, reversed: false };
        assert_eq!(oe.reversed_edge().reversed_edge(), oe);
        assert_ne!(oe.reversed_edge(), oe);
    }

    #[test]
    fn test_edge_attributes() {
        let edge = Edge::new(CurveKind::Circle)
            .with_length(6.0)
            .with_convexity(Convexity::Convex)
            .closed(true)
            .periodic(true);
        assert_eq!(edge.length, Some(6.0));
        assert_eq!(edge.convexity, Some(Convexity::Convex));
        assert!(edge.closed && edge.periodic && !edge.rational);
    }

    #[test]
    fn test_measures_attached_after_wiring() {
        let mut b = BodyBuilder::new();
        let f = b.add_face(SurfaceKind::Plane);
        let e = b.add_edge(CurveKind::Line);
        b.add_wire(f, true, &[(e, false)]).unwrap();

        b.face_mut(f).unwrap().area = Some(2.5);
        let edge = b.edge_mut(e).unwrap();
        edge.length = Some(1.5);
        edge.convexity = Some(Convexity::Concave);

        let body = b.build();
        assert_eq!(body.face(f).unwrap().area, Some(2.5));
        assert_eq!(body.edge(e).unwrap().length, Some(1.5));
        assert_eq!(body.edge(e).unwrap().convexity, Some(Convexity::Concave));
        assert_eq!(body.face(f).unwrap().wires().len(), 1);
    }

    #[test]
    fn test_mut_rejects_foreign_keys() {
        let mut other = BodyBuilder::new();
        let f = other.add_face(SurfaceKind::Plane);
        let e = other.add_edge(CurveKind::Line);

        let mut b = BodyBuilder::new();
        assert!(b.face_mut(f).is_none());
        assert!(b.edge_mut(e).is_none());
    }
}

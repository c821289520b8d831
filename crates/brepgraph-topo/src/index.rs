//! Dense per-kind ids for the entities of one body.

use std::collections::HashMap;

use slotmap::SecondaryMap;

use crate::body::{Body, EdgeKey, FaceKey, OrientedEdge};

/// Maps faces, edges, and coedges of a body to dense zero-based ids.
///
/// Faces and edges are numbered in body enumeration order. Coedges are
/// numbered by [`OrientedEdge`] in first-seen order while walking wires in
/// body order and each wire in loop order, so repeated uses of the same
/// oriented edge share one id.
#[derive(Debug, Clone, Default)]
pub struct EntityIndex {
    faces: SecondaryMap<FaceKey, usize>,
    edges: SecondaryMap<EdgeKey, usize>,
    coedges: HashMap<OrientedEdge, usize>,
    coedge_order: Vec<OrientedEdge>,
}

impl EntityIndex {
    /// Index every entity of `body`.
    pub fn new(body: &Body) -> Self {
        let mut index = Self::default();

        for (i, (key, _)) in body.faces().enumerate() {
            index.faces.insert(key, i);
        }
        for (i, (key, _)) in body.edges().enumerate() {
            index.edges.insert(key, i);
        }
        for (_, wire) in body.wires() {
            for (_, coedge) in body.coedges_of_wire(wire) {
                let oriented = coedge.oriented();
                if !index.coedges.contains_key(&oriented) {
                    index.coedges.insert(oriented, index.coedge_order.len());
                    index.coedge_order.push(oriented);
                }
            }
        }

        index
    }

    /// Number of indexed faces.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of indexed edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of indexed coedges.
    pub fn coedge_count(&self) -> usize {
        self.coedge_order.len()
    }

    /// Id of a face.
    pub fn face_index(&self, face: FaceKey) -> Option<usize> {
        self.faces.get(face).copied()
    }

    /// Id of an edge.
    pub fn edge_index(&self, edge: EdgeKey) -> Option<usize> {
        self.edges.get(edge).copied()
    }

    /// Id of a coedge.
    pub fn coedge_index(&self, coedge: OrientedEdge) -> Option<usize> {
        self.coedges.get(&coedge).copied()
    }

    /// Whether `coedge` is used anywhere in the body.
    pub fn coedge_exists(&self, coedge: OrientedEdge) -> bool {
        self.coedges.contains_key(&coedge)
    }

    /// Id of the coedge running the other way along the same edge, if the
    /// body has one.
    pub fn mate_index(&self, coedge: OrientedEdge) -> Option<usize> {
        self.coedge_index(coedge.reversed_edge())
    }

    /// Indexed coedges in id order.
    pub fn coedges(&self) -> &[OrientedEdge] {
        &self.coedge_order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyBuilder;
    use crate::kinds::{CurveKind, SurfaceKind};

    #[test]
    fn test_dense_ids_in_body_order() {
        let mut b = BodyBuilder::new();
        let f0 = b.add_face(SurfaceKind::Plane);
        let f1 = b.add_face(SurfaceKind::Plane);
        let e0 = b.add_edge(CurveKind::Line);
        let e1 = b.add_edge(CurveKind::Line);
        b.add_wire(f0, true, &[(e1, false), (e0, false)]).unwrap();
        b.add_wire(f1, true, &[(e0, true), (e1, true)]).unwrap();
        let body = b.build();

        let index = EntityIndex::new(&body);
        assert_eq!(index.face_index(f0), Some(0));
        assert_eq!(index.face_index(f1), Some(1));
        assert_eq!(index.edge_index(e1), Some(1));

        let fwd = |edge| OrientedEdge { edge, reversed: false };
        assert_eq!(index.coedge_index(fwd(e1)), Some(0));
        assert_eq!(index.coedge_index(fwd(e0)), Some(1));
        assert_eq!(index.coedge_index(fwd(e0).reversed_edge()), Some(2));
        assert_eq!(index.mate_index(fwd(e1)), Some(3));
        assert_eq!(index.coedges()[3], fwd(e1).reversed_edge());
    }

    #[test]
    fn test_missing_mate() {
        let mut b = BodyBuilder::new();
        let f = b.add_face(SurfaceKind::Sphere);
        let pole = b.add_edge(CurveKind::Unknown);
        b.add_wire(f, true, &[(pole, false)]).unwrap();
        let body = b.build();

        let index = EntityIndex::new(&body);
        let oe = OrientedEdge { edge: pole, reversed: false };
        assert!(index.coedge_exists(oe));
        assert!(!index.coedge_exists(oe.reversed_edge()));
        assert_eq!(index.mate_index(oe), None);
    }

    #[test]
    fn test_repeated_use_shares_id() {
        let mut b = BodyBuilder::new();
        let f = b.add_face(SurfaceKind::Plane);
        let e = b.add_edge(CurveKind::Line);
        b.add_wire(f, true, &[(e, false)]).unwrap();
        b.add_wire(f, false, &[(e, false)]).unwrap();
        let body = b.build();

        let index = EntityIndex::new(&body);
        assert_eq!(body.num_coedges(), 2);
        assert_eq!(index.coedge_count(), 1);
    }
}

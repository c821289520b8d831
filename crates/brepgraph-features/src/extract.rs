//! Feature extraction over a whole body.

use brepgraph_topo::{Body, EntityIndex, TopologyError};
use tracing::debug;

use crate::error::FeatureError;
use crate::layout::{block_diagonal, FeatureExtractor, FeatureMatrix};

/// Face, edge, and coedge feature matrices of one body, rows ordered by
/// entity id.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet {
    /// One row per face.
    pub faces: FeatureMatrix,
    /// One row per edge.
    pub edges: FeatureMatrix,
    /// One row per coedge.
    pub coedges: FeatureMatrix,
}

impl FeatureSet {
    /// Block-diagonal node table: faces, then edges, then coedges, each kind
    /// in its own column range.
    pub fn stacked(&self) -> FeatureMatrix {
        block_diagonal(&[&self.faces, &self.edges, &self.coedges])
    }
}

/// Extract feature matrices for every entity in `index`.
pub fn extract_features(
    body: &Body,
    index: &EntityIndex,
    extractor: &impl FeatureExtractor,
) -> Result<FeatureSet, FeatureError> {
    let mut faces = Rows::new("face", index.face_count(), extractor.face_width());
    for (key, face) in body.faces() {
        let row = index
            .face_index(key)
            .ok_or(TopologyError::Unindexed { kind: "face" })?;
        faces.set(row, extractor.face(face))?;
    }

    let mut edges = Rows::new("edge", index.edge_count(), extractor.edge_width());
    for (key, edge) in body.edges() {
        let row = index
            .edge_index(key)
            .ok_or(TopologyError::Unindexed { kind: "edge" })?;
        edges.set(row, extractor.edge(edge))?;
    }

    let mut coedges = Rows::new("coedge", index.coedge_count(), extractor.coedge_width());
    for (row, &oriented) in index.coedges().iter().enumerate() {
        let edge = body
            .edge(oriented.edge)
            .ok_or(TopologyError::UnknownEntity { kind: "edge" })?;
        coedges.set(row, extractor.coedge(oriented, edge))?;
    }

    let set = FeatureSet {
        faces: faces.finish()?,
        edges: edges.finish()?,
        coedges: coedges.finish()?,
    };
    debug!(
        faces = ?set.faces.shape(),
        edges = ?set.edges.shape(),
        coedges = ?set.coedges.shape(),
        "extracted features"
    );
    Ok(set)
}

/// Row-major buffer for one feature matrix.
struct Rows {
    kind: &'static str,
    width: usize,
    data: Vec<f32>,
    filled: Vec<bool>,
}

impl Rows {
    fn new(kind: &'static str, count: usize, width: usize) -> Self {
        Self {
            kind,
            width,
            data: vec![0.0; count * width],
            filled: vec![false; count],
        }
    }

    fn set(&mut self, row: usize, values: Vec<f32>) -> Result<(), FeatureError> {
        if values.len() != self.width {
            return Err(FeatureError::WidthMismatch {
                kind: self.kind,
                row,
                expected: self.width,
                actual: values.len(),
            });
        }
        if row >= self.filled.len() {
            return Err(TopologyError::Unindexed { kind: self.kind }.into());
        }
        let start = row * self.width;
        self.data[start..start + self.width].copy_from_slice(&values);
        self.filled[row] = true;
        Ok(())
    }

    fn finish(self) -> Result<FeatureMatrix, FeatureError> {
        if self.filled.iter().any(|f| !f) {
            return Err(TopologyError::Unindexed { kind: self.kind }.into());
        }
        Ok(FeatureMatrix::from_row_slice(self.filled.len(), self.width, &self.data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{BRepNetFeatures, COEDGE_FEATURE_WIDTH, EDGE_FEATURE_WIDTH, FACE_FEATURE_WIDTH};
    use approx::assert_relative_eq;
    use brepgraph_topo::{BodyBuilder, Convexity, CurveKind, Edge, Face, OrientedEdge, SurfaceKind};

    fn two_faces() -> Body {
        let mut b = BodyBuilder::new();
        let f0 = b.add_face(Face::new(SurfaceKind::Plane).with_area(4.0));
        let f1 = b.add_face(SurfaceKind::Cylinder);
        let rim = b.add_edge(Edge::new(CurveKind::Circle).with_length(6.25).closed(true));
        b.add_wire(f0, true, &[(rim, false)]).unwrap();
        b.add_wire(f1, true, &[(rim, true)]).unwrap();
        b.build()
    }

    #[test]
    fn test_shapes() {
        let body = two_faces();
        let index = EntityIndex::new(&body);
        let set = extract_features(&body, &index, &BRepNetFeatures).unwrap();

        assert_eq!(set.faces.shape(), (2, FACE_FEATURE_WIDTH));
        assert_eq!(set.edges.shape(), (1, EDGE_FEATURE_WIDTH));
        assert_eq!(set.coedges.shape(), (2, COEDGE_FEATURE_WIDTH));
    }

    #[test]
    fn test_rows_follow_ids() {
        let body = two_faces();
        let index = EntityIndex::new(&body);
        let set = extract_features(&body, &index, &BRepNetFeatures).unwrap();

        assert_relative_eq!(set.faces[(0, 0)], 4.0);
        assert_eq!(set.faces[(0, 1 + SurfaceKind::Plane.ordinal())], 1.0);
        assert_eq!(set.faces[(1, 1 + SurfaceKind::Cylinder.ordinal())], 1.0);
        assert_relative_eq!(set.edges[(0, 3)], 6.25);
        assert_eq!(set.coedges[(0, 0)], 0.0);
        assert_eq!(set.coedges[(1, 0)], 1.0);
    }

    #[test]
    fn test_measures_set_after_wiring() {
        let mut b = BodyBuilder::new();
        let f = b.add_face(SurfaceKind::Plane);
        let e = b.add_edge(CurveKind::Line);
        b.add_wire(f, true, &[(e, false)]).unwrap();
        if let Some(face) = b.face_mut(f) {
            face.area = Some(3.0);
        }
        if let Some(edge) = b.edge_mut(e) {
            edge.length = Some(0.5);
            edge.convexity = Some(Convexity::Smooth);
        }
        let body = b.build();
        let index = EntityIndex::new(&body);
        let set = extract_features(&body, &index, &BRepNetFeatures).unwrap();

        assert_relative_eq!(set.faces[(0, 0)], 3.0);
        assert_eq!(set.edges[(0, 0)], 0.0);
        assert_eq!(set.edges[(0, 2)], 1.0);
        assert_relative_eq!(set.edges[(0, 3)], 0.5);
    }

    #[test]
    fn test_stacked_is_block_diagonal() {
        let body = two_faces();
        let index = EntityIndex::new(&body);
        let set = extract_features(&body, &index, &BRepNetFeatures).unwrap();
        let nodes = set.stacked();

        assert_eq!(nodes.shape(), (5, FACE_FEATURE_WIDTH + EDGE_FEATURE_WIDTH + COEDGE_FEATURE_WIDTH));
        // Face rows are zero outside the face columns.
        assert_eq!(nodes.view((0, FACE_FEATURE_WIDTH), (2, 18)).sum(), 0.0);
        // Edge row sits in the edge column range.
        assert_relative_eq!(nodes[(2, FACE_FEATURE_WIDTH + 3)], 6.25);
        assert_eq!(nodes.view((2, 0), (1, FACE_FEATURE_WIDTH)).sum(), 0.0);
        // Reversed coedge flag in the last column.
        assert_eq!(nodes[(4, 30)], 1.0);
        assert_eq!(nodes.view((3, 0), (2, 30)).sum(), 0.0);
    }

    struct Ragged;

    impl FeatureExtractor for Ragged {
        fn face_width(&self) -> usize {
            2
        }
        fn edge_width(&self) -> usize {
            1
        }
        fn coedge_width(&self) -> usize {
            1
        }
        fn face(&self, _face: &Face) -> Vec<f32> {
            vec![1.0]
        }
        fn edge(&self, _edge: &Edge) -> Vec<f32> {
            vec![1.0]
        }
        fn coedge(&self, _coedge: OrientedEdge, _edge: &Edge) -> Vec<f32> {
            vec![1.0]
        }
    }

    #[test]
    fn test_width_mismatch() {
        let body = two_faces();
        let index = EntityIndex::new(&body);
        let err = extract_features(&body, &index, &Ragged).unwrap_err();
        assert!(matches!(
            err,
            FeatureError::WidthMismatch { kind: "face", row: 0, expected: 2, actual: 1 }
        ));
    }

    #[test]
    fn test_empty_body() {
        let body = BodyBuilder::new().build();
        let index = EntityIndex::new(&body);
        let set = extract_features(&body, &index, &BRepNetFeatures).unwrap();
        assert_eq!(set.stacked().shape(), (0, 31));
    }

    #[test]
    fn test_index_from_other_body() {
        let body = two_faces();
        let index = EntityIndex::new(&BodyBuilder::new().build());
        assert!(matches!(
            extract_features(&body, &index, &BRepNetFeatures),
            Err(FeatureError::Topology(TopologyError::Unindexed { kind: "face" }))
        ));
    }
}

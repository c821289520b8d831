//! Feature row layouts.

use brepgraph_topo::{Convexity, CurveKind, Edge, Face, OrientedEdge, SurfaceKind};
use nalgebra::DMatrix;

/// Dense row-major feature table: one row per entity, one column per feature.
pub type FeatureMatrix = DMatrix<f32>;

/// Columns in a [`BRepNetFeatures`] face row.
pub const FACE_FEATURE_WIDTH: usize = 1 + SurfaceKind::ALL.len();
/// Columns in a [`BRepNetFeatures`] edge row.
pub const EDGE_FEATURE_WIDTH: usize = 7 + CurveKind::ALL.len();
/// Columns in a [`BRepNetFeatures`] coedge row.
pub const COEDGE_FEATURE_WIDTH: usize = 1;

/// Turns topological entities into fixed-width feature rows.
///
/// Every row produced for a kind must have exactly the width declared for
/// that kind; [`extract_features`](crate::extract_features) rejects rows
/// that do not.
pub trait FeatureExtractor {
    /// Columns per face row.
    fn face_width(&self) -> usize;
    /// Columns per edge row.
    fn edge_width(&self) -> usize;
    /// Columns per coedge row.
    fn coedge_width(&self) -> usize;

    /// Feature row for a face.
    fn face(&self, face: &Face) -> Vec<f32>;
    /// Feature row for an edge.
    fn edge(&self, edge: &Edge) -> Vec<f32>;
    /// Feature row for one oriented use of `edge`.
    fn coedge(&self, coedge: OrientedEdge, edge: &Edge) -> Vec<f32>;
}

/// The BRepNet input features.
///
/// Missing geometric measures (area, length, convexity) encode as zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct BRepNetFeatures;

impl FeatureExtractor for BRepNetFeatures {
    fn face_width(&self) -> usize {
        FACE_FEATURE_WIDTH
    }

    fn edge_width(&self) -> usize {
        EDGE_FEATURE_WIDTH
    }

    fn coedge_width(&self) -> usize {
        COEDGE_FEATURE_WIDTH
    }

    fn face(&self, face: &Face) -> Vec<f32> {
        let mut row = Vec::with_capacity(FACE_FEATURE_WIDTH);
        row.push(face.area.unwrap_or(0.0) as f32);
        row.extend(one_hot(face.surface.ordinal(), SurfaceKind::ALL.len()));
        row
    }

    fn edge(&self, edge: &Edge) -> Vec<f32> {
        let mut row = Vec::with_capacity(EDGE_FEATURE_WIDTH);
        row.push(flag(edge.convexity == Some(Convexity::Concave)));
        row.push(flag(edge.convexity == Some(Convexity::Convex)));
        row.push(flag(edge.convexity == Some(Convexity::Smooth)));
        row.push(edge.length.unwrap_or(0.0) as f32);
        row.push(flag(edge.closed));
        row.push(flag(edge.periodic));
        row.push(flag(edge.rational));
        row.extend(one_hot(edge.curve.ordinal(), CurveKind::ALL.len()));
        row
    }

    fn coedge(&self, coedge: OrientedEdge, _edge: &Edge) -> Vec<f32> {
        vec![flag(coedge.reversed)]
    }
}

fn flag(value: bool) -> f32 {
    if value {
        1.0
    } else {
        0.0
    }
}

fn one_hot(position: usize, len: usize) -> impl Iterator<Item = f32> {
    (0..len).map(move |i| flag(i == position))
}

/// Place `blocks` along the diagonal of a zero matrix.
///
/// Block `k` occupies the rows after blocks `0..k` and the columns after
/// their widths. A block with no rows still reserves its columns.
pub fn block_diagonal(blocks: &[&FeatureMatrix]) -> FeatureMatrix {
    let rows = blocks.iter().map(|b| b.nrows()).sum();
    let cols = blocks.iter().map(|b| b.ncols()).sum();
    let mut out = FeatureMatrix::zeros(rows, cols);

    let (mut r, mut c) = (0, 0);
    for block in blocks {
        let (nr, nc) = block.shape();
        if nr > 0 && nc > 0 {
            out.view_mut((r, c), (nr, nc)).copy_from(*block);
        }
        r += nr;
        c += nc;
    }
    out
}

//! End-to-end assembly over hand-built incidence arrays.

use std::collections::HashSet;

use brepgraph_features::FeatureMatrix;
use brepgraph_graph::{assemble, GraphError, KernelKind, SimpleEdge, WingedEdge};
use brepgraph_incidence::IncidenceArrays;

/// Two faces sharing one edge, used once from each side.
fn shared_edge() -> IncidenceArrays {
    IncidenceArrays::from_parts(vec![0, 1], vec![1, 0], vec![0, 1], vec![0, 0]).unwrap()
}

fn column(rows: usize, value: f32) -> FeatureMatrix {
    FeatureMatrix::from_element(rows, 1, value)
}

#[test]
fn test_two_faces_one_edge() {
    let faces = column(2, 1.0);
    let edges = column(1, 2.0);
    let coedges = column(2, 3.0);
    let graph = assemble(&faces, &edges, &coedges, &shared_edge(), &SimpleEdge).unwrap();

    assert_eq!(graph.n_node(), 5);
    assert_eq!(graph.nodes().shape(), (5, 3));
    assert_eq!(graph.n_edge(), 16);
    assert_eq!(graph.senders().len(), graph.receivers().len());

    let pairs: HashSet<_> = graph.edges().collect();
    assert!(pairs.contains(&(0, 3)), "face to coedge");
    assert!(pairs.contains(&(0, 4)), "mate face to coedge");
    assert!(pairs.contains(&(2, 3)), "edge to coedge");
    assert!(pairs.contains(&(2, 4)), "edge to coedge");
    assert!(pairs.contains(&(3, 3)), "coedge self-edge");
    assert!(pairs.contains(&(3, 4)), "coedge to mate coedge");
}

#[test]
fn test_nodes_are_block_diagonal() {
    let graph = assemble(&column(2, 1.0), &column(1, 2.0), &column(2, 3.0), &shared_edge(), &SimpleEdge).unwrap();
    let nodes = graph.nodes();

    for row in 0..5 {
        let expected_col = match row {
            0 | 1 => 0,
            2 => 1,
            _ => 2,
        };
        for col in 0..3 {
            let expected = if col == expected_col { (expected_col + 1) as f32 } else { 0.0 };
            assert_eq!(nodes[(row, col)], expected, "row {row} col {col}");
        }
    }
}

#[test]
fn test_ids_within_node_range() {
    for kind in [KernelKind::SimpleEdge, KernelKind::WingedEdge] {
        let graph = assemble(&column(2, 0.0), &column(1, 0.0), &column(2, 0.0), &shared_edge(), kind.kernel()).unwrap();
        assert!(graph.senders().iter().all(|&s| s < graph.n_node()));
        assert!(graph.receivers().iter().all(|&r| r < graph.n_node()));
    }
}

#[test]
fn test_winged_edge_counts() {
    let graph = assemble(&column(2, 0.0), &column(1, 0.0), &column(2, 0.0), &shared_edge(), &WingedEdge).unwrap();
    assert_eq!(graph.n_edge(), 2 * 12);
}

#[test]
fn test_deterministic() {
    let a = assemble(&column(2, 0.5), &column(1, 0.5), &column(2, 0.5), &shared_edge(), &SimpleEdge).unwrap();
    let b = assemble(&column(2, 0.5), &column(1, 0.5), &column(2, 0.5), &shared_edge(), &SimpleEdge).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.senders(), b.senders());
}

#[test]
fn test_empty_features() {
    let err = assemble(&column(2, 0.0), &column(0, 0.0), &column(2, 0.0), &shared_edge(), &SimpleEdge).unwrap_err();
    assert_eq!(err, GraphError::EmptyFeatures { kind: "edge" });
}

#[test]
fn test_coedge_count_mismatch() {
    let err = assemble(&column(2, 0.0), &column(1, 0.0), &column(3, 0.0), &shared_edge(), &SimpleEdge).unwrap_err();
    assert_eq!(err, GraphError::LengthMismatch { expected: 3, actual: 2 });
}

#[test]
fn test_face_id_out_of_range() {
    let err = assemble(&column(1, 0.0), &column(1, 0.0), &column(2, 0.0), &shared_edge(), &SimpleEdge).unwrap_err();
    assert_eq!(
        err,
        GraphError::IdOutOfRange {
            array: "coedge_to_face",
            position: 1,
            value: 1,
            bound: 1
        }
    );
}

#[test]
fn test_serializes() {
    let graph = assemble(&column(2, 0.0), &column(1, 0.0), &column(2, 0.0), &shared_edge(), &SimpleEdge).unwrap();
    let json = serde_json::to_value(&graph).unwrap();
    assert_eq!(json["senders"].as_array().unwrap().len(), 16);
    assert_eq!(json["offsets"]["coedges"], 2);
}

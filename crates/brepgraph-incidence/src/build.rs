//! Incidence array construction.
//!
//! Every array starts filled with a sentinel equal to the count of the
//! entity kind it refers to. Construction overwrites entries as the body is
//! walked; a final bulk check rejects any sentinel that survived. A surviving
//! sentinel means the body and its index disagree (an open or unreachable
//! wire, an index built for another body).

use brepgraph_topo::{Body, EntityIndex, OrientedEdge, TopologyError};
use tracing::debug;

use crate::arrays::IncidenceArrays;

/// Build the incidence arrays of `body`.
///
/// Wires are walked in body order and coedges in loop order; that order
/// decides the cycles of `next`. A coedge whose reverse is not used by any
/// wire (a degenerate edge at a sphere pole, an open boundary) is its own
/// mate.
///
/// An edge used twice in the same direction (an inconsistently oriented
/// shell) is rejected with [`TopologyError::RepeatedCoedge`].
pub fn build_incidence_arrays(body: &Body, index: &EntityIndex) -> Result<IncidenceArrays, TopologyError> {
    let num_coedges = index.coedge_count();
    let num_faces = index.face_count();
    let num_edges = index.edge_count();

    let mut next = vec![num_coedges; num_coedges];
    let mut mate = vec![num_coedges; num_coedges];
    let mut coedge_to_face = vec![num_faces; num_coedges];
    let mut coedge_to_edge = vec![num_edges; num_coedges];
    let mut linked = vec![false; num_coedges];

    for (_, wire) in body.wires() {
        let mut first: Option<usize> = None;
        let mut previous: Option<usize> = None;

        for (_, coedge) in body.coedges_of_wire(wire) {
            let oriented = coedge.oriented();
            let c = coedge_id(index, oriented)?;
            let edge = index
                .edge_index(coedge.edge)
                .ok_or(TopologyError::Unindexed { kind: "edge" })?;
            if std::mem::replace(&mut linked[c], true) {
                return Err(TopologyError::RepeatedCoedge { coedge: c, edge });
            }

            let m = index.mate_index(oriented).unwrap_or(c);
            mate[c] = m;

            // The mate may already have been tagged from its own wire.
            for (a, b) in [(c, m), (m, c)] {
                let recorded = coedge_to_edge[a];
                if recorded != num_edges && recorded != edge {
                    return Err(TopologyError::MateEdgeMismatch {
                        coedge: b,
                        edge,
                        mate: a,
                        mate_edge: recorded,
                    });
                }
            }
            coedge_to_edge[c] = edge;
            coedge_to_edge[m] = edge;

            match previous {
                Some(p) => next[p] = c,
                None => first = Some(c),
            }
            previous = Some(c);
        }

        // Close the loop. Vertex loops have no coedges and are skipped.
        if let (Some(first), Some(last)) = (first, previous) {
            next[last] = first;
        }
    }

    for (face_key, _) in body.faces() {
        let face = index
            .face_index(face_key)
            .ok_or(TopologyError::Unindexed { kind: "face" })?;
        for (_, wire) in body.wires_of_face(face_key) {
            for (_, coedge) in body.coedges_of_wire(wire) {
                coedge_to_face[coedge_id(index, coedge.oriented())?] = face;
            }
        }
    }

    let arrays = IncidenceArrays::from_parts_unchecked(next, mate, coedge_to_face, coedge_to_edge);
    arrays.validate(num_faces, num_edges)?;

    debug!(
        faces = num_faces,
        edges = num_edges,
        coedges = num_coedges,
        self_mated = arrays.self_mated().count(),
        "built incidence arrays"
    );
    Ok(arrays)
}

/// Check that every wire of `body` appears in `arrays.next()` as exactly one
/// cycle through the wire's distinct coedges.
pub fn verify_loops(body: &Body, index: &EntityIndex, arrays: &IncidenceArrays) -> Result<(), TopologyError> {
    for (_, wire) in body.wires() {
        let mut ids = Vec::with_capacity(wire.coedges().len());
        for (_, coedge) in body.coedges_of_wire(wire) {
            let c = coedge_id(index, coedge.oriented())?;
            if !ids.contains(&c) {
                ids.push(c);
            }
        }
        let Some(&start) = ids.first() else {
            continue;
        };

        let walked = arrays.loop_of(start);
        let closed = walked.last().map(|&last| arrays.next()[last] == start).unwrap_or(false);
        if !closed || walked.len() != ids.len() || walked.iter().any(|c| !ids.contains(c)) {
            return Err(TopologyError::BrokenLoop {
                start,
                expected: ids.len(),
                actual: walked.len(),
            });
        }
    }
    Ok(())
}

fn coedge_id(index: &EntityIndex, coedge: OrientedEdge) -> Result<usize, TopologyError> {
    index
        .coedge_index(coedge)
        .ok_or(TopologyError::Unindexed { kind: "coedge" })
}

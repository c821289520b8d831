//! The [`IncidenceArrays`] value type and its validation gate.

use brepgraph_topo::TopologyError;
use serde::{Deserialize, Serialize};

/// Per-coedge incidence of a body. All four arrays have one entry per
/// coedge id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawIncidence")]
pub struct IncidenceArrays {
    next: Vec<usize>,
    mate: Vec<usize>,
    coedge_to_face: Vec<usize>,
    coedge_to_edge: Vec<usize>,
}

#[derive(Deserialize)]
struct RawIncidence {
    next: Vec<usize>,
    mate: Vec<usize>,
    coedge_to_face: Vec<usize>,
    coedge_to_edge: Vec<usize>,
}

impl TryFrom<RawIncidence> for IncidenceArrays {
    type Error = TopologyError;

    fn try_from(raw: RawIncidence) -> Result<Self, Self::Error> {
        Self::from_parts(raw.next, raw.mate, raw.coedge_to_face, raw.coedge_to_edge)
    }
}

impl IncidenceArrays {
    /// Assemble arrays produced elsewhere.
    ///
    /// Checks that all arrays have the same length and that `next` and
    /// `mate` only refer to coedges. Face and edge ids are checked against
    /// their counts by [`IncidenceArrays::validate`].
    pub fn from_parts(
        next: Vec<usize>,
        mate: Vec<usize>,
        coedge_to_face: Vec<usize>,
        coedge_to_edge: Vec<usize>,
    ) -> Result<Self, TopologyError> {
        let n = next.len();
        for (array, len) in [
            ("mate", mate.len()),
            ("coedge_to_face", coedge_to_face.len()),
            ("coedge_to_edge", coedge_to_edge.len()),
        ] {
            if len != n {
                return Err(TopologyError::LengthMismatch {
                    array,
                    expected: n,
                    actual: len,
                });
            }
        }
        check_bound("next", &next, n)?;
        check_bound("mate", &mate, n)?;

        Ok(Self::from_parts_unchecked(next, mate, coedge_to_face, coedge_to_edge))
    }

    pub(crate) fn from_parts_unchecked(
        next: Vec<usize>,
        mate: Vec<usize>,
        coedge_to_face: Vec<usize>,
        coedge_to_edge: Vec<usize>,
    ) -> Self {
        Self {
            next,
            mate,
            coedge_to_face,
            coedge_to_edge,
        }
    }

    /// Coedge following each coedge around its loop.
    pub fn next(&self) -> &[usize] {
        &self.next
    }

    /// Coedge on the opposite side of each coedge's edge.
    pub fn mate(&self) -> &[usize] {
        &self.mate
    }

    /// Face owning each coedge's loop.
    pub fn coedge_to_face(&self) -> &[usize] {
        &self.coedge_to_face
    }

    /// Edge under each coedge.
    pub fn coedge_to_edge(&self) -> &[usize] {
        &self.coedge_to_edge
    }

    /// Number of coedges.
    pub fn coedge_count(&self) -> usize {
        self.next.len()
    }

    /// Check that no entry is unassigned or out of range and that every
    /// coedge shares its edge with its mate.
    ///
    /// An entry equal to its bound is the construction sentinel and is
    /// reported as [`TopologyError::Unassigned`].
    pub fn validate(&self, face_count: usize, edge_count: usize) -> Result<(), TopologyError> {
        let n = self.coedge_count();
        check_bound("next", &self.next, n)?;
        check_bound("mate", &self.mate, n)?;
        check_bound("coedge_to_face", &self.coedge_to_face, face_count)?;
        check_bound("coedge_to_edge", &self.coedge_to_edge, edge_count)?;

        for (coedge, &mate) in self.mate.iter().enumerate() {
            let edge = self.coedge_to_edge[coedge];
            let mate_edge = self.coedge_to_edge[mate];
            if edge != mate_edge {
                return Err(TopologyError::MateEdgeMismatch {
                    coedge,
                    edge,
                    mate,
                    mate_edge,
                });
            }
        }
        Ok(())
    }

    /// Inverse of `next`: the coedge preceding each coedge in its loop.
    ///
    /// If several coedges claim the same successor the last one wins.
    pub fn previous(&self) -> Vec<usize> {
        let mut previous: Vec<usize> = (0..self.coedge_count()).collect();
        for (coedge, &next) in self.next.iter().enumerate() {
            previous[next] = coedge;
        }
        previous
    }

    /// Coedges met walking `next` from `start` until the walk returns to
    /// `start`, beginning with `start` itself.
    ///
    /// The walk stops after `coedge_count` steps if it never returns.
    pub fn loop_of(&self, start: usize) -> Vec<usize> {
        let mut members = Vec::new();
        if start >= self.coedge_count() {
            return members;
        }
        let mut current = start;
        loop {
            members.push(current);
            current = self.next[current];
            if current == start || members.len() >= self.coedge_count() {
                break;
            }
        }
        members
    }

    /// Coedges that are their own mate.
    pub fn self_mated(&self) -> impl Iterator<Item = usize> + '_ {
        self.mate
            .iter()
            .enumerate()
            .filter(|(coedge, mate)| *coedge == **mate)
            .map(|(coedge, _)| coedge)
    }
}

fn check_bound(array: &'static str, values: &[usize], bound: usize) -> Result<(), TopologyError> {
    match values.iter().position(|&v| v >= bound) {
        None => Ok(()),
        Some(position) if values[position] == bound => Err(TopologyError::Unassigned {
            array,
            position,
            sentinel: bound,
        }),
        Some(position) => Err(TopologyError::OutOfRange {
            array,
            position,
            value: values[position],
            bound,
        }),
    }
}

//! Error types for body topology.

use thiserror::Error;

/// Errors raised while building a body or deriving topology from it.
///
/// Every variant is fatal for the body it was raised on: the caller should
/// reject the body rather than attempt a partial result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// A key handed to the builder was not created by that builder.
    #[error("unknown {kind} key")]
    UnknownEntity {
        /// Entity kind ("face", "edge", ...).
        kind: &'static str,
    },

    /// An entity of the body has no id in the entity index.
    #[error("{kind} is missing from the entity index")]
    Unindexed {
        /// Entity kind ("face", "edge", "coedge").
        kind: &'static str,
    },

    /// An incidence array entry was never assigned.
    #[error("{array}[{position}] still holds the sentinel {sentinel}")]
    Unassigned {
        /// Name of the incidence array.
        array: &'static str,
        /// Coedge id of the offending entry.
        position: usize,
        /// The sentinel value (the count of the referenced entity kind).
        sentinel: usize,
    },

    /// An incidence array entry points past the end of its target range.
    #[error("{array}[{position}] = {value} is out of range (< {bound} expected)")]
    OutOfRange {
        /// Name of the incidence array.
        array: &'static str,
        /// Coedge id of the offending entry.
        position: usize,
        /// The stored value.
        value: usize,
        /// Exclusive upper bound for the array.
        bound: usize,
    },

    /// A coedge and its mate do not share the same underlying edge.
    #[error("coedge {coedge} is on edge {edge} but its mate {mate} is on edge {mate_edge}")]
    MateEdgeMismatch {
        /// Coedge id.
        coedge: usize,
        /// Edge id recorded for the coedge.
        edge: usize,
        /// Mate coedge id.
        mate: usize,
        /// Edge id recorded for the mate.
        mate_edge: usize,
    },

    /// Two uses of an edge in the same direction resolved to one coedge id.
    #[error("coedge {coedge} (edge {edge}) is used more than once in the same direction")]
    RepeatedCoedge {
        /// Coedge id shared by the uses.
        coedge: usize,
        /// Edge id of the coedge.
        edge: usize,
    },

    /// Incidence arrays of one set differ in length.
    #[error("{array} has length {actual}, expected {expected}")]
    LengthMismatch {
        /// Name of the incidence array.
        array: &'static str,
        /// Expected length (the coedge count).
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Walking `next` from a wire's first coedge did not reproduce the wire.
    #[error("loop starting at coedge {start} has {actual} coedges, expected {expected}")]
    BrokenLoop {
        /// Coedge id the walk started from.
        start: usize,
        /// Distinct coedges in the wire.
        expected: usize,
        /// Coedges visited before returning to the start.
        actual: usize,
    },
}

//! Error type shared by the layout engine and the session layer.

use crate::graph::{EdgeId, VertexId};

/// Errors reported synchronously to the caller.
///
/// Degenerate geometry (coincident vertices, zero-width bounding boxes) is
/// never an error; it is handled by the guard policy in `layout::force` and
/// `layout::viewport`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("invalid edge reference: {edge} ({head} - {tail}) with {vertex_count} vertices")]
    InvalidEdge {
        edge: EdgeId,
        head: VertexId,
        tail: VertexId,
        vertex_count: usize,
    },

    #[error("position/velocity length mismatch: {positions} positions, {velocities} velocities")]
    LengthMismatch { positions: usize, velocities: usize },

    #[error("{array} has odd length {len}; expected interleaved pairs")]
    OddLength { array: &'static str, len: usize },

    #[error("invalid vertex reference: {vertex} with {vertex_count} vertices")]
    InvalidVertex { vertex: VertexId, vertex_count: usize },

    #[error("no graph loaded")]
    NoGraph,
}

//! Edge type and related structures.
//!
//! Edges are unordered connections between two vertices. Each edge has:
//! - A stable identifier (its position in the loaded edge list)
//! - Two endpoint vertex IDs
//!
//! Parallel edges between the same pair are kept as separate entries and each
//! pulls on its endpoints independently.

use std::fmt;

use super::vertex::VertexId;
use crate::error::LayoutError;

/// Stable edge identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub u32);

impl EdgeId {
    /// Create a new EdgeId from a raw u32.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Edge({})", self.0)
    }
}

impl From<u32> for EdgeId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<EdgeId> for u32 {
    #[inline]
    fn from(id: EdgeId) -> Self {
        id.0
    }
}

/// An unordered vertex pair.
///
/// `head` and `tail` follow the naming of the graph description; the layout
/// treats them symmetrically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub head: VertexId,
    pub tail: VertexId,
}

impl Edge {
    /// Create an edge between two vertices.
    #[inline]
    pub fn new(head: u32, tail: u32) -> Self {
        Self {
            head: VertexId(head),
            tail: VertexId(tail),
        }
    }

    /// Whether both endpoints address a slot in a graph of `vertex_count` vertices.
    #[inline]
    pub fn is_within(&self, vertex_count: usize) -> bool {
        self.head.is_within(vertex_count) && self.tail.is_within(vertex_count)
    }

    /// Whether the edge connects a vertex to itself.
    #[inline]
    pub fn is_self_loop(&self) -> bool {
        self.head == self.tail
    }
}

/// Build edges from pairs `[a0, b0, a1, b1, ...]`.
///
/// Fails if a trailing value has no partner.
pub fn edges_from_pairs(pairs: &[u32]) -> Result<Vec<Edge>, LayoutError> {
    if pairs.len() % 2 != 0 {
        return Err(LayoutError::OddLength {
            array: "edges",
            len: pairs.len(),
        });
    }
    Ok(pairs
        .chunks_exact(2)
        .map(|pair| Edge::new(pair[0], pair[1]))
        .collect())
}

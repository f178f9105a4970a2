//! Vertex identifier.
//!
//! Vertices are addressed by their position in the loaded graph description.
//! The same index addresses the position array, the velocity array, and the
//! adjacency structure for the lifetime of one layout run.

use std::fmt;

/// Stable vertex identifier.
///
/// Wraps a u32 for compact storage and WebAssembly interop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub u32);

impl VertexId {
    /// Create a new VertexId from a raw u32.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Index into per-vertex arrays.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Whether this id addresses a slot in a graph of `vertex_count` vertices.
    #[inline]
    pub fn is_within(self, vertex_count: usize) -> bool {
        self.index() < vertex_count
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vertex({})", self.0)
    }
}

impl From<u32> for VertexId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<VertexId> for u32 {
    #[inline]
    fn from(id: VertexId) -> Self {
        id.0
    }
}

//! Graph description received from the request layer.
//!
//! The server sends `{ vertices: [{ name, x, y }], edges: [{ head, tail }] }`.
//! Vertex `x`/`y` are display-space hints, not simulation positions. Extra
//! fields such as attribute maps are ignored.

use serde::{Deserialize, Serialize};

use super::edge::{Edge, EdgeId};
use crate::error::LayoutError;

/// One vertex of the description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexDescription {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

/// One edge of the description, as indices into `vertices`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeDescription {
    pub head: u32,
    pub tail: u32,
    /// Rendering hint only; the layout treats every edge as undirected.
    #[serde(default)]
    pub directed: bool,
}

/// A complete graph as delivered to the layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDescription {
    #[serde(default)]
    pub vertices: Vec<VertexDescription>,
    #[serde(default)]
    pub edges: Vec<EdgeDescription>,
}

impl GraphDescription {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Layout edges in description order, so `EdgeId(k)` is `edges[k]`.
    ///
    /// Rejects the first edge that references a vertex outside the description.
    pub fn layout_edges(&self) -> Result<Vec<Edge>, LayoutError> {
        let vertex_count = self.vertex_count();
        self.edges
            .iter()
            .enumerate()
            .map(|(k, e)| {
                let edge = Edge::new(e.head, e.tail);
                if edge.is_within(vertex_count) {
                    Ok(edge)
                } else {
                    Err(LayoutError::InvalidEdge {
                        edge: EdgeId(k as u32),
                        head: edge.head,
                        tail: edge.tail,
                        vertex_count,
                    })
                }
            })
            .collect()
    }

    /// Display-space position hints, one per vertex.
    pub fn hints(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.vertices.iter().map(|v| (v.x, v.y))
    }

    /// Vertex labels, one per vertex.
    pub fn names(&self) -> Vec<String> {
        self.vertices.iter().map(|v| v.name.clone()).collect()
    }
}

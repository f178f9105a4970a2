//! Simulation state owned by the caller.
//!
//! Positions, velocities, and the edge list for one layout run. The engine
//! borrows this mutably for each step; loading a new graph replaces it.

use super::config::InitialLayout;
use super::vector::Vec2;
use crate::error::LayoutError;
use crate::graph::{Edge, EdgeId, GraphDescription};

/// Per-vertex positions and velocities plus the edges between them.
///
/// `positions[i]` and `velocities[i]` both belong to vertex `i`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationState {
    pub positions: Vec<Vec2>,
    pub velocities: Vec<Vec2>,
    pub edges: Vec<Edge>,
}

impl SimulationState {
    /// Start from `positions` at rest.
    pub fn new(positions: Vec<Vec2>, edges: Vec<Edge>) -> Self {
        let velocities = vec![Vec2::ZERO; positions.len()];
        Self {
            positions,
            velocities,
            edges,
        }
    }

    /// Vertex `i` at `(100 + i², 100·i)`, at rest.
    pub fn staggered(vertex_count: usize, edges: Vec<Edge>) -> Self {
        let positions = (0..vertex_count)
            .map(|i| {
                let i = i as f64;
                Vec2::new(100.0 + i * i, 100.0 * i)
            })
            .collect();
        Self::new(positions, edges)
    }

    /// Build the state for a freshly loaded graph.
    pub fn from_description(
        description: &GraphDescription,
        initial: InitialLayout,
    ) -> Result<Self, LayoutError> {
        let edges = description.layout_edges()?;
        Ok(match initial {
            InitialLayout::Hints => Self::new(description.hints().map(Vec2::from).collect(), edges),
            InitialLayout::Staggered => Self::staggered(description.vertex_count(), edges),
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Check the array lengths and every edge endpoint.
    pub fn validate(&self) -> Result<(), LayoutError> {
        validate_parts(&self.positions, &self.velocities, &self.edges)
    }
}

/// Shared validation for the slice-level step entry point.
pub(crate) fn validate_parts(
    positions: &[Vec2],
    velocities: &[Vec2],
    edges: &[Edge],
) -> Result<(), LayoutError> {
    if positions.len() != velocities.len() {
        return Err(LayoutError::LengthMismatch {
            positions: positions.len(),
            velocities: velocities.len(),
        });
    }

    let vertex_count = positions.len();
    match edges.iter().position(|e| !e.is_within(vertex_count)) {
        Some(k) => Err(LayoutError::InvalidEdge {
            edge: EdgeId(k as u32),
            head: edges[k].head,
            tail: edges[k].tail,
            vertex_count,
        }),
        None => Ok(()),
    }
}

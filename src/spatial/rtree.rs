//! R-tree based spatial index using the rstar crate.
//!
//! Indexes vertices by their display-space position so the rendering layer
//! can find the vertex under the pointer in O(log n).

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::graph::VertexId;
use crate::layout::Vec2;

/// A vertex at a display position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexPoint {
    pub id: VertexId,
    pub x: f64,
    pub y: f64,
}

impl VertexPoint {
    pub fn new(id: VertexId, position: Vec2) -> Self {
        Self {
            id,
            x: position.x,
            y: position.y,
        }
    }
}

impl RTreeObject for VertexPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.x, self.y])
    }
}

impl PointDistance for VertexPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.x - point[0];
        let dy = self.y - point[1];
        dx * dx + dy * dy
    }
}

/// Spatial index over display positions.
pub struct SpatialIndex {
    tree: RTree<VertexPoint>,
}

impl SpatialIndex {
    /// Create a new empty spatial index.
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Replace the contents with `positions`, vertex `i` at `positions[i]`.
    pub fn rebuild(&mut self, positions: &[Vec2]) {
        let points = positions
            .iter()
            .enumerate()
            .map(|(i, &p)| VertexPoint::new(VertexId(i as u32), p))
            .collect();
        self.tree = RTree::bulk_load(points);
    }

    /// Move one vertex from `from` to `to`.
    ///
    /// Returns false if no vertex `id` was indexed at `from`; the vertex is
    /// inserted at `to` either way.
    pub fn relocate(&mut self, id: VertexId, from: Vec2, to: Vec2) -> bool {
        let removed = self.tree.remove(&VertexPoint::new(id, from)).is_some();
        self.tree.insert(VertexPoint::new(id, to));
        removed
    }

    /// Find the nearest vertex to a point.
    pub fn nearest(&self, x: f64, y: f64) -> Option<VertexId> {
        self.tree.nearest_neighbor(&[x, y]).map(|point| point.id)
    }

    /// Find the nearest vertex within `max_distance` of a point.
    pub fn nearest_within(&self, x: f64, y: f64, max_distance: f64) -> Option<VertexId> {
        let max_distance_sq = max_distance * max_distance;
        self.tree
            .nearest_neighbor(&[x, y])
            .filter(|point| point.distance_2(&[x, y]) <= max_distance_sq)
            .map(|point| point.id)
    }

    /// Clear all vertices from the index.
    pub fn clear(&mut self) {
        self.tree = RTree::new();
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}

//! Topology - vertex adjacency for the loaded graph.
//!
//! Stores the edge list in a petgraph undirected graph whose node and edge
//! indices line up with `VertexId` and `EdgeId`. The simulation itself only
//! needs the flat edge list; this structure answers the adjacency questions
//! the rendering layer asks when a vertex is dragged.

use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};

use super::edge::{Edge, EdgeId};
use super::vertex::VertexId;
use crate::error::LayoutError;

/// Undirected adjacency over a fixed vertex set.
pub struct Topology {
    /// Node weights are the stable VertexId, edge weights the stable EdgeId.
    graph: UnGraph<VertexId, EdgeId>,
}

impl Topology {
    /// Create an empty topology.
    pub fn new() -> Self {
        Self {
            graph: UnGraph::default(),
        }
    }

    /// Build the adjacency for `vertex_count` vertices and `edges` in order.
    ///
    /// Fails on the first edge with an endpoint outside the vertex set.
    pub fn build(vertex_count: usize, edges: &[Edge]) -> Result<Self, LayoutError> {
        let mut graph = UnGraph::with_capacity(vertex_count, edges.len());
        for i in 0..vertex_count {
            graph.add_node(VertexId(i as u32));
        }

        for (k, edge) in edges.iter().enumerate() {
            let id = EdgeId(k as u32);
            if !edge.is_within(vertex_count) {
                return Err(LayoutError::InvalidEdge {
                    edge: id,
                    head: edge.head,
                    tail: edge.tail,
                    vertex_count,
                });
            }
            graph.add_edge(
                NodeIndex::new(edge.head.index()),
                NodeIndex::new(edge.tail.index()),
                id,
            );
        }

        Ok(Self { graph })
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get the number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Endpoints of an edge.
    pub fn endpoints(&self, id: EdgeId) -> Option<(VertexId, VertexId)> {
        self.graph
            .edge_endpoints(EdgeIndex::new(id.0 as usize))
            .map(|(a, b)| (self.graph[a], self.graph[b]))
    }

    /// Edges touching `vertex`, in ascending id order.
    ///
    /// Parallel edges are reported individually; a self-loop is reported once.
    pub fn incident_edges(&self, vertex: VertexId) -> Result<Vec<EdgeId>, LayoutError> {
        let index = self.node_index(vertex)?;
        let mut ids: Vec<EdgeId> = self.graph.edges(index).map(|e| *e.weight()).collect();
        ids.sort_unstable();
        ids.dedup();
        Ok(ids)
    }

    /// Distinct vertices adjacent to `vertex`, in ascending id order.
    pub fn neighbors(&self, vertex: VertexId) -> Result<Vec<VertexId>, LayoutError> {
        let index = self.node_index(vertex)?;
        let mut ids: Vec<VertexId> = self
            .graph
            .neighbors(index)
            .map(|n| self.graph[n])
            .collect();
        ids.sort_unstable();
        ids.dedup();
        Ok(ids)
    }

    /// Number of edge ends at `vertex` (parallel edges counted separately).
    pub fn degree(&self, vertex: VertexId) -> Result<usize, LayoutError> {
        Ok(self.incident_edges(vertex)?.len())
    }

    fn node_index(&self, vertex: VertexId) -> Result<NodeIndex, LayoutError> {
        if vertex.is_within(self.graph.node_count()) {
            Ok(NodeIndex::new(vertex.index()))
        } else {
            Err(LayoutError::InvalidVertex {
                vertex,
                vertex_count: self.graph.node_count(),
            })
        }
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_with_parallel() -> Topology {
        // 0-1, 1-2, 2-0, plus a second 0-1
        let edges = [
            Edge::new(0, 1),
            Edge::new(1, 2),
            Edge::new(2, 0),
            Edge::new(0, 1),
        ];
        Topology::build(3, &edges).unwrap()
    }

    #[test]
    fn test_build_counts() {
        let topology = triangle_with_parallel();
        assert_eq!(topology.vertex_count(), 3);
        assert_eq!(topology.edge_count(), 4);
    }

    #[test]
    fn test_edge_ids_follow_input_order() {
        let topology = triangle_with_parallel();
        assert_eq!(
            topology.endpoints(EdgeId(1)),
            Some((VertexId(1), VertexId(2)))
        );
        assert_eq!(topology.endpoints(EdgeId(9)), None);
    }

    #[test]
    fn test_incident_edges_keeps_parallel() {
        let topology = triangle_with_parallel();
        let incident = topology.incident_edges(VertexId(0)).unwrap();
        assert_eq!(incident, vec![EdgeId(0), EdgeId(2), EdgeId(3)]);
        assert_eq!(topology.degree(VertexId(0)).unwrap(), 3);
    }

    #[test]
    fn test_neighbors_are_distinct() {
        let topology = triangle_with_parallel();
        let neighbors = topology.neighbors(VertexId(0)).unwrap();
        assert_eq!(neighbors, vec![VertexId(1), VertexId(2)]);
    }

    #[test]
    fn test_self_loop_reported_once() {
        let topology = Topology::build(2, &[Edge::new(1, 1), Edge::new(0, 1)]).unwrap();
        let incident = topology.incident_edges(VertexId(1)).unwrap();
        assert_eq!(incident, vec![EdgeId(0), EdgeId(1)]);
    }

    #[test]
    fn test_build_rejects_invalid_edge() {
        let err = Topology::build(2, &[Edge::new(0, 1), Edge::new(1, 5)])
            .err()
            .unwrap();
        assert!(matches!(err, LayoutError::InvalidEdge { edge: EdgeId(1), .. }));
    }

    #[test]
    fn test_unknown_vertex() {
        let topology = triangle_with_parallel();
        let err = topology.incident_edges(VertexId(3)).unwrap_err();
        assert_eq!(
            err,
            LayoutError::InvalidVertex {
                vertex: VertexId(3),
                vertex_count: 3
            }
        );
    }

    #[test]
    fn test_empty() {
        let topology = Topology::default();
        assert_eq!(topology.vertex_count(), 0);
        assert_eq!(topology.edge_count(), 0);
    }
}

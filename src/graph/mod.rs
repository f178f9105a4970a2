//! Graph data structures.
//!
//! This module provides the vertex and edge identifiers shared by the layout
//! engine, the serde model of the incoming graph description, and a petgraph
//! backed adjacency structure for the rendering layer's drag handling.

mod description;
mod edge;
mod topology;
mod vertex;

pub use description::{EdgeDescription, GraphDescription, VertexDescription};
pub use edge::{Edge, EdgeId, edges_from_pairs};
pub use topology::Topology;
pub use vertex::VertexId;

//! Spatial indexing for display-space hit testing.
//!
//! This module provides an R-tree based spatial index for finding the vertex
//! under the pointer when the rendering layer starts a drag.

mod rtree;

pub use rtree::SpatialIndex;

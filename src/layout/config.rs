//! Force model and driving-loop configuration.
//!
//! Every field has a default, so a JS caller may pass a partial object (or
//! nothing) and get the standard behaviour.

use serde::{Deserialize, Serialize};

use super::viewport::Viewport;

/// Rest length of an edge spring.
pub const REST_LENGTH: f64 = 200.0;
/// Spring stiffness.
pub const SPRING_STIFFNESS: f64 = 0.1;
/// Inverse-cube repulsion strength.
pub const REPULSION: f64 = 100_000.0;
/// Per-step velocity decay.
pub const DAMPING: f64 = 0.5;
/// Per-vertex force below which the layout counts as settled.
pub const MIN_FORCE: f64 = 1.0;
/// Smallest distance used as a force-law denominator.
pub const MIN_DISTANCE: f64 = 1.0;
/// Engine steps run per animation frame.
pub const STEPS_PER_FRAME: u32 = 5;
/// Step limit for the batch solver.
pub const MAX_ITERATIONS: u32 = 10_000;

/// Where vertices start when a graph is loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitialLayout {
    /// Use the `x`/`y` hints carried by the graph description.
    #[default]
    Hints,
    /// Place vertex `i` at `(100 + i², 100·i)`, ignoring hints.
    Staggered,
}

/// Configuration for the force layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Distance at which an edge exerts no force (default: 200).
    pub rest_length: f64,
    /// Edge spring stiffness `K1` (default: 0.1).
    pub spring_stiffness: f64,
    /// Vertex repulsion strength `K2` (default: 100000).
    pub repulsion: f64,
    /// Velocity multiplier applied before each force increment (default: 0.5).
    pub damping: f64,
    /// Settle threshold on per-vertex force magnitude (default: 1).
    pub min_force: f64,
    /// Distance clamp for the force-law denominators (default: 1).
    pub min_distance: f64,
    /// Engine steps per animation frame (default: 5).
    pub steps_per_frame: u32,
    /// Step limit for `ForceLayout::settle` (default: 10000).
    pub max_iterations: u32,
    /// Initial vertex placement.
    pub initial_layout: InitialLayout,
    /// Display rectangle for frame output.
    pub viewport: Viewport,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            rest_length: REST_LENGTH,
            spring_stiffness: SPRING_STIFFNESS,
            repulsion: REPULSION,
            damping: DAMPING,
            min_force: MIN_FORCE,
            min_distance: MIN_DISTANCE,
            steps_per_frame: STEPS_PER_FRAME,
            max_iterations: MAX_ITERATIONS,
            initial_layout: InitialLayout::default(),
            viewport: Viewport::default(),
        }
    }
}

impl LayoutConfig {
    /// Squared settle threshold compared against each vertex's force.
    #[inline]
    pub fn min_force_sq(&self) -> f64 {
        self.min_force * self.min_force
    }
}

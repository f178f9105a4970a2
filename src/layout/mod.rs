//! Force-directed layout.
//!
//! This module holds the stateless spring/repulsion engine, the caller-owned
//! simulation state it advances, and the frame driver that batches steps,
//! normalizes them into the display viewport, and stops once the layout has
//! settled or the run is cancelled.

pub mod animation;
pub mod config;
pub mod force;
pub mod state;
pub mod vector;
pub mod viewport;

pub use animation::{CancelToken, Frame, LayoutAnimation};
pub use config::{InitialLayout, LayoutConfig};
pub use force::{ForceLayout, SettleReport, StepOutcome, step};
pub use state::SimulationState;
pub use vector::Vec2;
pub use viewport::{Bounds, Viewport};

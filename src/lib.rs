//! Force Layout - WASM Module
//!
//! This module provides a force-directed graph layout engine for the browser.
//! It is compiled to WebAssembly and exposes a JavaScript-friendly API via
//! wasm-bindgen. The page owns rendering and scheduling; it calls
//! `nextFrame()` from its animation loop until the layout settles.
//!
//! # Architecture
//!
//! - `graph`: Vertex/edge identifiers, the graph description, adjacency
//! - `layout`: Spring/repulsion engine, simulation state, frame driver
//! - `spatial`: R-tree spatial indexing for display-space hit testing
//! - `session`: The loaded graph and its cancellable layout run

use js_sys::Float64Array;
use wasm_bindgen::prelude::*;

pub mod error;
pub mod graph;
pub mod layout;
pub mod session;
pub mod spatial;

pub use error::LayoutError;

use graph::{GraphDescription, VertexId, edges_from_pairs};
use layout::{LayoutConfig, StepOutcome, Vec2};
use session::LayoutSession;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Main entry point for the layout engine.
///
/// This struct wraps the internal LayoutSession and provides the public API
/// exposed to JavaScript.
#[wasm_bindgen]
pub struct ForceLayoutWasm {
    session: LayoutSession,
}

#[wasm_bindgen]
impl ForceLayoutWasm {
    /// Create a layout engine.
    ///
    /// `config` is an optional object with camelCase `LayoutConfig` fields;
    /// missing fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ForceLayoutWasm, JsError> {
        Ok(Self {
            session: LayoutSession::new(parse_config(config)?),
        })
    }

    /// Replace the configuration. Takes effect on the next `load`.
    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&mut self, config: JsValue) -> Result<(), JsError> {
        self.session.set_config(parse_config(config)?);
        Ok(())
    }

    // =========================================================================
    // Graph Loading
    // =========================================================================

    /// Load a graph description `{ vertices: [{name, x, y}], edges: [{head, tail}] }`.
    ///
    /// Cancels any layout still running for the previous graph.
    pub fn load(&mut self, description: JsValue) -> Result<(), JsError> {
        let description: GraphDescription = serde_wasm_bindgen::from_value(description)?;
        self.session.load(&description)?;
        Ok(())
    }

    /// Stop the current layout run.
    pub fn cancel(&mut self) {
        self.session.cancel();
    }

    /// Drop the loaded graph.
    pub fn clear(&mut self) {
        self.session.clear();
    }

    /// Get the number of vertices.
    #[wasm_bindgen(js_name = vertexCount)]
    pub fn vertex_count(&self) -> u32 {
        self.session.vertex_count() as u32
    }

    /// Get the number of edges.
    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&self) -> u32 {
        self.session.edge_count() as u32
    }

    /// Get a vertex's label.
    #[wasm_bindgen(js_name = vertexName)]
    pub fn vertex_name(&self, vertex: u32) -> Option<String> {
        self.session.vertex_name(VertexId(vertex)).map(str::to_owned)
    }

    // =========================================================================
    // Animation
    // =========================================================================

    /// Advance one animation frame.
    ///
    /// Returns display positions [x0, y0, x1, y1, ...], or undefined once the
    /// layout has settled or was cancelled. Schedule no further frames then.
    #[wasm_bindgen(js_name = nextFrame)]
    pub fn next_frame(&mut self) -> Result<Option<Float64Array>, JsError> {
        let frame = self.session.next_frame()?;
        Ok(frame.map(|frame| Float64Array::from(&interleave(&frame.positions)[..])))
    }

    /// Run the layout to rest in one call. Returns the number of steps taken.
    pub fn settle(&mut self) -> Result<u32, JsError> {
        Ok(self.session.settle()?.iterations)
    }

    /// Whether further frames would advance the layout.
    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    /// Whether the layout reached rest.
    #[wasm_bindgen(js_name = isSettled)]
    pub fn is_settled(&self) -> bool {
        self.session.is_settled()
    }

    /// Get the last display positions [x0, y0, x1, y1, ...].
    #[wasm_bindgen(js_name = displayPositions)]
    pub fn display_positions(&self) -> Float64Array {
        Float64Array::from(&interleave(self.session.display_positions())[..])
    }

    // =========================================================================
    // Interaction
    // =========================================================================

    /// Report that the user dragged a vertex to (x, y) in display space.
    ///
    /// Returns the ids of the edges to redraw. The simulation is not affected.
    #[wasm_bindgen(js_name = vertexMoved)]
    pub fn vertex_moved(&mut self, vertex: u32, x: f64, y: f64) -> Result<Vec<u32>, JsError> {
        let edges = self.session.vertex_moved(VertexId(vertex), x, y)?;
        Ok(edges.into_iter().map(u32::from).collect())
    }

    /// Find the vertex within `radius` of a display point.
    #[wasm_bindgen(js_name = pickVertex)]
    pub fn pick_vertex(&self, x: f64, y: f64, radius: f64) -> Option<u32> {
        self.session.pick_vertex(x, y, radius).map(u32::from)
    }

    /// Get the distinct neighbors of a vertex.
    pub fn neighbors(&self, vertex: u32) -> Result<Vec<u32>, JsError> {
        let neighbors = self.session.topology().neighbors(VertexId(vertex))?;
        Ok(neighbors.into_iter().map(u32::from).collect())
    }

    // =========================================================================
    // Stateless Step
    // =========================================================================

    /// Advance caller-owned arrays by one step, in place.
    ///
    /// `positions` and `velocities` are [x0, y0, x1, y1, ...]; `edges` is
    /// [a0, b0, a1, b1, ...]. Returns true if the layout has settled.
    #[wasm_bindgen(js_name = stepArrays)]
    pub fn step_arrays(
        &self,
        positions: &mut [f64],
        velocities: &mut [f64],
        edges: &[u32],
    ) -> Result<bool, JsError> {
        let outcome = step_interleaved(self.session.config(), positions, velocities, edges)?;
        Ok(outcome.settled)
    }
}

impl Default for ForceLayoutWasm {
    fn default() -> Self {
        Self {
            session: LayoutSession::default(),
        }
    }
}

fn parse_config(config: JsValue) -> Result<LayoutConfig, JsError> {
    if config.is_undefined() || config.is_null() {
        return Ok(LayoutConfig::default());
    }
    Ok(serde_wasm_bindgen::from_value(config)?)
}

/// Flatten positions into [x0, y0, x1, y1, ...].
fn interleave(positions: &[Vec2]) -> Vec<f64> {
    let mut flat = Vec::with_capacity(positions.len() * 2);
    for p in positions {
        flat.push(p.x);
        flat.push(p.y);
    }
    flat
}

fn deinterleave(flat: &[f64]) -> Vec<Vec2> {
    flat.chunks_exact(2).map(|c| Vec2::new(c[0], c[1])).collect()
}

/// One engine step over flat arrays, written back in place.
fn step_interleaved(
    config: &LayoutConfig,
    positions: &mut [f64],
    velocities: &mut [f64],
    edges: &[u32],
) -> Result<StepOutcome, LayoutError> {
    for (array, flat) in [("positions", &*positions), ("velocities", &*velocities)] {
        if flat.len() % 2 != 0 {
            return Err(LayoutError::OddLength {
                array,
                len: flat.len(),
            });
        }
    }
    let edges = edges_from_pairs(edges)?;

    let mut pos = deinterleave(positions);
    let mut vel = deinterleave(velocities);
    let outcome = layout::step(config, &mut pos, &mut vel, &edges)?;

    positions.copy_from_slice(&interleave(&pos));
    velocities.copy_from_slice(&interleave(&vel));
    Ok(outcome)
}

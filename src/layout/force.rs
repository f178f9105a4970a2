//! Spring/repulsion force layout.
//!
//! One step of the simulation:
//!
//! 1. **Attraction:** every edge is a linear spring with rest length `D`.
//!    `F = K1 * (d - D)` along the edge, pulling when stretched and pushing
//!    when compressed. Parallel edges each contribute.
//! 2. **Repulsion:** every unordered vertex pair pushes apart with an
//!    inverse-cube force of magnitude `K2 / d^3`, regardless of adjacency.
//! 3. **Integration:** `v = v * damping + F`, then `p = p + v`.
//! 4. **Convergence:** the step is settled when every vertex's fresh force
//!    satisfies `|F|^2 <= MIN_FORCE^2`. The test reads the force before it is
//!    folded into the velocity.
//!
//! # Distance guard
//!
//! Distances used as denominators are clamped to `min_distance`, and never
//! below `f64::EPSILON` even when `min_distance` is zero or negative. Coincident
//! vertices have no direction, so the pair gets a synthetic unit vector at
//! `GOLDEN_ANGLE * k`, with `k` the triangular index of the unordered pair.
//! The vector is negated for the opposite orientation, which keeps the pair
//! force antisymmetric and the whole step deterministic.

use log::{debug, trace};

use super::config::LayoutConfig;
use super::state::{SimulationState, validate_parts};
use super::vector::Vec2;
use crate::error::LayoutError;
use crate::graph::Edge;

/// pi * (3 - sqrt(5)).
const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// Result of a single step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    /// Every vertex's force was at or below the settle threshold.
    pub settled: bool,
    /// Largest squared per-vertex force seen in this step.
    pub peak_force_sq: f64,
    /// Vertex pairs (edge or repulsion) whose distance was clamped.
    pub guarded_pairs: usize,
}

/// Result of running the simulation to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleReport {
    /// Steps taken.
    pub iterations: u32,
    /// False when the iteration limit was hit first.
    pub settled: bool,
}

/// The layout engine. Holds only configuration; all mutable state is passed in.
#[derive(Debug, Clone, Default)]
pub struct ForceLayout {
    config: LayoutConfig,
}

impl ForceLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Advance `state` by one time step.
    pub fn step(&self, state: &mut SimulationState) -> Result<StepOutcome, LayoutError> {
        step(
            &self.config,
            &mut state.positions,
            &mut state.velocities,
            &state.edges,
        )
    }

    /// Step until settled or until `max_iterations` steps have run.
    pub fn settle(
        &self,
        state: &mut SimulationState,
        max_iterations: u32,
    ) -> Result<SettleReport, LayoutError> {
        for i in 0..max_iterations {
            if self.step(state)?.settled {
                debug!("layout settled after {} steps", i + 1);
                return Ok(SettleReport {
                    iterations: i + 1,
                    settled: true,
                });
            }
        }

        debug!("layout still moving after {max_iterations} steps");
        Ok(SettleReport {
            iterations: max_iterations,
            settled: false,
        })
    }

    /// Run to rest using the configured `max_iterations`.
    pub fn run(&self, state: &mut SimulationState) -> Result<SettleReport, LayoutError> {
        self.settle(state, self.config.max_iterations)
    }
}

/// Advance positions and velocities by one time step, in place.
///
/// Inputs are validated before anything is written, so a rejected step leaves
/// both arrays untouched.
pub fn step(
    config: &LayoutConfig,
    positions: &mut [Vec2],
    velocities: &mut [Vec2],
    edges: &[Edge],
) -> Result<StepOutcome, LayoutError> {
    validate_parts(positions, velocities, edges)?;

    let n = positions.len();
    let mut forces = vec![Vec2::ZERO; n];
    let mut guarded_pairs = 0;

    for edge in edges {
        if edge.is_self_loop() {
            continue;
        }
        let (a, b) = (edge.head.index(), edge.tail.index());
        let sep = separation(positions, b, a, config.min_distance);
        guarded_pairs += sep.guarded as usize;
        let f = config.spring_stiffness * (sep.distance - config.rest_length);
        let push = sep.delta * (f / sep.distance);
        forces[a] += push;
        forces[b] -= push;
    }

    for i in 0..n {
        for j in (i + 1)..n {
            let sep = separation(positions, i, j, config.min_distance);
            guarded_pairs += sep.guarded as usize;
            let d = sep.distance;
            let push = sep.delta * (config.repulsion / (d * d * d * d));
            forces[i] += push;
            forces[j] -= push;
        }
    }

    let threshold = config.min_force_sq();
    let mut settled = true;
    let mut peak_force_sq = 0.0_f64;
    for (i, force) in forces.iter().enumerate() {
        velocities[i] = velocities[i] * config.damping + *force;
        let magnitude_sq = force.length_squared();
        // Written so a NaN force never counts as settled.
        if !(magnitude_sq <= threshold) {
            settled = false;
        }
        peak_force_sq = peak_force_sq.max(magnitude_sq);
    }
    for (p, v) in positions.iter_mut().zip(velocities.iter()) {
        *p += *v;
    }

    if guarded_pairs > 0 {
        debug!("distance guard applied to {guarded_pairs} pairs");
    }
    trace!("step: n={n} peak_force_sq={peak_force_sq} settled={settled}");

    Ok(StepOutcome {
        settled,
        peak_force_sq,
        guarded_pairs,
    })
}

/// Vector from vertex `j` to vertex `i` and its length, after the guard.
#[derive(Debug, Clone, Copy)]
struct Separation {
    delta: Vec2,
    distance: f64,
    guarded: bool,
}

fn separation(positions: &[Vec2], i: usize, j: usize, min_distance: f64) -> Separation {
    let clamp = min_distance.max(f64::EPSILON);
    let delta = positions[i] - positions[j];
    let distance = delta.length();
    if distance >= clamp {
        return Separation {
            delta,
            distance,
            guarded: false,
        };
    }

    let direction = if distance > f64::EPSILON {
        delta * (1.0 / distance)
    } else {
        tie_break(i, j)
    };
    Separation {
        delta: direction * clamp,
        distance: clamp,
        guarded: true,
    }
}

/// Unit vector for a coincident pair, pointing from `j` toward `i`.
fn tie_break(i: usize, j: usize) -> Vec2 {
    let (lo, hi) = if i < j { (i, j) } else { (j, i) };
    let k = hi * (hi - 1) / 2 + lo;
    let u = Vec2::from_angle(GOLDEN_ANGLE * k as f64);
    if i < j { u } else { -u }
}

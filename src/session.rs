//! LayoutSession - the current graph and its layout run.
//!
//! The session owns everything that lives for one loaded graph: the running
//! animation, the vertex adjacency, the last display frame, and the spatial
//! index over it. Loading another graph cancels the previous run before the
//! new one is installed, so a stale loop can never advance again.
//!
//! Manual moves reported by the rendering layer only change the display
//! frame. They are not fed back into the simulation, and the next frame
//! overwrites them.

use log::{debug, info};

use crate::error::LayoutError;
use crate::graph::{EdgeId, GraphDescription, Topology, VertexId};
use crate::layout::{
    CancelToken, ForceLayout, Frame, LayoutAnimation, LayoutConfig, SettleReport,
    SimulationState, Vec2,
};
use crate::spatial::SpatialIndex;

pub struct LayoutSession {
    config: LayoutConfig,

    /// Run for the loaded graph; None before the first load.
    animation: Option<LayoutAnimation>,

    topology: Topology,

    /// Vertex labels from the description.
    names: Vec<String>,

    /// Last display-space positions handed to the renderer.
    display: Vec<Vec2>,

    /// Hit-testing index over `display`.
    spatial: SpatialIndex,
}

impl LayoutSession {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            animation: None,
            topology: Topology::new(),
            names: Vec::new(),
            display: Vec::new(),
            spatial: SpatialIndex::new(),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Replace the configuration used by subsequent loads.
    pub fn set_config(&mut self, config: LayoutConfig) {
        self.config = config;
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Start laying out a new graph.
    ///
    /// An invalid description is rejected and the current run is left as is.
    /// Otherwise the current run is cancelled and replaced.
    pub fn load(&mut self, description: &GraphDescription) -> Result<CancelToken, LayoutError> {
        let state = SimulationState::from_description(description, self.config.initial_layout)?;
        let topology = Topology::build(state.vertex_count(), &state.edges)?;

        self.cancel();

        let animation = LayoutAnimation::new(ForceLayout::new(self.config.clone()), state);
        let token = animation.token();
        self.display = animation.snapshot();
        self.spatial.rebuild(&self.display);
        self.topology = topology;
        self.names = description.names();
        self.animation = Some(animation);

        info!(
            "loaded graph with {} vertices and {} edges",
            self.topology.vertex_count(),
            self.topology.edge_count()
        );
        Ok(token)
    }

    /// Stop the current run, if any. Has no effect on a finished run.
    pub fn cancel(&mut self) {
        if let Some(animation) = &self.animation {
            if animation.is_running() {
                debug!("cancelling layout after {} frames", animation.frames());
            }
            animation.cancel();
        }
    }

    /// Drop the loaded graph entirely.
    pub fn clear(&mut self) {
        self.cancel();
        self.animation = None;
        self.topology = Topology::new();
        self.names.clear();
        self.display.clear();
        self.spatial.clear();
    }

    // =========================================================================
    // Animation
    // =========================================================================

    /// Advance one frame. `None` once the run has settled or was cancelled.
    pub fn next_frame(&mut self) -> Result<Option<Frame>, LayoutError> {
        let animation = self.animation.as_mut().ok_or(LayoutError::NoGraph)?;
        let frame = animation.next_frame()?;
        if let Some(frame) = &frame {
            self.display.clone_from(&frame.positions);
            self.spatial.rebuild(&self.display);
        }
        Ok(frame)
    }

    /// Run the current graph straight to rest and publish the final frame.
    pub fn settle(&mut self) -> Result<SettleReport, LayoutError> {
        let animation = self.animation.as_mut().ok_or(LayoutError::NoGraph)?;
        let report = animation.finish()?;
        if report.iterations > 0 {
            self.display = animation.snapshot();
            self.spatial.rebuild(&self.display);
        }
        Ok(report)
    }

    pub fn is_running(&self) -> bool {
        self.animation.as_ref().is_some_and(|a| a.is_running())
    }

    pub fn is_settled(&self) -> bool {
        self.animation.as_ref().is_some_and(|a| a.is_settled())
    }

    // =========================================================================
    // Rendering layer queries
    // =========================================================================

    /// Last display positions, one per vertex.
    pub fn display_positions(&self) -> &[Vec2] {
        &self.display
    }

    /// Record a manual move and return the edges whose endpoints changed.
    pub fn vertex_moved(
        &mut self,
        vertex: VertexId,
        x: f64,
        y: f64,
    ) -> Result<Vec<EdgeId>, LayoutError> {
        let incident = self.topology.incident_edges(vertex)?;
        let to = Vec2::new(x, y);
        let from = std::mem::replace(&mut self.display[vertex.index()], to);
        self.spatial.relocate(vertex, from, to);
        Ok(incident)
    }

    /// Nearest vertex within `radius` of a display point.
    pub fn pick_vertex(&self, x: f64, y: f64, radius: f64) -> Option<VertexId> {
        self.spatial.nearest_within(x, y, radius)
    }

    pub fn vertex_name(&self, vertex: VertexId) -> Option<&str> {
        self.names.get(vertex.index()).map(String::as_str)
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn vertex_count(&self) -> usize {
        self.topology.vertex_count()
    }

    pub fn edge_count(&self) -> usize {
        self.topology.edge_count()
    }
}

impl Default for LayoutSession {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeDescription, VertexDescription};
    use crate::layout::InitialLayout;

    fn path(n: u32) -> GraphDescription {
        GraphDescription {
            vertices: (0..n)
                .map(|i| VertexDescription {
                    name: format!("v{i}"),
                    x: 100.0 + (i * i) as f64,
                    y: 100.0 * i as f64,
                })
                .collect(),
            edges: (1..n)
                .map(|i| EdgeDescription {
                    head: i - 1,
                    tail: i,
                    directed: false,
                })
                .collect(),
        }
    }

    #[test]
    fn test_frame_before_load() {
        let mut session = LayoutSession::default();
        assert_eq!(session.next_frame().unwrap_err(), LayoutError::NoGraph);
        assert_eq!(session.settle().unwrap_err(), LayoutError::NoGraph);
        assert!(!session.is_running());
    }

    #[test]
    fn test_load_publishes_initial_frame() {
        let mut session = LayoutSession::default();
        session.load(&path(3)).unwrap();

        assert!(session.is_running());
        assert_eq!(session.vertex_count(), 3);
        assert_eq!(session.edge_count(), 2);
        assert_eq!(session.display_positions().len(), 3);
        assert_eq!(session.vertex_name(VertexId(2)), Some("v2"));
        assert_eq!(session.vertex_name(VertexId(3)), None);
    }

    #[test]
    fn test_reload_cancels_previous_run() {
        let mut session = LayoutSession::default();
        let first = session.load(&path(3)).unwrap();
        session.next_frame().unwrap();

        let second = session.load(&path(4)).unwrap();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        assert_eq!(session.vertex_count(), 4);
        assert!(session.next_frame().unwrap().is_some());
    }

    #[test]
    fn test_invalid_load_keeps_current_run() {
        let mut session = LayoutSession::default();
        let token = session.load(&path(3)).unwrap();

        let mut bad = path(2);
        bad.edges.push(EdgeDescription {
            head: 0,
            tail: 9,
            directed: false,
        });
        assert!(matches!(
            session.load(&bad),
            Err(LayoutError::InvalidEdge { .. })
        ));
        assert!(!token.is_cancelled());
        assert_eq!(session.vertex_count(), 3);
    }

    #[test]
    fn test_cancel_token_stops_frames() {
        let mut session = LayoutSession::default();
        let token = session.load(&path(3)).unwrap();
        token.cancel();
        assert_eq!(session.next_frame().unwrap(), None);
        assert!(!session.is_running());
    }

    #[test]
    fn test_frames_until_settled() {
        let mut session = LayoutSession::default();
        session.load(&path(4)).unwrap();

        let mut frames = 0;
        while let Some(frame) = session.next_frame().unwrap() {
            frames += 1;
            assert_eq!(session.display_positions(), frame.positions.as_slice());
            assert!(frames < 1000);
        }
        assert!(session.is_settled());
    }

    #[test]
    fn test_settle_publishes_final_frame() {
        let mut session = LayoutSession::new(LayoutConfig {
            initial_layout: InitialLayout::Staggered,
            ..LayoutConfig::default()
        });
        session.load(&path(5)).unwrap();
        let before = session.display_positions().to_vec();

        let report = session.settle().unwrap();
        assert!(report.settled);
        assert_ne!(session.display_positions(), before.as_slice());
        assert_eq!(session.next_frame().unwrap(), None);
    }

    #[test]
    fn test_vertex_moved_reports_incident_edges() {
        let mut session = LayoutSession::default();
        session.load(&path(3)).unwrap();

        let edges = session.vertex_moved(VertexId(1), 500.0, 500.0).unwrap();
        assert_eq!(edges, vec![EdgeId(0), EdgeId(1)]);
        assert_eq!(session.display_positions()[1], Vec2::new(500.0, 500.0));
        assert_eq!(session.pick_vertex(498.0, 501.0, 5.0), Some(VertexId(1)));
    }

    #[test]
    fn test_vertex_moved_rejects_unknown_vertex() {
        let mut session = LayoutSession::default();
        session.load(&path(2)).unwrap();
        assert_eq!(
            session.vertex_moved(VertexId(2), 0.0, 0.0).unwrap_err(),
            LayoutError::InvalidVertex {
                vertex: VertexId(2),
                vertex_count: 2
            }
        );
    }

    #[test]
    fn test_pick_vertex() {
        let mut session = LayoutSession::default();
        session.load(&path(3)).unwrap();
        let first = session.display_positions()[0];
        assert_eq!(session.pick_vertex(first.x, first.y, 1.0), Some(VertexId(0)));
        assert_eq!(session.pick_vertex(-1000.0, -1000.0, 10.0), None);
    }

    #[test]
    fn test_clear() {
        let mut session = LayoutSession::default();
        let token = session.load(&path(3)).unwrap();
        session.clear();
        assert!(token.is_cancelled());
        assert_eq!(session.vertex_count(), 0);
        assert!(session.display_positions().is_empty());
        assert_eq!(session.next_frame().unwrap_err(), LayoutError::NoGraph);
    }
}

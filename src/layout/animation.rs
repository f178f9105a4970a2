//! Cancellable frame-by-frame driver for the force layout.
//!
//! The host's frame scheduler calls [`LayoutAnimation::next_frame`] once per
//! repaint. Each call runs a fixed batch of engine steps and returns the
//! positions mapped into the viewport. The run ends for good once a frame
//! settles or its [`CancelToken`] is cancelled; after that `next_frame`
//! returns `None` and never touches the state again.

use std::cell::Cell;
use std::rc::Rc;

use log::{info, trace};

use super::force::{ForceLayout, SettleReport};
use super::state::SimulationState;
use super::vector::Vec2;
use crate::error::LayoutError;

/// Shared stop flag for one layout run.
///
/// Clones observe the same flag. Cancelling is permanent.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// One batch of steps, in display coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Normalized positions, one per vertex.
    pub positions: Vec<Vec2>,
    /// This frame ended the run.
    pub settled: bool,
    /// Engine steps taken in this frame.
    pub steps: u32,
}

/// A layout run in progress.
pub struct LayoutAnimation {
    layout: ForceLayout,
    state: SimulationState,
    token: CancelToken,
    frames: u32,
    settled: bool,
}

impl LayoutAnimation {
    pub fn new(layout: ForceLayout, state: SimulationState) -> Self {
        Self {
            layout,
            state,
            token: CancelToken::new(),
            frames: 0,
            settled: false,
        }
    }

    /// Handle that stops this run when cancelled.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_running(&self) -> bool {
        !self.settled && !self.token.is_cancelled()
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Frames produced so far.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Current positions in display coordinates, without stepping.
    pub fn snapshot(&self) -> Vec<Vec2> {
        self.layout
            .config()
            .viewport
            .normalize(&self.state.positions)
    }

    /// Run up to `steps_per_frame` steps and return the resulting frame.
    ///
    /// The batch stops early at the first settled step. Returns `None` once
    /// the run has settled or been cancelled.
    pub fn next_frame(&mut self) -> Result<Option<Frame>, LayoutError> {
        if !self.is_running() {
            return Ok(None);
        }

        let batch = self.layout.config().steps_per_frame.max(1);
        let mut steps = 0;
        for _ in 0..batch {
            steps += 1;
            if self.layout.step(&mut self.state)?.settled {
                self.settled = true;
                break;
            }
        }
        self.frames += 1;

        if self.settled {
            info!(
                "layout of {} vertices settled after {} frames",
                self.state.vertex_count(),
                self.frames
            );
        } else {
            trace!("frame {} ({steps} steps)", self.frames);
        }

        Ok(Some(Frame {
            positions: self.snapshot(),
            settled: self.settled,
            steps,
        }))
    }

    /// Skip the animation and step straight to rest.
    ///
    /// A cancelled or already settled run is left alone.
    pub fn finish(&mut self) -> Result<SettleReport, LayoutError> {
        if !self.is_running() {
            return Ok(SettleReport {
                iterations: 0,
                settled: self.settled,
            });
        }

        let report = self.layout.run(&mut self.state)?;
        self.settled = report.settled;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;
    use crate::layout::LayoutConfig;

    fn pair_animation() -> LayoutAnimation {
        let state = SimulationState::new(
            vec![Vec2::new(0.0, 0.0), Vec2::new(1000.0, 0.0)],
            vec![Edge::new(0, 1)],
        );
        LayoutAnimation::new(ForceLayout::default(), state)
    }

    #[test]
    fn test_token_is_shared() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_frame_runs_a_full_batch() {
        let mut animation = pair_animation();
        let frame = animation.next_frame().unwrap().unwrap();
        assert_eq!(frame.steps, 5);
        assert!(!frame.settled);
        assert_eq!(frame.positions.len(), 2);
        assert_eq!(animation.frames(), 1);
    }

    #[test]
    fn test_runs_until_settled_then_stops() {
        let mut animation = pair_animation();
        let mut last = None;
        for _ in 0..100 {
            match animation.next_frame().unwrap() {
                Some(frame) => last = Some(frame),
                None => break,
            }
        }

        let last = last.unwrap();
        assert!(last.settled);
        assert!(animation.is_settled());
        assert!(!animation.is_running());

        let frozen = animation.state().clone();
        assert_eq!(animation.next_frame().unwrap(), None);
        assert_eq!(animation.state(), &frozen);
    }

    #[test]
    fn test_cancel_stops_without_mutation() {
        let mut animation = pair_animation();
        animation.next_frame().unwrap();

        let token = animation.token();
        token.cancel();
        let frozen = animation.state().clone();

        assert_eq!(animation.next_frame().unwrap(), None);
        assert_eq!(animation.state(), &frozen);
        assert!(!animation.is_settled());
    }

    #[test]
    fn test_trivial_graph_settles_in_first_frame() {
        let state = SimulationState::new(vec![Vec2::new(3.0, 4.0)], Vec::new());
        let mut animation = LayoutAnimation::new(ForceLayout::default(), state);

        let frame = animation.next_frame().unwrap().unwrap();
        assert!(frame.settled);
        assert_eq!(frame.steps, 1);
        assert_eq!(
            frame.positions,
            vec![LayoutConfig::default().viewport.center()]
        );
    }

    #[test]
    fn test_finish_settles_in_one_call() {
        let mut animation = pair_animation();
        let report = animation.finish().unwrap();
        assert!(report.settled);
        assert!(report.iterations > 0);
        assert!(!animation.is_running());
        assert_eq!(animation.next_frame().unwrap(), None);

        let again = animation.finish().unwrap();
        assert_eq!(again.iterations, 0);
        assert!(again.settled);
    }

    #[test]
    fn test_frames_are_normalized() {
        let mut animation = pair_animation();
        let frame = animation.next_frame().unwrap().unwrap();
        let viewport = LayoutConfig::default().viewport;
        for p in &frame.positions {
            assert!(p.x >= viewport.left && p.x <= viewport.right);
            assert!(p.y >= viewport.top && p.y <= viewport.bottom);
        }
    }
}

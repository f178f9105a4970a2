//! Display rectangle and min-max normalization.
//!
//! Each frame maps the bounding box of the simulated positions linearly onto
//! the viewport, independently per axis. An axis whose values are all equal
//! has no extent to stretch, so every vertex lands on the viewport's center
//! for that axis.

use serde::{Deserialize, Serialize};

use super::vector::Vec2;

/// Target display rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            left: 25.0,
            top: 25.0,
            right: 450.0,
            bottom: 450.0,
        }
    }
}

/// Axis-aligned bounding box of a position set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Bounding box of `positions`, or None if empty.
    pub fn of(positions: &[Vec2]) -> Option<Self> {
        let first = *positions.first()?;
        let mut bounds = Self {
            min: first,
            max: first,
        };
        for p in &positions[1..] {
            bounds.min.x = bounds.min.x.min(p.x);
            bounds.min.y = bounds.min.y.min(p.y);
            bounds.max.x = bounds.max.x.max(p.x);
            bounds.max.y = bounds.max.y.max(p.y);
        }
        Some(bounds)
    }
}

impl Viewport {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Map `positions` onto this rectangle.
    pub fn normalize(&self, positions: &[Vec2]) -> Vec<Vec2> {
        let Some(bounds) = Bounds::of(positions) else {
            return Vec::new();
        };
        let center = self.center();
        let x_axis = Axis::new(bounds.min.x, bounds.max.x, self.left, self.right, center.x);
        let y_axis = Axis::new(bounds.min.y, bounds.max.y, self.top, self.bottom, center.y);

        positions
            .iter()
            .map(|p| Vec2::new(x_axis.map(p.x), y_axis.map(p.y)))
            .collect()
    }
}

/// Linear map for one axis; `None` scale means the source extent is empty.
struct Axis {
    min: f64,
    start: f64,
    scale: Option<f64>,
    center: f64,
}

impl Axis {
    fn new(min: f64, max: f64, start: f64, end: f64, center: f64) -> Self {
        let extent = max - min;
        let scale = (extent > 0.0 && extent.is_finite()).then(|| (end - start) / extent);
        Self {
            min,
            start,
            scale,
            center,
        }
    }

    #[inline]
    fn map(&self, value: f64) -> f64 {
        match self.scale {
            Some(scale) => self.start + (value - self.min) * scale,
            None => self.center,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert!(Viewport::default().normalize(&[]).is_empty());
        assert_eq!(Bounds::of(&[]), None);
    }

    #[test]
    fn test_corners_map_to_rectangle() {
        let viewport = Viewport::default();
        let out = viewport.normalize(&[
            Vec2::new(-100.0, 10.0),
            Vec2::new(100.0, 30.0),
            Vec2::new(0.0, 20.0),
        ]);
        assert_eq!(out[0], Vec2::new(25.0, 25.0));
        assert_eq!(out[1], Vec2::new(450.0, 450.0));
        assert_eq!(out[2], Vec2::new(237.5, 237.5));
    }

    #[test]
    fn test_single_vertex_goes_to_center() {
        let viewport = Viewport::default();
        let out = viewport.normalize(&[Vec2::new(1234.0, -5.0)]);
        assert_eq!(out, vec![viewport.center()]);
    }

    #[test]
    fn test_identical_positions_go_to_center() {
        let viewport = Viewport::new(0.0, 0.0, 100.0, 50.0);
        let p = Vec2::new(7.0, 7.0);
        let out = viewport.normalize(&[p, p, p]);
        assert!(out.iter().all(|&q| q == Vec2::new(50.0, 25.0)));
    }

    #[test]
    fn test_flat_axis_only_centers_that_axis() {
        let viewport = Viewport::default();
        let out = viewport.normalize(&[Vec2::new(0.0, 5.0), Vec2::new(10.0, 5.0)]);
        assert_eq!(out[0], Vec2::new(25.0, 237.5));
        assert_eq!(out[1], Vec2::new(450.0, 237.5));
    }
}

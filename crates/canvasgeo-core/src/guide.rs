//! Snap targets and guide lines drawn over the canvas.
//!
//! These carry metadata alongside their geometry; the mapping functions in
//! [`crate::transform`] move the geometry between spaces and keep the rest.

use crate::rect::Rectangle;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Distance threshold for snapping to targets (in canvas units).
pub const SNAP_THRESHOLD: f64 = 10.0;

/// A point that can be snapped to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapTarget {
    /// The snap point location.
    pub point: Point,
    /// Type of snap target for visual feedback.
    pub kind: SnapTargetKind,
}

/// Type of snap target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SnapTargetKind {
    /// Corner of a bounding box.
    Corner,
    /// Midpoint of an edge.
    Midpoint,
    /// Center of a bounding box.
    Center,
    /// Point on an edge.
    Edge,
}

/// A measurement or alignment guide between two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideLine {
    pub start: Point,
    pub end: Point,
    /// Optional text shown alongside the guide (e.g. a distance).
    pub label: Option<String>,
}

impl GuideLine {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

/// The nine control points of a rectangle: corners, edge midpoints, center.
pub fn snap_targets_from_bounds(bounds: &Rectangle) -> Vec<SnapTarget> {
    let (x0, y0, x1, y1) = (bounds.x, bounds.y, bounds.x2(), bounds.y2());
    let (cx, cy) = ((x0 + x1) / 2.0, (y0 + y1) / 2.0);
    let target = |x, y, kind| SnapTarget {
        point: Point::new(x, y),
        kind,
    };

    vec![
        target(x0, y0, SnapTargetKind::Corner),
        target(x1, y0, SnapTargetKind::Corner),
        target(x1, y1, SnapTargetKind::Corner),
        target(x0, y1, SnapTargetKind::Corner),
        target(cx, y0, SnapTargetKind::Midpoint),
        target(x1, cy, SnapTargetKind::Midpoint),
        target(cx, y1, SnapTargetKind::Midpoint),
        target(x0, cy, SnapTargetKind::Midpoint),
        target(cx, cy, SnapTargetKind::Center),
    ]
}

/// Nearest target strictly within `threshold` of `point`.
pub fn snap_to_targets(point: Point, targets: &[SnapTarget], threshold: f64) -> Option<SnapTarget> {
    let mut best: Option<&SnapTarget> = None;
    let mut best_dist_sq = threshold * threshold;

    for target in targets {
        let dist_sq = (point - target.point).hypot2();
        if dist_sq < best_dist_sq {
            best_dist_sq = dist_sq;
            best = Some(target);
        }
    }

    best.copied()
}

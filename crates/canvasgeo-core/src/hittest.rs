//! Deepest-hit queries for pointer hover and click.
//!
//! A node must itself be hit before any of its children are tested. Among all
//! hits the deepest one wins; at equal depth the first one found in pre-order
//! traversal wins.

use crate::geo_tree::{GeoNode, GeoTree};
use crate::rect::Rectangle;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Query shape for a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Envelope {
    /// Pointer position.
    Point(Point),
    /// Area, e.g. a dragged rectangle.
    Rect(Rectangle),
}

impl From<Point> for Envelope {
    fn from(point: Point) -> Self {
        Envelope::Point(point)
    }
}

impl From<Rectangle> for Envelope {
    fn from(rect: Rectangle) -> Self {
        Envelope::Rect(rect)
    }
}

/// How a rectangle envelope is matched against node bounds.
///
/// Point envelopes always use containment of the point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HitMode {
    /// Envelope overlaps the node's bounds.
    #[default]
    Intersects,
    /// Envelope fully contains the node's bounds.
    Contains,
}

impl Envelope {
    /// Check whether `bounds` satisfies this envelope under `mode`.
    pub fn hits(&self, bounds: &Rectangle, mode: HitMode) -> bool {
        match (self, mode) {
            (Envelope::Point(p), _) => bounds.contains_point(*p),
            (Envelope::Rect(area), HitMode::Contains) => area.contains_rect(bounds),
            (Envelope::Rect(area), HitMode::Intersects) => area.intersects(bounds),
        }
    }
}

/// Depth-tagged hit. Depth counts from the node the query started at.
#[derive(Debug, Clone, Copy)]
struct Hit<'a> {
    node: &'a GeoNode,
    depth: usize,
}

fn deepest_in<'a>(
    node: &'a GeoNode,
    envelope: &Envelope,
    mode: HitMode,
    depth: usize,
) -> Option<Hit<'a>> {
    if !envelope.hits(&node.bounds, mode) {
        return None;
    }

    let mut best = Hit { node, depth };
    for child in &node.children {
        if let Some(hit) = deepest_in(child, envelope, mode, depth + 1) {
            // Strictly greater: first discovered wins at equal depth.
            if hit.depth > best.depth {
                best = hit;
            }
        }
    }
    Some(best)
}

fn deepest_among<'a>(nodes: &'a [GeoNode], envelope: &Envelope, mode: HitMode) -> Option<Hit<'a>> {
    let mut best: Option<Hit<'a>> = None;
    for node in nodes {
        if let Some(hit) = deepest_in(node, envelope, mode, 0) {
            if best.is_none_or(|b| hit.depth > b.depth) {
                best = Some(hit);
            }
        }
    }
    best
}

/// Deepest node under `root` that satisfies the envelope, or `None` when
/// `root` itself is not hit.
pub fn get_deepest<'a>(
    root: &'a GeoNode,
    envelope: impl Into<Envelope>,
    mode: HitMode,
) -> Option<&'a GeoNode> {
    let envelope = envelope.into();
    let hit = deepest_in(root, &envelope, mode, 0);
    log::trace!(
        "get_deepest({:?}, {:?}) -> {:?}",
        envelope,
        mode,
        hit.map(|h| h.node.id.as_str())
    );
    hit.map(|h| h.node)
}

/// Chain of nodes from `root` down to the deepest hit, inclusive.
///
/// Empty when `root` is not hit.
pub fn get_deepest_path<'a>(
    root: &'a GeoNode,
    envelope: impl Into<Envelope>,
    mode: HitMode,
) -> Vec<&'a GeoNode> {
    let envelope = envelope.into();
    let Some(target) = deepest_in(root, &envelope, mode, 0) else {
        return Vec::new();
    };

    let mut path = Vec::with_capacity(target.depth + 1);
    collect_path(root, target.node, &mut path);
    path
}

fn collect_path<'a>(node: &'a GeoNode, target: &GeoNode, path: &mut Vec<&'a GeoNode>) -> bool {
    path.push(node);
    if std::ptr::eq(node, target) {
        return true;
    }
    for child in &node.children {
        if collect_path(child, target, path) {
            return true;
        }
    }
    path.pop();
    false
}

impl GeoTree {
    /// Deepest hit across the whole forest.
    ///
    /// Roots are treated as siblings at depth zero, so the same tie-break
    /// applies: the first root whose subtree reaches the greatest depth wins.
    pub fn get_deepest(&self, envelope: impl Into<Envelope>, mode: HitMode) -> Option<&GeoNode> {
        let envelope = envelope.into();
        deepest_among(&self.roots, &envelope, mode).map(|h| h.node)
    }

    /// Root-to-hit chain for the deepest hit across the forest.
    pub fn get_deepest_path(&self, envelope: impl Into<Envelope>, mode: HitMode) -> Vec<&GeoNode> {
        let envelope = envelope.into();
        let Some(target) = deepest_among(&self.roots, &envelope, mode) else {
            return Vec::new();
        };
        let mut path = Vec::with_capacity(target.depth + 1);
        for root in &self.roots {
            if collect_path(root, target.node, &mut path) {
                break;
            }
        }
        path
    }
}

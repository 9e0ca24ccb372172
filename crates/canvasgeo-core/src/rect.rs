//! Axis-aligned rectangles in `{x, y, width, height}` form.
//!
//! Caller-supplied rectangles may carry negative width or height (a drag from
//! bottom-right to top-left). Every comparison here works on the normalized
//! two-corner form, so such rectangles behave like their positive counterparts.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    /// The empty rectangle at the origin.
    pub const ZERO: Rectangle = Rectangle {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Create a new rectangle.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Create the rectangle spanned by two opposite corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self {
            x,
            y,
            width: a.x.max(b.x) - x,
            height: a.y.max(b.y) - y,
        }
    }

    /// Smallest rectangle enclosing every point, or `None` for an empty set.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (mut x0, mut y0, mut x1, mut y1) = (first.x, first.y, first.x, first.y);
        for p in rest {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }
        Some(Self::new(x0, y0, x1 - x0, y1 - y0))
    }

    /// Second x corner (`x + width`), not normalized.
    pub fn x2(&self) -> f64 {
        self.x + self.width
    }

    /// Second y corner (`y + height`), not normalized.
    pub fn y2(&self) -> f64 {
        self.y + self.height
    }

    /// Left edge, whatever the sign of `width`.
    pub fn min_x(&self) -> f64 {
        self.x.min(self.x2())
    }

    /// Right edge, whatever the sign of `width`.
    pub fn max_x(&self) -> f64 {
        self.x.max(self.x2())
    }

    /// Top edge, whatever the sign of `height`.
    pub fn min_y(&self) -> f64 {
        self.y.min(self.y2())
    }

    /// Bottom edge, whatever the sign of `height`.
    pub fn max_y(&self) -> f64 {
        self.y.max(self.y2())
    }

    /// Same area with non-negative width and height.
    pub fn normalized(&self) -> Self {
        Self::new(
            self.min_x(),
            self.min_y(),
            self.width.abs(),
            self.height.abs(),
        )
    }

    /// Center point.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Unsigned area.
    pub fn area(&self) -> f64 {
        (self.width * self.height).abs()
    }

    /// Move by a delta.
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Grow by `padding` on every side.
    pub fn pad(&self, padding: f64) -> Self {
        let r = self.normalized();
        Self::new(
            r.x - padding,
            r.y - padding,
            r.width + padding * 2.0,
            r.height + padding * 2.0,
        )
    }

    /// Check whether a point lies inside or on the boundary.
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.min_x()
            && point.x <= self.max_x()
            && point.y >= self.min_y()
            && point.y <= self.max_y()
    }

    /// Check whether `self` lies entirely within `outer` (shared edges allowed).
    pub fn is_contained_in(&self, outer: &Rectangle) -> bool {
        self.min_x() >= outer.min_x()
            && self.min_y() >= outer.min_y()
            && self.max_x() <= outer.max_x()
            && self.max_y() <= outer.max_y()
    }

    /// Check whether `inner` lies entirely within `self`.
    pub fn contains_rect(&self, inner: &Rectangle) -> bool {
        inner.is_contained_in(self)
    }

    /// Check whether two rectangles overlap.
    ///
    /// Intervals are closed, so rectangles sharing an edge segment intersect.
    /// Two rectangles with positive area whose only common point is a corner
    /// do not: `[0, 0, 100, 100]` and `[100, 100, 50, 50]` must not intersect,
    /// which a plain closed-interval test would get wrong. Degenerate
    /// rectangles (points, lines) intersect anything they touch.
    pub fn intersects(&self, other: &Rectangle) -> bool {
        let separated = self.max_x() < other.min_x()
            || self.min_x() > other.max_x()
            || self.min_y() > other.max_y()
            || self.max_y() < other.min_y();
        if separated {
            return false;
        }

        let overlap_x = self.max_x().min(other.max_x()) - self.min_x().max(other.min_x());
        let overlap_y = self.max_y().min(other.max_y()) - self.min_y().max(other.min_y());
        let corner_contact = overlap_x == 0.0 && overlap_y == 0.0;
        !(corner_contact && self.area() > 0.0 && other.area() > 0.0)
    }

    /// Overlapping region with positive area, if any.
    pub fn intersection(&self, other: &Rectangle) -> Option<Rectangle> {
        let x0 = self.min_x().max(other.min_x());
        let y0 = self.min_y().max(other.min_y());
        let x1 = self.max_x().min(other.max_x());
        let y1 = self.max_y().min(other.max_y());
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rectangle::new(x0, y0, x1 - x0, y1 - y0))
    }

    /// Smallest rectangle enclosing both.
    pub fn union(&self, other: &Rectangle) -> Rectangle {
        let x0 = self.min_x().min(other.min_x());
        let y0 = self.min_y().min(other.min_y());
        let x1 = self.max_x().max(other.max_x());
        let y1 = self.max_y().max(other.max_y());
        Rectangle::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Smallest rectangle enclosing every input, or `None` when empty.
    pub fn bounding<I>(rects: I) -> Option<Rectangle>
    where
        I: IntoIterator<Item = Rectangle>,
    {
        rects.into_iter().reduce(|acc, r| acc.union(&r))
    }

    /// Convert to a normalized kurbo rectangle.
    pub fn to_kurbo(&self) -> Rect {
        Rect::new(self.min_x(), self.min_y(), self.max_x(), self.max_y())
    }
}

impl From<Rect> for Rectangle {
    fn from(rect: Rect) -> Self {
        Rectangle::new(rect.x0, rect.y0, rect.width(), rect.height())
    }
}

impl From<Rectangle> for Rect {
    fn from(rect: Rectangle) -> Self {
        rect.to_kurbo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f64, y: f64, w: f64, h: f64) -> Rectangle {
        Rectangle::new(x, y, w, h)
    }

    #[test]
    fn test_intersects_reference_cases() {
        assert!(r(0.0, 0.0, 100.0, 100.0).intersects(&r(0.0, 0.0, 50.0, 50.0)));
        assert!(!r(0.0, 0.0, 100.0, 100.0).intersects(&r(100.0, 100.0, 50.0, 50.0)));
        assert!(r(0.0, 0.0, 100.0, 100.0).intersects(&r(0.0, 0.0, 100.0, 100.0)));
        assert!(!r(0.0, 0.0, -100.0, -100.0).intersects(&r(0.0, 0.0, 100.0, 100.0)));
        assert!(r(0.0, 0.0, -100.0, -100.0).intersects(&r(-10.0, -10.0, 100.0, 100.0)));
    }

    #[test]
    fn test_intersects_shared_border() {
        let a = r(100.0, 50.0, 50.0, 50.0);
        let b = r(50.0, 50.0, 50.0, 50.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_intersects_separated() {
        let a = r(200.0, 200.0, 50.0, 50.0);
        let b = r(10.0, 10.0, 100.0, 100.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_point_rect_touching_corner_intersects() {
        let point = r(100.0, 100.0, 0.0, 0.0);
        assert!(point.intersects(&r(0.0, 0.0, 100.0, 100.0)));
    }

    #[test]
    fn test_containment() {
        let outer = r(10.0, 10.0, 100.0, 100.0);
        assert!(r(20.0, 20.0, 40.0, 40.0).is_contained_in(&outer));
        assert!(!r(90.0, 90.0, 30.0, 30.0).is_contained_in(&outer));
        assert!(!r(200.0, 200.0, 50.0, 50.0).is_contained_in(&outer));
        assert!(!r(5.0, 5.0, 150.0, 150.0).is_contained_in(&outer));
        assert!(outer.contains_rect(&outer));
    }

    #[test]
    fn test_containment_normalizes_corners() {
        // Drag from bottom-right to top-left.
        let area = r(110.0, 110.0, -100.0, -100.0);
        assert!(r(20.0, 20.0, 40.0, 40.0).is_contained_in(&area));
        assert!(r(60.0, 60.0, -40.0, -40.0).is_contained_in(&area));
    }

    #[test]
    fn test_contains_point_closed() {
        let rect = r(10.0, 20.0, 30.0, 40.0);
        assert!(rect.contains_point(Point::new(15.0, 25.0)));
        assert!(rect.contains_point(Point::new(40.0, 60.0)));
        assert!(!rect.contains_point(Point::new(41.0, 60.0)));
        assert!(r(40.0, 60.0, -30.0, -40.0).contains_point(Point::new(15.0, 25.0)));
    }

    #[test]
    fn test_from_points() {
        let points = [
            Point::new(10.0, 20.0),
            Point::new(30.0, 40.0),
            Point::new(15.0, 25.0),
            Point::new(5.0, 35.0),
        ];
        assert_eq!(Rectangle::from_points(&points), Some(r(5.0, 20.0, 25.0, 20.0)));
        assert_eq!(Rectangle::from_points(&[]), None);
    }

    #[test]
    fn test_intersection() {
        let a = r(10.0, 10.0, 30.0, 30.0);
        let b = r(20.0, 20.0, 30.0, 30.0);
        assert_eq!(a.intersection(&b), Some(r(20.0, 20.0, 20.0, 20.0)));
        assert_eq!(a.intersection(&r(40.0, 10.0, 10.0, 10.0)), None);
    }

    #[test]
    fn test_bounding() {
        let rects = [r(10.0, 10.0, 30.0, 40.0), r(50.0, 20.0, 20.0, 30.0)];
        assert_eq!(Rectangle::bounding(rects), Some(r(10.0, 10.0, 60.0, 40.0)));
        assert_eq!(Rectangle::bounding(Vec::new()), None);
    }

    #[test]
    fn test_pad() {
        assert_eq!(r(10.0, 10.0, 20.0, 20.0).pad(5.0), r(5.0, 5.0, 30.0, 30.0));
    }

    #[test]
    fn test_kurbo_conversion() {
        let rect = r(30.0, 40.0, -20.0, -10.0);
        let k = rect.to_kurbo();
        assert_eq!(k, Rect::new(10.0, 30.0, 30.0, 40.0));
        assert_eq!(Rectangle::from(k), r(10.0, 30.0, 20.0, 10.0));
    }
}

//! 2×3 affine transforms bridging canvas (document) space and surface (viewport) space.
//!
//! Rectangles are mapped through their min and max corners only, so a transform
//! carrying rotation or shear yields the bounding box of the mapped corners
//! rather than a rotated quadrilateral.

use crate::guide::{GuideLine, SnapTarget};
use crate::rect::Rectangle;
use kurbo::{Affine, Point};
use serde::{Deserialize, Serialize};
use std::ops::Mul;
use thiserror::Error;

/// Transform errors.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TransformError {
    #[error("Non-invertible transform (determinant {determinant})")]
    NonInvertible { determinant: f64 },
}

/// Result type for inverse mappings.
pub type TransformResult<T> = Result<T, TransformError>;

/// Axis selector for scalar offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Affine matrix `[[a, b, tx], [c, d, ty]]` mapping
/// `(x, y) -> (a·x + b·y + tx, c·x + d·y + ty)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub tx: f64,
    pub c: f64,
    pub d: f64,
    pub ty: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        a: 1.0,
        b: 0.0,
        tx: 0.0,
        c: 0.0,
        d: 1.0,
        ty: 0.0,
    };

    /// Create a transform from its six coefficients, row by row.
    pub const fn new(a: f64, b: f64, tx: f64, c: f64, d: f64, ty: f64) -> Self {
        Self { a, b, tx, c, d, ty }
    }

    /// Create a transform from `[[a, b, tx], [c, d, ty]]`.
    pub const fn from_rows(rows: [[f64; 3]; 2]) -> Self {
        Self::new(rows[0][0], rows[0][1], rows[0][2], rows[1][0], rows[1][1], rows[1][2])
    }

    /// The matrix as `[[a, b, tx], [c, d, ty]]`.
    pub const fn rows(&self) -> [[f64; 3]; 2] {
        [[self.a, self.b, self.tx], [self.c, self.d, self.ty]]
    }

    /// Pure translation.
    pub const fn translate(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, tx, 0.0, 1.0, ty)
    }

    /// Pure scale about the origin.
    pub const fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, 0.0, sy, 0.0)
    }

    /// Determinant of the linear 2×2 part.
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Whether [`Transform::invert`] succeeds.
    pub fn is_invertible(&self) -> bool {
        self.determinant() != 0.0
    }

    /// Inverse transform.
    ///
    /// Fails only when the determinant is exactly zero; NaN and infinite
    /// coefficients propagate into the result.
    pub fn invert(&self) -> TransformResult<Transform> {
        let det = self.determinant();
        if det == 0.0 {
            log::warn!("Cannot invert transform {:?}: determinant is zero", self.rows());
            return Err(TransformError::NonInvertible { determinant: det });
        }
        let inv_det = 1.0 / det;
        let a = self.d * inv_det;
        let b = -self.b * inv_det;
        let c = -self.c * inv_det;
        let d = self.a * inv_det;
        Ok(Transform {
            a,
            b,
            tx: -(a * self.tx + b * self.ty),
            c,
            d,
            ty: -(c * self.tx + d * self.ty),
        })
    }

    /// Matrix product `self · other` (apply `other` first).
    pub fn multiply(&self, other: &Transform) -> Transform {
        Transform {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            tx: self.a * other.tx + self.b * other.ty + self.tx,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            ty: self.c * other.tx + self.d * other.ty + self.ty,
        }
    }

    /// Apply a scale around an absolute `origin` on top of this transform.
    pub fn scale_about(&self, sx: f64, sy: f64, origin: Point) -> Transform {
        let about = Transform::translate(origin.x, origin.y)
            * Transform::scale(sx, sy)
            * Transform::translate(-origin.x, -origin.y);
        about * *self
    }

    /// Scale factors, as the norms of the matrix rows.
    pub fn get_scale(&self) -> (f64, f64) {
        (self.a.hypot(self.b), self.c.hypot(self.d))
    }

    /// Translation components.
    pub fn get_translate(&self) -> (f64, f64) {
        (self.tx, self.ty)
    }
}

impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        self.multiply(&rhs)
    }
}

impl From<Transform> for Affine {
    fn from(t: Transform) -> Self {
        Affine::new([t.a, t.c, t.b, t.d, t.tx, t.ty])
    }
}

impl From<Affine> for Transform {
    fn from(affine: Affine) -> Self {
        let [a, c, b, d, tx, ty] = affine.as_coeffs();
        Transform { a, b, tx, c, d, ty }
    }
}

/// Map a canvas-space vector to surface space.
pub fn vector2_to_surface_space(v: Point, t: &Transform) -> Point {
    Point::new(
        t.a * v.x + t.b * v.y + t.tx,
        t.c * v.x + t.d * v.y + t.ty,
    )
}

/// Map a snap target to surface space, keeping its kind.
pub fn point_to_surface_space(target: &SnapTarget, t: &Transform) -> SnapTarget {
    SnapTarget {
        point: vector2_to_surface_space(target.point, t),
        ..*target
    }
}

/// Map a guide line to surface space, keeping its label.
pub fn line_to_surface_space(line: &GuideLine, t: &Transform) -> GuideLine {
    GuideLine {
        start: vector2_to_surface_space(line.start, t),
        end: vector2_to_surface_space(line.end, t),
        label: line.label.clone(),
    }
}

/// Map a canvas-space rectangle to the surface-space bounding box of its
/// transformed min and max corners.
pub fn rect_to_surface_space(rect: &Rectangle, t: &Transform) -> Rectangle {
    let min = vector2_to_surface_space(Point::new(rect.x, rect.y), t);
    let max = vector2_to_surface_space(Point::new(rect.x2(), rect.y2()), t);
    Rectangle::from_corners(min, max)
}

/// Map a surface-space point back to canvas space.
pub fn to_canvas_space(p: Point, t: &Transform) -> TransformResult<Point> {
    let inverse = t.invert()?;
    Ok(vector2_to_surface_space(p, &inverse))
}

/// Map a surface-space rectangle back to canvas space (bounding box of corners).
pub fn surface_rect_to_canvas_space(rect: &Rectangle, t: &Transform) -> TransformResult<Rectangle> {
    let inverse = t.invert()?;
    Ok(rect_to_surface_space(rect, &inverse))
}

/// Map a scalar magnitude along one axis.
///
/// The offset is embedded as the point `(offset, 0)` or `(0, offset)` and
/// forward-mapped, so the result includes that axis' translation. Ruler and
/// snap overlays depend on this exact embedding.
pub fn offset_to_surface_space(offset: f64, axis: Axis, t: &Transform) -> f64 {
    match axis {
        Axis::X => vector2_to_surface_space(Point::new(offset, 0.0), t).x,
        Axis::Y => vector2_to_surface_space(Point::new(0.0, offset), t).y,
    }
}

/// Margins around a fitted target, in surface units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    /// Same margin on every side.
    pub const fn uniform(margin: f64) -> Self {
        Self {
            top: margin,
            right: margin,
            bottom: margin,
            left: margin,
        }
    }
}

/// Uniform-scale transform that fits `target` centred inside `viewport`.
///
/// When the viewport minus margins is empty, or the target has zero width or
/// height, the result is a plain translation to the viewport origin.
pub fn transform_to_fit(viewport: &Rectangle, target: &Rectangle, margin: Margin) -> Transform {
    let vw = viewport.width - margin.left - margin.right;
    let vh = viewport.height - margin.top - margin.bottom;
    if vw <= 0.0 || vh <= 0.0 || target.width == 0.0 || target.height == 0.0 {
        return Transform::translate(viewport.x, viewport.y);
    }

    let scale = (vw / target.width).min(vh / target.height);
    let center = target.center();
    let vx = viewport.x + margin.left + vw / 2.0;
    let vy = viewport.y + margin.top + vh / 2.0;

    Transform::new(scale, 0.0, vx - center.x * scale, 0.0, scale, vy - center.y * scale)
}

//! Camera module for pan/zoom transforms.

use crate::rect::Rectangle;
use crate::transform::{
    Margin, Transform, TransformResult, to_canvas_space, transform_to_fit, vector2_to_surface_space,
};
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Zoom level that corresponds to "100%".
pub const BASE_ZOOM: f64 = 1.0;

/// Camera holds the viewport state for the canvas.
///
/// It handles panning (translation) and zooming (scaling), and produces the
/// canvas-to-surface [`Transform`] handed to the rest of the kernel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    /// Current translation offset (pan), in surface units.
    pub offset: Vec2,
    /// Current zoom level.
    pub zoom: f64,
    /// Minimum allowed zoom level
    pub min_zoom: f64,
    /// Maximum allowed zoom level
    pub max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: BASE_ZOOM,
            min_zoom: 0.02,
            max_zoom: 256.0,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load camera state from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Canvas-to-surface transform for the current state.
    pub fn transform(&self) -> Transform {
        Transform::new(self.zoom, 0.0, self.offset.x, 0.0, self.zoom, self.offset.y)
    }

    /// Convert a surface point to canvas coordinates.
    ///
    /// Fails when the zoom is zero.
    pub fn screen_to_world(&self, screen_point: Point) -> TransformResult<Point> {
        to_canvas_space(screen_point, &self.transform())
    }

    /// Convert a canvas point to surface coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        vector2_to_surface_space(world_point, &self.transform())
    }

    /// Pan the camera by a delta in surface coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom the camera, keeping the given surface point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) -> TransformResult<()> {
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return Ok(());
        }

        let world_point = self.screen_to_world(screen_point)?;
        self.zoom = new_zoom;

        // Adjust offset so world_point stays under screen_point
        let new_screen = self.world_to_screen(world_point);
        self.offset += screen_point - new_screen;
        Ok(())
    }

    /// Reset camera to default position and zoom.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = BASE_ZOOM;
    }

    /// Fit the camera to show the given canvas-space bounds.
    pub fn fit_to_bounds(&mut self, bounds: &Rectangle, viewport: Size, padding: f64) {
        let bounds = bounds.normalized();
        if bounds.area() == 0.0 {
            self.reset();
            return;
        }

        // Padding never shrinks the usable area below one unit per axis.
        let padded_width = (viewport.width - padding * 2.0).max(1.0);
        let padded_height = (viewport.height - padding * 2.0).max(1.0);
        let margin_x = (viewport.width - padded_width) / 2.0;
        let margin_y = (viewport.height - padded_height) / 2.0;
        let margin = Margin {
            top: margin_y,
            right: margin_x,
            bottom: margin_y,
            left: margin_x,
        };

        let surface = Rectangle::new(0.0, 0.0, viewport.width, viewport.height);
        let fitted = transform_to_fit(&surface, &bounds, margin);
        self.zoom = fitted.a.clamp(self.min_zoom, self.max_zoom);
        let center = bounds.center();
        self.offset = Vec2::new(
            viewport.width / 2.0 - center.x * self.zoom,
            viewport.height / 2.0 - center.y * self.zoom,
        );
    }
}

//! CanvasGeo Core Library
//!
//! Platform-agnostic geometry kernel for an infinite-canvas editor: the
//! canvas/surface affine bridge, bounds trees with deepest-hit and marquee
//! queries, free-space placement for new content, and procedural brush stamps.

pub mod area;
pub mod camera;
pub mod geo_tree;
pub mod guide;
pub mod hittest;
pub mod packing;
pub mod rect;
pub mod texture;
pub mod transform;

pub use area::{AreaMatch, AreaQuery, target_of_area};
pub use camera::Camera;
pub use geo_tree::{GeoNode, GeoTree, GeoTreeBuilder, GeoTreeError};
pub use guide::{GuideLine, SnapTarget, SnapTargetKind, snap_targets_from_bounds, snap_to_targets};
pub use hittest::{Envelope, HitMode, get_deepest, get_deepest_path};
pub use packing::{PLACEMENT_ANCHORS_PADDING, fit, walk_to_fit};
pub use rect::Rectangle;
pub use texture::{Bitmap, BrushTexture, TextureError, grain, solid_square, spray};
pub use transform::{
    Axis, Margin, Transform, TransformError, line_to_surface_space, offset_to_surface_space,
    point_to_surface_space, rect_to_surface_space, surface_rect_to_canvas_space,
    to_canvas_space, transform_to_fit, vector2_to_surface_space,
};

pub use kurbo::{Point, Size, Vec2};

//! Geometry primitives shared by the path model, flattener and rasterizer.
//!
//! This crate has no notion of paths, shapes or pixels — it only provides
//! vectors, angles, rectangles and affine transforms.

mod angle;
mod rect;
mod transform;
mod vec2d;

pub use angle::Angle;
pub use rect::Rect;
pub use transform::AffineTransform;
pub use vec2d::Vec2D;

/// Convenience constructor mirroring the free function used throughout the
/// path-building API (`point(x, y)` reads better than `Vec2D::new(x, y)` in
/// long builder chains).
#[inline]
#[must_use]
pub const fn point(x: f32, y: f32) -> Vec2D {
    Vec2D::new(x, y)
}

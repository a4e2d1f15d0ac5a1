//! Core 2D vector graphics rasterization: path construction and parsing,
//! adaptive flattening, stroke expansion, scanline partitioning, coverage
//! computation and the fill/composite loop.
//!
//! Image and mask buffer types, paint sources and blend-mode dispatch are
//! implemented here as minimal reference types rather than treated as
//! fully opaque collaborators, so the crate is independently testable; see
//! `DESIGN.md` for the rationale.

mod bounds;
mod coverage;
mod error;
mod fill;
mod flatten;
mod hittest;
mod image;
mod mask;
mod paint;
mod partition;
mod path;
mod segment;
mod shape;
mod stroke;
mod winding;

pub use error::{Error, Result};
pub use image::Image;
pub use mask::Mask;
pub use paint::{BlendMode, Paint};
pub use path::{parse_path, CommandKind, Path, PathCommand};
pub use shape::Shape;
pub use stroke::{LineCap, LineJoin, StrokeStyle};
pub use winding::FillRule;

use math::{AffineTransform, Rect};

/// Fill `path` into `dest` with `paint` under `winding_rule`.
pub fn fill_path(
    dest: &mut Image,
    path: &Path,
    paint: &Paint,
    transform: AffineTransform,
    winding_rule: FillRule,
) -> Result<()> {
    let shapes = flatten_and_transform(path, transform, true);
    fill::fill_shapes(dest, &shapes, paint, winding_rule)
}

/// Stroke `path` into `dest` with `paint` under `style`.
pub fn stroke_path(
    dest: &mut Image,
    path: &Path,
    paint: &Paint,
    transform: AffineTransform,
    style: &stroke::StrokeStyle,
) -> Result<()> {
    let shapes = flatten_and_transform(path, transform, false);
    let outline = stroke::stroke_shapes(&shapes, style, transform.max_scale());
    fill::fill_shapes(dest, &outline, paint, FillRule::NonZero)
}

/// Fill `path` directly into an alpha `mask` under `blend_mode`.
pub fn fill_path_mask(
    mask: &mut Mask,
    path: &Path,
    transform: AffineTransform,
    winding_rule: FillRule,
    blend_mode: BlendMode,
) -> Result<()> {
    let shapes = flatten_and_transform(path, transform, true);
    fill::fill_shapes_mask(mask, &shapes, winding_rule, blend_mode)
}

/// Stroke `path` directly into an alpha `mask` under `blend_mode`.
pub fn stroke_path_mask(
    mask: &mut Mask,
    path: &Path,
    transform: AffineTransform,
    style: &stroke::StrokeStyle,
    blend_mode: BlendMode,
) -> Result<()> {
    let shapes = flatten_and_transform(path, transform, false);
    let outline = stroke::stroke_shapes(&shapes, style, transform.max_scale());
    fill::fill_shapes_mask(mask, &outline, FillRule::NonZero, blend_mode)
}

/// Rasterize `path` into a freshly allocated `width`x`height` alpha mask.
#[must_use]
pub fn fill_mask(path: &Path, width: usize, height: usize, winding_rule: FillRule) -> Mask {
    let mut mask = Mask::new(width, height);
    let shapes = flatten_and_transform(path, AffineTransform::identity(), true);
    let _ = fill::fill_shapes_mask(&mut mask, &shapes, winding_rule, BlendMode::Normal);
    mask
}

/// Rasterize `path` filled with a solid `color` into a freshly allocated
/// `width`x`height` image.
#[must_use]
pub fn fill_image(
    path: &Path,
    width: usize,
    height: usize,
    color: [u8; 4],
    winding_rule: FillRule,
) -> Image {
    let mut image = Image::new(width, height);
    let shapes = flatten_and_transform(path, AffineTransform::identity(), true);
    let paint = Paint::solid(color);
    let _ = fill::fill_shapes(&mut image, &shapes, &paint, winding_rule);
    image
}

/// The axis-aligned bounding rectangle of `path` after `transform`.
#[must_use]
pub fn compute_bounds(path: &Path, transform: AffineTransform) -> Rect {
    let shapes = flatten_and_transform(path, transform, true);
    bounds::compute_bounds(&shapes)
}

/// True if a fill of `path` under `winding_rule` covers `point`.
#[must_use]
pub fn fill_overlaps(
    path: &Path,
    point: math::Vec2D,
    transform: AffineTransform,
    winding_rule: FillRule,
) -> bool {
    let shapes = flatten_and_transform(path, transform, true);
    hittest::overlaps(&shapes, point, winding_rule)
}

/// True if a stroke of `path` under `style` covers `point`.
#[must_use]
pub fn stroke_overlaps(
    path: &Path,
    point: math::Vec2D,
    transform: AffineTransform,
    style: &stroke::StrokeStyle,
) -> bool {
    let shapes = flatten_and_transform(path, transform, false);
    let outline = stroke::stroke_shapes(&shapes, style, transform.max_scale());
    hittest::overlaps(&outline, point, FillRule::NonZero)
}

/// Flatten `path` in its own local space, then map every resulting point
/// through `transform`. `close_subpaths` is true for fills (an open
/// sub-path still bounds an interior) and false for strokes (open
/// sub-paths must keep their caps).
fn flatten_and_transform(path: &Path, transform: AffineTransform, close_subpaths: bool) -> Vec<Shape> {
    let pixel_scale = transform.max_scale();
    if pixel_scale < f32::EPSILON {
        log::warn!("degenerate transform (scale ~= 0); producing an empty fill");
        return Vec::new();
    }
    flatten::flatten(path.commands(), close_subpaths, pixel_scale)
        .into_iter()
        .map(|shape| shape.transformed(transform))
        .collect()
}

//! The fill/composite loop: partitions segments, computes coverage per
//! scanline, and blends into a destination [`Image`] or [`Mask`].

use crate::bounds::compute_bounds;
use crate::coverage::paint_row;
use crate::error::Result;
use crate::image::Image;
use crate::mask::Mask;
use crate::paint::{BlendMode, Paint};
use crate::partition::partition;
use crate::segment::segments_from_shapes;
use crate::shape::Shape;
use crate::winding::FillRule;

const BLOCK: usize = 16;

/// Fill `shapes` into `dest` under `paint`, using `paint`'s own blend mode
/// and opacity.
pub fn fill_shapes(dest: &mut Image, shapes: &[Shape], paint: &Paint, winding_rule: FillRule) -> Result<()> {
    let solid = paint.as_solid()?;
    let segments = segments_from_shapes(shapes);
    if segments.is_empty() {
        return Ok(());
    }
    let bounds = compute_bounds(shapes).snap_to_pixels().clip_to_dimensions(dest.width(), dest.height());
    if bounds.is_empty() {
        return Ok(());
    }

    let partitioning = partition(&segments);
    for y in bounds.top_left.y..bounds.bottom_right.y {
        let row = paint_row(&partitioning, y, dest.width(), winding_rule);
        composite_image_row(
            dest,
            y,
            &row,
            solid.color,
            solid.opacity,
            solid.blend_mode,
            bounds.top_left.x,
            bounds.bottom_right.x,
        );
    }
    Ok(())
}

/// Fill `shapes` directly into an alpha `mask` under `blend_mode`. Under
/// [`BlendMode::Mask`], pixels outside the fill window are cleared to zero
/// so the mask holds globally, not just where geometry was touched.
pub fn fill_shapes_mask(mask: &mut Mask, shapes: &[Shape], winding_rule: FillRule, blend_mode: BlendMode) -> Result<()> {
    let segments = segments_from_shapes(shapes);
    let bounds = compute_bounds(shapes).snap_to_pixels().clip_to_dimensions(mask.width(), mask.height());

    if segments.is_empty() || bounds.is_empty() {
        if blend_mode == BlendMode::Mask {
            mask.data_mut().fill(0);
        }
        return Ok(());
    }

    let partitioning = partition(&segments);
    for y in 0..mask.height() {
        if y >= bounds.top_left.y && y < bounds.bottom_right.y {
            let row = paint_row(&partitioning, y, mask.width(), winding_rule);
            composite_mask_row(mask, y, &row, blend_mode, bounds.top_left.x, bounds.bottom_right.x);
        } else if blend_mode == BlendMode::Mask {
            unsafe { mask.fill_unchecked(y, 0, mask.width(), 0) };
        }
    }
    Ok(())
}

fn composite_image_row(
    dest: &mut Image,
    y: usize,
    coverage: &[u8],
    color: [u8; 4],
    opacity: f32,
    blend_mode: BlendMode,
    x0: usize,
    x1: usize,
) {
    let opaque_source = color[3] == 255 && opacity >= 1.0;
    let blend_fn = blend_mode.blend_fn();

    let mut block_start = x0;
    while block_start < x1 {
        let block_end = (block_start + BLOCK).min(x1);
        let block = &coverage[block_start..block_end];

        if block.iter().all(|&c| c == 0) {
            if blend_mode == BlendMode::Mask {
                unsafe { dest.fill_unchecked(y, block_start, block_end, [0, 0, 0, 0]) };
            }
        } else if block.iter().all(|&c| c == 255) && opaque_source && blend_mode == BlendMode::Normal {
            unsafe { dest.fill_unchecked(y, block_start, block_end, color) };
        } else {
            for (offset, &cov) in block.iter().enumerate() {
                if cov == 0 {
                    continue;
                }
                let x = block_start + offset;
                let alpha = (cov as f32 / 255.) * opacity;
                let backdrop = dest.get_pixel(x, y);
                let mut src = color;
                if blend_mode != BlendMode::Normal {
                    for channel in 0..3 {
                        src[channel] = blend_fn(color[channel], backdrop[channel]);
                    }
                }
                let mut out = [0u8; 4];
                for channel in 0..4 {
                    out[channel] =
                        (src[channel] as f32 * alpha + backdrop[channel] as f32 * (1. - alpha)).round() as u8;
                }
                dest.set_pixel(x, y, out);
            }
        }
        block_start = block_end;
    }
}

fn composite_mask_row(mask: &mut Mask, y: usize, coverage: &[u8], blend_mode: BlendMode, x0: usize, x1: usize) {
    let blend_fn = blend_mode.blend_fn();

    let mut block_start = x0;
    while block_start < x1 {
        let block_end = (block_start + BLOCK).min(x1);
        let block = &coverage[block_start..block_end];

        if block.iter().all(|&c| c == 0) {
            if blend_mode == BlendMode::Mask {
                unsafe { mask.fill_unchecked(y, block_start, block_end, 0) };
            }
        } else if block.iter().all(|&c| c == 255) && blend_mode == BlendMode::Normal {
            unsafe { mask.fill_unchecked(y, block_start, block_end, 255) };
        } else {
            for (offset, &cov) in block.iter().enumerate() {
                let x = block_start + offset;
                let value = if blend_mode == BlendMode::Mask {
                    cov
                } else {
                    blend_fn(cov, mask.get_pixel(x, y))
                };
                mask.set_pixel(x, y, value);
            }
        }
        block_start = block_end;
    }

    if blend_mode == BlendMode::Mask {
        if x0 > 0 {
            unsafe { mask.fill_unchecked(y, 0, x0, 0) };
        }
        if x1 < mask.width() {
            unsafe { mask.fill_unchecked(y, x1, mask.width(), 0) };
        }
    }
}

//! The concrete end-to-end scenarios enumerated alongside the property
//! tests: one fixed input/output pair per row, rather than a generated
//! invariant.

use math::{point, AffineTransform};
use raster::{fill_image, fill_mask, parse_path, stroke_path_mask, CommandKind, FillRule, Image, Mask, Path};

#[test]
fn filling_a_rect_yields_exact_pixels() {
    let path = Path::rect(10., 10., 20., 20.);
    let image = fill_image(&path, 40, 40, [255, 0, 0, 255], FillRule::NonZero);

    let mut covered = 0;
    for y in 0..40 {
        for x in 0..40 {
            let pixel = image.get_pixel(x, y);
            if (10..30).contains(&x) && (10..30).contains(&y) {
                assert_eq!(pixel, [255, 0, 0, 255], "expected fill at ({x}, {y})");
                covered += 1;
            } else {
                assert_eq!(pixel, [0, 0, 0, 0], "expected no fill at ({x}, {y})");
            }
        }
    }
    assert_eq!(covered, 400);
}

#[test]
fn parsed_square_fills_a_ten_by_ten_block() {
    let path = parse_path("M0 0 L10 0 L10 10 L0 10 Z").unwrap();
    let mask = fill_mask(&path, 16, 16, FillRule::NonZero);

    for y in 0..16 {
        for x in 0..16 {
            let expected = if x < 10 && y < 10 { 255 } else { 0 };
            assert_eq!(mask.get_pixel(x, y), expected, "mismatch at ({x}, {y})");
        }
    }
}

#[test]
fn collinear_arc_to_degrades_to_straight_lines() {
    let mut path = Path::new();
    path.move_to(point(0., 0.));
    path.arc_to(point(100., 0.), point(50., 0.), 50.).unwrap();

    for command in path.commands() {
        assert_ne!(command.kind(), CommandKind::ArcTo);
        assert_ne!(command.kind(), CommandKind::RArcTo);
    }
}

#[test]
fn parsing_a_relative_arc_yields_one_rarc_command() {
    let path = parse_path("M0 0 a 5 5 0 0 1 10 0").unwrap();
    let arcs: Vec<_> = path
        .commands()
        .iter()
        .filter(|c| c.kind() == CommandKind::RArcTo)
        .collect();
    assert_eq!(arcs.len(), 1);
    assert_eq!(arcs[0].values(), &[5.0, 5.0, 0.0, 0.0, 1.0, 10.0, 0.0]);
}

#[test]
fn mask_blend_on_open_path_clears_everything_outside_the_fill() {
    let mut mask = Mask::new(16, 16);
    for x in 0..16 {
        for y in 0..16 {
            mask.set_pixel(x, y, 200);
        }
    }

    let mut path = Path::new();
    path.move_to(point(2., 2.));
    path.line_to(point(10., 2.));
    path.line_to(point(10., 10.));

    raster::fill_path_mask(
        &mut mask,
        &path,
        AffineTransform::identity(),
        FillRule::NonZero,
        raster::BlendMode::Mask,
    )
    .unwrap();

    for x in 0..16 {
        for y in 0..16 {
            if !(2..10).contains(&x) || !(2..10).contains(&y) {
                assert_eq!(mask.get_pixel(x, y), 0, "expected clear at ({x}, {y})");
            }
        }
    }
}

#[test]
fn round_cap_stroke_is_a_fully_opaque_capsule_interior() {
    let mut path = Path::new();
    path.move_to(point(0., 0.));
    path.line_to(point(10., 0.));

    let style = raster::StrokeStyle {
        width: 2.0,
        cap: raster::LineCap::Round,
        ..Default::default()
    };

    let mut mask = Mask::new(14, 4);
    stroke_path_mask(
        &mut mask,
        &path,
        AffineTransform::translate(point(2., 2.)),
        &style,
        raster::BlendMode::Normal,
    )
    .unwrap();

    // The strict interior of the capsule, away from the AA'd cap curvature.
    let mut total = 0u32;
    let mut count = 0u32;
    for x in 4..10 {
        let value = mask.get_pixel(x, 2);
        total += value as u32;
        count += 1;
    }
    assert_eq!(total / count, 255);
}

/// `Image` isn't itself under test above without a sanity check that a
/// freshly constructed one starts fully transparent.
#[test]
fn fresh_image_starts_transparent() {
    let image = Image::new(4, 4);
    assert_eq!(image.get_pixel(0, 0), [0, 0, 0, 0]);
}

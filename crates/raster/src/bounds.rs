//! Axis-aligned bounding box of a set of flattened shapes.

use crate::shape::Shape;
use math::Rect;

/// The bounding rectangle of every point in `shapes`.
///
/// If any coordinate is NaN, this silently returns [`Rect::ZERO`] rather
/// than propagating an error: an empty bounds is the agreed signal for "no
/// usable geometry" (open question resolved in `DESIGN.md`).
#[must_use]
pub fn compute_bounds(shapes: &[Shape]) -> Rect {
    let mut points = shapes.iter().flat_map(|s| s.points().iter().copied());
    let Some(first) = points.next() else {
        return Rect::ZERO;
    };
    if first.x.is_nan() || first.y.is_nan() {
        return Rect::ZERO;
    }

    let mut bounds = Rect {
        top_left: first,
        bottom_right: first,
    };
    for p in points {
        if p.x.is_nan() || p.y.is_nan() {
            return Rect::ZERO;
        }
        bounds.grow_to_contain_point(p);
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use math::point;

    #[test]
    fn bounds_of_empty_input_is_zero_rect() {
        assert_eq!(compute_bounds(&[]), Rect::ZERO);
    }

    #[test]
    fn bounds_spans_all_points() {
        let shape = Shape::new(vec![point(10., 10.), point(30., 10.), point(30., 30.), point(10., 30.)]);
        let bounds = compute_bounds(&[shape]);
        assert_eq!(bounds.top_left, point(10., 10.));
        assert_eq!(bounds.bottom_right, point(30., 30.));
    }

    #[test]
    fn bounds_with_nan_point_is_zero_rect() {
        let shape = Shape::new(vec![point(0., 0.), point(f32::NAN, 1.)]);
        assert_eq!(compute_bounds(&[shape]), Rect::ZERO);
    }
}

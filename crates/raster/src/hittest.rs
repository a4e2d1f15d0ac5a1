//! Point-in-path queries via horizontal ray casting.

use crate::shape::Shape;
use crate::winding::FillRule;
use math::Vec2D;

/// True if a fill of `shapes` under `winding_rule` covers `point`.
///
/// Casts a ray from `(-inf, point.y)` to `point`, sums the winding of every
/// edge it crosses, and applies `winding_rule` to the total.
#[must_use]
pub fn overlaps(shapes: &[Shape], point: Vec2D, winding_rule: FillRule) -> bool {
    let mut winding = 0;
    for shape in shapes {
        for (from, to) in shape.edges() {
            if from.y == to.y {
                continue;
            }
            let (lower, upper, sign) = if from.y < to.y { (from, to, 1) } else { (to, from, -1) };
            if point.y < lower.y || point.y >= upper.y {
                continue;
            }
            let t = (point.y - lower.y) / (upper.y - lower.y);
            let x = lower.x + t * (upper.x - lower.x);
            if x < point.x {
                winding += sign;
            }
        }
    }
    winding_rule.should_fill(winding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use math::point;

    fn unit_square() -> Shape {
        Shape::new(vec![
            point(0., 0.),
            point(10., 0.),
            point(10., 10.),
            point(0., 10.),
            point(0., 0.),
        ])
    }

    #[test]
    fn point_inside_square_overlaps() {
        assert!(overlaps(&[unit_square()], point(5., 5.), FillRule::NonZero));
    }

    #[test]
    fn point_outside_square_does_not_overlap() {
        assert!(!overlaps(&[unit_square()], point(20., 20.), FillRule::NonZero));
    }

    #[test]
    fn point_on_boundary_y_is_consistent_with_half_open_edges() {
        assert!(overlaps(&[unit_square()], point(5., 0.), FillRule::NonZero));
        assert!(!overlaps(&[unit_square()], point(5., 10.), FillRule::NonZero));
    }
}

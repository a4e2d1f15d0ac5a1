//! Oriented edge segments, the bridge between flattened/stroked shapes and
//! the scanline partitioner.

use crate::shape::Shape;
use math::Vec2D;

/// An oriented edge `(at, to)` with `at.y <= to.y`, plus the winding sign
/// of the original (pre-reorder) direction: `+1` if it pointed downward,
/// `-1` if upward. Horizontal edges never produce a [`Segment`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub at: Vec2D,
    pub to: Vec2D,
    pub winding: i32,
}

impl Segment {
    /// Build a segment from a shape edge, discarding horizontal edges.
    #[must_use]
    pub fn from_edge(from: Vec2D, to: Vec2D) -> Option<Self> {
        if from.y == to.y {
            return None;
        }
        if from.y < to.y {
            Some(Self {
                at: from,
                to,
                winding: 1,
            })
        } else {
            Some(Self {
                at: to,
                to: from,
                winding: -1,
            })
        }
    }

    #[must_use]
    pub fn is_vertical(&self) -> bool {
        self.at.x == self.to.x
    }
}

/// Extract every non-horizontal, zero-length-filtered edge segment from
/// `shapes`.
#[must_use]
pub fn segments_from_shapes(shapes: &[Shape]) -> Vec<Segment> {
    shapes
        .iter()
        .flat_map(Shape::edges)
        .filter_map(|(a, b)| Segment::from_edge(a, b))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use math::point;

    #[test]
    fn horizontal_edges_produce_no_segment() {
        assert!(Segment::from_edge(point(0., 5.), point(10., 5.)).is_none());
    }

    #[test]
    fn downward_edge_has_positive_winding() {
        let s = Segment::from_edge(point(0., 0.), point(5., 10.)).unwrap();
        assert_eq!(s.winding, 1);
        assert_eq!(s.at, point(0., 0.));
        assert_eq!(s.to, point(5., 10.));
    }

    #[test]
    fn upward_edge_is_reordered_with_negative_winding() {
        let s = Segment::from_edge(point(5., 10.), point(0., 0.)).unwrap();
        assert_eq!(s.winding, -1);
        assert_eq!(s.at, point(0., 0.));
        assert_eq!(s.to, point(5., 10.));
    }
}

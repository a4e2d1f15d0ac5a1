//! [`Shape`]: the polyline output of the flattener, and the sole input to
//! the stroker and segment partitioner.

use math::{AffineTransform, Vec2D};

/// An ordered, immutable polyline. Closed when its first and last points
/// coincide. Produced only by the flattener; never self-referential.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Shape(Vec<Vec2D>);

impl Shape {
    #[must_use]
    pub fn new(points: Vec<Vec2D>) -> Self {
        Self(points)
    }

    #[must_use]
    pub fn points(&self) -> &[Vec2D] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.len() < 2
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        match (self.0.first(), self.0.last()) {
            (Some(first), Some(last)) => first.is_close_to(*last, f32::EPSILON),
            _ => false,
        }
    }

    /// The edges of this polyline as consecutive point pairs.
    pub fn edges(&self) -> impl Iterator<Item = (Vec2D, Vec2D)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }

    /// Map every point through `mat`, producing a shape in the
    /// transformed coordinate space.
    #[must_use]
    pub fn transformed(&self, mat: AffineTransform) -> Self {
        Self(self.0.iter().map(|p| mat.apply_to(*p)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use math::point;

    #[test]
    fn closed_shape_has_equal_endpoints() {
        let shape = Shape::new(vec![point(0., 0.), point(1., 0.), point(0., 0.)]);
        assert!(shape.is_closed());
    }

    #[test]
    fn open_shape_is_not_closed() {
        let shape = Shape::new(vec![point(0., 0.), point(1., 0.)]);
        assert!(!shape.is_closed());
    }

    #[test]
    fn edges_walks_consecutive_pairs() {
        let shape = Shape::new(vec![point(0., 0.), point(1., 0.), point(1., 1.)]);
        let edges: Vec<_> = shape.edges().collect();
        assert_eq!(edges, vec![(point(0., 0.), point(1., 0.)), (point(1., 0.), point(1., 1.))]);
    }
}

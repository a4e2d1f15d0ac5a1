use crate::{Angle, Vec2D};

/// A 2-dimensional affine transformation.
///
/// Each [AffineTransform] is a `3x3` matrix (with an implicit `[0, 0, 1]`
/// bottom row) that transforms a 2-dimensional vector `x`, `y`.
/// See [Wikipedia](https://en.wikipedia.org/wiki/Affine_transformation) for more information.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineTransform([[f32; 3]; 2]);

impl AffineTransform {
    #[inline]
    #[must_use]
    pub const fn identity() -> Self {
        Self([[1., 0., 0.], [0., 1., 0.]])
    }

    /// Create transformation that shifts every point by a fixed offset.
    #[inline]
    #[must_use]
    pub const fn translate(translate_by: Vec2D) -> Self {
        Self([[1., 0., translate_by.x], [0., 1., translate_by.y]])
    }

    /// Create a transformation that scales points by fixed values along the X and Y axis.
    #[inline]
    #[must_use]
    pub const fn scale(x_scale: f32, y_scale: f32) -> Self {
        Self([[x_scale, 0., 0.], [0., y_scale, 0.]])
    }

    /// Create a transformation that rotates points counterclockwise around the origin.
    #[inline]
    #[must_use]
    pub fn rotate(angle: Angle) -> Self {
        let radians = angle.radians();
        Self([
            [radians.cos(), -radians.sin(), 0.],
            [radians.sin(), radians.cos(), 0.],
        ])
    }

    #[inline]
    #[must_use]
    pub const fn from_row_major(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self([[a, b, c], [d, e, f]])
    }

    /// Apply this transform to a point, including its translation component.
    #[inline]
    #[must_use]
    pub fn apply_to(&self, point: Vec2D) -> Vec2D {
        Vec2D {
            x: point
                .x
                .mul_add(self.0[0][0], point.y.mul_add(self.0[0][1], self.0[0][2])),
            y: point
                .x
                .mul_add(self.0[1][0], point.y.mul_add(self.0[1][1], self.0[1][2])),
        }
    }

    /// Apply only the linear (rotation/scale/skew) part of this transform,
    /// dropping translation. Used for relative path commands, whose deltas
    /// must not be shifted by the transform's translation component.
    #[inline]
    #[must_use]
    pub fn apply_to_vector(&self, v: Vec2D) -> Vec2D {
        Vec2D {
            x: v.x.mul_add(self.0[0][0], v.y * self.0[0][1]),
            y: v.x.mul_add(self.0[1][0], v.y * self.0[1][1]),
        }
    }

    /// Combine two transforms together into a single one. `self.chain(other)`
    /// applies `self` first, then `other`.
    #[inline]
    #[must_use]
    pub fn chain(&self, other: Self) -> Self {
        let a = other.0[0][0].mul_add(self.0[0][0], other.0[0][1] * self.0[1][0]);
        let b = other.0[0][0].mul_add(self.0[0][1], other.0[0][1] * self.0[1][1]);
        let c = other.0[0][0].mul_add(
            self.0[0][2],
            other.0[0][1].mul_add(self.0[1][2], other.0[0][2]),
        );

        let d = other.0[1][0].mul_add(self.0[0][0], other.0[1][1] * self.0[1][0]);
        let e = other.0[1][0].mul_add(self.0[0][1], other.0[1][1] * self.0[1][1]);
        let f = other.0[1][0].mul_add(
            self.0[0][2],
            other.0[1][1].mul_add(self.0[1][2], other.0[1][2]),
        );

        Self([[a, b, c], [d, e, f]])
    }

    /// The determinant of the linear part of the transform.
    #[inline]
    #[must_use]
    pub fn determinant(&self) -> f32 {
        self.0[0][0] * self.0[1][1] - self.0[0][1] * self.0[1][0]
    }

    /// The largest singular value of the linear part of this transform.
    ///
    /// Used by the flattener as `pixelScale`: the factor by which a unit
    /// length in path space can grow once this transform is applied, which
    /// bounds how finely curves must be subdivided to stay within the pixel
    /// error margin.
    #[must_use]
    pub fn max_scale(&self) -> f32 {
        let [[a, b, _], [c, d, _]] = self.0;
        // Singular values of a 2x2 matrix via the eigenvalues of `M^T * M`.
        let e = a * a + c * c;
        let f = a * b + c * d;
        let g = b * b + d * d;
        let trace = e + g;
        let det = (e * g - f * f).max(0.);
        let discriminant = (trace * trace - 4. * det).max(0.).sqrt();
        ((trace + discriminant) / 2.).max(0.).sqrt()
    }

    /// Only the diagonal (axis) scale factors, used to scale arc radii
    /// without rotating them per `spec.md` §4.1.
    #[must_use]
    pub fn axis_scale(&self) -> Vec2D {
        Vec2D::new(self.0[0][0], self.0[1][1])
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::AffineTransform;
    use crate::{Angle, Vec2D};

    #[test]
    fn test_identity() {
        let transform = AffineTransform::identity();
        let point = Vec2D::new(2., 3.);
        assert_eq!(transform.apply_to(point), point);
    }

    #[test]
    fn test_translate() {
        let transform = AffineTransform::translate(Vec2D::new(1., 2.));
        let point = Vec2D::new(4., -3.);
        assert_eq!(transform.apply_to(point), Vec2D::new(5., -1.));
    }

    #[test]
    fn test_scale() {
        let transform = AffineTransform::scale(2., -1.);
        let point = Vec2D::new(2., 2.);
        assert_eq!(transform.apply_to(point), Vec2D::new(4., -2.));
    }

    #[test]
    fn test_chain() {
        let translate = AffineTransform::translate(Vec2D::new(1., 2.));
        let scale = AffineTransform::scale(2., 3.);
        let chained = translate.chain(scale);
        let p = Vec2D::new(-2., 2.);
        assert_eq!(chained.apply_to(p), Vec2D::new(-2., 12.));
    }

    #[test]
    fn apply_to_vector_ignores_translation() {
        let transform = AffineTransform::translate(Vec2D::new(100., 100.));
        let v = Vec2D::new(3., 4.);
        assert_eq!(transform.apply_to_vector(v), v);
    }

    #[test]
    fn max_scale_of_uniform_scale() {
        let transform = AffineTransform::scale(3., 3.);
        assert!((transform.max_scale() - 3.).abs() < 1e-5);
    }

    #[test]
    fn max_scale_of_rotation_is_one() {
        let transform = AffineTransform::rotate(Angle::from_radians(0.7));
        assert!((transform.max_scale() - 1.).abs() < 1e-4);
    }
}

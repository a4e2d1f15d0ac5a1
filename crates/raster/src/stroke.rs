//! Expands flattened shapes into the filled outline a stroke paints.

use crate::shape::Shape;
use math::Vec2D;

const PIXEL_ERROR_MARGIN: f32 = 0.2;

/// How a sub-path's open ends are finished.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// How two consecutive edges of a sub-path are connected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Stroke parameters. `miter_limit` is a ratio (as in SVG/Canvas), converted
/// internally to an angle via `2*asin(1/limit)`.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    pub width: f32,
    pub cap: LineCap,
    pub join: LineJoin,
    pub miter_limit: f32,
    pub dashes: Vec<f32>,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            cap: LineCap::default(),
            join: LineJoin::default(),
            miter_limit: 4.0,
            dashes: Vec::new(),
        }
    }
}

/// Expand every edge, join and cap of `shapes` into the closed polygons a
/// `NonZero` fill of the result paints as the stroke.
#[must_use]
pub fn stroke_shapes(shapes: &[Shape], style: &StrokeStyle, pixel_scale: f32) -> Vec<Shape> {
    let half_width = style.width.max(0.) / 2.;
    if half_width <= 0. {
        return Vec::new();
    }
    let dashes = normalize_dashes(&style.dashes);

    let mut out = Vec::new();
    for shape in shapes {
        stroke_one(shape, style, &dashes, pixel_scale, &mut out);
    }
    out
}

fn stroke_one(shape: &Shape, style: &StrokeStyle, dashes: &[f32], pixel_scale: f32, out: &mut Vec<Shape>) {
    let points = shape.points();
    if points.len() < 2 {
        return;
    }
    let half_width = style.width.max(0.) / 2.;
    let closed = shape.is_closed();
    let vertex_count = if closed { points.len() - 1 } else { points.len() };

    if dashes.is_empty() {
        for i in 0..points.len() - 1 {
            let (a, b) = (points[i], points[i + 1]);
            if a.is_close_to(b, f32::EPSILON) {
                continue;
            }
            out.push(rectangle_shape(a, b, half_width));
        }

        let joint_range: Box<dyn Iterator<Item = usize>> =
            if closed { Box::new(0..vertex_count) } else { Box::new(1..vertex_count.saturating_sub(1)) };
        for i in joint_range {
            let prev = points[(i + vertex_count - 1) % vertex_count];
            let vertex = points[i % vertex_count];
            let next = points[(i + 1) % vertex_count];
            if let Some(join) = join_shape(prev, vertex, next, half_width, style, pixel_scale) {
                out.push(join);
            }
        }

        if !closed {
            let start_dir = (points[1] - points[0]).normalized();
            if let Some(cap) = cap_shape(points[0], -start_dir, half_width, style.cap, pixel_scale) {
                out.push(cap);
            }
            let last = points.len() - 1;
            let end_dir = (points[last] - points[last - 1]).normalized();
            if let Some(cap) = cap_shape(points[last], end_dir, half_width, style.cap, pixel_scale) {
                out.push(cap);
            }
        }
    } else {
        let mut dash_state = DashState::new(dashes);
        for i in 0..points.len() - 1 {
            let (a, b) = (points[i], points[i + 1]);
            if a.is_close_to(b, f32::EPSILON) {
                continue;
            }
            for (start, end, on) in dash_state.spans_for_edge(a, b) {
                if !on {
                    continue;
                }
                out.push(rectangle_shape(start, end, half_width));
                let dir = (end - start).normalized();
                if let Some(cap) = cap_shape(start, -dir, half_width, style.cap, pixel_scale) {
                    out.push(cap);
                }
                if let Some(cap) = cap_shape(end, dir, half_width, style.cap, pixel_scale) {
                    out.push(cap);
                }
            }
        }
    }
}

/// A rectangle of `width = 2 * half_width` spanning `a` to `b`, aligned to
/// the edge's normal.
fn rectangle_shape(a: Vec2D, b: Vec2D, half_width: f32) -> Shape {
    let normal = (b - a).normalized().perpendicular() * half_width;
    Shape::new(vec![a + normal, b + normal, b - normal, a - normal, a + normal])
}

fn cap_shape(vertex: Vec2D, outward: Vec2D, half_width: f32, cap: LineCap, pixel_scale: f32) -> Option<Shape> {
    match cap {
        LineCap::Butt => None,
        LineCap::Round => Some(circle_shape(vertex, half_width, pixel_scale)),
        LineCap::Square => {
            let normal = outward.perpendicular() * half_width;
            let extend = outward * half_width;
            let p0 = vertex + normal;
            let p1 = p0 + extend;
            let p2 = vertex - normal + extend;
            let p3 = vertex - normal;
            Some(Shape::new(vec![p0, p1, p2, p3, p0]))
        },
    }
}

fn join_shape(prev: Vec2D, vertex: Vec2D, next: Vec2D, half_width: f32, style: &StrokeStyle, pixel_scale: f32) -> Option<Shape> {
    let prev_dir = (vertex - prev).normalized();
    let next_dir = (next - vertex).normalized();
    if prev_dir.is_origin() || next_dir.is_origin() {
        return None;
    }

    match style.join {
        LineJoin::Round => Some(circle_shape(vertex, half_width, pixel_scale)),
        _ => {
            let turn = prev_dir.cross_product(next_dir);
            let side = if turn >= 0. { 1.0 } else { -1.0 };
            let p0 = vertex + prev_dir.perpendicular() * (half_width * side);
            let p1 = vertex + next_dir.perpendicular() * (half_width * side);

            if p0.is_close_to(p1, PIXEL_ERROR_MARGIN / pixel_scale) {
                return None;
            }

            if style.join == LineJoin::Miter {
                let bend_angle = prev_dir.cross_product(next_dir).atan2(prev_dir.dot(next_dir)).abs();
                let limit = (1.0 / style.miter_limit.max(1.0)).asin() * 2.0;
                if bend_angle > limit {
                    if let Some(apex) = line_intersect(p0, prev_dir, p1, next_dir) {
                        return Some(Shape::new(vec![p0, apex, p1, vertex, p0]));
                    }
                }
            }
            Some(Shape::new(vec![p0, p1, vertex, p0]))
        },
    }
}

fn line_intersect(p0: Vec2D, d0: Vec2D, p1: Vec2D, d1: Vec2D) -> Option<Vec2D> {
    let denom = d0.cross_product(d1);
    if denom.abs() < f32::EPSILON {
        return None;
    }
    let t = (p1 - p0).cross_product(d1) / denom;
    Some(p0 + d0 * t)
}

fn circle_shape(center: Vec2D, radius: f32, pixel_scale: f32) -> Shape {
    let segments = ((radius * pixel_scale).sqrt() * 8.).clamp(8., 64.) as usize;
    let mut points = Vec::with_capacity(segments + 1);
    for i in 0..=segments {
        let theta = (i as f32 / segments as f32) * std::f32::consts::TAU;
        points.push(center + Vec2D::new(theta.cos(), theta.sin()) * radius);
    }
    Shape::new(points)
}

/// If `dashes` has an odd length, concatenate it with itself so the on/off
/// pattern always alternates consistently across repetitions. A pattern
/// whose lengths are all (effectively) zero can never advance `DashState`,
/// so it's dropped and treated as an undashed stroke instead.
fn normalize_dashes(dashes: &[f32]) -> Vec<f32> {
    if dashes.is_empty() {
        return Vec::new();
    }
    if dashes.iter().all(|&d| d < f32::EPSILON) {
        log::warn!("dash pattern {dashes:?} has no positive lengths, stroking without dashes");
        return Vec::new();
    }
    if dashes.len() % 2 == 1 {
        dashes.iter().chain(dashes.iter()).copied().collect()
    } else {
        dashes.to_vec()
    }
}

/// Carries dash-pattern phase across the edges of one sub-path.
struct DashState<'a> {
    pattern: &'a [f32],
    index: usize,
    remaining: f32,
}

impl<'a> DashState<'a> {
    fn new(pattern: &'a [f32]) -> Self {
        Self {
            pattern,
            index: 0,
            remaining: pattern.first().copied().unwrap_or(f32::INFINITY),
        }
    }

    fn is_on(&self) -> bool {
        self.index % 2 == 0
    }

    fn advance(&mut self) {
        self.index = (self.index + 1) % self.pattern.len();
        self.remaining = self.pattern[self.index];
    }

    /// Splits edge `a -> b` into on/off spans, carrying dash phase forward.
    fn spans_for_edge(&mut self, a: Vec2D, b: Vec2D) -> Vec<(Vec2D, Vec2D, bool)> {
        let total = (b - a).magnitude();
        if total < f32::EPSILON {
            return Vec::new();
        }
        let dir = (b - a) / total;
        let mut spans = Vec::new();
        let mut consumed = 0.0f32;
        while consumed < total {
            let step = self.remaining.min(total - consumed);
            let start = a + dir * consumed;
            let end = a + dir * (consumed + step);
            spans.push((start, end, self.is_on()));
            consumed += step;
            self.remaining -= step;
            if self.remaining <= f32::EPSILON {
                self.advance();
            }
        }
        spans
    }
}

use super::command::{CommandKind, PathCommand};
use crate::error::Result;
use math::{AffineTransform, Vec2D};

/// A mutable, ordered sequence of path commands.
///
/// A [Path] is a builder: operations like [Path::line_to] mutate it in
/// place and track the two running points (`start`, the beginning of the
/// current sub-path, and `at`, the pen position) described in `spec.md` §3.
/// A [Path] has no shared ownership story beyond ordinary Rust
/// borrow/clone rules — it may be read from multiple threads, but
/// concurrent mutation is undefined (`spec.md` §5).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
    start: Vec2D,
    at: Vec2D,
}

impl Path {
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            start: Vec2D::ZERO,
            at: Vec2D::ZERO,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[must_use]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    #[must_use]
    pub fn current_point(&self) -> Vec2D {
        self.at
    }

    /// Push a raw, already-validated command and update the running points.
    /// Used by the parser, which constructs commands directly from tokens.
    pub(crate) fn push_raw(&mut self, command: PathCommand) {
        use CommandKind::*;
        let v = command.values();
        match command.kind() {
            MoveTo => {
                self.at = Vec2D::new(v[0], v[1]);
                self.start = self.at;
            },
            RMoveTo => {
                self.at = self.at + Vec2D::new(v[0], v[1]);
                self.start = self.at;
            },
            LineTo | SmoothCubicTo | QuadTo | SmoothQuadTo => {
                self.at = Vec2D::new(v[v.len() - 2], v[v.len() - 1]);
            },
            RLineTo | RSmoothCubicTo | RQuadTo | RSmoothQuadTo => {
                self.at = self.at + Vec2D::new(v[v.len() - 2], v[v.len() - 1]);
            },
            HLineTo => self.at = Vec2D::new(v[0], self.at.y),
            RHLineTo => self.at = Vec2D::new(self.at.x + v[0], self.at.y),
            VLineTo => self.at = Vec2D::new(self.at.x, v[0]),
            RVLineTo => self.at = Vec2D::new(self.at.x, self.at.y + v[0]),
            CubicTo => self.at = Vec2D::new(v[4], v[5]),
            RCubicTo => self.at = self.at + Vec2D::new(v[4], v[5]),
            ArcTo => self.at = Vec2D::new(v[5], v[6]),
            RArcTo => self.at = self.at + Vec2D::new(v[5], v[6]),
            Close => self.at = self.start,
        }
        self.commands.push(command);
    }

    fn push(&mut self, kind: CommandKind, values: &[f32]) {
        // Arity is always correct here because every call site supplies
        // exactly the number of values the kind expects; `expect` only
        // guards against a programmer error within this module.
        let command = PathCommand::new(kind, values).expect("builder arity invariant");
        self.push_raw(command);
    }

    /// Move the pen to `to` without drawing, starting a new sub-path.
    pub fn move_to(&mut self, to: Vec2D) -> &mut Self {
        self.push(CommandKind::MoveTo, &[to.x, to.y]);
        self
    }

    /// Draw a straight line from the pen to `to`.
    pub fn line_to(&mut self, to: Vec2D) -> &mut Self {
        self.push(CommandKind::LineTo, &[to.x, to.y]);
        self
    }

    /// Draw a cubic Bézier curve from the pen through control points
    /// `cp1`, `cp2` to `to`.
    pub fn bezier_curve_to(&mut self, cp1: Vec2D, cp2: Vec2D, to: Vec2D) -> &mut Self {
        self.push(
            CommandKind::CubicTo,
            &[cp1.x, cp1.y, cp2.x, cp2.y, to.x, to.y],
        );
        self
    }

    /// Draw a quadratic Bézier curve from the pen through control point
    /// `cp` to `to`.
    pub fn quadratic_curve_to(&mut self, cp: Vec2D, to: Vec2D) -> &mut Self {
        self.push(CommandKind::QuadTo, &[cp.x, cp.y, to.x, to.y]);
        self
    }

    /// Draw an elliptical arc from the pen to `to` using the SVG endpoint
    /// parameterization (`spec.md` §4.2).
    pub fn elliptical_arc_to(
        &mut self,
        rx: f32,
        ry: f32,
        x_rotation: f32,
        large_arc: bool,
        sweep: bool,
        to: Vec2D,
    ) -> Result<&mut Self> {
        if rx < 0. || ry < 0. {
            return Err(crate::error::Error::NegativeRadius);
        }
        self.push(
            CommandKind::ArcTo,
            &[
                rx,
                ry,
                x_rotation,
                large_arc as u8 as f32,
                sweep as u8 as f32,
                to.x,
                to.y,
            ],
        );
        Ok(self)
    }

    /// End the current sub-path by drawing a line back to its start point
    /// and marking it closed.
    pub fn close_path(&mut self) -> &mut Self {
        if !self.commands.is_empty() {
            self.push(CommandKind::Close, &[]);
        }
        self
    }

    /// Append another path's commands verbatim.
    pub fn add_path(&mut self, other: &Path) -> &mut Self {
        if self.commands.is_empty() {
            self.start = other.start;
        }
        for command in &other.commands {
            self.commands.push(*command);
        }
        self.at = other.at;
        self
    }

    /// Apply a 3x3 affine transform to every point in the path, in place.
    ///
    /// Relative commands are transformed by the linear part only
    /// (translation zeroed), since a delta should not itself be shifted.
    /// Arc radii are scaled by the transform's axis scale only, while arc
    /// endpoints are fully transformed. If the very first command is a
    /// relative move, it is promoted to an absolute one first, since a
    /// relative move with no preceding pen position has no well-defined
    /// linear-only interpretation.
    pub fn transform(&mut self, mat: AffineTransform) -> &mut Self {
        if let Some(first) = self.commands.first_mut() {
            if first.kind() == CommandKind::RMoveTo {
                let v = first.values();
                let p = Vec2D::new(v[0], v[1]);
                *first = PathCommand::new(CommandKind::MoveTo, &[p.x, p.y])
                    .expect("MoveTo has the same arity as RMoveTo");
            }
        }

        let axis_scale = mat.axis_scale();
        for command in &mut self.commands {
            let relative = command.kind().is_relative();
            let apply = |p: Vec2D| {
                if relative {
                    mat.apply_to_vector(p)
                } else {
                    mat.apply_to(p)
                }
            };
            let transformed = transform_values(command.kind(), command.values(), apply, axis_scale);
            *command = PathCommand::new(command.kind(), &transformed)
                .expect("transform preserves arity");
        }

        self.start = mat.apply_to(self.start);
        self.at = mat.apply_to(self.at);
        self
    }
}

/// Re-map a command's payload through `apply` (point-wise) with arc radii
/// scaled separately through `axis_scale`.
fn transform_values(
    kind: CommandKind,
    values: &[f32],
    apply: impl Fn(Vec2D) -> Vec2D,
    axis_scale: Vec2D,
) -> Vec<f32> {
    use CommandKind::*;
    match kind {
        Close => vec![],
        HLineTo | RHLineTo => {
            // A horizontal delta/coordinate has no explicit y; transform
            // the point `(v[0], 0)` and keep only the x component unless
            // the transform introduces a y-component (e.g. a rotation),
            // in which case the command must fall back to carrying both:
            // HLineTo's payload is fixed-arity, so we approximate by
            // transforming as a full line. Callers that rotate a path
            // containing H/V commands should expect them to have been
            // normalized beforehand; this keeps axis-aligned transforms
            // (translate/scale) exact.
            let p = apply(Vec2D::new(values[0], 0.));
            vec![p.x]
        },
        VLineTo | RVLineTo => {
            let p = apply(Vec2D::new(0., values[0]));
            vec![p.y]
        },
        MoveTo | RMoveTo | LineTo | RLineTo | SmoothQuadTo | RSmoothQuadTo => {
            let p = apply(Vec2D::new(values[0], values[1]));
            vec![p.x, p.y]
        },
        QuadTo | RQuadTo | SmoothCubicTo | RSmoothCubicTo => {
            let cp = apply(Vec2D::new(values[0], values[1]));
            let end = apply(Vec2D::new(values[2], values[3]));
            vec![cp.x, cp.y, end.x, end.y]
        },
        CubicTo | RCubicTo => {
            let cp1 = apply(Vec2D::new(values[0], values[1]));
            let cp2 = apply(Vec2D::new(values[2], values[3]));
            let end = apply(Vec2D::new(values[4], values[5]));
            vec![cp1.x, cp1.y, cp2.x, cp2.y, end.x, end.y]
        },
        ArcTo | RArcTo => {
            let end = apply(Vec2D::new(values[5], values[6]));
            vec![
                values[0] * axis_scale.x.abs(),
                values[1] * axis_scale.y.abs(),
                values[2],
                values[3],
                values[4],
                end.x,
                end.y,
            ]
        },
    }
}

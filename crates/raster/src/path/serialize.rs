//! `Path::to_string()`: renders a path back to the textual grammar parsed
//! by [`super::parser::parse_path`].
//!
//! Serialization always emits absolute commands, resolving every relative
//! delta against the running pen position, and expands `H`/`V` into full
//! `L` commands. Round-tripping is therefore command-level, not textual:
//! `parse_path(path.to_string())` yields the same geometry as `path`, but
//! not necessarily byte-identical text.

use super::builder::Path;
use super::command::CommandKind;
use math::Vec2D;
use std::fmt;

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use CommandKind::*;

        let mut at = Vec2D::ZERO;
        let mut start = Vec2D::ZERO;
        let mut first = true;

        for command in self.commands() {
            if !first {
                write!(f, " ")?;
            }
            first = false;

            let v = command.values();
            match command.kind() {
                Close => {
                    write!(f, "Z")?;
                    at = start;
                },
                MoveTo => {
                    let p = Vec2D::new(v[0], v[1]);
                    write!(f, "M {} {}", p.x, p.y)?;
                    at = p;
                    start = p;
                },
                RMoveTo => {
                    let p = at + Vec2D::new(v[0], v[1]);
                    write!(f, "M {} {}", p.x, p.y)?;
                    at = p;
                    start = p;
                },
                LineTo => {
                    let p = Vec2D::new(v[0], v[1]);
                    write!(f, "L {} {}", p.x, p.y)?;
                    at = p;
                },
                RLineTo => {
                    let p = at + Vec2D::new(v[0], v[1]);
                    write!(f, "L {} {}", p.x, p.y)?;
                    at = p;
                },
                HLineTo => {
                    let p = Vec2D::new(v[0], at.y);
                    write!(f, "L {} {}", p.x, p.y)?;
                    at = p;
                },
                RHLineTo => {
                    let p = Vec2D::new(at.x + v[0], at.y);
                    write!(f, "L {} {}", p.x, p.y)?;
                    at = p;
                },
                VLineTo => {
                    let p = Vec2D::new(at.x, v[0]);
                    write!(f, "L {} {}", p.x, p.y)?;
                    at = p;
                },
                RVLineTo => {
                    let p = Vec2D::new(at.x, at.y + v[0]);
                    write!(f, "L {} {}", p.x, p.y)?;
                    at = p;
                },
                CubicTo => {
                    let (cp1, cp2, end) = (
                        Vec2D::new(v[0], v[1]),
                        Vec2D::new(v[2], v[3]),
                        Vec2D::new(v[4], v[5]),
                    );
                    write!(
                        f,
                        "C {} {} {} {} {} {}",
                        cp1.x, cp1.y, cp2.x, cp2.y, end.x, end.y
                    )?;
                    at = end;
                },
                RCubicTo => {
                    let (cp1, cp2, end) = (
                        at + Vec2D::new(v[0], v[1]),
                        at + Vec2D::new(v[2], v[3]),
                        at + Vec2D::new(v[4], v[5]),
                    );
                    write!(
                        f,
                        "C {} {} {} {} {} {}",
                        cp1.x, cp1.y, cp2.x, cp2.y, end.x, end.y
                    )?;
                    at = end;
                },
                SmoothCubicTo => {
                    let (cp2, end) = (Vec2D::new(v[0], v[1]), Vec2D::new(v[2], v[3]));
                    write!(f, "S {} {} {} {}", cp2.x, cp2.y, end.x, end.y)?;
                    at = end;
                },
                RSmoothCubicTo => {
                    let (cp2, end) = (at + Vec2D::new(v[0], v[1]), at + Vec2D::new(v[2], v[3]));
                    write!(f, "S {} {} {} {}", cp2.x, cp2.y, end.x, end.y)?;
                    at = end;
                },
                QuadTo => {
                    let (cp, end) = (Vec2D::new(v[0], v[1]), Vec2D::new(v[2], v[3]));
                    write!(f, "Q {} {} {} {}", cp.x, cp.y, end.x, end.y)?;
                    at = end;
                },
                RQuadTo => {
                    let (cp, end) = (at + Vec2D::new(v[0], v[1]), at + Vec2D::new(v[2], v[3]));
                    write!(f, "Q {} {} {} {}", cp.x, cp.y, end.x, end.y)?;
                    at = end;
                },
                SmoothQuadTo => {
                    let end = Vec2D::new(v[0], v[1]);
                    write!(f, "T {} {}", end.x, end.y)?;
                    at = end;
                },
                RSmoothQuadTo => {
                    let end = at + Vec2D::new(v[0], v[1]);
                    write!(f, "T {} {}", end.x, end.y)?;
                    at = end;
                },
                ArcTo => {
                    let end = Vec2D::new(v[5], v[6]);
                    write!(
                        f,
                        "A {} {} {} {} {} {} {}",
                        v[0], v[1], v[2], v[3] as u8, v[4] as u8, end.x, end.y
                    )?;
                    at = end;
                },
                RArcTo => {
                    let end = at + Vec2D::new(v[5], v[6]);
                    write!(
                        f,
                        "A {} {} {} {} {} {} {}",
                        v[0], v[1], v[2], v[3] as u8, v[4] as u8, end.x, end.y
                    )?;
                    at = end;
                },
            }
        }

        Ok(())
    }
}

use crate::error::{Error, Result};

/// The 19 kinds of path commands recognized by the path model.
///
/// Mirrors the SVG path grammar: every curve/line command has an absolute
/// and a relative ("lowercase") variant, plus the arity-less `Close`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandKind {
    MoveTo,
    RMoveTo,
    LineTo,
    RLineTo,
    HLineTo,
    RHLineTo,
    VLineTo,
    RVLineTo,
    CubicTo,
    RCubicTo,
    SmoothCubicTo,
    RSmoothCubicTo,
    QuadTo,
    RQuadTo,
    SmoothQuadTo,
    RSmoothQuadTo,
    ArcTo,
    RArcTo,
    Close,
}

impl CommandKind {
    /// The number of `f32`s this command's payload carries. One of
    /// `{0, 1, 2, 4, 6, 7}` per `spec.md` §3.
    #[must_use]
    pub const fn arity(self) -> u8 {
        match self {
            Self::Close => 0,
            Self::HLineTo | Self::RHLineTo | Self::VLineTo | Self::RVLineTo => 1,
            Self::MoveTo
            | Self::RMoveTo
            | Self::LineTo
            | Self::RLineTo
            | Self::SmoothQuadTo
            | Self::RSmoothQuadTo => 2,
            Self::SmoothCubicTo | Self::RSmoothCubicTo | Self::QuadTo | Self::RQuadTo => 4,
            Self::CubicTo | Self::RCubicTo => 6,
            Self::ArcTo | Self::RArcTo => 7,
        }
    }

    #[must_use]
    pub const fn is_relative(self) -> bool {
        matches!(
            self,
            Self::RMoveTo
                | Self::RLineTo
                | Self::RHLineTo
                | Self::RVLineTo
                | Self::RCubicTo
                | Self::RSmoothCubicTo
                | Self::RQuadTo
                | Self::RSmoothQuadTo
                | Self::RArcTo
        )
    }

    /// The absolute command letter used when serializing (`Path::to_string`
    /// always emits absolute commands, see `spec.md` §4.1).
    #[must_use]
    pub const fn absolute_letter(self) -> char {
        match self {
            Self::MoveTo | Self::RMoveTo => 'M',
            Self::LineTo | Self::RLineTo | Self::HLineTo | Self::RHLineTo | Self::VLineTo
            | Self::RVLineTo => 'L',
            Self::CubicTo | Self::RCubicTo => 'C',
            Self::SmoothCubicTo | Self::RSmoothCubicTo => 'S',
            Self::QuadTo | Self::RQuadTo => 'Q',
            Self::SmoothQuadTo | Self::RSmoothQuadTo => 'T',
            Self::ArcTo | Self::RArcTo => 'A',
            Self::Close => 'Z',
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MoveTo => "MoveTo",
            Self::RMoveTo => "RMoveTo",
            Self::LineTo => "LineTo",
            Self::RLineTo => "RLineTo",
            Self::HLineTo => "HLineTo",
            Self::RHLineTo => "RHLineTo",
            Self::VLineTo => "VLineTo",
            Self::RVLineTo => "RVLineTo",
            Self::CubicTo => "CubicTo",
            Self::RCubicTo => "RCubicTo",
            Self::SmoothCubicTo => "SmoothCubicTo",
            Self::RSmoothCubicTo => "RSmoothCubicTo",
            Self::QuadTo => "QuadTo",
            Self::RQuadTo => "RQuadTo",
            Self::SmoothQuadTo => "SmoothQuadTo",
            Self::RSmoothQuadTo => "RSmoothQuadTo",
            Self::ArcTo => "ArcTo",
            Self::RArcTo => "RArcTo",
            Self::Close => "Close",
        }
    }
}

/// A single path command: a [CommandKind] plus its fixed-arity numeric
/// payload, stored inline to avoid a heap allocation per command
/// (`spec.md` §9 design notes).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathCommand {
    kind: CommandKind,
    len: u8,
    values: [f32; 7],
}

impl PathCommand {
    /// Build a command, validating that `values.len()` matches the kind's
    /// declared arity.
    pub fn new(kind: CommandKind, values: &[f32]) -> Result<Self> {
        let expected = kind.arity();
        if values.len() != expected as usize {
            return Err(Error::ArityMismatch {
                command: kind.name(),
                expected,
                got: values.len() as u8,
            });
        }
        let mut buf = [0.0f32; 7];
        buf[..values.len()].copy_from_slice(values);
        Ok(Self {
            kind,
            len: expected,
            values: buf,
        })
    }

    #[must_use]
    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values[..self.len as usize]
    }
}

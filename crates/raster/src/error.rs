use std::fmt;

/// Fatal, input-validation errors. `spec.md` §7 distinguishes these from
/// "silent degeneracies" (zero-radius arcs, zero-width strokes, ...), which
/// are absorbed locally by the relevant operation and never produce an
/// [Error].
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// The textual path grammar could not be parsed at the given byte offset.
    MalformedPath { message: String, offset: usize },
    /// `arc`/`arcTo` was called with a negative radius.
    NegativeRadius,
    /// A command's payload did not match its declared arity.
    ArityMismatch {
        command: &'static str,
        expected: u8,
        got: u8,
    },
    /// A numeric token in path text could not be parsed as a float.
    InvalidNumber(String),
    /// A [crate::Paint] variant whose rendering this crate does not implement.
    UnsupportedPaint,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedPath { message, offset } => {
                write!(f, "malformed path at offset {offset}: {message}")
            },
            Self::NegativeRadius => write!(f, "radius must not be negative"),
            Self::ArityMismatch {
                command,
                expected,
                got,
            } => write!(
                f,
                "command {command} expects {expected} numbers, got {got}"
            ),
            Self::InvalidNumber(token) => write!(f, "invalid number: {token:?}"),
            Self::UnsupportedPaint => write!(f, "unsupported paint source"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

//! Textual path grammar parser (`spec.md` §4.1), a constrained dialect of
//! the SVG path mini-language.

use super::builder::Path;
use super::command::CommandKind;
use crate::error::{Error, Result};

/// A byte-oriented cursor over the path text, tracking the offset used in
/// error messages.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn skip_separators(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() || b == b',' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::MalformedPath {
            message: message.into(),
            offset: self.pos,
        }
    }

    /// Read one full floating-point token following the relaxed number-list
    /// grammar: a `+`/`-` not itself preceded by `e`/`E` delimits a number,
    /// a second `.` starts a new number rather than extending the
    /// fractional part, and a lone leading `0` digit is a complete number
    /// when immediately followed by another digit (so flag-adjacent
    /// coordinates like `"10"` split as `"1"`, `"0"` do not get swallowed
    /// whole).
    fn read_number(&mut self) -> Result<f32> {
        self.skip_separators();
        let start = self.pos;

        if matches!(self.peek(), Some(b'+') | Some(b'-')) {
            self.pos += 1;
        }

        let int_start = self.pos;
        while let Some(b) = self.peek() {
            if !b.is_ascii_digit() {
                break;
            }
            // Stray-zero rule: a single leading `0` followed directly by
            // another digit (not `.`) ends the number here.
            if self.pos == int_start && b == b'0' {
                self.pos += 1;
                if matches!(self.peek(), Some(d) if d.is_ascii_digit()) {
                    break;
                }
                continue;
            }
            self.pos += 1;
        }

        if self.peek() == Some(b'.') {
            self.pos += 1;
            while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
                self.pos += 1;
            }
        }

        if matches!(self.peek(), Some(b'e') | Some(b'E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+') | Some(b'-')) {
                self.pos += 1;
            }
            if matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
                while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
                    self.pos += 1;
                }
            } else {
                // Not actually an exponent (e.g. a trailing command letter
                // like "e" used as hex... never happens in this grammar,
                // but be defensive): rewind.
                self.pos = mark;
            }
        }

        let token = std::str::from_utf8(&self.bytes[start..self.pos])
            .expect("input is valid utf8 and we only split on ascii boundaries");
        if token.is_empty() || token == "+" || token == "-" {
            return Err(self.error(format!("expected a number, found {token:?}")));
        }
        token
            .parse::<f32>()
            .map_err(|_| Error::InvalidNumber(token.to_string()))
    }

    /// Read a single-character arc flag (`0` or `1`), per the rule that arc
    /// flag slots parse as exactly one digit regardless of what follows.
    fn read_flag(&mut self) -> Result<f32> {
        self.skip_separators();
        match self.bump() {
            Some(b'0') => Ok(0.),
            Some(b'1') => Ok(1.),
            Some(other) => Err(self.error(format!(
                "expected an arc flag ('0' or '1'), found {:?}",
                other as char
            ))),
            None => Err(self.error("expected an arc flag, found end of input")),
        }
    }
}

/// Parse the textual path grammar into a [`Path`].
pub fn parse_path(text: &str) -> Result<Path> {
    let mut cursor = Cursor::new(text);
    let mut path = Path::new();
    let mut letter: Option<u8> = None;
    let mut first_batch_for_letter = true;

    loop {
        cursor.skip_separators();
        if cursor.at_end() {
            break;
        }

        let next = cursor.peek().expect("checked at_end above");
        if next.is_ascii_alphabetic() {
            cursor.bump();
            letter = Some(next);
            first_batch_for_letter = true;
        } else if letter.is_none() {
            return Err(cursor.error("path must begin with a command letter"));
        } else {
            first_batch_for_letter = false;
        }

        let letter = letter.expect("set above or returned already");
        let relative = letter.is_ascii_lowercase();
        let upper = letter.to_ascii_uppercase();

        let kind = match (upper, first_batch_for_letter) {
            (b'M', true) => pick(relative, CommandKind::MoveTo, CommandKind::RMoveTo),
            // A move command's subsequent coordinate batches are implicit
            // line-tos, inheriting the move's case.
            (b'M', false) => pick(relative, CommandKind::LineTo, CommandKind::RLineTo),
            (b'L', _) => pick(relative, CommandKind::LineTo, CommandKind::RLineTo),
            (b'H', _) => pick(relative, CommandKind::HLineTo, CommandKind::RHLineTo),
            (b'V', _) => pick(relative, CommandKind::VLineTo, CommandKind::RVLineTo),
            (b'C', _) => pick(relative, CommandKind::CubicTo, CommandKind::RCubicTo),
            (b'S', _) => pick(relative, CommandKind::SmoothCubicTo, CommandKind::RSmoothCubicTo),
            (b'Q', _) => pick(relative, CommandKind::QuadTo, CommandKind::RQuadTo),
            (b'T', _) => pick(relative, CommandKind::SmoothQuadTo, CommandKind::RSmoothQuadTo),
            (b'A', _) => pick(relative, CommandKind::ArcTo, CommandKind::RArcTo),
            (b'Z', _) => CommandKind::Close,
            _ => return Err(cursor.error(format!("unknown command letter {:?}", letter as char))),
        };

        let arity = kind.arity();
        let mut values = [0f32; 7];
        for (i, slot) in values[..arity as usize].iter_mut().enumerate() {
            *slot = if upper == b'A' && (i == 3 || i == 4) {
                cursor.read_flag()?
            } else {
                cursor.read_number()?
            };
        }

        let command = super::command::PathCommand::new(kind, &values[..arity as usize])?;
        path.push_raw(command);

        // `Z` never continues with further parameter batches; the next
        // token must be a fresh command letter.
        if upper == b'Z' {
            continue;
        }
    }

    Ok(path)
}

fn pick(relative: bool, absolute_kind: CommandKind, relative_kind: CommandKind) -> CommandKind {
    if relative {
        relative_kind
    } else {
        absolute_kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_rect_path() {
        let path = parse_path("M0 0 L10 0 L10 10 L0 10 Z").unwrap();
        assert_eq!(path.commands().len(), 5);
        assert_eq!(path.commands()[0].kind(), CommandKind::MoveTo);
        assert_eq!(path.commands()[4].kind(), CommandKind::Close);
    }

    #[test]
    fn move_continuation_becomes_line_to() {
        let path = parse_path("M0 0 10 10 20 20").unwrap();
        assert_eq!(path.commands().len(), 3);
        assert_eq!(path.commands()[1].kind(), CommandKind::LineTo);
        assert_eq!(path.commands()[2].kind(), CommandKind::LineTo);
    }

    #[test]
    fn relative_arc_scenario() {
        let path = parse_path("M0 0 a 5 5 0 0 1 10 0").unwrap();
        assert_eq!(path.commands().len(), 2);
        assert_eq!(path.commands()[1].kind(), CommandKind::RArcTo);
        assert_eq!(path.commands()[1].values(), &[5., 5., 0., 0., 1., 10., 0.]);
    }

    #[test]
    fn compact_arc_flags_with_no_separators() {
        // Flags are single digits regardless of what digit follows.
        let path = parse_path("M0 0 A5 5 0 0110 0").unwrap();
        assert_eq!(path.commands()[1].values(), &[5., 5., 0., 0., 1., 10., 0.]);
    }

    #[test]
    fn signs_delimit_adjacent_numbers() {
        let path = parse_path("M0 0 L1-2").unwrap();
        assert_eq!(path.commands()[1].values(), &[1., -2.]);
    }

    #[test]
    fn malformed_path_reports_offset() {
        let err = parse_path("M0 0 Q").unwrap_err();
        assert!(matches!(err, Error::MalformedPath { .. }));
    }
}

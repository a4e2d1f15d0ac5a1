//! The path model: an ordered, tagged-union command sequence plus the
//! builder operations, textual grammar and serializer that produce and
//! consume it.

mod builder;
mod command;
mod parser;
mod serialize;
mod shapes;

pub use builder::Path;
pub use command::{CommandKind, PathCommand};
pub use parser::parse_path;

//! Text protocol for driving a board from stdin.
//!
//! One command per line; see [`parser::Command`] for the vocabulary. The
//! session writes one or more response lines per command, or a single
//! `error <message>` line.

pub mod parser;

pub use parser::{parse_command, Command, ParseError};

//! Low-level scanner for ptok sources.
//!
//! Turns a line-oriented byte stream into [`Token`]s: words, small integers,
//! the period terminator, end-of-file, and error tokens. The crate has no
//! knowledge of listings, page headers, or files; those live in `ptokc`,
//! which observes refills through [`LineObserver`].
//!
//! # Layers
//!
//! - [`classify`]: static byte -> [`CharClass`] table.
//! - [`LineBuffer`]: one line of source plus an offset, refilled on demand.
//! - [`Scanner`]: the extraction state machine, one token per call.

mod char_class;
mod line_buffer;
mod scanner;
mod tag;

pub use char_class::{classify, is_blank, CharClass};
pub use line_buffer::{LineBuffer, LineObserver, SourceCursor};
pub use scanner::Scanner;
pub use tag::{Literal, Token, TokenError, TokenKind};

/// Byte the line buffer reports once the source is exhausted.
///
/// It is the only byte that classifies as [`CharClass::EndOfFile`].
pub const EOF_CHAR: u8 = 0x7F;

/// Capacity of one source line, including room for the terminator the
/// line reader reserves. Longer physical lines are delivered in chunks of
/// `MAX_SRC_LINE_LEN - 1` bytes.
pub const MAX_SRC_LINE_LEN: usize = 256;

/// Maximum number of bytes kept in a token's text.
pub const MAX_TOKEN_LEN: usize = MAX_SRC_LINE_LEN;

/// Longest digit run that still produces a `Number` token.
pub const MAX_DIGIT_COUNT: usize = 20;

/// The single special character that forms a valid token.
pub const TERMINATOR: u8 = b'.';

//! Top-level scanning loop.
//!
//! Pulls tokens until the period terminator, printing a description line
//! for each. Reaching end-of-file first is reported in the listing as an
//! unexpected end of file; it is a normal way for the loop to stop, not a
//! failure.

use std::io::{self, BufRead, Write};

use ptok_lexer_core::{Scanner, TokenKind};
use tracing::debug;

use crate::listing::Listing;

/// Listing line printed when the source ends before the terminator.
pub const UNEXPECTED_EOF_MESSAGE: &str = "*** ERROR: Unexpected end of file.";

/// How the loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A period was extracted.
    Terminated,
    /// The source ended before any period.
    UnexpectedEof,
}

/// Result of one tokenizer run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    pub outcome: Outcome,
    /// Tokens printed, the terminating period included.
    pub tokens: usize,
    /// Error tokens among them.
    pub errors: usize,
    /// Source lines read.
    pub lines: u32,
}

/// Run the scanner until a period or end-of-file.
///
/// The source is closed before returning, on every path. Write errors on
/// the listing and read errors on the source are returned after it is
/// closed.
pub fn tokenize<R: BufRead, W: Write>(
    mut scanner: Scanner<R, Listing<W>>,
) -> io::Result<(Summary, Listing<W>)> {
    let result = run_loop(&mut scanner);
    let read_error = scanner.take_read_error();
    let lines = scanner.cursor().line_number;
    let mut listing = scanner.finish();

    let (outcome, tokens, errors) = result?;
    if let Some(e) = listing.take_error() {
        return Err(e);
    }
    if let Some(e) = read_error {
        return Err(e);
    }
    listing.flush()?;

    let summary = Summary {
        outcome,
        tokens,
        errors,
        lines,
    };
    debug!(?summary, "tokenizer finished");
    Ok((summary, listing))
}

fn run_loop<R: BufRead, W: Write>(
    scanner: &mut Scanner<R, Listing<W>>,
) -> io::Result<(Outcome, usize, usize)> {
    let mut tokens = 0;
    let mut errors = 0;
    loop {
        let token = scanner.next_token();
        if token.kind == TokenKind::EndOfFile {
            scanner.observer_mut().print_line(UNEXPECTED_EOF_MESSAGE)?;
            return Ok((Outcome::UnexpectedEof, tokens, errors));
        }
        scanner.observer_mut().print_token(&token)?;
        tokens += 1;
        if token.kind == TokenKind::Error {
            errors += 1;
        }
        if token.kind == TokenKind::Period {
            return Ok((Outcome::Terminated, tokens, errors));
        }
    }
}

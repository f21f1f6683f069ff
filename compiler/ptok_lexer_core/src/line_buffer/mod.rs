//! One-line source buffer with on-demand refill.
//!
//! The buffer holds a single line of source plus a read offset. When the
//! offset reaches the end of the line, the next line is read from the
//! underlying [`BufRead`]. Once the reader reports end of input the buffer
//! enters a terminal state: every later character is [`EOF_CHAR`] and no
//! further reads are attempted.
//!
//! # Normalization
//!
//! `\n` and `\t` are handed to the scanner as a single blank, so the
//! scanner never sees line feeds or indentation. Any other control byte,
//! `\r` included, reaches the scanner unchanged.
//!
//! # Line capacity
//!
//! Lines are read in chunks of at most `MAX_SRC_LINE_LEN - 1` bytes. A
//! longer physical line arrives as several refills, each with its own
//! line number and observer callback.

use std::io::{self, BufRead};

use tracing::{debug, error, warn};

use crate::{EOF_CHAR, MAX_SRC_LINE_LEN};

/// Position metadata reported alongside each refilled line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SourceCursor {
    /// Number of lines read so far; the line currently being scanned.
    pub line_number: u32,
    /// Nesting level shown in listings.
    ///
    /// Vestigial: nothing in the scanner changes it, so it is always 0.
    pub level: u32,
}

/// Receives every line as it is loaded into the buffer.
///
/// `line` is the raw text, including its trailing newline if the chunk
/// ended one, before any normalization.
pub trait LineObserver {
    fn source_line(&mut self, cursor: SourceCursor, line: &[u8]);
}

/// No-op observer.
impl LineObserver for () {
    fn source_line(&mut self, _cursor: SourceCursor, _line: &[u8]) {}
}

impl<T: LineObserver + ?Sized> LineObserver for &mut T {
    fn source_line(&mut self, cursor: SourceCursor, line: &[u8]) {
        (**self).source_line(cursor, line);
    }
}

/// Single-line buffer over a [`BufRead`] source.
pub struct LineBuffer<R, O = ()> {
    reader: R,
    observer: O,
    /// Current line, at most `MAX_SRC_LINE_LEN - 1` bytes.
    line: Vec<u8>,
    /// Offset of the next unread byte in `line`.
    offset: usize,
    /// Lookahead character, normalized. `None` until first requested.
    current: Option<u8>,
    exhausted: bool,
    cursor: SourceCursor,
    read_error: Option<io::Error>,
}

impl<R: BufRead> LineBuffer<R, ()> {
    pub fn new(reader: R) -> Self {
        Self::with_observer(reader, ())
    }
}

impl<R: BufRead, O: LineObserver> LineBuffer<R, O> {
    pub fn with_observer(reader: R, observer: O) -> Self {
        Self {
            reader,
            observer,
            line: Vec::with_capacity(MAX_SRC_LINE_LEN),
            offset: 0,
            current: None,
            exhausted: false,
            cursor: SourceCursor::default(),
            read_error: None,
        }
    }

    /// The lookahead character.
    ///
    /// The first call loads the first line. Returns [`EOF_CHAR`] once the
    /// source is exhausted.
    #[inline]
    pub fn current_char(&mut self) -> u8 {
        match self.current {
            Some(ch) => ch,
            None => {
                let ch = self.next_char();
                self.current = Some(ch);
                ch
            }
        }
    }

    /// Move past the lookahead character.
    ///
    /// A no-op in the terminal state.
    #[inline]
    pub fn advance(&mut self) {
        self.current_char();
        self.current = Some(self.next_char());
    }

    /// `true` once the reader has reported end of input.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn cursor(&self) -> SourceCursor {
        self.cursor
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Take the read error that ended the source early, if any.
    pub fn take_read_error(&mut self) -> Option<io::Error> {
        self.read_error.take()
    }

    /// Release the reader and hand back the observer.
    pub fn into_parts(self) -> (R, O) {
        (self.reader, self.observer)
    }

    fn next_char(&mut self) -> u8 {
        if self.exhausted {
            return EOF_CHAR;
        }
        if self.offset >= self.line.len() && !self.refill() {
            self.exhausted = true;
            return EOF_CHAR;
        }
        let ch = self.line[self.offset];
        self.offset += 1;
        normalize(ch)
    }

    /// Load the next line. Returns `false` at end of input.
    fn refill(&mut self) -> bool {
        self.line.clear();
        self.offset = 0;
        match read_bounded_line(&mut self.reader, &mut self.line, MAX_SRC_LINE_LEN - 1) {
            Ok(0) => false,
            Ok(len) => {
                self.cursor.line_number += 1;
                debug!(line = self.cursor.line_number, len, "refilled line buffer");
                if len == MAX_SRC_LINE_LEN - 1 && self.line.last() != Some(&b'\n') {
                    warn!(
                        line = self.cursor.line_number,
                        "source line exceeds {} bytes; continuing on next line",
                        MAX_SRC_LINE_LEN - 1
                    );
                }
                self.observer.source_line(self.cursor, &self.line);
                true
            }
            Err(e) => {
                error!(line = self.cursor.line_number, "failed to read source: {e}");
                self.line.clear();
                self.read_error = Some(e);
                false
            }
        }
    }
}

#[inline]
fn normalize(ch: u8) -> u8 {
    match ch {
        b'\n' | b'\t' => b' ',
        _ => ch,
    }
}

/// Append bytes from `reader` to `buf` up to and including the next `\n`,
/// stopping early once `buf` holds `cap` bytes.
///
/// Returns the number of bytes in `buf`; `0` means end of input.
fn read_bounded_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>, cap: usize) -> io::Result<usize> {
    while buf.len() < cap {
        let available = match reader.fill_buf() {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if available.is_empty() {
            break;
        }
        let window = &available[..available.len().min(cap - buf.len())];
        if let Some(i) = memchr::memchr(b'\n', window) {
            buf.extend_from_slice(&window[..=i]);
            reader.consume(i + 1);
            break;
        }
        let n = window.len();
        buf.extend_from_slice(window);
        reader.consume(n);
    }
    Ok(buf.len())
}

#[cfg(test)]
mod tests;

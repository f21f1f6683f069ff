use std::io::{self, BufRead, Cursor, Read};

use super::*;
use pretty_assertions::assert_eq;

/// Observer that keeps every refilled line.
#[derive(Default)]
struct Recorder {
    lines: Vec<(SourceCursor, String)>,
}

impl LineObserver for Recorder {
    fn source_line(&mut self, cursor: SourceCursor, line: &[u8]) {
        self.lines
            .push((cursor, String::from_utf8_lossy(line).into_owned()));
    }
}

/// Drain the buffer into a string, stopping at the sentinel.
fn drain<R: BufRead, O: LineObserver>(buf: &mut LineBuffer<R, O>) -> String {
    let mut out = String::new();
    while buf.current_char() != EOF_CHAR {
        out.push(char::from(buf.current_char()));
        buf.advance();
    }
    out
}

// === Basic navigation ===

#[test]
fn current_char_is_first_byte() {
    let mut buf = LineBuffer::new(Cursor::new("abc"));
    assert_eq!(buf.current_char(), b'a');
    // Repeated peeks do not advance.
    assert_eq!(buf.current_char(), b'a');
}

#[test]
fn advance_walks_across_lines() {
    let mut buf = LineBuffer::new(Cursor::new("ab\ncd\n"));
    assert_eq!(drain(&mut buf), "ab cd ");
}

#[test]
fn advance_before_peek_consumes_first_char() {
    let mut buf = LineBuffer::new(Cursor::new("xy"));
    buf.advance();
    assert_eq!(buf.current_char(), b'y');
}

#[test]
fn empty_source_is_immediately_exhausted() {
    let mut buf = LineBuffer::new(Cursor::new(""));
    assert_eq!(buf.current_char(), EOF_CHAR);
    assert!(buf.is_exhausted());
    assert_eq!(buf.cursor().line_number, 0);
}

// === Normalization ===

#[test]
fn tabs_and_newlines_become_blanks() {
    let mut buf = LineBuffer::new(Cursor::new("a\tb\nc"));
    assert_eq!(drain(&mut buf), "a b c");
}

#[test]
fn carriage_return_is_passed_through() {
    let mut buf = LineBuffer::new(Cursor::new("a\r\nb"));
    assert_eq!(drain(&mut buf), "a\r b");
}

#[test]
fn blank_line_yields_single_blank() {
    let mut buf = LineBuffer::new(Cursor::new("\n"));
    assert_eq!(drain(&mut buf), " ");
}

// === Terminal state ===

#[test]
fn eof_is_sticky() {
    let mut buf = LineBuffer::new(Cursor::new("a"));
    buf.advance();
    assert_eq!(buf.current_char(), EOF_CHAR);
    for _ in 0..5 {
        buf.advance();
        assert_eq!(buf.current_char(), EOF_CHAR);
    }
    assert!(buf.is_exhausted());
}

/// Reader that counts `fill_buf` calls after reaching the end.
struct CountingReader {
    inner: Cursor<Vec<u8>>,
    calls: usize,
}

impl Read for CountingReader {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        self.inner.read(out)
    }
}

impl BufRead for CountingReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.calls += 1;
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt);
    }
}

#[test]
fn no_reads_after_exhaustion() {
    let reader = CountingReader {
        inner: Cursor::new(b"x\n".to_vec()),
        calls: 0,
    };
    let mut buf = LineBuffer::new(reader);
    let _ = drain(&mut buf);
    for _ in 0..10 {
        buf.advance();
    }
    let (reader, ()) = buf.into_parts();
    // One read for the line, one to discover end of input.
    assert_eq!(reader.calls, 2);
}

// === Line accounting ===

#[test]
fn observer_sees_each_raw_line_with_number() {
    let mut buf = LineBuffer::with_observer(Cursor::new("one\n\ttwo\n"), Recorder::default());
    let _ = drain(&mut buf);
    let (_, recorder) = buf.into_parts();
    assert_eq!(
        recorder.lines,
        vec![
            (SourceCursor { line_number: 1, level: 0 }, "one\n".to_string()),
            (SourceCursor { line_number: 2, level: 0 }, "\ttwo\n".to_string()),
        ]
    );
}

#[test]
fn observer_by_reference() {
    let mut recorder = Recorder::default();
    {
        let mut buf = LineBuffer::with_observer(Cursor::new("a\nb"), &mut recorder);
        let _ = drain(&mut buf);
    }
    assert_eq!(recorder.lines.len(), 2);
}

#[test]
fn level_stays_zero() {
    let mut buf = LineBuffer::new(Cursor::new("a\nb\nc\n"));
    let _ = drain(&mut buf);
    assert_eq!(buf.cursor(), SourceCursor { line_number: 3, level: 0 });
}

#[test]
fn long_line_is_split_at_capacity() {
    let long = "a".repeat(MAX_SRC_LINE_LEN + 10);
    let mut buf = LineBuffer::with_observer(Cursor::new(long.clone()), Recorder::default());
    assert_eq!(drain(&mut buf), long);
    let (_, recorder) = buf.into_parts();
    let lens: Vec<usize> = recorder.lines.iter().map(|(_, l)| l.len()).collect();
    assert_eq!(lens, vec![MAX_SRC_LINE_LEN - 1, 11]);
    assert_eq!(recorder.lines[1].0.line_number, 2);
}

// === Read errors ===

struct FailingReader;

impl Read for FailingReader {
    fn read(&mut self, _out: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other("disk on fire"))
    }
}

impl BufRead for FailingReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Err(io::Error::other("disk on fire"))
    }

    fn consume(&mut self, _amt: usize) {}
}

#[test]
fn read_error_ends_input_and_is_kept() {
    let mut buf = LineBuffer::new(FailingReader);
    assert_eq!(buf.current_char(), EOF_CHAR);
    assert!(buf.is_exhausted());
    let err = buf.take_read_error().map(|e| e.to_string());
    assert_eq!(err.as_deref(), Some("disk on fire"));
    assert!(buf.take_read_error().is_none());
}

// === read_bounded_line ===

#[test]
fn bounded_read_stops_at_newline() {
    let mut reader = Cursor::new("ab\ncd");
    let mut line = Vec::new();
    assert_eq!(read_bounded_line(&mut reader, &mut line, 10).ok(), Some(3));
    assert_eq!(line, b"ab\n");
}

#[test]
fn bounded_read_stops_at_capacity() {
    let mut reader = Cursor::new("abcdef\n");
    let mut line = Vec::new();
    assert_eq!(read_bounded_line(&mut reader, &mut line, 4).ok(), Some(4));
    assert_eq!(line, b"abcd");
    line.clear();
    assert_eq!(read_bounded_line(&mut reader, &mut line, 4).ok(), Some(3));
    assert_eq!(line, b"ef\n");
}

//! Paged source listing.
//!
//! Every line the scanner loads is echoed with its line number and level,
//! followed by one description line per token. Output is split into pages
//! of `page_max_lines` lines, each introduced by a form feed and a header
//! naming the source file and the time the listing was started.

use std::io::{self, Write};

use ptok_lexer_core::{LineObserver, SourceCursor, Token, TokenKind};

/// Longest source name shown in page headers.
const MAX_NAME_LEN: usize = 31;

const FORM_FEED: char = '\x0c';

/// Listing layout options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingConfig {
    /// Lines per page, header excluded.
    pub page_max_lines: usize,
    /// Printed lines are cut to this many characters.
    pub max_width: usize,
    /// Emit page headers. When off the listing is one continuous page.
    pub paginate: bool,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_max_lines: 50,
            max_width: 80,
            paginate: true,
        }
    }
}

/// Line printer with pagination.
pub struct Listing<W> {
    out: W,
    config: ListingConfig,
    source_name: String,
    date: String,
    page_number: u32,
    /// Lines printed on the current page.
    line_count: usize,
    lines_printed: usize,
    /// First write error raised inside an observer callback.
    error: Option<io::Error>,
}

impl<W: Write> Listing<W> {
    /// Create a listing stamped with the current local time.
    pub fn new(out: W, source_name: &str, config: ListingConfig) -> Self {
        let date = chrono::Local::now()
            .format("%a %b %e %H:%M:%S %Y")
            .to_string();
        Self::with_date(out, source_name, date, config)
    }

    /// Create a listing with a fixed header date.
    pub fn with_date(out: W, source_name: &str, date: String, config: ListingConfig) -> Self {
        let source_name = source_name.chars().take(MAX_NAME_LEN).collect();
        Self {
            out,
            // Forces a header before the first line.
            line_count: config.page_max_lines,
            config,
            source_name,
            date,
            page_number: 0,
            lines_printed: 0,
            error: None,
        }
    }

    /// Print one line, starting a new page first if the current one is full.
    ///
    /// A trailing newline in `line` is dropped; exactly one is written.
    pub fn print_line(&mut self, line: &str) -> io::Result<()> {
        if self.config.paginate {
            self.line_count += 1;
            if self.line_count > self.config.page_max_lines {
                self.print_page_header()?;
                self.line_count = 1;
            }
        }
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = truncate_chars(line, self.config.max_width);
        writeln!(self.out, "{line}")?;
        self.lines_printed += 1;
        Ok(())
    }

    /// Print the description line for a token.
    pub fn print_token(&mut self, token: &Token) -> io::Result<()> {
        self.print_line(&describe_token(token))
    }

    fn print_page_header(&mut self) -> io::Result<()> {
        self.page_number += 1;
        write!(
            self.out,
            "{FORM_FEED}Page {}     {}     {}\n\n",
            self.page_number, self.source_name, self.date
        )
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Total lines printed, headers excluded.
    pub fn lines_printed(&self) -> usize {
        self.lines_printed
    }

    /// Take the first error raised while echoing source lines.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> LineObserver for Listing<W> {
    fn source_line(&mut self, cursor: SourceCursor, line: &[u8]) {
        let echo = format_source_line(cursor, line);
        if let Err(e) = self.print_line(&echo) {
            self.error.get_or_insert(e);
        }
    }
}

/// `"   3 0: text"`: line number right-aligned to four columns, then level.
pub fn format_source_line(cursor: SourceCursor, line: &[u8]) -> String {
    let text = String::from_utf8_lossy(line);
    let text = text.trim_end_matches(['\r', '\n']);
    format!("{:>4} {}: {text}", cursor.line_number, cursor.level)
}

/// `"\t>> <NUMBER>         45"`: kind name padded to 16 columns, then the
/// integer value for numbers or the raw text for everything else.
pub fn describe_token(token: &Token) -> String {
    match (token.kind, token.integer()) {
        (TokenKind::Number, Some(n)) => format!("\t>> {:<16} {n}", token.kind),
        _ => format!("\t>> {:<16} {}", token.kind, token.text),
    }
}

fn truncate_chars(line: &str, max: usize) -> &str {
    match line.char_indices().nth(max) {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}

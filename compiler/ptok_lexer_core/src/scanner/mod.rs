//! Token extraction state machine.
//!
//! Each call to [`Scanner::next_token`] skips blanks, classifies the
//! lookahead character, and consumes one maximal run:
//!
//! | Lookahead class | Run consumed               | Token              |
//! |-----------------|----------------------------|--------------------|
//! | `Letter`        | letters and digits         | `Word`             |
//! | `Digit`         | digits                     | `Number` / `Error` |
//! | `Special`       | exactly one byte           | `Period` / `Error` |
//! | `EndOfFile`     | nothing                    | `EndOfFile`        |
//!
//! Error conditions are encoded as [`TokenKind::Error`] tokens, never as
//! `Result::Err`. After every call the lookahead is the first character
//! past the token, so extraction always resumes at the right place.

use std::io::{self, BufRead};

use tracing::{debug, trace};

use crate::char_class::{classify, is_blank, CharClass};
use crate::line_buffer::{LineBuffer, LineObserver, SourceCursor};
use crate::tag::{Token, TokenError, TokenKind};
use crate::{MAX_DIGIT_COUNT, MAX_TOKEN_LEN, TERMINATOR};

/// Scanner over a line-oriented source.
pub struct Scanner<R, O = ()> {
    source: LineBuffer<R, O>,
    /// Set once an `EndOfFile` token has been yielded through `Iterator`.
    fused: bool,
}

impl<R: BufRead> Scanner<R, ()> {
    pub fn new(reader: R) -> Self {
        Self::with_observer(reader, ())
    }
}

impl<R: BufRead, O: LineObserver> Scanner<R, O> {
    /// Create a scanner that reports each loaded line to `observer`.
    pub fn with_observer(reader: R, observer: O) -> Self {
        Self {
            source: LineBuffer::with_observer(reader, observer),
            fused: false,
        }
    }

    /// Extract the next token.
    ///
    /// Returns `EndOfFile` once the lookahead is the sentinel byte, and
    /// keeps returning it on every later call. A sentinel byte that appears
    /// in the source text ends scanning the same way.
    pub fn next_token(&mut self) -> Token {
        self.skip_blanks();
        let token = match classify(self.source.current_char()) {
            CharClass::Letter => self.word(),
            CharClass::Digit => self.number(),
            CharClass::Special => self.special(),
            // Consumes nothing, so every later call lands here again.
            CharClass::EndOfFile => Token::eof(),
        };
        trace!(
            kind = %token.kind,
            text = %token.text,
            line = self.source.cursor().line_number,
            "extracted token"
        );
        if let Some(err) = &token.error {
            debug!(line = self.source.cursor().line_number, "error token: {err}");
        }
        token
    }

    /// Line number and level of the line currently being scanned.
    pub fn cursor(&self) -> SourceCursor {
        self.source.cursor()
    }

    pub fn observer_mut(&mut self) -> &mut O {
        self.source.observer_mut()
    }

    /// Take the I/O error that cut the source short, if any.
    pub fn take_read_error(&mut self) -> Option<io::Error> {
        self.source.take_read_error()
    }

    /// Close the source and hand back the observer.
    pub fn finish(self) -> O {
        let (reader, observer) = self.source.into_parts();
        drop(reader);
        observer
    }

    fn skip_blanks(&mut self) {
        while is_blank(self.source.current_char()) {
            self.source.advance();
        }
    }

    /// Consume the lookahead into `text`, tracking the untruncated length.
    fn take(&mut self, text: &mut String, len: &mut usize) {
        if *len < MAX_TOKEN_LEN {
            text.push(char::from(self.source.current_char()));
        }
        *len += 1;
        self.source.advance();
    }

    fn word(&mut self) -> Token {
        let mut text = String::new();
        let mut len = 0;
        while classify(self.source.current_char()).continues_word() {
            self.take(&mut text, &mut len);
        }
        if len > MAX_TOKEN_LEN {
            return Token::error(text, TokenError::TokenTooLong { len });
        }
        Token::word(text)
    }

    fn number(&mut self) -> Token {
        let mut text = String::new();
        let mut len = 0;
        let mut value: u128 = 0;
        loop {
            let digit = self.source.current_char() - b'0';
            if len < MAX_DIGIT_COUNT {
                value = value * 10 + u128::from(digit);
            }
            self.take(&mut text, &mut len);
            if classify(self.source.current_char()) != CharClass::Digit {
                break;
            }
        }
        if len > MAX_DIGIT_COUNT {
            return Token::error(text, TokenError::TooManyDigits { count: len });
        }
        Token::number(text, value)
    }

    fn special(&mut self) -> Token {
        let ch = self.source.current_char();
        self.source.advance();
        if ch == TERMINATOR {
            Token::period()
        } else {
            Token::error(
                char::from(ch).to_string(),
                TokenError::UnrecognizedCharacter(ch),
            )
        }
    }
}

/// Yields tokens up to and including the first `EndOfFile`.
impl<R: BufRead, O: LineObserver> Iterator for Scanner<R, O> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.fused {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::EndOfFile {
            self.fused = true;
        }
        Some(token)
    }
}

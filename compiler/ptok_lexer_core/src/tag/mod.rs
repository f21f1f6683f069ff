//! Token kinds, literal values, and the token produced by each extraction.

use std::fmt;

/// Kind of an extracted token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    /// Pre-extraction placeholder. Never returned by [`Scanner`](crate::Scanner).
    #[default]
    None,
    Word,
    Number,
    Period,
    EndOfFile,
    Error,
}

impl TokenKind {
    /// Name used in listings, e.g. `<WORD>`.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::None => "<no token>",
            TokenKind::Word => "<WORD>",
            TokenKind::Number => "<NUMBER>",
            TokenKind::Period => "<PERIOD>",
            TokenKind::EndOfFile => "<END OF FILE>",
            TokenKind::Error => "<ERROR>",
        }
    }

    /// `Period` and `EndOfFile` end top-level scanning.
    pub const fn is_terminal(self) -> bool {
        matches!(self, TokenKind::Period | TokenKind::EndOfFile)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Value attached to a literal token.
///
/// The scanner only produces [`Literal::Integer`]; `Text` is kept for
/// consumers that build literals of their own.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Literal {
    /// Up to [`MAX_DIGIT_COUNT`](crate::MAX_DIGIT_COUNT) decimal digits,
    /// which always fit in `u128`.
    Integer(u128),
    Text(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(n) => write!(f, "{n}"),
            Literal::Text(s) => f.write_str(s),
        }
    }
}

/// Why a token came out as [`TokenKind::Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum TokenError {
    #[error("number has {count} digits; at most {max} are allowed", max = crate::MAX_DIGIT_COUNT)]
    TooManyDigits { count: usize },

    #[error("unrecognized character {:?}", byte_char(.0))]
    UnrecognizedCharacter(u8),

    #[error("token is {len} bytes long; at most {max} are kept", max = crate::MAX_TOKEN_LEN)]
    TokenTooLong { len: usize },
}

fn byte_char(byte: &u8) -> char {
    char::from(*byte)
}

/// One extracted token.
///
/// Each call to [`Scanner::next_token`](crate::Scanner::next_token) returns
/// a fresh value; nothing is shared with later extractions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Raw characters of the token, without surrounding blanks.
    pub text: String,
    /// Present only for [`TokenKind::Number`].
    pub literal: Option<Literal>,
    /// Present only for [`TokenKind::Error`].
    pub error: Option<TokenError>,
}

impl Token {
    pub fn word(text: String) -> Self {
        Token {
            kind: TokenKind::Word,
            text,
            ..Token::default()
        }
    }

    pub fn number(text: String, value: u128) -> Self {
        Token {
            kind: TokenKind::Number,
            text,
            literal: Some(Literal::Integer(value)),
            error: None,
        }
    }

    pub fn period() -> Self {
        Token {
            kind: TokenKind::Period,
            text: char::from(crate::TERMINATOR).to_string(),
            ..Token::default()
        }
    }

    pub fn eof() -> Self {
        Token {
            kind: TokenKind::EndOfFile,
            ..Token::default()
        }
    }

    pub fn error(text: String, error: TokenError) -> Self {
        Token {
            kind: TokenKind::Error,
            text,
            literal: None,
            error: Some(error),
        }
    }

    /// The integer literal, if this is a `Number` token.
    pub fn integer(&self) -> Option<u128> {
        match self.literal {
            Some(Literal::Integer(n)) => Some(n),
            _ => None,
        }
    }
}

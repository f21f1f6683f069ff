//! Byte classification for the scanner.
//!
//! Every byte maps to exactly one [`CharClass`]. The table is computed at
//! compile time and never mutated; lookups are a single index.

use crate::EOF_CHAR;

/// Class of a single source byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CharClass {
    /// `A-Z` or `a-z`.
    Letter,
    /// `0-9`.
    Digit,
    /// Anything else: blanks, punctuation, control and non-ASCII bytes.
    Special,
    /// The end-of-file sentinel ([`EOF_CHAR`]).
    EndOfFile,
}

impl CharClass {
    /// Whether a byte of this class extends a word that is already started.
    #[inline]
    pub fn continues_word(self) -> bool {
        matches!(self, CharClass::Letter | CharClass::Digit)
    }
}

const fn build_table() -> [CharClass; 256] {
    let mut table = [CharClass::Special; 256];
    let mut b = 0usize;
    while b < 256 {
        table[b] = match b as u8 {
            b'0'..=b'9' => CharClass::Digit,
            b'A'..=b'Z' | b'a'..=b'z' => CharClass::Letter,
            EOF_CHAR => CharClass::EndOfFile,
            _ => CharClass::Special,
        };
        b += 1;
    }
    table
}

static CHAR_TABLE: [CharClass; 256] = build_table();

/// Classify one byte.
#[inline]
pub fn classify(byte: u8) -> CharClass {
    CHAR_TABLE[byte as usize]
}

/// Blanks are skipped between tokens. After line-buffer normalization the
/// only blank is the space character.
#[inline]
pub fn is_blank(byte: u8) -> bool {
    byte == b' '
}

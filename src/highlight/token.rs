//! Token types for syntax highlighting.

use crate::color::Rgb;
use crate::location::Location;
use crate::text::tab_advance;

/// Classification assigned by the lexer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Identifier found in the configured literal set (`true`, `nil`).
    Literal,
    /// Identifier found in the configured built-in set (`len`, `println`).
    BuiltIn,
    /// Identifier found in the configured type set.
    Type,
    /// Identifier found in the configured keyword set.
    Keyword,
    /// Identifier in no configured set.
    Identifier,
    Digits,
    String,
    Comment,
    /// A single `\t`.
    Tab,
    /// Any other single character, spaces included.
    Default,
}

/// A classified run of characters on one line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub color: Rgb,
    /// `col` is the visual (tab-expanded) column of the first character.
    pub location: Location,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, color: Rgb, location: Location) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            color,
            location,
        }
    }

    /// Length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lexeme.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lexeme.is_empty()
    }

    /// Screen columns the token occupies.
    #[must_use]
    pub fn visual_len(&self, tab_width: usize) -> usize {
        match self.kind {
            TokenKind::Tab => tab_advance(self.location.col, tab_width),
            _ => self.len(),
        }
    }

    /// Visual column just past the token.
    #[must_use]
    pub fn visual_end(&self, tab_width: usize) -> usize {
        self.location.col + self.visual_len(tab_width)
    }

    /// True for tabs and runs of spaces.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        !self.lexeme.is_empty() && self.lexeme.chars().all(|c| c == ' ' || c == '\t')
    }
}

//! Line/column addressing shared by the buffer, the lexer and the undo log.

use std::fmt;

/// A `(line, col)` pair addressing a character slot.
///
/// In buffer and history code `col` is a logical column: a `char` index into
/// the line, tabs counted as one. Tokens reuse the type with `col` holding the
/// tab-expanded visual column instead; each API says which one it means.
///
/// Ordering is document order (line first, then column).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub line: usize,
    pub col: usize,
}

impl Location {
    #[must_use]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    /// Start of the document.
    #[must_use]
    pub const fn start() -> Self {
        Self { line: 0, col: 0 }
    }
}

impl From<(usize, usize)> for Location {
    fn from((line, col): (usize, usize)) -> Self {
        Self { line, col }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::Location;

    #[test]
    fn orders_by_line_then_column() {
        assert!(Location::new(0, 9) < Location::new(1, 0));
        assert!(Location::new(2, 1) < Location::new(2, 3));
        assert_eq!(Location::from((4, 2)), Location::new(4, 2));
    }

    #[test]
    fn displays_one_based() {
        assert_eq!(Location::start().to_string(), "1:1");
        assert_eq!(Location::new(9, 4).to_string(), "10:5");
    }
}

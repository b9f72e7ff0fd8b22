//! Rope wrapper using the ropey crate.
//!
//! The crate is built without ropey's Unicode line-break feature, so `\n` is
//! the only line separator. That makes `len_lines` equal to the number of
//! `\n` characters plus one, which is exactly the line model of
//! [`LineBuffer`](super::LineBuffer).

use ropey::{Rope, RopeSlice};

/// Wrapper around ropey::Rope with line-oriented convenience methods.
#[derive(Clone, Debug, Default)]
pub struct RopeWrapper {
    rope: Rope,
}

impl RopeWrapper {
    /// Create an empty rope.
    #[must_use]
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Create a rope from a string.
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
        }
    }

    /// Get the number of characters.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Get the number of lines. Never zero.
    #[must_use]
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get a line by index, including its trailing `\n` if it has one.
    #[must_use]
    pub fn line(&self, idx: usize) -> Option<RopeSlice<'_>> {
        if idx < self.rope.len_lines() {
            Some(self.rope.line(idx))
        } else {
            None
        }
    }

    /// Number of characters on a line, not counting the `\n`.
    #[must_use]
    pub fn line_len(&self, idx: usize) -> usize {
        self.line(idx).map_or(0, |line| {
            let len = line.len_chars();
            if len > 0 && line.char(len - 1) == '\n' {
                len - 1
            } else {
                len
            }
        })
    }

    /// Line content without its trailing `\n`.
    #[must_use]
    pub fn line_text(&self, idx: usize) -> Option<String> {
        let line = self.line(idx)?;
        let len = self.line_len(idx);
        Some(line.slice(..len).to_string())
    }

    /// Get a slice of the rope, or an empty slice for an invalid range.
    #[must_use]
    pub fn slice<R>(&self, range: R) -> RopeSlice<'_>
    where
        R: std::ops::RangeBounds<usize>,
    {
        self.rope
            .get_slice(range)
            .unwrap_or_else(|| self.rope.slice(..0))
    }

    /// Insert text at a character position. Out-of-range positions are ignored.
    pub fn insert(&mut self, char_idx: usize, text: &str) {
        if char_idx <= self.len_chars() {
            self.rope.insert(char_idx, text);
        }
    }

    /// Remove a range of characters. The range must be valid.
    pub fn remove(&mut self, range: std::ops::Range<usize>) {
        let end = range.end.min(self.len_chars());
        if range.start < end {
            self.rope.remove(range.start..end);
        }
    }

    /// Replace the entire contents.
    pub fn replace(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }

    /// Convert to string.
    #[must_use]
    pub fn to_string(&self) -> String {
        self.rope.to_string()
    }

    /// Get the char index at the start of a line; `len_chars` past the end.
    #[must_use]
    pub fn line_to_char(&self, line_idx: usize) -> usize {
        if line_idx >= self.len_lines() {
            self.len_chars()
        } else {
            self.rope.line_to_char(line_idx)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rope_basic() {
        let rope = RopeWrapper::from_str("Hello, world!");
        assert_eq!(rope.len_chars(), 13);
        assert_eq!(rope.len_lines(), 1);
    }

    #[test]
    fn test_rope_multiline() {
        let rope = RopeWrapper::from_str("Line 1\nLine 2\nLine 3");
        assert_eq!(rope.len_lines(), 3);
        assert_eq!(rope.line(0).unwrap().to_string(), "Line 1\n");
        assert_eq!(rope.line_text(0).as_deref(), Some("Line 1"));
        assert_eq!(rope.line_text(2).as_deref(), Some("Line 3"));
        assert_eq!(rope.line_len(1), 6);
    }

    #[test]
    fn test_empty_rope_has_one_line() {
        let rope = RopeWrapper::new();
        assert_eq!(rope.len_lines(), 1);
        assert_eq!(rope.line_text(0).as_deref(), Some(""));

        let rope = RopeWrapper::from_str("a\n");
        assert_eq!(rope.len_lines(), 2);
        assert_eq!(rope.line_text(1).as_deref(), Some(""));
    }

    #[test]
    fn test_only_lf_breaks_lines() {
        let rope = RopeWrapper::from_str("a\u{2028}b\rc\u{000C}d");
        assert_eq!(rope.len_lines(), 1);
    }

    #[test]
    fn test_rope_insert_and_remove() {
        let mut rope = RopeWrapper::from_str("Hello!");
        rope.insert(5, ", world");
        assert_eq!(rope.to_string(), "Hello, world!");
        rope.insert(99, "ignored");
        rope.remove(5..12);
        assert_eq!(rope.to_string(), "Hello!");
    }
}

//! Line-addressed document storage.
//!
//! [`LineBuffer`] holds the document as a rope and exposes the primitive
//! mutations the editing session is built from. Every primitive clamps its
//! positions instead of failing: a cursor that is one past the end, or a line
//! index left over from before a deletion, is normal in an editor.
//!
//! None of these methods record history. The session pairs each call with an
//! [`Action`](super::Action) so the transaction log can invert it later.

use crate::location::Location;
use crate::text::rope::RopeWrapper;

/// Result of merging a line into the one above it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergedLine {
    /// Column on the previous line where the merged text now starts.
    pub col: usize,
    /// The text that was moved up.
    pub text: String,
}

/// Ordered sequence of text lines. Always holds at least one line.
#[derive(Clone, Debug, Default)]
pub struct LineBuffer {
    rope: RopeWrapper,
    modified: bool,
}

impl LineBuffer {
    /// Create a buffer holding a single empty line.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer from `\n`-separated text.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self {
            rope: RopeWrapper::from_str(text),
            modified: false,
        }
    }

    /// Create a buffer from raw file bytes.
    ///
    /// Invalid UTF-8 is replaced and every `\r` is dropped, so CRLF files load
    /// as plain `\n` separated lines.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let text = String::from_utf8_lossy(bytes);
        if text.contains('\r') {
            Self::with_text(&text.replace('\r', ""))
        } else {
            Self::with_text(&text)
        }
    }

    /// Create a buffer from individual lines.
    #[must_use]
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        Self::with_text(&join_lines(lines))
    }

    /// Number of lines. Never zero.
    #[must_use]
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    /// Line content, or `None` past the end.
    #[must_use]
    pub fn line(&self, idx: usize) -> Option<String> {
        self.rope.line_text(idx)
    }

    /// Line content, clamping `idx` to the last line.
    #[must_use]
    pub fn line_clamped(&self, idx: usize) -> String {
        self.rope
            .line_text(self.clamp_line(idx))
            .unwrap_or_default()
    }

    /// Length of a line in characters; 0 past the end.
    #[must_use]
    pub fn line_len(&self, idx: usize) -> usize {
        self.rope.line_len(idx)
    }

    /// All lines, in order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        (0..self.len_lines())
            .filter_map(|idx| self.rope.line_text(idx))
            .collect()
    }

    /// Lines `start..end` joined by `\n`, clamped to the document.
    #[must_use]
    pub fn text_range(&self, start: usize, end: usize) -> String {
        let end = end.min(self.len_lines());
        if start >= end {
            return String::new();
        }
        let from = self.rope.line_to_char(start);
        let to = self.rope.line_to_char(start) + self.span_chars(start, end);
        self.rope.slice(from..to).to_string()
    }

    /// The whole document joined by `\n`, as written to disk.
    #[must_use]
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Location one past the last character of the document.
    #[must_use]
    pub fn end(&self) -> Location {
        let line = self.len_lines() - 1;
        Location::new(line, self.line_len(line))
    }

    /// True once any primitive changed the content since load or save.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Set or clear the modified flag (cleared after a successful save).
    pub fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    /// Clamp a line index into the document.
    #[must_use]
    pub fn clamp_line(&self, line: usize) -> usize {
        line.min(self.len_lines() - 1)
    }

    /// Clamp a location into the document.
    #[must_use]
    pub fn clamp(&self, loc: Location) -> Location {
        let line = self.clamp_line(loc.line);
        Location::new(line, loc.col.min(self.line_len(line)))
    }

    /// Insert single-line `text` at `(line, col)`.
    ///
    /// Both coordinates are clamped into range. Returns where the text
    /// actually went. `text` must not contain `\n`; line structure changes go
    /// through [`insert_lines`](Self::insert_lines).
    pub fn insert_text(&mut self, line: usize, col: usize, text: &str) -> Location {
        debug_assert!(!text.contains('\n'), "insert_text is single-line");
        let at = self.clamp(Location::new(line, col));
        if !text.is_empty() {
            let offset = self.rope.line_to_char(at.line) + at.col;
            self.rope.insert(offset, text);
            self.modified = true;
        }
        at
    }

    /// Remove the `amount` characters ending at `col` on `line`.
    ///
    /// Removes the range `[col - amount, col)` and returns it. Returns an
    /// empty string without touching the line when `amount` exceeds `col`;
    /// callers pre-clamp `amount`.
    pub fn remove_text(&mut self, line: usize, col: usize, amount: usize) -> String {
        let line = self.clamp_line(line);
        let col = col.min(self.line_len(line));
        if amount == 0 || amount > col {
            return String::new();
        }
        let end = self.rope.line_to_char(line) + col;
        let start = end - amount;
        let removed = self.rope.slice(start..end).to_string();
        self.rope.remove(start..end);
        self.modified = true;
        removed
    }

    /// Append `line` onto the previous line and remove it.
    ///
    /// A no-op returning `None` for line 0 or a line past the end.
    pub fn merge_line_up(&mut self, line: usize) -> Option<MergedLine> {
        if line == 0 || line >= self.len_lines() {
            return None;
        }
        let col = self.line_len(line - 1);
        let text = self.rope.line_text(line).unwrap_or_default();
        let joint = self.rope.line_to_char(line);
        self.rope.remove(joint - 1..joint);
        self.modified = true;
        Some(MergedLine { col, text })
    }

    /// Remove `count` lines starting at `start`, returning them joined by `\n`.
    ///
    /// When every line would go, the document is blanked to a single empty
    /// line instead. Use [`lines_removed_by`](Self::lines_removed_by) beforehand
    /// to tell the two cases apart.
    pub fn delete_lines(&mut self, start: usize, count: usize) -> String {
        if count == 0 {
            return String::new();
        }
        let total = self.len_lines();
        let start = self.clamp_line(start);
        let end = start.saturating_add(count).min(total);
        let text = self.text_range(start, end);

        if start == 0 && end == total {
            self.rope.replace("");
        } else if end < total {
            let from = self.rope.line_to_char(start);
            let to = self.rope.line_to_char(end);
            self.rope.remove(from..to);
        } else {
            // Deleting through the last line also takes the newline before it.
            let from = self.rope.line_to_char(start) - 1;
            self.rope.remove(from..self.rope.len_chars());
        }
        self.modified = true;
        text
    }

    /// How many lines `delete_lines(start, count)` would structurally remove.
    ///
    /// Smaller than the number of deleted lines only when the deletion blanks
    /// the whole document.
    #[must_use]
    pub fn lines_removed_by(&self, start: usize, count: usize) -> usize {
        let total = self.len_lines();
        let start = self.clamp_line(start);
        let end = start.saturating_add(count).min(total);
        let deleted = end - start;
        if start == 0 && end == total {
            deleted.saturating_sub(1)
        } else {
            deleted
        }
    }

    /// Splice `lines` in so the first of them becomes line `at`.
    ///
    /// `at` is clamped to `len_lines()`, which appends after the last line.
    pub fn insert_lines<S: AsRef<str>>(&mut self, at: usize, lines: &[S]) {
        if lines.is_empty() {
            return;
        }
        let total = self.len_lines();
        let at = at.min(total);
        let joined = join_lines(lines);
        if at < total {
            let offset = self.rope.line_to_char(at);
            self.rope.insert(offset, &format!("{joined}\n"));
        } else {
            let offset = self.rope.len_chars();
            self.rope.insert(offset, &format!("\n{joined}"));
        }
        self.modified = true;
    }

    /// Replace the whole document with `lines`.
    pub fn replace_lines<S: AsRef<str>>(&mut self, lines: &[S]) {
        self.rope.replace(&join_lines(lines));
        self.modified = true;
    }

    /// Characters spanned by lines `start..end`, excluding the final newline.
    fn span_chars(&self, start: usize, end: usize) -> usize {
        let from = self.rope.line_to_char(start);
        let last = end - 1;
        self.rope.line_to_char(last) + self.rope.line_len(last) - from
    }
}

fn join_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(line.as_ref());
    }
    out
}

//! Tab-aware column mapping, word boundaries and selections.
//!
//! Buffer positions use logical columns (a `char` index, a tab counts once).
//! The screen uses visual columns, where a tab advances to the next multiple
//! of the tab width. Everything that crosses that boundary goes through this
//! module so the cursor, the token positions and the selection highlight agree.

use crate::highlight::Token;
use crate::location::Location;

/// Columns a tab occupies when it starts at visual column `col`.
#[inline]
#[must_use]
pub fn tab_advance(col: usize, tab_width: usize) -> usize {
    let tab_width = tab_width.max(1);
    tab_width - (col % tab_width)
}

/// Visual column of logical column `logical` on `line`.
///
/// `logical` is clamped to the line length.
#[must_use]
pub fn visual_column(line: &str, logical: usize, tab_width: usize) -> usize {
    line.chars().take(logical).fold(0, |col, ch| {
        if ch == '\t' {
            col + tab_advance(col, tab_width)
        } else {
            col + 1
        }
    })
}

/// Visual width of a whole line.
#[must_use]
pub fn visual_width(line: &str, tab_width: usize) -> usize {
    visual_column(line, usize::MAX, tab_width)
}

/// Logical column that best matches visual column `visual` on `line`.
///
/// A visual column inside a tab's span snaps to whichever edge of the tab is
/// nearer. Columns past the end clamp to the line length.
#[must_use]
pub fn logical_column(line: &str, visual: usize, tab_width: usize) -> usize {
    let mut col = 0;
    for (idx, ch) in line.chars().enumerate() {
        if col >= visual {
            return idx;
        }
        let width = if ch == '\t' {
            tab_advance(col, tab_width)
        } else {
            1
        };
        if col + width > visual {
            return if visual - col > width / 2 { idx + 1 } else { idx };
        }
        col += width;
    }
    line.chars().count()
}

/// A non-blank token's extent in logical columns, `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordSpan {
    pub start: usize,
    pub end: usize,
}

/// Word spans of one tokenized line.
///
/// Columns are re-based to an un-tabbed running index, so they are logical
/// columns when `tokens` cover the whole line. Whitespace and tab tokens are
/// dropped.
#[must_use]
pub fn word_spans(tokens: &[Token]) -> Vec<WordSpan> {
    let mut spans = Vec::new();
    let mut running = 0;
    for token in tokens {
        let len = token.len();
        if !token.is_blank() {
            spans.push(WordSpan {
                start: running,
                end: running + len,
            });
        }
        running += len;
    }
    spans
}

/// Index of the span containing `col` (edges included).
///
/// Falls back to the first span starting after `col`, then to the last span.
/// `None` only when `spans` is empty.
#[must_use]
pub fn word_boundary_index(spans: &[WordSpan], col: usize) -> Option<usize> {
    if spans.is_empty() {
        return None;
    }
    spans
        .iter()
        .position(|s| s.start <= col && col <= s.end)
        .or_else(|| spans.iter().position(|s| s.start > col))
        .or(Some(spans.len() - 1))
}

/// Target of a word jump to the right: the end of the current or next word.
///
/// `None` when no word ends after `col`; the caller then steps one character,
/// wrapping to the next line.
#[must_use]
pub fn word_right(spans: &[WordSpan], col: usize) -> Option<usize> {
    let idx = word_boundary_index(spans, col)?;
    if spans[idx].end > col {
        return Some(spans[idx].end);
    }
    spans.get(idx + 1).map(|s| s.end).filter(|&end| end > col)
}

/// Target of a word jump to the left: the start of the current or previous
/// word. `None` when no word starts before `col`.
#[must_use]
pub fn word_left(spans: &[WordSpan], col: usize) -> Option<usize> {
    let idx = word_boundary_index(spans, col)?;
    if spans[idx].start < col {
        return Some(spans[idx].start);
    }
    idx.checked_sub(1)
        .map(|prev| spans[prev].start)
        .filter(|&start| start < col)
}

/// Two selection endpoints in the order the user made them.
///
/// `end` may precede `start`. `start == end` means nothing is selected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: Location,
    pub end: Location,
}

impl Selection {
    #[must_use]
    pub const fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    /// An empty selection anchored at `at`.
    #[must_use]
    pub const fn caret(at: Location) -> Self {
        Self { start: at, end: at }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Ordered form, or `None` when the selection is empty.
    #[must_use]
    pub fn normalized(&self) -> Option<NormalizedSelection> {
        if self.is_empty() {
            None
        } else {
            Some(normalize_selection(self.start, self.end))
        }
    }
}

/// Selection with its endpoints in document order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NormalizedSelection {
    pub min_line: usize,
    pub max_line: usize,
    /// Column on `min_line` where the selection starts.
    pub start_col: usize,
    /// Column on `max_line` where the selection ends (exclusive).
    pub end_col: usize,
}

/// Order two endpoints.
///
/// On one line the columns are sorted; otherwise the endpoint on the earlier
/// line becomes the start.
#[must_use]
pub fn normalize_selection(start: Location, end: Location) -> NormalizedSelection {
    let (first, last) = if start.line == end.line {
        (
            Location::new(start.line, start.col.min(end.col)),
            Location::new(start.line, start.col.max(end.col)),
        )
    } else if start.line > end.line {
        (end, start)
    } else {
        (start, end)
    };
    NormalizedSelection {
        min_line: first.line,
        max_line: last.line,
        start_col: first.col,
        end_col: last.col,
    }
}

impl NormalizedSelection {
    #[must_use]
    pub fn start(&self) -> Location {
        Location::new(self.min_line, self.start_col)
    }

    #[must_use]
    pub fn end(&self) -> Location {
        Location::new(self.max_line, self.end_col)
    }

    #[must_use]
    pub fn is_single_line(&self) -> bool {
        self.min_line == self.max_line
    }

    /// True if the character slot `(line, col)` is selected.
    #[must_use]
    pub fn contains(&self, line: usize, col: usize) -> bool {
        if self.is_single_line() {
            return line == self.min_line && col >= self.start_col && col < self.end_col;
        }
        (line > self.min_line && line < self.max_line)
            || (line == self.min_line && col >= self.start_col)
            || (line == self.max_line && col < self.end_col)
    }
}

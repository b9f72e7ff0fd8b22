//! The editing session: one document, its history, cursor and view.
//!
//! [`EditSession::apply`] runs one [`Intent`] as a single transaction. Every
//! buffer mutation goes through a recording helper that pairs the primitive
//! call with an [`Action`], and the pending actions are submitted together
//! with the cursor before and after the intent. Undoing restores the "before"
//! cursor; redoing restores the "after" one.
//!
//! # Examples
//!
//! ```
//! use gim::input::{Intent, Motion};
//! use gim::session::EditSession;
//!
//! let mut session = EditSession::with_text("foo  bar");
//! session.apply(Intent::Move(Motion::WordRight));
//! assert_eq!(session.cursor().col, 3);
//!
//! session.apply(Intent::InsertChar('d'));
//! assert_eq!(session.text(), "food  bar");
//!
//! session.apply(Intent::Undo);
//! assert_eq!(session.text(), "foo  bar");
//! assert_eq!(session.cursor().col, 3);
//! ```

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::highlight::{HighlightingConfig, Lexer};
use crate::input::{Effect, Intent, Motion};
use crate::location::Location;
use crate::text::{
    Action, Frame, LineBuffer, NormalizedSelection, Selection, TransactionLog, Viewport, WordSpan,
    logical_column, visual_column, word_left, word_right, word_spans,
};

/// One open document and everything needed to edit and draw it.
#[derive(Clone, Debug)]
pub struct EditSession {
    buffer: LineBuffer,
    history: TransactionLog,
    lexer: Lexer,
    cursor: Location,
    /// Visual column vertical motion tries to return to.
    sticky_col: usize,
    selection: Selection,
    viewport: Viewport,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(LineBuffer::new(), Lexer::default(), Viewport::new(80, 24))
    }
}

impl EditSession {
    #[must_use]
    pub fn new(buffer: LineBuffer, lexer: Lexer, viewport: Viewport) -> Self {
        Self {
            buffer,
            history: TransactionLog::new(),
            lexer,
            cursor: Location::start(),
            sticky_col: 0,
            selection: Selection::default(),
            viewport,
        }
    }

    /// A session over `text` with default highlighting and an 80x24 view.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self::new(
            LineBuffer::with_text(text),
            Lexer::default(),
            Viewport::new(80, 24),
        )
    }

    #[must_use]
    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn history(&self) -> &TransactionLog {
        &self.history
    }

    #[must_use]
    pub fn lexer(&self) -> &Lexer {
        &self.lexer
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.buffer.lines()
    }

    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.buffer.is_modified()
    }

    pub fn set_modified(&mut self, modified: bool) {
        self.buffer.set_modified(modified);
    }

    #[must_use]
    pub fn cursor(&self) -> Location {
        self.cursor
    }

    /// Place the cursor, clamped into the document. Clears the selection.
    pub fn set_cursor(&mut self, at: Location) {
        self.cursor = self.buffer.clamp(at);
        self.selection = Selection::caret(self.cursor);
        self.sticky_col = self.cursor_visual_col();
        self.follow_cursor();
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Replace the selection. The cursor moves to `selection.end`.
    pub fn set_selection(&mut self, selection: Selection) {
        let start = self.buffer.clamp(selection.start);
        let end = self.buffer.clamp(selection.end);
        self.selection = Selection::new(start, end);
        self.cursor = end;
        self.sticky_col = self.cursor_visual_col();
        self.follow_cursor();
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.viewport.resize(width, height);
        self.follow_cursor();
    }

    #[must_use]
    pub fn tab_width(&self) -> usize {
        self.lexer.tab_width()
    }

    pub fn set_tab_width(&mut self, tab_width: usize) {
        self.lexer.set_tab_width(tab_width);
        self.sticky_col = self.cursor_visual_col();
    }

    /// Swap the highlighting rules.
    pub fn set_highlighting(&mut self, config: Arc<HighlightingConfig>) {
        self.lexer.set_config(config);
    }

    /// Run one intent as one transaction.
    ///
    /// File-level intents (save, open, quit, ...) are not handled here and
    /// return [`Effect::None`].
    pub fn apply(&mut self, intent: Intent) -> Effect {
        let before = self.cursor;
        let mut keep_selection = false;
        let mut update_sticky = true;
        let mut follow = true;

        let effect = match intent {
            Intent::InsertChar(c) => {
                self.delete_selection();
                let mut buf = [0; 4];
                self.insert_at_cursor(c.encode_utf8(&mut buf));
                Effect::Redraw
            }
            Intent::Paste(text) => {
                self.delete_selection();
                self.insert_at_cursor(&text);
                Effect::Redraw
            }
            Intent::Newline => {
                self.delete_selection();
                self.insert_at_cursor("\n");
                Effect::Redraw
            }
            Intent::Backspace => {
                if !self.delete_selection() {
                    self.backspace();
                }
                Effect::Redraw
            }
            Intent::DeleteLine => {
                self.delete_current_line();
                update_sticky = false;
                Effect::Redraw
            }
            Intent::Move(motion) => {
                update_sticky = !motion.is_vertical();
                self.move_cursor(motion);
                Effect::Redraw
            }
            Intent::Select(motion) => {
                let anchor = if self.selection.is_empty() {
                    self.cursor
                } else {
                    self.selection.start
                };
                update_sticky = !motion.is_vertical();
                self.move_cursor(motion);
                self.selection = Selection::new(anchor, self.cursor);
                keep_selection = true;
                Effect::Redraw
            }
            Intent::SelectAll => {
                let end = self.buffer.end();
                self.selection = Selection::new(Location::start(), end);
                self.cursor = end;
                keep_selection = true;
                Effect::Redraw
            }
            Intent::Scroll(delta) => {
                self.viewport.scroll(delta, self.buffer.len_lines());
                keep_selection = true;
                update_sticky = false;
                follow = false;
                Effect::Redraw
            }
            Intent::Undo => {
                if self.undo() {
                    Effect::Redraw
                } else {
                    Effect::None
                }
            }
            Intent::Redo => {
                if self.redo() {
                    Effect::Redraw
                } else {
                    Effect::None
                }
            }
            Intent::Copy => {
                keep_selection = true;
                Effect::Clipboard(self.clipboard_text())
            }
            Intent::Cut => {
                let text = self.clipboard_text();
                if !self.delete_selection() {
                    self.delete_current_line();
                    update_sticky = false;
                }
                Effect::Clipboard(text)
            }
            Intent::Find(query) => match self.find(&query) {
                Some(at) => {
                    self.select_match(at, &query);
                    keep_selection = true;
                    Effect::Redraw
                }
                None => Effect::NotFound,
            },
            Intent::Replace { find, with } => match self.find(&find) {
                Some(at) => {
                    self.select_match(at, &find);
                    self.delete_selection();
                    self.insert_at_cursor(&with);
                    self.selection = Selection::new(at, self.cursor);
                    keep_selection = true;
                    Effect::Redraw
                }
                None => Effect::NotFound,
            },
            Intent::GotoLine(n) => {
                let last = self.buffer.len_lines() - 1;
                let line = if n < 0 {
                    last
                } else {
                    usize::try_from(n.saturating_sub(1).max(0)).map_or(last, |l| l.min(last))
                };
                self.cursor = Location::new(line, 0);
                Effect::Redraw
            }
            Intent::RequestPaste => return Effect::RequestPaste,
            Intent::Prompt(prompt) => return Effect::Prompt(prompt),
            Intent::ToggleShell => return Effect::ToggleShell,
            Intent::Save
            | Intent::Open(_)
            | Intent::CloseFile
            | Intent::ForceCloseFile
            | Intent::SwitchFile(_)
            | Intent::Quit
            | Intent::ForceQuit => return Effect::None,
        };

        self.cursor = self.buffer.clamp(self.cursor);
        if !keep_selection {
            self.selection = Selection::caret(self.cursor);
        }
        if update_sticky {
            self.sticky_col = self.cursor_visual_col();
        }
        self.history.submit(before, self.cursor);
        if follow {
            self.follow_cursor();
        }
        effect
    }

    /// Text of the current selection, `None` when nothing is selected.
    #[must_use]
    pub fn selected_text(&self) -> Option<String> {
        let sel = self.selection.normalized()?;
        let (start, end) = self.clamp_range(sel.start(), sel.end());
        let first = self.buffer.line_clamped(start.line);
        if start.line == end.line {
            return Some(char_slice(&first, start.col, end.col));
        }

        let mut out = char_slice(&first, start.col, usize::MAX);
        for line in start.line + 1..end.line {
            out.push('\n');
            out.push_str(&self.buffer.line_clamped(line));
        }
        out.push('\n');
        out.push_str(&char_slice(&self.buffer.line_clamped(end.line), 0, end.col));
        Some(out)
    }

    /// Render payload for the current state.
    #[must_use]
    pub fn frame(&self) -> Frame {
        let vp = self.viewport;
        let text = self.buffer.text_range(vp.top_line, vp.bottom_line());
        let mut lines = self.lexer.tokenize_from(&text, vp.top_line);
        lines.truncate(vp.height);

        let visual = self.cursor_visual_col();
        let cursor = (vp.shows_line(self.cursor.line)
            && (vp.left_col..vp.left_col + vp.width).contains(&visual))
        .then(|| (self.cursor.line - vp.top_line, visual - vp.left_col));

        let tab_width = self.tab_width();
        let selection = self.selection.normalized().map(|sel| {
            let first = self.buffer.line_clamped(sel.min_line);
            let last = self.buffer.line_clamped(sel.max_line);
            NormalizedSelection {
                start_col: visual_column(&first, sel.start_col, tab_width),
                end_col: visual_column(&last, sel.end_col, tab_width),
                ..sel
            }
        });

        Frame {
            viewport: vp,
            lines,
            cursor,
            selection,
        }
    }

    /// Clamp both ends into the document, keeping them ordered.
    fn clamp_range(&self, start: Location, end: Location) -> (Location, Location) {
        let start = self.buffer.clamp(start);
        let end = self.buffer.clamp(end);
        (start.min(end), start.max(end))
    }

    fn cursor_visual_col(&self) -> usize {
        let line = self.buffer.line_clamped(self.cursor.line);
        visual_column(&line, self.cursor.col, self.tab_width())
    }

    fn follow_cursor(&mut self) {
        let col = self.cursor_visual_col();
        let tab_width = self.tab_width();
        self.viewport.follow(self.cursor.line, col, tab_width);
    }

    // Recording primitives. Each mutates the buffer and logs the inverse.

    fn record_insert(&mut self, line: usize, col: usize, text: &str) -> Location {
        let at = self.buffer.insert_text(line, col, text);
        if !text.is_empty() {
            self.history.add_action(Action::insert(at, text));
        }
        at
    }

    fn record_remove(&mut self, line: usize, col: usize, amount: usize) -> String {
        let line = self.buffer.clamp_line(line);
        let col = col.min(self.buffer.line_len(line));
        let amount = amount.min(col);
        let removed = self.buffer.remove_text(line, col, amount);
        if !removed.is_empty() {
            self.history
                .add_action(Action::delete(Location::new(line, col - amount), removed.clone()));
        }
        removed
    }

    fn record_delete_lines(&mut self, start: usize, count: usize) {
        if count == 0 {
            return;
        }
        let start = self.buffer.clamp_line(start);
        let removed = self.buffer.lines_removed_by(start, count);
        let text = self.buffer.delete_lines(start, count);
        self.history
            .add_action(Action::delete_lines(start, text, removed));
    }

    fn record_insert_lines(&mut self, at: usize, lines: &[String]) {
        if lines.is_empty() {
            return;
        }
        let at = at.min(self.buffer.len_lines());
        self.buffer.insert_lines(at, lines);
        self.history.add_action(Action::insert_lines(at, lines));
    }

    fn record_merge_up(&mut self, line: usize) -> Option<Location> {
        let merged = self.buffer.merge_line_up(line)?;
        let at = Location::new(line - 1, merged.col);
        if !merged.text.is_empty() {
            self.history.add_action(Action::insert(at, merged.text.clone()));
        }
        self.history
            .add_action(Action::delete_lines(line, merged.text, 1));
        Some(at)
    }

    // Editing operations built on the primitives.

    /// Insert `text` at the cursor, splitting lines at every `\n`.
    fn insert_at_cursor(&mut self, text: &str) {
        let text = if text.contains('\r') {
            text.replace('\r', "")
        } else {
            text.to_string()
        };
        let Location { line, col } = self.buffer.clamp(self.cursor);
        let parts: Vec<&str> = text.split('\n').collect();

        if let [single] = parts.as_slice() {
            self.record_insert(line, col, single);
            self.cursor = Location::new(line, col + single.chars().count());
            return;
        }

        let line_len = self.buffer.line_len(line);
        let tail = self.record_remove(line, line_len, line_len - col);
        self.record_insert(line, col, parts[0]);

        let mut new_lines: Vec<String> = parts[1..].iter().map(|p| (*p).to_string()).collect();
        let mut end_col = 0;
        if let Some(last) = new_lines.last_mut() {
            end_col = last.chars().count();
            last.push_str(&tail);
        }
        self.record_insert_lines(line + 1, &new_lines);
        self.cursor = Location::new(line + new_lines.len(), end_col);
    }

    fn backspace(&mut self) {
        let Location { line, col } = self.buffer.clamp(self.cursor);
        if col > 0 {
            self.record_remove(line, col, 1);
            self.cursor = Location::new(line, col - 1);
        } else if let Some(at) = self.record_merge_up(line) {
            self.cursor = at;
        }
    }

    fn delete_current_line(&mut self) {
        self.record_delete_lines(self.cursor.line, 1);
        let line = self.buffer.clamp_line(self.cursor.line);
        let col = logical_column(
            &self.buffer.line_clamped(line),
            self.sticky_col,
            self.tab_width(),
        );
        self.cursor = Location::new(line, col);
    }

    /// Delete the selected text. Returns `false` when nothing is selected.
    fn delete_selection(&mut self) -> bool {
        let Some(sel) = self.selection.normalized() else {
            return false;
        };
        let (start, end) = self.clamp_range(sel.start(), sel.end());

        if start.line == end.line {
            self.record_remove(start.line, end.col, end.col - start.col);
        } else {
            let first_len = self.buffer.line_len(start.line);
            self.record_remove(start.line, first_len, first_len - start.col);
            let tail = char_slice(&self.buffer.line_clamped(end.line), end.col, usize::MAX);
            self.record_insert(start.line, start.col, &tail);
            self.record_delete_lines(start.line + 1, end.line - start.line);
        }

        self.cursor = start;
        self.selection = Selection::caret(start);
        true
    }

    /// The selection, or `"\n" + line` when nothing is selected.
    fn clipboard_text(&self) -> String {
        self.selected_text().unwrap_or_else(|| {
            format!("\n{}", self.buffer.line_clamped(self.cursor.line))
        })
    }

    fn undo(&mut self) -> bool {
        let started = Instant::now();
        let Some(tx) = self.history.undo() else {
            return false;
        };
        tx.revert(&mut self.buffer);
        self.cursor = tx.location;
        debug!(actions = tx.actions.len(), elapsed = ?started.elapsed(), "undo");
        true
    }

    fn redo(&mut self) -> bool {
        let started = Instant::now();
        let Some(tx) = self.history.redo() else {
            return false;
        };
        tx.apply(&mut self.buffer);
        self.cursor = tx.after;
        debug!(actions = tx.actions.len(), elapsed = ?started.elapsed(), "redo");
        true
    }

    // Motion.

    fn move_cursor(&mut self, motion: Motion) {
        let Location { line, col } = self.buffer.clamp(self.cursor);
        match motion {
            Motion::Left => self.step_left(),
            Motion::Right => self.step_right(),
            Motion::Up => self.move_vertical(-1),
            Motion::Down => self.move_vertical(1),
            Motion::PageUp => {
                let page = self.page_size();
                self.viewport.scroll(-page, self.buffer.len_lines());
                self.move_vertical(-page);
            }
            Motion::PageDown => {
                let page = self.page_size();
                self.viewport.scroll(page, self.buffer.len_lines());
                self.move_vertical(page);
            }
            Motion::WordRight => {
                let spans = self.word_spans(line);
                match word_right(&spans, col) {
                    Some(target) => self.cursor = Location::new(line, target),
                    None => self.step_right(),
                }
            }
            Motion::WordLeft => {
                let spans = self.word_spans(line);
                match word_left(&spans, col) {
                    Some(target) => self.cursor = Location::new(line, target),
                    None => self.step_left(),
                }
            }
            Motion::LineStart => self.cursor = Location::new(line, 0),
            Motion::LineEnd => self.cursor = Location::new(line, self.buffer.line_len(line)),
            Motion::DocumentStart => self.cursor = Location::start(),
            Motion::DocumentEnd => self.cursor = self.buffer.end(),
        }
    }

    fn step_left(&mut self) {
        let Location { line, col } = self.buffer.clamp(self.cursor);
        if col > 0 {
            self.cursor = Location::new(line, col - 1);
        } else if line > 0 {
            self.cursor = Location::new(line - 1, self.buffer.line_len(line - 1));
        }
    }

    fn step_right(&mut self) {
        let Location { line, col } = self.buffer.clamp(self.cursor);
        if col < self.buffer.line_len(line) {
            self.cursor = Location::new(line, col + 1);
        } else if line + 1 < self.buffer.len_lines() {
            self.cursor = Location::new(line + 1, 0);
        }
    }

    fn move_vertical(&mut self, delta: isize) {
        let line = self
            .buffer
            .clamp_line(self.cursor.line.saturating_add_signed(delta));
        let col = logical_column(
            &self.buffer.line_clamped(line),
            self.sticky_col,
            self.tab_width(),
        );
        self.cursor = Location::new(line, col);
    }

    fn page_size(&self) -> isize {
        isize::try_from(self.viewport.height.max(1)).unwrap_or(isize::MAX)
    }

    fn word_spans(&self, line: usize) -> Vec<WordSpan> {
        let tokens = self.lexer.tokenize_line(&self.buffer.line_clamped(line));
        word_spans(&tokens)
    }

    // Search.

    /// Case-insensitive search starting on the line after the cursor and
    /// wrapping back through the cursor line.
    fn find(&self, query: &str) -> Option<Location> {
        if query.is_empty() {
            return None;
        }
        let needle = fold_case(query);
        let total = self.buffer.len_lines();
        let from = self.buffer.clamp_line(self.cursor.line);
        (1..=total)
            .map(|step| (from + step) % total)
            .find_map(|line| {
                let hay = fold_case(&self.buffer.line_clamped(line));
                hay.find(&needle)
                    .map(|byte| Location::new(line, hay[..byte].chars().count()))
            })
    }

    fn select_match(&mut self, at: Location, query: &str) {
        let end = Location::new(at.line, at.col + query.chars().count());
        self.cursor = at;
        self.selection = Selection::new(at, end);
    }
}

/// Lowercase char by char so char indices stay aligned with the input.
fn fold_case(s: &str) -> String {
    s.chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}

fn char_slice(s: &str, start: usize, end: usize) -> String {
    s.chars().skip(start).take(end.saturating_sub(start)).collect()
}

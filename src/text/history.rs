//! Transaction-based undo/redo.
//!
//! Every primitive mutation the session performs on a [`LineBuffer`] is
//! recorded as an [`Action`]. Actions emitted while handling one user intent
//! collect in a pending group; [`TransactionLog::submit`] seals that group into
//! a [`Transaction`] stamped with the cursor before and after the edit.
//!
//! The log is linear: it holds at most [`HISTORY_CAPACITY`] transactions and an
//! undo cursor. Submitting after an undo discards everything the undo made
//! redoable.
//!
//! # Examples
//!
//! ```
//! use gim::location::Location;
//! use gim::text::{Action, LineBuffer, TransactionLog};
//!
//! let mut buffer = LineBuffer::with_text("hello");
//! let mut log = TransactionLog::new();
//!
//! let at = buffer.insert_text(0, 5, "!");
//! log.add_action(Action::insert(at, "!"));
//! log.submit(Location::new(0, 5), Location::new(0, 6));
//!
//! let tx = log.undo().unwrap();
//! tx.revert(&mut buffer);
//! assert_eq!(buffer.text(), "hello");
//! assert_eq!(tx.location, Location::new(0, 5));
//! ```

use std::collections::VecDeque;

use crate::location::Location;
use crate::text::LineBuffer;

/// Maximum number of committed transactions kept for undo.
pub const HISTORY_CAPACITY: usize = 100;

/// Kind of primitive mutation an [`Action`] records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// `text` was inserted at `location`.
    Insert,
    /// `text` was removed; `location.col` is where the removed range started.
    Delete,
    /// Whole lines starting at `location.line` were removed; `text` holds them
    /// joined by `\n`.
    DeleteLine,
    /// Whole lines were spliced in at `location.line`.
    InsertLine,
}

/// One primitive mutation, with enough information to invert it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Action {
    pub kind: ActionKind,
    pub location: Location,
    pub text: String,
    /// Characters for `Insert`/`Delete`; lines structurally added or removed
    /// for `InsertLine`/`DeleteLine`.
    pub amount: usize,
}

impl Action {
    /// Record `text` inserted at `location`.
    #[must_use]
    pub fn insert(location: Location, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            kind: ActionKind::Insert,
            location,
            amount: text.chars().count(),
            text,
        }
    }

    /// Record `text` removed from a line, starting at `location`.
    #[must_use]
    pub fn delete(location: Location, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            kind: ActionKind::Delete,
            location,
            amount: text.chars().count(),
            text,
        }
    }

    /// Record lines removed at `line`. `removed` is how many lines actually
    /// disappeared, which is one less than the recorded count when the whole
    /// document was blanked.
    #[must_use]
    pub fn delete_lines(line: usize, text: impl Into<String>, removed: usize) -> Self {
        Self {
            kind: ActionKind::DeleteLine,
            location: Location::new(line, 0),
            text: text.into(),
            amount: removed,
        }
    }

    /// Record `lines` spliced in at `line`.
    #[must_use]
    pub fn insert_lines<S: AsRef<str>>(line: usize, lines: &[S]) -> Self {
        let text = lines
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            kind: ActionKind::InsertLine,
            location: Location::new(line, 0),
            text,
            amount: lines.len(),
        }
    }

    /// Perform the recorded mutation again.
    pub fn apply(&self, buffer: &mut LineBuffer) {
        let Location { line, col } = self.location;
        match self.kind {
            ActionKind::Insert => {
                buffer.insert_text(line, col, &self.text);
            }
            ActionKind::Delete => {
                buffer.remove_text(line, col + self.amount, self.amount);
            }
            ActionKind::DeleteLine => {
                buffer.delete_lines(line, self.recorded_lines().len());
            }
            ActionKind::InsertLine => {
                buffer.insert_lines(line, &self.recorded_lines());
            }
        }
    }

    /// Undo the recorded mutation.
    pub fn revert(&self, buffer: &mut LineBuffer) {
        let Location { line, col } = self.location;
        match self.kind {
            ActionKind::Insert => {
                buffer.remove_text(line, col + self.amount, self.amount);
            }
            ActionKind::Delete => {
                buffer.insert_text(line, col, &self.text);
            }
            ActionKind::DeleteLine => {
                let lines = self.recorded_lines();
                if self.amount < lines.len() {
                    // The deletion blanked the document.
                    buffer.replace_lines(&lines);
                } else {
                    buffer.insert_lines(line, &lines);
                }
            }
            ActionKind::InsertLine => {
                buffer.delete_lines(line, self.amount);
            }
        }
    }

    fn recorded_lines(&self) -> Vec<&str> {
        self.text.split('\n').collect()
    }
}

/// Atomic group of actions tied to one user-visible edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    /// Actions, newest first.
    pub actions: Vec<Action>,
    /// Cursor when the edit began; undo returns here.
    pub location: Location,
    /// Cursor when the edit finished; redo returns here.
    pub after: Location,
}

impl Transaction {
    /// Revert every action, newest first.
    pub fn revert(&self, buffer: &mut LineBuffer) {
        for action in &self.actions {
            action.revert(buffer);
        }
    }

    /// Re-apply every action, oldest first.
    pub fn apply(&self, buffer: &mut LineBuffer) {
        for action in self.actions.iter().rev() {
            action.apply(buffer);
        }
    }
}

/// Bounded linear undo history with a pending transaction.
#[derive(Clone, Debug)]
pub struct TransactionLog {
    log: VecDeque<Transaction>,
    /// Index of the next transaction to undo; `None` when nothing is undoable.
    cursor: Option<usize>,
    /// Actions of the open transaction, oldest first.
    pending: Vec<Action>,
    capacity: usize,
}

impl Default for TransactionLog {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl TransactionLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log that keeps at most `capacity` transactions (minimum 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            log: VecDeque::new(),
            cursor: None,
            pending: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Add an action to the open transaction.
    pub fn add_action(&mut self, action: Action) {
        self.pending.push(action);
    }

    /// True if actions are waiting for [`submit`](Self::submit).
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Seal the open transaction.
    ///
    /// Returns `false` without touching the log if no action was added.
    /// Otherwise every redoable transaction is discarded, the new one is
    /// appended, and the oldest entry is evicted past capacity.
    pub fn submit(&mut self, location: Location, after: Location) -> bool {
        if self.pending.is_empty() {
            return false;
        }
        let mut actions = std::mem::take(&mut self.pending);
        actions.reverse();

        let keep = self.cursor.map_or(0, |c| c + 1);
        if keep < self.log.len() {
            tracing::debug!(discarded = self.log.len() - keep, "redo history dropped");
            self.log.truncate(keep);
        }

        self.log.push_back(Transaction {
            actions,
            location,
            after,
        });
        if self.log.len() > self.capacity {
            self.log.pop_front();
        }
        self.cursor = Some(self.log.len() - 1);
        true
    }

    /// Step back one transaction. The caller reverts it and moves the cursor
    /// to its `location`.
    pub fn undo(&mut self) -> Option<&Transaction> {
        let idx = self.cursor?;
        self.cursor = idx.checked_sub(1);
        self.log.get(idx)
    }

    /// Step forward one transaction. The caller applies it and moves the
    /// cursor to its `after`.
    pub fn redo(&mut self) -> Option<&Transaction> {
        let next = self.cursor.map_or(0, |c| c + 1);
        if next >= self.log.len() {
            return None;
        }
        self.cursor = Some(next);
        self.log.get(next)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor.map_or(0, |c| c + 1) < self.log.len()
    }

    /// Undo cursor position; `None` means nothing is undoable.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Number of committed transactions, undone ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.log.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop all history and any pending actions.
    pub fn clear(&mut self) {
        self.log.clear();
        self.pending.clear();
        self.cursor = None;
    }
}

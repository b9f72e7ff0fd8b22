//! Logical intents and the effects they produce.

use std::path::PathBuf;

/// Cursor motion, with or without extending the selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    WordLeft,
    WordRight,
    LineStart,
    LineEnd,
    DocumentStart,
    DocumentEnd,
    PageUp,
    PageDown,
}

impl Motion {
    /// Vertical motions keep the sticky visual column.
    #[must_use]
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down | Self::PageUp | Self::PageDown)
    }
}

/// Text the front end must ask the user for before the intent can run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Prompt {
    Find,
    Replace,
    Goto,
    Open,
}

/// Everything a user can ask the editor to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Type one character; `'\n'` splits the line.
    InsertChar(char),
    /// Insert text from the clipboard, possibly spanning lines.
    Paste(String),
    Newline,
    Backspace,
    DeleteLine,
    Move(Motion),
    Select(Motion),
    SelectAll,
    /// Scroll the view by a number of lines without moving the cursor.
    Scroll(isize),
    Undo,
    Redo,
    Cut,
    Copy,
    /// Ask the front end to read the clipboard and send [`Intent::Paste`].
    RequestPaste,
    Find(String),
    Replace { find: String, with: String },
    /// 1-based line number; `-1` means the last line.
    GotoLine(i64),
    Prompt(Prompt),
    Save,
    Open(PathBuf),
    CloseFile,
    /// Close the current file even if it has unsaved changes.
    ForceCloseFile,
    SwitchFile(isize),
    ToggleShell,
    Quit,
    /// Quit even if some files have unsaved changes.
    ForceQuit,
}

/// What the front end should do after an intent ran.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Nothing changed.
    None,
    Redraw,
    /// Put this text on the clipboard.
    Clipboard(String),
    /// Read the clipboard and answer with [`Intent::Paste`].
    RequestPaste,
    /// Show a prompt and answer with the matching intent.
    Prompt(Prompt),
    NotFound,
    Saved(PathBuf),
    /// Saving failed; the document is unchanged in memory.
    SaveFailed(String),
    /// Opening a file failed.
    OpenFailed(String),
    /// The current file has unsaved changes; confirm with
    /// [`Intent::ForceCloseFile`].
    ConfirmClose,
    /// Some file has unsaved changes; confirm with [`Intent::ForceQuit`].
    ConfirmQuit,
    ToggleShell,
    Quit,
}

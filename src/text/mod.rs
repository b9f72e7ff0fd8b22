//! Document storage, undo history and column mapping.
//!
//! Key types:
//!
//! - [`LineBuffer`]: rope-backed lines with clamping mutation primitives
//! - [`TransactionLog`]: bounded linear undo/redo over [`Action`]s
//! - [`Selection`]: two endpoints, normalized before use
//! - [`Viewport`]: scrolling window kept around the cursor
//!
//! # Examples
//!
//! ```
//! use gim::text::{visual_column, LineBuffer};
//!
//! let mut buffer = LineBuffer::with_text("\tfoo");
//! buffer.insert_text(0, 4, "d");
//! assert_eq!(buffer.text(), "\tfood");
//! assert_eq!(visual_column("\tfood", 1, 4), 4);
//! ```

mod buffer;
mod coords;
mod history;
mod rope;
mod view;

pub use buffer::{LineBuffer, MergedLine};
pub use coords::{
    NormalizedSelection, Selection, WordSpan, logical_column, normalize_selection, tab_advance,
    visual_column, visual_width, word_boundary_index, word_left, word_right, word_spans,
};
pub use history::{Action, ActionKind, Transaction, TransactionLog, HISTORY_CAPACITY};
pub use rope::RopeWrapper;
pub use view::{Frame, Viewport};

//! `gim` - terminal text editor core
//!
//! A line buffer with transactional undo/redo, a single-pass highlighting
//! lexer and tab-aware coordinate mapping, driven through a closed set of
//! editing intents. Terminal drawing, the embedded shell and the clipboard
//! live outside the core; [`output::OutputQueue`] and [`input::Effect`] are
//! the seams they attach to.
//!
//! # Quick start
//!
//! ```
//! use gim::input::{Intent, KeyEvent, Keymap};
//! use gim::EditSession;
//!
//! let keymap = Keymap::new();
//! let mut session = EditSession::with_text("fn main() {}");
//!
//! let intent = keymap.resolve(KeyEvent::char('x')).unwrap();
//! session.apply(intent);
//! assert_eq!(session.text(), "xfn main() {}");
//!
//! session.apply(Intent::Undo);
//! assert_eq!(session.text(), "fn main() {}");
//! ```

// Crate-level lint configuration
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)] // Allow text::TextBuffer style names
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::must_use_candidate)] // Not every getter needs #[must_use]
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::inherent_to_string)] // to_string methods are convenient
#![allow(clippy::should_implement_trait)] // from_str naming is intentional

pub mod color;
pub mod config;
pub mod error;
pub mod highlight;
pub mod input;
pub mod location;
pub mod logging;
pub mod output;
pub mod persistence;
pub mod session;
pub mod text;
pub mod workspace;

// Re-export core types at crate root
pub use color::{ColorRegistry, Rgb};
pub use config::{ConfigPaths, EditorConfig};
pub use error::{Error, Result};
pub use location::Location;
pub use output::OutputQueue;
pub use session::EditSession;
pub use workspace::{Document, Workspace};

// Re-export editing types
pub use highlight::{HighlightingConfig, Lexer, Token, TokenKind};
pub use input::{Effect, Intent, KeyCode, KeyEvent, KeyModifiers, Keymap, Motion};
pub use text::{LineBuffer, Selection, TransactionLog};

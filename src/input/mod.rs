//! Input boundary: decoded key events, key bindings and logical intents.
//!
//! Terminal byte decoding happens outside the crate. The front end hands over
//! a [`KeyEvent`], [`Keymap::resolve`] turns it into an [`Intent`], and the
//! workspace answers with an [`Effect`] telling the front end what to do next.

mod intent;
mod keyboard;
mod keymap;

pub use intent::{Effect, Intent, Motion, Prompt};
pub use keyboard::{KeyCode, KeyEvent, KeyModifiers};
pub use keymap::Keymap;

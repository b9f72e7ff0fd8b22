//! Key bindings from decoded key events to intents.

use std::collections::HashMap;

use super::intent::{Intent, Motion, Prompt};
use super::keyboard::{KeyCode, KeyEvent, KeyModifiers};

/// Maps key events to intents.
///
/// Unbound printable characters (with or without Shift) insert themselves.
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<KeyEvent, Intent>,
}

impl Default for Keymap {
    fn default() -> Self {
        let ctrl = KeyModifiers::CTRL;
        let shift = KeyModifiers::SHIFT;
        let alt = KeyModifiers::ALT;
        let none = KeyModifiers::empty();

        let mut map = Self {
            bindings: HashMap::new(),
        };

        for (c, intent) in [
            ('z', Intent::Undo),
            ('y', Intent::Redo),
            ('x', Intent::Cut),
            ('c', Intent::Copy),
            ('v', Intent::RequestPaste),
            ('d', Intent::DeleteLine),
            ('a', Intent::SelectAll),
            ('f', Intent::Prompt(Prompt::Find)),
            ('r', Intent::Prompt(Prompt::Replace)),
            ('g', Intent::Prompt(Prompt::Goto)),
            ('o', Intent::Prompt(Prompt::Open)),
            ('s', Intent::Save),
            ('q', Intent::CloseFile),
            ('t', Intent::ToggleShell),
        ] {
            map.bind(KeyEvent::new(KeyCode::Char(c), ctrl), intent);
        }

        for (code, motion) in [
            (KeyCode::Left, Motion::Left),
            (KeyCode::Right, Motion::Right),
            (KeyCode::Up, Motion::Up),
            (KeyCode::Down, Motion::Down),
            (KeyCode::Home, Motion::LineStart),
            (KeyCode::End, Motion::LineEnd),
            (KeyCode::PageUp, Motion::PageUp),
            (KeyCode::PageDown, Motion::PageDown),
        ] {
            map.bind(KeyEvent::new(code, none), Intent::Move(motion));
            map.bind(KeyEvent::new(code, shift), Intent::Select(motion));
        }

        for (code, motion) in [
            (KeyCode::Left, Motion::WordLeft),
            (KeyCode::Right, Motion::WordRight),
            (KeyCode::Home, Motion::DocumentStart),
            (KeyCode::End, Motion::DocumentEnd),
        ] {
            map.bind(KeyEvent::new(code, ctrl), Intent::Move(motion));
            map.bind(KeyEvent::new(code, ctrl | shift), Intent::Select(motion));
        }

        map.bind(KeyEvent::new(KeyCode::Up, ctrl), Intent::Scroll(-1));
        map.bind(KeyEvent::new(KeyCode::Down, ctrl), Intent::Scroll(1));
        map.bind(KeyEvent::new(KeyCode::Left, alt), Intent::SwitchFile(-1));
        map.bind(KeyEvent::new(KeyCode::Right, alt), Intent::SwitchFile(1));

        map.bind(KeyEvent::key(KeyCode::Enter), Intent::Newline);
        map.bind(KeyEvent::key(KeyCode::Tab), Intent::InsertChar('\t'));
        map.bind(KeyEvent::key(KeyCode::Backspace), Intent::Backspace);
        map.bind(KeyEvent::key(KeyCode::Esc), Intent::Quit);
        map
    }
}

impl Keymap {
    /// The default bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A keymap with no bindings; only plain characters resolve.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Bind `event`, replacing any previous binding.
    pub fn bind(&mut self, event: KeyEvent, intent: Intent) {
        self.bindings.insert(event.normalized(), intent);
    }

    /// Remove the binding for `event`.
    pub fn unbind(&mut self, event: KeyEvent) -> Option<Intent> {
        self.bindings.remove(&event.normalized())
    }

    /// Intent for `event`, if any.
    #[must_use]
    pub fn resolve(&self, event: KeyEvent) -> Option<Intent> {
        let event = event.normalized();
        if let Some(intent) = self.bindings.get(&event) {
            return Some(intent.clone());
        }
        match event.code {
            KeyCode::Char(c) if !event.ctrl() && !event.alt() && !c.is_control() => {
                Some(Intent::InsertChar(c))
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

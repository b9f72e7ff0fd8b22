//! RGB colors and terminal color-pair allocation.
//!
//! This module provides the [`Rgb`] type used by highlighting configuration
//! and tokens, and [`ColorRegistry`], which a renderer owns to map each
//! distinct RGB triple onto a terminal color-pair id.
//!
//! # Examples
//!
//! ```
//! use gim::color::{ColorRegistry, Rgb};
//!
//! let mut registry = ColorRegistry::new();
//! let keyword = Rgb::from_hex("#cc7832").unwrap();
//!
//! let id = registry.pair_for(keyword);
//! assert_eq!(id, 1);
//! assert_eq!(registry.pair_for(keyword), id); // stable once allocated
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Opaque RGB color with 8-bit channels.
///
/// Serialized as a three element array, `[r, g, b]`, which is the form the
/// highlighting and editor configuration files use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Near-white used as the fallback color for every token class.
    pub const FOREGROUND: Self = Self::new(254, 254, 254);

    /// Dim gray used for line numbers.
    pub const GRAY: Self = Self::new(128, 128, 128);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB`, `RRGGBB` or the short `#RGB` form.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }

        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
                Some(Self::new(r * 17, g * 17, b * 17))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::new(r, g, b))
            }
            _ => None,
        }
    }

    /// Like [`Rgb::from_hex`] but reports the offending input.
    pub fn parse(hex: &str) -> Result<Self> {
        Self::from_hex(hex).ok_or_else(|| Error::InvalidColor(hex.to_string()))
    }

    /// Channels rescaled to the 0..=1000 range curses-style terminals use
    /// when redefining a palette entry.
    #[must_use]
    pub fn to_scale_1000(self) -> [u16; 3] {
        let scale = |v: u8| (u32::from(v) * 1000 / 255) as u16;
        [scale(self.r), scale(self.g), scale(self.b)]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        [color.r, color.g, color.b]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Allocates terminal color-pair ids for RGB triples.
///
/// Owned by the renderer; the editing core never touches it. Ids start at 1
/// because pair 0 is reserved by terminals for the default colors.
#[derive(Clone, Debug)]
pub struct ColorRegistry {
    pairs: HashMap<Rgb, u16>,
    next_id: u16,
}

impl Default for ColorRegistry {
    fn default() -> Self {
        Self {
            pairs: HashMap::new(),
            next_id: 1,
        }
    }
}

impl ColorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair id for `color`, allocating the next free id on first use.
    pub fn pair_for(&mut self, color: Rgb) -> u16 {
        if let Some(&id) = self.pairs.get(&color) {
            return id;
        }
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        self.pairs.insert(color, id);
        id
    }

    /// Pair id for `color` if it has already been allocated.
    #[must_use]
    pub fn get(&self, color: Rgb) -> Option<u16> {
        self.pairs.get(&color).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Forget every allocation, e.g. after the terminal palette was reset.
    pub fn clear(&mut self) {
        self.pairs.clear();
        self.next_id = 1;
    }
}

//! Per-extension highlighting rules.
//!
//! A [`HighlightingConfig`] is an immutable value: the lexer swaps the whole
//! thing when the active file's extension changes. Rules live in
//! `highlighting/<ext>.json` under the config home, with `default.json` as the
//! shared fallback.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::color::Rgb;
use crate::error::{Error, Result};

/// File consulted when no extension-specific rules exist.
pub const DEFAULT_HIGHLIGHTING_FILE: &str = "default.json";

/// A set of identifiers sharing a color.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenClass {
    pub tokens: Vec<String>,
    pub color: Rgb,
}

impl Default for TokenClass {
    fn default() -> Self {
        Self {
            tokens: Vec::new(),
            color: Rgb::FOREGROUND,
        }
    }
}

/// A color for a token class recognized by shape rather than by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorClass {
    pub color: Rgb,
}

impl Default for ColorClass {
    fn default() -> Self {
        Self {
            color: Rgb::FOREGROUND,
        }
    }
}

/// Classification sets and colors for one language.
///
/// Missing keys take the built-in default, so a file only needs to name what
/// it changes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightingConfig {
    pub literals: TokenClass,
    pub built_ins: TokenClass,
    pub types: TokenClass,
    pub keywords: TokenClass,
    /// Only the color is used; comment syntax is fixed.
    pub comment: TokenClass,
    pub digits: ColorClass,
    pub strings: ColorClass,
    pub default: ColorClass,
}

impl HighlightingConfig {
    /// Read rules from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write rules as indented JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Rules for files with extension `ext`, looked up in `dir`.
    ///
    /// Tries `<ext>.json`, then `default.json`, then the built-in default.
    /// Never fails: unreadable or malformed files are logged and skipped.
    #[must_use]
    pub fn for_extension(dir: &Path, ext: Option<&str>) -> Self {
        let candidates = ext
            .filter(|e| !e.is_empty())
            .map(|e| dir.join(format!("{}.json", e.to_ascii_lowercase())))
            .into_iter()
            .chain(std::iter::once(dir.join(DEFAULT_HIGHLIGHTING_FILE)));

        for path in candidates {
            match Self::load(&path) {
                Ok(config) => {
                    debug!(path = %path.display(), "loaded highlighting rules");
                    return config;
                }
                Err(err) if err.is_not_found() => {
                    debug!(path = %path.display(), "no highlighting rules");
                }
                Err(err) => {
                    warn!(error = %err, "skipping highlighting rules");
                }
            }
        }
        Self::default()
    }

    /// Path of the rules file for `ext` inside `dir`.
    #[must_use]
    pub fn path_for(dir: &Path, ext: &str) -> PathBuf {
        dir.join(format!("{ext}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let config: HighlightingConfig = serde_json::from_str(
            r#"{"keywords": {"tokens": ["fn"], "color": [1, 2, 3]}}"#,
        )
        .unwrap();
        assert_eq!(config.keywords.tokens, vec!["fn"]);
        assert_eq!(config.keywords.color, Rgb::new(1, 2, 3));
        assert_eq!(config.literals, TokenClass::default());
        assert_eq!(config.default.color, Rgb::FOREGROUND);
    }

    #[test]
    fn lookup_falls_back_to_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut shared = HighlightingConfig::default();
        shared.digits.color = Rgb::new(9, 9, 9);
        shared
            .save(&dir.path().join(DEFAULT_HIGHLIGHTING_FILE))
            .unwrap();

        let config = HighlightingConfig::for_extension(dir.path(), Some("go"));
        assert_eq!(config.digits.color, Rgb::new(9, 9, 9));
    }

    #[test]
    fn extension_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let mut go = HighlightingConfig::default();
        go.types.tokens = vec!["int".into()];
        go.save(&HighlightingConfig::path_for(dir.path(), "go"))
            .unwrap();
        HighlightingConfig::default()
            .save(&dir.path().join(DEFAULT_HIGHLIGHTING_FILE))
            .unwrap();

        let config = HighlightingConfig::for_extension(dir.path(), Some("GO"));
        assert_eq!(config.types.tokens, vec!["int"]);
    }

    #[test]
    fn malformed_files_fall_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("rs.json"), "{ not json").unwrap();

        let config = HighlightingConfig::for_extension(dir.path(), Some("rs"));
        assert_eq!(config, HighlightingConfig::default());

        let err = HighlightingConfig::load(&dir.path().join("rs.json")).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}

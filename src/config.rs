//! Editor configuration and the on-disk config layout.
//!
//! Everything lives under `<home>/.gim/`:
//!
//! ```text
//! .gim/
//! ├── config.config          editor settings (JSON)
//! ├── logs.txt               log output
//! └── highlighting/
//!     ├── default.json       shared highlighting rules
//!     └── <ext>.json         per-extension rules
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::highlight::config::{HighlightingConfig, DEFAULT_HIGHLIGHTING_FILE};

/// Tab width used when no configuration says otherwise.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Name of the config directory inside the home directory.
pub const CONFIG_DIR: &str = ".gim";

/// A single color setting, stored as `{"color": [r, g, b]}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSetting {
    pub color: Rgb,
}

impl From<Rgb> for ColorSetting {
    fn from(color: Rgb) -> Self {
        Self { color }
    }
}

/// Editor-wide settings read from `config.config`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    #[serde(rename = "line_number")]
    pub line_number_color: ColorSetting,
    pub background_color: ColorSetting,
    pub line_number_width: usize,
    pub tab_width: usize,
    pub folder_color: ColorSetting,
    pub file_color: ColorSetting,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            line_number_color: Rgb::GRAY.into(),
            background_color: Rgb::BLACK.into(),
            line_number_width: 5,
            tab_width: DEFAULT_TAB_WIDTH,
            folder_color: Rgb::new(104, 151, 187).into(),
            file_color: Rgb::FOREGROUND.into(),
        }
    }
}

impl EditorConfig {
    /// Read settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let mut config: Self = serde_json::from_str(&raw).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        config.tab_width = config.tab_width.max(1);
        Ok(config)
    }

    /// Write settings as indented JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Settings from `path`, writing defaults there if it does not exist.
    ///
    /// A malformed file is logged and replaced by defaults in memory only.
    #[must_use]
    pub fn load_or_create(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) if err.is_not_found() => {
                let config = Self::default();
                if let Err(err) = config.save(path) {
                    warn!(error = %err, "could not write default editor config");
                } else {
                    info!(path = %path.display(), "wrote default editor config");
                }
                config
            }
            Err(err) => {
                warn!(error = %err, "using default editor config");
                Self::default()
            }
        }
    }
}

/// Locations of every file under the config directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigPaths {
    root: PathBuf,
}

impl ConfigPaths {
    /// Paths rooted at `<home>/.gim`.
    #[must_use]
    pub fn new(home: &Path) -> Self {
        Self {
            root: home.join(CONFIG_DIR),
        }
    }

    /// Paths under the user's home directory, or the working directory if no
    /// home can be determined.
    #[must_use]
    pub fn from_home() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(&home)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn highlighting_dir(&self) -> PathBuf {
        self.root.join("highlighting")
    }

    #[must_use]
    pub fn editor_config(&self) -> PathBuf {
        self.root.join("config.config")
    }

    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.root.join("logs.txt")
    }

    /// Create the directories and write `default.json` if it is missing.
    pub fn ensure_layout(&self) -> Result<()> {
        let highlighting = self.highlighting_dir();
        fs::create_dir_all(&highlighting)?;
        let default = highlighting.join(DEFAULT_HIGHLIGHTING_FILE);
        if !default.exists() {
            HighlightingConfig::default().save(&default)?;
            info!(path = %default.display(), "wrote default highlighting rules");
        }
        Ok(())
    }

    /// Highlighting rules for `ext`, with the usual fallbacks.
    #[must_use]
    pub fn highlighting_for(&self, ext: Option<&str>) -> HighlightingConfig {
        HighlightingConfig::for_extension(&self.highlighting_dir(), ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = EditorConfig::default();
        assert_eq!(config.line_number_color.color, Rgb::new(128, 128, 128));
        assert_eq!(config.background_color.color, Rgb::new(0, 0, 0));
        assert_eq!(config.line_number_width, 5);
        assert_eq!(config.tab_width, 4);
        assert_eq!(config.folder_color.color, Rgb::new(104, 151, 187));
        assert_eq!(config.file_color.color, Rgb::new(254, 254, 254));
    }

    #[test]
    fn json_keys_use_file_names() {
        let json = serde_json::to_value(EditorConfig::default()).unwrap();
        assert_eq!(json["line_number"]["color"], serde_json::json!([128, 128, 128]));
        assert_eq!(json["tab_width"], 4);

        let config: EditorConfig = serde_json::from_str(r#"{"tab_width": 8}"#).unwrap();
        assert_eq!(config.tab_width, 8);
        assert_eq!(config.line_number_width, 5);
    }

    #[test]
    fn load_or_create_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.config");
        let config = EditorConfig::load_or_create(&path);
        assert_eq!(config, EditorConfig::default());
        assert!(path.exists());

        fs::write(&path, r#"{"tab_width": 0}"#).unwrap();
        assert_eq!(EditorConfig::load_or_create(&path).tab_width, 1);

        fs::write(&path, "garbage").unwrap();
        assert_eq!(EditorConfig::load_or_create(&path), EditorConfig::default());
    }

    #[test]
    fn layout_is_created_under_home() {
        let home = tempfile::tempdir().unwrap();
        let paths = ConfigPaths::new(home.path());
        assert_eq!(paths.root(), home.path().join(".gim"));
        assert_eq!(paths.log_file(), home.path().join(".gim/logs.txt"));

        paths.ensure_layout().unwrap();
        assert!(paths.highlighting_dir().join("default.json").exists());
        assert_eq!(paths.highlighting_for(Some("rs")), HighlightingConfig::default());
        // Idempotent.
        paths.ensure_layout().unwrap();
    }
}

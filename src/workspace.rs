//! Open documents and the file-level intents.
//!
//! Each [`Document`] owns its own [`EditSession`], so cursor, selection and
//! undo history survive switching between files. Highlighting rules are
//! chosen by file extension and shared between documents of the same kind.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::{ConfigPaths, EditorConfig};
use crate::error::Result;
use crate::highlight::{HighlightingConfig, Lexer};
use crate::input::{Effect, Intent};
use crate::persistence;
use crate::session::EditSession;
use crate::text::{LineBuffer, Viewport};

/// A file and its editing session.
#[derive(Clone, Debug)]
pub struct Document {
    path: PathBuf,
    session: EditSession,
}

impl Document {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name shown in the tab bar.
    #[must_use]
    pub fn name(&self) -> String {
        self.path.file_name().map_or_else(
            || self.path.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        )
    }

    /// Tab title, prefixed with `*` when there are unsaved changes.
    #[must_use]
    pub fn title(&self) -> String {
        if self.session.is_modified() {
            format!("*{}", self.name())
        } else {
            self.name()
        }
    }

    #[must_use]
    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditSession {
        &mut self.session
    }
}

/// Ordered list of open documents with one active.
#[derive(Debug)]
pub struct Workspace {
    documents: Vec<Document>,
    active: usize,
    paths: ConfigPaths,
    config: EditorConfig,
    highlighting: HashMap<String, Arc<HighlightingConfig>>,
    width: usize,
    height: usize,
}

impl Workspace {
    /// An empty workspace using `paths` for highlighting lookups.
    #[must_use]
    pub fn new(paths: ConfigPaths, config: EditorConfig) -> Self {
        Self {
            documents: Vec::new(),
            active: 0,
            paths,
            config,
            highlighting: HashMap::new(),
            width: 80,
            height: 24,
        }
    }

    /// Prepare the config directory and read the editor settings.
    pub fn load(paths: ConfigPaths) -> Result<Self> {
        paths.ensure_layout()?;
        let config = EditorConfig::load_or_create(&paths.editor_config());
        Ok(Self::new(paths, config))
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        (!self.documents.is_empty()).then_some(self.active)
    }

    #[must_use]
    pub fn active(&self) -> Option<&Document> {
        self.documents.get(self.active)
    }

    pub fn active_mut(&mut self) -> Option<&mut Document> {
        self.documents.get_mut(self.active)
    }

    /// Titles of every open document in order.
    #[must_use]
    pub fn titles(&self) -> Vec<String> {
        self.documents.iter().map(Document::title).collect()
    }

    #[must_use]
    pub fn any_unsaved(&self) -> bool {
        self.documents.iter().any(|d| d.session.is_modified())
    }

    /// Resize the editing area of every document.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        for doc in &mut self.documents {
            doc.session.resize(width, height);
        }
    }

    /// Open `path` and make it active, returning its index.
    ///
    /// A path that is already open is switched to. A missing file opens as an
    /// empty document marked modified, so saving creates it.
    pub fn open(&mut self, path: &Path) -> Result<usize> {
        if let Some(idx) = self.documents.iter().position(|d| d.path == path) {
            debug!(path = %path.display(), "already open");
            self.active = idx;
            return Ok(idx);
        }

        let buffer = match persistence::load_buffer(path) {
            Ok(buffer) => buffer,
            Err(err) if err.is_not_found() => {
                info!(path = %path.display(), "new file");
                let mut buffer = LineBuffer::new();
                buffer.set_modified(true);
                buffer
            }
            Err(err) => return Err(err),
        };

        let ext = path.extension().map(|e| e.to_string_lossy());
        let highlighting = self.highlighting_for(ext.as_deref());
        let lexer = Lexer::new(highlighting, self.config.tab_width);
        let session = EditSession::new(buffer, lexer, Viewport::new(self.width, self.height));

        self.documents.push(Document {
            path: path.to_path_buf(),
            session,
        });
        self.active = self.documents.len() - 1;
        Ok(self.active)
    }

    /// Move `delta` documents along the list, wrapping at both ends.
    pub fn switch(&mut self, delta: isize) {
        let len = self.documents.len();
        if len == 0 {
            return;
        }
        let len = isize::try_from(len).unwrap_or(isize::MAX);
        let current = isize::try_from(self.active).unwrap_or(0);
        self.active = usize::try_from((current + delta).rem_euclid(len)).unwrap_or(0);
    }

    /// Close the active document, discarding unsaved changes.
    pub fn close_current(&mut self) -> Option<Document> {
        if self.documents.is_empty() {
            return None;
        }
        let doc = self.documents.remove(self.active);
        if self.active >= self.documents.len() {
            self.active = self.documents.len().saturating_sub(1);
        }
        debug!(path = %doc.path.display(), "closed");
        Some(doc)
    }

    /// Write the active document to its path.
    pub fn save_current(&mut self) -> Effect {
        let Some(doc) = self.documents.get_mut(self.active) else {
            return Effect::None;
        };
        match persistence::save(&doc.path, &doc.session.text()) {
            Ok(()) => {
                doc.session.set_modified(false);
                Effect::Saved(doc.path.clone())
            }
            Err(err) => {
                warn!(path = %doc.path.display(), error = %err, "save failed");
                Effect::SaveFailed(err.to_string())
            }
        }
    }

    /// Handle file-level intents and pass the rest to the active session.
    pub fn apply(&mut self, intent: Intent) -> Effect {
        match intent {
            Intent::Save => self.save_current(),
            Intent::Open(path) => match self.open(&path) {
                Ok(_) => Effect::Redraw,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "open failed");
                    Effect::OpenFailed(err.to_string())
                }
            },
            Intent::CloseFile => match self.active() {
                Some(doc) if doc.session.is_modified() => Effect::ConfirmClose,
                Some(_) => {
                    self.close_current();
                    Effect::Redraw
                }
                None => Effect::None,
            },
            Intent::ForceCloseFile => {
                if self.close_current().is_some() {
                    Effect::Redraw
                } else {
                    Effect::None
                }
            }
            Intent::SwitchFile(delta) => {
                self.switch(delta);
                Effect::Redraw
            }
            Intent::Quit if self.any_unsaved() => Effect::ConfirmQuit,
            Intent::Quit | Intent::ForceQuit => Effect::Quit,
            other => match self.active_mut() {
                Some(doc) => doc.session.apply(other),
                None => Effect::None,
            },
        }
    }

    fn highlighting_for(&mut self, ext: Option<&str>) -> Arc<HighlightingConfig> {
        let key = ext.map(str::to_lowercase).unwrap_or_default();
        if let Some(config) = self.highlighting.get(&key) {
            return Arc::clone(config);
        }
        let config = Arc::new(self.paths.highlighting_for(ext));
        self.highlighting.insert(key, Arc::clone(&config));
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::highlight::TokenKind;
    use crate::location::Location;
    use std::fs;

    fn workspace(home: &Path) -> Workspace {
        Workspace::load(ConfigPaths::new(home)).unwrap()
    }

    #[test]
    fn open_existing_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("a.txt");
        fs::write(&existing, "hello\nworld").unwrap();
        let mut ws = workspace(dir.path());

        assert_eq!(ws.open(&existing).unwrap(), 0);
        assert_eq!(ws.active().unwrap().session().lines(), vec!["hello", "world"]);
        assert_eq!(ws.titles(), vec!["a.txt"]);

        assert_eq!(ws.open(&dir.path().join("new.txt")).unwrap(), 1);
        assert_eq!(ws.titles(), vec!["a.txt", "*new.txt"]);

        assert_eq!(ws.open(&existing).unwrap(), 0);
        assert_eq!(ws.len(), 2);
    }

    #[test]
    fn switching_wraps_and_keeps_cursor() {
        let dir = tempfile::tempdir().unwrap();
        let mut ws = workspace(dir.path());
        for name in ["a", "b", "c"] {
            ws.open(&dir.path().join(name)).unwrap();
        }
        ws.apply(Intent::Paste("xyz".into()));
        assert_eq!(ws.active_index(), Some(2));

        ws.apply(Intent::SwitchFile(1));
        assert_eq!(ws.active_index(), Some(0));
        ws.apply(Intent::SwitchFile(-1));
        assert_eq!(ws.active_index(), Some(2));
        assert_eq!(ws.active().unwrap().session().cursor(), Location::new(0, 3));
    }

    #[test]
    fn save_writes_and_clears_modified() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/file.txt");
        let mut ws = workspace(dir.path());
        ws.open(&path).unwrap();
        ws.apply(Intent::Paste("one\ntwo".into()));

        assert_eq!(ws.apply(Intent::Save), Effect::Saved(path.clone()));
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo");
        assert!(!ws.any_unsaved());
        assert_eq!(ws.titles(), vec!["file.txt"]);
    }

    #[test]
    fn failed_save_keeps_modified_flag() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        let mut ws = workspace(dir.path());
        ws.open(&blocker.join("file.txt")).unwrap();
        fs::write(&blocker, "not a directory").unwrap();

        assert!(matches!(ws.apply(Intent::Save), Effect::SaveFailed(_)));
        assert!(ws.any_unsaved());
    }

    #[test]
    fn open_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut ws = workspace(dir.path());
        let effect = ws.apply(Intent::Open(dir.path().to_path_buf()));
        assert!(matches!(effect, Effect::OpenFailed(_)));
        assert!(ws.is_empty());
    }

    #[test]
    fn close_and_quit_confirm_unsaved_changes() {
        let dir = tempfile::tempdir().unwrap();
        let saved = dir.path().join("saved.txt");
        fs::write(&saved, "x").unwrap();
        let mut ws = workspace(dir.path());
        ws.open(&saved).unwrap();
        ws.open(&dir.path().join("draft.txt")).unwrap();

        assert_eq!(ws.apply(Intent::Quit), Effect::ConfirmQuit);
        assert_eq!(ws.apply(Intent::CloseFile), Effect::ConfirmClose);
        assert_eq!(ws.apply(Intent::ForceCloseFile), Effect::Redraw);
        assert_eq!(ws.titles(), vec!["saved.txt"]);

        assert_eq!(ws.apply(Intent::Quit), Effect::Quit);
        assert_eq!(ws.apply(Intent::CloseFile), Effect::Redraw);
        assert!(ws.is_empty());
        assert_eq!(ws.apply(Intent::InsertChar('a')), Effect::None);
    }

    #[test]
    fn highlighting_follows_extension() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ConfigPaths::new(dir.path());
        paths.ensure_layout().unwrap();
        let mut go = HighlightingConfig::default();
        go.keywords.tokens = vec!["func".into()];
        go.keywords.color = Rgb::new(200, 100, 0);
        go.save(&paths.highlighting_dir().join("go.json")).unwrap();

        let mut ws = Workspace::load(paths).unwrap();
        let file = dir.path().join("main.GO");
        fs::write(&file, "func main").unwrap();
        ws.open(&file).unwrap();

        let tokens = ws.active().unwrap().session().frame().lines.remove(0);
        assert_eq!(tokens[0].kind, TokenKind::Keyword);
        assert_eq!(tokens[0].color, Rgb::new(200, 100, 0));

        ws.open(&dir.path().join("notes.txt")).unwrap();
        let tokens = ws.active().unwrap().session().lexer().tokenize_line("func");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
    }

    #[test]
    fn tab_width_comes_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ConfigPaths::new(dir.path());
        fs::create_dir_all(paths.root()).unwrap();
        fs::write(paths.editor_config(), r#"{"tab_width": 8}"#).unwrap();

        let mut ws = Workspace::load(paths).unwrap();
        ws.open(&dir.path().join("x.txt")).unwrap();
        assert_eq!(ws.active().unwrap().session().tab_width(), 8);
    }
}

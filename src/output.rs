//! Lock-protected queue of shell output lines.
//!
//! An embedded shell runs on its own thread and must never touch a document.
//! It pushes text into an [`OutputQueue`]; the renderer reads or drains it on
//! the editing thread. Lines are kept newest first, already cleaned of escape
//! sequences and wrapped to the panel width.

use std::collections::VecDeque;
use std::io::BufRead;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use tracing::debug;

#[derive(Debug)]
struct Inner {
    lines: VecDeque<String>,
    width: usize,
    capacity: usize,
}

/// Shared, bounded, newest-first list of output lines.
#[derive(Clone, Debug)]
pub struct OutputQueue {
    inner: Arc<Mutex<Inner>>,
}

impl OutputQueue {
    /// A queue wrapping at `width` columns and keeping at most `capacity`
    /// lines. Both are at least 1.
    #[must_use]
    pub fn new(width: usize, capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                lines: VecDeque::new(),
                width: width.max(1),
                capacity: capacity.max(1),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add text, which may span several lines. A single trailing newline
    /// does not produce an empty line.
    pub fn push(&self, text: &str) {
        let clean = strip_escapes(text);
        let clean = clean.strip_suffix('\n').unwrap_or(&clean);
        let mut inner = self.lock();
        let width = inner.width;
        let rows: Vec<String> = clean.split('\n').flat_map(|line| wrap(line, width)).collect();
        for row in rows {
            inner.lines.push_front(row);
        }
        let capacity = inner.capacity;
        inner.lines.truncate(capacity);
    }

    /// Current lines, newest first.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lock().lines.iter().cloned().collect()
    }

    /// Take every line, newest first, leaving the queue empty.
    #[must_use]
    pub fn drain(&self) -> Vec<String> {
        self.lock().lines.drain(..).collect()
    }

    /// Change the wrap width for future pushes.
    pub fn set_width(&self, width: usize) {
        self.lock().width = width.max(1);
    }

    /// Change the capacity, dropping the oldest lines if needed.
    pub fn set_capacity(&self, capacity: usize) {
        let mut inner = self.lock();
        inner.capacity = capacity.max(1);
        let capacity = inner.capacity;
        inner.lines.truncate(capacity);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().lines.is_empty()
    }

    pub fn clear(&self) {
        self.lock().lines.clear();
    }

    /// Push every line read from `reader` on a background thread.
    ///
    /// The thread ends when the reader hits EOF or fails.
    pub fn capture<R>(&self, reader: R) -> JoinHandle<()>
    where
        R: BufRead + Send + 'static,
    {
        let queue = self.clone();
        thread::spawn(move || {
            for line in reader.lines() {
                match line {
                    Ok(line) => queue.push(&line),
                    Err(err) => {
                        debug!(error = %err, "shell output read failed");
                        break;
                    }
                }
            }
            debug!("shell output capture stopped");
        })
    }
}

/// Remove ANSI escape sequences and carriage returns.
///
/// Handles CSI (`ESC [ ... final`), OSC (`ESC ] ... BEL` or `ESC ] ... ESC \`)
/// and two-byte `ESC x` sequences.
#[must_use]
pub fn strip_escapes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {}
            '\x1b' => match chars.next() {
                Some('[') => {
                    for c in chars.by_ref() {
                        if ('\x40'..='\x7e').contains(&c) {
                            break;
                        }
                    }
                }
                Some(']') => {
                    while let Some(c) = chars.next() {
                        if c == '\x07' {
                            break;
                        }
                        if c == '\x1b' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            },
            _ => out.push(c),
        }
    }
    out
}

/// Split `line` into rows of at most `width` characters.
fn wrap(line: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars.chunks(width).map(|c| c.iter().collect()).collect()
}

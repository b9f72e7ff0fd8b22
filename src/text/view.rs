//! Scrolling window onto a document and the per-frame render payload.

use crate::highlight::{Token, TokenLines};
use crate::text::NormalizedSelection;

/// Visible region of a document, in lines and visual columns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    /// First visible document line.
    pub top_line: usize,
    /// First visible visual column.
    pub left_col: usize,
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    /// Create a viewport scrolled to the document start.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            top_line: 0,
            left_col: 0,
            width,
            height,
        }
    }

    /// Change the size, keeping the scroll offsets.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    /// One past the last visible line.
    #[must_use]
    pub fn bottom_line(&self) -> usize {
        self.top_line + self.height
    }

    /// Scroll so the cursor keeps `tab_width` lines of context vertically and
    /// `2 * tab_width` columns horizontally.
    ///
    /// Margins shrink on small viewports so the cursor always stays visible.
    pub fn follow(&mut self, line: usize, visual_col: usize, tab_width: usize) {
        let v_margin = tab_width.min(self.height.saturating_sub(1) / 2);
        if line + v_margin >= self.top_line + self.height {
            self.top_line = (line + v_margin + 1).saturating_sub(self.height);
        } else if line < self.top_line + v_margin {
            self.top_line = line.saturating_sub(v_margin);
        }

        let h_margin = (2 * tab_width).min(self.width.saturating_sub(1) / 2);
        if visual_col + h_margin >= self.left_col + self.width {
            self.left_col = (visual_col + h_margin + 1).saturating_sub(self.width);
        } else if visual_col < self.left_col + h_margin {
            self.left_col = visual_col.saturating_sub(h_margin);
        }
    }

    /// Move the window `delta` lines without touching the cursor.
    ///
    /// The top line stays within `0..total_lines`.
    pub fn scroll(&mut self, delta: isize, total_lines: usize) {
        let max_top = total_lines.saturating_sub(1);
        self.top_line = self.top_line.saturating_add_signed(delta).min(max_top);
    }

    /// True if `line` is inside the window.
    #[must_use]
    pub fn shows_line(&self, line: usize) -> bool {
        line >= self.top_line && line < self.bottom_line()
    }
}

/// Everything a renderer needs to draw one frame.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub viewport: Viewport,
    /// Tokens of the visible lines, starting at `viewport.top_line`.
    pub lines: TokenLines,
    /// Cursor position relative to the viewport, `(row, col)`, or `None`
    /// when the cursor is scrolled out of view.
    pub cursor: Option<(usize, usize)>,
    /// Selection with columns converted to visual columns.
    pub selection: Option<NormalizedSelection>,
}

impl Frame {
    /// Tokens for screen row `row`.
    #[must_use]
    pub fn row(&self, row: usize) -> &[Token] {
        self.lines.get(row).map_or(&[][..], Vec::as_slice)
    }

    /// True if the cell at document `line` and visual column `col` is
    /// highlighted as selected.
    #[must_use]
    pub fn is_selected(&self, line: usize, col: usize) -> bool {
        self.selection.is_some_and(|sel| sel.contains(line, col))
    }
}

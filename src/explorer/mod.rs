//! Explorer feature - object tree and attribute details.
//!
//! The explorer lists the objects below the current location. Moving the
//! cursor previews the entry under it; activating it navigates there.

pub mod details;
pub mod tree;

use crate::navigation::{TreeEntry, TreeState};
use crate::session::Inspection;

/// Explorer state - tree navigation plus the previewed object.
#[derive(Debug, Default)]
pub struct ExplorerState {
    tree: TreeState,
    /// Scroll offset for the tree view.
    scroll_offset: usize,
    /// Object under the cursor, when it differs from the location.
    preview: Option<Inspection>,
    /// Attribute table scroll offset.
    pub attribute_scroll: u16,
}

impl ExplorerState {
    /// Create a new explorer state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a new listing.
    pub fn set_entries(&mut self, entries: Vec<TreeEntry>) {
        self.tree.set_entries(entries);
        self.scroll_offset = 0;
        self.clear_preview();
    }

    /// Move the cursor up one row.
    pub fn cursor_up(&mut self) {
        self.tree.cursor_up();
    }

    /// Move the cursor down one row.
    pub fn cursor_down(&mut self) {
        self.tree.cursor_down();
    }

    /// Go to the first row.
    pub fn goto_first(&mut self) {
        self.tree.goto_first();
    }

    /// Go to the last row.
    pub fn goto_last(&mut self) {
        self.tree.goto_last();
    }

    /// Expand the entry under the cursor.
    pub fn expand_current(&mut self) {
        self.tree.expand_current();
    }

    /// Collapse the entry under the cursor.
    pub fn collapse_current(&mut self) {
        self.tree.collapse_current();
    }

    /// Move the cursor to `path`, if listed.
    pub fn goto_node(&mut self, path: &str) {
        self.tree.goto_node(path);
    }

    /// Entry under the cursor.
    pub fn current_entry(&self) -> Option<&TreeEntry> {
        self.tree.current_entry()
    }

    /// The tree rows.
    pub fn tree(&self) -> &TreeState {
        &self.tree
    }

    /// Adjust scroll to keep cursor visible.
    pub fn adjust_scroll(&mut self, viewport_height: usize) {
        if viewport_height == 0 {
            return;
        }
        let cursor = self.tree.cursor();
        if cursor < self.scroll_offset {
            self.scroll_offset = cursor;
        }
        if cursor >= self.scroll_offset + viewport_height {
            self.scroll_offset = cursor.saturating_sub(viewport_height - 1);
        }
    }

    /// Get the current scroll offset.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Previewed object, if any.
    pub fn preview(&self) -> Option<&Inspection> {
        self.preview.as_ref()
    }

    /// Preview an object.
    pub fn set_preview(&mut self, inspection: Inspection) {
        self.preview = Some(inspection);
        self.attribute_scroll = 0;
    }

    /// Drop the preview.
    pub fn clear_preview(&mut self) {
        self.preview = None;
        self.attribute_scroll = 0;
    }

    /// Scroll the attribute table down.
    pub fn scroll_down(&mut self) {
        self.attribute_scroll = self.attribute_scroll.saturating_add(1);
    }

    /// Scroll the attribute table up.
    pub fn scroll_up(&mut self) {
        self.attribute_scroll = self.attribute_scroll.saturating_sub(1);
    }
}

//! Data viewer feature - paged table over a dataset.
//!
//! The state tracks which page is shown, the scroll offset into it and the
//! cell under the cursor. Decoding happens at draw time, only for the
//! window that fits on screen.

pub mod ui;

use crate::container::Container;
use crate::data::{Cell, DatasetView};

/// Position within a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollPosition {
    /// Row.
    pub row: usize,
    /// Column.
    pub col: usize,
}

/// Data viewer state.
#[derive(Debug, Default)]
pub struct DataViewerState {
    /// Path of the dataset the state belongs to.
    path: Option<String>,
    /// Shown page.
    pub page: usize,
    /// First visible row and column.
    pub scroll: ScrollPosition,
    /// Cell under the cursor.
    pub cursor: ScrollPosition,
    /// Rows that fit on screen, updated while drawing.
    pub visible_rows: usize,
    /// Columns that fit on screen, updated while drawing.
    pub visible_cols: usize,
}

impl DataViewerState {
    /// Create a new data viewer state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset page, scroll and cursor when a different dataset is shown.
    pub fn sync(&mut self, path: Option<&str>) {
        if self.path.as_deref() != path {
            self.path = path.map(str::to_string);
            self.page = 0;
            self.scroll = ScrollPosition::default();
            self.cursor = ScrollPosition::default();
        }
    }

    /// Show the next page, stopping at the last one.
    pub fn next_page(&mut self, view: &DatasetView) {
        if self.page + 1 < view.page_count() {
            self.page += 1;
        }
    }

    /// Show the previous page.
    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// Move the cursor by a row/column delta, clamped to the page shape.
    pub fn move_cursor(&mut self, rows: isize, cols: isize, view: &DatasetView) {
        let (row_count, col_count) = view.page_shape();
        self.cursor.row = self
            .cursor
            .row
            .saturating_add_signed(rows)
            .min(row_count.saturating_sub(1));
        self.cursor.col = self
            .cursor
            .col
            .saturating_add_signed(cols)
            .min(col_count.saturating_sub(1));
        self.keep_cursor_visible();
    }

    /// Scroll so the cursor is inside the visible window.
    pub fn keep_cursor_visible(&mut self) {
        if self.visible_rows > 0 {
            if self.cursor.row < self.scroll.row {
                self.scroll.row = self.cursor.row;
            } else if self.cursor.row >= self.scroll.row + self.visible_rows {
                self.scroll.row = self.cursor.row + 1 - self.visible_rows;
            }
        }
        if self.visible_cols > 0 {
            if self.cursor.col < self.scroll.col {
                self.scroll.col = self.cursor.col;
            } else if self.cursor.col >= self.scroll.col + self.visible_cols {
                self.scroll.col = self.cursor.col + 1 - self.visible_cols;
            }
        }
    }

    /// Decode the cell under the cursor.
    pub fn current_cell(&self, view: &DatasetView, container: &dyn Container) -> Option<Cell> {
        let ScrollPosition { row, col } = self.cursor;
        let window = view.render_window(self.page, row..row + 1, col..col + 1, container);
        window.cell(row, col).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::MemoryContainer;
    use crate::data::{ByteBuffer, ElementType};

    fn view() -> DatasetView {
        let bytes: Vec<u8> = (0..60i32).flat_map(|v| v.to_ne_bytes()).collect();
        DatasetView::from_parts(
            "/cube",
            ElementType::int(4),
            ByteBuffer::new(bytes, vec![3, 4, 5], 4),
        )
    }

    #[test]
    fn pages_are_bounded() {
        let v = view();
        let mut state = DataViewerState::new();
        for _ in 0..5 {
            state.next_page(&v);
        }
        assert_eq!(state.page, 2);
        state.prev_page();
        state.prev_page();
        state.prev_page();
        assert_eq!(state.page, 0);
    }

    #[test]
    fn cursor_is_clamped_and_visible() {
        let v = view();
        let mut state = DataViewerState {
            visible_rows: 2,
            visible_cols: 2,
            ..DataViewerState::default()
        };
        state.move_cursor(10, 10, &v);
        assert_eq!(state.cursor, ScrollPosition { row: 3, col: 4 });
        assert_eq!(state.scroll, ScrollPosition { row: 2, col: 3 });
        state.move_cursor(-10, -1, &v);
        assert_eq!(state.cursor, ScrollPosition { row: 0, col: 3 });
        assert_eq!(state.scroll.row, 0);
    }

    #[test]
    fn cell_under_cursor() {
        let v = view();
        let container = MemoryContainer::builder("t").build();
        let mut state = DataViewerState::new();
        state.next_page(&v);
        state.move_cursor(1, 2, &v);
        let cell = state.current_cell(&v, &container).unwrap();
        assert_eq!(cell.text, "27");
    }

    #[test]
    fn switching_dataset_resets_position() {
        let v = view();
        let mut state = DataViewerState::new();
        state.sync(Some("/cube"));
        state.next_page(&v);
        state.sync(Some("/cube"));
        assert_eq!(state.page, 1);
        state.sync(Some("/other"));
        assert_eq!(state.page, 0);
    }
}

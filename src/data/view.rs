//! A dataset loaded for display.

use std::ops::Range;

use crate::container::Container;
use crate::data::decoder::{decode_cell, decode_wide_text, is_char_array, Cell};
use crate::data::{ByteBuffer, ElementType, Pager};
use crate::error::{DecodeError, Result};

/// A cell that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellFailure {
    /// Row within the page.
    pub row: usize,
    /// Column within the page.
    pub col: usize,
    /// Why decoding failed.
    pub error: DecodeError,
}

/// Decoded cells of one page (or a window of it).
#[derive(Debug, Clone, Default)]
pub struct RenderedPage {
    /// Page index.
    pub index: usize,
    /// First row of the window.
    pub first_row: usize,
    /// First column of the window.
    pub first_col: usize,
    /// Cells, row-major within the window.
    pub rows: Vec<Vec<Cell>>,
    /// Cells left blank because decoding failed.
    pub failures: Vec<CellFailure>,
}

impl RenderedPage {
    /// Cell at page coordinates, if inside the window.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows
            .get(row.checked_sub(self.first_row)?)?
            .get(col.checked_sub(self.first_col)?)
    }
}

/// A dataset read into memory and split into pages.
#[derive(Debug, Clone)]
pub struct DatasetView {
    path: String,
    element_type: ElementType,
    pager: Pager,
    text: Option<String>,
}

impl DatasetView {
    /// Read the dataset at `path` in one bulk read.
    pub fn open(container: &dyn Container, path: &str) -> Result<Self> {
        let dims = container.dimensions(path)?;
        let (element_type, bytes) = container.read_typed(path)?;
        tracing::info!(
            "Loaded {} ({} bytes, dims {:?}, {})",
            path,
            bytes.len(),
            dims,
            element_type.describe()
        );

        let text = if is_char_array(container, path) {
            Some(decode_wide_text(&bytes, element_type.size()))
        } else {
            None
        };

        let mut view = Self::from_parts(
            path,
            element_type.clone(),
            ByteBuffer::new(bytes, dims, element_type.size()),
        );
        view.text = text;
        Ok(view)
    }

    /// Build a view over bytes already in memory.
    pub fn from_parts(path: impl Into<String>, element_type: ElementType, buffer: ByteBuffer) -> Self {
        Self {
            path: path.into(),
            element_type,
            pager: Pager::new(buffer),
            text: None,
        }
    }

    /// Path the view was opened from.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Element type.
    pub fn element_type(&self) -> &ElementType {
        &self.element_type
    }

    /// Declared dimensions.
    pub fn dims(&self) -> &[usize] {
        self.pager.buffer().dims()
    }

    /// The underlying pager.
    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Whole-dataset text, for character arrays.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Type and shape, e.g. `Float: 2×3`.
    pub fn type_label(&self) -> String {
        type_label(&self.element_type, self.dims())
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pager.page_count()
    }

    /// Rows and columns of every page.
    pub fn page_shape(&self) -> (usize, usize) {
        (self.pager.row_count(), self.pager.column_count())
    }

    /// Label of page `index`, e.g. `[1,1,:,:]`.
    pub fn page_label(&self, index: usize) -> String {
        self.pager.page_label(index)
    }

    /// Labels of the first `cap` pages.
    pub fn page_labels(&self, cap: usize) -> Vec<String> {
        self.pager.page_labels(cap)
    }

    /// Decode every cell of a page.
    pub fn render_page(&self, index: usize, container: &dyn Container) -> RenderedPage {
        let (rows, cols) = self.page_shape();
        self.render_window(index, 0..rows, 0..cols, container)
    }

    /// Decode a rectangular window of a page.
    ///
    /// The window is clipped to the page shape. Cells beyond the end of the
    /// data are blank; cells that fail to decode are blank and recorded.
    pub fn render_window(
        &self,
        index: usize,
        rows: Range<usize>,
        cols: Range<usize>,
        container: &dyn Container,
    ) -> RenderedPage {
        let (row_count, col_count) = self.page_shape();
        let rows = rows.start.min(row_count)..rows.end.min(row_count);
        let cols = cols.start.min(col_count)..cols.end.min(col_count);

        let mut page = RenderedPage {
            index,
            first_row: rows.start,
            first_col: cols.start,
            ..RenderedPage::default()
        };
        if index >= self.page_count() {
            return page;
        }

        let bytes = self.pager.page_bytes(index);
        let size = self.element_type.size();
        for row in rows {
            let mut line = Vec::with_capacity(cols.len());
            for col in cols.clone() {
                let range = row
                    .checked_mul(col_count)
                    .and_then(|index| index.checked_add(col))
                    .and_then(|index| index.checked_mul(size))
                    .and_then(|start| Some(start..start.checked_add(size)?));
                let cell = match range.and_then(|range| bytes.get(range)) {
                    Some(element) if size > 0 => {
                        match decode_cell(element, &self.element_type, container) {
                            Ok(cell) => cell,
                            Err(error) => {
                                tracing::debug!("Cell ({}, {}) of page {}: {}", row, col, index, error);
                                page.failures.push(CellFailure { row, col, error });
                                Cell::blank()
                            },
                        }
                    },
                    _ => Cell::blank(),
                };
                line.push(cell);
            }
            page.rows.push(line);
        }
        page
    }
}

/// Type and shape label, e.g. `Integer: 4×5`; scalars have no shape part.
pub fn type_label(element_type: &ElementType, dims: &[usize]) -> String {
    if dims.is_empty() {
        return element_type.class_name().to_string();
    }
    let shape: Vec<String> = dims.iter().map(|d| d.to_string()).collect();
    format!("{}: {}", element_type.class_name(), shape.join("×"))
}

//! Decomposition of an N-dimensional array into 2-D pages.
//!
//! The trailing two dimensions form the page (rows × columns); every leading
//! dimension is a "high" dimension, and pages are numbered by the row-major
//! linear index over the high dimensions.

use super::ByteBuffer;

/// Splits a [`ByteBuffer`] into fixed-shape pages.
#[derive(Debug, Clone)]
pub struct Pager {
    buffer: ByteBuffer,
    high_dims: Vec<usize>,
    rows: usize,
    cols: usize,
}

impl Pager {
    /// Build a pager over `buffer` using its declared dimensions.
    ///
    /// Rank 0 gives a 1×1 page, rank 1 a single row of `dims[0]` columns.
    pub fn new(buffer: ByteBuffer) -> Self {
        let dims = buffer.dims();
        let (rows, cols) = match dims.len() {
            0 => (1, 1),
            1 => (1, dims[0]),
            n => (dims[n - 2], dims[n - 1]),
        };
        let high_dims = if dims.len() > 2 {
            dims[..dims.len() - 2].to_vec()
        } else {
            Vec::new()
        };

        Self {
            high_dims,
            rows: rows.max(1),
            cols: cols.max(1),
            buffer,
        }
    }

    /// Columns per page.
    pub fn column_count(&self) -> usize {
        self.cols
    }

    /// Rows per page.
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Element width in bytes.
    pub fn data_size(&self) -> usize {
        self.buffer.data_size()
    }

    /// Leading dimensions that enumerate pages.
    pub fn high_dims(&self) -> &[usize] {
        &self.high_dims
    }

    /// The underlying buffer.
    pub fn buffer(&self) -> &ByteBuffer {
        &self.buffer
    }

    /// Bytes covered by one full page.
    pub fn bytes_per_page(&self) -> usize {
        self.data_size()
            .saturating_mul(self.rows)
            .saturating_mul(self.cols)
    }

    /// Number of pages, clamped to what the buffer actually holds.
    pub fn page_count(&self) -> usize {
        let bytes_per_page = self.bytes_per_page();
        if bytes_per_page == 0 {
            return 0;
        }
        let by_dims = self.high_dims.iter().copied().fold(1, usize::saturating_mul);
        let by_bytes = self.buffer.len().div_ceil(bytes_per_page);
        by_dims.min(by_bytes)
    }

    /// Coordinate of `page_index` in the high dimensions, slowest first.
    ///
    /// Indices past the end wrap in the slowest dimension instead of failing.
    pub fn high_dim_coordinate(&self, page_index: usize) -> Vec<usize> {
        unravel_index(page_index, &self.high_dims)
    }

    /// Read-only view of the bytes of page `page_index`.
    ///
    /// Both ends are clamped to the buffer, so the last page of a short
    /// buffer is shorter than [`Pager::bytes_per_page`] and pages past the
    /// end are empty.
    pub fn page_bytes(&self, page_index: usize) -> &[u8] {
        let len = self.buffer.len();
        let bytes_per_page = self.bytes_per_page();
        let begin = bytes_per_page.saturating_mul(page_index).min(len);
        let end = begin.saturating_add(bytes_per_page).min(len);
        &self.buffer.bytes()[begin..end]
    }

    /// Label of a page, e.g. `[1,2,:,:]` for a rank-4 array.
    pub fn page_label(&self, page_index: usize) -> String {
        let mut parts: Vec<String> = self
            .high_dim_coordinate(page_index)
            .iter()
            .map(|c| c.to_string())
            .collect();
        let page_dims = self.buffer.dims().len().min(2);
        parts.extend(std::iter::repeat(":".to_string()).take(page_dims));
        format!("[{}]", parts.join(","))
    }

    /// Labels of the first `cap` pages.
    pub fn page_labels(&self, cap: usize) -> Vec<String> {
        (0..self.page_count().min(cap))
            .map(|i| self.page_label(i))
            .collect()
    }
}

/// Row-major unravel of a linear index into a coordinate over `extents`.
///
/// Zero extents yield a zero coordinate rather than dividing by zero.
pub fn unravel_index(mut index: usize, extents: &[usize]) -> Vec<usize> {
    let mut coordinate: Vec<usize> = Vec::with_capacity(extents.len());
    for &extent in extents.iter().rev() {
        if extent == 0 {
            coordinate.push(0);
            continue;
        }
        coordinate.push(index % extent);
        index /= extent;
    }
    coordinate.reverse();
    coordinate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pager(dims: &[usize], data_size: usize) -> Pager {
        let len = dims.iter().product::<usize>() * data_size;
        let bytes = (0..len).map(|i| i as u8).collect();
        Pager::new(ByteBuffer::new(bytes, dims.to_vec(), data_size))
    }

    #[test]
    fn rank_four_shape_and_pages() {
        let p = pager(&[2, 3, 4, 5], 1);
        assert_eq!(p.row_count(), 4);
        assert_eq!(p.column_count(), 5);
        assert_eq!(p.high_dims(), &[2, 3]);
        assert_eq!(p.page_count(), 6);
        assert_eq!(p.high_dim_coordinate(0), vec![0, 0]);
        assert_eq!(p.high_dim_coordinate(4), vec![1, 1]);
        assert_eq!(p.high_dim_coordinate(5), vec![1, 2]);
    }

    #[test]
    fn coordinates_are_a_bijection() {
        let p = pager(&[2, 3, 4, 1, 1], 2);
        let count = p.page_count();
        assert_eq!(count, 24);
        let mut seen = std::collections::HashSet::new();
        for i in 0..count {
            let c = p.high_dim_coordinate(i);
            assert!(c[0] < 2 && c[1] < 3 && c[2] < 4);
            // row-major: last coordinate varies fastest
            assert_eq!(c[0] * 12 + c[1] * 4 + c[2], i);
            assert!(seen.insert(c));
        }
    }

    #[test]
    fn low_rank_arrays_have_one_page() {
        let scalar = pager(&[], 8);
        assert_eq!((scalar.row_count(), scalar.column_count()), (1, 1));
        assert_eq!(scalar.page_count(), 1);
        assert_eq!(scalar.page_label(0), "[]");

        let row = pager(&[7], 4);
        assert_eq!((row.row_count(), row.column_count()), (1, 7));
        assert_eq!(row.page_count(), 1);
        assert!(row.high_dim_coordinate(0).is_empty());
        assert_eq!(row.page_label(0), "[:]");

        let matrix = pager(&[3, 2], 4);
        assert_eq!(matrix.page_count(), 1);
        assert_eq!(matrix.page_label(0), "[:,:]");
    }

    #[test]
    fn pages_cover_buffer_exactly_once() {
        let p = pager(&[3, 2, 2], 4);
        let mut joined = Vec::new();
        for i in 0..p.page_count() {
            let bytes = p.page_bytes(i);
            assert!(bytes.len() <= p.bytes_per_page());
            joined.extend_from_slice(bytes);
        }
        assert_eq!(joined, p.buffer().bytes());
    }

    #[test]
    fn short_buffer_clamps_page_count_and_last_page() {
        // declared 3 pages of 4 bytes, only 6 bytes present
        let buffer = ByteBuffer::new(vec![9; 6], vec![3, 2, 2], 1);
        let p = Pager::new(buffer);
        assert_eq!(p.page_count(), 2);
        assert_eq!(p.page_bytes(0).len(), 4);
        assert_eq!(p.page_bytes(1).len(), 2);
        assert!(p.page_bytes(2).is_empty());
        assert!(p.page_bytes(usize::MAX).is_empty());
    }

    #[test]
    fn empty_buffer_has_no_pages() {
        let p = Pager::new(ByteBuffer::new(Vec::new(), vec![0, 4], 4));
        assert_eq!(p.page_count(), 0);
        assert_eq!(p.row_count(), 1);
        assert!(p.page_bytes(0).is_empty());

        let zero_width = Pager::new(ByteBuffer::new(Vec::new(), vec![2, 2], 0));
        assert_eq!(zero_width.page_count(), 0);
    }

    #[test]
    fn out_of_range_coordinate_does_not_panic() {
        let p = pager(&[2, 0, 3, 3], 1);
        assert_eq!(p.page_count(), 0);
        assert_eq!(p.high_dim_coordinate(7).len(), 2);
    }

    #[test]
    fn labels_are_capped() {
        let p = pager(&[5, 1, 1], 1);
        assert_eq!(p.page_labels(3), vec!["[0,:,:]", "[1,:,:]", "[2,:,:]"]);
        assert_eq!(p.page_labels(100).len(), 5);
    }

    #[test]
    fn unravel_matches_row_major_order() {
        assert_eq!(unravel_index(0, &[2, 3]), vec![0, 0]);
        assert_eq!(unravel_index(4, &[2, 3]), vec![1, 1]);
        assert_eq!(unravel_index(5, &[2, 3]), vec![1, 2]);
        assert!(unravel_index(3, &[]).is_empty());
    }
}

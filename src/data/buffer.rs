//! Raw element storage for one dataset.

/// Immutable flat bytes of a dataset, with element width and shape.
///
/// `bytes.len() == data_size * product(dims)` is expected but not enforced;
/// short reads are tolerated and surface as fewer pages or partial pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteBuffer {
    bytes: Vec<u8>,
    data_size: usize,
    dims: Vec<usize>,
}

impl ByteBuffer {
    /// Wrap `bytes` holding elements of `data_size` bytes laid out row-major over `dims`.
    pub fn new(bytes: Vec<u8>, dims: Vec<usize>, data_size: usize) -> Self {
        let buffer = Self {
            bytes,
            data_size,
            dims,
        };
        if buffer.bytes.len() < buffer.expected_len() {
            tracing::warn!(
                "Buffer holds {} bytes, shape {:?} x {} declares {}",
                buffer.bytes.len(),
                buffer.dims,
                buffer.data_size,
                buffer.expected_len()
            );
        }
        buffer
    }

    /// All bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of bytes held.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether no bytes are held.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Element width in bytes.
    pub fn data_size(&self) -> usize {
        self.data_size
    }

    /// Declared dimensions, slowest-varying first.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Declared number of elements.
    pub fn element_count(&self) -> usize {
        self.dims.iter().copied().fold(1, usize::saturating_mul)
    }

    /// Byte length implied by the declared shape.
    pub fn expected_len(&self) -> usize {
        self.element_count().saturating_mul(self.data_size)
    }

    /// Iterate over the complete elements actually present.
    pub fn elements(&self) -> impl Iterator<Item = &[u8]> {
        // chunks_exact panics on zero
        self.bytes.chunks_exact(self.data_size.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_shape_has_one_element() {
        let buffer = ByteBuffer::new(vec![1, 2, 3, 4], vec![], 4);
        assert_eq!(buffer.element_count(), 1);
        assert_eq!(buffer.expected_len(), 4);
    }

    #[test]
    fn elements_skip_trailing_partial_element() {
        let buffer = ByteBuffer::new(vec![0; 10], vec![3], 4);
        assert_eq!(buffer.elements().count(), 2);
        assert!(buffer.len() < buffer.expected_len());
    }
}

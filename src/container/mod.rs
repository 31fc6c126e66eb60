//! Access to hierarchical data containers.
//!
//! Everything the viewer needs from a file goes through the [`Container`]
//! trait, addressed by slash-delimited paths. Two backends exist: netCDF-4 /
//! HDF5 files through the `netcdf` crate, and a purely in-memory tree.

mod memory;
mod netcdf_file;

pub use memory::{MemoryContainer, MemoryContainerBuilder};
pub use netcdf_file::NetcdfContainer;

use crate::data::ElementType;
use crate::error::Result;

/// Classification of a path inside a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// The file itself.
    Root,
    /// A group.
    Group,
    /// A dataset.
    Dataset,
    /// Nothing known lives at the path.
    Unknown,
}

impl ObjectKind {
    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Root => "File",
            Self::Group => "Group",
            Self::Dataset => "Dataset",
            Self::Unknown => "Unknown",
        }
    }

    /// Whether the object can hold children.
    pub fn is_group_like(self) -> bool {
        matches!(self, Self::Root | Self::Group)
    }
}

/// Target of an object reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    /// Canonical path of the target.
    pub path: String,
    /// Kind of the target.
    pub kind: ObjectKind,
}

impl ObjectRef {
    /// Create an object reference.
    pub fn new(path: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// Attribute read wholesale: its type, element count and raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAttribute {
    /// Attribute name.
    pub name: String,
    /// Element type.
    pub element_type: ElementType,
    /// Number of elements (0 for scalars).
    pub element_count: usize,
    /// Raw element bytes.
    pub data: Vec<u8>,
}

/// A hierarchical container of groups, datasets and attributes.
///
/// Paths are slash-delimited; a leading slash is optional and the empty
/// path denotes the root.
pub trait Container: std::fmt::Debug {
    /// Human-readable name of the container (usually the file name).
    fn name(&self) -> String;

    /// Classify the object at `path`.
    fn classify(&self, path: &str) -> Result<ObjectKind>;

    /// Canonical path of the object at `path`, as reported by the backend.
    fn canonical_path(&self, path: &str) -> Result<String>;

    /// Names of the direct children of the group (or root) at `path`.
    fn list_children(&self, path: &str) -> Result<Vec<String>>;

    /// Dimensions of a dataset, slowest-varying first.
    fn dimensions(&self, path: &str) -> Result<Vec<usize>>;

    /// Element type of a dataset, from metadata only.
    fn element_type(&self, path: &str) -> Result<ElementType>;

    /// Bulk read of all elements of a dataset.
    fn read_raw(&self, path: &str) -> Result<Vec<u8>>;

    /// Element type and bulk read of a dataset together.
    ///
    /// Backends whose element width depends on the stored values (variable
    /// length strings padded to the longest one) settle the width here from
    /// the single read.
    fn read_typed(&self, path: &str) -> Result<(ElementType, Vec<u8>)> {
        Ok((self.element_type(path)?, self.read_raw(path)?))
    }

    /// Attribute names of the object at `path`.
    fn attribute_names(&self, path: &str) -> Result<Vec<String>>;

    /// Read one attribute of the object at `path`.
    fn attribute(&self, path: &str, name: &str) -> Result<RawAttribute>;

    /// Resolve an object reference handle.
    fn resolve_reference(&self, handle: &[u8]) -> Result<ObjectRef>;
}

/// Strip a leading slash and any trailing slashes.
pub fn normalize_path(path: &str) -> &str {
    path.trim().trim_start_matches('/').trim_end_matches('/')
}

/// Path equality ignoring leading slashes.
pub fn same_path(a: &str, b: &str) -> bool {
    normalize_path(a) == normalize_path(b)
}

/// Join a child name onto a parent path, in canonical (`/`-prefixed) form.
pub fn join_path(parent: &str, name: &str) -> String {
    let parent = normalize_path(parent);
    if parent.is_empty() {
        format!("/{}", name)
    } else {
        format!("/{}/{}", parent, name)
    }
}

/// Parent of a path, in canonical form; `None` at the root.
pub fn parent_path(path: &str) -> Option<String> {
    let path = normalize_path(path);
    if path.is_empty() {
        return None;
    }
    match path.rfind('/') {
        Some(idx) => Some(format!("/{}", &path[..idx])),
        None => Some("/".to_string()),
    }
}

//! In-memory container.
//!
//! Holds a complete object tree in memory. Object references are 8-byte
//! little-endian object ids handed out by the builder.

use std::collections::BTreeMap;

use super::{normalize_path, Container, ObjectKind, ObjectRef, RawAttribute};
use crate::data::ElementType;
use crate::error::{PadError, Result};

#[derive(Debug, Clone)]
struct Dataset {
    dims: Vec<usize>,
    element_type: ElementType,
    data: Vec<u8>,
}

#[derive(Debug, Clone)]
enum Object {
    Group { children: Vec<String> },
    Dataset(Dataset),
}

#[derive(Debug, Clone)]
struct Entry {
    id: u64,
    object: Object,
    attributes: Vec<RawAttribute>,
}

/// A container held entirely in memory.
#[derive(Debug, Clone)]
pub struct MemoryContainer {
    name: String,
    // keyed by normalized path; "" is the root
    entries: BTreeMap<String, Entry>,
}

/// Builder for [`MemoryContainer`].
#[derive(Debug, Clone)]
pub struct MemoryContainerBuilder {
    container: MemoryContainer,
    next_id: u64,
}

impl MemoryContainer {
    /// Start building a container called `name`.
    pub fn builder(name: impl Into<String>) -> MemoryContainerBuilder {
        let mut entries = BTreeMap::new();
        entries.insert(
            String::new(),
            Entry {
                id: 0,
                object: Object::Group {
                    children: Vec::new(),
                },
                attributes: Vec::new(),
            },
        );
        MemoryContainerBuilder {
            container: Self {
                name: name.into(),
                entries,
            },
            next_id: 1,
        }
    }

    /// Reference handle bytes for the object at `path`.
    pub fn reference_to(&self, path: &str) -> Option<[u8; 8]> {
        self.entries
            .get(normalize_path(path))
            .map(|entry| entry.id.to_le_bytes())
    }

    fn entry(&self, path: &str) -> Result<&Entry> {
        self.entries
            .get(normalize_path(path))
            .ok_or_else(|| PadError::not_found(path))
    }

    fn dataset(&self, path: &str) -> Result<&Dataset> {
        match &self.entry(path)?.object {
            Object::Dataset(ds) => Ok(ds),
            Object::Group { .. } => Err(PadError::not_a_dataset(path)),
        }
    }
}

impl MemoryContainerBuilder {
    fn insert(&mut self, path: &str, object: Object) -> &mut Self {
        let path = normalize_path(path).to_string();
        let (parent, name) = match path.rfind('/') {
            Some(idx) => (path[..idx].to_string(), path[idx + 1..].to_string()),
            None => (String::new(), path.clone()),
        };
        if !self.container.entries.contains_key(&parent) {
            self.group(&parent);
        }
        if let Some(Entry {
            object: Object::Group { children },
            ..
        }) = self.container.entries.get_mut(&parent)
        {
            if !children.contains(&name) {
                children.push(name);
            }
        }
        let id = self.next_id;
        self.next_id += 1;
        self.container.entries.insert(
            path,
            Entry {
                id,
                object,
                attributes: Vec::new(),
            },
        );
        self
    }

    /// Add a group; missing parents are created.
    pub fn group(&mut self, path: &str) -> &mut Self {
        if self.container.entries.contains_key(normalize_path(path)) {
            return self;
        }
        self.insert(
            path,
            Object::Group {
                children: Vec::new(),
            },
        )
    }

    /// Add a dataset with raw element bytes; missing parents are created.
    pub fn dataset(
        &mut self,
        path: &str,
        dims: &[usize],
        element_type: ElementType,
        data: Vec<u8>,
    ) -> &mut Self {
        self.insert(
            path,
            Object::Dataset(Dataset {
                dims: dims.to_vec(),
                element_type,
                data,
            }),
        )
    }

    /// Attach an attribute to the object at `path`.
    pub fn attribute(
        &mut self,
        path: &str,
        name: &str,
        element_type: ElementType,
        element_count: usize,
        data: Vec<u8>,
    ) -> &mut Self {
        if let Some(entry) = self.container.entries.get_mut(normalize_path(path)) {
            entry.attributes.push(RawAttribute {
                name: name.to_string(),
                element_type,
                element_count,
                data,
            });
        }
        self
    }

    /// Attach a fixed-length string attribute.
    pub fn string_attribute(&mut self, path: &str, name: &str, value: &str) -> &mut Self {
        let bytes = value.as_bytes().to_vec();
        self.attribute(path, name, ElementType::string(bytes.len()), 1, bytes)
    }

    /// Reference handle bytes for an object added earlier.
    pub fn reference_to(&self, path: &str) -> Option<[u8; 8]> {
        self.container.reference_to(path)
    }

    /// Finish building.
    pub fn build(&self) -> MemoryContainer {
        self.container.clone()
    }
}

impl Container for MemoryContainer {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn classify(&self, path: &str) -> Result<ObjectKind> {
        let path = normalize_path(path);
        if path.is_empty() {
            return Ok(ObjectKind::Root);
        }
        Ok(match self.entries.get(path).map(|e| &e.object) {
            Some(Object::Group { .. }) => ObjectKind::Group,
            Some(Object::Dataset(_)) => ObjectKind::Dataset,
            None => ObjectKind::Unknown,
        })
    }

    fn canonical_path(&self, path: &str) -> Result<String> {
        self.entry(path)?;
        Ok(format!("/{}", normalize_path(path)))
    }

    fn list_children(&self, path: &str) -> Result<Vec<String>> {
        match &self.entry(path)?.object {
            Object::Group { children } => Ok(children.clone()),
            Object::Dataset(_) => Ok(Vec::new()),
        }
    }

    fn dimensions(&self, path: &str) -> Result<Vec<usize>> {
        Ok(self.dataset(path)?.dims.clone())
    }

    fn element_type(&self, path: &str) -> Result<ElementType> {
        Ok(self.dataset(path)?.element_type.clone())
    }

    fn read_raw(&self, path: &str) -> Result<Vec<u8>> {
        Ok(self.dataset(path)?.data.clone())
    }

    fn attribute_names(&self, path: &str) -> Result<Vec<String>> {
        Ok(self
            .entry(path)?
            .attributes
            .iter()
            .map(|a| a.name.clone())
            .collect())
    }

    fn attribute(&self, path: &str, name: &str) -> Result<RawAttribute> {
        self.entry(path)?
            .attributes
            .iter()
            .find(|a| a.name == name)
            .cloned()
            .ok_or_else(|| PadError::not_found(format!("{}@{}", path, name)))
    }

    fn resolve_reference(&self, handle: &[u8]) -> Result<ObjectRef> {
        let mut raw = [0u8; 8];
        let n = handle.len().min(raw.len());
        raw[..n].copy_from_slice(&handle[..n]);
        let id = u64::from_le_bytes(raw);

        let (path, entry) = self
            .entries
            .iter()
            .find(|(_, entry)| entry.id == id)
            .ok_or_else(|| PadError::not_found(format!("reference #{}", id)))?;
        let kind = match (&entry.object, path.is_empty()) {
            (_, true) => ObjectKind::Root,
            (Object::Group { .. }, false) => ObjectKind::Group,
            (Object::Dataset(_), false) => ObjectKind::Dataset,
        };
        Ok(ObjectRef::new(format!("/{}", path), kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MemoryContainer {
        MemoryContainer::builder("sample.h5")
            .group("grp/inner")
            .dataset("grp/values", &[2], ElementType::int(4), vec![0; 8])
            .string_attribute("grp", "units", "m")
            .build()
    }

    #[test]
    fn parents_are_created_and_listed() {
        let c = sample();
        assert_eq!(c.list_children("/").unwrap(), vec!["grp"]);
        assert_eq!(c.list_children("/grp").unwrap(), vec!["inner", "values"]);
        assert_eq!(c.classify("grp/inner").unwrap(), ObjectKind::Group);
        assert_eq!(c.classify("/grp/values").unwrap(), ObjectKind::Dataset);
        assert_eq!(c.classify("nope").unwrap(), ObjectKind::Unknown);
    }

    #[test]
    fn references_resolve_to_paths() {
        let c = sample();
        let handle = c.reference_to("grp/values").unwrap();
        let target = c.resolve_reference(&handle).unwrap();
        assert_eq!(target, ObjectRef::new("/grp/values", ObjectKind::Dataset));
        assert!(c.resolve_reference(&999u64.to_le_bytes()).is_err());
    }

    #[test]
    fn dataset_queries_fail_on_groups() {
        let c = sample();
        assert!(matches!(
            c.read_raw("grp"),
            Err(PadError::NotADataset { .. })
        ));
        assert_eq!(c.attribute_names("/grp").unwrap(), vec!["units"]);
    }
}

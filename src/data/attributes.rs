//! Attribute table rows.

use crate::container::{Container, RawAttribute};
use crate::data::decoder::{decode_cell, hex_bytes};
use crate::data::ElementType;

/// One row of the attribute table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRow {
    /// Attribute name.
    pub name: String,
    /// Element type, as a short description.
    pub type_name: String,
    /// Rendered value, absent when the attribute could not be read.
    pub value: Option<String>,
}

/// Render an attribute's value.
///
/// VarLen data is shown as hex of the whole buffer. A single element is shown
/// bare; several elements are shown as `[a, b, c]`.
pub fn render_attribute(container: &dyn Container, attr: &RawAttribute) -> String {
    if let ElementType::VarLen { .. } = attr.element_type {
        return hex_bytes(&attr.data);
    }
    let size = attr.element_type.size();
    if size == 0 {
        return String::new();
    }

    let count = attr.element_count.max(1);
    let values: Vec<String> = attr
        .data
        .chunks(size)
        .take(count)
        .map(|chunk| match decode_cell(chunk, &attr.element_type, container) {
            Ok(cell) => cell.text,
            Err(err) => {
                tracing::debug!("Attribute {} element not decoded: {}", attr.name, err);
                String::new()
            },
        })
        .collect();

    match values.as_slice() {
        [single] if attr.element_count <= 1 => single.clone(),
        _ => format!("[{}]", values.join(", ")),
    }
}

/// Read every attribute of the object at `path`.
///
/// A failure on one attribute leaves its value empty and does not stop the
/// others from being read.
pub fn read_attributes(container: &dyn Container, path: &str) -> Vec<AttributeRow> {
    let names = match container.attribute_names(path) {
        Ok(names) => names,
        Err(err) => {
            tracing::debug!("Attributes of {} not listed: {}", path, err);
            return Vec::new();
        },
    };

    names
        .into_iter()
        .map(|name| match container.attribute(path, &name) {
            Ok(attr) => AttributeRow {
                type_name: attr.element_type.describe(),
                value: Some(render_attribute(container, &attr)),
                name,
            },
            Err(err) => {
                tracing::debug!("Attribute {} of {} not read: {}", name, path, err);
                AttributeRow {
                    name,
                    type_name: String::from("?"),
                    value: None,
                }
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::MemoryContainer;

    fn ints(values: &[i32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_ne_bytes()).collect()
    }

    #[test]
    fn scalar_and_array_values() {
        let container = MemoryContainer::builder("attrs")
            .group("g")
            .attribute("g", "one", ElementType::int(4), 1, ints(&[5]))
            .attribute("g", "many", ElementType::int(4), 3, ints(&[1, 2, 3]))
            .string_attribute("g", "units", "kelvin")
            .build();

        let rows = read_attributes(&container, "/g");
        let values: Vec<_> = rows.iter().map(|r| r.value.clone().unwrap()).collect();
        assert_eq!(values, vec!["5", "[1, 2, 3]", "kelvin"]);
        assert_eq!(rows[0].type_name, "i32");
    }

    #[test]
    fn varlen_attribute_is_hex() {
        let container = MemoryContainer::builder("attrs")
            .group("g")
            .attribute("g", "blob", ElementType::VarLen { size: 16 }, 1, vec![0xAB, 0x01])
            .build();
        let rows = read_attributes(&container, "g");
        assert_eq!(rows[0].value.as_deref(), Some("AB 01"));
    }

    #[test]
    fn missing_object_gives_no_rows() {
        let container = MemoryContainer::builder("attrs").build();
        assert!(read_attributes(&container, "/nowhere").is_empty());
    }
}

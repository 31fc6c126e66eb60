//! netCDF-4 / HDF5 file backend.

use std::path::{Path, PathBuf};

use netcdf::types::{FloatType, IntType, NcVariableType};
use netcdf::AttributeValue;

use super::{normalize_path, Container, ObjectKind, ObjectRef, RawAttribute};
use crate::data::{unravel_index, CompoundMember, ElementType};
use crate::error::{PadError, Result};

/// A container backed by a file opened through the `netcdf` library.
pub struct NetcdfContainer {
    path: PathBuf,
    file: netcdf::File,
}

impl std::fmt::Debug for NetcdfContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetcdfContainer")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl NetcdfContainer {
    /// Open a file read-only.
    pub fn open(path: &Path) -> Result<Self> {
        let file =
            netcdf::open(path).map_err(|e| PadError::file_open(path, e.to_string()))?;
        tracing::info!("Opened {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    // Classic-format files have no groups; nested lookups would fail inside the library.
    fn has_groups(&self) -> bool {
        self.file.root().is_some()
    }

    fn group(&self, path: &str) -> Option<netcdf::Group<'_>> {
        let path = normalize_path(path);
        if path.is_empty() || !self.has_groups() {
            return None;
        }
        match self.file.group(path) {
            Ok(group) => group,
            // a missing intermediate group means nothing lives at the path
            Err(err) => {
                tracing::debug!("No group at {}: {}", path, err);
                None
            },
        }
    }

    fn variable(&self, path: &str) -> Result<netcdf::Variable<'_>> {
        let path = normalize_path(path);
        if path.is_empty() || (path.contains('/') && !self.has_groups()) {
            return Err(PadError::not_a_dataset(path));
        }
        self.file
            .variable(path)
            .ok_or_else(|| PadError::not_a_dataset(path))
    }

    /// Run `f` over the attributes of the object at `path`.
    fn with_attributes<T>(
        &self,
        path: &str,
        f: impl FnOnce(&mut dyn Iterator<Item = netcdf::Attribute<'_>>) -> T,
    ) -> Result<T> {
        let normalized = normalize_path(path);
        if normalized.is_empty() {
            return Ok(f(&mut self.file.attributes()));
        }
        if let Some(group) = self.group(normalized) {
            return Ok(f(&mut group.attributes()));
        }
        let var = self.variable(normalized)?;
        let result = f(&mut var.attributes());
        Ok(result)
    }

    fn read_strings(var: &netcdf::Variable<'_>) -> Result<Vec<String>> {
        let dims: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
        if dims.is_empty() {
            return Ok(vec![var.get_string(..)?]);
        }
        (0..var.len())
            .map(|i| -> Result<String> {
                let index = unravel_index(i, &dims);
                Ok(var.get_string(index.as_slice())?)
            })
            .collect()
    }

    /// All strings of a variable, NUL padded to the longest; returns the width.
    fn read_padded_strings(var: &netcdf::Variable<'_>) -> Result<(usize, Vec<u8>)> {
        let strings = Self::read_strings(var)?;
        let width = strings.iter().map(String::len).max().unwrap_or(0).max(1);
        let mut bytes = Vec::with_capacity(width * strings.len());
        for s in &strings {
            bytes.extend_from_slice(s.as_bytes());
            bytes.resize(bytes.len() + width - s.len(), 0);
        }
        Ok((width, bytes))
    }
}

impl Container for NetcdfContainer {
    fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    fn classify(&self, path: &str) -> Result<ObjectKind> {
        let path = normalize_path(path);
        if path.is_empty() {
            return Ok(ObjectKind::Root);
        }
        if self.group(path).is_some() {
            return Ok(ObjectKind::Group);
        }
        if self.variable(path).is_ok() {
            return Ok(ObjectKind::Dataset);
        }
        Ok(ObjectKind::Unknown)
    }

    fn canonical_path(&self, path: &str) -> Result<String> {
        match self.classify(path)? {
            ObjectKind::Unknown => Err(PadError::not_found(path)),
            _ => Ok(format!("/{}", normalize_path(path))),
        }
    }

    fn list_children(&self, path: &str) -> Result<Vec<String>> {
        let path = normalize_path(path);
        if path.is_empty() {
            let mut names: Vec<String> = match self.file.groups() {
                Ok(groups) => groups.map(|g| g.name().to_string()).collect(),
                // classic format
                Err(_) => Vec::new(),
            };
            names.extend(self.file.variables().map(|v| v.name().to_string()));
            return Ok(names);
        }

        let group = self.group(path).ok_or_else(|| PadError::not_found(path))?;
        let mut names: Vec<String> = group.groups().map(|g| g.name().to_string()).collect();
        names.extend(group.variables().map(|v| v.name().to_string()));
        Ok(names)
    }

    fn dimensions(&self, path: &str) -> Result<Vec<usize>> {
        let var = self.variable(path)?;
        Ok(var.dimensions().iter().map(|d| d.len()).collect())
    }

    fn element_type(&self, path: &str) -> Result<ElementType> {
        let var = self.variable(path)?;
        let vartype = var.vartype();
        if matches!(vartype, NcVariableType::String) {
            // width depends on the stored strings; read_typed settles it
            return Ok(ElementType::string(0));
        }
        Ok(map_type(&vartype))
    }

    fn read_raw(&self, path: &str) -> Result<Vec<u8>> {
        Ok(self.read_typed(path)?.1)
    }

    fn read_typed(&self, path: &str) -> Result<(ElementType, Vec<u8>)> {
        let var = self.variable(path)?;
        let vartype = var.vartype();
        match vartype {
            NcVariableType::String => {
                let (width, bytes) = Self::read_padded_strings(&var)?;
                Ok((ElementType::string(width), bytes))
            },
            // vlen storage holds library-owned pointers; those cells only show the class name
            NcVariableType::Vlen(_) => {
                let zeroed = vec![0; var.len() * vartype.size()];
                Ok((map_type(&vartype), zeroed))
            },
            _ => Ok((map_type(&vartype), var.get_raw_values(..)?)),
        }
    }

    fn attribute_names(&self, path: &str) -> Result<Vec<String>> {
        self.with_attributes(path, |attrs| attrs.map(|a| a.name().to_string()).collect())
    }

    fn attribute(&self, path: &str, name: &str) -> Result<RawAttribute> {
        let value = self
            .with_attributes(path, |mut attrs| Iterator::find(&mut attrs, |a| a.name() == name).map(|a| a.value()))?
            .ok_or_else(|| PadError::not_found(format!("{}@{}", path, name)))??;
        Ok(attribute_to_raw(name, value))
    }

    fn resolve_reference(&self, _handle: &[u8]) -> Result<ObjectRef> {
        Err(PadError::unsupported(
            "object references in netCDF-4 files",
        ))
    }
}

/// Map a netCDF type onto an element type.
fn map_type(vartype: &NcVariableType) -> ElementType {
    #[allow(unreachable_patterns)]
    match vartype {
        NcVariableType::Int(int) => match int {
            IntType::I8 => ElementType::int(1),
            IntType::I16 => ElementType::int(2),
            IntType::I32 => ElementType::int(4),
            IntType::I64 => ElementType::int(8),
            IntType::U8 => ElementType::uint(1),
            IntType::U16 => ElementType::uint(2),
            IntType::U32 => ElementType::uint(4),
            IntType::U64 => ElementType::uint(8),
        },
        NcVariableType::Float(FloatType::F32) => ElementType::float(4),
        NcVariableType::Float(FloatType::F64) => ElementType::float(8),
        NcVariableType::Char => ElementType::string(1),
        NcVariableType::Enum(_) => ElementType::int(vartype.size()),
        NcVariableType::Opaque(opaque) => ElementType::VarLen { size: opaque.size },
        NcVariableType::Compound(compound) => ElementType::Compound {
            size: compound.size,
            members: compound
                .fields
                .iter()
                .map(|field| {
                    let member_type = match &field.arraydims {
                        Some(dims) => ElementType::Other {
                            size: field.basetype.size() * dims.iter().product::<usize>(),
                            class_name: "Array".to_string(),
                        },
                        None => map_type(&field.basetype),
                    };
                    CompoundMember::new(field.name.clone(), field.offset, member_type)
                })
                .collect(),
        },
        // pointer-sized inside compounds; never dereferenced here
        NcVariableType::String => ElementType::Other {
            size: vartype.size(),
            class_name: "String".to_string(),
        },
        NcVariableType::Vlen(_) => ElementType::Other {
            size: vartype.size(),
            class_name: "VarLen array".to_string(),
        },
        other => ElementType::Other {
            size: other.size(),
            class_name: format!("{:?}", other),
        },
    }
}

/// Flatten an attribute value into its element type and native bytes.
fn attribute_to_raw(name: &str, value: AttributeValue) -> RawAttribute {
    fn pack<T: Copy, const N: usize>(
        values: &[T],
        to_bytes: impl Fn(T) -> [u8; N],
    ) -> (usize, Vec<u8>) {
        let bytes = values.iter().flat_map(|&v| to_bytes(v)).collect();
        (values.len(), bytes)
    }

    #[allow(unreachable_patterns)]
    let (element_type, (element_count, data)) = match value {
        AttributeValue::Uchar(v) => (ElementType::uint(1), pack(&[v], u8::to_ne_bytes)),
        AttributeValue::Uchars(v) => (ElementType::uint(1), pack(&v, u8::to_ne_bytes)),
        AttributeValue::Schar(v) => (ElementType::int(1), pack(&[v], i8::to_ne_bytes)),
        AttributeValue::Schars(v) => (ElementType::int(1), pack(&v, i8::to_ne_bytes)),
        AttributeValue::Ushort(v) => (ElementType::uint(2), pack(&[v], u16::to_ne_bytes)),
        AttributeValue::Ushorts(v) => (ElementType::uint(2), pack(&v, u16::to_ne_bytes)),
        AttributeValue::Short(v) => (ElementType::int(2), pack(&[v], i16::to_ne_bytes)),
        AttributeValue::Shorts(v) => (ElementType::int(2), pack(&v, i16::to_ne_bytes)),
        AttributeValue::Uint(v) => (ElementType::uint(4), pack(&[v], u32::to_ne_bytes)),
        AttributeValue::Uints(v) => (ElementType::uint(4), pack(&v, u32::to_ne_bytes)),
        AttributeValue::Int(v) => (ElementType::int(4), pack(&[v], i32::to_ne_bytes)),
        AttributeValue::Ints(v) => (ElementType::int(4), pack(&v, i32::to_ne_bytes)),
        AttributeValue::Ulonglong(v) => (ElementType::uint(8), pack(&[v], u64::to_ne_bytes)),
        AttributeValue::Ulonglongs(v) => (ElementType::uint(8), pack(&v, u64::to_ne_bytes)),
        AttributeValue::Longlong(v) => (ElementType::int(8), pack(&[v], i64::to_ne_bytes)),
        AttributeValue::Longlongs(v) => (ElementType::int(8), pack(&v, i64::to_ne_bytes)),
        AttributeValue::Float(v) => (ElementType::float(4), pack(&[v], f32::to_ne_bytes)),
        AttributeValue::Floats(v) => (ElementType::float(4), pack(&v, f32::to_ne_bytes)),
        AttributeValue::Double(v) => (ElementType::float(8), pack(&[v], f64::to_ne_bytes)),
        AttributeValue::Doubles(v) => (ElementType::float(8), pack(&v, f64::to_ne_bytes)),
        AttributeValue::Str(s) => {
            let bytes = s.into_bytes();
            (ElementType::string(bytes.len()), (1, bytes))
        },
        AttributeValue::Strs(strings) => {
            let width = strings.iter().map(String::len).max().unwrap_or(0);
            let mut bytes = Vec::with_capacity(width * strings.len());
            for s in &strings {
                bytes.extend_from_slice(s.as_bytes());
                bytes.resize(bytes.len() + width - s.len(), 0);
            }
            (ElementType::string(width), (strings.len(), bytes))
        },
        other => {
            let text = format!("{:?}", other).into_bytes();
            (ElementType::string(text.len()), (1, text))
        },
    };

    RawAttribute {
        name: name.to_string(),
        element_type,
        element_count,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_types_keep_signedness() {
        assert_eq!(
            map_type(&NcVariableType::Int(IntType::U16)),
            ElementType::uint(2)
        );
        assert_eq!(
            map_type(&NcVariableType::Int(IntType::I64)),
            ElementType::int(8)
        );
        assert_eq!(map_type(&NcVariableType::Char), ElementType::string(1));
    }

    #[test]
    fn string_attribute_becomes_fixed_string() {
        let raw = attribute_to_raw("MATLAB_class", AttributeValue::Str("char".to_string()));
        assert_eq!(raw.element_type, ElementType::string(4));
        assert_eq!(raw.data, b"char");
        assert_eq!(raw.element_count, 1);
    }

    #[test]
    fn string_list_attribute_is_padded() {
        let raw = attribute_to_raw(
            "names",
            AttributeValue::Strs(vec!["ab".to_string(), "c".to_string()]),
        );
        assert_eq!(raw.element_type, ElementType::string(2));
        assert_eq!(raw.data, b"abc\0");
        assert_eq!(raw.element_count, 2);
    }

    #[test]
    fn numeric_array_attribute_packs_native_bytes() {
        let raw = attribute_to_raw("range", AttributeValue::Shorts(vec![1, -1]));
        assert_eq!(raw.element_type, ElementType::int(2));
        assert_eq!(raw.element_count, 2);
        let mut expected = 1i16.to_ne_bytes().to_vec();
        expected.extend_from_slice(&(-1i16).to_ne_bytes());
        assert_eq!(raw.data, expected);
    }

    #[test]
    fn missing_file_fails_to_open() {
        let err = NetcdfContainer::open(Path::new("/definitely/not/here.h5")).unwrap_err();
        assert!(matches!(err, PadError::FileOpen { .. }));
    }
}

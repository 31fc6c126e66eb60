//! Type-directed decoding of raw element bytes into display cells.
//!
//! Decoding never reads past the element's declared size. Numeric values are
//! copied into a zeroed native scratch value of the matching width, so a
//! short slice can never be over-read.

use crate::container::{Container, ObjectKind, ObjectRef};
use crate::data::ElementType;
use crate::error::DecodeError;

/// Attribute marking a dataset as a character array.
pub const CHAR_CLASS_ATTRIBUTE: &str = "MATLAB_class";

/// Value of [`CHAR_CLASS_ATTRIBUTE`] for character arrays.
pub const CHAR_CLASS_VALUE: &str = "char";

/// Token for compound members that cannot be decoded.
pub const UNKNOWN_FIELD: &str = "?";

/// One decoded table cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    /// Display text.
    pub text: String,
    /// Navigable target, for reference cells.
    pub target: Option<ObjectRef>,
}

impl Cell {
    /// A plain text cell.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target: None,
        }
    }

    /// An empty cell.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Whether activating the cell leads somewhere.
    pub fn is_navigable(&self) -> bool {
        self.target.is_some()
    }
}

/// Decode one element into a cell.
///
/// `bytes` starts at the element; only the first `element_type.size()` bytes
/// are read. References are resolved against `container`.
pub fn decode_cell(
    bytes: &[u8],
    element_type: &ElementType,
    container: &dyn Container,
) -> Result<Cell, DecodeError> {
    let size = element_type.size();
    if bytes.len() < size {
        return Err(DecodeError::Truncated {
            needed: size,
            available: bytes.len(),
        });
    }
    let bytes = &bytes[..size];

    match element_type {
        ElementType::Integer { signed, .. } => Ok(Cell::text(
            decode_integer(bytes, *signed).unwrap_or_else(|| element_type.class_name().to_string()),
        )),
        ElementType::Float { .. } => Ok(Cell::text(
            decode_float(bytes).unwrap_or_else(|| element_type.class_name().to_string()),
        )),
        ElementType::String { .. } => Ok(Cell::text(decode_string(bytes))),
        ElementType::VarLen { .. } => Ok(Cell::text(hex_bytes(bytes))),
        ElementType::Compound { members, .. } => {
            let fields: Vec<String> = members
                .iter()
                .map(|member| {
                    if !member.fits(size) {
                        return UNKNOWN_FIELD.to_string();
                    }
                    let end = member.offset + member.member_type.size();
                    match decode_cell(&bytes[member.offset..end], &member.member_type, container)
                    {
                        Ok(cell) => cell.text,
                        Err(err) => {
                            tracing::debug!("Member {} not decoded: {}", member.name, err);
                            UNKNOWN_FIELD.to_string()
                        },
                    }
                })
                .collect();
            Ok(Cell::text(format!("{{{}}}", fields.join(","))))
        },
        ElementType::Reference { .. } => decode_reference(bytes, container),
        ElementType::Other { class_name, .. } => Ok(Cell::text(class_name.clone())),
    }
}

fn decode_reference(handle: &[u8], container: &dyn Container) -> Result<Cell, DecodeError> {
    let target = container
        .resolve_reference(handle)
        .map_err(|e| DecodeError::Reference(e.to_string()))?;

    let mut text = target.path.clone();
    if target.kind == ObjectKind::Dataset && is_char_array(container, &target.path) {
        match read_char_text(container, &target.path) {
            Ok(decoded) => text = decoded,
            Err(err) => tracing::debug!("Character data at {} not read: {}", target.path, err),
        }
    }

    Ok(Cell {
        text,
        target: Some(target),
    })
}

/// Copy up to `N` bytes into a zeroed scratch array.
fn scratch<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    let n = bytes.len().min(N);
    out[..n].copy_from_slice(&bytes[..n]);
    out
}

/// Decimal text of a native-endian integer of 1, 2, 4 or 8 bytes.
pub fn decode_integer(bytes: &[u8], signed: bool) -> Option<String> {
    let text = match (bytes.len(), signed) {
        (1, true) => i64::from(i8::from_ne_bytes(scratch(bytes))).to_string(),
        (2, true) => i64::from(i16::from_ne_bytes(scratch(bytes))).to_string(),
        (4, true) => i64::from(i32::from_ne_bytes(scratch(bytes))).to_string(),
        (8, true) => i64::from_ne_bytes(scratch(bytes)).to_string(),
        (1, false) => u64::from(u8::from_ne_bytes(scratch(bytes))).to_string(),
        (2, false) => u64::from(u16::from_ne_bytes(scratch(bytes))).to_string(),
        (4, false) => u64::from(u32::from_ne_bytes(scratch(bytes))).to_string(),
        (8, false) => u64::from_ne_bytes(scratch(bytes)).to_string(),
        _ => return None,
    };
    Some(text)
}

/// Text of a native-endian float of 4 or 8 bytes.
pub fn decode_float(bytes: &[u8]) -> Option<String> {
    match bytes.len() {
        4 => Some(format_float(f64::from(f32::from_ne_bytes(scratch(bytes))))),
        8 => Some(format_float(f64::from_ne_bytes(scratch(bytes)))),
        _ => None,
    }
}

const SIGNIFICANT_DIGITS: usize = 6;

/// `%g`-style text: six significant digits, exponent form outside `1e-4..1e6`.
pub fn format_float(value: f64) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "nan".to_string()
        } else if value.is_sign_positive() {
            "inf".to_string()
        } else {
            "-inf".to_string()
        };
    }
    if value == 0.0 {
        return "0".to_string();
    }

    // Rounding to the digit count can carry into the next decade, so take
    // the exponent from the rounded scientific form.
    let scientific = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

/// Fixed-length text; trailing NUL padding is dropped.
pub fn decode_string(bytes: &[u8]) -> String {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// Space-separated uppercase hex, e.g. `DE AD`.
pub fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Widen every element to a code point and join them into text.
///
/// Each element contributes `min(element_size, 4)` little-endian bytes.
pub fn decode_wide_text(bytes: &[u8], element_size: usize) -> String {
    if element_size == 0 {
        return String::new();
    }
    let text: String = bytes
        .chunks_exact(element_size)
        .map(|chunk| {
            let code = u32::from_le_bytes(scratch(chunk));
            char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
        })
        .collect();
    text.trim_end_matches('\0').to_string()
}

/// Whether the dataset at `path` is marked as character data.
pub fn is_char_array(container: &dyn Container, path: &str) -> bool {
    let has_marker = container
        .attribute_names(path)
        .map(|names| names.iter().any(|n| n == CHAR_CLASS_ATTRIBUTE))
        .unwrap_or(false);
    if !has_marker {
        return false;
    }
    match container.attribute(path, CHAR_CLASS_ATTRIBUTE) {
        Ok(attr) => {
            // the whole stored value must match; padded values are not the marker
            matches!(attr.element_type, ElementType::String { .. })
                && attr.data == CHAR_CLASS_VALUE.as_bytes()
        },
        Err(err) => {
            tracing::debug!("{} on {} not read: {}", CHAR_CLASS_ATTRIBUTE, path, err);
            false
        },
    }
}

/// Read a whole character-array dataset as text.
pub fn read_char_text(container: &dyn Container, path: &str) -> crate::error::Result<String> {
    let (element_type, data) = container.read_typed(path)?;
    Ok(decode_wide_text(&data, element_type.size()))
}

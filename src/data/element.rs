//! Element type descriptions.

/// Declared type of one array element.
///
/// The set of classes is closed; every consumer matches on it exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementType {
    /// Two's complement or unsigned integer.
    Integer {
        /// Width in bytes.
        size: usize,
        /// Whether the value is sign-extended.
        signed: bool,
    },
    /// IEEE floating point.
    Float {
        /// Width in bytes.
        size: usize,
    },
    /// Fixed-length text.
    String {
        /// Width in bytes.
        size: usize,
    },
    /// Opaque, variable-size payload shown as hex.
    VarLen {
        /// Width in bytes.
        size: usize,
    },
    /// Record with named, offset-addressed members.
    Compound {
        /// Width of the whole record in bytes.
        size: usize,
        /// Members in declaration order.
        members: Vec<CompoundMember>,
    },
    /// Handle to another object of the same container.
    Reference {
        /// Width in bytes.
        size: usize,
    },
    /// Anything else; displayed by its class name.
    Other {
        /// Width in bytes.
        size: usize,
        /// Class name used as the display label.
        class_name: String,
    },
}

/// One member of a compound record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundMember {
    /// Member name.
    pub name: String,
    /// Byte offset from the start of the record.
    pub offset: usize,
    /// Member type; its size is the member size.
    pub member_type: ElementType,
}

impl CompoundMember {
    /// Create a compound member.
    pub fn new(name: impl Into<String>, offset: usize, member_type: ElementType) -> Self {
        Self {
            name: name.into(),
            offset,
            member_type,
        }
    }

    /// Whether the member lies inside a record of `record_size` bytes.
    pub fn fits(&self, record_size: usize) -> bool {
        self.offset
            .checked_add(self.member_type.size())
            .is_some_and(|end| end <= record_size)
    }
}

impl ElementType {
    /// Signed integer of `size` bytes.
    pub fn int(size: usize) -> Self {
        Self::Integer { size, signed: true }
    }

    /// Unsigned integer of `size` bytes.
    pub fn uint(size: usize) -> Self {
        Self::Integer {
            size,
            signed: false,
        }
    }

    /// Float of `size` bytes.
    pub fn float(size: usize) -> Self {
        Self::Float { size }
    }

    /// Fixed-length string of `size` bytes.
    pub fn string(size: usize) -> Self {
        Self::String { size }
    }

    /// Element width in bytes.
    pub fn size(&self) -> usize {
        match self {
            Self::Integer { size, .. }
            | Self::Float { size }
            | Self::String { size }
            | Self::VarLen { size }
            | Self::Compound { size, .. }
            | Self::Reference { size }
            | Self::Other { size, .. } => *size,
        }
    }

    /// Class name, as shown in type columns and as fallback label.
    pub fn class_name(&self) -> &str {
        match self {
            Self::Integer { .. } => "Integer",
            Self::Float { .. } => "Float",
            Self::String { .. } => "String",
            Self::VarLen { .. } => "VarLen",
            Self::Compound { .. } => "Compound",
            Self::Reference { .. } => "Reference",
            Self::Other { class_name, .. } => class_name,
        }
    }

    /// Short description including the width, e.g. `Integer(4)`.
    pub fn describe(&self) -> String {
        match self {
            Self::Integer { size, signed } => {
                let prefix = if *signed { "i" } else { "u" };
                format!("{}{}", prefix, size * 8)
            },
            Self::Float { size } => format!("f{}", size * 8),
            Self::Compound { members, .. } => {
                let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
                format!("Compound{{{}}}", names.join(","))
            },
            other => format!("{}({})", other.class_name(), other.size()),
        }
    }
}

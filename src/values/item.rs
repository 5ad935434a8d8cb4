//! Single-valued items.

use std::{fmt, sync::Arc};

use crate::{
    io::InputFile,
    resource::{ResourceFileType, ResourceId, ResourceName},
    strings::StringRef,
    values::ValueMeta,
};

/// A marker value declaring that an `id` resource exists. Weak by default, so a later
/// definition of the same id replaces it silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Id {
    /// Common metadata
    pub meta: ValueMeta,
}

impl Id {
    /// Creates a weak id marker.
    pub fn new() -> Self {
        Id {
            meta: ValueMeta {
                weak: true,
                ..ValueMeta::default()
            },
        }
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(id)")
    }
}

/// Whether a reference points at a resource (`@`) or at a theme attribute (`?`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReferenceType {
    /// `@type/name`
    #[default]
    Resource,
    /// `?attr/name`
    Attribute,
}

/// A reference to another resource by name, by id or both.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reference {
    /// Common metadata
    pub meta: ValueMeta,
    /// Symbolic target
    pub name: Option<ResourceName>,
    /// Numeric target, when already resolved
    pub id: Option<ResourceId>,
    /// Resource or attribute reference
    pub reference_type: ReferenceType,
    /// Written as `@*package:type/entry`
    pub private_reference: bool,
    /// Target lives in a package whose id is assigned at runtime
    pub is_dynamic: bool,
}

impl Reference {
    /// A resource reference to `name`.
    pub fn from_name(name: ResourceName) -> Self {
        Reference {
            name: Some(name),
            ..Self::default()
        }
    }

    /// A resource reference to `id`.
    pub fn from_id(id: ResourceId) -> Self {
        Reference {
            id: Some(id),
            ..Self::default()
        }
    }

    /// Returns this reference with the given reference type.
    #[must_use]
    pub fn with_type(mut self, reference_type: ReferenceType) -> Self {
        self.reference_type = reference_type;
        self
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_none() && self.id.is_none() {
            return f.write_str("@null");
        }

        let sigil = match self.reference_type {
            ReferenceType::Resource => '@',
            ReferenceType::Attribute => '?',
        };
        write!(f, "{sigil}")?;
        if self.private_reference {
            f.write_str("*")?;
        }
        match (&self.name, self.id) {
            (Some(name), Some(id)) => write!(f, "{name} ({id})"),
            (Some(name), None) => write!(f, "{name}"),
            (None, Some(id)) => write!(f, "{id}"),
            (None, None) => Ok(()),
        }
    }
}

/// A pooled string value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringValue {
    /// Common metadata
    pub meta: ValueMeta,
    /// Pooled text
    pub value: StringRef,
}

impl StringValue {
    /// Wraps a pooled string.
    pub fn new(value: StringRef) -> Self {
        StringValue {
            meta: ValueMeta::default(),
            value,
        }
    }
}

impl fmt::Display for StringValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.value.as_str())
    }
}

/// A file-based resource: a pooled path plus an optional handle to the file contents.
#[derive(Debug, Clone)]
pub struct FileReference {
    /// Common metadata
    pub meta: ValueMeta,
    /// Pooled path, usually `res/<type>[-config]/<name>.<ext>`
    pub path: StringRef,
    /// Kind of payload
    pub file_type: ResourceFileType,
    /// Handle to the contents, when supplied by the caller
    pub file: Option<Arc<dyn InputFile>>,
}

impl FileReference {
    /// A reference to `path` with no contents attached.
    pub fn new(path: StringRef) -> Self {
        FileReference {
            meta: ValueMeta::default(),
            path,
            file_type: ResourceFileType::Unknown,
            file: None,
        }
    }

    /// Returns this reference with file contents attached.
    #[must_use]
    pub fn with_file(mut self, file: Arc<dyn InputFile>) -> Self {
        self.file = Some(file);
        self
    }
}

impl PartialEq for FileReference {
    fn eq(&self, other: &Self) -> bool {
        self.meta == other.meta && self.path == other.path && self.file_type == other.file_type
    }
}

impl Eq for FileReference {}

impl fmt::Display for FileReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(file) {}", self.path)?;
        if self.file_type != ResourceFileType::Unknown {
            write!(f, " type={:?}", self.file_type)?;
        }
        Ok(())
    }
}

/// A raw typed scalar, the `(dataType, data)` pair of a compiled resource value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryPrimitive {
    /// Common metadata
    pub meta: ValueMeta,
    /// Value type, one of the `TYPE_*` constants
    pub data_type: u8,
    /// Raw data
    pub data: u32,
}

#[allow(missing_docs)]
impl BinaryPrimitive {
    pub const TYPE_NULL: u8 = 0x00;
    pub const TYPE_REFERENCE: u8 = 0x01;
    pub const TYPE_ATTRIBUTE: u8 = 0x02;
    pub const TYPE_STRING: u8 = 0x03;
    pub const TYPE_FLOAT: u8 = 0x04;
    pub const TYPE_DIMENSION: u8 = 0x05;
    pub const TYPE_FRACTION: u8 = 0x06;
    pub const TYPE_DYNAMIC_REFERENCE: u8 = 0x07;
    pub const TYPE_DYNAMIC_ATTRIBUTE: u8 = 0x08;
    pub const TYPE_INT_DEC: u8 = 0x10;
    pub const TYPE_INT_HEX: u8 = 0x11;
    pub const TYPE_INT_BOOLEAN: u8 = 0x12;
    pub const TYPE_INT_COLOR_ARGB8: u8 = 0x1c;
    pub const TYPE_INT_COLOR_RGB8: u8 = 0x1d;
    pub const TYPE_INT_COLOR_ARGB4: u8 = 0x1e;
    pub const TYPE_INT_COLOR_RGB4: u8 = 0x1f;

    pub const DATA_NULL_UNDEFINED: u32 = 0;
    pub const DATA_NULL_EMPTY: u32 = 1;
}

impl BinaryPrimitive {
    /// Creates a primitive from its type and data.
    pub fn new(data_type: u8, data: u32) -> Self {
        BinaryPrimitive {
            meta: ValueMeta::default(),
            data_type,
            data,
        }
    }
}

impl fmt::Display for BinaryPrimitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.data_type {
            Self::TYPE_NULL if self.data == Self::DATA_NULL_EMPTY => f.write_str("@empty"),
            Self::TYPE_NULL => f.write_str("@null"),
            Self::TYPE_INT_DEC => write!(f, "{}", self.data as i32),
            Self::TYPE_INT_HEX => write!(f, "0x{:08x}", self.data),
            Self::TYPE_INT_BOOLEAN => f.write_str(if self.data != 0 { "true" } else { "false" }),
            Self::TYPE_INT_COLOR_ARGB8
            | Self::TYPE_INT_COLOR_RGB8
            | Self::TYPE_INT_COLOR_ARGB4
            | Self::TYPE_INT_COLOR_RGB4 => write!(f, "#{:08x}", self.data),
            Self::TYPE_FLOAT => write!(f, "{}", f32::from_bits(self.data)),
            other => write!(f, "(type 0x{other:02x}) 0x{:08x}", self.data),
        }
    }
}

//! Resource names, types, identifiers and source locations.
//!
//! These are the keys of the resource model. A [`ResourceName`] identifies a resource
//! symbolically (`package:type/entry`), a [`ResourceId`] identifies it numerically once ids
//! have been assigned, and a [`Source`] records where a value was declared.
//!
//! # Key Components
//!
//! - [`ResourceType`] - Closed set of resource types (`string`, `attr`, `style`, ...)
//! - [`ResourceName`] - Parsed `package:type/entry` triple
//! - [`ResourceId`] - Numeric `0xPPTTEEEE` identifier
//! - [`Source`] - File and optional line a value came from
//! - [`ResourceFile`] - Identity of a compiled file resource (layouts, drawables, ...)

mod id;
mod name;
mod types;

use std::fmt;

pub use id::ResourceId;
pub use name::{is_valid_entry_name, ParsedName, ResourceName};
pub use types::ResourceType;

use crate::config::ConfigDescription;

/// The location a value or diagnostic refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Source {
    /// Path of the file, as given by the caller
    pub path: String,
    /// Optional 1-based line number
    pub line: Option<usize>,
}

impl Source {
    /// Creates a source that refers to a whole file.
    pub fn new(path: impl Into<String>) -> Self {
        Source {
            path: path.into(),
            line: None,
        }
    }

    /// Returns this source narrowed to a line.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.path, line),
            None => write!(f, "{}", self.path),
        }
    }
}

/// The kind of payload a file-based resource carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResourceFileType {
    /// Unknown or opaque contents
    #[default]
    Unknown,
    /// PNG image
    Png,
    /// Compiled binary XML
    BinaryXml,
    /// Protobuf encoded XML
    ProtoXml,
}

/// Identity of a file resource such as a layout or drawable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFile {
    /// Name of the resource the file defines
    pub name: ResourceName,
    /// Configuration the file was declared for
    pub config: ConfigDescription,
    /// Kind of payload
    pub type_: ResourceFileType,
    /// Where the file came from
    pub source: Source,
}

impl ResourceFile {
    /// Creates a file identity for `name` with the default configuration.
    pub fn new(name: ResourceName, source: Source) -> Self {
        ResourceFile {
            name,
            config: ConfigDescription::default(),
            type_: ResourceFileType::Unknown,
            source,
        }
    }
}

//! # restable Prelude
//!
//! The most commonly used types and traits from across the crate. Import this module to
//! build tables and values without spelling out every module path.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all restable operations
pub use crate::Error;

/// The result type used throughout restable
pub use crate::Result;

/// Collected warnings and errors
pub use crate::diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics};

// ================================================================================================
// Resource Model
// ================================================================================================

/// Names, types, identifiers and sources
pub use crate::resource::{ResourceFile, ResourceId, ResourceName, ResourceType, Source};

/// Device configuration qualifiers
pub use crate::config::ConfigDescription;

/// Interning string pool
pub use crate::strings::{StringPool, StringRef};

/// The value model
pub use crate::values::{
    Attribute, AttributeTypeMask, BinaryPrimitive, FileReference, Id, Item, Reference,
    ResourceValue, Style, Styleable, StringValue, Value, ValueCast,
};

/// The resource table
pub use crate::table::{NewResourceBuilder, ResourceTable, Visibility, VisibilityLevel};

// ================================================================================================
// Symbols and Context
// ================================================================================================

/// Symbol lookup
pub use crate::symbols::{NameMangler, NameManglerPolicy, Symbol, SymbolSource, SymbolTable};

/// Compilation environment
pub use crate::context::AaptContext;

// ================================================================================================
// Fixture Builders
// ================================================================================================

/// Builders and helpers for tests
pub use crate::testing::{
    build_primitive, build_reference, build_xml_dom, get_value, parse_config_or_die,
    parse_name_or_die, AttributeBuilder, ConfigDescriptionBuilder, ContextBuilder,
    ResourceTableBuilder, StyleBuilder, StyleableBuilder, ValueBuilder,
};

//! The environment a compilation step runs in.

use crate::{
    diagnostics::Diagnostics,
    symbols::{NameMangler, SymbolTable},
};

/// Package type, identifiers and shared services of the package being compiled.
///
/// Steps that read or extend a [`ResourceTable`](crate::table::ResourceTable) take a context
/// instead of a bag of parameters. [`crate::testing::Context`] is a ready-made
/// implementation for fixtures.
pub trait AaptContext {
    /// Name of the package being compiled.
    fn compilation_package(&self) -> &str;

    /// Package id assigned to the package being compiled.
    fn package_id(&self) -> u8;

    /// Where problems are reported.
    fn diagnostics(&self) -> &Diagnostics;

    /// How names from merged libraries are rewritten.
    fn name_mangler(&self) -> &NameMangler;

    /// Symbols outside the package being compiled.
    fn external_symbols(&self) -> &SymbolTable<'_>;

    /// Lowest API level the package supports.
    fn min_sdk_version(&self) -> i32;

    /// Whether informational output is wanted.
    fn is_verbose(&self) -> bool {
        false
    }
}

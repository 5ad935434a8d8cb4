//! Places symbols are looked up in.
//!
//! [`ResourceTableSymbolSource`] answers from a [`ResourceTable`] by name or id.

use std::sync::Arc;

use crate::{
    config::ConfigDescription,
    resource::{ResourceId, ResourceName, ResourceType},
    symbols::Symbol,
    table::{ResourceTable, SearchResult, VisibilityLevel},
    values::{Reference, Value},
};

/// A place symbols can be looked up in.
pub trait SymbolSource: Send + Sync {
    /// Looks up `name`, which is already mangled if mangling applies.
    fn find_by_name(&self, name: &ResourceName) -> Option<Symbol>;

    /// Looks up `id`.
    fn find_by_id(&self, id: ResourceId) -> Option<Symbol>;

    /// Looks up `reference` by name, or by identifier when it has no name.
    fn find_by_reference(&self, reference: &Reference) -> Option<Symbol> {
        if let Some(name) = &reference.name {
            return self.find_by_name(name);
        }
        reference.id.and_then(|id| self.find_by_id(id))
    }
}

/// Symbols defined by a [`ResourceTable`].
#[derive(Debug, Clone, Copy)]
pub struct ResourceTableSymbolSource<'a> {
    table: &'a ResourceTable,
}

impl<'a> ResourceTableSymbolSource<'a> {
    /// Creates a source over `table`.
    pub fn new(table: &'a ResourceTable) -> Self {
        ResourceTableSymbolSource { table }
    }

    fn to_symbol(result: SearchResult<'_>, type_: ResourceType) -> Option<Symbol> {
        let entry = result.entry;
        let mut symbol = Symbol {
            is_public: entry.visibility.level == VisibilityLevel::Public,
            ..Symbol::default()
        };

        if let Some(id) = entry.id {
            symbol.id = Some(id);
            symbol.is_dynamic = id.package_id() == 0 || entry.visibility.staged_api;
        }

        if matches!(type_, ResourceType::Attr | ResourceType::AttrPrivate) {
            if let Some(config_value) = entry.find_value(&ConfigDescription::default()) {
                // A default value that is not an attribute makes the symbol unusable.
                match &config_value.value {
                    Value::Attribute(attr) => symbol.attribute = Some(Arc::new(attr.clone())),
                    _ => return None,
                }
            }
        }
        Some(symbol)
    }
}

impl SymbolSource for ResourceTableSymbolSource<'_> {
    fn find_by_name(&self, name: &ResourceName) -> Option<Symbol> {
        match self.table.find_resource(name) {
            Some(result) => Self::to_symbol(result, name.type_),
            None if name.type_ == ResourceType::Attr => self.find_by_name(&ResourceName::new(
                name.package.clone(),
                ResourceType::AttrPrivate,
                name.entry.clone(),
            )),
            None => None,
        }
    }

    fn find_by_id(&self, id: ResourceId) -> Option<Symbol> {
        let result = self.table.find_resource_by_id(id)?;
        Self::to_symbol(result, result.type_.type_)
    }
}

//! Symbol lookup across resource tables and other sources.
//!
//! A [`SymbolTable`] answers "what is the identifier of this name" questions by asking an
//! ordered list of [`SymbolSource`]s. Results are cached by name and by identifier, so
//! repeated lookups during linking do not walk the sources again. The caches are
//! [`DashMap`]s, which lets lookups run through `&self` from several threads.
//!
//! Names are resolved the way the package being compiled sees them: a name without a
//! package belongs to the mangler's target package, and names from mangled library
//! packages are rewritten to `target:type/lib$entry` before the sources are asked.
//!
//! # Key Components
//!
//! - [`SymbolTable`] - Cached lookup over ordered sources
//! - [`SymbolSource`] - Something symbols can be found in
//! - [`ResourceTableSymbolSource`] - Symbols of a [`ResourceTable`](crate::table::ResourceTable)
//! - [`SymbolTableDelegate`] - Strategy that walks the sources
//! - [`NameMangler`] / [`NameManglerPolicy`] - Package folding for merged libraries
//!
//! # Examples
//!
//! ```rust
//! use restable::config::ConfigDescription;
//! use restable::diagnostics::Diagnostics;
//! use restable::resource::{ResourceId, ResourceName};
//! use restable::symbols::{NameMangler, NameManglerPolicy, ResourceTableSymbolSource, SymbolTable};
//! use restable::table::{NewResourceBuilder, ResourceTable};
//! use restable::values::Id;
//!
//! let mut table = ResourceTable::new();
//! table.add_resource(
//!     NewResourceBuilder::new(ResourceName::parse("app:id/title")?)
//!         .set_value(Id::new(), ConfigDescription::default())
//!         .set_id(ResourceId(0x7f01_0000))
//!         .build(),
//!     &Diagnostics::new(),
//! )?;
//!
//! let mangler = NameMangler::new(NameManglerPolicy {
//!     target_package_name: "app".to_string(),
//!     ..NameManglerPolicy::default()
//! });
//! let mut symbols = SymbolTable::new(mangler);
//! symbols.append_source(Box::new(ResourceTableSymbolSource::new(&table)));
//!
//! // No package: the target package is assumed.
//! let symbol = symbols.find_by_name(&ResourceName::parse("id/title")?).unwrap();
//! assert_eq!(symbol.id, Some(ResourceId(0x7f01_0000)));
//! # Ok::<(), restable::Error>(())
//! ```

mod mangler;
mod source;

use std::{hash::Hash, sync::Arc};

use dashmap::DashMap;

pub use mangler::{NameMangler, NameManglerPolicy};
pub use source::{ResourceTableSymbolSource, SymbolSource};

use crate::{
    resource::{ResourceId, ResourceName},
    values::{Attribute, Reference},
};

/// Entries each cache holds before it is emptied.
const CACHE_CAPACITY: usize = 200;

/// What is known about a resource symbol.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Symbol {
    /// Assigned identifier
    pub id: Option<ResourceId>,
    /// Attribute definition, for attribute symbols
    pub attribute: Option<Arc<Attribute>>,
    /// Declared public
    pub is_public: bool,
    /// Identifier is assigned at runtime
    pub is_dynamic: bool,
}

impl Symbol {
    /// A symbol with an identifier and nothing else.
    pub fn new(id: Option<ResourceId>) -> Self {
        Symbol {
            id,
            ..Symbol::default()
        }
    }
}

/// Decides how the sources of a [`SymbolTable`] are searched.
pub trait SymbolTableDelegate: Send + Sync {
    /// Looks up `name` in `sources`.
    fn find_by_name(
        &self,
        name: &ResourceName,
        sources: &[Box<dyn SymbolSource + '_>],
    ) -> Option<Symbol>;

    /// Looks up `id` in `sources`.
    fn find_by_id(&self, id: ResourceId, sources: &[Box<dyn SymbolSource + '_>]) -> Option<Symbol>;
}

/// Returns the answer of the first source that has one.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSymbolTableDelegate;

impl SymbolTableDelegate for DefaultSymbolTableDelegate {
    fn find_by_name(
        &self,
        name: &ResourceName,
        sources: &[Box<dyn SymbolSource + '_>],
    ) -> Option<Symbol> {
        sources.iter().find_map(|source| source.find_by_name(name))
    }

    fn find_by_id(&self, id: ResourceId, sources: &[Box<dyn SymbolSource + '_>]) -> Option<Symbol> {
        sources.iter().find_map(|source| source.find_by_id(id))
    }
}

fn cache_put<K: Eq + Hash>(cache: &DashMap<K, Arc<Symbol>>, key: K, symbol: Arc<Symbol>) {
    if cache.len() >= CACHE_CAPACITY {
        cache.clear();
    }
    cache.insert(key, symbol);
}

/// Cached symbol lookup. See the [module documentation](self).
pub struct SymbolTable<'a> {
    mangler: NameMangler,
    delegate: Box<dyn SymbolTableDelegate>,
    sources: Vec<Box<dyn SymbolSource + 'a>>,
    cache: DashMap<ResourceName, Arc<Symbol>>,
    id_cache: DashMap<ResourceId, Arc<Symbol>>,
}

impl<'a> SymbolTable<'a> {
    /// Creates a table without sources that resolves names with `mangler`.
    pub fn new(mangler: NameMangler) -> Self {
        SymbolTable {
            mangler,
            delegate: Box::new(DefaultSymbolTableDelegate),
            sources: Vec::new(),
            cache: DashMap::new(),
            id_cache: DashMap::new(),
        }
    }

    /// The mangler used to resolve names.
    pub fn mangler(&self) -> &NameMangler {
        &self.mangler
    }

    /// Number of sources.
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Replaces the search strategy and clears the name cache.
    pub fn set_delegate(&mut self, delegate: Box<dyn SymbolTableDelegate>) {
        self.delegate = delegate;
        self.cache.clear();
    }

    /// Adds a source searched after the existing ones. Cached results stay valid.
    pub fn append_source(&mut self, source: Box<dyn SymbolSource + 'a>) {
        self.sources.push(source);
    }

    /// Adds a source searched before the existing ones and clears the name cache.
    pub fn prepend_source(&mut self, source: Box<dyn SymbolSource + 'a>) {
        self.sources.insert(0, source);
        self.cache.clear();
    }

    /// Looks up `name`.
    ///
    /// The result is cached under the package-qualified, unmangled name. When the symbol has
    /// an identifier it is cached under that as well.
    pub fn find_by_name(&self, name: &ResourceName) -> Option<Arc<Symbol>> {
        let name = name.with_default_package(self.mangler.target_package_name());
        if let Some(symbol) = self.cache.get(&name) {
            return Some(Arc::clone(symbol.value()));
        }

        let symbol = match self.mangler.mangle_name(&name) {
            Some(mangled) => self.delegate.find_by_name(&mangled, &self.sources),
            None => self.delegate.find_by_name(&name, &self.sources),
        };
        let symbol = Arc::new(symbol?);

        if let Some(id) = symbol.id {
            cache_put(&self.id_cache, id, Arc::clone(&symbol));
        }
        cache_put(&self.cache, name, Arc::clone(&symbol));
        Some(symbol)
    }

    /// Looks up `id`. Only the identifier cache is filled.
    pub fn find_by_id(&self, id: ResourceId) -> Option<Arc<Symbol>> {
        if let Some(symbol) = self.id_cache.get(&id) {
            return Some(Arc::clone(symbol.value()));
        }

        let symbol = Arc::new(self.delegate.find_by_id(id, &self.sources)?);
        cache_put(&self.id_cache, id, Arc::clone(&symbol));
        Some(symbol)
    }

    /// Looks up `reference` by identifier first and by name if that fails.
    pub fn find_by_reference(&self, reference: &Reference) -> Option<Arc<Symbol>> {
        reference
            .id
            .and_then(|id| self.find_by_id(id))
            .or_else(|| reference.name.as_ref().and_then(|name| self.find_by_name(name)))
    }
}

impl std::fmt::Debug for SymbolTable<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolTable")
            .field("mangler", &self.mangler)
            .field("sources", &self.sources.len())
            .field("cached_names", &self.cache.len())
            .field("cached_ids", &self.id_cache.len())
            .finish()
    }
}

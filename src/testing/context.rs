//! An in-memory [`AaptContext`] and a static symbol source for tests.

use std::{collections::HashMap, sync::Arc};

use crate::{
    context::AaptContext,
    diagnostics::Diagnostics,
    resource::{ResourceId, ResourceName},
    symbols::{NameMangler, NameManglerPolicy, Symbol, SymbolSource, SymbolTable},
    testing::parse_name_or_die,
    values::Attribute,
};

/// An [`AaptContext`] for fixtures, made with [`ContextBuilder`].
#[derive(Debug)]
pub struct Context {
    compilation_package: String,
    package_id: u8,
    min_sdk_version: i32,
    diagnostics: Diagnostics,
    symbols: SymbolTable<'static>,
}

impl AaptContext for Context {
    fn compilation_package(&self) -> &str {
        &self.compilation_package
    }

    fn package_id(&self) -> u8 {
        self.package_id
    }

    fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn name_mangler(&self) -> &NameMangler {
        self.symbols.mangler()
    }

    fn external_symbols(&self) -> &SymbolTable<'_> {
        &self.symbols
    }

    fn min_sdk_version(&self) -> i32 {
        self.min_sdk_version
    }
}

/// Builds a [`Context`].
///
/// Without further calls the context compiles `com.app.test` with package id `0x7f`, mangles
/// nothing and has no external symbols.
///
/// ```rust
/// use restable::context::AaptContext;
/// use restable::resource::{ResourceId, ResourceName};
/// use restable::testing::{ContextBuilder, StaticSymbolSourceBuilder};
///
/// let context = ContextBuilder::new()
///     .set_compilation_package("com.app")
///     .add_symbol_source(
///         StaticSymbolSourceBuilder::new()
///             .add_public_symbol("android:attr/text", ResourceId(0x0101_0014), None)
///             .build(),
///     )
///     .build();
///
/// let symbol = context
///     .external_symbols()
///     .find_by_name(&ResourceName::parse("android:attr/text")?)
///     .unwrap();
/// assert!(symbol.is_public);
/// # Ok::<(), restable::Error>(())
/// ```
#[derive(Default)]
pub struct ContextBuilder {
    compilation_package: Option<String>,
    package_id: Option<u8>,
    min_sdk_version: i32,
    policy: NameManglerPolicy,
    sources: Vec<Box<dyn SymbolSource>>,
}

impl ContextBuilder {
    /// Starts with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the package being compiled.
    #[must_use]
    pub fn set_compilation_package(mut self, package: &str) -> Self {
        self.compilation_package = Some(package.to_string());
        self
    }

    /// Sets the package id.
    #[must_use]
    pub fn set_package_id(mut self, id: u8) -> Self {
        self.package_id = Some(id);
        self
    }

    /// Sets how names from libraries are mangled.
    #[must_use]
    pub fn set_name_mangler_policy(mut self, policy: NameManglerPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the minimum SDK.
    #[must_use]
    pub fn set_min_sdk_version(mut self, min_sdk: i32) -> Self {
        self.min_sdk_version = min_sdk;
        self
    }

    /// Appends an external symbol source.
    #[must_use]
    pub fn add_symbol_source(mut self, source: impl SymbolSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Returns the context.
    pub fn build(self) -> Context {
        let compilation_package = self
            .compilation_package
            .unwrap_or_else(|| "com.app.test".to_string());
        let mut policy = self.policy;
        if policy.target_package_name.is_empty() {
            policy.target_package_name = compilation_package.clone();
        }

        let mut symbols = SymbolTable::new(NameMangler::new(policy));
        for source in self.sources {
            symbols.append_source(source);
        }

        Context {
            compilation_package,
            package_id: self.package_id.unwrap_or(0x7f),
            min_sdk_version: self.min_sdk_version,
            diagnostics: Diagnostics::new(),
            symbols,
        }
    }
}

/// A symbol source holding a fixed set of symbols.
#[derive(Debug, Clone, Default)]
pub struct StaticSymbolSource {
    by_name: HashMap<ResourceName, Symbol>,
    by_id: HashMap<ResourceId, Symbol>,
}

impl SymbolSource for StaticSymbolSource {
    fn find_by_name(&self, name: &ResourceName) -> Option<Symbol> {
        self.by_name.get(name).cloned()
    }

    fn find_by_id(&self, id: ResourceId) -> Option<Symbol> {
        self.by_id.get(&id).cloned()
    }
}

/// Builds a [`StaticSymbolSource`].
#[derive(Debug, Clone, Default)]
pub struct StaticSymbolSourceBuilder {
    source: StaticSymbolSource,
}

impl StaticSymbolSourceBuilder {
    /// Starts an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a public symbol.
    #[must_use]
    pub fn add_public_symbol(self, name: &str, id: ResourceId, attr: Option<Attribute>) -> Self {
        self.insert(name, id, attr, true)
    }

    /// Adds a symbol that is not public.
    #[must_use]
    pub fn add_symbol(self, name: &str, id: ResourceId, attr: Option<Attribute>) -> Self {
        self.insert(name, id, attr, false)
    }

    fn insert(mut self, name: &str, id: ResourceId, attr: Option<Attribute>, is_public: bool) -> Self {
        let symbol = Symbol {
            id: Some(id),
            attribute: attr.map(Arc::new),
            is_public,
            is_dynamic: false,
        };
        self.source.by_id.insert(id, symbol.clone());
        self.source.by_name.insert(parse_name_or_die(name), symbol);
        self
    }

    /// Returns the source.
    pub fn build(self) -> StaticSymbolSource {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{testing::AttributeBuilder, values::AttributeTypeMask};

    #[test]
    fn test_defaults() {
        let context = ContextBuilder::new().build();
        assert_eq!(context.compilation_package(), "com.app.test");
        assert_eq!(context.package_id(), 0x7f);
        assert_eq!(context.min_sdk_version(), 0);
        assert_eq!(context.name_mangler().target_package_name(), "com.app.test");
        assert!(!context.is_verbose());
        assert!(!context.diagnostics().has_any());
    }

    #[test]
    fn test_mangler_policy_is_used_for_lookups() {
        let context = ContextBuilder::new()
            .set_compilation_package("com.app")
            .set_package_id(0x80)
            .set_min_sdk_version(21)
            .set_name_mangler_policy(NameManglerPolicy {
                target_package_name: "com.app".to_string(),
                packages_to_mangle: ["com.lib".to_string()].into(),
            })
            .add_symbol_source(
                StaticSymbolSourceBuilder::new()
                    .add_symbol("com.app:id/com.lib$foo", ResourceId(0x8001_0000), None)
                    .build(),
            )
            .build();

        assert_eq!(context.package_id(), 0x80);
        assert_eq!(context.min_sdk_version(), 21);
        let symbol = context
            .external_symbols()
            .find_by_name(&parse_name_or_die("com.lib:id/foo"))
            .unwrap();
        assert_eq!(symbol.id, Some(ResourceId(0x8001_0000)));
        assert!(!symbol.is_public);
    }

    #[test]
    fn test_static_source() {
        let source = StaticSymbolSourceBuilder::new()
            .add_public_symbol(
                "android:attr/orientation",
                ResourceId(0x0101_00c4),
                Some(
                    AttributeBuilder::new()
                        .set_type_mask(AttributeTypeMask::ENUM)
                        .add_item("horizontal", 0)
                        .add_item("vertical", 1)
                        .build(),
                ),
            )
            .build();

        let by_id = source.find_by_id(ResourceId(0x0101_00c4)).unwrap();
        let by_name = source
            .find_by_name(&parse_name_or_die("android:attr/orientation"))
            .unwrap();
        assert_eq!(by_id, by_name);
        assert!(by_id.is_public);
        assert_eq!(by_id.attribute.unwrap().symbols.len(), 2);
        assert!(source.find_by_id(ResourceId(0x0101_0000)).is_none());
    }
}

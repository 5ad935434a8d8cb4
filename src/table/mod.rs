//! The resource table.
//!
//! A [`ResourceTable`] maps resource names to values. It is organized as
//! packages → types → entries → configuration values, and every level stays sorted by its
//! key, so iteration order is deterministic and matches the order resources are written out.
//!
//! All additions go through [`ResourceTable::add_resource`], which validates the name and
//! identifier, merges visibility and overlay metadata, and resolves collisions between values
//! for the same configuration. Entries are never removed.
//!
//! # Key Components
//!
//! - [`ResourceTable`] - The table and its string pool
//! - [`ResourceTablePackage`] / [`ResourceTableType`] / [`ResourceEntry`] - Levels of the table
//! - [`NewResource`] / [`NewResourceBuilder`] - Input to [`ResourceTable::add_resource`]
//! - [`Visibility`], [`AllowNew`], [`OverlayableItem`] - Entry metadata
//!
//! # Examples
//!
//! ```rust
//! use restable::config::ConfigDescription;
//! use restable::diagnostics::Diagnostics;
//! use restable::resource::ResourceName;
//! use restable::table::{NewResourceBuilder, ResourceTable};
//! use restable::values::StringValue;
//!
//! let diagnostics = Diagnostics::new();
//! let mut table = ResourceTable::new();
//!
//! let hello = StringValue::new(table.string_pool.make_ref("Hello"));
//! let name = ResourceName::parse("app:string/greeting")?;
//! table.add_resource(
//!     NewResourceBuilder::new(name.clone())
//!         .set_value(hello, ConfigDescription::default())
//!         .build(),
//!     &diagnostics,
//! )?;
//!
//! let found = table.find_resource(&name).unwrap();
//! assert_eq!(found.package.name, "app");
//! assert_eq!(found.entry.values().len(), 1);
//! # Ok::<(), restable::Error>(())
//! ```

mod collision;
mod entry;
mod new_resource;

use std::{collections::HashMap, fmt};

pub use collision::{resolve_value_collision, CollisionResult};
pub use entry::{
    AllowNew, Overlayable, OverlayableItem, PolicyFlags, ResourceConfigValue, ResourceEntry,
    Visibility, VisibilityLevel,
};
pub use new_resource::{NewResource, NewResourceBuilder};

use crate::{
    diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics},
    resource::{is_valid_entry_name, ResourceId, ResourceName, ResourceType, Source},
    strings::StringPool,
    values::ResourceValue,
    Error, Result,
};

/// Whether entry names are checked on insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validation {
    /// Reject invalid entry names
    #[default]
    Enabled,
    /// Accept any entry name
    Disabled,
}

/// All resources of one type within a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTableType {
    /// The type
    pub type_: ResourceType,
    /// Highest visibility of any entry of this type
    pub visibility_level: VisibilityLevel,
    entries: Vec<ResourceEntry>,
}

impl ResourceTableType {
    fn new(type_: ResourceType) -> Self {
        ResourceTableType {
            type_,
            visibility_level: VisibilityLevel::Undefined,
            entries: Vec::new(),
        }
    }

    /// Entries sorted by name.
    pub fn entries(&self) -> &[ResourceEntry] {
        &self.entries
    }

    /// The entry called `name`.
    pub fn find_entry(&self, name: &str) -> Option<&ResourceEntry> {
        self.entries
            .binary_search_by(|e| e.name.as_str().cmp(name))
            .ok()
            .map(|index| &self.entries[index])
    }

    fn find_or_create_entry(&mut self, name: &str) -> &mut ResourceEntry {
        let index = match self.entries.binary_search_by(|e| e.name.as_str().cmp(name)) {
            Ok(index) => index,
            Err(index) => {
                self.entries.insert(index, ResourceEntry::new(name));
                index
            }
        };
        &mut self.entries[index]
    }
}

/// All resources of one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTablePackage {
    /// Package name, empty for the package being compiled
    pub name: String,
    types: Vec<ResourceTableType>,
}

impl ResourceTablePackage {
    fn new(name: &str) -> Self {
        ResourceTablePackage {
            name: name.to_string(),
            types: Vec::new(),
        }
    }

    /// Types sorted by type.
    pub fn types(&self) -> &[ResourceTableType] {
        &self.types
    }

    /// The collection of `type_` resources.
    pub fn find_type(&self, type_: ResourceType) -> Option<&ResourceTableType> {
        self.types
            .binary_search_by(|t| t.type_.cmp(&type_))
            .ok()
            .map(|index| &self.types[index])
    }

    fn find_or_create_type(&mut self, type_: ResourceType) -> &mut ResourceTableType {
        let index = match self.types.binary_search_by(|t| t.type_.cmp(&type_)) {
            Ok(index) => index,
            Err(index) => {
                self.types.insert(index, ResourceTableType::new(type_));
                index
            }
        };
        &mut self.types[index]
    }
}

/// The location of an entry in a table.
#[derive(Debug, Clone, Copy)]
pub struct SearchResult<'a> {
    /// Owning package
    pub package: &'a ResourceTablePackage,
    /// Owning type
    pub type_: &'a ResourceTableType,
    /// The entry
    pub entry: &'a ResourceEntry,
}

/// A table of resources. See the [module documentation](self).
#[derive(Debug, Default)]
pub struct ResourceTable {
    /// Pool holding the strings of every string and file value in the table
    pub string_pool: StringPool,
    packages: Vec<ResourceTablePackage>,
    ids: HashMap<ResourceId, ResourceName>,
    validation: Validation,
}

impl ResourceTable {
    /// Creates an empty table that validates entry names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table with the given validation mode.
    pub fn with_validation(validation: Validation) -> Self {
        ResourceTable {
            validation,
            ..Self::default()
        }
    }

    /// Packages sorted by name.
    pub fn packages(&self) -> &[ResourceTablePackage] {
        &self.packages
    }

    /// The package called `name`.
    pub fn find_package(&self, name: &str) -> Option<&ResourceTablePackage> {
        self.packages
            .binary_search_by(|p| p.name.as_str().cmp(name))
            .ok()
            .map(|index| &self.packages[index])
    }

    /// Returns the package called `name`, creating it if needed.
    pub fn find_or_create_package(&mut self, name: &str) -> &mut ResourceTablePackage {
        let index = match self.packages.binary_search_by(|p| p.name.as_str().cmp(name)) {
            Ok(index) => index,
            Err(index) => {
                self.packages.insert(index, ResourceTablePackage::new(name));
                index
            }
        };
        &mut self.packages[index]
    }

    /// Finds the entry for `name`.
    pub fn find_resource(&self, name: &ResourceName) -> Option<SearchResult<'_>> {
        let package = self.find_package(&name.package)?;
        let type_ = package.find_type(name.type_)?;
        let entry = type_.find_entry(&name.entry)?;
        Some(SearchResult {
            package,
            type_,
            entry,
        })
    }

    /// Finds the entry that was assigned `id`.
    pub fn find_resource_by_id(&self, id: ResourceId) -> Option<SearchResult<'_>> {
        let name = self.ids.get(&id)?;
        self.find_resource(name)
    }

    /// Adds a resource. This is the only way to insert into a table.
    ///
    /// The name is validated, the identifier checked against existing assignments, then
    /// visibility, overlay permission, overlayable membership and the value are applied. A
    /// value for a configuration that already has one goes through
    /// [`resolve_value_collision`].
    ///
    /// The table is left unchanged when an error is returned. Every failure is also reported
    /// to `diagnostics`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidResourceName`] for an invalid entry name
    /// - [`Error::InvalidResourceId`] for an identifier with a zero type id
    /// - [`Error::IdInUse`] if another entry already has the identifier
    /// - [`Error::ConflictingId`] if the entry already has a different identifier
    /// - [`Error::DuplicateOverlayable`] if the entry is already overlayable
    /// - [`Error::DuplicateValue`] for two definitive values for one configuration
    pub fn add_resource(&mut self, res: NewResource, diagnostics: &Diagnostics) -> Result<()> {
        let source = res
            .value
            .as_ref()
            .map(|v| v.meta().source.clone())
            .unwrap_or_default();

        let collision = match self.check_resource(&res) {
            Ok(collision) => collision,
            Err((error, previous)) => {
                report(diagnostics, &source, &error);
                if let Some(previous) = previous {
                    diagnostics.push(
                        Diagnostic::new(
                            DiagnosticSeverity::Info,
                            DiagnosticCategory::Table,
                            "resource previously defined here",
                        )
                        .with_source(previous),
                    );
                }
                return Err(error);
            }
        };

        let NewResource {
            name,
            value,
            config,
            product,
            id,
            visibility,
            allow_new,
            overlayable,
            ..
        } = res;

        let type_ = self
            .find_or_create_package(&name.package)
            .find_or_create_type(name.type_);
        if visibility
            .as_ref()
            .is_some_and(|v| v.level == VisibilityLevel::Public)
        {
            type_.visibility_level = VisibilityLevel::Public;
        }

        let entry = type_.find_or_create_entry(&name.entry);
        if let Some(visibility) = visibility {
            if visibility.level > entry.visibility.level {
                entry.visibility = visibility;
            }
        }
        if allow_new.is_some() {
            entry.allow_new = allow_new;
        }
        if overlayable.is_some() {
            entry.overlayable_item = overlayable;
        }

        if let Some(value) = value {
            match entry.position(&config, &product) {
                Err(index) => entry.values.insert(
                    index,
                    ResourceConfigValue {
                        config,
                        product,
                        value,
                    },
                ),
                Ok(index) => {
                    if collision == Some(CollisionResult::TakeNew) {
                        entry.values[index].value = value;
                    }
                }
            }
        }

        if let Some(id) = id {
            entry.id = Some(id);
            self.ids.insert(id, name);
        }
        Ok(())
    }

    /// Runs every check of [`ResourceTable::add_resource`] without touching the table.
    ///
    /// On failure the source of the conflicting earlier definition is returned alongside the
    /// error when there is one.
    fn check_resource(
        &self,
        res: &NewResource,
    ) -> std::result::Result<Option<CollisionResult>, (Error, Option<Source>)> {
        if self.validation == Validation::Enabled
            && !is_valid_entry_name(&res.name.entry, res.allow_mangled)
        {
            return Err((Error::InvalidResourceName(res.name.to_string()), None));
        }

        if let Some(id) = res.id {
            if !id.is_valid_ignoring_package() {
                return Err((Error::InvalidResourceId(id), None));
            }
            if let Some(owner) = self.ids.get(&id) {
                if *owner != res.name {
                    return Err((
                        Error::IdInUse {
                            id,
                            name: res.name.clone(),
                            owner: owner.clone(),
                        },
                        None,
                    ));
                }
            }
        }

        let Some(existing) = self.find_resource(&res.name).map(|r| r.entry) else {
            return Ok(None);
        };

        if let (Some(incoming), Some(current)) = (res.id, existing.id) {
            if incoming != current {
                return Err((
                    Error::ConflictingId {
                        name: res.name.clone(),
                        existing: current,
                        incoming,
                    },
                    None,
                ));
            }
        }

        if res.overlayable.is_some() {
            if let Some(item) = &existing.overlayable_item {
                return Err((
                    Error::DuplicateOverlayable(res.name.clone()),
                    Some(item.source.clone()),
                ));
            }
        }

        let Some(value) = &res.value else {
            return Ok(None);
        };
        let Some(current) = existing.find_value_with_product(&res.config, &res.product) else {
            return Ok(None);
        };

        match resolve_value_collision(&current.value, value) {
            CollisionResult::Conflict => Err((
                Error::DuplicateValue {
                    name: res.name.clone(),
                    config: res.config.to_string(),
                },
                Some(current.value.meta().source.clone()),
            )),
            result => Ok(Some(result)),
        }
    }
}

fn report(diagnostics: &Diagnostics, source: &Source, error: &Error) {
    let mut diagnostic = Diagnostic::new(
        DiagnosticSeverity::Error,
        DiagnosticCategory::Table,
        error.to_string(),
    );
    if !source.path.is_empty() {
        diagnostic = diagnostic.with_source(source.clone());
    }
    diagnostics.push(diagnostic);
}

fn write_value(f: &mut fmt::Formatter<'_>, config_value: &ResourceConfigValue) -> fmt::Result {
    write!(f, "      ({})", config_value.config)?;
    if !config_value.product.is_empty() {
        write!(f, " [product={}]", config_value.product)?;
    }
    writeln!(f, " {}", config_value.value)
}

/// Writes a dump similar to `aapt2 dump resources`.
impl fmt::Display for ResourceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for package in &self.packages {
            writeln!(f, "Package name={}", package.name)?;
            for type_ in &package.types {
                write!(f, "  type {}", type_.type_)?;
                if type_.visibility_level == VisibilityLevel::Public {
                    write!(f, " PUBLIC")?;
                }
                writeln!(f)?;

                for entry in &type_.entries {
                    f.write_str("    resource ")?;
                    if let Some(id) = entry.id {
                        write!(f, "{id} ")?;
                    }
                    write!(f, "{}/{}", type_.type_, entry.name)?;
                    match entry.visibility.level {
                        VisibilityLevel::Public => f.write_str(" PUBLIC")?,
                        VisibilityLevel::Private => f.write_str(" _PRIVATE_")?,
                        VisibilityLevel::Undefined => {}
                    }
                    if let Some(item) = &entry.overlayable_item {
                        write!(f, " OVERLAYABLE={}", item.overlayable.name)?;
                    }
                    writeln!(f)?;

                    for config_value in &entry.values {
                        write_value(f, config_value)?;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::ConfigDescription,
        values::{Attribute, AttributeTypeMask, BinaryPrimitive, Id, StringValue},
    };

    fn name(s: &str) -> ResourceName {
        ResourceName::parse(s).unwrap()
    }

    fn int(value: u32) -> BinaryPrimitive {
        BinaryPrimitive::new(BinaryPrimitive::TYPE_INT_DEC, value)
    }

    #[test]
    fn test_collections_stay_sorted() {
        let diag = Diagnostics::new();
        let mut table = ResourceTable::new();
        for n in ["b:string/z", "a:string/b", "a:id/y", "a:string/a"] {
            table
                .add_resource(
                    NewResourceBuilder::new(name(n))
                        .set_value(Id::new(), ConfigDescription::default())
                        .build(),
                    &diag,
                )
                .unwrap();
        }

        let packages: Vec<&str> = table.packages().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(packages, ["a", "b"]);

        let a = table.find_package("a").unwrap();
        let types: Vec<ResourceType> = a.types().iter().map(|t| t.type_).collect();
        assert_eq!(types, [ResourceType::Id, ResourceType::String]);

        let strings = a.find_type(ResourceType::String).unwrap();
        let entries: Vec<&str> = strings.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(entries, ["a", "b"]);
    }

    #[test]
    fn test_two_configs_coexist() {
        let diag = Diagnostics::new();
        let mut table = ResourceTable::new();
        let land = ConfigDescription::parse("land").unwrap();

        for (config, value) in [(ConfigDescription::default(), 1), (land, 2)] {
            table
                .add_resource(
                    NewResourceBuilder::new(name("app:integer/count"))
                        .set_value(int(value), config)
                        .build(),
                    &diag,
                )
                .unwrap();
        }

        let entry = table.find_resource(&name("app:integer/count")).unwrap().entry;
        assert_eq!(entry.values().len(), 2);
        assert_eq!(
            entry.find_value(&land).unwrap().value.cast::<BinaryPrimitive>(),
            Some(&int(2))
        );
        assert!(!diag.has_any());
    }

    #[test]
    fn test_duplicate_value_is_an_error() {
        let diag = Diagnostics::new();
        let mut table = ResourceTable::new();
        let add = |table: &mut ResourceTable, v: u32| {
            table.add_resource(
                NewResourceBuilder::new(name("app:integer/count"))
                    .set_value(int(v), ConfigDescription::default())
                    .build(),
                &diag,
            )
        };

        add(&mut table, 1).unwrap();
        let err = add(&mut table, 2).unwrap_err();
        assert!(matches!(err, Error::DuplicateValue { .. }));
        assert!(diag.has_errors());

        let entry = table.find_resource(&name("app:integer/count")).unwrap().entry;
        assert_eq!(entry.values()[0].value.cast::<BinaryPrimitive>(), Some(&int(1)));
    }

    #[test]
    fn test_strong_value_replaces_weak() {
        let diag = Diagnostics::new();
        let mut table = ResourceTable::new();
        let mut weak = Attribute::new(AttributeTypeMask::ANY);
        weak.meta.weak = true;

        table
            .add_resource(
                NewResourceBuilder::new(name("app:attr/foo"))
                    .set_value(weak, ConfigDescription::default())
                    .build(),
                &diag,
            )
            .unwrap();
        table
            .add_resource(
                NewResourceBuilder::new(name("app:attr/foo"))
                    .set_value(
                        Attribute::new(AttributeTypeMask::COLOR),
                        ConfigDescription::default(),
                    )
                    .build(),
                &diag,
            )
            .unwrap();

        let entry = table.find_resource(&name("app:attr/foo")).unwrap().entry;
        let attr = entry.values()[0].value.cast::<Attribute>().unwrap();
        assert_eq!(attr.type_mask, AttributeTypeMask::COLOR);
    }

    #[test]
    fn test_entry_name_validation() {
        let diag = Diagnostics::new();
        let mut table = ResourceTable::new();
        let res = |allow_mangled| {
            NewResourceBuilder::new(name("app:id/lib$thing"))
                .set_value(Id::new(), ConfigDescription::default())
                .set_allow_mangled(allow_mangled)
                .build()
        };

        assert!(matches!(
            table.add_resource(res(false), &diag),
            Err(Error::InvalidResourceName(_))
        ));
        assert!(table.find_resource(&name("app:id/lib$thing")).is_none());
        table.add_resource(res(true), &diag).unwrap();

        let mut lenient = ResourceTable::with_validation(Validation::Disabled);
        lenient.add_resource(res(false), &diag).unwrap();
    }

    #[test]
    fn test_id_checks() {
        let diag = Diagnostics::new();
        let mut table = ResourceTable::new();
        let with_id = |n: &str, id: u32| {
            NewResourceBuilder::new(name(n))
                .set_value(Id::new(), ConfigDescription::default())
                .set_id(ResourceId(id))
                .build()
        };

        assert!(matches!(
            table.add_resource(with_id("app:id/a", 0x0000_0001), &diag),
            Err(Error::InvalidResourceId(_))
        ));

        table.add_resource(with_id("app:id/a", 0x7f01_0000), &diag).unwrap();
        table.add_resource(with_id("app:id/a", 0x7f01_0000), &diag).unwrap();

        assert!(matches!(
            table.add_resource(with_id("app:id/b", 0x7f01_0000), &diag),
            Err(Error::IdInUse { .. })
        ));
        assert!(matches!(
            table.add_resource(with_id("app:id/a", 0x7f01_0001), &diag),
            Err(Error::ConflictingId { .. })
        ));

        let found = table.find_resource_by_id(ResourceId(0x7f01_0000)).unwrap();
        assert_eq!(found.entry.name, "a");
        assert_eq!(found.package.name, "app");
    }

    #[test]
    fn test_visibility_only_increases() {
        let diag = Diagnostics::new();
        let mut table = ResourceTable::new();
        let declare = |level| {
            NewResourceBuilder::new(name("app:string/foo"))
                .set_visibility(Visibility::new(level))
                .build()
        };

        table.add_resource(declare(VisibilityLevel::Public), &diag).unwrap();
        table.add_resource(declare(VisibilityLevel::Private), &diag).unwrap();

        let found = table.find_resource(&name("app:string/foo")).unwrap();
        assert_eq!(found.entry.visibility.level, VisibilityLevel::Public);
        assert_eq!(found.type_.visibility_level, VisibilityLevel::Public);
        assert!(found.entry.values().is_empty());
    }

    #[test]
    fn test_second_overlayable_is_rejected() {
        let diag = Diagnostics::new();
        let mut table = ResourceTable::new();
        let group = Arc::new(Overlayable::new("Theme", "overlay://theme"));
        let declare = || {
            NewResourceBuilder::new(name("app:color/accent"))
                .set_overlayable(OverlayableItem::new(Arc::clone(&group)))
                .build()
        };

        table.add_resource(declare(), &diag).unwrap();
        assert!(matches!(
            table.add_resource(declare(), &diag),
            Err(Error::DuplicateOverlayable(_))
        ));
    }

    #[test]
    fn test_dump() {
        let diag = Diagnostics::new();
        let mut table = ResourceTable::new();
        let hello = StringValue::new(table.string_pool.make_ref("Hello"));
        table
            .add_resource(
                NewResourceBuilder::new(name("app:string/greeting"))
                    .set_value(hello, ConfigDescription::default())
                    .set_id(ResourceId(0x7f02_0000))
                    .set_visibility(Visibility::new(VisibilityLevel::Public))
                    .build(),
                &diag,
            )
            .unwrap();

        assert_eq!(
            table.to_string(),
            "Package name=app\n  type string PUBLIC\n    resource 0x7f020000 string/greeting PUBLIC\n      () \"Hello\"\n"
        );
    }
}

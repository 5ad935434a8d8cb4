//! Fail-fast builders for resource tables, values and split artifacts.
//!
//! [`ResourceTableBuilder`] funnels every `add_*` call through one insertion path and panics
//! when a name does not parse or the table rejects an entry. The value builders
//! ([`AttributeBuilder`], [`StyleBuilder`], [`StyleableBuilder`]) keep their items in call
//! order, and the artifact builders assemble [`OutputArtifact`]s and
//! [`PostProcessingConfiguration`]s for split tests.

use std::sync::Arc;

use crate::{
    config::ConfigDescription,
    configuration::{
        get_or_create_group, Abi, AndroidSdk, ConfiguredArtifact, Group, OutputArtifact,
        PostProcessingConfiguration,
    },
    diagnostics::Diagnostics,
    io::InputFile,
    resource::{ResourceId, ResourceName, ResourceType, Source},
    strings::StringPool,
    table::{
        AllowNew, NewResource, NewResourceBuilder, OverlayableItem, ResourceTable, Visibility,
        VisibilityLevel,
    },
    testing::{parse_config_or_die, parse_name_or_die},
    values::{
        Attribute, AttributeSymbol, AttributeTypeMask, BinaryPrimitive, FileReference, Id, Item,
        Reference, ResourceValue, Style, StyleEntry, Styleable, StringValue, Value,
    },
};

/// Builds a [`ResourceTable`] one resource at a time.
///
/// Every `add_*` method parses its name, builds the value and inserts it through
/// [`ResourceTableBuilder::add_value_with_config`]. Mangled entry names are accepted. An id
/// of `ResourceId(0)` means "no id". A malformed name or a rejected insertion panics.
///
/// # Examples
///
/// ```rust
/// use restable::resource::ResourceId;
/// use restable::testing::ResourceTableBuilder;
///
/// let table = ResourceTableBuilder::new()
///     .add_simple_with_id("app:id/button", ResourceId(0x7f01_0000))
///     .add_string("app:string/app_name", "Hello")
///     .add_reference("app:string/title", "app:string/app_name")
///     .build();
///
/// assert_eq!(table.find_package("app").unwrap().types().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct ResourceTableBuilder {
    table: ResourceTable,
    diagnostics: Diagnostics,
}

impl ResourceTableBuilder {
    /// Starts with an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an [`Id`] for the default configuration.
    #[must_use]
    pub fn add_simple(self, name: &str) -> Self {
        self.add_simple_with_id(name, ResourceId::default())
    }

    /// Adds an [`Id`] with an identifier.
    #[must_use]
    pub fn add_simple_with_id(self, name: &str, id: ResourceId) -> Self {
        self.add_value_with_id(name, id, Id::new())
    }

    /// Adds an [`Id`] for `config`.
    #[must_use]
    pub fn add_simple_with_config(
        self,
        name: &str,
        config: &ConfigDescription,
        id: ResourceId,
    ) -> Self {
        self.add_value_with_config(name, config, id, Id::new())
    }

    /// Adds a reference to `reference`.
    #[must_use]
    pub fn add_reference(self, name: &str, reference: &str) -> Self {
        self.add_reference_with_id(name, ResourceId::default(), reference)
    }

    /// Adds a reference to `reference` with an identifier.
    #[must_use]
    pub fn add_reference_with_id(self, name: &str, id: ResourceId, reference: &str) -> Self {
        self.add_value_with_id(name, id, reference_or_die(reference))
    }

    /// Adds a pooled string.
    #[must_use]
    pub fn add_string(self, name: &str, s: &str) -> Self {
        self.add_string_with_id(name, ResourceId::default(), s)
    }

    /// Adds a pooled string with an identifier.
    #[must_use]
    pub fn add_string_with_id(mut self, name: &str, id: ResourceId, s: &str) -> Self {
        let value = StringValue::new(self.table.string_pool.make_ref(s));
        self.add_value_with_id(name, id, value)
    }

    /// Adds a pooled string with an identifier for `config`.
    #[must_use]
    pub fn add_string_with_config(
        mut self,
        name: &str,
        id: ResourceId,
        config: &ConfigDescription,
        s: &str,
    ) -> Self {
        let value = StringValue::new(self.table.string_pool.make_ref(s));
        self.add_value_with_config(name, config, id, value)
    }

    /// Adds a reference to the file at `path`, optionally backed by `file`.
    #[must_use]
    pub fn add_file_reference(
        self,
        name: &str,
        path: &str,
        file: Option<Arc<dyn InputFile>>,
    ) -> Self {
        self.add_file_reference_with_id(name, ResourceId::default(), path, file)
    }

    /// Adds a file reference with an identifier.
    #[must_use]
    pub fn add_file_reference_with_id(
        mut self,
        name: &str,
        id: ResourceId,
        path: &str,
        file: Option<Arc<dyn InputFile>>,
    ) -> Self {
        let value = self.file_reference(path, file);
        self.add_value_with_id(name, id, value)
    }

    /// Adds a file reference for `config`.
    #[must_use]
    pub fn add_file_reference_with_config(
        mut self,
        name: &str,
        path: &str,
        config: &ConfigDescription,
        file: Option<Arc<dyn InputFile>>,
    ) -> Self {
        let value = self.file_reference(path, file);
        self.add_value_with_config(name, config, ResourceId::default(), value)
    }

    fn file_reference(&mut self, path: &str, file: Option<Arc<dyn InputFile>>) -> FileReference {
        let value = FileReference::new(self.table.string_pool.make_ref(path));
        match file {
            Some(file) => value.with_file(file),
            None => value,
        }
    }

    /// Adds any value for the default configuration.
    #[must_use]
    pub fn add_value(self, name: &str, value: impl Into<Value>) -> Self {
        self.add_value_with_id(name, ResourceId::default(), value)
    }

    /// Adds any value with an identifier.
    #[must_use]
    pub fn add_value_with_id(self, name: &str, id: ResourceId, value: impl Into<Value>) -> Self {
        self.add_value_with_config(name, &ConfigDescription::default(), id, value)
    }

    /// Adds any value with an identifier for `config`. Every other `add_*` method ends here.
    ///
    /// # Panics
    ///
    /// Panics if `name` does not parse or the table rejects the value.
    #[must_use]
    pub fn add_value_with_config(
        self,
        name: &str,
        config: &ConfigDescription,
        id: ResourceId,
        value: impl Into<Value>,
    ) -> Self {
        let mut builder = NewResourceBuilder::new(parse_name_or_die(name))
            .set_value(value, *config)
            .set_allow_mangled(true);
        if id.0 != 0 {
            builder = builder.set_id(id);
        }
        self.add(builder.build())
    }

    /// Declares the visibility of `name`, with overlay permission when `allow_new` is set.
    ///
    /// An entry declared with `allow_new == false` carries no [`AllowNew`] at all, so a
    /// private declaration does not also open the entry to overlays.
    ///
    /// # Panics
    ///
    /// Panics if `name` does not parse or the table rejects the declaration.
    #[must_use]
    pub fn set_symbol_state(
        self,
        name: &str,
        id: ResourceId,
        level: VisibilityLevel,
        allow_new: bool,
    ) -> Self {
        let mut builder = NewResourceBuilder::new(parse_name_or_die(name))
            .set_visibility(Visibility::new(level))
            .set_allow_mangled(true);
        if allow_new {
            builder = builder.set_allow_new(AllowNew::default());
        }
        if id.0 != 0 {
            builder = builder.set_id(id);
        }
        self.add(builder.build())
    }

    /// Makes `name` part of an overlayable group.
    ///
    /// # Panics
    ///
    /// Panics if `name` does not parse or the entry is already overlayable.
    #[must_use]
    pub fn set_overlayable(self, name: &str, overlayable: OverlayableItem) -> Self {
        let res = NewResourceBuilder::new(parse_name_or_die(name))
            .set_overlayable(overlayable)
            .set_allow_mangled(true)
            .build();
        self.add(res)
    }

    /// Inserts a prepared resource.
    ///
    /// # Panics
    ///
    /// Panics if the table rejects the resource.
    #[must_use]
    pub fn add(mut self, res: NewResource) -> Self {
        let name = res.name.clone();
        if let Err(e) = self.table.add_resource(res, &self.diagnostics) {
            panic!("failed to add resource '{name}': {e}");
        }
        self
    }

    /// The string pool of the table under construction.
    pub fn string_pool(&mut self) -> &mut StringPool {
        &mut self.table.string_pool
    }

    /// Returns the finished table.
    pub fn build(self) -> ResourceTable {
        self.table
    }
}

/// A reference to `name`, optionally with a resolved identifier.
///
/// # Panics
///
/// Panics if `name` does not parse.
pub fn build_reference(name: &str, id: Option<ResourceId>) -> Reference {
    let mut reference = reference_or_die(name);
    reference.id = id;
    reference
}

/// A reference to `name`, keeping the `*` private marker.
fn reference_or_die(name: &str) -> Reference {
    match ResourceName::parse_with_private(name) {
        Ok(parsed) => Reference {
            private_reference: parsed.private_reference,
            ..Reference::from_name(parsed.name)
        },
        Err(_) => panic!("invalid resource name: {name}"),
    }
}

/// A raw typed value.
pub fn build_primitive(data_type: u8, data: u32) -> BinaryPrimitive {
    BinaryPrimitive::new(data_type, data)
}

/// Sets the source and comment of any value.
///
/// ```rust
/// use restable::resource::Source;
/// use restable::testing::ValueBuilder;
/// use restable::values::{Id, ResourceValue};
///
/// let id = ValueBuilder::new(Id::new())
///     .set_source(Source::new("res/values/ids.xml").with_line(4))
///     .set_comment("the main button")
///     .build();
/// assert_eq!(id.meta().source.line, Some(4));
/// assert_eq!(id.meta().comment, "the main button");
/// ```
#[derive(Debug, Clone)]
pub struct ValueBuilder<T> {
    value: T,
}

impl<T: ResourceValue> ValueBuilder<T> {
    /// Wraps `value`.
    pub fn new(value: T) -> Self {
        ValueBuilder { value }
    }

    /// Sets where the value was declared.
    #[must_use]
    pub fn set_source(mut self, source: Source) -> Self {
        self.value.meta_mut().source = source;
        self
    }

    /// Sets the documentation comment.
    #[must_use]
    pub fn set_comment(mut self, comment: &str) -> Self {
        self.value.meta_mut().comment = comment.to_string();
        self
    }

    /// Returns the value.
    pub fn build(self) -> T {
        self.value
    }
}

/// Builds an [`Attribute`]. The type mask starts as [`AttributeTypeMask::ANY`].
#[derive(Debug, Clone)]
pub struct AttributeBuilder {
    attr: Attribute,
}

impl Default for AttributeBuilder {
    fn default() -> Self {
        AttributeBuilder {
            attr: Attribute::new(AttributeTypeMask::ANY),
        }
    }
}

impl AttributeBuilder {
    /// Starts an attribute accepting any format.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the accepted formats.
    #[must_use]
    pub fn set_type_mask(mut self, type_mask: AttributeTypeMask) -> Self {
        self.attr.type_mask = type_mask;
        self
    }

    /// Marks the attribute weak.
    #[must_use]
    pub fn set_weak(mut self, weak: bool) -> Self {
        self.attr.meta.weak = weak;
        self
    }

    /// Sets the documentation comment.
    #[must_use]
    pub fn set_comment(mut self, comment: &str) -> Self {
        self.attr.meta.comment = comment.to_string();
        self
    }

    /// Appends an enum or flag symbol `id/name` with `value`.
    #[must_use]
    pub fn add_item(mut self, name: &str, value: u32) -> Self {
        self.attr.symbols.push(AttributeSymbol::new(symbol_reference(name), value));
        self
    }

    /// Appends a symbol carrying its own comment.
    #[must_use]
    pub fn add_item_with_comment(mut self, name: &str, value: u32, comment: &str) -> Self {
        let mut symbol = symbol_reference(name);
        symbol.meta.comment = comment.to_string();
        self.attr.symbols.push(AttributeSymbol::new(symbol, value));
        self
    }

    /// Returns the attribute.
    pub fn build(self) -> Attribute {
        self.attr
    }
}

fn symbol_reference(name: &str) -> Reference {
    Reference::from_name(ResourceName::new("", ResourceType::Id, name))
}

/// Builds a [`Style`]. Entries keep call order.
#[derive(Debug, Clone, Default)]
pub struct StyleBuilder {
    style: Style,
}

impl StyleBuilder {
    /// Starts a style without parent or entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the parent style.
    #[must_use]
    pub fn set_parent(mut self, name: &str) -> Self {
        self.style.parent = Some(Reference::from_name(parse_name_or_die(name)));
        self
    }

    /// Appends `name = value`.
    #[must_use]
    pub fn add_item(mut self, name: &str, value: impl Into<Item>) -> Self {
        self.style.entries.push(StyleEntry {
            key: Reference::from_name(parse_name_or_die(name)),
            value: value.into(),
        });
        self
    }

    /// Appends `name = value` with the attribute identifier already resolved.
    #[must_use]
    pub fn add_item_with_id(self, name: &str, id: ResourceId, value: impl Into<Item>) -> Self {
        let mut builder = self.add_item(name, value);
        if let Some(entry) = builder.style.entries.last_mut() {
            entry.key.id = Some(id);
        }
        builder
    }

    /// Returns the style.
    pub fn build(self) -> Style {
        self.style
    }
}

/// Builds a [`Styleable`]. Entries keep call order.
#[derive(Debug, Clone, Default)]
pub struct StyleableBuilder {
    styleable: Styleable,
}

impl StyleableBuilder {
    /// Starts an empty styleable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the attribute `name`, optionally with its identifier.
    #[must_use]
    pub fn add_item(mut self, name: &str, id: Option<ResourceId>) -> Self {
        let mut reference = Reference::from_name(parse_name_or_die(name));
        reference.id = id;
        self.styleable.entries.push(reference);
        self
    }

    /// Returns the styleable.
    pub fn build(self) -> Styleable {
        self.styleable
    }
}

/// Builds an [`OutputArtifact`] directly, without group resolution.
#[derive(Debug, Clone, Default)]
pub struct ArtifactBuilder {
    artifact: OutputArtifact,
}

impl ArtifactBuilder {
    /// Starts an unnamed artifact with version 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the file name.
    #[must_use]
    pub fn set_name(mut self, name: &str) -> Self {
        self.artifact.name = name.to_string();
        self
    }

    /// Sets the version.
    #[must_use]
    pub fn set_version(mut self, version: i32) -> Self {
        self.artifact.version = version;
        self
    }

    /// Appends an ABI.
    #[must_use]
    pub fn add_abi(mut self, abi: Abi) -> Self {
        self.artifact.abis.push(abi);
        self
    }

    /// Appends a screen density.
    #[must_use]
    pub fn add_density(mut self, density: ConfigDescription) -> Self {
        self.artifact.screen_densities.push(density);
        self
    }

    /// Appends a locale.
    #[must_use]
    pub fn add_locale(mut self, locale: ConfigDescription) -> Self {
        self.artifact.locales.push(locale);
        self
    }

    /// Sets the minimum SDK.
    #[must_use]
    pub fn set_android_sdk(mut self, min_sdk: i32) -> Self {
        self.artifact.android_sdk = Some(AndroidSdk::for_min_sdk(min_sdk));
        self
    }

    /// Returns the artifact.
    pub fn build(self) -> OutputArtifact {
        self.artifact
    }
}

/// Builds a [`PostProcessingConfiguration`].
///
/// The group methods get or create the labeled group and put the new values in front of the
/// ones already there.
///
/// ```rust
/// use restable::configuration::Abi;
/// use restable::testing::PostProcessingConfigurationBuilder;
///
/// let config = PostProcessingConfigurationBuilder::new()
///     .add_abi_group("arm", vec![Abi::ArmeabiV7a])
///     .add_abi_group("arm", vec![Abi::Arm64V8a])
///     .add_density_group("large", &["xhdpi", "xxhdpi"])
///     .build();
///
/// assert_eq!(config.abi_groups["arm"], [Abi::Arm64V8a, Abi::ArmeabiV7a]);
/// assert_eq!(config.screen_density_groups["large"].len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PostProcessingConfigurationBuilder {
    config: PostProcessingConfiguration,
}

fn add_group<T>(label: &str, group: &mut Group<T>, to_add: Vec<T>) {
    get_or_create_group(label, group).splice(0..0, to_add);
}

impl PostProcessingConfigurationBuilder {
    /// Starts an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds ABIs to the group `label`.
    #[must_use]
    pub fn add_abi_group(mut self, label: &str, abis: Vec<Abi>) -> Self {
        add_group(label, &mut self.config.abi_groups, abis);
        self
    }

    /// Adds densities, given as qualifier strings, to the group `label`.
    ///
    /// # Panics
    ///
    /// Panics if a density does not parse.
    #[must_use]
    pub fn add_density_group(mut self, label: &str, densities: &[&str]) -> Self {
        let configs = densities.iter().map(|d| parse_config_or_die(d)).collect();
        add_group(label, &mut self.config.screen_density_groups, configs);
        self
    }

    /// Adds locales, given as qualifier strings, to the group `label`.
    ///
    /// # Panics
    ///
    /// Panics if a locale does not parse.
    #[must_use]
    pub fn add_locale_group(mut self, label: &str, locales: &[&str]) -> Self {
        let configs = locales.iter().map(|l| parse_config_or_die(l)).collect();
        add_group(label, &mut self.config.locale_groups, configs);
        self
    }

    /// Creates the device feature group `label`.
    #[must_use]
    pub fn add_device_feature_group(mut self, label: &str) -> Self {
        add_group(label, &mut self.config.device_feature_groups, Vec::new());
        self
    }

    /// Creates the GL texture group `label`.
    #[must_use]
    pub fn add_gl_texture_group(mut self, label: &str) -> Self {
        add_group(label, &mut self.config.gl_texture_groups, Vec::new());
        self
    }

    /// Declares SDK bounds with only a minimum under `label`.
    #[must_use]
    pub fn add_android_sdk(mut self, label: &str, min_sdk: i32) -> Self {
        self.config
            .android_sdks
            .insert(label.to_string(), AndroidSdk::for_min_sdk(min_sdk));
        self
    }

    /// Appends an artifact.
    #[must_use]
    pub fn add_artifact(mut self, artifact: ConfiguredArtifact) -> Self {
        self.config.artifacts.push(artifact);
        self
    }

    /// Sets the name format for artifacts without a name.
    #[must_use]
    pub fn set_artifact_format(mut self, format: &str) -> Self {
        self.config.artifact_format = Some(format.to_string());
        self
    }

    /// Returns the configuration.
    pub fn build(self) -> PostProcessingConfiguration {
        self.config
    }
}

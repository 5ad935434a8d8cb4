//! Per-entry metadata and configuration values.

use std::sync::Arc;

use bitflags::bitflags;

use crate::{
    config::ConfigDescription,
    resource::{ResourceId, Source},
    values::Value,
};

/// How visible an entry is outside its package. Levels only ever increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum VisibilityLevel {
    /// Never declared
    #[default]
    Undefined,
    /// Declared private to the package
    Private,
    /// Part of the package's public API
    Public,
}

/// A visibility declaration with where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Visibility {
    /// Declared level
    pub level: VisibilityLevel,
    /// Where it was declared
    pub source: Source,
    /// Comment attached to the declaration
    pub comment: String,
    /// Declared as a staged API that has not been finalized
    pub staged_api: bool,
}

impl Visibility {
    /// A visibility of `level` with no source or comment.
    pub fn new(level: VisibilityLevel) -> Self {
        Visibility {
            level,
            ..Self::default()
        }
    }
}

/// Marks an entry as allowed to be introduced by an overlay.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllowNew {
    /// Where it was declared
    pub source: Source,
    /// Comment attached to the declaration
    pub comment: String,
}

/// A named group of resources that runtime overlays may replace.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Overlayable {
    /// Name of the group
    pub name: String,
    /// Actor allowed to overlay the group, e.g. `overlay://theme`
    pub actor: String,
    /// Where the group was declared
    pub source: Source,
}

impl Overlayable {
    /// A group with a name and actor.
    pub fn new(name: impl Into<String>, actor: impl Into<String>) -> Self {
        Overlayable {
            name: name.into(),
            actor: actor.into(),
            source: Source::default(),
        }
    }
}

bitflags! {
    /// Which overlays may replace an overlayable resource.
    #[derive(PartialEq, Eq, Debug, Clone, Copy, Hash, Default)]
    pub struct PolicyFlags : u32 {
        /// Any overlay
        const PUBLIC = 0x0000_0001;
        /// Overlays on the system partition
        const SYSTEM_PARTITION = 0x0000_0002;
        /// Overlays on the vendor partition
        const VENDOR_PARTITION = 0x0000_0004;
        /// Overlays on the product partition
        const PRODUCT_PARTITION = 0x0000_0008;
        /// Overlays signed with the same key as the target
        const SIGNATURE = 0x0000_0010;
        /// Overlays on the odm partition
        const ODM_PARTITION = 0x0000_0020;
        /// Overlays on the oem partition
        const OEM_PARTITION = 0x0000_0040;
        /// Overlays signed with the actor's key
        const ACTOR_SIGNATURE = 0x0000_0080;
        /// Overlays signed with the configurator's key
        const CONFIG_SIGNATURE = 0x0000_0100;
    }
}

/// Membership of an entry in an [`Overlayable`] group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayableItem {
    /// The group, shared by every member
    pub overlayable: Arc<Overlayable>,
    /// Policies that apply to this entry
    pub policies: PolicyFlags,
    /// Comment attached to the declaration
    pub comment: String,
    /// Where the membership was declared
    pub source: Source,
}

impl OverlayableItem {
    /// Membership in `overlayable` with no policies.
    pub fn new(overlayable: Arc<Overlayable>) -> Self {
        OverlayableItem {
            overlayable,
            policies: PolicyFlags::empty(),
            comment: String::new(),
            source: Source::default(),
        }
    }
}

/// The value an entry takes for one configuration and product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceConfigValue {
    /// Configuration the value applies to
    pub config: ConfigDescription,
    /// Product the value applies to, empty for all products
    pub product: String,
    /// The value
    pub value: Value,
}

/// A named resource with its metadata and configuration values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    /// Entry name, the last component of `package:type/entry`
    pub name: String,
    /// Assigned identifier
    pub id: Option<ResourceId>,
    /// Visibility declaration
    pub visibility: Visibility,
    /// Overlay introduction permission
    pub allow_new: Option<AllowNew>,
    /// Overlayable group membership
    pub overlayable_item: Option<OverlayableItem>,
    pub(crate) values: Vec<ResourceConfigValue>,
}

impl ResourceEntry {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        ResourceEntry {
            name: name.into(),
            id: None,
            visibility: Visibility::default(),
            allow_new: None,
            overlayable_item: None,
            values: Vec::new(),
        }
    }

    /// Values sorted by configuration, then product.
    pub fn values(&self) -> &[ResourceConfigValue] {
        &self.values
    }

    /// The value for `config` and the default product.
    pub fn find_value(&self, config: &ConfigDescription) -> Option<&ResourceConfigValue> {
        self.find_value_with_product(config, "")
    }

    /// The value for `config` and `product`.
    pub fn find_value_with_product(
        &self,
        config: &ConfigDescription,
        product: &str,
    ) -> Option<&ResourceConfigValue> {
        self.position(config, product)
            .ok()
            .map(|index| &self.values[index])
    }

    /// Every value whose configuration equals `config`, across products.
    pub fn find_all_values(&self, config: &ConfigDescription) -> Vec<&ResourceConfigValue> {
        self.values.iter().filter(|v| v.config == *config).collect()
    }

    pub(crate) fn position(
        &self,
        config: &ConfigDescription,
        product: &str,
    ) -> std::result::Result<usize, usize> {
        self.values
            .binary_search_by(|v| (&v.config, v.product.as_str()).cmp(&(config, product)))
    }
}

//! The unit of insertion into a [`ResourceTable`](crate::table::ResourceTable).

use crate::{
    config::ConfigDescription,
    resource::{ResourceId, ResourceName},
    table::{AllowNew, OverlayableItem, Visibility},
    values::Value,
};

/// Everything that can be added to a table for one resource name in a single call.
///
/// Built with [`NewResourceBuilder`] and consumed by
/// [`ResourceTable::add_resource`](crate::table::ResourceTable::add_resource).
#[derive(Debug, Clone)]
pub struct NewResource {
    /// Name of the resource
    pub name: ResourceName,
    /// Value to add, if any
    pub value: Option<Value>,
    /// Configuration of the value
    pub config: ConfigDescription,
    /// Product of the value
    pub product: String,
    /// Identifier to assign
    pub id: Option<ResourceId>,
    /// Visibility to declare
    pub visibility: Option<Visibility>,
    /// Overlay permission to declare
    pub allow_new: Option<AllowNew>,
    /// Overlayable membership to declare
    pub overlayable: Option<OverlayableItem>,
    /// Accept `package$entry` mangled entry names
    pub allow_mangled: bool,
}

/// Fluent builder for [`NewResource`].
///
/// # Examples
///
/// ```rust
/// use restable::config::ConfigDescription;
/// use restable::resource::{ResourceId, ResourceName};
/// use restable::table::NewResourceBuilder;
/// use restable::values::Id;
///
/// let res = NewResourceBuilder::new(ResourceName::parse("app:id/button")?)
///     .set_value(Id::new(), ConfigDescription::default())
///     .set_id(ResourceId(0x7f01_0000))
///     .build();
/// assert_eq!(res.id, Some(ResourceId(0x7f01_0000)));
/// # Ok::<(), restable::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct NewResourceBuilder {
    res: NewResource,
}

impl NewResourceBuilder {
    /// Starts a resource for `name` with nothing to add.
    pub fn new(name: ResourceName) -> Self {
        NewResourceBuilder {
            res: NewResource {
                name,
                value: None,
                config: ConfigDescription::default(),
                product: String::new(),
                id: None,
                visibility: None,
                allow_new: None,
                overlayable: None,
                allow_mangled: false,
            },
        }
    }

    /// Sets the value and its configuration.
    #[must_use]
    pub fn set_value(mut self, value: impl Into<Value>, config: ConfigDescription) -> Self {
        self.res.value = Some(value.into());
        self.res.config = config;
        self
    }

    /// Sets the product of the value.
    #[must_use]
    pub fn set_product(mut self, product: impl Into<String>) -> Self {
        self.res.product = product.into();
        self
    }

    /// Sets the identifier.
    #[must_use]
    pub fn set_id(mut self, id: ResourceId) -> Self {
        self.res.id = Some(id);
        self
    }

    /// Sets the visibility.
    #[must_use]
    pub fn set_visibility(mut self, visibility: Visibility) -> Self {
        self.res.visibility = Some(visibility);
        self
    }

    /// Sets the overlay permission.
    #[must_use]
    pub fn set_allow_new(mut self, allow_new: AllowNew) -> Self {
        self.res.allow_new = Some(allow_new);
        self
    }

    /// Sets the overlayable membership.
    #[must_use]
    pub fn set_overlayable(mut self, overlayable: OverlayableItem) -> Self {
        self.res.overlayable = Some(overlayable);
        self
    }

    /// Accepts mangled entry names.
    #[must_use]
    pub fn set_allow_mangled(mut self, allow_mangled: bool) -> Self {
        self.res.allow_mangled = allow_mangled;
        self
    }

    /// Returns the resource.
    pub fn build(self) -> NewResource {
        self.res
    }
}

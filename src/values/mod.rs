//! The resource value model.
//!
//! A resource entry holds one [`Value`] per configuration. Values split into [`Item`]s, which
//! are single scalars or references that can appear anywhere (including inside a style), and
//! compound values ([`Attribute`], [`Style`], [`Styleable`]) that only appear as top-level
//! entries.
//!
//! Every concrete value carries a [`ValueMeta`] with its source location, comment and the
//! weak and translatable flags. The [`ResourceValue`] trait gives uniform access to that
//! metadata across the concrete types and the two enums.
//!
//! # Key Components
//!
//! - [`Id`], [`Reference`], [`StringValue`], [`FileReference`], [`BinaryPrimitive`] - Items
//! - [`Attribute`], [`Style`], [`Styleable`] - Compound values
//! - [`Item`] / [`Value`] - The closed sets of items and values
//! - [`ValueCast`] - Typed downcasts from [`Value`] to a concrete type

mod attribute;
mod item;
mod style;

use std::fmt;

pub use attribute::{Attribute, AttributeSymbol, AttributeTypeMask};
pub use item::{BinaryPrimitive, FileReference, Id, Reference, ReferenceType, StringValue};
pub use style::{Style, StyleEntry, Styleable};

use crate::resource::Source;

/// Metadata shared by every value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueMeta {
    /// Where the value was declared
    pub source: Source,
    /// Documentation comment attached to the declaration
    pub comment: String,
    /// Weak values give way to any later strong definition
    pub weak: bool,
    /// Whether the value should be offered to translators
    pub translatable: bool,
}

impl Default for ValueMeta {
    fn default() -> Self {
        ValueMeta {
            source: Source::default(),
            comment: String::new(),
            weak: false,
            translatable: true,
        }
    }
}

/// Access to the metadata every value carries.
pub trait ResourceValue {
    /// The value's metadata.
    fn meta(&self) -> &ValueMeta;

    /// Mutable access to the value's metadata.
    fn meta_mut(&mut self) -> &mut ValueMeta;

    /// Whether a later strong definition replaces this value.
    fn is_weak(&self) -> bool {
        self.meta().weak
    }
}

macro_rules! impl_resource_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ResourceValue for $ty {
                fn meta(&self) -> &ValueMeta {
                    &self.meta
                }

                fn meta_mut(&mut self) -> &mut ValueMeta {
                    &mut self.meta
                }
            }
        )*
    };
}

impl_resource_value!(
    Id,
    Reference,
    StringValue,
    FileReference,
    BinaryPrimitive,
    Attribute,
    Style,
    Styleable,
);

/// A value that can appear on its own or inside a style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// Id marker
    Id(Id),
    /// Reference to another resource
    Reference(Reference),
    /// Pooled string
    String(StringValue),
    /// File-based resource
    FileReference(FileReference),
    /// Raw typed scalar
    Primitive(BinaryPrimitive),
}

/// Any resource value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A single item
    Item(Item),
    /// Attribute declaration
    Attribute(Attribute),
    /// Style
    Style(Style),
    /// Styleable
    Styleable(Styleable),
}

impl ResourceValue for Item {
    fn meta(&self) -> &ValueMeta {
        match self {
            Item::Id(v) => v.meta(),
            Item::Reference(v) => v.meta(),
            Item::String(v) => v.meta(),
            Item::FileReference(v) => v.meta(),
            Item::Primitive(v) => v.meta(),
        }
    }

    fn meta_mut(&mut self) -> &mut ValueMeta {
        match self {
            Item::Id(v) => v.meta_mut(),
            Item::Reference(v) => v.meta_mut(),
            Item::String(v) => v.meta_mut(),
            Item::FileReference(v) => v.meta_mut(),
            Item::Primitive(v) => v.meta_mut(),
        }
    }
}

impl ResourceValue for Value {
    fn meta(&self) -> &ValueMeta {
        match self {
            Value::Item(v) => v.meta(),
            Value::Attribute(v) => v.meta(),
            Value::Style(v) => v.meta(),
            Value::Styleable(v) => v.meta(),
        }
    }

    fn meta_mut(&mut self) -> &mut ValueMeta {
        match self {
            Value::Item(v) => v.meta_mut(),
            Value::Attribute(v) => v.meta_mut(),
            Value::Style(v) => v.meta_mut(),
            Value::Styleable(v) => v.meta_mut(),
        }
    }
}

impl Value {
    /// The item, if this value is one.
    pub fn as_item(&self) -> Option<&Item> {
        match self {
            Value::Item(item) => Some(item),
            _ => None,
        }
    }

    /// Downcasts to a concrete value type.
    pub fn cast<T: ValueCast>(&self) -> Option<&T> {
        T::from_value(self)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Id(v) => fmt::Display::fmt(v, f),
            Item::Reference(v) => fmt::Display::fmt(v, f),
            Item::String(v) => fmt::Display::fmt(v, f),
            Item::FileReference(v) => fmt::Display::fmt(v, f),
            Item::Primitive(v) => fmt::Display::fmt(v, f),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Item(v) => fmt::Display::fmt(v, f),
            Value::Attribute(v) => fmt::Display::fmt(v, f),
            Value::Style(v) => fmt::Display::fmt(v, f),
            Value::Styleable(v) => fmt::Display::fmt(v, f),
        }
    }
}

/// Typed view of a [`Value`] as one of the concrete value types.
///
/// # Examples
///
/// ```rust
/// use restable::values::{Id, Value};
///
/// let value = Value::from(Id::new());
/// assert!(value.cast::<Id>().is_some());
/// ```
pub trait ValueCast: Sized {
    /// Returns the concrete value if `value` holds one of this type.
    fn from_value(value: &Value) -> Option<&Self>;
}

macro_rules! item_variants {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Item {
                fn from(value: $ty) -> Self {
                    Item::$variant(value)
                }
            }

            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Item(Item::$variant(value))
                }
            }

            impl ValueCast for $ty {
                fn from_value(value: &Value) -> Option<&Self> {
                    match value {
                        Value::Item(Item::$variant(v)) => Some(v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

macro_rules! compound_variants {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }

            impl ValueCast for $ty {
                fn from_value(value: &Value) -> Option<&Self> {
                    match value {
                        Value::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

item_variants!(
    Id => Id,
    Reference => Reference,
    String => StringValue,
    FileReference => FileReference,
    Primitive => BinaryPrimitive,
);

compound_variants!(
    Attribute => Attribute,
    Style => Style,
    Styleable => Styleable,
);

impl From<Item> for Value {
    fn from(item: Item) -> Self {
        Value::Item(item)
    }
}

impl ValueCast for Item {
    fn from_value(value: &Value) -> Option<&Self> {
        value.as_item()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        resource::{ResourceName, ResourceType},
        strings::StringPool,
    };

    #[test]
    fn test_cast() {
        let mut pool = StringPool::new();
        let value = Value::from(StringValue::new(pool.make_ref("hi")));
        assert_eq!(&*value.cast::<StringValue>().unwrap().value, "hi");
        assert!(value.cast::<Reference>().is_none());
        assert!(value.cast::<Item>().is_some());
        assert!(value.cast::<Style>().is_none());
    }

    #[test]
    fn test_meta_through_enum() {
        let mut value = Value::from(Reference::from_name(ResourceName::new(
            "",
            ResourceType::String,
            "foo",
        )));
        value.meta_mut().comment = "hello".to_string();
        assert_eq!(value.cast::<Reference>().unwrap().meta.comment, "hello");
        assert!(!value.is_weak());
        assert!(value.meta().translatable);
    }

    #[test]
    fn test_style_display_keeps_order() {
        let key = |entry: &str| Reference::from_name(ResourceName::new("", ResourceType::Attr, entry));
        let style = Style {
            parent: Some(Reference::from_name(ResourceName::new(
                "android",
                ResourceType::Style,
                "Theme",
            ))),
            entries: vec![
                StyleEntry {
                    key: key("b"),
                    value: Item::from(BinaryPrimitive::new(BinaryPrimitive::TYPE_INT_DEC, 2)),
                },
                StyleEntry {
                    key: key("a"),
                    value: Item::from(BinaryPrimitive::new(BinaryPrimitive::TYPE_INT_DEC, 1)),
                },
            ],
            ..Style::default()
        };
        assert_eq!(
            style.to_string(),
            "(style) parent=@android:style/Theme [attr/b=2, attr/a=1]"
        );
    }
}

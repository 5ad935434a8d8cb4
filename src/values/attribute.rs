//! Attribute declarations: the accepted formats and their enum or flag symbols.

use std::fmt;

use bitflags::bitflags;

use crate::values::{BinaryPrimitive, Reference, ValueMeta};

bitflags! {
    /// The formats an attribute accepts.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AttributeTypeMask : u32 {
        /// `@type/name` references
        const REFERENCE = 0x0001;
        /// Strings
        const STRING = 0x0002;
        /// Integers
        const INTEGER = 0x0004;
        /// Booleans
        const BOOLEAN = 0x0008;
        /// Colors
        const COLOR = 0x0010;
        /// Floats
        const FLOAT = 0x0020;
        /// Dimensions
        const DIMENSION = 0x0040;
        /// Fractions
        const FRACTION = 0x0080;
        /// Any of the formats above
        const ANY = 0xffff;
        /// One of the declared enum symbols
        const ENUM = 0x0001_0000;
        /// A combination of the declared flag symbols
        const FLAGS = 0x0002_0000;
    }
}

/// A named enum or flag value declared by an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSymbol {
    /// Reference to the `id` resource naming the symbol
    pub symbol: Reference,
    /// Value of the symbol
    pub value: u32,
    /// Data type the value is stored as
    pub data_type: u8,
}

impl AttributeSymbol {
    /// A decimal integer symbol.
    pub fn new(symbol: Reference, value: u32) -> Self {
        AttributeSymbol {
            symbol,
            value,
            data_type: BinaryPrimitive::TYPE_INT_DEC,
        }
    }
}

/// An attribute declaration: accepted formats, integer bounds and enum/flag symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Common metadata
    pub meta: ValueMeta,
    /// Accepted formats
    pub type_mask: AttributeTypeMask,
    /// Smallest accepted integer
    pub min_int: i32,
    /// Largest accepted integer
    pub max_int: i32,
    /// Enum or flag symbols in declaration order
    pub symbols: Vec<AttributeSymbol>,
}

impl Attribute {
    /// An attribute accepting `type_mask` with unbounded integers and no symbols.
    pub fn new(type_mask: AttributeTypeMask) -> Self {
        Attribute {
            meta: ValueMeta::default(),
            type_mask,
            min_int: i32::MIN,
            max_int: i32::MAX,
            symbols: Vec::new(),
        }
    }

    /// Returns true if redeclaring this attribute as `other` is harmless.
    ///
    /// Enum and flag attributes are never compatible, since their symbols would have to be
    /// merged. Otherwise the masks must agree once references are allowed on both sides.
    pub fn is_compatible_with(&self, other: &Attribute) -> bool {
        let enum_or_flags = AttributeTypeMask::ENUM | AttributeTypeMask::FLAGS;
        if self.type_mask.intersects(enum_or_flags) || other.type_mask.intersects(enum_or_flags) {
            return false;
        }
        (self.type_mask | AttributeTypeMask::REFERENCE)
            == (other.type_mask | AttributeTypeMask::REFERENCE)
    }
}

impl Default for Attribute {
    fn default() -> Self {
        Self::new(AttributeTypeMask::ANY)
    }
}

const MASK_NAMES: &[(AttributeTypeMask, &str)] = &[
    (AttributeTypeMask::REFERENCE, "reference"),
    (AttributeTypeMask::STRING, "string"),
    (AttributeTypeMask::INTEGER, "integer"),
    (AttributeTypeMask::BOOLEAN, "boolean"),
    (AttributeTypeMask::COLOR, "color"),
    (AttributeTypeMask::FLOAT, "float"),
    (AttributeTypeMask::DIMENSION, "dimension"),
    (AttributeTypeMask::FRACTION, "fraction"),
    (AttributeTypeMask::ENUM, "enum"),
    (AttributeTypeMask::FLAGS, "flags"),
];

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(attr) type=")?;
        if self.type_mask.contains(AttributeTypeMask::ANY) {
            f.write_str("any")?;
        } else {
            let names: Vec<&str> = MASK_NAMES
                .iter()
                .filter(|(flag, _)| self.type_mask.contains(*flag))
                .map(|&(_, name)| name)
                .collect();
            f.write_str(&names.join("|"))?;
        }

        if self.min_int != i32::MIN {
            write!(f, " min={}", self.min_int)?;
        }
        if self.max_int != i32::MAX {
            write!(f, " max={}", self.max_int)?;
        }

        if !self.symbols.is_empty() {
            f.write_str(" [")?;
            for (i, symbol) in self.symbols.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                match &symbol.symbol.name {
                    Some(name) => write!(f, "{}", name.entry)?,
                    None => write!(f, "{}", symbol.symbol)?,
                }
                write!(f, "=0x{:08x}", symbol.value)?;
            }
            f.write_str("]")?;
        }

        if self.meta.weak {
            f.write_str(" [weak]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{ResourceName, ResourceType};

    #[test]
    fn test_compatibility() {
        let string = Attribute::new(AttributeTypeMask::STRING);
        let string_or_ref = Attribute::new(AttributeTypeMask::STRING | AttributeTypeMask::REFERENCE);
        let integer = Attribute::new(AttributeTypeMask::INTEGER);
        let enumeration = Attribute::new(AttributeTypeMask::ENUM);

        assert!(string.is_compatible_with(&string_or_ref));
        assert!(string_or_ref.is_compatible_with(&string));
        assert!(!string.is_compatible_with(&integer));
        assert!(!enumeration.is_compatible_with(&enumeration.clone()));
    }

    #[test]
    fn test_display() {
        let mut attr = Attribute::new(AttributeTypeMask::ENUM);
        attr.symbols.push(AttributeSymbol::new(
            Reference::from_name(ResourceName::new("", ResourceType::Id, "one")),
            1,
        ));
        attr.symbols.push(AttributeSymbol::new(
            Reference::from_name(ResourceName::new("", ResourceType::Id, "two")),
            2,
        ));
        assert_eq!(
            attr.to_string(),
            "(attr) type=enum [one=0x00000001, two=0x00000002]"
        );
        assert_eq!(Attribute::default().to_string(), "(attr) type=any");
    }
}

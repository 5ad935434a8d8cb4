use std::fmt;

use crate::values::{Item, Reference, ValueMeta};

/// One `<item name="...">value</item>` of a style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleEntry {
    /// The attribute being set
    pub key: Reference,
    /// Its value
    pub value: Item,
}

/// A style: an optional parent and an ordered list of attribute assignments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Style {
    /// Common metadata
    pub meta: ValueMeta,
    /// Explicit parent style
    pub parent: Option<Reference>,
    /// Whether the parent was inferred from a dotted name
    pub parent_inferred: bool,
    /// Attribute assignments in declaration order
    pub entries: Vec<StyleEntry>,
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(style)")?;
        if let Some(parent) = &self.parent {
            write!(f, " parent={parent}")?;
        }
        if !self.entries.is_empty() {
            f.write_str(" [")?;
            for (i, entry) in self.entries.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                match &entry.key.name {
                    Some(name) => write!(f, "{name}")?,
                    None => write!(f, "{}", entry.key)?,
                }
                write!(f, "={}", entry.value)?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}

/// A styleable: the ordered set of attributes a custom view declares.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Styleable {
    /// Common metadata
    pub meta: ValueMeta,
    /// Attribute references in declaration order
    pub entries: Vec<Reference>,
}

impl fmt::Display for Styleable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(styleable) [")?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match &entry.name {
                Some(name) => write!(f, "{name}")?,
                None => write!(f, "{entry}")?,
            }
        }
        f.write_str("]")
    }
}

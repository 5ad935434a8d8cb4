//! Collision rules for two values under the same name and configuration.

use crate::values::{AttributeTypeMask, ResourceValue, Value};

/// What to do when a value is added for a configuration that already has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionResult {
    /// Keep the existing value and drop the incoming one
    KeepOriginal,
    /// Replace the existing value
    TakeNew,
    /// Both values are definitive; the insertion fails
    Conflict,
}

/// Decides between an existing and an incoming value for the same configuration.
///
/// Weak values give way to strong ones. Two attributes may also be merged when one of them is
/// a weak declaration that accepts any format, or when their formats are compatible.
pub fn resolve_value_collision(existing: &Value, incoming: &Value) -> CollisionResult {
    let existing_attr = match existing {
        Value::Attribute(attr) => Some(attr),
        _ => None,
    };
    let incoming_attr = match incoming {
        Value::Attribute(attr) => Some(attr),
        _ => None,
    };

    let (existing_attr, incoming_attr) = match (existing_attr, incoming_attr) {
        (_, None) => {
            return if incoming.is_weak() {
                CollisionResult::KeepOriginal
            } else if existing.is_weak() {
                CollisionResult::TakeNew
            } else {
                CollisionResult::Conflict
            };
        }
        (None, Some(_)) => {
            return if existing.is_weak() {
                CollisionResult::TakeNew
            } else {
                CollisionResult::Conflict
            };
        }
        (Some(existing_attr), Some(incoming_attr)) => (existing_attr, incoming_attr),
    };

    // A weak attribute accepting anything comes from a bare <attr> reference in a styleable.
    if existing_attr.is_weak() && existing_attr.type_mask == AttributeTypeMask::ANY {
        return CollisionResult::TakeNew;
    }
    if incoming_attr.is_weak() && incoming_attr.type_mask == AttributeTypeMask::ANY {
        return CollisionResult::KeepOriginal;
    }
    if existing_attr.is_compatible_with(incoming_attr) {
        return CollisionResult::KeepOriginal;
    }
    CollisionResult::Conflict
}

use std::fmt;

/// A resource identifier of the form `0xPPTTEEEE`.
///
/// `PP` is the package id, `TT` the type id and `EEEE` the entry id. An id is valid when both
/// the package and the type id are nonzero. Package id `0x00` marks a shared library whose
/// package id is assigned at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ResourceId(pub u32);

impl ResourceId {
    /// Builds an id from its three components.
    pub fn new(package_id: u8, type_id: u8, entry_id: u16) -> Self {
        ResourceId((u32::from(package_id) << 24) | (u32::from(type_id) << 16) | u32::from(entry_id))
    }

    /// The package component.
    pub fn package_id(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// The type component.
    pub fn type_id(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// The entry component.
    pub fn entry_id(self) -> u16 {
        self.0 as u16
    }

    /// Returns true if both package and type ids are set.
    pub fn is_valid(self) -> bool {
        (self.0 & 0xff00_0000) != 0 && (self.0 & 0x00ff_0000) != 0
    }

    /// Returns true if the type and entry are set, ignoring the package.
    ///
    /// Ids with package `0x00` are valid for shared libraries.
    pub fn is_valid_ignoring_package(self) -> bool {
        (self.0 & 0x00ff_0000) != 0
    }
}

impl From<u32> for ResourceId {
    fn from(value: u32) -> Self {
        ResourceId(value)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

//! Qualified resource names and their textual form.

use std::fmt;

use crate::{resource::ResourceType, Error, Result};

/// A fully qualified resource name, `package:type/entry`.
///
/// The package may be empty, in which case the name refers to the package being compiled.
/// Names order by package, then type, then entry, which is the order the resource table keeps
/// its collections in.
///
/// # Examples
///
/// ```rust
/// use restable::resource::{ResourceName, ResourceType};
///
/// let name = ResourceName::parse("app:string/app_name")?;
/// assert_eq!(name.package, "app");
/// assert_eq!(name.type_, ResourceType::String);
/// assert_eq!(name.entry, "app_name");
/// assert_eq!(name.to_string(), "app:string/app_name");
/// # Ok::<(), restable::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceName {
    /// Owning package, empty for the local package
    pub package: String,
    /// Resource type
    pub type_: ResourceType,
    /// Entry name within the type
    pub entry: String,
}

/// Result of parsing a reference-style name: the name plus whether it was marked private
/// with a leading `*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    /// The parsed name
    pub name: ResourceName,
    /// Whether the reference was written as `*package:type/entry`
    pub private_reference: bool,
}

impl ResourceName {
    /// Creates a name from its three components.
    pub fn new(package: impl Into<String>, type_: ResourceType, entry: impl Into<String>) -> Self {
        ResourceName {
            package: package.into(),
            type_,
            entry: entry.into(),
        }
    }

    /// Parses `[@][package:]type/entry` (also accepting `type/package:entry`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidResourceName`] when the type is missing or unknown, the entry is
    /// empty, or a package or type separator has nothing in front of it.
    pub fn parse(s: &str) -> Result<ResourceName> {
        Ok(Self::parse_with_private(s)?.name)
    }

    /// Parses a name that may be prefixed with `*` to mark a private reference.
    ///
    /// The marker follows the optional `@`, so both `@*android:color/primary` and
    /// `*android:color/primary` are private references to `android:color/primary`.
    ///
    /// # Errors
    ///
    /// Same as [`ResourceName::parse`].
    pub fn parse_with_private(s: &str) -> Result<ParsedName> {
        let invalid = || Error::InvalidResourceName(s.to_string());

        let rest = s.strip_prefix('@').unwrap_or(s);
        let (private_reference, rest) = match rest.strip_prefix('*') {
            Some(rest) => (true, rest),
            None => (false, rest),
        };

        let (package, type_, entry) = extract_parts(rest).ok_or_else(invalid)?;
        let type_ = ResourceType::parse(type_).ok_or_else(invalid)?;
        if entry.is_empty() {
            return Err(invalid());
        }

        Ok(ParsedName {
            name: ResourceName::new(package, type_, entry),
            private_reference,
        })
    }

    /// Returns true if the package component is empty.
    pub fn is_local(&self) -> bool {
        self.package.is_empty()
    }

    /// Returns a copy of this name with `package` filled in if it was empty.
    #[must_use]
    pub fn with_default_package(&self, package: &str) -> ResourceName {
        if self.package.is_empty() {
            ResourceName::new(package, self.type_, self.entry.clone())
        } else {
            self.clone()
        }
    }
}

/// Splits a name into package, type and entry without validating the type.
///
/// The first `/` ends the type, the first `:` ends the package, whichever order they come in.
fn extract_parts(s: &str) -> Option<(&str, &str, &str)> {
    let mut package: Option<&str> = None;
    let mut type_: Option<&str> = None;
    let mut start = 0;

    for (pos, c) in s.char_indices() {
        if type_.is_none() && c == '/' {
            type_ = Some(&s[start..pos]);
            start = pos + 1;
        } else if package.is_none() && c == ':' {
            package = Some(&s[start..pos]);
            start = pos + 1;
        }
    }

    let entry = &s[start..];
    match (package, type_) {
        (Some(""), _) | (_, Some("")) | (_, None) => None,
        (package, Some(type_)) => Some((package.unwrap_or(""), type_, entry)),
    }
}

/// Returns true if `entry` is usable as a resource entry name.
///
/// Entry names start with a letter or `_` and continue with letters, digits, `_`, `.` or `-`.
/// Mangled names (`package$entry`) additionally contain `$`.
pub fn is_valid_entry_name(entry: &str, allow_mangled: bool) -> bool {
    let mut chars = entry.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    let allowed = |c: char| {
        c.is_alphanumeric() || c == '_' || c == '.' || c == '-' || (allow_mangled && c == '$')
    };

    (first.is_alphabetic() || first == '_' || (allow_mangled && first == '$')) && chars.all(allowed)
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.package.is_empty() {
            write!(f, "{}:", self.package)?;
        }
        write!(f, "{}/{}", self.type_, self.entry)
    }
}

impl std::str::FromStr for ResourceName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ResourceName::parse(s)
    }
}

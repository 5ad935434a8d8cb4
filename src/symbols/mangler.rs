//! Name mangling for resources merged in from static libraries.
//!
//! A library entry `com.lib:string/title` lives in the app package as
//! `com.app:string/com.lib$title`.

use std::collections::HashSet;

use crate::resource::ResourceName;

/// Which packages get folded into the package being compiled.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NameManglerPolicy {
    /// Package that mangled names are moved into
    pub target_package_name: String,
    /// Packages whose resources are merged into the target package
    pub packages_to_mangle: HashSet<String>,
}

/// Rewrites names from merged libraries into the target package.
///
/// A resource `lib:string/title` of a mangled package becomes `app:string/lib$title` in the
/// target package `app`.
///
/// # Examples
///
/// ```rust
/// use restable::resource::ResourceName;
/// use restable::symbols::{NameMangler, NameManglerPolicy};
///
/// let mangler = NameMangler::new(NameManglerPolicy {
///     target_package_name: "app".to_string(),
///     packages_to_mangle: ["lib".to_string()].into(),
/// });
///
/// let mangled = mangler.mangle_name(&ResourceName::parse("lib:string/title")?).unwrap();
/// assert_eq!(mangled.to_string(), "app:string/lib$title");
/// assert_eq!(NameMangler::unmangle(&mangled.entry), Some(("lib", "title")));
/// # Ok::<(), restable::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct NameMangler {
    policy: NameManglerPolicy,
}

impl NameMangler {
    /// Creates a mangler for `policy`.
    pub fn new(policy: NameManglerPolicy) -> Self {
        NameMangler { policy }
    }

    /// The policy in effect.
    pub fn policy(&self) -> &NameManglerPolicy {
        &self.policy
    }

    /// The package mangled names are moved into.
    pub fn target_package_name(&self) -> &str {
        &self.policy.target_package_name
    }

    /// True if names in `package` are mangled. The target package and the empty package
    /// never are.
    pub fn should_mangle(&self, package: &str) -> bool {
        if package.is_empty() || package == self.policy.target_package_name {
            return false;
        }
        self.policy.packages_to_mangle.contains(package)
    }

    /// Moves `name` into the target package, or returns `None` if its package is not
    /// mangled.
    pub fn mangle_name(&self, name: &ResourceName) -> Option<ResourceName> {
        if !self.should_mangle(&name.package) {
            return None;
        }
        Some(ResourceName::new(
            self.policy.target_package_name.clone(),
            name.type_,
            Self::mangle_entry(&name.package, &name.entry),
        ))
    }

    /// `package$entry`.
    pub fn mangle_entry(package: &str, entry: &str) -> String {
        format!("{package}${entry}")
    }

    /// Splits a mangled entry into `(package, entry)`.
    pub fn unmangle(mangled: &str) -> Option<(&str, &str)> {
        mangled.split_once('$')
    }
}

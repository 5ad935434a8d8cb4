//! Fixture builders for tests.
//!
//! Everything here fails fast. A malformed name, an unparsable configuration or a rejected
//! insertion panics with a message naming the input. Each builder consumes itself on `build()`, so a finished builder
//! can not be reused.
//!
//! # Key Components
//!
//! - [`ResourceTableBuilder`] - Tables assembled one resource at a time
//! - [`AttributeBuilder`] / [`StyleBuilder`] / [`StyleableBuilder`] / [`ValueBuilder`] - Values
//! - [`ArtifactBuilder`] / [`PostProcessingConfigurationBuilder`] - Split configuration
//! - [`ConfigDescriptionBuilder`] - Configurations field by field
//! - [`ContextBuilder`] / [`StaticSymbolSourceBuilder`] - Compilation contexts and symbols
//! - [`build_xml_dom`] - Inline XML documents
//!
//! # Examples
//!
//! ```rust
//! use restable::testing::{get_value, ResourceTableBuilder};
//! use restable::values::StringValue;
//!
//! let table = ResourceTableBuilder::new()
//!     .add_string("app:string/app_name", "Hello")
//!     .build();
//!
//! let value = get_value::<StringValue>(&table, "app:string/app_name").unwrap();
//! assert_eq!(&*value.value, "Hello");
//! ```

mod builders;
mod context;

pub use builders::{
    build_primitive, build_reference, ArtifactBuilder, AttributeBuilder,
    PostProcessingConfigurationBuilder, ResourceTableBuilder, StyleBuilder, StyleableBuilder,
    ValueBuilder,
};
pub use context::{Context, ContextBuilder, StaticSymbolSource, StaticSymbolSourceBuilder};
pub use crate::config::ConfigDescriptionBuilder;

use crate::{
    config::ConfigDescription,
    context::AaptContext,
    diagnostics::Diagnostics,
    resource::{ResourceName, Source},
    table::ResourceTable,
    values::ValueCast,
    xml::{self, XmlResource},
};

/// Parses `name`.
///
/// # Panics
///
/// Panics if `name` is not a valid resource name.
pub fn parse_name_or_die(name: &str) -> ResourceName {
    match ResourceName::parse(name) {
        Ok(parsed) => parsed,
        Err(_) => panic!("invalid resource name: {name}"),
    }
}

/// Parses the qualifier string `config`.
///
/// # Panics
///
/// Panics if `config` is not a valid qualifier string.
pub fn parse_config_or_die(config: &str) -> ConfigDescription {
    match ConfigDescription::parse(config) {
        Ok(parsed) => parsed,
        Err(_) => panic!("invalid configuration: {config}"),
    }
}

/// The value of `name` for `config` and `product`, if it has type `T`.
///
/// # Panics
///
/// Panics if `name` is not a valid resource name.
pub fn get_value_for_config_and_product<'a, T: ValueCast>(
    table: &'a ResourceTable,
    name: &str,
    config: &ConfigDescription,
    product: &str,
) -> Option<&'a T> {
    let result = table.find_resource(&parse_name_or_die(name))?;
    let config_value = result.entry.find_value_with_product(config, product)?;
    config_value.value.cast::<T>()
}

/// The value of `name` for `config`, if it has type `T`.
///
/// # Panics
///
/// Panics if `name` is not a valid resource name.
pub fn get_value_for_config<'a, T: ValueCast>(
    table: &'a ResourceTable,
    name: &str,
    config: &ConfigDescription,
) -> Option<&'a T> {
    get_value_for_config_and_product(table, name, config, "")
}

/// The default-configuration value of `name`, if it has type `T`.
///
/// # Panics
///
/// Panics if `name` is not a valid resource name.
pub fn get_value<'a, T: ValueCast>(table: &'a ResourceTable, name: &str) -> Option<&'a T> {
    get_value_for_config(table, name, &ConfigDescription::default())
}

/// Inflates `markup` after an XML declaration, as the file `test.xml`.
///
/// # Panics
///
/// Panics if the markup does not inflate to a document with a root element.
pub fn build_xml_dom(markup: &str) -> XmlResource {
    let input = format!("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n{markup}");
    let diagnostics = Diagnostics::new();
    match xml::inflate(&input, &diagnostics, Source::new("test.xml")) {
        Ok(doc) => doc,
        Err(e) => panic!("failed to parse inline XML string: {e}"),
    }
}

/// Like [`build_xml_dom`], with the file assigned to the context's compilation package.
///
/// # Panics
///
/// Panics if the markup does not inflate to a document with a root element.
pub fn build_xml_dom_for_package_name(context: &dyn AaptContext, markup: &str) -> XmlResource {
    let mut doc = build_xml_dom(markup);
    doc.file.name.package = context.compilation_package().to_string();
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::{BinaryPrimitive, Id};

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_name_or_die("app:id/foo").entry, "foo");
        assert_eq!(parse_config_or_die("land").orientation, ConfigDescription::ORIENTATION_LAND);
        assert!(parse_config_or_die("").is_default());
    }

    #[test]
    #[should_panic(expected = "invalid resource name: nope")]
    fn test_parse_name_or_die_panics() {
        parse_name_or_die("nope");
    }

    #[test]
    #[should_panic(expected = "invalid configuration: sideways")]
    fn test_parse_config_or_die_panics() {
        parse_config_or_die("sideways");
    }

    #[test]
    fn test_get_value_variants() {
        let land = parse_config_or_die("land");
        let table = ResourceTableBuilder::new()
            .add_value("app:integer/n", build_primitive(BinaryPrimitive::TYPE_INT_DEC, 1))
            .add_value_with_config(
                "app:integer/n",
                &land,
                Default::default(),
                build_primitive(BinaryPrimitive::TYPE_INT_DEC, 2),
            )
            .build();

        assert_eq!(get_value::<BinaryPrimitive>(&table, "app:integer/n").unwrap().data, 1);
        assert_eq!(
            get_value_for_config::<BinaryPrimitive>(&table, "app:integer/n", &land)
                .unwrap()
                .data,
            2
        );
        assert!(get_value::<Id>(&table, "app:integer/n").is_none());
        assert!(get_value::<BinaryPrimitive>(&table, "app:integer/missing").is_none());
        assert!(get_value_for_config_and_product::<BinaryPrimitive>(
            &table,
            "app:integer/n",
            &land,
            "tablet"
        )
        .is_none());
    }

    #[test]
    fn test_build_xml_dom() {
        let doc = build_xml_dom(r#"<LinearLayout><TextView text="hi"/></LinearLayout>"#);
        assert_eq!(doc.root.name, "LinearLayout");
        // The prepended declaration occupies line 1.
        assert_eq!(doc.root.line_number, 2);
        assert_eq!(doc.file.source.path, "test.xml");
        assert_eq!(doc.file.name.package, "");
    }

    #[test]
    #[should_panic(expected = "failed to parse inline XML string")]
    fn test_build_xml_dom_panics() {
        build_xml_dom("<unclosed>");
    }

    #[test]
    fn test_build_xml_dom_for_package_name() {
        let context = ContextBuilder::new().set_compilation_package("com.app").build();
        let doc = build_xml_dom_for_package_name(&context, "<menu/>");
        assert_eq!(doc.file.name.package, "com.app");
        assert_eq!(doc.root.name, "menu");
    }
}

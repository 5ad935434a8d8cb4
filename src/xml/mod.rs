//! XML document model for XML resources such as layouts and menus.
//!
//! [`inflate`] parses text into an [`XmlResource`]: a tree of [`Element`]s with
//! namespace-resolved names and attributes. Namespace declarations are kept on the element
//! that declared them rather than showing up as attributes.
//!
//! # Examples
//!
//! ```rust
//! use restable::diagnostics::Diagnostics;
//! use restable::resource::Source;
//! use restable::xml;
//!
//! let text = r#"<LinearLayout xmlns:android="http://schemas.android.com/apk/res/android"
//!                   android:orientation="vertical">
//!                 <TextView android:id="@+id/title" />
//!               </LinearLayout>"#;
//!
//! let diagnostics = Diagnostics::new();
//! let doc = xml::inflate(text, &diagnostics, Source::new("res/layout/main.xml"))?;
//!
//! assert_eq!(doc.root.name, "LinearLayout");
//! let orientation = doc.root.find_attribute(xml::SCHEMA_ANDROID, "orientation").unwrap();
//! assert_eq!(orientation.value, "vertical");
//! assert!(doc.root.find_child("", "TextView").is_some());
//! # Ok::<(), restable::Error>(())
//! ```

mod inflate;

pub use inflate::inflate;

use crate::resource::ResourceFile;

/// The Android attribute namespace.
pub const SCHEMA_ANDROID: &str = "http://schemas.android.com/apk/res/android";

/// The namespace of attributes from the application's own package.
pub const SCHEMA_AUTO: &str = "http://schemas.android.com/apk/res-auto";

/// An attribute with its namespace resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    /// Namespace URI, empty for unqualified attributes
    pub namespace_uri: String,
    /// Local name
    pub name: String,
    /// Unescaped value
    pub value: String,
}

/// A `xmlns[:prefix]="uri"` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDecl {
    /// Declared prefix, empty for the default namespace
    pub prefix: String,
    /// Namespace URI
    pub uri: String,
    /// Line the declaration is on
    pub line_number: usize,
}

/// Character data inside an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    /// Unescaped text
    pub text: String,
    /// Line the text starts on
    pub line_number: usize,
}

/// A child of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Nested element
    Element(Element),
    /// Character data
    Text(Text),
}

/// An element with its attributes and children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Namespace URI, empty when unqualified
    pub namespace_uri: String,
    /// Local name
    pub name: String,
    /// Attributes in document order, namespace declarations excluded
    pub attributes: Vec<XmlAttribute>,
    /// Namespace declarations made on this element
    pub namespace_decls: Vec<NamespaceDecl>,
    /// Child nodes in document order
    pub children: Vec<Node>,
    /// Line the start tag is on
    pub line_number: usize,
}

impl Element {
    /// The attribute `name` in namespace `namespace_uri`.
    pub fn find_attribute(&self, namespace_uri: &str, name: &str) -> Option<&XmlAttribute> {
        self.attributes
            .iter()
            .find(|a| a.namespace_uri == namespace_uri && a.name == name)
    }

    /// Mutable access to the attribute `name` in namespace `namespace_uri`.
    pub fn find_attribute_mut(
        &mut self,
        namespace_uri: &str,
        name: &str,
    ) -> Option<&mut XmlAttribute> {
        self.attributes
            .iter_mut()
            .find(|a| a.namespace_uri == namespace_uri && a.name == name)
    }

    /// The first child element `name` in namespace `namespace_uri`.
    pub fn find_child(&self, namespace_uri: &str, name: &str) -> Option<&Element> {
        self.child_elements()
            .find(|e| e.namespace_uri == namespace_uri && e.name == name)
    }

    /// Child elements in document order, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of the direct text children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                Node::Text(text) => Some(text.text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }
}

/// An inflated XML file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlResource {
    /// Identity of the file
    pub file: ResourceFile,
    /// Document element
    pub root: Element,
}

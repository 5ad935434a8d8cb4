//! Inflation of XML text into the [`XmlResource`] DOM.
//!
//! Namespaces are resolved while reading, so every element and attribute carries its
//! namespace URI instead of a prefix. Each element records the line it starts on.

use std::fmt::Display;

use quick_xml::{
    events::{attributes::Attribute, BytesStart, Event},
    name::{Namespace, PrefixDeclaration, ResolveResult},
    reader::NsReader,
};

use crate::{
    diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics},
    resource::{ResourceFile, ResourceName, ResourceType, Source},
    util::files,
    xml::{Element, NamespaceDecl, Node, Text, XmlAttribute, XmlResource},
    Error, Result,
};

/// Maps byte offsets to 1-based line numbers, scanning forward only.
struct LineCounter<'a> {
    bytes: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> LineCounter<'a> {
    fn new(text: &'a str) -> Self {
        LineCounter {
            bytes: text.as_bytes(),
            pos: 0,
            line: 1,
        }
    }

    fn line_at(&mut self, offset: impl TryInto<usize>) -> usize {
        let offset = offset
            .try_into()
            .unwrap_or(usize::MAX)
            .min(self.bytes.len());
        if offset > self.pos {
            self.line += self.bytes[self.pos..offset]
                .iter()
                .filter(|&&b| b == b'\n')
                .count();
            self.pos = offset;
        }
        self.line
    }
}

/// Parses `text` into an [`XmlResource`] whose file identity is taken from `source`.
///
/// Whitespace-only text is dropped. Every failure is also reported to `diagnostics` with the
/// line it was detected on.
///
/// # Errors
///
/// Returns [`Error::Malformed`] for XML that does not parse, an unbound namespace prefix, a
/// document without a root element, or content after the root element.
pub fn inflate(text: &str, diagnostics: &Diagnostics, source: Source) -> Result<XmlResource> {
    match inflate_root(text) {
        Ok(root) => {
            let stem = files::get_filename(&source.path)
                .split('.')
                .next()
                .unwrap_or_default()
                .to_string();
            let name = ResourceName::new("", ResourceType::Xml, stem);
            Ok(XmlResource {
                file: ResourceFile::new(name, source),
                root,
            })
        }
        Err((error, line)) => {
            diagnostics.push(
                Diagnostic::new(DiagnosticSeverity::Error, DiagnosticCategory::Xml, error.to_string())
                    .with_source(source.with_line(line)),
            );
            Err(error)
        }
    }
}

type InflateResult<T> = std::result::Result<T, (Error, usize)>;

fn xml_error(message: impl Display, line: usize) -> (Error, usize) {
    (malformed_error!("line {}: {}", line, message), line)
}

fn namespace_of(resolved: ResolveResult<'_>, line: usize) -> InflateResult<String> {
    match resolved {
        ResolveResult::Bound(Namespace(ns)) => Ok(String::from_utf8_lossy(ns).into_owned()),
        ResolveResult::Unbound => Ok(String::new()),
        ResolveResult::Unknown(prefix) => Err(xml_error(
            format!("unbound namespace prefix '{}'", String::from_utf8_lossy(&prefix)),
            line,
        )),
    }
}

fn build_element(
    reader: &NsReader<&[u8]>,
    namespace_uri: String,
    start: &BytesStart<'_>,
    line: usize,
) -> InflateResult<Element> {
    let mut element = Element {
        namespace_uri,
        name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
        line_number: line,
        ..Element::default()
    };

    for attr in start.attributes() {
        let attr: Attribute<'_> = attr.map_err(|e| xml_error(e, line))?;
        let value = attr
            .unescape_value()
            .map_err(|e| xml_error(e, line))?
            .into_owned();

        if let Some(binding) = attr.key.as_namespace_binding() {
            let prefix = match binding {
                PrefixDeclaration::Default => String::new(),
                PrefixDeclaration::Named(prefix) => String::from_utf8_lossy(prefix).into_owned(),
            };
            element.namespace_decls.push(NamespaceDecl {
                prefix,
                uri: value,
                line_number: line,
            });
            continue;
        }

        let (resolved, local_name) = reader.resolve_attribute(attr.key);
        element.attributes.push(XmlAttribute {
            namespace_uri: namespace_of(resolved, line)?,
            name: String::from_utf8_lossy(local_name.as_ref()).into_owned(),
            value,
        });
    }

    Ok(element)
}

fn inflate_root(text: &str) -> InflateResult<Element> {
    let mut reader = NsReader::from_str(text);
    let mut lines = LineCounter::new(text);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let line = lines.line_at(reader.buffer_position());
        let (resolved, event) = reader
            .read_resolved_event()
            .map_err(|e| xml_error(e, line))?;
        let namespace_uri = namespace_of(resolved, line)?;

        let finished = match event {
            Event::Start(start) => {
                if root.is_some() {
                    return Err(xml_error("content after the root element", line));
                }
                stack.push(build_element(&reader, namespace_uri, &start, line)?);
                None
            }
            Event::Empty(start) => Some(build_element(&reader, namespace_uri, &start, line)?),
            Event::End(_) => stack.pop(),
            Event::Text(t) => {
                let content = t.unescape().map_err(|e| xml_error(e, line))?;
                push_text(&mut stack, &content, line)?;
                None
            }
            Event::CData(c) => {
                let content = String::from_utf8_lossy(&c).into_owned();
                push_text(&mut stack, &content, line)?;
                None
            }
            Event::Eof => break,
            _ => None,
        };

        if let Some(element) = finished {
            match stack.last_mut() {
                Some(parent) => parent.children.push(Node::Element(element)),
                None if root.is_none() => root = Some(element),
                None => return Err(xml_error("content after the root element", line)),
            }
        }
    }

    let line = lines.line_at(reader.buffer_position());
    if let Some(open) = stack.last() {
        return Err(xml_error(format!("unclosed element <{}>", open.name), line));
    }
    root.ok_or_else(|| xml_error("document has no root element", line))
}

fn push_text(stack: &mut [Element], content: &str, line: usize) -> InflateResult<()> {
    if content.trim().is_empty() {
        return Ok(());
    }
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(Node::Text(Text {
                text: content.to_string(),
                line_number: line,
            }));
            Ok(())
        }
        None => Err(xml_error("text outside of the root element", line)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::SCHEMA_ANDROID;

    fn parse(text: &str) -> Result<XmlResource> {
        inflate(text, &Diagnostics::new(), Source::new("test.xml"))
    }

    #[test]
    fn test_namespaces_and_attributes() {
        let doc = parse(
            r#"<?xml version="1.0" encoding="utf-8"?>
<View xmlns:android="http://schemas.android.com/apk/res/android"
      xmlns:app="http://schemas.android.com/apk/res-auto"
      android:id="@+id/view" app:tint="&amp;red" plain="x" />"#,
        )
        .unwrap();

        let root = &doc.root;
        assert_eq!(root.name, "View");
        assert_eq!(root.line_number, 2);
        assert_eq!(root.namespace_decls.len(), 2);
        assert_eq!(root.namespace_decls[0].prefix, "android");
        assert_eq!(root.namespace_decls[1].uri, "http://schemas.android.com/apk/res-auto");
        assert_eq!(root.attributes.len(), 3);
        assert_eq!(root.find_attribute(SCHEMA_ANDROID, "id").unwrap().value, "@+id/view");
        assert_eq!(
            root.find_attribute(crate::xml::SCHEMA_AUTO, "tint").unwrap().value,
            "&red"
        );
        assert_eq!(root.find_attribute("", "plain").unwrap().value, "x");
        assert_eq!(doc.file.name.entry, "test");
        assert_eq!(doc.file.source.path, "test.xml");
    }

    #[test]
    fn test_children_text_and_lines() {
        let doc = parse("<menu>\n  <item>One</item>\n  <item>\n  </item>\n</menu>").unwrap();
        let items: Vec<&Element> = doc.root.child_elements().collect();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].text(), "One");
        assert_eq!(items[0].line_number, 2);
        assert_eq!(items[1].line_number, 3);
        assert!(items[1].children.is_empty());
        assert_eq!(doc.root.children.len(), 2);
    }

    #[test]
    fn test_default_namespace_applies_to_elements_only() {
        let doc = parse(r#"<a xmlns="urn:test" k="v"><b/></a>"#).unwrap();
        assert_eq!(doc.root.namespace_uri, "urn:test");
        assert_eq!(doc.root.find_child("urn:test", "b").unwrap().name, "b");
        assert!(doc.root.find_attribute("", "k").is_some());
    }

    #[test]
    fn test_malformed_documents() {
        let diagnostics = Diagnostics::new();
        for bad in [
            "",
            "   ",
            "<a>",
            "<a></b>",
            "<a/><b/>",
            "text<a/>",
            "<p:a/>",
        ] {
            let result = inflate(bad, &diagnostics, Source::new("bad.xml"));
            assert!(result.is_err(), "'{bad}' should not inflate");
        }
        assert_eq!(diagnostics.error_count(), 7);
    }
}

//! XML serialization

use super::tree::{Element, Node};
use crate::error::{HelpDocsError, Result};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// A complete XML document with a declaration and a root element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Root element
    pub root: Element,
}

impl Document {
    /// Wrap a root element
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// Serialize with an XML declaration and `indent` spaces per level.
    ///
    /// Elements holding character data, whitespace-only text included, are
    /// written as parsed so no whitespace is ever added to mixed content.
    pub fn to_pretty_string(&self, indent: usize) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        emit(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
        )?;
        emit(&mut writer, Event::Text(BytesText::from_escaped("\n")))?;
        write_pretty(&mut writer, &self.root, 0, indent)?;
        emit(&mut writer, Event::Text(BytesText::from_escaped("\n")))?;
        into_string(writer)
    }
}

/// Serialize an element without added whitespace
pub(super) fn compact(element: &Element) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    write_compact(&mut writer, element)?;
    into_string(writer)
}

fn write_pretty(
    writer: &mut Writer<Vec<u8>>,
    element: &Element,
    depth: usize,
    indent: usize,
) -> Result<()> {
    if element.children.is_empty() || element.has_text() {
        return write_compact(writer, element);
    }

    emit(writer, Event::Start(start_tag(element)))?;
    for child in &element.children {
        emit(writer, newline(depth + 1, indent))?;
        match child {
            Node::Element(el) => write_pretty(writer, el, depth + 1, indent)?,
            other => write_node(writer, other)?,
        }
    }
    emit(writer, newline(depth, indent))?;
    emit(writer, Event::End(BytesEnd::new(element.name.as_str())))
}

fn write_compact(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<()> {
    if element.children.is_empty() {
        return emit(writer, Event::Empty(start_tag(element)));
    }
    emit(writer, Event::Start(start_tag(element)))?;
    for child in &element.children {
        write_node(writer, child)?;
    }
    emit(writer, Event::End(BytesEnd::new(element.name.as_str())))
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &Node) -> Result<()> {
    match node {
        Node::Element(el) => write_compact(writer, el),
        Node::Text(text) => emit(writer, Event::Text(BytesText::new(text))),
        Node::CData(data) => emit(writer, Event::CData(BytesCData::new(data.as_str()))),
        Node::Comment(comment) => {
            emit(writer, Event::Comment(BytesText::from_escaped(comment.as_str())))
        }
    }
}

fn start_tag(element: &Element) -> BytesStart<'_> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }
    start
}

fn newline(depth: usize, indent: usize) -> Event<'static> {
    let mut ws = String::with_capacity(1 + depth * indent);
    ws.push('\n');
    ws.push_str(&" ".repeat(depth * indent));
    Event::Text(BytesText::from_escaped(ws))
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| HelpDocsError::Xml(e.to_string()))
}

fn into_string(writer: Writer<Vec<u8>>) -> Result<String> {
    String::from_utf8(writer.into_inner())
        .map_err(|e| HelpDocsError::Xml(format!("invalid UTF-8 output: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pretty_document() {
        let mut root = Element::new("odoo");
        let data = root.push_child(Element::new("data"));
        data.push_child(Element::new("field").with_attr("name", "type").with_text("qweb"));

        let xml = Document::new(root).to_pretty_string(2).unwrap();
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <odoo>\n  <data>\n    <field name=\"type\">qweb</field>\n  </data>\n</odoo>\n"
        );
    }

    #[test]
    fn test_mixed_content_stays_inline() {
        let el = Element::parse("<p><b>bold</b> tail</p>").unwrap();
        let mut root = Element::new("wrap");
        root.push_child(el);
        let xml = Document::new(root).to_pretty_string(4).unwrap();
        assert!(xml.contains("\n    <p><b>bold</b> tail</p>\n"));
    }

    #[test]
    fn test_space_between_inline_elements_kept() {
        let el = Element::parse("<p><b>a</b> <i>b</i></p>").unwrap();
        let mut root = Element::new("wrap");
        root.push_child(el);
        let xml = Document::new(root).to_pretty_string(2).unwrap();
        assert!(xml.contains("\n  <p><b>a</b> <i>b</i></p>\n"));
    }

    #[test]
    fn test_empty_element_self_closes() {
        let el = Element::new("br");
        assert_eq!(compact(&el).unwrap(), "<br/>");
    }

    #[test]
    fn test_text_is_escaped() {
        let el = Element::new("p").with_attr("title", "a<b").with_text("1 < 2 & 3");
        let xml = compact(&el).unwrap();
        assert!(xml.contains("1 &lt; 2 &amp; 3"));
        assert!(xml.contains("a&lt;b"));
        assert_eq!(Element::parse(&xml).unwrap(), el);
    }

    #[test]
    fn test_comment_and_cdata_preserved() {
        let el = Element::parse("<a><!-- c --><![CDATA[<raw>]]></a>").unwrap();
        assert_eq!(compact(&el).unwrap(), "<a><!-- c --><![CDATA[<raw>]]></a>");
    }

    #[test]
    fn test_zero_indent() {
        let mut root = Element::new("a");
        root.push_child(Element::new("b"));
        let xml = Document::new(root).to_pretty_string(0).unwrap();
        assert!(xml.ends_with("<a>\n<b/>\n</a>\n"));
    }
}

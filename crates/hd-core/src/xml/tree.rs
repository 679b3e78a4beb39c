//! Owned element tree and parser

use crate::error::{HelpDocsError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fmt;

/// A node inside an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Child element
    Element(Element),
    /// Unescaped character data, whitespace included
    Text(String),
    /// CDATA section
    CData(String),
    /// Comment (raw content)
    Comment(String),
}

/// An XML element with ordered attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Qualified tag name
    pub name: String,
    /// Attributes in document order
    pub attributes: Vec<(String, String)>,
    /// Child nodes in document order
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Builder-style text setter
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text);
        self
    }

    /// Set an attribute, replacing an existing value in place
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// Get an attribute value
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Append a child element and return a mutable reference to it
    pub fn push_child(&mut self, child: Element) -> &mut Element {
        self.children.push(Node::Element(child));
        match self.children.last_mut() {
            Some(Node::Element(el)) => el,
            _ => unreachable!("just pushed an element"),
        }
    }

    /// Append a text node; empty text is ignored
    pub fn push_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if !text.is_empty() {
            self.children.push(Node::Text(text));
        }
    }

    /// Iterate over child elements
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }

    /// Iterate over child elements with the given tag name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.child_elements().filter(move |el| el.name == name)
    }

    /// Concatenated direct text and CDATA content
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(t) | Node::CData(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Whether any direct child carries character data
    pub fn has_text(&self) -> bool {
        self.children
            .iter()
            .any(|node| matches!(node, Node::Text(_) | Node::CData(_)))
    }

    /// Parse a string holding exactly one root element
    pub fn parse(input: &str) -> Result<Element> {
        let mut reader = Reader::from_str(input);
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    ensure_single_root(&root)?;
                    stack.push(element_from_start(&start)?);
                }
                Event::Empty(start) => {
                    ensure_single_root(&root)?;
                    let element = element_from_start(&start)?;
                    attach(&mut stack, &mut root, element);
                }
                Event::End(end) => {
                    let name = utf8(end.name().as_ref())?;
                    let element = stack.pop().ok_or_else(|| {
                        HelpDocsError::Xml(format!("unexpected closing tag </{}>", name))
                    })?;
                    if element.name != name {
                        return Err(HelpDocsError::Xml(format!(
                            "expected </{}>, found </{}>",
                            element.name, name
                        )));
                    }
                    attach(&mut stack, &mut root, element);
                }
                Event::Text(text) => {
                    let text = text
                        .unescape()
                        .map_err(|e| HelpDocsError::Xml(e.to_string()))?;
                    match stack.last_mut() {
                        Some(parent) => parent.push_text(text.into_owned()),
                        None if text.trim().is_empty() => {}
                        None => {
                            return Err(HelpDocsError::Xml(format!(
                                "text outside of the root element: '{}'",
                                text.trim()
                            )))
                        }
                    }
                }
                Event::CData(data) => {
                    let data = utf8(&data.into_inner())?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(Node::CData(data)),
                        None => {
                            return Err(HelpDocsError::Xml(
                                "CDATA outside of the root element".to_string(),
                            ))
                        }
                    }
                }
                Event::Comment(comment) => {
                    // Comments outside the root are dropped
                    if let Some(parent) = stack.last_mut() {
                        parent
                            .children
                            .push(Node::Comment(utf8(&comment.into_inner())?));
                    }
                }
                Event::PI(_) => {
                    return Err(HelpDocsError::Xml(
                        "processing instructions are not supported in view markup".to_string(),
                    ))
                }
                Event::DocType(_) => {
                    return Err(HelpDocsError::Xml(
                        "DOCTYPE declarations are not supported in view markup".to_string(),
                    ))
                }
                Event::Eof => break,
                Event::Decl(_) => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(HelpDocsError::Xml(format!("unclosed tag <{}>", open.name)));
        }
        root.ok_or_else(|| HelpDocsError::Xml("document has no root element".to_string()))
    }

    /// Serialize without any added whitespace
    pub fn to_xml_string(&self) -> Result<String> {
        super::writer::compact(self)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_xml_string() {
            Ok(xml) => f.write_str(&xml),
            Err(_) => Err(fmt::Error),
        }
    }
}

fn ensure_single_root(root: &Option<Element>) -> Result<()> {
    match root {
        Some(existing) => Err(HelpDocsError::Xml(format!(
            "extra content after root element <{}>",
            existing.name
        ))),
        None => Ok(()),
    }
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None => *root = Some(element),
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element> {
    let mut element = Element::new(utf8(start.name().as_ref())?);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| HelpDocsError::Xml(e.to_string()))?;
        let key = utf8(attr.key.as_ref())?;
        let value = attr
            .unescape_value()
            .map_err(|e| HelpDocsError::Xml(e.to_string()))?;
        element.attributes.push((key, value.into_owned()));
    }
    Ok(element)
}

fn utf8(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| HelpDocsError::Xml(format!("invalid UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let el = Element::parse("<div class=\"a\">hi</div>").unwrap();
        assert_eq!(el.name, "div");
        assert_eq!(el.attr("class"), Some("a"));
        assert_eq!(el.text(), "hi");
    }

    #[test]
    fn test_parse_nested_and_empty() {
        let el = Element::parse("<t t-name=\"x\"><div><br/></div><span>a</span></t>").unwrap();
        let names: Vec<_> = el.child_elements().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["div", "span"]);
        let div = el.children_named("div").next().unwrap();
        assert_eq!(div.child_elements().next().unwrap().name, "br");
    }

    #[test]
    fn test_parse_unescapes_entities() {
        let el = Element::parse("<p title=\"a &amp; b\">1 &lt; 2</p>").unwrap();
        assert_eq!(el.attr("title"), Some("a & b"));
        assert_eq!(el.text(), "1 < 2");
    }

    #[test]
    fn test_parse_keeps_whitespace_text() {
        let el = Element::parse("<a>\n  <b/>\n</a>").unwrap();
        assert_eq!(el.children.len(), 3);
        assert_eq!(el.to_xml_string().unwrap(), "<a>\n  <b/>\n</a>");

        let el = Element::parse("<p><b>a</b> <i>b</i></p>").unwrap();
        assert_eq!(el.children[1], Node::Text(" ".to_string()));
    }

    #[test]
    fn test_parse_ignores_whitespace_around_root() {
        let el = Element::parse("<?xml version=\"1.0\"?>\n<a/>\n").unwrap();
        assert_eq!(el, Element::new("a"));
    }

    #[test]
    fn test_parse_rejects_processing_instructions() {
        let err = Element::parse("<t><?php echo 1; ?></t>").unwrap_err();
        assert!(err.to_string().contains("processing instructions"));
        assert!(Element::parse("<!DOCTYPE t><t/>").is_err());
    }

    #[test]
    fn test_parse_keeps_comments_and_cdata() {
        let el = Element::parse("<a><!-- note --><![CDATA[x < y]]></a>").unwrap();
        assert_eq!(el.children[0], Node::Comment(" note ".to_string()));
        assert_eq!(el.text(), "x < y");
    }

    #[test]
    fn test_parse_unclosed() {
        let err = Element::parse("<div>").unwrap_err();
        assert!(matches!(err, HelpDocsError::Xml(_)));
    }

    #[test]
    fn test_parse_mismatched() {
        assert!(Element::parse("<div></span>").is_err());
        assert!(Element::parse("</div>").is_err());
    }

    #[test]
    fn test_parse_requires_single_root() {
        assert!(Element::parse("").is_err());
        assert!(Element::parse("just text").is_err());
        assert!(Element::parse("<a/><b/>").is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_entity() {
        assert!(Element::parse("<p>&nbsp;</p>").is_err());
    }

    #[test]
    fn test_set_attr_replaces_in_place() {
        let mut el = Element::new("record").with_attr("id", "a").with_attr("model", "m");
        el.set_attr("id", "b");
        assert_eq!(
            el.attributes,
            vec![
                ("id".to_string(), "b".to_string()),
                ("model".to_string(), "m".to_string())
            ]
        );
    }

    #[test]
    fn test_round_trip_compact() {
        let el = Element::parse("<div>hi</div>").unwrap();
        assert_eq!(el.to_xml_string().unwrap(), "<div>hi</div>");
        assert_eq!(el.to_string(), "<div>hi</div>");
    }
}

// ABOUTME: Minimal XML node tree (elements, text, CDATA) and its recursive serializer.
// ABOUTME: The feed is assembled as an Element tree first, then written out in one pass with quick-xml.

use std::io::Write;

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer as XmlWriter;

use crate::error::RenderError;
use crate::options::WriterOptions;

/// A child of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Character data, escaped on output.
    Text(String),
    /// Character data written verbatim inside `<![CDATA[...]]>`.
    CData(String),
}

/// A named element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: &'static str,
    pub attributes: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// `<name>content</name>`
    pub fn text(name: &'static str, content: impl Into<String>) -> Self {
        Self::new(name).child(Node::Text(content.into()))
    }

    /// `<name><![CDATA[content]]></name>`
    pub fn cdata(name: &'static str, content: impl Into<String>) -> Self {
        Self::new(name).child(Node::CData(content.into()))
    }

    pub fn attr(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((key, value.into()));
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.push(node);
        self
    }

    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }
}

#[cfg(test)]
impl Element {
    /// Returns the direct child elements with the given name.
    pub(crate) fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter_map(move |node| match node {
            Node::Element(el) if el.name == name => Some(el),
            _ => None,
        })
    }

    pub(crate) fn find(&self, name: &str) -> Option<&Element> {
        self.children.iter().find_map(|node| match node {
            Node::Element(el) if el.name == name => Some(el),
            _ => None,
        })
    }

    pub(crate) fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Concatenated text and CDATA content of the direct children.
    pub(crate) fn inner_text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(s) | Node::CData(s) => Some(s.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// Serializes `root` as a complete UTF-8 document.
pub fn write_document(root: &Element, options: &WriterOptions) -> Result<String, RenderError> {
    let mut writer = match options.indent {
        Some(width) => XmlWriter::new_with_indent(Vec::new(), b' ', width),
        None => XmlWriter::new(Vec::new()),
    };

    if options.declaration {
        emit(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
        )?;
    }
    write_element(&mut writer, root)?;

    let mut bytes = writer.into_inner();
    if options.indent.is_some() {
        bytes.push(b'\n');
    }
    String::from_utf8(bytes).map_err(RenderError::xml)
}

fn write_element<W: Write>(writer: &mut XmlWriter<W>, element: &Element) -> Result<(), RenderError> {
    let mut start = BytesStart::new(element.name);
    for (key, value) in &element.attributes {
        start.push_attribute((*key, value.as_str()));
    }

    if element.children.is_empty() {
        return emit(writer, Event::Empty(start));
    }

    emit(writer, Event::Start(start))?;
    for child in &element.children {
        match child {
            Node::Element(el) => write_element(writer, el)?,
            Node::Text(text) => emit(writer, Event::Text(BytesText::new(text)))?,
            Node::CData(data) => {
                for section in cdata_sections(data) {
                    emit(writer, Event::CData(BytesCData::new(section)))?;
                }
            }
        }
    }
    emit(writer, Event::End(BytesEnd::new(element.name)))
}

fn emit<W: Write>(writer: &mut XmlWriter<W>, event: Event<'_>) -> Result<(), RenderError> {
    writer.write_event(event).map_err(RenderError::xml)
}

/// Splits content so no section contains `]]>`; "a]]>b" becomes "a]]" and ">b".
fn cdata_sections(data: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut rest = data;
    while let Some(pos) = rest.find("]]>") {
        sections.push(&rest[..pos + 2]);
        rest = &rest[pos + 2..];
    }
    sections.push(rest);
    sections
}

//! Minimal attributed element tree on top of quick-xml.
//!
//! Peak list documents are small, so they are read fully into an [`Element`]
//! tree before mapping and written back from one.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use quick_xml::errors::IllFormedError;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{PeakListError, Result};

/// An XML element with ordered attributes, ordered child elements and text content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    pub text: String,
}

/// Output settings for serializing an element tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// Emit `<?xml version="1.0" encoding="UTF-8"?>` before the root element
    pub declaration: bool,
    /// Indent nested elements by this many spaces, or write everything on one line
    pub indent: Option<usize>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            declaration: true,
            indent: Some(2),
        }
    }
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Value of the named attribute, if present
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Sets an attribute, replacing the value in place if it already exists
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Direct children with the given tag, in document order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    pub fn first_child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// First element with the given tag, checking `self` and then its
    /// descendants depth-first in document order
    pub fn find_first(&self, name: &str) -> Option<&Element> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find_first(name))
    }

    /// Concatenated text of this element and all of its descendants
    pub fn text_content(&self) -> String {
        let mut content = self.text.clone();
        for child in &self.children {
            content.push_str(&child.text_content());
        }
        content
    }

    /// Serializes the tree rooted at this element
    pub fn write_to<W: Write>(&self, out: W, options: &WriteOptions) -> Result<()> {
        let mut writer = match options.indent {
            Some(width) => Writer::new_with_indent(out, b' ', width),
            None => Writer::new(out),
        };

        if options.declaration {
            writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        }
        write_element(&mut writer, self)
    }

    pub fn to_xml_string(&self, options: &WriteOptions) -> Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf, options)?;
        String::from_utf8(buf).map_err(|e| PeakListError::Utf8(e.utf8_error()))
    }
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() && element.text.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if !element.text.is_empty() {
        writer.write_event(Event::Text(BytesText::new(&element.text)))?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}

/// Parses an XML string into its root element
pub fn parse_str(xml_data: &str) -> Result<Element> {
    build_tree(Reader::from_str(xml_data))
}

/// Parses XML from any buffered reader into its root element
pub fn parse_reader<R: BufRead>(source: R) -> Result<Element> {
    build_tree(Reader::from_reader(source))
}

/// Reads and parses an XML file into its root element
pub fn parse_file(path: impl AsRef<Path>) -> Result<Element> {
    let file = File::open(path.as_ref())?;
    parse_reader(BufReader::new(file))
}

fn element_from_start(e: &BytesStart) -> Result<Element> {
    let mut element = Element::new(std::str::from_utf8(e.name().as_ref())?);
    for attr in e.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr.unescape_value()?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn build_tree<R: BufRead>(mut reader: Reader<R>) -> Result<Element> {
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => stack.push(element_from_start(e)?),
            Event::Empty(ref e) => {
                let element = element_from_start(e)?;
                attach(&mut stack, &mut root, element);
            }
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element);
                }
            }
            Event::Text(ref t) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&t.unescape()?);
                }
            }
            Event::CData(t) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(std::str::from_utf8(&t.into_inner())?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.pop() {
        return Err(PeakListError::Xml(quick_xml::Error::IllFormed(
            IllFormedError::MissingEndTag(open.name),
        )));
    }

    root.ok_or(PeakListError::EmptyDocument)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        // Only the first top-level element is kept
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

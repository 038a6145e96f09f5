//! Minimal element tree over the pull parser.
//!
//! The registry schema is small and read-once, so a lightweight DOM built
//! from `xml::reader` events is all the loader needs. Mixed content order is
//! preserved because command prototypes interleave text and child elements.

use xml::ParserConfig;
use xml::common::Position;
use xml::reader::XmlEvent;

use crate::error::{Result, SourceContext};

/// A child of an element: either a nested element or a run of text.
#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// One parsed XML element.
#[derive(Debug, Clone)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub nodes: Vec<Node>,
    /// (row, column) of the start tag, 0-based.
    pub position: (u64, u64),
}

impl Element {
    /// Look up an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over child elements.
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.nodes.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Iterate over child elements with the given tag name.
    pub fn children_named<'s, 'n>(&'s self, name: &'n str) -> impl Iterator<Item = &'s Element> {
        self.children().filter(move |e| e.name == name)
    }

    /// First child element with the given tag name.
    pub fn first(&self, name: &str) -> Option<&Element> {
        self.children_named(name).next()
    }

    /// Concatenated text content, including nested elements, in document
    /// order. Used for typedef declarations where the name is embedded.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.nodes {
            match node {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => e.collect_text(out),
            }
        }
    }
}

/// Parse a complete document into its root element.
///
/// Malformed XML is a fatal parse error; there is no partial-recovery path.
pub fn parse_document(ctx: &SourceContext) -> Result<Element> {
    let config = ParserConfig::new()
        .trim_whitespace(false)
        .cdata_to_characters(true)
        .ignore_comments(true);
    let mut reader = config.create_reader(ctx.src().as_bytes());

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader.next().map_err(|e| ctx.xml_error(e))?;
        let pos = reader.position();
        match event {
            XmlEvent::StartElement {
                name, attributes, ..
            } => {
                stack.push(Element {
                    name: name.local_name,
                    attributes: attributes
                        .into_iter()
                        .map(|a| (a.name.local_name, a.value))
                        .collect(),
                    nodes: Vec::new(),
                    position: (pos.row, pos.column),
                });
            }
            XmlEvent::EndElement { .. } => {
                let element = stack.pop().expect("end event without matching start");
                match stack.last_mut() {
                    Some(parent) => parent.nodes.push(Node::Element(element)),
                    None => root = Some(element),
                }
            }
            XmlEvent::Characters(text) | XmlEvent::Whitespace(text) => {
                if let Some(parent) = stack.last_mut() {
                    parent.nodes.push(Node::Text(text));
                }
            }
            XmlEvent::EndDocument => break,
            _ => {}
        }
    }

    root.ok_or_else(|| ctx.missing_element("registry", "document", None))
}

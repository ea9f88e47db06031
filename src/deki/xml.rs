/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::deki::errors::DekiError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Owned XML element tree returned by the API.
///
/// Both access styles used by the API are supported: child elements by name
/// (`<status>success</status>`) and attributes (`<page id="42">`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
    text: String,
}

impl XmlNode {
    /// Parses an XML document and returns its root element
    pub fn parse(xml: &str) -> Result<Self, DekiError> {
        let mut reader = Reader::from_str(xml);

        // Elements still waiting for their end tag
        let mut stack: Vec<XmlNode> = Vec::new();
        let mut root: Option<XmlNode> = None;

        loop {
            match reader.read_event()? {
                Event::Start(start) => stack.push(Self::from_start(&start)?),
                Event::Empty(start) => {
                    let node = Self::from_start(&start)?;
                    Self::attach(&mut stack, &mut root, node);
                }
                Event::End(_) => {
                    if let Some(node) = stack.pop() {
                        Self::attach(&mut stack, &mut root, node);
                    }
                }
                Event::Text(text) => {
                    if let Some(node) = stack.last_mut() {
                        node.text.push_str(&text.unescape()?);
                    }
                }
                Event::CData(data) => {
                    if let Some(node) = stack.last_mut() {
                        node.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => (),
            }
        }

        match (root, stack.is_empty()) {
            (Some(root), true) => Ok(root),
            _ => Err(DekiError::Decode(quick_xml::Error::Syntax(
                quick_xml::errors::SyntaxError::UnclosedTag,
            ))),
        }
    }

    fn from_start(start: &BytesStart) -> Result<Self, DekiError> {
        let mut node = XmlNode {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            ..Default::default()
        };
        for attr in start.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            node.attributes.push((
                String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
                attr.unescape_value()?.into_owned(),
            ));
        }
        Ok(node)
    }

    fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) {
        match stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => {
                // Only the first top level element counts
                if root.is_none() {
                    *root = Some(node);
                }
            }
        }
    }

    /// True for the placeholder returned for an empty response body
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.children.is_empty() && self.attributes.is_empty()
    }

    /// Value of the named attribute
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// First child element with the given name
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All child elements with the given name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Text of the first child element with the given name
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(XmlNode::text)
    }

    /// Follows a `/` separated chain of child element names, e.g. `page/title`
    pub fn find(&self, path: &str) -> Option<&XmlNode> {
        path.split('/')
            .filter(|p| !p.is_empty())
            .try_fold(self, |node, name| node.child(name))
    }

    /// Text directly inside this element.
    ///
    /// Text runs around child elements are joined as they appear, including the
    /// whitespace between them. Only the leading and trailing whitespace is removed.
    pub fn text(&self) -> &str {
        self.text.trim()
    }
}

/// Escapes `& " ' < >` for use inside XML text or attribute values
pub fn escape(value: &str) -> String {
    quick_xml::escape::escape(value).into_owned()
}

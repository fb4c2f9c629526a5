/*
** This file is a part of Littlexml (XML subset parser and writer)
** Copyright (C) 2026 Gurer Ozen
**
** Littlexml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod error;
mod iterators;
mod node;

use std::fmt::Debug;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use crate::DocumentParser;
use crate::GrowList;
use crate::NoMemory;
use crate::document::error::description;
use crate::writer;

pub use error::DocumentError;
pub use iterators::Attributes;
pub use iterators::Children;
pub use node::Attribute;
pub use node::Node;
pub use node::NodeId;

const ROOT: NodeId = NodeId(0);

/// An XML document held in memory.
///
/// The document owns every node of the tree. The root node is a
/// synthetic container without a tag name, elements of the document
/// are its children. Dropping the document releases the whole tree.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use littlexml::Document;
///
/// let doc = Document::from_str(r#"<config><port value="8080" /></config>"#)?;
/// let config = doc.root().child(0);
/// assert_eq!(config.tag(), "config");
/// assert_eq!(config.child(0).attribute("value"), Some("8080"));
/// # Ok::<(), littlexml::DocumentError>(())
/// ```
#[derive(Clone)]
pub struct Document {
    nodes: Vec<Node>,
    version: Option<String>,
    encoding: Option<String>,
}

fn is_bad_name_char(c: char) -> bool {
    c.is_ascii_whitespace() || matches!(c, '<' | '>' | '/' | '=' | '"' | '?' | '!')
}

fn check_tag_name(tag: &str) -> Result<(), DocumentError> {
    if tag.is_empty() {
        return Err(DocumentError::BadInput(description::EMPTY_TAG_NAME));
    }
    if tag.chars().any(is_bad_name_char) {
        return Err(DocumentError::BadInput(description::BAD_TAG_NAME));
    }
    Ok(())
}

fn check_attribute(key: &str, value: &str) -> Result<(), DocumentError> {
    if key.is_empty() {
        return Err(DocumentError::BadInput(description::EMPTY_ATTRIBUTE_KEY));
    }
    if key.chars().any(is_bad_name_char) {
        return Err(DocumentError::BadInput(description::BAD_ATTRIBUTE_KEY));
    }
    check_value(value)
}

fn check_value(value: &str) -> Result<(), DocumentError> {
    if value.contains('"') {
        return Err(DocumentError::BadInput(description::BAD_VALUE));
    }
    Ok(())
}

impl Document {
    /// Creates an empty document with only the root container.
    pub fn new() -> Document {
        Document {
            nodes: vec![Node::new(None)],
            version: None,
            encoding: None,
        }
    }

    /// Reads and parses the whole file at the given path.
    pub fn load(path: impl AsRef<Path>) -> Result<Document, DocumentError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        log::debug!("read {} bytes from '{}'", bytes.len(), path.display());
        Document::parse_bytes(&bytes)
    }

    /// Parses a complete document from memory with the default parser settings.
    pub fn parse_bytes(bytes: &[u8]) -> Result<Document, DocumentError> {
        DocumentParser::new().parse_bytes(bytes)
    }

    /// Writes the document into a file, indenting each nesting level
    /// with `indent` spaces. An existing file is replaced.
    pub fn write(&self, path: impl AsRef<Path>, indent: usize) -> Result<(), DocumentError> {
        let path = path.as_ref();
        let xml = self.to_string_indented(indent);
        std::fs::write(path, xml.as_bytes())?;
        log::debug!("wrote {} bytes to '{}'", xml.len(), path.display());
        Ok(())
    }

    /// Writes the document into any byte sink.
    pub fn write_to<W: Write>(&self, out: &mut W, indent: usize) -> Result<(), DocumentError> {
        out.write_all(self.to_string_indented(indent).as_bytes())?;
        Ok(())
    }

    /// Serializes the document into a string.
    pub fn to_string_indented(&self, indent: usize) -> String {
        let mut buf = String::with_capacity(self.str_size(indent));
        // Writing into a String cannot fail
        let _ = writer::write_document(self, &mut buf, indent);
        buf
    }

    /// Exact byte size of the serialized document.
    pub fn str_size(&self, indent: usize) -> usize {
        writer::document_size(self, indent)
    }

    pub fn root(&self) -> Cursor<'_> {
        self.cursor(ROOT)
    }

    pub fn root_id(&self) -> NodeId {
        ROOT
    }

    /// Returns a cursor for the node.
    ///
    /// # Panics
    ///
    /// Panics if the handle does not belong to this document.
    pub fn cursor(&self, id: NodeId) -> Cursor<'_> {
        assert!(id.0 < self.nodes.len(), "node {} is not in this document", id);
        Cursor { doc: self, id }
    }

    /// # Panics
    ///
    /// Panics if the handle does not belong to this document.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Number of element nodes, the root container is not counted.
    pub fn nr_elements(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Version from the XML declaration, if the document had one.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Encoding from the XML declaration, if the document had one.
    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    pub fn set_version(&mut self, version: Option<&str>) -> Result<(), DocumentError> {
        if let Some(version) = version {
            check_value(version)?;
        }
        self.version = version.map(str::to_string);
        Ok(())
    }

    pub fn set_encoding(&mut self, encoding: Option<&str>) -> Result<(), DocumentError> {
        if let Some(encoding) = encoding {
            check_value(encoding)?;
        }
        self.encoding = encoding.map(str::to_string);
        Ok(())
    }

    pub(crate) fn set_declaration(&mut self, version: Option<String>, encoding: Option<String>) {
        self.version = version;
        self.encoding = encoding;
    }

    /// Appends a new element as the last child of `parent`.
    pub fn insert_tag(&mut self, parent: NodeId, tag: &str) -> Result<NodeId, DocumentError> {
        check_tag_name(tag)?;
        Ok(self.append_child(parent, tag.to_string(), GrowList::new())?)
    }

    /// Appends an attribute to the node. Duplicate keys are allowed,
    /// lookups return the first one.
    pub fn insert_attribute(
        &mut self,
        node: NodeId,
        key: &str,
        value: &str,
    ) -> Result<(), DocumentError> {
        check_attribute(key, value)?;
        self.node_mut(node)
            .attributes_mut()
            .push(Attribute::new(key, value))?;
        Ok(())
    }

    /// Sets or removes the inline text of a node.
    ///
    /// Text is only written for nodes without children. Some empty
    /// string is written as `<tag></tag>` while None gives `<tag />`.
    pub fn set_text(&mut self, node: NodeId, text: Option<&str>) -> Result<(), DocumentError> {
        if node == ROOT {
            return Err(DocumentError::BadInput(description::ROOT_TEXT));
        }
        if let Some(text) = text {
            if text.contains('<') {
                return Err(DocumentError::BadInput(description::BAD_TEXT));
            }
        }
        self.node_mut(node).set_text(text.map(str::to_string));
        Ok(())
    }

    /// Returns the first attribute of the node with the given key for
    /// in place editing.
    pub fn attribute_mut(&mut self, node: NodeId, key: &str) -> Option<&mut Attribute> {
        self.node_mut(node).attribute_mut(key)
    }

    pub(crate) fn append_child(
        &mut self,
        parent: NodeId,
        tag: String,
        attributes: GrowList<Attribute>,
    ) -> Result<NodeId, NoMemory> {
        self.nodes.try_reserve(1)?;
        let id = NodeId(self.nodes.len());
        self.node_mut(parent).children_mut().push(id)?;
        let mut node = Node::new(Some(parent));
        node.set_tag(tag);
        *node.attributes_mut() = attributes;
        self.nodes.push(node);
        Ok(id)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("version", &self.version)
            .field("encoding", &self.encoding)
            .field("nr_elements", &self.nr_elements())
            .finish()
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writer::write_document(self, f, writer::DEFAULT_INDENT)
    }
}

impl FromStr for Document {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Document::parse_bytes(s.as_bytes())
    }
}

/// A read only position in the document tree.
///
/// Cursors borrow the document and are cheap to copy around. They
/// give the navigation and query operations over the nodes.
#[derive(Clone, Copy)]
pub struct Cursor<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> Cursor<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn node(&self) -> &'a Node {
        self.doc.node(self.id)
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    pub fn is_root(&self) -> bool {
        self.id == ROOT
    }

    /// Tag name of the node, empty string for the root container.
    pub fn tag(&self) -> &'a str {
        self.node().tag().unwrap_or("")
    }

    pub fn text(&self) -> Option<&'a str> {
        self.node().text()
    }

    pub fn parent(&self) -> Option<Cursor<'a>> {
        self.node().parent().map(|id| self.doc.cursor(id))
    }

    /// Number of parents between this node and the root.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut node = self.node();
        while let Some(parent) = node.parent() {
            depth += 1;
            node = self.doc.node(parent);
        }
        depth
    }

    pub fn nr_children(&self) -> usize {
        self.node().children().len()
    }

    /// Returns the child at the given position.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not less than [nr_children()](Cursor::nr_children).
    pub fn child(&self, index: usize) -> Cursor<'a> {
        self.doc.cursor(self.node().children()[index])
    }

    pub fn children(&self) -> Children<'a> {
        Children::new(*self)
    }

    /// Returns the first child with the given tag name.
    pub fn find_tag(&self, tag: &str) -> Option<Cursor<'a>> {
        self.children().find(|child| child.tag() == tag)
    }

    /// Collects every immediate child with the given tag name.
    ///
    /// The returned list is independent of the document structure.
    pub fn find_children(&self, tag: &str) -> Vec<Cursor<'a>> {
        self.children().filter(|child| child.tag() == tag).collect()
    }

    /// Value of the first attribute with the given key.
    pub fn attribute(&self, key: &str) -> Option<&'a str> {
        self.node().attribute(key)
    }

    pub fn attributes(&self) -> Attributes<'a> {
        Attributes::new(*self)
    }
}

impl Debug for Cursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cursor ({}, <{}>)", self.id, self.tag())
    }
}

impl std::fmt::Display for Cursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writer::write_subtree(self.doc, self.id, f, writer::DEFAULT_INDENT)
    }
}

impl PartialEq for Cursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl Eq for Cursor<'_> {}

#[cfg(test)]
mod tests;

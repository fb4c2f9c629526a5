/*
** This file is a part of Littlexml (XML subset parser and writer)
** Copyright (C) 2026 Gurer Ozen
**
** Littlexml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::fmt::Display;

use crate::GrowList;

/// Handle of a node inside its [Document](super::Document).
///
/// Handles are plain indices into the document's node storage. They
/// stay valid for the lifetime of the document since nodes are never
/// removed. Using a handle with a different document is a caller error.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(pub(super) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A key and value pair from a start tag.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Attribute {
    key: String,
    value: String,
}

impl Attribute {
    pub fn new(key: &str, value: &str) -> Attribute {
        Attribute {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    pub(crate) fn from_parts(key: String, value: String) -> Attribute {
        Attribute { key, value }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the value.
    ///
    /// Double quotes cannot be written back, so a value containing
    /// them is refused and false is returned.
    pub fn set_value(&mut self, value: &str) -> bool {
        if value.contains('"') {
            return false;
        }
        self.value.clear();
        self.value.push_str(value);
        true
    }

    /// Empties the value so the writer drops this attribute.
    pub fn clear_value(&mut self) {
        self.value.clear();
    }
}

/// A vertex of the document tree.
///
/// Nodes are owned by the [Document](super::Document) and are reached
/// through [NodeId] handles or [Cursor](super::Cursor)s. The parent
/// link is a handle too, it is only followed upwards and does not own
/// anything.
#[derive(Clone, Debug)]
pub struct Node {
    tag: Option<String>,
    text: Option<String>,
    parent: Option<NodeId>,
    attributes: GrowList<Attribute>,
    children: GrowList<NodeId>,
}

impl Node {
    pub(super) fn new(parent: Option<NodeId>) -> Node {
        Node {
            tag: None,
            text: None,
            parent,
            attributes: GrowList::new(),
            children: GrowList::new(),
        }
    }

    /// Tag name, None only for the synthetic document root.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn attributes(&self) -> &GrowList<Attribute> {
        &self.attributes
    }

    pub fn children(&self) -> &GrowList<NodeId> {
        &self.children
    }

    /// Returns the value of the first attribute with the given key.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.key == key)
            .map(|attr| attr.value.as_str())
    }

    /// Returns the first attribute with the given key for editing.
    pub fn attribute_mut(&mut self, key: &str) -> Option<&mut Attribute> {
        self.attributes.iter_mut().find(|attr| attr.key == key)
    }

    pub(super) fn set_tag(&mut self, tag: String) {
        // Tag names are fixed once given
        if self.tag.is_none() {
            self.tag = Some(tag);
        }
    }

    pub(crate) fn set_text(&mut self, text: Option<String>) {
        self.text = text;
    }

    pub(super) fn attributes_mut(&mut self) -> &mut GrowList<Attribute> {
        &mut self.attributes
    }

    pub(super) fn children_mut(&mut self) -> &mut GrowList<NodeId> {
        &mut self.children
    }
}

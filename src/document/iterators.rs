/*
** This file is a part of Littlexml (XML subset parser and writer)
** Copyright (C) 2026 Gurer Ozen
**
** Littlexml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::slice::Iter;

use super::Attribute;
use super::Cursor;
use super::Document;
use super::NodeId;

/// Iterator over the (key, value) pairs of a node in source order.
pub struct Attributes<'a> {
    iter: Iter<'a, Attribute>,
}

impl<'a> Attributes<'a> {
    pub(super) fn new(cursor: Cursor<'a>) -> Self {
        Attributes {
            iter: cursor.node().attributes().iter(),
        }
    }
}

impl<'a> Iterator for Attributes<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|attr| (attr.key(), attr.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// Iterator over the immediate children of a node in source order.
pub struct Children<'a> {
    doc: &'a Document,
    iter: Iter<'a, NodeId>,
}

impl<'a> Children<'a> {
    pub(super) fn new(cursor: Cursor<'a>) -> Self {
        Children {
            doc: cursor.doc,
            iter: cursor.node().children().iter(),
        }
    }
}

impl<'a> Iterator for Children<'a> {
    type Item = Cursor<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|id| self.doc.cursor(*id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|id| self.doc.cursor(*id))
    }
}

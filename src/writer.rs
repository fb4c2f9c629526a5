/*
** This file is a part of Littlexml (XML subset parser and writer)
** Copyright (C) 2026 Gurer Ozen
**
** Littlexml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::fmt::Write;

use crate::Document;
use crate::Node;
use crate::NodeId;

/// Spaces per nesting level used by the `Display` implementations.
pub const DEFAULT_INDENT: usize = 4;

const DEFAULT_VERSION: &str = "1.0";

const DEFAULT_ENCODING: &str = "UTF-8";

enum VisitorStep<'a> {
    StartTag(&'a Node, usize),
    EndTag(&'a Node, usize),
}

/// Walks a subtree in document order without recursion.
///
/// Nodes with children produce a start and an end step, leaf nodes
/// only a start step.
struct Visitor<'a> {
    doc: &'a Document,
    stack: Vec<(NodeId, usize, bool)>,
}

impl<'a> Visitor<'a> {
    fn new(doc: &'a Document, ids: &[NodeId], depth: usize) -> Visitor<'a> {
        let mut visitor = Visitor {
            doc,
            stack: Vec::new(),
        };
        visitor.push_nodes(ids, depth);
        visitor
    }

    fn push_nodes(&mut self, ids: &[NodeId], depth: usize) {
        for id in ids.iter().rev() {
            self.stack.push((*id, depth, false));
        }
    }

    fn next(&mut self) -> Option<VisitorStep<'a>> {
        let (id, depth, entered) = self.stack.pop()?;
        let node = self.doc.node(id);
        if entered {
            return Some(VisitorStep::EndTag(node, depth));
        }
        if !node.children().is_empty() {
            self.stack.push((id, depth, true));
            self.push_nodes(node.children().as_slice(), depth + 1);
        }
        Some(VisitorStep::StartTag(node, depth))
    }
}

fn is_written(value: &str) -> bool {
    !value.is_empty()
}

fn write_indent<W: Write>(out: &mut W, width: usize) -> std::fmt::Result {
    for _ in 0..width {
        out.write_char(' ')?;
    }
    Ok(())
}

fn write_nodes<W: Write>(
    mut visitor: Visitor<'_>,
    out: &mut W,
    indent: usize,
) -> std::fmt::Result {
    while let Some(step) = visitor.next() {
        match step {
            VisitorStep::StartTag(node, depth) => {
                let tag = node.tag().unwrap_or("");
                write_indent(out, depth * indent)?;
                out.write_char('<')?;
                out.write_str(tag)?;
                for attr in node.attributes() {
                    if is_written(attr.value()) {
                        write!(out, " {}=\"{}\"", attr.key(), attr.value())?;
                    }
                }
                if !node.children().is_empty() {
                    out.write_str(">\n")?;
                } else {
                    match node.text() {
                        None => out.write_str(" />\n")?,
                        Some(text) => writeln!(out, ">{}</{}>", text, tag)?,
                    }
                }
            }
            VisitorStep::EndTag(node, depth) => {
                write_indent(out, depth * indent)?;
                writeln!(out, "</{}>", node.tag().unwrap_or(""))?;
            }
        }
    }
    Ok(())
}

fn nodes_size(mut visitor: Visitor<'_>, indent: usize) -> usize {
    let mut size = 0;
    while let Some(step) = visitor.next() {
        match step {
            VisitorStep::StartTag(node, depth) => {
                let tag_size = node.tag().map_or(0, str::len);
                size += depth * indent;
                size += 1; // '<'
                size += tag_size;
                for attr in node.attributes() {
                    if is_written(attr.value()) {
                        // space, key, '="', value, '"'
                        size += 1 + attr.key().len() + 2 + attr.value().len() + 1;
                    }
                }
                if !node.children().is_empty() {
                    size += 2; // ">\n"
                } else {
                    match node.text() {
                        None => size += 4, // " />\n"
                        Some(text) => size += 1 + text.len() + 2 + tag_size + 2,
                    }
                }
            }
            VisitorStep::EndTag(node, depth) => {
                size += depth * indent;
                size += 2 + node.tag().map_or(0, str::len) + 2; // "</", tag, ">\n"
            }
        }
    }
    size
}

fn declaration(doc: &Document) -> (&str, &str) {
    (
        doc.version().unwrap_or(DEFAULT_VERSION),
        doc.encoding().unwrap_or(DEFAULT_ENCODING),
    )
}

/// Writes the declaration line and every element of the document.
pub(crate) fn write_document<W: Write>(
    doc: &Document,
    out: &mut W,
    indent: usize,
) -> std::fmt::Result {
    let (version, encoding) = declaration(doc);
    writeln!(
        out,
        "<?xml version=\"{}\" encoding=\"{}\" ?>",
        version, encoding
    )?;
    let root = doc.node(doc.root_id());
    write_nodes(Visitor::new(doc, root.children().as_slice(), 0), out, indent)
}

/// Writes a single node and its descendants without the declaration.
///
/// The root container has no tag of its own, only its children are
/// written for it.
pub(crate) fn write_subtree<W: Write>(
    doc: &Document,
    id: NodeId,
    out: &mut W,
    indent: usize,
) -> std::fmt::Result {
    let visitor = if id == doc.root_id() {
        Visitor::new(doc, doc.node(id).children().as_slice(), 0)
    } else {
        Visitor::new(doc, &[id], 0)
    };
    write_nodes(visitor, out, indent)
}

pub(crate) fn document_size(doc: &Document, indent: usize) -> usize {
    let (version, encoding) = declaration(doc);
    let declaration_size =
        "<?xml version=\"".len() + version.len() + "\" encoding=\"".len() + encoding.len()
            + "\" ?>\n".len();
    let root = doc.node(doc.root_id());
    declaration_size + nodes_size(Visitor::new(doc, root.children().as_slice(), 0), indent)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use super::*;

    const DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n";

    #[test]
    fn empty_document() {
        let doc = Document::new();
        assert_eq!(doc.to_string_indented(4), DECLARATION);
        assert_eq!(doc.str_size(4), DECLARATION.len());
    }

    #[test]
    fn leaf_forms() {
        let mut doc = Document::new();
        let root = doc.root_id();
        let list = doc.insert_tag(root, "list").unwrap();
        let empty = doc.insert_tag(list, "empty").unwrap();
        doc.insert_attribute(empty, "a", "1").unwrap();
        let blank = doc.insert_tag(list, "blank").unwrap();
        doc.set_text(blank, Some("")).unwrap();
        let text = doc.insert_tag(list, "text").unwrap();
        doc.set_text(text, Some("hello world")).unwrap();

        let expected = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n",
            "<list>\n",
            "  <empty a=\"1\" />\n",
            "  <blank></blank>\n",
            "  <text>hello world</text>\n",
            "</list>\n",
        );
        let xml = doc.to_string_indented(2);
        assert_eq!(xml, expected);
        assert_eq!(doc.str_size(2), expected.len());
    }

    #[test]
    fn indentation_width() {
        let doc = Document::from_str("<a><b><c/></b></a>").unwrap();
        let expected = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n",
            "<a>\n",
            "   <b>\n",
            "      <c />\n",
            "   </b>\n",
            "</a>\n",
        );
        assert_eq!(doc.to_string_indented(3), expected);
        assert_eq!(doc.str_size(3), expected.len());

        let flat = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n",
            "<a>\n",
            "<b>\n",
            "<c />\n",
            "</b>\n",
            "</a>\n",
        );
        assert_eq!(doc.to_string_indented(0), flat);
    }

    #[test]
    fn empty_attributes_are_dropped() {
        let doc = Document::from_str(r#"<a x="" y="2" z=""/>"#).unwrap();
        assert_eq!(doc.root().child(0).attributes().count(), 3);
        let expected = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n",
            "<a y=\"2\" />\n",
        );
        assert_eq!(doc.to_string_indented(4), expected);
        assert_eq!(doc.str_size(4), expected.len());
    }

    #[test]
    fn children_hide_text() {
        let doc = Document::from_str("<a>text<b/></a>").unwrap();
        assert_eq!(doc.root().child(0).text(), Some("text"));
        let expected = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n",
            "<a>\n",
            "    <b />\n",
            "</a>\n",
        );
        assert_eq!(doc.to_string(), expected);
        assert_eq!(format!("{}", doc), expected);
    }

    #[test]
    fn declaration_values() {
        let mut doc =
            Document::from_str(r#"<?xml version="1.1" encoding="ISO-8859-9" ?><a/>"#).unwrap();
        assert!(doc.to_string_indented(4).starts_with(
            "<?xml version=\"1.1\" encoding=\"ISO-8859-9\" ?>\n"
        ));
        doc.set_encoding(None).unwrap();
        assert!(
            doc.to_string_indented(4)
                .starts_with("<?xml version=\"1.1\" encoding=\"UTF-8\" ?>\n")
        );
    }

    #[test]
    fn subtree_display() {
        let doc = Document::from_str(r#"<a><b k="v"><c>x</c></b><d/></a>"#).unwrap();
        let b = doc.root().child(0).child(0);
        assert_eq!(b.to_string(), "<b k=\"v\">\n    <c>x</c>\n</b>\n");
        assert_eq!(b.child(0).to_string(), "<c>x</c>\n");
        assert_eq!(
            doc.root().to_string(),
            "<a>\n    <b k=\"v\">\n        <c>x</c>\n    </b>\n    <d />\n</a>\n"
        );
    }

    #[test]
    fn deep_nesting() {
        let mut doc = Document::new();
        let mut node = doc.root_id();
        for _ in 0..10000 {
            node = doc.insert_tag(node, "n").unwrap();
        }
        let xml = doc.to_string_indented(0);
        assert_eq!(xml.len(), doc.str_size(0));
        assert_eq!(xml.matches("<n>").count(), 9999);
        assert_eq!(xml.matches("<n />").count(), 1);
    }
}

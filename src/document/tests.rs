/*
** This file is a part of Littlexml (XML subset parser and writer)
** Copyright (C) 2026 Gurer Ozen
**
** Littlexml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use pretty_assertions::assert_eq;
use tempfile::tempdir;

use super::error::description::*;
use super::*;
use crate::DEFAULT_INDENT;
use crate::FormatError;

fn written_attributes<'a>(cursor: &Cursor<'a>) -> Vec<(&'a str, &'a str)> {
    cursor
        .attributes()
        .filter(|(_, value)| !value.is_empty())
        .collect()
}

fn check_same_tree(expected: Cursor, actual: Cursor) {
    assert_eq!(expected.tag(), actual.tag());
    assert_eq!(expected.text(), actual.text(), "text of <{}>", expected.tag());
    assert_eq!(written_attributes(&expected), written_attributes(&actual));
    assert_eq!(expected.nr_children(), actual.nr_children());
    for (a, b) in expected.children().zip(actual.children()) {
        check_same_tree(a, b);
    }
}

fn config_document() -> Document {
    let mut doc = Document::new();
    let root = doc.root_id();
    let config = doc.insert_tag(root, "config").unwrap();
    doc.insert_attribute(config, "name", "demo").unwrap();
    doc.insert_attribute(config, "empty", "").unwrap();

    let server = doc.insert_tag(config, "server").unwrap();
    doc.insert_attribute(server, "host", "localhost").unwrap();
    doc.insert_attribute(server, "port", "8080").unwrap();
    let motd = doc.insert_tag(server, "motd").unwrap();
    doc.set_text(motd, Some(" welcome & enjoy ")).unwrap();
    let blank = doc.insert_tag(server, "blank").unwrap();
    doc.set_text(blank, Some("")).unwrap();
    let _ = doc.insert_tag(server, "flag").unwrap();

    let users = doc.insert_tag(config, "users").unwrap();
    for name in ["ann", "bob", "cem"] {
        let user = doc.insert_tag(users, "user").unwrap();
        doc.insert_attribute(user, "id", name).unwrap();
    }
    let _ = doc.insert_tag(config, "spaces").unwrap();
    doc
}

#[test]
fn it_works() {
    let doc = config_document();
    let config = doc.root().child(0);
    assert!(doc.root().is_root());
    assert_eq!(doc.root().tag(), "");
    assert_eq!(config.tag(), "config");
    assert_eq!(config.attribute("name"), Some("demo"));
    assert_eq!(config.attribute("empty"), Some(""));
    assert_eq!(config.nr_children(), 3);
    assert_eq!(doc.nr_elements(), 10);

    let server = config.find_tag("server").unwrap();
    assert_eq!(server.attribute("port"), Some("8080"));
    assert_eq!(server.child(0).text(), Some(" welcome & enjoy "));
    assert_eq!(server.child(1).text(), Some(""));
    assert_eq!(server.child(2).text(), None);
    assert!(config.find_tag("missing").is_none());
}

#[test]
fn navigation() {
    let doc = config_document();
    let config = doc.root().child(0);
    let user = config.child(1).child(2);
    assert_eq!(user.attribute("id"), Some("cem"));
    assert_eq!(user.depth(), 3);
    assert_eq!(user.parent().unwrap().tag(), "users");
    assert_eq!(user.parent().unwrap().parent(), Some(config));
    assert_eq!(config.parent(), Some(doc.root()));
    assert_eq!(doc.root().parent(), None);
    assert_eq!(doc.root().depth(), 0);

    let tags: Vec<_> = config.children().map(|c| c.tag()).collect();
    assert_eq!(tags, vec!["server", "users", "spaces"]);
    let last = config.children().next_back().unwrap();
    assert_eq!(last.tag(), "spaces");

    assert_eq!(doc.node(user.id()).tag(), Some("user"));
    assert_eq!(doc.cursor(user.id()), user);
    assert_eq!(user.document().nr_elements(), 10);
}

#[test]
#[should_panic]
fn child_out_of_range() {
    let doc = config_document();
    let _ = doc.root().child(0).child(3);
}

#[test]
fn find_children() {
    let doc = config_document();
    let users = doc.root().child(0).find_tag("users").unwrap();
    let found = users.find_children("user");
    assert_eq!(found.len(), 3);
    let ids: Vec<_> = found.iter().filter_map(|c| c.attribute("id")).collect();
    assert_eq!(ids, vec!["ann", "bob", "cem"]);
    assert!(users.find_children("admin").is_empty());
    assert!(doc.root().find_children("user").is_empty());
}

#[test]
fn duplicate_attribute_keys() {
    let mut doc = Document::new();
    let a = doc.insert_tag(doc.root_id(), "a").unwrap();
    doc.insert_attribute(a, "k", "1").unwrap();
    doc.insert_attribute(a, "k", "2").unwrap();
    assert_eq!(doc.root().child(0).attribute("k"), Some("1"));

    let reloaded = Document::parse_bytes(doc.to_string_indented(2).as_bytes()).unwrap();
    let attributes: Vec<_> = reloaded.root().child(0).attributes().collect();
    assert_eq!(attributes, vec![("k", "1"), ("k", "2")]);
    assert_eq!(reloaded.root().child(0).attribute("k"), Some("1"));
}

#[test]
fn edit_attribute() {
    let mut doc = Document::from_str(r#"<a x="1" y="2" x="3"/>"#).unwrap();
    let a = doc.root().child(0).id();

    let attr = doc.attribute_mut(a, "x").unwrap();
    assert_eq!(attr.key(), "x");
    assert_eq!(attr.value(), "1");
    attr.clear_value();
    assert_eq!(doc.root().child(0).attribute("x"), Some(""));

    let attr = doc.attribute_mut(a, "y").unwrap();
    assert!(attr.set_value("22"));
    assert!(!attr.set_value("\"quoted\""));
    assert_eq!(attr.value(), "22");
    assert!(doc.attribute_mut(a, "z").is_none());

    assert_eq!(
        doc.to_string_indented(4),
        "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n<a y=\"22\" x=\"3\" />\n"
    );
}

#[test]
fn round_trip() {
    let doc = config_document();
    for indent in [0, 2, 4] {
        let xml = doc.to_string_indented(indent);
        let reloaded = Document::parse_bytes(xml.as_bytes()).unwrap();
        check_same_tree(doc.root(), reloaded.root());
        // Empty attributes are not written, so they do not come back
        assert_eq!(reloaded.root().child(0).attribute("empty"), None);
        assert_eq!(reloaded.version(), Some("1.0"));
        assert_eq!(reloaded.encoding(), Some("UTF-8"));
        assert_eq!(reloaded.to_string_indented(indent), xml);
    }
}

#[test]
fn self_closing_versus_empty_text() {
    let mut doc = Document::new();
    let root = doc.root_id();
    let none = doc.insert_tag(root, "none").unwrap();
    let empty = doc.insert_tag(root, "empty").unwrap();
    doc.set_text(empty, Some("")).unwrap();
    assert_eq!(doc.node(none).text(), None);

    let xml = doc.to_string_indented(4);
    assert_eq!(
        xml,
        "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n<none />\n<empty></empty>\n"
    );

    let reloaded = Document::parse_bytes(xml.as_bytes()).unwrap();
    assert_eq!(reloaded.root().child(0).text(), None);
    assert_eq!(reloaded.root().child(1).text(), Some(""));
    assert_eq!(reloaded.to_string_indented(4), xml);
}

#[test]
fn set_text() {
    let mut doc = Document::new();
    let root = doc.root_id();
    let a = doc.insert_tag(root, "a").unwrap();
    doc.set_text(a, Some("x")).unwrap();
    assert_eq!(doc.root().child(0).text(), Some("x"));
    doc.set_text(a, None).unwrap();
    assert_eq!(doc.root().child(0).text(), None);
}

#[test]
fn bad_edits() {
    let mut doc = Document::new();
    let root = doc.root_id();
    let bad_input = |result: Result<(), DocumentError>| match result {
        Err(DocumentError::BadInput(msg)) => msg,
        _ => panic!("edit was not refused"),
    };

    assert_eq!(
        bad_input(doc.insert_tag(root, "").map(|_| ())),
        EMPTY_TAG_NAME
    );
    for name in ["a b", "a/", "<a", "a=b", "?a", "!a", "a\"", "a\n"] {
        assert_eq!(bad_input(doc.insert_tag(root, name).map(|_| ())), BAD_TAG_NAME);
    }

    let a = doc.insert_tag(root, "a").unwrap();
    assert_eq!(bad_input(doc.insert_attribute(a, "", "1")), EMPTY_ATTRIBUTE_KEY);
    assert_eq!(bad_input(doc.insert_attribute(a, "k k", "1")), BAD_ATTRIBUTE_KEY);
    assert_eq!(bad_input(doc.insert_attribute(a, "k", "\"")), BAD_VALUE);
    assert_eq!(bad_input(doc.set_text(a, Some("1 < 2"))), BAD_TEXT);
    assert_eq!(bad_input(doc.set_text(root, Some("x"))), ROOT_TEXT);
    assert_eq!(bad_input(doc.set_version(Some("\"1\""))), BAD_VALUE);
    assert_eq!(bad_input(doc.set_encoding(Some("\""))), BAD_VALUE);

    assert_eq!(doc.nr_elements(), 1);
    assert_eq!(doc.root().child(0).attributes().count(), 0);
    assert_eq!(doc.root().child(0).text(), None);
}

#[test]
fn declaration() {
    let mut doc = Document::new();
    assert_eq!(doc.version(), None);
    doc.set_version(Some("1.1")).unwrap();
    doc.set_encoding(Some("ISO-8859-9")).unwrap();
    assert_eq!(doc.version(), Some("1.1"));
    assert_eq!(doc.encoding(), Some("ISO-8859-9"));
    assert_eq!(
        doc.to_string(),
        "<?xml version=\"1.1\" encoding=\"ISO-8859-9\" ?>\n"
    );
}

#[test]
fn load_and_write() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.xml");

    let doc = config_document();
    doc.write(&path, 2).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, doc.to_string_indented(2));

    let loaded = Document::load(&path).unwrap();
    check_same_tree(doc.root(), loaded.root());

    let mut buf = Vec::new();
    loaded.write_to(&mut buf, 2).unwrap();
    assert_eq!(buf, content.as_bytes());
}

#[test]
fn load_errors() {
    let dir = tempdir().unwrap();

    let missing = dir.path().join("missing.xml");
    match Document::load(&missing) {
        Err(DocumentError::Io(err)) => assert_eq!(err.kind(), std::io::ErrorKind::NotFound),
        other => panic!("unexpected result: {:?}", other),
    }

    let broken = dir.path().join("broken.xml");
    std::fs::write(&broken, "<a>\n  <b>\n</a>\n").unwrap();
    let err = Document::load(&broken).unwrap_err();
    assert_eq!(
        err.format_error(),
        Some(&FormatError::TagMismatch {
            open: "b".to_string(),
            close: "a".to_string(),
        })
    );
    let msg = err.to_string();
    assert!(msg.starts_with("invalid XML syntax at line 2"));

    let doc = Document::new();
    let unwritable = dir.path().join("no_such_dir").join("out.xml");
    assert!(matches!(doc.write(&unwritable, 4), Err(DocumentError::Io(_))));
}

#[test]
fn display_and_debug() {
    let doc = Document::from_str("<a><b/></a>").unwrap();
    assert_eq!(format!("{}", doc), doc.to_string_indented(DEFAULT_INDENT));
    assert_eq!(
        format!("{:?}", doc),
        "Document { version: None, encoding: None, nr_elements: 2 }"
    );
    let b = doc.root().child(0).child(0);
    assert_eq!(format!("{:?}", b), format!("Cursor ({}, <b>)", b.id()));
    assert_eq!(b.id().to_string(), format!("#{}", b.id().index()));
}

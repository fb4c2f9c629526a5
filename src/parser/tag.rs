/*
** This file is a part of Littlexml (XML subset parser and writer)
** Copyright (C) 2026 Gurer Ozen
**
** Littlexml is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use crate::Attribute;
use crate::DocumentError;
use crate::FormatError;
use crate::GrowList;

use super::scanner::Scanner;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum TagKind {
    Open,
    SelfClosing,
}

/// Name and attributes read from the inside of a start tag.
#[derive(Debug)]
pub(super) struct Tag {
    pub(super) kind: TagKind,
    pub(super) name: String,
    pub(super) attributes: GrowList<Attribute>,
}

impl Tag {
    pub(super) fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.key() == key)
            .map(|attr| attr.value())
    }
}

#[derive(Debug, Eq, PartialEq)]
enum State {
    Name,
    Whitespace,
    Key,
    KeyEnd,
    Equals,
    Value,
    EmptyTagEnd,
    DeclarationEnd,
}

fn tag_name(scanner: &mut Scanner) -> Result<String, DocumentError> {
    if scanner.lexeme().is_empty() {
        format_error!(scanner, FormatError::BadTagName);
    }
    scanner.take_string()
}

/// Parses a tag from the byte after its `<` up to and including its `>`.
///
/// Declarations are parsed with `is_declaration`, where the `?` before
/// the final `>` ends the tag instead of starting a key.
pub(super) fn parse_tag(scanner: &mut Scanner, is_declaration: bool) -> Result<Tag, DocumentError> {
    let mut state = State::Name;
    let mut name = String::new();
    let mut key: Option<String> = None;
    let mut attributes = GrowList::new();

    scanner.clear();
    loop {
        let c = scanner.expect_byte()?;
        match state {
            State::Name => match c {
                whitespace!() => {
                    name = tag_name(scanner)?;
                    state = State::Whitespace;
                }
                b'/' => {
                    name = tag_name(scanner)?;
                    state = State::EmptyTagEnd;
                }
                b'?' if is_declaration => {
                    name = tag_name(scanner)?;
                    state = State::DeclarationEnd;
                }
                b'>' => {
                    name = tag_name(scanner)?;
                    break;
                }
                b'"' => format_error!(scanner, FormatError::ValueWithoutKey),
                b'<' | b'=' => format_error!(scanner, FormatError::BadTagName),
                _ => scanner.push(c)?,
            },
            State::Whitespace => match c {
                whitespace!() => (),
                b'/' => state = State::EmptyTagEnd,
                b'?' if is_declaration => state = State::DeclarationEnd,
                b'>' => break,
                b'"' | b'=' => format_error!(scanner, FormatError::ValueWithoutKey),
                b'<' => format_error!(scanner, FormatError::UnexpectedCharacter('<')),
                _ => {
                    scanner.push(c)?;
                    state = State::Key;
                }
            },
            State::Key => match c {
                b'=' => {
                    key = Some(scanner.take_string()?);
                    state = State::Equals;
                }
                whitespace!() => {
                    key = Some(scanner.take_string()?);
                    state = State::KeyEnd;
                }
                b'"' | b'/' | b'>' | b'<' => {
                    format_error!(scanner, FormatError::AttributeWithoutValue)
                }
                b'?' if is_declaration => {
                    format_error!(scanner, FormatError::AttributeWithoutValue)
                }
                _ => scanner.push(c)?,
            },
            State::KeyEnd => match c {
                whitespace!() => (),
                b'=' => state = State::Equals,
                _ => format_error!(scanner, FormatError::AttributeWithoutValue),
            },
            State::Equals => match c {
                whitespace!() => (),
                b'"' => state = State::Value,
                _ => format_error!(scanner, FormatError::MissingQuote),
            },
            State::Value => match c {
                b'"' => {
                    let value = scanner.take_string()?;
                    match key.take() {
                        Some(key) => attributes.push(Attribute::from_parts(key, value))?,
                        None => format_error!(scanner, FormatError::ValueWithoutKey),
                    }
                    state = State::Whitespace;
                }
                _ => scanner.push(c)?,
            },
            State::EmptyTagEnd => match c {
                b'>' => {
                    return Ok(Tag {
                        kind: TagKind::SelfClosing,
                        name,
                        attributes,
                    });
                }
                _ => format_error!(scanner, FormatError::UnexpectedCharacter('/')),
            },
            State::DeclarationEnd => match c {
                b'>' => break,
                _ => format_error!(scanner, FormatError::UnexpectedCharacter('?')),
            },
        }
    }

    Ok(Tag {
        kind: TagKind::Open,
        name,
        attributes,
    })
}
